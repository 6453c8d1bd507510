//! CLI logic for the usage view tool.
//!
//! This module reads an occurrence list, groups it with the configured
//! policy and writes the rendered tree.

pub mod config;
pub mod error_adapter;
pub mod input;

mod args;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::{debug, info};

use usage_view::{
    UsageViewBuilder, UsageViewError,
    config::{AppConfig, PresentationConfig},
    dimension::Dimension,
    policy::PolicyError,
};

/// Run the usage view CLI application
///
/// This function loads configuration, applies command-line overrides, groups
/// the occurrences from the input file and writes the rendered tree to the
/// output file or stdout.
///
/// # Errors
///
/// Returns `UsageViewError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Unknown or repeated dimension names
/// - Malformed input
pub fn run(args: &Args) -> Result<(), UsageViewError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing occurrences"
    );

    let app_config = apply_overrides(config::load_config(args.config.as_ref())?, args)?;
    let builder = UsageViewBuilder::new(app_config)?;

    if let Some(path) = &args.save_config {
        let effective = AppConfig::new(
            builder.policy().to_settings(),
            builder.config().presentation().clone(),
        );
        config::save_config(path, &effective)?;
    }

    let source = fs::read_to_string(&args.input)?;
    let occurrences = input::parse_occurrences(&source)?;

    let tree = builder.build(&occurrences);
    let text = builder.render_text(&tree);

    match &args.output {
        Some(path) => {
            fs::write(path, text)?;
            info!(output_file = path; "Usage tree written");
        }
        None => io::stdout().lock().write_all(text.as_bytes())?,
    }

    Ok(())
}

/// Applies `--enable`, `--disable`, `--order` and `--collapsed` on top of the
/// loaded configuration.
fn apply_overrides(mut config: AppConfig, args: &Args) -> Result<AppConfig, UsageViewError> {
    let grouping = config.grouping_mut();
    for name in &args.enable {
        grouping.set_grouped_by(parse_dimension(name)?, true);
    }
    for name in &args.disable {
        grouping.set_grouped_by(parse_dimension(name)?, false);
    }
    if !args.order.is_empty() {
        grouping.dimension_order = args.order.clone();
    }

    if args.collapsed {
        let root_label = config.presentation().root_label().to_string();
        config = AppConfig::new(
            config.grouping().clone(),
            PresentationConfig::new(root_label, false),
        );
    }

    debug!(config:?; "Effective configuration");
    Ok(config)
}

fn parse_dimension(name: &str) -> Result<Dimension, UsageViewError> {
    name.parse::<Dimension>()
        .map_err(|err| UsageViewError::Policy(PolicyError::from(err)))
}
