//! Integration tests for the UsageViewBuilder API
//!
//! These tests group small occurrence sets end to end and compare the
//! rendered text.

use usage_view::{
    TreeBuilder, UsageViewBuilder,
    config::{AppConfig, PresentationConfig, ViewSettings},
    dimension::Dimension,
    expansion::ExpansionState,
    occurrence::{LocatedItem, Occurrence, OccurrenceId, Scope, UsageKind},
    policy::GroupingPolicy,
    presenter::Presenter,
    settings::{MemorySettings, SettingsStore},
};

fn hello_occurrence(module: &str) -> Occurrence {
    Occurrence::new(
        OccurrenceId::new(0),
        LocatedItem::new("main/A.txt", 1, "hello"),
    )
    .with_kind(UsageKind::NonCode)
    .with_module(module)
}

/// Settings with usage type, package and file structure grouping off.
fn module_and_file_settings() -> ViewSettings {
    ViewSettings {
        group_by_usage_type: false,
        group_by_package: false,
        group_by_file_structure: false,
        ..ViewSettings::default()
    }
}

fn render_with_store(store: &impl SettingsStore, occurrences: &[Occurrence]) -> String {
    let policy = store.policy().expect("Settings should form a valid policy");
    let tree = TreeBuilder::new(&policy).build(occurrences);
    Presenter::new("Usage").render(&tree, &ExpansionState::expanded())
}

#[test]
fn test_builder_api_exists() {
    let builder = UsageViewBuilder::default();
    assert_eq!(builder.config(), &AppConfig::default());
    assert_eq!(builder.policy(), &GroupingPolicy::default());
}

#[test]
fn test_non_code_usage_in_module() {
    let mut store = MemorySettings::default();
    let occurrences = vec![hello_occurrence("main")];
    let before = render_with_store(&store, &occurrences);

    let text = {
        let mut scoped = store.scoped();
        scoped.set(module_and_file_settings());
        render_with_store(&*scoped, &occurrences)
    };

    assert_eq!(
        text,
        "Usage (1 usage)\n Non-code usages (1 usage)\n  main (1 usage)\n   A.txt (1 usage)\n    1hello\n"
    );
    assert_eq!(store.get(), ViewSettings::default());
    assert_eq!(render_with_store(&store, &occurrences), before);
}

#[test]
fn test_qualified_module_names_nest() {
    let mut store = MemorySettings::default();
    let occurrences = vec![hello_occurrence("xxx.main")];
    let before = render_with_store(&store, &occurrences);

    let text = {
        let mut scoped = store.scoped();
        scoped.set(ViewSettings {
            qualified_module_names: true,
            flatten_modules: false,
            ..module_and_file_settings()
        });
        render_with_store(&*scoped, &occurrences)
    };

    assert_eq!(
        text,
        "Usage (1 usage)\n Non-code usages (1 usage)\n  xxx (1 usage)\n   main (1 usage)\n    A.txt (1 usage)\n     1hello\n"
    );
    assert_eq!(store.get(), ViewSettings::default());
    assert_eq!(render_with_store(&store, &occurrences), before);
    assert_ne!(text, before);
}

#[test]
fn test_qualified_module_names_flattened() {
    let occurrences = vec![hello_occurrence("xxx.main")];
    let grouping = ViewSettings {
        qualified_module_names: true,
        ..module_and_file_settings()
    };
    let builder = UsageViewBuilder::new(AppConfig::new(grouping, PresentationConfig::default()))
        .expect("Default order is valid");

    let text = builder.render_text(&builder.build(&occurrences));

    assert_eq!(
        text,
        "Usage (1 usage)\n Non-code usages (1 usage)\n  xxx.main (1 usage)\n   A.txt (1 usage)\n    1hello\n"
    );
}

#[test]
fn test_rebuild_is_idempotent() {
    let occurrences = vec![
        hello_occurrence("main"),
        Occurrence::new(OccurrenceId::new(1), LocatedItem::new("main/B.rs", 4, "fn b()"))
            .with_module("main")
            .with_scope(Scope::Test),
        Occurrence::new(OccurrenceId::new(2), LocatedItem::new("util/C.rs", 9, "c()"))
            .with_module("util"),
    ];
    let builder = UsageViewBuilder::default();

    let first = builder.render_text(&builder.build(&occurrences));
    let second = builder.render_text(&builder.build(&occurrences));

    assert_eq!(first, second);
}

#[test]
fn test_dimension_order_from_config() {
    let occurrences = vec![hello_occurrence("main")];
    let grouping = ViewSettings {
        dimension_order: vec!["file".to_string(), "module".to_string()],
        ..module_and_file_settings()
    };
    let builder = UsageViewBuilder::new(AppConfig::new(grouping, PresentationConfig::default()))
        .expect("Order names known dimensions");

    let text = builder.render_text(&builder.build(&occurrences));

    assert_eq!(
        text,
        "Usage (1 usage)\n A.txt (1 usage)\n  main (1 usage)\n   Non-code usages (1 usage)\n    1hello\n"
    );
}

#[test]
fn test_unknown_dimension_in_config() {
    let grouping = ViewSettings {
        dimension_order: vec!["colour".to_string()],
        ..ViewSettings::default()
    };

    let result = UsageViewBuilder::new(AppConfig::new(grouping, PresentationConfig::default()));

    assert!(result.is_err());
}

#[test]
fn test_collapsed_presentation() {
    let occurrences = vec![hello_occurrence("main")];
    let config = AppConfig::new(ViewSettings::default(), PresentationConfig::new("Found", false));
    let builder = UsageViewBuilder::new(config).expect("Default settings are valid");

    let text = builder.render_text(&builder.build(&occurrences));

    assert_eq!(text, "Found (1 usage)\n");
}

#[test]
fn test_toggle_dimension_between_builds() {
    let occurrences = vec![hello_occurrence("main")];
    let mut policy = GroupingPolicy::from_settings(&module_and_file_settings())
        .expect("Default order is valid");

    let with_module = UsageViewBuilder::with_policy(AppConfig::default(), policy.clone());
    let text = with_module.render_text(&with_module.build(&occurrences));
    assert!(text.contains("  main (1 usage)\n"));

    policy.enable_dimension(Dimension::Module, false);
    let without_module = UsageViewBuilder::with_policy(AppConfig::default(), policy);
    let text = without_module.render_text(&without_module.build(&occurrences));

    assert_eq!(
        text,
        "Usage (1 usage)\n Non-code usages (1 usage)\n  A.txt (1 usage)\n   1hello\n"
    );
}
