//! Error types for usage view operations.
//!
//! This module provides the main error type [`UsageViewError`]. Building and
//! rendering trees never fail; errors come from configuration, policy
//! construction and reading occurrence input.

use std::{io, ops::Range};

use thiserror::Error;

use crate::policy::PolicyError;

/// The main error type for usage view operations.
///
/// # Diagnostic Variants
///
/// The `Input` variant keeps the offending source text and, when known, the
/// byte range of the problem so callers can point at it.
#[derive(Debug, Error)]
pub enum UsageViewError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid grouping policy: {0}")]
    Policy(#[from] PolicyError),

    #[error("{message}")]
    Input {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl UsageViewError {
    /// Create a new `Input` error with the associated source text.
    pub fn new_input_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Input {
            message: message.into(),
            span,
            src: src.into(),
        }
    }
}
