//! Usage View Core Types and Definitions
//!
//! This crate provides the foundational types for grouping found occurrences
//! into usage trees. It includes:
//!
//! - **Labels**: Interned group labels ([`label::Label`])
//! - **Dimensions**: The closed set of grouping axes ([`dimension::Dimension`])
//! - **Occurrences**: Located results and their attributes ([`occurrence`] module)
//! - **Providers**: Per-dimension classification of occurrences ([`provider`] module)

pub mod dimension;
pub mod label;
pub mod occurrence;
pub mod provider;
