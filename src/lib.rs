//! manifest-lint
//!
//! Validation of Pod manifests against a fixed set of structural and
//! semantic rules.
//!
//! This library provides:
//! - The typed manifest document model
//! - The validation engine and its report
//! - Manifest loading and diagnostic rendering
//! - Configuration management

pub mod config;
pub mod diagnostics;
pub mod document;
pub mod loader;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use document::Document;
pub use loader::{load_file, parse_document, LoadError, Source};
pub use validation::{validate, Policy, Report, RuleId, Validator, Violation};
