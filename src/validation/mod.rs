//! Validation Engine
//!
//! Clean separation of validation logic from loading and output concerns.

pub mod engine;
pub mod policy;
pub mod report;

pub use engine::{is_valid_memory, port_in_range, validate, Validator};
pub use policy::Policy;

// Re-export common types
pub use report::{Report, RuleId, Violation};
