//! Validation Policy
//!
//! The variant rules the engine can be configured with. Everything else in
//! the rule catalog is fixed.

/// Registry host every container image must be pulled from by default
pub const DEFAULT_IMAGE_REGISTRY: &str = "registry.bigbrother.io";

/// Knobs for the rules that differ between deployments
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    /// Stop the report at the first violation instead of collecting all of them
    pub fail_fast: bool,
    /// Container names must be lowercase alphanumerics and underscores
    pub enforce_name_format: bool,
    /// Every container must declare at least one port
    pub require_ports: bool,
    /// Every container must declare a `resources` block
    pub require_resources: bool,
    /// Host prefix required on container images
    pub image_registry: String,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            fail_fast: false,
            enforce_name_format: true,
            require_ports: false,
            require_resources: true,
            image_registry: DEFAULT_IMAGE_REGISTRY.to_string(),
        }
    }
}
