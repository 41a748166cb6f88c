//! Validation Report
//!
//! Structured violations, kept apart from how they are rendered.

use serde::Serialize;
use std::fmt;

/// Stable identifier of a validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    ApiVersion,
    Kind,
    MetadataName,
    SpecOs,
    ContainersRequired,
    ContainerName,
    ContainerImage,
    PortsRequired,
    ContainerPort,
    PortProtocol,
    ProbePort,
    ResourcesRequired,
    CpuLimit,
    MemoryLimit,
    CpuRequest,
    MemoryRequest,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::ApiVersion => "api-version",
            RuleId::Kind => "kind",
            RuleId::MetadataName => "metadata-name",
            RuleId::SpecOs => "spec-os",
            RuleId::ContainersRequired => "containers-required",
            RuleId::ContainerName => "container-name",
            RuleId::ContainerImage => "container-image",
            RuleId::PortsRequired => "ports-required",
            RuleId::ContainerPort => "container-port",
            RuleId::PortProtocol => "port-protocol",
            RuleId::ProbePort => "probe-port",
            RuleId::ResourcesRequired => "resources-required",
            RuleId::CpuLimit => "cpu-limit",
            RuleId::MemoryLimit => "memory-limit",
            RuleId::CpuRequest => "cpu-request",
            RuleId::MemoryRequest => "memory-request",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule: RuleId,
    /// Full field path, e.g. `spec.containers[0].ports[1].containerPort`
    pub path: String,
    /// YAML key of the offending field, used for line lookup
    #[serde(skip)]
    pub field: &'static str,
    pub message: String,
}

/// Result of validating one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    violations: Vec<Violation>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        rule: RuleId,
        path: impl Into<String>,
        field: &'static str,
        message: String,
    ) {
        self.violations.push(Violation {
            rule,
            path: path.into(),
            field,
            message,
        });
    }

    pub fn is_valid(&self) -> bool {
        self.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// Whether any violation was raised by `rule`
    pub fn has_rule(&self, rule: RuleId) -> bool {
        self.violations.iter().any(|v| v.rule == rule)
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.violations.truncate(len);
    }
}
