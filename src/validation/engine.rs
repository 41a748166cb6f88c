//! Validation Engine
//!
//! Rule evaluation over a parsed manifest, separated from loading and output
//! concerns. Rules run depth-first in a fixed order: document header, pod
//! spec, then each container in input order (name, image, ports, probes,
//! resources).

use std::sync::LazyLock;

use regex::Regex;

use super::policy::Policy;
use super::report::{Report, RuleId};
use crate::document::{Container, Document, Probe, ResourceLimits, ResourceRequirements};

pub const SUPPORTED_API_VERSION: &str = "v1";
pub const SUPPORTED_KIND: &str = "Pod";
pub const SUPPORTED_OS: [&str; 2] = ["linux", "windows"];
pub const SUPPORTED_PROTOCOLS: [&str; 2] = ["TCP", "UDP"];

pub const MIN_PORT: i64 = 1;
pub const MAX_PORT: i64 = 65535;

static CONTAINER_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("container name pattern"));

static MEMORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(Ki|Mi|Gi)$").expect("memory pattern"));

/// Validate a document with the default policy
pub fn validate(doc: &Document) -> Report {
    Validator::default().validate(doc)
}

/// Whether `port` is a usable TCP/UDP port number
pub fn port_in_range(port: i64) -> bool {
    (MIN_PORT..=MAX_PORT).contains(&port)
}

/// Whether `memory` is a whole number followed by a binary unit suffix
pub fn is_valid_memory(memory: &str) -> bool {
    MEMORY_RE.is_match(memory)
}

/// Rule evaluator bound to a policy
#[derive(Debug, Clone)]
pub struct Validator {
    policy: Policy,
    image_re: Regex,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(Policy::default()).expect("default image pattern")
    }
}

impl Validator {
    pub fn new(policy: Policy) -> Result<Self, regex::Error> {
        let image_re = Regex::new(&format!(
            r"^{}/.+:[a-zA-Z0-9_.-]+$",
            regex::escape(&policy.image_registry)
        ))?;
        Ok(Self { policy, image_re })
    }

    /// Validate an entire document
    pub fn validate(&self, doc: &Document) -> Report {
        let mut report = Report::new();

        validate_header(doc, &mut report);
        validate_pod_spec(doc, &mut report);

        for (idx, container) in doc.spec.containers.iter().enumerate() {
            self.validate_container(idx, container, &mut report);
        }

        if self.policy.fail_fast {
            report.truncate(1);
        }

        log::debug!(
            "validated manifest '{}': {} violation(s)",
            doc.metadata.name,
            report.len()
        );

        report
    }

    fn validate_container(&self, idx: usize, container: &Container, report: &mut Report) {
        let base = format!("spec.containers[{}]", idx);

        let name_path = format!("{}.name", base);
        if container.name.trim().is_empty() {
            report.add(
                RuleId::ContainerName,
                &name_path,
                "name",
                format!("{} is required", name_path),
            );
        } else if self.policy.enforce_name_format && !CONTAINER_NAME_RE.is_match(&container.name)
        {
            report.add(
                RuleId::ContainerName,
                &name_path,
                "name",
                format!("{} has invalid format '{}'", name_path, container.name),
            );
        }

        let image_path = format!("{}.image", base);
        if container.image.trim().is_empty() {
            report.add(
                RuleId::ContainerImage,
                &image_path,
                "image",
                format!("{} is required", image_path),
            );
        } else if !self.image_re.is_match(&container.image) {
            report.add(
                RuleId::ContainerImage,
                &image_path,
                "image",
                format!("{} has invalid format '{}'", image_path, container.image),
            );
        }

        self.validate_ports(&base, container, report);

        if let Some(probe) = &container.readiness_probe {
            validate_probe(&format!("{}.readinessProbe", base), probe, report);
        }
        if let Some(probe) = &container.liveness_probe {
            validate_probe(&format!("{}.livenessProbe", base), probe, report);
        }

        match &container.resources {
            Some(resources) => validate_resources(&format!("{}.resources", base), resources, report),
            None if self.policy.require_resources => {
                let path = format!("{}.resources", base);
                report.add(
                    RuleId::ResourcesRequired,
                    &path,
                    "resources",
                    format!("{} is required", path),
                );
            }
            None => {}
        }
    }

    fn validate_ports(&self, base: &str, container: &Container, report: &mut Report) {
        if container.ports.is_empty() && self.policy.require_ports {
            let path = format!("{}.ports", base);
            report.add(
                RuleId::PortsRequired,
                &path,
                "ports",
                format!("{} is required", path),
            );
            return;
        }

        for (idx, port) in container.ports.iter().enumerate() {
            let port_base = format!("{}.ports[{}]", base, idx);

            if !port_in_range(port.container_port) {
                let path = format!("{}.containerPort", port_base);
                report.add(
                    RuleId::ContainerPort,
                    &path,
                    "containerPort",
                    format!(
                        "{} value out of range: {} (expected {}-{})",
                        path, port.container_port, MIN_PORT, MAX_PORT
                    ),
                );
            }

            // An empty protocol is the same as an absent one
            if let Some(protocol) = port.protocol.as_deref().filter(|p| !p.is_empty()) {
                if !SUPPORTED_PROTOCOLS.contains(&protocol) {
                    let path = format!("{}.protocol", port_base);
                    report.add(
                        RuleId::PortProtocol,
                        &path,
                        "protocol",
                        format!("{} has unsupported value '{}'", path, protocol),
                    );
                }
            }
        }
    }
}

fn validate_header(doc: &Document, report: &mut Report) {
    if doc.api_version != SUPPORTED_API_VERSION {
        report.add(
            RuleId::ApiVersion,
            "apiVersion",
            "apiVersion",
            format!("apiVersion has unsupported value '{}'", doc.api_version),
        );
    }

    if doc.kind != SUPPORTED_KIND {
        report.add(
            RuleId::Kind,
            "kind",
            "kind",
            format!("kind has unsupported value '{}'", doc.kind),
        );
    }

    if doc.metadata.name.trim().is_empty() {
        report.add(
            RuleId::MetadataName,
            "metadata.name",
            "name",
            "metadata.name is required".to_string(),
        );
    }
}

fn validate_pod_spec(doc: &Document, report: &mut Report) {
    if !SUPPORTED_OS.contains(&doc.spec.os.as_str()) {
        report.add(
            RuleId::SpecOs,
            "spec.os",
            "os",
            format!("spec.os has unsupported value '{}'", doc.spec.os),
        );
    }

    if doc.spec.containers.is_empty() {
        report.add(
            RuleId::ContainersRequired,
            "spec.containers",
            "containers",
            "spec.containers is required".to_string(),
        );
    }
}

fn validate_probe(base: &str, probe: &Probe, report: &mut Report) {
    if !port_in_range(probe.http_get.port) {
        let path = format!("{}.httpGet.port", base);
        report.add(
            RuleId::ProbePort,
            &path,
            "port",
            format!(
                "{} value out of range: {} (expected {}-{})",
                path, probe.http_get.port, MIN_PORT, MAX_PORT
            ),
        );
    }
}

fn validate_resources(base: &str, resources: &ResourceRequirements, report: &mut Report) {
    let limits_base = format!("{}.limits", base);
    validate_quantities(&limits_base, &resources.limits, true, report);

    if let Some(requests) = &resources.requests {
        let requests_base = format!("{}.requests", base);
        validate_quantities(&requests_base, requests, false, report);
    }
}

/// Check cpu and memory of a limits or requests block. Both fields are
/// mandatory in limits; in requests they are only format-checked.
fn validate_quantities(base: &str, quantities: &ResourceLimits, is_limit: bool, report: &mut Report) {
    let (cpu_rule, memory_rule) = if is_limit {
        (RuleId::CpuLimit, RuleId::MemoryLimit)
    } else {
        (RuleId::CpuRequest, RuleId::MemoryRequest)
    };

    let cpu_path = format!("{}.cpu", base);
    match &quantities.cpu {
        Some(cpu) if cpu.as_positive_integer().is_none() => {
            report.add(
                cpu_rule,
                &cpu_path,
                "cpu",
                format!("{} must be a positive integer, got '{}'", cpu_path, cpu),
            );
        }
        Some(_) => {}
        None if is_limit => {
            report.add(
                cpu_rule,
                &cpu_path,
                "cpu",
                format!("{} is required and must be positive", cpu_path),
            );
        }
        None => {}
    }

    let memory_path = format!("{}.memory", base);
    match quantities.memory.as_deref() {
        None | Some("") if is_limit => {
            report.add(
                memory_rule,
                &memory_path,
                "memory",
                format!("{} is required", memory_path),
            );
        }
        None => {}
        Some(memory) if !is_valid_memory(memory) => {
            report.add(
                memory_rule,
                &memory_path,
                "memory",
                format!("{} has invalid format '{}'", memory_path, memory),
            );
        }
        Some(_) => {}
    }
}
