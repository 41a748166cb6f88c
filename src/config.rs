//! Configuration management for manifest-lint.
//!
//! Handles:
//! - Command-line argument parsing
//! - Policy file discovery and loading (TOML)

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::validation::Policy;

/// Policy file looked up in the working directory
pub const PROJECT_CONFIG_NAME: &str = ".manifest-lint.toml";

/// Command-line arguments for manifest-lint
#[derive(Debug, Parser)]
#[command(name = "manifest-lint")]
#[command(about = "Validate Pod manifests against workload rules")]
#[command(version)]
pub struct Args {
    /// Manifest to validate
    #[arg(short, long, help = "Path to the YAML manifest")]
    pub file: PathBuf,

    /// Explicit policy file, bypassing discovery
    #[arg(long, help = "Policy file (TOML) to use instead of the discovered one")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Report only the first violation
    #[arg(long)]
    pub fail_fast: bool,

    /// Log level
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Policy file structure (matches TOML)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyFile {
    pub policy: PolicySection,
}

/// `[policy]` table; unset keys keep the built-in defaults
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PolicySection {
    pub fail_fast: Option<bool>,
    pub enforce_name_format: Option<bool>,
    pub require_ports: Option<bool>,
    pub require_resources: Option<bool>,
    pub image_registry: Option<String>,
}

impl PolicySection {
    fn apply(self, policy: &mut Policy) {
        if let Some(fail_fast) = self.fail_fast {
            policy.fail_fast = fail_fast;
        }
        if let Some(enforce) = self.enforce_name_format {
            policy.enforce_name_format = enforce;
        }
        if let Some(require) = self.require_ports {
            policy.require_ports = require;
        }
        if let Some(require) = self.require_resources {
            policy.require_resources = require;
        }
        if let Some(registry) = self.image_registry {
            policy.image_registry = registry;
        }
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Manifest to validate
    pub file: PathBuf,
    pub format: OutputFormat,
    /// Effective validation policy
    pub policy: Policy,
    /// Policy file that was applied, if any
    pub policy_file: Option<PathBuf>,
}

impl Config {
    /// Create configuration from parsed command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let policy_file = match args.config {
            Some(path) => Some(path),
            None => discover_policy_file(),
        };

        let mut policy = Policy::default();
        if let Some(path) = &policy_file {
            log::info!("using policy file {:?}", path);
            load_policy_file(path)?.policy.apply(&mut policy);
        }

        // CLI flag wins over the file
        if args.fail_fast {
            policy.fail_fast = true;
        }

        Ok(Config {
            file: args.file,
            format: args.format,
            policy,
            policy_file,
        })
    }

    pub fn has_policy_file(&self) -> bool {
        self.policy_file.is_some()
    }
}

/// Read and parse a policy file
pub fn load_policy_file(path: &Path) -> Result<PolicyFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read policy file {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse policy file {:?}", path))
}

/// Project file first, then the user config directory
fn discover_policy_file() -> Option<PathBuf> {
    let mut candidates = vec![PathBuf::from(PROJECT_CONFIG_NAME)];

    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("manifest-lint").join("config.toml"));
    }

    candidates.into_iter().find(|path| path.is_file())
}
