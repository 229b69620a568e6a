//! Run configuration loading.
//!
//! A run configuration names the topology parameters and the endpoints to
//! build over. It is read from YAML, optionally overridden from the command
//! line, then resolved into a validated [`TopologyConfig`] and an endpoint
//! list.

use crate::config::{InvalidConfigError, RawTopologyConfig, TopologyConfig};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Name prefix for generated endpoint names
pub const DEFAULT_ENDPOINT_PREFIX: &str = "controller";

/// How the endpoints of a run are given
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum EndpointSpec {
    /// Explicit names, in order
    Names(Vec<String>),
    /// `count` generated names, `<prefix><index>`
    Count {
        count: usize,
        #[serde(default = "default_prefix")]
        prefix: String,
    },
}

fn default_prefix() -> String {
    DEFAULT_ENDPOINT_PREFIX.to_string()
}

impl EndpointSpec {
    pub fn count(count: usize) -> Self {
        Self::Count {
            count,
            prefix: default_prefix(),
        }
    }

    /// Expand into the ordered endpoint names
    pub fn names(&self) -> Vec<String> {
        match self {
            Self::Names(names) => names.clone(),
            Self::Count { count, prefix } => (0..*count).map(|i| format!("{}{}", prefix, i)).collect(),
        }
    }
}

/// Contents of a run configuration file
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RunConfig {
    #[serde(default)]
    pub topology: RawTopologyConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<EndpointSpec>,
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub topology: Option<String>,
    pub endpoints: Option<usize>,
    pub hop_latency: Option<i64>,
    pub flit_size: Option<i64>,
}

/// Load and parse a run configuration from a YAML file
pub fn load_run_config(config_path: &Path) -> Result<RunConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration file '{}'", config_path.display()))?;

    let config: RunConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration file '{}'", config_path.display()))?;

    Ok(config)
}

/// Apply command-line overrides to a run configuration
pub fn apply_overrides(config: &mut RunConfig, overrides: &CliOverrides) {
    if let Some(kind) = &overrides.topology {
        info!("Overriding topology kind: {}", kind);
        config.topology.kind = kind.clone();
    }
    if let Some(count) = overrides.endpoints {
        info!("Overriding endpoint count: {}", count);
        config.endpoints = Some(EndpointSpec::count(count));
    }
    if let Some(hop_latency) = overrides.hop_latency {
        config.topology.hop_latency = hop_latency;
    }
    if let Some(flit_size) = overrides.flit_size {
        config.topology.flit_size = flit_size;
    }
}

/// Resolve a run configuration into build inputs
///
/// # Returns
/// * `Ok((TopologyConfig, Vec<String>))` - Validated parameters and endpoint names
/// * `Err(InvalidConfigError)` - If any value is rejected, or no endpoints are given
pub fn resolve_run_config(config: RunConfig) -> Result<(TopologyConfig, Vec<String>), InvalidConfigError> {
    let topology = TopologyConfig::try_from(config.topology)?;
    let endpoints = config.endpoints.map(|spec| spec.names()).unwrap_or_default();
    topology.validate(endpoints.len())?;
    Ok((topology, endpoints))
}
