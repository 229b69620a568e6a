//! Topology configuration and validation.
//!
//! A [`TopologyConfig`] is the small record every builder consumes alongside
//! the ordered endpoint list. Validation is eager: nothing is allocated for a
//! graph until the configuration and the endpoint count have been checked.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default cycle cost of a router hop
pub const DEFAULT_HOP_LATENCY: u32 = 1;

/// Default network-interface flit size
pub const DEFAULT_FLIT_SIZE: u32 = 4;

/// Connectivity shape to generate for the endpoints
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopologyKind {
    /// 2D grid, each router wired to its east and south neighbours
    #[serde(rename = "mesh")]
    Mesh,
    /// Complete graph, every router wired to every other router
    #[serde(rename = "all2all")]
    AllToAll,
}

impl TopologyKind {
    /// Canonical name used in configuration files and output file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mesh => "mesh",
            Self::AllToAll => "all2all",
        }
    }
}

impl fmt::Display for TopologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopologyKind {
    type Err = InvalidConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mesh" => Ok(Self::Mesh),
            "all2all" | "all-to-all" | "alltoall" => Ok(Self::AllToAll),
            _ => Err(InvalidConfigError::UnknownTopology(s.to_string())),
        }
    }
}

/// The only error a topology build can produce.
///
/// Each variant names the reason the request was rejected. No graph is ever
/// returned alongside one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidConfigError {
    #[error("topology requires at least one endpoint")]
    NoEndpoints,

    #[error("{field} must be a positive integer, got {value}")]
    NonPositive { field: &'static str, value: i64 },

    #[error("{field} value {value} is too large")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("unknown topology kind '{0}' (expected 'mesh' or 'all2all')")]
    UnknownTopology(String),

    #[error("{builder} builder cannot build a {requested} topology")]
    KindMismatch {
        builder: TopologyKind,
        requested: TopologyKind,
    },
}

/// Parameters for a single topology build
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct TopologyConfig {
    /// Which builder the request is for
    pub kind: TopologyKind,
    /// Cycle cost of a hop; applied to routers, and to links where the
    /// builder's attribute policy says so
    pub hop_latency: u32,
    /// Network-interface flit size, carried through to the graph untouched
    pub flit_size: u32,
}

impl TopologyConfig {
    /// Configuration for `kind` with default latency and flit size
    pub fn new(kind: TopologyKind) -> Self {
        Self {
            kind,
            hop_latency: DEFAULT_HOP_LATENCY,
            flit_size: DEFAULT_FLIT_SIZE,
        }
    }

    pub fn mesh() -> Self {
        Self::new(TopologyKind::Mesh)
    }

    pub fn all_to_all() -> Self {
        Self::new(TopologyKind::AllToAll)
    }

    pub fn with_hop_latency(mut self, hop_latency: u32) -> Self {
        self.hop_latency = hop_latency;
        self
    }

    pub fn with_flit_size(mut self, flit_size: u32) -> Self {
        self.flit_size = flit_size;
        self
    }

    /// Validate the configuration for a build over `endpoint_count` endpoints
    ///
    /// # Arguments
    /// * `endpoint_count` - Number of endpoints the graph will be built for
    ///
    /// # Returns
    /// * `Ok(())` if a build may proceed
    /// * `Err(InvalidConfigError)` naming the first problem found
    pub fn validate(&self, endpoint_count: usize) -> Result<(), InvalidConfigError> {
        if endpoint_count == 0 {
            return Err(InvalidConfigError::NoEndpoints);
        }
        if self.hop_latency == 0 {
            return Err(InvalidConfigError::NonPositive {
                field: "hop_latency",
                value: 0,
            });
        }
        if self.flit_size == 0 {
            return Err(InvalidConfigError::NonPositive {
                field: "flit_size",
                value: 0,
            });
        }
        Ok(())
    }
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self::all_to_all()
    }
}

/// Topology section as written in a configuration file.
///
/// Numbers are read signed and the kind as free text so that a bad value is
/// reported as an [`InvalidConfigError`] rather than a parse failure.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RawTopologyConfig {
    #[serde(default = "default_kind_name")]
    pub kind: String,
    #[serde(default = "default_hop_latency")]
    pub hop_latency: i64,
    #[serde(default = "default_flit_size")]
    pub flit_size: i64,
}

fn default_kind_name() -> String {
    TopologyKind::AllToAll.as_str().to_string()
}

fn default_hop_latency() -> i64 {
    DEFAULT_HOP_LATENCY as i64
}

fn default_flit_size() -> i64 {
    DEFAULT_FLIT_SIZE as i64
}

impl Default for RawTopologyConfig {
    fn default() -> Self {
        Self {
            kind: default_kind_name(),
            hop_latency: default_hop_latency(),
            flit_size: default_flit_size(),
        }
    }
}

impl TryFrom<RawTopologyConfig> for TopologyConfig {
    type Error = InvalidConfigError;

    fn try_from(raw: RawTopologyConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: raw.kind.parse()?,
            hop_latency: positive("hop_latency", raw.hop_latency)?,
            flit_size: positive("flit_size", raw.flit_size)?,
        })
    }
}

fn positive(field: &'static str, value: i64) -> Result<u32, InvalidConfigError> {
    if value <= 0 {
        return Err(InvalidConfigError::NonPositive { field, value });
    }
    u32::try_from(value).map_err(|_| InvalidConfigError::OutOfRange { field, value })
}
