//! The common builder capability.
//!
//! Both topology algorithms implement [`TopologyBuilder`]. Callers that only
//! know the requested [`TopologyKind`] at runtime go through
//! [`build_topology`], which picks the builder for them.

use serde::Serialize;

use crate::config::{InvalidConfigError, TopologyConfig, TopologyKind};
use crate::topology::all2all::AllToAllTopologyBuilder;
use crate::topology::mesh::MeshTopologyBuilder;
use crate::topology::types::TopologyGraph;

/// Where a latency attribute comes from
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Latency {
    /// Taken from the request's `hop_latency`
    Hop,
    /// Constant, whatever the request says
    Fixed(u32),
}

impl Latency {
    /// Resolve this attribute against a request's hop latency
    pub fn resolve(self, hop_latency: u32) -> u32 {
        match self {
            Self::Hop => hop_latency,
            Self::Fixed(cycles) => cycles,
        }
    }
}

/// Attribute values a builder stamps onto the entities it creates
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct AttributePolicy {
    pub router_latency: Latency,
    pub ext_link_latency: Latency,
    pub int_link_latency: Latency,
    pub int_link_bandwidth_factor: u32,
}

/// Builds a [`TopologyGraph`] over an ordered list of endpoints.
///
/// Implementors supply [`wire`](TopologyBuilder::wire); callers use
/// [`build`](TopologyBuilder::build), which rejects bad requests before
/// anything is allocated.
pub trait TopologyBuilder {
    /// The topology kind this builder produces
    fn kind(&self) -> TopologyKind;

    /// Attribute values this builder uses
    fn policy(&self) -> AttributePolicy;

    /// Construct the graph for an already validated request
    fn wire<E: Clone>(&self, endpoints: &[E], config: &TopologyConfig) -> TopologyGraph<E>;

    /// Validate the request, then construct the graph
    ///
    /// # Arguments
    /// * `endpoints` - Ordered endpoint references; index `i` becomes router `i`
    /// * `config` - Build parameters; `config.kind` must match this builder
    ///
    /// # Returns
    /// * `Ok(TopologyGraph)` - The fully populated graph
    /// * `Err(InvalidConfigError)` - If the request was rejected
    fn build<E: Clone>(
        &self,
        endpoints: &[E],
        config: &TopologyConfig,
    ) -> Result<TopologyGraph<E>, InvalidConfigError> {
        if config.kind != self.kind() {
            return Err(InvalidConfigError::KindMismatch {
                builder: self.kind(),
                requested: config.kind,
            });
        }
        config.validate(endpoints.len())?;
        Ok(self.wire(endpoints, config))
    }
}

/// Build the topology named by `config.kind`
///
/// # Examples
/// ```
/// use noctopo::config::TopologyConfig;
/// use noctopo::topology::build_topology;
///
/// let endpoints = ["cpu0", "cpu1", "cpu2", "cpu3"];
/// let graph = build_topology(&endpoints, &TopologyConfig::all_to_all()).unwrap();
/// assert_eq!(graph.int_links().len(), 12);
/// ```
pub fn build_topology<E: Clone>(
    endpoints: &[E],
    config: &TopologyConfig,
) -> Result<TopologyGraph<E>, InvalidConfigError> {
    match config.kind {
        TopologyKind::Mesh => MeshTopologyBuilder.build(endpoints, config),
        TopologyKind::AllToAll => AllToAllTopologyBuilder.build(endpoints, config),
    }
}

/// Attribute policy of the builder for `kind`
pub fn policy_for(kind: TopologyKind) -> AttributePolicy {
    match kind {
        TopologyKind::Mesh => MeshTopologyBuilder::POLICY,
        TopologyKind::AllToAll => AllToAllTopologyBuilder::POLICY,
    }
}
