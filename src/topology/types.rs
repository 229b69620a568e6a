//! Graph model definitions.
//!
//! This file contains the passive data structures a builder produces:
//! routers, directed internal links, endpoint attachments, network
//! interfaces, and the [`TopologyGraph`] aggregate that owns them.

use serde::Serialize;

use crate::config::TopologyKind;

/// Index of a router within a graph (equal to its endpoint index)
pub type RouterId = usize;

/// Index of a link within its link sequence
pub type LinkId = usize;

/// A switching node, one per endpoint
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Router {
    pub id: RouterId,
    /// Pipeline latency in cycles
    pub latency: u32,
}

/// A directed router-to-router link
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct IntLink {
    pub id: LinkId,
    pub src: RouterId,
    pub dst: RouterId,
    /// Output port label on the source router
    pub src_outport: String,
    /// Input port label on the destination router
    pub dst_inport: String,
    pub latency: u32,
    pub bandwidth_factor: u32,
}

impl IntLink {
    /// Returns true if `other` is the opposite-direction twin of this link
    pub fn is_reverse_of(&self, other: &IntLink) -> bool {
        self.src == other.dst
            && self.dst == other.src
            && self.src_outport == other.dst_inport
            && self.dst_inport == other.src_outport
            && self.latency == other.latency
            && self.bandwidth_factor == other.bandwidth_factor
    }
}

/// Attachment of an endpoint to its router
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ExtLink<E> {
    pub id: LinkId,
    pub endpoint: E,
    pub router: RouterId,
    pub latency: u32,
}

/// Logical per-endpoint binding to its external link
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct NetworkInterface {
    pub id: usize,
}

/// Overall arrangement of the routers
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Every router connected to every other router
    Complete,
    /// Row-major rectangular grid; cells at or past the endpoint count are empty
    Grid { rows: usize, cols: usize },
}

/// Counts describing a built graph
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct GraphSummary {
    pub kind: TopologyKind,
    pub shape: Shape,
    pub endpoints: usize,
    pub routers: usize,
    pub ext_links: usize,
    pub int_links: usize,
    pub flit_size: u32,
}

/// The complete interconnect for one build request.
///
/// Populated once by a builder and read-only afterwards. Fields are only
/// reachable through accessors; a different topology means a new build.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TopologyGraph<E> {
    kind: TopologyKind,
    shape: Shape,
    flit_size: u32,
    routers: Vec<Router>,
    ext_links: Vec<ExtLink<E>>,
    int_links: Vec<IntLink>,
    netifs: Vec<NetworkInterface>,
}

impl<E> TopologyGraph<E> {
    pub(crate) fn new(
        kind: TopologyKind,
        shape: Shape,
        flit_size: u32,
        routers: Vec<Router>,
        ext_links: Vec<ExtLink<E>>,
        int_links: Vec<IntLink>,
        netifs: Vec<NetworkInterface>,
    ) -> Self {
        Self {
            kind,
            shape,
            flit_size,
            routers,
            ext_links,
            int_links,
            netifs,
        }
    }

    pub fn kind(&self) -> TopologyKind {
        self.kind
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Flit size the network interfaces should be configured with
    pub fn flit_size(&self) -> u32 {
        self.flit_size
    }

    pub fn routers(&self) -> &[Router] {
        &self.routers
    }

    pub fn ext_links(&self) -> &[ExtLink<E>] {
        &self.ext_links
    }

    pub fn int_links(&self) -> &[IntLink] {
        &self.int_links
    }

    pub fn netifs(&self) -> &[NetworkInterface] {
        &self.netifs
    }

    pub fn endpoint_count(&self) -> usize {
        self.ext_links.len()
    }

    /// Routers directly reachable from `router`, ascending and deduplicated
    pub fn neighbors(&self, router: RouterId) -> Vec<RouterId> {
        let mut neighbors: Vec<RouterId> = self
            .int_links
            .iter()
            .filter(|link| link.src == router)
            .map(|link| link.dst)
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// The directed link from `src` to `dst`, if the two are connected
    pub fn link(&self, src: RouterId, dst: RouterId) -> Option<&IntLink> {
        self.int_links
            .iter()
            .find(|link| link.src == src && link.dst == dst)
    }

    #[cfg(test)]
    pub(crate) fn int_links_mut(&mut self) -> &mut Vec<IntLink> {
        &mut self.int_links
    }

    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            kind: self.kind,
            shape: self.shape,
            endpoints: self.endpoint_count(),
            routers: self.routers.len(),
            ext_links: self.ext_links.len(),
            int_links: self.int_links.len(),
            flit_size: self.flit_size,
        }
    }
}
