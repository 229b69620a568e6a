//! Complete-graph ("all2all") topology.
//!
//! Every router gets a dedicated link pair to every other router, so link
//! count and build time grow as N·(N−1). That is fine for tens of endpoints;
//! past [`AllToAllTopologyBuilder::ADVISORY_ENDPOINT_LIMIT`] a warning is
//! logged but the build still goes ahead.

use log::{debug, warn};

use crate::config::{TopologyConfig, TopologyKind};
use crate::topology::builder::{AttributePolicy, Latency, TopologyBuilder};
use crate::topology::types::{ExtLink, IntLink, NetworkInterface, Router, Shape, TopologyGraph};

/// Builds a complete graph over the endpoints
#[derive(Debug, Default, Clone, Copy)]
pub struct AllToAllTopologyBuilder;

impl AllToAllTopologyBuilder {
    pub const POLICY: AttributePolicy = AttributePolicy {
        router_latency: Latency::Hop,
        ext_link_latency: Latency::Hop,
        int_link_latency: Latency::Hop,
        int_link_bandwidth_factor: 1,
    };

    /// Endpoint count past which the quadratic link count is flagged
    pub const ADVISORY_ENDPOINT_LIMIT: usize = 50;

    /// Number of directed internal links a build over `endpoints` creates
    pub fn int_link_count(endpoints: usize) -> usize {
        endpoints * endpoints.saturating_sub(1)
    }

    /// Returns true if a build over `endpoints` is past the advisory limit
    pub fn exceeds_advisory_limit(endpoints: usize) -> bool {
        endpoints > Self::ADVISORY_ENDPOINT_LIMIT
    }
}

fn int_link(id: usize, src: usize, dst: usize, latency: u32, bandwidth_factor: u32) -> IntLink {
    IntLink {
        id,
        src,
        dst,
        src_outport: format!("OutPort_{}_to_{}", src, dst),
        dst_inport: format!("InPort_{}_to_{}", src, dst),
        latency,
        bandwidth_factor,
    }
}

impl TopologyBuilder for AllToAllTopologyBuilder {
    fn kind(&self) -> TopologyKind {
        TopologyKind::AllToAll
    }

    fn policy(&self) -> AttributePolicy {
        Self::POLICY
    }

    fn wire<E: Clone>(&self, endpoints: &[E], config: &TopologyConfig) -> TopologyGraph<E> {
        let n = endpoints.len();
        let policy = Self::POLICY;
        let router_latency = policy.router_latency.resolve(config.hop_latency);
        let ext_latency = policy.ext_link_latency.resolve(config.hop_latency);
        let int_latency = policy.int_link_latency.resolve(config.hop_latency);

        if Self::exceeds_advisory_limit(n) {
            warn!(
                "All-to-all topology over {} endpoints creates {} internal links (quadratic in endpoint count)",
                n,
                Self::int_link_count(n)
            );
        }
        debug!("Creating all-to-all topology for {} endpoints", n);

        let routers: Vec<Router> = (0..n)
            .map(|id| Router { id, latency: router_latency })
            .collect();

        let netifs: Vec<NetworkInterface> = (0..n).map(|id| NetworkInterface { id }).collect();

        let ext_links: Vec<ExtLink<E>> = endpoints
            .iter()
            .enumerate()
            .map(|(i, endpoint)| ExtLink {
                id: i,
                endpoint: endpoint.clone(),
                router: i,
                latency: ext_latency,
            })
            .collect();

        // Pairs in ascending (i, j) order keep link ids stable across builds
        let mut int_links = Vec::with_capacity(Self::int_link_count(n));
        let mut link_id = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                int_links.push(int_link(link_id, i, j, int_latency, policy.int_link_bandwidth_factor));
                int_links.push(int_link(link_id + 1, j, i, int_latency, policy.int_link_bandwidth_factor));
                link_id += 2;
            }
        }

        TopologyGraph::new(
            TopologyKind::AllToAll,
            Shape::Complete,
            config.flit_size,
            routers,
            ext_links,
            int_links,
            netifs,
        )
    }
}
