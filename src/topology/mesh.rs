//! 2D-grid ("mesh") topology.
//!
//! Endpoints are laid out row-major on a near-square grid. Each router is
//! wired to its east and south neighbours with a link pair; the grid does not
//! wrap. When the endpoint count does not fill the grid, the trailing cells of
//! the last row stay empty and are never linked to.
//!
//! Unlike the all-to-all builder, endpoint attachments and router-to-router
//! links use a fixed latency of one cycle. Only routers take `hop_latency`.

use log::debug;
use serde::Serialize;

use crate::config::{TopologyConfig, TopologyKind};
use crate::topology::builder::{AttributePolicy, Latency, TopologyBuilder};
use crate::topology::types::{ExtLink, IntLink, NetworkInterface, Router, Shape, TopologyGraph};

/// Rows and columns of the grid chosen for an endpoint count
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    pub rows: usize,
    pub cols: usize,
}

impl GridDims {
    /// Size the grid for `endpoints` endpoints
    ///
    /// `rows = floor(sqrt(N))`, `cols = ceil(N / rows)`, then `cols` grows
    /// until the grid covers N. The result always covers N but is not always
    /// the squarest rectangle that would.
    ///
    /// # Examples
    /// ```
    /// use noctopo::topology::mesh::GridDims;
    ///
    /// assert_eq!(GridDims::for_endpoints(5), GridDims { rows: 2, cols: 3 });
    /// assert_eq!(GridDims::for_endpoints(16), GridDims { rows: 4, cols: 4 });
    /// ```
    pub fn for_endpoints(endpoints: usize) -> Self {
        let rows = isqrt(endpoints).max(1);
        let mut cols = endpoints.div_ceil(rows).max(1);
        while rows * cols < endpoints {
            cols += 1;
        }
        Self { rows, cols }
    }

    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Flat row-major index of cell (`row`, `col`)
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

/// floor(sqrt(n)) without trusting float rounding for large n
fn isqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// Builds a row-major 2D grid over the endpoints
#[derive(Debug, Default, Clone, Copy)]
pub struct MeshTopologyBuilder;

impl MeshTopologyBuilder {
    pub const POLICY: AttributePolicy = AttributePolicy {
        router_latency: Latency::Hop,
        ext_link_latency: Latency::Fixed(1),
        int_link_latency: Latency::Fixed(1),
        int_link_bandwidth_factor: 1,
    };
}

/// Appends the link pair between `a` and its neighbour `b`.
///
/// `a_port` is the side of `a` facing `b`; `b_port` the side of `b` facing
/// `a`.
fn push_pair(
    links: &mut Vec<IntLink>,
    a: usize,
    b: usize,
    a_port: &str,
    b_port: &str,
    latency: u32,
    bandwidth_factor: u32,
) {
    let next = links.len();
    links.push(IntLink {
        id: next,
        src: a,
        dst: b,
        src_outport: a_port.to_string(),
        dst_inport: b_port.to_string(),
        latency,
        bandwidth_factor,
    });
    links.push(IntLink {
        id: next + 1,
        src: b,
        dst: a,
        src_outport: b_port.to_string(),
        dst_inport: a_port.to_string(),
        latency,
        bandwidth_factor,
    });
}

impl TopologyBuilder for MeshTopologyBuilder {
    fn kind(&self) -> TopologyKind {
        TopologyKind::Mesh
    }

    fn policy(&self) -> AttributePolicy {
        Self::POLICY
    }

    fn wire<E: Clone>(&self, endpoints: &[E], config: &TopologyConfig) -> TopologyGraph<E> {
        let n = endpoints.len();
        let policy = Self::POLICY;
        let grid = GridDims::for_endpoints(n);
        let int_latency = policy.int_link_latency.resolve(config.hop_latency);
        let bandwidth_factor = policy.int_link_bandwidth_factor;

        debug!("Creating {}x{} mesh topology for {} endpoints", grid.rows, grid.cols, n);

        let mut routers = Vec::with_capacity(n);
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let id = grid.index(row, col);
                if id < n {
                    routers.push(Router {
                        id,
                        latency: policy.router_latency.resolve(config.hop_latency),
                    });
                }
            }
        }

        let netifs: Vec<NetworkInterface> = (0..n).map(|id| NetworkInterface { id }).collect();

        let ext_links: Vec<ExtLink<E>> = endpoints
            .iter()
            .enumerate()
            .map(|(i, endpoint)| ExtLink {
                id: i,
                endpoint: endpoint.clone(),
                router: i,
                latency: policy.ext_link_latency.resolve(config.hop_latency),
            })
            .collect();

        let mut int_links = Vec::new();
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let current = grid.index(row, col);
                if current >= n {
                    continue;
                }

                if col < grid.cols - 1 {
                    let east = grid.index(row, col + 1);
                    if east < n {
                        push_pair(&mut int_links, current, east, "East", "West", int_latency, bandwidth_factor);
                    }
                }

                if row < grid.rows - 1 {
                    let south = grid.index(row + 1, col);
                    if south < n {
                        push_pair(&mut int_links, current, south, "South", "North", int_latency, bandwidth_factor);
                    }
                }
            }
        }

        TopologyGraph::new(
            TopologyKind::Mesh,
            Shape::Grid {
                rows: grid.rows,
                cols: grid.cols,
            },
            config.flit_size,
            routers,
            ext_links,
            int_links,
            netifs,
        )
    }
}
