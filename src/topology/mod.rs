//! Network topology module.
//!
//! This module contains the graph model and the builders that populate it:
//! a complete graph (`all2all`) and a 2D grid (`mesh`). Both sit behind the
//! [`TopologyBuilder`] trait so callers can select one at runtime.

pub mod types;
pub mod builder;
pub mod all2all;
pub mod mesh;

// Re-export key types and functions for easier access
pub use types::{ExtLink, GraphSummary, IntLink, LinkId, NetworkInterface, Router, RouterId, Shape, TopologyGraph};
pub use builder::{build_topology, policy_for, AttributePolicy, Latency, TopologyBuilder};
pub use all2all::AllToAllTopologyBuilder;
pub use mesh::{GridDims, MeshTopologyBuilder};
