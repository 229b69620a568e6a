//! # Noctopo - Interconnect topology generator
//!
//! This library builds the network graph that joins a set of endpoints
//! (cache and directory controllers, typically) in an on-chip network
//! simulation: one router per endpoint, an external link attaching each
//! endpoint to its router, and directed internal links between routers.
//!
//! ## Topologies
//!
//! - **all2all**: complete graph, a link pair between every two routers.
//!   Link count grows as N·(N−1).
//! - **mesh**: row-major 2D grid sized `floor(sqrt(N))` rows by enough
//!   columns to cover N, each router linked to its east and south
//!   neighbours. No wraparound.
//!
//! Builds are deterministic: the same endpoints and configuration always
//! give the same router ids, link ids and port labels.
//!
//! ## Architecture
//!
//! - `config`: `TopologyConfig`, `TopologyKind` and `InvalidConfigError`
//! - `topology`: graph model, the `TopologyBuilder` trait and both builders
//! - `config_loader`: YAML run configuration and command-line overrides
//! - `output`: JSON/YAML graph documents for the system-assembly side
//! - `utils`: graph invariant checks
//!
//! ## Example Usage
//!
//! ```rust
//! use noctopo::config::TopologyConfig;
//! use noctopo::topology::{build_topology, Shape};
//!
//! let endpoints = ["l1_0", "l1_1", "l1_2", "l1_3", "dir_0"];
//! let config = TopologyConfig::mesh().with_hop_latency(2);
//!
//! let graph = build_topology(&endpoints, &config)?;
//! assert_eq!(graph.shape(), Shape::Grid { rows: 2, cols: 3 });
//! assert_eq!(graph.routers().len(), 5);
//! assert_eq!(graph.int_links().len(), 10);
//! # Ok::<(), noctopo::config::InvalidConfigError>(())
//! ```
//!
//! ## Error Handling
//!
//! Building returns `Result<TopologyGraph<E>, InvalidConfigError>`; the
//! request is checked before anything is allocated, so a partial graph is
//! never observable. File loading and output use `color_eyre` for context.

pub mod config;
pub mod config_loader;
pub mod output;
pub mod topology;
pub mod utils;
