//! Shared utilities: graph validation.

pub mod validation;

pub use validation::verify_graph;
