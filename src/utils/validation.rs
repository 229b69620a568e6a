//! Graph validation utilities.
//!
//! This module provides consistency checks over a built
//! [`TopologyGraph`]. Builders already guarantee these properties; the checks
//! exist for consumers that receive a graph from elsewhere (a file, another
//! process) and for the CLI, which verifies before writing output.

use std::collections::HashMap;

use crate::topology::types::{IntLink, TopologyGraph};

/// Validate the structural invariants of a topology graph
///
/// Checks for:
/// - Router ids contiguous from 0, one per endpoint
/// - One network interface and one external link per endpoint, index-aligned
/// - Internal link ids unique and assigned 0, 1, 2, ... in sequence order
/// - Internal links only between existing routers, never self-loops
/// - Every internal link paired with an opposite-direction twin carrying
///   swapped ports and identical latency and bandwidth factor
///
/// # Arguments
/// * `graph` - The graph to validate
///
/// # Returns
/// * `Ok(())` if validation succeeds
/// * `Err(String)` describing the first violation found
///
/// # Examples
/// ```
/// use noctopo::config::TopologyConfig;
/// use noctopo::topology::build_topology;
/// use noctopo::utils::validation::verify_graph;
///
/// let graph = build_topology(&["a", "b", "c"], &TopologyConfig::mesh()).unwrap();
/// assert!(verify_graph(&graph).is_ok());
/// ```
pub fn verify_graph<E>(graph: &TopologyGraph<E>) -> Result<(), String> {
    let n = graph.endpoint_count();

    if graph.routers().len() != n {
        return Err(format!(
            "Expected {} routers for {} endpoints, found {}",
            n,
            n,
            graph.routers().len()
        ));
    }
    for (index, router) in graph.routers().iter().enumerate() {
        if router.id != index {
            return Err(format!("Router at position {} has id {}", index, router.id));
        }
    }

    if graph.netifs().len() != n {
        return Err(format!(
            "Expected {} network interfaces, found {}",
            n,
            graph.netifs().len()
        ));
    }
    for (index, netif) in graph.netifs().iter().enumerate() {
        if netif.id != index {
            return Err(format!("Network interface at position {} has id {}", index, netif.id));
        }
    }

    for (index, ext_link) in graph.ext_links().iter().enumerate() {
        if ext_link.id != index || ext_link.router != index {
            return Err(format!(
                "External link at position {} (id {}) attaches to router {}",
                index, ext_link.id, ext_link.router
            ));
        }
    }

    let mut by_direction: HashMap<(usize, usize), &IntLink> = HashMap::new();
    for (index, link) in graph.int_links().iter().enumerate() {
        if link.id != index {
            return Err(format!("Internal link at position {} has id {}", index, link.id));
        }
        if link.src >= n || link.dst >= n {
            return Err(format!(
                "Internal link {} connects {} -> {} outside 0..{}",
                link.id, link.src, link.dst, n
            ));
        }
        if link.src == link.dst {
            return Err(format!("Internal link {} loops on router {}", link.id, link.src));
        }
        if by_direction.insert((link.src, link.dst), link).is_some() {
            return Err(format!(
                "Duplicate internal link {} -> {} (id {})",
                link.src, link.dst, link.id
            ));
        }
    }

    for link in graph.int_links() {
        match by_direction.get(&(link.dst, link.src)) {
            Some(reverse) if link.is_reverse_of(reverse) => {}
            Some(reverse) => {
                return Err(format!(
                    "Internal links {} and {} are not mirror images",
                    link.id, reverse.id
                ));
            }
            None => {
                return Err(format!(
                    "Internal link {} ({} -> {}) has no reverse link",
                    link.id, link.src, link.dst
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TopologyConfig;
    use crate::topology::build_topology;

    #[test]
    fn test_verify_built_graphs() {
        for n in 1..=20 {
            let endpoints: Vec<usize> = (0..n).collect();
            let mesh = build_topology(&endpoints, &TopologyConfig::mesh()).unwrap();
            let full = build_topology(&endpoints, &TopologyConfig::all_to_all()).unwrap();
            assert_eq!(verify_graph(&mesh), Ok(()), "mesh n={}", n);
            assert_eq!(verify_graph(&full), Ok(()), "all2all n={}", n);
        }
    }

    #[test]
    fn test_verify_detects_broken_pairing() {
        let graph = build_topology(&[0, 1, 2], &TopologyConfig::mesh()).unwrap();
        let mut broken = graph.clone();
        broken.int_links_mut()[1].latency = 9;
        let err = verify_graph(&broken).unwrap_err();
        assert!(err.contains("mirror"), "unexpected error: {}", err);

        let mut missing = graph;
        missing.int_links_mut().truncate(1);
        let err = verify_graph(&missing).unwrap_err();
        assert!(err.contains("no reverse"), "unexpected error: {}", err);
    }
}
