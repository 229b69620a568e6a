#[cfg(test)]
mod topology_properties {
    use std::collections::HashSet;

    use noctopo::config::{InvalidConfigError, TopologyConfig, TopologyKind};
    use noctopo::topology::{
        build_topology, AllToAllTopologyBuilder, GridDims, MeshTopologyBuilder, Shape, TopologyBuilder, TopologyGraph,
    };
    use noctopo::utils::verify_graph;

    fn endpoints(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("controller{}", i)).collect()
    }

    /// Number of east and south neighbour pairs in the row-major grid for n
    fn mesh_pairs(n: usize) -> usize {
        let grid = GridDims::for_endpoints(n);
        let mut pairs = 0;
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let current = grid.index(row, col);
                if current >= n {
                    continue;
                }
                if col + 1 < grid.cols && grid.index(row, col + 1) < n {
                    pairs += 1;
                }
                if row + 1 < grid.rows && grid.index(row + 1, col) < n {
                    pairs += 1;
                }
            }
        }
        pairs
    }

    fn assert_common_invariants(graph: &TopologyGraph<String>, n: usize) {
        let router_ids: Vec<usize> = graph.routers().iter().map(|r| r.id).collect();
        assert_eq!(router_ids, (0..n).collect::<Vec<_>>());

        assert_eq!(graph.ext_links().len(), n);
        assert_eq!(graph.netifs().len(), n);
        for (i, ext_link) in graph.ext_links().iter().enumerate() {
            assert_eq!(ext_link.id, i);
            assert_eq!(ext_link.router, i);
            assert_eq!(ext_link.endpoint, format!("controller{}", i));
            assert_eq!(graph.netifs()[i].id, i);
        }

        let link_ids: Vec<usize> = graph.int_links().iter().map(|l| l.id).collect();
        assert_eq!(link_ids, (0..graph.int_links().len()).collect::<Vec<_>>());
        let unique: HashSet<usize> = link_ids.iter().copied().collect();
        assert_eq!(unique.len(), link_ids.len());

        for link in graph.int_links() {
            let reverse = graph
                .link(link.dst, link.src)
                .unwrap_or_else(|| panic!("link {} has no reverse", link.id));
            assert!(link.is_reverse_of(reverse), "link {} and {} differ", link.id, reverse.id);
        }

        assert_eq!(verify_graph(graph), Ok(()));
    }

    #[test]
    fn test_all_to_all_counts() {
        for n in 1..=24 {
            let graph = build_topology(&endpoints(n), &TopologyConfig::all_to_all()).unwrap();
            assert_eq!(graph.routers().len(), n);
            assert_eq!(graph.ext_links().len(), n);
            assert_eq!(graph.int_links().len(), n * (n - 1));
            assert_common_invariants(&graph, n);
        }
    }

    #[test]
    fn test_mesh_counts() {
        for n in 1..=40 {
            let graph = build_topology(&endpoints(n), &TopologyConfig::mesh()).unwrap();
            assert_eq!(graph.routers().len(), n);
            assert_eq!(graph.ext_links().len(), n);
            assert_eq!(graph.int_links().len(), 2 * mesh_pairs(n), "n={}", n);
            assert_common_invariants(&graph, n);
        }
    }

    #[test]
    fn test_single_endpoint_both_builders() {
        let single = endpoints(1);

        let mesh = MeshTopologyBuilder.build(&single, &TopologyConfig::mesh()).unwrap();
        assert_eq!(mesh.shape(), Shape::Grid { rows: 1, cols: 1 });
        assert_eq!(mesh.routers().len(), 1);
        assert_eq!(mesh.ext_links().len(), 1);
        assert!(mesh.int_links().is_empty());

        let full = AllToAllTopologyBuilder.build(&single, &TopologyConfig::all_to_all()).unwrap();
        assert_eq!(full.routers().len(), 1);
        assert_eq!(full.ext_links().len(), 1);
        assert!(full.int_links().is_empty());
    }

    #[test]
    fn test_all_to_all_four_endpoints() {
        let graph = build_topology(&endpoints(4), &TopologyConfig::all_to_all()).unwrap();
        assert_eq!(graph.routers().len(), 4);
        assert_eq!(graph.ext_links().len(), 4);
        assert_eq!(graph.int_links().len(), 12);
        for router in 0..4 {
            let expected: Vec<usize> = (0..4).filter(|&other| other != router).collect();
            assert_eq!(graph.neighbors(router), expected);
        }
    }

    #[test]
    fn test_mesh_five_endpoints() {
        let graph = build_topology(&endpoints(5), &TopologyConfig::mesh()).unwrap();
        assert_eq!(graph.shape(), Shape::Grid { rows: 2, cols: 3 });

        let east_west = graph
            .int_links()
            .iter()
            .filter(|l| matches!(l.src_outport.as_str(), "East" | "West"))
            .count();
        let north_south = graph
            .int_links()
            .iter()
            .filter(|l| matches!(l.src_outport.as_str(), "North" | "South"))
            .count();
        assert_eq!(east_west, 6);
        assert_eq!(north_south, 4);
        assert_eq!(graph.int_links().len(), 10);

        // Row 1 has only cells 3 and 4; cell 5 is never a neighbour
        assert!(graph.link(3, 4).is_some());
        assert!(graph.link(0, 3).is_some());
        assert!(graph.link(1, 4).is_some());
        assert!(graph.link(2, 5).is_none());
        assert!(graph.link(4, 5).is_none());
    }

    #[test]
    fn test_hop_latency_divergence_between_builders() {
        let endpoints = endpoints(9);
        for hop_latency in [1, 2, 4, 8] {
            let full = build_topology(
                &endpoints,
                &TopologyConfig::all_to_all().with_hop_latency(hop_latency),
            )
            .unwrap();
            assert!(full.routers().iter().all(|r| r.latency == hop_latency));
            assert!(full.ext_links().iter().all(|l| l.latency == hop_latency));
            assert!(full.int_links().iter().all(|l| l.latency == hop_latency));

            let mesh = build_topology(&endpoints, &TopologyConfig::mesh().with_hop_latency(hop_latency)).unwrap();
            assert!(mesh.routers().iter().all(|r| r.latency == hop_latency));
            assert!(mesh.ext_links().iter().all(|l| l.latency == 1));
            assert!(mesh.int_links().iter().all(|l| l.latency == 1));
        }
    }

    #[test]
    fn test_builds_are_deterministic() {
        for kind in [TopologyKind::Mesh, TopologyKind::AllToAll] {
            let config = TopologyConfig::new(kind).with_hop_latency(3).with_flit_size(16);
            let first = build_topology(&endpoints(13), &config).unwrap();
            let second = build_topology(&endpoints(13), &config).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.flit_size(), 16);
        }
    }

    #[test]
    fn test_invalid_requests() {
        let none: Vec<String> = Vec::new();
        assert_eq!(
            build_topology(&none, &TopologyConfig::mesh()),
            Err(InvalidConfigError::NoEndpoints)
        );
        assert_eq!(
            build_topology(&endpoints(3), &TopologyConfig::all_to_all().with_hop_latency(0)),
            Err(InvalidConfigError::NonPositive { field: "hop_latency", value: 0 })
        );
        assert_eq!(
            build_topology(&endpoints(3), &TopologyConfig::mesh().with_flit_size(0)),
            Err(InvalidConfigError::NonPositive { field: "flit_size", value: 0 })
        );
        assert_eq!(
            "ring".parse::<TopologyKind>(),
            Err(InvalidConfigError::UnknownTopology("ring".to_string()))
        );
        assert!(matches!(
            AllToAllTopologyBuilder.build(&endpoints(3), &TopologyConfig::mesh()),
            Err(InvalidConfigError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_builders_are_shareable_across_threads() {
        let handles: Vec<_> = (1..=4)
            .map(|n| {
                std::thread::spawn(move || {
                    let graph = build_topology(&endpoints(n * 3), &TopologyConfig::mesh()).unwrap();
                    graph.routers().len()
                })
            })
            .collect();
        let sizes: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(sizes, vec![3, 6, 9, 12]);
    }
}
