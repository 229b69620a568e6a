use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use noctopo::config_loader::{self, CliOverrides, RunConfig};
use noctopo::output::{default_output_name, write_graph};
use noctopo::topology::{build_topology, Shape};
use noctopo::utils::verify_graph;

/// Generate interconnect topologies for on-chip network simulations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a run configuration YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Topology kind: mesh or all2all
    #[arg(short, long)]
    topology: Option<String>,

    /// Number of endpoints (generated names controller0, controller1, ...)
    #[arg(short = 'n', long)]
    endpoints: Option<usize>,

    /// Cycle cost of a router hop
    #[arg(long, allow_negative_numbers = true)]
    hop_latency: Option<i64>,

    /// Network-interface flit size
    #[arg(long, allow_negative_numbers = true)]
    flit_size: Option<i64>,

    /// Output path for the graph document (.json, .yaml or .yml)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log the graph summary without writing a document
    #[arg(long)]
    summary_only: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            topology: self.topology.clone(),
            endpoints: self.endpoints,
            hop_latency: self.hop_latency,
            flit_size: self.flit_size,
        }
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut run_config = match &args.config {
        Some(path) => config_loader::load_run_config(path)?,
        None => RunConfig::default(),
    };
    config_loader::apply_overrides(&mut run_config, &args.overrides());

    let (topology_config, endpoints) =
        config_loader::resolve_run_config(run_config).wrap_err("Invalid topology configuration")?;

    let graph = build_topology(&endpoints, &topology_config)?;
    verify_graph(&graph).map_err(|e| eyre!("Generated graph failed verification: {}", e))?;

    let summary = graph.summary();
    match summary.shape {
        Shape::Grid { rows, cols } => info!(
            "Built {} topology: {}x{} grid, {} routers, {} external links, {} internal links",
            summary.kind, rows, cols, summary.routers, summary.ext_links, summary.int_links
        ),
        Shape::Complete => info!(
            "Built {} topology: {} routers, {} external links, {} internal links",
            summary.kind, summary.routers, summary.ext_links, summary.int_links
        ),
    }

    if args.summary_only {
        return Ok(());
    }

    let output_path = args
        .output
        .unwrap_or_else(|| PathBuf::from(default_output_name(&topology_config, endpoints.len())));
    write_graph(&graph, &output_path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(["noctopo", "--topology", "mesh", "-n", "16"]);

        assert_eq!(args.topology.as_deref(), Some("mesh"));
        assert_eq!(args.endpoints, Some(16));
        assert!(args.config.is_none());
        assert!(args.output.is_none());
        assert!(!args.summary_only);
    }

    #[test]
    fn test_negative_values_reach_validation() {
        let args = Args::parse_from(["noctopo", "-n", "4", "--hop-latency", "-1"]);
        assert_eq!(args.hop_latency, Some(-1));

        let mut run_config = RunConfig::default();
        config_loader::apply_overrides(&mut run_config, &args.overrides());
        assert!(config_loader::resolve_run_config(run_config).is_err());
    }

    #[test]
    fn test_config_and_output_args() {
        let args = Args::parse_from([
            "noctopo",
            "--config", "run.yaml",
            "--output", "graph.yaml",
            "--flit-size", "16",
            "--summary-only",
        ]);

        assert_eq!(args.config, Some(PathBuf::from("run.yaml")));
        assert_eq!(args.output, Some(PathBuf::from("graph.yaml")));
        assert_eq!(args.flit_size, Some(16));
        assert!(args.summary_only);
    }
}
