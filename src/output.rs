//! Graph document output.
//!
//! A built graph is handed to the system-assembly side as a document: JSON
//! by default, YAML when the output path says so. The document is the
//! serialized [`TopologyGraph`] as is, so an adapter can register routers,
//! links and interfaces in order without recomputing anything.

use crate::config::TopologyConfig;
use crate::topology::TopologyGraph;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use serde::Serialize;
use std::path::Path;

/// Serialization format of a graph document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl OutputFormat {
    /// Pick the format from a file extension; anything but yaml/yml is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Default document name, encoding the build parameters
///
/// Format: `topology-<kind>-<endpoints>-<flit_size>-<hop_latency>.json`
pub fn default_output_name(config: &TopologyConfig, endpoints: usize) -> String {
    format!(
        "topology-{}-{}-{}-{}.json",
        config.kind, endpoints, config.flit_size, config.hop_latency
    )
}

/// Render a graph document in the given format
pub fn render_graph<E: Serialize>(graph: &TopologyGraph<E>, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(graph)?,
        OutputFormat::Yaml => serde_yaml::to_string(graph)?,
    };
    Ok(rendered)
}

/// Write a graph document to `path`, format chosen by extension
pub fn write_graph<E: Serialize>(graph: &TopologyGraph<E>, path: &Path) -> Result<()> {
    let document = render_graph(graph, OutputFormat::from_path(path))?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create output directory '{}'", parent.display()))?;
        }
    }
    std::fs::write(path, document)
        .wrap_err_with(|| format!("Failed to write graph document '{}'", path.display()))?;
    info!("Wrote topology graph to {:?}", path);
    Ok(())
}
