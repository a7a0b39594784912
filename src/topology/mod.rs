//! Network topology diagrams.
//!
//! - [`types`]: node categories and identities
//! - [`graph`]: validated topology graph and builder
//! - [`variants`]: the logical and physical homelab diagrams
//! - [`render`]: DOT serialization and Graphviz rendering

pub mod graph;
pub mod render;
pub mod types;
pub mod variants;

use std::path::PathBuf;

use tracing::{error, info};

pub use graph::{Topology, TopologyBuilder};
pub use render::{file_stem, to_dot, DotSource, OutputFormat, Renderer};
pub use types::{Node, NodeId, NodeKind};
pub use variants::Variant;

/// Build, validate and render each variant in turn.
///
/// Stops at the first failure. Returns the written paths in input order.
pub fn render_all<I>(renderer: &Renderer, variants: I) -> crate::Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = Variant>,
{
    let mut written = Vec::new();
    for variant in variants {
        let topology = variant.build()?;
        info!(
            topology = %topology.name(),
            nodes = topology.node_count(),
            edges = topology.edge_count(),
            "Rendering diagram"
        );

        let path = renderer.render(&topology).map_err(|e| {
            error!(topology = %topology.name(), "Render failed: {}", e);
            e
        })?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, RenderError};
    use strum::IntoEnumIterator;

    #[test]
    fn render_all_writes_one_file_per_variant() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = Renderer::new(dir.path()).with_format(OutputFormat::Dot);

        let paths = render_all(&renderer, Variant::iter()).unwrap();
        assert_eq!(
            paths,
            vec![dir.path().join("logical.dot"), dir.path().join("physical.dot")]
        );
    }

    #[test]
    fn render_all_surfaces_backend_errors() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = Renderer::new(dir.path()).with_graphviz("definitely-not-installed-graphviz");

        assert!(matches!(
            render_all(&renderer, [Variant::Physical]),
            Err(AppError::Render(RenderError::BackendNotFound { .. }))
        ));
    }
}
