//! Diagram rendering through Graphviz.
//!
//! The topology is serialized to DOT and piped to the `dot` binary, which
//! lays it out and writes the image. The `dot` output format skips the
//! backend entirely and writes the DOT source itself.

use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use petgraph::dot::{Config as DotConfig, Dot as PetDot};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, info};

use super::graph::Topology;
use super::types::NodeKind;
use crate::config::Config;
use crate::error::{ConfigError, RenderError};
use crate::metrics;

/// Output file format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// PNG raster image.
    #[default]
    Png,
    /// SVG vector image.
    Svg,
    /// JPEG raster image.
    #[strum(to_string = "jpg", serialize = "jpeg")]
    Jpg,
    /// PDF document.
    Pdf,
    /// Raw DOT source, no layout performed.
    Dot,
}

impl OutputFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Dot => "dot",
        }
    }

    /// Whether the Graphviz binary is needed to produce this format.
    pub fn needs_backend(self) -> bool {
        self != OutputFormat::Dot
    }
}

/// Output file stem for a diagram name: lower-cased, spaces to underscores.
pub fn file_stem(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

fn node_style(kind: NodeKind) -> (&'static str, &'static str) {
    match kind {
        NodeKind::Gateway => ("ellipse", "#AED6F1"),
        NodeKind::Firewall => ("octagon", "#F5B7B1"),
        NodeKind::Server => ("box3d", "#D5DBDB"),
        NodeKind::Switch => ("hexagon", "#A9DFBF"),
        NodeKind::Storage => ("cylinder", "#F9E79F"),
    }
}

/// DOT rendering of a topology. Layout is left-to-right and nodes of the
/// same layer share a rank.
///
/// Node and edge statements come from [`petgraph::dot::Dot`], which escapes
/// labels. Nodes are numbered in declaration order; the node key is carried
/// as the DOT `id` attribute.
pub struct DotSource<'a>(pub &'a Topology);

impl DotSource<'_> {
    fn graph(&self) -> DiGraph<&str, &str> {
        let topo = self.0;
        let mut graph = DiGraph::with_capacity(topo.node_count(), topo.edge_count());
        for node in topo.nodes() {
            graph.add_node(node.label.as_str());
        }
        for (from, to) in topo.edges() {
            graph.add_edge(NodeIndex::new(from.index()), NodeIndex::new(to.index()), "");
        }
        graph
    }
}

impl fmt::Display for DotSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let topo = self.0;
        let graph = self.graph();

        writeln!(f, "digraph {:?} {{", topo.name())?;
        writeln!(
            f,
            "    graph [rankdir=LR, label={:?}, labelloc=t, fontname=\"Sans-Serif\", fontsize=15, \
             fontcolor=\"#2D3436\", pad=2.0, splines=ortho, nodesep=0.60, ranksep=0.75];",
            topo.name()
        )?;
        writeln!(
            f,
            "    node [style=filled, fontname=\"Sans-Serif\", fontsize=13, fontcolor=\"#2D3436\", \
             width=1.4, height=1.0];"
        )?;
        writeln!(f, "    edge [color=\"#7B8894\"];")?;

        write!(
            f,
            "{}",
            PetDot::with_attr_getters(
                &graph,
                &[DotConfig::EdgeNoLabel, DotConfig::GraphContentOnly],
                &|_, _| String::new(),
                &|_, (idx, _)| {
                    let node = &topo.nodes()[idx.index()];
                    let (shape, fill) = node_style(node.kind);
                    format!(
                        "shape={shape}, fillcolor=\"{fill}\", tooltip=\"{}\", id={:?} ",
                        node.kind, node.key
                    )
                },
            )
        )?;

        for layer in topo.layers().iter().filter(|layer| layer.len() > 1) {
            let members: Vec<String> = layer.iter().map(|id| id.index().to_string()).collect();
            writeln!(f, "    {{ rank=same; {}; }}", members.join("; "))?;
        }

        writeln!(f, "}}")
    }
}

/// Serialize a topology to DOT source.
pub fn to_dot(topo: &Topology) -> String {
    DotSource(topo).to_string()
}

/// Writes topology diagrams to disk.
#[derive(Debug, Clone)]
pub struct Renderer {
    output_dir: PathBuf,
    format: OutputFormat,
    graphviz: String,
}

impl Renderer {
    /// Create a renderer writing PNGs into `output_dir` with `dot` from PATH.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            format: OutputFormat::default(),
            graphviz: "dot".to_string(),
        }
    }

    /// Create a renderer from application config.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(&config.topology_output_dir)
            .with_format(config.output_format()?)
            .with_graphviz(&config.graphviz_dot))
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the Graphviz binary.
    pub fn with_graphviz(mut self, binary: impl Into<String>) -> Self {
        self.graphviz = binary.into();
        self
    }

    /// Where `topo` will be written.
    pub fn output_path(&self, topo: &Topology) -> PathBuf {
        let stem = file_stem(topo.name());
        self.output_dir
            .join(format!("{stem}.{}", self.format.extension()))
    }

    /// Render `topo` and return the written file's path.
    pub fn render(&self, topo: &Topology) -> Result<PathBuf, RenderError> {
        let _timer = metrics::timer_topology_render();
        let path = self.output_path(topo);
        let source = to_dot(topo);

        fs::create_dir_all(&self.output_dir)?;

        if self.format.needs_backend() {
            self.run_backend(&source, &path)?;
        } else {
            fs::write(&path, source.as_bytes())?;
        }

        let size = match fs::metadata(&path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == ErrorKind::NotFound => 0,
            Err(e) => return Err(e.into()),
        };
        if size == 0 {
            return Err(RenderError::EmptyOutput(path));
        }

        metrics::inc_topology_renders(topo.name());
        info!(
            topology = %topo.name(),
            format = %self.format,
            path = %path.display(),
            bytes = size,
            "Diagram written"
        );
        Ok(path)
    }

    fn run_backend(&self, source: &str, path: &Path) -> Result<(), RenderError> {
        debug!(binary = %self.graphviz, format = %self.format, "Invoking graphviz");

        let mut child = Command::new(&self.graphviz)
            .arg(format!("-T{}", self.format.extension()))
            .arg("-o")
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => RenderError::BackendNotFound {
                    binary: self.graphviz.clone(),
                },
                _ => RenderError::Io(e),
            })?;

        // The backend may exit before reading its input. Its status and
        // stderr say more than the resulting broken pipe.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(source.as_bytes()),
            None => Ok(()),
        };

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(RenderError::BackendFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        match written {
            // Exited cleanly without draining stdin; the size check decides.
            Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
            written => written.map_err(RenderError::from),
        }
    }
}
