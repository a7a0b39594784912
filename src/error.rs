//! Unified error types for the status service and topology renderer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from operations that span building and rendering a diagram.
#[derive(Error, Debug)]
pub enum AppError {
    /// Topology declaration error.
    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),

    /// Diagram rendering error.
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variables could not be deserialized.
    #[error("failed to read environment: {0}")]
    Env(#[from] envy::Error),

    /// A variable was present but its value is not acceptable.
    #[error("invalid value for {var}: {reason}")]
    Invalid {
        /// Offending environment variable.
        var: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// HOST/PORT do not form a socket address.
    #[error("invalid bind address {addr}: {source}")]
    BindAddr {
        /// The address that failed to parse.
        addr: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },
}

/// Errors raised while declaring or validating a topology graph.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TopologyError {
    /// Two nodes were declared with the same key.
    #[error("node {0} declared twice")]
    DuplicateNode(String),

    /// An edge references a node key that was never declared.
    #[error("edge references unknown node {0}")]
    UnknownNode(String),

    /// The same edge was declared twice.
    #[error("edge {from} -> {to} declared twice")]
    DuplicateEdge {
        /// Source key.
        from: String,
        /// Target key.
        to: String,
    },

    /// The edges form a cycle through the given node.
    #[error("topology {topology} contains a cycle through {node}")]
    Cycle {
        /// Topology name.
        topology: String,
        /// A node on the cycle.
        node: String,
    },

    /// A node has no incident edges.
    #[error("topology {topology} has orphan node {node}")]
    OrphanNode {
        /// Topology name.
        topology: String,
        /// The orphan's key.
        node: String,
    },
}

/// Errors raised by the rendering backend.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The Graphviz binary could not be started.
    #[error("rendering backend {binary} not found (is graphviz installed?)")]
    BackendNotFound {
        /// Binary that was looked up.
        binary: String,
    },

    /// The backend ran but reported failure.
    #[error("rendering backend exited with {status}: {stderr}")]
    BackendFailed {
        /// Exit status description.
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The backend reported success but left an empty file.
    #[error("rendered output {0} is empty")]
    EmptyOutput(PathBuf),

    /// IO error while writing output or talking to the backend.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
