//! Homelab status service and network topology renderer.
//!
//! Two independent pieces live here:
//!
//! - a stateless HTTP service answering four fixed JSON endpoints
//!   (`/`, `/health`, `/info`, `/test`), used as a container health target
//!   and a frontend connectivity check;
//! - the homelab network diagrams, declared as small validated graphs and
//!   drawn through Graphviz:
//!
//! ```text
//! Internet -> Firewall -> 3 servers -> Switch -> 3 servers -> Storage
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`clock`]: Monotonic ISO-8601 timestamps
//! - [`api`]: HTTP status service
//! - [`topology`]: Topology graph, diagram variants and rendering
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod metrics;
pub mod topology;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
