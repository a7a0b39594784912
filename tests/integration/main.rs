//! Integration tests for the homelab status service and topology renderer.
//!
//! Tests that shell out to Graphviz are ignored by default.
//! Run them with: cargo test --test integration -- --ignored

mod api;
mod topology;
