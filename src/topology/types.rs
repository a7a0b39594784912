//! Node types for network topology diagrams.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Category of a topology node. Drives the node's shape in diagrams.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeKind {
    /// Upstream internet gateway.
    #[strum(to_string = "gateway", serialize = "internet")]
    Gateway,
    /// Perimeter firewall.
    Firewall,
    /// Compute server.
    #[strum(to_string = "server", serialize = "compute-server")]
    Server,
    /// Network switch.
    Switch,
    /// Storage appliance.
    Storage,
}

/// Index of a node within its [`Topology`](super::Topology).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A labelled node in a topology graph.
///
/// `key` is the node's identity. `label` is what gets drawn and need not be
/// unique: several hosts may share the same image label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Unique identity within the topology.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Node category.
    pub kind: NodeKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn node_kind_parses_aliases() {
        assert_eq!(NodeKind::from_str("gateway").unwrap(), NodeKind::Gateway);
        assert_eq!(NodeKind::from_str("internet").unwrap(), NodeKind::Gateway);
        assert_eq!(NodeKind::from_str("compute-server").unwrap(), NodeKind::Server);
        assert!(NodeKind::from_str("router").is_err());
    }

    #[test]
    fn node_kind_displays_lowercase() {
        assert_eq!(NodeKind::Gateway.to_string(), "gateway");
        assert_eq!(NodeKind::Server.to_string(), "server");
        assert_eq!(NodeKind::Firewall.to_string(), "firewall");
        assert_eq!(NodeKind::Storage.to_string(), "storage");
    }
}
