//! The two homelab diagrams: logical roles and physical hardware.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::graph::{Topology, TopologyBuilder};
use super::types::NodeKind;
use crate::error::TopologyError;

/// Which homelab diagram to build.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    /// Role labels (Ubuntu hosts, KVM hosts).
    Logical,
    /// Hardware labels (Mini-1..3, DELL-1..3).
    Physical,
}

impl Variant {
    /// Server labels for the front tier (behind the firewall) and the back
    /// tier (behind the switch).
    fn server_labels(self) -> ([&'static str; 3], [&'static str; 3]) {
        match self {
            Variant::Logical => (
                ["Ubuntu-24.04", "Ubuntu-24.04", "Ubuntu-24.04"],
                ["KVM-1", "KVM-2", "KVM-3"],
            ),
            Variant::Physical => (
                ["Mini-1", "Mini-2", "Mini-3"],
                ["DELL-1", "DELL-2", "DELL-3"],
            ),
        }
    }

    /// Build the topology for this variant.
    ///
    /// Both variants share one shape:
    ///
    /// ```text
    /// Internet -> Firewall -> {s1, s2, s3} -> Switch -> {s4, s5, s6} -> Storage
    /// ```
    pub fn build(self) -> Result<Topology, TopologyError> {
        let (front, back) = self.server_labels();
        let mut b = TopologyBuilder::new(self.to_string());

        b.node("inet", "Internet", NodeKind::Gateway)?;
        b.node("fw", "Firewall", NodeKind::Firewall)?;
        for (key, label) in ["s1", "s2", "s3"].into_iter().zip(front) {
            b.node(key, label, NodeKind::Server)?;
        }
        b.node("switch", "Switch", NodeKind::Switch)?;
        for (key, label) in ["s4", "s5", "s6"].into_iter().zip(back) {
            b.node(key, label, NodeKind::Server)?;
        }
        b.node("storage", "Storage", NodeKind::Storage)?;

        b.connect("inet", &["fw"])?
            .connect("fw", &["s1", "s2", "s3"])?
            .fan_in(&["s1", "s2", "s3"], "switch")?
            .connect("switch", &["s4", "s5", "s6"])?
            .fan_in(&["s4", "s5", "s6"], "storage")?;

        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn labels(topo: &Topology, layer: &[crate::topology::NodeId]) -> Vec<String> {
        layer.iter().map(|id| topo.node(*id).label.clone()).collect()
    }

    #[test]
    fn both_variants_share_the_same_shape() {
        for variant in Variant::iter() {
            let topo = variant.build().unwrap();
            assert_eq!(topo.name(), variant.to_string());
            assert_eq!(topo.node_count(), 10);
            assert_eq!(topo.edge_count(), 13);

            let kinds: Vec<Vec<NodeKind>> = topo
                .layers()
                .iter()
                .map(|layer| layer.iter().map(|id| topo.node(*id).kind).collect())
                .collect();
            assert_eq!(
                kinds,
                vec![
                    vec![NodeKind::Gateway],
                    vec![NodeKind::Firewall],
                    vec![NodeKind::Server; 3],
                    vec![NodeKind::Switch],
                    vec![NodeKind::Server; 3],
                    vec![NodeKind::Storage],
                ]
            );
        }
    }

    #[test]
    fn logical_uses_role_labels() {
        let topo = Variant::Logical.build().unwrap();
        let layers = topo.layers();
        assert_eq!(labels(&topo, &layers[2]), vec!["Ubuntu-24.04"; 3]);
        assert_eq!(labels(&topo, &layers[4]), vec!["KVM-1", "KVM-2", "KVM-3"]);
    }

    #[test]
    fn physical_uses_hardware_labels() {
        let topo = Variant::Physical.build().unwrap();
        let layers = topo.layers();
        assert_eq!(labels(&topo, &layers[2]), vec!["Mini-1", "Mini-2", "Mini-3"]);
        assert_eq!(labels(&topo, &layers[4]), vec!["DELL-1", "DELL-2", "DELL-3"]);
    }

    #[test]
    fn single_source_and_sink() {
        let topo = Variant::Physical.build().unwrap();
        assert_eq!(topo.sources(), vec![topo.lookup("inet").unwrap()]);
        assert_eq!(topo.sinks(), vec![topo.lookup("storage").unwrap()]);
    }

    #[test]
    fn variant_parses_from_name() {
        assert_eq!(Variant::from_str("logical").unwrap(), Variant::Logical);
        assert_eq!(Variant::from_str("physical").unwrap(), Variant::Physical);
        assert!(Variant::from_str("virtual").is_err());
    }
}
