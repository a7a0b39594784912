//! Topology variants rendered to disk.

use std::fs;

use homelab_stack::topology::{NodeKind, OutputFormat, Renderer, Variant};
use strum::IntoEnumIterator;

#[test]
fn variants_are_valid_dags() {
    for variant in Variant::iter() {
        let topo = variant.build().unwrap();
        assert!(topo.validate().is_ok());
        assert_eq!(topo.topological_order().len(), topo.node_count());
        assert_eq!(topo.nodes_of_kind(NodeKind::Server).len(), 6);
        assert_eq!(topo.nodes_of_kind(NodeKind::Gateway).len(), 1);
    }
}

#[test]
fn dot_output_is_written_for_every_variant() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = Renderer::new(dir.path()).with_format(OutputFormat::Dot);

    for variant in Variant::iter() {
        let topo = variant.build().unwrap();
        let path = renderer.render(&topo).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("{variant}.dot")
        );
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }
}

#[test]
#[ignore = "requires graphviz"]
fn png_output_is_non_empty() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = Renderer::new(dir.path());

    for variant in Variant::iter() {
        let topo = variant.build().unwrap();
        let path = renderer.render(&topo).unwrap();

        assert_eq!(path.extension().unwrap(), "png");
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"), "not a png: {}", path.display());
    }
}

#[test]
#[ignore = "requires graphviz"]
fn svg_output_mentions_every_label() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = Renderer::new(dir.path()).with_format(OutputFormat::Svg);

    let topo = Variant::Physical.build().unwrap();
    let svg = fs::read_to_string(renderer.render(&topo).unwrap()).unwrap();
    for label in ["Mini-1", "Mini-3", "DELL-2", "Storage"] {
        assert!(svg.contains(label), "missing {label}");
    }
}
