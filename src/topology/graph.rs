//! Declarative topology graph and its builder.

use std::collections::{BTreeMap, HashMap};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use super::types::{Node, NodeId, NodeKind};
use crate::error::TopologyError;

/// A validated, immutable network topology.
///
/// Edges are kept as a multimap from source to an ordered list of targets.
/// A `Topology` can only be obtained through [`TopologyBuilder::build`], so
/// it is always acyclic and free of orphan nodes.
#[derive(Debug, Clone)]
pub struct Topology {
    name: String,
    nodes: Vec<Node>,
    keys: HashMap<String, NodeId>,
    targets: BTreeMap<NodeId, Vec<NodeId>>,
    order: Vec<NodeId>,
}

impl Topology {
    /// Diagram name. Also the base of the output file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Look up a node id by key.
    pub fn lookup(&self, key: &str) -> Option<NodeId> {
        self.keys.get(key).copied()
    }

    /// Ordered targets of `id`. Empty for sinks.
    pub fn targets(&self, id: NodeId) -> &[NodeId] {
        self.targets.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All edges as `(source, target)` pairs, grouped by source.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.targets
            .iter()
            .flat_map(|(from, tos)| tos.iter().map(move |to| (*from, *to)))
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.targets.values().map(Vec::len).sum()
    }

    /// Nodes with no incoming edges.
    pub fn sources(&self) -> Vec<NodeId> {
        let in_degree = self.in_degrees();
        self.ids().filter(|id| in_degree[id.0] == 0).collect()
    }

    /// Nodes with no outgoing edges.
    pub fn sinks(&self) -> Vec<NodeId> {
        self.ids().filter(|id| self.targets(*id).is_empty()).collect()
    }

    /// Nodes of a given kind, in declaration order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<NodeId> {
        self.ids().filter(|id| self.node(*id).kind == kind).collect()
    }

    /// Nodes in topological order.
    pub fn topological_order(&self) -> &[NodeId] {
        &self.order
    }

    /// Nodes grouped by longest-path depth from the sources.
    ///
    /// Each inner list is in declaration order.
    pub fn layers(&self) -> Vec<Vec<NodeId>> {
        let mut depth = vec![0usize; self.nodes.len()];
        for &from in &self.order {
            for &to in self.targets(from) {
                depth[to.0] = depth[to.0].max(depth[from.0] + 1);
            }
        }

        let levels = depth.iter().max().map_or(0, |max| max + 1);
        let mut layers = vec![Vec::new(); levels];
        for id in self.ids() {
            layers[depth[id.0]].push(id);
        }
        layers
    }

    /// Re-check the graph invariants.
    pub fn validate(&self) -> Result<(), TopologyError> {
        check(&self.name, &self.nodes, &self.targets).map(|_| ())
    }

    fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    fn in_degrees(&self) -> Vec<usize> {
        let mut in_degree = vec![0usize; self.nodes.len()];
        for (_, to) in self.edges() {
            in_degree[to.0] += 1;
        }
        in_degree
    }
}

/// Incremental builder for a [`Topology`].
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    name: String,
    nodes: Vec<Node>,
    keys: HashMap<String, NodeId>,
    targets: BTreeMap<NodeId, Vec<NodeId>>,
}

impl TopologyBuilder {
    /// Start a new topology with the given diagram name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declare a node.
    pub fn node(
        &mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        kind: NodeKind,
    ) -> Result<NodeId, TopologyError> {
        let key = key.into();
        if self.keys.contains_key(&key) {
            return Err(TopologyError::DuplicateNode(key));
        }

        let id = NodeId(self.nodes.len());
        self.keys.insert(key.clone(), id);
        self.nodes.push(Node {
            key,
            label: label.into(),
            kind,
        });
        Ok(id)
    }

    /// Add edges from `from` to each of `to`, in order.
    pub fn connect(&mut self, from: &str, to: &[&str]) -> Result<&mut Self, TopologyError> {
        let source = self.resolve(from)?;
        for key in to {
            let target = self.resolve(key)?;
            let fan_out = self.targets.entry(source).or_default();
            if fan_out.contains(&target) {
                return Err(TopologyError::DuplicateEdge {
                    from: from.to_string(),
                    to: key.to_string(),
                });
            }
            fan_out.push(target);
        }
        Ok(self)
    }

    /// Add an edge from each of `from` to `to`.
    pub fn fan_in(&mut self, from: &[&str], to: &str) -> Result<&mut Self, TopologyError> {
        for key in from {
            self.connect(key, &[to])?;
        }
        Ok(self)
    }

    /// Validate and freeze the topology.
    pub fn build(self) -> Result<Topology, TopologyError> {
        let order = check(&self.name, &self.nodes, &self.targets)?;
        debug!(
            topology = %self.name,
            nodes = self.nodes.len(),
            edges = self.targets.values().map(Vec::len).sum::<usize>(),
            "Topology built"
        );

        Ok(Topology {
            name: self.name,
            nodes: self.nodes,
            keys: self.keys,
            targets: self.targets,
            order,
        })
    }

    fn resolve(&self, key: &str) -> Result<NodeId, TopologyError> {
        self.keys
            .get(key)
            .copied()
            .ok_or_else(|| TopologyError::UnknownNode(key.to_string()))
    }
}

/// Check for orphans and cycles. Returns a topological order on success.
fn check(
    name: &str,
    nodes: &[Node],
    targets: &BTreeMap<NodeId, Vec<NodeId>>,
) -> Result<Vec<NodeId>, TopologyError> {
    let mut graph = DiGraph::<NodeId, ()>::with_capacity(nodes.len(), targets.len());
    let indices: Vec<NodeIndex> = (0..nodes.len())
        .map(|i| graph.add_node(NodeId(i)))
        .collect();

    let mut degree = vec![0usize; nodes.len()];
    for (from, tos) in targets {
        for to in tos {
            graph.add_edge(indices[from.0], indices[to.0], ());
            degree[from.0] += 1;
            degree[to.0] += 1;
        }
    }

    // A single isolated node is still a diagram.
    if nodes.len() > 1 {
        if let Some(orphan) = degree.iter().position(|d| *d == 0) {
            return Err(TopologyError::OrphanNode {
                topology: name.to_string(),
                node: nodes[orphan].key.clone(),
            });
        }
    }

    toposort(&graph, None)
        .map(|sorted| sorted.into_iter().map(|ix| graph[ix]).collect())
        .map_err(|cycle| TopologyError::Cycle {
            topology: name.to_string(),
            node: nodes[graph[cycle.node_id()].0].key.clone(),
        })
}
