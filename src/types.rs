//! Core data types for the graph editor.
//!
//! This module defines the in-memory graph model: nodes, directed edges and the
//! string property maps attached to both. The [`Graph`] exclusively owns every
//! entity; everything else refers to them by id.

use indexmap::IndexMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for graph nodes.
pub type NodeId = Uuid;

/// Identifier of an edge, derived from its endpoints as `"<source>-<target>"`.
pub type EdgeId = String;

/// Key/value properties of a node or edge. Keeps insertion order so the
/// properties panel lists keys in a stable order.
pub type Properties = IndexMap<String, String>;

/// Property key holding the text drawn next to an element.
pub const LABEL_KEY: &str = "label";

/// Builds a property map containing only a `label`.
pub fn labelled(label: impl Into<String>) -> Properties {
    let mut properties = Properties::new();
    properties.insert(LABEL_KEY.to_string(), label.into());
    properties
}

/// Which kind of element a selection or property edit refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A graph node
    Node,
    /// A directed edge between two nodes
    Edge,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Node => f.write_str("Node"),
            ElementKind::Edge => f.write_str("Edge"),
        }
    }
}

/// A single node drawn as a circle on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique identifier, fixed at creation
    pub id: NodeId,
    /// Centre of the node in canvas coordinates
    pub position: egui::Pos2,
    /// Arbitrary key/value properties, including the default `label`
    pub properties: Properties,
}

impl Node {
    /// Creates a node with a fresh id at the given position.
    pub fn new(position: egui::Pos2, properties: Properties) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            properties,
        }
    }

    /// The node's `label` property, if set.
    pub fn label(&self) -> Option<&str> {
        self.properties.get(LABEL_KEY).map(String::as_str)
    }
}

/// A directed edge from `source` to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Identifier derived from the endpoints, see [`Edge::id_for`]
    pub id: EdgeId,
    /// ID of the source node
    pub source: NodeId,
    /// ID of the target node
    pub target: NodeId,
    /// Arbitrary key/value properties, including the default `label`
    pub properties: Properties,
}

impl Edge {
    /// Creates an edge between two nodes.
    ///
    /// The id is derived from the endpoints; see [`Edge::id_for`].
    pub fn new(source: NodeId, target: NodeId, properties: Properties) -> Self {
        Self {
            id: Self::id_for(source, target),
            source,
            target,
            properties,
        }
    }

    /// Derives the id an edge from `source` to `target` receives.
    ///
    /// Only unique while at most one edge may join an unordered pair of nodes,
    /// which [`Graph::try_add_edge`] enforces.
    pub fn id_for(source: NodeId, target: NodeId) -> EdgeId {
        format!("{source}-{target}")
    }

    /// The edge's `label` property, if set.
    pub fn label(&self) -> Option<&str> {
        self.properties.get(LABEL_KEY).map(String::as_str)
    }

    /// Whether this edge has `node_id` as either endpoint.
    pub fn touches(&self, node_id: &NodeId) -> bool {
        self.source == *node_id || self.target == *node_id
    }

    /// Whether this edge joins `a` and `b`, in either direction.
    pub fn joins(&self, a: &NodeId, b: &NodeId) -> bool {
        (self.source == *a && self.target == *b) || (self.source == *b && self.target == *a)
    }
}

/// Why an edge could not be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeRejection {
    /// Source and target are the same node
    SelfLoop,
    /// An edge already joins the two nodes, in either direction
    Duplicate,
    /// One of the endpoints is not in the graph
    UnknownNode(NodeId),
}

impl fmt::Display for EdgeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeRejection::SelfLoop => f.write_str("a node cannot be connected to itself"),
            EdgeRejection::Duplicate => f.write_str("the nodes are already connected"),
            EdgeRejection::UnknownNode(id) => write!(f, "node {id} does not exist"),
        }
    }
}

impl std::error::Error for EdgeRejection {}

/// The graph being edited: all nodes and edges, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: IndexMap<NodeId, Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Looks up an edge by id.
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    /// Whether any edge joins `a` and `b`, in either direction.
    pub fn are_connected(&self, a: &NodeId, b: &NodeId) -> bool {
        self.edges.iter().any(|edge| edge.joins(a, b))
    }

    /// Adds a node at `position` and returns its id.
    ///
    /// The node is labelled `Node <n>` where `n` is the node count after insertion.
    /// Labels are cosmetic: after deletions a new label may repeat an existing one.
    pub fn add_node(&mut self, position: egui::Pos2) -> NodeId {
        let label = format!("Node {}", self.nodes.len() + 1);
        let node = Node::new(position, labelled(label));
        let id = node.id;
        log::debug!("added node {id} at ({}, {})", position.x, position.y);
        self.nodes.insert(id, node);
        id
    }

    /// Adds an edge from `source` to `target`.
    ///
    /// # Arguments
    ///
    /// * `source` - The ID of the source node
    /// * `target` - The ID of the target node
    ///
    /// # Returns
    ///
    /// The new edge's id, or the reason the edge was refused. The edge is
    /// labelled `Edge <n>` where `n` is the edge count after insertion.
    pub fn try_add_edge(&mut self, source: NodeId, target: NodeId) -> Result<EdgeId, EdgeRejection> {
        if source == target {
            return Err(EdgeRejection::SelfLoop);
        }
        for id in [source, target] {
            if !self.nodes.contains_key(&id) {
                return Err(EdgeRejection::UnknownNode(id));
            }
        }
        if self.are_connected(&source, &target) {
            return Err(EdgeRejection::Duplicate);
        }

        let label = format!("Edge {}", self.edges.len() + 1);
        let edge = Edge::new(source, target, labelled(label));
        let id = edge.id.clone();
        log::debug!("added edge {id}");
        self.edges.push(edge);
        Ok(id)
    }

    /// Adds an edge, silently ignoring refused requests.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Option<EdgeId> {
        match self.try_add_edge(source, target) {
            Ok(id) => Some(id),
            Err(reason) => {
                log::debug!("edge {source} -> {target} not created: {reason}");
                None
            }
        }
    }

    /// Removes a node and every edge that has it as source or target.
    ///
    /// # Returns
    ///
    /// `true` if the node was found and removed, `false` if it didn't exist.
    pub fn delete_node(&mut self, id: &NodeId) -> bool {
        // shift_remove keeps the insertion order hit-testing relies on
        if self.nodes.shift_remove(id).is_none() {
            return false;
        }
        let before = self.edges.len();
        self.edges.retain(|edge| !edge.touches(id));
        log::debug!(
            "deleted node {id} and {} attached edge(s)",
            before - self.edges.len()
        );
        true
    }

    /// Moves a node to `position`. Returns `false` if the node doesn't exist.
    pub fn move_node(&mut self, id: &NodeId, position: egui::Pos2) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    /// Replaces the whole property map of a node.
    pub fn update_node_properties(&mut self, id: &NodeId, properties: Properties) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                log::debug!("replaced properties of node {id} ({} keys)", properties.len());
                node.properties = properties;
                true
            }
            None => false,
        }
    }

    /// Replaces the whole property map of an edge.
    pub fn update_edge_properties(&mut self, id: &str, properties: Properties) -> bool {
        match self.edges.iter_mut().find(|edge| edge.id == id) {
            Some(edge) => {
                log::debug!("replaced properties of edge {id} ({} keys)", properties.len());
                edge.properties = properties;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn two_nodes() -> (Graph, NodeId, NodeId) {
        let mut graph = Graph::new();
        let a = graph.add_node(pos2(100.0, 100.0));
        let b = graph.add_node(pos2(300.0, 100.0));
        (graph, a, b)
    }

    #[test]
    fn test_node_ids_are_distinct() {
        let mut graph = Graph::new();
        let ids: HashSet<NodeId> = (0..200)
            .map(|i| graph.add_node(pos2(i as f32, 0.0)))
            .collect();
        assert_eq!(ids.len(), 200);
        assert_eq!(graph.node_count(), 200);
    }

    #[test]
    fn test_add_node_default_label_counts_nodes() {
        let mut graph = Graph::new();
        let first = graph.add_node(pos2(0.0, 0.0));
        let second = graph.add_node(pos2(10.0, 0.0));

        assert_eq!(graph.node(&first).and_then(Node::label), Some("Node 1"));
        assert_eq!(graph.node(&second).and_then(Node::label), Some("Node 2"));
        assert_eq!(graph.node(&second).map(|n| n.position), Some(pos2(10.0, 0.0)));
    }

    #[test]
    fn test_default_label_can_repeat_after_deletion() {
        let mut graph = Graph::new();
        let first = graph.add_node(pos2(0.0, 0.0));
        graph.add_node(pos2(10.0, 0.0));
        graph.delete_node(&first);

        let third = graph.add_node(pos2(20.0, 0.0));
        assert_eq!(graph.node(&third).and_then(Node::label), Some("Node 2"));
    }

    #[test]
    fn test_add_edge_assigns_derived_id_and_label() {
        let (mut graph, a, b) = two_nodes();
        let id = graph.add_edge(a, b).expect("edge should be created");

        assert_eq!(id, format!("{a}-{b}"));
        let edge = graph.edge(&id).expect("edge is stored");
        assert_eq!(edge.source, a);
        assert_eq!(edge.target, b);
        assert_eq!(edge.label(), Some("Edge 1"));
    }

    #[test]
    fn test_duplicate_edges_rejected_in_both_directions() {
        let (mut graph, a, b) = two_nodes();
        assert!(graph.add_edge(a, b).is_some());

        assert_eq!(graph.try_add_edge(a, b), Err(EdgeRejection::Duplicate));
        assert_eq!(graph.try_add_edge(b, a), Err(EdgeRejection::Duplicate));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_self_loop_and_unknown_nodes_rejected() {
        let (mut graph, a, _) = two_nodes();
        let ghost = Uuid::new_v4();

        assert_eq!(graph.try_add_edge(a, a), Err(EdgeRejection::SelfLoop));
        assert_eq!(graph.try_add_edge(a, ghost), Err(EdgeRejection::UnknownNode(ghost)));
        assert_eq!(graph.add_edge(ghost, a), None);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_delete_node_cascades_to_edges() {
        let mut graph = Graph::new();
        let a = graph.add_node(pos2(0.0, 0.0));
        let b = graph.add_node(pos2(100.0, 0.0));
        let c = graph.add_node(pos2(200.0, 0.0));
        graph.add_edge(a, b);
        graph.add_edge(c, a);
        let kept = graph.add_edge(b, c).expect("b-c edge");

        assert!(graph.delete_node(&a));
        assert!(graph.node(&a).is_none());
        let remaining: Vec<&str> = graph.edges().map(|e| e.id.as_str()).collect();
        assert_eq!(remaining, vec![kept.as_str()]);
        assert!(graph
            .edges()
            .all(|e| graph.node(&e.source).is_some() && graph.node(&e.target).is_some()));
    }

    #[test]
    fn test_delete_missing_node_is_noop() {
        let (mut graph, _, _) = two_nodes();
        assert!(!graph.delete_node(&Uuid::new_v4()));
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_delete_keeps_insertion_order() {
        let mut graph = Graph::new();
        let a = graph.add_node(pos2(0.0, 0.0));
        let b = graph.add_node(pos2(1.0, 0.0));
        let c = graph.add_node(pos2(2.0, 0.0));
        graph.delete_node(&b);

        let order: Vec<NodeId> = graph.nodes().map(|n| n.id).collect();
        assert_eq!(order, vec![a, c]);
    }

    #[test]
    fn test_property_updates_replace_whole_map() {
        let (mut graph, a, b) = two_nodes();
        let edge = graph.add_edge(a, b).expect("edge");

        let mut props = Properties::new();
        props.insert("color".into(), "red".into());
        assert!(graph.update_node_properties(&a, props.clone()));
        assert_eq!(graph.node(&a).map(|n| n.properties.clone()), Some(props.clone()));
        assert_eq!(graph.node(&a).and_then(Node::label), None);

        assert!(graph.update_edge_properties(&edge, props.clone()));
        assert_eq!(graph.edge(&edge).map(|e| e.properties.clone()), Some(props));

        assert!(!graph.update_node_properties(&Uuid::new_v4(), Properties::new()));
        assert!(!graph.update_edge_properties("missing", Properties::new()));
    }

    #[test]
    fn test_move_node() {
        let (mut graph, a, _) = two_nodes();
        assert!(graph.move_node(&a, pos2(5.0, 6.0)));
        assert_eq!(graph.node(&a).map(|n| n.position), Some(pos2(5.0, 6.0)));
        assert!(!graph.move_node(&Uuid::new_v4(), pos2(0.0, 0.0)));
    }

    #[test]
    fn test_element_kind_display() {
        assert_eq!(ElementKind::Node.to_string(), "Node");
        assert_eq!(ElementKind::Edge.to_string(), "Edge");
    }
}
