//! Pointer interaction state machine.
//!
//! [`GraphCanvas`] owns the [`Graph`] together with the transient editing state
//! (selection, pending connection, drag, last pointer position) and interprets
//! pointer events according to the active [`EditMode`].
//!
//! Every mutating entry point returns `true` when something visible changed,
//! which is the signal the UI uses to schedule a redraw.

use crate::types::*;
use egui::{Pos2, Vec2};

/// Editing mode chosen from the toolbar. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditMode {
    /// Clicking the canvas adds a node
    Add,
    /// Clicking selects, dragging moves nodes
    #[default]
    Select,
    /// Two clicks on nodes connect them
    Connect,
    /// Clicking a node deletes it with its edges
    Delete,
}

impl EditMode {
    /// All modes in toolbar order.
    pub const ALL: [EditMode; 4] = [
        EditMode::Add,
        EditMode::Select,
        EditMode::Connect,
        EditMode::Delete,
    ];

    /// Human-readable toolbar label.
    pub fn label(self) -> &'static str {
        match self {
            EditMode::Add => "Add Node",
            EditMode::Select => "Select",
            EditMode::Connect => "Connect",
            EditMode::Delete => "Delete",
        }
    }

    /// Toolbar icon.
    pub fn icon(self) -> &'static str {
        match self {
            EditMode::Add => "➕",
            EditMode::Select => "👆",
            EditMode::Connect => "↔",
            EditMode::Delete => "🗑",
        }
    }
}

/// Pointer input in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed
    Down(Pos2),
    /// Pointer moved, pressed or not
    Move(Pos2),
    /// Primary button released
    Up(Pos2),
    /// A press and release both landed on the canvas; delivered after `Up`
    Click(Pos2),
}

/// The single selected element, referenced by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A selected node
    Node(NodeId),
    /// A selected edge
    Edge(EdgeId),
}

impl Selection {
    /// Kind of the selected element.
    pub fn kind(&self) -> ElementKind {
        match self {
            Selection::Node(_) => ElementKind::Node,
            Selection::Edge(_) => ElementKind::Edge,
        }
    }

    /// Whether this selection refers to the given node.
    pub fn is_node(&self, id: &NodeId) -> bool {
        matches!(self, Selection::Node(selected) if selected == id)
    }

    /// Whether this selection refers to the given edge.
    pub fn is_edge(&self, id: &str) -> bool {
        matches!(self, Selection::Edge(selected) if selected == id)
    }
}

/// Snapshot of the selected element's current data, handed to the properties panel.
///
/// Built fresh from the graph on request, so it always reflects moves and
/// property edits made since the element was selected.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedElement {
    /// What is selected
    pub selection: Selection,
    /// Current property map of the element
    pub properties: Properties,
    /// Node centre; `None` for edges
    pub position: Option<Pos2>,
    /// Source and target labels; `None` for nodes
    pub endpoints: Option<(String, String)>,
}

impl SelectedElement {
    /// Kind of the selected element.
    pub fn kind(&self) -> ElementKind {
        self.selection.kind()
    }
}

/// Transient state driven by pointer input.
///
/// Every id held here refers to an element currently in the graph; deleting a
/// node clears whichever fields point at it.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    /// Active editing mode
    pub mode: EditMode,
    /// Currently selected element, if any
    pub selection: Option<Selection>,
    /// Node clicked first in connect mode, awaiting the second click
    pub pending_connection: Option<NodeId>,
    /// Node currently being dragged in select mode
    pub dragging_node: Option<NodeId>,
    /// Last known pointer position, used for the connection preview
    pub pointer_pos: Option<Pos2>,
}

/// The graph together with its interaction state and drawing-surface size.
#[derive(Debug, Clone, Default)]
pub struct GraphCanvas {
    /// The graph being edited
    pub graph: Graph,
    /// Selection, pending connection, drag and pointer tracking
    pub interaction: InteractionState,
    /// Size of the drawing surface, recomputed from the viewport
    pub size: Vec2,
}

impl GraphCanvas {
    /// Creates an empty canvas in select mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active editing mode.
    pub fn mode(&self) -> EditMode {
        self.interaction.mode
    }

    /// Switches the editing mode.
    ///
    /// Selection and any pending connection are kept across mode switches.
    pub fn set_mode(&mut self, mode: EditMode) -> bool {
        if self.interaction.mode == mode {
            return false;
        }
        log::debug!("mode {:?} -> {:?}", self.interaction.mode, mode);
        self.interaction.mode = mode;
        true
    }

    /// Records a new drawing-surface size. Model data is untouched.
    pub fn resize(&mut self, size: Vec2) -> bool {
        if self.size == size {
            return false;
        }
        log::trace!("canvas resized to {}x{}", size.x, size.y);
        self.size = size;
        true
    }

    /// Limits `pos` to the drawing surface `[0, size]`.
    pub fn clamp_to_canvas(&self, pos: Pos2) -> Pos2 {
        Pos2::new(
            pos.x.clamp(0.0, self.size.x.max(0.0)),
            pos.y.clamp(0.0, self.size.y.max(0.0)),
        )
    }

    /// Drops a half-made connection. Returns `false` if none was pending.
    pub fn cancel_pending_connection(&mut self) -> bool {
        self.interaction.pending_connection.take().is_some()
    }

    /// Builds a snapshot of the selected element, if any.
    pub fn selected_element(&self) -> Option<SelectedElement> {
        match self.interaction.selection.as_ref()? {
            Selection::Node(id) => {
                let node = self.graph.node(id)?;
                Some(SelectedElement {
                    selection: Selection::Node(*id),
                    properties: node.properties.clone(),
                    position: Some(node.position),
                    endpoints: None,
                })
            }
            Selection::Edge(id) => {
                let edge = self.graph.edge(id)?;
                let label_of = |node_id: &NodeId| {
                    self.graph
                        .node(node_id)
                        .and_then(Node::label)
                        .unwrap_or("(unlabelled)")
                        .to_string()
                };
                Some(SelectedElement {
                    selection: Selection::Edge(id.clone()),
                    properties: edge.properties.clone(),
                    position: None,
                    endpoints: Some((label_of(&edge.source), label_of(&edge.target))),
                })
            }
        }
    }

    /// Handles one pointer event according to the active mode.
    ///
    /// # Returns
    ///
    /// `true` if the graph or any state the renderer reads changed
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down(pos) => self.pointer_down(pos),
            PointerEvent::Move(pos) => self.pointer_move(pos),
            PointerEvent::Up(_) => self.interaction.dragging_node.take().is_some(),
            PointerEvent::Click(pos) => self.click(pos),
        }
    }

    fn click(&mut self, pos: Pos2) -> bool {
        match self.interaction.mode {
            EditMode::Add => {
                self.graph.add_node(pos);
                true
            }
            EditMode::Select => self.select_at(pos),
            EditMode::Connect => self.connect_at(pos),
            EditMode::Delete => self.delete_at(pos),
        }
    }

    fn pointer_down(&mut self, pos: Pos2) -> bool {
        if self.interaction.mode != EditMode::Select {
            return false;
        }
        if let Some(node) = self.graph.find_node_at(pos) {
            self.interaction.dragging_node = Some(node.id);
        }
        // Grabbing a node changes nothing visible until it moves
        false
    }

    fn pointer_move(&mut self, pos: Pos2) -> bool {
        self.interaction.pointer_pos = Some(pos);

        let mut changed = false;
        if self.interaction.mode == EditMode::Select {
            // Move events arrive from anywhere in the window
            if let Some(id) = self.interaction.dragging_node {
                changed = self.graph.move_node(&id, self.clamp_to_canvas(pos));
            }
        }
        // The preview line follows the pointer
        let previewing = self.interaction.mode == EditMode::Connect
            && self.interaction.pending_connection.is_some();
        changed || previewing
    }

    /// Select mode click: node hits win over edge hits; a miss clears the selection.
    fn select_at(&mut self, pos: Pos2) -> bool {
        let hit = if let Some(node) = self.graph.find_node_at(pos) {
            Some(Selection::Node(node.id))
        } else {
            self.graph
                .find_edge_at(pos)
                .map(|edge| Selection::Edge(edge.id.clone()))
        };
        if self.interaction.selection == hit {
            return false;
        }
        self.interaction.selection = hit;
        true
    }

    /// Connect mode click: first node arms, second distinct node connects.
    fn connect_at(&mut self, pos: Pos2) -> bool {
        let hit = self.graph.find_node_at(pos).map(|node| node.id);
        match (self.interaction.pending_connection, hit) {
            (None, Some(first)) => {
                self.interaction.pending_connection = Some(first);
                true
            }
            (Some(source), Some(target)) => {
                self.interaction.pending_connection = None;
                if source != target {
                    self.graph.add_edge(source, target);
                }
                true
            }
            (Some(_), None) => {
                self.interaction.pending_connection = None;
                true
            }
            (None, None) => false,
        }
    }

    /// Delete mode click: removes the node under the pointer; edges are never
    /// deleted directly.
    fn delete_at(&mut self, pos: Pos2) -> bool {
        match self.graph.find_node_at(pos).map(|node| node.id) {
            Some(id) => self.delete_node(&id),
            None => false,
        }
    }

    /// Deletes a node with its edges and clears any state that referenced them.
    pub fn delete_node(&mut self, id: &NodeId) -> bool {
        if !self.graph.delete_node(id) {
            return false;
        }
        let graph = &self.graph;
        let interaction = &mut self.interaction;
        let dangling = match &interaction.selection {
            Some(Selection::Node(selected)) => selected == id,
            Some(Selection::Edge(edge_id)) => graph.edge(edge_id).is_none(),
            None => false,
        };
        if dangling {
            interaction.selection = None;
        }
        if interaction.pending_connection == Some(*id) {
            interaction.pending_connection = None;
        }
        if interaction.dragging_node == Some(*id) {
            interaction.dragging_node = None;
        }
        true
    }
}
