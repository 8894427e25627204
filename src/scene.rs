//! Canvas rendering as a display list.
//!
//! [`GraphCanvas::scene`] is a pure projection of the graph and interaction
//! state into an ordered list of [`DrawCommand`]s. Every call rebuilds the whole
//! list: a clear, then edges with arrows and labels, then nodes with labels,
//! then (connect mode only) the preview line and the ring around the pending
//! node. The UI layer paints the list with an `egui::Painter`.

use crate::constants::*;
use crate::interaction::{EditMode, GraphCanvas};
use crate::types::{Edge, Node};
use egui::{Color32, Pos2, Stroke, Vec2};

/// One primitive to paint, in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole canvas
    Clear {
        /// Canvas size at render time
        size: Vec2,
        /// Background colour
        color: Color32,
    },
    /// Solid straight line
    Line {
        /// Start point
        from: Pos2,
        /// End point
        to: Pos2,
        /// Width and colour
        stroke: Stroke,
    },
    /// Dashed straight line
    DashedLine {
        /// Start point
        from: Pos2,
        /// End point
        to: Pos2,
        /// Width and colour
        stroke: Stroke,
        /// Length of each dash
        dash: f32,
        /// Length of each gap
        gap: f32,
    },
    /// Filled triangle
    Triangle {
        /// Corners, tip first
        points: [Pos2; 3],
        /// Fill colour
        fill: Color32,
    },
    /// Circle with optional fill
    Circle {
        /// Centre point
        center: Pos2,
        /// Radius
        radius: f32,
        /// Fill colour; transparent for rings
        fill: Color32,
        /// Outline
        stroke: Stroke,
    },
    /// Text centred on a point
    Text {
        /// Centre of the text
        center: Pos2,
        /// The text itself
        text: String,
        /// Text colour
        color: Color32,
        /// Optional box painted behind the text
        background: Option<Color32>,
    },
}

/// Ordered display list for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Commands in paint order
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Corners of an arrowhead whose tip sits on the target node's boundary.
///
/// Returns `None` when the endpoints coincide and no direction exists.
pub fn arrowhead(from: Pos2, to: Pos2) -> Option<[Pos2; 3]> {
    let delta = to - from;
    if delta.length_sq() == 0.0 {
        return None;
    }
    let angle = delta.y.atan2(delta.x);
    let tip = to - Vec2::angled(angle) * NODE_RADIUS;
    let left = tip - Vec2::angled(angle - ARROW_HALF_ANGLE) * ARROW_LENGTH;
    let right = tip - Vec2::angled(angle + ARROW_HALF_ANGLE) * ARROW_LENGTH;
    Some([tip, left, right])
}

impl GraphCanvas {
    /// Builds the full display list for the current state.
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::default();
        scene.push(DrawCommand::Clear {
            size: self.size,
            color: CANVAS_BACKGROUND,
        });

        for edge in self.graph.edges() {
            self.draw_edge(&mut scene, edge);
        }
        for node in self.graph.nodes() {
            self.draw_node(&mut scene, node);
        }
        if self.interaction.mode == EditMode::Connect {
            self.draw_connection_preview(&mut scene);
        }
        scene
    }

    fn draw_edge(&self, scene: &mut Scene, edge: &Edge) {
        let (Some(source), Some(target)) =
            (self.graph.node(&edge.source), self.graph.node(&edge.target))
        else {
            return;
        };
        let selected = self
            .interaction
            .selection
            .as_ref()
            .is_some_and(|s| s.is_edge(&edge.id));
        let (color, width, label_color) = if selected {
            (SELECTED_EDGE_COLOR, SELECTED_EDGE_WIDTH, SELECTED_EDGE_COLOR)
        } else {
            (EDGE_COLOR, EDGE_WIDTH, EDGE_LABEL_COLOR)
        };

        scene.push(DrawCommand::Line {
            from: source.position,
            to: target.position,
            stroke: Stroke::new(width, color),
        });
        if let Some(points) = arrowhead(source.position, target.position) {
            scene.push(DrawCommand::Triangle { points, fill: color });
        }
        if let Some(label) = edge.label().filter(|label| !label.is_empty()) {
            scene.push(DrawCommand::Text {
                center: source.position.lerp(target.position, 0.5),
                text: label.to_string(),
                color: label_color,
                background: Some(EDGE_LABEL_BACKGROUND),
            });
        }
    }

    fn draw_node(&self, scene: &mut Scene, node: &Node) {
        let selected = self
            .interaction
            .selection
            .as_ref()
            .is_some_and(|s| s.is_node(&node.id));
        let fill = if selected { SELECTED_NODE_FILL } else { NODE_FILL };

        scene.push(DrawCommand::Circle {
            center: node.position,
            radius: NODE_RADIUS,
            fill,
            stroke: Stroke::new(NODE_OUTLINE_WIDTH, NODE_OUTLINE_COLOR),
        });
        if let Some(label) = node.label() {
            scene.push(DrawCommand::Text {
                center: node.position,
                text: label.to_string(),
                color: NODE_LABEL_COLOR,
                background: None,
            });
        }
    }

    /// Dashed line from the pending node to the pointer, plus a ring around the node.
    fn draw_connection_preview(&self, scene: &mut Scene) {
        let Some(node) = self
            .interaction
            .pending_connection
            .and_then(|id| self.graph.node(&id))
        else {
            return;
        };

        if let Some(pointer) = self.interaction.pointer_pos {
            scene.push(DrawCommand::DashedLine {
                from: node.position,
                to: self.clamp_to_canvas(pointer),
                stroke: Stroke::new(PREVIEW_WIDTH, PREVIEW_COLOR),
                dash: PREVIEW_DASH_LENGTH,
                gap: PREVIEW_GAP_LENGTH,
            });
        }
        scene.push(DrawCommand::Circle {
            center: node.position,
            radius: NODE_RADIUS + PENDING_RING_OFFSET,
            fill: Color32::TRANSPARENT,
            stroke: Stroke::new(PENDING_RING_WIDTH, PENDING_RING_COLOR),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::{PointerEvent, Selection};
    use crate::properties::{PropertiesForm, PropertyUpdater};
    use egui::{pos2, vec2};
    use pretty_assertions::assert_eq;

    fn connected_canvas() -> GraphCanvas {
        let mut canvas = GraphCanvas::new();
        canvas.resize(vec2(800.0, 600.0));
        let a = canvas.graph.add_node(pos2(100.0, 100.0));
        let b = canvas.graph.add_node(pos2(300.0, 100.0));
        canvas.graph.add_edge(a, b);
        canvas
    }

    fn kinds(scene: &Scene) -> Vec<&'static str> {
        scene
            .commands
            .iter()
            .map(|c| match c {
                DrawCommand::Clear { .. } => "clear",
                DrawCommand::Line { .. } => "line",
                DrawCommand::DashedLine { .. } => "dashed",
                DrawCommand::Triangle { .. } => "triangle",
                DrawCommand::Circle { .. } => "circle",
                DrawCommand::Text { .. } => "text",
            })
            .collect()
    }

    #[test]
    fn test_empty_canvas_only_clears() {
        let scene = GraphCanvas::new().scene();
        assert_eq!(kinds(&scene), vec!["clear"]);
    }

    #[test]
    fn test_draw_order_edges_before_nodes() {
        let scene = connected_canvas().scene();
        assert_eq!(
            kinds(&scene),
            vec!["clear", "line", "triangle", "text", "circle", "text", "circle", "text"]
        );
    }

    #[test]
    fn test_arrow_tip_touches_target_boundary() {
        let [tip, left, right] = arrowhead(pos2(100.0, 100.0), pos2(300.0, 100.0)).expect("arrow");
        assert!((tip.x - 270.0).abs() < 1e-3);
        assert!((tip.y - 100.0).abs() < 1e-3);
        // Both wings sit behind the tip, symmetric about the edge
        assert!(left.x < tip.x && right.x < tip.x);
        assert!((left.y - 100.0 + (right.y - 100.0)).abs() < 1e-3);
        assert!((tip.distance(left) - ARROW_LENGTH).abs() < 1e-3);
        assert!(arrowhead(pos2(1.0, 1.0), pos2(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_edge_label_at_midpoint_with_background() {
        let scene = connected_canvas().scene();
        let label = scene.commands.iter().find_map(|c| match c {
            DrawCommand::Text { center, text, background, .. } if text == "Edge 1" => {
                Some((*center, *background))
            }
            _ => None,
        });
        assert_eq!(label, Some((pos2(200.0, 100.0), Some(EDGE_LABEL_BACKGROUND))));
    }

    #[test]
    fn test_edge_without_label_draws_no_text() {
        let mut canvas = connected_canvas();
        let edge = canvas.graph.edges().next().map(|e| e.id.clone()).expect("edge");
        canvas.update_edge_properties(&edge, Default::default());
        assert_eq!(
            kinds(&canvas.scene()),
            vec!["clear", "line", "triangle", "circle", "text", "circle", "text"]
        );
    }

    #[test]
    fn test_selected_elements_use_highlight_colours() {
        let mut canvas = connected_canvas();
        canvas.handle_pointer(PointerEvent::Click(pos2(100.0, 100.0)));
        let fills: Vec<Color32> = canvas
            .scene()
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![SELECTED_NODE_FILL, NODE_FILL]);

        canvas.handle_pointer(PointerEvent::Click(pos2(200.0, 100.0)));
        assert!(matches!(canvas.interaction.selection, Some(Selection::Edge(_))));
        let edge_stroke = canvas.scene().commands.iter().find_map(|c| match c {
            DrawCommand::Line { stroke, .. } => Some(*stroke),
            _ => None,
        });
        assert_eq!(
            edge_stroke,
            Some(Stroke::new(SELECTED_EDGE_WIDTH, SELECTED_EDGE_COLOR))
        );
    }

    #[test]
    fn test_connection_preview_only_in_connect_mode() {
        let mut canvas = connected_canvas();
        canvas.set_mode(EditMode::Connect);
        canvas.handle_pointer(PointerEvent::Click(pos2(100.0, 100.0)));
        canvas.handle_pointer(PointerEvent::Move(pos2(900.0, 250.0)));

        let scene = canvas.scene();
        let tail: Vec<&DrawCommand> = scene.commands.iter().rev().take(2).collect();
        assert_eq!(
            tail[1],
            &DrawCommand::DashedLine {
                from: pos2(100.0, 100.0),
                to: pos2(800.0, 250.0),
                stroke: Stroke::new(PREVIEW_WIDTH, PREVIEW_COLOR),
                dash: PREVIEW_DASH_LENGTH,
                gap: PREVIEW_GAP_LENGTH,
            }
        );
        assert!(matches!(
            tail[0],
            DrawCommand::Circle { radius, .. } if *radius == NODE_RADIUS + PENDING_RING_OFFSET
        ));

        // Pending state survives a mode switch but is only drawn in connect mode
        canvas.set_mode(EditMode::Select);
        assert!(!kinds(&canvas.scene()).contains(&"dashed"));
    }

    #[test]
    fn test_property_edit_reflected_in_next_scene() {
        let mut canvas = connected_canvas();
        canvas.handle_pointer(PointerEvent::Click(pos2(100.0, 100.0)));
        let mut form = PropertiesForm::new();
        form.sync(canvas.selected_element().as_ref());
        form.set_property("label".into(), "Start".into(), &mut canvas);

        let texts: Vec<String> = canvas
            .scene()
            .commands
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["Edge 1", "Start", "Node 2"]);
    }
}
