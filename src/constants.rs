//! Shared application-wide constants.
//! Centralizes tweakable values used across hit-testing, rendering and the UI.

use egui::Color32;

// Geometry
/// Radius of every node circle, in canvas units. Also the node hit radius.
pub const NODE_RADIUS: f32 = 30.0;
/// A point closer than this to an edge segment hits the edge.
pub const EDGE_HIT_THRESHOLD: f32 = 10.0;
/// Length of the two sides of an edge arrowhead.
pub const ARROW_LENGTH: f32 = 10.0;
/// Half-angle of the arrowhead, in radians (30 degrees).
pub const ARROW_HALF_ANGLE: f32 = std::f32::consts::PI / 6.0;
/// Extra radius of the ring drawn around the node awaiting a connection.
pub const PENDING_RING_OFFSET: f32 = 5.0;
/// Dash length of the connection preview line.
pub const PREVIEW_DASH_LENGTH: f32 = 5.0;
/// Gap length of the connection preview line.
pub const PREVIEW_GAP_LENGTH: f32 = 3.0;
/// Padding around edge label backgrounds.
pub const LABEL_PADDING: f32 = 3.0;
/// Font size for node and edge labels.
pub const LABEL_FONT_SIZE: f32 = 12.0;

// Stroke widths
/// Width of an unselected edge.
pub const EDGE_WIDTH: f32 = 2.0;
/// Width of the selected edge.
pub const SELECTED_EDGE_WIDTH: f32 = 3.0;
/// Width of node outlines.
pub const NODE_OUTLINE_WIDTH: f32 = 2.0;
/// Width of the connection preview line.
pub const PREVIEW_WIDTH: f32 = 1.0;
/// Width of the pending-connection ring.
pub const PENDING_RING_WIDTH: f32 = 2.0;

// Palette
/// Canvas background.
pub const CANVAS_BACKGROUND: Color32 = Color32::WHITE;
/// Default edge and arrow colour.
pub const EDGE_COLOR: Color32 = Color32::from_rgb(0x66, 0x66, 0x66);
/// Highlight colour for the selected edge, its arrow and its label.
pub const SELECTED_EDGE_COLOR: Color32 = Color32::from_rgb(0x21, 0x96, 0xf3);
/// Default edge label text colour.
pub const EDGE_LABEL_COLOR: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);
/// Translucent white box behind edge labels (70% opacity, premultiplied).
pub const EDGE_LABEL_BACKGROUND: Color32 = Color32::from_rgba_premultiplied(178, 178, 178, 178);
/// Default node fill.
pub const NODE_FILL: Color32 = Color32::from_rgb(0xe0, 0xe0, 0xe0);
/// Fill of the selected node.
pub const SELECTED_NODE_FILL: Color32 = Color32::from_rgb(0x90, 0xca, 0xf9);
/// Node outline colour.
pub const NODE_OUTLINE_COLOR: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);
/// Node label text colour.
pub const NODE_LABEL_COLOR: Color32 = Color32::BLACK;
/// Connection preview line colour.
pub const PREVIEW_COLOR: Color32 = Color32::from_rgb(0x99, 0x99, 0x99);
/// Ring around the node awaiting a connection.
pub const PENDING_RING_COLOR: Color32 = Color32::from_rgb(0x4c, 0xaf, 0x50);

// Panels
/// Default width of the properties panel.
pub const PROPERTIES_PANEL_WIDTH: f32 = 260.0;
/// Smallest width the properties panel may be resized to.
pub const PROPERTIES_PANEL_MIN_WIDTH: f32 = 180.0;
