//! Application state management structures.
//!
//! Holds the editing canvas, the properties form bound to it, pointer
//! bookkeeping for the canvas widget, and the viewer preferences that survive
//! restarts.

use crate::constants::PROPERTIES_PANEL_WIDTH;
use crate::interaction::GraphCanvas;
use crate::properties::PropertiesForm;
use eframe::egui;
use serde::{Deserialize, Serialize};

/// Storage key under which [`Preferences`] are persisted.
pub const PREFERENCES_KEY: &str = "preferences";

/// Viewer settings remembered across restarts. Graph content is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Whether dark mode visuals are enabled for the panels
    pub dark_mode: bool,
    /// Remembered width of the properties panel
    pub properties_panel_width: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            properties_panel_width: PROPERTIES_PANEL_WIDTH,
        }
    }
}

impl Preferences {
    /// Serializes the preferences to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes preferences from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Pointer bookkeeping for turning egui input into canvas pointer events.
#[derive(Debug, Clone, Default)]
pub struct PointerTracking {
    /// Whether the current primary press started on the canvas
    pub pressed_on_canvas: bool,
    /// Last pointer position seen, in screen space
    pub last_pos: Option<egui::Pos2>,
    /// Screen rectangle the canvas occupied last frame
    pub canvas_rect: Option<egui::Rect>,
}

/// The main application structure.
///
/// This struct implements the `eframe::App` trait and wires the toolbar, the
/// canvas and the properties panel to a single [`GraphCanvas`].
#[derive(Debug, Clone, Default)]
pub struct GraphEditorApp {
    /// The graph being edited together with its interaction state
    pub canvas: GraphCanvas,
    /// Form state of the properties panel
    pub form: PropertiesForm,
    /// Pointer state of the canvas widget
    pub pointer: PointerTracking,
    /// Persisted viewer settings
    pub preferences: Preferences,
}

impl GraphEditorApp {
    /// Creates an application with the given viewer preferences and an empty graph.
    pub fn with_preferences(preferences: Preferences) -> Self {
        Self {
            preferences,
            ..Default::default()
        }
    }

    /// Restores preferences from eframe storage, falling back to defaults.
    pub fn from_storage(storage: Option<&dyn eframe::Storage>) -> Self {
        let preferences = storage
            .and_then(|storage| storage.get_string(PREFERENCES_KEY))
            .map(|json| {
                Preferences::from_json(&json).unwrap_or_else(|err| {
                    log::warn!("ignoring stored preferences: {err}");
                    Preferences::default()
                })
            })
            .unwrap_or_default();
        Self::with_preferences(preferences)
    }
}
