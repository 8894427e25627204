//! # Graph Editor
//!
//! An interactive editor for directed graphs drawn on a 2D canvas. Nodes are
//! circles, edges are arrows, and both carry free-form string properties.
//!
//! ## Features
//! - Four editing modes: add nodes, select and drag, connect, delete
//! - Click hit-testing of nodes and edges
//! - Live preview while connecting two nodes
//! - Properties panel for viewing and editing the selected element
//!
//! The model ([`types`]), hit-testing ([`hit_test`]), the interaction state
//! machine ([`interaction`]) and the display list ([`scene`]) don't touch any
//! window; only the private `ui` module talks to eframe.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod interaction;
pub mod properties;
pub mod scene;
pub mod types;
mod ui;

// Re-export the types most callers need
pub use interaction::{EditMode, GraphCanvas, PointerEvent, SelectedElement, Selection};
pub use properties::{PropertiesForm, PropertyUpdater};
pub use scene::{DrawCommand, Scene};
pub use types::*;
pub use ui::{GraphEditorApp, Preferences, PREFERENCES_KEY};

/// Runs the graph editor with default window settings.
///
/// Viewer preferences are restored from eframe's storage when available; the
/// graph always starts empty.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use graph_editor::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    log::info!("starting graph editor");
    eframe::run_native(
        "Graph Editor",
        options,
        Box::new(|cc| Ok(Box::new(GraphEditorApp::from_storage(cc.storage)))),
    )
}
