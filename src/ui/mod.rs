//! User interface for the graph editor.
//!
//! This module contains the eframe application: the mode toolbar, the canvas
//! widget that feeds pointer input into the interaction state machine, and the
//! properties panel bound to the current selection.
//!
//! # Module Organization
//!
//! - `state` - The `GraphEditorApp` struct and persisted viewer preferences
//! - `rendering` - Painting scene display lists with an egui painter

mod rendering;
mod state;

pub use state::{GraphEditorApp, Preferences, PREFERENCES_KEY};

use crate::constants::PROPERTIES_PANEL_MIN_WIDTH;
use crate::interaction::{EditMode, PointerEvent};
use eframe::egui;

impl eframe::App for GraphEditorApp {
    /// Persist viewer preferences between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.preferences.to_json() {
            Ok(json) => storage.set_string(PREFERENCES_KEY, json),
            Err(err) => log::warn!("failed to serialize preferences: {err}"),
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// Lays out the toolbar on top, the properties panel on the right and the
    /// canvas in the remaining space.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = if self.preferences.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("mode_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        self.show_properties_panel(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });
    }
}

impl GraphEditorApp {
    /// Shows the resizable properties panel and remembers its width.
    ///
    /// The outer panel width is stored, since that is what `default_width`
    /// expects back on the next start.
    fn show_properties_panel(&mut self, ctx: &egui::Context) {
        let viewport_width = ctx.input(|i| i.content_rect().width());
        let max_width = (viewport_width * 0.9).max(PROPERTIES_PANEL_MIN_WIDTH);
        let width = self
            .preferences
            .properties_panel_width
            .clamp(PROPERTIES_PANEL_MIN_WIDTH, max_width);

        let panel = egui::SidePanel::right("properties_panel")
            .resizable(true)
            .default_width(width)
            .show(ctx, |ui| {
                self.draw_properties_panel(ui);
            });
        self.preferences.properties_panel_width = panel
            .response
            .rect
            .width()
            .clamp(PROPERTIES_PANEL_MIN_WIDTH, max_width);
    }

    /// Keys 1-4 pick a mode, Escape drops a half-made connection.
    ///
    /// Ignored while a text field has keyboard focus.
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let keys = [egui::Key::Num1, egui::Key::Num2, egui::Key::Num3, egui::Key::Num4];
        let picked = ctx.input(|i| {
            keys.iter()
                .zip(EditMode::ALL)
                .find(|(key, _)| i.key_pressed(**key))
                .map(|(_, mode)| mode)
        });
        let mut changed = false;
        if let Some(mode) = picked {
            changed |= self.canvas.set_mode(mode);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            changed |= self.canvas.cancel_pending_connection();
        }
        if changed {
            ctx.request_repaint();
        }
    }

    /// Renders the mode toolbar.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for (index, mode) in EditMode::ALL.into_iter().enumerate() {
                let active = self.canvas.mode() == mode;
                let response = ui
                    .selectable_label(active, format!("{} {}", mode.icon(), mode.label()))
                    .on_hover_text(format!("{} ({})", mode.label(), index + 1));
                if response.clicked() && self.canvas.set_mode(mode) {
                    ui.ctx().request_repaint();
                }
            }

            ui.separator();
            ui.checkbox(&mut self.preferences.dark_mode, "Dark Mode");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!(
                    "Nodes: {}  Edges: {}",
                    self.canvas.graph.node_count(),
                    self.canvas.graph.edge_count()
                ));
            });
        });
    }

    /// Renders the properties panel for the selected node or edge.
    ///
    /// One editable row per existing key plus an "add property" row. Every
    /// edit goes back to the graph through the properties form as a complete map.
    fn draw_properties_panel(&mut self, ui: &mut egui::Ui) {
        let selected = self.canvas.selected_element();
        self.form.sync(selected.as_ref());

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                let Some(element) = selected else {
                    ui.heading("Properties");
                    ui.separator();
                    ui.label("No element selected");
                    return;
                };

                ui.heading(format!("Properties: {}", element.kind()));
                ui.separator();
                if let Some(position) = element.position {
                    ui.label(format!("Position: ({:.0}, {:.0})", position.x, position.y));
                }
                if let Some((from, to)) = &element.endpoints {
                    ui.label(format!("From: {from}"));
                    ui.label(format!("To: {to}"));
                }
                ui.separator();

                let mut edits = Vec::new();
                egui::Grid::new("properties_grid")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        for (key, value) in self.form.properties() {
                            ui.label(format!("{key}:"));
                            let mut draft = value.clone();
                            if ui.text_edit_singleline(&mut draft).changed() {
                                edits.push((key.clone(), draft));
                            }
                            ui.end_row();
                        }
                    });
                for (key, value) in edits {
                    self.form.set_property(key, value, &mut self.canvas);
                }

                ui.separator();
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.form.new_key)
                            .hint_text("Property name")
                            .desired_width(90.0),
                    );
                    ui.add(
                        egui::TextEdit::singleline(&mut self.form.new_value)
                            .hint_text("Property value")
                            .desired_width(90.0),
                    );
                    if ui.button("Add").clicked() {
                        self.form.add_property(&mut self.canvas);
                    }
                });
            });
    }

    /// Renders the canvas and routes pointer input into the state machine.
    fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        self.pointer.canvas_rect = Some(rect);

        let mut changed = self.canvas.resize(rect.size());
        for event in self.canvas_pointer_events(ui, rect) {
            changed |= self.canvas.handle_pointer(event);
        }
        if changed {
            ui.ctx().request_repaint();
        }

        if response.hovered() {
            ui.ctx().set_cursor_icon(self.cursor_icon());
        }

        rendering::paint_scene(&painter, rect.min, &self.canvas.scene());
    }

    /// Converts this frame's pointer input into canvas-space events.
    ///
    /// Mirrors browser semantics: a click follows every press and release that
    /// both land on the canvas, after the release.
    fn canvas_pointer_events(&mut self, ui: &egui::Ui, rect: egui::Rect) -> Vec<PointerEvent> {
        let (pressed, released, latest) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.latest_pos(),
            )
        });
        let to_canvas = |pos: egui::Pos2| (pos - rect.min).to_pos2();
        let mut events = Vec::new();

        let Some(pos) = latest else {
            if released {
                self.pointer.pressed_on_canvas = false;
            }
            return events;
        };

        if pressed && rect.contains(pos) {
            self.pointer.pressed_on_canvas = true;
            events.push(PointerEvent::Down(to_canvas(pos)));
        }
        if self.pointer.last_pos != Some(pos) {
            self.pointer.last_pos = Some(pos);
            events.push(PointerEvent::Move(to_canvas(pos)));
        }
        if released {
            events.push(PointerEvent::Up(to_canvas(pos)));
            if self.pointer.pressed_on_canvas && rect.contains(pos) {
                events.push(PointerEvent::Click(to_canvas(pos)));
            }
            self.pointer.pressed_on_canvas = false;
        }
        events
    }

    fn cursor_icon(&self) -> egui::CursorIcon {
        match self.canvas.mode() {
            EditMode::Add => egui::CursorIcon::Crosshair,
            EditMode::Select if self.canvas.interaction.dragging_node.is_some() => {
                egui::CursorIcon::Grabbing
            }
            EditMode::Select => egui::CursorIcon::Grab,
            EditMode::Connect => egui::CursorIcon::Alias,
            EditMode::Delete => egui::CursorIcon::NotAllowed,
        }
    }
}
