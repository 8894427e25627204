//! Properties editor contract and form logic.
//!
//! The properties panel never sees the graph. It edits a local copy of the
//! selected element's property map and pushes the complete new map back through
//! [`PropertyUpdater`], the only mutation surface it is given.

use crate::interaction::{GraphCanvas, SelectedElement, Selection};
use crate::types::{NodeId, Properties};

/// Narrow handle through which property edits reach the graph.
pub trait PropertyUpdater {
    /// Replaces the property map of a node. Returns `false` if it doesn't exist.
    fn update_node_properties(&mut self, id: &NodeId, properties: Properties) -> bool;

    /// Replaces the property map of an edge. Returns `false` if it doesn't exist.
    fn update_edge_properties(&mut self, id: &str, properties: Properties) -> bool;
}

impl PropertyUpdater for GraphCanvas {
    fn update_node_properties(&mut self, id: &NodeId, properties: Properties) -> bool {
        self.graph.update_node_properties(id, properties)
    }

    fn update_edge_properties(&mut self, id: &str, properties: Properties) -> bool {
        self.graph.update_edge_properties(id, properties)
    }
}

/// State of the key/value form bound to the selected element.
#[derive(Debug, Clone, Default)]
pub struct PropertiesForm {
    /// Element the form is currently bound to
    target: Option<Selection>,
    /// Local copy of the element's properties, merged into on every edit
    properties: Properties,
    /// Key typed into the "add property" row
    pub new_key: String,
    /// Value typed into the "add property" row
    pub new_value: String,
}

impl PropertiesForm {
    /// Creates an unbound form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebinds the form to the current selection, reloading its properties
    /// whenever the element or its map changed.
    pub fn sync(&mut self, selected: Option<&SelectedElement>) {
        match selected {
            Some(element) => {
                if self.target.as_ref() != Some(&element.selection)
                    || self.properties != element.properties
                {
                    self.target = Some(element.selection.clone());
                    self.properties = element.properties.clone();
                }
            }
            None => {
                self.target = None;
                self.properties.clear();
            }
        }
    }

    /// Element the form is bound to.
    pub fn target(&self) -> Option<&Selection> {
        self.target.as_ref()
    }

    /// Properties currently shown in the form, in display order.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Sets one property and pushes the complete map to `updater`.
    ///
    /// An existing key keeps its position; a new key is appended.
    ///
    /// # Returns
    ///
    /// `true` if the bound element accepted the new map
    pub fn set_property(
        &mut self,
        key: String,
        value: String,
        updater: &mut dyn PropertyUpdater,
    ) -> bool {
        let Some(target) = self.target.clone() else {
            return false;
        };
        self.properties.insert(key, value);
        let properties = self.properties.clone();
        match target {
            Selection::Node(id) => updater.update_node_properties(&id, properties),
            Selection::Edge(id) => updater.update_edge_properties(&id, properties),
        }
    }

    /// Commits the "add property" row.
    ///
    /// Ignored while the key is blank after trimming; the key itself is stored
    /// untrimmed. Both inputs are cleared after a commit.
    pub fn add_property(&mut self, updater: &mut dyn PropertyUpdater) -> bool {
        if self.new_key.trim().is_empty() {
            return false;
        }
        let key = std::mem::take(&mut self.new_key);
        let value = std::mem::take(&mut self.new_value);
        self.set_property(key, value, updater)
    }
}
