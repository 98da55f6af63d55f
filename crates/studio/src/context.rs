//! The editing context: what the property panel is currently looking at.
//!
//! An [`EditContext`] carries the active breakpoint and state, the class
//! being edited (if any) and the current element selection. It decides
//! which subject reads go through and which layer writes land in.

use cascade::{
    Styled,
    store::StyleStore,
    types::{Breakpoint, ClassId, ElementId, LayerKey, StyleState},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditContext {
    pub breakpoint: Breakpoint,
    pub state: StyleState,
    /// Set while a design class is the editing target ("class edit" mode).
    pub editing_class: Option<ClassId>,
    /// Selected elements in selection order, without duplicates.
    selection: Vec<ElementId>,
}

impl EditContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    pub fn with_state(mut self, state: StyleState) -> Self {
        self.state = state.normalized();
        self
    }

    pub fn editing_class(mut self, class: impl Into<ClassId>) -> Self {
        self.editing_class = Some(class.into());
        self
    }

    pub fn selecting<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ElementId>,
    {
        self.select(ids);
        self
    }

    /// Replaces the selection. Repeated ids are kept once.
    pub fn select<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<ElementId>,
    {
        self.selection.clear();
        for id in ids {
            let id = id.into();
            if !self.selection.contains(&id) {
                self.selection.push(id);
            }
        }
    }

    /// Adds or removes one element (shift-click).
    pub fn toggle(&mut self, id: &str) {
        match self.selection.iter().position(|s| s == id) {
            Some(index) => {
                self.selection.remove(index);
            }
            None => self.selection.push(id.to_string()),
        }
    }

    pub fn deselect(&mut self, id: &str) {
        self.selection.retain(|s| s != id);
    }

    pub fn selection(&self) -> &[ElementId] {
        &self.selection
    }

    /// The element the panel shows: the most recently selected one.
    pub fn primary(&self) -> Option<&str> {
        self.selection.last().map(String::as_str)
    }

    /// The layer reads badge against and writes land in.
    pub fn active_layer(&self) -> LayerKey {
        LayerKey::active(self.breakpoint, &self.state)
    }

    /// The subject reads resolve against.
    ///
    /// In class-edit mode the edited class fully replaces the selection. A
    /// class id that no longer exists is ignored and the primary element is
    /// used instead.
    pub fn read_subject<'s>(&self, store: &'s StyleStore) -> Option<&'s dyn Styled> {
        if let Some(class_id) = &self.editing_class {
            match store.class(class_id) {
                Some(class) => return Some(class as &dyn Styled),
                None => log::debug!("Editing class '{}' is missing, reading selection", class_id),
            }
        }
        self.primary()
            .and_then(|id| store.element(id))
            .map(|element| element as &dyn Styled)
    }
}
