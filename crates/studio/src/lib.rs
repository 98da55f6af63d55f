//! # Studio - the editing side of the pagestyle cascade
//!
//! `cascade` answers what a subject looks like. This crate holds the editor
//! state around it and decides what an edit changes:
//!
//! - [`context`]: active breakpoint, state, class-edit mode and selection
//! - [`router`]: which record an edit mutates
//! - [`patcher`]: sparse override patches on component instances
//! - [`container_query`]: width-driven style variants
//! - [`pump`]: async delivery of measured sizes
//!
//! [`Studio`] wires these together around one [`StyleStore`] and one
//! [`ContainerQueryEngine`]. Each `Studio` owns its own engine, so several
//! editors (or tests) never share container-query state.
//!
//! ## Example
//!
//! ```
//! use cascade::{Element, StyleStore, style_map};
//! use cascade::types::StyleState;
//! use studio::{Studio, StudioConfig};
//!
//! let mut store = StyleStore::new();
//! store.insert_element(Element::new("title").with_styles(style_map! { "color" => "black" }));
//!
//! let mut studio = Studio::new(store, StudioConfig::default());
//! studio.select(["title"]);
//! studio.set_state(StyleState::Hover);
//! studio.set_property("color", "red");
//!
//! assert!(studio.is_overridden("color"));
//! assert_eq!(studio.current_styles().to_string(), "color: red");
//!
//! studio.set_state(StyleState::None);
//! assert_eq!(studio.current_styles().to_string(), "color: black");
//! ```

pub mod config;
pub mod container_query;
pub mod context;
pub mod error;
mod log_init;
pub mod patcher;
pub mod pump;
pub mod router;

use cascade::{
    StyleMap, StyleStore, SubjectId,
    autotune::derive_breakpoint_defaults,
    overrides::{PropertyQuery, is_overridden, overriding_layer},
    resolve::{composite, resolve},
    types::{Breakpoint, ClassId, ElementId, LayerKey, StyleState, StyleValue},
};

pub use config::StudioConfig;
pub use container_query::{
    ContainerQuery, ContainerQueryEngine, Headless, Measurement, QueryCallback, QueryMatch,
    SizeObserver,
};
pub use context::EditContext;
pub use error::{Result, StudioError};
pub use log_init::init_logger;
pub use router::{WriteTarget, apply_edit, route};

// Re-export the log crate so hosts can use studio::log::info!, etc.
pub use log;

/// The editor's composition root.
pub struct Studio<O: SizeObserver = Headless> {
    store: StyleStore,
    context: EditContext,
    container_queries: ContainerQueryEngine<O>,
    config: StudioConfig,
}

impl Studio<Headless> {
    /// A studio without size observation (tests, exports, server-side use).
    pub fn new(store: StyleStore, config: StudioConfig) -> Self {
        Self::from_parts(store, ContainerQueryEngine::headless(), config)
    }
}

impl<O: SizeObserver> Studio<O> {
    pub fn with_observer(store: StyleStore, observer: O, config: StudioConfig) -> Self {
        Self::from_parts(store, ContainerQueryEngine::new(observer), config)
    }

    fn from_parts(
        store: StyleStore,
        container_queries: ContainerQueryEngine<O>,
        config: StudioConfig,
    ) -> Self {
        let context = EditContext::new()
            .with_breakpoint(config.breakpoint)
            .with_state(config.state.clone());
        Self {
            store,
            context,
            container_queries,
            config,
        }
    }

    pub fn store(&self) -> &StyleStore {
        &self.store
    }

    /// Store access for lifecycle operations (classes, variants, elements).
    /// Style edits should go through [`apply_edit`](Self::apply_edit).
    pub fn store_mut(&mut self) -> &mut StyleStore {
        &mut self.store
    }

    pub fn context(&self) -> &EditContext {
        &self.context
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn container_queries(&self) -> &ContainerQueryEngine<O> {
        &self.container_queries
    }

    pub fn container_queries_mut(&mut self) -> &mut ContainerQueryEngine<O> {
        &mut self.container_queries
    }

    // ---------------------------------------------------------------------
    // Context
    // ---------------------------------------------------------------------

    pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
        self.context.breakpoint = breakpoint;
    }

    /// Switches the active state. A custom state named after a built-in one
    /// (`Custom("hover")`) selects the built-in state.
    pub fn set_state(&mut self, state: StyleState) {
        self.context.state = state.normalized();
    }

    pub fn select<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<ElementId>,
    {
        self.context.select(ids);
    }

    pub fn toggle_selection(&mut self, id: &str) {
        self.context.toggle(id);
    }

    /// Enters class-edit mode for `class`, or leaves it with `None`.
    pub fn edit_class(&mut self, class: Option<ClassId>) {
        self.context.editing_class = class;
    }

    /// The subject reads and variant management apply to.
    pub fn current_subject(&self) -> Option<SubjectId> {
        if let Some(class_id) = &self.context.editing_class
            && self.store.class(class_id).is_some()
        {
            return Some(SubjectId::Class(class_id.clone()));
        }
        self.context
            .primary()
            .filter(|id| self.store.element(id).is_some())
            .map(|id| SubjectId::Element(id.to_string()))
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    /// Values the property panel displays. Empty when nothing is selected.
    pub fn current_styles(&self) -> StyleMap {
        self.context
            .read_subject(&self.store)
            .map(|subject| resolve(subject, self.context.breakpoint, &self.context.state))
            .unwrap_or_default()
    }

    /// Whether the current layer overrides any of the properties.
    pub fn is_overridden<'a>(&self, properties: impl Into<PropertyQuery<'a>>) -> bool {
        self.context.read_subject(&self.store).is_some_and(|subject| {
            is_overridden(
                subject,
                self.context.breakpoint,
                &self.context.state,
                properties,
            )
        })
    }

    pub fn overriding_layer<'a>(
        &self,
        properties: impl Into<PropertyQuery<'a>>,
    ) -> Option<LayerKey> {
        let subject = self.context.read_subject(&self.store)?;
        overriding_layer(
            subject,
            self.context.breakpoint,
            &self.context.state,
            properties,
        )
    }

    /// Final style of an element for rendering in the current context.
    ///
    /// `master` is the resolved style of the element's component master,
    /// when it is an instance root.
    pub fn composite(&self, element_id: &str, master: Option<&StyleMap>) -> Option<StyleMap> {
        let element = self.store.element(element_id)?;
        Some(composite(
            &self.store,
            element,
            master,
            self.context.breakpoint,
            &self.context.state,
        ))
    }

    // ---------------------------------------------------------------------
    // Writes
    // ---------------------------------------------------------------------

    pub fn apply_edit(&mut self, partial: &StyleMap) -> WriteTarget {
        router::apply_edit(&mut self.store, &self.context, partial)
    }

    /// Single-property edit, as sent by one panel control.
    pub fn set_property(
        &mut self,
        property: impl Into<String>,
        value: impl Into<StyleValue>,
    ) -> WriteTarget {
        let mut partial = StyleMap::new();
        partial.insert(property, value);
        self.apply_edit(&partial)
    }

    /// Reverts one property of the selected instance to the master's value.
    pub fn clear_override(&mut self, property: &str) -> Result<bool> {
        let element_id = match router::route(&self.store, &self.context) {
            WriteTarget::InstanceOverride { element_id } => element_id,
            _ => return Err(StudioError::NoInstanceSelected),
        };
        let element = self
            .store
            .element_mut(&element_id)
            .ok_or(StudioError::NoInstanceSelected)?;
        Ok(patcher::clear_override(element, property)?)
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// "Create class from current styles" for the primary selection.
    pub fn create_class_from_selection(&mut self, name: &str) -> Result<ClassId> {
        let element_id = self
            .context
            .primary()
            .map(str::to_string)
            .ok_or(StudioError::NothingSelected)?;
        Ok(self.store.create_class_from_element(&element_id, name)?)
    }

    /// Deletes a class everywhere and leaves class-edit mode if it was the target.
    pub fn delete_class(&mut self, class_id: &str) -> Result<usize> {
        let cleaned = self.store.delete_class(class_id)?;
        if self.context.editing_class.as_deref() == Some(class_id) {
            self.context.editing_class = None;
        }
        Ok(cleaned)
    }

    /// Removes an element subtree, deselecting it and releasing its
    /// container-query state.
    pub fn remove_element(&mut self, element_id: &str) -> Result<Vec<ElementId>> {
        let removed = self.store.remove_element(element_id)?;
        for id in &removed {
            self.context.deselect(id);
            self.container_queries.forget(id);
        }
        Ok(removed)
    }

    /// Adds a custom variant to the current subject.
    pub fn add_variant(&mut self, name: &str) -> Result<()> {
        let subject = self
            .current_subject()
            .ok_or(StudioError::NothingSelected)?;
        Ok(self.store.add_variant(&subject, name)?)
    }

    /// Removes a custom variant from the current subject, leaving the state
    /// if it was the active one.
    pub fn remove_variant(&mut self, name: &str) -> Result<()> {
        let subject = self
            .current_subject()
            .ok_or(StudioError::NothingSelected)?;
        self.store.remove_variant(&subject, name)?;
        if self.context.state == StyleState::Custom(name.to_string()) {
            self.context.state = StyleState::None;
        }
        Ok(())
    }

    /// "Generate responsive defaults": runs auto-tune over every element
    /// and fills the gaps in their tablet/mobile layers. Returns how many
    /// elements were patched.
    pub fn generate_responsive_defaults(&mut self) -> usize {
        let patches = derive_breakpoint_defaults(self.store.elements(), &self.config.tune);
        self.store.apply_breakpoint_defaults(&patches);
        log::debug!("Generated responsive defaults for {} elements", patches.len());
        patches.len()
    }
}
