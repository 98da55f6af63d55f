//! The style store: every element and design class of a project.
//!
//! The store is plain data plus the lifecycle operations that have to keep
//! cross-record invariants intact:
//!
//! - deleting a class removes it from every element's `classNames`
//! - removing an element removes its subtree and detaches it from its parent
//! - class names stay unique
//! - custom variant names never collide with the built-in state names
//!
//! Style *edits* do not go through here directly; they are routed by the
//! editor so that override semantics stay consistent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    autotune::BreakpointPatch,
    error::{CascadeError, Result},
    model::{DesignClass, Element, Styled},
    types::{ClassId, ElementId, StyleMap, is_reserved_state_name},
};

/// Names either kind of resolvable subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubjectId {
    Element(ElementId),
    Class(ClassId),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleStore {
    #[serde(default)]
    elements: BTreeMap<ElementId, Element>,
    /// Kept in creation order.
    #[serde(default)]
    classes: Vec<DesignClass>,
    #[serde(skip)]
    next_class_seq: u64,
}

impl StyleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a store from project JSON.
    pub fn from_json(source: &str) -> Result<Self> {
        let store: Self = serde_json::from_str(source)?;
        log::debug!(
            "Loaded style store: {} elements, {} classes",
            store.elements.len(),
            store.classes.len()
        );
        Ok(store)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // ---------------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------------

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn class(&self, id: &str) -> Option<&DesignClass> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn class_mut(&mut self, id: &str) -> Option<&mut DesignClass> {
        self.classes.iter_mut().find(|c| c.id == id)
    }

    pub fn class_by_name(&self, name: &str) -> Option<&DesignClass> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn classes(&self) -> &[DesignClass] {
        &self.classes
    }

    pub fn subject(&self, id: &SubjectId) -> Option<&dyn Styled> {
        match id {
            SubjectId::Element(id) => self.element(id).map(|e| e as &dyn Styled),
            SubjectId::Class(id) => self.class(id).map(|c| c as &dyn Styled),
        }
    }

    pub fn subject_mut(&mut self, id: &SubjectId) -> Option<&mut dyn Styled> {
        match id {
            SubjectId::Element(id) => self.element_mut(id).map(|e| e as &mut dyn Styled),
            SubjectId::Class(id) => self.class_mut(id).map(|c| c as &mut dyn Styled),
        }
    }

    // ---------------------------------------------------------------------
    // Elements
    // ---------------------------------------------------------------------

    /// Adds or replaces an element, linking it into its parent's children.
    pub fn insert_element(&mut self, element: Element) {
        if let Some(parent) = element
            .parent_id
            .as_ref()
            .and_then(|id| self.elements.get_mut(id))
            && !parent.children.contains(&element.id)
        {
            parent.children.push(element.id.clone());
        }
        log::debug!("Inserted element '{}'", element.id);
        self.elements.insert(element.id.clone(), element);
    }

    /// Removes an element and its whole subtree. Returns the removed ids.
    pub fn remove_element(&mut self, id: &str) -> Result<Vec<ElementId>> {
        let root = self
            .elements
            .remove(id)
            .ok_or_else(|| CascadeError::UnknownElement(id.to_string()))?;

        if let Some(parent) = root
            .parent_id
            .as_ref()
            .and_then(|parent| self.elements.get_mut(parent))
        {
            parent.children.retain(|child| child != id);
        }

        let mut removed = vec![root.id.clone()];
        let mut pending = root.children;
        while let Some(child_id) = pending.pop() {
            if let Some(child) = self.elements.remove(&child_id) {
                pending.extend(child.children);
                removed.push(child_id);
            }
        }

        log::debug!("Removed element '{}' ({} records)", id, removed.len());
        Ok(removed)
    }

    // ---------------------------------------------------------------------
    // Classes
    // ---------------------------------------------------------------------

    /// Creates a class from a style snapshot and returns its id.
    pub fn create_class(&mut self, name: &str, styles: StyleMap) -> Result<ClassId> {
        if self.class_by_name(name).is_some() {
            return Err(CascadeError::DuplicateClassName(name.to_string()));
        }

        let id = self.next_class_id();
        self.classes.push(DesignClass::new(id.clone(), name, styles));
        log::debug!("Created class '{}' ({})", name, id);
        Ok(id)
    }

    /// "Create class from current styles": snapshots an element's base styles.
    pub fn create_class_from_element(&mut self, element_id: &str, name: &str) -> Result<ClassId> {
        let styles = self
            .element(element_id)
            .map(|e| e.layers.styles.clone())
            .ok_or_else(|| CascadeError::UnknownElement(element_id.to_string()))?;
        self.create_class(name, styles)
    }

    pub fn rename_class(&mut self, id: &str, name: &str) -> Result<()> {
        if self.class_by_name(name).is_some_and(|c| c.id != id) {
            return Err(CascadeError::DuplicateClassName(name.to_string()));
        }
        let class = self
            .class_mut(id)
            .ok_or_else(|| CascadeError::UnknownClass(id.to_string()))?;
        class.name = name.to_string();
        Ok(())
    }

    /// Deletes a class and removes every reference to it.
    ///
    /// Returns how many elements had the class applied.
    pub fn delete_class(&mut self, id: &str) -> Result<usize> {
        let index = self
            .classes
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CascadeError::UnknownClass(id.to_string()))?;
        self.classes.remove(index);

        let mut cleaned = 0;
        for element in self.elements.values_mut() {
            let before = element.class_names.len();
            element.class_names.retain(|class| class != id);
            if element.class_names.len() != before {
                cleaned += 1;
            }
        }

        log::debug!("Deleted class '{}', cleaned {} elements", id, cleaned);
        Ok(cleaned)
    }

    /// Replaces an element's classes with zero or one class.
    pub fn apply_class(&mut self, element_id: &str, class_id: Option<&str>) -> Result<()> {
        if let Some(class_id) = class_id {
            self.ensure_class(class_id)?;
        }
        let element = self.element_mut_or_err(element_id)?;
        element.class_names = class_id.map(str::to_string).into_iter().collect();
        Ok(())
    }

    /// Appends a class to an element if it is not already applied.
    pub fn add_class(&mut self, element_id: &str, class_id: &str) -> Result<()> {
        let element = self.element_mut_or_err(element_id)?;
        if element.class_names.iter().any(|c| c == class_id) {
            return Ok(());
        }
        self.ensure_class(class_id)?;
        self.element_mut_or_err(element_id)?
            .class_names
            .push(class_id.to_string());
        Ok(())
    }

    pub fn remove_class(&mut self, element_id: &str, class_id: &str) -> Result<()> {
        self.element_mut_or_err(element_id)?
            .class_names
            .retain(|c| c != class_id);
        Ok(())
    }

    /// Lists `(element, class)` references whose class no longer exists.
    pub fn dangling_class_refs(&self) -> Vec<(ElementId, ClassId)> {
        self.elements
            .values()
            .flat_map(|element| {
                element
                    .class_names
                    .iter()
                    .filter(|class| self.class(class).is_none())
                    .map(|class| (element.id.clone(), class.clone()))
            })
            .collect()
    }

    // ---------------------------------------------------------------------
    // Variants
    // ---------------------------------------------------------------------

    /// Adds an empty custom variant. Existing variants are left untouched.
    pub fn add_variant(&mut self, subject: &SubjectId, name: &str) -> Result<()> {
        if is_reserved_state_name(name) {
            return Err(CascadeError::ReservedVariantName(name.to_string()));
        }
        self.subject_mut_or_err(subject)?
            .layers_mut()
            .variants
            .entry(name.to_string())
            .or_default();
        Ok(())
    }

    /// Removes a custom variant and its styles.
    pub fn remove_variant(&mut self, subject: &SubjectId, name: &str) -> Result<()> {
        self.subject_mut_or_err(subject)?
            .layers_mut()
            .variants
            .remove(name);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Responsive defaults
    // ---------------------------------------------------------------------

    /// Writes auto-tune patches back. Values already present in the
    /// element's breakpoint layers are kept; patches only fill gaps.
    pub fn apply_breakpoint_defaults(&mut self, patches: &BTreeMap<ElementId, BreakpointPatch>) {
        for (id, patch) in patches {
            match self.elements.get_mut(id) {
                Some(element) => {
                    element.layers.tablet_styles.fill_from(&patch.tablet_styles);
                    element.layers.mobile_styles.fill_from(&patch.mobile_styles);
                }
                None => log::warn!("Skipping responsive defaults for unknown element '{}'", id),
            }
        }
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    fn next_class_id(&mut self) -> ClassId {
        loop {
            self.next_class_seq += 1;
            let id = format!("cls-{}", self.next_class_seq);
            if self.class(&id).is_none() {
                return id;
            }
        }
    }

    fn ensure_class(&self, id: &str) -> Result<()> {
        self.class(id)
            .map(|_| ())
            .ok_or_else(|| CascadeError::UnknownClass(id.to_string()))
    }

    fn element_mut_or_err(&mut self, id: &str) -> Result<&mut Element> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| CascadeError::UnknownElement(id.to_string()))
    }

    fn subject_mut_or_err(&mut self, id: &SubjectId) -> Result<&mut dyn Styled> {
        self.subject_mut(id).ok_or_else(|| match id {
            SubjectId::Element(id) => CascadeError::UnknownElement(id.clone()),
            SubjectId::Class(id) => CascadeError::UnknownClass(id.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style_map;

    #[test]
    fn class_ids_skip_ids_taken_by_loaded_data() {
        let mut store = StyleStore::from_json(
            r#"{ "classes": [ { "id": "cls-1", "name": "card" } ] }"#,
        )
        .unwrap();

        let id = store.create_class("button", style_map! { "color" => "red" }).unwrap();

        assert_eq!(id, "cls-2");
    }

    #[test]
    fn rename_to_own_name_is_allowed() {
        let mut store = StyleStore::new();
        let id = store.create_class("card", StyleMap::new()).unwrap();

        assert!(store.rename_class(&id, "card").is_ok());
    }
}
