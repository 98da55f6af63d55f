//! Write routing: which record an edit from the property panel mutates.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. Class-edit mode: the edited class's active layer (every element using
//!    the class picks the change up)
//! 2. Exactly one element selected and it is an instance root: the
//!    instance's override patch
//! 3. Several elements selected: each element's own active layer,
//!    independently
//! 4. One ordinary element: its own active layer
//!
//! A rule whose context is invalid falls through to the next one: a class
//! id that no longer exists is ignored, and a multi-selection that contains
//! instance roots falls through to rule 3. Every selection shape routes
//! somewhere, even if that is [`WriteTarget::Nothing`].

use cascade::{
    StyleMap,
    store::StyleStore,
    types::{ClassId, ElementId, LayerKey},
};

use crate::{context::EditContext, patcher};

/// Where an edit lands.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteTarget {
    Class { class_id: ClassId, layer: LayerKey },
    InstanceOverride { element_id: ElementId },
    Elements { element_ids: Vec<ElementId>, layer: LayerKey },
    /// Nothing is selected.
    Nothing,
}

/// Decides the write target without mutating anything.
pub fn route(store: &StyleStore, context: &EditContext) -> WriteTarget {
    let layer = context.active_layer();

    if let Some(class_id) = &context.editing_class {
        if store.class(class_id).is_some() {
            return WriteTarget::Class {
                class_id: class_id.clone(),
                layer,
            };
        }
        log::debug!("Editing class '{}' is missing, routing by selection", class_id);
    }

    match context.selection() {
        [] => WriteTarget::Nothing,
        [only] => match store.element(only) {
            Some(element) if element.is_instance() => WriteTarget::InstanceOverride {
                element_id: only.clone(),
            },
            Some(_) => WriteTarget::Elements {
                element_ids: vec![only.clone()],
                layer,
            },
            None => WriteTarget::Nothing,
        },
        many => WriteTarget::Elements {
            element_ids: many
                .iter()
                .filter(|id| store.element(id).is_some())
                .cloned()
                .collect(),
            layer,
        },
    }
}

/// Routes and applies an edit. Returns where it landed.
///
/// Applying the same edit twice leaves the store as applying it once.
pub fn apply_edit(store: &mut StyleStore, context: &EditContext, partial: &StyleMap) -> WriteTarget {
    let target = route(store, context);

    match &target {
        WriteTarget::Class { class_id, layer } => {
            if let Some(class) = store.class_mut(class_id) {
                class.layers.merge_into(layer, partial);
            }
            log::debug!("Edit -> class '{}' {}: {}", class_id, layer, partial);
        }
        WriteTarget::InstanceOverride { element_id } => {
            if let Some(element) = store.element_mut(element_id)
                && let Err(err) = patcher::patch(element, partial)
            {
                log::warn!("Instance edit dropped: {}", err);
            }
        }
        WriteTarget::Elements { element_ids, layer } => {
            for id in element_ids {
                if let Some(element) = store.element_mut(id) {
                    element.layers.merge_into(layer, partial);
                }
            }
            log::debug!(
                "Edit -> {} element(s) {}: {}",
                element_ids.len(),
                layer,
                partial
            );
        }
        WriteTarget::Nothing => {
            log::debug!("Edit dropped: nothing selected");
        }
    }

    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade::model::Element;

    #[test]
    fn missing_single_selection_routes_nowhere() {
        let store = StyleStore::new();
        let context = EditContext::new().selecting(["ghost"]);

        assert_eq!(route(&store, &context), WriteTarget::Nothing);
    }

    #[test]
    fn batch_skips_missing_ids() {
        let mut store = StyleStore::new();
        store.insert_element(Element::new("a"));
        store.insert_element(Element::new("b"));
        let context = EditContext::new().selecting(["a", "ghost", "b"]);

        assert_eq!(
            route(&store, &context),
            WriteTarget::Elements {
                element_ids: vec!["a".to_string(), "b".to_string()],
                layer: LayerKey::Base,
            }
        );
    }
}
