//! Cascade resolution: what style does a subject currently have.
//!
//! - [`resolve`]: a subject's own cascade for one breakpoint and state
//! - [`render_instance`]: master style with an instance's override patch on top
//! - [`composite`]: classes, master, own cascade and patch merged for rendering
//!
//! ## Cascade Algorithm
//!
//! 1. Start from a copy of the base `styles`
//! 2. Merge the active breakpoint layer (tablet or mobile; desktop adds nothing)
//! 3. Merge the active state layer (hover/active/focus or a custom variant)
//!
//! Breakpoints are mutually exclusive: resolving at mobile never picks up
//! tablet values. Missing layers are empty, so resolution is total.

use crate::{
    model::{Element, Instance, Styled},
    store::StyleStore,
    types::{Breakpoint, LayerKey, StyleMap, StyleState},
};

/// Computes the effective style of one subject (an element or a class).
///
/// Never reads `classNames`: class effects are layered by [`composite`].
///
/// # Example
///
/// ```
/// use cascade::model::Element;
/// use cascade::resolve::resolve;
/// use cascade::style_map;
/// use cascade::types::{Breakpoint, LayerKey, StyleState};
///
/// let element = Element::new("title")
///     .with_styles(style_map! { "color" => "black" })
///     .with_layer(LayerKey::Hover, style_map! { "color" => "red" });
///
/// let hovered = resolve(&element, Breakpoint::Desktop, &StyleState::Hover);
/// assert_eq!(hovered.get("color").and_then(|v| v.as_str()), Some("red"));
/// ```
pub fn resolve<S>(subject: &S, breakpoint: Breakpoint, state: &StyleState) -> StyleMap
where
    S: Styled + ?Sized,
{
    let layers = subject.layers();
    let mut result = layers.styles.clone();

    if let Some(layer) = LayerKey::for_breakpoint(breakpoint).and_then(|key| layers.layer(&key)) {
        result.merge(layer);
    }

    // An unknown variant behaves like no state at all.
    if let Some(layer) = LayerKey::for_state(state).and_then(|key| layers.layer(&key)) {
        result.merge(layer);
    }

    log::trace!(
        "CASCADE: breakpoint={} state={} -> {} properties",
        breakpoint,
        state,
        result.len()
    );

    result
}

/// What an instance renders as: the master's resolved style with the sparse
/// override patch merged on top.
pub fn render_instance(master: &StyleMap, instance: &Instance) -> StyleMap {
    master.clone().layered(&instance.overrides)
}

/// Computes the final style a renderer should use for an element.
///
/// Layers, lowest priority first:
///
/// 1. Every assigned class, resolved at the same breakpoint and state, in
///    `classNames` order (later classes win). Dangling class ids are skipped.
/// 2. `master`: the externally resolved style of the element's component
///    master, when it is an instance root.
/// 3. The element's own cascade ([`resolve`]).
/// 4. The instance override patch.
pub fn composite(
    store: &StyleStore,
    element: &Element,
    master: Option<&StyleMap>,
    breakpoint: Breakpoint,
    state: &StyleState,
) -> StyleMap {
    let mut result = StyleMap::new();

    for class_id in &element.class_names {
        match store.class(class_id) {
            Some(class) => result.merge(&resolve(class, breakpoint, state)),
            None => log::debug!(
                "Skipping dangling class '{}' on element '{}'",
                class_id,
                element.id
            ),
        }
    }

    if let Some(master) = master {
        result.merge(master);
    }

    result.merge(&resolve(element, breakpoint, state));

    if let Some(instance) = &element.instance {
        result.merge(&instance.overrides);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StyleLayers;
    use crate::style_map;

    #[test]
    fn empty_subject_resolves_to_empty_map() {
        let layers = StyleLayers::default();
        for breakpoint in [Breakpoint::Desktop, Breakpoint::Tablet, Breakpoint::Mobile] {
            for state in [
                StyleState::None,
                StyleState::Hover,
                StyleState::Active,
                StyleState::Focus,
                StyleState::Custom("ghost".into()),
            ] {
                assert!(resolve(&layers, breakpoint, &state).is_empty());
            }
        }
    }

    #[test]
    fn render_instance_keeps_master_values_not_in_patch() {
        let master = style_map! { "color" => "black", "padding" => "8px" };
        let mut instance = Instance::of("card");
        instance.overrides.insert("color", "teal");

        let rendered = render_instance(&master, &instance);

        assert_eq!(rendered.to_string(), "color: teal; padding: 8px");
    }
}
