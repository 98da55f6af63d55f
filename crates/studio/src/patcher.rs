//! Instance override patches.
//!
//! An element that is the root of a shared-component instance never has its
//! own style layers edited. Edits go into a sparse patch instead, so every
//! property the instance has not diverged on keeps following future edits to
//! the master.

use cascade::{CascadeError, Element, Result, StyleMap};

/// Merges `partial` into the instance's override patch.
///
/// Base, breakpoint and state layers are never touched.
pub fn patch(element: &mut Element, partial: &StyleMap) -> Result<()> {
    let instance = element
        .instance
        .as_mut()
        .ok_or_else(|| CascadeError::NotAnInstance(element.id.clone()))?;

    instance.overrides.merge(partial);
    log::debug!(
        "Patched instance '{}' of '{}': {}",
        element.id,
        instance.master_component_id,
        instance.overrides
    );
    Ok(())
}

/// Reverts one property to the master's value by deleting it from the patch.
///
/// Returns whether the patch defined the property.
pub fn clear_override(element: &mut Element, property: &str) -> Result<bool> {
    let instance = element
        .instance
        .as_mut()
        .ok_or_else(|| CascadeError::NotAnInstance(element.id.clone()))?;

    Ok(instance.overrides.remove(property).is_some())
}

/// Drops the whole patch; the instance renders exactly as its master.
pub fn clear_all_overrides(element: &mut Element) -> Result<()> {
    let instance = element
        .instance
        .as_mut()
        .ok_or_else(|| CascadeError::NotAnInstance(element.id.clone()))?;

    instance.overrides = StyleMap::new();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade::style_map;

    #[test]
    fn patch_accumulates_and_leaves_layers_alone() {
        let mut element = Element::new("card-2")
            .instance_of("card")
            .with_styles(style_map! { "color" => "black" });

        patch(&mut element, &style_map! { "color" => "red" }).unwrap();
        patch(&mut element, &style_map! { "padding" => "4px" }).unwrap();

        assert_eq!(element.layers.styles.to_string(), "color: black");
        assert_eq!(
            element.instance.as_ref().unwrap().overrides.to_string(),
            "color: red; padding: 4px"
        );
    }

    #[test]
    fn clear_override_reverts_a_single_property() {
        let mut element = Element::new("card-2").instance_of("card");
        patch(&mut element, &style_map! { "color" => "red", "gap" => 8 }).unwrap();

        assert!(clear_override(&mut element, "color").unwrap());
        assert!(!clear_override(&mut element, "color").unwrap());
        assert_eq!(
            element.instance.as_ref().unwrap().overrides.to_string(),
            "gap: 8"
        );

        clear_all_overrides(&mut element).unwrap();
        assert!(element.instance.as_ref().unwrap().overrides.is_empty());
    }

    #[test]
    fn plain_elements_are_rejected() {
        let mut element = Element::new("plain");
        assert!(matches!(
            patch(&mut element, &StyleMap::new()),
            Err(CascadeError::NotAnInstance(_))
        ));
    }
}
