//! Style store records: elements, design classes and their style layers.
//!
//! Elements and design classes carry the same set of layers
//! ([`StyleLayers`]), which is what makes a class a resolvable subject in
//! its own right. The [`Styled`] trait is the seam the resolver, override
//! tracker and write router use to treat both uniformly.
//!
//! ## Serialized shape
//!
//! Records (de)serialize in the editor's project format, camelCase with the
//! layers inlined:
//!
//! ```json
//! {
//!   "id": "hero",
//!   "parentId": "root",
//!   "styles": { "fontSize": "3rem" },
//!   "mobileStyles": { "fontSize": "2rem" },
//!   "variants": { "pressed": { "opacity": 0.8 } },
//!   "classNames": ["cls-1"],
//!   "masterComponentId": "hero-master",
//!   "overrides": { "styles": { "color": "red" } }
//! }
//! ```
//!
//! In memory the last two fields form one [`Instance`]. An `overrides` block
//! without a `masterComponentId` has nothing to patch and is dropped on load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{ClassId, ComponentId, ElementId, LayerKey, StyleMap};

/// Every style layer a subject can carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleLayers {
    /// Base (desktop) styles.
    #[serde(default, skip_serializing_if = "StyleMap::is_empty")]
    pub styles: StyleMap,
    #[serde(default, skip_serializing_if = "StyleMap::is_empty")]
    pub tablet_styles: StyleMap,
    #[serde(default, skip_serializing_if = "StyleMap::is_empty")]
    pub mobile_styles: StyleMap,
    #[serde(default, skip_serializing_if = "StyleMap::is_empty")]
    pub hover_styles: StyleMap,
    #[serde(default, skip_serializing_if = "StyleMap::is_empty")]
    pub active_styles: StyleMap,
    #[serde(default, skip_serializing_if = "StyleMap::is_empty")]
    pub focus_styles: StyleMap,
    /// Custom named variants, superseding the fixed states for anything
    /// beyond hover/active/focus.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variants: BTreeMap<String, StyleMap>,
}

impl StyleLayers {
    /// Reads one layer. Only a missing variant yields `None`.
    pub fn layer(&self, key: &LayerKey) -> Option<&StyleMap> {
        match key {
            LayerKey::Base => Some(&self.styles),
            LayerKey::Tablet => Some(&self.tablet_styles),
            LayerKey::Mobile => Some(&self.mobile_styles),
            LayerKey::Hover => Some(&self.hover_styles),
            LayerKey::Active => Some(&self.active_styles),
            LayerKey::Focus => Some(&self.focus_styles),
            LayerKey::Variant(name) => self.variants.get(name),
        }
    }

    /// Mutable access to one layer, creating an empty variant if needed.
    pub fn layer_mut(&mut self, key: &LayerKey) -> &mut StyleMap {
        match key {
            LayerKey::Base => &mut self.styles,
            LayerKey::Tablet => &mut self.tablet_styles,
            LayerKey::Mobile => &mut self.mobile_styles,
            LayerKey::Hover => &mut self.hover_styles,
            LayerKey::Active => &mut self.active_styles,
            LayerKey::Focus => &mut self.focus_styles,
            LayerKey::Variant(name) => self.variants.entry(name.clone()).or_default(),
        }
    }

    /// Merges `partial` into one layer.
    pub fn merge_into(&mut self, key: &LayerKey, partial: &StyleMap) {
        self.layer_mut(key).merge(partial);
    }
}

/// Anything that owns a set of style layers.
pub trait Styled {
    fn layers(&self) -> &StyleLayers;
    fn layers_mut(&mut self) -> &mut StyleLayers;
}

impl Styled for StyleLayers {
    fn layers(&self) -> &StyleLayers {
        self
    }

    fn layers_mut(&mut self) -> &mut StyleLayers {
        self
    }
}

/// Link from an instance root to its shared component master.
///
/// The master id and the override patch only exist together: `overrides`
/// is a sparse delta over whatever the master resolves to, so any property
/// absent from it keeps following the master.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Instance {
    pub master_component_id: ComponentId,
    pub overrides: StyleMap,
}

impl Instance {
    pub fn of(master: impl Into<ComponentId>) -> Self {
        Self {
            master_component_id: master.into(),
            overrides: StyleMap::new(),
        }
    }
}

/// A node on the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ElementRecord", into = "ElementRecord")]
pub struct Element {
    pub id: ElementId,
    /// Weak back-reference; ownership runs parent to child through `children`.
    pub parent_id: Option<ElementId>,
    pub children: Vec<ElementId>,
    pub layers: StyleLayers,
    /// Applied classes in insertion order; the last one wins at render time.
    pub class_names: Vec<ClassId>,
    pub instance: Option<Instance>,
}

/// The project-file shape of an [`Element`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ElementRecord {
    id: ElementId,
    #[serde(default)]
    parent_id: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<ElementId>,
    #[serde(flatten)]
    layers: StyleLayers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    class_names: Vec<ClassId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    master_component_id: Option<ComponentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    overrides: Option<OverridesRecord>,
}

#[derive(Serialize, Deserialize)]
struct OverridesRecord {
    #[serde(default)]
    styles: StyleMap,
}

impl From<ElementRecord> for Element {
    fn from(record: ElementRecord) -> Self {
        let instance = record.master_component_id.map(|master| Instance {
            master_component_id: master,
            overrides: record.overrides.map(|o| o.styles).unwrap_or_default(),
        });
        Self {
            id: record.id,
            parent_id: record.parent_id,
            children: record.children,
            layers: record.layers,
            class_names: record.class_names,
            instance,
        }
    }
}

impl From<Element> for ElementRecord {
    fn from(element: Element) -> Self {
        let (master_component_id, overrides) = match element.instance {
            Some(instance) => {
                let overrides = (!instance.overrides.is_empty()).then(|| OverridesRecord {
                    styles: instance.overrides,
                });
                (Some(instance.master_component_id), overrides)
            }
            None => (None, None),
        };
        Self {
            id: element.id,
            parent_id: element.parent_id,
            children: element.children,
            layers: element.layers,
            class_names: element.class_names,
            master_component_id,
            overrides,
        }
    }
}

impl Element {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent: impl Into<ElementId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    pub fn with_styles(mut self, styles: StyleMap) -> Self {
        self.layers.styles = styles;
        self
    }

    pub fn with_layer(mut self, key: LayerKey, styles: StyleMap) -> Self {
        *self.layers.layer_mut(&key) = styles;
        self
    }

    pub fn with_class(mut self, class: impl Into<ClassId>) -> Self {
        self.class_names.push(class.into());
        self
    }

    /// Marks this element as the root of an instance of `master`.
    pub fn instance_of(mut self, master: impl Into<ComponentId>) -> Self {
        self.instance = Some(Instance::of(master));
        self
    }

    pub fn is_instance(&self) -> bool {
        self.instance.is_some()
    }

    pub fn master_component_id(&self) -> Option<&str> {
        self.instance
            .as_ref()
            .map(|instance| instance.master_component_id.as_str())
    }
}

impl Styled for Element {
    fn layers(&self) -> &StyleLayers {
        &self.layers
    }

    fn layers_mut(&mut self) -> &mut StyleLayers {
        &mut self.layers
    }
}

/// A named, reusable bundle of style layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignClass {
    pub id: ClassId,
    /// Unique display key.
    pub name: String,
    #[serde(flatten)]
    pub layers: StyleLayers,
}

impl DesignClass {
    pub fn new(id: impl Into<ClassId>, name: impl Into<String>, styles: StyleMap) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            layers: StyleLayers {
                styles,
                ..Default::default()
            },
        }
    }
}

impl Styled for DesignClass {
    fn layers(&self) -> &StyleLayers {
        &self.layers
    }

    fn layers_mut(&mut self) -> &mut StyleLayers {
        &mut self.layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variant_reads_as_none_and_writes_create_it() {
        let mut layers = StyleLayers::default();
        let key = LayerKey::Variant("pressed".to_string());

        assert!(layers.layer(&key).is_none());

        layers.layer_mut(&key).insert("opacity", 0.8);
        assert_eq!(layers.layer(&key).map(StyleMap::len), Some(1));
    }

    #[test]
    fn element_json_uses_project_field_names() {
        let json = r#"{
            "id": "card",
            "parentId": "root",
            "styles": { "padding": "8px" },
            "hoverStyles": { "color": "red" },
            "classNames": ["cls-1"],
            "masterComponentId": "card-master",
            "overrides": { "styles": { "color": "blue" } }
        }"#;

        let element: Element = serde_json::from_str(json).unwrap();

        assert_eq!(element.parent_id.as_deref(), Some("root"));
        assert_eq!(element.layers.hover_styles.len(), 1);
        assert_eq!(element.class_names, vec!["cls-1".to_string()]);
        assert_eq!(element.master_component_id(), Some("card-master"));
        assert_eq!(
            element.instance.as_ref().map(|i| i.overrides.to_string()),
            Some("color: blue".to_string())
        );
    }

    #[test]
    fn instance_serializes_at_the_top_level() {
        let mut element = Element::new("card").instance_of("card-master");
        if let Some(instance) = element.instance.as_mut() {
            instance.overrides.insert("padding", "4px");
        }

        let value = serde_json::to_value(&element).unwrap();

        assert_eq!(value["masterComponentId"], "card-master");
        assert_eq!(value["overrides"]["styles"]["padding"], "4px");
        assert!(value.get("instance").is_none());
    }

    #[test]
    fn instance_without_patch_omits_overrides() {
        let element = Element::new("card").instance_of("card-master");
        let value = serde_json::to_value(&element).unwrap();

        assert_eq!(value["masterComponentId"], "card-master");
        assert!(value.get("overrides").is_none());
    }

    #[test]
    fn orphan_overrides_are_dropped() {
        let json = r#"{ "id": "plain", "overrides": { "styles": { "color": "red" } } }"#;
        let element: Element = serde_json::from_str(json).unwrap();

        assert!(!element.is_instance());
    }
}
