//! Compositing order: classes, master, own cascade, instance patch.

use cascade::model::Element;
use cascade::resolve::{composite, render_instance};
use cascade::store::StyleStore;
use cascade::style_map;
use cascade::types::{Breakpoint, LayerKey, StyleState};

#[test]
fn later_classes_win_and_element_beats_classes() {
    let mut store = StyleStore::new();
    let base = store
        .create_class("base", style_map! { "color" => "black", "padding" => "4px" })
        .unwrap();
    let accent = store
        .create_class("accent", style_map! { "color" => "teal" })
        .unwrap();

    store.insert_element(
        Element::new("title")
            .with_styles(style_map! { "padding" => "12px" })
            .with_class(base)
            .with_class(accent),
    );

    let element = store.element("title").unwrap();
    let rendered = composite(&store, element, None, Breakpoint::Desktop, &StyleState::None);

    insta::assert_snapshot!(rendered.to_string(), @"color: teal; padding: 12px");
}

#[test]
fn classes_are_resolved_at_the_same_context() {
    let mut store = StyleStore::new();
    let id = store
        .create_class("stack", style_map! { "flexDirection" => "row" })
        .unwrap();
    store
        .class_mut(&id)
        .unwrap()
        .layers
        .mobile_styles
        .insert("flexDirection", "column");
    store.insert_element(Element::new("row").with_class(id));

    let element = store.element("row").unwrap();
    let rendered = composite(&store, element, None, Breakpoint::Mobile, &StyleState::None);

    assert_eq!(rendered.to_string(), "flexDirection: column");
}

#[test]
fn dangling_class_references_are_skipped() {
    let mut store = StyleStore::new();
    store.insert_element(
        Element::new("orphan")
            .with_styles(style_map! { "color" => "black" })
            .with_class("cls-404"),
    );

    let element = store.element("orphan").unwrap();
    let rendered = composite(&store, element, None, Breakpoint::Desktop, &StyleState::None);

    assert_eq!(rendered.to_string(), "color: black");
    assert_eq!(
        store.dangling_class_refs(),
        vec![("orphan".to_string(), "cls-404".to_string())]
    );
}

#[test]
fn instance_patch_sits_on_top_of_master_and_own_cascade() {
    let store = StyleStore::new();
    let master = style_map! { "color" => "black", "radius" => "8px", "padding" => "16px" };

    let mut instance = Element::new("card-2")
        .instance_of("card")
        .with_layer(LayerKey::Mobile, style_map! { "padding" => "8px", "color" => "gray" });
    if let Some(link) = instance.instance.as_mut() {
        link.overrides.insert("color", "crimson");
    }

    let rendered = composite(&store, &instance, Some(&master), Breakpoint::Mobile, &StyleState::None);

    insta::assert_snapshot!(rendered.to_string(), @"color: crimson; padding: 8px; radius: 8px");
}

#[test]
fn render_instance_is_master_plus_patch() {
    let master = style_map! { "color" => "black", "gap" => 8 };
    let instance = Element::new("copy").instance_of("master");
    let link = instance.instance.as_ref().unwrap();

    assert_eq!(render_instance(&master, link), master);
}
