//! Editor Session Integration Tests
//!
//! End-to-end flows through [`studio::Studio`]: panel reads, edits, badges
//! and lifecycle operations.

use cascade::model::Element;
use cascade::store::StyleStore;
use cascade::style_map;
use cascade::types::{Breakpoint, LayerKey, StyleState};
use cascade::{CascadeError, StyleValue};
use studio::container_query::card_queries;
use studio::{Studio, StudioConfig, StudioError, WriteTarget};

fn landing_page() -> StyleStore {
    let mut store = StyleStore::new();
    store.insert_element(Element::new("root"));
    store.insert_element(
        Element::new("hero")
            .with_parent("root")
            .with_styles(style_map! {
                "fontSize" => "3rem",
                "paddingLeft" => "64px",
                "color" => "black",
            })
            .with_layer(LayerKey::Mobile, style_map! { "color" => "gray" }),
    );
    store.insert_element(
        Element::new("cta")
            .with_parent("hero")
            .with_styles(style_map! { "display" => "flex" }),
    );
    store.insert_element(
        Element::new("pricing-card")
            .with_parent("root")
            .instance_of("card")
            .with_styles(style_map! { "color" => "black" }),
    );
    store
}

fn studio() -> Studio {
    Studio::new(landing_page(), StudioConfig::default())
}

// =============================================================================
// Reads and badges
// =============================================================================

#[test]
fn panel_shows_the_resolved_cascade() {
    let mut studio = studio();
    studio.select(["hero"]);
    studio.set_breakpoint(Breakpoint::Mobile);

    insta::assert_snapshot!(
        studio.current_styles().to_string(),
        @"color: gray; fontSize: 3rem; paddingLeft: 64px"
    );
    assert_eq!(studio.overriding_layer("color"), Some(LayerKey::Mobile));
    assert!(!studio.is_overridden(&["fontSize", "paddingLeft"]));
}

#[test]
fn nothing_selected_reads_empty() {
    let studio = studio();
    assert!(studio.current_styles().is_empty());
    assert!(!studio.is_overridden("color"));
}

#[test]
fn config_sets_the_opening_context() {
    let config = StudioConfig::default()
        .with_breakpoint(Breakpoint::Tablet)
        .with_state(StyleState::Focus);
    let studio = Studio::new(landing_page(), config);

    assert_eq!(studio.context().active_layer(), LayerKey::Focus);
    assert_eq!(studio.context().breakpoint, Breakpoint::Tablet);
}

// =============================================================================
// Edits
// =============================================================================

#[test]
fn hover_edit_badges_and_leaves_base_alone() {
    let mut studio = studio();
    studio.select(["hero"]);
    studio.set_state(StyleState::Hover);

    let target = studio.set_property("color", "crimson");

    assert_eq!(
        target,
        WriteTarget::Elements {
            element_ids: vec!["hero".to_string()],
            layer: LayerKey::Hover,
        }
    );
    assert!(studio.is_overridden("color"));

    studio.set_state(StyleState::None);
    assert_eq!(studio.current_styles().get("color"), Some(&StyleValue::from("black")));
}

#[test]
fn class_edit_reaches_every_element_using_it() {
    let mut studio = studio();
    studio.select(["hero"]);
    let class_id = studio.create_class_from_selection("Display").unwrap();
    studio.store_mut().add_class("cta", &class_id).unwrap();

    studio.edit_class(Some(class_id.clone()));
    studio.set_property("letterSpacing", "0.02em");
    studio.edit_class(None);

    let cta = studio.composite("cta", None).unwrap();
    insta::assert_snapshot!(
        cta.to_string(),
        @"color: black; display: flex; fontSize: 3rem; letterSpacing: 0.02em; paddingLeft: 64px"
    );
}

#[test]
fn instance_override_round_trip() {
    let mut studio = studio();
    studio.select(["pricing-card"]);
    let master = style_map! { "color" => "navy", "padding" => "24px" };

    studio.set_property("padding", "8px");
    insta::assert_snapshot!(
        studio.composite("pricing-card", Some(&master)).unwrap().to_string(),
        @"color: black; padding: 8px"
    );

    assert!(studio.clear_override("padding").unwrap());
    assert!(!studio.clear_override("padding").unwrap());
    assert_eq!(
        studio.composite("pricing-card", Some(&master)).unwrap().to_string(),
        "color: black; padding: 24px"
    );
}

#[test]
fn clear_override_needs_a_single_instance() {
    let mut studio = studio();
    studio.select(["hero"]);

    assert!(matches!(
        studio.clear_override("color"),
        Err(StudioError::NoInstanceSelected)
    ));
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn deleting_the_edited_class_leaves_class_mode() {
    let mut studio = studio();
    studio.select(["hero"]);
    let class_id = studio.create_class_from_selection("Heading").unwrap();
    studio.store_mut().apply_class("hero", Some(&class_id)).unwrap();
    studio.edit_class(Some(class_id.clone()));

    assert_eq!(studio.delete_class(&class_id).unwrap(), 1);

    assert_eq!(studio.context().editing_class, None);
    assert!(studio.store().dangling_class_refs().is_empty());
    assert!(matches!(
        studio.set_property("color", "red"),
        WriteTarget::Elements { .. }
    ));
}

#[test]
fn creating_a_class_without_selection_fails() {
    let mut studio = studio();
    assert!(matches!(
        studio.create_class_from_selection("Empty"),
        Err(StudioError::NothingSelected)
    ));
}

#[test]
fn duplicate_class_names_surface_the_store_error() {
    let mut studio = studio();
    studio.select(["hero"]);
    studio.create_class_from_selection("Heading").unwrap();

    let err = studio.create_class_from_selection("Heading").unwrap_err();
    assert!(matches!(
        err,
        StudioError::Cascade(CascadeError::DuplicateClassName(_))
    ));
}

#[test]
fn removing_an_element_releases_selection_and_queries() {
    let mut studio = studio();
    studio.container_queries_mut().set_queries("cta", card_queries());
    studio.select(["cta", "hero"]);

    let mut removed = studio.remove_element("hero").unwrap();
    removed.sort();

    assert_eq!(removed, vec!["cta".to_string(), "hero".to_string()]);
    assert!(studio.context().selection().is_empty());
    assert_eq!(studio.container_queries().tracked(), 0);
    assert_eq!(
        studio.store().element("root").unwrap().children,
        vec!["pricing-card".to_string()]
    );
}

#[test]
fn variants_follow_the_current_subject() {
    let mut studio = studio();
    studio.select(["hero"]);
    studio.add_variant("pressed").unwrap();
    studio.set_state(StyleState::Custom("pressed".to_string()));
    studio.set_property("opacity", 0.8);

    assert!(studio.is_overridden("opacity"));

    studio.remove_variant("pressed").unwrap();
    assert_eq!(studio.context().state, StyleState::None);
    assert!(
        studio
            .store()
            .element("hero")
            .unwrap()
            .layers
            .variants
            .is_empty()
    );
}

#[test]
fn custom_state_with_a_built_in_name_edits_the_built_in_layer() {
    let mut studio = studio();
    studio.select(["hero"]);
    studio.set_state(StyleState::Custom("hover".to_string()));

    let target = studio.set_property("color", "crimson");

    assert_eq!(studio.context().state, StyleState::Hover);
    assert_eq!(
        target,
        WriteTarget::Elements {
            element_ids: vec!["hero".to_string()],
            layer: LayerKey::Hover,
        }
    );
    let hero = studio.store().element("hero").unwrap();
    assert!(hero.layers.variants.is_empty());
    assert_eq!(hero.layers.hover_styles.to_string(), "color: crimson");
}

#[test]
fn missing_edited_class_reads_and_writes_the_selection() {
    let mut studio = studio();
    studio.select(["cta"]);
    studio.edit_class(Some("cls-404".to_string()));

    studio.set_property("color", "red");

    insta::assert_snapshot!(studio.current_styles().to_string(), @"color: red; display: flex");
}

#[test]
fn reserved_variant_names_are_rejected() {
    let mut studio = studio();
    studio.select(["hero"]);

    for name in ["hover", "none", "default"] {
        assert!(matches!(
            studio.add_variant(name),
            Err(StudioError::Cascade(CascadeError::ReservedVariantName(_)))
        ));
    }
}

#[test]
fn responsive_defaults_fill_gaps_only() {
    let mut studio = studio();

    let patched = studio.generate_responsive_defaults();
    assert_eq!(patched, 2);

    let hero = studio.store().element("hero").unwrap();
    insta::assert_snapshot!(
        hero.layers.mobile_styles.to_string(),
        @"color: gray; fontSize: 2.1rem; paddingLeft: 20px"
    );
    insta::assert_snapshot!(
        hero.layers.tablet_styles.to_string(),
        @"fontSize: 2.55rem; paddingLeft: 32px"
    );

    let cta = studio.store().element("cta").unwrap();
    assert_eq!(cta.layers.mobile_styles.to_string(), "flexDirection: column");

    // A second pass changes nothing.
    let before = studio.store().to_json().unwrap();
    studio.generate_responsive_defaults();
    assert_eq!(studio.store().to_json().unwrap(), before);
}

#[test]
fn store_survives_a_json_round_trip_mid_session() {
    let mut studio = studio();
    studio.select(["hero"]);
    studio.set_breakpoint(Breakpoint::Tablet);
    studio.set_property("fontSize", "2.5rem");

    let json = studio.store().to_json().unwrap();
    let restored = StyleStore::from_json(&json).unwrap();
    let mut reopened = Studio::new(restored, StudioConfig::default());
    reopened.select(["hero"]);
    reopened.set_breakpoint(Breakpoint::Tablet);

    assert_eq!(reopened.current_styles(), studio.current_styles());
    assert!(reopened.is_overridden("fontSize"));
}
