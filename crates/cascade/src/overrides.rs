//! Override detection for the property panel's "overridden" badge.
//!
//! A property is overridden when the layer that is current for the editing
//! context (see [`LayerKey::active`]) defines it. On desktop with no state
//! the current layer *is* the base, so nothing can be overridden there.

use crate::{
    model::Styled,
    types::{Breakpoint, LayerKey, StyleState},
};

/// One property or a group of properties checked together.
///
/// Composite controls (e.g. a "Dimensions" group covering width, height and
/// their min/max) badge when any member is overridden.
#[derive(Debug, Clone, Copy)]
pub enum PropertyQuery<'a> {
    One(&'a str),
    Any(&'a [&'a str]),
}

impl<'a> PropertyQuery<'a> {
    fn matches(&self, mut defined: impl FnMut(&str) -> bool) -> bool {
        match self {
            PropertyQuery::One(property) => defined(property),
            PropertyQuery::Any(properties) => properties.iter().any(|p| defined(p)),
        }
    }
}

impl<'a> From<&'a str> for PropertyQuery<'a> {
    fn from(property: &'a str) -> Self {
        PropertyQuery::One(property)
    }
}

impl<'a, 'b: 'a> From<&'a [&'b str]> for PropertyQuery<'a> {
    fn from(properties: &'a [&'b str]) -> Self {
        PropertyQuery::Any(properties)
    }
}

impl<'a, 'b: 'a, const N: usize> From<&'a [&'b str; N]> for PropertyQuery<'a> {
    fn from(properties: &'a [&'b str; N]) -> Self {
        PropertyQuery::Any(properties.as_slice())
    }
}

/// Reports which non-base layer supplies any of the queried properties.
///
/// Returns `None` on desktop with no state, and when the current layer does
/// not exist (an unknown variant) or does not define the properties.
pub fn overriding_layer<'a, S>(
    subject: &S,
    breakpoint: Breakpoint,
    state: &StyleState,
    properties: impl Into<PropertyQuery<'a>>,
) -> Option<LayerKey>
where
    S: Styled + ?Sized,
{
    let key = LayerKey::active(breakpoint, state);
    if key == LayerKey::Base {
        return None;
    }

    let layer = subject.layers().layer(&key)?;
    properties
        .into()
        .matches(|property| layer.contains(property))
        .then_some(key)
}

/// True if the current non-base layer defines any of the queried properties.
///
/// # Example
///
/// ```
/// use cascade::model::Element;
/// use cascade::overrides::is_overridden;
/// use cascade::style_map;
/// use cascade::types::{Breakpoint, LayerKey, StyleState};
///
/// let element = Element::new("link")
///     .with_layer(LayerKey::Hover, style_map! { "color" => "red" });
///
/// assert!(is_overridden(&element, Breakpoint::Desktop, &StyleState::Hover, "color"));
/// assert!(!is_overridden(&element, Breakpoint::Desktop, &StyleState::None, "color"));
/// ```
pub fn is_overridden<'a, S>(
    subject: &S,
    breakpoint: Breakpoint,
    state: &StyleState,
    properties: impl Into<PropertyQuery<'a>>,
) -> bool
where
    S: Styled + ?Sized,
{
    overriding_layer(subject, breakpoint, state, properties).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Element;
    use crate::style_map;

    #[test]
    fn group_query_badges_if_any_member_is_set() {
        let element = Element::new("box").with_layer(LayerKey::Tablet, style_map! { "maxWidth" => "80%" });

        let dimensions = ["width", "height", "minWidth", "maxWidth"];
        assert!(is_overridden(
            &element,
            Breakpoint::Tablet,
            &StyleState::None,
            &dimensions
        ));
        assert!(!is_overridden(
            &element,
            Breakpoint::Tablet,
            &StyleState::None,
            &["width", "height"]
        ));
    }

    #[test]
    fn reports_the_overriding_layer() {
        let element = Element::new("box").with_layer(LayerKey::Mobile, style_map! { "gap" => 4 });

        assert_eq!(
            overriding_layer(&element, Breakpoint::Mobile, &StyleState::None, "gap"),
            Some(LayerKey::Mobile)
        );
    }
}
