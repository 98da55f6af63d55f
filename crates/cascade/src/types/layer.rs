//! Cascade axes: breakpoints, interaction states and the layer they select.
//!
//! Exactly one [`Breakpoint`] and one [`StyleState`] are active at a time.
//! Together they pick a single storage slot, the [`LayerKey`], which is where
//! edits are written and what the override badge inspects.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mutually exclusive viewport tiers.
///
/// Breakpoints are not cumulative: mobile does not inherit tablet values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// Base styles only.
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Desktop => "desktop",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Mobile => "mobile",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names that can never be used for custom variants.
pub const RESERVED_STATE_NAMES: &[&str] = &["none", "default", "hover", "active", "focus"];

/// The active interaction state or custom variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum StyleState {
    /// No state layer is merged.
    #[default]
    None,
    Hover,
    Active,
    Focus,
    /// A user-defined variant stored in `variants[name]`.
    Custom(String),
}

impl StyleState {
    /// Parses a state name as the editor toolbar reports it.
    ///
    /// `"none"`, `"default"` and the empty string all mean no state.
    pub fn from_name(name: &str) -> Self {
        match name {
            "" | "none" | "default" => StyleState::None,
            "hover" => StyleState::Hover,
            "active" => StyleState::Active,
            "focus" => StyleState::Focus,
            other => StyleState::Custom(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            StyleState::None => "none",
            StyleState::Hover => "hover",
            StyleState::Active => "active",
            StyleState::Focus => "focus",
            StyleState::Custom(name) => name,
        }
    }

    /// Folds a `Custom` state that spells a built-in name into that state,
    /// so `Custom("hover")` never addresses `variants["hover"]`.
    pub fn normalized(self) -> Self {
        match self {
            StyleState::Custom(name) if is_reserved_state_name(&name) => {
                StyleState::from_name(&name)
            }
            other => other,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, StyleState::None)
    }

    /// True for the three fixed-name states that predate custom variants.
    pub fn is_legacy(&self) -> bool {
        matches!(self, StyleState::Hover | StyleState::Active | StyleState::Focus)
    }
}

impl fmt::Display for StyleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns true if `name` collides with a built-in state name.
pub fn is_reserved_state_name(name: &str) -> bool {
    RESERVED_STATE_NAMES.contains(&name)
}

/// One storage slot of a subject's style layers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LayerKey {
    Base,
    Tablet,
    Mobile,
    Hover,
    Active,
    Focus,
    Variant(String),
}

impl LayerKey {
    /// The layer a breakpoint merges over the base (`None` on desktop).
    pub fn for_breakpoint(breakpoint: Breakpoint) -> Option<LayerKey> {
        match breakpoint {
            Breakpoint::Desktop => None,
            Breakpoint::Tablet => Some(LayerKey::Tablet),
            Breakpoint::Mobile => Some(LayerKey::Mobile),
        }
    }

    /// The layer a state merges over the breakpoint result (`None` for no state).
    pub fn for_state(state: &StyleState) -> Option<LayerKey> {
        match state {
            StyleState::None => None,
            StyleState::Hover => Some(LayerKey::Hover),
            StyleState::Active => Some(LayerKey::Active),
            StyleState::Focus => Some(LayerKey::Focus),
            StyleState::Custom(name) if is_reserved_state_name(name) => {
                LayerKey::for_state(&StyleState::from_name(name))
            }
            StyleState::Custom(name) => Some(LayerKey::Variant(name.clone())),
        }
    }

    /// The single layer that is "current" for a context.
    ///
    /// The state layer wins over the breakpoint layer, and desktop with no
    /// state is the base layer. Writes land here and the override badge
    /// inspects it.
    pub fn active(breakpoint: Breakpoint, state: &StyleState) -> LayerKey {
        LayerKey::for_state(state)
            .or_else(|| LayerKey::for_breakpoint(breakpoint))
            .unwrap_or(LayerKey::Base)
    }

    /// The serialized field name of this layer.
    pub fn field_name(&self) -> String {
        match self {
            LayerKey::Base => "styles".to_string(),
            LayerKey::Tablet => "tabletStyles".to_string(),
            LayerKey::Mobile => "mobileStyles".to_string(),
            LayerKey::Hover => "hoverStyles".to_string(),
            LayerKey::Active => "activeStyles".to_string(),
            LayerKey::Focus => "focusStyles".to_string(),
            LayerKey::Variant(name) => format!("variants.{name}"),
        }
    }
}

impl fmt::Display for LayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.field_name())
    }
}
