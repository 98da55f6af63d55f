//! Responsive auto-tune: derive tablet and mobile defaults from desktop styles.
//!
//! This is a one-shot batch utility behind a "generate responsive defaults"
//! action, not something that runs on every edit. Each element is looked at
//! on its own, using only its base `styles`:
//!
//! | Rule | Trigger | Mobile | Tablet |
//! |---|---|---|---|
//! | Heading font | `fontSize` > 2rem / 32px | ×0.7 | ×0.85 |
//! | Subheading font | `fontSize` > 1.2rem / 20px | ×0.85 | - |
//! | Padding cap | `padding{Top,Right,Bottom,Left}` > 40px | 20px | 32px |
//! | Flex stacking | `display: flex`, row direction | `flexDirection: column` | - |
//!
//! Derived values never replace values the element already has in its
//! breakpoint layers.

use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::{
    model::Element,
    types::{ElementId, Length, LengthUnit, StyleMap, StyleValue},
};

bitflags! {
    /// Which heuristics a tuning pass runs.
    ///
    /// ```
    /// use cascade::autotune::TuneRules;
    ///
    /// let rules = TuneRules::all() - TuneRules::FLEX_STACK;
    /// assert!(rules.contains(TuneRules::FONT_SCALE));
    /// assert!(!rules.contains(TuneRules::FLEX_STACK));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TuneRules: u8 {
        /// Scale down large font sizes
        const FONT_SCALE  = 0b0000_0001;
        /// Cap large directional paddings
        const PADDING_CAP = 0b0000_0010;
        /// Stack row flex containers vertically on mobile
        const FLEX_STACK  = 0b0000_0100;
    }
}

impl Default for TuneRules {
    fn default() -> Self {
        TuneRules::all()
    }
}

/// The four directional padding properties the padding cap inspects.
pub const PADDING_PROPERTIES: [&str; 4] =
    ["paddingTop", "paddingRight", "paddingBottom", "paddingLeft"];

/// Thresholds and factors for a tuning pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TuneConfig {
    pub rules: TuneRules,
    /// Font sizes above this many rem are headings.
    pub heading_rem: f64,
    /// Font sizes above this many pixels are headings.
    pub heading_px: f64,
    pub subheading_rem: f64,
    pub subheading_px: f64,
    pub heading_mobile_scale: f64,
    pub heading_tablet_scale: f64,
    pub subheading_mobile_scale: f64,
    /// Paddings above this many pixels get capped.
    pub padding_threshold_px: f64,
    pub padding_mobile_px: f64,
    pub padding_tablet_px: f64,
}

impl Default for TuneConfig {
    fn default() -> Self {
        Self {
            rules: TuneRules::default(),
            heading_rem: 2.0,
            heading_px: 32.0,
            subheading_rem: 1.2,
            subheading_px: 20.0,
            heading_mobile_scale: 0.7,
            heading_tablet_scale: 0.85,
            subheading_mobile_scale: 0.85,
            padding_threshold_px: 40.0,
            padding_mobile_px: 20.0,
            padding_tablet_px: 32.0,
        }
    }
}

impl TuneConfig {
    pub fn with_rules(mut self, rules: TuneRules) -> Self {
        self.rules = rules;
        self
    }

    /// Sets the pixel threshold above which paddings are capped.
    pub fn with_padding_threshold(mut self, px: f64) -> Self {
        self.padding_threshold_px = px;
        self
    }

    /// Sets the rem/px thresholds for the heading tier.
    pub fn with_heading_threshold(mut self, rem: f64, px: f64) -> Self {
        self.heading_rem = rem;
        self.heading_px = px;
        self
    }

    fn exceeds(&self, size: Length, rem: f64, px: f64) -> bool {
        match size.unit {
            LengthUnit::Rem => size.value > rem,
            unit if unit.is_pixels() => size.value > px,
            _ => false,
        }
    }
}

/// Breakpoint layers proposed for one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreakpointPatch {
    pub tablet_styles: StyleMap,
    pub mobile_styles: StyleMap,
}

/// Derives tablet/mobile defaults for every element that triggers a rule.
///
/// The returned maps hold the derived values with the element's existing
/// breakpoint values merged on top, so existing keys win.
///
/// # Example
///
/// ```
/// use cascade::autotune::{TuneConfig, derive_breakpoint_defaults};
/// use cascade::model::Element;
/// use cascade::style_map;
///
/// let hero = Element::new("hero").with_styles(style_map! { "fontSize" => "3rem" });
/// let patches = derive_breakpoint_defaults([&hero], &TuneConfig::default());
///
/// assert_eq!(patches["hero"].mobile_styles.to_string(), "fontSize: 2.1rem");
/// assert_eq!(patches["hero"].tablet_styles.to_string(), "fontSize: 2.55rem");
/// ```
pub fn derive_breakpoint_defaults<'a>(
    elements: impl IntoIterator<Item = &'a Element>,
    config: &TuneConfig,
) -> BTreeMap<ElementId, BreakpointPatch> {
    let mut patches = BTreeMap::new();

    for element in elements {
        let Some(derived) = derive_for(&element.layers.styles, config) else {
            continue;
        };

        let mut tablet = derived.tablet_styles;
        tablet.merge(&element.layers.tablet_styles);
        let mut mobile = derived.mobile_styles;
        mobile.merge(&element.layers.mobile_styles);

        log::debug!(
            "Auto-tune '{}': tablet [{}] mobile [{}]",
            element.id,
            tablet,
            mobile
        );

        patches.insert(
            element.id.clone(),
            BreakpointPatch {
                tablet_styles: tablet,
                mobile_styles: mobile,
            },
        );
    }

    patches
}

/// Runs the heuristics over one base style map. `None` if nothing triggered.
fn derive_for(base: &StyleMap, config: &TuneConfig) -> Option<BreakpointPatch> {
    let mut patch = BreakpointPatch::default();
    let mut triggered = false;

    if config.rules.contains(TuneRules::FONT_SCALE)
        && let Some(size) = base.get("fontSize").and_then(read_length)
    {
        if config.exceeds(size, config.heading_rem, config.heading_px) {
            patch
                .mobile_styles
                .insert("fontSize", size.scaled(config.heading_mobile_scale));
            patch
                .tablet_styles
                .insert("fontSize", size.scaled(config.heading_tablet_scale));
            triggered = true;
        } else if config.exceeds(size, config.subheading_rem, config.subheading_px) {
            patch
                .mobile_styles
                .insert("fontSize", size.scaled(config.subheading_mobile_scale));
            triggered = true;
        }
    }

    if config.rules.contains(TuneRules::PADDING_CAP) {
        for property in PADDING_PROPERTIES {
            let Some(padding) = base.get(property).and_then(read_length) else {
                continue;
            };
            if padding.unit.is_pixels() && padding.value > config.padding_threshold_px {
                patch
                    .mobile_styles
                    .insert(property, Length::px(config.padding_mobile_px));
                patch
                    .tablet_styles
                    .insert(property, Length::px(config.padding_tablet_px));
                triggered = true;
            }
        }
    }

    if config.rules.contains(TuneRules::FLEX_STACK) && is_row_flex(base) {
        patch.mobile_styles.insert("flexDirection", "column");
        triggered = true;
    }

    triggered.then_some(patch)
}

/// Lengths that cannot be parsed (keywords, `calc()`) are ignored. Bare
/// numbers are read as pixels so derived values carry a unit.
fn read_length(value: &StyleValue) -> Option<Length> {
    Length::from_value(value).ok().map(Length::with_implied_unit)
}

fn is_row_flex(base: &StyleMap) -> bool {
    let display = base.get("display").and_then(StyleValue::as_str);
    let direction = base.get("flexDirection").and_then(StyleValue::as_str);
    display == Some("flex") && matches!(direction, None | Some("row"))
}
