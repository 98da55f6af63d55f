use std::fmt;

use super::StyleValue;
use crate::error::CascadeError;
use crate::units::parse_length_exact;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    /// A bare number with no suffix. Page-builder styles treat these as pixels.
    #[default]
    Number,
    Px,
    Rem,
    Em,
    Percent,
    /// Percentage of viewport width.
    ViewWidth,
    /// Percentage of viewport height.
    ViewHeight,
}

impl LengthUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Number => "",
            LengthUnit::Px => "px",
            LengthUnit::Rem => "rem",
            LengthUnit::Em => "em",
            LengthUnit::Percent => "%",
            LengthUnit::ViewWidth => "vw",
            LengthUnit::ViewHeight => "vh",
        }
    }

    /// True for units measured in device pixels (including bare numbers).
    pub fn is_pixels(self) -> bool {
        matches!(self, LengthUnit::Px | LengthUnit::Number)
    }
}

/// A CSS length such as `3rem` or `60px`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub fn px(value: f64) -> Self {
        Self::new(value, LengthUnit::Px)
    }

    pub fn rem(value: f64) -> Self {
        Self::new(value, LengthUnit::Rem)
    }

    /// Parses a complete length string. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, CascadeError> {
        parse_length_exact(input).ok_or_else(|| CascadeError::InvalidLength(input.to_string()))
    }

    /// Reads a length out of a style value; bare numbers become [`LengthUnit::Number`].
    pub fn from_value(value: &StyleValue) -> Result<Self, CascadeError> {
        match value {
            StyleValue::Number(n) => Ok(Self::new(*n, LengthUnit::Number)),
            StyleValue::Text(s) => Self::parse(s),
        }
    }

    /// Multiplies the magnitude, keeping the unit.
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.value * factor, self.unit)
    }

    /// Spells out the unit a bare number implies (`48` becomes `48px`).
    pub fn with_implied_unit(self) -> Self {
        match self.unit {
            LengthUnit::Number => Self::new(self.value, LengthUnit::Px),
            _ => self,
        }
    }
}

impl fmt::Display for Length {
    /// At most two decimals with trailing zeros trimmed: `2.1rem`, `33.6px`, `20px`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = format!("{:.2}", self.value);
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        write!(f, "{}{}", trimmed, self.unit.suffix())
    }
}

impl From<Length> for StyleValue {
    fn from(length: Length) -> Self {
        StyleValue::Text(length.to_string())
    }
}
