pub mod layer;
pub mod length;
pub mod value;

pub use layer::{Breakpoint, LayerKey, RESERVED_STATE_NAMES, StyleState, is_reserved_state_name};
pub use length::{Length, LengthUnit};
pub use value::{StyleMap, StyleValue};

/// Identifier of an element in the style store.
pub type ElementId = String;

/// Identifier of a design class.
pub type ClassId = String;

/// Identifier of a shared component master.
pub type ComponentId = String;
