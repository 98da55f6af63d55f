//! # Cascade - layered style resolution for a visual page builder
//!
//! Style data in the page builder is split across overlapping axes: base
//! values, design-system classes, responsive breakpoints, interaction states
//! and custom variants, and shared-component instance overrides. This crate
//! holds that data and answers the read-side questions about it:
//!
//! - **Store**: elements, design classes and their lifecycle ([`store::StyleStore`])
//! - **Resolution**: the effective style of a subject for a breakpoint and state
//! - **Override detection**: whether the current layer overrides a property
//! - **Auto-tune**: one-shot derivation of tablet/mobile defaults
//!
//! ## Quick Start
//!
//! ```rust
//! use cascade::model::Element;
//! use cascade::resolve::resolve;
//! use cascade::style_map;
//! use cascade::types::{Breakpoint, LayerKey, StyleState};
//!
//! let element = Element::new("hero")
//!     .with_styles(style_map! { "fontSize" => "3rem", "color" => "black" })
//!     .with_layer(LayerKey::Mobile, style_map! { "fontSize" => "2rem" });
//!
//! let mobile = resolve(&element, Breakpoint::Mobile, &StyleState::None);
//! assert_eq!(mobile.to_string(), "color: black; fontSize: 2rem");
//! ```
//!
//! ## Precedence
//!
//! A subject's own cascade is `base → breakpoint layer → state layer`.
//! Exactly one breakpoint and one state are active; neither axis is
//! cumulative. Compositing for rendering adds classes underneath and the
//! instance override patch on top (see [`resolve::composite`]).
//!
//! ## Modules
//!
//! - [`types`]: style values, maps, breakpoints, states and lengths
//! - [`model`]: element and design class records
//! - [`store`]: the style store and its lifecycle operations
//! - [`resolve`]: cascade resolution and compositing
//! - [`overrides`]: override detection for property badges
//! - [`autotune`]: responsive default derivation
//! - [`units`]: length parsing
//! - [`error`]: error types for store mutations

pub mod autotune;
pub mod error;
mod macros;
pub mod model;
pub mod overrides;
pub mod resolve;
pub mod store;
pub mod types;
pub mod units;

pub use error::{CascadeError, Result};
pub use model::{DesignClass, Element, Instance, StyleLayers, Styled};
pub use overrides::{PropertyQuery, is_overridden, overriding_layer};
pub use resolve::{composite, render_instance, resolve};
pub use store::{StyleStore, SubjectId};
pub use types::{Breakpoint, LayerKey, StyleMap, StyleState, StyleValue};
