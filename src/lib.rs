//! # pagestyle
//!
//! Style cascade and dynamic restyling for a visual page builder.
//!
//! This crate bundles the two workspace members:
//!
//! - [`cascade`]: the style store, cascade resolution, override detection
//!   and responsive auto-tune
//! - [`studio`]: the editor session, write routing, instance patches and
//!   container queries
//!
//! Most hosts only need the [`prelude`].
//!
//! ```
//! use pagestyle::prelude::*;
//!
//! let mut store = StyleStore::new();
//! store.insert_element(Element::new("nav").with_styles(style_map! { "display" => "flex" }));
//!
//! let mut studio = Studio::new(store, StudioConfig::default());
//! assert_eq!(studio.generate_responsive_defaults(), 1);
//!
//! studio.select(["nav"]);
//! studio.set_breakpoint(Breakpoint::Mobile);
//! assert_eq!(
//!     studio.current_styles().to_string(),
//!     "display: flex; flexDirection: column"
//! );
//! ```

pub use cascade;
pub use studio;

pub mod prelude {
    pub use cascade::autotune::{TuneConfig, TuneRules};
    pub use cascade::style_map;
    pub use cascade::{
        Breakpoint, CascadeError, DesignClass, Element, Instance, LayerKey, StyleMap,
        StyleState, StyleStore, StyleValue, Styled, SubjectId,
    };
    pub use studio::{
        ContainerQuery, ContainerQueryEngine, EditContext, SizeObserver, Studio, StudioConfig,
        StudioError, WriteTarget,
    };
}
