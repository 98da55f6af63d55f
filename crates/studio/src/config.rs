//! Editor configuration.
//!
//! Configuration is plain data with defaults; hosts adjust it through the
//! `with_*` builders before constructing a [`Studio`](crate::Studio).

use cascade::{
    autotune::TuneConfig,
    types::{Breakpoint, StyleState},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudioConfig {
    /// Breakpoint the editor opens in.
    pub breakpoint: Breakpoint,
    /// State the editor opens in.
    pub state: StyleState,
    /// Used by "generate responsive defaults".
    pub tune: TuneConfig,
}

impl StudioConfig {
    pub fn with_breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    pub fn with_state(mut self, state: StyleState) -> Self {
        self.state = state;
        self
    }

    pub fn with_tune(mut self, tune: TuneConfig) -> Self {
        self.tune = tune;
        self
    }
}
