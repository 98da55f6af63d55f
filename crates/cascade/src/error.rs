//! Error types for style store mutations and value parsing.
//!
//! Read paths (resolution, override detection) never fail: missing layers
//! and dangling class references are treated as empty. Errors only come out
//! of store mutations that name something which does not exist, or that
//! would break a store invariant.

use thiserror::Error;

/// Errors that can occur while mutating or loading a style store.
///
/// # Examples
///
/// ```rust
/// use cascade::store::StyleStore;
/// use cascade::CascadeError;
///
/// let mut store = StyleStore::new();
/// let result = store.add_class("missing-element", "missing-class");
/// assert!(matches!(result, Err(CascadeError::UnknownElement(_))));
/// ```
#[derive(Error, Debug)]
pub enum CascadeError {
    /// No element with this id exists in the store.
    #[error("Unknown element: {0}")]
    UnknownElement(String),

    /// No design class with this id exists in the store.
    #[error("Unknown class: {0}")]
    UnknownClass(String),

    /// Class names are unique display keys.
    #[error("A class named '{0}' already exists")]
    DuplicateClassName(String),

    /// Custom variants cannot reuse the built-in state names.
    #[error("'{0}' is a reserved state name and cannot be used for a variant")]
    ReservedVariantName(String),

    /// Override patches only exist on roots of shared-component instances.
    #[error("Element {0} is not a component instance")]
    NotAnInstance(String),

    /// A style value could not be read as a CSS length.
    #[error("Invalid length: {0}")]
    InvalidLength(String),

    /// The store could not be (de)serialized.
    #[error("Invalid style store data")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CascadeError>;
