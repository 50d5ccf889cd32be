//! Error types for form configuration.
//!
//! Validation failures are not errors: they are reported as ordered lists of
//! messages. `FormError` only covers programmer mistakes in how forms and
//! rules are put together.

use thiserror::Error;

/// Errors raised while wiring fields and rules together.
#[derive(Debug, Error)]
pub enum FormError {
    /// A field binding was constructed without an enclosing coordinator.
    #[error("form validation used outside a form context")]
    OutsideForm,

    /// A `pattern` rule was given a regular expression that does not compile.
    #[error("invalid validation pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as supplied by the caller.
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FormError>;
