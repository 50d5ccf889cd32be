//! Field value validation.
//!
//! [`validate`] evaluates one value against a `required` flag and an ordered
//! list of [`Validator`]s, producing the field's error messages in rule
//! order. It has no side effects; the form coordinator decides what to do
//! with the result.
//!
//! # Example
//!
//! ```
//! use formwatch::validation::{rules, validate, REQUIRED_MESSAGE};
//!
//! let validators = vec![
//!     rules::min_length(3, "Username must be at least 3 characters"),
//!     rules::max_length(16, "Username must be at most 16 characters"),
//! ];
//!
//! assert_eq!(
//!     validate(Some(&String::new()), true, &validators),
//!     vec![REQUIRED_MESSAGE.to_string()],
//! );
//! assert!(validate(Some(&"ferris".to_string()), true, &validators).is_empty());
//! ```

mod engine;
pub mod rules;

pub use engine::{FieldValue, REQUIRED_MESSAGE, Validator, validate};
