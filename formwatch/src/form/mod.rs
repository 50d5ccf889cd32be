//! Form-wide validation coordination.
//!
//! A [`FormCoordinator`] tracks the fields of one form. Each field joins
//! through a [`FieldBinding`] (or the typed [`Field`] wrapper), which runs the
//! field's rules and reports whether it is in error. The coordinator keeps
//! the aggregate error count and can re-validate every field at once, for
//! example when the form is submitted.
//!
//! # Example
//!
//! ```
//! use formwatch::form::{Field, FieldOptions, FormCoordinator};
//! use formwatch::validation::rules;
//!
//! let form = FormCoordinator::new();
//! let email: Field<String> = Field::new(
//!     Some(&form),
//!     "email",
//!     FieldOptions::new().required().validator(rules::email("Invalid email")),
//! )?;
//! email.attach();
//!
//! let submit_enabled = form.total_errors();
//! submit_enabled.subscribe(|errors| println!("submit enabled: {}", *errors == 0));
//!
//! form.validate_form();
//! assert!(form.has_errors());
//! # Ok::<(), formwatch::FormError>(())
//! ```

mod binding;
mod config;
mod coordinator;
mod field;

pub use binding::FieldBinding;
pub use config::{ErrorCountPolicy, ErrorStatePolicy, FormConfig};
pub use coordinator::{FormCoordinator, ValidateCallback};
pub use field::{Field, FieldOptions};
