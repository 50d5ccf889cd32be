pub mod error;
pub mod form;
pub mod observable;
pub mod validation;

pub use error::{FormError, Result};

pub mod prelude {
    pub use crate::error::{FormError, Result};
    pub use crate::form::{
        ErrorCountPolicy, ErrorStatePolicy, Field, FieldBinding, FieldOptions, FormConfig,
        FormCoordinator,
    };
    pub use crate::observable::{Observable, SubscriptionId};
    pub use crate::validation::{FieldValue, REQUIRED_MESSAGE, Validator, rules, validate};
}
