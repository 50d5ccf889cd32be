//! Typed form fields.

use super::binding::FieldBinding;
use super::coordinator::FormCoordinator;
use crate::error::Result;
use crate::observable::Observable;
use crate::validation::{FieldValue, Validator, validate};

/// Configuration for a [`Field`].
pub struct FieldOptions<T> {
    /// Initial value. `None` leaves the field empty.
    pub default_value: Option<T>,

    /// Whether a missing value is an error.
    pub required: bool,

    /// Rules run in order after the required check.
    pub validators: Vec<Validator<T>>,
}

impl<T> Default for FieldOptions<T> {
    fn default() -> Self {
        Self {
            default_value: None,
            required: false,
            validators: Vec::new(),
        }
    }
}

impl<T> FieldOptions<T> {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the field with an initial value.
    pub fn default_value(mut self, value: T) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Append a rule.
    pub fn validator(mut self, validator: Validator<T>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Append several rules, keeping their order.
    pub fn validators(mut self, validators: impl IntoIterator<Item = Validator<T>>) -> Self {
        self.validators.extend(validators);
        self
    }
}

/// A form field holding a value of type `T` and validating it against its
/// [`FieldOptions`].
///
/// # Example
///
/// ```
/// use formwatch::form::{Field, FieldOptions, FormCoordinator};
/// use formwatch::validation::rules;
///
/// let form = FormCoordinator::new();
/// let username: Field<String> = Field::new(
///     Some(&form),
///     "username",
///     FieldOptions::new()
///         .required()
///         .validator(rules::min_length(3, "Too short")),
/// )?;
/// username.attach();
///
/// form.validate_form();
/// assert_eq!(form.error_count(), 1);
///
/// username.set_value("ferris".to_string());
/// username.validate();
/// assert_eq!(form.error_count(), 0);
/// # Ok::<(), formwatch::FormError>(())
/// ```
pub struct Field<T> {
    value: Observable<Option<T>>,
    binding: FieldBinding,
}

impl<T> Field<T>
where
    T: FieldValue + Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a field bound to `form`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::OutsideForm`](crate::FormError::OutsideForm) when
    /// `form` is `None`.
    pub fn new(
        form: Option<&FormCoordinator>,
        id: impl Into<String>,
        options: FieldOptions<T>,
    ) -> Result<Self> {
        let FieldOptions {
            default_value,
            required,
            validators,
        } = options;

        let value = Observable::new(default_value);
        let source = value.clone();
        let binding = FieldBinding::new(form, id, move || {
            source.with(|current| validate(current.as_ref(), required, &validators))
        })?;

        Ok(Self { value, binding })
    }

    /// Current value.
    pub fn value(&self) -> Option<T> {
        self.value.get()
    }

    /// Observable value, for callers that render or react to input.
    pub fn observable(&self) -> Observable<Option<T>> {
        self.value.clone()
    }

    /// Replace the value. Does not re-validate.
    pub fn set_value(&self, value: T) {
        self.value.set(Some(value));
    }

    /// Clear the value. Does not re-validate.
    pub fn clear(&self) {
        self.value.set(None);
    }

    /// Register with the coordinator.
    pub fn attach(&self) {
        self.binding.attach();
    }

    /// Deregister from the coordinator.
    pub fn detach(&self) {
        self.binding.detach();
    }

    /// Validate the current value and report to the coordinator.
    pub fn validate(&self) -> Vec<String> {
        self.binding.validate()
    }

    /// Error messages from the last validation run.
    pub fn error_messages(&self) -> Vec<String> {
        self.binding.error_messages().get()
    }

    /// Check if validation has run at least once.
    pub fn has_been_validated(&self) -> bool {
        self.binding.has_been_validated().get()
    }

    /// Error state of the last validation run, as reported to the form.
    pub fn is_in_error_state(&self) -> bool {
        self.binding.is_in_error_state()
    }

    /// The underlying binding.
    pub fn binding(&self) -> &FieldBinding {
        &self.binding
    }
}
