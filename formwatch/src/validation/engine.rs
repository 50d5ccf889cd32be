//! Rule evaluation for a single field value.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Message reported when a required field has no value.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Type alias for validation rule closures.
type Rule<T> = Arc<dyn Fn(Option<&T>) -> Option<String> + Send + Sync>;

/// A single validation rule.
///
/// A validator inspects an optional value and returns a message when the value
/// breaks the rule, or `None` when it passes. Validators are cheap to clone
/// and can be shared between fields.
pub struct Validator<T: ?Sized> {
    name: Option<Cow<'static, str>>,
    rule: Rule<T>,
}

impl<T: ?Sized> Validator<T> {
    /// Create an unnamed validator from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<&T>) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: None,
            rule: Arc::new(f),
        }
    }

    /// Create a validator with a rule name (shown in debug output and logs).
    pub fn named<F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(Option<&T>) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            rule: Arc::new(f),
        }
    }

    /// Rule name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Run the rule against a value.
    pub fn check(&self, value: Option<&T>) -> Option<String> {
        (self.rule)(value)
    }
}

impl<T: ?Sized> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            rule: Arc::clone(&self.rule),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name.as_deref().unwrap_or("<anonymous>"))
            .finish()
    }
}

/// Values that can be checked for presence by the `required` rule.
///
/// Only empty strings count as missing; `0`, `false` and empty collections
/// are real values. An absent value (`None`) is always missing regardless of
/// this trait.
pub trait FieldValue {
    /// Whether this present value should be treated as "no value".
    fn is_missing(&self) -> bool {
        false
    }
}

impl FieldValue for str {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for String {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for Cow<'_, str> {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn is_missing(&self) -> bool {
        (**self).is_missing()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn is_missing(&self) -> bool {
        self.as_ref().is_none_or(FieldValue::is_missing)
    }
}

impl<T> FieldValue for Vec<T> {}

macro_rules! present_values {
    ($($ty:ty),* $(,)?) => {
        $(impl FieldValue for $ty {})*
    };
}

present_values!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

/// Validate a value against a required flag and an ordered rule list.
///
/// A required field with a missing value yields exactly
/// [`REQUIRED_MESSAGE`] and no rule runs. Otherwise each rule runs in order
/// and every message it returns is kept, in rule order. The result is empty
/// when everything passes.
///
/// ```
/// use formwatch::validation::{validate, Validator};
///
/// let too_short = Validator::new(|v: Option<&String>| match v {
///     Some(s) if s.len() > 5 => None,
///     _ => Some("too short".to_string()),
/// });
///
/// let errors = validate(Some(&"abc".to_string()), false, &[too_short]);
/// assert_eq!(errors, vec!["too short".to_string()]);
/// ```
pub fn validate<T>(value: Option<&T>, required: bool, validators: &[Validator<T>]) -> Vec<String>
where
    T: FieldValue + ?Sized,
{
    if required && value.is_none_or(FieldValue::is_missing) {
        return vec![REQUIRED_MESSAGE.to_string()];
    }

    validators
        .iter()
        .filter_map(|validator| validator.check(value))
        .collect()
}
