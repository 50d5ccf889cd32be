//! Built-in validators.
//!
//! Every rule here passes when the value is absent. Combine them with the
//! `required` flag when a value must be present.

use regex::Regex;

use super::engine::Validator;
use crate::error::{FormError, Result};

/// Build a validator from a predicate and a fixed failure message.
pub fn custom<T, F>(predicate: F, msg: impl Into<String>) -> Validator<T>
where
    T: ?Sized + 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    let msg = msg.into();
    Validator::new(move |value: Option<&T>| match value {
        Some(v) if !predicate(v) => Some(msg.clone()),
        _ => None,
    })
}

/// Require at least `min` characters.
pub fn min_length(min: usize, msg: impl Into<String>) -> Validator<String> {
    let msg = msg.into();
    Validator::named("min_length", move |value: Option<&String>| match value {
        Some(v) if v.chars().count() < min => Some(msg.clone()),
        _ => None,
    })
}

/// Require at most `max` characters.
pub fn max_length(max: usize, msg: impl Into<String>) -> Validator<String> {
    let msg = msg.into();
    Validator::named("max_length", move |value: Option<&String>| match value {
        Some(v) if v.chars().count() > max => Some(msg.clone()),
        _ => None,
    })
}

/// Require the value to match a regular expression.
pub fn pattern(pattern: &str, msg: impl Into<String>) -> Result<Validator<String>> {
    let re = Regex::new(pattern).map_err(|source| FormError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    let msg = msg.into();
    Ok(Validator::named("pattern", move |value: Option<&String>| {
        match value {
            Some(v) if !re.is_match(v) => Some(msg.clone()),
            _ => None,
        }
    }))
}

/// Require a valid email address. Empty strings pass.
pub fn email(msg: impl Into<String>) -> Validator<String> {
    let msg = msg.into();
    Validator::named("email", move |value: Option<&String>| match value {
        Some(v) if !v.is_empty() && !email_address::EmailAddress::is_valid(v) => {
            Some(msg.clone())
        }
        _ => None,
    })
}

/// Require the value to equal `expected`.
pub fn equals(expected: impl Into<String>, msg: impl Into<String>) -> Validator<String> {
    let expected = expected.into();
    let msg = msg.into();
    Validator::named("equals", move |value: Option<&String>| match value {
        Some(v) if *v != expected => Some(msg.clone()),
        _ => None,
    })
}

/// Require the value to contain a substring.
pub fn contains(substr: impl Into<String>, msg: impl Into<String>) -> Validator<String> {
    let substr = substr.into();
    let msg = msg.into();
    Validator::named("contains", move |value: Option<&String>| match value {
        Some(v) if !v.contains(substr.as_str()) => Some(msg.clone()),
        _ => None,
    })
}

/// Require a checkbox value to be `true`.
pub fn checked(msg: impl Into<String>) -> Validator<bool> {
    let msg = msg.into();
    Validator::named("checked", move |value: Option<&bool>| match value {
        Some(false) => Some(msg.clone()),
        _ => None,
    })
}

/// Require a checkbox value to be `false`.
pub fn unchecked(msg: impl Into<String>) -> Validator<bool> {
    let msg = msg.into();
    Validator::named("unchecked", move |value: Option<&bool>| match value {
        Some(true) => Some(msg.clone()),
        _ => None,
    })
}

/// Require `min <= value <= max`. Unordered values such as NaN fail.
pub fn range<T>(min: T, max: T, msg: impl Into<String>) -> Validator<T>
where
    T: PartialOrd + Send + Sync + 'static,
{
    let msg = msg.into();
    Validator::named("range", move |value: Option<&T>| match value {
        Some(v) if !(min <= *v && *v <= max) => Some(msg.clone()),
        _ => None,
    })
}
