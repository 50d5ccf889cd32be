use std::sync::{Arc, Mutex};

use formwatch::FormError;
use formwatch::form::{
    ErrorStatePolicy, Field, FieldBinding, FieldOptions, FormConfig, FormCoordinator,
};
use formwatch::validation::{REQUIRED_MESSAGE, rules};

fn required_text(form: &FormCoordinator, id: &str) -> Field<String> {
    Field::new(Some(form), id, FieldOptions::new().required()).unwrap()
}

#[test]
fn test_binding_outside_form_fails() {
    let err = FieldBinding::new(None, "orphan", Vec::new).unwrap_err();

    assert!(matches!(err, FormError::OutsideForm));
    assert_eq!(err.to_string(), "form validation used outside a form context");
}

#[test]
fn test_field_outside_form_fails() {
    let result: Result<Field<String>, _> = Field::new(None, "orphan", FieldOptions::new());

    assert!(matches!(result, Err(FormError::OutsideForm)));
}

#[test]
fn test_attach_and_detach() {
    let form = FormCoordinator::new();
    let binding = FieldBinding::new(Some(&form), "name", Vec::new).unwrap();

    assert!(!binding.is_attached());
    assert!(!form.is_registered("name"));

    binding.attach();
    assert!(binding.is_attached());
    assert!(form.is_registered("name"));
    assert_eq!(form.is_in_error("name"), Some(false));

    binding.detach();
    assert!(!binding.is_attached());
    assert!(!form.is_registered("name"));

    // Second detach is a no-op.
    binding.detach();
    assert_eq!(form.field_count(), 0);
}

#[test]
fn test_binding_validate_stores_messages_and_reports() {
    let form = FormCoordinator::new();
    let messages = Arc::new(Mutex::new(vec!["bad".to_string()]));
    let binding = {
        let messages = Arc::clone(&messages);
        FieldBinding::new(Some(&form), "name", move || messages.lock().unwrap().clone()).unwrap()
    };
    binding.attach();

    assert!(!binding.has_been_validated().get());
    assert!(!binding.is_in_error_state());

    let errors = binding.validate();
    assert_eq!(errors, vec!["bad".to_string()]);
    assert_eq!(binding.error_messages().get(), vec!["bad".to_string()]);
    assert!(binding.has_been_validated().get());
    assert!(binding.is_in_error_state());
    assert_eq!(form.error_count(), 1);

    messages.lock().unwrap().clear();
    binding.validate();
    assert!(binding.error_messages().get().is_empty());
    assert!(binding.has_been_validated().get());
    assert!(!binding.is_in_error_state());
    assert_eq!(form.error_count(), 0);
}

#[test]
fn test_has_been_validated_never_resets() {
    let form = FormCoordinator::new();
    let field = required_text(&form, "name");
    field.attach();

    assert!(!field.has_been_validated());
    field.validate();
    assert!(field.has_been_validated());

    field.set_value("ok".to_string());
    field.validate();
    field.clear();
    field.validate();
    assert!(field.has_been_validated());
}

#[test]
fn test_validate_form_with_valid_and_invalid_fields() {
    let form = FormCoordinator::new();
    let a = Field::new(
        Some(&form),
        "a",
        FieldOptions::new().required().default_value("hello".to_string()),
    )
    .unwrap();
    let b = required_text(&form, "b");
    a.attach();
    b.attach();

    form.validate_form();

    assert_eq!(form.error_count(), 1);
    assert!(a.error_messages().is_empty());
    assert!(a.has_been_validated());
    assert_eq!(b.error_messages(), vec![REQUIRED_MESSAGE.to_string()]);
    assert_eq!(form.fields_in_error(), vec!["b".to_string()]);
}

#[test]
fn test_validate_form_is_stable_across_runs() {
    let form = FormCoordinator::new();
    let field = required_text(&form, "name");
    field.attach();

    form.validate_form();
    form.validate_form();
    form.validate_form();

    assert_eq!(form.error_count(), 1);
}

#[test]
fn test_fixing_a_field_clears_its_error() {
    let form = FormCoordinator::new();
    let email = Field::new(
        Some(&form),
        "email",
        FieldOptions::new()
            .required()
            .validator(rules::email("Please enter a valid email")),
    )
    .unwrap();
    email.attach();

    email.set_value("nope".to_string());
    form.validate_form();
    assert_eq!(email.error_messages(), vec!["Please enter a valid email".to_string()]);
    assert_eq!(form.error_count(), 1);

    email.set_value("ferris@example.com".to_string());
    email.validate();
    assert!(!email.is_in_error_state());
    assert_eq!(form.error_count(), 0);
}

#[test]
fn test_default_value_seeds_field() {
    let form = FormCoordinator::new();
    let terms = Field::new(
        Some(&form),
        "terms",
        FieldOptions::new()
            .default_value(false)
            .validator(rules::checked("You must accept the terms")),
    )
    .unwrap();

    assert_eq!(terms.value(), Some(false));
    assert_eq!(terms.validate(), vec!["You must accept the terms".to_string()]);
}

#[test]
fn test_detached_field_is_not_validated_by_form() {
    let form = FormCoordinator::new();
    let field = required_text(&form, "name");
    field.attach();
    field.detach();

    form.validate_form();

    assert!(!field.has_been_validated());
    assert_eq!(form.error_count(), 0);
}

#[test]
fn test_detach_in_error_retains_count() {
    let form = FormCoordinator::new();
    let field = required_text(&form, "name");
    field.attach();
    field.validate();
    assert_eq!(form.error_count(), 1);

    field.detach();

    assert_eq!(form.error_count(), 1);
    assert_eq!(form.field_count(), 0);
}

#[test]
fn test_detach_in_error_reconciles_when_configured() {
    let form = FormCoordinator::with_config(FormConfig::new("signup").reconcile_on_removal());
    let field = required_text(&form, "name");
    field.attach();
    field.validate();

    field.detach();

    assert_eq!(form.error_count(), 0);
}

#[test]
fn test_reattached_binding_replaces_previous_owner() {
    let form = FormCoordinator::new();
    let first = required_text(&form, "name");
    let second = Field::new(
        Some(&form),
        "name",
        FieldOptions::new().default_value("filled".to_string()),
    )
    .unwrap();
    first.attach();
    second.attach();

    form.validate_form();

    assert!(!first.has_been_validated());
    assert!(second.has_been_validated());
    assert_eq!(form.error_count(), 0);
}

#[test]
fn test_dropped_binding_callback_is_inert() {
    let form = FormCoordinator::new();
    {
        let field = required_text(&form, "name");
        field.attach();
    }

    form.validate_form();

    assert!(form.is_registered("name"));
    assert_eq!(form.error_count(), 0);
}

#[test]
fn test_error_messages_observable_notifies() {
    let form = FormCoordinator::new();
    let field = required_text(&form, "name");
    field.attach();
    let seen = Arc::new(Mutex::new(Vec::new()));
    {
        let seen = Arc::clone(&seen);
        field
            .binding()
            .error_messages()
            .subscribe(move |messages: &Vec<String>| seen.lock().unwrap().push(messages.len()));
    }

    field.validate();
    field.validate();
    field.set_value("ferris".to_string());
    field.validate();

    assert_eq!(*seen.lock().unwrap(), vec![1, 0]);
}

#[test]
fn test_has_messages_policy_counts_failing_fields() {
    let form = FormCoordinator::with_config(
        FormConfig::new("signup").error_state_policy(ErrorStatePolicy::HasMessages),
    );
    let valid = FieldBinding::new(Some(&form), "a", Vec::new).unwrap();
    let invalid = FieldBinding::new(Some(&form), "b", || vec!["bad".to_string()]).unwrap();
    valid.attach();
    invalid.attach();

    form.validate_form();

    assert_eq!(form.error_count(), 1);
    assert_eq!(form.is_in_error("a"), Some(false));
    assert_eq!(form.is_in_error("b"), Some(true));
    assert!(!valid.is_in_error_state());
    assert!(invalid.is_in_error_state());
}

#[test]
fn test_no_messages_policy_reports_passing_fields() {
    let form = FormCoordinator::with_config(
        FormConfig::new("legacy").error_state_policy(ErrorStatePolicy::NoMessages),
    );
    let valid = FieldBinding::new(Some(&form), "a", Vec::new).unwrap();
    let invalid = FieldBinding::new(Some(&form), "b", || vec!["bad".to_string()]).unwrap();
    valid.attach();
    invalid.attach();

    form.validate_form();

    assert_eq!(form.error_count(), 1);
    assert_eq!(form.is_in_error("a"), Some(true));
    assert_eq!(form.is_in_error("b"), Some(false));
    assert!(valid.is_in_error_state());
    assert!(!invalid.is_in_error_state());
    assert_eq!(invalid.error_messages().get(), vec!["bad".to_string()]);
}
