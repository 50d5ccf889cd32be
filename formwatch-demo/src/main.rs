//! Signup form walk-through.
//!
//! Builds a small signup form, submits it empty, fixes the fields one by one
//! and shows the submit button following the aggregate error count. A field
//! that is removed while invalid is also shown, under both error count
//! policies.

use std::fs::File;

use formwatch::prelude::*;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

struct SignupForm {
    form: FormCoordinator,
    username: Field<String>,
    email: Field<String>,
    age: Field<u32>,
    accept_terms: Field<bool>,
}

impl SignupForm {
    fn new(config: FormConfig) -> Result<Self> {
        let form = FormCoordinator::with_config(config);

        let username = Field::new(
            Some(&form),
            "username",
            FieldOptions::new().required().validators([
                rules::min_length(3, "Username must be at least 3 characters"),
                rules::max_length(16, "Username must be at most 16 characters"),
                rules::pattern(r"^[a-z0-9_]+$", "Use lowercase letters, digits and '_'")?,
            ]),
        )?;
        let email = Field::new(
            Some(&form),
            "email",
            FieldOptions::new()
                .required()
                .validator(rules::email("Please enter a valid email")),
        )?;
        let age = Field::new(
            Some(&form),
            "age",
            FieldOptions::new().validator(rules::range(13u32, 130, "Age must be between 13 and 130")),
        )?;
        let accept_terms = Field::new(
            Some(&form),
            "terms",
            FieldOptions::new()
                .default_value(false)
                .validator(rules::checked("You must accept the terms")),
        )?;

        username.attach();
        email.attach();
        age.attach();
        accept_terms.attach();

        form.total_errors().subscribe(|errors| {
            let state = if *errors == 0 { "enabled" } else { "disabled" };
            println!("  [submit button {} ({} error(s))]", state, errors);
        });

        Ok(Self {
            form,
            username,
            email,
            age,
            accept_terms,
        })
    }

    fn submit(&self) -> bool {
        self.form.validate_form();
        for id in self.form.fields_in_error() {
            let messages = match id.as_str() {
                "username" => self.username.error_messages(),
                "email" => self.email.error_messages(),
                "age" => self.age.error_messages(),
                "terms" => self.accept_terms.error_messages(),
                _ => Vec::new(),
            };
            println!("  {}: {}", id, messages.join("; "));
        }
        let accepted = !self.form.has_errors();
        info!("submit accepted: {}", accepted);
        accepted
    }
}

fn walk_through() -> Result<()> {
    println!("Submitting an empty form");
    let signup = SignupForm::new(FormConfig::new("signup"))?;
    signup.submit();

    println!("Filling in the fields");
    signup.username.set_value("Ferris".to_string());
    signup.username.validate();
    signup.username.set_value("ferris".to_string());
    signup.username.validate();
    signup.email.set_value("ferris@example.com".to_string());
    signup.email.validate();
    signup.age.set_value(7);
    signup.age.validate();
    signup.age.set_value(27);
    signup.age.validate();
    signup.accept_terms.set_value(true);
    signup.accept_terms.validate();

    println!("Submitting again");
    if signup.submit() {
        println!("  signup accepted");
    }

    for policy in [ErrorCountPolicy::Retain, ErrorCountPolicy::Reconcile] {
        println!("Removing an invalid field with {:?}", policy);
        let signup = SignupForm::new(FormConfig::new("signup").error_count_policy(policy))?;
        signup.email.set_value("not an email".to_string());
        signup.email.validate();
        signup.email.detach();
        println!(
            "  {} field(s) registered, error count {}",
            signup.form.field_count(),
            signup.form.error_count()
        );
    }

    Ok(())
}

fn main() {
    if let Ok(log_file) = File::create("formwatch-demo.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    if let Err(e) = walk_through() {
        eprintln!("Error: {}", e);
    }
}
