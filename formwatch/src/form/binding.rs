//! Per-field binding to a form coordinator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use log::debug;

use super::coordinator::FormCoordinator;
use crate::error::{FormError, Result};
use crate::observable::Observable;

/// Computes a field's current error messages.
type ValidateFn = Box<dyn Fn() -> Vec<String> + Send + Sync>;

struct BindingState {
    id: String,
    form: FormCoordinator,
    validate_fn: ValidateFn,
    error_messages: Observable<Vec<String>>,
    has_been_validated: Observable<bool>,
    attached: AtomicBool,
}

impl BindingState {
    fn run(&self) -> Vec<String> {
        let errors = (self.validate_fn)();
        self.has_been_validated.set(true);
        self.error_messages.set(errors.clone());
        let in_error = self.form.config().error_state_policy.is_in_error(&errors);
        self.form.update_error_state(&self.id, in_error);
        errors
    }
}

/// Connects one form field to its [`FormCoordinator`].
///
/// The binding owns the field's validation result: the current error
/// messages and whether the field has been validated at least once. Whoever
/// owns the field's lifetime calls [`attach`](Self::attach) when the field
/// appears and [`detach`](Self::detach) when it goes away.
///
/// The callback registered with the coordinator only holds a weak reference
/// to the binding. Dropping an attached binding without detaching it leaves
/// a registration behind that does nothing when the form is validated.
pub struct FieldBinding {
    state: Arc<BindingState>,
}

impl FieldBinding {
    /// Create a binding for field `id`.
    ///
    /// `validate_fn` computes the field's error messages from its current
    /// value, typically by calling [`validate`](crate::validation::validate).
    ///
    /// # Errors
    ///
    /// Returns [`FormError::OutsideForm`] when `form` is `None`.
    pub fn new<F>(
        form: Option<&FormCoordinator>,
        id: impl Into<String>,
        validate_fn: F,
    ) -> Result<Self>
    where
        F: Fn() -> Vec<String> + Send + Sync + 'static,
    {
        let form = form.ok_or(FormError::OutsideForm)?;
        Ok(Self {
            state: Arc::new(BindingState {
                id: id.into(),
                form: form.clone(),
                validate_fn: Box::new(validate_fn),
                error_messages: Observable::new(Vec::new()),
                has_been_validated: Observable::new(false),
                attached: AtomicBool::new(false),
            }),
        })
    }

    /// Register this field with its coordinator.
    pub fn attach(&self) {
        let state: Weak<BindingState> = Arc::downgrade(&self.state);
        self.state.form.register(self.state.id.clone(), move || {
            if let Some(state) = state.upgrade() {
                state.run();
            }
        });
        self.state.attached.store(true, Ordering::SeqCst);
    }

    /// Deregister this field. Does nothing if it is not attached.
    pub fn detach(&self) {
        if self.state.attached.swap(false, Ordering::SeqCst) {
            self.state.form.deregister(&self.state.id);
        } else {
            debug!("field '{}' detached while not attached", self.state.id);
        }
    }

    /// Re-run validation, store the messages and report to the coordinator.
    pub fn validate(&self) -> Vec<String> {
        self.state.run()
    }

    /// Field id.
    pub fn id(&self) -> &str {
        &self.state.id
    }

    /// The coordinator this field belongs to.
    pub fn form(&self) -> &FormCoordinator {
        &self.state.form
    }

    /// Observable error messages from the last validation run.
    pub fn error_messages(&self) -> Observable<Vec<String>> {
        self.state.error_messages.clone()
    }

    /// Observable flag, `true` once validation has run at least once.
    pub fn has_been_validated(&self) -> Observable<bool> {
        self.state.has_been_validated.clone()
    }

    /// Error state of the last validation run, as reported to the form.
    pub fn is_in_error_state(&self) -> bool {
        let policy = self.state.form.config().error_state_policy;
        self.state
            .error_messages
            .with(|errors| policy.is_in_error(errors))
    }

    /// Check if the field is currently registered through this binding.
    pub fn is_attached(&self) -> bool {
        self.state.attached.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBinding")
            .field("id", &self.state.id)
            .field("attached", &self.is_attached())
            .field("has_been_validated", &self.state.has_been_validated.get())
            .field("error_messages", &self.state.error_messages.get())
            .finish()
    }
}
