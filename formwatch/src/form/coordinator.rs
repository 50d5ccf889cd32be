//! Registry of fields and the aggregate error count.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, trace, warn};

use super::config::{ErrorCountPolicy, FormConfig};
use crate::observable::Observable;

/// Callback that re-validates one field and reports the outcome.
pub type ValidateCallback = Arc<dyn Fn() + Send + Sync>;

/// Registration record for one field.
struct FieldEntry {
    validate: ValidateCallback,
    in_error: bool,
}

#[derive(Default)]
struct Registry {
    fields: HashMap<String, FieldEntry>,
    total_errors: usize,
}

struct Shared {
    config: FormConfig,
    registry: RwLock<Registry>,
    total_errors: Observable<usize>,
}

/// Coordinates validation across the fields of one form.
///
/// The coordinator maps field ids to their validation callbacks and current
/// error state, and keeps a running count of fields in error. The count is
/// adjusted on every error-state transition rather than recomputed, and is
/// exposed as an [`Observable`] so a submit button can follow it.
///
/// `FormCoordinator` is a cheap-clone handle; clones share the same registry.
///
/// # Example
///
/// ```
/// use formwatch::form::FormCoordinator;
///
/// let form = FormCoordinator::new();
/// form.register("email", || {});
/// form.update_error_state("email", true);
/// assert_eq!(form.error_count(), 1);
///
/// form.update_error_state("email", false);
/// assert_eq!(form.error_count(), 0);
/// ```
#[derive(Clone)]
pub struct FormCoordinator {
    shared: Arc<Shared>,
}

impl FormCoordinator {
    /// Create a coordinator with the default configuration.
    pub fn new() -> Self {
        Self::with_config(FormConfig::default())
    }

    /// Create a coordinator with a custom configuration.
    pub fn with_config(config: FormConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                registry: RwLock::new(Registry::default()),
                total_errors: Observable::new(0),
            }),
        }
    }

    /// The configuration this coordinator was built with.
    pub fn config(&self) -> &FormConfig {
        &self.shared.config
    }

    /// Register a field's validation callback.
    ///
    /// An existing registration under the same id is replaced and its error
    /// state reset to "not in error".
    pub fn register<F>(&self, id: impl Into<String>, validate: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.register_callback(id, Arc::new(validate));
    }

    /// Register an already shared callback.
    pub fn register_callback(&self, id: impl Into<String>, validate: ValidateCallback) {
        let id = id.into();
        let count = {
            let mut registry = self.write();
            let previous = registry.fields.insert(
                id.clone(),
                FieldEntry {
                    validate,
                    in_error: false,
                },
            );
            match previous {
                Some(previous) => {
                    debug!(
                        "{}: field '{}' re-registered, replacing previous callback",
                        self.shared.config.name, id
                    );
                    self.release(&mut registry, &id, previous.in_error)
                }
                None => {
                    debug!("{}: registered field '{}'", self.shared.config.name, id);
                    None
                }
            }
        };
        self.publish(count);
    }

    /// Remove a field. Unknown ids are ignored.
    pub fn deregister(&self, id: &str) {
        let count = {
            let mut registry = self.write();
            match registry.fields.remove(id) {
                Some(entry) => {
                    debug!("{}: deregistered field '{}'", self.shared.config.name, id);
                    self.release(&mut registry, id, entry.in_error)
                }
                None => None,
            }
        };
        self.publish(count);
    }

    /// Record whether a field is currently showing errors.
    ///
    /// The aggregate count moves only on a transition: reporting the same
    /// state twice is a no-op.
    ///
    /// Reports for ids that are not registered are dropped with a warning
    /// rather than creating an entry, so a binding that reports after
    /// detaching cannot move the count.
    pub fn update_error_state(&self, id: &str, in_error: bool) {
        let count = {
            let mut registry = self.write();
            let Some(entry) = registry.fields.get_mut(id) else {
                warn!(
                    "{}: error state reported for unregistered field '{}'",
                    self.shared.config.name, id
                );
                return;
            };
            if entry.in_error == in_error {
                return;
            }
            entry.in_error = in_error;
            registry.total_errors = if in_error {
                registry.total_errors + 1
            } else {
                registry.total_errors.saturating_sub(1)
            };
            trace!(
                "{}: field '{}' {} error state, {} total",
                self.shared.config.name,
                id,
                if in_error { "entered" } else { "left" },
                registry.total_errors
            );
            Some(registry.total_errors)
        };
        self.publish(count);
    }

    /// Run every registered field's validation callback.
    ///
    /// Callbacks run after the registry lock is released, so each one may
    /// report back through [`update_error_state`](Self::update_error_state)
    /// or even (de)register fields.
    pub fn validate_form(&self) {
        let callbacks: Vec<ValidateCallback> = self
            .read()
            .fields
            .values()
            .map(|entry| Arc::clone(&entry.validate))
            .collect();

        debug!(
            "{}: validating {} field(s)",
            self.shared.config.name,
            callbacks.len()
        );

        for validate in callbacks {
            validate();
        }
    }

    /// Observable aggregate error count.
    pub fn total_errors(&self) -> Observable<usize> {
        self.shared.total_errors.clone()
    }

    /// Current aggregate error count.
    pub fn error_count(&self) -> usize {
        self.read().total_errors
    }

    /// Check if any field is counted as in error.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of registered fields.
    pub fn field_count(&self) -> usize {
        self.read().fields.len()
    }

    /// Check if a field is registered under `id`.
    pub fn is_registered(&self, id: &str) -> bool {
        self.read().fields.contains_key(id)
    }

    /// Error state of a registered field.
    pub fn is_in_error(&self, id: &str) -> Option<bool> {
        self.read().fields.get(id).map(|entry| entry.in_error)
    }

    /// Ids of registered fields currently in error, sorted.
    pub fn fields_in_error(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .read()
            .fields
            .iter()
            .filter(|(_, entry)| entry.in_error)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Apply the error count policy to a field leaving the registry (or being
    /// replaced) while `was_in_error`. Returns the new count if it changed.
    fn release(&self, registry: &mut Registry, id: &str, was_in_error: bool) -> Option<usize> {
        if !was_in_error {
            return None;
        }
        match self.shared.config.error_count_policy {
            ErrorCountPolicy::Retain => {
                debug!(
                    "{}: field '{}' removed while in error, count retained at {}",
                    self.shared.config.name, id, registry.total_errors
                );
                None
            }
            ErrorCountPolicy::Reconcile => {
                registry.total_errors = registry.total_errors.saturating_sub(1);
                Some(registry.total_errors)
            }
        }
    }

    fn publish(&self, count: Option<usize>) {
        if let Some(count) = count {
            self.shared.total_errors.set(count);
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.shared
            .registry
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.shared
            .registry
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for FormCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FormCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.read();
        f.debug_struct("FormCoordinator")
            .field("name", &self.shared.config.name)
            .field("fields", &registry.fields.len())
            .field("total_errors", &registry.total_errors)
            .finish()
    }
}
