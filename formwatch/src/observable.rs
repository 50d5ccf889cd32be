use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Callback invoked with the new value whenever an observable changes.
type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Observable::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Shared value that notifies subscribers when it changes.
///
/// `Observable<T>` is cheap to clone; every clone refers to the same value
/// and the same subscriber list. Consumers such as a submit button can read
/// the current value with [`get`](Self::get) or react to changes through
/// [`subscribe`](Self::subscribe) without polling.
///
/// Subscribers run synchronously on the thread that changed the value, after
/// the value lock has been released, so a subscriber may read or even change
/// the observable. A subscriber never sees a value older than one already
/// delivered to it.
///
/// # Example
///
/// ```
/// use formwatch::observable::Observable;
///
/// let errors = Observable::new(0usize);
/// errors.subscribe(|n| println!("errors: {n}"));
/// errors.set(2);
/// assert_eq!(errors.get(), 2);
/// ```
pub struct Observable<T> {
    inner: Arc<RwLock<T>>,
    dirty: Arc<AtomicBool>,
    version: Arc<AtomicU64>,
    subscribers: Arc<RwLock<Vec<(SubscriptionId, Subscriber<T>)>>>,
    next_id: Arc<AtomicU64>,
}

impl<T> Observable<T> {
    /// Create a new observable with the given value
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            dirty: Arc::new(AtomicBool::new(false)),
            version: Arc::new(AtomicU64::new(0)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    /// Read the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&*guard),
            Err(poisoned) => f(&*poisoned.into_inner()),
        }
    }

    /// Replace the value, notifying subscribers if it changed.
    ///
    /// Returns `true` when the stored value was different.
    pub fn set(&self, value: T) -> bool
    where
        T: Clone + PartialEq,
    {
        self.update(|current| *current = value)
    }

    /// Mutate the value in place, notifying subscribers if it changed.
    ///
    /// Returns `true` when the closure left the value different.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T),
        T: Clone + PartialEq,
    {
        let changed = {
            let mut guard = self
                .inner
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let before = (*guard).clone();
            f(&mut *guard);
            if *guard == before {
                None
            } else {
                Some(self.version.fetch_add(1, Ordering::SeqCst) + 1)
            }
        };

        match changed {
            Some(version) => {
                self.dirty.store(true, Ordering::SeqCst);
                self.notify(version);
                true
            }
            None => false,
        }
    }

    /// Register a callback that runs after every change.
    pub fn subscribe<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.subscribers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((id, Arc::new(f)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self
            .subscribers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .map(|subs| subs.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    /// Check if the value has changed since the last `clear_dirty`
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Deliver change `version` to every subscriber.
    ///
    /// Each subscriber gets the value as it is when it is called. If a
    /// subscriber changes the value again, the nested change has already been
    /// delivered to everyone by the time it returns, so this round stops.
    fn notify(&self, version: u64)
    where
        T: Clone,
    {
        // Snapshot so subscribers can (un)subscribe without deadlocking.
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .read()
            .map(|subs| subs.iter().map(|(_, f)| Arc::clone(f)).collect())
            .unwrap_or_else(|poisoned| {
                poisoned
                    .into_inner()
                    .iter()
                    .map(|(_, f)| Arc::clone(f))
                    .collect()
            });

        for subscriber in subscribers {
            if self.version.load(Ordering::SeqCst) != version {
                return;
            }
            let value = self.get();
            subscriber(&value);
        }
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
            version: Arc::clone(&self.version),
            subscribers: Arc::clone(&self.subscribers),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.with(|value| {
            f.debug_struct("Observable")
                .field("value", value)
                .field("dirty", &self.is_dirty())
                .field("subscribers", &self.subscriber_count())
                .finish()
        })
    }
}
