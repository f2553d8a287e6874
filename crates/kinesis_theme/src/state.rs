//! Page-lifetime theme state
//!
//! [`ThemeStore`] is owned by the page root and passed by reference; there is
//! no global instance. Every mutation is persisted before subscribers are
//! notified, and storage failures never fail a mutation: they are logged and
//! the store carries on in memory.

use crate::preference::ThemePreference;
use crate::storage::{MemoryStorage, PreferenceStorage};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by [`ThemeStore::subscribe`]
    pub struct Subscription;
}

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "theme";

/// Callback receiving the new preference
pub type ThemeCallback = Box<dyn FnMut(ThemePreference)>;

/// Where the initial preference came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeSource {
    Persisted,
    System,
    Default,
}

/// Observable light/dark preference
pub struct ThemeStore {
    preference: ThemePreference,
    source: ThemeSource,
    storage: Box<dyn PreferenceStorage>,
    key: String,
    subscribers: SlotMap<Subscription, ThemeCallback>,
}

impl ThemeStore {
    /// Initialize from the persisted value, else `system`, else light
    pub fn init(
        storage: Box<dyn PreferenceStorage>,
        key: impl Into<String>,
        system: Option<ThemePreference>,
    ) -> Self {
        let key = key.into();
        let (preference, source) = match load_persisted(storage.as_ref(), &key) {
            Some(pref) => (pref, ThemeSource::Persisted),
            None => match system {
                Some(pref) => (pref, ThemeSource::System),
                None => (ThemePreference::default(), ThemeSource::Default),
            },
        };
        tracing::debug!(%preference, ?source, "theme store initialized");

        Self {
            preference,
            source,
            storage,
            key,
            subscribers: SlotMap::with_key(),
        }
    }

    /// Store without persistence, starting from `system` or light
    pub fn in_memory(system: Option<ThemePreference>) -> Self {
        Self::init(Box::new(MemoryStorage::new()), DEFAULT_STORAGE_KEY, system)
    }

    pub fn get(&self) -> ThemePreference {
        self.preference
    }

    pub fn source(&self) -> ThemeSource {
        self.source
    }

    /// Set the preference. Returns `false` (and does nothing) when unchanged.
    pub fn set(&mut self, preference: ThemePreference) -> bool {
        if preference == self.preference {
            return false;
        }
        self.preference = preference;
        self.persist();
        tracing::debug!(%preference, subscribers = self.subscribers.len(), "theme switched");
        for callback in self.subscribers.values_mut() {
            callback(preference);
        }
        true
    }

    /// Flip the preference and return the new value
    pub fn toggle(&mut self) -> ThemePreference {
        let next = self.preference.toggle();
        self.set(next);
        next
    }

    pub fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(ThemePreference) + 'static,
    {
        self.subscribers.insert(Box::new(callback))
    }

    /// Remove a subscriber. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.subscribers.remove(subscription).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn persist(&mut self) {
        if let Err(err) = self.storage.store(&self.key, self.preference.as_str()) {
            tracing::warn!(error = %err, key = %self.key, "failed to persist theme preference");
        }
    }
}

fn load_persisted(storage: &dyn PreferenceStorage, key: &str) -> Option<ThemePreference> {
    match storage.load(key) {
        Ok(Some(value)) => match value.parse() {
            Ok(pref) => Some(pref),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring persisted theme preference");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(error = %err, "failed to read theme preference");
            None
        }
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("preference", &self.preference)
            .field("source", &self.source)
            .field("key", &self.key)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
