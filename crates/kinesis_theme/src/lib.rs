//! Kinesis Theme System
//!
//! Light/dark preference handling for the page shell.
//!
//! # Overview
//!
//! - **Preference**: [`ThemePreference`], a binary light/dark flag
//! - **Store**: [`ThemeStore`], owned by the page root, observable through
//!   subscriptions and persisted on every change
//! - **Storage**: [`PreferenceStorage`] with in-memory and JSON-file backends
//! - **Color scheme detection**: the environment's reported preference
//! - **Tokens**: light and dark [`ColorTokens`] plus a cross-fade
//!
//! # Quick Start
//!
//! ```rust
//! use kinesis_theme::{ThemePreference, ThemeStore};
//!
//! let mut store = ThemeStore::in_memory(None);
//! store.subscribe(|pref| println!("theme is now {pref}"));
//! assert_eq!(store.toggle(), ThemePreference::Dark);
//! ```

pub mod error;
pub mod platform;
pub mod preference;
pub mod state;
pub mod storage;
pub mod tokens;

pub use error::{Result, StorageError, ThemeError};
pub use platform::{detect_system_color_scheme, scheme_from_env};
pub use preference::ThemePreference;
pub use state::{Subscription, ThemeCallback, ThemeSource, ThemeStore, DEFAULT_STORAGE_KEY};
pub use storage::{FileStorage, MemoryStorage, PreferenceStorage};
pub use tokens::{ColorToken, ColorTokens, ThemeTransition};
