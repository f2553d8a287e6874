//! Kinesis App
//!
//! The portfolio page, assembled from the Kinesis crates:
//!
//! - [`content`]: the portfolio document (embedded TOML, replaceable at runtime)
//! - [`config`]: site configuration (`kinesis.toml`)
//! - [`layout`]: headless stack layout giving every element a rectangle
//! - [`sections`]: per-section reveal plans
//! - [`page`]: the page shell that owns theme, reveals and particles
//! - [`headless`]: deterministic scroll-through simulation
//!
//! # Example
//!
//! ```rust
//! use kinesis_app::{Page, Portfolio, SiteConfig};
//! use kinesis_theme::ThemeStore;
//!
//! let portfolio = Portfolio::embedded().unwrap();
//! let mut page = Page::new(SiteConfig::default(), portfolio, ThemeStore::in_memory(None));
//! page.mount();
//!
//! let bottom = page.layout().content_height();
//! let fired = page.scroll_to(bottom);
//! assert!(!fired.is_empty());
//! ```

pub mod config;
pub mod content;
pub mod elements;
pub mod error;
pub mod headless;
pub mod layout;
pub mod nav;
pub mod page;
pub mod sections;

pub use config::{LayoutConfig, NavConfig, SiteConfig, StorageBackend, ThemeConfig, ViewportConfig};
pub use content::{slug, Portfolio, SkillFilter};
pub use elements::SectionId;
pub use error::{AppError, Result};
pub use headless::{FrameSummary, RevealRecord, ScrollSimulation, SimulationConfig, SimulationReport};
pub use layout::PageLayout;
pub use nav::NavState;
pub use page::{open_theme_store, EventOutcome, Page};
pub use sections::{plan_section, Reveal, SectionPlan};
