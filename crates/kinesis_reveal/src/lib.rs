//! Kinesis Reveal
//!
//! Scroll-triggered entrance animations that fire exactly once per element.
//!
//! Sections hand `(element, trigger, effect)` triples to a single
//! [`RevealController`]; the page shell calls [`RevealController::evaluate`]
//! on scroll and resize and [`RevealController::tick`] every frame.
//!
//! ```rust
//! use kinesis_animation::{AnimationPreset, Easing};
//! use kinesis_core::{ElementId, Rect};
//! use kinesis_reveal::{RevealController, RevealTrigger, Viewport};
//! use rustc_hash::FxHashMap;
//!
//! let mut controller = RevealController::new();
//! let about = controller.create_scope("about");
//! let headline = ElementId::from_key("about/headline");
//! controller.register(
//!     about,
//!     headline,
//!     RevealTrigger::top_at(0.8),
//!     AnimationPreset::fade_up(30.0, 800, Easing::POWER3_OUT),
//! );
//!
//! let mut layout = FxHashMap::default();
//! layout.insert(headline, Rect::new(0.0, 900.0, 1280.0, 64.0));
//!
//! let viewport = Viewport::new(1280.0, 800.0).with_scroll(400.0);
//! assert_eq!(controller.evaluate(&layout, &viewport).len(), 1);
//! ```

pub mod controller;
pub mod trigger;
pub mod viewport;

pub use controller::{Fired, RevealController, RevealHandle, RevealState, ScopeId};
pub use trigger::RevealTrigger;
pub use viewport::Viewport;
