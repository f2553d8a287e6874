//! Kinesis Core
//!
//! Foundational primitives shared by every Kinesis crate:
//!
//! - **Geometry**: points, sizes, rectangles, and the [`LayoutSource`] seam
//!   through which the page reports where its elements are
//! - **Element ids**: stable identifiers derived from content keys
//! - **Colors**: RGBA colors with hex parsing and interpolation
//! - **Page events**: scroll, resize, frame, and lifecycle events
//! - **State machines**: small flat state machines with transition history
//!
//! # Example
//!
//! ```rust
//! use kinesis_core::{ElementId, Rect};
//!
//! let headline = ElementId::from_key("about/headline");
//! assert_eq!(headline, ElementId::from_key("about/headline"));
//!
//! let bounds = Rect::new(0.0, 1200.0, 1280.0, 96.0);
//! assert_eq!(bounds.bottom(), 1296.0);
//! ```

pub mod color;
pub mod events;
pub mod fsm;
pub mod geometry;

pub use color::Color;
pub use events::{Event, EventData, EventType};
pub use fsm::{EventId, StateId, StateMachine, Transition};
pub use geometry::{ElementId, LayoutSource, Point, Rect, Size};
