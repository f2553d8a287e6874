//! Page events
//!
//! Everything the page shell reacts to arrives as an [`Event`]: scroll and
//! resize notifications from the host, frame ticks from the frame clock, and
//! user actions such as toggling the theme.

/// Event type identifier
pub type EventType = u32;

/// Page event types
pub mod event_types {
    use super::EventType;

    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;
    /// Animation frame tick
    pub const FRAME: EventType = 45;

    // Page lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;

    // User actions
    pub const TOGGLE_THEME: EventType = 90;
    pub const NAVIGATE: EventType = 91;
}

/// A page event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    /// Milliseconds since the page mounted
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    /// Absolute document scroll offset
    Scroll { scroll_y: f32 },
    Resize { width: f32, height: f32 },
    /// Elapsed time since the previous frame
    Frame { dt_ms: f32 },
    /// Anchor of the section to navigate to, e.g. `"#contact"`
    Navigate { anchor: String },
    None,
}

impl Event {
    pub fn scroll(scroll_y: f32, timestamp: u64) -> Self {
        Self {
            event_type: event_types::SCROLL,
            data: EventData::Scroll { scroll_y },
            timestamp,
        }
    }

    pub fn resize(width: f32, height: f32, timestamp: u64) -> Self {
        Self {
            event_type: event_types::RESIZE,
            data: EventData::Resize { width, height },
            timestamp,
        }
    }

    pub fn frame(dt_ms: f32, timestamp: u64) -> Self {
        Self {
            event_type: event_types::FRAME,
            data: EventData::Frame { dt_ms },
            timestamp,
        }
    }

    pub fn navigate(anchor: impl Into<String>, timestamp: u64) -> Self {
        Self {
            event_type: event_types::NAVIGATE,
            data: EventData::Navigate {
                anchor: anchor.into(),
            },
            timestamp,
        }
    }

    /// An event that carries no data (mount, unmount, theme toggle)
    pub fn signal(event_type: EventType, timestamp: u64) -> Self {
        Self {
            event_type,
            data: EventData::None,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_pair_type_and_data() {
        let e = Event::scroll(120.0, 16);
        assert_eq!(e.event_type, event_types::SCROLL);
        assert_eq!(e.data, EventData::Scroll { scroll_y: 120.0 });

        let e = Event::signal(event_types::TOGGLE_THEME, 0);
        assert_eq!(e.data, EventData::None);
    }
}
