//! Navigation bar state

use crate::error::{AppError, Result};
use crate::layout::PageLayout;
use kinesis_core::{EventId, StateId, StateMachine, Transition};

const MENU_CLOSED: StateId = 0;
const MENU_OPEN: StateId = 1;

const OPEN: EventId = 0;
const CLOSE: EventId = 1;

const MENU: [Transition; 2] = [
    Transition::new(MENU_CLOSED, OPEN, MENU_OPEN),
    Transition::new(MENU_OPEN, CLOSE, MENU_CLOSED),
];

/// Scrolled styling and the mobile menu
#[derive(Clone, Debug)]
pub struct NavState {
    scrolled: bool,
    threshold: f32,
    menu: StateMachine,
}

impl NavState {
    pub fn new(scrolled_threshold: f32) -> Self {
        Self {
            scrolled: false,
            threshold: scrolled_threshold,
            menu: StateMachine::new(MENU_CLOSED, &MENU),
        }
    }

    /// Track the scroll offset. Returns `true` when the scrolled flag flips.
    pub fn on_scroll(&mut self, scroll_y: f32) -> bool {
        let scrolled = scroll_y > self.threshold;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.is_in(MENU_OPEN)
    }

    pub fn open_menu(&mut self) {
        self.menu.send(OPEN);
    }

    pub fn close_menu(&mut self) {
        self.menu.send(CLOSE);
    }

    pub fn toggle_menu(&mut self) {
        if self.is_menu_open() {
            self.close_menu();
        } else {
            self.open_menu();
        }
    }

    /// Resolve an anchor to its scroll target and close the menu
    pub fn navigate(&mut self, anchor: &str, layout: &PageLayout) -> Result<f32> {
        let target = layout
            .anchor_offset(anchor)
            .ok_or_else(|| AppError::UnknownAnchor(anchor.to_string()))?;
        self.close_menu();
        tracing::debug!(anchor, target, "navigating to section");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::content::{Portfolio, SkillFilter};

    #[test]
    fn scrolled_flag_flips_past_the_threshold() {
        let mut nav = NavState::new(50.0);
        assert!(!nav.on_scroll(50.0));
        assert!(!nav.is_scrolled());
        assert!(nav.on_scroll(51.0));
        assert!(nav.is_scrolled());
        assert!(!nav.on_scroll(400.0));
        assert!(nav.on_scroll(0.0));
    }

    #[test]
    fn navigation_closes_the_menu() {
        let portfolio = Portfolio::embedded().unwrap();
        let layout = PageLayout::compute(
            &portfolio,
            &SkillFilter::All,
            &LayoutConfig::default(),
            390.0,
            844.0,
        );
        let mut nav = NavState::new(50.0);
        nav.toggle_menu();
        assert!(nav.is_menu_open());

        let target = nav.navigate("#contact", &layout).unwrap();
        assert_eq!(Some(target), layout.anchor_offset("#contact"));
        assert!(!nav.is_menu_open());

        nav.open_menu();
        assert!(matches!(
            nav.navigate("#projects", &layout),
            Err(AppError::UnknownAnchor(_))
        ));
        assert!(nav.is_menu_open());
    }
}
