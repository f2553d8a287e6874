//! State Machine Runtime
//!
//! Flat state machines for element lifecycles (reveal registrations, menus).
//! Supports:
//! - Table-driven transitions
//! - Terminal states (no outgoing transitions)
//! - Transition history for debugging

use smallvec::SmallVec;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an event type
pub type EventId = u32;

/// A transition in the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from_state: StateId,
    pub event: EventId,
    pub to_state: StateId,
}

impl Transition {
    pub const fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine {
    current_state: StateId,
    transitions: SmallVec<[Transition; 4]>,
    /// History of state transitions (for debugging)
    history: SmallVec<[(StateId, EventId, StateId); 2]>,
}

impl StateMachine {
    /// Create a new state machine with an initial state and transitions
    pub fn new(initial_state: StateId, transitions: &[Transition]) -> Self {
        Self {
            current_state: initial_state,
            transitions: transitions.iter().copied().collect(),
            history: SmallVec::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// A state is terminal when no transition leaves it
    pub fn is_terminal(&self) -> bool {
        !self
            .transitions
            .iter()
            .any(|t| t.from_state == self.current_state)
    }

    /// Get transition history
    pub fn history(&self) -> &[(StateId, EventId, StateId)] {
        &self.history
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: EventId) -> bool {
        let current = self.current_state;
        self.transitions
            .iter()
            .any(|t| t.from_state == current && t.event == event)
    }

    /// Send an event, returning the new state if a transition happened
    pub fn send(&mut self, event: EventId) -> Option<StateId> {
        let current = self.current_state;
        let transition = self
            .transitions
            .iter()
            .find(|t| t.from_state == current && t.event == event)?;

        let to_state = transition.to_state;
        self.current_state = to_state;
        self.history.push((current, event, to_state));
        Some(to_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOSED: StateId = 0;
    const OPEN: StateId = 1;
    const GONE: StateId = 2;

    const TOGGLE: EventId = 1;
    const REMOVE: EventId = 2;

    const MENU: [Transition; 3] = [
        Transition::new(CLOSED, TOGGLE, OPEN),
        Transition::new(OPEN, TOGGLE, CLOSED),
        Transition::new(OPEN, REMOVE, GONE),
    ];

    #[test]
    fn test_simple_transitions() {
        let mut fsm = StateMachine::new(CLOSED, &MENU);
        assert_eq!(fsm.send(TOGGLE), Some(OPEN));
        assert!(fsm.is_in(OPEN));
        assert_eq!(fsm.send(TOGGLE), Some(CLOSED));
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = StateMachine::new(CLOSED, &MENU);
        assert_eq!(fsm.send(REMOVE), None);
        assert_eq!(fsm.current_state(), CLOSED);
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn test_terminal_state() {
        let mut fsm = StateMachine::new(CLOSED, &MENU);
        assert!(!fsm.is_terminal());
        fsm.send(TOGGLE);
        fsm.send(REMOVE);
        assert!(fsm.is_terminal());
        assert!(!fsm.can_send(TOGGLE));
    }

    #[test]
    fn test_history() {
        let mut fsm = StateMachine::new(CLOSED, &MENU);
        fsm.send(TOGGLE);
        fsm.send(REMOVE);

        let history = fsm.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], (CLOSED, TOGGLE, OPEN));
        assert_eq!(history[1], (OPEN, REMOVE, GONE));
    }
}
