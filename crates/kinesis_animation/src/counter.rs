//! Counting animations
//!
//! A [`CountAnimation`] drives a virtual progress value from 0 to 1 and
//! reports `from + floor((to - from) * eased(progress))` on every tick. The
//! reported sequence starts at `from`, never decreases (even under an
//! overshooting easing), and always ends exactly on `to`.

use crate::easing::Easing;
use crate::effect::CounterSpec;

/// Callback receiving the displayed value
pub type CountCallback = Box<dyn FnMut(u64)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CountPhase {
    Waiting,
    Running,
    Done,
    Cancelled,
}

/// Snapshot of a counter's displayed state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterState {
    pub target: u64,
    pub displayed: u64,
    /// Linear progress (0.0 to 1.0)
    pub progress: f32,
}

/// An integer counting from `from` up to `to`
pub struct CountAnimation {
    from: u64,
    to: u64,
    duration_ms: u32,
    easing: Easing,
    delay_ms: u32,
    elapsed_ms: f32,
    progress: f32,
    displayed: u64,
    phase: CountPhase,
    on_tick: Option<CountCallback>,
    on_done: Option<CountCallback>,
}

impl CountAnimation {
    /// Count from `from` to `to`. A `from` above `to` starts at `to`.
    pub fn new(from: u64, to: u64, duration_ms: u32, easing: Easing) -> Self {
        let from = from.min(to);
        Self {
            from,
            to,
            duration_ms,
            easing,
            delay_ms: 0,
            elapsed_ms: 0.0,
            progress: 0.0,
            displayed: from,
            phase: CountPhase::Waiting,
            on_tick: None,
            on_done: None,
        }
    }

    pub fn from_spec(spec: &CounterSpec) -> Self {
        Self::new(spec.from, spec.to, spec.duration_ms, spec.easing)
    }

    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Called with every displayed value
    pub fn on_tick<F: FnMut(u64) + 'static>(mut self, callback: F) -> Self {
        self.on_tick = Some(Box::new(callback));
        self
    }

    /// Called once with the exact target when the count completes
    pub fn on_done<F: FnMut(u64) + 'static>(mut self, callback: F) -> Self {
        self.on_done = Some(Box::new(callback));
        self
    }

    /// Advance by delta time. Returns `true` while the count is still active.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if matches!(self.phase, CountPhase::Done | CountPhase::Cancelled) {
            return false;
        }

        self.elapsed_ms += dt_ms.max(0.0);

        if self.phase == CountPhase::Waiting {
            if self.elapsed_ms < self.delay_ms as f32 {
                return true;
            }
            self.phase = CountPhase::Running;
            self.report(self.from);
        }

        let active = self.elapsed_ms - self.delay_ms as f32;
        self.progress = if self.duration_ms == 0 {
            1.0
        } else {
            (active / self.duration_ms as f32).clamp(0.0, 1.0)
        };

        if self.progress >= 1.0 {
            self.displayed = self.to;
            self.report(self.to);
            self.phase = CountPhase::Done;
            if let Some(done) = self.on_done.as_mut() {
                done(self.to);
            }
            return false;
        }

        let eased = self.easing.apply(self.progress).clamp(0.0, 1.0) as f64;
        let span = (self.to - self.from) as f64;
        let value = self.from + (span * eased).floor() as u64;
        self.displayed = self.displayed.max(value).min(self.to);
        self.report(self.displayed);
        true
    }

    /// Stop the count; no further callbacks fire
    pub fn cancel(&mut self) {
        if self.phase != CountPhase::Done {
            self.phase = CountPhase::Cancelled;
        }
    }

    pub fn displayed(&self) -> u64 {
        self.displayed
    }

    pub fn target(&self) -> u64 {
        self.to
    }

    pub fn is_done(&self) -> bool {
        self.phase == CountPhase::Done
    }

    pub fn is_cancelled(&self) -> bool {
        self.phase == CountPhase::Cancelled
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, CountPhase::Waiting | CountPhase::Running)
    }

    pub fn state(&self) -> CounterState {
        CounterState {
            target: self.to,
            displayed: self.displayed,
            progress: self.progress,
        }
    }

    fn report(&mut self, value: u64) {
        if let Some(tick) = self.on_tick.as_mut() {
            tick(value);
        }
    }
}

impl std::fmt::Debug for CountAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountAnimation")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("displayed", &self.displayed)
            .field("phase", &self.phase)
            .finish()
    }
}
