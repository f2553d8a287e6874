//! Animation scheduler
//!
//! Owns every in-flight tween and counter and advances them each frame.

use crate::counter::{CountAnimation, CountCallback};
use crate::easing::Easing;
use crate::keyframe::{EffectProps, Tween};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::time::Instant;

new_key_type! {
    pub struct TweenId;
    pub struct CounterId;
}

/// What finished during one frame
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Finished tweens with their final properties
    pub finished_tweens: SmallVec<[(TweenId, EffectProps); 8]>,
    /// Finished counters with their final value
    pub finished_counters: SmallVec<[(CounterId, u64); 4]>,
}

impl FrameReport {
    pub fn is_empty(&self) -> bool {
        self.finished_tweens.is_empty() && self.finished_counters.is_empty()
    }
}

/// The animation scheduler that ticks all active animations
pub struct AnimationScheduler {
    tweens: SlotMap<TweenId, Tween>,
    counters: SlotMap<CounterId, CountAnimation>,
    last_frame: Option<Instant>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            tweens: SlotMap::with_key(),
            counters: SlotMap::with_key(),
            last_frame: None,
        }
    }

    pub fn add_tween(&mut self, tween: Tween) -> TweenId {
        self.tweens.insert(tween)
    }

    pub fn tween(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id)
    }

    /// Stop and drop a tween. Unknown ids are ignored.
    pub fn cancel_tween(&mut self, id: TweenId) -> Option<Tween> {
        self.tweens.remove(id)
    }

    pub fn add_counter(&mut self, counter: CountAnimation) -> CounterId {
        self.counters.insert(counter)
    }

    /// Start a count from `from` to `to` with tick and completion callbacks
    pub fn animate_count(
        &mut self,
        from: u64,
        to: u64,
        duration_ms: u32,
        easing: Easing,
        on_tick: CountCallback,
        on_done: CountCallback,
    ) -> CounterId {
        let counter = CountAnimation::new(from, to, duration_ms, easing)
            .on_tick(on_tick)
            .on_done(on_done);
        self.add_counter(counter)
    }

    pub fn counter(&self, id: CounterId) -> Option<&CountAnimation> {
        self.counters.get(id)
    }

    /// Cancel and drop a counter. Unknown ids are ignored.
    pub fn cancel_counter(&mut self, id: CounterId) -> Option<CountAnimation> {
        let mut counter = self.counters.remove(id)?;
        counter.cancel();
        Some(counter)
    }

    /// Advance every animation by `dt_ms` and drop the ones that finished
    pub fn tick(&mut self, dt_ms: f32) -> FrameReport {
        let mut report = FrameReport::default();

        for (id, tween) in self.tweens.iter_mut() {
            tween.tick(dt_ms);
            if tween.is_finished() {
                report.finished_tweens.push((id, tween.value()));
            }
        }
        for (id, _) in &report.finished_tweens {
            self.tweens.remove(*id);
        }

        for (id, counter) in self.counters.iter_mut() {
            if !counter.tick(dt_ms) && counter.is_done() {
                report.finished_counters.push((id, counter.displayed()));
            }
        }
        self.counters.retain(|_, counter| counter.is_active());

        if !report.is_empty() {
            tracing::trace!(
                tweens = report.finished_tweens.len(),
                counters = report.finished_counters.len(),
                "animations finished"
            );
        }
        report
    }

    /// Tick using wall-clock time since the previous call
    pub fn tick_now(&mut self) -> FrameReport {
        let now = Instant::now();
        let dt_ms = self
            .last_frame
            .map(|last| (now - last).as_secs_f32() * 1000.0)
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        self.tick(dt_ms)
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        !self.tweens.is_empty() || self.counters.values().any(|c| c.is_active())
    }

    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn counter_count(&self) -> usize {
        self.counters.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
