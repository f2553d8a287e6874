//! Entrance effect descriptors
//!
//! A [`RevealEffect`] is pure data: initial and target properties, timing,
//! an optional list stagger, and an optional counter to run alongside.

use crate::easing::Easing;
use crate::keyframe::{EffectProps, Tween};

/// Per-item delay for elements animating in sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stagger {
    /// Position of the element in its list
    pub index: usize,
    /// Delay added per position
    pub step_ms: u32,
}

impl Stagger {
    pub fn delay_ms(&self) -> u32 {
        (self.index as u32).saturating_mul(self.step_ms)
    }
}

/// A number that counts up while its element animates in
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterSpec {
    pub from: u64,
    pub to: u64,
    pub duration_ms: u32,
    pub easing: Easing,
}

impl CounterSpec {
    /// Count from zero to `to`
    pub fn to(to: u64, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from: 0,
            to,
            duration_ms,
            easing,
        }
    }
}

/// An "animate-in" effect applied when an element is revealed
#[derive(Clone, Debug, PartialEq)]
pub struct RevealEffect {
    pub from: EffectProps,
    pub to: EffectProps,
    pub duration_ms: u32,
    pub easing: Easing,
    pub delay_ms: u32,
    pub stagger: Option<Stagger>,
    pub counter: Option<CounterSpec>,
}

impl RevealEffect {
    pub fn new(from: EffectProps, to: EffectProps, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
            delay_ms: 0,
            stagger: None,
            counter: None,
        }
    }

    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_stagger(mut self, index: usize, step_ms: u32) -> Self {
        self.stagger = Some(Stagger { index, step_ms });
        self
    }

    pub fn with_counter(mut self, counter: CounterSpec) -> Self {
        self.counter = Some(counter);
        self
    }

    /// Base delay plus stagger offset
    pub fn total_delay_ms(&self) -> u32 {
        self.delay_ms
            .saturating_add(self.stagger.map(|s| s.delay_ms()).unwrap_or(0))
    }

    /// Build the tween that plays this effect
    pub fn tween(&self) -> Tween {
        Tween::new(self.from, self.to, self.duration_ms, self.easing)
            .with_delay(self.total_delay_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagger_adds_to_base_delay() {
        let effect = RevealEffect::new(
            EffectProps::opacity(0.0),
            EffectProps::opacity(1.0),
            600,
            Easing::POWER2_OUT,
        )
        .with_delay(300)
        .with_stagger(3, 50);
        assert_eq!(effect.total_delay_ms(), 450);
        assert_eq!(effect.stagger.map(|s| s.delay_ms()), Some(150));
    }

    #[test]
    fn tween_starts_after_total_delay() {
        let effect = RevealEffect::new(
            EffectProps::opacity(0.0),
            EffectProps::opacity(1.0),
            100,
            Easing::Linear,
        )
        .with_stagger(2, 100);
        let mut tween = effect.tween();
        tween.tick(199.0);
        assert!(!tween.is_started());
        tween.tick(1.0);
        assert!(tween.is_started());
    }
}
