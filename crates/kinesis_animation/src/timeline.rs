//! Timeline orchestration for mount-time entrance sequences
//!
//! A timeline places effects relative to each other (after the previous
//! one, overlapping it, or at an absolute time) and resolves them into
//! plain delayed [`RevealEffect`]s that can be played immediately.

use crate::effect::RevealEffect;
use kinesis_core::ElementId;

/// Where an entry starts, relative to the timeline built so far
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// At the end of everything added so far
    Sequential,
    /// This many milliseconds before the current end (`"-=ms"`)
    Overlap(u32),
    /// This many milliseconds after the current end (`"+=ms"`)
    Gap(u32),
    /// At an absolute time from the timeline start
    At(u32),
}

/// An entry in a timeline
#[derive(Clone, Debug)]
struct TimelineEntry {
    element: ElementId,
    effect: RevealEffect,
    /// Offset in milliseconds from timeline start
    start_ms: u32,
}

/// A timeline that orchestrates multiple entrance effects
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    delay_ms: u32,
    entries: Vec<TimelineEntry>,
    duration_ms: u32,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay the whole timeline
    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    fn resolve(&self, position: Position) -> u32 {
        match position {
            Position::Sequential => self.duration_ms,
            Position::Overlap(ms) => self.duration_ms.saturating_sub(ms),
            Position::Gap(ms) => self.duration_ms.saturating_add(ms),
            Position::At(ms) => ms,
        }
    }

    /// Add an effect for one element
    pub fn add(mut self, element: ElementId, effect: RevealEffect, position: Position) -> Self {
        let start_ms = self.resolve(position);
        let end_ms = start_ms + effect.total_delay_ms() + effect.duration_ms;
        self.duration_ms = self.duration_ms.max(end_ms);
        self.entries.push(TimelineEntry {
            element,
            effect,
            start_ms,
        });
        self
    }

    /// Add the same effect for a list of elements, `step_ms` apart
    pub fn add_staggered(
        mut self,
        elements: &[ElementId],
        effect: RevealEffect,
        step_ms: u32,
        position: Position,
    ) -> Self {
        let start_ms = self.resolve(position);
        for (index, element) in elements.iter().enumerate() {
            self = self.add(
                *element,
                effect.clone().with_stagger(index, step_ms),
                Position::At(start_ms),
            );
        }
        self
    }

    /// Total length including the timeline delay
    pub fn duration_ms(&self) -> u32 {
        self.delay_ms + self.duration_ms
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve every entry into an effect whose base delay carries its
    /// timeline start
    pub fn into_effects(self) -> Vec<(ElementId, RevealEffect)> {
        let delay_ms = self.delay_ms;
        self.entries
            .into_iter()
            .map(|entry| {
                let base = entry.effect.delay_ms;
                let effect = entry.effect.with_delay(delay_ms + entry.start_ms + base);
                (entry.element, effect)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::keyframe::EffectProps;

    fn fade(duration_ms: u32) -> RevealEffect {
        RevealEffect::new(
            EffectProps::opacity(0.0),
            EffectProps::opacity(1.0),
            duration_ms,
            Easing::Linear,
        )
    }

    #[test]
    fn overlaps_are_measured_from_the_current_end() {
        let headline = ElementId::from_key("hero/headline");
        let subtitle = ElementId::from_key("hero/subtitle");
        let buttons = [
            ElementId::from_key("hero/cta/resume"),
            ElementId::from_key("hero/cta/consult"),
        ];

        let timeline = Timeline::new()
            .with_delay(300)
            .add(headline, fade(1000), Position::Sequential)
            .add(subtitle, fade(800), Position::Overlap(500))
            .add_staggered(&buttons, fade(500), 100, Position::Overlap(300));

        // headline 0..1000, subtitle 500..1300, buttons 1000..1500 and 1100..1600
        assert_eq!(timeline.duration_ms(), 300 + 1600);

        let delays: Vec<u32> = timeline
            .into_effects()
            .iter()
            .map(|(_, e)| e.total_delay_ms())
            .collect();
        assert_eq!(delays, vec![300, 800, 1300, 1400]);
    }

    #[test]
    fn absolute_positions_ignore_the_current_end() {
        let timeline = Timeline::new()
            .add(ElementId::from_key("a"), fade(600), Position::Sequential)
            .add(ElementId::from_key("b"), fade(400), Position::At(100))
            .add(ElementId::from_key("c"), fade(400), Position::Gap(50));
        let delays: Vec<u32> = timeline
            .into_effects()
            .iter()
            .map(|(_, e)| e.delay_ms)
            .collect();
        assert_eq!(delays, vec![0, 100, 650]);
    }
}
