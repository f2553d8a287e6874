//! Reveal thresholds

/// When a registration fires, as a visible fraction of the viewport.
///
/// `RevealTrigger::visible_fraction(0.2)` fires once the element's top edge
/// is a fifth of a viewport above the bottom edge, which is the same line as
/// `RevealTrigger::top_at(0.8)`: "top edge reaches 80 % down the viewport".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealTrigger {
    threshold: f32,
}

impl RevealTrigger {
    /// Fire when the visible fraction reaches `fraction` (clamped to 0..=1)
    pub fn visible_fraction(fraction: f32) -> Self {
        Self {
            threshold: fraction.clamp(0.0, 1.0),
        }
    }

    /// Fire when the top edge reaches `line` (0 = viewport top, 1 = bottom)
    pub fn top_at(line: f32) -> Self {
        Self::visible_fraction(1.0 - line.clamp(0.0, 1.0))
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_met(&self, visible_fraction: f32) -> bool {
        visible_fraction >= self.threshold
    }
}

impl Default for RevealTrigger {
    fn default() -> Self {
        Self::top_at(0.8)
    }
}
