//! Animatable properties and tweens
//!
//! [`EffectProps`] is a sparse set of visual properties (only the ones an
//! effect touches are `Some`). A [`Tween`] interpolates between two such sets
//! over time, after an optional delay.

use crate::easing::Easing;

/// Properties that can be animated by an entrance effect
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EffectProps {
    /// Opacity (0.0 to 1.0)
    pub opacity: Option<f32>,
    /// Translation X in pixels
    pub translate_x: Option<f32>,
    /// Translation Y in pixels
    pub translate_y: Option<f32>,
    /// Rotation in degrees (Z-axis)
    pub rotate: Option<f32>,
    /// Rotation X in degrees (3D tilt)
    pub rotate_x: Option<f32>,
    /// Uniform scale factor
    pub scale: Option<f32>,
    /// Gaussian blur radius in pixels
    pub blur: Option<f32>,
    /// Width as a percentage of the parent (progress bars)
    pub width_pct: Option<f32>,
}

impl EffectProps {
    /// Create properties with only opacity set
    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    /// Create properties with translation
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: Some(x),
            translate_y: Some(y),
            ..Default::default()
        }
    }

    /// Builder: set opacity
    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Builder: set horizontal translation
    pub fn with_x(mut self, value: f32) -> Self {
        self.translate_x = Some(value);
        self
    }

    /// Builder: set vertical translation
    pub fn with_y(mut self, value: f32) -> Self {
        self.translate_y = Some(value);
        self
    }

    /// Builder: set rotation
    pub fn with_rotate(mut self, degrees: f32) -> Self {
        self.rotate = Some(degrees);
        self
    }

    /// Builder: set 3D tilt
    pub fn with_rotate_x(mut self, degrees: f32) -> Self {
        self.rotate_x = Some(degrees);
        self
    }

    /// Builder: set uniform scale
    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    /// Builder: set blur radius
    pub fn with_blur(mut self, radius: f32) -> Self {
        self.blur = Some(radius);
        self
    }

    /// Builder: set width percentage
    pub fn with_width_pct(mut self, pct: f32) -> Self {
        self.width_pct = Some(pct);
        self
    }

    /// Interpolate between two property sets.
    ///
    /// A property set on only one side holds that side's value.
    pub fn lerp(from: &EffectProps, to: &EffectProps, t: f32) -> EffectProps {
        EffectProps {
            opacity: mix(from.opacity, to.opacity, t),
            translate_x: mix(from.translate_x, to.translate_x, t),
            translate_y: mix(from.translate_y, to.translate_y, t),
            rotate: mix(from.rotate, to.rotate, t),
            rotate_x: mix(from.rotate_x, to.rotate_x, t),
            scale: mix(from.scale, to.scale, t),
            blur: mix(from.blur, to.blur, t),
            width_pct: mix(from.width_pct, to.width_pct, t),
        }
    }

    /// Fill unset properties with their resting values
    pub fn resolve(&self) -> Style {
        let rest = Style::default();
        Style {
            opacity: self.opacity.unwrap_or(rest.opacity).clamp(0.0, 1.0),
            translate_x: self.translate_x.unwrap_or(rest.translate_x),
            translate_y: self.translate_y.unwrap_or(rest.translate_y),
            rotate: self.rotate.unwrap_or(rest.rotate),
            rotate_x: self.rotate_x.unwrap_or(rest.rotate_x),
            scale: self.scale.unwrap_or(rest.scale),
            blur: self.blur.unwrap_or(rest.blur).max(0.0),
            width_pct: self.width_pct,
        }
    }
}

fn mix(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (None, b) => b,
        (a, None) => a,
    }
}

/// Fully resolved visual state of an element.
///
/// Only transforms, opacity, and blur are expressed here: an element in any
/// style stays in the document and the accessibility tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub opacity: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub rotate: f32,
    pub rotate_x: f32,
    pub scale: f32,
    pub blur: f32,
    /// `None` leaves the element's natural width untouched
    pub width_pct: Option<f32>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            rotate: 0.0,
            rotate_x: 0.0,
            scale: 1.0,
            blur: 0.0,
            width_pct: None,
        }
    }
}

/// A delayed, eased interpolation between two property sets
#[derive(Clone, Debug)]
pub struct Tween {
    from: EffectProps,
    to: EffectProps,
    duration_ms: u32,
    easing: Easing,
    delay_ms: u32,
    /// Time since the tween was created, including the delay
    elapsed_ms: f32,
}

impl Tween {
    pub fn new(from: EffectProps, to: EffectProps, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
            delay_ms: 0,
            elapsed_ms: 0.0,
        }
    }

    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Advance the tween by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if self.is_finished() {
            return;
        }
        self.elapsed_ms += dt_ms.max(0.0);
    }

    /// Whether the delay has elapsed
    pub fn is_started(&self) -> bool {
        self.elapsed_ms >= self.delay_ms as f32
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= (self.delay_ms + self.duration_ms) as f32
    }

    /// Linear progress (0.0 to 1.0), before easing
    pub fn progress(&self) -> f32 {
        let active = self.elapsed_ms - self.delay_ms as f32;
        if active <= 0.0 {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        (active / self.duration_ms as f32).min(1.0)
    }

    /// Get the current interpolated properties
    pub fn value(&self) -> EffectProps {
        if self.is_finished() {
            return self.to;
        }
        let eased = self.easing.apply(self.progress());
        EffectProps::lerp(&self.from, &self.to, eased)
    }

    pub fn from(&self) -> &EffectProps {
        &self.from
    }

    pub fn to(&self) -> &EffectProps {
        &self.to
    }
}
