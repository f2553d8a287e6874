//! Animation presets for common entrance effects
//!
//! Pre-built [`RevealEffect`]s. Every preset ends at the element's resting
//! state (fully opaque, untransformed) so a finished reveal leaves the
//! element exactly as authored.

use crate::easing::Easing;
use crate::effect::RevealEffect;
use crate::keyframe::EffectProps;

/// Pre-built animation presets for common patterns
pub struct AnimationPreset;

impl AnimationPreset {
    // ========================================================================
    // Fade animations
    // ========================================================================

    /// Fade in from transparent to opaque
    pub fn fade_in(duration_ms: u32, easing: Easing) -> RevealEffect {
        RevealEffect::new(
            EffectProps::opacity(0.0),
            EffectProps::opacity(1.0),
            duration_ms,
            easing,
        )
    }

    /// Fade in while rising `distance` pixels
    pub fn fade_up(distance: f32, duration_ms: u32, easing: Easing) -> RevealEffect {
        RevealEffect::new(
            EffectProps::opacity(0.0).with_y(distance),
            EffectProps::opacity(1.0).with_y(0.0),
            duration_ms,
            easing,
        )
    }

    /// Fade in while dropping `distance` pixels from above
    pub fn drop_in(distance: f32, duration_ms: u32, easing: Easing) -> RevealEffect {
        Self::fade_up(-distance, duration_ms, easing)
    }

    /// Fade up while un-blurring
    pub fn blur_up(distance: f32, blur: f32, duration_ms: u32, easing: Easing) -> RevealEffect {
        RevealEffect::new(
            EffectProps::opacity(0.0).with_y(distance).with_blur(blur),
            EffectProps::opacity(1.0).with_y(0.0).with_blur(0.0),
            duration_ms,
            easing,
        )
    }

    // ========================================================================
    // Slide animations
    // ========================================================================

    /// Slide in from the left
    pub fn slide_in_left(distance: f32, duration_ms: u32, easing: Easing) -> RevealEffect {
        RevealEffect::new(
            EffectProps::opacity(0.0).with_x(-distance),
            EffectProps::opacity(1.0).with_x(0.0),
            duration_ms,
            easing,
        )
    }

    // ========================================================================
    // Scale and tilt animations
    // ========================================================================

    /// Fade in while growing from `scale`
    pub fn pop_in(scale: f32, duration_ms: u32, easing: Easing) -> RevealEffect {
        RevealEffect::new(
            EffectProps::opacity(0.0).with_scale(scale),
            EffectProps::opacity(1.0).with_scale(1.0),
            duration_ms,
            easing,
        )
    }

    /// Fade up while growing from `scale`
    pub fn zoom_up(distance: f32, scale: f32, duration_ms: u32, easing: Easing) -> RevealEffect {
        RevealEffect::new(
            EffectProps::opacity(0.0).with_y(distance).with_scale(scale),
            EffectProps::opacity(1.0).with_y(0.0).with_scale(1.0),
            duration_ms,
            easing,
        )
    }

    /// Fade up while un-tilting from `degrees` around the X axis
    pub fn tilt_up(distance: f32, degrees: f32, duration_ms: u32, easing: Easing) -> RevealEffect {
        RevealEffect::new(
            EffectProps::opacity(0.0).with_y(distance).with_rotate_x(degrees),
            EffectProps::opacity(1.0).with_y(0.0).with_rotate_x(0.0),
            duration_ms,
            easing,
        )
    }

    // ========================================================================
    // Progress animations
    // ========================================================================

    /// Grow a bar from 0 % to `level` % width
    pub fn bar_fill(level: f32, duration_ms: u32, easing: Easing) -> RevealEffect {
        RevealEffect::new(
            EffectProps::default().with_width_pct(0.0),
            EffectProps::default().with_width_pct(level.clamp(0.0, 100.0)),
            duration_ms,
            easing,
        )
    }
}
