//! Kinesis Animation System
//!
//! Entrance effects, counters, timeline orchestration and ambient particles.
//!
//! # Features
//!
//! - **Easing**: classic ease families plus web-style names (`"power3.out"`)
//! - **Reveal effects**: sparse property deltas with delay and stagger
//! - **Counters**: monotonic integer count-ups that land exactly on target
//! - **Timelines**: mount-time sequences with overlaps and absolute offsets
//! - **Particles**: interval-driven drifting glyphs that clean up after themselves

pub mod counter;
pub mod easing;
pub mod effect;
pub mod keyframe;
pub mod particles;
pub mod presets;
pub mod scheduler;
pub mod timeline;

pub use counter::{CountAnimation, CountCallback, CounterState};
pub use easing::{Easing, ParseEasingError};
pub use effect::{CounterSpec, RevealEffect, Stagger};
pub use keyframe::{EffectProps, Style, Tween};
pub use particles::{
    AmbientParticleEmitter, ParticleConfig, ParticleFrame, ParticleId, ParticleInstance,
    ParticleTick, Span,
};
pub use presets::AnimationPreset;
pub use scheduler::{AnimationScheduler, CounterId, FrameReport, TweenId};
pub use timeline::{Position, Timeline};
