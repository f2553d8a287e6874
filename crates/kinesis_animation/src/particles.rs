//! Ambient particle emitter
//!
//! Spawns short-lived drifting glyphs inside a container: one every spawn
//! interval, plus an initial staggered burst. Each particle rises, drifts,
//! spins and fades out, then is removed on the first tick after its
//! animation completes.

use std::collections::VecDeque;

use kinesis_core::Rect;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::easing::Easing;

new_key_type! {
    pub struct ParticleId;
}

/// An inclusive `[min, max]` range sampled uniformly
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        if lo == hi {
            return lo;
        }
        rng.gen_range(lo..=hi)
    }
}

/// Tunables for the emitter, loadable from the `[particles]` config table
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub spawn_interval_ms: u32,
    pub burst_count: u32,
    pub burst_stagger_ms: u32,
    /// Font size in px
    pub size: Span,
    /// Upward travel in px
    pub rise: Span,
    /// Horizontal drift in px
    pub drift: Span,
    /// End rotation in degrees
    pub rotation: Span,
    /// End scale
    pub scale: Span,
    pub duration_ms: Span,
    pub easing: Easing,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 400,
            burst_count: 15,
            burst_stagger_ms: 100,
            size: Span::new(25.0, 60.0),
            rise: Span::new(100.0, 300.0),
            drift: Span::new(-50.0, 50.0),
            rotation: Span::new(-180.0, 180.0),
            scale: Span::new(0.5, 1.0),
            duration_ms: Span::new(4000.0, 7000.0),
            easing: Easing::POWER1_OUT,
        }
    }
}

/// One drifting glyph
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleInstance {
    pub glyph: String,
    /// Horizontal position within the container, 0-100 %
    pub x_pct: f32,
    /// Vertical position within the container, 0-100 %
    pub y_pct: f32,
    pub size: f32,
    pub rise: f32,
    pub drift: f32,
    pub rotation: f32,
    pub end_scale: f32,
    pub duration_ms: f32,
    easing: Easing,
    age_ms: f32,
}

/// Where a particle is drawn at its current age
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleFrame {
    /// Absolute position of the spawn point
    pub x: f32,
    pub y: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl ParticleInstance {
    pub fn age_ms(&self) -> f32 {
        self.age_ms
    }

    pub fn is_complete(&self) -> bool {
        self.age_ms >= self.duration_ms
    }

    /// Linear progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.age_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Resolve the particle's transform inside `container`
    pub fn frame(&self, container: Rect) -> ParticleFrame {
        let t = self.easing.apply(self.progress());
        ParticleFrame {
            x: container.x() + container.width() * self.x_pct / 100.0,
            y: container.y() + container.height() * self.y_pct / 100.0,
            offset_x: self.drift * t,
            offset_y: -self.rise * t,
            rotation: self.rotation * t,
            scale: 1.0 + (self.end_scale - 1.0) * t,
            opacity: (1.0 - t).clamp(0.0, 1.0),
        }
    }
}

/// Particles spawned and removed during one tick
#[derive(Debug, Default)]
pub struct ParticleTick {
    pub spawned: SmallVec<[ParticleId; 4]>,
    pub removed: SmallVec<[ParticleId; 4]>,
}

/// Continuously spawns particles while running
pub struct AmbientParticleEmitter {
    config: ParticleConfig,
    rng: StdRng,
    container: Rect,
    glyphs: Vec<String>,
    interval_ms: u32,
    running: bool,
    /// Time since the emitter started
    clock_ms: f32,
    since_spawn_ms: f32,
    /// Pending burst spawns, as offsets from start
    burst: VecDeque<u32>,
    particles: SlotMap<ParticleId, ParticleInstance>,
    spawned_total: u64,
    removed_total: u64,
}

impl AmbientParticleEmitter {
    pub fn new(config: ParticleConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic emitter for simulations and tests
    pub fn with_seed(config: ParticleConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: ParticleConfig, rng: StdRng) -> Self {
        Self {
            interval_ms: config.spawn_interval_ms,
            config,
            rng,
            container: Rect::default(),
            glyphs: Vec::new(),
            running: false,
            clock_ms: 0.0,
            since_spawn_ms: 0.0,
            burst: VecDeque::new(),
            particles: SlotMap::with_key(),
            spawned_total: 0,
            removed_total: 0,
        }
    }

    /// Begin spawning into `container`. Restarting resets the interval and
    /// schedules a fresh burst; live particles are kept.
    pub fn start(&mut self, container: Rect, glyphs: Vec<String>, spawn_interval_ms: u32) {
        self.container = container;
        self.glyphs = glyphs;
        self.interval_ms = spawn_interval_ms;
        self.running = true;
        self.clock_ms = 0.0;
        self.since_spawn_ms = 0.0;
        self.burst = (0..self.config.burst_count)
            .map(|i| i.saturating_mul(self.config.burst_stagger_ms))
            .collect();
        tracing::debug!(
            interval_ms = spawn_interval_ms,
            burst = self.burst.len(),
            glyphs = self.glyphs.len(),
            "particle emitter started"
        );
    }

    /// Halt future spawns, including burst entries not yet spawned.
    /// In-flight particles keep animating and remove themselves.
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!(live = self.particles.len(), "particle emitter stopped");
        }
        self.running = false;
        self.burst.clear();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Move the container, e.g. after a resize
    pub fn set_container(&mut self, container: Rect) {
        self.container = container;
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    pub fn tick(&mut self, dt_ms: f32) -> ParticleTick {
        let dt_ms = dt_ms.max(0.0);
        let mut tick = ParticleTick::default();

        for (_, particle) in self.particles.iter_mut() {
            particle.age_ms += dt_ms;
        }
        let finished: SmallVec<[ParticleId; 4]> = self
            .particles
            .iter()
            .filter(|(_, p)| p.is_complete())
            .map(|(id, _)| id)
            .collect();
        for id in finished {
            if self.particles.remove(id).is_some() {
                self.removed_total += 1;
                tick.removed.push(id);
            }
        }

        if !self.running {
            return tick;
        }

        self.clock_ms += dt_ms;
        while let Some(offset) = self.burst.front().copied() {
            if offset as f32 > self.clock_ms {
                break;
            }
            self.burst.pop_front();
            if let Some(id) = self.spawn() {
                tick.spawned.push(id);
            }
        }

        if self.interval_ms > 0 {
            self.since_spawn_ms += dt_ms;
            while self.since_spawn_ms >= self.interval_ms as f32 {
                self.since_spawn_ms -= self.interval_ms as f32;
                if let Some(id) = self.spawn() {
                    tick.spawned.push(id);
                }
            }
        }

        if !tick.spawned.is_empty() || !tick.removed.is_empty() {
            tracing::trace!(
                spawned = tick.spawned.len(),
                removed = tick.removed.len(),
                live = self.particles.len(),
                "particles"
            );
        }
        tick
    }

    fn spawn(&mut self) -> Option<ParticleId> {
        if self.glyphs.is_empty() {
            return None;
        }
        let glyph = self.glyphs[self.rng.gen_range(0..self.glyphs.len())].clone();
        let config = &self.config;
        let rng = &mut self.rng;
        let particle = ParticleInstance {
            glyph,
            x_pct: Span::new(0.0, 100.0).sample(rng),
            y_pct: Span::new(0.0, 100.0).sample(rng),
            size: config.size.sample(rng),
            rise: config.rise.sample(rng),
            drift: config.drift.sample(rng),
            rotation: config.rotation.sample(rng),
            end_scale: config.scale.sample(rng),
            duration_ms: config.duration_ms.sample(rng).max(0.0),
            easing: config.easing,
            age_ms: 0.0,
        };
        self.spawned_total += 1;
        Some(self.particles.insert(particle))
    }

    pub fn particles(&self) -> impl Iterator<Item = (ParticleId, &ParticleInstance)> {
        self.particles.iter()
    }

    pub fn particle(&self, id: ParticleId) -> Option<&ParticleInstance> {
        self.particles.get(id)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    pub fn removed_total(&self) -> u64 {
        self.removed_total
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn glyphs() -> Vec<String> {
        ["🩺", "💪", "⭐"].iter().map(|g| g.to_string()).collect()
    }

    fn started(seed: u64) -> AmbientParticleEmitter {
        let mut emitter = AmbientParticleEmitter::with_seed(ParticleConfig::default(), seed);
        emitter.start(Rect::new(0.0, 0.0, 1280.0, 800.0), glyphs(), 400);
        emitter
    }

    #[test]
    fn burst_is_staggered_then_interval_takes_over() {
        let mut emitter = started(7);
        assert_eq!(emitter.tick(0.0).spawned.len(), 1);
        // burst entries at 100..=1400 plus interval spawns at 400, 800, 1200
        let mut spawned = 1;
        for _ in 0..14 {
            spawned += emitter.tick(100.0).spawned.len();
        }
        assert_eq!(spawned, 15 + 3);
        assert_eq!(emitter.spawned_total(), 18);
    }

    #[test]
    fn sampled_particles_stay_in_configured_ranges() {
        let mut emitter = started(42);
        emitter.tick(1500.0);
        let config = ParticleConfig::default();
        for (_, p) in emitter.particles() {
            assert!(glyphs().contains(&p.glyph));
            assert!((0.0..=100.0).contains(&p.x_pct));
            assert!((0.0..=100.0).contains(&p.y_pct));
            assert!(p.size >= config.size.min && p.size <= config.size.max);
            assert!(p.drift >= -50.0 && p.drift <= 50.0);
            assert!(p.duration_ms >= 4000.0 && p.duration_ms <= 7000.0);
        }
    }

    #[test]
    fn stop_halts_spawning_and_particles_still_expire() {
        let mut emitter = started(3);
        emitter.tick(500.0);
        let live = emitter.len();
        assert!(live > 0);

        emitter.stop();
        let mut removed = 0;
        for _ in 0..100 {
            let tick = emitter.tick(100.0);
            assert!(tick.spawned.is_empty());
            removed += tick.removed.len();
        }
        assert_eq!(removed, live);
        assert!(emitter.is_empty());
    }

    #[test]
    fn each_particle_is_removed_exactly_once() {
        let mut emitter = started(11);
        let mut spawned = FxHashSet::default();
        let mut removed = FxHashSet::default();
        for step in 0..300 {
            if step == 150 {
                emitter.stop();
            }
            let tick = emitter.tick(50.0);
            spawned.extend(tick.spawned);
            for id in tick.removed {
                assert!(removed.insert(id), "removed twice");
                assert!(spawned.contains(&id));
            }
        }
        assert_eq!(spawned, removed);
        assert_eq!(emitter.spawned_total(), emitter.removed_total());
    }

    #[test]
    fn frame_fades_out_and_rises() {
        let mut emitter = started(5);
        let id = emitter.tick(0.0).spawned[0];
        let container = emitter.container();
        let start = emitter.particle(id).map(|p| p.frame(container));
        assert_eq!(start.map(|f| f.opacity), Some(1.0));

        emitter.stop();
        emitter.tick(3000.0);
        let mid = emitter.particle(id).map(|p| p.frame(container));
        let mid = mid.expect("still animating at 3s");
        assert!(mid.opacity < 1.0 && mid.opacity > 0.0);
        assert!(mid.offset_y < 0.0);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: ParticleConfig = toml::from_str(
            r#"
            spawn_interval_ms = 250
            easing = "power2.out"
            size = { min = 10.0, max = 20.0 }
            "#,
        )
        .unwrap();
        assert_eq!(config.spawn_interval_ms, 250);
        assert_eq!(config.easing, Easing::POWER2_OUT);
        assert_eq!(config.size, Span::new(10.0, 20.0));
        assert_eq!(config.burst_count, 15);
    }
}
