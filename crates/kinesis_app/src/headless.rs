//! Headless scroll simulation
//!
//! Mounts a [`Page`], scrolls it from top to bottom at a fixed speed on a
//! virtual frame clock and reports what fired. [`ScrollSimulation::step`]
//! advances one frame, so a caller can drive it from a real timer instead.

use crate::error::{AppError, Result};
use crate::page::Page;
use kinesis_core::events::event_types;
use kinesis_core::{ElementId, Event};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Configuration for a simulated scroll-through
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Scroll speed in px per second
    pub scroll_speed: f32,
    /// Logical milliseconds between frames
    pub frame_ms: u32,
    /// Hard cap on frames, including the settle phase at the bottom
    pub max_frames: u32,
    /// Skills filter applied right after mounting
    pub category: Option<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            scroll_speed: 1200.0,
            frame_ms: 16,
            max_frames: 10_000,
            category: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.scroll_speed.is_nan() || self.scroll_speed <= 0.0 {
            return Err(AppError::InvalidConfig("scroll speed must be > 0".into()));
        }
        if self.frame_ms == 0 {
            return Err(AppError::InvalidConfig("frame_ms must be > 0".into()));
        }
        if self.max_frames == 0 {
            return Err(AppError::InvalidConfig("max_frames must be > 0".into()));
        }
        Ok(())
    }
}

/// A reveal that fired during the run
#[derive(Debug, Clone, Serialize)]
pub struct RevealRecord {
    pub frame: u32,
    pub elapsed_ms: u64,
    pub scroll_y: f32,
    pub section: String,
    #[serde(serialize_with = "serialize_element")]
    pub element: ElementId,
}

fn serialize_element<S>(id: &ElementId, s: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&format!("{:016x}", id.0))
}

/// One simulated frame
#[derive(Debug, Clone)]
pub struct FrameSummary {
    pub frame: u32,
    pub elapsed_ms: u64,
    pub scroll_y: f32,
    pub fired: Vec<RevealRecord>,
    pub particles_live: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CounterReport {
    pub label: String,
    pub text: String,
}

/// Machine-readable result of a simulation
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub frames: u32,
    pub elapsed_ms: u64,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub content_height: f32,
    pub reached_bottom: bool,
    pub skills_filter: String,
    pub theme: String,
    pub reveals_fired: u64,
    pub reveals_by_section: BTreeMap<String, u64>,
    /// Registrations still waiting for their threshold when the run ended
    pub reveals_pending: usize,
    pub counters: Vec<CounterReport>,
    pub particles_spawned: u64,
    pub particles_removed: u64,
    /// Observers left after the page unmounted; always 0 for a clean teardown
    pub observers_after_unmount: usize,
}

impl SimulationReport {
    pub fn write_json<W: Write>(&self, writer: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Deterministic scroll-through of a page
pub struct ScrollSimulation {
    page: Page,
    config: SimulationConfig,
    frame: u32,
    elapsed_ms: u64,
    started: bool,
    finished: bool,
    reached_bottom: bool,
    log: Vec<RevealRecord>,
}

impl ScrollSimulation {
    pub fn new(page: Page, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            page,
            config,
            frame: 0,
            elapsed_ms: 0,
            started: false,
            finished: false,
            reached_bottom: false,
            log: Vec::new(),
        })
    }

    /// Mount the page and apply the configured filter. Returns what fired
    /// on mount.
    pub fn start(&mut self) -> Result<Vec<RevealRecord>> {
        if self.started {
            return Ok(Vec::new());
        }
        self.started = true;

        let outcome = self
            .page
            .handle_event(&Event::signal(event_types::MOUNT, 0));
        // record before filtering, which replaces the skills scope
        let mut records = self.record(outcome.fired);
        if let Some(category) = self.config.category.clone() {
            let fired = self.page.select_category(&category)?;
            records.extend(self.record(fired));
        }
        Ok(records)
    }

    /// Advance one frame: tick animations, then scroll. `None` once the run
    /// is over.
    pub fn step(&mut self) -> Option<FrameSummary> {
        if !self.started || self.finished {
            return None;
        }
        if self.frame >= self.config.max_frames {
            tracing::warn!(frames = self.frame, "simulation hit its frame cap");
            self.finished = true;
            return None;
        }

        let dt = self.config.frame_ms;
        self.frame += 1;
        self.elapsed_ms += u64::from(dt);

        self.page.handle_event(&Event::frame(dt as f32, self.elapsed_ms));

        let max_scroll = self
            .page
            .viewport()
            .max_scroll(self.page.layout().content_height());
        let step = self.config.scroll_speed * dt as f32 / 1000.0;
        let target = (self.page.viewport().scroll_y + step).min(max_scroll);
        let outcome = self.page.handle_event(&Event::scroll(target, self.elapsed_ms));
        let fired = self.record(outcome.fired);

        if self.page.viewport().scroll_y >= max_scroll {
            self.reached_bottom = true;
        }
        let controller = self.page.controller();
        if self.reached_bottom
            && controller.observer_count() == 0
            && !controller.has_active_animations()
        {
            self.finished = true;
        }

        Some(FrameSummary {
            frame: self.frame,
            elapsed_ms: self.elapsed_ms,
            scroll_y: self.page.viewport().scroll_y,
            fired,
            particles_live: self.page.particles().len(),
        })
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run to completion on the virtual clock
    pub fn run<F>(mut self, mut on_frame: F) -> Result<SimulationReport>
    where
        F: FnMut(&FrameSummary),
    {
        self.start()?;
        while let Some(summary) = self.step() {
            on_frame(&summary);
        }
        Ok(self.finish())
    }

    /// Summarize, then unmount the page
    pub fn finish(mut self) -> SimulationReport {
        let mut reveals_by_section = BTreeMap::new();
        for record in &self.log {
            *reveals_by_section.entry(record.section.clone()).or_insert(0) += 1;
        }
        let counters = self
            .page
            .stat_texts()
            .into_iter()
            .map(|(label, text)| CounterReport {
                label: label.to_string(),
                text,
            })
            .collect();

        let viewport = *self.page.viewport();
        let reveals_pending = self.page.controller().observer_count();
        let skills_filter = self.page.skill_filter().label().to_string();
        let theme = self.page.theme().to_string();
        let content_height = self.page.layout().content_height();

        self.page
            .handle_event(&Event::signal(event_types::UNMOUNT, self.elapsed_ms));

        let particles = self.page.particles();
        let report = SimulationReport {
            frames: self.frame,
            elapsed_ms: self.elapsed_ms,
            viewport_width: viewport.width,
            viewport_height: viewport.height,
            content_height,
            reached_bottom: self.reached_bottom,
            skills_filter,
            theme,
            reveals_fired: self.log.len() as u64,
            reveals_by_section,
            reveals_pending,
            counters,
            particles_spawned: particles.spawned_total(),
            particles_removed: particles.removed_total(),
            observers_after_unmount: self.page.controller().observer_count(),
        };
        tracing::info!(
            frames = report.frames,
            fired = report.reveals_fired,
            pending = report.reveals_pending,
            "simulation finished"
        );
        report
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn log(&self) -> &[RevealRecord] {
        &self.log
    }

    fn record(&mut self, fired: Vec<kinesis_reveal::Fired>) -> Vec<RevealRecord> {
        let records: Vec<RevealRecord> = fired
            .into_iter()
            .map(|f| RevealRecord {
                frame: self.frame,
                elapsed_ms: self.elapsed_ms,
                scroll_y: self.page.viewport().scroll_y,
                section: self
                    .page
                    .controller()
                    .scope_name(f.scope)
                    .unwrap_or("?")
                    .to_string(),
                element: f.element,
            })
            .collect();
        for record in &records {
            tracing::info!(
                frame = record.frame,
                scroll_y = record.scroll_y,
                section = %record.section,
                element = ?record.element,
                "reveal fired"
            );
        }
        self.log.extend(records.iter().cloned());
        records
    }
}
