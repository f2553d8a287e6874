//! `kinesis simulate`

use anyhow::{Context, Result};
use clap::Args;
use kinesis_app::{
    open_theme_store, FrameSummary, Page, Portfolio, ScrollSimulation, SimulationConfig,
    SimulationReport,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Site config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Portfolio content file replacing the built-in one
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Seed for the particle emitter
    #[arg(long)]
    pub seed: Option<u64>,

    /// Scroll speed in px per second
    #[arg(long, default_value = "1200")]
    pub speed: f32,

    /// Simulated frames per second
    #[arg(long, default_value = "60")]
    pub fps: u32,

    /// Viewport width, overriding the config
    #[arg(long)]
    pub width: Option<f32>,

    /// Viewport height, overriding the config
    #[arg(long)]
    pub height: Option<f32>,

    /// Skills category to filter by after mounting
    #[arg(long)]
    pub category: Option<String>,

    /// Pace frames in real time instead of running as fast as possible
    #[arg(long)]
    pub realtime: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: SimulateArgs) -> Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be > 0");
    }

    let mut config = crate::load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.viewport.width = width;
    }
    if let Some(height) = args.height {
        config.viewport.height = height;
    }
    config.validate().context("Invalid viewport")?;

    let portfolio = match &args.content {
        Some(path) => Portfolio::load(path)
            .with_context(|| format!("Failed to load content {}", path.display()))?,
        None => Portfolio::embedded().context("Built-in content is invalid")?,
    };

    let theme = open_theme_store(&config);
    let mut page = Page::new(config, portfolio, theme);
    if let Some(seed) = args.seed {
        page = page.with_particle_seed(seed);
    }

    let sim_config = SimulationConfig {
        scroll_speed: args.speed,
        frame_ms: (1000 / args.fps).max(1),
        category: args.category.clone(),
        ..SimulationConfig::default()
    };
    let frame_ms = sim_config.frame_ms;
    let mut sim = ScrollSimulation::new(page, sim_config).context("Invalid simulation")?;

    tracing::info!(
        speed = args.speed,
        frame_ms,
        realtime = args.realtime,
        "starting scroll simulation"
    );
    sim.start().context("Failed to mount page")?;

    if args.realtime {
        let mut interval = tokio::time::interval(Duration::from_millis(u64::from(frame_ms)));
        loop {
            interval.tick().await;
            match sim.step() {
                Some(frame) => log_frame(&frame),
                None => break,
            }
        }
    } else {
        while let Some(frame) = sim.step() {
            log_frame(&frame);
        }
    }

    let report = sim.finish();
    if args.json {
        report
            .write_json(&mut io::stdout().lock())
            .context("Failed to write report")?;
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn log_frame(frame: &FrameSummary) {
    tracing::trace!(
        frame = frame.frame,
        scroll_y = frame.scroll_y,
        fired = frame.fired.len(),
        particles = frame.particles_live,
        "frame"
    );
}

/// Distance the simulation could scroll; zero when the content fits the viewport
fn scrolled_px(report: &SimulationReport) -> f32 {
    (report.content_height - report.viewport_height).max(0.0)
}

fn print_summary(report: &SimulationReport) {
    println!(
        "Scrolled {:.0}px of {:.0}px content in {} frames ({} ms simulated)",
        scrolled_px(report),
        report.content_height,
        report.frames,
        report.elapsed_ms
    );
    println!(
        "Reveals: {} fired, {} still pending (skills filter: {})",
        report.reveals_fired, report.reveals_pending, report.skills_filter
    );
    for (section, count) in &report.reveals_by_section {
        println!("  {section:<14} {count}");
    }
    println!("Counters:");
    for counter in &report.counters {
        println!("  {:<22} {}", counter.label, counter.text);
    }
    println!(
        "Particles: {} spawned, {} removed",
        report.particles_spawned, report.particles_removed
    );
    println!("Theme: {}", report.theme);
}
