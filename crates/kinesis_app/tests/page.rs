//! End-to-end tests for the portfolio page

use kinesis_app::{
    elements, open_theme_store, plan_section, Page, Portfolio, ScrollSimulation, SectionId,
    SimulationConfig, SiteConfig, SkillFilter, StorageBackend,
};
use kinesis_animation::Style;
use kinesis_core::events::event_types;
use kinesis_core::{Event, LayoutSource};
use kinesis_reveal::RevealHandle;
use kinesis_theme::{ThemeSource, ThemeStore};
use rustc_hash::FxHashSet;

fn page() -> Page {
    Page::new(
        SiteConfig::default(),
        Portfolio::embedded().unwrap(),
        ThemeStore::in_memory(None),
    )
    .with_particle_seed(42)
}

/// Scroll reveals the page registers with no filter applied
fn planned_reveals(portfolio: &Portfolio) -> usize {
    SectionId::ALL
        .iter()
        .map(|s| plan_section(*s, portfolio, &SkillFilter::All).reveals.len())
        .sum()
}

/// Scroll to the bottom in small steps, ticking between steps
fn scroll_through(page: &mut Page, step: f32) -> Vec<RevealHandle> {
    let mut handles = Vec::new();
    let mut y = 0.0;
    let bottom = page.viewport().max_scroll(page.layout().content_height());
    while y < bottom {
        y = (y + step).min(bottom);
        handles.extend(page.scroll_to(y).into_iter().map(|f| f.handle));
        page.tick(16.0);
    }
    handles
}

#[test]
fn every_reveal_fires_exactly_once_over_a_full_scroll() {
    let mut page = page();
    page.mount();
    let expected = planned_reveals(page.portfolio());

    let mut handles = scroll_through(&mut page, 100.0);
    // scrolling back up and down again fires nothing new
    handles.extend(page.scroll_to(0.0).into_iter().map(|f| f.handle));
    handles.extend(scroll_through(&mut page, 250.0));

    let unique: FxHashSet<RevealHandle> = handles.iter().copied().collect();
    assert_eq!(handles.len(), expected);
    assert_eq!(unique.len(), expected);
    assert_eq!(page.controller().observer_count(), 0);
}

#[test]
fn counters_climb_monotonically_and_land_on_target() {
    let mut page = page();
    page.mount();
    let about = page.layout().section(SectionId::About).unwrap();
    page.scroll_to(about.y());

    let mut last = vec![0u64; 4];
    for _ in 0..200 {
        page.tick(16.0);
        for (i, stat) in page.portfolio().about.stats.iter().enumerate() {
            let shown = page
                .counter(elements::about_stat(&stat.label))
                .map(|c| c.displayed)
                .unwrap_or(0);
            assert!(shown >= last[i], "{} went from {} to {shown}", stat.label, last[i]);
            last[i] = shown;
        }
    }

    let texts: Vec<String> = page.stat_texts().into_iter().map(|(_, t)| t).collect();
    assert_eq!(texts, vec!["4+", "2000+", "300+", "95%"]);
}

#[test]
fn filtering_skills_re_registers_only_the_filtered_list() {
    let mut page = page();
    page.mount();
    let old_scope = page.scope(SectionId::Skills).unwrap();
    assert_eq!(page.controller().active_observer_count(old_scope), 1 + 27 * 2);

    let fired = page.select_category("Treatment").unwrap();
    assert!(fired.is_empty());
    let scope = page.scope(SectionId::Skills).unwrap();
    assert_ne!(scope, old_scope);
    assert!(!page.controller().has_scope(old_scope));
    assert_eq!(page.controller().active_observer_count(scope), 1 + 6 * 2);

    // filtered-out skills are neither laid out nor styled
    let hidden = elements::skill_item("Trauma Care");
    assert!(page.layout().bounds(hidden).is_none());
    assert_eq!(page.style(hidden), Style::default());

    // same filter again is a no-op
    assert!(page.select_category("Treatment").unwrap().is_empty());
    assert_eq!(page.scope(SectionId::Skills), Some(scope));
}

#[test]
fn filtering_after_scrolling_past_replays_the_grid() {
    let mut page = page();
    page.mount();
    scroll_through(&mut page, 200.0);
    for _ in 0..300 {
        page.tick(16.0);
    }

    let fired = page.select_category("Modalities").unwrap();
    assert_eq!(fired.len(), 1 + 6 * 2);
    let scope = page.scope(SectionId::Skills).unwrap();
    assert!(fired.iter().all(|f| f.scope == scope));

    let bar = elements::skill_bar("Prosthetic Gait Training");
    assert_eq!(page.style(bar).width_pct, Some(0.0));
    for _ in 0..200 {
        page.tick(16.0);
    }
    assert_eq!(page.style(bar).width_pct, Some(96.0));
}

#[test]
fn resize_to_mobile_relayouts_and_keeps_reveals_once() {
    let mut page = page();
    page.mount();
    let desktop_height = page.layout().content_height();
    let mut handles = scroll_through(&mut page, 300.0);

    page.handle_event(&Event::resize(390.0, 844.0, 1000));
    assert!(page.layout().content_height() > desktop_height);
    assert_eq!(page.particles().container(), page.layout().hero());

    handles.extend(page.scroll_to(0.0).into_iter().map(|f| f.handle));
    handles.extend(scroll_through(&mut page, 300.0));
    let unique: FxHashSet<RevealHandle> = handles.iter().copied().collect();
    assert_eq!(unique.len(), handles.len());
    assert_eq!(handles.len(), planned_reveals(page.portfolio()));
}

#[test]
fn unmount_leaves_no_observers_and_particles_drain() {
    let mut page = page();
    page.mount();
    page.scroll_to(1500.0);
    page.tick(1000.0);
    assert!(!page.particles().is_empty());

    page.handle_event(&Event::signal(event_types::UNMOUNT, 2000));
    assert_eq!(page.controller().observer_count(), 0);
    assert_eq!(page.controller().registration_count(), 0);

    let spawned = page.particles().spawned_total();
    for _ in 0..100 {
        page.tick(100.0);
    }
    assert_eq!(page.particles().spawned_total(), spawned);
    assert!(page.particles().is_empty());
    assert_eq!(page.particles().removed_total(), spawned);
}

#[test]
fn theme_toggle_persists_across_page_loads() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = SiteConfig::default();
    config.theme.storage = StorageBackend::File;
    config.theme.path = Some(dir.path().join("preferences.json"));

    let mut page = Page::new(
        config.clone(),
        Portfolio::embedded().unwrap(),
        open_theme_store(&config),
    );
    let before = page.theme();
    let after = page.toggle_theme();
    assert_ne!(before, after);

    let reopened = open_theme_store(&config);
    assert_eq!(reopened.get(), after);
    assert_eq!(reopened.source(), ThemeSource::Persisted);
}

#[test]
fn simulation_reports_a_clean_run() {
    let portfolio = Portfolio::embedded().unwrap();
    let expected = planned_reveals(&portfolio) as u64;

    let mut frames = 0;
    let report = ScrollSimulation::new(page(), SimulationConfig::default())
        .unwrap()
        .run(|_| frames += 1)
        .unwrap();

    assert!(report.reached_bottom);
    assert_eq!(report.frames, frames);
    assert_eq!(report.reveals_fired, expected);
    assert_eq!(report.reveals_pending, 0);
    assert_eq!(report.reveals_by_section.get("about"), Some(&(1 + 3 + 4)));
    assert_eq!(report.reveals_by_section.get("footer"), Some(&1));
    assert_eq!(report.observers_after_unmount, 0);
    let texts: Vec<&str> = report.counters.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["4+", "2000+", "300+", "95%"]);
    assert!(report.particles_spawned >= 15);
}

#[test]
fn simulation_with_a_category_filter() {
    let config = SimulationConfig {
        category: Some("Assessment".into()),
        ..SimulationConfig::default()
    };
    let report = ScrollSimulation::new(page(), config)
        .unwrap()
        .run(|_| {})
        .unwrap();
    assert_eq!(report.skills_filter, "Assessment");
    assert_eq!(report.reveals_by_section.get("skills"), Some(&(1 + 7 * 2)));
}

#[test]
fn remount_starts_counters_from_zero() {
    let mut page = page();
    page.mount();
    scroll_through(&mut page, 200.0);
    for _ in 0..200 {
        page.tick(16.0);
    }
    let texts: Vec<String> = page.stat_texts().into_iter().map(|(_, t)| t).collect();
    assert_eq!(texts, vec!["4+", "2000+", "300+", "95%"]);

    page.unmount();
    page.scroll_to(0.0);
    page.mount();
    let texts: Vec<String> = page.stat_texts().into_iter().map(|(_, t)| t).collect();
    assert_eq!(texts, vec!["0+", "0+", "0+", "0%"]);
    for stat in &page.portfolio().about.stats {
        assert!(page.counter(elements::about_stat(&stat.label)).is_none());
    }

    // scrolling down again replays the count-up to the same targets
    scroll_through(&mut page, 200.0);
    for _ in 0..200 {
        page.tick(16.0);
    }
    let texts: Vec<String> = page.stat_texts().into_iter().map(|(_, t)| t).collect();
    assert_eq!(texts, vec!["4+", "2000+", "300+", "95%"]);
}
