//! Page shell
//!
//! [`Page`] is the page root. It owns the theme store, the reveal
//! controller, the particle emitter and the layout, mounts every section
//! under its own reveal scope, and routes page events:
//!
//! | event          | effect                                              |
//! |----------------|-----------------------------------------------------|
//! | `MOUNT`        | lay out, register every section, start particles    |
//! | `SCROLL`       | update the nav flag, run the reveal observer pass   |
//! | `RESIZE`       | re-layout, move the particle container, re-evaluate |
//! | `FRAME`        | advance tweens, counters, particles, palette fade   |
//! | `TOGGLE_THEME` | flip and persist the preference, cross-fade palette |
//! | `NAVIGATE`     | resolve an anchor to a scroll target, close menu    |
//! | `UNMOUNT`      | dispose every scope, stop particles                 |

use crate::config::SiteConfig;
use crate::content::{Portfolio, SkillFilter};
use crate::elements::{self, SectionId};
use crate::error::{AppError, Result};
use crate::layout::PageLayout;
use crate::nav::NavState;
use crate::sections::{experience_tab_effect, plan_section};
use kinesis_animation::{AmbientParticleEmitter, CounterState, Style};
use kinesis_core::events::event_types;
use kinesis_core::{ElementId, Event, EventData};
use kinesis_reveal::{Fired, RevealController, RevealHandle, ScopeId, Viewport};
use kinesis_theme::{
    detect_system_color_scheme, ColorTokens, MemoryStorage, Subscription, ThemePreference,
    ThemeStore, ThemeTransition,
};
use smallvec::SmallVec;

/// What handling one event did
#[derive(Debug, Default)]
pub struct EventOutcome {
    /// Reveals that fired, in registration order
    pub fired: Vec<Fired>,
    /// Scroll offset the host should move to
    pub scroll_to: Option<f32>,
    /// New theme after a toggle
    pub theme: Option<ThemePreference>,
    pub particles_spawned: usize,
    pub particles_removed: usize,
}

/// Open the configured theme store, falling back to memory when the
/// configured storage cannot be opened
pub fn open_theme_store(config: &SiteConfig) -> ThemeStore {
    let system = detect_system_color_scheme();
    match config.theme.open_storage() {
        Ok(storage) => ThemeStore::init(storage, config.theme.key.clone(), system),
        Err(err) => {
            tracing::warn!(error = %err, "preference storage unavailable, keeping theme in memory");
            ThemeStore::init(Box::new(MemoryStorage::new()), config.theme.key.clone(), system)
        }
    }
}

/// The portfolio page
pub struct Page {
    config: SiteConfig,
    portfolio: Portfolio,
    theme: ThemeStore,
    palette: ThemeTransition,
    controller: RevealController,
    particles: AmbientParticleEmitter,
    viewport: Viewport,
    layout: PageLayout,
    nav: NavState,
    scopes: SmallVec<[(SectionId, ScopeId); 9]>,
    filter: SkillFilter,
    active_experience: String,
    /// Entrance replay of the experience panel for the current tab
    tab_replay: Option<RevealHandle>,
    mounted: bool,
}

impl Page {
    pub fn new(config: SiteConfig, portfolio: Portfolio, theme: ThemeStore) -> Self {
        let viewport = Viewport::new(config.viewport.width, config.viewport.height);
        let filter = SkillFilter::All;
        let layout = PageLayout::compute(
            &portfolio,
            &filter,
            &config.layout,
            viewport.width,
            viewport.height,
        );
        let active_experience = portfolio
            .experiences
            .first()
            .map(|e| e.id.clone())
            .unwrap_or_default();

        Self {
            palette: ThemeTransition::settled(ColorTokens::for_preference(theme.get())),
            particles: AmbientParticleEmitter::new(config.particles.clone()),
            nav: NavState::new(config.nav.scrolled_threshold),
            controller: RevealController::new(),
            scopes: SmallVec::new(),
            tab_replay: None,
            mounted: false,
            config,
            portfolio,
            theme,
            viewport,
            layout,
            filter,
            active_experience,
        }
    }

    /// Seed the particle emitter for reproducible runs. Call before mounting.
    pub fn with_particle_seed(mut self, seed: u64) -> Self {
        self.particles = AmbientParticleEmitter::with_seed(self.config.particles.clone(), seed);
        self
    }

    // ========== Lifecycle ==========

    /// Register every section and start the hero particles. Elements already
    /// past their threshold fire straight away.
    pub fn mount(&mut self) -> Vec<Fired> {
        if self.mounted {
            return Vec::new();
        }
        self.mounted = true;
        self.relayout();

        for section in SectionId::ALL {
            let scope = self.controller.create_scope(section.name());
            self.scopes.push((section, scope));
            self.register_section(section, scope);
        }

        self.particles.start(
            self.layout.hero(),
            self.portfolio.particles.glyphs.clone(),
            self.config.particles.spawn_interval_ms,
        );

        tracing::debug!(
            registrations = self.controller.registration_count(),
            content_height = self.layout.content_height(),
            theme = %self.theme.get(),
            "page mounted"
        );
        self.evaluate()
    }

    /// Tear down every section scope and stop spawning particles
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.controller.dispose_all();
        self.scopes.clear();
        self.tab_replay = None;
        self.particles.stop();
        tracing::debug!(fired = self.controller.fired_total(), "page unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn register_section(&mut self, section: SectionId, scope: ScopeId) {
        let plan = plan_section(section, &self.portfolio, &self.filter);
        for reveal in plan.reveals {
            self.controller
                .register(scope, reveal.element, reveal.trigger, reveal.effect);
        }
        for (element, effect) in plan.on_mount {
            self.controller.play_now(scope, element, effect);
        }
    }

    fn relayout(&mut self) {
        self.layout = PageLayout::compute(
            &self.portfolio,
            &self.filter,
            &self.config.layout,
            self.viewport.width,
            self.viewport.height,
        );
        let content_height = self.layout.content_height();
        self.viewport.scroll_to(self.viewport.scroll_y, content_height);
        self.particles.set_container(self.layout.hero());
    }

    fn evaluate(&mut self) -> Vec<Fired> {
        self.controller.evaluate(&self.layout, &self.viewport)
    }

    // ========== Events ==========

    pub fn handle_event(&mut self, event: &Event) -> EventOutcome {
        let mut outcome = EventOutcome::default();

        match (event.event_type, &event.data) {
            (event_types::MOUNT, _) => outcome.fired = self.mount(),
            (event_types::UNMOUNT, _) => self.unmount(),
            (event_types::SCROLL, EventData::Scroll { scroll_y }) => {
                outcome.fired = self.scroll_to(*scroll_y);
            }
            (event_types::RESIZE, EventData::Resize { width, height }) => {
                outcome.fired = self.resize(*width, *height);
            }
            (event_types::FRAME, EventData::Frame { dt_ms }) => {
                let (spawned, removed) = self.tick(*dt_ms);
                outcome.particles_spawned = spawned;
                outcome.particles_removed = removed;
            }
            (event_types::TOGGLE_THEME, _) => outcome.theme = Some(self.toggle_theme()),
            (event_types::NAVIGATE, EventData::Navigate { anchor }) => {
                match self.navigate(anchor) {
                    Ok(target) => outcome.scroll_to = Some(target),
                    Err(err) => tracing::warn!(error = %err, "navigation ignored"),
                }
            }
            (event_type, data) => {
                tracing::trace!(event_type, ?data, "unhandled page event");
            }
        }
        outcome
    }

    /// Scroll to an absolute offset (clamped) and run the observer pass
    pub fn scroll_to(&mut self, scroll_y: f32) -> Vec<Fired> {
        self.viewport
            .scroll_to(scroll_y, self.layout.content_height());
        self.nav.on_scroll(self.viewport.scroll_y);
        self.evaluate()
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Vec<Fired> {
        if width <= 0.0 || height <= 0.0 {
            tracing::warn!(width, height, "ignoring degenerate resize");
            return Vec::new();
        }
        self.viewport.resize(width, height);
        self.relayout();
        self.evaluate()
    }

    /// Advance every animation by `dt_ms`. Returns particles spawned and
    /// removed during the frame.
    pub fn tick(&mut self, dt_ms: f32) -> (usize, usize) {
        self.controller.tick(dt_ms);
        self.palette.tick(dt_ms);
        let particles = self.particles.tick(dt_ms);
        tracing::trace!(
            dt_ms,
            live_particles = self.particles.len(),
            "frame"
        );
        (particles.spawned.len(), particles.removed.len())
    }

    /// Resolve a section anchor to the (clamped) offset to scroll to
    pub fn navigate(&mut self, anchor: &str) -> Result<f32> {
        let target = self.nav.navigate(anchor, &self.layout)?;
        Ok(target.min(self.viewport.max_scroll(self.layout.content_height())))
    }

    // ========== Theme ==========

    /// Flip the theme; the palette cross-fades to the new tokens
    pub fn toggle_theme(&mut self) -> ThemePreference {
        let preference = self.theme.toggle();
        self.palette.retarget(
            ColorTokens::for_preference(preference),
            ThemeTransition::DEFAULT_DURATION_MS,
        );
        preference
    }

    pub fn set_theme(&mut self, preference: ThemePreference) {
        if self.theme.set(preference) {
            self.palette.retarget(
                ColorTokens::for_preference(preference),
                ThemeTransition::DEFAULT_DURATION_MS,
            );
        }
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme.get()
    }

    pub fn subscribe_theme<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(ThemePreference) + 'static,
    {
        self.theme.subscribe(callback)
    }

    pub fn unsubscribe_theme(&mut self, subscription: Subscription) -> bool {
        self.theme.unsubscribe(subscription)
    }

    /// Palette currently on screen, mid-fade after a toggle
    pub fn palette(&self) -> ColorTokens {
        self.palette.current()
    }

    // ========== Interactive sections ==========

    /// Filter the skills grid. The skills section is re-registered from
    /// scratch, so the filtered skills reveal again.
    pub fn select_category(&mut self, label: &str) -> Result<Vec<Fired>> {
        let filter = self.portfolio.skill_filter(label)?;
        if filter == self.filter {
            return Ok(Vec::new());
        }
        tracing::debug!(filter = filter.label(), "skills filter changed");
        self.filter = filter;
        self.relayout();

        let Some(index) = self.scopes.iter().position(|(s, _)| *s == SectionId::Skills) else {
            return Ok(Vec::new());
        };
        let old = self.scopes[index].1;
        self.controller.dispose_scope(old);
        let scope = self.controller.create_scope(SectionId::Skills.name());
        self.scopes[index].1 = scope;
        self.register_section(SectionId::Skills, scope);
        Ok(self.evaluate())
    }

    /// Switch the experience tab and replay the panel's entrance
    pub fn select_experience(&mut self, id: &str) -> Result<()> {
        if self.portfolio.experience(id).is_none() {
            return Err(AppError::UnknownExperience(id.to_string()));
        }
        if id == self.active_experience {
            return Ok(());
        }
        self.active_experience = id.to_string();

        if let Some(previous) = self.tab_replay.take() {
            self.controller.dispose(previous);
        }
        if let Some(scope) = self.scope(SectionId::Experience) {
            self.tab_replay = Some(self.controller.play_now(
                scope,
                elements::experience_content(),
                experience_tab_effect(),
            ));
        }
        Ok(())
    }

    // ========== Queries ==========

    pub fn style(&self, element: ElementId) -> Style {
        self.controller.style(element)
    }

    pub fn counter(&self, element: ElementId) -> Option<CounterState> {
        self.controller.counter_state(element)
    }

    /// About stats as currently displayed, e.g. `("Therapy Sessions", "1250+")`.
    /// Stats whose reveal has not fired show zero.
    pub fn stat_texts(&self) -> Vec<(&str, String)> {
        self.portfolio
            .about
            .stats
            .iter()
            .map(|stat| {
                let displayed = self
                    .counter(elements::about_stat(&stat.label))
                    .map(|c| c.displayed)
                    .unwrap_or(0);
                (stat.label.as_str(), stat.format(displayed))
            })
            .collect()
    }

    pub fn scope(&self, section: SectionId) -> Option<ScopeId> {
        self.scopes
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, scope)| *scope)
    }

    pub fn is_nav_scrolled(&self) -> bool {
        self.nav.is_scrolled()
    }

    pub fn nav_mut(&mut self) -> &mut NavState {
        &mut self.nav
    }

    pub fn skill_filter(&self) -> &SkillFilter {
        &self.filter
    }

    pub fn active_experience(&self) -> &str {
        &self.active_experience
    }

    /// Whether any reveal, counter, particle or palette fade is still moving
    pub fn is_animating(&self) -> bool {
        self.controller.has_active_animations() || !self.particles.is_empty() || !self.palette.is_done()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn controller(&self) -> &RevealController {
        &self.controller
    }

    pub fn particles(&self) -> &AmbientParticleEmitter {
        &self.particles
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("mounted", &self.mounted)
            .field("theme", &self.theme.get())
            .field("viewport", &self.viewport)
            .field("registrations", &self.controller.registration_count())
            .field("particles", &self.particles.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        let portfolio = Portfolio::embedded().unwrap();
        Page::new(SiteConfig::default(), portfolio, ThemeStore::in_memory(None))
            .with_particle_seed(7)
    }

    #[test]
    fn mount_plays_nav_and_hero_and_fires_nothing_below_the_fold() {
        let mut page = page();
        let fired = page.mount();
        assert!(fired.is_empty(), "{fired:?}");

        // timelines start from their initial state
        assert_eq!(page.style(elements::hero_headline()).opacity, 0.0);
        assert_eq!(page.style(elements::hero_headline()).blur, 10.0);
        page.tick(2500.0);
        assert_eq!(page.style(elements::hero_headline()), Style::default());
        assert_eq!(page.style(elements::nav_logo()), Style::default());

        assert!(page.particles().is_running());
        assert!(page.mount().is_empty());
    }

    #[test]
    fn events_route_to_the_right_subsystem() {
        let mut page = page();
        page.handle_event(&Event::signal(event_types::MOUNT, 0));

        let outcome = page.handle_event(&Event::scroll(120.0, 16));
        assert!(page.is_nav_scrolled());
        assert!(outcome.theme.is_none());

        let outcome = page.handle_event(&Event::signal(event_types::TOGGLE_THEME, 32));
        assert_eq!(outcome.theme, Some(ThemePreference::Dark));

        let outcome = page.handle_event(&Event::navigate("#skills", 48));
        assert_eq!(outcome.scroll_to, page.layout().anchor_offset("#skills"));

        let outcome = page.handle_event(&Event::navigate("#missing", 64));
        assert!(outcome.scroll_to.is_none());

        let outcome = page.handle_event(&Event::frame(16.0, 80));
        assert!(outcome.particles_spawned >= 1);
    }

    #[test]
    fn theme_toggle_cross_fades_the_palette() {
        let mut page = page();
        assert_eq!(page.palette(), ColorTokens::light());
        page.toggle_theme();
        assert_eq!(page.palette(), ColorTokens::light());
        page.tick(ThemeTransition::DEFAULT_DURATION_MS as f32);
        assert_eq!(page.palette(), ColorTokens::dark());
    }

    #[test]
    fn experience_tabs_replay_the_panel() {
        let mut page = page();
        page.mount();
        page.tick(1000.0);
        let panel = elements::experience_content();
        assert_eq!(page.style(panel), Style::default());

        page.select_experience("al-hayat").unwrap();
        assert_eq!(page.active_experience(), "al-hayat");
        assert_eq!(page.style(panel).opacity, 0.0);
        assert_eq!(page.style(panel).translate_y, 20.0);
        page.tick(600.0);
        assert_eq!(page.style(panel), Style::default());

        assert!(matches!(
            page.select_experience("nowhere"),
            Err(AppError::UnknownExperience(_))
        ));
    }

    #[test]
    fn switching_tabs_keeps_one_replay_registered() {
        let mut page = page();
        page.mount();
        page.select_experience("al-hayat").unwrap();
        page.tick(600.0);
        let registrations = page.controller().registration_count();

        for i in 0..100 {
            let id = if i % 2 == 0 { "al-jaleel" } else { "al-hayat" };
            page.select_experience(id).unwrap();
            page.tick(600.0);
        }
        assert_eq!(page.controller().registration_count(), registrations);
        assert_eq!(page.style(elements::experience_content()), Style::default());

        // mid-switch the newest replay still owns the panel style
        page.select_experience("al-jaleel").unwrap();
        assert_eq!(page.style(elements::experience_content()).opacity, 0.0);
    }

    #[test]
    fn unmount_stops_everything() {
        let mut page = page();
        page.mount();
        page.tick(500.0);
        page.unmount();

        assert_eq!(page.controller().registration_count(), 0);
        assert_eq!(page.controller().observer_count(), 0);
        assert!(!page.particles().is_running());
        assert!(page.scope(SectionId::About).is_none());
    }
}
