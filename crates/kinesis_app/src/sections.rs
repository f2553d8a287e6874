//! Section reveal plans
//!
//! Each section is described as data: the scroll reveals it registers and
//! the effects it plays as soon as it mounts. The page shell hands both to
//! the reveal controller under the section's own scope.

use crate::content::{Portfolio, SkillFilter};
use crate::elements::{self, SectionId};
use kinesis_animation::{AnimationPreset, CounterSpec, Easing, Position, RevealEffect, Timeline};
use kinesis_core::ElementId;
use kinesis_reveal::RevealTrigger;

/// One scroll-triggered entrance
#[derive(Clone, Debug, PartialEq)]
pub struct Reveal {
    pub element: ElementId,
    pub trigger: RevealTrigger,
    pub effect: RevealEffect,
}

impl Reveal {
    pub fn new(element: ElementId, trigger: RevealTrigger, effect: RevealEffect) -> Self {
        Self {
            element,
            trigger,
            effect,
        }
    }
}

/// Everything a section animates
#[derive(Clone, Debug, PartialEq)]
pub struct SectionPlan {
    pub section: SectionId,
    pub reveals: Vec<Reveal>,
    /// Played immediately on mount, delays already resolved
    pub on_mount: Vec<(ElementId, RevealEffect)>,
}

impl SectionPlan {
    fn new(section: SectionId) -> Self {
        Self {
            section,
            reveals: Vec::new(),
            on_mount: Vec::new(),
        }
    }

    fn reveal(&mut self, element: ElementId, trigger: RevealTrigger, effect: RevealEffect) {
        self.reveals.push(Reveal::new(element, trigger, effect));
    }

    /// Every element the plan animates
    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.reveals
            .iter()
            .map(|r| r.element)
            .chain(self.on_mount.iter().map(|(e, _)| *e))
    }
}

/// Section headlines all rise in the same way
fn headline_reveal(plan: &mut SectionPlan) {
    plan.reveal(
        plan.section.headline(),
        RevealTrigger::top_at(0.8),
        AnimationPreset::fade_up(30.0, 800, Easing::POWER3_OUT),
    );
}

/// Build the plan for `section`. `filter` only affects the skills grid.
pub fn plan_section(section: SectionId, portfolio: &Portfolio, filter: &SkillFilter) -> SectionPlan {
    match section {
        SectionId::Nav => nav(portfolio),
        SectionId::Hero => hero(portfolio),
        SectionId::About => about(portfolio),
        SectionId::Skills => skills(portfolio, filter),
        SectionId::Experience => experience(),
        SectionId::Education => education(portfolio),
        SectionId::Certificates => certificates(portfolio),
        SectionId::Contact => contact(portfolio),
        SectionId::Footer => footer(),
    }
}

fn nav(portfolio: &Portfolio) -> SectionPlan {
    let links: Vec<ElementId> = portfolio
        .nav
        .iter()
        .map(|link| elements::nav_link(&link.label))
        .collect();

    let timeline = Timeline::new()
        .with_delay(200)
        .add(
            elements::nav_logo(),
            AnimationPreset::slide_in_left(20.0, 600, Easing::POWER3_OUT),
            Position::Sequential,
        )
        .add_staggered(
            &links,
            AnimationPreset::drop_in(10.0, 400, Easing::POWER2_OUT),
            50,
            Position::At(100),
        );

    let mut plan = SectionPlan::new(SectionId::Nav);
    plan.on_mount = timeline.into_effects();
    plan
}

fn hero(portfolio: &Portfolio) -> SectionPlan {
    let ctas: Vec<ElementId> = portfolio
        .hero
        .cta
        .iter()
        .map(|link| elements::hero_cta(&link.label))
        .collect();

    let timeline = Timeline::new()
        .with_delay(300)
        .add(
            elements::hero_headline(),
            AnimationPreset::blur_up(50.0, 10.0, 1000, Easing::POWER3_OUT),
            Position::Sequential,
        )
        .add(
            elements::hero_subtitle(),
            AnimationPreset::fade_up(20.0, 800, Easing::POWER2_OUT),
            Position::Overlap(500),
        )
        .add_staggered(
            &ctas,
            AnimationPreset::pop_in(0.8, 500, Easing::BACK_OUT),
            100,
            Position::Overlap(300),
        );

    let mut plan = SectionPlan::new(SectionId::Hero);
    plan.on_mount = timeline.into_effects();
    plan
}

fn about(portfolio: &Portfolio) -> SectionPlan {
    let mut plan = SectionPlan::new(SectionId::About);
    headline_reveal(&mut plan);

    for (i, highlight) in portfolio.about.highlights.iter().enumerate() {
        plan.reveal(
            elements::about_card(&highlight.title),
            RevealTrigger::top_at(0.85),
            AnimationPreset::tilt_up(50.0, 10.0, 800, Easing::POWER3_OUT).with_stagger(i, 150),
        );
    }

    for (i, stat) in portfolio.about.stats.iter().enumerate() {
        plan.reveal(
            elements::about_stat(&stat.label),
            RevealTrigger::top_at(0.85),
            AnimationPreset::pop_in(0.8, 600, Easing::BACK_OUT)
                .with_stagger(i, 100)
                .with_counter(CounterSpec::to(stat.value, 1500, Easing::POWER2_OUT)),
        );
    }
    plan
}

fn skills(portfolio: &Portfolio, filter: &SkillFilter) -> SectionPlan {
    let mut plan = SectionPlan::new(SectionId::Skills);
    headline_reveal(&mut plan);

    for (i, skill) in portfolio.filtered_skills(filter).enumerate() {
        plan.reveal(
            elements::skill_item(&skill.name),
            RevealTrigger::top_at(0.9),
            AnimationPreset::slide_in_left(30.0, 600, Easing::POWER2_OUT).with_stagger(i, 50),
        );
        plan.reveal(
            elements::skill_bar(&skill.name),
            RevealTrigger::top_at(0.9),
            AnimationPreset::bar_fill(f32::from(skill.level), 1200, Easing::POWER2_OUT)
                .with_stagger(i, 50),
        );
    }
    plan
}

/// Fade-up played on the tab panel whenever the active tab changes
pub fn experience_tab_effect() -> RevealEffect {
    AnimationPreset::fade_up(20.0, 500, Easing::POWER2_OUT)
}

fn experience() -> SectionPlan {
    let mut plan = SectionPlan::new(SectionId::Experience);
    headline_reveal(&mut plan);
    plan.on_mount
        .push((elements::experience_content(), experience_tab_effect()));
    plan
}

fn education(portfolio: &Portfolio) -> SectionPlan {
    let mut plan = SectionPlan::new(SectionId::Education);
    headline_reveal(&mut plan);

    for entry in &portfolio.education {
        plan.reveal(
            elements::education_card(&entry.degree),
            RevealTrigger::top_at(0.75),
            AnimationPreset::zoom_up(50.0, 0.95, 800, Easing::POWER3_OUT),
        );
        for (i, text) in entry.highlights.iter().enumerate() {
            plan.reveal(
                elements::education_highlight(&entry.degree, text),
                RevealTrigger::top_at(0.9),
                AnimationPreset::slide_in_left(20.0, 500, Easing::POWER2_OUT).with_stagger(i, 100),
            );
        }
    }
    plan
}

fn certificates(portfolio: &Portfolio) -> SectionPlan {
    let mut plan = SectionPlan::new(SectionId::Certificates);
    headline_reveal(&mut plan);

    for (i, cert) in portfolio.certificates.iter().enumerate() {
        plan.reveal(
            elements::certificate_card(&cert.title),
            RevealTrigger::top_at(0.85),
            AnimationPreset::tilt_up(50.0, 10.0, 600, Easing::POWER3_OUT).with_stagger(i, 80),
        );
    }
    plan
}

fn contact(portfolio: &Portfolio) -> SectionPlan {
    let mut plan = SectionPlan::new(SectionId::Contact);
    headline_reveal(&mut plan);

    for (i, link) in portfolio.contact.iter().enumerate() {
        plan.reveal(
            elements::contact_card(&link.label),
            RevealTrigger::top_at(0.9),
            AnimationPreset::zoom_up(30.0, 0.9, 600, Easing::BACK_OUT).with_stagger(i, 100),
        );
    }
    plan
}

fn footer() -> SectionPlan {
    let mut plan = SectionPlan::new(SectionId::Footer);
    plan.reveal(
        SectionId::Footer.root(),
        RevealTrigger::top_at(0.9),
        AnimationPreset::fade_up(30.0, 800, Easing::POWER3_OUT),
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portfolio() -> Portfolio {
        Portfolio::embedded().unwrap()
    }

    #[test]
    fn hero_timeline_offsets() {
        let plan = plan_section(SectionId::Hero, &portfolio(), &SkillFilter::All);
        let delays: Vec<u32> = plan
            .on_mount
            .iter()
            .map(|(_, e)| e.total_delay_ms())
            .collect();
        // 300 delay; subtitle at 1000-500; buttons at 1300-300, 100 apart
        assert_eq!(delays, vec![300, 800, 1300, 1400]);
        assert!(plan.reveals.is_empty());
    }

    #[test]
    fn nav_links_start_at_absolute_offsets() {
        let plan = plan_section(SectionId::Nav, &portfolio(), &SkillFilter::All);
        let delays: Vec<u32> = plan
            .on_mount
            .iter()
            .map(|(_, e)| e.total_delay_ms())
            .collect();
        assert_eq!(delays, vec![200, 300, 350, 400, 450, 500, 550]);
    }

    #[test]
    fn about_stats_carry_counters() {
        let plan = plan_section(SectionId::About, &portfolio(), &SkillFilter::All);
        let counters: Vec<u64> = plan
            .reveals
            .iter()
            .filter_map(|r| r.effect.counter.map(|c| c.to))
            .collect();
        assert_eq!(counters, vec![4, 2000, 300, 95]);

        let last = plan.reveals.last().unwrap();
        assert_eq!(last.effect.total_delay_ms(), 300);
        assert_eq!(last.trigger, RevealTrigger::top_at(0.85));
    }

    #[test]
    fn skills_plan_follows_the_filter() {
        let portfolio = portfolio();
        let all = plan_section(SectionId::Skills, &portfolio, &SkillFilter::All);
        assert_eq!(all.reveals.len(), 1 + 27 * 2);

        let filter = SkillFilter::Category("Treatment".into());
        let treatment = plan_section(SectionId::Skills, &portfolio, &filter);
        assert_eq!(treatment.reveals.len(), 1 + 6 * 2);

        // staggers restart within the filtered list
        let bar = treatment
            .reveals
            .iter()
            .find(|r| r.element == elements::skill_bar("Gait Training"))
            .unwrap();
        assert_eq!(bar.effect.total_delay_ms(), 5 * 50);
        assert_eq!(bar.effect.to.width_pct, Some(93.0));
    }

    #[test]
    fn every_section_has_something_to_animate() {
        let portfolio = portfolio();
        for section in SectionId::ALL {
            let plan = plan_section(section, &portfolio, &SkillFilter::All);
            assert!(plan.elements().next().is_some(), "{section}");
        }
    }
}
