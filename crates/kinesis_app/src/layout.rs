//! Headless page layout
//!
//! A vertical stack of sections with simple responsive grids, enough to give
//! every animated element a document rectangle for the reveal controller.
//! Grids collapse to a single column below the mobile breakpoint.

use crate::config::LayoutConfig;
use crate::content::{Portfolio, SkillFilter};
use crate::elements::{self, SectionId};
use kinesis_core::{ElementId, LayoutSource, Rect};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Element and section rectangles in document coordinates
#[derive(Clone, Debug, Default)]
pub struct PageLayout {
    rects: FxHashMap<ElementId, Rect>,
    sections: SmallVec<[(SectionId, Rect); 9]>,
    content_height: f32,
    width: f32,
}

impl LayoutSource for PageLayout {
    fn bounds(&self, element: ElementId) -> Option<Rect> {
        self.rects.get(&element).copied()
    }
}

impl PageLayout {
    /// Lay out the whole page for a viewport of `width` × `height`
    pub fn compute(
        portfolio: &Portfolio,
        filter: &SkillFilter,
        config: &LayoutConfig,
        width: f32,
        height: f32,
    ) -> Self {
        let mut builder = Builder::new(config, width);

        builder.nav(portfolio);
        builder.hero(portfolio, height);
        builder.about(portfolio);
        builder.skills(portfolio, filter);
        builder.experience();
        builder.education(portfolio);
        builder.certificates(portfolio);
        builder.contact(portfolio);
        builder.footer();

        let layout = builder.finish();
        tracing::trace!(
            width,
            height,
            elements = layout.rects.len(),
            content_height = layout.content_height,
            "page laid out"
        );
        layout
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn section(&self, section: SectionId) -> Option<Rect> {
        self.sections
            .iter()
            .find(|(id, _)| *id == section)
            .map(|(_, rect)| *rect)
    }

    /// Document offset of the section an anchor points at
    pub fn anchor_offset(&self, anchor: &str) -> Option<f32> {
        let section = SectionId::from_anchor(anchor)?;
        self.section(section).map(|rect| rect.y())
    }

    /// The hero section, which hosts the ambient particles
    pub fn hero(&self) -> Rect {
        self.section(SectionId::Hero).unwrap_or_default()
    }

    pub fn element_count(&self) -> usize {
        self.rects.len()
    }
}

struct Builder<'a> {
    config: &'a LayoutConfig,
    width: f32,
    left: f32,
    inner_width: f32,
    mobile: bool,
    y: f32,
    layout: PageLayout,
}

impl<'a> Builder<'a> {
    fn new(config: &'a LayoutConfig, width: f32) -> Self {
        let inner_width = (width - 2.0 * config.gap)
            .min(config.max_content_width)
            .max(0.0);
        Self {
            config,
            width,
            left: ((width - inner_width) / 2.0).max(0.0),
            inner_width,
            mobile: width < config.mobile_breakpoint,
            y: 0.0,
            layout: PageLayout {
                width,
                ..PageLayout::default()
            },
        }
    }

    fn columns(&self, wanted: usize) -> usize {
        if self.mobile {
            1
        } else {
            wanted.max(1)
        }
    }

    fn place(&mut self, element: ElementId, rect: Rect) {
        self.layout.rects.insert(element, rect);
    }

    /// Full-width block at the cursor
    fn block(&mut self, element: ElementId, height: f32) -> Rect {
        let rect = Rect::new(self.left, self.y, self.inner_width, height);
        self.place(element, rect);
        self.y += height + self.config.gap;
        rect
    }

    /// Row-major grid at the cursor
    fn grid<I>(&mut self, items: I, columns: usize, item_height: f32) -> SmallVec<[Rect; 32]>
    where
        I: IntoIterator<Item = ElementId>,
    {
        let columns = self.columns(columns);
        let gap = self.config.gap;
        let cell_width = (self.inner_width - gap * (columns as f32 - 1.0)) / columns as f32;

        let mut rects = SmallVec::new();
        for (i, element) in items.into_iter().enumerate() {
            let (row, col) = (i / columns, i % columns);
            let rect = Rect::new(
                self.left + col as f32 * (cell_width + gap),
                self.y + row as f32 * (item_height + gap),
                cell_width,
                item_height,
            );
            self.place(element, rect);
            rects.push(rect);
        }
        let rows = rects.len().div_ceil(columns);
        if rows > 0 {
            self.y += rows as f32 * (item_height + gap);
        }
        rects
    }

    /// Open a padded section with its headline
    fn begin(&mut self, section: SectionId) -> f32 {
        let top = self.y;
        self.y += self.config.section_padding;
        self.block(section.headline(), self.config.headline_height);
        top
    }

    fn end(&mut self, section: SectionId, top: f32) {
        self.y += self.config.section_padding - self.config.gap;
        let rect = Rect::new(0.0, top, self.width, self.y - top);
        self.place(section.root(), rect);
        self.layout.sections.push((section, rect));
    }

    fn nav(&mut self, portfolio: &Portfolio) {
        // Fixed header over the hero: it does not advance the cursor
        let header = self.config.header_height;
        let rect = Rect::new(0.0, 0.0, self.width, header);
        self.place(SectionId::Nav.root(), rect);
        self.layout.sections.push((SectionId::Nav, rect));

        self.place(
            elements::nav_logo(),
            Rect::new(self.left, 0.0, 200.0_f32.min(self.inner_width), header),
        );
        let link_width = 110.0;
        let links_left = self.left + self.inner_width - link_width * portfolio.nav.len() as f32;
        for (i, link) in portfolio.nav.iter().enumerate() {
            self.place(
                elements::nav_link(&link.label),
                Rect::new(links_left + i as f32 * link_width, 0.0, link_width, header),
            );
        }
    }

    fn hero(&mut self, portfolio: &Portfolio, viewport_height: f32) {
        let height = viewport_height.max(self.config.header_height * 8.0);
        self.y = self.config.header_height + self.config.section_padding;
        self.block(elements::hero_headline(), self.config.headline_height * 1.5);
        self.block(elements::hero_subtitle(), self.config.headline_height * 0.5);
        let ctas: SmallVec<[ElementId; 4]> = portfolio
            .hero
            .cta
            .iter()
            .map(|link| elements::hero_cta(&link.label))
            .collect();
        self.grid(ctas, portfolio.hero.cta.len(), 56.0);

        let rect = Rect::new(0.0, 0.0, self.width, height.max(self.y));
        self.place(SectionId::Hero.root(), rect);
        self.layout.sections.push((SectionId::Hero, rect));
        self.y = rect.bottom();
    }

    fn about(&mut self, portfolio: &Portfolio) {
        let top = self.begin(SectionId::About);
        let cards = portfolio
            .about
            .highlights
            .iter()
            .map(|h| elements::about_card(&h.title));
        self.grid(cards, self.config.card_columns, self.config.card_height);
        let stats = portfolio
            .about
            .stats
            .iter()
            .map(|s| elements::about_stat(&s.label));
        self.grid(stats, self.config.stat_columns, self.config.stat_height);
        self.end(SectionId::About, top);
    }

    fn skills(&mut self, portfolio: &Portfolio, filter: &SkillFilter) {
        let top = self.begin(SectionId::Skills);
        self.block(elements::skill_filter_bar(), self.config.filter_bar_height);

        let skills: SmallVec<[&str; 32]> = portfolio
            .filtered_skills(filter)
            .map(|s| s.name.as_str())
            .collect();
        let items = self.grid(
            skills.iter().map(|name| elements::skill_item(name)),
            self.config.skill_columns,
            self.config.skill_row_height,
        );
        // Bars sit along the bottom of their item
        for (name, item) in skills.iter().zip(items) {
            let bar = Rect::new(item.x() + 16.0, item.bottom() - 20.0, item.width() - 32.0, 8.0);
            self.place(elements::skill_bar(name), bar);
        }
        self.end(SectionId::Skills, top);
    }

    fn experience(&mut self) {
        let top = self.begin(SectionId::Experience);
        self.block(elements::experience_tabs(), self.config.tab_bar_height);
        self.block(elements::experience_content(), self.config.experience_height);
        self.end(SectionId::Experience, top);
    }

    fn education(&mut self, portfolio: &Portfolio) {
        let top = self.begin(SectionId::Education);
        for entry in &portfolio.education {
            let rows = entry.highlights.len() as f32;
            let card = self.block(
                elements::education_card(&entry.degree),
                self.config.education_card_height + rows * self.config.highlight_height,
            );
            for (i, text) in entry.highlights.iter().enumerate() {
                let y = card.y()
                    + self.config.education_card_height
                    + i as f32 * self.config.highlight_height;
                self.place(
                    elements::education_highlight(&entry.degree, text),
                    Rect::new(card.x() + 24.0, y, card.width() - 48.0, self.config.highlight_height),
                );
            }
        }
        self.end(SectionId::Education, top);
    }

    fn certificates(&mut self, portfolio: &Portfolio) {
        let top = self.begin(SectionId::Certificates);
        let cards = portfolio
            .certificates
            .iter()
            .map(|c| elements::certificate_card(&c.title));
        self.grid(cards, self.config.certificate_columns, self.config.certificate_height);
        self.end(SectionId::Certificates, top);
    }

    fn contact(&mut self, portfolio: &Portfolio) {
        let top = self.begin(SectionId::Contact);
        let cards = portfolio.contact.iter().map(|l| elements::contact_card(&l.label));
        self.grid(cards, self.config.contact_columns, self.config.contact_card_height);
        self.end(SectionId::Contact, top);
    }

    fn footer(&mut self) {
        let rect = Rect::new(0.0, self.y, self.width, self.config.footer_height);
        self.place(SectionId::Footer.root(), rect);
        self.layout.sections.push((SectionId::Footer, rect));
        self.y = rect.bottom();
    }

    fn finish(mut self) -> PageLayout {
        self.layout.content_height = self.y;
        self.layout
    }
}
