//! Element identity for everything the page animates
//!
//! Ids are derived from content (titles, labels, skill names) rather than
//! list positions, so filtering the skills grid keeps each skill's id.

use crate::content::slug;
use kinesis_core::ElementId;
use std::fmt;

/// Page sections in document order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionId {
    Nav,
    Hero,
    About,
    Skills,
    Experience,
    Education,
    Certificates,
    Contact,
    Footer,
}

impl SectionId {
    pub const ALL: [SectionId; 9] = [
        SectionId::Nav,
        SectionId::Hero,
        SectionId::About,
        SectionId::Skills,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Certificates,
        SectionId::Contact,
        SectionId::Footer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SectionId::Nav => "nav",
            SectionId::Hero => "hero",
            SectionId::About => "about",
            SectionId::Skills => "skills",
            SectionId::Experience => "experience",
            SectionId::Education => "education",
            SectionId::Certificates => "certificates",
            SectionId::Contact => "contact",
            SectionId::Footer => "footer",
        }
    }

    /// In-page anchor, for sections navigation can scroll to
    pub fn anchor(self) -> Option<&'static str> {
        match self {
            SectionId::Nav | SectionId::Footer => None,
            SectionId::Hero => Some("#hero"),
            SectionId::About => Some("#about"),
            SectionId::Skills => Some("#skills"),
            SectionId::Experience => Some("#experience"),
            SectionId::Education => Some("#education"),
            SectionId::Certificates => Some("#certificates"),
            SectionId::Contact => Some("#contact"),
        }
    }

    pub fn from_anchor(anchor: &str) -> Option<SectionId> {
        Self::ALL.into_iter().find(|s| s.anchor() == Some(anchor))
    }

    /// The section's outer element
    pub fn root(self) -> ElementId {
        ElementId::from_key(self.name())
    }

    pub fn headline(self) -> ElementId {
        self.element("headline")
    }

    fn element(self, key: &str) -> ElementId {
        ElementId::from_key(&format!("{}/{key}", self.name()))
    }

    fn keyed(self, kind: &str, name: &str) -> ElementId {
        ElementId::from_key(&format!("{}/{kind}/{}", self.name(), slug(name)))
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn nav_logo() -> ElementId {
    SectionId::Nav.element("logo")
}

pub fn nav_link(label: &str) -> ElementId {
    SectionId::Nav.keyed("link", label)
}

pub fn hero_headline() -> ElementId {
    SectionId::Hero.headline()
}

pub fn hero_subtitle() -> ElementId {
    SectionId::Hero.element("subtitle")
}

pub fn hero_cta(label: &str) -> ElementId {
    SectionId::Hero.keyed("cta", label)
}

pub fn about_card(title: &str) -> ElementId {
    SectionId::About.keyed("card", title)
}

pub fn about_stat(label: &str) -> ElementId {
    SectionId::About.keyed("stat", label)
}

pub fn skill_item(name: &str) -> ElementId {
    SectionId::Skills.keyed("item", name)
}

pub fn skill_bar(name: &str) -> ElementId {
    SectionId::Skills.keyed("bar", name)
}

pub fn skill_filter_bar() -> ElementId {
    SectionId::Skills.element("filters")
}

pub fn experience_tabs() -> ElementId {
    SectionId::Experience.element("tabs")
}

/// The active tab's panel
pub fn experience_content() -> ElementId {
    SectionId::Experience.element("content")
}

pub fn education_card(degree: &str) -> ElementId {
    SectionId::Education.keyed("card", degree)
}

pub fn education_highlight(degree: &str, text: &str) -> ElementId {
    education_card(degree).child(text)
}

pub fn certificate_card(title: &str) -> ElementId {
    SectionId::Certificates.keyed("card", title)
}

pub fn contact_card(label: &str) -> ElementId {
    SectionId::Contact.keyed("card", label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_round_trip_for_navigable_sections() {
        for section in SectionId::ALL {
            if let Some(anchor) = section.anchor() {
                assert_eq!(SectionId::from_anchor(anchor), Some(section));
            }
        }
        assert_eq!(SectionId::from_anchor("#projects"), None);
    }

    #[test]
    fn item_and_bar_ids_differ_per_skill() {
        assert_ne!(skill_item("Gait Training"), skill_bar("Gait Training"));
        assert_eq!(skill_item("Gait Training"), skill_item("gait training"));
        assert_ne!(skill_item("Gait Training"), skill_item("Strength Testing"));
    }
}
