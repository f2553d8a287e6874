//! Portfolio content
//!
//! The page's copy and data live in a TOML document. The default document is
//! compiled in; [`Portfolio::load`] reads a replacement from disk.

use crate::error::{AppError, Result};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const EMBEDDED: &str = include_str!("../content/portfolio.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    pub hero: Hero,
    pub nav: Vec<Link>,
    pub about: About,
    pub skills: Vec<Skill>,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub certificates: Vec<Certificate>,
    pub contact: Vec<Link>,
    pub particles: ParticleContent,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub badge: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hero {
    #[serde(default)]
    pub pills: Vec<String>,
    pub cta: Vec<Link>,
    #[serde(default)]
    pub stats: Vec<HeroStat>,
}

/// A pre-formatted headline number such as `2000+`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeroStat {
    pub number: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct About {
    pub stats: Vec<Stat>,
    pub highlights: Vec<Highlight>,
}

/// A number that counts up when revealed
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stat {
    pub value: u64,
    #[serde(default)]
    pub suffix: String,
    pub label: String,
}

impl Stat {
    /// Text shown while the counter reads `displayed`
    pub fn format(&self, displayed: u64) -> String {
        format!("{displayed}{}", self.suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Highlight {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: String,
    /// Proficiency, 0-100
    pub level: u8,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub role: String,
    pub location: String,
    pub period: String,
    pub description: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub period: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Certificate {
    pub title: String,
    pub issuer: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParticleContent {
    pub glyphs: Vec<String>,
}

/// Which skills the skills grid shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SkillFilter {
    #[default]
    All,
    Category(String),
}

impl SkillFilter {
    /// Parse a filter label; `"All"` (any case) selects everything
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("all") {
            SkillFilter::All
        } else {
            SkillFilter::Category(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SkillFilter::All => "All",
            SkillFilter::Category(name) => name,
        }
    }

    pub fn matches(&self, skill: &Skill) -> bool {
        match self {
            SkillFilter::All => true,
            SkillFilter::Category(name) => skill.category == *name,
        }
    }
}

impl Portfolio {
    /// The compiled-in portfolio
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let portfolio: Portfolio = toml::from_str(text)?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check the invariants element ids and navigation rely on
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(AppError::InvalidContent(msg));

        let mut seen = FxHashSet::default();
        for skill in &self.skills {
            if skill.level > 100 {
                return invalid(format!("skill {:?} has level {} > 100", skill.name, skill.level));
            }
            if !seen.insert(slug(&skill.name)) {
                return invalid(format!("duplicate skill {:?}", skill.name));
            }
        }

        let mut seen = FxHashSet::default();
        for experience in &self.experiences {
            if !seen.insert(experience.id.as_str()) {
                return invalid(format!("duplicate experience id {:?}", experience.id));
            }
        }

        for link in &self.nav {
            if !link.href.starts_with('#') {
                return invalid(format!("nav link {:?} is not an in-page anchor", link.label));
            }
        }

        if self.particles.glyphs.is_empty() {
            return invalid("particles.glyphs must not be empty".into());
        }
        Ok(())
    }

    /// Skill categories in first-appearance order
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for skill in &self.skills {
            if !categories.contains(&skill.category.as_str()) {
                categories.push(&skill.category);
            }
        }
        categories
    }

    /// Resolve a filter label against the known categories
    pub fn skill_filter(&self, label: &str) -> Result<SkillFilter> {
        let filter = SkillFilter::from_label(label);
        match &filter {
            SkillFilter::Category(name) if !self.categories().contains(&name.as_str()) => {
                Err(AppError::UnknownCategory(name.clone()))
            }
            _ => Ok(filter),
        }
    }

    pub fn filtered_skills<'a>(&'a self, filter: &'a SkillFilter) -> impl Iterator<Item = &'a Skill> {
        self.skills.iter().filter(move |skill| filter.matches(skill))
    }

    pub fn experience(&self, id: &str) -> Option<&Experience> {
        self.experiences.iter().find(|e| e.id == id)
    }
}

/// Stable key fragment for a display name: lowercase ASCII alphanumerics
/// separated by single dashes
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_is_complete() {
        let portfolio = Portfolio::embedded().unwrap();
        assert_eq!(portfolio.nav.len(), 6);
        assert_eq!(portfolio.about.stats.len(), 4);
        assert_eq!(portfolio.about.highlights.len(), 3);
        assert_eq!(portfolio.skills.len(), 27);
        assert_eq!(portfolio.experiences.len(), 2);
        assert_eq!(portfolio.education.len(), 1);
        assert_eq!(portfolio.certificates.len(), 7);
        assert_eq!(portfolio.certificates.iter().filter(|c| c.featured).count(), 3);
        assert_eq!(portfolio.contact.len(), 3);
        assert!(!portfolio.particles.glyphs.is_empty());

        let values: Vec<u64> = portfolio.about.stats.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![4, 2000, 300, 95]);
        assert_eq!(portfolio.about.stats[3].format(95), "95%");
    }

    #[test]
    fn categories_keep_document_order() {
        let portfolio = Portfolio::embedded().unwrap();
        assert_eq!(
            portfolio.categories(),
            vec!["Treatment", "Specialization", "Modalities", "Assessment"]
        );
        let filter = portfolio.skill_filter("Modalities").unwrap();
        assert_eq!(portfolio.filtered_skills(&filter).count(), 6);
        assert_eq!(portfolio.filtered_skills(&SkillFilter::All).count(), 27);
        assert!(matches!(
            portfolio.skill_filter("Surgery"),
            Err(AppError::UnknownCategory(_))
        ));
        assert_eq!(portfolio.skill_filter("all").unwrap(), SkillFilter::All);
    }

    #[test]
    fn slugs_are_stable_keys() {
        assert_eq!(slug("Heat/Cold Therapy"), "heat-cold-therapy");
        assert_eq!(slug("  Neuromuscular Re-education "), "neuromuscular-re-education");
        assert_eq!(slug("Basic Life Support (BLS)"), "basic-life-support-bls");
    }

    #[test]
    fn rejects_duplicate_skills_and_bad_levels() {
        let mut portfolio = Portfolio::embedded().unwrap();
        portfolio.skills.push(portfolio.skills[0].clone());
        assert!(matches!(portfolio.validate(), Err(AppError::InvalidContent(_))));

        let mut portfolio = Portfolio::embedded().unwrap();
        portfolio.skills[0].level = 120;
        assert!(matches!(portfolio.validate(), Err(AppError::InvalidContent(_))));
    }
}
