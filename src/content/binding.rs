//! Binding table: every configuration field's target element, looked up once.
//!
//! Absent targets are `None` and the binders skip them. Containers for
//! collections are stable across re-renders (only their children are
//! replaced), so the table stays valid for the lifetime of the page.

use crate::dom::{Document, NodeId};
use crate::Result;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct HeaderTargets {
    pub primary_heading: Option<NodeId>,
    pub secondary_heading: Option<NodeId>,
    pub cta: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct CardTargets {
    pub heading: Option<NodeId>,
    pub link: Option<NodeId>,
    pub image: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct NavigationTargets {
    pub container: Option<NodeId>,
    /// Cards keyed by their 1-based `card--N` number
    pub cards: BTreeMap<usize, CardTargets>,
}

#[derive(Debug, Clone, Default)]
pub struct AboutMeTargets {
    pub heading: Option<NodeId>,
    pub eyebrow: Option<NodeId>,
    pub title: Option<NodeId>,
    pub summary: Option<NodeId>,
    pub facts: Option<NodeId>,
    pub tags: Option<NodeId>,
    pub photo: Option<NodeId>,
    pub map_label: Option<NodeId>,
    pub metrics: Option<NodeId>,
    pub certifications_heading: Option<NodeId>,
    pub certifications: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct TimelineTargets {
    pub heading: Option<NodeId>,
    pub subtitle: Option<NodeId>,
    pub timeline: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct SkillsTargets {
    pub heading: Option<NodeId>,
    pub subtitle: Option<NodeId>,
    pub main: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct SocialTargets {
    pub linkedin: Option<NodeId>,
    pub github: Option<NodeId>,
    pub email: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    pub header: HeaderTargets,
    pub navigation: NavigationTargets,
    pub about_me: AboutMeTargets,
    pub education: TimelineTargets,
    pub experience: TimelineTargets,
    pub skills: SkillsTargets,
    pub social: SocialTargets,
}

const CARD_PREFIX: &str = "card--";

impl BindingTable {
    pub fn build(doc: &Document) -> Result<Self> {
        let root = doc.root();
        let find = |css: &str| doc.select_first(root, css);

        let header = HeaderTargets {
            primary_heading: find(".header__heading--primary")?,
            secondary_heading: find(".header__heading--secondary")?,
            cta: find(".btn-transparent.btn--animated")?,
        };

        let container = find(".navigation__cards")?;
        let mut cards = BTreeMap::new();
        if let Some(container) = container {
            for node in doc.descendants(container) {
                let Some(number) = card_number(doc, node) else { continue };
                if cards.contains_key(&number) {
                    continue;
                }
                cards.insert(
                    number,
                    CardTargets {
                        heading: doc.select_first(node, ".card__heading")?,
                        link: doc.select_first(node, ".card__link")?,
                        image: doc.select_first(node, ".card__image")?,
                    },
                );
            }
        }

        let about_me = AboutMeTargets {
            heading: find(".aboutme__heading")?,
            eyebrow: find(".aboutme__eyebrow")?,
            title: find(".aboutme__title")?,
            summary: find(".aboutme__summary")?,
            facts: find(".aboutme__facts")?,
            tags: find(".aboutme__tags")?,
            photo: find(".aboutme__photo")?,
            map_label: find(".aboutme__map-label")?,
            metrics: find(".aboutme__metrics")?,
            certifications_heading: find(".aboutme__subheading")?,
            certifications: find(".aboutme__cert-grid")?,
        };

        let education = TimelineTargets {
            heading: find(".education__heading")?,
            subtitle: find(".education__subtitle")?,
            timeline: find(".education__timeline")?,
        };

        let experience = TimelineTargets {
            heading: find(".experience__heading")?,
            subtitle: find(".experience__subtitle")?,
            timeline: find(".experience__timeline")?,
        };

        let skills = SkillsTargets {
            heading: find(".skills__heading-text")?,
            subtitle: find(".skills__subtitle")?,
            main: find(".skills__main")?,
        };

        let social = SocialTargets {
            linkedin: find(r#"[data-social="linkedin"]"#)?,
            github: find(r#"[data-social="github"]"#)?,
            email: find(r#"[data-social="email"]"#)?,
        };

        Ok(Self {
            header,
            navigation: NavigationTargets { container, cards },
            about_me,
            education,
            experience,
            skills,
            social,
        })
    }

    /// Field path -> target pairs, for diagnostics
    pub fn entries(&self) -> Vec<(String, Option<NodeId>)> {
        let mut out: Vec<(String, Option<NodeId>)> = vec![
            ("header.primaryHeading".into(), self.header.primary_heading),
            ("header.secondaryHeading".into(), self.header.secondary_heading),
            ("header.ctaText".into(), self.header.cta),
            ("navigationCards".into(), self.navigation.container),
        ];
        for (n, card) in &self.navigation.cards {
            out.push((format!("navigationCards[{}].heading", n - 1), card.heading));
            out.push((format!("navigationCards[{}].link", n - 1), card.link));
            out.push((format!("navigationCards[{}].image", n - 1), card.image));
        }
        let a = &self.about_me;
        out.extend([
            ("aboutMe.heading".to_string(), a.heading),
            ("aboutMe.eyebrow".to_string(), a.eyebrow),
            ("aboutMe.title".to_string(), a.title),
            ("aboutMe.summary".to_string(), a.summary),
            ("aboutMe.facts".to_string(), a.facts),
            ("aboutMe.tags".to_string(), a.tags),
            ("aboutMe.photo".to_string(), a.photo),
            ("aboutMe.mapLabel".to_string(), a.map_label),
            ("aboutMe.metrics".to_string(), a.metrics),
            ("aboutMe.certificationsHeading".to_string(), a.certifications_heading),
            ("aboutMe.certifications".to_string(), a.certifications),
            ("education.heading".to_string(), self.education.heading),
            ("education.subtitle".to_string(), self.education.subtitle),
            ("education.timeline".to_string(), self.education.timeline),
            ("experience.heading".to_string(), self.experience.heading),
            ("experience.subtitle".to_string(), self.experience.subtitle),
            ("experience.timeline".to_string(), self.experience.timeline),
            ("skills.heading".to_string(), self.skills.heading),
            ("skills.subtitle".to_string(), self.skills.subtitle),
            ("skills.categories".to_string(), self.skills.main),
            ("socialLinks.linkedin".to_string(), self.social.linkedin),
            ("socialLinks.github".to_string(), self.social.github),
            ("socialLinks.email".to_string(), self.social.email),
        ]);
        out
    }

    /// Field paths whose target element is missing from the page
    pub fn missing(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(_, target)| target.is_none())
            .map(|(path, _)| path)
            .collect()
    }

    /// Put every target back the way it is in `pristine`, the document as it
    /// was when this table was built. Targets that contain other targets only
    /// get their attributes back so the ids in the table stay attached.
    pub fn reset(&self, doc: &mut Document, pristine: &Document) {
        let targets: Vec<NodeId> = self.entries().into_iter().filter_map(|(_, t)| t).collect();
        let lookup: HashSet<NodeId> = targets.iter().copied().collect();
        for &id in &targets {
            let nests_target = pristine.descendants(id).iter().any(|d| lookup.contains(d));
            doc.reset_from(pristine, id, !nests_target);
        }
    }
}

fn card_number(doc: &Document, node: NodeId) -> Option<usize> {
    doc.attr(node, "class")?
        .split_whitespace()
        .filter_map(|c| c.strip_prefix(CARD_PREFIX))
        .find_map(|suffix| {
            let n = suffix.parse::<usize>().ok()?;
            // only the canonical spelling: no sign, no leading zeros
            (n.to_string() == suffix).then_some(n)
        })
}
