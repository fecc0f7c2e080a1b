//! Section binders: copy one configuration section into its targets.
//!
//! Every assignment is independent and skipped when its target is absent.

use super::binding::BindingTable;
use super::model::{ContentConfig, SocialLink, Text};
use super::templates;
use crate::dom::{Document, NodeId};

/// The binders, in invocation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Header,
    NavigationCards,
    AboutMe,
    Education,
    Experience,
    Skills,
    SocialLinks,
}

impl Section {
    pub const ORDER: [Section; 7] = [
        Section::Header,
        Section::NavigationCards,
        Section::AboutMe,
        Section::Education,
        Section::Experience,
        Section::Skills,
        Section::SocialLinks,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::NavigationCards => "navigationCards",
            Section::AboutMe => "aboutMe",
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Skills => "skills",
            Section::SocialLinks => "socialLinks",
        }
    }
}

fn text(doc: &mut Document, target: Option<NodeId>, value: &Text) {
    if let Some(node) = target {
        doc.set_text_content(node, &value.to_string());
    }
}

fn markup(doc: &mut Document, target: Option<NodeId>, html: &str) {
    if let Some(node) = target {
        doc.set_inner_html(node, html);
    }
}

fn attr(doc: &mut Document, target: Option<NodeId>, name: &str, value: &str) {
    if let Some(node) = target {
        doc.set_attr(node, name, value);
    }
}

/// Run the binder for `section`
pub fn bind_section(section: Section, config: &ContentConfig, table: &BindingTable, doc: &mut Document) {
    match section {
        Section::Header => bind_header(config, table, doc),
        Section::NavigationCards => bind_navigation_cards(config, table, doc),
        Section::AboutMe => bind_about_me(config, table, doc),
        Section::Education => bind_education(config, table, doc),
        Section::Experience => bind_experience(config, table, doc),
        Section::Skills => bind_skills(config, table, doc),
        Section::SocialLinks => bind_social_links(config, table, doc),
    }
}

fn bind_header(config: &ContentConfig, table: &BindingTable, doc: &mut Document) {
    let header = &config.header;
    let t = &table.header;
    text(doc, t.primary_heading, &header.primary_heading);
    text(doc, t.secondary_heading, &header.secondary_heading);
    markup(doc, t.cta, &header.cta_text.to_string());
}

// Cards bind by position: config entry i goes to `.card--(i+1)`.
fn bind_navigation_cards(config: &ContentConfig, table: &BindingTable, doc: &mut Document) {
    if table.navigation.container.is_none() {
        return;
    }
    for (index, card) in config.navigation_cards.iter().enumerate() {
        let Some(targets) = table.navigation.cards.get(&(index + 1)) else {
            continue;
        };
        text(doc, targets.heading, &card.heading);
        if targets.link.is_some() {
            text(doc, targets.link, &card.link_text);
            attr(doc, targets.link, "href", &format!("#{}", card.id));
        }
        if targets.image.is_some() {
            attr(doc, targets.image, "src", &card.image.to_string());
            attr(doc, targets.image, "alt", &card.alt.to_string());
        }
    }
}

fn bind_about_me(config: &ContentConfig, table: &BindingTable, doc: &mut Document) {
    let about = &config.about_me;
    let t = &table.about_me;

    text(doc, t.heading, &about.heading);
    text(doc, t.eyebrow, &about.eyebrow);
    text(doc, t.title, &about.title);
    text(doc, t.summary, &about.summary);

    markup(doc, t.facts, &templates::render_all(&about.facts, templates::fact));
    markup(doc, t.tags, &templates::render_all(&about.tags, templates::tag));

    attr(doc, t.photo, "src", &about.photo_url.to_string());
    attr(doc, t.photo, "alt", &about.photo_alt.to_string());

    text(doc, t.map_label, &about.map_label);
    markup(doc, t.metrics, &templates::render_all(&about.metrics, templates::metric));

    text(doc, t.certifications_heading, &about.certifications_heading);
    markup(
        doc,
        t.certifications,
        &templates::render_all(&about.certifications, templates::certification),
    );
}

fn bind_education(config: &ContentConfig, table: &BindingTable, doc: &mut Document) {
    let education = &config.education;
    let t = &table.education;
    text(doc, t.heading, &education.heading);
    text(doc, t.subtitle, &education.subtitle);
    markup(doc, t.timeline, &templates::render_all(&education.timeline, templates::education_entry));
}

fn bind_experience(config: &ContentConfig, table: &BindingTable, doc: &mut Document) {
    let experience = &config.experience;
    let t = &table.experience;
    text(doc, t.heading, &experience.heading);
    text(doc, t.subtitle, &experience.subtitle);
    markup(doc, t.timeline, &templates::render_all(&experience.timeline, templates::experience_entry));
}

fn bind_skills(config: &ContentConfig, table: &BindingTable, doc: &mut Document) {
    let skills = &config.skills;
    let t = &table.skills;
    text(doc, t.heading, &skills.heading);
    text(doc, t.subtitle, &skills.subtitle);
    markup(doc, t.main, &templates::render_all(&skills.categories, templates::skill_category));
}

fn bind_social_link(doc: &mut Document, target: Option<NodeId>, name: &str, link: Option<&SocialLink>) {
    let (Some(node), Some(link)) = (target, link) else {
        return;
    };
    doc.set_attr(node, "href", &link.url.to_string());
    doc.set_attr(node, "aria-label", &format!("{} - {}", name, link.label));
}

fn bind_social_links(config: &ContentConfig, table: &BindingTable, doc: &mut Document) {
    let Some(social) = &config.social_links else {
        return;
    };
    let t = &table.social;
    bind_social_link(doc, t.linkedin, "LinkedIn", social.linkedin.as_ref());
    bind_social_link(doc, t.github, "GitHub", social.github.as_ref());
    bind_social_link(doc, t.email, "Email", social.email.as_ref());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(social: serde_json::Value) -> ContentConfig {
        serde_json::from_value(json!({
            "header": { "primaryHeading": "Ada", "secondaryHeading": "Engineer", "ctaText": "Say <b>hi</b>" },
            "navigationCards": [
                { "heading": "About", "linkText": "Read", "id": "aboutme", "image": "a.jpg", "alt": "A" },
                { "heading": "Skills", "linkText": "See", "id": "skills", "image": "s.jpg", "alt": "S" }
            ],
            "aboutMe": {},
            "education": {},
            "experience": {},
            "skills": {},
            "socialLinks": social
        }))
        .unwrap()
    }

    const PAGE: &str = r##"<html><body>
<h1 class="header__heading--primary">x</h1>
<a class="btn-transparent btn--animated">x</a>
<div class="navigation__cards">
  <div class="card card--1"><h3 class="card__heading"></h3><a class="card__link"></a><img class="card__image"></div>
  <div class="card card--2"><h3 class="card__heading"></h3></div>
</div>
<a data-social="github" href="#">gh</a>
<a data-social="email" href="#">mail</a>
</body></html>"##;

    #[test]
    fn header_writes_text_and_cta_markup() {
        let mut doc = Document::parse(PAGE);
        let table = BindingTable::build(&doc).unwrap();
        bind_section(Section::Header, &config(json!(null)), &table, &mut doc);

        assert_eq!(doc.text_content(table.header.primary_heading.unwrap()), "Ada");
        let cta = table.header.cta.unwrap();
        assert_eq!(doc.inner_html(cta), "Say <b>hi</b>");
    }

    #[test]
    fn navigation_cards_bind_by_position() {
        let mut doc = Document::parse(PAGE);
        let table = BindingTable::build(&doc).unwrap();
        bind_section(Section::NavigationCards, &config(json!(null)), &table, &mut doc);

        let first = &table.navigation.cards[&1];
        assert_eq!(doc.text_content(first.heading.unwrap()), "About");
        assert_eq!(doc.attr(first.link.unwrap(), "href"), Some("#aboutme"));
        assert_eq!(doc.attr(first.image.unwrap(), "src"), Some("a.jpg"));
        assert_eq!(doc.text_content(table.navigation.cards[&2].heading.unwrap()), "Skills");
    }

    #[test]
    fn social_links_skip_absent_entries_and_targets() {
        let mut doc = Document::parse(PAGE);
        let table = BindingTable::build(&doc).unwrap();
        let cfg = config(json!({
            "linkedin": { "url": "https://linkedin.com/in/ada", "label": "ada" },
            "github": { "url": "https://github.com/ada", "label": "@ada" }
        }));
        bind_section(Section::SocialLinks, &cfg, &table, &mut doc);

        let gh = table.social.github.unwrap();
        assert_eq!(doc.attr(gh, "href"), Some("https://github.com/ada"));
        assert_eq!(doc.attr(gh, "aria-label"), Some("GitHub - @ada"));
        let email = table.social.email.unwrap();
        assert_eq!(doc.attr(email, "href"), Some("#"));
        assert_eq!(doc.attr(email, "aria-label"), None);
    }

    #[test]
    fn absent_social_links_make_no_mutations() {
        let mut doc = Document::parse(PAGE);
        let table = BindingTable::build(&doc).unwrap();
        bind_section(Section::SocialLinks, &config(json!(null)), &table, &mut doc);
        assert_eq!(doc.mutation_count(), 0);
    }
}
