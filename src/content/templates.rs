//! Per-item markup for collection fields.
//!
//! Values are interpolated verbatim: the configuration is trusted and may
//! carry inline markup.

use super::model::{
    Certification, EducationEntry, ExperienceEntry, Fact, Metric, SkillCategory, SkillItem, Text,
};

pub fn fact(f: &Fact) -> String {
    format!(
        r#"<li><span class="aboutme__fact-label">{}</span><span class="aboutme__fact-value">{}</span></li>"#,
        f.label, f.value
    )
}

pub fn tag(t: &Text) -> String {
    format!(r#"<span class="aboutme__tag">{}</span>"#, t)
}

pub fn metric(m: &Metric) -> String {
    format!(
        r#"<div class="aboutme__metric-card"><span class="aboutme__metric-value">{}</span><span class="aboutme__metric-label">{}</span></div>"#,
        m.value, m.label
    )
}

pub fn certification(c: &Certification) -> String {
    format!(
        concat!(
            r#"<div class="cert-card">"#,
            r#"<img src="{}" alt="{}" class="cert-card__image">"#,
            r#"<div class="cert-card__label">{}</div>"#,
            r#"<span class="cert-card__pill">{}</span>"#,
            "</div>"
        ),
        c.image, c.alt, c.label, c.pill
    )
}

pub fn education_entry(e: &EducationEntry) -> String {
    format!(
        concat!(
            r#"<div class="education__box education__box--{}">"#,
            r#"<div class="education__dot"></div>"#,
            r#"<div class="education__card">"#,
            r#"<span class="education__period-badge">{}</span>"#,
            r#"<h3 class="education__subheading">{}</h3>"#,
            r#"<div class="education__image-wrapper"><img src="{}" alt="{}" class="education__photo"></div>"#,
            r#"<div class="education__content">"#,
            r#"<h2 class="education__title">{}</h2>"#,
            r#"<span class="education__period">{}</span>"#,
            r#"<p class="education__description">{}</p>"#,
            "</div></div></div>"
        ),
        e.position,
        e.period_badge,
        e.subheading,
        e.image,
        e.image_alt,
        e.title,
        e.institution,
        e.description
    )
}

pub fn experience_entry(e: &ExperienceEntry) -> String {
    let badge = if e.badge.is_truthy() {
        format!(r#"<span class="experience__card__badge">{}</span>"#, e.badge)
    } else {
        String::new()
    };
    let highlights: String = e
        .highlights
        .iter()
        .map(|h| format!(r#"<span class="experience__card__highlight">{}</span>"#, h))
        .collect();

    format!(
        concat!(
            r#"<div class="experience__card experience__card--{}" data-level="{}">"#,
            r#"<div class="experience__card__year">{}</div>"#,
            r#"<div class="experience__card__content">"#,
            r#"<div class="experience__card__header">"#,
            r#"<h3 class="experience__card__title">{}</h3>"#,
            r#"<p class="experience__card__company">{}</p>"#,
            r#"<span class="experience__card__duration">{}</span>"#,
            "{}",
            "</div>",
            r#"<p class="experience__card__description">{}</p>"#,
            r#"<div class="experience__card__highlights">{}</div>"#,
            "</div></div>"
        ),
        e.position,
        e.level,
        e.year,
        e.title,
        e.company,
        e.duration,
        badge,
        e.description,
        highlights
    )
}

fn skill_item(item: &SkillItem) -> String {
    format!(
        concat!(
            r#"<li class="skills__box__item" data-level="{pct}">"#,
            r#"<span class="skill-name">{name}</span>"#,
            r#"<span class="skill-level">{level}</span>"#,
            r#"<div class="skill-bar"><div class="skill-bar__fill" style="--skill-width: {pct}%"></div></div>"#,
            "</li>"
        ),
        pct = item.percentage,
        name = item.name,
        level = item.level
    )
}

pub fn skill_category(c: &SkillCategory) -> String {
    let items: String = c.items.iter().map(skill_item).collect();
    format!(
        concat!(
            r#"<div class="skills__box skills__box--{id}" data-category="{id}">"#,
            r#"<div class="skills__box__icon"><svg class="icon"><use xlink:href="assets/sprites.svg#{icon}"></use></svg></div>"#,
            r#"<h2 class="skills__box__heading">{heading}</h2>"#,
            r#"<p class="skills__box__description">{description}</p>"#,
            r#"<ul class="skills__box__list">{items}</ul>"#,
            "</div>"
        ),
        id = c.id,
        icon = c.icon,
        heading = c.heading,
        description = c.description,
        items = items
    )
}

/// Render each item and concatenate in input order
pub fn render_all<T>(items: &[T], render: impl Fn(&T) -> String) -> String {
    items.iter().map(render).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn experience_badge_only_when_truthy() {
        let mut e: ExperienceEntry = serde_json::from_value(json!({
            "position": "left", "level": "senior", "year": "2024",
            "title": "Engineer", "company": "Acme", "duration": "2y",
            "description": "Built things", "highlights": ["Rust", "Go"]
        }))
        .unwrap();
        let html = experience_entry(&e);
        assert!(!html.contains("experience__card__badge"));
        assert!(html.contains(r#"<span class="experience__card__highlight">Rust</span><span class="experience__card__highlight">Go</span>"#));

        e.badge = Text::from("Current");
        assert!(experience_entry(&e).contains(r#"<span class="experience__card__badge">Current</span>"#));
    }

    #[test]
    fn skill_percentage_feeds_level_and_width() {
        let c: SkillCategory = serde_json::from_value(json!({
            "id": "backend", "icon": "icon-server", "heading": "Backend", "description": "d",
            "items": [{ "name": "Rust", "level": "Expert", "percentage": 90 }]
        }))
        .unwrap();
        let html = skill_category(&c);
        assert!(html.contains(r#"data-category="backend""#));
        assert!(html.contains(r#"data-level="90""#));
        assert!(html.contains("--skill-width: 90%"));
        assert!(html.contains("sprites.svg#icon-server"));
    }

    #[test]
    fn render_all_preserves_order() {
        let tags = vec![Text::from("b"), Text::from("a")];
        assert_eq!(
            render_all(&tags, tag),
            r#"<span class="aboutme__tag">b</span><span class="aboutme__tag">a</span>"#
        );
    }
}
