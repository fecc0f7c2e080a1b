//! Content configuration schema.
//!
//! Every leaf is a [`Text`]: it accepts any JSON scalar and renders it the
//! way template interpolation would. A leaf missing from the document renders
//! as `undefined`; a missing list renders as nothing. The configuration is
//! trusted input and is never validated beyond JSON well-formedness and the
//! presence of the top-level sections.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// A scalar configuration value, possibly absent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text(Option<Value>);

impl Text {
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// JavaScript truthiness of the value
    pub fn is_truthy(&self) -> bool {
        match &self.0 {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text(Some(Value::String(s.to_string())))
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|v| Text(Some(v)))
    }
}

fn write_value(v: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match v {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{}", b),
        Value::Number(n) => match n.as_f64() {
            // 1.0 interpolates as "1"
            Some(x) if n.is_f64() && x.fract() == 0.0 && x.abs() < 1e15 => write!(f, "{}", x as i64),
            _ => write!(f, "{}", n),
        },
        Value::String(s) => f.write_str(s),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                if !item.is_null() {
                    write_value(item, f)?;
                }
            }
            Ok(())
        }
        Value::Object(_) => f.write_str("[object Object]"),
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => write_value(v, f),
            None => f.write_str("undefined"),
        }
    }
}

/// The whole content document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentConfig {
    pub header: Header,
    pub navigation_cards: Vec<NavigationCard>,
    pub about_me: AboutMe,
    pub education: Education,
    pub experience: Experience,
    pub skills: Skills,
    #[serde(default)]
    pub social_links: Option<SocialLinks>,
}

impl ContentConfig {
    /// Parse a configuration body fetched from `location`
    pub fn from_json(body: &str, location: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|source| Error::ConfigParse {
            location: location.to_string(),
            source,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Header {
    pub primary_heading: Text,
    pub secondary_heading: Text,
    /// Written as markup, may contain inline elements
    pub cta_text: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationCard {
    pub heading: Text,
    pub link_text: Text,
    /// Section anchor the card links to
    pub id: Text,
    pub image: Text,
    pub alt: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutMe {
    pub heading: Text,
    pub eyebrow: Text,
    pub title: Text,
    pub summary: Text,
    pub facts: Vec<Fact>,
    pub tags: Vec<Text>,
    pub photo_url: Text,
    pub photo_alt: Text,
    pub map_label: Text,
    pub metrics: Vec<Metric>,
    pub certifications_heading: Text,
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Fact {
    pub label: Text,
    pub value: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Metric {
    pub value: Text,
    pub label: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub image: Text,
    pub alt: Text,
    pub label: Text,
    pub pill: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub heading: Text,
    pub subtitle: Text,
    pub timeline: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    /// Layout side, e.g. `left` / `right`
    pub position: Text,
    pub period_badge: Text,
    pub subheading: Text,
    pub image: Text,
    pub image_alt: Text,
    pub title: Text,
    pub institution: Text,
    pub description: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub heading: Text,
    pub subtitle: Text,
    pub timeline: Vec<ExperienceEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub position: Text,
    pub level: Text,
    pub year: Text,
    pub title: Text,
    pub company: Text,
    pub duration: Text,
    /// Rendered only when truthy
    pub badge: Text,
    pub description: Text,
    pub highlights: Vec<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skills {
    pub heading: Text,
    pub subtitle: Text,
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    pub id: Text,
    /// Sprite symbol name
    pub icon: Text,
    pub heading: Text,
    pub description: Text,
    pub items: Vec<SkillItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkillItem {
    pub name: Text,
    pub level: Text,
    pub percentage: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub linkedin: Option<SocialLink>,
    pub github: Option<SocialLink>,
    pub email: Option<SocialLink>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub url: Text,
    pub label: Text,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "header": {},
            "navigationCards": [],
            "aboutMe": {},
            "education": {},
            "experience": {},
            "skills": {}
        })
    }

    #[test]
    fn text_renders_like_interpolation() {
        let t: Text = serde_json::from_value(json!(85)).unwrap();
        assert_eq!(t.to_string(), "85");
        let t: Text = serde_json::from_value(json!(2.0)).unwrap();
        assert_eq!(t.to_string(), "2");
        let t: Text = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(t.to_string(), "null");
        assert_eq!(Text::default().to_string(), "undefined");
        let t: Text = serde_json::from_value(json!(["a", null, 3])).unwrap();
        assert_eq!(t.to_string(), "a,,3");
    }

    #[test]
    fn truthiness() {
        assert!(!Text::default().is_truthy());
        assert!(!Text::from("").is_truthy());
        assert!(Text::from("Current").is_truthy());
        let zero: Text = serde_json::from_value(json!(0)).unwrap();
        assert!(!zero.is_truthy());
    }

    #[test]
    fn missing_fields_default_and_social_links_optional() {
        let cfg: ContentConfig = serde_json::from_value(minimal()).unwrap();
        assert_eq!(cfg.header.primary_heading.to_string(), "undefined");
        assert!(cfg.about_me.facts.is_empty());
        assert!(cfg.social_links.is_none());
    }

    #[test]
    fn missing_required_section_is_parse_error() {
        let mut v = minimal();
        v.as_object_mut().unwrap().remove("skills");
        let err = ContentConfig::from_json(&v.to_string(), "content.json").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = ContentConfig::from_json("{ \"header\": ", "content.json").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }
}
