//! Viewport media queries (`matchMedia`) for deterministic tests

use crate::{Error, Result, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFeature {
    MaxWidth(u32),
    MinWidth(u32),
    MaxHeight(u32),
    MinHeight(u32),
}

impl MediaFeature {
    fn matches(&self, v: Viewport) -> bool {
        match *self {
            MediaFeature::MaxWidth(px) => v.width <= px,
            MediaFeature::MinWidth(px) => v.width >= px,
            MediaFeature::MaxHeight(px) => v.height <= px,
            MediaFeature::MinHeight(px) => v.height >= px,
        }
    }
}

/// A conjunction of width/height features such as `(max-width: 768px)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaQuery {
    source: String,
    features: Vec<MediaFeature>,
}

impl MediaQuery {
    pub fn parse(source: &str) -> Result<Self> {
        let bad = |reason: &str| Error::ConfigError(format!("media query `{}`: {}", source, reason));
        let mut features = Vec::new();
        for part in source.split(" and ") {
            let inner = part
                .trim()
                .strip_prefix('(')
                .and_then(|p| p.strip_suffix(')'))
                .ok_or_else(|| bad("expected `(feature: value)`"))?;
            let (name, value) = inner.split_once(':').ok_or_else(|| bad("missing `:`"))?;
            let px: u32 = value
                .trim()
                .trim_end_matches("px")
                .parse()
                .map_err(|_| bad("expected a pixel length"))?;
            let feature = match name.trim() {
                "max-width" => MediaFeature::MaxWidth(px),
                "min-width" => MediaFeature::MinWidth(px),
                "max-height" => MediaFeature::MaxHeight(px),
                "min-height" => MediaFeature::MinHeight(px),
                other => return Err(bad(&format!("unsupported feature `{}`", other))),
            };
            features.push(feature);
        }
        Ok(Self { source: source.to_string(), features })
    }

    pub fn matches(&self, viewport: Viewport) -> bool {
        self.features.iter().all(|f| f.matches(viewport))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// A media query plus its last evaluated state, reporting `change` events
#[derive(Debug, Clone)]
pub struct MediaQueryList {
    query: MediaQuery,
    matches: bool,
}

impl MediaQueryList {
    pub fn new(query: MediaQuery, viewport: Viewport) -> Self {
        let matches = query.matches(viewport);
        Self { query, matches }
    }

    pub fn matches(&self) -> bool {
        self.matches
    }

    /// Re-evaluate against `viewport`; returns the new state when it changed
    pub fn update(&mut self, viewport: Viewport) -> Option<bool> {
        let now = self.query.matches(viewport);
        if now == self.matches {
            return None;
        }
        self.matches = now;
        Some(now)
    }
}
