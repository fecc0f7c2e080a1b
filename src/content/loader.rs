//! Content loader: fetch once, then run every section binder in order.
//!
//! `Uninitialized -> Loading -> Ready | Failed`. Both end states are final;
//! a failed load logs one error and leaves the page untouched.

use super::binders::{bind_section, Section};
use super::binding::BindingTable;
use super::fetcher::{ConfigFetcher, ConfigSource};
use super::model::ContentConfig;
use crate::dom::Document;
use crate::platform::MediaQuery;
use crate::{LoaderOptions, Page, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Uninitialized,
    Loading,
    Ready,
    Failed,
}

/// When binding ran (or will run) after a successful fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindSchedule {
    Immediate,
    /// Deferred to an idle callback, forced after `timeout_ms`
    Idle { timeout_ms: u64 },
}

/// A started load: the fetch to await before calling [`ContentLoader::finish`]
#[derive(Debug)]
pub struct PendingLoad {
    fetcher: Result<ConfigFetcher>,
}

impl PendingLoad {
    pub async fn fetch(self) -> Result<ContentConfig> {
        let fetcher = self.fetcher?;
        fetcher.fetch().await
    }
}

#[derive(Debug)]
pub struct ContentLoader {
    options: LoaderOptions,
    mobile_query: MediaQuery,
    state: LoadState,
    config: Option<ContentConfig>,
    table: Option<BindingTable>,
    /// The page as it was when the table was built, for re-renders
    pristine: Option<Document>,
    /// Mobile query result when loading started
    narrow_at_start: bool,
    bound: Vec<Section>,
    deferred: bool,
}

impl ContentLoader {
    pub fn new(options: LoaderOptions) -> Result<Self> {
        let mobile_query = MediaQuery::parse(&options.mobile_query)?;
        Ok(Self {
            options,
            mobile_query,
            state: LoadState::Uninitialized,
            config: None,
            table: None,
            pristine: None,
            narrow_at_start: false,
            bound: Vec::new(),
            deferred: false,
        })
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    pub fn config(&self) -> Option<&ContentConfig> {
        self.config.as_ref()
    }

    /// Every binder invocation so far, in order
    pub fn bound_sections(&self) -> &[Section] {
        &self.bound
    }

    /// Whether a deferred bind is waiting for its idle callback
    pub fn has_deferred_bind(&self) -> bool {
        self.deferred
    }

    /// The binders this loader runs, in order
    pub fn sections(&self) -> Vec<Section> {
        Section::ORDER
            .iter()
            .copied()
            .filter(|s| *s != Section::SocialLinks || self.options.bind_social_links)
            .collect()
    }

    /// Start loading: `Uninitialized -> Loading`.
    ///
    /// Returns `None` when the loader was already started.
    pub fn begin(&mut self, page: &Page) -> Option<PendingLoad> {
        if self.state != LoadState::Uninitialized {
            log::warn!("content loader already started ({:?}); ignoring", self.state);
            return None;
        }
        self.state = LoadState::Loading;
        // the viewport decides scheduling as it was before the fetch
        self.narrow_at_start = page.window.matches_media(&self.mobile_query);

        let fetcher = ConfigSource::resolve(
            &self.options.config_path,
            page.window.location(),
            self.options.site_root.as_deref(),
        )
        .and_then(|source| ConfigFetcher::new(source, &self.options));
        Some(PendingLoad { fetcher })
    }

    /// Complete a load started with [`begin`](Self::begin).
    ///
    /// On success the loader is `Ready` and binding either ran already
    /// (`Immediate`) or waits for [`run_deferred`](Self::run_deferred)
    /// (`Idle`). On failure the loader is `Failed` and `None` is returned.
    pub fn finish(&mut self, page: &mut Page, outcome: Result<ContentConfig>) -> Option<BindSchedule> {
        if self.state != LoadState::Loading {
            log::warn!("content loader is {:?}, not loading; ignoring result", self.state);
            return None;
        }

        let config = match outcome {
            Ok(config) => config,
            Err(e) => {
                self.state = LoadState::Failed;
                page.window
                    .console_error(format!("Error loading content configuration: {}", e));
                return None;
            }
        };

        self.state = LoadState::Ready;
        self.config = Some(config);
        match BindingTable::build(&page.document) {
            Ok(table) => {
                let missing = table.missing();
                if !missing.is_empty() {
                    log::debug!("{} binding targets absent from page: {:?}", missing.len(), missing);
                }
                self.table = Some(table);
                self.pristine = Some(page.document.clone());
            }
            Err(e) => {
                page.window.console_error(format!("Error building binding table: {}", e));
                return None;
            }
        }

        let defer = self.options.idle_scheduling
            && self.narrow_at_start
            && page.window.supports_idle_callbacks();
        if defer {
            log::debug!("deferring content binding to idle ({}ms ceiling)", self.options.idle_timeout_ms);
            self.deferred = true;
            return Some(BindSchedule::Idle { timeout_ms: self.options.idle_timeout_ms });
        }

        self.bind_all(page);
        Some(BindSchedule::Immediate)
    }

    /// Fetch and finish in one step
    pub async fn init(&mut self, page: &mut Page) -> Option<BindSchedule> {
        let pending = self.begin(page)?;
        let outcome = pending.fetch().await;
        self.finish(page, outcome)
    }

    /// Run a bind deferred by idle scheduling; returns whether one was pending
    pub fn run_deferred(&mut self, page: &mut Page) -> bool {
        if !self.deferred {
            return false;
        }
        self.deferred = false;
        self.bind_all(page);
        true
    }

    /// Bind `config` into the page, replacing whatever an earlier
    /// configuration wrote. The result depends only on `config`.
    pub fn apply(&mut self, page: &mut Page, config: ContentConfig) -> Result<()> {
        if self.table.is_none() {
            self.table = Some(BindingTable::build(&page.document)?);
            self.pristine = Some(page.document.clone());
        }
        if !self.bound.is_empty() {
            if let (Some(table), Some(pristine)) = (self.table.as_ref(), self.pristine.as_ref()) {
                table.reset(&mut page.document, pristine);
            }
        }
        self.config = Some(config);
        self.state = LoadState::Ready;
        self.deferred = false;
        self.bind_all(page);
        Ok(())
    }

    fn bind_all(&mut self, page: &mut Page) {
        let (Some(config), Some(table)) = (self.config.as_ref(), self.table.as_ref()) else {
            return;
        };
        for section in self.sections() {
            log::debug!("binding section {}", section.name());
            bind_section(section, config, table, &mut page.document);
            self.bound.push(section);
        }
    }
}
