//! Folio
//!
//! A headless host for a static portfolio page. It parses the page into a
//! mutable document, fetches the JSON content configuration, copies its
//! fields into the page through a fixed binding table, and drives the mobile
//! tab bar and slide-out menu through simulated clicks, key presses, viewport
//! changes and timers.
//!
//! # Example
//!
//! ```no_run
//! use folio::{App, LoaderOptions, Page, Viewport};
//!
//! # async fn run() -> folio::Result<()> {
//! let page = Page::load("site/index.html", Viewport::default(), "Folio/0.1").await?;
//! let mut app = App::bootstrap(page, LoaderOptions::default()).await?;
//! app.run_idle();
//! println!("{}", app.page().document.to_html());
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

pub mod error;
pub use error::{Error, Result};

pub mod dom;
pub mod platform;

mod page;
pub use page::Page;

// Content configuration, fetcher, binding table and section binders
pub mod content;

// Mobile tab bar and slide-out menu controllers
pub mod ui;

mod app;
pub use app::{App, Task};

pub use content::{BindSchedule, ContentConfig, ContentLoader, LoadState, Section};
pub use ui::{MobileMenu, MobileTabs};

/// Options for the content loader
///
/// `idle_scheduling` and `bind_social_links` select between the two flavours
/// of the loader: the mobile-optimised one that defers binding to an idle
/// period on narrow viewports and binds social links, and the plain one
/// that does neither.
///
/// # Examples
///
/// ```
/// let opts = folio::LoaderOptions::default();
/// assert_eq!(opts.config_path, "/config/content.json");
/// assert!(opts.idle_scheduling);
/// ```
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Path or URL of the content configuration, resolved against the page
    pub config_path: String,
    /// Directory that absolute config paths resolve against for file pages
    /// (defaults to the page's own directory)
    pub site_root: Option<PathBuf>,
    /// Defer binding to an idle callback on narrow viewports
    pub idle_scheduling: bool,
    /// Run the social links binder
    pub bind_social_links: bool,
    /// Upper bound on the idle wait before binding is forced
    pub idle_timeout_ms: u64,
    /// Media query selecting the narrow viewports that use idle scheduling
    pub mobile_query: String,
    /// User agent sent with HTTP requests
    pub user_agent: String,
    /// Extra HTTP headers sent with the configuration request
    pub headers: HashMap<String, String>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            config_path: "/config/content.json".to_string(),
            site_root: None,
            idle_scheduling: true,
            bind_social_links: true,
            idle_timeout_ms: 2000,
            mobile_query: "(max-width: 768px)".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: HashMap::new(),
        }
    }
}

/// User agent used when none is configured
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) Folio/0.1";

/// Viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Console message emitted by the page
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleMessage {
    /// Level such as "log", "warn", or "error"
    pub level: String,
    /// Textual content of the message
    pub text: String,
}

impl ConsoleMessage {
    pub fn new(level: &str, text: String) -> Self {
        Self { level: level.to_string(), text }
    }
}
