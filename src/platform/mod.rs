//! Host platform surface: window location and history, viewport and media
//! queries, device presets, scroll position, console and the task scheduler.
//!
//! These are the pieces of a browser window the loader and the controllers
//! touch. Everything is in-memory and deterministic so tests can drive it.

pub mod device;
pub mod media;
pub mod scheduler;

pub use device::DeviceMetrics;
pub use media::{MediaFeature, MediaQuery, MediaQueryList};
pub use scheduler::Scheduler;

use crate::{ConsoleMessage, Viewport};
use url::Url;

/// How a scroll request should be animated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

/// Session history for a single page; only replacement is supported
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Url>,
}

impl History {
    fn new(initial: Url) -> Self {
        Self { entries: vec![initial] }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn replace_current(&mut self, url: Url) {
        match self.entries.last_mut() {
            Some(cur) => *cur = url,
            None => self.entries.push(url),
        }
    }
}

/// The window hosting a page
#[derive(Debug, Clone)]
pub struct Window {
    location: Url,
    history: History,
    viewport: Viewport,
    touch: bool,
    idle_callbacks: bool,
    scroll_y: u32,
    last_scroll: Option<ScrollBehavior>,
    console: Vec<ConsoleMessage>,
}

impl Window {
    pub fn new(location: Url, viewport: Viewport) -> Self {
        Self {
            history: History::new(location.clone()),
            location,
            viewport,
            touch: false,
            idle_callbacks: true,
            scroll_y: 0,
            last_scroll: None,
            console: Vec::new(),
        }
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    /// `location.hash` without the leading `#` (empty when absent)
    pub fn fragment(&self) -> &str {
        self.location.fragment().unwrap_or("")
    }

    /// `history.replaceState(null, '', '#fragment')`
    pub fn replace_fragment(&mut self, fragment: &str) {
        self.location.set_fragment(Some(fragment));
        self.history.replace_current(self.location.clone());
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn emulate(&mut self, metrics: &DeviceMetrics) {
        self.viewport = metrics.viewport();
        self.touch = metrics.touch;
    }

    pub fn is_touch(&self) -> bool {
        self.touch
    }

    pub fn matches_media(&self, query: &MediaQuery) -> bool {
        query.matches(self.viewport)
    }

    /// Whether the host offers `requestIdleCallback`
    pub fn supports_idle_callbacks(&self) -> bool {
        self.idle_callbacks
    }

    pub fn set_idle_callbacks(&mut self, supported: bool) {
        self.idle_callbacks = supported;
    }

    pub fn scroll_y(&self) -> u32 {
        self.scroll_y
    }

    pub fn last_scroll_behavior(&self) -> Option<ScrollBehavior> {
        self.last_scroll
    }

    pub fn scroll_to(&mut self, top: u32, behavior: ScrollBehavior) {
        self.scroll_y = top;
        self.last_scroll = Some(behavior);
    }

    pub fn console(&self) -> &[ConsoleMessage] {
        &self.console
    }

    /// `console.error`; also forwarded to the `log` facade
    pub fn console_error(&mut self, text: String) {
        log::error!("{}", text);
        self.console.push(ConsoleMessage::new("error", text));
    }

    pub fn console_warn(&mut self, text: String) {
        log::warn!("{}", text);
        self.console.push(ConsoleMessage::new("warn", text));
    }
}
