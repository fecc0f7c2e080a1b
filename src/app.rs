//! Composition root: owns the page, the content loader and both UI
//! controllers, and routes host events (clicks, keys, resizes, timers,
//! idle periods) to them.

use crate::content::{BindSchedule, ContentConfig, ContentLoader};
use crate::dom::NodeId;
use crate::platform::{DeviceMetrics, Scheduler};
use crate::ui::{MenuClick, MobileMenu, MobileTabs};
use crate::{LoaderOptions, Page, Result, Viewport};

/// Work queued on the page's scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Deferred content binding (idle scheduling)
    BindContent,
    /// Delayed menu close after an action click
    CloseMenu,
}

#[derive(Debug)]
pub struct App {
    page: Page,
    scheduler: Scheduler<Task>,
    loader: ContentLoader,
    tabs: Option<MobileTabs>,
    menu: Option<MobileMenu>,
}

impl App {
    /// Start the loader, bring up the tab and menu controllers while the
    /// configuration request is in flight, then complete the load.
    pub async fn bootstrap(mut page: Page, options: LoaderOptions) -> Result<Self> {
        let mut loader = ContentLoader::new(options)?;
        let pending = loader.begin(&page);

        let tabs = MobileTabs::init(&mut page);
        let menu = MobileMenu::init(&page);
        log::info!(
            "bootstrapped {} (tabs: {}, menu: {})",
            page.window.location(),
            tabs.is_some(),
            menu.is_some()
        );

        let mut app = App { page, scheduler: Scheduler::new(), loader, tabs, menu };
        if let Some(pending) = pending {
            let outcome = pending.fetch().await;
            if let Some(BindSchedule::Idle { timeout_ms }) = app.loader.finish(&mut app.page, outcome) {
                app.scheduler.request_idle_callback(Task::BindContent, Some(timeout_ms));
            }
        }
        Ok(app)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn into_page(self) -> Page {
        self.page
    }

    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    pub fn tabs(&self) -> Option<&MobileTabs> {
        self.tabs.as_ref()
    }

    pub fn menu(&self) -> Option<&MobileMenu> {
        self.menu.as_ref()
    }

    pub fn scheduler(&self) -> &Scheduler<Task> {
        &self.scheduler
    }

    /// Dispatch a click on `node`; every controller sees the full
    /// propagation path so clicks on nested elements reach their button.
    pub fn click(&mut self, node: NodeId) {
        let path = self.page.document.ancestors_inclusive(node);
        if let Some(tabs) = self.tabs.as_mut() {
            tabs.handle_click(&mut self.page, &path);
        }
        if let Some(menu) = self.menu.as_mut() {
            if let MenuClick::CloseAfter(delay) = menu.handle_click(&mut self.page, &path) {
                self.scheduler.set_timeout(delay, Task::CloseMenu);
            }
        }
    }

    /// Click the first element matching `css`; returns whether one existed
    pub fn click_selector(&mut self, css: &str) -> Result<bool> {
        match self.page.document.find(css)? {
            Some(node) => {
                self.click(node);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn key_down(&mut self, key: &str) {
        if let Some(menu) = self.menu.as_mut() {
            menu.handle_key(&mut self.page, key);
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.page.window.set_viewport(viewport);
        if let Some(tabs) = self.tabs.as_mut() {
            tabs.on_viewport_change(&mut self.page);
        }
    }

    pub fn emulate(&mut self, metrics: &DeviceMetrics) {
        self.page.window.emulate(metrics);
        self.resize(metrics.viewport());
    }

    /// Activate a tab directly; `false` when the tab bar is absent or the id unknown
    pub fn set_active_tab(&mut self, id: &str) -> bool {
        match self.tabs.as_mut() {
            Some(tabs) => tabs.set_active(&mut self.page, id),
            None => false,
        }
    }

    pub fn toggle_menu(&mut self) {
        if let Some(menu) = self.menu.as_mut() {
            menu.toggle(&mut self.page);
        }
    }

    /// Re-render with another configuration
    pub fn apply_config(&mut self, config: ContentConfig) -> Result<()> {
        self.loader.apply(&mut self.page, config)
    }

    /// Advance virtual time, running timers and timed-out idle callbacks
    pub fn advance(&mut self, ms: u64) {
        for task in self.scheduler.advance(ms) {
            self.run_task(task);
        }
    }

    /// Let the host go idle, running pending idle callbacks
    pub fn run_idle(&mut self) {
        for task in self.scheduler.run_idle() {
            self.run_task(task);
        }
    }

    fn run_task(&mut self, task: Task) {
        log::debug!("running {:?}", task);
        match task {
            Task::BindContent => {
                self.loader.run_deferred(&mut self.page);
            }
            Task::CloseMenu => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.close(&mut self.page);
                }
            }
        }
    }
}
