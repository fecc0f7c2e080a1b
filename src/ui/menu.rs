//! Mobile slide-out menu: open/closed, mirrored on the toggle, panel,
//! backdrop and the body scroll lock.

use crate::dom::NodeId;
use crate::Page;

/// Delay before an action inside the panel closes the menu, so the action's
/// own effect (navigation, tab change) starts first
pub const ACTION_CLOSE_DELAY_MS: u64 = 150;

const OPEN_CLASS: &str = "is-open";

/// What a click did to the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuClick {
    Ignored,
    Toggled,
    Closed,
    /// An action was clicked; close after the given delay
    CloseAfter(u64),
}

#[derive(Debug, Clone)]
pub struct MobileMenu {
    toggle: NodeId,
    panel: NodeId,
    backdrop: Option<NodeId>,
    actions: Vec<NodeId>,
    is_open: bool,
    // body `style` attribute as it was before opening
    saved_body_style: Option<Option<String>>,
}

impl MobileMenu {
    /// Discover the menu. Returns `None` without a toggle or a panel.
    pub fn init(page: &Page) -> Option<Self> {
        let doc = &page.document;
        let toggle = doc.find(".mobile-menu__toggle").ok().flatten()?;
        let panel = doc.find(".mobile-menu__panel").ok().flatten()?;
        let backdrop = doc.find(".mobile-menu__backdrop").ok().flatten();
        let actions = doc.select_all(panel, ".mobile-menu__button").unwrap_or_default();
        Some(Self { toggle, panel, backdrop, actions, is_open: false, saved_body_style: None })
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self, page: &mut Page) {
        self.is_open = true;
        let doc = &mut page.document;
        for node in self.parts() {
            doc.add_class(node, OPEN_CLASS);
        }
        doc.set_attr(self.toggle, "aria-expanded", "true");

        if let Some(body) = doc.body() {
            if self.saved_body_style.is_none() {
                self.saved_body_style = Some(doc.attr(body, "style").map(str::to_string));
            }
            doc.set_style_property(body, "overflow", Some("hidden"));
        }
        log::debug!("mobile menu opened");
    }

    pub fn close(&mut self, page: &mut Page) {
        self.is_open = false;
        let doc = &mut page.document;
        for node in self.parts() {
            doc.remove_class(node, OPEN_CLASS);
        }
        doc.set_attr(self.toggle, "aria-expanded", "false");

        if let (Some(body), Some(saved)) = (doc.body(), self.saved_body_style.take()) {
            match saved {
                Some(style) => doc.set_attr(body, "style", &style),
                None => doc.remove_attr(body, "style"),
            }
        }
        log::debug!("mobile menu closed");
    }

    pub fn toggle(&mut self, page: &mut Page) {
        if self.is_open {
            self.close(page);
        } else {
            self.open(page);
        }
    }

    fn parts(&self) -> Vec<NodeId> {
        let mut parts = vec![self.toggle, self.panel];
        parts.extend(self.backdrop);
        parts
    }

    /// Route a click whose propagation path is `path` (target first)
    pub fn handle_click(&mut self, page: &mut Page, path: &[NodeId]) -> MenuClick {
        if path.contains(&self.toggle) {
            self.toggle(page);
            return MenuClick::Toggled;
        }
        if let Some(backdrop) = self.backdrop {
            if path.contains(&backdrop) {
                self.close(page);
                return MenuClick::Closed;
            }
        }
        if self.actions.iter().any(|a| path.contains(a)) {
            return MenuClick::CloseAfter(ACTION_CLOSE_DELAY_MS);
        }
        MenuClick::Ignored
    }

    /// Escape closes an open menu; returns whether the key was handled
    pub fn handle_key(&mut self, page: &mut Page, key: &str) -> bool {
        if key == "Escape" && self.is_open {
            self.close(page);
            return true;
        }
        false
    }
}
