//! Mobile tab bar: one active tab at a time, mirrored in the URL fragment.

use crate::dom::NodeId;
use crate::platform::{MediaQuery, MediaQueryList, ScrollBehavior};
use crate::Page;

/// Tab the home action jumps to
pub const HOME_TAB: &str = "aboutme";
/// Below this width the tab bar drives section visibility
pub const TAB_BREAKPOINT: &str = "(max-width: 820px)";

const ACTIVE_CLASS: &str = "is-active";

#[derive(Debug, Clone)]
struct TabButton {
    node: NodeId,
    target: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MobileTabs {
    buttons: Vec<TabButton>,
    // (tab id, section element) in first-seen button order
    sections: Vec<(String, Option<NodeId>)>,
    active_id: Option<String>,
    home: Option<NodeId>,
    breakpoint: MediaQueryList,
}

impl MobileTabs {
    /// Discover the tab bar. Returns `None` when the page has no tab buttons.
    pub fn init(page: &mut Page) -> Option<Self> {
        let doc = &page.document;
        let root = doc.root();
        let button_nodes = doc.select_all(root, ".mobile-tabs__item").ok()?;
        if button_nodes.is_empty() {
            log::debug!("no mobile tab buttons; tab controller disabled");
            return None;
        }

        let buttons: Vec<TabButton> = button_nodes
            .into_iter()
            .map(|node| TabButton { node, target: doc.attr(node, "data-target").map(str::to_string) })
            .collect();

        let mut sections: Vec<(String, Option<NodeId>)> = Vec::new();
        for target in buttons.iter().filter_map(|b| b.target.as_deref()) {
            if sections.iter().any(|(id, _)| id == target) {
                continue;
            }
            let section = doc
                .descendants(root)
                .into_iter()
                .find(|n| doc.attr(*n, "data-tab") == Some(target));
            sections.push((target.to_string(), section));
        }

        let default_id = buttons
            .iter()
            .find(|b| doc.has_class(b.node, ACTIVE_CLASS))
            .and_then(|b| b.target.clone())
            .or_else(|| buttons.first().and_then(|b| b.target.clone()));
        let hash_id = page.window.fragment();
        let active_id = if sections.iter().any(|(id, _)| id == hash_id) {
            Some(hash_id.to_string())
        } else {
            default_id
        };

        let home = doc.select_first(root, r#"[data-action="home"]"#).ok().flatten();
        let query = MediaQuery::parse(TAB_BREAKPOINT).ok()?;
        let breakpoint = MediaQueryList::new(query, page.window.viewport());

        let mut tabs = MobileTabs { buttons, sections, active_id, home, breakpoint };
        let is_mobile = tabs.breakpoint.matches();
        tabs.handle_breakpoint(page, is_mobile);
        Some(tabs)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// Tab ids in button order
    pub fn known_tabs(&self) -> Vec<&str> {
        self.sections.iter().map(|(id, _)| id.as_str()).collect()
    }

    pub fn is_known(&self, id: &str) -> bool {
        self.sections.iter().any(|(known, _)| known == id)
    }

    /// Activate `id`. Unknown ids are ignored and leave the state unchanged.
    pub fn set_active(&mut self, page: &mut Page, id: &str) -> bool {
        self.activate(page, id, true)
    }

    fn activate(&mut self, page: &mut Page, id: &str, update_history: bool) -> bool {
        if id.is_empty() || !self.is_known(id) {
            return false;
        }
        self.active_id = Some(id.to_string());

        let doc = &mut page.document;
        for button in &self.buttons {
            let is_active = button.target.as_deref() == Some(id);
            doc.toggle_class(button.node, ACTIVE_CLASS, is_active);
            doc.set_attr(button.node, "aria-selected", if is_active { "true" } else { "false" });
            doc.set_attr(button.node, "tabindex", if is_active { "0" } else { "-1" });
        }
        for (section_id, section) in &self.sections {
            if let Some(node) = section {
                doc.toggle_class(*node, ACTIVE_CLASS, section_id == id);
            }
        }

        if update_history && page.window.fragment() != id {
            page.window.replace_fragment(id);
        }
        log::debug!("tab {} active", id);
        true
    }

    /// Home action: show the about tab and scroll to the top
    pub fn go_home(&mut self, page: &mut Page) {
        self.set_active(page, HOME_TAB);
        page.window.scroll_to(0, ScrollBehavior::Smooth);
    }

    fn handle_breakpoint(&mut self, page: &mut Page, is_mobile: bool) {
        if !is_mobile {
            for button in &self.buttons {
                page.document.set_attr(button.node, "tabindex", "0");
            }
            return;
        }
        let target = self
            .active_id
            .clone()
            .or_else(|| self.buttons.first().and_then(|b| b.target.clone()));
        if let Some(target) = target {
            self.activate(page, &target, false);
        }
    }

    /// Re-check the breakpoint after a viewport change
    pub fn on_viewport_change(&mut self, page: &mut Page) {
        if let Some(is_mobile) = self.breakpoint.update(page.window.viewport()) {
            self.handle_breakpoint(page, is_mobile);
        }
    }

    /// Route a click whose propagation path is `path` (target first).
    /// Returns whether the tab bar handled it.
    pub fn handle_click(&mut self, page: &mut Page, path: &[NodeId]) -> bool {
        if let Some(home) = self.home {
            if path.contains(&home) {
                self.go_home(page);
                return true;
            }
        }
        let target = self
            .buttons
            .iter()
            .find(|b| path.contains(&b.node))
            .map(|b| b.target.clone());
        match target {
            Some(Some(id)) => {
                self.set_active(page, &id);
                true
            }
            Some(None) => true,
            None => false,
        }
    }
}
