//! Mutable document model used by the loader and the UI controllers.
//!
//! The page stays a `scraper::Html`. Queries go through `scraper::Selector`,
//! serialization through html5ever, and mutations edit the underlying
//! `ego_tree` in place. Nodes detached by a replacement stay in the arena but
//! are no longer reachable from the root, so every query walks the tree from
//! the root instead of scanning the arena.

use crate::{Error, Result};
use ego_tree::{NodeRef, Tree};
use html5ever::{LocalName, Namespace, QualName};
use scraper::node::Text;
use scraper::{ElementRef, Html, Node};

pub use scraper::node::Element;
pub use scraper::Selector;

/// Handle to a node inside a [`Document`]
pub type NodeId = ego_tree::NodeId;

/// An HTML document that counts the mutations applied to it
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
    mutations: u64,
}

/// Parse `css` into a selector, mapping failures to [`Error::Selector`]
pub fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Selector {
        selector: css.to_string(),
        reason: format!("{:?}", e.kind),
    })
}

impl Document {
    /// Parse a full HTML document.
    pub fn parse(source: &str) -> Self {
        Self { html: Html::parse_document(source), mutations: 0 }
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        self.html.tree.root().id()
    }

    /// Number of mutating calls applied since the document was parsed
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    fn node(&self, id: NodeId) -> Option<NodeRef<'_, Node>> {
        self.html.tree.get(id)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node(id).and_then(|n| n.value().as_element())
    }

    fn element_ref(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.node(id).and_then(ElementRef::wrap)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .map(|n| n.children().map(|c| c.id()).collect())
            .unwrap_or_default()
    }

    /// Descendants of `id` in document order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .map(|n| n.descendants().skip(1).map(|d| d.id()).collect())
            .unwrap_or_default()
    }

    /// `id` followed by its ancestors up to the root
    pub fn ancestors_inclusive(&self, id: NodeId) -> Vec<NodeId> {
        match self.node(id) {
            Some(n) => std::iter::once(id).chain(n.ancestors().map(|a| a.id())).collect(),
            None => Vec::new(),
        }
    }

    /// Every element under `scope` matching `selector`, in document order
    pub fn query_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        if scope == self.root() {
            let html = self.html.root_element();
            let own = Some(html).filter(|e| selector.matches(e)).map(|e| e.id());
            return own.into_iter().chain(html.select(selector).map(|e| e.id())).collect();
        }
        match self.element_ref(scope) {
            Some(el) => el.select(selector).map(|e| e.id()).collect(),
            None => Vec::new(),
        }
    }

    /// First element under `scope` matching `selector`
    pub fn query(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        if scope == self.root() {
            let html = self.html.root_element();
            if selector.matches(&html) {
                return Some(html.id());
            }
            return html.select(selector).next().map(|e| e.id());
        }
        self.element_ref(scope)?.select(selector).next().map(|e| e.id())
    }

    /// Parse `css` and return the first match under `scope`
    pub fn select_first(&self, scope: NodeId, css: &str) -> Result<Option<NodeId>> {
        Ok(self.query(scope, &parse_selector(css)?))
    }

    /// Parse `css` and return all matches under `scope`
    pub fn select_all(&self, scope: NodeId, css: &str) -> Result<Vec<NodeId>> {
        Ok(self.query_all(scope, &parse_selector(css)?))
    }

    /// Document-wide `querySelector`
    pub fn find(&self, css: &str) -> Result<Option<NodeId>> {
        self.select_first(self.root(), css)
    }

    pub fn body(&self) -> Option<NodeId> {
        self.html
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "body")
            .map(|e| e.id())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attr(name))
    }

    fn with_element<R>(&mut self, id: NodeId, f: impl FnOnce(&mut Element) -> R) -> Option<R> {
        let mut node = self.html.tree.get_mut(id)?;
        match node.value() {
            Node::Element(el) => Some(f(el)),
            _ => None,
        }
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        let changed = self.with_element(id, |el| {
            let key = QualName::new(None, Namespace::from(""), LocalName::from(name.as_str()));
            // replacing an existing key keeps its position
            el.attrs.insert(key, value.into());
            match name.as_str() {
                "class" => el.classes = value.split_whitespace().map(LocalName::from).collect(),
                "id" => el.id = Some(LocalName::from(value)),
                _ => {}
            }
        });
        if changed.is_some() {
            self.mutations += 1;
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        let name = name.to_ascii_lowercase();
        let removed = self.with_element(id, |el| {
            let key = QualName::new(None, Namespace::from(""), LocalName::from(name.as_str()));
            let removed = el.attrs.shift_remove(&key).is_some();
            if removed {
                match name.as_str() {
                    "class" => el.classes.clear(),
                    "id" => el.id = None,
                    _ => {}
                }
            }
            removed
        });
        if removed == Some(true) {
            self.mutations += 1;
        }
    }

    fn class_list(&self, id: NodeId) -> Vec<&str> {
        self.attr(id, "class").map(|c| c.split_whitespace().collect()).unwrap_or_default()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.class_list(id).contains(&class)
    }

    /// `classList.add`; no mutation when the class is already present
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.element(id).is_none() || self.has_class(id, class) {
            return;
        }
        let mut classes = self.class_list(id);
        classes.push(class);
        let value = classes.join(" ");
        self.set_attr(id, "class", &value);
    }

    /// `classList.remove`; no mutation when the class is absent
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            return;
        }
        let value = self
            .class_list(id)
            .into_iter()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr(id, "class", &value);
    }

    /// `classList.toggle(class, force)`
    pub fn toggle_class(&mut self, id: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    /// Concatenated text of `id` and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.node(id) else {
            return String::new();
        };
        node.descendants()
            .filter_map(|n| n.value().as_text())
            .map(|t| &*t.text)
            .collect()
    }

    fn detach_children(&mut self, id: NodeId) {
        for child in self.children(id) {
            if let Some(mut node) = self.html.tree.get_mut(child) {
                node.detach();
            }
        }
    }

    /// Replace all children of `id` with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if self.element(id).is_none() {
            return;
        }
        self.detach_children(id);
        if !text.is_empty() {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.append(Node::Text(Text { text: text.into() }));
            }
        }
        self.mutations += 1;
    }

    /// Replace all children of `id` with the parsed `markup`
    pub fn set_inner_html(&mut self, id: NodeId, markup: &str) {
        if self.element(id).is_none() {
            return;
        }
        let fragment = Html::parse_fragment(markup);
        self.detach_children(id);
        graft_children(&mut self.html.tree, id, *fragment.root_element());
        self.mutations += 1;
    }

    /// Put `id` back the way it is in `original`, a clone of this document
    /// taken earlier. Its attributes always, its subtree when `with_children`.
    pub fn reset_from(&mut self, original: &Document, id: NodeId, with_children: bool) {
        let Some(source) = original.node(id) else { return };
        let Some(mut target) = self.html.tree.get_mut(id) else { return };
        *target.value() = source.value().clone();
        if with_children {
            self.detach_children(id);
            graft_children(&mut self.html.tree, id, source);
        }
        self.mutations += 1;
    }

    /// Value of one declaration of the inline `style` attribute
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        parse_style(self.attr(id, "style")?)
            .into_iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(property))
            .map(|(_, v)| v)
    }

    /// Set (or with `None`, remove) one inline style declaration
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: Option<&str>) {
        let mut decls = parse_style(self.attr(id, "style").unwrap_or(""));
        decls.retain(|(k, _)| !k.eq_ignore_ascii_case(property));
        if let Some(v) = value {
            decls.push((property.to_string(), v.to_string()));
        }
        let rendered = decls
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; ");
        self.set_attr(id, "style", &rendered);
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        self.element_ref(id).map(|e| e.inner_html()).unwrap_or_default()
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        self.element_ref(id).map(|e| e.html()).unwrap_or_default()
    }

    /// Serialize the whole document
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in self.html.tree.root().children() {
            match child.value() {
                Node::Doctype(doctype) => {
                    out.push_str(&format!("<!DOCTYPE {}>\n", doctype.name()));
                }
                Node::Comment(comment) => {
                    out.push_str(&format!("<!--{}-->", &*comment.comment));
                }
                Node::Element(_) => {
                    if let Some(el) = ElementRef::wrap(child) {
                        out.push_str(&el.html());
                    }
                }
                _ => {}
            }
        }
        out
    }
}

// Copy the children of `source` (from any tree) under `parent`
fn graft_children(tree: &mut Tree<Node>, parent: NodeId, source: NodeRef<'_, Node>) {
    for child in source.children() {
        let Some(mut slot) = tree.get_mut(parent) else { return };
        let id = slot.append(child.value().clone()).id();
        graft_children(tree, id, child);
    }
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html><html><head><title>T</title></head>
<body><div class="box a"><p class="x">Hello <b>there</b></p></div><img class="pic" src="a.png"></body></html>"#;

    #[test]
    fn parse_and_text_content() {
        let doc = Document::parse(PAGE);
        let p = doc.find(".x").unwrap().unwrap();
        assert_eq!(doc.text_content(p), "Hello there");
        assert_eq!(doc.mutation_count(), 0);
        assert!(doc.to_html().starts_with("<!DOCTYPE html>\n<html>"));
    }

    #[test]
    fn set_text_replaces_children() {
        let mut doc = Document::parse(PAGE);
        let p = doc.find(".x").unwrap().unwrap();
        doc.set_text_content(p, "<i>plain</i>");
        assert_eq!(doc.text_content(p), "<i>plain</i>");
        assert_eq!(doc.children(p).len(), 1);
        assert!(doc.outer_html(p).contains("&lt;i&gt;plain&lt;/i&gt;"));
        assert_eq!(doc.mutation_count(), 1);
    }

    #[test]
    fn set_inner_html_parses_markup() {
        let mut doc = Document::parse(PAGE);
        let div = doc.find(".box").unwrap().unwrap();
        doc.set_inner_html(div, r#"<span class="t">one</span><span class="t">two</span>"#);
        let spans = doc.select_all(div, ".t").unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(doc.text_content(spans[1]), "two");
        // the replaced paragraph is detached and no longer found
        assert!(doc.find(".x").unwrap().is_none());
        assert_eq!(doc.inner_html(div), r#"<span class="t">one</span><span class="t">two</span>"#);
    }

    #[test]
    fn inner_html_keeps_namespaced_attributes() {
        let mut doc = Document::parse(PAGE);
        let div = doc.find(".box").unwrap().unwrap();
        doc.set_inner_html(div, r##"<svg class="icon"><use xlink:href="sprites.svg#icon-x"></use></svg>"##);
        assert!(doc.inner_html(div).contains(r##"xlink:href="sprites.svg#icon-x""##));
    }

    #[test]
    fn class_list_operations_update_selector_matching() {
        let mut doc = Document::parse(PAGE);
        let div = doc.find(".box").unwrap().unwrap();
        doc.add_class(div, "is-open");
        assert!(doc.has_class(div, "is-open"));
        assert_eq!(doc.find(".is-open").unwrap(), Some(div));
        let count = doc.mutation_count();
        doc.add_class(div, "is-open");
        assert_eq!(doc.mutation_count(), count);
        doc.remove_class(div, "is-open");
        assert_eq!(doc.attr(div, "class"), Some("box a"));
        assert!(doc.find(".is-open").unwrap().is_none());
    }

    #[test]
    fn attributes_keep_source_order() {
        let mut doc = Document::parse(PAGE);
        let img = doc.find(".pic").unwrap().unwrap();
        doc.set_attr(img, "class", "pic big");
        doc.set_attr(img, "alt", "A");
        assert_eq!(doc.outer_html(img), r#"<img class="pic big" src="a.png" alt="A">"#);
        doc.remove_attr(img, "class");
        assert_eq!(doc.outer_html(img), r#"<img src="a.png" alt="A">"#);
    }

    #[test]
    fn style_properties_round_trip() {
        let mut doc = Document::parse(PAGE);
        let body = doc.body().unwrap();
        doc.set_style_property(body, "overflow", Some("hidden"));
        assert_eq!(doc.style_property(body, "overflow").as_deref(), Some("hidden"));
        doc.set_style_property(body, "overflow", None);
        assert_eq!(doc.style_property(body, "overflow"), None);
    }

    #[test]
    fn reset_from_restores_attributes_and_subtree() {
        let original = Document::parse(PAGE);
        let mut doc = original.clone();
        let div = doc.find(".box").unwrap().unwrap();
        doc.set_attr(div, "data-x", "1");
        doc.set_inner_html(div, "<em>new</em>");

        doc.reset_from(&original, div, true);
        assert_eq!(doc.to_html(), original.to_html());
        assert!(doc.find(".x").unwrap().is_some());
    }

    #[test]
    fn malformed_selector_is_an_error() {
        let doc = Document::parse(PAGE);
        assert!(matches!(doc.find("div[").unwrap_err(), Error::Selector { .. }));
        assert!(doc.find("").is_err());
    }
}
