//! Document tree
//!
//! Elements live in an arena and are addressed by [`ElementId`]. Replacing
//! or removing children frees their subtrees; the slots are reused under a
//! new generation, so a stale handle never resolves to a newer element.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::fragment;
use crate::geometry::{Rect, Viewport};
use crate::selector::Selector;
use crate::Result;

pub(crate) const TEXT_TAG: &str = "#text";

/// Programmatic scroll requests kept for inspection, oldest dropped first
pub const SCROLL_LOG_CAPACITY: usize = 32;

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId {
    index: usize,
    generation: u32,
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}.{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollTarget {
    Window,
    Element(ElementId),
}

/// A programmatic scroll request, as issued (before clamping)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRecord {
    pub target: ScrollTarget,
    pub top: f64,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    /// Border box in document coordinates, ignoring every scroll offset
    layout: Rect,
    scroll_top: f64,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            style: BTreeMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            layout: Rect::default(),
            scroll_top: 0.0,
        }
    }

    fn text_node(text: &str) -> Self {
        let mut node = Self::new(TEXT_TAG);
        node.text = text.to_string();
        node
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    /// Own text for text nodes, empty for elements
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn layout(&self) -> Rect {
        self.layout
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// The page: element arena plus window state
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: ElementId,
    viewport: Viewport,
    scroll_y: f64,
    scroll_log: Vec<ScrollRecord>,
}

impl Document {
    /// Empty document whose root is a `body` element
    pub fn new(viewport: Viewport) -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                element: Some(Element::new("body")),
            }],
            free: Vec::new(),
            root: ElementId {
                index: 0,
                generation: 0,
            },
            viewport,
            scroll_y: 0.0,
            scroll_log: Vec::new(),
        }
    }

    /// Build a document from full page markup; the `body` contents become
    /// the root's children.
    pub fn parse(html: &str, viewport: Viewport) -> Self {
        let mut doc = Self::new(viewport);
        let root = doc.root;
        fragment::append_document_body(&mut doc, root, html);
        doc
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let max = self.max_window_scroll();
        self.scroll_y = self.scroll_y.clamp(0.0, max);
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_mut())
    }

    /// Number of live elements and text nodes, the root included
    pub fn node_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Allocated slots, live or free
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn alloc(&mut self, element: Element) -> ElementId {
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.element = Some(element);
                return ElementId {
                    index,
                    generation: slot.generation,
                };
            }
        }
        self.slots.push(Slot {
            generation: 0,
            element: Some(element),
        });
        ElementId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    /// Free `id` and everything below it
    fn release(&mut self, id: ElementId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(id.index)
                .filter(|slot| slot.generation == id.generation)
            else {
                continue;
            };
            let Some(element) = slot.element.take() else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(id.index);
            stack.extend(element.children);
        }
    }

    // === Tree construction ===

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.alloc(Element::new(tag))
    }

    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent == child || self.element(parent).is_none() || self.element(child).is_none() {
            return;
        }
        if self.contains(child, parent) {
            tracing::warn!(%parent, %child, "Refusing to append an ancestor to its descendant");
            return;
        }

        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    pub fn append_element(&mut self, parent: ElementId, tag: &str) -> ElementId {
        let child = self.create_element(tag);
        self.append_child(parent, child);
        child
    }

    pub fn append_text(&mut self, parent: ElementId, text: &str) -> ElementId {
        let child = self.alloc(Element::text_node(text));
        self.append_child(parent, child);
        child
    }

    /// Remove an element from its parent; it stays valid and can be
    /// appended again
    pub fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.element(id).and_then(Element::parent) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|c| *c != id);
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
    }

    /// Drop every child of `parent` together with its subtree
    pub fn remove_children(&mut self, parent: ElementId) {
        let children = self
            .node_mut(parent)
            .map(|node| std::mem::take(&mut node.children))
            .unwrap_or_default();
        for child in children {
            self.release(child);
        }
    }

    /// Replace every child of `parent` with the parsed fragment
    pub fn set_inner_html(&mut self, parent: ElementId, html: &str) {
        self.remove_children(parent);
        fragment::append_fragment(self, parent, html);
    }

    // === Attributes, classes, styles ===

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attr(name))
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if name == "class" {
            node.classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            if !node.has_class(class) {
                node.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            node.classes.retain(|c| c != class);
        }
    }

    /// Add the class when `present`, remove it otherwise
    pub fn toggle_class(&mut self, id: ElementId, class: &str, present: bool) {
        if present {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.style(property))
    }

    pub fn set_style(&mut self, id: ElementId, property: &str, value: &str) {
        if let Some(node) = self.node_mut(id) {
            node.style.insert(property.to_string(), value.to_string());
        }
    }

    // === Traversal and queries ===

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).and_then(Element::parent)
    }

    /// True when `node` is `ancestor` or lies below it
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// True when the element is reachable from the document root
    pub fn is_connected(&self, id: ElementId) -> bool {
        self.contains(self.root, id)
    }

    /// Element descendants of `root` in document order, excluding `root`
    /// itself and text nodes
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self
            .element(root)
            .map(|e| e.children.iter().rev().copied().collect())
            .unwrap_or_default();

        while let Some(id) = stack.pop() {
            let Some(node) = self.element(id) else {
                continue;
            };
            if node.is_text() {
                continue;
            }
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }

        out
    }

    pub fn first_element_child(&self, id: ElementId) -> Option<ElementId> {
        self.element(id)?
            .children
            .iter()
            .copied()
            .find(|c| self.element(*c).is_some_and(|e| !e.is_text()))
    }

    /// Find an element by its `id` attribute anywhere in the live tree
    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.find_by_id_within(self.root, id)
    }

    pub fn find_by_id_within(&self, root: ElementId, id: &str) -> Option<ElementId> {
        self.descendants(root)
            .into_iter()
            .find(|e| self.element(*e).and_then(Element::id) == Some(id))
    }

    pub fn select(&self, root: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|e| selector.matches(self, *e))
            .collect()
    }

    pub fn select_first(&self, root: ElementId, selector: &Selector) -> Option<ElementId> {
        self.descendants(root)
            .into_iter()
            .find(|e| selector.matches(self, *e))
    }

    /// Parse `selector` and run it below `root`
    pub fn query_all(&self, root: ElementId, selector: &str) -> Result<Vec<ElementId>> {
        let selector: Selector = selector.parse()?;
        Ok(self.select(root, &selector))
    }

    /// Nearest inclusive ancestor matching the selector
    pub fn closest(&self, id: ElementId, selector: &Selector) -> Option<ElementId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if selector.matches(self, node) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: ElementId, out: &mut String) {
        let Some(node) = self.element(id) else {
            return;
        };
        if node.is_text() {
            out.push_str(&node.text);
            return;
        }
        for child in &node.children {
            self.collect_text(*child, out);
        }
    }

    /// Serialize the children of `id` back to markup
    pub fn inner_html(&self, id: ElementId) -> String {
        let mut out = String::new();
        if let Some(node) = self.element(id) {
            for child in &node.children {
                self.write_html(*child, &mut out);
            }
        }
        out
    }

    fn write_html(&self, id: ElementId, out: &mut String) {
        let Some(node) = self.element(id) else {
            return;
        };
        if node.is_text() {
            out.push_str(&escape_text(&node.text));
            return;
        }

        out.push('<');
        out.push_str(&node.tag);
        if !node.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape_attr(&node.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &node.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');

        if VOID_TAGS.contains(&node.tag.as_str()) {
            return;
        }

        for child in &node.children {
            self.write_html(*child, out);
        }
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
    }

    // === Geometry ===

    pub fn layout(&self, id: ElementId) -> Option<Rect> {
        self.element(id).map(Element::layout)
    }

    pub fn set_layout(&mut self, id: ElementId, rect: Rect) {
        if let Some(node) = self.node_mut(id) {
            node.layout = rect;
        }
    }

    /// Layout height, the equivalent of `offsetHeight`
    pub fn offset_height(&self, id: ElementId) -> f64 {
        self.layout(id).map(|r| r.height).unwrap_or(0.0)
    }

    /// Box relative to the viewport after window and ancestor pane scrolling
    pub fn bounding_client_rect(&self, id: ElementId) -> Option<Rect> {
        let layout = self.layout(id)?;
        let mut offset = self.scroll_y;
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            offset += self.element(ancestor).map(Element::scroll_top).unwrap_or(0.0);
            current = self.parent(ancestor);
        }
        Some(layout.translate(0.0, -offset))
    }

    /// Height of an element's content, the equivalent of `scrollHeight`
    pub fn scroll_height(&self, id: ElementId) -> f64 {
        let Some(layout) = self.layout(id) else {
            return 0.0;
        };
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.layout(d))
            .map(|r| r.bottom() - layout.top())
            .fold(layout.height, f64::max)
    }

    pub fn document_height(&self) -> f64 {
        self.scroll_height(self.root)
    }

    fn max_window_scroll(&self) -> f64 {
        (self.document_height() - self.viewport.height).max(0.0)
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Scroll the window; the offset is clamped to the scrollable range.
    /// Smooth scrolls complete immediately in this model.
    pub fn scroll_window_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.record_scroll(ScrollTarget::Window, top, behavior);
        self.set_scroll_y(top);
    }

    /// Move the window as the reader would, without recording a scroll
    /// request
    pub fn set_scroll_y(&mut self, top: f64) {
        self.scroll_y = top.clamp(0.0, self.max_window_scroll());
    }

    pub fn scroll_top(&self, id: ElementId) -> f64 {
        self.element(id).map(Element::scroll_top).unwrap_or(0.0)
    }

    /// Set a pane's scroll offset directly, clamped to its content
    pub fn set_scroll_top(&mut self, id: ElementId, top: f64) {
        let max = (self.scroll_height(id) - self.offset_height(id)).max(0.0);
        if let Some(node) = self.node_mut(id) {
            node.scroll_top = top.clamp(0.0, max);
        }
    }

    pub fn scroll_element_to(&mut self, id: ElementId, top: f64, behavior: ScrollBehavior) {
        self.record_scroll(ScrollTarget::Element(id), top, behavior);
        self.set_scroll_top(id, top);
    }

    fn record_scroll(&mut self, target: ScrollTarget, top: f64, behavior: ScrollBehavior) {
        if self.scroll_log.len() >= SCROLL_LOG_CAPACITY {
            let excess = self.scroll_log.len() + 1 - SCROLL_LOG_CAPACITY;
            self.scroll_log.drain(..excess);
        }
        self.scroll_log.push(ScrollRecord {
            target,
            top,
            behavior,
        });
    }

    /// The most recent scroll requests, oldest first
    pub fn scroll_log(&self) -> &[ScrollRecord] {
        &self.scroll_log
    }

    pub fn take_scroll_log(&mut self) -> Vec<ScrollRecord> {
        std::mem::take(&mut self.scroll_log)
    }
}

fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(input: &str) -> String {
    escape_text(input).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_query() {
        let mut doc = Document::new(Viewport::default());
        let root = doc.root();
        let nav = doc.append_element(root, "nav");
        doc.set_attribute(nav, "id", "apiNavMenu");
        let link = doc.append_element(nav, "a");
        doc.set_attribute(link, "class", "api-nav-link  extra");

        assert_eq!(doc.get_element_by_id("apiNavMenu"), Some(nav));
        assert!(doc.has_class(link, "api-nav-link"));
        assert!(doc.has_class(link, "extra"));

        let found = doc.query_all(root, "#apiNavMenu .api-nav-link").unwrap();
        assert_eq!(found, vec![link]);
    }

    #[test]
    fn test_classes_are_unique() {
        let mut doc = Document::new(Viewport::default());
        let el = doc.append_element(doc.root(), "div");
        doc.add_class(el, "visible");
        doc.add_class(el, "visible");
        assert_eq!(doc.element(el).unwrap().classes().len(), 1);

        doc.toggle_class(el, "visible", false);
        assert!(!doc.has_class(el, "visible"));
    }

    #[test]
    fn test_replaced_children_are_disconnected() {
        let mut doc = Document::new(Viewport::default());
        let root = doc.root();
        let region = doc.append_element(root, "main");
        doc.set_inner_html(region, "<section id=\"old\">Old</section>");
        let old = doc.get_element_by_id("old").unwrap();
        assert!(doc.contains(region, old));

        doc.set_inner_html(region, "<section id=\"new\">New</section>");
        assert!(!doc.contains(region, old));
        assert!(!doc.is_connected(old));
        assert!(doc.get_element_by_id("old").is_none());
        assert!(doc.get_element_by_id("new").is_some());
    }

    #[test]
    fn test_replaced_slots_are_reused() {
        let mut doc = Document::new(Viewport::default());
        let region = doc.append_element(doc.root(), "main");
        doc.set_inner_html(region, "<section id=\"old\"><p>Old</p></section>");
        let old = doc.get_element_by_id("old").unwrap();
        let live = doc.node_count();
        let capacity = doc.capacity();

        for _ in 0..50 {
            doc.set_inner_html(region, "<section id=\"old\"><p>Old</p></section>");
        }
        assert_eq!(doc.node_count(), live);
        assert_eq!(doc.capacity(), capacity);

        // The first section's slot now holds a newer element
        assert!(doc.element(old).is_none());
        assert!(!doc.has_class(old, "visible"));
        doc.add_class(old, "visible");
        let current = doc.get_element_by_id("old").unwrap();
        assert_ne!(current, old);
        assert!(!doc.has_class(current, "visible"));
    }

    #[test]
    fn test_detached_element_survives() {
        let mut doc = Document::new(Viewport::default());
        let root = doc.root();
        let a = doc.append_element(root, "div");
        let b = doc.append_element(root, "div");
        doc.detach(a);
        assert!(!doc.is_connected(a));
        doc.append_child(b, a);
        assert!(doc.is_connected(a));
        assert_eq!(doc.parent(a), Some(b));
    }

    #[test]
    fn test_scroll_log_is_bounded() {
        let mut doc = Document::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        doc.set_layout(root, Rect::new(0.0, 0.0, 800.0, 5000.0));

        for i in 0..(SCROLL_LOG_CAPACITY * 3) {
            doc.scroll_window_to(i as f64, ScrollBehavior::Auto);
        }
        let log = doc.scroll_log();
        assert_eq!(log.len(), SCROLL_LOG_CAPACITY);
        assert_eq!(log.last().unwrap().top, (SCROLL_LOG_CAPACITY * 3 - 1) as f64);
        assert_eq!(log[0].top, (SCROLL_LOG_CAPACITY * 2) as f64);
    }

    #[test]
    fn test_client_rect_accounts_for_scrolling() {
        let mut doc = Document::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        doc.set_layout(root, Rect::new(0.0, 0.0, 800.0, 3000.0));
        let pane = doc.append_element(root, "div");
        doc.set_layout(pane, Rect::new(0.0, 100.0, 800.0, 400.0));
        let inner = doc.append_element(pane, "section");
        doc.set_layout(inner, Rect::new(0.0, 700.0, 800.0, 400.0));

        doc.scroll_window_to(50.0, ScrollBehavior::Auto);
        doc.set_scroll_top(pane, 300.0);

        let rect = doc.bounding_client_rect(inner).unwrap();
        assert_eq!(rect.top(), 700.0 - 50.0 - 300.0);
        assert_eq!(doc.bounding_client_rect(pane).unwrap().top(), 50.0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut doc = Document::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        doc.set_layout(root, Rect::new(0.0, 0.0, 800.0, 1000.0));

        doc.scroll_window_to(5000.0, ScrollBehavior::Smooth);
        assert_eq!(doc.scroll_y(), 400.0);
        doc.scroll_window_to(-20.0, ScrollBehavior::Auto);
        assert_eq!(doc.scroll_y(), 0.0);

        let log = doc.take_scroll_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].top, 5000.0);
        assert_eq!(log[0].behavior, ScrollBehavior::Smooth);
        assert!(doc.scroll_log().is_empty());
    }

    #[test]
    fn test_inner_html_escapes() {
        let mut doc = Document::new(Viewport::default());
        let p = doc.append_element(doc.root(), "p");
        doc.set_attribute(p, "class", "text-red-500");
        doc.append_text(p, "a < b & c");
        assert_eq!(
            doc.inner_html(doc.root()),
            "<p class=\"text-red-500\">a &lt; b &amp; c</p>"
        );
    }

    #[test]
    fn test_closest_and_first_child() {
        let mut doc = Document::new(Viewport::default());
        doc.set_inner_html(
            doc.root(),
            "<div class=\"tab-inner-content\">\n<section id=\"a\"><p id=\"p\">x</p></section></div>",
        );
        let p = doc.get_element_by_id("p").unwrap();
        let wrapper = doc
            .closest(p, &".tab-inner-content".parse().unwrap())
            .unwrap();
        assert!(doc.has_class(wrapper, "tab-inner-content"));
        // Leading whitespace text is skipped
        assert_eq!(doc.first_element_child(wrapper), doc.get_element_by_id("a"));
    }
}
