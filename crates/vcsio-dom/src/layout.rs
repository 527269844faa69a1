//! Block-flow layout
//!
//! Every element is a full-width block stacked below its previous sibling.
//! Non-blank text contributes one line. An element carrying
//! [`FIXED_HEIGHT_ATTR`] gets exactly that height and lets its children
//! overflow, which is how scrollable panes and tall sections are sized.
//! Elements with the hidden class collapse to zero height.

use serde::{Deserialize, Serialize};

use crate::document::{Document, ElementId};
use crate::geometry::Rect;

pub const FIXED_HEIGHT_ATTR: &str = "data-height";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockLayout {
    /// Height of one line of text
    pub line_height: f64,
    /// Class that removes an element from the flow
    pub hidden_class: String,
}

impl Default for BlockLayout {
    fn default() -> Self {
        Self {
            line_height: 24.0,
            hidden_class: "hidden".to_string(),
        }
    }
}

impl BlockLayout {
    /// Lay out the whole document from the top-left corner
    pub fn apply(&self, doc: &mut Document) {
        let root = doc.root();
        let width = doc.viewport().width;
        let height = self.place(doc, root, 0.0, width, false);
        tracing::trace!(height, "Document laid out");
    }

    fn place(&self, doc: &mut Document, id: ElementId, y: f64, width: f64, collapsed: bool) -> f64 {
        let Some(element) = doc.element(id) else {
            return 0.0;
        };
        let children = element.children().to_vec();

        if element.is_text() {
            let height = if collapsed || element.text().trim().is_empty() {
                0.0
            } else {
                self.line_height
            };
            doc.set_layout(id, Rect::new(0.0, y, width, height));
            return height;
        }

        let collapsed = collapsed || element.has_class(&self.hidden_class);
        let fixed = element.attr(FIXED_HEIGHT_ATTR).and_then(parse_px);

        let mut cursor = y;
        for child in children {
            cursor += self.place(doc, child, cursor, width, collapsed);
        }

        let height = match (collapsed, fixed) {
            (true, _) => 0.0,
            (false, Some(fixed)) => fixed,
            (false, None) => cursor - y,
        };
        doc.set_layout(id, Rect::new(0.0, y, width, height));

        // Keep pane offsets inside the new content range
        let scroll_top = doc.scroll_top(id);
        if scroll_top > 0.0 {
            doc.set_scroll_top(id, scroll_top);
        }

        height
    }
}

fn parse_px(value: &str) -> Option<f64> {
    value
        .trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use crate::geometry::Viewport;

    use super::*;

    #[test]
    fn test_stacking() {
        let mut doc = Document::new(Viewport::new(1000.0, 600.0));
        let root = doc.root();
        doc.set_inner_html(
            root,
            r#"<header data-height="64"></header><main><section id="a">One</section><section id="b" data-height="300px">Two</section></main>"#,
        );
        BlockLayout::default().apply(&mut doc);

        let a = doc.get_element_by_id("a").unwrap();
        let b = doc.get_element_by_id("b").unwrap();
        assert_eq!(doc.layout(a).unwrap(), Rect::new(0.0, 64.0, 1000.0, 24.0));
        assert_eq!(doc.layout(b).unwrap().top(), 88.0);
        assert_eq!(doc.layout(b).unwrap().height, 300.0);
        assert_eq!(doc.document_height(), 388.0);
    }

    #[test]
    fn test_hidden_collapses() {
        let mut doc = Document::new(Viewport::default());
        let root = doc.root();
        doc.set_inner_html(
            root,
            r#"<header id="h"><div id="nav" class="hidden" data-height="40">Links</div><div data-height="60"></div></header>"#,
        );
        let layout = BlockLayout::default();
        layout.apply(&mut doc);
        let header = doc.get_element_by_id("h").unwrap();
        assert_eq!(doc.offset_height(header), 60.0);

        let nav = doc.get_element_by_id("nav").unwrap();
        doc.remove_class(nav, "hidden");
        layout.apply(&mut doc);
        assert_eq!(doc.offset_height(header), 100.0);
    }

    #[test]
    fn test_fixed_pane_overflows() {
        let mut doc = Document::new(Viewport::default());
        let root = doc.root();
        doc.set_inner_html(
            root,
            r#"<div id="pane" data-height="200"><section data-height="500"></section></div>"#,
        );
        BlockLayout::default().apply(&mut doc);
        let pane = doc.get_element_by_id("pane").unwrap();
        assert_eq!(doc.scroll_height(pane), 500.0);

        doc.set_scroll_top(pane, 1000.0);
        assert_eq!(doc.scroll_top(pane), 300.0);
    }
}
