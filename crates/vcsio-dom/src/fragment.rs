//! Grafting parsed HTML into the arena

use scraper::{ElementRef, Html, Node, Selector};

use crate::document::{Document, ElementId};

/// Parse `html` as a fragment and append its nodes under `parent`
pub(crate) fn append_fragment(doc: &mut Document, parent: ElementId, html: &str) {
    let fragment = Html::parse_fragment(html);
    if !fragment.errors.is_empty() {
        tracing::debug!(errors = fragment.errors.len(), "Fragment parsed with recoverable errors");
    }
    graft_children(doc, parent, fragment.root_element());
}

/// Parse a full page and append the contents of its `body` under `parent`
pub(crate) fn append_document_body(doc: &mut Document, parent: ElementId, html: &str) {
    let page = Html::parse_document(html);
    let body = Selector::parse("body")
        .ok()
        .and_then(|sel| page.select(&sel).next());

    match body {
        Some(body) => graft_children(doc, parent, body),
        None => graft_children(doc, parent, page.root_element()),
    }
}

fn graft_children(doc: &mut Document, parent: ElementId, source: ElementRef<'_>) {
    for child in source.children() {
        match child.value() {
            Node::Text(text) => {
                doc.append_text(parent, text);
            }
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    graft_element(doc, parent, element);
                }
            }
            _ => {}
        }
    }
}

fn graft_element(doc: &mut Document, parent: ElementId, source: ElementRef<'_>) {
    let value = source.value();
    let id = doc.append_element(parent, value.name());
    for (name, attr) in value.attrs() {
        doc.set_attribute(id, name, attr);
    }
    graft_children(doc, id, source);
}

#[cfg(test)]
mod tests {
    use crate::geometry::Viewport;

    use super::*;

    #[test]
    fn test_fragment_attributes() {
        let mut doc = Document::new(Viewport::default());
        let root = doc.root();
        append_fragment(
            &mut doc,
            root,
            r##"<nav id="apiNavMenu"><a class="api-nav-link" href="#auth">Auth</a></nav>"##,
        );

        let nav = doc.get_element_by_id("apiNavMenu").unwrap();
        let link = doc.first_element_child(nav).unwrap();
        assert_eq!(doc.attribute(link, "href"), Some("#auth"));
        assert!(doc.has_class(link, "api-nav-link"));
        assert_eq!(doc.text_content(nav), "Auth");
    }

    #[test]
    fn test_document_body() {
        let doc = Document::parse(
            "<!DOCTYPE html><html><head><title>t</title></head>\
             <body><header class=\"sticky-header\"></header><main id=\"mainContentContainer\"></main></body></html>",
            Viewport::default(),
        );
        let root = doc.root();
        let children: Vec<_> = doc.descendants(root);
        assert_eq!(children.len(), 2);
        assert!(doc.get_element_by_id("mainContentContainer").is_some());
    }
}
