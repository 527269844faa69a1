//! Fade-in reveal
//!
//! Revealing is one way: once an element carries the visible class nothing
//! here removes it again.

use vcsio_dom::{is_element_in_viewport, Document, ElementId, Selector};

pub fn mark_revealed(doc: &mut Document, target: ElementId, visible_class: &str) {
    doc.add_class(target, visible_class);
}

/// Reveal every element under `region` matching `selector` that is already
/// inside the viewport. Returns how many were revealed.
pub fn reveal_in_viewport(
    doc: &mut Document,
    region: ElementId,
    selector: &Selector,
    visible_class: &str,
) -> usize {
    let mut revealed = 0;
    for section in doc.select(region, selector) {
        if is_element_in_viewport(doc, Some(section)) {
            mark_revealed(doc, section, visible_class);
            revealed += 1;
        }
    }
    revealed
}

#[cfg(test)]
mod tests {
    use vcsio_dom::{BlockLayout, Viewport};

    use super::*;

    #[test]
    fn test_reveal_only_visible() {
        let mut doc = Document::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        let region = doc.append_element(root, "main");
        doc.set_inner_html(
            region,
            r#"<section id="a" class="fade-in-section" data-height="500"></section>
               <section id="b" class="fade-in-section" data-height="500"></section>
               <section id="c" class="fade-in-section" data-height="500"></section>"#,
        );
        BlockLayout::default().apply(&mut doc);

        let selector: Selector = ".fade-in-section".parse().unwrap();
        assert_eq!(reveal_in_viewport(&mut doc, region, &selector, "visible"), 2);

        let c = doc.get_element_by_id("c").unwrap();
        assert!(!doc.has_class(c, "visible"));
    }
}
