//! Scroll-to-top button

use std::time::Duration;

use vcsio_dom::{Document, ElementId, ScrollBehavior};

use crate::hooks::NavContext;

const DISPLAY: &str = "display";
const OPACITY: &str = "opacity";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollToTop {
    button: ElementId,
}

impl ScrollToTop {
    pub fn find(doc: &Document, ctx: &NavContext) -> Option<Self> {
        doc.get_element_by_id(&ctx.hooks.scroll_to_top_id)
            .map(|button| Self { button })
    }

    pub fn button(&self) -> ElementId {
        self.button
    }

    /// React to the window offset. Shows the button past the threshold;
    /// otherwise starts the fade-out and returns how long to wait before
    /// calling [`ScrollToTop::on_fade_elapsed`].
    pub fn on_scroll(&self, doc: &mut Document, ctx: &NavContext) -> Option<Duration> {
        if doc.scroll_y() > ctx.settings.scroll_top_threshold {
            if doc.style(self.button, DISPLAY) != Some("flex") {
                doc.set_style(self.button, DISPLAY, "flex");
            }
            if doc.style(self.button, OPACITY) != Some("1") {
                doc.set_style(self.button, OPACITY, "1");
            }
            return None;
        }

        if doc.style(self.button, OPACITY) == Some("1") {
            doc.set_style(self.button, OPACITY, "0");
            return Some(ctx.settings.scroll_top_fade());
        }
        None
    }

    /// Hide the button once its fade-out finished, unless it was shown again
    pub fn on_fade_elapsed(&self, doc: &mut Document) {
        if doc.style(self.button, OPACITY) == Some("0") {
            doc.set_style(self.button, DISPLAY, "none");
        }
    }

    pub fn is_visible(&self, doc: &Document) -> bool {
        doc.style(self.button, DISPLAY) == Some("flex") && doc.style(self.button, OPACITY) == Some("1")
    }

    pub fn on_click(&self, doc: &mut Document) {
        doc.scroll_window_to(0.0, ScrollBehavior::Smooth);
    }
}

#[cfg(test)]
mod tests {
    use vcsio_dom::{Rect, Viewport};

    use super::*;
    use crate::hooks::Hooks;
    use crate::settings::NavSettings;

    fn setup() -> (Document, ScrollToTop, NavContext) {
        let ctx = NavContext::new(Hooks::default(), NavSettings::default()).unwrap();
        let mut doc = Document::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        doc.set_layout(root, Rect::new(0.0, 0.0, 800.0, 5000.0));
        let button = doc.append_element(root, "button");
        doc.set_attribute(button, "id", "scrollToTopBtn");
        let control = ScrollToTop::find(&doc, &ctx).unwrap();
        (doc, control, ctx)
    }

    #[test]
    fn test_threshold_boundary() {
        let (mut doc, control, ctx) = setup();
        assert!(!control.is_visible(&doc));

        doc.scroll_window_to(101.0, ScrollBehavior::Auto);
        assert!(control.on_scroll(&mut doc, &ctx).is_none());
        assert!(control.is_visible(&doc));

        doc.scroll_window_to(100.0, ScrollBehavior::Auto);
        assert_eq!(
            control.on_scroll(&mut doc, &ctx),
            Some(Duration::from_millis(300))
        );
        assert!(!control.is_visible(&doc));
        // Still laid out until the fade finishes
        assert_eq!(doc.style(control.button(), "display"), Some("flex"));

        control.on_fade_elapsed(&mut doc);
        assert_eq!(doc.style(control.button(), "display"), Some("none"));
    }

    #[test]
    fn test_reshown_during_fade() {
        let (mut doc, control, ctx) = setup();
        doc.scroll_window_to(500.0, ScrollBehavior::Auto);
        control.on_scroll(&mut doc, &ctx);
        doc.scroll_window_to(0.0, ScrollBehavior::Auto);
        control.on_scroll(&mut doc, &ctx);

        // Back down before the fade timer fires
        doc.scroll_window_to(300.0, ScrollBehavior::Auto);
        control.on_scroll(&mut doc, &ctx);
        control.on_fade_elapsed(&mut doc);
        assert!(control.is_visible(&doc));
    }

    #[test]
    fn test_no_fade_when_already_hidden() {
        let (mut doc, control, ctx) = setup();
        doc.scroll_window_to(50.0, ScrollBehavior::Auto);
        assert!(control.on_scroll(&mut doc, &ctx).is_none());
    }

    #[test]
    fn test_click_scrolls_to_top() {
        let (mut doc, control, _) = setup();
        doc.scroll_window_to(2000.0, ScrollBehavior::Auto);
        control.on_click(&mut doc);
        assert_eq!(doc.scroll_y(), 0.0);
        assert_eq!(doc.scroll_log().last().unwrap().behavior, ScrollBehavior::Smooth);
    }
}
