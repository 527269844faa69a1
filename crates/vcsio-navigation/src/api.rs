//! API tab navigation
//!
//! Split pane: a link list on the left and a scrollable pane of reference
//! sections on the right. The scrollspy is rooted at the pane, and link
//! clicks scroll the pane rather than the window.

use vcsio_dom::{Document, ElementId, ScrollBehavior};

use crate::hooks::NavContext;
use crate::observer::{
    IntersectionEntry, IntersectionObserver, Length, ObserverOptions, RootMargin,
};
use crate::reveal::mark_revealed;

#[derive(Debug)]
pub struct ApiNav {
    region: ElementId,
    pane: ElementId,
    links: Vec<ElementId>,
    sections: Vec<ElementId>,
    observer: Option<IntersectionObserver>,
    last_active: Option<ElementId>,
}

impl ApiNav {
    /// Collect the API elements from freshly loaded content and highlight
    /// the first link. `None` when the fragment has no scrollable pane.
    pub fn init(doc: &mut Document, region: ElementId, ctx: &NavContext) -> Option<Self> {
        let pane = doc.find_by_id_within(region, &ctx.hooks.api_pane_id)?;
        let links = doc.select(region, &ctx.selectors.api_links);
        let sections = doc.select(region, &ctx.selectors.api_sections);

        if let Some(first) = links.first() {
            doc.add_class(*first, &ctx.hooks.api_active_class);
        }

        tracing::debug!(
            links = links.len(),
            sections = sections.len(),
            "API navigation initialized"
        );

        Some(Self {
            region,
            pane,
            links,
            sections,
            observer: None,
            last_active: None,
        })
    }

    /// (Re)create the pane scrollspy. Returns false when there is nothing
    /// to observe.
    pub fn setup_observer(&mut self, doc: &Document, ctx: &NavContext) -> bool {
        self.disconnect();
        if self.sections.is_empty() || !doc.contains(self.region, self.pane) {
            return false;
        }

        let mut observer = IntersectionObserver::new(ObserverOptions {
            root: Some(self.pane),
            root_margin: RootMargin {
                top: Length::Px(-ctx.settings.api_margin_top),
                right: Length::Px(0.0),
                bottom: Length::Percent(-ctx.settings.api_bottom_margin_percent),
                left: Length::Px(0.0),
            },
            threshold: ctx.settings.scrollspy_threshold,
        });
        for section in &self.sections {
            observer.observe(*section);
        }

        self.observer = Some(observer);
        self.last_active = None;
        true
    }

    pub fn disconnect(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.disconnect();
        }
    }

    pub fn is_observing(&self) -> bool {
        self.observer.as_ref().is_some_and(IntersectionObserver::is_observing)
    }

    pub fn pane(&self) -> ElementId {
        self.pane
    }

    pub fn links(&self) -> &[ElementId] {
        &self.links
    }

    /// The link currently carrying the highlight class
    pub fn active_link(&self, doc: &Document, ctx: &NavContext) -> Option<ElementId> {
        self.links
            .iter()
            .copied()
            .find(|l| doc.has_class(*l, &ctx.hooks.api_active_class))
    }

    fn link_for_section(&self, doc: &Document, section_id: &str) -> Option<ElementId> {
        self.links.iter().copied().find(|l| {
            doc.attribute(*l, "href")
                .and_then(|href| href.strip_prefix('#'))
                == Some(section_id)
        })
    }

    fn highlight(&mut self, doc: &mut Document, link: ElementId, ctx: &NavContext) {
        for other in &self.links {
            doc.remove_class(*other, &ctx.hooks.api_active_class);
        }
        doc.add_class(link, &ctx.hooks.api_active_class);
        self.last_active = Some(link);
    }

    /// Highlight `link` and scroll the pane to its section, leaving a short
    /// lead-in unless the section is the pane's first child
    pub fn on_link_click(&mut self, doc: &mut Document, link: ElementId, ctx: &NavContext) -> Option<f64> {
        if !self.links.contains(&link) {
            return None;
        }
        self.highlight(doc, link, ctx);

        let id = doc.attribute(link, "href")?.strip_prefix('#')?.to_string();
        let target = doc.find_by_id_within(self.region, &id)?;
        let pane_top = doc.bounding_client_rect(self.pane)?.top();
        let target_top = doc.bounding_client_rect(target)?.top();

        let lead = if doc.first_element_child(self.pane) == Some(target) {
            0.0
        } else {
            ctx.settings.api_link_lead
        };
        let position = doc.scroll_top(self.pane) + (target_top - pane_top) - lead;
        doc.scroll_element_to(self.pane, position, ScrollBehavior::Smooth);

        tracing::debug!(section = %id, position, "Scrolling API pane");
        Some(position)
    }

    /// Deliver pending intersection changes; returns whether the callback ran
    pub fn process(&mut self, doc: &mut Document, tab_is_api: bool, ctx: &NavContext) -> bool {
        let Some(observer) = self.observer.as_mut() else {
            return false;
        };
        let entries = observer.take_records(doc);
        if entries.is_empty() {
            return false;
        }
        self.on_entries(doc, &entries, tab_is_api, ctx);
        true
    }

    /// Nudge the pane by a pixel and back, then deliver every entry once so
    /// the highlight reflects the settled layout
    pub fn nudge(&mut self, doc: &mut Document, tab_is_api: bool, ctx: &NavContext) {
        let top = doc.scroll_top(self.pane);
        doc.set_scroll_top(self.pane, top + 1.0);
        doc.set_scroll_top(self.pane, top);

        let Some(observer) = self.observer.as_mut() else {
            return;
        };
        let entries = observer.recheck(doc);
        tracing::trace!(entries = entries.len(), "API pane nudged");
        if !entries.is_empty() {
            self.on_entries(doc, &entries, tab_is_api, ctx);
        }
    }

    /// Scrollspy callback
    pub fn on_entries(
        &mut self,
        doc: &mut Document,
        entries: &[IntersectionEntry],
        tab_is_api: bool,
        ctx: &NavContext,
    ) {
        if !tab_is_api {
            return;
        }

        let mut best: Option<&IntersectionEntry> = None;
        for entry in entries {
            let target = entry.target;
            if !doc.contains(self.region, target) {
                continue;
            }

            let revealable = doc.has_class(target, &ctx.hooks.fade_in_class)
                || doc.has_class(target, &ctx.hooks.api_section_class);
            if entry.is_intersecting && revealable {
                mark_revealed(doc, target, &ctx.hooks.visible_class);
            }

            if entry.is_intersecting
                && best.map_or(true, |b| {
                    entry.bounding_client_rect.top() < b.bounding_client_rect.top()
                })
            {
                best = Some(entry);
            }
        }

        if let Some(best) = best {
            let link = doc
                .attribute(best.target, "id")
                .and_then(|id| self.link_for_section(doc, id));
            if let Some(link) = link {
                if self.last_active != Some(link) {
                    self.highlight(doc, link, ctx);
                }
            }
            return;
        }

        let any_intersecting = entries.iter().any(|e| e.is_intersecting);
        if !any_intersecting && self.last_active.is_some() && doc.scroll_top(self.pane) == 0.0 {
            if let Some(first) = self.links.first().copied() {
                self.highlight(doc, first, ctx);
            }
        }
    }
}

impl Drop for ApiNav {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use vcsio_dom::{BlockLayout, Viewport};

    use super::*;
    use crate::hooks::Hooks;
    use crate::settings::NavSettings;

    const API: &str = r##"<div class="flex">
        <nav id="apiNavMenu" data-height="200">
          <a class="api-nav-link" href="#overview">Overview</a>
          <a class="api-nav-link" href="#auth">Auth</a>
          <a class="api-nav-link" href="#commits">Commits</a>
        </nav>
        <div id="apiRightPane" data-height="500"><div id="apiContent">
          <section id="overview" class="api-section-content" data-height="400"></section>
          <section id="auth" class="api-section-content" data-height="400"></section>
          <section id="commits" class="api-section-content fade-in-section" data-height="800"></section>
        </div></div>
      </div>"##;

    fn ctx() -> NavContext {
        NavContext::new(Hooks::default(), NavSettings::default()).unwrap()
    }

    fn page() -> (Document, ElementId) {
        let mut doc = Document::new(Viewport::new(1280.0, 800.0));
        let root = doc.root();
        let region = doc.append_element(root, "main");
        doc.set_inner_html(region, API);
        BlockLayout::default().apply(&mut doc);
        (doc, region)
    }

    fn active_ids(doc: &Document, nav: &ApiNav) -> Vec<String> {
        nav.links()
            .iter()
            .filter(|l| doc.has_class(**l, "active-api-link"))
            .filter_map(|l| doc.attribute(*l, "href").map(|h| h[1..].to_string()))
            .collect()
    }

    #[test]
    fn test_init_highlights_first_link() {
        let ctx = ctx();
        let (mut doc, region) = page();
        let mut nav = ApiNav::init(&mut doc, region, &ctx).unwrap();
        assert_eq!(active_ids(&doc, &nav), vec!["overview"]);
        assert!(nav.setup_observer(&doc, &ctx));
        assert!(nav.is_observing());
    }

    #[test]
    fn test_missing_pane() {
        let ctx = ctx();
        let mut doc = Document::new(Viewport::default());
        let region = doc.append_element(doc.root(), "main");
        doc.set_inner_html(region, "<p>No pane here</p>");
        assert!(ApiNav::init(&mut doc, region, &ctx).is_none());
    }

    #[test]
    fn test_topmost_section_highlighted() {
        let ctx = ctx();
        let (mut doc, region) = page();
        let mut nav = ApiNav::init(&mut doc, region, &ctx).unwrap();
        nav.setup_observer(&doc, &ctx);
        nav.process(&mut doc, true, &ctx);
        assert_eq!(active_ids(&doc, &nav), vec!["overview"]);

        // Scroll so auth sits at the top of the pane
        let pane = nav.pane();
        doc.set_scroll_top(pane, 400.0);
        assert!(nav.process(&mut doc, true, &ctx));
        assert_eq!(active_ids(&doc, &nav), vec!["auth"]);

        let auth = doc.get_element_by_id("auth").unwrap();
        assert!(doc.has_class(auth, "visible"));
    }

    #[test]
    fn test_ignored_when_tab_inactive() {
        let ctx = ctx();
        let (mut doc, region) = page();
        let mut nav = ApiNav::init(&mut doc, region, &ctx).unwrap();
        nav.setup_observer(&doc, &ctx);
        let pane = nav.pane();
        doc.set_scroll_top(pane, 400.0);
        nav.process(&mut doc, false, &ctx);
        assert_eq!(active_ids(&doc, &nav), vec!["overview"]);
    }

    #[test]
    fn test_link_click_scrolls_pane() {
        let ctx = ctx();
        let (mut doc, region) = page();
        let mut nav = ApiNav::init(&mut doc, region, &ctx).unwrap();
        let links = nav.links().to_vec();

        // Auth starts 400px into the pane content
        let position = nav.on_link_click(&mut doc, links[1], &ctx).unwrap();
        assert_eq!(position, 390.0);
        assert_eq!(doc.scroll_top(nav.pane()), 390.0);
        assert_eq!(active_ids(&doc, &nav), vec!["auth"]);

        let log = doc.scroll_log();
        assert_eq!(log.last().unwrap().behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn test_first_child_has_no_lead_in() {
        let ctx = ctx();
        let mut doc = Document::new(Viewport::new(1280.0, 800.0));
        let region = doc.append_element(doc.root(), "main");
        doc.set_inner_html(
            region,
            r##"<nav id="apiNavMenu"><a class="api-nav-link" href="#first">First</a></nav>
                <div id="apiRightPane" data-height="300"><section id="first" data-height="600"></section></div>"##,
        );
        BlockLayout::default().apply(&mut doc);
        let mut nav = ApiNav::init(&mut doc, region, &ctx).unwrap();
        let pane = nav.pane();
        doc.set_scroll_top(pane, 100.0);

        let link = nav.links()[0];
        assert_eq!(nav.on_link_click(&mut doc, link, &ctx), Some(0.0));
    }

    #[test]
    fn test_top_of_pane_defaults_to_first_link() {
        let ctx = ctx();
        let (mut doc, region) = page();
        let mut nav = ApiNav::init(&mut doc, region, &ctx).unwrap();
        nav.setup_observer(&doc, &ctx);
        let links = nav.links().to_vec();
        nav.on_link_click(&mut doc, links[2], &ctx);

        let pane = nav.pane();
        doc.set_scroll_top(pane, 0.0);
        let commits = doc.get_element_by_id("commits").unwrap();
        let entries = vec![IntersectionEntry {
            target: commits,
            is_intersecting: false,
            intersection_ratio: 0.0,
            bounding_client_rect: doc.bounding_client_rect(commits).unwrap(),
            root_bounds: doc.viewport().rect(),
        }];
        nav.on_entries(&mut doc, &entries, true, &ctx);
        assert_eq!(active_ids(&doc, &nav), vec!["overview"]);
    }
}
