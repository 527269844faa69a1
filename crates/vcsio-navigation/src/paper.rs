//! Paper tab navigation
//!
//! The section links live in the page's secondary navigation bar, outside
//! the content region, so they survive content reloads. The scrollspy
//! observer is rebuilt for every load and whenever the sticky header height
//! changes, because its top margin is derived from that height.

use vcsio_dom::{Document, ElementId, ScrollBehavior};

use crate::hooks::NavContext;
use crate::observer::{
    IntersectionEntry, IntersectionObserver, Length, ObserverOptions, RootMargin,
};
use crate::reveal::mark_revealed;

/// Mobile section menu: a toggle button and the panel it opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobileMenu {
    panel: ElementId,
    button: ElementId,
}

impl MobileMenu {
    pub fn find(doc: &Document, ctx: &NavContext) -> Option<Self> {
        let panel = doc.get_element_by_id(&ctx.hooks.paper_sections_nav_id)?;
        let button = doc.get_element_by_id(&ctx.hooks.paper_menu_button_id)?;
        Some(Self { panel, button })
    }

    pub fn panel(&self) -> ElementId {
        self.panel
    }

    pub fn button(&self) -> ElementId {
        self.button
    }

    pub fn is_open(&self, doc: &Document, ctx: &NavContext) -> bool {
        !doc.has_class(self.panel, &ctx.hooks.hidden_class)
    }

    /// Flip the panel; returns whether it is now open
    pub fn toggle(&self, doc: &mut Document, ctx: &NavContext) -> bool {
        let opening = !self.is_open(doc, ctx);
        doc.toggle_class(self.panel, &ctx.hooks.hidden_class, !opening);
        doc.toggle_class(self.panel, &ctx.hooks.desktop_flex_class, opening);
        doc.set_attribute(self.button, "aria-expanded", if opening { "true" } else { "false" });
        tracing::debug!(open = opening, "Paper menu toggled");
        opening
    }

    pub fn close(&self, doc: &mut Document, ctx: &NavContext) {
        doc.add_class(self.panel, &ctx.hooks.hidden_class);
        doc.remove_class(self.panel, &ctx.hooks.desktop_flex_class);
        doc.set_attribute(self.button, "aria-expanded", "false");
    }

    /// Close the panel if it is open on a narrow viewport
    pub fn close_if_mobile(&self, doc: &mut Document, ctx: &NavContext) -> bool {
        let narrow = ctx.settings.is_mobile(doc.viewport().width);
        if narrow && self.is_open(doc, ctx) {
            self.close(doc, ctx);
            return true;
        }
        false
    }
}

/// Smoothly scroll the window so the section named by `link`'s `#id` href
/// sits just below the sticky header. Returns the requested offset, or
/// `None` when the link or its target is missing.
pub fn scroll_to_section(
    doc: &mut Document,
    region: ElementId,
    link: ElementId,
    header_height: f64,
    ctx: &NavContext,
) -> Option<f64> {
    let id = doc.attribute(link, "href")?.strip_prefix('#')?.to_string();
    let target = doc.find_by_id_within(region, &id)?;
    let rect = doc.bounding_client_rect(target)?;

    let position = rect.top() + doc.scroll_y();
    let offset = position - header_height - ctx.settings.paper_link_offset;
    doc.scroll_window_to(offset, ScrollBehavior::Smooth);

    tracing::debug!(section = %id, offset, "Scrolling to paper section");
    Some(offset)
}

fn link_target(doc: &Document, link: ElementId) -> Option<&str> {
    doc.attribute(link, "href")?.strip_prefix('#')
}

/// Paper scrollspy over the loaded paper content
#[derive(Debug)]
pub struct PaperNav {
    region: ElementId,
    secondary_nav: Option<ElementId>,
    links: Vec<ElementId>,
    hero: Option<ElementId>,
    header_height: f64,
    observer: IntersectionObserver,
    active_section: Option<String>,
}

impl PaperNav {
    /// Build the scrollspy for the paper content currently in `region`
    pub fn setup(
        doc: &mut Document,
        region: ElementId,
        header_height: f64,
        tab_is_paper: bool,
        ctx: &NavContext,
    ) -> Self {
        let links = doc.select(doc.root(), &ctx.selectors.paper_links);
        let hero = doc.find_by_id_within(region, &ctx.hooks.hero_id);
        let sections = doc.select(region, &ctx.selectors.content_sections);

        let mut observer = IntersectionObserver::new(ObserverOptions {
            root: None,
            root_margin: RootMargin {
                top: Length::Px(-(header_height + ctx.settings.scrollspy_header_padding)),
                right: Length::Px(0.0),
                bottom: Length::Percent(-ctx.settings.paper_bottom_margin_percent),
                left: Length::Px(0.0),
            },
            threshold: ctx.settings.scrollspy_threshold,
        });
        if let Some(hero) = hero {
            observer.observe(hero);
        }
        for section in &sections {
            observer.observe(*section);
        }

        tracing::debug!(
            sections = sections.len(),
            links = links.len(),
            hero = hero.is_some(),
            margin = %observer.options().root_margin,
            "Paper scrollspy set up"
        );

        let mut nav = Self {
            region,
            secondary_nav: doc.get_element_by_id(&ctx.hooks.secondary_nav_id),
            links,
            hero,
            header_height,
            observer,
            active_section: None,
        };

        if tab_is_paper {
            let initial_limit = nav.hero_scaled(
                doc,
                ctx.settings.hero_initial_fraction,
                ctx.settings.no_hero_initial_offset,
            );
            if doc.scroll_y() < initial_limit {
                let abstract_section = ctx.settings.abstract_section.clone();
                nav.highlight(doc, Some(&abstract_section), ctx);
            }
        }

        nav
    }

    pub fn disconnect(&mut self) {
        self.observer.disconnect();
    }

    pub fn observer(&self) -> &IntersectionObserver {
        &self.observer
    }

    pub fn header_height(&self) -> f64 {
        self.header_height
    }

    pub fn links(&self) -> &[ElementId] {
        &self.links
    }

    /// Section id currently highlighted, if any
    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    /// Deliver pending intersection changes; returns whether the callback ran
    pub fn process(&mut self, doc: &mut Document, tab_is_paper: bool, ctx: &NavContext) -> bool {
        let entries = self.observer.take_records(doc);
        if entries.is_empty() {
            return false;
        }
        self.on_entries(doc, &entries, tab_is_paper, ctx);
        true
    }

    /// Scrollspy callback
    pub fn on_entries(
        &mut self,
        doc: &mut Document,
        entries: &[IntersectionEntry],
        tab_is_paper: bool,
        ctx: &NavContext,
    ) {
        if !tab_is_paper {
            self.highlight(doc, None, ctx);
            return;
        }

        let mut topmost: Option<(String, f64)> = None;
        let mut hero_intersecting = false;

        for entry in entries {
            let target = entry.target;
            // Stale entries from a replaced tree
            if !doc.contains(self.region, target) {
                continue;
            }

            if entry.is_intersecting && doc.has_class(target, &ctx.hooks.fade_in_class) {
                mark_revealed(doc, target, &ctx.hooks.visible_class);
            }
            if !entry.is_intersecting {
                continue;
            }

            if Some(target) == self.hero {
                hero_intersecting = true;
                continue;
            }
            if doc.closest(target, &ctx.selectors.tab_inner_content).is_none() {
                continue;
            }
            let Some(id) = doc.attribute(target, "id") else {
                continue;
            };

            let top = entry.bounding_client_rect.top();
            if topmost.as_ref().map_or(true, |(_, best)| top < *best) {
                topmost = Some((id.to_string(), top));
            }
        }

        let nav_visible = self
            .secondary_nav
            .is_some_and(|nav| !doc.has_class(nav, &ctx.hooks.hidden_class));
        if !nav_visible {
            return;
        }

        let abstract_limit = self.hero_scaled(
            doc,
            ctx.settings.hero_abstract_fraction,
            ctx.settings.no_hero_abstract_offset,
        );
        let mut highlight = topmost.map(|(id, _)| id);
        if highlight.is_none() && (hero_intersecting || doc.scroll_y() < abstract_limit) {
            highlight = Some(ctx.settings.abstract_section.clone());
        }
        self.highlight(doc, highlight.as_deref(), ctx);

        if highlight.is_none() && doc.scroll_y() > abstract_limit {
            if let Some(closest) = self.closest_to_header(doc, ctx) {
                tracing::trace!(section = %closest, "Scrollspy fell back to closest section");
                self.highlight(doc, Some(&closest), ctx);
            }
        }
    }

    /// Section whose top edge is nearest the reading line below the header,
    /// among sections still plausibly on screen
    fn closest_to_header(&self, doc: &Document, ctx: &NavContext) -> Option<String> {
        let reading_line = self.header_height + ctx.settings.scrollspy_header_padding;
        let lower_limit = doc.viewport().height * ctx.settings.fallback_viewport_fraction;

        let mut closest: Option<(String, f64)> = None;
        for section in doc.select(self.region, &ctx.selectors.content_sections) {
            let Some(id) = doc.attribute(section, "id").filter(|id| !id.is_empty()) else {
                continue;
            };
            let Some(rect) = doc.bounding_client_rect(section) else {
                continue;
            };
            if rect.top() >= lower_limit || rect.bottom() <= reading_line {
                continue;
            }

            let distance = (rect.top() - reading_line).abs();
            if closest.as_ref().map_or(true, |(_, best)| distance < *best) {
                closest = Some((id.to_string(), distance));
            }
        }
        closest.map(|(id, _)| id)
    }

    /// Hero height scaled by `fraction`, or `fallback` without a hero
    fn hero_scaled(&self, doc: &Document, fraction: f64, fallback: f64) -> f64 {
        match self.hero {
            Some(hero) => doc.offset_height(hero) * fraction,
            None => fallback,
        }
    }

    /// Exclusively highlight the link for `section`; `None` clears all
    fn highlight(&mut self, doc: &mut Document, section: Option<&str>, ctx: &NavContext) {
        for link in &self.links {
            let active = section.is_some() && link_target(doc, *link) == section;
            doc.toggle_class(*link, &ctx.hooks.active_class, active);
        }
        self.active_section = section.map(str::to_string);
    }
}

impl Drop for PaperNav {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
