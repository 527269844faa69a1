//! Page controller
//!
//! Tab switches run in two halves around the fragment fetch:
//! [`PageController::begin_tab_switch`] updates the tab highlight and tears
//! down the scrollspies synchronously, [`PageController::finish_tab_switch`]
//! renders the response if its ticket is still the newest. After every
//! event that can move content the live observers are pumped.

use std::sync::Arc;
use std::time::Duration;

use vcsio_dom::{BlockLayout, Document, ElementId, ScrollBehavior, Viewport};
use vcsio_loader::{ContentLoader, FragmentSource, LoadOutcome, Typesetter};
use vcsio_navigation::{
    reveal_in_viewport, scroll_to_section, ApiNav, MobileMenu, NavContext, PaperNav, ScrollToTop,
};
use vcsio_tabs::{LoadTicket, TabKind, TabSwitcher};

use crate::config::Config;
use crate::error::CoreError;
use crate::event::PageEvent;
use crate::state::PageControllerState;
use crate::timer::TimerAction;
use crate::Result;

pub struct PageController<S> {
    doc: Document,
    region: ElementId,
    loader: ContentLoader<S>,
    ctx: NavContext,
    layout: BlockLayout,
    state: PageControllerState,
}

impl<S: FragmentSource> PageController<S> {
    /// Bind to a host page. Fails when the content region is missing or a
    /// configured selector does not parse.
    pub fn new(mut doc: Document, source: S, config: &Config) -> Result<Self> {
        let ctx = NavContext::new(config.hooks.clone(), config.nav.clone())?;
        let region = doc
            .get_element_by_id(&ctx.hooks.content_region_id)
            .ok_or_else(|| CoreError::MissingElement(format!("#{}", ctx.hooks.content_region_id)))?;

        let layout = config.layout.clone();
        layout.apply(&mut doc);

        let switcher = TabSwitcher::discover(&doc, &ctx.selectors.tab_buttons, &ctx.hooks.active_class);
        let scroll_to_top = ScrollToTop::find(&doc, &ctx);
        let header_height = sticky_header_height(&doc, &ctx);

        let mut state = PageControllerState::new(switcher, header_height, scroll_to_top);
        state.last_scroll_y = doc.scroll_y();

        tracing::info!(
            tabs = state.switcher.buttons().len(),
            header_height,
            scroll_to_top = scroll_to_top.is_some(),
            "Page controller created"
        );

        Ok(Self {
            doc,
            region,
            loader: ContentLoader::new(source),
            ctx,
            layout,
            state,
        })
    }

    pub fn with_typesetter(mut self, typesetter: Arc<dyn Typesetter>) -> Self {
        self.loader = self.loader.with_typesetter(typesetter);
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Direct access for hosts that restyle the page outside of events;
    /// follow up with [`PageEvent::Resized`] so geometry is recomputed
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn region(&self) -> ElementId {
        self.region
    }

    pub fn state(&self) -> &PageControllerState {
        &self.state
    }

    pub fn context(&self) -> &NavContext {
        &self.ctx
    }

    pub fn source(&self) -> &S {
        self.loader.source()
    }

    pub fn active_tab(&self) -> Option<TabKind> {
        self.state.switcher.active()
    }

    /// Load the initial tab: the button marked active, else the first one
    pub async fn start(&mut self) -> Option<LoadOutcome> {
        let Some(button) = self.state.switcher.initial_button(&self.doc) else {
            tracing::warn!("No tab buttons found, nothing to load");
            return None;
        };
        self.switch_tab(button).await
    }

    pub async fn switch_tab(&mut self, button: ElementId) -> Option<LoadOutcome> {
        let ticket = self.begin_tab_switch(button)?;
        let result = self.loader.fetch(&ticket.source).await;
        Some(self.finish_tab_switch(ticket, result))
    }

    pub async fn dispatch(&mut self, event: PageEvent) {
        tracing::trace!(?event, "Dispatching page event");

        match event {
            PageEvent::TabClicked(button) => {
                self.switch_tab(button).await;
            }
            PageEvent::PaperLinkClicked(link) => self.on_paper_link(link),
            PageEvent::PaperMenuToggled => {
                if let Some(menu) = self.state.menu {
                    menu.toggle(&mut self.doc, &self.ctx);
                    self.relayout();
                    self.settle();
                }
            }
            PageEvent::ApiLinkClicked(link) => {
                if let Some(api) = self.state.api.as_mut() {
                    api.on_link_click(&mut self.doc, link, &self.ctx);
                    self.settle();
                }
            }
            PageEvent::WindowScrolled { top } => {
                self.doc.set_scroll_y(top);
                self.settle();
            }
            PageEvent::PaneScrolled { top } => {
                if let Some(pane) = self.state.api.as_ref().map(ApiNav::pane) {
                    self.doc.set_scroll_top(pane, top);
                    self.settle();
                }
            }
            PageEvent::Resized(viewport) => self.on_resize(viewport),
            PageEvent::ScrollToTopClicked => {
                if let Some(button) = self.state.scroll_to_top {
                    button.on_click(&mut self.doc);
                    self.settle();
                }
            }
            PageEvent::Tick(elapsed) => self.on_tick(elapsed),
        }
    }

    /// Activate `button`'s tab and tear down both scrollspies. Returns the
    /// ticket the fetched response must present, or `None` when `button`
    /// is not a tab button.
    pub fn begin_tab_switch(&mut self, button: ElementId) -> Option<LoadTicket> {
        let ticket = match self.state.switcher.activate(&mut self.doc, button) {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::warn!(%button, error = %e, "Ignoring tab switch");
                return None;
            }
        };

        if let Some(nav) = self.doc.get_element_by_id(&self.ctx.hooks.secondary_nav_id) {
            self.doc
                .toggle_class(nav, &self.ctx.hooks.hidden_class, !ticket.kind.shows_secondary_nav());
        }
        if ticket.kind != TabKind::Paper {
            if let Some(menu) = self.state.menu {
                menu.close_if_mobile(&mut self.doc, &self.ctx);
            }
        }

        self.state.retire_observers();

        tracing::info!(tab = %ticket.kind, source = %ticket.source, seq = ticket.seq, "Switching tab");
        Some(ticket)
    }

    /// Render a fetched response. Responses for superseded tickets are
    /// dropped without touching the page.
    pub fn finish_tab_switch(
        &mut self,
        ticket: LoadTicket,
        result: vcsio_loader::Result<String>,
    ) -> LoadOutcome {
        if !self.state.switcher.is_current(&ticket) {
            tracing::debug!(tab = %ticket.kind, seq = ticket.seq, "Discarding superseded tab load");
            return LoadOutcome::Superseded;
        }

        let outcome = self.loader.apply(&mut self.doc, self.region, result);
        self.relayout();
        if outcome.is_loaded() {
            self.init_tab(ticket.kind);
        }

        self.state.header_height = sticky_header_height(&self.doc, &self.ctx);
        self.doc.scroll_window_to(0.0, ScrollBehavior::Auto);
        self.settle();

        tracing::info!(tab = %ticket.kind, loaded = outcome.is_loaded(), "Tab load finished");
        outcome
    }

    fn init_tab(&mut self, kind: TabKind) {
        let visible = self.ctx.hooks.visible_class.clone();

        match kind {
            TabKind::Paper => {
                if let Some(menu) = MobileMenu::find(&self.doc, &self.ctx) {
                    self.state.menu = Some(menu);
                }
                self.state.paper = Some(PaperNav::setup(
                    &mut self.doc,
                    self.region,
                    self.state.header_height,
                    self.state.switcher.is_active(TabKind::Paper),
                    &self.ctx,
                ));
                reveal_in_viewport(&mut self.doc, self.region, &self.ctx.selectors.fade_in, &visible);
            }
            TabKind::Api => {
                if let Some(mut api) = ApiNav::init(&mut self.doc, self.region, &self.ctx) {
                    if api.setup_observer(&self.doc, &self.ctx) {
                        self.schedule_api_nudge();
                    }
                    self.state.api = Some(api);
                }
                reveal_in_viewport(&mut self.doc, self.region, &self.ctx.selectors.api_reveal, &visible);
            }
            TabKind::Example => {
                reveal_in_viewport(&mut self.doc, self.region, &self.ctx.selectors.fade_in, &visible);
            }
        }
    }

    fn schedule_api_nudge(&mut self) {
        if self.state.switcher.is_active(TabKind::Api) {
            let delay = self.ctx.settings.api_nudge_delay();
            self.state.timers.schedule(delay, TimerAction::ApiNudge);
        }
    }

    fn on_paper_link(&mut self, link: ElementId) {
        if !self.ctx.selectors.paper_links.matches(&self.doc, link) {
            return;
        }

        scroll_to_section(
            &mut self.doc,
            self.region,
            link,
            self.state.header_height,
            &self.ctx,
        );
        if let Some(menu) = self.state.menu {
            if menu.close_if_mobile(&mut self.doc, &self.ctx) {
                self.relayout();
            }
        }
        self.settle();
    }

    fn on_resize(&mut self, viewport: Viewport) {
        self.doc.set_viewport(viewport);
        self.relayout();
        self.state.header_height = sticky_header_height(&self.doc, &self.ctx);

        if self.state.paper.take().is_some() {
            self.state.paper = Some(PaperNav::setup(
                &mut self.doc,
                self.region,
                self.state.header_height,
                self.state.switcher.is_active(TabKind::Paper),
                &self.ctx,
            ));
        }

        let api_observing = self.state.api.as_ref().is_some_and(ApiNav::is_observing);
        if api_observing {
            if let Some(api) = self.state.api.as_mut() {
                api.setup_observer(&self.doc, &self.ctx);
            }
            self.schedule_api_nudge();
        }

        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            header_height = self.state.header_height,
            "Viewport resized"
        );
        self.settle();
    }

    fn on_tick(&mut self, elapsed: Duration) {
        let until = self.state.timers.now() + elapsed;

        while let Some(action) = self.state.timers.pop_due(until) {
            match action {
                TimerAction::HideScrollToTop => {
                    if let Some(button) = self.state.scroll_to_top {
                        button.on_fade_elapsed(&mut self.doc);
                    }
                }
                TimerAction::ApiNudge => {
                    let tab_is_api = self.state.switcher.is_active(TabKind::Api);
                    if let Some(api) = self.state.api.as_mut() {
                        api.nudge(&mut self.doc, tab_is_api, &self.ctx);
                    }
                }
            }
        }

        self.state.timers.advance_to(until);
        self.settle();
    }

    fn relayout(&mut self) {
        self.layout.apply(&mut self.doc);
    }

    /// Run the scroll handlers if the window moved, then deliver pending
    /// intersection changes to the live scrollspies
    fn settle(&mut self) {
        let scroll_y = self.doc.scroll_y();
        if scroll_y != self.state.last_scroll_y {
            self.state.last_scroll_y = scroll_y;
            if let Some(button) = self.state.scroll_to_top {
                if let Some(fade) = button.on_scroll(&mut self.doc, &self.ctx) {
                    self.state.timers.schedule(fade, TimerAction::HideScrollToTop);
                }
            }
        }

        let tab_is_paper = self.state.switcher.is_active(TabKind::Paper);
        if let Some(paper) = self.state.paper.as_mut() {
            paper.process(&mut self.doc, tab_is_paper, &self.ctx);
        }
        let tab_is_api = self.state.switcher.is_active(TabKind::Api);
        if let Some(api) = self.state.api.as_mut() {
            api.process(&mut self.doc, tab_is_api, &self.ctx);
        }
    }
}

fn sticky_header_height(doc: &Document, ctx: &NavContext) -> f64 {
    doc.select_first(doc.root(), &ctx.selectors.sticky_header)
        .map(|header| doc.offset_height(header))
        .unwrap_or(0.0)
}
