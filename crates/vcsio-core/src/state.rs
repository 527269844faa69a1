//! Mutable page state owned by the controller

use vcsio_navigation::{ApiNav, MobileMenu, PaperNav, ScrollToTop};
use vcsio_tabs::TabSwitcher;

use crate::timer::Timers;

#[derive(Debug)]
pub struct PageControllerState {
    pub switcher: TabSwitcher,
    /// Sticky header height as of the last load or resize
    pub header_height: f64,
    /// Paper scrollspy; present only after a successful paper load
    pub paper: Option<PaperNav>,
    /// API navigation; present only after a successful API load
    pub api: Option<ApiNav>,
    /// Bound on the first paper load and kept across tab switches
    pub menu: Option<MobileMenu>,
    pub scroll_to_top: Option<ScrollToTop>,
    pub timers: Timers,
    /// Window offset the scroll handlers last saw
    pub last_scroll_y: f64,
}

impl PageControllerState {
    pub fn new(switcher: TabSwitcher, header_height: f64, scroll_to_top: Option<ScrollToTop>) -> Self {
        Self {
            switcher,
            header_height,
            paper: None,
            api: None,
            menu: None,
            scroll_to_top,
            timers: Timers::new(),
            last_scroll_y: 0.0,
        }
    }

    /// Drop both scrollspies; each disconnects its observer first
    pub fn retire_observers(&mut self) {
        if let Some(mut paper) = self.paper.take() {
            paper.disconnect();
        }
        if let Some(mut api) = self.api.take() {
            api.disconnect();
        }
    }
}
