//! Host events

use std::time::Duration;

use vcsio_dom::{ElementId, Viewport};

/// Everything the host page can report to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// A primary tab button was clicked
    TabClicked(ElementId),
    /// A paper section link in the secondary navigation was clicked
    PaperLinkClicked(ElementId),
    /// The paper mobile menu button was clicked
    PaperMenuToggled,
    /// A link in the API tab's link list was clicked
    ApiLinkClicked(ElementId),
    /// The reader scrolled the window
    WindowScrolled { top: f64 },
    /// The reader scrolled the API pane
    PaneScrolled { top: f64 },
    Resized(Viewport),
    ScrollToTopClicked,
    /// Time passed; due timers fire
    Tick(Duration),
}
