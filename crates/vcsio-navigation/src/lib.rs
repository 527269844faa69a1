//! VCS.io Secondary Navigation
//!
//! - Paper tab: section scrollspy over the window, link scrolling below the
//!   sticky header, and the mobile section menu
//! - API tab: scrollspy rooted at the right-hand pane, pane-relative link
//!   scrolling
//! - Scroll-to-top button driven by the window offset
//!
//! Viewport intersection is modelled by [`IntersectionObserver`], which
//! reports only targets whose intersection state changed since the last
//! delivery.

mod api;
mod error;
mod hooks;
mod observer;
mod paper;
mod reveal;
mod scroll_top;
mod settings;

pub use api::ApiNav;
pub use error::NavigationError;
pub use hooks::{Hooks, NavContext, PageSelectors};
pub use observer::{IntersectionEntry, IntersectionObserver, Length, ObserverOptions, RootMargin};
pub use paper::{scroll_to_section, MobileMenu, PaperNav};
pub use reveal::{mark_revealed, reveal_in_viewport};
pub use scroll_top::ScrollToTop;
pub use settings::NavSettings;

pub type Result<T> = std::result::Result<T, NavigationError>;
