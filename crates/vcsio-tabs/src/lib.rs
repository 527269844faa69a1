//! VCS.io Content Tabs
//!
//! The page has exactly three primary tabs: paper, API reference and
//! example. Exactly one is active at a time; activating a tab issues a
//! [`LoadTicket`] for its fragment, and only the newest ticket may render.

mod error;
mod kind;
mod switcher;
mod tab;

pub use error::TabError;
pub use kind::TabKind;
pub use switcher::{LoadTicket, TabSwitcher};
pub use tab::TabButton;

pub type Result<T> = std::result::Result<T, TabError>;
