//! VCS.io Document Model
//!
//! A headless stand-in for the browser page: an element arena with classes,
//! attributes and inline styles, window and pane scroll offsets, and a
//! block-flow layout that assigns every element a box. Fragments are parsed
//! with `scraper` and grafted into the arena; CSS selectors use scraper's
//! grammar and are matched against the arena directly.

mod document;
mod error;
mod fragment;
mod geometry;
mod layout;
mod selector;

pub use document::{
    Document, Element, ElementId, ScrollBehavior, ScrollRecord, ScrollTarget, SCROLL_LOG_CAPACITY,
};
pub use error::DomError;
pub use geometry::{is_element_in_viewport, Rect, Viewport};
pub use layout::{BlockLayout, FIXED_HEIGHT_ATTR};
pub use selector::Selector;

pub type Result<T> = std::result::Result<T, DomError>;
