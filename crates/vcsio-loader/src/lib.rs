//! VCS.io Content Loader
//!
//! Fetches a tab's HTML fragment and swaps it into the content region.
//! Fetch failures never escape a load: they are rendered as an inline
//! message and logged.
//!
//! Fragment sources:
//! - [`HttpFragmentSource`]: plain HTTP GET, relative URLs joined to a base
//! - [`DirectoryFragmentSource`]: files under a local site directory
//! - [`StaticFragmentSource`]: fixed in-memory responses

mod error;
mod loader;
mod source;
mod typeset;

pub use error::FetchError;
pub use loader::{ContentLoader, LoadOutcome, ERROR_MESSAGE_CLASSES};
pub use source::{DirectoryFragmentSource, FragmentSource, HttpFragmentSource, StaticFragmentSource};
pub use typeset::Typesetter;

pub type Result<T> = std::result::Result<T, FetchError>;
