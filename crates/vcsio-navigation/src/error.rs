//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavigationError {
    #[error("Document error: {0}")]
    Dom(#[from] vcsio_dom::DomError),

    #[error("Invalid root margin: {0}")]
    InvalidRootMargin(String),
}
