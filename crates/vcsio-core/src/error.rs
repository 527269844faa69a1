//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Document error: {0}")]
    Dom(#[from] vcsio_dom::DomError),

    #[error("Tab error: {0}")]
    Tab(#[from] vcsio_tabs::TabError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] vcsio_navigation::NavigationError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] vcsio_loader::FetchError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Required element not found: {0}")]
    MissingElement(String),
}
