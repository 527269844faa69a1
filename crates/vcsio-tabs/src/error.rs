//! Tab error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabError {
    #[error("Unknown tab kind: {0}")]
    UnknownKind(String),

    #[error("Tab button {element} is missing the {attribute} attribute")]
    MissingAttribute { element: String, attribute: String },

    #[error("Not a tab button: {0}")]
    NotATabButton(String),
}
