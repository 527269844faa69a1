//! Tab buttons
//!
//! A primary tab button carries two data attributes:
//! - `data-tab`: the tab kind
//! - `data-source`: URL of the HTML fragment for that tab

use serde::{Deserialize, Serialize};
use vcsio_dom::{Document, ElementId};

use crate::error::TabError;
use crate::kind::TabKind;
use crate::Result;

pub const TAB_ATTR: &str = "data-tab";
pub const SOURCE_ATTR: &str = "data-source";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabButton {
    /// The button element
    pub element: ElementId,
    pub kind: TabKind,
    /// Fragment URL, possibly relative
    pub source: String,
}

impl TabButton {
    /// Read a tab button's data attributes
    pub fn from_element(doc: &Document, element: ElementId) -> Result<Self> {
        let missing = |attribute: &str| TabError::MissingAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        };

        let kind = doc
            .attribute(element, TAB_ATTR)
            .ok_or_else(|| missing(TAB_ATTR))?
            .parse()?;

        let source = doc
            .attribute(element, SOURCE_ATTR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| missing(SOURCE_ATTR))?
            .to_string();

        Ok(Self {
            element,
            kind,
            source,
        })
    }
}
