//! Tab switch state machine
//!
//! Owns the active tab and the mutually exclusive highlight on the tab
//! buttons. Every activation issues a [`LoadTicket`] with a fresh sequence
//! number; a load may only render while its ticket is still the newest.

use serde::{Deserialize, Serialize};
use vcsio_dom::{Document, ElementId, Selector};

use crate::error::TabError;
use crate::kind::TabKind;
use crate::tab::TabButton;
use crate::Result;

/// Permission to render one fragment load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadTicket {
    pub seq: u64,
    pub kind: TabKind,
    pub source: String,
    pub button: ElementId,
}

#[derive(Debug, Clone)]
pub struct TabSwitcher {
    buttons: Vec<TabButton>,
    active: Option<TabKind>,
    /// Sequence number of the newest ticket issued
    latest: u64,
    active_class: String,
}

impl TabSwitcher {
    /// Collect the tab buttons matching `selector`. Buttons with unusable
    /// data attributes are skipped.
    pub fn discover(doc: &Document, selector: &Selector, active_class: &str) -> Self {
        let buttons: Vec<TabButton> = doc
            .select(doc.root(), selector)
            .into_iter()
            .filter_map(|element| match TabButton::from_element(doc, element) {
                Ok(button) => Some(button),
                Err(e) => {
                    tracing::warn!(%element, error = %e, "Skipping tab button");
                    None
                }
            })
            .collect();

        tracing::debug!(count = buttons.len(), "Discovered tab buttons");

        Self {
            buttons,
            active: None,
            latest: 0,
            active_class: active_class.to_string(),
        }
    }

    pub fn buttons(&self) -> &[TabButton] {
        &self.buttons
    }

    pub fn button(&self, element: ElementId) -> Option<&TabButton> {
        self.buttons.iter().find(|b| b.element == element)
    }

    pub fn button_for(&self, kind: TabKind) -> Option<&TabButton> {
        self.buttons.iter().find(|b| b.kind == kind)
    }

    pub fn active(&self) -> Option<TabKind> {
        self.active
    }

    pub fn is_active(&self, kind: TabKind) -> bool {
        self.active == Some(kind)
    }

    /// The button marked active in the markup, falling back to the first
    pub fn initial_button(&self, doc: &Document) -> Option<ElementId> {
        self.buttons
            .iter()
            .find(|b| doc.has_class(b.element, &self.active_class))
            .or_else(|| self.buttons.first())
            .map(|b| b.element)
    }

    /// Make `element`'s tab the active one and issue a ticket for its load
    pub fn activate(&mut self, doc: &mut Document, element: ElementId) -> Result<LoadTicket> {
        let button = self
            .button(element)
            .cloned()
            .ok_or_else(|| TabError::NotATabButton(element.to_string()))?;

        for other in &self.buttons {
            doc.remove_class(other.element, &self.active_class);
        }
        doc.add_class(button.element, &self.active_class);

        let previous = self.active.replace(button.kind);
        self.latest += 1;

        tracing::debug!(
            from = ?previous,
            to = %button.kind,
            seq = self.latest,
            "Tab activated"
        );

        Ok(LoadTicket {
            seq: self.latest,
            kind: button.kind,
            source: button.source,
            button: button.element,
        })
    }

    /// True while no newer ticket has been issued
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.seq == self.latest
    }
}
