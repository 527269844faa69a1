//! CSS selectors
//!
//! Selector lists are parsed with scraper's selector grammar and matched
//! against the arena through a [`selectors::Element`] view, so anything
//! `scraper::Selector::parse` accepts works here too.

use std::fmt;
use std::str::FromStr;

use scraper::error::SelectorErrorKind;
use scraper::selector::{CssLocalName, NonTSPseudoClass, PseudoElement, Simple};
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::bloom::BloomFilter;
use selectors::matching::{
    self, ElementSelectorFlags, MatchingContext, MatchingForInvalidation, MatchingMode,
    NeedsSelectorFlags, QuirksMode, SelectorCaches,
};
use selectors::parser::{ParseRelative, SelectorImpl, SelectorList};
use selectors::OpaqueElement;

use crate::document::{Document, Element, ElementId};
use crate::error::DomError;

type NamespaceUrl = <Simple as SelectorImpl>::NamespaceUrl;
type AttrValue = <Simple as SelectorImpl>::AttrValue;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    list: SelectorList<Simple>,
}

impl Selector {
    pub fn matches(&self, doc: &Document, id: ElementId) -> bool {
        let Some(element) = NodeRef::new(doc, id) else {
            return false;
        };

        let mut caches = SelectorCaches::default();
        let mut context = MatchingContext::new(
            MatchingMode::Normal,
            None,
            &mut caches,
            QuirksMode::NoQuirks,
            NeedsSelectorFlags::No,
            MatchingForInvalidation::No,
        );
        self.list
            .slice()
            .iter()
            .any(|selector| matching::matches_selector(selector, 0, None, &element, &mut context))
    }
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut input = cssparser::ParserInput::new(s);
        let mut parser = cssparser::Parser::new(&mut input);

        SelectorList::parse(&scraper::selector::Parser, &mut parser, ParseRelative::No)
            .map(|list| Self { list })
            .map_err(|e| DomError::InvalidSelector {
                selector: s.to_string(),
                reason: SelectorErrorKind::from(e).to_string(),
            })
    }
}

/// An element node of a [`Document`], as seen by the selector matcher
#[derive(Clone, Copy)]
struct NodeRef<'a> {
    doc: &'a Document,
    id: ElementId,
    node: &'a Element,
}

impl<'a> NodeRef<'a> {
    /// `None` for text nodes and stale ids
    fn new(doc: &'a Document, id: ElementId) -> Option<Self> {
        let node = doc.element(id).filter(|e| !e.is_text())?;
        Some(Self { doc, id, node })
    }

    fn sibling_element(&self, step: isize) -> Option<Self> {
        let siblings = self.doc.element(self.node.parent()?)?.children();
        let mut index = siblings.iter().position(|c| *c == self.id)?;
        loop {
            index = index.checked_add_signed(step)?;
            let sibling = *siblings.get(index)?;
            if let Some(found) = Self::new(self.doc, sibling) {
                return Some(found);
            }
        }
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {}>", self.node.tag(), self.id)
    }
}

impl selectors::Element for NodeRef<'_> {
    type Impl = Simple;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(self.node)
    }

    fn parent_element(&self) -> Option<Self> {
        Self::new(self.doc, self.node.parent()?)
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        self.sibling_element(-1)
    }

    fn next_sibling_element(&self) -> Option<Self> {
        self.sibling_element(1)
    }

    fn first_element_child(&self) -> Option<Self> {
        Self::new(self.doc, self.doc.first_element_child(self.id)?)
    }

    fn is_html_element_in_html_document(&self) -> bool {
        true
    }

    fn has_local_name(&self, name: &CssLocalName) -> bool {
        self.node.tag() == &*name.0
    }

    fn has_namespace(&self, ns: &NamespaceUrl) -> bool {
        ns.is_empty() || &**ns == HTML_NAMESPACE
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.node.tag() == other.node.tag()
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&NamespaceUrl>,
        local_name: &CssLocalName,
        operation: &AttrSelectorOperation<&AttrValue>,
    ) -> bool {
        if matches!(*ns, NamespaceConstraint::Specific(url) if !url.is_empty()) {
            return false;
        }
        if &*local_name.0 == "class" {
            let classes = self.node.classes();
            return !classes.is_empty() && operation.eval_str(&classes.join(" "));
        }
        self.node
            .attr(&local_name.0)
            .is_some_and(|value| operation.eval_str(value))
    }

    fn match_non_ts_pseudo_class(
        &self,
        _pc: &NonTSPseudoClass,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        false
    }

    fn match_pseudo_element(
        &self,
        _pe: &PseudoElement,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        false
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn is_link(&self) -> bool {
        self.node.tag() == "a" && self.node.attr("href").is_some()
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &CssLocalName, case_sensitivity: CaseSensitivity) -> bool {
        self.node
            .id()
            .is_some_and(|value| case_sensitivity.eq(id.0.as_bytes(), value.as_bytes()))
    }

    fn has_class(&self, name: &CssLocalName, case_sensitivity: CaseSensitivity) -> bool {
        self.node
            .classes()
            .iter()
            .any(|class| case_sensitivity.eq(name.0.as_bytes(), class.as_bytes()))
    }

    fn has_custom_state(&self, _name: &CssLocalName) -> bool {
        false
    }

    fn imported_part(&self, _name: &CssLocalName) -> Option<CssLocalName> {
        None
    }

    fn is_part(&self, _name: &CssLocalName) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        !self.node.children().iter().any(|child| {
            self.doc
                .element(*child)
                .is_some_and(|e| !e.is_text() || !e.text().is_empty())
        })
    }

    fn is_root(&self) -> bool {
        self.id == self.doc.root()
    }

    fn add_element_unique_hashes(&self, _filter: &mut BloomFilter) -> bool {
        false
    }
}
