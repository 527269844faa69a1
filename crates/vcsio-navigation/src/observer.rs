//! Viewport intersection observation
//!
//! An observer measures its targets against a root box (the viewport, or a
//! scrollable element) grown or shrunk by a CSS-style root margin. Like the
//! browser API it reports a target only when its intersecting state changed
//! since the previous delivery; the first delivery after `observe` reports
//! every target.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use vcsio_dom::{Document, ElementId, Rect};

use crate::error::NavigationError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    /// Pixels for this length, percentages taken of `basis`
    pub fn resolve(&self, basis: f64) -> f64 {
        match self {
            Length::Px(px) => *px,
            Length::Percent(pct) => basis * pct / 100.0,
        }
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Length::Px(px) => write!(f, "{}px", px),
            Length::Percent(pct) => write!(f, "{}%", pct),
        }
    }
}

impl FromStr for Length {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NavigationError::InvalidRootMargin(s.to_string());
        let s = s.trim();
        if let Some(pct) = s.strip_suffix('%') {
            return pct.parse().map(Length::Percent).map_err(|_| invalid());
        }
        let px = s.strip_suffix("px").unwrap_or(s);
        match px.parse::<f64>() {
            Ok(v) if s.ends_with("px") || v == 0.0 => Ok(Length::Px(v)),
            _ => Err(invalid()),
        }
    }
}

/// Offsets applied to the root box; negative values shrink it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl RootMargin {
    pub fn zero() -> Self {
        Self {
            top: Length::Px(0.0),
            right: Length::Px(0.0),
            bottom: Length::Px(0.0),
            left: Length::Px(0.0),
        }
    }

    pub fn apply(&self, root: Rect) -> Rect {
        let top = self.top.resolve(root.height);
        let bottom = self.bottom.resolve(root.height);
        let left = self.left.resolve(root.width);
        let right = self.right.resolve(root.width);

        Rect::new(
            root.x - left,
            root.y - top,
            root.width + left + right,
            root.height + top + bottom,
        )
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for RootMargin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl FromStr for RootMargin {
    type Err = NavigationError;

    /// CSS margin shorthand with one to four values
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<Length>, _>>()?;

        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => (*top, *right, *bottom, *left),
            _ => return Err(NavigationError::InvalidRootMargin(s.to_string())),
        };

        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverOptions {
    /// Scroll container to measure against; `None` means the viewport
    pub root: Option<ElementId>,
    pub root_margin: RootMargin,
    /// Minimum visible fraction of the target
    pub threshold: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root: None,
            root_margin: RootMargin::zero(),
            threshold: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
    /// Target box relative to the viewport at measurement time
    pub bounding_client_rect: Rect,
    pub root_bounds: Rect,
}

#[derive(Debug, Clone)]
pub struct IntersectionObserver {
    options: ObserverOptions,
    targets: Vec<ElementId>,
    /// Intersecting state last delivered per target
    delivered: HashMap<ElementId, bool>,
}

impl IntersectionObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            targets: Vec::new(),
            delivered: HashMap::new(),
        }
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    pub fn observe(&mut self, target: ElementId) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }

    /// Stop watching every target
    pub fn disconnect(&mut self) {
        if !self.targets.is_empty() {
            tracing::trace!(targets = self.targets.len(), "Observer disconnected");
        }
        self.targets.clear();
        self.delivered.clear();
    }

    pub fn is_observing(&self) -> bool {
        !self.targets.is_empty()
    }

    /// The root box after margins, in viewport coordinates
    pub fn root_bounds(&self, doc: &Document) -> Option<Rect> {
        let root = match self.options.root {
            Some(element) => doc.bounding_client_rect(element)?,
            None => doc.viewport().rect(),
        };
        Some(self.options.root_margin.apply(root))
    }

    fn measure(&self, doc: &Document, root_bounds: Rect, target: ElementId) -> Option<IntersectionEntry> {
        let rect = doc.bounding_client_rect(target)?;
        let intersection = rect.intersection(&root_bounds);

        let ratio = match intersection {
            Some(hit) if rect.area() > 0.0 => hit.area() / rect.area(),
            Some(_) => 1.0,
            None => 0.0,
        };
        let is_intersecting = intersection.is_some() && ratio >= self.options.threshold && ratio > 0.0;

        Some(IntersectionEntry {
            target,
            is_intersecting,
            intersection_ratio: ratio,
            bounding_client_rect: rect,
            root_bounds,
        })
    }

    fn collect(&mut self, doc: &Document, force: bool) -> Vec<IntersectionEntry> {
        let Some(root_bounds) = self.root_bounds(doc) else {
            return Vec::new();
        };

        let mut records = Vec::new();
        for target in self.targets.clone() {
            let Some(entry) = self.measure(doc, root_bounds, target) else {
                continue;
            };
            let changed = self.delivered.get(&target) != Some(&entry.is_intersecting);
            if force || changed {
                self.delivered.insert(target, entry.is_intersecting);
                records.push(entry);
            }
        }
        records
    }

    /// Entries whose intersecting state changed since the last delivery
    pub fn take_records(&mut self, doc: &Document) -> Vec<IntersectionEntry> {
        self.collect(doc, false)
    }

    /// Entries for every target regardless of change
    pub fn recheck(&mut self, doc: &Document) -> Vec<IntersectionEntry> {
        self.collect(doc, true)
    }
}

#[cfg(test)]
mod tests {
    use vcsio_dom::{ScrollBehavior, Viewport};

    use super::*;

    #[test]
    fn test_parse_root_margin() {
        let margin: RootMargin = "-88px 0px -50% 0px".parse().unwrap();
        assert_eq!(margin.top, Length::Px(-88.0));
        assert_eq!(margin.bottom, Length::Percent(-50.0));
        assert_eq!(margin.to_string(), "-88px 0px -50% 0px");

        let uniform: RootMargin = "10px".parse().unwrap();
        assert_eq!(uniform.left, Length::Px(10.0));

        assert!("10em".parse::<RootMargin>().is_err());
        assert!("1px 2px 3px 4px 5px".parse::<RootMargin>().is_err());
        assert!("".parse::<RootMargin>().is_err());
    }

    #[test]
    fn test_margin_apply() {
        let margin: RootMargin = "-100px 0px -50% 0px".parse().unwrap();
        let bounds = margin.apply(Rect::new(0.0, 0.0, 1000.0, 800.0));
        assert_eq!(bounds, Rect::new(0.0, 100.0, 1000.0, 300.0));
    }

    fn page() -> (Document, ElementId, ElementId) {
        let mut doc = Document::new(Viewport::new(1000.0, 800.0));
        let root = doc.root();
        doc.set_layout(root, Rect::new(0.0, 0.0, 1000.0, 4000.0));
        let near = doc.append_element(root, "section");
        let far = doc.append_element(root, "section");
        doc.set_layout(near, Rect::new(0.0, 200.0, 1000.0, 300.0));
        doc.set_layout(far, Rect::new(0.0, 2000.0, 1000.0, 300.0));
        (doc, near, far)
    }

    #[test]
    fn test_first_delivery_reports_everything() {
        let (doc, near, far) = page();
        let mut observer = IntersectionObserver::new(ObserverOptions::default());
        observer.observe(near);
        observer.observe(far);

        let entries = observer.take_records(&doc);
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_intersecting);
        assert!(!entries[1].is_intersecting);

        // Nothing changed, nothing delivered
        assert!(observer.take_records(&doc).is_empty());
        assert_eq!(observer.recheck(&doc).len(), 2);
    }

    #[test]
    fn test_changes_after_scroll() {
        let (mut doc, near, far) = page();
        let mut observer = IntersectionObserver::new(ObserverOptions::default());
        observer.observe(near);
        observer.observe(far);
        observer.take_records(&doc);

        doc.scroll_window_to(1800.0, ScrollBehavior::Auto);
        let entries = observer.take_records(&doc);
        assert_eq!(entries.len(), 2);
        let far_entry = entries.iter().find(|e| e.target == far).unwrap();
        assert!(far_entry.is_intersecting);
        assert_eq!(far_entry.bounding_client_rect.top(), 200.0);
    }

    #[test]
    fn test_threshold_and_margin() {
        let (doc, near, _) = page();
        // Root shrunk to y in [600, 800): near (200..500) falls outside
        let mut observer = IntersectionObserver::new(ObserverOptions {
            root: None,
            root_margin: "-600px 0px 0px 0px".parse().unwrap(),
            threshold: 0.01,
        });
        observer.observe(near);
        let entries = observer.take_records(&doc);
        assert!(!entries[0].is_intersecting);
    }

    #[test]
    fn test_disconnect() {
        let (doc, near, _) = page();
        let mut observer = IntersectionObserver::new(ObserverOptions::default());
        observer.observe(near);
        observer.disconnect();
        assert!(!observer.is_observing());
        assert!(observer.take_records(&doc).is_empty());
    }
}
