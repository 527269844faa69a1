//! Boxes, viewport size and the viewport visibility check

use serde::{Deserialize, Serialize};

use crate::document::{Document, ElementId};

/// Axis-aligned box in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Overlapping region of two boxes.
    ///
    /// Edge-adjacent boxes yield a zero-area intersection rather than `None`,
    /// so a zero-height target sitting on the root edge still counts.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());

        if left > right || top > bottom {
            return None;
        }

        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// Size of the window's layout viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Whether any part of the element's box lies inside the viewport.
///
/// Absent elements are never visible.
pub fn is_element_in_viewport(doc: &Document, element: Option<ElementId>) -> bool {
    let Some(element) = element else {
        return false;
    };
    let Some(rect) = doc.bounding_client_rect(element) else {
        return false;
    };
    let viewport = doc.viewport();

    rect.top() < viewport.height
        && rect.bottom() >= 0.0
        && rect.left() < viewport.width
        && rect.right() >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));

        let far = Rect::new(300.0, 300.0, 10.0, 10.0);
        assert!(a.intersection(&far).is_none());

        // Touching edges produce an empty box
        let below = Rect::new(0.0, 100.0, 100.0, 10.0);
        assert_eq!(a.intersection(&below).map(|r| r.area()), Some(0.0));
    }

    #[test]
    fn test_negative_size_clamped() {
        let r = Rect::new(0.0, 0.0, -5.0, 10.0);
        assert_eq!(r.width, 0.0);
    }

    #[test]
    fn test_in_viewport() {
        let mut doc = Document::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        let visible = doc.append_element(root, "section");
        let hidden = doc.append_element(root, "section");
        doc.set_layout(visible, Rect::new(0.0, 100.0, 800.0, 200.0));
        doc.set_layout(hidden, Rect::new(0.0, 900.0, 800.0, 200.0));

        assert!(is_element_in_viewport(&doc, Some(visible)));
        assert!(!is_element_in_viewport(&doc, Some(hidden)));
        assert!(!is_element_in_viewport(&doc, None));
    }

    #[test]
    fn test_in_viewport_bottom_edge() {
        let mut doc = Document::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        let edge = doc.append_element(root, "div");
        // Bottom exactly at the top of the viewport still counts
        doc.set_layout(edge, Rect::new(0.0, -50.0, 800.0, 50.0));
        assert!(is_element_in_viewport(&doc, Some(edge)));

        // Top exactly at the viewport height does not
        doc.set_layout(edge, Rect::new(0.0, 600.0, 800.0, 50.0));
        assert!(!is_element_in_viewport(&doc, Some(edge)));
    }
}
