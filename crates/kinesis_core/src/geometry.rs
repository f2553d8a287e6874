//! Geometry types and element identity
//!
//! Page coordinates are in CSS pixels with the origin at the top-left of the
//! document (not the viewport). Viewport-relative math lives in
//! `kinesis_reveal`.

use rustc_hash::{FxHashMap, FxHasher};
use std::fmt;
use std::hash::{Hash, Hasher};

// ─────────────────────────────────────────────────────────────────────────────
// Core Geometry Types
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert to a Rect at the origin (0, 0)
    pub const fn to_rect(self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self,
        }
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Y coordinate of the bottom edge
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.size.width
            && point.y >= self.origin.y
            && point.y <= self.bottom()
    }

    /// Offset the rect by a delta
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Rect {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: self.size,
        }
    }

    /// Point at the given fractions of the rect's width and height
    pub fn point_at(&self, fx: f32, fy: f32) -> Point {
        Point::new(
            self.origin.x + self.size.width * fx,
            self.origin.y + self.size.height * fy,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Element Identity
// ─────────────────────────────────────────────────────────────────────────────

/// Stable identifier of a page element.
///
/// Ids are hashed from content keys such as `"skills/manual-therapy"`, so the
/// same logical element keeps its id when a list is filtered or reordered.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Derive an id from a content key
    pub fn from_key(key: &str) -> Self {
        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Derive the id of a keyed child of this element
    pub fn child(self, key: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.0.hash(&mut hasher);
        key.hash(&mut hasher);
        Self(hasher.finish())
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({:016x})", self.0)
    }
}

/// Where elements currently are on the page.
///
/// Returns `None` for elements that are not laid out (never mounted or
/// already removed). Callers treat that as "nothing to observe".
pub trait LayoutSource {
    fn bounds(&self, element: ElementId) -> Option<Rect>;
}

impl LayoutSource for FxHashMap<ElementId, Rect> {
    fn bounds(&self, element: ElementId) -> Option<Rect> {
        self.get(&element).copied()
    }
}
