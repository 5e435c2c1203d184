//! Geometry and selection algebra.
//!
//! Pure helpers over axis-aligned rectangles in scene coordinates. Marquee
//! selection, hit testing and transform mapping are all expressed in terms of
//! [`intersects`] and [`contains`].

use serde::{Deserialize, Serialize};

/// A position in scene coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Return this point moved by `(dx, dy)`.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An axis-aligned rectangle. Well-formed rectangles have non-negative size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Build the rectangle spanned by two drag points.
    ///
    /// Top-left is the component-wise minimum and the size is the absolute
    /// delta, so the result is well-formed whatever the drag direction.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Self {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }

    /// Map `p` from the frame of `from` into the frame of `to`.
    ///
    /// A degenerate source axis maps every coordinate onto `to`'s origin on
    /// that axis.
    pub fn map_point(p: Point, from: &Rect, to: &Rect) -> Point {
        let sx = if from.width > 0.0 { to.width / from.width } else { 0.0 };
        let sy = if from.height > 0.0 { to.height / from.height } else { 0.0 };
        Point::new(to.x + (p.x - from.x) * sx, to.y + (p.y - from.y) * sy)
    }

    /// Map a rectangle from the frame of `from` into the frame of `to`.
    pub fn map_rect(r: &Rect, from: &Rect, to: &Rect) -> Rect {
        let a = Self::map_point(r.top_left(), from, to);
        let b = Self::map_point(Point::new(r.right(), r.bottom()), from, to);
        Rect::from_corners(a, b)
    }
}

/// True unless the rectangles are disjoint on either axis.
///
/// Touching edges count as intersecting.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    !(a.right() < b.left() || b.right() < a.left() || a.bottom() < b.top() || b.bottom() < a.top())
}

/// True iff `inner` lies entirely within `outer` on both axes.
pub fn contains(outer: &Rect, inner: &Rect) -> bool {
    inner.left() >= outer.left()
        && inner.top() >= outer.top()
        && inner.right() <= outer.right()
        && inner.bottom() <= outer.bottom()
}

/// Client bounds of a point list. An empty list yields a zero rect at the origin.
pub fn bounds_of_points(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::default();
    };

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// How a marquee rectangle matches shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Select shapes sharing any area with the marquee
    #[default]
    Intersect,
    /// Select only shapes fully inside the marquee
    Contain,
}

impl SelectionMode {
    pub fn matches(self, marquee: &Rect, shape_bounds: &Rect) -> bool {
        match self {
            SelectionMode::Intersect => intersects(shape_bounds, marquee),
            SelectionMode::Contain => contains(marquee, shape_bounds),
        }
    }
}
