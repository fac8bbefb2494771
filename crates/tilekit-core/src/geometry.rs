//! Geometry value types for level space and view space.
//!
//! `Point`, `Size` and `Rect` are continuous (level units or view pixels);
//! `TileCoord` and `TileRegion` address grid cells.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// A point in level or view space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Returns this point offset by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns true if either dimension is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle with its top-left corner at `(x, y)`.
///
/// Width and height are never negative; use [`Rect::from_points`] to build a
/// rectangle from two arbitrary corners.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates the normalized rectangle spanned by two corners.
    pub fn from_points(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Top-left corner.
    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns true if the point lies inside the rectangle (right/bottom edges exclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Returns true if the two rectangles overlap with a non-zero area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Smallest rectangle containing both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Returns this rectangle moved by `delta`.
    pub fn translate(&self, delta: Point) -> Rect {
        Rect::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Bounding rectangle of a sequence of rectangles, `None` if empty.
    pub fn union_all<I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = Rect>,
    {
        rects.into_iter().reduce(|acc, r| acc.union(&r))
    }
}

/// Integer grid cell address.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    /// Creates a new cell coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// The four edge-adjacent neighbours (left, right, up, down).
    pub fn neighbors(self) -> [TileCoord; 4] {
        [
            TileCoord::new(self.x - 1, self.y),
            TileCoord::new(self.x + 1, self.y),
            TileCoord::new(self.x, self.y - 1),
            TileCoord::new(self.x, self.y + 1),
        ]
    }

    /// Cells on the straight line from `self` to `to`, both ends included.
    ///
    /// Uses Bresenham's algorithm so that consecutive cells share an edge or
    /// a corner; a fast pointer drag rasterised this way never skips a cell.
    pub fn line_to(self, to: TileCoord) -> Vec<TileCoord> {
        let (x0, y0) = (i64::from(self.x), i64::from(self.y));
        let (x1, y1) = (i64::from(to.x), i64::from(to.y));
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        let mut cells = Vec::with_capacity(usize::try_from(dx.max(-dy) + 1).unwrap_or(0));

        loop {
            // x and y stay between the two i32 endpoints
            cells.push(TileCoord::new(x as i32, y as i32));
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
        cells
    }
}

impl Add for TileCoord {
    type Output = TileCoord;

    fn add(self, rhs: TileCoord) -> TileCoord {
        TileCoord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for TileCoord {
    type Output = TileCoord;

    fn sub(self, rhs: TileCoord) -> TileCoord {
        TileCoord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// A rectangular block of grid cells, `width` × `height` cells starting at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl TileRegion {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The region spanned by two cells, both included.
    pub fn from_corners(a: TileCoord, b: TileCoord) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs() + 1, (a.y - b.y).abs() + 1)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    /// One past the last column.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the last row.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Number of cells in the region.
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.width as usize) * (self.height as usize)
        }
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        coord.x >= self.left()
            && coord.x < self.right()
            && coord.y >= self.top()
            && coord.y < self.bottom()
    }

    /// Overlap of two regions; empty when they do not overlap.
    pub fn intersect(&self, other: &TileRegion) -> TileRegion {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            TileRegion::new(left, top, 0, 0)
        } else {
            TileRegion::new(left, top, right - left, bottom - top)
        }
    }

    /// Smallest region containing both regions.
    pub fn union(&self, other: &TileRegion) -> TileRegion {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        TileRegion::new(left, top, right - left, bottom - top)
    }

    /// Returns this region moved by `delta`.
    pub fn translate(&self, delta: TileCoord) -> TileRegion {
        TileRegion::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Returns this region extended by `by` cells on every side.
    pub fn grow(&self, by: i32) -> TileRegion {
        TileRegion::new(
            self.x.saturating_sub(by),
            self.y.saturating_sub(by),
            self.width.saturating_add(by.saturating_mul(2)),
            self.height.saturating_add(by.saturating_mul(2)),
        )
    }

    /// Nearest cell of the region to `coord`. An empty region yields its corner.
    pub fn clamp(&self, coord: TileCoord) -> TileCoord {
        TileCoord::new(
            coord.x.clamp(self.left(), (self.right() - 1).max(self.left())),
            coord.y.clamp(self.top(), (self.bottom() - 1).max(self.top())),
        )
    }

    /// Row-major iterator over every cell in the region.
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> {
        let region = *self;
        (region.top()..region.bottom())
            .flat_map(move |y| (region.left()..region.right()).map(move |x| TileCoord::new(x, y)))
    }

    /// Centre of the region in cell units.
    pub fn center(&self) -> Point {
        Point::new(
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}
