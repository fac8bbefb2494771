//! Grid snapping for object placement.

use crate::objects::ObjectClass;
use tilekit_core::{Point, Rect, Size};

pub use tilekit_settings::SnapTarget;

/// Aligns an object's position to a grid.
///
/// Positions are level locations of the object's origin point. The origin,
/// image bounds and mask bounds are in the object's image space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnappingManager {
    origin: Point,
    image_bounds: Rect,
    mask_bounds: Rect,
    grid: Size,
}

impl SnappingManager {
    pub fn new(origin: Point, image_bounds: Rect, mask_bounds: Rect, grid: Size) -> Self {
        Self {
            origin,
            image_bounds,
            mask_bounds,
            grid,
        }
    }

    pub fn for_class(class: &ObjectClass, grid: Size) -> Self {
        Self::new(class.origin, class.image_bounds, class.mask_bounds, grid)
    }

    pub fn grid(&self) -> Size {
        self.grid
    }

    /// Moves `point` so the `target` reference lands on the grid.
    ///
    /// For bounds targets the reference is the rectangle's top-left corner;
    /// for `Origin` it is the point itself. `None` and a degenerate grid
    /// return the point unchanged.
    pub fn translate(&self, point: Point, target: SnapTarget) -> Point {
        if self.grid.is_empty() {
            return point;
        }
        let reference = match target {
            SnapTarget::None => return point,
            SnapTarget::Origin => point,
            SnapTarget::ImageBounds => point + (self.image_bounds.location() - self.origin),
            SnapTarget::MaskBounds => point + (self.mask_bounds.location() - self.origin),
        };
        let snapped = Point::new(
            (reference.x / self.grid.width).round() * self.grid.width,
            (reference.y / self.grid.height).round() * self.grid.height,
        );
        point + (snapped - reference)
    }
}
