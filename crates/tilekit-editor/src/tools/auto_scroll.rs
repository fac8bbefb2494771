//! Edge auto-scroll for drag gestures.

use super::PointerEventInfo;
use crate::viewport::Viewport;
use tilekit_core::Point;
use tilekit_settings::AutoScrollSettings;

/// Scrolls the viewport while a dragged pointer sits near its edge.
///
/// The tool feeds every update through [`AutoScroll::track`]; the host calls
/// the tool's tick on a timer, which calls [`AutoScroll::tick`]. A tick only
/// does anything between [`AutoScroll::begin`] and [`AutoScroll::end`], and
/// it returns the adjusted pointer event instead of calling back into the
/// tool, so the update path is never re-entered from within itself.
#[derive(Debug, Clone)]
pub struct AutoScroll {
    enabled: bool,
    edge_margin: f64,
    max_speed: f64,
    active: bool,
    /// Last pointer position in view pixels, with the event it came from.
    last: Option<((f64, f64), PointerEventInfo)>,
    velocity: Point,
}

impl AutoScroll {
    pub fn new(settings: &AutoScrollSettings) -> Self {
        Self {
            enabled: settings.enabled,
            edge_margin: settings.edge_margin.max(f64::EPSILON),
            max_speed: settings.max_speed,
            active: false,
            last: None,
            velocity: Point::zero(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current scroll velocity in view pixels per tick.
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub fn begin(&mut self) {
        self.active = self.enabled;
        self.last = None;
        self.velocity = Point::zero();
    }

    pub fn end(&mut self) {
        self.active = false;
        self.last = None;
        self.velocity = Point::zero();
    }

    /// Records the latest pointer event and recomputes the velocity.
    pub fn track(&mut self, viewport: &Viewport, info: &PointerEventInfo) {
        if !self.active {
            return;
        }
        let pixel = viewport.world_to_pixel(info.position);
        let view = viewport.view_size();
        self.velocity = Point::new(
            self.axis_speed(pixel.0, view.width),
            self.axis_speed(pixel.1, view.height),
        );
        self.last = Some((pixel, *info));
    }

    fn axis_speed(&self, pixel: f64, extent: f64) -> f64 {
        let near = self.edge_margin - pixel;
        let far = pixel - (extent - self.edge_margin);
        let proximity = if near > 0.0 {
            -(near / self.edge_margin)
        } else if far > 0.0 {
            far / self.edge_margin
        } else {
            0.0
        };
        proximity.clamp(-1.0, 1.0) * self.max_speed
    }

    /// Advances the viewport one step. Returns the pointer event re-expressed at
    /// the new scroll position, or `None` if nothing scrolled.
    pub fn tick(&mut self, viewport: &mut Viewport) -> Option<PointerEventInfo> {
        if !self.active || self.velocity == Point::zero() {
            return None;
        }
        let ((px, py), info) = self.last?;
        let moved = viewport.scroll_by(self.velocity.x, self.velocity.y);
        if moved == Point::zero() {
            return None;
        }
        Some(PointerEventInfo {
            position: viewport.pixel_to_world(px, py),
            ..info
        })
    }
}
