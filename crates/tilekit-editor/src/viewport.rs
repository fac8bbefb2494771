//! Viewport and coordinate transformation.
//!
//! Converts between view pixels and level coordinates. The scroll offset is
//! the level location shown at the view's top-left pixel; both axes grow
//! right and down.

use std::fmt;
use tilekit_core::constants::{MAX_ZOOM, MIN_ZOOM};
use tilekit_core::{Point, Rect, Size};
use tilekit_settings::ViewSettings;

/// Zoom and scroll state of the level view.
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    scroll: Point,
    view_width: f64,
    view_height: f64,
    /// Level area the view may scroll over.
    content: Rect,
}

impl Viewport {
    /// Creates a viewport of the given pixel size at zoom 1, scrolled to (0, 0).
    pub fn new(view_width: f64, view_height: f64) -> Self {
        Self {
            zoom: 1.0,
            scroll: Point::zero(),
            view_width,
            view_height,
            content: Rect::new(0.0, 0.0, view_width, view_height),
        }
    }

    pub fn from_settings(settings: &ViewSettings, content: Rect) -> Self {
        let mut viewport = Self::new(settings.width, settings.height).with_content(content);
        viewport.set_zoom(settings.zoom);
        viewport
    }

    /// Sets the scrollable level area and clamps the scroll offset into it.
    pub fn with_content(mut self, content: Rect) -> Self {
        self.set_content(content);
        self
    }

    pub fn set_content(&mut self, content: Rect) {
        self.content = content;
        self.clamp_scroll();
    }

    pub fn content(&self) -> Rect {
        self.content
    }

    pub fn view_size(&self) -> Size {
        Size::new(self.view_width, self.view_height)
    }

    /// Sets the view dimensions (typically called when the window resizes).
    pub fn set_view_size(&mut self, width: f64, height: f64) {
        self.view_width = width;
        self.view_height = height;
        self.clamp_scroll();
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped between the minimum and maximum zoom.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
            self.clamp_scroll();
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * 1.2);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / 1.2);
    }

    /// Zooms while keeping the level point under `pixel` fixed.
    pub fn zoom_to_point(&mut self, zoom: f64, pixel_x: f64, pixel_y: f64) {
        let anchor = self.pixel_to_world(pixel_x, pixel_y);
        self.set_zoom(zoom);
        self.scroll = Point::new(
            anchor.x - pixel_x / self.zoom,
            anchor.y - pixel_y / self.zoom,
        );
        self.clamp_scroll();
    }

    pub fn scroll_offset(&self) -> Point {
        self.scroll
    }

    /// Scrolls so `offset` is at the top-left, clamped to the scrollable range.
    pub fn scroll_to(&mut self, offset: Point) {
        self.scroll = offset;
        self.clamp_scroll();
    }

    /// Scrolls by a distance in view pixels. Returns the applied distance in level units.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) -> Point {
        let before = self.scroll;
        self.scroll = self.scroll.offset(dx / self.zoom, dy / self.zoom);
        self.clamp_scroll();
        self.scroll - before
    }

    /// Scrolls so `point` is at the view centre, as far as the limits allow.
    pub fn center_on(&mut self, point: Point) {
        let visible = self.visible_region();
        self.scroll_to(Point::new(
            point.x - visible.width / 2.0,
            point.y - visible.height / 2.0,
        ));
    }

    /// Range of valid scroll offsets as a rectangle of top-left positions.
    pub fn scroll_limits(&self) -> Rect {
        let visible = self.visible_size();
        Rect::new(
            self.content.left(),
            self.content.top(),
            (self.content.width - visible.width).max(0.0),
            (self.content.height - visible.height).max(0.0),
        )
    }

    fn visible_size(&self) -> Size {
        Size::new(self.view_width / self.zoom, self.view_height / self.zoom)
    }

    fn clamp_scroll(&mut self) {
        let limits = self.scroll_limits();
        self.scroll = Point::new(
            self.scroll.x.clamp(limits.left(), limits.right()),
            self.scroll.y.clamp(limits.top(), limits.bottom()),
        );
    }

    /// Level area currently shown.
    pub fn visible_region(&self) -> Rect {
        let size = self.visible_size();
        Rect::new(self.scroll.x, self.scroll.y, size.width, size.height)
    }

    /// Level location at the centre of the view.
    pub fn center(&self) -> Point {
        self.visible_region().center()
    }

    /// Converts a view pixel to a level location.
    pub fn pixel_to_world(&self, pixel_x: f64, pixel_y: f64) -> Point {
        Point::new(
            self.scroll.x + pixel_x / self.zoom,
            self.scroll.y + pixel_y / self.zoom,
        )
    }

    /// Converts a level location to a view pixel.
    pub fn world_to_pixel(&self, point: Point) -> (f64, f64) {
        (
            (point.x - self.scroll.x) * self.zoom,
            (point.y - self.scroll.y) * self.zoom,
        )
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Viewport(zoom: {:.2}x, scroll: {}, view: {:.0}x{:.0})",
            self.zoom, self.scroll, self.view_width, self.view_height
        )
    }
}
