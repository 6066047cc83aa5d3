//! Pan/zoom camera used to derive viewport bounds in logical coordinates.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

use crate::units::{MIN_SCALE, Unit, UnitConfig};

/// Camera manages the view transform for the drawing plane.
///
/// The zoom doubles as the grid scale, so it never drops below
/// [`MIN_SCALE`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan) in screen pixels.
    pub offset: Vec2,
    /// Current zoom level.
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: MIN_SCALE,
            max_zoom: 20.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// World to screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Screen to world transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.zoom = new_zoom;

        let new_screen = self.world_to_screen(world_point);
        self.offset += screen_point - new_screen;
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }

    /// Visible area of a `size` pixel surface, in logical coordinates.
    pub fn viewport_bounds(&self, size: Size) -> Rect {
        let top_left = self.screen_to_world(Point::ZERO);
        let bottom_right = self.screen_to_world(Point::new(size.width, size.height));
        Rect::from_points(top_left, bottom_right)
    }

    /// Unit configuration at the current zoom.
    pub fn unit_config(&self, unit: Unit) -> UnitConfig {
        UnitConfig::new(unit, self.zoom.max(MIN_SCALE))
    }
}
