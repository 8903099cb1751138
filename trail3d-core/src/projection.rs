/// Perspective projection from rotated model space to screen pixels
use nalgebra::{Point3, Rotation3};

use crate::transform::{RotationOrder, RotationState};

/// Smallest zoom factor accepted
pub const MIN_ZOOM: f64 = 0.01;
/// Largest zoom factor accepted; keeps `z + distance` away from zero
pub const MAX_ZOOM: f64 = 45.0;

/// Depth denominators closer to zero than this are not projected
const DEPTH_EPSILON: f64 = 1e-9;

/// Drawing area size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel centre of the viewport, rounded down to whole pixels
    pub fn center(&self) -> (f64, f64) {
        ((self.width / 2) as f64, (self.height / 2) as f64)
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height) as f64
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

/// Zoom factor clamped to `[MIN_ZOOM, MAX_ZOOM]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Zoom(f64);

impl Zoom {
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(1.0)
    }
}

impl From<f64> for Zoom {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Camera model turning a rotated point into screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lens {
    /// Scale follows the viewport: `min(w, h) / divisor`, foreshortened by
    /// `focal / (z + distance)` and multiplied by zoom.
    Viewport {
        divisor: f64,
        focal: f64,
        distance: f64,
    },
    /// Fixed focal length in pixels; zoom pulls the camera toward the model
    /// so the model sits at `z + distance / zoom`. Points at or behind the
    /// camera are not projected.
    Camera { distance: f64, focal: f64 },
}

/// Direction of model-space +y on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenY {
    /// Model +y maps to larger row indices
    Down,
    /// Model +y maps to smaller row indices
    Up,
}

/// A projected point in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    /// Reciprocal of the depth denominator; larger is closer to the camera
    pub inv_depth: f64,
}

impl Projected {
    /// Whole-pixel position, truncated toward negative infinity
    pub fn pixel(&self) -> (i64, i64) {
        (self.x.floor() as i64, self.y.floor() as i64)
    }
}

/// Rotation order plus lens for one figure type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub order: RotationOrder,
    pub lens: Lens,
    pub screen_y: ScreenY,
}

impl Projector {
    pub fn new(order: RotationOrder, lens: Lens, screen_y: ScreenY) -> Self {
        Self {
            order,
            lens,
            screen_y,
        }
    }

    /// Rotation for a pose, computed once and reused for every vertex
    pub fn rotation(&self, angles: &RotationState) -> Rotation3<f64> {
        self.order.matrix(angles)
    }

    /// Perspective-divide a point that is already in camera orientation
    pub fn project_rotated(
        &self,
        point: &Point3<f64>,
        viewport: Viewport,
        zoom: Zoom,
    ) -> Option<Projected> {
        if viewport.is_empty() {
            return None;
        }
        let (cx, cy) = viewport.center();

        let (factor, inv_depth) = match self.lens {
            Lens::Viewport {
                divisor,
                focal,
                distance,
            } => {
                let denom = point.z + distance;
                if denom.abs() < DEPTH_EPSILON {
                    return None;
                }
                let scale = viewport.min_side() / divisor;
                (scale * (focal / denom) * zoom.value(), 1.0 / denom)
            }
            Lens::Camera { distance, focal } => {
                let denom = point.z + distance / zoom.value();
                if denom < DEPTH_EPSILON {
                    return None;
                }
                let inv_depth = 1.0 / denom;
                (focal * inv_depth, inv_depth)
            }
        };

        let dy = point.y * factor;
        Some(Projected {
            x: cx + point.x * factor,
            y: match self.screen_y {
                ScreenY::Down => cy + dy,
                ScreenY::Up => cy - dy,
            },
            inv_depth,
        })
    }
}
