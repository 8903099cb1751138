/// Drawing helpers shared by the figures: wireframe edges and depth-tested point clouds
use nalgebra::{Point3, Vector3};

use crate::geometry::{Vertex, WireShape};
use crate::projection::{Projector, Viewport, Zoom};
use crate::surface::{Rgb, Surface};
use crate::transform::RotationState;

/// Size of the square drawn for each point-cloud sample
pub const POINT_SIZE: usize = 2;

/// Projected coordinates beyond this many pixels are treated as degenerate
const MAX_SCREEN_EXTENT: f64 = (1u64 << 20) as f64;

/// A point-cloud sample resolved to a whole pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

/// Per-frame drawing parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub alpha: f32,
}

/// Project every vertex of `shape` for one pose and draw its edges
pub fn draw_wireframe(
    surface: &mut dyn Surface,
    shape: &WireShape,
    projector: &Projector,
    angles: &RotationState,
    offset: &Vector3<f64>,
    zoom: Zoom,
    stroke: Stroke,
) {
    let viewport = surface.viewport();
    if viewport.is_empty() {
        return;
    }

    let rotation = projector.rotation(angles);
    let projected: Vec<Option<(i64, i64)>> = shape
        .vertices()
        .iter()
        .map(|v| {
            let rotated = rotation * v + *offset;
            projector
                .project_rotated(&rotated, viewport, zoom)
                .filter(|p| p.x.abs() < MAX_SCREEN_EXTENT && p.y.abs() < MAX_SCREEN_EXTENT)
                .map(|p| p.pixel())
        })
        .collect();

    for edge in shape.edges() {
        if let (Some(a), Some(b)) = (projected[edge.0], projected[edge.1]) {
            surface.draw_line(a, b, stroke.color, stroke.alpha);
        }
    }
}

/// Reusable nearest-point buffer: one `1/z` slot per pixel
#[derive(Debug, Clone, Default)]
pub struct DepthBuffer {
    viewport: Viewport,
    inv_depth: Vec<f64>,
}

impl DepthBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size to `viewport` and clear every slot to "nothing drawn"
    ///
    /// The allocation is kept between frames of the same size.
    pub fn reset(&mut self, viewport: Viewport) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.inv_depth = vec![0.0; viewport.pixel_count()];
        } else {
            self.inv_depth.fill(0.0);
        }
    }

    /// Claim the pixel if `inv_depth` is closer than what it already holds
    pub fn test_and_set(&mut self, x: i64, y: i64, inv_depth: f64) -> bool {
        if x < 0 || y < 0 || x >= self.viewport.width as i64 || y >= self.viewport.height as i64 {
            return false;
        }
        let slot = &mut self.inv_depth[y as usize * self.viewport.width + x as usize];
        if inv_depth > *slot {
            *slot = inv_depth;
            true
        } else {
            false
        }
    }
}

/// Rotate and project a point cloud, keeping the samples that win the depth test
///
/// A pixel may appear more than once when a nearer sample lands on it later.
pub fn resolve_points<I>(
    points: I,
    projector: &Projector,
    angles: &RotationState,
    viewport: Viewport,
    zoom: Zoom,
    depth: &mut DepthBuffer,
) -> Vec<PixelPoint>
where
    I: IntoIterator<Item = Vertex>,
{
    depth.reset(viewport);
    if viewport.is_empty() {
        return Vec::new();
    }

    let rotation = projector.rotation(angles);
    let mut visible = Vec::new();
    for point in points {
        let rotated: Point3<f64> = rotation * point;
        let Some(projected) = projector.project_rotated(&rotated, viewport, zoom) else {
            continue;
        };
        let (x, y) = projected.pixel();
        if depth.test_and_set(x, y, projected.inv_depth) {
            visible.push(PixelPoint { x, y });
        }
    }
    visible
}

/// Draw each point as a small filled square
pub fn plot_points(surface: &mut dyn Surface, points: &[PixelPoint], stroke: Stroke) {
    for p in points {
        surface.fill_rect(p.x, p.y, POINT_SIZE, POINT_SIZE, stroke.color, stroke.alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{Lens, ScreenY};
    use crate::surface::Canvas;
    use crate::transform::RotationOrder;

    fn camera() -> Projector {
        Projector::new(
            RotationOrder::Zyx,
            Lens::Camera {
                distance: 1500.0,
                focal: 500.0,
            },
            ScreenY::Up,
        )
    }

    #[test]
    fn test_depth_buffer_keeps_nearest() {
        let mut depth = DepthBuffer::new();
        depth.reset(Viewport::new(4, 4));
        assert!(depth.test_and_set(1, 1, 0.5));
        assert!(!depth.test_and_set(1, 1, 0.25));
        assert!(depth.test_and_set(1, 1, 0.75));
        assert!(!depth.test_and_set(4, 0, 1.0));
        assert!(!depth.test_and_set(0, -1, 1.0));

        depth.reset(Viewport::new(4, 4));
        assert!(depth.test_and_set(1, 1, 0.1));
    }

    #[test]
    fn test_resolve_points_discards_occluded_duplicates() {
        let mut depth = DepthBuffer::new();
        let near = Point3::new(0.0, 0.0, -10.0);
        let far = Point3::new(0.0, 0.0, 10.0);

        // Far sample first, then a nearer one on the same pixel: both accepted
        let points = resolve_points(
            vec![far, near],
            &camera(),
            &RotationState::zero(),
            Viewport::new(100, 100),
            Zoom::default(),
            &mut depth,
        );
        assert_eq!(points.len(), 2);

        // Near sample first hides the far one
        let points = resolve_points(
            vec![near, far],
            &camera(),
            &RotationState::zero(),
            Viewport::new(100, 100),
            Zoom::default(),
            &mut depth,
        );
        assert_eq!(points, vec![PixelPoint { x: 50, y: 50 }]);
    }

    #[test]
    fn test_resolve_points_skips_off_screen() {
        let mut depth = DepthBuffer::new();
        let points = resolve_points(
            vec![Point3::new(100_000.0, 0.0, 0.0)],
            &camera(),
            &RotationState::zero(),
            Viewport::new(100, 100),
            Zoom::default(),
            &mut depth,
        );
        assert!(points.is_empty());
    }

    #[test]
    fn test_draw_wireframe_touches_surface() {
        let mut canvas = Canvas::new(200, 200);
        let projector = Projector::new(
            RotationOrder::Xyz,
            Lens::Viewport {
                divisor: 2.5,
                focal: 3.0,
                distance: 5.0,
            },
            ScreenY::Down,
        );
        draw_wireframe(
            &mut canvas,
            &WireShape::cube(1.0),
            &projector,
            &RotationState::zero(),
            &Vector3::zeros(),
            Zoom::default(),
            Stroke {
                color: Rgb::WHITE,
                alpha: 1.0,
            },
        );
        assert!(!canvas.is_filled_with(Rgb::BLACK));
        // Front face corner: 80 px/unit * 3 / 4 = 60 px from the centre
        assert_eq!(canvas.pixel(40, 40), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(100, 100), Some(Rgb::BLACK));
    }

    #[test]
    fn test_plot_points_draws_squares() {
        let mut canvas = Canvas::new(10, 10);
        plot_points(
            &mut canvas,
            &[PixelPoint { x: 2, y: 3 }],
            Stroke {
                color: Rgb::RED,
                alpha: 1.0,
            },
        );
        assert_eq!(canvas.pixel(2, 3), Some(Rgb::RED));
        assert_eq!(canvas.pixel(3, 4), Some(Rgb::RED));
        assert_eq!(canvas.pixel(4, 4), Some(Rgb::BLACK));
    }
}
