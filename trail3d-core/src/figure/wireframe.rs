//! Single-shape wireframe figures: the cube and the bridge

use nalgebra::Vector3;

use super::{Figure, FigureKind, FigureSettings};
use crate::geometry::WireShape;
use crate::projection::{Lens, Projector, ScreenY};
use crate::render::{draw_wireframe, Stroke};
use crate::surface::{Rgb, Surface};
use crate::trail::{FadeCurve, TrailBuffer};
use crate::transform::{Axis, AxisSpeeds, RotationOrder, RotationState, Spin};

/// Opacity of the oldest pose in a multi-pose trail
const FADE_FLOOR: f32 = 0.1;

/// Viewport-relative lens shared by the single-shape figures
const LENS: Lens = Lens::Viewport {
    divisor: 2.5,
    focal: 3.0,
    distance: 5.0,
};

/// One static shape spun around its centre, leaving a trail of past poses
pub struct Wireframe {
    kind: FigureKind,
    shape: WireShape,
    projector: Projector,
    spin: Spin,
    trail: TrailBuffer<RotationState>,
    settings: FigureSettings,
}

impl Wireframe {
    fn new(kind: FigureKind, shape: WireShape, order: RotationOrder, settings: FigureSettings) -> Self {
        log::debug!(
            "{kind}: built {} vertices, {} edges",
            shape.vertices().len(),
            shape.edges().len()
        );
        Self {
            kind,
            shape,
            projector: Projector::new(order, LENS, ScreenY::Down),
            spin: Spin::new(AxisSpeeds::default()),
            trail: TrailBuffer::new(settings.trail_length),
            settings,
        }
    }

    /// Unit cube rotated X, then Y, then Z
    pub fn cube() -> Self {
        Self::new(
            FigureKind::Cube,
            WireShape::cube(1.0),
            RotationOrder::Xyz,
            FigureSettings::new(8, Rgb::WHITE),
        )
    }

    /// Rounded bridge shape rotated Z, then Y, then X
    pub fn bridge() -> Self {
        Self::new(
            FigureKind::Bridge,
            WireShape::bridge(),
            RotationOrder::Zyx,
            FigureSettings::new(10, Rgb::RED),
        )
    }

    /// Current rotation angles
    pub fn angles(&self) -> RotationState {
        self.spin.angles
    }

    /// Recorded poses, oldest first
    pub fn trail(&self) -> &TrailBuffer<RotationState> {
        &self.trail
    }
}

impl Figure for Wireframe {
    fn update(&mut self) {
        if !self.settings.paused {
            self.spin.advance(self.settings.speed);
        }
        self.trail.push(self.spin.angles);
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        surface.fill(self.settings.background_color);

        let fade = FadeCurve::new(FADE_FLOOR, self.settings.gamma);
        let count = self.trail.len();
        for (angles, alpha) in self.trail.iter().zip(fade.alphas(count)) {
            draw_wireframe(
                surface,
                &self.shape,
                &self.projector,
                angles,
                &Vector3::zeros(),
                self.settings.zoom,
                Stroke {
                    color: self.settings.figure_color,
                    alpha,
                },
            );
        }
    }

    fn settings(&self) -> &FigureSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut FigureSettings {
        &mut self.settings
    }

    fn set_axis_speed(&mut self, axis: Axis, speed: f64) {
        self.spin.speeds.set(axis, speed);
    }

    fn trail_len(&self) -> usize {
        self.trail.len()
    }

    fn resize_trail(&mut self, trail_length: usize) {
        self.trail.set_capacity(trail_length);
    }

    fn kind(&self) -> FigureKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::MAX_ZOOM;
    use crate::surface::Canvas;

    #[test]
    fn test_cube_trail_records_each_update() {
        let mut cube = Wireframe::cube();
        for _ in 0..8 {
            cube.update();
        }
        assert_eq!(cube.trail_len(), 8);
        for (i, angles) in cube.trail().iter().enumerate() {
            let expected = 0.1 * (i + 1) as f64;
            assert!((angles.x - expected).abs() < 1e-9);
            assert!((angles.y - expected).abs() < 1e-9);
            assert!((angles.z - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_trail_size_is_min_of_updates_and_length() {
        for trail_length in [0, 1, 3, 8, 20] {
            let mut bridge = Wireframe::bridge();
            bridge.set_trail_length(trail_length);
            for n in 1..=25 {
                bridge.update();
                assert_eq!(bridge.trail_len(), n.min(trail_length));
            }
        }
    }

    #[test]
    fn test_paused_updates_repeat_the_same_pose() {
        let mut cube = Wireframe::cube();
        cube.update();
        cube.toggle_pause();
        cube.update();
        cube.update();

        let poses: Vec<_> = cube.trail().iter().copied().collect();
        assert_eq!(poses.len(), 3);
        assert_eq!(poses[1], poses[2]);
        assert_eq!(poses[0], poses[1]);

        cube.toggle_pause();
        cube.update();
        assert!(cube.angles().x > poses[2].x);
    }

    #[test]
    fn test_speed_multiplier_and_axis_speeds() {
        let mut cube = Wireframe::cube();
        cube.set_speed(2.0);
        cube.set_rotate_x(0.05);
        cube.set_rotate_y(0.0);
        cube.set_rotate_z(0.25);
        cube.update();
        let angles = cube.angles();
        assert!((angles.x - 0.1).abs() < 1e-9);
        assert!(angles.y.abs() < 1e-12);
        assert!((angles.z - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_zoom_above_limit_is_clamped() {
        let mut cube = Wireframe::cube();
        cube.set_zoom(50.0);
        assert_eq!(cube.settings().zoom.value(), MAX_ZOOM);
    }

    #[test]
    fn test_color_change_applies_to_existing_trail() {
        let mut cube = Wireframe::cube();
        cube.set_trail_length(1);
        cube.update();

        let mut canvas = Canvas::new(200, 200);
        cube.set_figure_color(Rgb::GREEN);
        cube.render(&mut canvas);
        assert!(canvas.pixels().chunks_exact(4).any(|p| p[..3] == [0, 255, 0]));

        cube.set_figure_color(Rgb::RED);
        cube.render(&mut canvas);
        assert!(canvas.pixels().chunks_exact(4).any(|p| p[..3] == [255, 0, 0]));
        assert!(!canvas.pixels().chunks_exact(4).any(|p| p[..3] == [0, 255, 0]));
    }

    #[test]
    fn test_newest_pose_is_drawn_opaque() {
        let mut cube = Wireframe::cube();
        cube.set_gamma(1.0);
        cube.set_speed(0.0);
        for _ in 0..4 {
            cube.update();
        }
        let mut canvas = Canvas::new(200, 200);
        cube.render(&mut canvas);
        // Unrotated front-bottom-left corner; see render tests for the numbers
        assert_eq!(canvas.pixel(40, 40), Some(Rgb::WHITE));
    }

    #[test]
    fn test_oldest_pose_is_drawn_faintest() {
        let mut cube = Wireframe::cube();
        cube.set_rotate_x(0.0);
        cube.set_rotate_y(0.0);
        cube.set_rotate_z(std::f64::consts::FRAC_PI_8);
        cube.set_speed(0.0);
        cube.update();
        cube.set_speed(1.0);
        cube.update();
        cube.update();
        assert_eq!(cube.trail_len(), 3);

        let mut canvas = Canvas::new(200, 200);
        cube.render(&mut canvas);

        // Top edge of the unrotated front face only; alphas are 0.1, 0.55, 1.0
        let oldest = canvas.pixel(70, 40).unwrap();
        assert!((24..=27).contains(&oldest.r), "got {oldest:?}");
        assert_eq!(oldest.r, oldest.g);
        assert_eq!(oldest.g, oldest.b);

        // The newest pose is drawn at full strength
        assert!(canvas.pixels().chunks_exact(4).any(|p| p[..3] == [255, 255, 255]));
    }
}
