//! Wireframe torus and cube spinning side by side

use nalgebra::Vector3;

use super::{Figure, FigureKind, FigureSettings};
use crate::geometry::WireShape;
use crate::projection::{Lens, Projector, ScreenY};
use crate::render::{draw_wireframe, Stroke};
use crate::surface::{Rgb, Surface};
use crate::trail::{FadeCurve, TrailBuffer};
use crate::transform::{Axis, AxisSpeeds, RotationOrder, RotationState, Spin};

const FADE_FLOOR: f32 = 0.1;

/// Horizontal distance of each part from the centre, applied after rotation
const PART_OFFSET: f64 = 3.0;

/// One sub-figure: its own shape, spin, trail and placement
struct Part {
    shape: WireShape,
    spin: Spin,
    trail: TrailBuffer<RotationState>,
    offset: Vector3<f64>,
}

impl Part {
    fn new(shape: WireShape, speeds: AxisSpeeds, offset_x: f64, trail_length: usize) -> Self {
        Self {
            shape,
            spin: Spin::new(speeds),
            trail: TrailBuffer::new(trail_length),
            offset: Vector3::new(offset_x, 0.0, 0.0),
        }
    }

    fn update(&mut self, settings: &FigureSettings) {
        if !settings.paused {
            self.spin.advance(settings.speed);
        }
        self.trail.push(self.spin.angles);
    }
}

/// Torus on the left, cube on the right, each with independent rotation.
///
/// The two parts start with different axis speeds; the axis-speed setters
/// overwrite both parts with the same value.
pub struct TorusCube {
    torus: Part,
    cube: Part,
    projector: Projector,
    settings: FigureSettings,
}

impl TorusCube {
    pub fn new() -> Self {
        let settings = FigureSettings::new(10, Rgb::WHITE);
        let torus = WireShape::torus(1.5, 0.5, 20, 20);
        let cube = WireShape::cube(1.0);
        log::debug!(
            "torus-cube: built {} + {} vertices, {} + {} edges",
            torus.vertices().len(),
            cube.vertices().len(),
            torus.edges().len(),
            cube.edges().len()
        );
        Self {
            torus: Part::new(
                torus,
                AxisSpeeds::new(0.05, 0.03, 0.02),
                -PART_OFFSET,
                settings.trail_length,
            ),
            cube: Part::new(
                cube,
                AxisSpeeds::new(0.01, 0.04, 0.06),
                PART_OFFSET,
                settings.trail_length,
            ),
            projector: Projector::new(
                RotationOrder::Xyz,
                Lens::Viewport {
                    divisor: 4.0,
                    focal: 3.0,
                    distance: 6.0,
                },
                ScreenY::Down,
            ),
            settings,
        }
    }

    pub fn torus_angles(&self) -> RotationState {
        self.torus.spin.angles
    }

    pub fn cube_angles(&self) -> RotationState {
        self.cube.spin.angles
    }

    pub fn torus_trail(&self) -> &TrailBuffer<RotationState> {
        &self.torus.trail
    }

    pub fn cube_trail(&self) -> &TrailBuffer<RotationState> {
        &self.cube.trail
    }
}

impl Default for TorusCube {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure for TorusCube {
    fn update(&mut self) {
        self.torus.update(&self.settings);
        self.cube.update(&self.settings);
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        surface.fill(self.settings.background_color);

        let fade = FadeCurve::new(FADE_FLOOR, self.settings.gamma);
        let count = self.torus.trail.len().min(self.cube.trail.len());
        let poses = self.torus.trail.iter().zip(self.cube.trail.iter());
        for ((torus_angles, cube_angles), alpha) in poses.zip(fade.alphas(count)) {
            let stroke = Stroke {
                color: self.settings.figure_color,
                alpha,
            };
            for (part, angles) in [(&self.torus, torus_angles), (&self.cube, cube_angles)] {
                draw_wireframe(
                    surface,
                    &part.shape,
                    &self.projector,
                    angles,
                    &part.offset,
                    self.settings.zoom,
                    stroke,
                );
            }
        }
    }

    fn settings(&self) -> &FigureSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut FigureSettings {
        &mut self.settings
    }

    fn set_axis_speed(&mut self, axis: Axis, speed: f64) {
        self.torus.spin.speeds.set(axis, speed);
        self.cube.spin.speeds.set(axis, speed);
    }

    fn trail_len(&self) -> usize {
        self.torus.trail.len().min(self.cube.trail.len())
    }

    fn resize_trail(&mut self, trail_length: usize) {
        self.torus.trail.set_capacity(trail_length);
        self.cube.trail.set_capacity(trail_length);
    }

    fn kind(&self) -> FigureKind {
        FigureKind::TorusCube
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Canvas;

    #[test]
    fn test_parts_start_with_their_own_speeds() {
        let mut figure = TorusCube::new();
        figure.update();
        assert!((figure.torus_angles().x - 0.05).abs() < 1e-9);
        assert!((figure.cube_angles().z - 0.06).abs() < 1e-9);
    }

    #[test]
    fn test_axis_setters_apply_to_both_parts() {
        let mut figure = TorusCube::new();
        figure.set_rotate_x(0.01);
        figure.set_rotate_y(0.02);
        figure.set_rotate_z(0.03);
        figure.update();
        assert_eq!(figure.torus_angles(), figure.cube_angles());
        assert!((figure.torus_angles().y - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_trails_stay_in_step() {
        let mut figure = TorusCube::new();
        for n in 1..=15 {
            figure.update();
            assert_eq!(figure.torus_trail().len(), n.min(10));
            assert_eq!(figure.cube_trail().len(), n.min(10));
        }
        figure.set_trail_length(4);
        assert_eq!(figure.trail_len(), 4);
    }

    #[test]
    fn test_parts_render_side_by_side() {
        let mut figure = TorusCube::new();
        figure.update();
        let mut canvas = Canvas::new(400, 200);
        figure.render(&mut canvas);

        let lit = |x0: usize, x1: usize| {
            (x0..x1).any(|x| (0..200).any(|y| canvas.pixel(x, y) != Some(Rgb::BLACK)))
        };
        assert!(lit(0, 200), "torus missing from the left half");
        assert!(lit(200, 400), "cube missing from the right half");
        // Gap between the parts stays clear
        assert!(!lit(198, 202));
    }
}
