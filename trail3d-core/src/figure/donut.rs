//! Point-cloud torus re-sampled every frame and resolved through a depth buffer

use super::{Figure, FigureKind, FigureSettings};
use crate::geometry::TorusSampler;
use crate::projection::{Lens, Projector, ScreenY};
use crate::render::{plot_points, resolve_points, DepthBuffer, PixelPoint, Stroke};
use crate::surface::{Rgb, Surface};
use crate::trail::{FadeCurve, TrailBuffer};
use crate::transform::{Axis, AxisSpeeds, RotationOrder, RotationState, Spin};

/// Camera distance at zoom 1
const CAMERA_DISTANCE: f64 = 1500.0;
/// Focal length in pixels
const FOCAL: f64 = 500.0;

/// Dense torus drawn as 2×2 dots.
///
/// Unlike the wireframes, frames are captured while rendering: each render
/// draws the stored frames, then the fresh one at full opacity, then keeps
/// the fresh frame (up to `trail_length + 1` of them). A trail length of 0
/// draws nothing but the background.
pub struct Donut {
    sampler: TorusSampler,
    projector: Projector,
    spin: Spin,
    frames: TrailBuffer<Vec<PixelPoint>>,
    depth: DepthBuffer,
    settings: FigureSettings,
}

impl Donut {
    pub fn new() -> Self {
        let sampler = TorusSampler::default();
        let settings = FigureSettings::new(3, Rgb::WHITE);
        log::debug!("donut: {} samples per frame", sampler.sample_count());
        Self {
            sampler,
            projector: Projector::new(
                RotationOrder::Zyx,
                Lens::Camera {
                    distance: CAMERA_DISTANCE,
                    focal: FOCAL,
                },
                ScreenY::Up,
            ),
            spin: Spin::new(AxisSpeeds::default()),
            frames: TrailBuffer::new(settings.trail_length + 1),
            depth: DepthBuffer::new(),
            settings,
        }
    }

    pub fn angles(&self) -> RotationState {
        self.spin.angles
    }

    /// Stored frames, oldest first
    pub fn frames(&self) -> &TrailBuffer<Vec<PixelPoint>> {
        &self.frames
    }
}

impl Default for Donut {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure for Donut {
    fn update(&mut self) {
        if !self.settings.paused {
            self.spin.advance(self.settings.speed);
        }
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        surface.fill(self.settings.background_color);
        if self.settings.trail_length == 0 {
            return;
        }
        let viewport = surface.viewport();
        if viewport.is_empty() {
            log::warn!("donut: empty viewport, skipping frame");
            return;
        }

        let color = self.settings.figure_color;
        // A one-frame trail keeps its stored frames fully opaque
        let fade = FadeCurve::new(0.0, self.settings.gamma);
        let count = self.frames.len();
        for (i, points) in self.frames.iter().enumerate() {
            let alpha = if self.settings.trail_length == 1 {
                1.0
            } else {
                fade.alpha(i, count)
            };
            plot_points(surface, points, Stroke { color, alpha });
        }

        let current = resolve_points(
            self.sampler.points(),
            &self.projector,
            &self.spin.angles,
            viewport,
            self.settings.zoom,
            &mut self.depth,
        );
        log::trace!("donut: {} visible samples", current.len());
        plot_points(surface, &current, Stroke { color, alpha: 1.0 });
        self.frames.push(current);
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
        self.frames.len()
    }

    fn resize_trail(&mut self, trail_length: usize) {
        if trail_length == 0 {
            self.frames.clear();
        }
        self.frames.set_capacity(trail_length + 1);
    }

    fn kind(&self) -> FigureKind {
        FigureKind::Donut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Canvas;

    #[test]
    fn test_update_only_advances_rotation() {
        let mut donut = Donut::new();
        donut.update();
        donut.update();
        assert_eq!(donut.trail_len(), 0);
        assert!((donut.angles().x - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_render_stores_up_to_trail_plus_one_frames() {
        let mut donut = Donut::new();
        let mut canvas = Canvas::new(160, 120);
        for n in 1..=6 {
            donut.update();
            donut.render(&mut canvas);
            assert_eq!(donut.trail_len(), n.min(4));
        }
    }

    #[test]
    fn test_zero_trail_draws_background_and_stores_nothing() {
        let mut donut = Donut::new();
        donut.set_trail_length(0);
        donut.set_background_color(Rgb::new(1, 2, 3));
        let mut canvas = Canvas::new(160, 120);
        donut.update();
        donut.render(&mut canvas);
        assert!(canvas.is_filled_with(Rgb::new(1, 2, 3)));
        assert_eq!(donut.trail_len(), 0);
    }

    #[test]
    fn test_paused_frames_are_identical() {
        let mut donut = Donut::new();
        donut.toggle_pause();
        let mut canvas = Canvas::new(160, 120);
        for _ in 0..2 {
            donut.update();
            donut.render(&mut canvas);
        }
        let frames: Vec<_> = donut.frames().iter().collect();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], frames[1]);
        assert!(!frames[0].is_empty());
    }

    #[test]
    fn test_visible_points_stay_on_screen() {
        let mut donut = Donut::new();
        let mut canvas = Canvas::new(320, 240);
        donut.update();
        donut.render(&mut canvas);
        let frame = donut.frames().newest().unwrap();
        assert!(frame
            .iter()
            .all(|p| p.x >= 0 && p.y >= 0 && p.x < 320 && p.y < 240));
    }

    #[test]
    fn test_depth_buffer_reused_across_sizes() {
        let mut donut = Donut::new();
        let mut small = Canvas::new(80, 60);
        let mut large = Canvas::new(400, 300);
        donut.render(&mut small);
        donut.render(&mut large);
        donut.render(&mut small);
        assert_eq!(donut.trail_len(), 3);
    }
}
