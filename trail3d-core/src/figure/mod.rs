//! Animated figures and the capability set every figure exposes

mod composite;
mod donut;
mod wireframe;

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::projection::Zoom;
use crate::surface::{Rgb, Surface};
use crate::transform::Axis;

pub use composite::TorusCube;
pub use donut::Donut;
pub use wireframe::Wireframe;

/// Configuration shared by every figure type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSettings {
    pub zoom: Zoom,
    /// Global multiplier applied to every axis speed
    pub speed: f64,
    pub gamma: f32,
    pub trail_length: usize,
    pub figure_color: Rgb,
    pub background_color: Rgb,
    pub paused: bool,
}

impl FigureSettings {
    pub fn new(trail_length: usize, figure_color: Rgb) -> Self {
        Self {
            trail_length,
            figure_color,
            ..Self::default()
        }
    }
}

impl Default for FigureSettings {
    fn default() -> Self {
        Self {
            zoom: Zoom::default(),
            speed: 1.0,
            gamma: 0.9,
            trail_length: 8,
            figure_color: Rgb::WHITE,
            background_color: Rgb::BLACK,
            paused: false,
        }
    }
}

/// A figure the host shell can animate and configure
///
/// The host calls [`Figure::update`] then [`Figure::render`] once per tick;
/// setters may be called between ticks and take effect on the next one.
pub trait Figure {
    /// Advance the rotation (unless paused) and record the frame's pose
    fn update(&mut self);

    /// Clear to the background and draw the trail, oldest first
    fn render(&mut self, surface: &mut dyn Surface);

    fn settings(&self) -> &FigureSettings;

    fn settings_mut(&mut self) -> &mut FigureSettings;

    /// Set the per-tick angular speed of one axis
    fn set_axis_speed(&mut self, axis: Axis, speed: f64);

    /// Number of frames currently held for the trail
    fn trail_len(&self) -> usize;

    /// Apply a changed trail length to the stored history
    fn resize_trail(&mut self, trail_length: usize);

    fn kind(&self) -> FigureKind;

    fn set_trail_length(&mut self, trail_length: usize) {
        self.settings_mut().trail_length = trail_length;
        self.resize_trail(trail_length);
        log::debug!("{}: trail length set to {trail_length}", self.kind());
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.settings_mut().zoom = Zoom::new(zoom);
    }

    fn set_speed(&mut self, speed: f64) {
        self.settings_mut().speed = speed;
    }

    fn set_gamma(&mut self, gamma: f32) {
        self.settings_mut().gamma = gamma;
    }

    fn set_figure_color(&mut self, color: Rgb) {
        self.settings_mut().figure_color = color;
    }

    fn set_background_color(&mut self, color: Rgb) {
        self.settings_mut().background_color = color;
    }

    fn set_rotate_x(&mut self, speed: f64) {
        self.set_axis_speed(Axis::X, speed);
    }

    fn set_rotate_y(&mut self, speed: f64) {
        self.set_axis_speed(Axis::Y, speed);
    }

    fn set_rotate_z(&mut self, speed: f64) {
        self.set_axis_speed(Axis::Z, speed);
    }

    fn toggle_pause(&mut self) {
        let settings = self.settings_mut();
        settings.paused = !settings.paused;
        let paused = settings.paused;
        log::debug!("{}: paused = {paused}", self.kind());
    }

    fn zoom(&self) -> f64 {
        self.settings().zoom.value()
    }

    fn speed(&self) -> f64 {
        self.settings().speed
    }

    fn is_paused(&self) -> bool {
        self.settings().paused
    }
}

/// The figures a host can choose from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FigureKind {
    Donut,
    Cube,
    Bridge,
    TorusCube,
}

impl FigureKind {
    pub const ALL: [FigureKind; 4] = [
        FigureKind::Donut,
        FigureKind::Cube,
        FigureKind::Bridge,
        FigureKind::TorusCube,
    ];

    /// Human-readable name for menus
    pub fn label(self) -> &'static str {
        match self {
            FigureKind::Donut => "Donut",
            FigureKind::Cube => "Cube",
            FigureKind::Bridge => "Strange Bridge",
            FigureKind::TorusCube => "Composition of Donut and Cube",
        }
    }

    /// Short name accepted by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            FigureKind::Donut => "donut",
            FigureKind::Cube => "cube",
            FigureKind::Bridge => "bridge",
            FigureKind::TorusCube => "torus-cube",
        }
    }

    /// Construct a fresh figure with its own shape, rotation and empty trail
    pub fn build(self) -> Box<dyn Figure> {
        match self {
            FigureKind::Donut => Box::new(Donut::new()),
            FigureKind::Cube => Box::new(Wireframe::cube()),
            FigureKind::Bridge => Box::new(Wireframe::bridge()),
            FigureKind::TorusCube => Box::new(TorusCube::new()),
        }
    }
}

impl fmt::Display for FigureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FigureKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        FigureKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| Error::UnknownFigure(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::MAX_ZOOM;
    use crate::surface::Canvas;

    #[test]
    fn test_parse_figure_kind() {
        assert_eq!("cube".parse::<FigureKind>().unwrap(), FigureKind::Cube);
        assert_eq!("Torus_Cube".parse::<FigureKind>().unwrap(), FigureKind::TorusCube);
        assert_eq!(
            "pyramid".parse::<FigureKind>(),
            Err(Error::UnknownFigure("pyramid".to_string()))
        );
        for kind in FigureKind::ALL {
            assert_eq!(kind.to_string().parse::<FigureKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_build_reports_kind() {
        for kind in FigureKind::ALL {
            assert_eq!(kind.build().kind(), kind);
        }
    }

    #[test]
    fn test_zoom_setter_clamps() {
        for kind in FigureKind::ALL {
            let mut figure = kind.build();
            figure.set_zoom(2.5);
            assert!((figure.zoom() - 2.5).abs() < 1e-9);
            figure.set_zoom(50.0);
            assert_eq!(figure.zoom(), MAX_ZOOM);
        }
    }

    #[test]
    fn test_speed_setter() {
        let mut figure = FigureKind::Donut.build();
        figure.set_speed(3.5);
        assert!((figure.speed() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_pause_toggles() {
        let mut figure = FigureKind::Cube.build();
        assert!(!figure.is_paused());
        figure.toggle_pause();
        assert!(figure.is_paused());
        figure.toggle_pause();
        assert!(!figure.is_paused());
    }

    #[test]
    fn test_every_figure_renders_without_panicking() {
        for kind in FigureKind::ALL {
            let mut figure = kind.build();
            figure.set_figure_color(Rgb::RED);
            figure.set_background_color(Rgb::BLUE);
            figure.set_rotate_x(0.01);
            figure.set_rotate_y(0.02);
            figure.set_rotate_z(0.03);
            let mut canvas = Canvas::new(160, 120);
            for _ in 0..3 {
                figure.update();
                figure.render(&mut canvas);
            }
            assert!(!canvas.is_filled_with(Rgb::BLUE), "{kind} drew nothing");
        }
    }

    #[test]
    fn test_zero_trail_renders_background_only() {
        for kind in FigureKind::ALL {
            let mut figure = kind.build();
            figure.set_background_color(Rgb::new(10, 20, 30));
            let mut canvas = Canvas::new(120, 90);
            for _ in 0..4 {
                figure.update();
                figure.render(&mut canvas);
            }
            figure.set_trail_length(0);
            figure.render(&mut canvas);
            assert!(canvas.is_filled_with(Rgb::new(10, 20, 30)), "{kind}");
        }
    }

    #[test]
    fn test_zero_area_surface_is_harmless() {
        for kind in FigureKind::ALL {
            let mut figure = kind.build();
            let mut canvas = Canvas::new(0, 0);
            figure.update();
            figure.render(&mut canvas);
            let mut strip = Canvas::new(1, 0);
            figure.render(&mut strip);
        }
    }
}
