/// Host-side control state: the settings a UI owns and pushes into figures,
/// slider mappings, zoom synchronisation and the FPS counter.
use crate::figure::Figure;
use crate::projection::Zoom;
use crate::surface::Rgb;

/// Slider ranges, in slider units
pub const SPEED_SLIDER_MAX: u32 = 100;
pub const TRAIL_SLIDER_MAX: u32 = 20;
pub const GAMMA_SLIDER_MAX: u32 = 100;
pub const AXIS_SLIDER_MAX: u32 = 100;
pub const ZOOM_SLIDER_MAX: u32 = 4500;

/// Zoom factor per mouse-wheel notch
const WHEEL_STEP: f64 = 1.1;

/// Pixel scroll distance counted as one wheel notch
const PIXELS_PER_NOTCH: f64 = 100.0;

/// Wheel notches for a pixel-based scroll delta; small trackpad deltas
/// become fractions of a notch
pub fn notches_from_pixels(delta: f64) -> f64 {
    delta / PIXELS_PER_NOTCH
}

/// Global speed multiplier for a speed slider position
pub fn speed_from_slider(value: u32) -> f64 {
    value as f64 / 10.0
}

/// Trail length for a trail slider position
pub fn trail_from_slider(value: u32) -> usize {
    value as usize
}

/// Fade slope for a gamma slider position
pub fn gamma_from_slider(value: u32) -> f32 {
    value as f32 / 100.0
}

/// Per-axis angular speed for an axis slider position
pub fn axis_speed_from_slider(value: u32) -> f64 {
    value as f64 / 100.0
}

/// Zoom factor for a zoom slider position
pub fn zoom_from_slider(value: u32) -> Zoom {
    Zoom::new(value as f64 / 100.0)
}

/// Zoom slider position showing `zoom`
pub fn slider_from_zoom(zoom: Zoom) -> u32 {
    (zoom.value() * 100.0) as u32
}

/// Everything the host UI lets the user change
///
/// Held by the host, not by any figure: switching figures applies the whole
/// config to the new one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub figure_color: Rgb,
    pub background_color: Rgb,
    pub speed: f64,
    pub trail_length: usize,
    pub gamma: f32,
    pub axis_speeds: [f64; 3],
    pub zoom: Zoom,
    pub show_fps: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            figure_color: Rgb::WHITE,
            background_color: Rgb::BLACK,
            speed: speed_from_slider(10),
            trail_length: trail_from_slider(1),
            gamma: gamma_from_slider(90),
            axis_speeds: [axis_speed_from_slider(10); 3],
            zoom: zoom_from_slider(100),
            show_fps: false,
        }
    }
}

impl RenderConfig {
    /// Push every setting into `figure`
    pub fn apply(&self, figure: &mut dyn Figure) {
        figure.set_figure_color(self.figure_color);
        figure.set_background_color(self.background_color);
        figure.set_speed(self.speed);
        figure.set_trail_length(self.trail_length);
        figure.set_gamma(self.gamma);
        figure.set_rotate_x(self.axis_speeds[0]);
        figure.set_rotate_y(self.axis_speeds[1]);
        figure.set_rotate_z(self.axis_speeds[2]);
        figure.set_zoom(self.zoom.value());
    }
}

/// What moved the zoom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomSource {
    Wheel,
    Slider,
}

/// Zoom change delivered to observers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomChange {
    pub zoom: Zoom,
    /// Slider position matching the new zoom
    pub slider: u32,
    pub source: ZoomSource,
}

type ZoomObserver = Box<dyn FnMut(ZoomChange)>;

/// Zoom value shared by the mouse wheel and the zoom slider
///
/// Each input updates the value and notifies every registered observer, so
/// the slider can follow the wheel and the figure can follow both.
pub struct ZoomControl {
    zoom: Zoom,
    observers: Vec<ZoomObserver>,
}

impl ZoomControl {
    pub fn new(zoom: Zoom) -> Self {
        Self {
            zoom,
            observers: Vec::new(),
        }
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(ZoomChange) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Scroll by `notches` wheel clicks; positive zooms out
    pub fn scroll(&mut self, notches: f64) -> Zoom {
        let zoom = Zoom::new(self.zoom.value() * WHEEL_STEP.powf(-notches));
        self.set(zoom, ZoomSource::Wheel)
    }

    /// Move the zoom slider
    pub fn slide(&mut self, value: u32) -> Zoom {
        self.set(zoom_from_slider(value.min(ZOOM_SLIDER_MAX)), ZoomSource::Slider)
    }

    fn set(&mut self, zoom: Zoom, source: ZoomSource) -> Zoom {
        self.zoom = zoom;
        let change = ZoomChange {
            zoom,
            slider: slider_from_zoom(zoom),
            source,
        };
        for observer in &mut self.observers {
            observer(change);
        }
        zoom
    }
}

impl Default for ZoomControl {
    fn default() -> Self {
        Self::new(Zoom::default())
    }
}

/// Frames rendered per wall-clock second
///
/// Timestamps are supplied by the caller in milliseconds.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    window_start: Option<f64>,
    frames: u32,
    fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame at `now_ms`; returns the latest completed reading
    pub fn tick(&mut self, now_ms: f64) -> u32 {
        let start = *self.window_start.get_or_insert(now_ms);
        self.frames += 1;
        if now_ms - start >= 1000.0 {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = Some(now_ms);
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::FigureKind;
    use crate::projection::MAX_ZOOM;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_slider_mappings() {
        assert!((speed_from_slider(25) - 2.5).abs() < 1e-9);
        assert_eq!(trail_from_slider(7), 7);
        assert!((gamma_from_slider(90) - 0.9).abs() < 1e-6);
        assert!((axis_speed_from_slider(10) - 0.1).abs() < 1e-9);
        assert_eq!(zoom_from_slider(4500).value(), MAX_ZOOM);
        assert_eq!(slider_from_zoom(Zoom::new(1.5)), 150);
    }

    #[test]
    fn test_default_config_matches_slider_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.trail_length, 1);
        assert!((config.speed - 1.0).abs() < 1e-9);
        assert_eq!(config.zoom, Zoom::new(1.0));
        assert!(!config.show_fps);
    }

    #[test]
    fn test_apply_pushes_every_setting() {
        let config = RenderConfig {
            figure_color: Rgb::GREEN,
            background_color: Rgb::BLUE,
            speed: 2.0,
            trail_length: 5,
            gamma: 0.5,
            axis_speeds: [0.2, 0.0, 0.0],
            zoom: Zoom::new(3.0),
            show_fps: true,
        };
        let mut figure = FigureKind::Cube.build();
        config.apply(figure.as_mut());

        let settings = figure.settings();
        assert_eq!(settings.figure_color, Rgb::GREEN);
        assert_eq!(settings.background_color, Rgb::BLUE);
        assert_eq!(settings.trail_length, 5);
        assert!((settings.gamma - 0.5).abs() < 1e-6);
        assert!((figure.zoom() - 3.0).abs() < 1e-9);

        for _ in 0..7 {
            figure.update();
        }
        assert_eq!(figure.trail_len(), 5);
    }

    #[test]
    fn test_wheel_notifies_slider_observer() {
        let mut control = ZoomControl::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        control.subscribe(move |change| sink.borrow_mut().push(change));

        let zoom = control.scroll(-1.0);
        assert!((zoom.value() - 1.1).abs() < 1e-9);
        control.slide(250);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].source, ZoomSource::Wheel);
        assert_eq!(seen[0].slider, 110);
        assert_eq!(seen[1].source, ZoomSource::Slider);
        assert!((seen[1].zoom.value() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_trackpad_delta_zooms_by_a_fraction() {
        assert!((notches_from_pixels(-100.0) + 1.0).abs() < 1e-12);

        let mut control = ZoomControl::default();
        let zoom = control.scroll(notches_from_pixels(-4.0));
        assert!((zoom.value() - 1.1_f64.powf(0.04)).abs() < 1e-9);
        assert!(zoom.value() > 1.0 && zoom.value() < 1.01);
    }

    #[test]
    fn test_wheel_zoom_clamped_at_upper_bound() {
        let mut control = ZoomControl::new(Zoom::new(44.0));
        for _ in 0..10 {
            control.scroll(-1.0);
        }
        assert_eq!(control.zoom().value(), MAX_ZOOM);

        let mut figure = FigureKind::TorusCube.build();
        figure.set_zoom(50.0);
        assert_eq!(figure.zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.tick(0.0), 0);
        for i in 1..60 {
            fps.tick(i as f64 * 16.0);
        }
        // 61st frame crosses the one-second mark
        assert_eq!(fps.tick(1000.0), 61);
        assert_eq!(fps.tick(1016.0), 61);
    }
}
