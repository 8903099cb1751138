/// Host session: the active figure plus the slider model driving it
///
/// Both shells keep one [`Session`] and translate their input events into
/// [`Command`]s; switching figures rebuilds the figure and re-applies the
/// whole [`RenderConfig`].
use std::cell::Cell;
use std::rc::Rc;

use crate::controls::{
    axis_speed_from_slider, gamma_from_slider, speed_from_slider, trail_from_slider,
    zoom_from_slider, RenderConfig, ZoomControl, AXIS_SLIDER_MAX, GAMMA_SLIDER_MAX,
    SPEED_SLIDER_MAX, TRAIL_SLIDER_MAX, ZOOM_SLIDER_MAX,
};
use crate::figure::{Figure, FigureKind};
use crate::projection::Zoom;
use crate::surface::{Rgb, Surface};
use crate::transform::Axis;

/// A slider the host exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    Speed,
    Trail,
    Gamma,
    Axis(Axis),
    Zoom,
}

impl Slider {
    pub fn max(self) -> u32 {
        match self {
            Slider::Speed => SPEED_SLIDER_MAX,
            Slider::Trail => TRAIL_SLIDER_MAX,
            Slider::Gamma => GAMMA_SLIDER_MAX,
            Slider::Axis(_) => AXIS_SLIDER_MAX,
            Slider::Zoom => ZOOM_SLIDER_MAX,
        }
    }
}

/// Slider positions, in slider units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sliders {
    pub speed: u32,
    pub trail: u32,
    pub gamma: u32,
    pub axis: [u32; 3],
    pub zoom: u32,
}

impl Default for Sliders {
    fn default() -> Self {
        Self {
            speed: 10,
            trail: 1,
            gamma: 90,
            axis: [10, 10, 10],
            zoom: 100,
        }
    }
}

impl Sliders {
    pub fn get(&self, slider: Slider) -> u32 {
        match slider {
            Slider::Speed => self.speed,
            Slider::Trail => self.trail,
            Slider::Gamma => self.gamma,
            Slider::Axis(axis) => self.axis[axis_index(axis)],
            Slider::Zoom => self.zoom,
        }
    }

    fn slot(&mut self, slider: Slider) -> &mut u32 {
        match slider {
            Slider::Speed => &mut self.speed,
            Slider::Trail => &mut self.trail,
            Slider::Gamma => &mut self.gamma,
            Slider::Axis(axis) => &mut self.axis[axis_index(axis)],
            Slider::Zoom => &mut self.zoom,
        }
    }

    /// Configuration these positions stand for
    pub fn config(&self, figure_color: Rgb, background_color: Rgb, show_fps: bool) -> RenderConfig {
        RenderConfig {
            figure_color,
            background_color,
            speed: speed_from_slider(self.speed),
            trail_length: trail_from_slider(self.trail),
            gamma: gamma_from_slider(self.gamma),
            axis_speeds: self.axis.map(axis_speed_from_slider),
            zoom: zoom_from_slider(self.zoom),
            show_fps,
        }
    }
}

/// A user action, independent of the input that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePause,
    Select(FigureKind),
    /// Mouse-wheel notches; positive zooms out
    Wheel(f64),
    /// Move a slider to an absolute position
    Slide(Slider, u32),
    /// Move a slider by a signed number of units
    Nudge(Slider, i32),
    FigureColor(Rgb),
    BackgroundColor(Rgb),
    ToggleFps,
}

/// Active figure, its configuration and the slider model
pub struct Session {
    kind: FigureKind,
    figure: Box<dyn Figure>,
    sliders: Sliders,
    config: RenderConfig,
    zoom: ZoomControl,
    zoom_slider: Rc<Cell<u32>>,
}

impl Session {
    pub fn new(kind: FigureKind, sliders: Sliders, config: RenderConfig) -> Self {
        let mut zoom = ZoomControl::new(config.zoom);
        let zoom_slider = Rc::new(Cell::new(sliders.zoom));
        let display = Rc::clone(&zoom_slider);
        zoom.subscribe(move |change| display.set(change.slider));

        let mut figure = kind.build();
        config.apply(figure.as_mut());
        log::debug!("session started with {kind}");

        Self {
            kind,
            figure,
            sliders,
            config,
            zoom,
            zoom_slider,
        }
    }

    pub fn kind(&self) -> FigureKind {
        self.kind
    }

    pub fn figure(&self) -> &dyn Figure {
        self.figure.as_ref()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Current slider positions; the zoom slider follows the wheel
    pub fn sliders(&self) -> Sliders {
        Sliders {
            zoom: self.zoom_slider.get(),
            ..self.sliders
        }
    }

    /// Advance and draw one frame
    pub fn tick(&mut self, surface: &mut dyn Surface) {
        self.figure.update();
        self.figure.render(surface);
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::TogglePause => self.figure.toggle_pause(),
            Command::Select(kind) => self.select(kind),
            Command::Wheel(notches) => {
                let zoom = self.zoom.scroll(notches);
                self.set_zoom(zoom);
            }
            Command::Slide(slider, value) => self.slide(slider, value),
            Command::Nudge(slider, delta) => {
                let value = self.sliders().get(slider) as i64 + delta as i64;
                self.slide(slider, value.clamp(0, slider.max() as i64) as u32);
            }
            Command::FigureColor(color) => {
                self.config.figure_color = color;
                self.figure.set_figure_color(color);
            }
            Command::BackgroundColor(color) => {
                self.config.background_color = color;
                self.figure.set_background_color(color);
            }
            Command::ToggleFps => self.config.show_fps = !self.config.show_fps,
        }
    }

    /// One-line summary of the current settings
    pub fn status_line(&self, fps: Option<u32>) -> String {
        let mut line = format!(
            "{} | speed {:.1} | trail {} | gamma {:.2} | x {:.2} y {:.2} z {:.2} | zoom {:.2}{}",
            self.kind.label(),
            self.config.speed,
            self.config.trail_length,
            self.config.gamma,
            self.config.axis_speeds[0],
            self.config.axis_speeds[1],
            self.config.axis_speeds[2],
            self.config.zoom.value(),
            if self.figure.is_paused() { " | PAUSED" } else { "" },
        );
        if let Some(fps) = fps {
            line.push_str(&format!(" | FPS: {fps}"));
        }
        line
    }

    fn slide(&mut self, slider: Slider, value: u32) {
        let value = value.min(slider.max());
        *self.sliders.slot(slider) = value;
        match slider {
            Slider::Speed => {
                self.config.speed = speed_from_slider(value);
                self.figure.set_speed(self.config.speed);
            }
            Slider::Trail => {
                self.config.trail_length = trail_from_slider(value);
                self.figure.set_trail_length(self.config.trail_length);
            }
            Slider::Gamma => {
                self.config.gamma = gamma_from_slider(value);
                self.figure.set_gamma(self.config.gamma);
            }
            Slider::Axis(axis) => {
                let speed = axis_speed_from_slider(value);
                self.config.axis_speeds[axis_index(axis)] = speed;
                self.figure.set_axis_speed(axis, speed);
            }
            Slider::Zoom => {
                let zoom = self.zoom.slide(value);
                self.set_zoom(zoom);
            }
        }
    }

    /// Replace the figure with a fresh instance; the old trail is dropped
    fn select(&mut self, kind: FigureKind) {
        if kind == self.kind {
            return;
        }
        log::debug!("switching figure {} -> {}", self.kind, kind);
        let mut figure = kind.build();
        self.config.apply(figure.as_mut());
        self.figure = figure;
        self.kind = kind;
    }

    fn set_zoom(&mut self, zoom: Zoom) {
        self.config.zoom = zoom;
        self.figure.set_zoom(zoom.value());
    }
}

fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::X => 0,
        Axis::Y => 1,
        Axis::Z => 2,
    }
}
