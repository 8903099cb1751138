/// Trail3D Web - WASM canvas frontend
///
/// Renders figures into a software framebuffer and blits it onto a 2D canvas
/// with `putImageData`. The page drives [`WebRenderer::tick`] from
/// `requestAnimationFrame` and forwards slider, wheel and button events.
use std::sync::OnceLock;

use trail3d_core::{
    controls, Axis, Canvas, Command, FigureKind, FpsCounter, RenderConfig, Rgb, Session, Slider,
    Sliders,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

const FPS_FONT: &str = "16px monospace";

#[wasm_bindgen]
pub struct WebRenderer {
    element: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    session: Session,
    canvas: Canvas,
    fps: FpsCounter,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Attach to the `<canvas>` with id `canvas_id`, starting with `figure`
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, figure: &str) -> Result<WebRenderer, JsValue> {
        init_logging_once();

        let kind = figure
            .parse::<FigureKind>()
            .map_err(|err| js_error(&err.to_string()))?;
        let element = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(canvas_id))
            .ok_or_else(|| js_error(&format!("no element with id '{canvas_id}'")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_error(&format!("'{canvas_id}' is not a canvas")))?;
        let context = element
            .get_context("2d")?
            .ok_or_else(|| js_error("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let sliders = Sliders::default();
        let config = RenderConfig::default();
        let canvas = Canvas::new(element.width() as usize, element.height() as usize);
        log::info!(
            "web renderer on '{canvas_id}' {}x{} with {kind}",
            element.width(),
            element.height()
        );

        Ok(WebRenderer {
            element,
            context,
            session: Session::new(kind, sliders, config),
            canvas,
            fps: FpsCounter::new(),
        })
    }

    /// Advance one tick and draw it; `timestamp_ms` is the animation-frame time
    pub fn tick(&mut self, timestamp_ms: f64) -> Result<(), JsValue> {
        let (width, height) = (self.element.width(), self.element.height());
        self.canvas.resize(width as usize, height as usize);
        self.session.tick(&mut self.canvas);
        let fps = self.fps.tick(timestamp_ms);

        if width == 0 || height == 0 {
            return Ok(());
        }
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(self.canvas.pixels()),
            width,
            height,
        )?;
        self.context.put_image_data(&image, 0.0, 0.0)?;

        if self.session.config().show_fps {
            let color = self.session.config().figure_color.to_string();
            self.context.set_font(FPS_FONT);
            self.context.set_fill_style_str(&color);
            self.context.fill_text(&format!("FPS: {fps}"), 10.0, 20.0)?;
        }
        Ok(())
    }

    /// Switch figure by name; the new figure keeps the current settings
    #[wasm_bindgen(js_name = selectFigure)]
    pub fn select_figure(&mut self, name: &str) -> Result<(), JsValue> {
        let kind = name
            .parse::<FigureKind>()
            .map_err(|err| js_error(&err.to_string()))?;
        self.session.handle(Command::Select(kind));
        Ok(())
    }

    /// Label of the active figure
    #[wasm_bindgen(getter)]
    pub fn figure(&self) -> String {
        self.session.kind().label().to_string()
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&mut self) {
        self.session.handle(Command::TogglePause);
    }

    #[wasm_bindgen(js_name = toggleFps)]
    pub fn toggle_fps(&mut self) {
        self.session.handle(Command::ToggleFps);
    }

    /// Speed slider, 0-100
    #[wasm_bindgen(js_name = setSpeed)]
    pub fn set_speed(&mut self, value: u32) {
        self.session.handle(Command::Slide(Slider::Speed, value));
    }

    /// Trail slider, 0-20
    #[wasm_bindgen(js_name = setTrailLength)]
    pub fn set_trail_length(&mut self, value: u32) {
        self.session.handle(Command::Slide(Slider::Trail, value));
    }

    /// Gamma slider, 0-100
    #[wasm_bindgen(js_name = setGamma)]
    pub fn set_gamma(&mut self, value: u32) {
        self.session.handle(Command::Slide(Slider::Gamma, value));
    }

    /// Axis speed sliders, 0-100
    #[wasm_bindgen(js_name = setRotateX)]
    pub fn set_rotate_x(&mut self, value: u32) {
        self.session.handle(Command::Slide(Slider::Axis(Axis::X), value));
    }

    #[wasm_bindgen(js_name = setRotateY)]
    pub fn set_rotate_y(&mut self, value: u32) {
        self.session.handle(Command::Slide(Slider::Axis(Axis::Y), value));
    }

    #[wasm_bindgen(js_name = setRotateZ)]
    pub fn set_rotate_z(&mut self, value: u32) {
        self.session.handle(Command::Slide(Slider::Axis(Axis::Z), value));
    }

    /// Zoom slider, 0-4500
    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&mut self, value: u32) {
        self.session.handle(Command::Slide(Slider::Zoom, value));
    }

    /// Mouse wheel `deltaY` in pixels; returns the zoom slider position to display
    pub fn wheel(&mut self, delta_y: f64) -> u32 {
        if delta_y.is_finite() && delta_y != 0.0 {
            let notches = controls::notches_from_pixels(delta_y);
            self.session.handle(Command::Wheel(notches));
        }
        self.session.sliders().zoom
    }

    /// Figure color as `#rrggbb`
    #[wasm_bindgen(js_name = setFigureColor)]
    pub fn set_figure_color(&mut self, hex: &str) -> Result<(), JsValue> {
        let color = parse_color(hex)?;
        self.session.handle(Command::FigureColor(color));
        Ok(())
    }

    /// Background color as `#rrggbb`
    #[wasm_bindgen(js_name = setBackgroundColor)]
    pub fn set_background_color(&mut self, hex: &str) -> Result<(), JsValue> {
        let color = parse_color(hex)?;
        self.session.handle(Command::BackgroundColor(color));
        Ok(())
    }

    /// Settings summary for a status bar
    pub fn status(&self) -> String {
        let fps = self.session.config().show_fps.then(|| self.fps.fps());
        self.session.status_line(fps)
    }
}

/// Names accepted by the constructor and `selectFigure`
#[wasm_bindgen(js_name = figureNames)]
pub fn figure_names() -> Vec<JsValue> {
    FigureKind::ALL
        .iter()
        .map(|kind| JsValue::from_str(kind.name()))
        .collect()
}

fn parse_color(hex: &str) -> Result<Rgb, JsValue> {
    hex.parse::<Rgb>().map_err(|err| js_error(&err.to_string()))
}

fn js_error(message: &str) -> JsValue {
    JsValue::from_str(message)
}

fn init_logging_once() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        #[cfg(target_arch = "wasm32")]
        {
            console_error_panic_hook::set_once();
            let _ = wasm_logger::init(wasm_logger::Config::default());
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() {
    init_logging_once();
    log::debug!("trail3d-web v{} loaded", env!("CARGO_PKG_VERSION"));
}
