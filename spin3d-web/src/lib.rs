//! spin3d Web - fixed-resolution "LCD" front end drawn to an HTML canvas.
//!
//! The page owns the animation loop: it calls `frame()` once per
//! `requestAnimationFrame` and `press_button_b()` when the on-screen button
//! is pressed.

use log::debug;
use spin3d_core::{
    render_frame, tick, Framebuffer, FrameInput, RenderConfig, Rgb, SceneState, Surface,
    TriangleDrawer, Vec2, Viewport,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// Native resolution of the LCD panel
pub const PANEL: Viewport = Viewport::new(320, 240);

/// Device preset with `json` overrides applied. Any viewport other than the
/// panel's own is rejected.
pub fn device_config(json: &str) -> spin3d_core::Result<RenderConfig> {
    let config = RenderConfig::from_json_over(&RenderConfig::device(), json)?;
    if config.viewport != PANEL {
        return Err(spin3d_core::Error::PanelMismatch {
            width: config.viewport.width,
            height: config.viewport.height,
            panel_width: PANEL.width,
            panel_height: PANEL.height,
        });
    }
    Ok(config)
}

/// Where an LCD frame ends up once presented
pub trait Panel {
    fn push(&mut self, rgba: &[u8], width: u32, height: u32) -> Result<(), JsValue>;
}

/// 2D canvas context receiving the framebuffer as image data
pub struct CanvasPanel {
    context: CanvasRenderingContext2d,
}

impl CanvasPanel {
    pub fn attach(canvas_id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{canvas_id}'")))?
            .dyn_into::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { context })
    }
}

impl Panel for CanvasPanel {
    fn push(&mut self, rgba: &[u8], width: u32, height: u32) -> Result<(), JsValue> {
        let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(rgba), width, height)?;
        self.context.put_image_data(&image, 0.0, 0.0)
    }
}

/// Fixed-size pixel panel with a single toggle button
pub struct LcdDevice<P> {
    scene: SceneState,
    framebuffer: Framebuffer,
    panel: P,
    button_b: bool,
}

impl<P: Panel> LcdDevice<P> {
    pub fn new(config: &RenderConfig, panel: P) -> spin3d_core::Result<Self> {
        let scene = SceneState::new(config)?;
        let Viewport { width, height } = config.viewport;
        Ok(Self {
            scene,
            framebuffer: Framebuffer::new(width as usize, height as usize),
            panel,
            button_b: false,
        })
    }

    /// Latch a button press; it is consumed by the next frame
    pub fn press_button_b(&mut self) {
        self.button_b = true;
    }

    pub fn wireframe(&self) -> bool {
        self.scene.wireframe()
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Advance one frame and push it to the panel
    pub fn frame(&mut self) -> Result<usize, JsValue> {
        let input = FrameInput {
            toggle_wireframe: std::mem::take(&mut self.button_b),
            resize: None,
        };
        let list = tick(&mut self.scene, input);
        render_frame(self, &list)?;
        Ok(list.len())
    }
}

impl<P: Panel> Surface for LcdDevice<P> {
    type Error = JsValue;

    fn viewport(&self) -> Viewport {
        self.framebuffer.viewport()
    }

    fn clear(&mut self, color: Rgb) {
        self.framebuffer.clear(color);
    }

    fn present(&mut self) -> Result<(), JsValue> {
        let Viewport { width, height } = self.framebuffer.viewport();
        self.panel.push(&self.framebuffer.to_rgba(), width, height)
    }
}

impl<P: Panel> TriangleDrawer for LcdDevice<P> {
    fn fill_triangle(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: Rgb) {
        self.framebuffer.fill_triangle(p0, p1, p2, color);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb) {
        self.framebuffer.draw_line(from, to, color);
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    device: LcdDevice<CanvasPanel>,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Attach to the canvas with `canvas_id` using the 320x240 device preset
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebRenderer, JsValue> {
        Self::build(canvas_id, RenderConfig::device())
    }

    /// Attach with JSON overrides on the device preset; the panel size is fixed
    pub fn with_config(canvas_id: &str, config_json: &str) -> Result<WebRenderer, JsValue> {
        let config = device_config(config_json).map_err(to_js)?;
        Self::build(canvas_id, config)
    }

    /// Render a frame; returns the number of draw requests issued
    pub fn frame(&mut self) -> Result<usize, JsValue> {
        self.device.frame()
    }

    pub fn press_button_b(&mut self) {
        self.device.press_button_b();
    }

    pub fn wireframe(&self) -> bool {
        self.device.wireframe()
    }
}

impl WebRenderer {
    fn build(canvas_id: &str, config: RenderConfig) -> Result<WebRenderer, JsValue> {
        let panel = CanvasPanel::attach(canvas_id)?;
        let device = LcdDevice::new(&config, panel).map_err(to_js)?;
        debug!("web renderer attached to '{canvas_id}'");
        Ok(WebRenderer { device })
    }
}

fn to_js(err: spin3d_core::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}
