use crate::dom::{self, Listener};
use crate::frame::FrameLoop;
use glam::DVec2;
use landing_core::{BlobField, BlobParams, BlobSurface, Rgb};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

/// 2D canvas context as a blob render target.
struct CanvasSurface<'a> {
    ctx: &'a web::CanvasRenderingContext2d,
}

impl BlobSurface for CanvasSurface<'_> {
    fn clear(&mut self, color: Rgb, size: DVec2) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill_rect(0.0, 0.0, size.x, size.y);
    }

    fn set_additive(&mut self, additive: bool) {
        let op = if additive { "lighter" } else { "source-over" };
        _ = self.ctx.set_global_composite_operation(op);
    }

    fn fill_radial(&mut self, center: DVec2, radius: f64, color: Rgb, stops: &[(f64, f64)]) {
        let Ok(gradient) = self
            .ctx
            .create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius)
        else {
            return;
        };
        for &(offset, alpha) in stops {
            _ = gradient.add_color_stop(offset as f32, &color.css_rgba(alpha));
        }
        self.ctx.begin_path();
        _ = self.ctx.arc(center.x, center.y, radius, 0.0, TAU);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill();
    }
}

struct FluidState {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    field: BlobField,
    rng: StdRng,
}

impl FluidState {
    fn resize(&mut self) {
        let size = dom::sync_canvas_to_container(&self.canvas, &self.ctx);
        self.field.resize(size.x, size.y, &mut self.rng);
    }

    fn frame(&mut self) {
        let mut surface = CanvasSurface { ctx: &self.ctx };
        self.field.frame(&mut surface);
    }
}

/// Animated blob background bound to one canvas; stops when freed.
#[wasm_bindgen]
pub struct FluidBackground {
    _frame: FrameLoop,
    _resize: Listener,
}

impl FluidBackground {
    pub fn mount(canvas: web::HtmlCanvasElement, params: BlobParams) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("get_context: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("not a 2d context: {:?}", e))?;

        let state = Rc::new(RefCell::new(FluidState {
            canvas,
            ctx,
            field: BlobField::new(params),
            rng: StdRng::from_entropy(),
        }));
        state.borrow_mut().resize();
        {
            let s = state.borrow();
            log::info!(
                "[fluid] mounted {}x{} blobs={} speed={:.2}",
                s.field.size().x,
                s.field.size().y,
                s.field.blobs().len(),
                s.field.params().speed
            );
        }

        let state_resize = state.clone();
        let resize = Listener::new(&window, "resize", move || {
            state_resize.borrow_mut().resize();
        })?;

        let state_frame = state;
        let frame = FrameLoop::start(move |_dt| {
            state_frame.borrow_mut().frame();
        })?;

        Ok(Self {
            _frame: frame,
            _resize: resize,
        })
    }
}

/// Mount a fluid background on `canvas` with hex `colors` and `speed`.
#[wasm_bindgen]
pub fn mount_fluid_background(
    canvas: web::HtmlCanvasElement,
    colors: &js_sys::Array,
    speed: f64,
) -> Result<FluidBackground, JsValue> {
    let palette = colors
        .iter()
        .filter_map(|v| v.as_string())
        .map(|s| s.parse::<Rgb>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let params = BlobParams {
        palette,
        speed: if speed.is_finite() { speed.max(0.0) } else { BlobParams::default().speed },
    };
    FluidBackground::mount(canvas, params).map_err(|e| JsValue::from_str(&format!("{e:#}")))
}
