use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A running `requestAnimationFrame` loop.
///
/// The callback receives the seconds elapsed since the previous frame. The
/// pending frame is cancelled and the callback released when this is dropped.
pub struct FrameLoop {
    tick: TickSlot,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let tick: TickSlot = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let tick_clone = tick.clone();
        let pending_clone = pending.clone();
        let mut last = Instant::now();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let now = Instant::now();
            let dt_sec = (now - last).as_secs_f64();
            last = now;
            on_frame(dt_sec);
            if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
                pending_clone.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
            }
        }) as Box<dyn FnMut()>));

        let first = {
            let slot = tick.borrow();
            let cb = slot
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("tick closure missing"))?;
            window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(|e| anyhow::anyhow!("requestAnimationFrame: {:?}", e))?
        };
        pending.set(Some(first));
        Ok(Self { tick, pending })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(w), Some(id)) = (web::window(), self.pending.take()) {
            _ = w.cancel_animation_frame(id);
        }
        // the closure holds a clone of `tick`; clearing the slot breaks the cycle
        self.tick.borrow_mut().take();
    }
}
