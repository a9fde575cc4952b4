#![cfg(target_arch = "wasm32")]
use landing_core::constants::FOOTER_BLOB_SPEED;
use landing_core::BlobParams;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod dom;
mod fluid;
mod frame;
mod parallax;
mod timeline;

pub use fluid::{mount_fluid_background, FluidBackground};
use parallax::ParallaxDriver;
use timeline::TimelineDriver;

thread_local! {
    static PAGE: RefCell<Option<PageHandle>> = const { RefCell::new(None) };
}

/// Every effect mounted on the page; dropping it releases all listeners and
/// animation frames.
#[wasm_bindgen]
pub struct PageHandle {
    fluid: Vec<FluidBackground>,
    timeline: Option<TimelineDriver>,
    parallax: Option<ParallaxDriver>,
}

#[wasm_bindgen]
impl PageHandle {
    #[wasm_bindgen(getter)]
    pub fn fluid_count(&self) -> usize {
        self.fluid.len()
    }

    #[wasm_bindgen(getter)]
    pub fn has_timeline(&self) -> bool {
        self.timeline.is_some()
    }

    #[wasm_bindgen(getter)]
    pub fn has_parallax(&self) -> bool {
        self.parallax.is_some()
    }
}

impl Drop for PageHandle {
    fn drop(&mut self) {
        log::info!("[page] unmounting");
    }
}

fn mount_fluid(document: &web::Document) -> Vec<FluidBackground> {
    dom::document_query_all(document, "canvas.fluid-background")
        .into_iter()
        .filter_map(|el| {
            let colors = el.get_attribute("data-colors");
            let speed = el.get_attribute("data-speed");
            let canvas = el.dyn_into::<web::HtmlCanvasElement>().ok()?;
            let params = BlobParams {
                speed: FOOTER_BLOB_SPEED,
                ..BlobParams::default()
            }
            .with_attributes(colors.as_deref(), speed.as_deref());
            match FluidBackground::mount(canvas, params) {
                Ok(f) => Some(f),
                Err(e) => {
                    log::warn!("[fluid] not mounted: {e:#}");
                    None
                }
            }
        })
        .collect()
}

fn mount_timeline(document: &web::Document) -> Option<TimelineDriver> {
    let section = document.query_selector(".process-section").ok().flatten()?;
    TimelineDriver::mount(document, section)
        .map_err(|e| log::warn!("[timeline] not mounted: {e:#}"))
        .ok()
}

fn mount_parallax(document: &web::Document) -> Option<ParallaxDriver> {
    let title = document
        .query_selector(".services-sticky-title")
        .ok()
        .flatten()?
        .dyn_into::<web::HtmlElement>()
        .ok()?;
    let items = dom::document_query_all(document, ".services-right .service-item");
    ParallaxDriver::mount(title, items)
        .map_err(|e| log::warn!("[parallax] not mounted: {e:#}"))
        .ok()
}

fn mount_all() -> Result<PageHandle, JsValue> {
    let (_, document) =
        dom::window_document().ok_or_else(|| JsValue::from_str("no window/document"))?;
    let page = PageHandle {
        fluid: mount_fluid(&document),
        timeline: mount_timeline(&document),
        parallax: mount_parallax(&document),
    };
    log::info!(
        "[page] mounted fluid={} timeline={} parallax={}",
        page.fluid.len(),
        page.timeline.is_some(),
        page.parallax.is_some()
    );
    Ok(page)
}

/// Mount every effect whose elements are present. Missing elements leave that
/// effect unmounted rather than failing.
///
/// The page mounted by `start` is released first, so listeners are never
/// doubled. The returned handle is owned by the caller; free it before
/// mounting again.
#[wasm_bindgen]
pub fn mount_page() -> Result<PageHandle, JsValue> {
    unmount_page();
    mount_all()
}

/// Release the effects mounted at startup.
#[wasm_bindgen]
pub fn unmount_page() {
    let page = PAGE.with(|p| p.borrow_mut().take());
    drop(page);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("landing-web starting");

    let page = mount_all()?;
    PAGE.with(|p| {
        // a second start replaces (and releases) the earlier page
        let previous = p.borrow_mut().replace(page);
        drop(previous);
    });
    Ok(())
}
