use crate::dom::{self, Listener};
use landing_core::{parallax_offset, ParallaxInput};
use std::rc::Rc;
use web_sys as web;

/// Moves the services title alongside the service list on wide viewports.
pub struct ParallaxDriver {
    _scroll: Listener,
    _resize: Listener,
}

impl ParallaxDriver {
    pub fn mount(title: web::HtmlElement, items: Vec<web::Element>) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        if items.is_empty() {
            anyhow::bail!("no .service-item elements");
        }
        let title = Rc::new(title);
        let items = Rc::new(items);

        let update = {
            let title = title.clone();
            let items = items.clone();
            move || {
                let Some(window) = web::window() else {
                    return;
                };
                let (Some(first), Some(last)) = (items.first(), items.last()) else {
                    return;
                };
                let viewport = dom::viewport_size(&window);
                let input = ParallaxInput {
                    first_item_top: first.get_bounding_client_rect().top(),
                    last_item_top: last.get_bounding_client_rect().top(),
                    viewport_width: viewport.x,
                    viewport_height: viewport.y,
                };
                let offset = parallax_offset(&input);
                dom::set_style(&title, "transform", &format!("translateY({offset:.2}px)"));
            }
        };
        update();

        log::info!("[parallax] mounted over {} service items", items.len());
        Ok(Self {
            _scroll: Listener::new(&window, "scroll", update.clone())?,
            _resize: Listener::new(&window, "resize", update)?,
        })
    }
}
