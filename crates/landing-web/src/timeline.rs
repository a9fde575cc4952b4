use crate::dom::{self, Listener};
use crate::frame::FrameLoop;
use glam::DVec2;
use landing_core::constants::{FLIGHT_PATH_DATA, FLIGHT_PATH_VIEWBOX};
use landing_core::{
    MarkerLayout, Scrub, StepVisual, Timeline, TimelineParams, TimelineStyles, TriggerLayout,
    ViewBox, PROCESS_STEPS,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Targets {
    section: web::Element,
    svg: web::Element,
    path: web::SvgElement,
    marker: web::HtmlElement,
    steps: Vec<web::HtmlElement>,
}

/// Layout read at the start of a tick; writes only happen after this.
#[derive(Clone, Copy, Debug)]
struct Measurement {
    scroll: f64,
    section: TriggerLayout,
    marker: MarkerLayout,
}

struct TimelineView {
    timeline: Timeline,
    viewbox: ViewBox,
    targets: Targets,
    path_scrub: Scrub,
    step_scrubs: Vec<Scrub>,
    measured: Option<Measurement>,
    applied: Option<TimelineStyles>,
}

impl TimelineView {
    fn measure(&mut self) {
        let Some(window) = web::window() else {
            return;
        };
        let scroll = dom::scroll_y(&window);
        let viewport = dom::viewport_size(&window);
        let section_rect = self.targets.section.get_bounding_client_rect();
        let svg_rect = self.targets.svg.get_bounding_client_rect();
        // marker is absolutely positioned at 0,0 of its parent
        let container = self
            .targets
            .marker
            .parent_element()
            .map(|p| p.get_bounding_client_rect());
        let (cx, cy) = container
            .map(|r| (r.left(), r.top()))
            .unwrap_or((svg_rect.left(), svg_rect.top()));
        self.measured = Some(Measurement {
            scroll,
            section: TriggerLayout {
                top: section_rect.top() + scroll,
                height: section_rect.height(),
                viewport_height: viewport.y,
            },
            marker: MarkerLayout {
                svg_origin: DVec2::new(svg_rect.left() - cx, svg_rect.top() - cy),
                svg_size: DVec2::new(svg_rect.width(), svg_rect.height()),
                marker_size: DVec2::new(
                    self.targets.marker.offset_width() as f64,
                    self.targets.marker.offset_height() as f64,
                ),
            },
        });
    }

    /// Advance scrubbing toward the measured targets and write styles if
    /// they differ from the last write. Layout is part of the styles, so a
    /// resize at unchanged progress still re-places the marker.
    fn tick(&mut self, dt_sec: f64) {
        let Some(m) = self.measured else {
            return;
        };
        let path_target = self.timeline.progress(m.scroll, &m.section);
        let step_targets = self.timeline.step_progress(m.scroll, &m.section);

        let path_p = self.path_scrub.advance(path_target, dt_sec);
        let step_p: Vec<f64> = self
            .step_scrubs
            .iter_mut()
            .zip(&step_targets)
            .map(|(scrub, &target)| scrub.advance(target, dt_sec))
            .collect();

        let styles = self
            .timeline
            .styles(path_p, &step_p, &self.viewbox, &m.marker);
        if !styles.needs_write(self.applied.as_ref()) {
            return;
        }
        _ = self
            .targets
            .path
            .style()
            .set_property("stroke-dashoffset", &format!("{:.3}", styles.dash_offset));
        dom::set_style(
            &self.targets.marker,
            "transform",
            &styles.marker.css_transform(),
        );
        for (el, visual) in self.targets.steps.iter().zip(&styles.steps) {
            write_step(el, visual);
        }
        self.applied = Some(styles);
    }
}

fn write_step(el: &web::HtmlElement, visual: &StepVisual) {
    dom::set_style(el, "opacity", &format!("{:.3}", visual.opacity));
    dom::set_style(el, "transform", &visual.css_transform());
    dom::set_style(el, "filter", &visual.css_filter());
}

/// Fill an empty steps container with the process step markup.
fn render_default_steps(document: &web::Document, container: &web::Element) {
    for step in PROCESS_STEPS.iter() {
        let Ok(item) = document.create_element("div") else {
            return;
        };
        item.set_class_name("step-item");
        item.set_inner_html(&format!(
            "<div class=\"step-dot\"><span class=\"step-number\">{}</span></div>\
             <div class=\"step-content\"><h3 class=\"step-title\">{}</h3>\
             <p class=\"step-description\">{}</p></div>",
            step.number,
            escape_html(step.title),
            escape_html(step.description)
        ));
        _ = container.append_child(&item);
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Scroll-driven flight path, marker and step reveals for one section.
pub struct TimelineDriver {
    _scroll: Listener,
    _resize: Listener,
    _frame: Option<FrameLoop>,
}

impl TimelineDriver {
    pub fn mount(document: &web::Document, section: web::Element) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let svg = section
            .query_selector(".flight-path-svg")
            .ok()
            .flatten()
            .ok_or_else(|| anyhow::anyhow!("missing .flight-path-svg"))?;
        let path = section
            .query_selector(".flight-path")
            .ok()
            .flatten()
            .ok_or_else(|| anyhow::anyhow!("missing .flight-path"))?
            .dyn_into::<web::SvgElement>()
            .map_err(|_| anyhow::anyhow!(".flight-path is not an SVG element"))?;
        let marker = dom::query_html(&section, ".plane-wrapper")
            .ok_or_else(|| anyhow::anyhow!("missing .plane-wrapper"))?;

        if dom::query_all(&section, ".step-item").is_empty() {
            if let Ok(Some(container)) = section.query_selector(".steps-container") {
                render_default_steps(document, &container);
            }
        }
        let steps: Vec<web::HtmlElement> = dom::query_all(&section, ".step-item")
            .into_iter()
            .filter_map(|el| el.dyn_into::<web::HtmlElement>().ok())
            .collect();

        let data = path.get_attribute("d").unwrap_or_default();
        let timeline = match Timeline::from_path_data(&data, steps.len()) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("[timeline] path data rejected ({e}), using built-in flight path");
                _ = path.set_attribute("d", FLIGHT_PATH_DATA);
                Timeline::from_path_data(FLIGHT_PATH_DATA, steps.len())?
            }
        };
        // dash against the browser's own measure of the stroke
        let timeline = match path.dyn_ref::<web::SvgGeometryElement>() {
            Some(geometry) => timeline.with_drawn_length(geometry.get_total_length() as f64),
            None => timeline,
        };
        let [x, y, w, h] = FLIGHT_PATH_VIEWBOX;
        let viewbox = svg
            .get_attribute("viewBox")
            .and_then(|v| ViewBox::parse(&v))
            .unwrap_or(ViewBox::new(x, y, w, h));
        let params = TimelineParams::from_scrub_attribute(section.get_attribute("data-scrub").as_deref());

        // fully hidden until progress moves
        let length = format!("{:.3}", timeline.dash_length());
        _ = path.style().set_property("stroke-dasharray", &length);
        _ = path.style().set_property("stroke-dashoffset", &length);
        for el in &steps {
            write_step(el, &StepVisual::HIDDEN);
        }

        log::info!(
            "[timeline] mounted arc_length={:.1} dash_length={:.1} steps={} scrub={:.2}/{:.2}s",
            timeline.arc_length(),
            timeline.dash_length(),
            steps.len(),
            params.path_scrub_sec,
            params.step_scrub_sec
        );

        let step_scrubs = vec![Scrub::new(params.step_scrub_sec); steps.len()];
        let view = Rc::new(RefCell::new(TimelineView {
            timeline,
            viewbox,
            targets: Targets {
                section,
                svg,
                path,
                marker,
                steps,
            },
            path_scrub: Scrub::new(params.path_scrub_sec),
            step_scrubs,
            measured: None,
            applied: None,
        }));

        let smoothing = params.is_smoothing();
        let on_change = {
            let view = view.clone();
            move || {
                let mut v = view.borrow_mut();
                v.measure();
                if !smoothing {
                    v.tick(0.0);
                }
            }
        };
        on_change();

        let scroll = Listener::new(&window, "scroll", on_change.clone())?;
        let resize = Listener::new(&window, "resize", on_change)?;
        let frame = if smoothing {
            let view = view.clone();
            Some(FrameLoop::start(move |dt| view.borrow_mut().tick(dt))?)
        } else {
            None
        };

        Ok(Self {
            _scroll: scroll,
            _resize: resize,
            _frame: frame,
        })
    }
}
