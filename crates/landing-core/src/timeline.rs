//! Scroll-synchronised flight-path timeline.
//!
//! Everything here is a pure function of progress and measured layout: the
//! same scroll offset always maps to the same dash offset, marker pose and step
//! styles, so the web layer can recompute on every scroll or resize tick.

use crate::constants::*;
use crate::easing::{lerp, Easing};
use crate::path::{MotionPath, PathError, Pose};
use crate::scroll::{Anchor, TriggerLayout, TriggerWindow};
use crate::viewbox::ViewBox;
use glam::DVec2;

/// Copy for one process step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepCopy {
    pub number: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const PROCESS_STEPS: [StepCopy; 5] = [
    StepCopy {
        number: "01",
        title: "Initial Consultation",
        description: "We begin with a comprehensive discussion to understand your immigration goals and assess your eligibility.",
    },
    StepCopy {
        number: "02",
        title: "Case Evaluation",
        description: "Our experts analyze your documents, background, and options to create a tailored immigration strategy.",
    },
    StepCopy {
        number: "03",
        title: "Strategy & Documentation",
        description: "We prepare all required paperwork with precision, ensuring compliance with Saudi and UAE regulations.",
    },
    StepCopy {
        number: "04",
        title: "Submission & Follow-Up",
        description: "Your application is submitted and tracked. We handle all communication with immigration authorities.",
    },
    StepCopy {
        number: "05",
        title: "Final Approval & Support",
        description: "Celebrate your approval! We provide ongoing support for your transition to your new destination.",
    },
];

/// Scrub lag for the path/marker and for the step reveals, in seconds.
///
/// Zero means the displayed state follows the scroll position exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimelineParams {
    pub path_scrub_sec: f64,
    pub step_scrub_sec: f64,
}

impl TimelineParams {
    /// Parse a `data-scrub` attribute: absent/`off` disables smoothing, `on`
    /// uses the page's lags, a number sets both lags.
    pub fn from_scrub_attribute(attr: Option<&str>) -> Self {
        match attr.map(str::trim) {
            None | Some("") | Some("off") | Some("false") => Self::default(),
            Some("on") | Some("true") => Self {
                path_scrub_sec: PATH_SCRUB_SEC,
                step_scrub_sec: STEP_SCRUB_SEC,
            },
            Some(raw) => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => Self {
                    path_scrub_sec: v,
                    step_scrub_sec: v,
                },
                _ => {
                    log::warn!("[timeline] ignoring data-scrub {raw:?}");
                    Self::default()
                }
            },
        }
    }

    pub fn is_smoothing(&self) -> bool {
        self.path_scrub_sec > 0.0 || self.step_scrub_sec > 0.0
    }
}

/// Reveal window of step `index` out of `count`, in percent of the section height.
///
/// Windows start at `75 * index / (count - 1)` and span 20 points, so
/// neighbouring windows overlap. A single step starts at 0.
pub fn step_window(index: usize, count: usize) -> (f64, f64) {
    let fraction = if count > 1 {
        index as f64 / (count - 1) as f64
    } else {
        0.0
    };
    let start = fraction * STEP_WINDOW_SPREAD_PCT;
    (start, start + STEP_WINDOW_SPAN_PCT)
}

/// Style of one step block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepVisual {
    pub opacity: f64,
    pub offset_y: f64,
    pub blur: f64,
}

impl StepVisual {
    pub const HIDDEN: StepVisual = StepVisual {
        opacity: STEP_HIDDEN_OPACITY,
        offset_y: STEP_HIDDEN_OFFSET_PX,
        blur: STEP_HIDDEN_BLUR_PX,
    };

    pub const SHOWN: StepVisual = StepVisual {
        opacity: 1.0,
        offset_y: 0.0,
        blur: 0.0,
    };

    /// Interpolate hidden -> shown with a cubic (`power2.out`) ease-out.
    pub fn at(local_progress: f64) -> Self {
        let e = Easing::Power2Out.apply(local_progress);
        Self {
            opacity: lerp(Self::HIDDEN.opacity, Self::SHOWN.opacity, e),
            offset_y: lerp(Self::HIDDEN.offset_y, Self::SHOWN.offset_y, e),
            blur: lerp(Self::HIDDEN.blur, Self::SHOWN.blur, e),
        }
    }

    pub fn css_transform(&self) -> String {
        format!("translateY({:.3}px)", self.offset_y)
    }

    pub fn css_filter(&self) -> String {
        format!("blur({:.3}px)", self.blur)
    }
}

/// Path reveal and marker placement for one progress value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathFrame {
    pub progress: f64,
    pub dash_offset: f64,
    pub marker: Pose,
}

/// Rendered SVG box and marker size, relative to the marker's containing block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerLayout {
    pub svg_origin: DVec2,
    pub svg_size: DVec2,
    pub marker_size: DVec2,
}

/// CSS placement of the marker: top-left translation plus heading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerPlacement {
    pub translate: DVec2,
    pub angle_deg: f64,
}

impl MarkerPlacement {
    /// Centre the marker on `pose`, mapped through the viewbox fit of `layout`.
    pub fn place(pose: &Pose, viewbox: &ViewBox, layout: &MarkerLayout) -> Self {
        let fit = viewbox.fit_meet(layout.svg_size);
        let center = layout.svg_origin + fit.apply(pose.point);
        Self {
            translate: center - layout.marker_size * 0.5,
            angle_deg: pose.angle_deg,
        }
    }

    pub fn css_transform(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) rotate({:.2}deg)",
            self.translate.x, self.translate.y, self.angle_deg
        )
    }
}

/// Every style the timeline writes for one tick.
///
/// Two ticks with equal styles need no DOM writes; a layout change alone
/// (e.g. a resize at constant progress) still produces different styles.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineStyles {
    pub dash_offset: f64,
    pub marker: MarkerPlacement,
    pub steps: Vec<StepVisual>,
}

impl TimelineStyles {
    /// Whether these styles must be written given what was `applied` last.
    pub fn needs_write(&self, applied: Option<&TimelineStyles>) -> bool {
        applied != Some(self)
    }
}

#[derive(Clone, Debug)]
pub struct Timeline {
    path: MotionPath,
    arc_length: f64,
    dash_length: f64,
    step_count: usize,
}

impl Timeline {
    /// The arc length is measured here, once.
    pub fn new(path: MotionPath, step_count: usize) -> Self {
        let arc_length = path.length();
        Self {
            path,
            arc_length,
            dash_length: arc_length,
            step_count,
        }
    }

    /// Dash against the length the renderer measures for the stroke.
    ///
    /// The sampled arc length is a chord approximation and slightly short;
    /// dashing with it would leave the path's tail visible at progress 0.
    /// Non-finite or non-positive lengths are ignored.
    pub fn with_drawn_length(mut self, length: f64) -> Self {
        if length.is_finite() && length > 0.0 {
            self.dash_length = length;
        } else {
            log::warn!(
                "[timeline] ignoring drawn length {length}, keeping {:.3}",
                self.dash_length
            );
        }
        self
    }

    pub fn from_path_data(data: &str, step_count: usize) -> Result<Self, PathError> {
        Ok(Self::new(MotionPath::parse(data)?, step_count))
    }

    /// The built-in flight path with the five process steps.
    pub fn flight_path() -> Result<Self, PathError> {
        Self::from_path_data(FLIGHT_PATH_DATA, PROCESS_STEPS.len())
    }

    pub fn path(&self) -> &MotionPath {
        &self.path
    }

    pub fn arc_length(&self) -> f64 {
        self.arc_length
    }

    /// Stroke length used for `stroke-dasharray` and dash offsets.
    pub fn dash_length(&self) -> f64 {
        self.dash_length
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Section top at 60% of the viewport to section bottom at 30%.
    pub fn trigger(&self, section: &TriggerLayout) -> TriggerWindow {
        TriggerWindow::from_anchors(
            section,
            Anchor::new(0.0, TIMELINE_START_VIEWPORT),
            Anchor::new(1.0, TIMELINE_END_VIEWPORT),
        )
    }

    /// Per-step window: `top + start%` at 70% of the viewport to `top + end%` at 50%.
    pub fn step_trigger(&self, index: usize, section: &TriggerLayout) -> TriggerWindow {
        let (start, end) = step_window(index, self.step_count);
        TriggerWindow::from_anchors(
            section,
            Anchor::new(start / 100.0, STEP_START_VIEWPORT),
            Anchor::new(end / 100.0, STEP_END_VIEWPORT),
        )
    }

    /// Hidden portion of the stroke: `dash_length * (1 - p)`.
    #[inline]
    pub fn dash_offset(&self, progress: f64) -> f64 {
        self.dash_length * (1.0 - progress.clamp(0.0, 1.0))
    }

    pub fn path_frame(&self, progress: f64) -> PathFrame {
        let progress = progress.clamp(0.0, 1.0);
        PathFrame {
            progress,
            dash_offset: self.dash_offset(progress),
            marker: self.path.pose_at(progress),
        }
    }

    /// Path progress for a scroll offset.
    pub fn progress(&self, scroll: f64, section: &TriggerLayout) -> f64 {
        self.trigger(section).progress(scroll)
    }

    /// Local reveal progress of every step for a scroll offset.
    pub fn step_progress(&self, scroll: f64, section: &TriggerLayout) -> Vec<f64> {
        (0..self.step_count)
            .map(|i| self.step_trigger(i, section).progress(scroll))
            .collect()
    }

    /// Styles for already-smoothed progress values under the measured layout.
    pub fn styles(
        &self,
        path_progress: f64,
        step_progress: &[f64],
        viewbox: &ViewBox,
        layout: &MarkerLayout,
    ) -> TimelineStyles {
        let frame = self.path_frame(path_progress);
        TimelineStyles {
            dash_offset: frame.dash_offset,
            marker: MarkerPlacement::place(&frame.marker, viewbox, layout),
            steps: step_progress.iter().copied().map(StepVisual::at).collect(),
        }
    }

    /// Full visual state for a scroll offset (no smoothing).
    pub fn state(&self, scroll: f64, section: &TriggerLayout) -> TimelineState {
        TimelineState {
            path: self.path_frame(self.progress(scroll, section)),
            steps: self
                .step_progress(scroll, section)
                .into_iter()
                .map(StepVisual::at)
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineState {
    pub path: PathFrame,
    pub steps: Vec<StepVisual>,
}
