//! Scroll trigger windows and scrub smoothing.
//!
//! A trigger window is the range of document scroll offsets over which an
//! effect runs. Its ends are described the way scroll-linked animation tools
//! describe them: a point on the trigger element meeting a line across the
//! viewport.

use crate::constants::SCRUB_SNAP_EPSILON;

/// Measured geometry of a trigger element, in document coordinates (CSS px).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerLayout {
    /// Element top relative to the document (scroll offset + client rect top).
    pub top: f64,
    pub height: f64,
    pub viewport_height: f64,
}

/// "Element point meets viewport line": `element` is a fraction of the element
/// height below its top, `viewport` a fraction of the viewport height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub element: f64,
    pub viewport: f64,
}

impl Anchor {
    pub const fn new(element: f64, viewport: f64) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which the anchor points coincide.
    #[inline]
    pub fn scroll_offset(&self, layout: &TriggerLayout) -> f64 {
        layout.top + self.element * layout.height - self.viewport * layout.viewport_height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerWindow {
    pub start: f64,
    pub end: f64,
}

impl TriggerWindow {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn from_anchors(layout: &TriggerLayout, start: Anchor, end: Anchor) -> Self {
        Self::new(start.scroll_offset(layout), end.scroll_offset(layout))
    }

    /// Fraction of the window scrolled through, clamped to \[0, 1\].
    ///
    /// Non-decreasing in `scroll`. A window with `end <= start` jumps from 0 to
    /// 1 at `end`.
    pub fn progress(&self, scroll: f64) -> f64 {
        let span = self.end - self.start;
        if span.is_nan() || span <= 0.0 {
            return if scroll >= self.end { 1.0 } else { 0.0 };
        }
        ((scroll - self.start) / span).clamp(0.0, 1.0)
    }
}

/// Lagged follower for a scroll-driven value.
///
/// With a positive `lag` the displayed value approaches the target with a time
/// constant of `lag / 3` (about 95% caught up after `lag` seconds) and snaps
/// once within `SCRUB_SNAP_EPSILON`. With no lag it tracks the target exactly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scrub {
    lag: f64,
    value: Option<f64>,
}

impl Scrub {
    pub fn new(lag_sec: f64) -> Self {
        Self {
            lag: lag_sec.max(0.0),
            value: None,
        }
    }

    pub fn immediate() -> Self {
        Self::new(0.0)
    }

    pub fn lag(&self) -> f64 {
        self.lag
    }

    pub fn is_smoothing(&self) -> bool {
        self.lag > 0.0
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Move toward `target` over `dt_sec` and return the displayed value.
    ///
    /// The first call adopts the target directly.
    pub fn advance(&mut self, target: f64, dt_sec: f64) -> f64 {
        let next = match self.value {
            Some(current) if self.lag > 0.0 => {
                let tau = self.lag / 3.0;
                let alpha = 1.0 - (-dt_sec.max(0.0) / tau).exp();
                let v = current + (target - current) * alpha;
                if (target - v).abs() < SCRUB_SNAP_EPSILON {
                    target
                } else {
                    v
                }
            }
            _ => target,
        };
        self.value = Some(next);
        next
    }

    /// True once the displayed value equals `target`.
    pub fn is_settled(&self, target: f64) -> bool {
        self.value == Some(target)
    }
}
