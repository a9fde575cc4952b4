use crate::constants::{PARALLAX_MIN_VIEWPORT_WIDTH, SERVICE_POINT_CENTER_PX};

/// Viewport-relative measurements taken on one scroll tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxInput {
    /// Client-rect top of the first service item.
    pub first_item_top: f64,
    /// Client-rect top of the last service item.
    pub last_item_top: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

#[inline]
pub fn parallax_enabled(viewport_width: f64) -> bool {
    viewport_width > PARALLAX_MIN_VIEWPORT_WIDTH
}

/// Vertical travel of the services title, in px.
///
/// Zero while the first service point sits below the viewport centre, growing
/// to the full first-to-last distance once the last point reaches it. Always
/// zero on narrow viewports.
pub fn parallax_offset(input: &ParallaxInput) -> f64 {
    if !parallax_enabled(input.viewport_width) {
        return 0.0;
    }
    let first = input.first_item_top + SERVICE_POINT_CENTER_PX;
    let last = input.last_item_top + SERVICE_POINT_CENTER_PX;
    let distance = (last - first).abs();
    if distance == 0.0 {
        return 0.0;
    }
    let progress = ((input.viewport_height / 2.0 - first) / distance).clamp(0.0, 1.0);
    distance * progress
}
