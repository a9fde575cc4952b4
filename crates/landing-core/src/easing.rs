//! Easing curves applied to scroll-driven progress.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    /// `power2.out` in scroll-animation terms: cubic ease-out, `1 - (1 - t)^3`.
    Power2Out,
}

impl Easing {
    /// Apply the easing to a progress value; input is clamped to \[0, 1\].
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power2Out => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
        }
    }
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
