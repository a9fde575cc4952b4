use glam::DVec2;

/// SVG `viewBox` rectangle in user units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
    pub origin: DVec2,
    pub size: DVec2,
}

impl ViewBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    /// Parse a `viewBox` attribute value ("min-x min-y width height").
    pub fn parse(attr: &str) -> Option<Self> {
        let values: Vec<f64> = attr
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(str::parse::<f64>)
            .collect::<Result<_, _>>()
            .ok()?;
        match values.as_slice() {
            [x, y, w, h] if *w > 0.0 && *h > 0.0 => Some(Self::new(*x, *y, *w, *h)),
            _ => None,
        }
    }

    /// Uniform fit for `preserveAspectRatio="xMidYMid meet"` into `rendered` px.
    pub fn fit_meet(&self, rendered: DVec2) -> ViewBoxFit {
        let sx = rendered.x / self.size.x;
        let sy = rendered.y / self.size.y;
        let scale = sx.min(sy).max(0.0);
        let used = self.size * scale;
        let offset = (rendered - used) * 0.5 - self.origin * scale;
        ViewBoxFit { scale, offset }
    }
}

/// Affine map from viewbox user units to rendered pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBoxFit {
    pub scale: f64,
    pub offset: DVec2,
}

impl ViewBoxFit {
    #[inline]
    pub fn apply(&self, p: DVec2) -> DVec2 {
        p * self.scale + self.offset
    }
}
