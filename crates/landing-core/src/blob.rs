//! Fluid background simulation.
//!
//! A [`BlobField`] owns a fixed-size set of drifting, pulsating blobs for one
//! drawing surface. It is platform independent: the web frontend supplies a
//! [`BlobSurface`] backed by a 2D canvas, tests supply a recording one.

use crate::color::{default_palette, parse_palette, Rgb};
use crate::constants::*;
use glam::DVec2;
use rand::Rng;
use smallvec::SmallVec;
use std::f64::consts::TAU;

/// Drawing operations a blob field needs from its render target.
pub trait BlobSurface {
    /// Fill the whole `size` area with an opaque color.
    fn clear(&mut self, color: Rgb, size: DVec2);
    /// Switch between additive ("lighter") and normal ("source-over") compositing.
    fn set_additive(&mut self, additive: bool);
    /// Fill a circle with a radial gradient of `color`; `stops` are `(offset, alpha)`.
    fn fill_radial(&mut self, center: DVec2, radius: f64, color: Rgb, stops: &[(f64, f64)]);
}

#[derive(Clone, Debug, PartialEq)]
pub struct Blob {
    pub position: DVec2,
    pub radius: f64,
    pub velocity: DVec2,
    pub color: Rgb,
    pub phase: f64,
}

impl Blob {
    /// Radius at the given clock time; stays within `radius ± BLOB_PULSE_AMPLITUDE`.
    #[inline]
    pub fn pulse_radius(&self, clock: f64) -> f64 {
        let r = self.radius + BLOB_PULSE_AMPLITUDE * (BLOB_PULSE_RATE * clock + self.phase).sin();
        r.max(0.0)
    }

    /// Move by one velocity step, wrapping to the opposite edge once the
    /// bounding circle has fully left the surface.
    pub fn advance(&mut self, bounds: DVec2) {
        self.position += self.velocity;
        let r = self.radius;
        if self.position.x < -r {
            self.position.x = bounds.x + r;
        }
        if self.position.x > bounds.x + r {
            self.position.x = -r;
        }
        if self.position.y < -r {
            self.position.y = bounds.y + r;
        }
        if self.position.y > bounds.y + r {
            self.position.y = -r;
        }
    }
}

#[derive(Clone, Debug)]
pub struct BlobParams {
    pub palette: Vec<Rgb>,
    /// Maximum per-axis speed span; velocities fall in `[-speed/2, speed/2)`.
    pub speed: f64,
}

impl Default for BlobParams {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            speed: DEFAULT_BLOB_SPEED,
        }
    }
}

impl BlobParams {
    /// Override from `data-colors` / `data-speed` attribute values.
    ///
    /// Invalid values are logged and leave the current setting in place.
    pub fn with_attributes(mut self, colors: Option<&str>, speed: Option<&str>) -> Self {
        if let Some(list) = colors {
            match parse_palette(list) {
                Ok(palette) if !palette.is_empty() => self.palette = palette,
                Ok(_) => log::warn!("[fluid] empty data-colors, keeping palette"),
                Err(e) => log::warn!("[fluid] ignoring data-colors: {e}"),
            }
        }
        if let Some(raw) = speed {
            match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => self.speed = v,
                _ => log::warn!("[fluid] ignoring data-speed {raw:?}"),
            }
        }
        self
    }
}

pub struct BlobField {
    params: BlobParams,
    size: DVec2,
    blobs: SmallVec<[Blob; BLOB_COUNT]>,
    clock: f64,
}

impl BlobField {
    pub fn new(mut params: BlobParams) -> Self {
        if params.palette.is_empty() {
            log::warn!("[fluid] empty palette, using default");
            params.palette = default_palette();
        }
        Self {
            params,
            size: DVec2::ZERO,
            blobs: SmallVec::new(),
            clock: 0.0,
        }
    }

    pub fn params(&self) -> &BlobParams {
        &self.params
    }

    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    pub fn size(&self) -> DVec2 {
        self.size
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// True when there is nothing visible to draw (hidden or collapsed container).
    #[inline]
    pub fn is_collapsed(&self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    /// Adopt a new surface size and regenerate every blob.
    ///
    /// Called on mount and on each resize; previous blobs are discarded.
    pub fn resize<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        let size = DVec2::new(width.max(0.0), height.max(0.0));
        self.size = size;
        let speed = self.params.speed;
        let palette = &self.params.palette;
        self.blobs = (0..BLOB_COUNT)
            .map(|i| Blob {
                position: DVec2::new(rng.gen::<f64>() * size.x, rng.gen::<f64>() * size.y),
                radius: BLOB_RADIUS_MIN + rng.gen::<f64>() * BLOB_RADIUS_SPAN,
                velocity: DVec2::new(
                    (rng.gen::<f64>() - 0.5) * speed,
                    (rng.gen::<f64>() - 0.5) * speed,
                ),
                color: palette[i % palette.len()],
                phase: rng.gen::<f64>() * TAU,
            })
            .collect();
    }

    /// Advance the clock by one nominal frame and move every blob.
    pub fn step(&mut self) {
        self.clock += FRAME_STEP_SEC;
        if self.is_collapsed() {
            return;
        }
        let bounds = self.size;
        for blob in self.blobs.iter_mut() {
            blob.advance(bounds);
        }
    }

    /// Draw the current state: dark clear, then additive gradients.
    pub fn render<S: BlobSurface + ?Sized>(&self, surface: &mut S) {
        if self.is_collapsed() {
            return;
        }
        surface.clear(BACKGROUND, self.size);
        surface.set_additive(true);
        for blob in &self.blobs {
            let radius = blob.pulse_radius(self.clock);
            if radius <= 0.0 {
                continue;
            }
            surface.fill_radial(blob.position, radius, blob.color, &BLOB_GRADIENT_STOPS);
        }
        surface.set_additive(false);
    }

    /// One animation frame: step then render.
    pub fn frame<S: BlobSurface + ?Sized>(&mut self, surface: &mut S) {
        self.step();
        self.render(surface);
    }
}
