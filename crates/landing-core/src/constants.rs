//! Tuning constants for the landing page effects.
//!
//! These constants express intended behavior (sizes, thresholds, reveal
//! targets) and keep magic numbers out of the simulation and mapping code.
use crate::color::Rgb;

// Fluid background
pub const BLOB_COUNT: usize = 6;
pub const BLOB_RADIUS_MIN: f64 = 80.0;
pub const BLOB_RADIUS_SPAN: f64 = 120.0; // radius in [MIN, MIN + SPAN)
pub const BLOB_PULSE_AMPLITUDE: f64 = 20.0;
pub const BLOB_PULSE_RATE: f64 = 0.5; // radians per clock second
pub const FRAME_STEP_SEC: f64 = 0.016; // nominal ~1/60 s per frame
pub const BACKGROUND: Rgb = Rgb::new(0x05, 0x05, 0x05);

// Radial gradient stops: (offset, alpha)
pub const BLOB_GRADIENT_STOPS: [(f64, f64); 3] = [(0.0, 1.0), (0.5, 0.4), (1.0, 0.0)];

pub const DEFAULT_PALETTE: [Rgb; 3] = [
    Rgb::new(0xff, 0x6b, 0x00), // #ff6b00
    Rgb::new(0xff, 0x95, 0x00), // #ff9500
    Rgb::new(0xff, 0xb3, 0x47), // #ffb347
];
pub const DEFAULT_BLOB_SPEED: f64 = 0.5;
pub const FOOTER_BLOB_SPEED: f64 = 0.4; // the footer mount runs slower than the default

// Timeline trigger (fractions of viewport height)
pub const TIMELINE_START_VIEWPORT: f64 = 0.60; // section top reaches 60%
pub const TIMELINE_END_VIEWPORT: f64 = 0.30; // section bottom reaches 30%

// Step reveal windows (percent of section height)
pub const STEP_WINDOW_SPREAD_PCT: f64 = 75.0;
pub const STEP_WINDOW_SPAN_PCT: f64 = 20.0;
pub const STEP_START_VIEWPORT: f64 = 0.70;
pub const STEP_END_VIEWPORT: f64 = 0.50;

// Step hidden state; revealed state is opacity 1, offset 0, blur 0
pub const STEP_HIDDEN_OPACITY: f64 = 0.15;
pub const STEP_HIDDEN_OFFSET_PX: f64 = 40.0;
pub const STEP_HIDDEN_BLUR_PX: f64 = 5.0;

// Scrub lag observed on the page (seconds); off unless configured
pub const PATH_SCRUB_SEC: f64 = 2.0;
pub const STEP_SCRUB_SEC: f64 = 1.5;
pub const SCRUB_SNAP_EPSILON: f64 = 1e-4;

// Flight path viewbox and samples per cubic for the arc-length table
pub const FLIGHT_PATH_VIEWBOX: [f64; 4] = [0.0, 0.0, 1200.0, 2000.0];
pub const ARC_SAMPLES_PER_SEGMENT: usize = 64;

// Parallax title
pub const PARALLAX_MIN_VIEWPORT_WIDTH: f64 = 768.0; // disabled at or below
pub const SERVICE_POINT_CENTER_PX: f64 = 35.0; // half of the 70px point

/// The flight path drawn through the five process steps (1200x2000 viewbox).
pub const FLIGHT_PATH_DATA: &str = "M 600 0 \
    C 600 50, 600 80, 600 100 \
    C 600 140, 500 160, 350 180 \
    C 150 210, 50 250, 50 320 \
    C 50 390, 150 420, 350 440 \
    C 500 455, 600 470, 600 500 \
    C 600 530, 700 550, 850 570 \
    C 1050 600, 1150 640, 1150 710 \
    C 1150 780, 1050 820, 850 840 \
    C 700 855, 600 870, 600 900 \
    C 600 930, 500 950, 350 970 \
    C 150 1000, 50 1040, 50 1110 \
    C 50 1180, 150 1220, 350 1240 \
    C 500 1255, 600 1270, 600 1370 \
    C 600 1330, 700 1350, 850 1370 \
    C 1050 1400, 1150 1440, 1150 1510 \
    C 1150 1580, 1050 1620, 850 1640 \
    C 700 1655, 600 1670, 600 1770 \
    C 620 1750, 500 1750, 350 1770 \
    C 150 1800, 50 1840, 50 1910 \
    C 50 1950, 150 1980, 350 1990 \
    C 500 1995, 600 2000, 600 2000";
