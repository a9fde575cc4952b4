// Host-side tests for the fluid background simulation.

use glam::DVec2;
use landing_core::constants::*;
use landing_core::{Blob, BlobField, BlobParams, BlobSurface, Rgb};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::TAU;

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Clear(Rgb, DVec2),
    Additive(bool),
    Fill { center: DVec2, radius: f64, color: Rgb },
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl BlobSurface for Recorder {
    fn clear(&mut self, color: Rgb, size: DVec2) {
        self.ops.push(Op::Clear(color, size));
    }

    fn set_additive(&mut self, additive: bool) {
        self.ops.push(Op::Additive(additive));
    }

    fn fill_radial(&mut self, center: DVec2, radius: f64, color: Rgb, stops: &[(f64, f64)]) {
        assert_eq!(stops, &BLOB_GRADIENT_STOPS[..]);
        self.ops.push(Op::Fill {
            center,
            radius,
            color,
        });
    }
}

fn make_field(speed: f64) -> BlobField {
    BlobField::new(BlobParams {
        palette: DEFAULT_PALETTE.to_vec(),
        speed,
    })
}

fn assert_blobs_in_bounds(field: &BlobField, w: f64, h: f64, speed: f64) {
    assert_eq!(field.blobs().len(), BLOB_COUNT);
    for b in field.blobs() {
        assert!(b.position.x >= 0.0 && b.position.x < w.max(f64::MIN_POSITIVE));
        assert!(b.position.y >= 0.0 && b.position.y < h.max(f64::MIN_POSITIVE));
        assert!(b.radius >= BLOB_RADIUS_MIN && b.radius < BLOB_RADIUS_MIN + BLOB_RADIUS_SPAN);
        assert!(b.velocity.x >= -speed / 2.0 && b.velocity.x < speed / 2.0);
        assert!(b.velocity.y >= -speed / 2.0 && b.velocity.y < speed / 2.0);
        assert!(b.phase >= 0.0 && b.phase < TAU);
    }
}

#[test]
fn resize_always_yields_six_blobs_within_new_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut field = make_field(0.4);
    field.resize(1280.0, 720.0, &mut rng);
    assert_blobs_in_bounds(&field, 1280.0, 720.0, 0.4);

    for _ in 0..50 {
        field.step();
    }
    field.resize(320.0, 180.0, &mut rng);
    assert_blobs_in_bounds(&field, 320.0, 180.0, 0.4);
    assert_eq!(field.size(), DVec2::new(320.0, 180.0));
}

#[test]
fn same_seed_places_blobs_identically() {
    let mut a = make_field(0.5);
    let mut b = make_field(0.5);
    a.resize(800.0, 600.0, &mut StdRng::seed_from_u64(7));
    b.resize(800.0, 600.0, &mut StdRng::seed_from_u64(7));
    assert_eq!(a.blobs(), b.blobs());

    let mut c = make_field(0.5);
    c.resize(800.0, 600.0, &mut StdRng::seed_from_u64(8));
    assert_ne!(a.blobs(), c.blobs());
}

#[test]
fn palette_is_cycled_by_index() {
    let palette = vec![Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)];
    let mut field = BlobField::new(BlobParams {
        palette: palette.clone(),
        speed: 0.5,
    });
    field.resize(400.0, 400.0, &mut StdRng::seed_from_u64(1));
    for (i, b) in field.blobs().iter().enumerate() {
        assert_eq!(b.color, palette[i % palette.len()]);
    }
}

#[test]
fn empty_palette_falls_back_to_default() {
    let field = BlobField::new(BlobParams {
        palette: Vec::new(),
        speed: 0.5,
    });
    assert_eq!(field.params().palette, DEFAULT_PALETTE.to_vec());
}

fn blob_at(x: f64, y: f64, vx: f64, vy: f64) -> Blob {
    Blob {
        position: DVec2::new(x, y),
        radius: 100.0,
        velocity: DVec2::new(vx, vy),
        color: Rgb::new(255, 107, 0),
        phase: 1.25,
    }
}

#[test]
fn blob_leaving_right_edge_reappears_left_with_same_motion() {
    let bounds = DVec2::new(800.0, 600.0);
    let mut b = blob_at(899.9, 300.0, 0.2, 0.0);
    b.advance(bounds);
    assert_eq!(b.position.x, -100.0);
    assert_eq!(b.position.y, 300.0);
    assert_eq!(b.velocity, DVec2::new(0.2, 0.0));
    assert_eq!(b.phase, 1.25);
}

#[test]
fn blob_leaving_left_and_top_edges_wraps_to_opposite_side() {
    let bounds = DVec2::new(800.0, 600.0);
    let mut left = blob_at(-99.9, 300.0, -0.2, 0.0);
    left.advance(bounds);
    assert_eq!(left.position.x, 900.0);

    let mut top = blob_at(400.0, -99.9, 0.0, -0.2);
    top.advance(bounds);
    assert_eq!(top.position.y, 700.0);
    assert_eq!(top.velocity, DVec2::new(0.0, -0.2));

    let mut bottom = blob_at(400.0, 699.9, 0.0, 0.2);
    bottom.advance(bounds);
    assert_eq!(bottom.position.y, -100.0);
}

#[test]
fn fast_blob_still_wraps_to_the_opposite_edge() {
    let bounds = DVec2::new(800.0, 600.0);
    let mut left = blob_at(100.0, 300.0, -5000.0, 0.0);
    left.advance(bounds);
    assert_eq!(left.position.x, 900.0);

    let mut right = blob_at(100.0, 300.0, 5000.0, 0.0);
    right.advance(bounds);
    assert_eq!(right.position.x, -100.0);

    let mut down = blob_at(400.0, 100.0, 0.0, 9000.0);
    down.advance(bounds);
    assert_eq!(down.position.y, -100.0);
    assert_eq!(down.velocity, DVec2::new(0.0, 9000.0));
}

#[test]
fn partially_visible_blob_is_not_wrapped() {
    let bounds = DVec2::new(800.0, 600.0);
    let mut b = blob_at(850.0, 300.0, 0.2, 0.0);
    b.advance(bounds);
    assert!((b.position.x - 850.2).abs() < 1e-9);
}

#[test]
fn pulse_radius_stays_within_amplitude() {
    let b = blob_at(0.0, 0.0, 0.0, 0.0);
    let mut t = 0.0;
    while t < 200.0 {
        let r = b.pulse_radius(t);
        assert!(r >= b.radius - BLOB_PULSE_AMPLITUDE - 1e-9);
        assert!(r <= b.radius + BLOB_PULSE_AMPLITUDE + 1e-9);
        t += 0.37;
    }
}

#[test]
fn step_advances_clock_by_nominal_frame() {
    let mut field = make_field(0.5);
    field.resize(640.0, 480.0, &mut StdRng::seed_from_u64(3));
    for _ in 0..10 {
        field.step();
    }
    assert!((field.clock() - 10.0 * FRAME_STEP_SEC).abs() < 1e-12);
}

#[test]
fn frame_clears_then_draws_every_blob_additively() {
    let mut field = make_field(0.5);
    field.resize(640.0, 480.0, &mut StdRng::seed_from_u64(11));
    let mut rec = Recorder::default();
    field.frame(&mut rec);

    assert_eq!(rec.ops.len(), BLOB_COUNT + 3);
    assert_eq!(rec.ops[0], Op::Clear(BACKGROUND, DVec2::new(640.0, 480.0)));
    assert_eq!(rec.ops[1], Op::Additive(true));
    assert_eq!(rec.ops[rec.ops.len() - 1], Op::Additive(false));
    for (op, blob) in rec.ops[2..2 + BLOB_COUNT].iter().zip(field.blobs()) {
        match op {
            Op::Fill {
                center,
                radius,
                color,
            } => {
                assert_eq!(*center, blob.position);
                assert_eq!(*color, blob.color);
                assert!((radius - blob.pulse_radius(field.clock())).abs() < 1e-12);
            }
            other => panic!("expected a fill, got {other:?}"),
        }
    }
}

#[test]
fn collapsed_surface_draws_nothing() {
    let mut field = make_field(0.5);
    field.resize(0.0, 0.0, &mut StdRng::seed_from_u64(5));
    assert!(field.is_collapsed());
    assert_eq!(field.blobs().len(), BLOB_COUNT);

    let mut rec = Recorder::default();
    for _ in 0..3 {
        field.frame(&mut rec);
    }
    assert!(rec.ops.is_empty());
}

#[test]
fn attributes_override_params_and_bad_values_are_ignored() {
    let params = BlobParams::default().with_attributes(Some("#000000, #ffffff"), Some("0.8"));
    assert_eq!(params.palette, vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]);
    assert_eq!(params.speed, 0.8);

    let kept = BlobParams::default().with_attributes(Some("red"), Some("-1"));
    assert_eq!(kept.palette, DEFAULT_PALETTE.to_vec());
    assert_eq!(kept.speed, DEFAULT_BLOB_SPEED);
}
