// Host-side tests for the scroll-driven flight-path timeline.

use glam::DVec2;
use landing_core::constants::*;
use landing_core::{
    step_window, MarkerLayout, StepVisual, Timeline, TimelineParams, TriggerLayout,
    TriggerWindow, ViewBox, PROCESS_STEPS,
};

fn section() -> TriggerLayout {
    TriggerLayout {
        top: 1000.0,
        height: 2000.0,
        viewport_height: 800.0,
    }
}

fn flight() -> Timeline {
    Timeline::flight_path().expect("built-in flight path parses")
}

#[test]
fn five_step_windows_are_spread_over_75_percent_and_overlap() {
    let windows: Vec<_> = (0..5).map(|i| step_window(i, 5)).collect();
    assert_eq!(
        windows,
        vec![
            (0.0, 20.0),
            (18.75, 38.75),
            (37.5, 57.5),
            (56.25, 76.25),
            (75.0, 95.0)
        ]
    );
    for pair in windows.windows(2) {
        assert!(pair[0].1 > pair[1].0, "windows {pair:?} should overlap");
    }
}

#[test]
fn single_step_window_starts_at_zero() {
    assert_eq!(step_window(0, 1), (0.0, STEP_WINDOW_SPAN_PCT));
}

#[test]
fn flight_path_timeline_has_five_steps() {
    let t = flight();
    assert_eq!(t.step_count(), PROCESS_STEPS.len());
    assert_eq!(t.step_count(), 5);
    assert!(t.arc_length() > 0.0);
    assert_eq!(t.arc_length(), t.path().length());
}

#[test]
fn dash_offset_is_complement_of_progress() {
    let t = flight();
    let len = t.arc_length();
    assert_eq!(t.dash_offset(0.0), len);
    assert_eq!(t.dash_offset(1.0), 0.0);
    for i in 0..=10 {
        let p = i as f64 / 10.0;
        assert!((t.dash_offset(p) - len * (1.0 - p)).abs() < 1e-9);
    }
    assert_eq!(t.dash_offset(-1.0), len);
    assert_eq!(t.dash_offset(2.0), 0.0);
}

#[test]
fn marker_pose_matches_path_ends_at_progress_bounds() {
    let t = flight();
    assert_eq!(t.path_frame(0.0).marker, t.path().start_pose());
    assert_eq!(t.path_frame(1.0).marker, t.path().end_pose());
}

#[test]
fn trigger_runs_from_top_at_60_to_bottom_at_30_percent() {
    let t = flight();
    assert_eq!(t.trigger(&section()), TriggerWindow::new(520.0, 2760.0));
    assert_eq!(t.progress(0.0, &section()), 0.0);
    assert_eq!(t.progress(520.0, &section()), 0.0);
    assert_eq!(t.progress(1640.0, &section()), 0.5);
    assert_eq!(t.progress(5000.0, &section()), 1.0);
}

#[test]
fn step_triggers_use_their_own_anchors() {
    let t = flight();
    let first = t.step_trigger(0, &section());
    assert_eq!(first, TriggerWindow::new(440.0, 1000.0));
    let last = t.step_trigger(4, &section());
    assert!((last.start - 1940.0).abs() < 1e-9);
    assert!((last.end - 2500.0).abs() < 1e-9);
}

#[test]
fn state_is_idempotent_for_the_same_scroll() {
    let t = flight();
    for scroll in [0.0, 700.0, 1333.0, 2100.0, 9000.0] {
        assert_eq!(t.state(scroll, &section()), t.state(scroll, &section()));
    }
}

#[test]
fn steps_start_hidden_and_end_shown() {
    let t = flight();
    let before = t.state(0.0, &section());
    assert_eq!(before.steps.len(), 5);
    assert!(before.steps.iter().all(|s| *s == StepVisual::HIDDEN));
    assert_eq!(before.path.dash_offset, t.arc_length());

    let after = t.state(10_000.0, &section());
    for s in &after.steps {
        assert!((s.opacity - 1.0).abs() < 1e-12);
        assert!(s.offset_y.abs() < 1e-12);
        assert!(s.blur.abs() < 1e-12);
    }
    assert_eq!(after.path.dash_offset, 0.0);
}

#[test]
fn step_reveal_scrubs_backwards_when_scrolling_up() {
    let t = flight();
    let layout = section();
    // inside step 0's window (440..1000)
    let forward = t.state(900.0, &layout).steps[0];
    let back = t.state(600.0, &layout).steps[0];
    assert!(forward.opacity > back.opacity);
    assert!(forward.offset_y < back.offset_y);
    assert!(forward.blur < back.blur);
    assert_eq!(t.state(900.0, &layout).steps[0], forward);
}

#[test]
fn step_visual_interpolates_between_hidden_and_shown() {
    assert_eq!(StepVisual::at(0.0), StepVisual::HIDDEN);
    let done = StepVisual::at(1.0);
    assert!((done.opacity - 1.0).abs() < 1e-12);
    assert!(done.offset_y.abs() < 1e-12);

    let mid = StepVisual::at(0.5);
    // cubic ease-out: seven eighths of the way at half progress
    assert!((mid.opacity - 0.89375).abs() < 1e-12);
    assert!((mid.offset_y - 5.0).abs() < 1e-12);
    assert!((mid.blur - 0.625).abs() < 1e-12);
    assert_eq!(mid.css_transform(), "translateY(5.000px)");
    assert_eq!(mid.css_filter(), "blur(0.625px)");
}

#[test]
fn scrub_attribute_parsing() {
    assert_eq!(TimelineParams::from_scrub_attribute(None), TimelineParams::default());
    assert!(!TimelineParams::from_scrub_attribute(Some("off")).is_smoothing());
    assert_eq!(
        TimelineParams::from_scrub_attribute(Some("on")),
        TimelineParams {
            path_scrub_sec: PATH_SCRUB_SEC,
            step_scrub_sec: STEP_SCRUB_SEC,
        }
    );
    let custom = TimelineParams::from_scrub_attribute(Some(" 0.8 "));
    assert_eq!(custom.path_scrub_sec, 0.8);
    assert_eq!(custom.step_scrub_sec, 0.8);
    assert_eq!(
        TimelineParams::from_scrub_attribute(Some("fast")),
        TimelineParams::default()
    );
}

#[test]
fn custom_path_with_other_step_count() {
    let t = Timeline::from_path_data("M 0 0 L 0 100", 3).unwrap();
    assert_eq!(t.step_count(), 3);
    assert!((t.arc_length() - 100.0).abs() < 1e-9);
    assert_eq!(step_window(2, 3), (75.0, 95.0));
    assert!(Timeline::from_path_data("C 1 2", 3).is_err());
}

fn flight_viewbox() -> ViewBox {
    let [x, y, w, h] = FLIGHT_PATH_VIEWBOX;
    ViewBox::new(x, y, w, h)
}

fn marker_layout(svg_size: DVec2) -> MarkerLayout {
    MarkerLayout {
        svg_origin: DVec2::ZERO,
        svg_size,
        marker_size: DVec2::new(40.0, 40.0),
    }
}

#[test]
fn marker_is_centred_on_the_fitted_path_point() {
    let t = flight();
    let layout = marker_layout(DVec2::new(600.0, 1000.0));
    let styles = t.styles(0.0, &[0.0; 5], &flight_viewbox(), &layout);
    // path starts at (600, 0); half scale puts it at (300, 0)
    assert_eq!(styles.marker.translate, DVec2::new(280.0, -20.0));
    assert_eq!(
        styles.marker.css_transform(),
        "translate(280.00px, -20.00px) rotate(90.00deg)"
    );
    assert_eq!(styles.dash_offset, t.dash_length());
    assert!(styles.steps.iter().all(|s| *s == StepVisual::HIDDEN));
}

#[test]
fn resize_at_constant_progress_still_requires_a_write() {
    let t = flight();
    let viewbox = flight_viewbox();
    let steps = [0.0; 5];
    let small = marker_layout(DVec2::new(600.0, 1000.0));
    let before = t.styles(0.0, &steps, &viewbox, &small);
    assert!(before.needs_write(None));
    assert!(!before.needs_write(Some(&before.clone())));

    let large = marker_layout(DVec2::new(1200.0, 2000.0));
    let resized = t.styles(0.0, &steps, &viewbox, &large);
    assert_eq!(resized.dash_offset, before.dash_offset);
    assert_eq!(resized.steps, before.steps);
    assert_eq!(resized.marker.translate, DVec2::new(580.0, -20.0));
    assert!(resized.needs_write(Some(&before)));

    let mut moved = small;
    moved.svg_origin = DVec2::new(0.0, 120.0);
    let shifted = t.styles(0.0, &steps, &viewbox, &moved);
    assert_eq!(shifted.marker.translate, DVec2::new(280.0, 100.0));
    assert!(shifted.needs_write(Some(&before)));
}

#[test]
fn finished_timeline_places_marker_at_path_end() {
    let t = flight();
    let layout = marker_layout(DVec2::new(1200.0, 2000.0));
    let styles = t.styles(1.0, &[1.0; 5], &flight_viewbox(), &layout);
    let end = t.path().end_pose();
    assert_eq!(styles.marker.translate, end.point - DVec2::new(20.0, 20.0));
    assert_eq!(styles.marker.angle_deg, end.angle_deg);
    assert_eq!(styles.dash_offset, 0.0);
}

#[test]
fn drawn_length_drives_the_dash() {
    let t = flight();
    let sampled = t.arc_length();
    let drawn = t.clone().with_drawn_length(sampled + 0.25);
    assert_eq!(drawn.arc_length(), sampled);
    assert_eq!(drawn.dash_length(), sampled + 0.25);
    assert_eq!(drawn.dash_offset(0.0), sampled + 0.25);
    assert_eq!(drawn.dash_offset(1.0), 0.0);
    assert_eq!(drawn.path_frame(0.0).dash_offset, sampled + 0.25);

    assert_eq!(t.clone().with_drawn_length(f64::NAN).dash_length(), sampled);
    assert_eq!(t.clone().with_drawn_length(0.0).dash_length(), sampled);
    assert_eq!(t.with_drawn_length(-3.0).dash_length(), sampled);
}
