// tests/test_classifier.rs
use forceplate_core::{classify, detect_active_leg, ActiveLeg, Sample};

fn series(n: usize, left: impl Fn(usize) -> f64, right: impl Fn(usize) -> f64) -> Vec<Sample> {
    (0..n)
        .map(|i| Sample {
            time: i as f64 * 0.01,
            left: left(i),
            right: right(i),
        })
        .collect()
}

#[test]
fn short_recordings_default_to_left() {
    // 99 samples, right channel wildly active: still Left, data too short
    let samples = series(99, |_| 0.0, |i| if i % 2 == 0 { 900.0 } else { -900.0 });
    assert_eq!(detect_active_leg(&samples), ActiveLeg::Left);

    assert_eq!(detect_active_leg(&[]), ActiveLeg::Left);
}

#[test]
fn oscillating_left_vs_flat_right() {
    let samples = series(
        200,
        |i| if i % 2 == 0 { 500.0 } else { -500.0 },
        |_| 50.0,
    );
    assert_eq!(detect_active_leg(&samples), ActiveLeg::Left);
}

#[test]
fn mirrored_signal_picks_right() {
    let samples = series(
        200,
        |_| 50.0,
        |i| if i % 2 == 0 { 500.0 } else { -500.0 },
    );
    assert_eq!(detect_active_leg(&samples), ActiveLeg::Right);
}

#[test]
fn exact_tie_resolves_to_right() {
    // Identical channels -> identical scores -> Right by definition
    let samples = series(
        300,
        |i| (i as f64 * 0.1).sin() * 100.0,
        |i| (i as f64 * 0.1).sin() * 100.0,
    );
    assert_eq!(detect_active_leg(&samples), ActiveLeg::Right);
}

#[test]
fn edge_trim_ignores_setup_noise() {
    // Huge swing confined to the first 10%: must not decide the outcome
    let samples = series(
        1000,
        |i| if i < 90 { 2000.0 } else { 10.0 },
        |i| if i % 2 == 0 { 100.0 } else { -100.0 },
    );
    assert_eq!(detect_active_leg(&samples), ActiveLeg::Right);
}

#[test]
fn scores_expose_margin() {
    let one_sided = series(
        200,
        |i| if i % 2 == 0 { 500.0 } else { -500.0 },
        |_| 50.0,
    );
    let scores = classify(&one_sided);
    assert!(scores.left > scores.right);
    assert!(
        scores.confidence() > 0.99,
        "flat channel should give a one-sided margin, got {}",
        scores.confidence()
    );

    let tie = series(300, |_| 25.0, |_| 25.0);
    let scores = classify(&tie);
    assert_eq!(scores.confidence(), 0.0);
    assert_eq!(scores.active(), ActiveLeg::Right);
}
