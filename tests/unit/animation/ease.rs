use super::*;

const ALL: [Ease; 12] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::SLOW,
    Ease::SMOOTH,
    Ease::OUT,
    Ease::STANDARD,
    Ease::BOUNCE,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    // BOUNCE overshoots by design and is excluded.
    for ease in &ALL[..11] {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn bezier_linear_controls_match_linear() {
    let ease = Ease::bezier(0.25, 0.25, 0.75, 0.75);
    for t in [0.1, 0.3, 0.5, 0.9] {
        assert!((ease.apply(t) - t).abs() < 1e-5);
    }
}

#[test]
fn bezier_css_ease_reference_value() {
    // CSS `ease` at x = 0.5 is ~0.8024.
    let y = Ease::SLOW.apply(0.5);
    assert!((y - 0.8024).abs() < 1e-3, "{y}");
}

#[test]
fn bounce_overshoots_below_zero_early() {
    assert!(Ease::BOUNCE.apply(0.1) < 0.0);
}

#[test]
fn power2_out_is_out_quad() {
    assert_eq!(Ease::POWER2_OUT.apply(0.5), 0.75);
}

#[test]
fn out_of_range_input_is_clamped() {
    assert_eq!(Ease::InQuad.apply(-1.0), 0.0);
    assert_eq!(Ease::SLOW.apply(2.0), 1.0);
}

#[test]
fn validity_checks_bezier_x_controls() {
    assert!(Ease::SLOW.is_valid());
    assert!(Ease::BOUNCE.is_valid());
    assert!(!Ease::bezier(-0.1, 0.0, 0.5, 1.0).is_valid());
    assert!(!Ease::bezier(0.1, f64::NAN, 0.5, 1.0).is_valid());
}

#[test]
fn serde_uses_snake_case() {
    let v: Ease = serde_json::from_str("\"out_quad\"").unwrap();
    assert_eq!(v, Ease::OutQuad);
    let v: Ease =
        serde_json::from_str(r#"{"cubic_bezier":{"x1":0.0,"y1":0.0,"x2":0.2,"y2":1.0}}"#).unwrap();
    assert_eq!(v, Ease::OUT);
}
