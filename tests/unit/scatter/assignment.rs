use super::*;

struct Seq {
    values: Vec<f64>,
    at: usize,
}

impl Seq {
    fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            at: 0,
        }
    }
}

impl RandomSource for Seq {
    fn next_f64(&mut self) -> f64 {
        let v = self.values[self.at % self.values.len()];
        self.at += 1;
        v
    }
}

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn name_draw_follows_ranges() {
    let mut rng = Seq::new(&[0.7, 0.5, 0.75, 0.25]);
    let a = ScatterAssignment::draw(&mut rng, &ScatterRanges::default(), &GroupProfile::name());
    assert_eq!(a.direction, 1.0);
    approx(a.distance, 800.0);
    approx(a.horizontal_jitter, 200.0);
    approx(a.rotation_deg, -40.0);
}

#[test]
fn subtext_doubles_rotation_and_widens_jitter() {
    let mut rng = Seq::new(&[0.2, 0.5, 0.75, 0.25]);
    let a = ScatterAssignment::draw(
        &mut rng,
        &ScatterRanges::default(),
        &GroupProfile::subtext(),
    );
    assert_eq!(a.direction, -1.0);
    approx(a.horizontal_jitter, 300.0);
    approx(a.rotation_deg, -80.0);
}

#[test]
fn exact_half_is_negative_direction() {
    let mut rng = Seq::new(&[0.5]);
    let a = ScatterAssignment::draw(&mut rng, &ScatterRanges::default(), &GroupProfile::name());
    assert_eq!(a.direction, -1.0);
}

#[test]
fn name_and_subtext_fly_apart() {
    let a = ScatterAssignment {
        direction: 1.0,
        distance: 800.0,
        rotation_deg: 10.0,
        horizontal_jitter: -50.0,
    };
    let name = a.scattered(&GroupProfile::name());
    approx(name.translate_y, -960.0);
    approx(name.opacity, 0.0);
    approx(name.translate_x, -50.0);

    let sub = a.scattered(&GroupProfile::subtext());
    approx(sub.translate_y, 800.0);
    approx(sub.opacity, 1.0);
}

#[test]
fn style_runs_from_rest_to_scattered() {
    let profile = GroupProfile::name();
    let a = ScatterAssignment {
        direction: -1.0,
        distance: 500.0,
        rotation_deg: 30.0,
        horizontal_jitter: 100.0,
    };
    assert_eq!(a.style_at(&profile, 0.0), profile.rest());
    let end = a.style_at(&profile, 1.0);
    approx(end.translate_y, 600.0);
    approx(end.rotation_deg, 30.0);

    let mut prev = a.style_at(&profile, 0.0);
    for i in 1..=20 {
        let cur = a.style_at(&profile, f64::from(i) / 20.0);
        assert!(cur.translate_y >= prev.translate_y);
        assert!(cur.opacity <= prev.opacity);
        prev = cur;
    }
}

#[test]
fn document_fraction_trigger_uses_document_height() {
    let obs = ScrollObservation::new(500.0, 800.0, 4000.0);
    approx(ScatterTrigger::DocumentFraction { end: 0.25 }.progress(&obs), 0.5);
    approx(ScatterTrigger::AbsolutePixels { end_px: 2000.0 }.progress(&obs), 0.25);
}

#[test]
fn empty_document_trigger_is_zero() {
    let obs = ScrollObservation::new(500.0, 800.0, 0.0);
    assert_eq!(ScatterTrigger::DocumentFraction { end: 0.25 }.progress(&obs), 0.0);
}

#[test]
fn validation_rejects_bad_profiles() {
    assert!(GroupProfile::name().validate().is_ok());
    assert!(GroupProfile::subtext().validate().is_ok());
    assert!(
        GroupProfile::name()
            .with_trigger(ScatterTrigger::DocumentFraction { end: 0.0 })
            .validate()
            .is_err()
    );
    assert!(GroupProfile::name().with_scrub(-1.0).validate().is_err());

    let ranges = ScatterRanges {
        distance: [1200.0, 400.0],
        ..ScatterRanges::default()
    };
    assert!(ranges.validate().is_err());
}

#[test]
fn trigger_deserializes_tagged() {
    let t: ScatterTrigger =
        serde_json::from_str(r#"{"kind":"absolute_pixels","end_px":600}"#).unwrap();
    assert_eq!(t, ScatterTrigger::AbsolutePixels { end_px: 600.0 });
}
