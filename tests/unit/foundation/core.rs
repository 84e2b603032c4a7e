use super::*;

#[test]
fn max_scroll_never_negative() {
    assert_eq!(ScrollObservation::new(0.0, 900.0, 400.0).max_scroll(), 0.0);
    assert_eq!(ScrollObservation::new(0.0, 900.0, 3900.0).max_scroll(), 3000.0);
    assert_eq!(
        ScrollObservation::new(0.0, f64::NAN, 3900.0).max_scroll(),
        0.0
    );
}

#[test]
fn document_progress_clamps_and_degrades() {
    let obs = ScrollObservation::new(1500.0, 1000.0, 4000.0);
    assert_eq!(obs.document_progress(), 0.5);
    assert_eq!(
        ScrollObservation::new(9000.0, 1000.0, 4000.0).document_progress(),
        1.0
    );
    assert_eq!(
        ScrollObservation::new(-20.0, 1000.0, 4000.0).document_progress(),
        0.0
    );
    assert_eq!(
        ScrollObservation::new(100.0, 0.0, 0.0).document_progress(),
        0.0
    );
}

#[test]
fn validate_rejects_bad_heights() {
    assert!(ScrollObservation::new(0.0, -1.0, 10.0).validate().is_err());
    assert!(ScrollObservation::new(f64::INFINITY, 1.0, 10.0).validate().is_err());
    assert!(ScrollObservation::new(0.0, 800.0, 2400.0).validate().is_ok());
}

#[test]
fn viewport_span_follows_offset() {
    let obs = ScrollObservation::new(250.0, 800.0, 3000.0);
    assert_eq!(obs.viewport_span(), (250.0, 1050.0));
}
