use super::*;
use crate::foundation::core::Rect;
use crate::scroll::geometry::{NoGeometry, StaticGeometry};

fn obs(offset: f64) -> ScrollObservation {
    ScrollObservation::new(offset, 1000.0, 5000.0)
}

#[test]
fn absolute_window_quarter_progress() {
    let w = ProgressWindow::new(0.0, 1000.0);
    assert_eq!(w.progress(250.0), 0.25);
}

#[test]
fn progress_is_clamped() {
    let w = ProgressWindow::new(200.0, 600.0);
    assert_eq!(w.progress(0.0), 0.0);
    assert_eq!(w.progress(10_000.0), 1.0);
    assert_eq!(w.progress(400.0), 0.5);
}

#[test]
fn degenerate_windows_return_zero_consistently() {
    for w in [
        ProgressWindow::new(500.0, 500.0),
        ProgressWindow::new(600.0, 100.0),
        ProgressWindow::new(f64::NAN, 100.0),
        ProgressWindow::new(0.0, f64::INFINITY),
    ] {
        assert!(w.is_degenerate());
        for offset in [-10.0, 0.0, 500.0, 1e9] {
            assert_eq!(w.progress(offset), 0.0);
        }
    }
}

#[test]
fn non_finite_offset_degrades_to_zero() {
    assert_eq!(ProgressWindow::new(0.0, 100.0).progress(f64::NAN), 0.0);
}

#[test]
fn document_window_uses_max_scroll() {
    let src = WindowSource::document(0.0, 0.5);
    let w = src.resolve(&obs(0.0), &NoGeometry).unwrap();
    assert_eq!(w, ProgressWindow::new(0.0, 2000.0));
}

#[test]
fn document_window_unmeasurable_on_short_page() {
    let src = WindowSource::document(0.0, 1.0);
    let short = ScrollObservation::new(0.0, 1000.0, 800.0);
    assert_eq!(src.resolve(&short, &NoGeometry), None);
}

#[test]
fn element_passage_window_spans_entry_to_exit() {
    let geometry = StaticGeometry::new().with("video", Rect::new(0.0, 3000.0, 1200.0, 4500.0));
    let w = WindowSource::element_passage("video")
        .resolve(&obs(0.0), &geometry)
        .unwrap();
    // Enters when the top hits the viewport bottom, exits when the bottom passes the top.
    assert_eq!(w, ProgressWindow::new(2000.0, 4500.0));
}

#[test]
fn element_default_window_is_start_start_to_end_end() {
    let geometry = StaticGeometry::new().with("page", Rect::new(0.0, 0.0, 1200.0, 5000.0));
    let w = WindowSource::element("page")
        .resolve(&obs(0.0), &geometry)
        .unwrap();
    assert_eq!(w, ProgressWindow::new(0.0, 4000.0));
}

#[test]
fn missing_or_flat_element_is_unmeasurable() {
    let src = WindowSource::element("ghost");
    assert_eq!(src.resolve(&obs(0.0), &NoGeometry), None);
    let flat = StaticGeometry::new().with("ghost", Rect::new(0.0, 10.0, 10.0, 10.0));
    assert_eq!(src.resolve(&obs(0.0), &flat), None);
}

#[test]
fn validate_rejects_bad_sources() {
    assert!(WindowSource::document(-0.1, 0.5).validate().is_err());
    assert!(WindowSource::absolute(0.0, f64::NAN).validate().is_err());
    assert!(WindowSource::element(" ").validate().is_err());
    assert!(WindowSource::element_passage("x").validate().is_ok());
}

#[test]
fn serde_shape_is_tagged() {
    let src: WindowSource = serde_json::from_str(r#"{"kind": "element", "target": "page"}"#).unwrap();
    assert_eq!(src, WindowSource::element("page"));
    let src: WindowSource =
        serde_json::from_str(r#"{"kind": "absolute", "start": 0.0, "end": 10.0}"#).unwrap();
    assert_eq!(src, WindowSource::absolute(0.0, 10.0));
}
