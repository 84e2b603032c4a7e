use super::*;

fn obs(offset: f64) -> ScrollObservation {
    ScrollObservation::new(offset, 1000.0, 6000.0)
}

fn card() -> Option<Rect> {
    Some(Rect::new(0.0, 2000.0, 400.0, 2400.0))
}

#[test]
fn any_overlap_counts_by_default() {
    let mut t = InViewTracker::new(InViewOptions::default());
    assert!(!t.update(&obs(0.0), card()));
    assert!(!t.is_in_view());
    assert!(t.update(&obs(1001.0), card()));
    assert!(t.is_in_view());
    assert!(t.update(&obs(2500.0), card()));
    assert!(!t.is_in_view());
}

#[test]
fn negative_margin_shrinks_root() {
    let opts = InViewOptions::default().with_margin(Margin::Px(-100.0));
    let mut t = InViewTracker::new(opts);
    // 50px of the card visible at the bottom, but the root is inset by 100px.
    t.update(&obs(1050.0), card());
    assert!(!t.is_in_view());
    t.update(&obs(1150.0), card());
    assert!(t.is_in_view());
}

#[test]
fn viewport_fraction_margin() {
    let opts = InViewOptions::default().with_margin(Margin::Viewport(-0.3));
    let mut t = InViewTracker::new(opts);
    t.update(&obs(1250.0), card());
    assert!(!t.is_in_view());
    t.update(&obs(1400.0), card());
    assert!(t.is_in_view());
}

#[test]
fn amount_requires_visible_fraction() {
    let mut t = InViewTracker::new(InViewOptions::default().with_amount(0.5));
    t.update(&obs(1100.0), card());
    assert!(!t.is_in_view());
    t.update(&obs(1200.0), card());
    assert!(t.is_in_view());
}

#[test]
fn once_latches_first_entry() {
    let mut t = InViewTracker::new(InViewOptions::once());
    assert!(t.update(&obs(1500.0), card()));
    assert!(!t.update(&obs(0.0), card()));
    assert!(t.is_in_view());
    t.reset();
    assert!(!t.is_in_view());
}

#[test]
fn missing_geometry_is_not_in_view() {
    let mut t = InViewTracker::new(InViewOptions::default());
    assert!(!t.update(&obs(1500.0), None));
    assert!(!t.is_in_view());
}

#[test]
fn validate_checks_amount_range() {
    assert!(InViewOptions::default().with_amount(1.5).validate().is_err());
    assert!(
        InViewOptions::default()
            .with_margin(Margin::Px(f64::NAN))
            .validate()
            .is_err()
    );
    assert!(InViewOptions::once().with_amount(0.2).validate().is_ok());
}
