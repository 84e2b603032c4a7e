use super::*;
use crate::scroll::geometry::StaticGeometry;

fn geometry() -> StaticGeometry {
    StaticGeometry::new()
        .with("nav", Rect::new(100.0, 10.0, 700.0, 60.0))
        .with("nav-home", Rect::new(120.0, 20.0, 180.0, 50.0))
        .with("nav-about", Rect::new(200.0, 20.0, 270.0, 50.0))
}

#[test]
fn measures_on_next_paint() {
    let scheduler = Scheduler::new();
    let mut bubble = BubbleIndicator::new("nav");
    bubble.retarget(Some("nav-about"), &scheduler);
    assert!(bubble.position().is_none());
    assert!(bubble.has_pending_measurement());

    let fired = scheduler.paint();
    assert!(bubble.on_paint(&fired, &geometry()));
    assert_eq!(
        bubble.position(),
        Some(BubblePosition {
            x: 100.0,
            y: 10.0,
            width: 70.0,
            height: 30.0,
        })
    );
}

#[test]
fn superseded_measurement_is_cancelled() {
    let scheduler = Scheduler::new();
    let mut bubble = BubbleIndicator::new("nav");
    bubble.retarget(Some("nav-about"), &scheduler);
    bubble.retarget(Some("nav-home"), &scheduler);
    assert_eq!(scheduler.pending_len(), 1);

    let fired = scheduler.paint();
    assert_eq!(fired.len(), 1);
    bubble.on_paint(&fired, &geometry());
    assert_eq!(bubble.position().map(|p| p.x), Some(20.0));
}

#[test]
fn missing_geometry_keeps_last_position() {
    let scheduler = Scheduler::new();
    let mut bubble = BubbleIndicator::new("nav");
    bubble.retarget(Some("nav-home"), &scheduler);
    bubble.on_paint(&scheduler.paint(), &geometry());
    let before = bubble.position();

    bubble.retarget(Some("nav-contact"), &scheduler);
    assert!(!bubble.on_paint(&scheduler.paint(), &geometry()));
    assert_eq!(bubble.position(), before);
}

#[test]
fn foreign_paint_ids_are_ignored() {
    let scheduler = Scheduler::new();
    let mut bubble = BubbleIndicator::new("nav");
    let other = scheduler.request_paint();
    let fired = scheduler.paint();
    assert!(other.fired_in(&fired));
    assert!(!bubble.on_paint(&fired, &geometry()));
}

#[test]
fn clearing_target_hides_bubble() {
    let scheduler = Scheduler::new();
    let mut bubble = BubbleIndicator::new("nav");
    bubble.retarget(Some("nav-home"), &scheduler);
    bubble.on_paint(&scheduler.paint(), &geometry());
    bubble.retarget(None, &scheduler);
    assert!(bubble.on_paint(&scheduler.paint(), &geometry()));
    assert!(bubble.position().is_none());
}

#[test]
fn teardown_cancels_pending_measurement() {
    let scheduler = Scheduler::new();
    let mut bubble = BubbleIndicator::new("nav");
    bubble.retarget(Some("nav-home"), &scheduler);
    bubble.teardown();
    assert_eq!(scheduler.pending_len(), 0);
    assert!(scheduler.paint().is_empty());
}

#[test]
fn same_target_does_not_reschedule() {
    let scheduler = Scheduler::new();
    let mut bubble = BubbleIndicator::new("nav");
    bubble.retarget(Some("nav-home"), &scheduler);
    bubble.on_paint(&scheduler.paint(), &geometry());
    bubble.retarget(Some("nav-home"), &scheduler);
    assert_eq!(scheduler.pending_len(), 0);
}

#[test]
fn unmeasured_target_is_measured_again() {
    let scheduler = Scheduler::new();
    let mut bubble = BubbleIndicator::new("nav");
    bubble.retarget(Some("nav-contact"), &scheduler);
    assert!(!bubble.on_paint(&scheduler.paint(), &geometry()));
    assert!(bubble.position().is_none());

    let geo = geometry().with("nav-contact", Rect::new(300.0, 20.0, 380.0, 50.0));
    bubble.retarget(Some("nav-contact"), &scheduler);
    assert!(bubble.has_pending_measurement());
    assert!(bubble.on_paint(&scheduler.paint(), &geo));
    assert_eq!(bubble.position().map(|p| p.x), Some(200.0));
}
