use super::*;
use crate::animation::reveal::RevealPreset;
use crate::animation::style::Property;
use crate::animation::track::PropertyTrack;
use crate::effects::tilt::TiltConfig;
use crate::effects::typewriter::{TypewriterConfig, TypewriterPhase};
use crate::foundation::core::Rect;
use crate::nav::header::HeaderConfig;
use crate::nav::tracker::{NavConfig, NavSection};
use crate::scatter::assignment::GlyphGroup;
use crate::scatter::choreographer::{ScatterConfig, TextRegion};
use crate::scroll::geometry::StaticGeometry;
use crate::scroll::viewport::InViewOptions;
use crate::scroll::window::WindowSource;
use crate::stage::config::SectionConfig;

fn geometry() -> StaticGeometry {
    StaticGeometry::new()
        .with("page", Rect::new(0.0, 0.0, 1000.0, 5000.0))
        .with("home", Rect::new(0.0, 0.0, 1000.0, 1000.0))
        .with("about", Rect::new(0.0, 1000.0, 1000.0, 2000.0))
        .with("nav", Rect::new(300.0, 10.0, 700.0, 50.0))
        .with("nav-home", Rect::new(310.0, 15.0, 360.0, 45.0))
        .with("nav-about", Rect::new(370.0, 15.0, 430.0, 45.0))
        .with("cards", Rect::new(0.0, 2500.0, 1000.0, 3000.0))
}

fn page() -> PageConfig {
    PageConfig {
        progress: Some(WindowSource::element("page")),
        sections: vec![SectionConfig::new(
            "hero",
            WindowSource::element("page"),
            TrackSet::new().with(
                Property::Opacity,
                PropertyTrack::from_pairs(&[0.0, 0.1], &[1.0, 0.0]).unwrap(),
            ),
        )],
        nav: Some(NavConfig::new(vec![
            NavSection::new("home", "Home", 0.0),
            NavSection::new("about", "About", 0.0),
        ])),
        header: Some(HeaderConfig::default()),
        scatter: Some(ScatterConfig::new(vec![
            TextRegion::new(GlyphGroup::Name, "Hi"),
            TextRegion::new(GlyphGroup::Subtext, "yo"),
        ])),
        reveals: vec![RevealBinding::new(
            "cards",
            Reveal::preset(RevealPreset::FadeIn),
            InViewOptions::once(),
        )],
        typewriter: None,
        tilt: None,
        seed: Some(1),
    }
}

fn scroll(offset: f64) -> HostEvent {
    HostEvent::Scroll(ScrollObservation::new(offset, 1000.0, 5000.0))
}

fn stage() -> Stage {
    Stage::from_config(page()).unwrap()
}

#[test]
fn scroll_drives_sections_and_page_progress() {
    let mut stage = stage();
    let geo = geometry();
    stage.handle(&scroll(200.0), &geo);
    let frame = stage.snapshot(&geo);
    assert!((frame.page_progress - 0.05).abs() < 1e-12);
    let hero = frame.section("hero").unwrap();
    assert!((hero.progress - 0.05).abs() < 1e-12);
    assert!((hero.style.opacity - 0.5).abs() < 1e-9);
}

#[test]
fn snapshot_before_any_scroll_is_at_rest() {
    let stage = stage();
    let frame = stage.snapshot(&geometry());
    assert_eq!(frame.page_progress, 0.0);
    assert_eq!(frame.section("hero").unwrap().style.opacity, 1.0);
    assert!(frame.scroll.is_none());
}

#[test]
fn invalid_observation_is_ignored() {
    let mut stage = stage();
    let geo = geometry();
    stage.handle(&scroll(300.0), &geo);
    stage.handle(
        &HostEvent::Scroll(ScrollObservation::new(f64::NAN, 1000.0, 5000.0)),
        &geo,
    );
    assert_eq!(stage.latest().map(|o| o.raw_offset), Some(300.0));
}

#[test]
fn nav_highlight_and_bubble_follow_scroll_and_hover() {
    let mut stage = stage();
    let geo = geometry();
    stage.handle(&HostEvent::Mount, &geo);
    stage.handle(&scroll(950.0), &geo);
    stage.handle(&HostEvent::Paint, &geo);

    let nav = stage.snapshot(&geo).nav.unwrap();
    assert_eq!(nav.active.as_deref(), Some("about"));
    assert_eq!(nav.bubble.map(|b| b.x), Some(70.0));

    stage.handle(
        &HostEvent::PointerEnter {
            item: "home".to_owned(),
        },
        &geo,
    );
    stage.handle(&HostEvent::Paint, &geo);
    let nav = stage.snapshot(&geo).nav.unwrap();
    assert_eq!(nav.hovered.as_deref(), Some("home"));
    assert_eq!(nav.bubble.map(|b| b.x), Some(10.0));

    stage.handle(
        &HostEvent::PointerLeave {
            item: "home".to_owned(),
        },
        &geo,
    );
    stage.handle(&HostEvent::Paint, &geo);
    let nav = stage.snapshot(&geo).nav.unwrap();
    assert!(nav.hovered.is_none());
    assert_eq!(nav.bubble.map(|b| b.x), Some(70.0));
}

#[test]
fn scatter_activates_after_mount_delay() {
    let mut stage = stage();
    let geo = geometry();
    stage.handle(&HostEvent::Mount, &geo);
    stage.handle(&scroll(500.0), &geo);
    assert!(!stage.scatter().unwrap().is_active());

    stage.handle(&HostEvent::Tick { now_ms: 100.0 }, &geo);
    assert!(stage.scatter().unwrap().is_active());

    stage.handle(&HostEvent::Tick { now_ms: 2000.0 }, &geo);
    let frame = stage.snapshot(&geo);
    // Name window ends at 25% of 5000 px; 500 px is 40% through, eased by power2.out.
    let eased = 1.0 - 0.6 * 0.6;
    let first = frame.glyphs[0];
    assert_eq!(first.group, GlyphGroup::Name);
    assert!((first.style.opacity - (1.0 - eased)).abs() < 1e-9);
}

#[test]
fn same_seed_same_glyph_frames() {
    let geo = geometry();
    let run = || {
        let mut stage = stage();
        for event in [
            HostEvent::Mount,
            scroll(400.0),
            HostEvent::Tick { now_ms: 100.0 },
            HostEvent::Tick { now_ms: 1000.0 },
        ] {
            stage.handle(&event, &geo);
        }
        stage.snapshot(&geo).glyphs
    };
    assert_eq!(run(), run());
}

#[test]
fn unmount_releases_runtime_resources() {
    let mut stage = stage();
    let geo = geometry();
    stage.handle(&HostEvent::Mount, &geo);
    stage.handle(&HostEvent::Tick { now_ms: 100.0 }, &geo);
    stage.handle(&scroll(950.0), &geo);
    assert_eq!(stage.hub().listener_count(), 1);
    assert!(stage.scheduler().pending_len() > 0);

    stage.handle(&HostEvent::Unmount, &geo);
    assert_eq!(stage.hub().listener_count(), 0);
    assert_eq!(stage.scheduler().pending_len(), 0);
    assert!(!stage.is_mounted());
    for glyph in stage.snapshot(&geo).glyphs {
        assert_eq!(glyph.style.translate_y, 0.0);
    }
}

#[test]
fn hover_after_unmount_schedules_nothing() {
    let mut stage = stage();
    let geo = geometry();
    stage.handle(&HostEvent::Mount, &geo);
    stage.handle(&scroll(950.0), &geo);
    stage.handle(&HostEvent::Paint, &geo);
    let before = stage.snapshot(&geo).nav.unwrap().bubble;
    assert_eq!(before.map(|b| b.x), Some(70.0));

    stage.handle(&HostEvent::Unmount, &geo);
    stage.handle(
        &HostEvent::PointerEnter {
            item: "home".to_owned(),
        },
        &geo,
    );
    assert_eq!(stage.scheduler().pending_len(), 0);
    stage.handle(&HostEvent::Paint, &geo);
    assert_eq!(stage.snapshot(&geo).nav.unwrap().bubble, before);
}

#[test]
fn typewriter_in_view_at_mount_starts_typing() {
    let mut config = page();
    config.typewriter = Some(TypewriterConfig::new("home", vec!["abc".to_owned()]));
    let mut stage = Stage::from_config(config).unwrap();
    let geo = geometry();

    stage.handle(&scroll(0.0), &geo);
    assert_eq!(stage.snapshot(&geo).typewriter.unwrap().text, "");

    stage.handle(&HostEvent::Mount, &geo);
    stage.handle(&HostEvent::Tick { now_ms: 20.0 }, &geo);
    stage.handle(&HostEvent::Tick { now_ms: 40.0 }, &geo);
    let typewriter = stage.snapshot(&geo).typewriter.unwrap();
    assert_eq!(typewriter.text, "ab");
    assert_eq!(typewriter.phase, TypewriterPhase::Typing);
}

#[test]
fn pointer_tilts_cards_while_mounted() {
    let mut config = page();
    config.tilt = Some(TiltConfig::new(vec!["cards".to_owned()]));
    let mut stage = Stage::from_config(config).unwrap();
    let geo = geometry();
    let corner = HostEvent::PointerMove {
        item: "cards".to_owned(),
        x: 1000.0,
        y: 3000.0,
    };

    stage.handle(&corner, &geo);
    stage.handle(&HostEvent::Tick { now_ms: 0.0 }, &geo);
    stage.handle(&HostEvent::Tick { now_ms: 2000.0 }, &geo);
    let flat = &stage.snapshot(&geo).tilts[0];
    assert_eq!((flat.rotate_x_deg, flat.rotate_y_deg), (0.0, 0.0));

    stage.handle(&HostEvent::Mount, &geo);
    stage.handle(&corner, &geo);
    stage.handle(&HostEvent::Tick { now_ms: 4000.0 }, &geo);
    let tilted = &stage.snapshot(&geo).tilts[0];
    assert_eq!(tilted.target, "cards");
    assert!((tilted.rotate_x_deg + 5.0).abs() < 1e-6);
    assert!((tilted.rotate_y_deg - 5.0).abs() < 1e-6);

    stage.handle(
        &HostEvent::PointerLeave {
            item: "cards".to_owned(),
        },
        &geo,
    );
    stage.handle(&HostEvent::Tick { now_ms: 6000.0 }, &geo);
    let back = &stage.snapshot(&geo).tilts[0];
    assert_eq!((back.rotate_x_deg, back.rotate_y_deg), (0.0, 0.0));
}

#[test]
fn reveal_plays_once_scrolled_into_view() {
    let mut stage = stage();
    let geo = geometry();
    stage.handle(&HostEvent::Tick { now_ms: 1000.0 }, &geo);
    stage.handle(&scroll(0.0), &geo);
    assert!(!stage.snapshot(&geo).reveals[0].in_view);

    stage.handle(&scroll(2000.0), &geo);
    let frame = stage.snapshot(&geo);
    assert!(frame.reveals[0].in_view);
    assert_eq!(frame.reveals[0].styles[0].opacity, 0.0);

    stage.handle(&HostEvent::Tick { now_ms: 1400.0 }, &geo);
    let mid = stage.snapshot(&geo).reveals[0].styles[0].opacity;
    assert!(mid > 0.0 && mid < 1.0, "{mid}");

    stage.handle(&HostEvent::Tick { now_ms: 2000.0 }, &geo);
    stage.handle(&scroll(0.0), &geo);
    let frame = stage.snapshot(&geo);
    assert!(frame.reveals[0].in_view);
    assert_eq!(frame.reveals[0].styles[0].opacity, 1.0);
}

#[test]
fn header_hides_on_downward_scroll() {
    let mut stage = stage();
    let geo = geometry();
    stage.handle(&scroll(0.0), &geo);
    stage.handle(&scroll(400.0), &geo);
    let header = stage.snapshot(&geo).header.unwrap();
    assert!(header.hidden);
    assert_eq!(header.style.translate_y, -100.0);
}

#[test]
fn entropy_seeded_stage_builds() {
    let mut config = page();
    config.seed = None;
    assert!(Stage::from_config(config).is_ok());
}

#[test]
fn host_events_parse_from_json() {
    let events: Vec<HostEvent> = serde_json::from_str(
        r#"[
            {"type":"mount"},
            {"type":"scroll","raw_offset":120,"viewport_height":800,"document_height":4000},
            {"type":"pointer_enter","item":"about"},
            {"type":"tick","now_ms":16}
        ]"#,
    )
    .unwrap();
    assert_eq!(events[0], HostEvent::Mount);
    assert_eq!(events[1], scroll_obs(120.0));
    assert_eq!(events[3], HostEvent::Tick { now_ms: 16.0 });
}

fn scroll_obs(offset: f64) -> HostEvent {
    HostEvent::Scroll(ScrollObservation::new(offset, 800.0, 4000.0))
}
