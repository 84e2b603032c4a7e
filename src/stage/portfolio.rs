//! The built-in portfolio page.

use crate::{
    animation::ease::Ease,
    animation::reveal::{DURATION_MEDIUM_S, Reveal, RevealPreset, Stagger},
    animation::style::{Property, TrackSet},
    animation::track::PropertyTrack,
    effects::tilt::TiltConfig,
    effects::typewriter::TypewriterConfig,
    foundation::error::MotionResult,
    nav::header::HeaderConfig,
    nav::tracker::{NavConfig, NavSection},
    scatter::assignment::GlyphGroup,
    scatter::choreographer::{ScatterConfig, TextRegion},
    scroll::viewport::{InViewOptions, Margin},
    scroll::window::WindowSource,
    stage::config::{PageConfig, RevealBinding, SectionConfig},
};

/// Geometry id of the scroll container wrapping the whole page.
pub const PAGE_ID: &str = "page";

/// Project cards, ids `project-card-0` onwards.
const PROJECT_CARDS: usize = 3;

const SNIPPETS: [&str; 3] = [
    "const buildTheFuture = async () => {\n  const skills = ['React', 'Python', 'AI/ML'];\n  const passion = 'Innovation';\n  \n  return skills.map(skill => \n    applyTo(skill, passion)\n  );\n};",
    "function solveProblems(challenge) {\n  const approach = analyze(challenge);\n  const solution = design(approach);\n  \n  return implement(solution)\n    .then(test)\n    .then(deploy);\n}",
    "class Engineer {\n  constructor() {\n    this.skills = new Set();\n    this.learning = true;\n  }\n  \n  async grow() {\n    while (this.learning) {\n      await this.learn();\n      await this.build();\n      await this.share();\n    }\n  }\n}",
];

fn track(input: &[f64], output: &[f64]) -> MotionResult<PropertyTrack<f64>> {
    PropertyTrack::from_pairs(input, output)
}

fn sticky_sections() -> MotionResult<Vec<SectionConfig>> {
    let page = WindowSource::element(PAGE_ID);
    let intro = TrackSet::new()
        .with(Property::Scale, track(&[0.0, 0.1], &[1.0, 0.95])?)
        .with(Property::Opacity, track(&[0.0, 0.1], &[1.0, 0.0])?)
        .with(Property::TranslateY, track(&[0.0, 0.1], &[0.0, -50.0])?);
    let statement = TrackSet::new()
        .with(
            Property::Opacity,
            track(&[0.08, 0.14, 0.18, 0.22], &[0.0, 1.0, 1.0, 0.0])?,
        )
        .with(Property::TranslateY, track(&[0.08, 0.14], &[40.0, 0.0])?)
        .with(Property::Scale, track(&[0.18, 0.22], &[1.0, 0.95])?);
    Ok(vec![
        SectionConfig::new("intro", page.clone(), intro),
        SectionConfig::new("statement", page, statement),
    ])
}

fn parallax_sections() -> Vec<SectionConfig> {
    let passage = WindowSource::element_passage("parallax");
    [
        ("parallax-1", 100.0, -100.0),
        ("parallax-2", -50.0, 50.0),
        ("parallax-3", 150.0, -150.0),
    ]
    .into_iter()
    .map(|(id, from, to)| {
        SectionConfig::new(
            id,
            passage.clone(),
            TrackSet::new().with(Property::TranslateY, PropertyTrack::linear(from, to)),
        )
    })
    .collect()
}

fn loop_video() -> MotionResult<SectionConfig> {
    let keys = [0.0, 0.3, 0.7, 1.0];
    Ok(SectionConfig::new(
        "loop-video",
        WindowSource::element_passage("loop-video"),
        TrackSet::new()
            .with(Property::Opacity, track(&keys, &[0.0, 1.0, 1.0, 0.0])?)
            .with(Property::Scale, track(&keys, &[0.9, 1.0, 1.0, 0.9])?),
    ))
}

fn navigation() -> NavConfig {
    NavConfig::new(vec![
        NavSection::new("home", "Home", 0.0),
        NavSection::new("about", "About", 2000.0),
        NavSection::new("projects", "Work", 3500.0),
        NavSection::new("experience", "Experience", 5000.0),
        NavSection::new("contact", "Contact", 6500.0),
    ])
}

fn hero_scatter() -> ScatterConfig {
    ScatterConfig::new(vec![
        TextRegion::new(GlyphGroup::Name, "Hello, "),
        TextRegion::new(GlyphGroup::Name, "I'm"),
        TextRegion::new(GlyphGroup::Name, "Oliver"),
        TextRegion::new(GlyphGroup::Name, "Grudzinski"),
        TextRegion::new(GlyphGroup::Subtext, "building "),
        TextRegion::new(GlyphGroup::Subtext, "innovative "),
        TextRegion::new(GlyphGroup::Subtext, "solutions"),
    ])
}

fn reveals() -> Vec<RevealBinding> {
    let section_view = InViewOptions::once().with_margin(Margin::Px(-100.0));
    let fade_up = Reveal::preset(RevealPreset::FadeInUp);
    let mut hero_copy = Reveal::preset(RevealPreset::SlideInLeft).with_duration(DURATION_MEDIUM_S);
    hero_copy.hidden.translate_x = -50.0;
    hero_copy.ease = Ease::STANDARD;

    vec![
        RevealBinding::new("hero-intro", hero_copy, InViewOptions::once().with_amount(0.2)),
        RevealBinding::new("thinking", fade_up, section_view).with_children(Stagger::NORMAL, 3),
        RevealBinding::new("systems", fade_up, section_view).with_children(Stagger::NORMAL, 4),
        RevealBinding::new("projects", fade_up, section_view).with_children(Stagger::SLOW, 3),
        RevealBinding::new("experience", fade_up, section_view).with_children(Stagger::NORMAL, 3),
        RevealBinding::new(
            "contact",
            Reveal::preset(RevealPreset::ScaleIn),
            section_view,
        ),
    ]
}

/// The portfolio landing page: sticky intro and statement over the page container, parallax
/// columns, loop video fade, navigation, hero scatter text, the code editor typewriter and
/// tilting project cards.
pub fn portfolio_page() -> MotionResult<PageConfig> {
    let mut sections = sticky_sections()?;
    sections.extend(parallax_sections());
    sections.push(loop_video()?);

    let config = PageConfig {
        progress: Some(WindowSource::element(PAGE_ID)),
        sections,
        nav: Some(navigation()),
        header: Some(HeaderConfig::default()),
        scatter: Some(hero_scatter()),
        reveals: reveals(),
        typewriter: Some(TypewriterConfig::new(
            "editor",
            SNIPPETS.iter().map(|s| (*s).to_owned()).collect(),
        )),
        tilt: Some(TiltConfig::new(
            (0..PROJECT_CARDS).map(|i| format!("project-card-{i}")).collect(),
        )),
        seed: None,
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[path = "../../tests/unit/stage/portfolio.rs"]
mod tests;
