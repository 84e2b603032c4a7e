//! scrollmotion is a scroll-driven animation choreography engine.
//!
//! It turns a stream of scroll observations from a host surface into per-element visual
//! styles: opacity, scale, translation and rotation.
//!
//! # Pipeline overview
//!
//! 1. **Sample**: `ScrollObservation + WindowSource -> progress` in `[0, 1]`
//! 2. **Map**: `progress + PropertyTrack -> value` (piecewise keyframes with easing)
//! 3. **Choreograph**: stateful components (glyph scatter, navigation highlight, header,
//!    viewport reveals, typewriter, card tilt) react to scroll, pointer, paint and timer events
//! 4. **Snapshot**: [`Stage`] gathers every output into a [`FrameOutput`]
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Never fails per tick**: unmeasurable geometry and degenerate windows degrade to
//!   progress 0; configuration errors surface once, at construction.
//! - **Single-threaded**: timers and paint callbacks run on [`Scheduler`]; every registration
//!   is a guard that deregisters on drop.
//! - **Deterministic when seeded**: glyph trajectories come from a [`RandomSource`].
#![forbid(unsafe_code)]

mod animation;
mod effects;
mod foundation;
mod nav;
mod runtime;
mod scatter;
mod scroll;
mod stage;

pub use animation::ease::Ease;
pub use animation::reveal::{
    DURATION_FAST_S, DURATION_MEDIUM_S, DURATION_SLOW_S, Reveal, RevealPreset, Stagger,
};
pub use animation::style::{Property, StyleValues, TrackSet};
pub use animation::track::{Keyframe, Lerp, PropertyTrack};
pub use effects::tilt::{CardTilt, SpringConfig, TiltConfig};
pub use effects::typewriter::{Typewriter, TypewriterConfig, TypewriterPhase, TypewriterTimings};
pub use foundation::core::{Point, Rect, ScrollObservation, Vec2};
pub use foundation::error::{MotionError, MotionResult};
pub use foundation::rng::{RandomSource, Rng64};
pub use nav::bubble::{BubbleIndicator, BubblePosition};
pub use nav::header::{HeaderConfig, HeaderTracker};
pub use nav::tracker::{NavConfig, NavSection, NavTracker};
pub use runtime::hub::{ScrollHub, Subscription};
pub use runtime::scheduler::{ScheduledTask, Scheduler, TaskId};
pub use scatter::assignment::{
    GlyphGroup, GroupProfile, ScatterAssignment, ScatterRanges, ScatterTrigger,
};
pub use scatter::choreographer::{
    Glyph, GlyphStyle, ScatterChoreographer, ScatterConfig, TextRegion,
};
pub use scroll::geometry::{GeometrySource, NoGeometry, StaticGeometry};
pub use scroll::sampler::ProgressSampler;
pub use scroll::viewport::{InViewOptions, InViewTracker, Margin};
pub use scroll::window::{Intersection, ProgressWindow, WindowSource};
pub use stage::config::{PageConfig, RevealBinding, SectionConfig, StaggerGroup};
pub use stage::driver::Stage;
pub use stage::frame::{
    FrameOutput, HeaderFrame, HostEvent, NavFrame, RevealFrame, SectionFrame, TiltFrame,
    TypewriterFrame,
};
pub use stage::portfolio::{PAGE_ID, portfolio_page};
