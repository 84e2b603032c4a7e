use std::{cell::Cell, rc::Rc};

use crate::{
    animation::style::StyleValues,
    foundation::core::ScrollObservation,
    foundation::error::{MotionError, MotionResult},
    foundation::math::clamp01,
    foundation::rng::RandomSource,
    runtime::hub::{ScrollHub, Subscription},
    runtime::scheduler::{ScheduledTask, Scheduler, TaskId},
    scatter::assignment::{GlyphGroup, GroupProfile, ScatterAssignment, ScatterRanges},
};

/// One block of text whose characters are scattered independently.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextRegion {
    pub group: GlyphGroup,
    pub text: String,
}

impl TextRegion {
    pub fn new(group: GlyphGroup, text: impl Into<String>) -> Self {
        Self {
            group,
            text: text.into(),
        }
    }
}

fn default_startup_delay_ms() -> f64 {
    100.0
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScatterConfig {
    pub regions: Vec<TextRegion>,
    #[serde(default)]
    pub ranges: ScatterRanges,
    #[serde(default = "GroupProfile::name")]
    pub name: GroupProfile,
    #[serde(default = "GroupProfile::subtext")]
    pub subtext: GroupProfile,
    /// Delay between mount and activation, so the host has laid out glyph nodes.
    #[serde(default = "default_startup_delay_ms")]
    pub startup_delay_ms: f64,
}

impl ScatterConfig {
    pub fn new(regions: Vec<TextRegion>) -> Self {
        Self {
            regions,
            ranges: ScatterRanges::default(),
            name: GroupProfile::name(),
            subtext: GroupProfile::subtext(),
            startup_delay_ms: default_startup_delay_ms(),
        }
    }

    pub fn profile(&self, group: GlyphGroup) -> &GroupProfile {
        match group {
            GlyphGroup::Name => &self.name,
            GlyphGroup::Subtext => &self.subtext,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        self.ranges.validate()?;
        self.name.validate()?;
        self.subtext.validate()?;
        if !self.startup_delay_ms.is_finite() || self.startup_delay_ms < 0.0 {
            return Err(MotionError::validation(
                "scatter startup_delay_ms must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// A single character slot in a text region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Glyph {
    pub region: usize,
    pub index: usize,
    pub ch: char,
    pub group: GlyphGroup,
}

/// Computed style for one glyph.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GlyphStyle {
    pub region: usize,
    pub index: usize,
    pub glyph: char,
    pub group: GlyphGroup,
    pub style: StyleValues,
}

#[derive(Clone, Copy, Debug)]
struct Scrub {
    displayed: f64,
    last_ms: f64,
}

impl Scrub {
    fn starting_at(now_ms: f64) -> Self {
        Self {
            displayed: 0.0,
            last_ms: now_ms,
        }
    }

    fn step(&mut self, target: f64, scrub_s: f64, now_ms: f64) {
        let dt_ms = (now_ms - self.last_ms).max(0.0);
        self.last_ms = self.last_ms.max(now_ms);
        let alpha = if scrub_s <= 0.0 {
            1.0
        } else {
            clamp01(dt_ms / (scrub_s * 1000.0))
        };
        self.displayed += (target - self.displayed) * alpha;
    }
}

#[derive(Debug)]
struct Active {
    assignments: Vec<ScatterAssignment>,
    latest: Rc<Cell<Option<ScrollObservation>>>,
    name: Scrub,
    subtext: Scrub,
    _subscription: Subscription,
}

impl Active {
    fn scrub(&self, group: GlyphGroup) -> &Scrub {
        match group {
            GlyphGroup::Name => &self.name,
            GlyphGroup::Subtext => &self.subtext,
        }
    }
}

#[derive(Debug)]
enum Phase {
    Unmounted,
    Pending(ScheduledTask),
    Active(Box<Active>),
}

/// Shatters headline glyphs as the page starts scrolling.
///
/// Lifecycle: [`mount`](Self::mount) schedules a startup timer; when it fires the
/// choreographer draws one [`ScatterAssignment`] per glyph and subscribes to whole-document
/// scroll. Assignments are never redrawn while mounted. [`unmount`](Self::unmount) releases
/// the timer and the subscription.
#[derive(Debug)]
pub struct ScatterChoreographer {
    config: ScatterConfig,
    glyphs: Vec<Glyph>,
    phase: Phase,
}

impl ScatterChoreographer {
    pub fn new(config: ScatterConfig) -> MotionResult<Self> {
        config.validate()?;
        let glyphs = config
            .regions
            .iter()
            .enumerate()
            .flat_map(|(region, r)| {
                r.text.chars().enumerate().map(move |(index, ch)| Glyph {
                    region,
                    index,
                    ch,
                    group: r.group,
                })
            })
            .collect();
        Ok(Self {
            config,
            glyphs,
            phase: Phase::Unmounted,
        })
    }

    pub fn config(&self) -> &ScatterConfig {
        &self.config
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn is_mounted(&self) -> bool {
        !matches!(self.phase, Phase::Unmounted)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active(_))
    }

    /// Schedule activation. A no-op while already mounted or when there is nothing to scatter.
    pub fn mount(&mut self, scheduler: &Scheduler) {
        if self.is_mounted() || self.glyphs.is_empty() {
            return;
        }
        let timer = scheduler.set_timeout(self.config.startup_delay_ms);
        tracing::debug!(glyphs = self.glyphs.len(), "scatter mounted");
        self.phase = Phase::Pending(timer);
    }

    /// Activate if the pending startup timer is among `fired`. Returns whether it activated.
    pub fn on_timers(
        &mut self,
        fired: &[TaskId],
        rng: &mut dyn RandomSource,
        hub: &ScrollHub,
        now_ms: f64,
    ) -> bool {
        let due = matches!(&self.phase, Phase::Pending(task) if task.fired_in(fired));
        if due {
            self.activate(rng, hub, now_ms);
        }
        due
    }

    /// Draw assignments and start following scroll. Ignored unless pending.
    pub fn activate(&mut self, rng: &mut dyn RandomSource, hub: &ScrollHub, now_ms: f64) {
        if !matches!(self.phase, Phase::Pending(_)) {
            return;
        }
        let assignments: Vec<ScatterAssignment> = self
            .glyphs
            .iter()
            .map(|g| ScatterAssignment::draw(rng, &self.config.ranges, self.config.profile(g.group)))
            .collect();
        let latest = Rc::new(Cell::new(None));
        let sink = latest.clone();
        let subscription = hub.subscribe(move |obs| sink.set(Some(*obs)));
        tracing::debug!(glyphs = assignments.len(), "scatter activated");
        self.phase = Phase::Active(Box::new(Active {
            assignments,
            latest,
            name: Scrub::starting_at(now_ms),
            subtext: Scrub::starting_at(now_ms),
            _subscription: subscription,
        }));
    }

    pub fn assignments(&self) -> Option<&[ScatterAssignment]> {
        match &self.phase {
            Phase::Active(active) => Some(&active.assignments),
            _ => None,
        }
    }

    /// Progress the latest scroll position asks for, before scrubbing.
    pub fn target_progress(&self, group: GlyphGroup) -> f64 {
        match &self.phase {
            Phase::Active(active) => active
                .latest
                .get()
                .map_or(0.0, |obs| self.config.profile(group).trigger.progress(&obs)),
            _ => 0.0,
        }
    }

    /// Progress currently shown for `group`.
    pub fn displayed_progress(&self, group: GlyphGroup) -> f64 {
        match &self.phase {
            Phase::Active(active) => {
                if self.config.profile(group).scrub_s <= 0.0 {
                    self.target_progress(group)
                } else {
                    active.scrub(group).displayed
                }
            }
            _ => 0.0,
        }
    }

    /// Let scrubbed progress catch up with scroll at host time `now_ms`.
    pub fn advance(&mut self, now_ms: f64) {
        let name_target = self.target_progress(GlyphGroup::Name);
        let subtext_target = self.target_progress(GlyphGroup::Subtext);
        if let Phase::Active(active) = &mut self.phase {
            active.name.step(name_target, self.config.name.scrub_s, now_ms);
            active
                .subtext
                .step(subtext_target, self.config.subtext.scrub_s, now_ms);
            tracing::trace!(
                name = active.name.displayed,
                subtext = active.subtext.displayed,
                "scatter scrubbed"
            );
        }
    }

    /// Per-glyph styles. Glyphs stay at rest until activation.
    pub fn styles(&self) -> Vec<GlyphStyle> {
        let assignments = self.assignments();
        let name_p = self.displayed_progress(GlyphGroup::Name);
        let subtext_p = self.displayed_progress(GlyphGroup::Subtext);
        self.glyphs
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let profile = self.config.profile(g.group);
                let style = match assignments.and_then(|a| a.get(i)) {
                    Some(a) => {
                        let p = match g.group {
                            GlyphGroup::Name => name_p,
                            GlyphGroup::Subtext => subtext_p,
                        };
                        a.style_at(profile, p)
                    }
                    None => profile.rest(),
                };
                GlyphStyle {
                    region: g.region,
                    index: g.index,
                    glyph: g.ch,
                    group: g.group,
                    style,
                }
            })
            .collect()
    }

    /// Tear down; drops the pending timer or the scroll subscription.
    pub fn unmount(&mut self) {
        if self.is_mounted() {
            tracing::debug!("scatter unmounted");
        }
        self.phase = Phase::Unmounted;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scatter/choreographer.rs"]
mod tests;
