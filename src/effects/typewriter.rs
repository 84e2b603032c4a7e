use crate::{
    foundation::core::ScrollObservation,
    foundation::error::{MotionError, MotionResult},
    runtime::scheduler::{ScheduledTask, Scheduler, TaskId},
    scroll::geometry::GeometrySource,
    scroll::viewport::{InViewOptions, InViewTracker},
};

/// Step delays in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TypewriterTimings {
    pub type_ms: f64,
    pub hold_ms: f64,
    pub delete_ms: f64,
    pub pause_ms: f64,
}

impl Default for TypewriterTimings {
    fn default() -> Self {
        Self {
            type_ms: 20.0,
            hold_ms: 2000.0,
            delete_ms: 10.0,
            pause_ms: 500.0,
        }
    }
}

fn default_in_view() -> InViewOptions {
    InViewOptions::default().with_amount(0.3)
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TypewriterConfig {
    /// Geometry id of the editor element.
    pub target: String,
    pub snippets: Vec<String>,
    #[serde(default)]
    pub timings: TypewriterTimings,
    #[serde(default = "default_in_view")]
    pub in_view: InViewOptions,
}

impl TypewriterConfig {
    pub fn new(target: impl Into<String>, snippets: Vec<String>) -> Self {
        Self {
            target: target.into(),
            snippets,
            timings: TypewriterTimings::default(),
            in_view: default_in_view(),
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        let t = self.timings;
        if [t.type_ms, t.hold_ms, t.delete_ms, t.pause_ms]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(MotionError::validation(
                "typewriter timings must be finite and >= 0",
            ));
        }
        self.in_view.validate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypewriterPhase {
    Typing,
    Holding,
    Deleting,
    Pausing,
}

/// Types, holds, deletes and cycles through code snippets while its element is on screen.
#[derive(Debug)]
pub struct Typewriter {
    config: TypewriterConfig,
    view: InViewTracker,
    snippet: usize,
    shown: usize,
    typing: bool,
    visible: bool,
    pending: Option<ScheduledTask>,
}

impl Typewriter {
    pub fn new(config: TypewriterConfig) -> MotionResult<Self> {
        config.validate()?;
        let view = InViewTracker::new(config.in_view);
        Ok(Self {
            config,
            view,
            snippet: 0,
            shown: 0,
            typing: true,
            visible: false,
            pending: None,
        })
    }

    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    pub fn snippet_index(&self) -> usize {
        self.snippet
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_running(&self) -> bool {
        self.pending.as_ref().is_some_and(ScheduledTask::is_pending)
    }

    /// Text typed so far.
    pub fn text(&self) -> &str {
        let Some(snippet) = self.current() else {
            return "";
        };
        let end = snippet
            .char_indices()
            .nth(self.shown)
            .map_or(snippet.len(), |(i, _)| i);
        &snippet[..end]
    }

    /// The caret shows while typing and holding.
    pub fn cursor_visible(&self) -> bool {
        self.typing
    }

    pub fn phase(&self) -> TypewriterPhase {
        let full = self.shown >= self.current_len();
        match (self.typing, full, self.shown == 0) {
            (true, false, _) => TypewriterPhase::Typing,
            (true, true, _) => TypewriterPhase::Holding,
            (false, _, false) => TypewriterPhase::Deleting,
            (false, _, true) => TypewriterPhase::Pausing,
        }
    }

    /// Re-evaluate visibility from the editor's geometry.
    pub fn observe(
        &mut self,
        obs: &ScrollObservation,
        geometry: &dyn GeometrySource,
        scheduler: &Scheduler,
    ) {
        self.view.update(obs, geometry.rect(&self.config.target));
        self.set_visible(self.view.is_in_view(), scheduler);
    }

    /// Start or stop cycling. Hiding cancels the pending step; state is kept for resumption.
    pub fn set_visible(&mut self, visible: bool, scheduler: &Scheduler) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        tracing::debug!(visible, snippet = self.snippet, "typewriter visibility changed");
        if visible {
            self.schedule(scheduler);
        } else {
            self.pending = None;
        }
    }

    /// Apply our step if its timer fired. Returns whether the text or phase changed.
    pub fn on_timers(&mut self, fired: &[TaskId], scheduler: &Scheduler) -> bool {
        if !self.pending.as_ref().is_some_and(|t| t.fired_in(fired)) {
            return false;
        }
        self.pending = None;
        self.step();
        if self.visible {
            self.schedule(scheduler);
        }
        true
    }

    /// Cancel any pending step.
    pub fn teardown(&mut self) {
        self.visible = false;
        self.pending = None;
        self.view.reset();
    }

    fn current(&self) -> Option<&str> {
        self.config.snippets.get(self.snippet).map(String::as_str)
    }

    fn current_len(&self) -> usize {
        self.current().map_or(0, |s| s.chars().count())
    }

    fn delay_ms(&self) -> f64 {
        let t = self.config.timings;
        match self.phase() {
            TypewriterPhase::Typing => t.type_ms,
            TypewriterPhase::Holding => t.hold_ms,
            TypewriterPhase::Deleting => t.delete_ms,
            TypewriterPhase::Pausing => t.pause_ms,
        }
    }

    fn step(&mut self) {
        match self.phase() {
            TypewriterPhase::Typing => self.shown += 1,
            TypewriterPhase::Holding => self.typing = false,
            TypewriterPhase::Deleting => self.shown -= 1,
            TypewriterPhase::Pausing => {
                self.snippet = (self.snippet + 1) % self.config.snippets.len().max(1);
                self.typing = true;
            }
        }
    }

    fn schedule(&mut self, scheduler: &Scheduler) {
        if self.config.snippets.is_empty() {
            return;
        }
        self.pending = Some(scheduler.set_timeout(self.delay_ms()));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/typewriter.rs"]
mod tests;
