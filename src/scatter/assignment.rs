use crate::{
    animation::ease::Ease,
    animation::style::StyleValues,
    animation::track::Lerp,
    foundation::core::ScrollObservation,
    foundation::error::{MotionError, MotionResult},
    foundation::rng::RandomSource,
    scroll::window::ProgressWindow,
};

/// Which text block a glyph belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphGroup {
    /// The headline; visible at rest, blown away by scrolling.
    Name,
    /// Hidden overlay text that bursts outward as the name shatters.
    Subtext,
}

/// Whole-document scroll range that drives a group from rest to scattered.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScatterTrigger {
    /// From the top of the page to `end` times the document height.
    DocumentFraction { end: f64 },
    /// From the top of the page to an absolute offset.
    AbsolutePixels { end_px: f64 },
}

impl ScatterTrigger {
    pub fn window(self, obs: &ScrollObservation) -> ProgressWindow {
        match self {
            Self::DocumentFraction { end } => ProgressWindow::new(0.0, end * obs.document_height),
            Self::AbsolutePixels { end_px } => ProgressWindow::new(0.0, end_px),
        }
    }

    pub fn progress(self, obs: &ScrollObservation) -> f64 {
        self.window(obs).progress(obs.raw_offset)
    }

    fn validate(self) -> MotionResult<()> {
        let ok = match self {
            Self::DocumentFraction { end } => end.is_finite() && end > 0.0 && end <= 1.0,
            Self::AbsolutePixels { end_px } => end_px.is_finite() && end_px > 0.0,
        };
        if ok {
            Ok(())
        } else {
            Err(MotionError::validation(format!(
                "scatter trigger {self:?} must describe a positive window"
            )))
        }
    }
}

/// Random ranges shared by every glyph.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScatterRanges {
    pub distance: [f64; 2],
    pub rotation_deg: [f64; 2],
}

impl Default for ScatterRanges {
    fn default() -> Self {
        Self {
            distance: [400.0, 1200.0],
            rotation_deg: [-80.0, 80.0],
        }
    }
}

impl ScatterRanges {
    pub fn validate(&self) -> MotionResult<()> {
        for (name, [lo, hi]) in [("distance", self.distance), ("rotation_deg", self.rotation_deg)] {
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(MotionError::validation(format!(
                    "scatter {name} range must be finite with lo <= hi"
                )));
            }
        }
        Ok(())
    }
}

fn default_ease() -> Ease {
    Ease::POWER2_OUT
}

/// How one glyph group turns an assignment into motion.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupProfile {
    /// Multiplies the drawn direction; the name flies opposite to the subtext.
    pub vertical_sign: f64,
    pub distance_scale: f64,
    pub rotation_scale: f64,
    /// Width of the horizontal jitter band, centred on zero.
    pub horizontal_spread: f64,
    /// Opacity at rest and when fully scattered.
    pub opacity: [f64; 2],
    pub trigger: ScatterTrigger,
    /// Seconds the displayed progress takes to catch up with scrolling; 0 snaps.
    #[serde(default)]
    pub scrub_s: f64,
    #[serde(default = "default_ease")]
    pub ease: Ease,
}

impl GroupProfile {
    pub fn name() -> Self {
        Self {
            vertical_sign: -1.0,
            distance_scale: 1.2,
            rotation_scale: 1.0,
            horizontal_spread: 800.0,
            opacity: [1.0, 0.0],
            trigger: ScatterTrigger::DocumentFraction { end: 0.25 },
            scrub_s: 0.2,
            ease: Ease::POWER2_OUT,
        }
    }

    pub fn subtext() -> Self {
        Self {
            vertical_sign: 1.0,
            distance_scale: 1.0,
            rotation_scale: 2.0,
            horizontal_spread: 1200.0,
            opacity: [0.0, 1.0],
            trigger: ScatterTrigger::DocumentFraction { end: 0.15 },
            scrub_s: 0.1,
            ease: Ease::POWER2_OUT,
        }
    }

    pub fn with_trigger(mut self, trigger: ScatterTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_scrub(mut self, scrub_s: f64) -> Self {
        self.scrub_s = scrub_s;
        self
    }

    pub fn validate(&self) -> MotionResult<()> {
        let nums = [
            self.vertical_sign,
            self.distance_scale,
            self.rotation_scale,
            self.horizontal_spread,
            self.opacity[0],
            self.opacity[1],
            self.scrub_s,
        ];
        if nums.iter().any(|v| !v.is_finite()) {
            return Err(MotionError::validation(
                "scatter group profile values must be finite",
            ));
        }
        if self.scrub_s < 0.0 {
            return Err(MotionError::validation("scatter scrub_s must be >= 0"));
        }
        if !self.ease.is_valid() {
            return Err(MotionError::animation("scatter ease is not a valid curve"));
        }
        self.trigger.validate()
    }

    /// Style of a glyph that has not started moving.
    pub fn rest(&self) -> StyleValues {
        StyleValues {
            opacity: self.opacity[0],
            ..StyleValues::REST
        }
    }
}

/// Random trajectory for one glyph, drawn once per mount.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScatterAssignment {
    /// `+1.0` or `-1.0`.
    pub direction: f64,
    pub distance: f64,
    pub rotation_deg: f64,
    pub horizontal_jitter: f64,
}

impl ScatterAssignment {
    pub fn draw(
        rng: &mut dyn RandomSource,
        ranges: &ScatterRanges,
        profile: &GroupProfile,
    ) -> Self {
        let direction = rng.sign();
        let distance = rng.uniform(ranges.distance[0], ranges.distance[1]);
        let horizontal_jitter = (rng.next_f64() - 0.5) * profile.horizontal_spread;
        let rotation_deg =
            rng.uniform(ranges.rotation_deg[0], ranges.rotation_deg[1]) * profile.rotation_scale;
        Self {
            direction,
            distance,
            rotation_deg,
            horizontal_jitter,
        }
    }

    /// Fully scattered end state.
    pub fn scattered(&self, profile: &GroupProfile) -> StyleValues {
        StyleValues {
            opacity: profile.opacity[1],
            scale: 1.0,
            translate_x: self.horizontal_jitter,
            translate_y: profile.vertical_sign
                * self.direction
                * self.distance
                * profile.distance_scale,
            rotation_deg: self.rotation_deg,
        }
    }

    /// Interpolated style at group progress `progress`.
    pub fn style_at(&self, profile: &GroupProfile, progress: f64) -> StyleValues {
        let t = profile.ease.apply(progress);
        StyleValues::lerp(&profile.rest(), &self.scattered(profile), t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scatter/assignment.rs"]
mod tests;
