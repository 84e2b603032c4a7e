//! Time-based entrance variants played once an element scrolls into view.

use crate::{
    animation::ease::Ease,
    animation::style::{Property, StyleValues},
    animation::track::Lerp,
    foundation::error::{MotionError, MotionResult},
};

pub const DURATION_SLOW_S: f64 = 1.2;
pub const DURATION_MEDIUM_S: f64 = 0.8;
pub const DURATION_FAST_S: f64 = 0.4;

/// Named entrance variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPreset {
    FadeInUp,
    FadeIn,
    ScaleIn,
    SlideInLeft,
    SlideInRight,
}

/// Hidden -> visible transition driven by elapsed time since trigger.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Reveal {
    pub hidden: StyleValues,
    pub visible: StyleValues,
    pub duration_s: f64,
    #[serde(default)]
    pub delay_s: f64,
    #[serde(default = "default_reveal_ease")]
    pub ease: Ease,
}

fn default_reveal_ease() -> Ease {
    Ease::SLOW
}

impl Reveal {
    pub fn preset(preset: RevealPreset) -> Self {
        let hidden = StyleValues::REST.with(Property::Opacity, 0.0);
        let hidden = match preset {
            RevealPreset::FadeInUp => hidden.with(Property::TranslateY, 30.0),
            RevealPreset::FadeIn => hidden,
            RevealPreset::ScaleIn => hidden.with(Property::Scale, 0.9),
            RevealPreset::SlideInLeft => hidden.with(Property::TranslateX, -40.0),
            RevealPreset::SlideInRight => hidden.with(Property::TranslateX, 40.0),
        };
        Self {
            hidden,
            visible: StyleValues::REST,
            duration_s: DURATION_MEDIUM_S,
            delay_s: 0.0,
            ease: Ease::SLOW,
        }
    }

    pub fn with_delay(mut self, delay_s: f64) -> Self {
        self.delay_s = delay_s;
        self
    }

    pub fn with_duration(mut self, duration_s: f64) -> Self {
        self.duration_s = duration_s;
        self
    }

    pub fn validate(&self) -> MotionResult<()> {
        if !self.duration_s.is_finite() || self.duration_s < 0.0 {
            return Err(MotionError::validation(
                "reveal duration_s must be finite and >= 0",
            ));
        }
        if !self.delay_s.is_finite() || self.delay_s < 0.0 {
            return Err(MotionError::validation(
                "reveal delay_s must be finite and >= 0",
            ));
        }
        if !self.ease.is_valid() {
            return Err(MotionError::animation("reveal ease is not a valid curve"));
        }
        Ok(())
    }

    /// Style `elapsed_s` seconds after the trigger; `None` means not triggered yet.
    pub fn sample(&self, elapsed_s: Option<f64>) -> StyleValues {
        let Some(elapsed) = elapsed_s else {
            return self.hidden;
        };
        let local = elapsed - self.delay_s;
        if local <= 0.0 || local.is_nan() {
            return self.hidden;
        }
        if self.duration_s <= 0.0 || local >= self.duration_s {
            return self.visible;
        }
        let t = self.ease.apply(local / self.duration_s);
        StyleValues::lerp(&self.hidden, &self.visible, t)
    }
}

/// Per-child delays for staggered containers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stagger {
    pub delay_children_s: f64,
    pub stagger_children_s: f64,
}

impl Stagger {
    pub const FAST: Self = Self::new(0.1, 0.05);
    pub const NORMAL: Self = Self::new(0.2, 0.1);
    pub const SLOW: Self = Self::new(0.2, 0.15);
    /// Hero intro timing.
    pub const INTRO: Self = Self::new(0.3, 0.15);

    pub const fn new(delay_children_s: f64, stagger_children_s: f64) -> Self {
        Self {
            delay_children_s,
            stagger_children_s,
        }
    }

    pub fn delay_for(&self, index: usize) -> f64 {
        self.delay_children_s + index as f64 * self.stagger_children_s
    }

    /// Apply this stagger to `reveal` for child `index`.
    pub fn child(&self, reveal: Reveal, index: usize) -> Reveal {
        reveal.with_delay(reveal.delay_s + self.delay_for(index))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/reveal.rs"]
mod tests;
