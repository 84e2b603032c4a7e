use crate::{
    animation::ease::Ease,
    animation::style::StyleValues,
    foundation::error::{MotionError, MotionResult},
};

fn default_hide_after_px() -> f64 {
    150.0
}

fn default_at_top_px() -> f64 {
    50.0
}

fn default_transition_s() -> f64 {
    0.3
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeaderConfig {
    #[serde(default = "default_hide_after_px")]
    pub hide_after_px: f64,
    #[serde(default = "default_at_top_px")]
    pub at_top_px: f64,
    /// Show/hide transition the host should apply.
    #[serde(default = "default_transition_s")]
    pub transition_s: f64,
    #[serde(default = "slow_ease")]
    pub ease: Ease,
}

fn slow_ease() -> Ease {
    Ease::SLOW
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            hide_after_px: default_hide_after_px(),
            at_top_px: default_at_top_px(),
            transition_s: default_transition_s(),
            ease: Ease::SLOW,
        }
    }
}

impl HeaderConfig {
    pub fn validate(&self) -> MotionResult<()> {
        let finite = [self.hide_after_px, self.at_top_px, self.transition_s]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.transition_s < 0.0 {
            return Err(MotionError::validation(
                "header thresholds must be finite and transition_s >= 0",
            ));
        }
        if !self.ease.is_valid() {
            return Err(MotionError::animation("header ease is not a valid curve"));
        }
        Ok(())
    }
}

/// Hide-on-scroll-down header.
#[derive(Clone, Debug)]
pub struct HeaderTracker {
    config: HeaderConfig,
    previous: f64,
    hidden: bool,
    at_top: bool,
}

impl HeaderTracker {
    pub fn new(config: HeaderConfig) -> MotionResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            previous: 0.0,
            hidden: false,
            at_top: true,
        })
    }

    pub fn config(&self) -> &HeaderConfig {
        &self.config
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_at_top(&self) -> bool {
        self.at_top
    }

    /// Feed the latest scroll offset. Returns whether visibility changed.
    pub fn on_scroll(&mut self, latest: f64) -> bool {
        if !latest.is_finite() {
            return false;
        }
        let hidden = latest > self.previous && latest > self.config.hide_after_px;
        self.previous = latest;
        self.at_top = latest < self.config.at_top_px;
        let changed = hidden != self.hidden;
        if changed {
            tracing::debug!(hidden, latest, "header visibility changed");
        }
        self.hidden = hidden;
        changed
    }

    /// Target style; the host transitions to it over `transition_s`.
    pub fn style(&self) -> StyleValues {
        if self.hidden {
            StyleValues {
                opacity: 0.0,
                translate_y: -100.0,
                ..StyleValues::REST
            }
        } else {
            StyleValues::REST
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nav/header.rs"]
mod tests;
