use crate::{
    foundation::core::{Rect, ScrollObservation},
    foundation::error::{MotionError, MotionResult},
    scroll::geometry::measured,
};

/// Growth (positive) or shrink (negative) applied to the viewport before intersecting.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Margin {
    Px(f64),
    /// Fraction of the viewport height, e.g. `-0.3` for `-30%`.
    Viewport(f64),
}

impl Default for Margin {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

impl Margin {
    fn resolve(self, viewport_height: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Viewport(f) => f * viewport_height,
        }
    }
}

/// In-view detection options.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InViewOptions {
    /// Latch after the first entry.
    #[serde(default)]
    pub once: bool,
    /// Required visible fraction of the element; 0 means any overlap.
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub margin: Margin,
}

impl InViewOptions {
    pub fn once() -> Self {
        Self {
            once: true,
            ..Self::default()
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn validate(&self) -> MotionResult<()> {
        if !self.amount.is_finite() || !(0.0..=1.0).contains(&self.amount) {
            return Err(MotionError::validation("in-view amount must lie in [0, 1]"));
        }
        let m = match self.margin {
            Margin::Px(v) | Margin::Viewport(v) => v,
        };
        if !m.is_finite() {
            return Err(MotionError::validation("in-view margin must be finite"));
        }
        Ok(())
    }
}

/// Tracks whether an element intersects the (margin-adjusted) viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct InViewTracker {
    opts: InViewOptions,
    in_view: bool,
    latched: bool,
}

impl InViewTracker {
    pub fn new(opts: InViewOptions) -> Self {
        Self {
            opts,
            in_view: false,
            latched: false,
        }
    }

    pub fn is_in_view(&self) -> bool {
        self.in_view
    }

    /// Update from a new observation. Returns `true` when the in-view state changed.
    ///
    /// Missing geometry counts as "not visible" unless the tracker already latched.
    pub fn update(&mut self, obs: &ScrollObservation, rect: Option<Rect>) -> bool {
        if self.latched {
            return false;
        }
        let now = match measured(rect) {
            Some(r) => self.intersects(obs, r),
            None => false,
        };
        let changed = now != self.in_view;
        self.in_view = now;
        if now && self.opts.once {
            self.latched = true;
        }
        changed
    }

    pub fn reset(&mut self) {
        self.in_view = false;
        self.latched = false;
    }

    fn intersects(&self, obs: &ScrollObservation, rect: Rect) -> bool {
        let margin = self.opts.margin.resolve(obs.viewport_height);
        let (top, bottom) = obs.viewport_span();
        let root_top = top - margin;
        let root_bottom = bottom + margin;
        if root_bottom <= root_top {
            return false;
        }

        let overlap = (rect.y1.min(root_bottom) - rect.y0.max(root_top)).max(0.0);
        if self.opts.amount <= 0.0 {
            return overlap > 0.0;
        }
        let h = rect.height();
        if h <= 0.0 {
            return false;
        }
        overlap / h >= self.opts.amount
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/viewport.rs"]
mod tests;
