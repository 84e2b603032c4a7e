use crate::{
    foundation::core::ScrollObservation,
    foundation::error::{MotionError, MotionResult},
    foundation::math::{clamp01, safe_ratio},
    scroll::geometry::{GeometrySource, measured},
};

/// Scroll range over which a progress value is measured.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressWindow {
    pub start_offset: f64,
    pub end_offset: f64,
}

impl ProgressWindow {
    pub fn new(start_offset: f64, end_offset: f64) -> Self {
        Self {
            start_offset,
            end_offset,
        }
    }

    /// Zero-width, inverted, or non-finite windows have no usable span.
    pub fn is_degenerate(self) -> bool {
        let span = self.span();
        !span.is_finite() || span <= 0.0
    }

    pub fn span(self) -> f64 {
        self.end_offset - self.start_offset
    }

    /// `clamp((offset - start) / (end - start), 0, 1)`; a degenerate window yields 0.
    pub fn progress(self, scroll_offset: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        match safe_ratio(scroll_offset - self.start_offset, self.span()) {
            Some(r) => clamp01(r),
            None => 0.0,
        }
    }
}

/// Where an element edge meets a viewport edge, as fractions of their heights.
///
/// `element: 0` is the element's top, `1` its bottom; likewise for `viewport`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Intersection {
    pub element: f64,
    pub viewport: f64,
}

impl Intersection {
    /// Element top meets viewport top.
    pub const START_START: Self = Self::new(0.0, 0.0);
    /// Element top meets viewport bottom (element entering).
    pub const START_END: Self = Self::new(0.0, 1.0);
    /// Element bottom meets viewport top (element gone).
    pub const END_START: Self = Self::new(1.0, 0.0);
    /// Element bottom meets viewport bottom.
    pub const END_END: Self = Self::new(1.0, 1.0);

    pub const fn new(element: f64, viewport: f64) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this intersection happens.
    fn offset(self, element_top: f64, element_height: f64, viewport_height: f64) -> f64 {
        element_top + element_height * self.element - viewport_height * self.viewport
    }
}

fn default_start() -> Intersection {
    Intersection::START_START
}

fn default_end() -> Intersection {
    Intersection::END_END
}

/// Description from which a [`ProgressWindow`] is resolved on each tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowSource {
    /// Fixed document offsets.
    Absolute { start: f64, end: f64 },
    /// Fractions of the maximum scroll offset.
    Document { from: f64, to: f64 },
    /// Tracks an element's passage through the viewport.
    Element {
        target: String,
        #[serde(default = "default_start")]
        start: Intersection,
        #[serde(default = "default_end")]
        end: Intersection,
    },
}

impl WindowSource {
    pub fn absolute(start: f64, end: f64) -> Self {
        Self::Absolute { start, end }
    }

    pub fn document(from: f64, to: f64) -> Self {
        Self::Document { from, to }
    }

    /// Element window with the default `start start` -> `end end` edges.
    pub fn element(target: impl Into<String>) -> Self {
        Self::Element {
            target: target.into(),
            start: Intersection::START_START,
            end: Intersection::END_END,
        }
    }

    /// Element window from entering the viewport bottom to leaving through the top.
    pub fn element_passage(target: impl Into<String>) -> Self {
        Self::Element {
            target: target.into(),
            start: Intersection::START_END,
            end: Intersection::END_START,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        let finite = |vals: &[f64]| vals.iter().all(|v| v.is_finite());
        match self {
            Self::Absolute { start, end } => {
                if !finite(&[*start, *end]) {
                    return Err(MotionError::validation(
                        "absolute window bounds must be finite",
                    ));
                }
            }
            Self::Document { from, to } => {
                if !finite(&[*from, *to]) || *from < 0.0 || *to > 1.0 {
                    return Err(MotionError::validation(
                        "document window fractions must lie in [0, 1]",
                    ));
                }
            }
            Self::Element { target, start, end } => {
                if target.trim().is_empty() {
                    return Err(MotionError::validation(
                        "element window target must be non-empty",
                    ));
                }
                if !finite(&[start.element, start.viewport, end.element, end.viewport]) {
                    return Err(MotionError::validation(
                        "element window intersections must be finite",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Resolve against the current observation; `None` when it cannot be measured.
    pub fn resolve(
        &self,
        obs: &ScrollObservation,
        geometry: &dyn GeometrySource,
    ) -> Option<ProgressWindow> {
        match self {
            Self::Absolute { start, end } => Some(ProgressWindow::new(*start, *end)),
            Self::Document { from, to } => {
                let max = obs.max_scroll();
                if max <= 0.0 {
                    return None;
                }
                Some(ProgressWindow::new(from * max, to * max))
            }
            Self::Element { target, start, end } => {
                let rect = measured(geometry.rect(target))?;
                if rect.height() <= 0.0 {
                    return None;
                }
                let vh = obs.viewport_height;
                Some(ProgressWindow::new(
                    start.offset(rect.y0, rect.height(), vh),
                    end.offset(rect.y0, rect.height(), vh),
                ))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/window.rs"]
mod tests;
