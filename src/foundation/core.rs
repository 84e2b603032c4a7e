use crate::foundation::error::{MotionError, MotionResult};
use crate::foundation::math::clamp01;

pub use kurbo::{Point, Rect, Vec2};

/// One scroll notification from the host, in CSS pixels.
///
/// Regenerated on every scroll/animation-frame tick and discarded after driving outputs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollObservation {
    /// Vertical document scroll offset (`window.scrollY`).
    pub raw_offset: f64,
    /// Height of the visible viewport.
    pub viewport_height: f64,
    /// Full scrollable document height.
    pub document_height: f64,
}

impl ScrollObservation {
    pub fn new(raw_offset: f64, viewport_height: f64, document_height: f64) -> Self {
        Self {
            raw_offset,
            viewport_height,
            document_height,
        }
    }

    /// Reject observations a host should never produce (negative or non-finite sizes).
    pub fn validate(self) -> MotionResult<()> {
        for (name, v) in [
            ("raw_offset", self.raw_offset),
            ("viewport_height", self.viewport_height),
            ("document_height", self.document_height),
        ] {
            if !v.is_finite() {
                return Err(MotionError::validation(format!(
                    "scroll observation {name} must be finite"
                )));
            }
        }
        if self.viewport_height < 0.0 || self.document_height < 0.0 {
            return Err(MotionError::validation(
                "scroll observation heights must be >= 0",
            ));
        }
        Ok(())
    }

    /// Largest reachable scroll offset. Zero for short or unmeasured documents.
    pub fn max_scroll(self) -> f64 {
        let m = self.document_height - self.viewport_height;
        if m.is_finite() { m.max(0.0) } else { 0.0 }
    }

    /// Whole-document progress in `[0, 1]`; 0 when nothing can scroll.
    pub fn document_progress(self) -> f64 {
        let max = self.max_scroll();
        if max <= 0.0 {
            return 0.0;
        }
        clamp01(self.raw_offset / max)
    }

    /// Document-space vertical span `(top, bottom)` covered by the viewport.
    pub fn viewport_span(self) -> (f64, f64) {
        (self.raw_offset, self.raw_offset + self.viewport_height.max(0.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
