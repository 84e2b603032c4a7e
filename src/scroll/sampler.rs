use crate::{
    foundation::core::ScrollObservation,
    foundation::error::MotionResult,
    scroll::geometry::GeometrySource,
    scroll::window::{ProgressWindow, WindowSource},
};

/// Derives normalized progress for one section from scroll observations.
///
/// Stateless: the same observation and geometry always produce the same progress.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressSampler {
    source: WindowSource,
}

impl ProgressSampler {
    pub fn new(source: WindowSource) -> MotionResult<Self> {
        source.validate()?;
        Ok(Self { source })
    }

    pub fn source(&self) -> &WindowSource {
        &self.source
    }

    pub fn window(
        &self,
        obs: &ScrollObservation,
        geometry: &dyn GeometrySource,
    ) -> Option<ProgressWindow> {
        self.source.resolve(obs, geometry)
    }

    /// Progress in `[0, 1]`; 0 whenever the window cannot be measured.
    pub fn sample(&self, obs: &ScrollObservation, geometry: &dyn GeometrySource) -> f64 {
        match self.window(obs, geometry) {
            Some(w) => w.progress(obs.raw_offset),
            None => {
                tracing::trace!(source = ?self.source, "progress window unmeasurable");
                0.0
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/sampler.rs"]
mod tests;
