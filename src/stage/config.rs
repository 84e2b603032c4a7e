use std::collections::BTreeSet;

use crate::{
    animation::reveal::{Reveal, Stagger},
    animation::style::{Property, TrackSet},
    effects::tilt::TiltConfig,
    effects::typewriter::TypewriterConfig,
    foundation::error::{MotionError, MotionResult},
    nav::header::HeaderConfig,
    nav::tracker::NavConfig,
    scatter::choreographer::ScatterConfig,
    scroll::viewport::InViewOptions,
    scroll::window::WindowSource,
};

/// A scroll-linked section: one window, many uncoupled property tracks.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionConfig {
    pub id: String,
    pub window: WindowSource,
    #[serde(default)]
    pub tracks: TrackSet,
}

impl SectionConfig {
    pub fn new(id: impl Into<String>, window: WindowSource, tracks: TrackSet) -> Self {
        Self {
            id: id.into(),
            window,
            tracks,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StaggerGroup {
    pub stagger: Stagger,
    pub count: usize,
}

/// Entrance animation played when `target` scrolls into view.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealBinding {
    pub target: String,
    pub reveal: Reveal,
    #[serde(default = "InViewOptions::once")]
    pub in_view: InViewOptions,
    /// Stagger the reveal over `count` children instead of animating the target itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<StaggerGroup>,
}

impl RevealBinding {
    pub fn new(target: impl Into<String>, reveal: Reveal, in_view: InViewOptions) -> Self {
        Self {
            target: target.into(),
            reveal,
            in_view,
            children: None,
        }
    }

    pub fn with_children(mut self, stagger: Stagger, count: usize) -> Self {
        self.children = Some(StaggerGroup { stagger, count });
        self
    }

    /// Reveals to play: one per child, or the target's own.
    pub fn reveals(&self) -> Vec<Reveal> {
        match self.children {
            Some(group) => (0..group.count)
                .map(|i| group.stagger.child(self.reveal, i))
                .collect(),
            None => vec![self.reveal],
        }
    }
}

/// Everything a page needs: scroll sections and the interactive components.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageConfig {
    /// Window for the whole-page progress indicator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<WindowSource>,
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav: Option<NavConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scatter: Option<ScatterConfig>,
    #[serde(default)]
    pub reveals: Vec<RevealBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typewriter: Option<TypewriterConfig>,
    /// Pointer tilt on project cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilt: Option<TiltConfig>,
    /// Fixed seed for glyph trajectories; system entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl PageConfig {
    /// Parse and validate.
    pub fn from_json(json: &str) -> MotionResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> MotionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> MotionResult<()> {
        if let Some(progress) = &self.progress {
            progress.validate()?;
        }

        let mut ids = BTreeSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(MotionError::validation("section id must be non-empty"));
            }
            if !ids.insert(section.id.as_str()) {
                return Err(MotionError::validation(format!(
                    "duplicate section id '{}'",
                    section.id
                )));
            }
            section.window.validate()?;
            for prop in Property::ALL {
                if let Some(track) = section.tracks.get(prop) {
                    track.validate().map_err(|e| {
                        MotionError::animation(format!(
                            "section '{}' track {prop:?}: {e}",
                            section.id
                        ))
                    })?;
                }
            }
        }

        if let Some(nav) = &self.nav {
            nav.validate()?;
        }
        if let Some(header) = &self.header {
            header.validate()?;
        }
        if let Some(scatter) = &self.scatter {
            scatter.validate()?;
        }
        for binding in &self.reveals {
            if binding.target.trim().is_empty() {
                return Err(MotionError::validation("reveal target must be non-empty"));
            }
            binding.reveal.validate()?;
            binding.in_view.validate()?;
            if let Some(group) = binding.children {
                let s = group.stagger;
                if !s.delay_children_s.is_finite()
                    || !s.stagger_children_s.is_finite()
                    || s.delay_children_s < 0.0
                    || s.stagger_children_s < 0.0
                {
                    return Err(MotionError::validation(format!(
                        "reveal '{}' stagger must be finite and >= 0",
                        binding.target
                    )));
                }
            }
        }
        if let Some(typewriter) = &self.typewriter {
            typewriter.validate()?;
        }
        if let Some(tilt) = &self.tilt {
            tilt.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/config.rs"]
mod tests;
