use std::collections::BTreeSet;

use crate::{
    foundation::error::{MotionError, MotionResult},
    scroll::geometry::{GeometrySource, measured},
};

/// One navigable page section.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NavSection {
    /// Geometry id of the section content.
    pub id: String,
    pub label: String,
    /// Last known document offset of the section's top edge.
    #[serde(default)]
    pub offset_top: f64,
}

impl NavSection {
    pub fn new(id: impl Into<String>, label: impl Into<String>, offset_top: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            offset_top,
        }
    }
}

fn default_margin() -> f64 {
    100.0
}

fn default_group() -> String {
    "nav".to_owned()
}

fn default_item_prefix() -> String {
    "nav-".to_owned()
}

/// Navigation menu configuration. Sections are listed in document order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NavConfig {
    pub sections: Vec<NavSection>,
    /// A section activates once the scroll offset is within this many pixels of its top.
    #[serde(default = "default_margin")]
    pub margin: f64,
    /// Geometry id of the element containing the menu items.
    #[serde(default = "default_group")]
    pub group: String,
    /// Menu item geometry ids are `item_prefix + section id`.
    #[serde(default = "default_item_prefix")]
    pub item_prefix: String,
}

impl NavConfig {
    pub fn new(sections: Vec<NavSection>) -> Self {
        Self {
            sections,
            margin: default_margin(),
            group: default_group(),
            item_prefix: default_item_prefix(),
        }
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn item_id(&self, section_id: &str) -> String {
        format!("{}{section_id}", self.item_prefix)
    }

    pub fn validate(&self) -> MotionResult<()> {
        if !self.margin.is_finite() {
            return Err(MotionError::validation("nav margin must be finite"));
        }
        let mut seen = BTreeSet::new();
        for s in &self.sections {
            if s.id.is_empty() {
                return Err(MotionError::validation("nav section id must be non-empty"));
            }
            if !seen.insert(s.id.as_str()) {
                return Err(MotionError::validation(format!(
                    "duplicate nav section id '{}'",
                    s.id
                )));
            }
            if !s.offset_top.is_finite() {
                return Err(MotionError::validation(format!(
                    "nav section '{}' offset_top must be finite",
                    s.id
                )));
            }
        }
        Ok(())
    }
}

/// Scroll-derived and hover-derived highlight state for the navigation menu.
#[derive(Clone, Debug)]
pub struct NavTracker {
    config: NavConfig,
    active: Option<usize>,
    hovered: Option<usize>,
}

impl NavTracker {
    pub fn new(config: NavConfig) -> MotionResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            active: None,
            hovered: None,
        })
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn sections(&self) -> &[NavSection] {
        &self.config.sections
    }

    /// Re-read section offsets. Unmeasurable sections keep their previous offset.
    pub fn refresh_offsets(&mut self, geometry: &dyn GeometrySource) {
        for s in &mut self.config.sections {
            if let Some(r) = measured(geometry.rect(&s.id)) {
                s.offset_top = r.y0;
            }
        }
    }

    /// Recompute the active section for `offset`. Returns whether it changed.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        if !offset.is_finite() {
            return false;
        }
        let margin = self.config.margin;
        let next = self
            .config
            .sections
            .iter()
            .rposition(|s| s.offset_top - margin <= offset);
        let changed = next != self.active;
        if changed {
            tracing::debug!(
                from = ?self.active.map(|i| self.config.sections[i].id.as_str()),
                to = ?next.map(|i| self.config.sections[i].id.as_str()),
                offset,
                "active nav section changed"
            );
        }
        self.active = next;
        changed
    }

    /// Pointer entered the menu item for `id`. Unknown ids are ignored.
    pub fn hover_enter(&mut self, id: &str) -> bool {
        let Some(i) = self.index_of(id) else {
            return false;
        };
        let changed = self.hovered != Some(i);
        self.hovered = Some(i);
        changed
    }

    /// Pointer left the menu item for `id`.
    pub fn hover_leave(&mut self, id: &str) -> bool {
        if self.hovered.is_some() && self.hovered == self.index_of(id) {
            self.hovered = None;
            true
        } else {
            false
        }
    }

    pub fn active(&self) -> Option<&NavSection> {
        self.active.map(|i| &self.config.sections[i])
    }

    pub fn hovered(&self) -> Option<&NavSection> {
        self.hovered.map(|i| &self.config.sections[i])
    }

    /// Hover wins over scroll position.
    pub fn current_target(&self) -> Option<&NavSection> {
        self.hovered().or_else(|| self.active())
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.config.sections.iter().position(|s| s.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nav/tracker.rs"]
mod tests;
