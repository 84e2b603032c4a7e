use std::collections::BTreeMap;

use crate::animation::track::{Lerp, PropertyTrack};

/// Animatable visual properties.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    Scale,
    TranslateX,
    TranslateY,
    /// Degrees, clockwise.
    Rotation,
}

impl Property {
    pub const ALL: [Self; 5] = [
        Self::Opacity,
        Self::Scale,
        Self::TranslateX,
        Self::TranslateY,
        Self::Rotation,
    ];

    /// Value used when no track drives the property.
    pub fn rest_value(self) -> f64 {
        match self {
            Self::Opacity | Self::Scale => 1.0,
            Self::TranslateX | Self::TranslateY | Self::Rotation => 0.0,
        }
    }
}

/// Computed style for one element on one tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleValues {
    pub opacity: f64,
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotation_deg: f64,
}

impl Default for StyleValues {
    fn default() -> Self {
        Self::REST
    }
}

impl StyleValues {
    pub const REST: Self = Self {
        opacity: 1.0,
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        rotation_deg: 0.0,
    };

    pub fn get(&self, prop: Property) -> f64 {
        match prop {
            Property::Opacity => self.opacity,
            Property::Scale => self.scale,
            Property::TranslateX => self.translate_x,
            Property::TranslateY => self.translate_y,
            Property::Rotation => self.rotation_deg,
        }
    }

    pub fn set(&mut self, prop: Property, value: f64) {
        match prop {
            Property::Opacity => self.opacity = value,
            Property::Scale => self.scale = value,
            Property::TranslateX => self.translate_x = value,
            Property::TranslateY => self.translate_y = value,
            Property::Rotation => self.rotation_deg = value,
        }
    }

    pub fn with(mut self, prop: Property, value: f64) -> Self {
        self.set(prop, value);
        self
    }
}

impl Lerp for StyleValues {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let mut out = *a;
        for prop in Property::ALL {
            out.set(prop, f64::lerp(&a.get(prop), &b.get(prop), t));
        }
        out
    }
}

/// Independent per-property tracks evaluated against one shared progress value.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TrackSet {
    tracks: BTreeMap<Property, PropertyTrack<f64>>,
}

impl TrackSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, prop: Property, track: PropertyTrack<f64>) -> Self {
        self.insert(prop, track);
        self
    }

    pub fn insert(&mut self, prop: Property, track: PropertyTrack<f64>) {
        self.tracks.insert(prop, track);
    }

    pub fn get(&self, prop: Property) -> Option<&PropertyTrack<f64>> {
        self.tracks.get(&prop)
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Sample every track at `progress`.
    ///
    /// A non-finite result only affects its own property, which falls back to its rest value.
    pub fn evaluate(&self, progress: f64) -> StyleValues {
        let mut out = StyleValues::REST;
        for (&prop, track) in &self.tracks {
            let v = track.sample(progress);
            if v.is_finite() {
                out.set(prop, v);
            } else {
                tracing::warn!(?prop, progress, "discarding non-finite track value");
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/style.rs"]
mod tests;
