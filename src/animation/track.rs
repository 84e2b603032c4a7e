use serde::{Deserialize, Serialize};

use crate::{
    animation::ease::Ease,
    foundation::core::Vec2,
    foundation::error::{MotionError, MotionResult},
    foundation::math::{EPSILON, lerp},
};

/// Interpolation contract for animatable value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        lerp(*a, *b, t)
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        lerp(f64::from(*a), f64::from(*b), t) as f32
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
    }
}

/// One `(progress, value)` anchor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    /// Position in the owning window, in `[0, 1]`.
    pub progress: f64,
    pub value: T,
    /// Easing applied toward the next keyframe.
    #[serde(default)]
    pub ease: Ease,
}

impl<T> Keyframe<T> {
    pub fn new(progress: f64, value: T) -> Self {
        Self {
            progress,
            value,
            ease: Ease::Linear,
        }
    }
}

/// Ordered keyframes for one animatable property.
///
/// Construction guarantees at least two keys with finite, strictly increasing progress, so
/// sampling never has to fail.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PropertyTrack<T> {
    keys: Vec<Keyframe<T>>,
}

impl<T> PropertyTrack<T>
where
    T: Lerp + Clone,
{
    pub fn new(keys: Vec<Keyframe<T>>) -> MotionResult<Self> {
        let track = Self { keys };
        track.validate()?;
        Ok(track)
    }

    /// Build from parallel input/output ranges, e.g. `[0.08, 0.14] -> [40.0, 0.0]`.
    pub fn from_pairs(inputs: &[f64], outputs: &[T]) -> MotionResult<Self> {
        if inputs.len() != outputs.len() {
            return Err(MotionError::animation(format!(
                "track input/output length mismatch ({} vs {})",
                inputs.len(),
                outputs.len()
            )));
        }
        Self::new(
            inputs
                .iter()
                .zip(outputs)
                .map(|(&p, v)| Keyframe::new(p, v.clone()))
                .collect(),
        )
    }

    /// Two-key track spanning the whole window.
    pub fn linear(from: T, to: T) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, from), Keyframe::new(1.0, to)],
        }
    }

    /// Use `ease` on every segment.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        for k in &mut self.keys {
            k.ease = ease;
        }
        self
    }

    pub fn keys(&self) -> &[Keyframe<T>] {
        &self.keys
    }

    pub fn validate(&self) -> MotionResult<()> {
        if self.keys.len() < 2 {
            return Err(MotionError::animation(
                "property track needs at least two keyframes",
            ));
        }
        if let Some(k) = self
            .keys
            .iter()
            .find(|k| !(0.0..=1.0).contains(&k.progress))
        {
            return Err(MotionError::animation(format!(
                "keyframe progress must lie in [0, 1] (got {})",
                k.progress
            )));
        }
        if !self.keys.windows(2).all(|w| w[0].progress < w[1].progress) {
            return Err(MotionError::animation(
                "keyframe progress must be strictly increasing",
            ));
        }
        if let Some(k) = self.keys.iter().find(|k| !k.ease.is_valid()) {
            return Err(MotionError::animation(format!(
                "invalid easing {:?} at progress {}",
                k.ease, k.progress
            )));
        }
        Ok(())
    }

    /// Value at `progress`, clamped to the boundary keys outside the track's range.
    pub fn sample(&self, progress: f64) -> T {
        debug_assert!(
            self.keys.windows(2).all(|w| w[0].progress < w[1].progress),
            "keyframes out of order"
        );
        let first = &self.keys[0];
        if progress.is_nan() {
            return first.value.clone();
        }

        let idx = self.keys.partition_point(|k| k.progress <= progress);
        if idx == 0 {
            return first.value.clone();
        }
        if idx >= self.keys.len() {
            return self.keys[self.keys.len() - 1].value.clone();
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.progress - a.progress;
        if denom < EPSILON {
            return a.value.clone();
        }
        let t = (progress - a.progress) / denom;
        T::lerp(&a.value, &b.value, a.ease.apply(t))
    }
}

impl<'de, T> Deserialize<'de> for PropertyTrack<T>
where
    T: Deserialize<'de> + Lerp + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Keys(Vec<Keyframe<T>>),
            Pairs(Vec<(f64, T)>),
            Ranges {
                input: Vec<f64>,
                output: Vec<T>,
                #[serde(default)]
                ease: Option<Ease>,
            },
        }

        let track = match Repr::deserialize(deserializer)? {
            Repr::Keys(keys) => Self::new(keys),
            Repr::Pairs(pairs) => Self::new(
                pairs
                    .into_iter()
                    .map(|(p, v)| Keyframe::new(p, v))
                    .collect(),
            ),
            Repr::Ranges {
                input,
                output,
                ease,
            } => Self::from_pairs(&input, &output).and_then(|t| match ease {
                Some(e) => {
                    let t = t.with_ease(e);
                    t.validate()?;
                    Ok(t)
                }
                None => Ok(t),
            }),
        };
        track.map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/track.rs"]
mod tests;
