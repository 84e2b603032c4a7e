use std::collections::BTreeSet;

use crate::{
    animation::track::PropertyTrack,
    foundation::core::{Point, Vec2},
    foundation::error::{MotionError, MotionResult},
    scroll::geometry::{GeometrySource, measured},
};

/// Largest integration step in seconds.
const MAX_STEP_S: f64 = 0.001;
/// Longer gaps are integrated as this much time; the spring has settled well before.
const MAX_SPAN_S: f64 = 10.0;

/// Damped spring parameters, in framer-motion units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 30.0,
            mass: 1.0,
        }
    }
}

impl SpringConfig {
    pub fn validate(&self) -> MotionResult<()> {
        let finite = [self.stiffness, self.damping, self.mass]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.stiffness <= 0.0 || self.damping < 0.0 || self.mass <= 0.0 {
            return Err(MotionError::validation(
                "spring needs finite stiffness > 0, damping >= 0 and mass > 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Spring {
    position: f64,
    velocity: f64,
}

impl Spring {
    fn step(&mut self, target: f64, cfg: &SpringConfig, dt_s: f64) {
        if dt_s <= 0.0 {
            return;
        }
        let span = dt_s.min(MAX_SPAN_S);
        let steps = (span / MAX_STEP_S).ceil().max(1.0) as usize;
        let h = span / steps as f64;
        for _ in 0..steps {
            let force = -cfg.stiffness * (self.position - target) - cfg.damping * self.velocity;
            self.velocity += force / cfg.mass * h;
            self.position += self.velocity * h;
        }
        if (self.position - target).abs() < 1e-4 && self.velocity.abs() < 1e-3 {
            self.position = target;
            self.velocity = 0.0;
        }
    }
}

fn default_max_deg() -> f64 {
    5.0
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TiltConfig {
    /// Geometry ids of the cards that tilt.
    pub targets: Vec<String>,
    #[serde(default = "default_max_deg")]
    pub max_deg: f64,
    #[serde(default)]
    pub spring: SpringConfig,
}

impl TiltConfig {
    pub fn new(targets: Vec<String>) -> Self {
        Self {
            targets,
            max_deg: default_max_deg(),
            spring: SpringConfig::default(),
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        if !self.max_deg.is_finite() || self.max_deg < 0.0 {
            return Err(MotionError::validation("tilt max_deg must be finite and >= 0"));
        }
        self.spring.validate()?;
        let mut seen = BTreeSet::new();
        for target in &self.targets {
            if target.trim().is_empty() {
                return Err(MotionError::validation("tilt target must be non-empty"));
            }
            if !seen.insert(target.as_str()) {
                return Err(MotionError::validation(format!(
                    "duplicate tilt target '{target}'"
                )));
            }
        }
        Ok(())
    }

    pub fn cards(&self) -> Vec<CardTilt> {
        self.targets
            .iter()
            .map(|t| CardTilt::new(t.clone(), self.max_deg, self.spring))
            .collect()
    }
}

/// Pointer-driven 3D tilt of one card.
///
/// The pointer's offset from the card centre, normalized to `[-0.5, 0.5]` per axis, is followed
/// by a spring on host ticks. Vertical offset drives `rotate_x`, horizontal drives `rotate_y`.
#[derive(Debug)]
pub struct CardTilt {
    target: String,
    spring: SpringConfig,
    rotate_x: PropertyTrack<f64>,
    rotate_y: PropertyTrack<f64>,
    aim: Vec2,
    x: Spring,
    y: Spring,
    last_ms: Option<f64>,
}

impl CardTilt {
    pub fn new(target: impl Into<String>, max_deg: f64, spring: SpringConfig) -> Self {
        Self {
            target: target.into(),
            spring,
            rotate_x: PropertyTrack::linear(max_deg, -max_deg),
            rotate_y: PropertyTrack::linear(-max_deg, max_deg),
            aim: Vec2::ZERO,
            x: Spring::default(),
            y: Spring::default(),
            last_ms: None,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Aim at `point` (document coordinates). Returns `false` if the card cannot be measured.
    pub fn pointer_move(&mut self, point: Point, geometry: &dyn GeometrySource) -> bool {
        let Some(rect) = measured(geometry.rect(&self.target)) else {
            return false;
        };
        if !point.x.is_finite()
            || !point.y.is_finite()
            || rect.width() <= 0.0
            || rect.height() <= 0.0
        {
            return false;
        }
        self.aim = Vec2::new(
            ((point.x - rect.x0) / rect.width() - 0.5).clamp(-0.5, 0.5),
            ((point.y - rect.y0) / rect.height() - 0.5).clamp(-0.5, 0.5),
        );
        true
    }

    /// Spring back to flat.
    pub fn pointer_leave(&mut self) {
        self.aim = Vec2::ZERO;
    }

    /// Integrate the springs up to host time `now_ms`.
    pub fn advance(&mut self, now_ms: f64) {
        let dt_s = self
            .last_ms
            .map_or(0.0, |last| (now_ms - last).max(0.0) / 1000.0);
        self.last_ms = Some(self.last_ms.map_or(now_ms, |last| last.max(now_ms)));
        self.x.step(self.aim.x, &self.spring, dt_s);
        self.y.step(self.aim.y, &self.spring, dt_s);
    }

    /// `(rotate_x_deg, rotate_y_deg)` for the current spring state.
    pub fn rotation(&self) -> (f64, f64) {
        (
            self.rotate_x.sample(self.y.position + 0.5),
            self.rotate_y.sample(self.x.position + 0.5),
        )
    }

    pub fn reset(&mut self) {
        self.aim = Vec2::ZERO;
        self.x = Spring::default();
        self.y = Spring::default();
        self.last_ms = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/tilt.rs"]
mod tests;
