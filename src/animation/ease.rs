/// Easing functions used to shape progress between two keyframes.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out (GSAP `power2.out`).
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Ease {
    /// The site's default curve, `cubic-bezier(0.25, 0.1, 0.25, 1)`.
    pub const SLOW: Self = Self::bezier(0.25, 0.1, 0.25, 1.0);
    pub const SMOOTH: Self = Self::bezier(0.43, 0.13, 0.23, 0.96);
    /// Overshoots on both ends.
    pub const BOUNCE: Self = Self::bezier(0.68, -0.55, 0.265, 1.55);
    pub const OUT: Self = Self::bezier(0.0, 0.0, 0.2, 1.0);
    /// Material "standard" curve used by the hero columns.
    pub const STANDARD: Self = Self::bezier(0.4, 0.0, 0.2, 1.0);
    pub const POWER2_OUT: Self = Self::OutQuad;

    pub const fn bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::CubicBezier { x1, y1, x2, y2 }
    }

    /// Bezier control x coordinates must stay in `[0, 1]` for the curve to be a function of time.
    pub fn is_valid(self) -> bool {
        match self {
            Self::CubicBezier { x1, y1, x2, y2 } => {
                [x1, y1, x2, y2].iter().all(|v| v.is_finite())
                    && (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2)
            }
            _ => true,
        }
    }

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(t, x1, y1, x2, y2),
        }
    }
}

fn bezier_component(a1: f64, a2: f64, u: f64) -> f64 {
    let omu = 1.0 - u;
    3.0 * omu * omu * u * a1 + 3.0 * omu * u * u * a2 + u * u * u
}

fn bezier_slope(a1: f64, a2: f64, u: f64) -> f64 {
    let omu = 1.0 - u;
    3.0 * omu * omu * a1 + 6.0 * omu * u * (a2 - a1) + 3.0 * u * u * (1.0 - a2)
}

/// Solve `bx(u) = x` for the curve parameter, then return `by(u)`.
fn cubic_bezier(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Newton-Raphson first; falls through to bisection when the slope flattens out.
    let mut u = x;
    for _ in 0..8 {
        let err = bezier_component(x1, x2, u) - x;
        if err.abs() < 1e-7 {
            return bezier_component(y1, y2, u);
        }
        let d = bezier_slope(x1, x2, u);
        if d.abs() < 1e-6 {
            break;
        }
        u = (u - err / d).clamp(0.0, 1.0);
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    u = x;
    for _ in 0..40 {
        let bx = bezier_component(x1, x2, u);
        if (bx - x).abs() < 1e-7 {
            break;
        }
        if bx < x {
            lo = u;
        } else {
            hi = u;
        }
        u = 0.5 * (lo + hi);
    }
    bezier_component(y1, y2, u)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
