//! Easing functions for animations
//!
//! Besides the classic ease-in/out families, easings can be written the way
//! animation libraries name them on the web: `"power3.out"`,
//! `"back.out(1.7)"`, `"cubic-bezier(0.4, 0, 0.2, 1)"`.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    /// Overshoots the target and settles back; the value is the overshoot strength
    BackOut(f32),
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// `power1.out` .. `power4.out`
    pub const POWER1_OUT: Easing = Easing::EaseOutQuad;
    pub const POWER2_OUT: Easing = Easing::EaseOutCubic;
    pub const POWER3_OUT: Easing = Easing::EaseOutQuart;
    pub const POWER4_OUT: Easing = Easing::EaseOutQuint;

    /// `back.out(1.7)`
    pub const BACK_OUT: Easing = Easing::BackOut(1.7);

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuart => t * t * t * t,
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::EaseInQuint => t.powi(5),
            Easing::EaseOutQuint => 1.0 - (1.0 - t).powi(5),
            Easing::EaseInOutQuint => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }
            Easing::BackOut(s) => {
                if t >= 1.0 {
                    return 1.0;
                }
                let p = t - 1.0;
                p * p * ((s + 1.0) * p + s) + 1.0
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }

    /// Whether the curve can leave the 0..=1 range
    pub fn overshoots(&self) -> bool {
        match self {
            Easing::BackOut(s) => *s > 0.0,
            Easing::CubicBezier(_, y1, _, y2) => !(0.0..=1.0).contains(y1) || !(0.0..=1.0).contains(y2),
            _ => false,
        }
    }
}

/// Error returned when an easing name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown easing: {0:?}")]
pub struct ParseEasingError(pub String);

impl FromStr for Easing {
    type Err = ParseEasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let err = || ParseEasingError(s.to_string());

        if let Some(args) = call_args(name, "cubic-bezier") {
            let values: Vec<f32> = args
                .split(',')
                .map(|v| v.trim().parse::<f32>())
                .collect::<Result<_, _>>()
                .map_err(|_| err())?;
            return match values.as_slice() {
                [x1, y1, x2, y2] => Ok(Easing::CubicBezier(*x1, *y1, *x2, *y2)),
                _ => Err(err()),
            };
        }

        if let Some(args) = call_args(name, "back.out") {
            let strength = args.trim().parse::<f32>().map_err(|_| err())?;
            return Ok(Easing::BackOut(strength));
        }

        let easing = match name {
            "linear" | "none" | "power0" | "power0.out" | "power0.in" | "power0.inOut" => {
                Easing::Linear
            }
            "ease-in" => Easing::EaseIn,
            "ease-out" => Easing::EaseOut,
            "ease-in-out" => Easing::EaseInOut,
            "power1.in" => Easing::EaseInQuad,
            "power1" | "power1.out" => Easing::EaseOutQuad,
            "power1.inOut" => Easing::EaseInOutQuad,
            "power2.in" => Easing::EaseInCubic,
            "power2" | "power2.out" => Easing::EaseOutCubic,
            "power2.inOut" => Easing::EaseInOutCubic,
            "power3.in" => Easing::EaseInQuart,
            "power3" | "power3.out" => Easing::EaseOutQuart,
            "power3.inOut" => Easing::EaseInOutQuart,
            "power4.in" => Easing::EaseInQuint,
            "power4" | "power4.out" => Easing::EaseOutQuint,
            "power4.inOut" => Easing::EaseInOutQuint,
            "back" | "back.out" => Easing::BACK_OUT,
            _ => return Err(err()),
        };
        Ok(easing)
    }
}

impl TryFrom<String> for Easing {
    type Error = ParseEasingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("linear"),
            Easing::EaseIn => f.write_str("ease-in"),
            Easing::EaseOut => f.write_str("ease-out"),
            Easing::EaseInOut => f.write_str("ease-in-out"),
            Easing::EaseInQuad => f.write_str("power1.in"),
            Easing::EaseOutQuad => f.write_str("power1.out"),
            Easing::EaseInOutQuad => f.write_str("power1.inOut"),
            Easing::EaseInCubic => f.write_str("power2.in"),
            Easing::EaseOutCubic => f.write_str("power2.out"),
            Easing::EaseInOutCubic => f.write_str("power2.inOut"),
            Easing::EaseInQuart => f.write_str("power3.in"),
            Easing::EaseOutQuart => f.write_str("power3.out"),
            Easing::EaseInOutQuart => f.write_str("power3.inOut"),
            Easing::EaseInQuint => f.write_str("power4.in"),
            Easing::EaseOutQuint => f.write_str("power4.out"),
            Easing::EaseInOutQuint => f.write_str("power4.inOut"),
            Easing::BackOut(s) => write!(f, "back.out({s})"),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

/// `name(args)` -> `args`
fn call_args<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    input
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// Cubic bezier easing, solved the way browsers evaluate `cubic-bezier()`.
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Endpoints are always exact
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let x1 = x1 as f64;
    let y1 = y1 as f64;
    let x2 = x2 as f64;
    let y2 = y2 as f64;

    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2) as f32
}

/// Evaluate cubic bezier at parameter t: B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}
