use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::foundation::error::ShadowError;

/// Easing functions used to shape a shadow's falloff.
///
/// Identifiers follow the host's `"<family>-<flavor>"` naming, e.g. `"cubic-in"` or
/// `"sine-in-out"`; that string form is also the serde representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Quartic ease-in.
    InQuart,
    /// Quartic ease-out.
    OutQuart,
    /// Quartic ease-in/out.
    InOutQuart,
    /// Quintic ease-in.
    InQuint,
    /// Quintic ease-out.
    OutQuint,
    /// Quintic ease-in/out.
    InOutQuint,
    /// Sinusoidal ease-in.
    InSine,
    /// Sinusoidal ease-out.
    OutSine,
    /// Sinusoidal ease-in/out.
    InOutSine,
    /// Circular ease-in.
    InCirc,
    /// Circular ease-out.
    OutCirc,
    /// Circular ease-in/out.
    InOutCirc,
    /// Exponential ease-in.
    InExpo,
    /// Exponential ease-out.
    OutExpo,
    /// Exponential ease-in/out.
    InOutExpo,
}

impl Ease {
    /// Every supported easing, in declaration order.
    pub const ALL: [Ease; 22] = [
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::InQuart,
        Self::OutQuart,
        Self::InOutQuart,
        Self::InQuint,
        Self::OutQuint,
        Self::InOutQuint,
        Self::InSine,
        Self::OutSine,
        Self::InOutSine,
        Self::InCirc,
        Self::OutCirc,
        Self::InOutCirc,
        Self::InExpo,
        Self::OutExpo,
        Self::InOutExpo,
    ];

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t).powi(2),
            Self::InOutQuad => in_out_pow(t, 2),
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => in_out_pow(t, 3),
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => in_out_pow(t, 4),
            Self::InQuint => t.powi(5),
            Self::OutQuint => 1.0 - (1.0 - t).powi(5),
            Self::InOutQuint => in_out_pow(t, 5),
            Self::InSine => 1.0 - (t * PI / 2.0).cos(),
            Self::OutSine => (t * PI / 2.0).sin(),
            Self::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Self::InCirc => 1.0 - (1.0 - t * t).sqrt(),
            Self::OutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Self::InOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }
            Self::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * t - 10.0)
                }
            }
            Self::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::InOutExpo => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
        }
    }

    /// Host identifier for this easing.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "quadratic-in",
            Self::OutQuad => "quadratic-out",
            Self::InOutQuad => "quadratic-in-out",
            Self::InCubic => "cubic-in",
            Self::OutCubic => "cubic-out",
            Self::InOutCubic => "cubic-in-out",
            Self::InQuart => "quartic-in",
            Self::OutQuart => "quartic-out",
            Self::InOutQuart => "quartic-in-out",
            Self::InQuint => "quintic-in",
            Self::OutQuint => "quintic-out",
            Self::InOutQuint => "quintic-in-out",
            Self::InSine => "sine-in",
            Self::OutSine => "sine-out",
            Self::InOutSine => "sine-in-out",
            Self::InCirc => "circular-in",
            Self::OutCirc => "circular-out",
            Self::InOutCirc => "circular-in-out",
            Self::InExpo => "exponential-in",
            Self::OutExpo => "exponential-out",
            Self::InOutExpo => "exponential-in-out",
        }
    }
}

fn in_out_pow(t: f64, n: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ease {
    type Err = ShadowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|e| e.name() == key)
            .ok_or_else(|| ShadowError::config(format!("unknown easing \"{s}\"")))
    }
}

impl TryFrom<String> for Ease {
    type Error = ShadowError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.name().to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
