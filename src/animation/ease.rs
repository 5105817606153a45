/// Base curve shapes. Each is an ease-in map `[0, 1] -> [0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    /// `t^2`.
    Quad,
    /// `t^3`.
    Cubic,
    /// `t^4`.
    Quart,
    /// Quarter sine wave.
    Sine,
    /// Quarter circle.
    Circle,
    /// Exponential, pinned to exactly 0 at `t = 0`.
    Expo,
}

impl Curve {
    fn ease_in(self, t: f64) -> f64 {
        match self {
            Self::Quad => t * t,
            Self::Cubic => t * t * t,
            Self::Quart => t * t * t * t,
            Self::Sine => 1.0 - (t * std::f64::consts::FRAC_PI_2).cos(),
            Self::Circle => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Self::Expo => {
                if t <= 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * (t - 1.0))
                }
            }
        }
    }
}

/// Easing applied to normalized interpolation progress.
///
/// `In` runs the curve forward, `Out` mirrors it (fast start, slow finish) and `InOut`
/// joins both halves at `t = 0.5`. Every variant is monotonic with `apply(0) == 0` and
/// `apply(1) == 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    In(Curve),
    Out(Curve),
    InOut(Curve),
}

impl Ease {
    /// Apply this easing to `t`; input is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let v = match self {
            Self::Linear => t,
            Self::In(c) => c.ease_in(t),
            Self::Out(c) => 1.0 - c.ease_in(1.0 - t),
            Self::InOut(c) => {
                if t < 0.5 {
                    c.ease_in(t * 2.0) / 2.0
                } else {
                    1.0 - c.ease_in((1.0 - t) * 2.0) / 2.0
                }
            }
        };
        // Trig and powf curves miss the endpoints by an ulp.
        if t <= 0.0 {
            0.0
        } else if t >= 1.0 {
            1.0
        } else {
            v
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
