use crate::{
    animation::ease::Ease,
    foundation::error::{ReelError, ReelResult},
};

/// What happens to a value once the input leaves the keyframe range on one side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Continue the boundary segment's line without bound.
    #[default]
    Extend,
    /// Hold the boundary value.
    Clamp,
}

/// Options shared by [`interpolate`] and [`KeyframeSet::sample`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterpolateOpts {
    #[serde(default)]
    pub ease: Ease,
    #[serde(default)]
    pub left: Extrapolate,
    #[serde(default)]
    pub right: Extrapolate,
}

impl InterpolateOpts {
    /// Clamp both sides, linear easing.
    pub fn clamped() -> Self {
        Self {
            ease: Ease::Linear,
            left: Extrapolate::Clamp,
            right: Extrapolate::Clamp,
        }
    }

    /// Clamp only past the last key; the common "fade in and stay" shape.
    pub fn clamp_right() -> Self {
        Self {
            right: Extrapolate::Clamp,
            ..Self::default()
        }
    }

    /// Clamp only before the first key; the common "fade out" shape.
    pub fn clamp_left() -> Self {
        Self {
            left: Extrapolate::Clamp,
            ..Self::default()
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Map `x` through `input -> output` with the given edge policy and easing.
///
/// Easing shapes progress inside `[x0, x1]`; extending past either edge continues
/// linearly in normalized progress. A degenerate input range (`x0 == x1`) steps from
/// `y0` to `y1` at `x0`.
pub fn interpolate(x: f64, input: [f64; 2], output: [f64; 2], opts: InterpolateOpts) -> f64 {
    let [x0, x1] = input;
    let [y0, y1] = output;
    if x1 == x0 {
        return if x < x0 { y0 } else { y1 };
    }

    let t = (x - x0) / (x1 - x0);
    let shaped = if t < 0.0 {
        match opts.left {
            Extrapolate::Clamp => 0.0,
            Extrapolate::Extend => t,
        }
    } else if t > 1.0 {
        match opts.right {
            Extrapolate::Clamp => 1.0,
            Extrapolate::Extend => t,
        }
    } else {
        opts.ease.apply(t)
    };

    y0 + (y1 - y0) * shaped
}

/// One `(input, output)` pair.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Key {
    pub at: f64,
    pub value: f64,
}

/// Validated keyframe sequence with strictly increasing inputs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Key>", into = "Vec<Key>")]
pub struct KeyframeSet {
    keys: Vec<Key>,
}

impl KeyframeSet {
    pub fn new(keys: Vec<Key>) -> ReelResult<Self> {
        if keys.len() < 2 {
            return Err(ReelError::animation("keyframe set needs at least two keys"));
        }
        for k in &keys {
            if !k.at.is_finite() || !k.value.is_finite() {
                return Err(ReelError::animation("keyframe inputs and values must be finite"));
            }
        }
        if keys.windows(2).any(|w| w[0].at >= w[1].at) {
            return Err(ReelError::animation(
                "keyframe inputs must be strictly increasing",
            ));
        }
        Ok(Self { keys })
    }

    /// Build from parallel input/output slices (the usual `[a, b] -> [c, d]` form).
    pub fn from_ranges(input: &[f64], output: &[f64]) -> ReelResult<Self> {
        if input.len() != output.len() {
            return Err(ReelError::animation(format!(
                "input range has {} entries but output range has {}",
                input.len(),
                output.len()
            )));
        }
        Self::new(
            input
                .iter()
                .zip(output)
                .map(|(&at, &value)| Key { at, value })
                .collect(),
        )
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// First and last input.
    pub fn span(&self) -> (f64, f64) {
        (self.keys[0].at, self.keys[self.keys.len() - 1].at)
    }

    /// Sample at `x`. Edge policies only apply outside the first/last key.
    pub fn sample(&self, x: f64, opts: InterpolateOpts) -> f64 {
        let n = self.keys.len();
        // Index of the segment [i, i + 1] used for x; edges reuse the outer segments.
        let i = match self.keys.iter().position(|k| x < k.at) {
            Some(0) => 0,
            Some(p) => p - 1,
            None => n - 2,
        };
        let a = self.keys[i];
        let b = self.keys[i + 1];

        let seg_opts = InterpolateOpts {
            ease: opts.ease,
            left: if i == 0 { opts.left } else { Extrapolate::Clamp },
            right: if i + 2 == n {
                opts.right
            } else {
                Extrapolate::Clamp
            },
        };
        interpolate(x, [a.at, b.at], [a.value, b.value], seg_opts)
    }
}

impl TryFrom<Vec<Key>> for KeyframeSet {
    type Error = ReelError;

    fn try_from(value: Vec<Key>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<KeyframeSet> for Vec<Key> {
    fn from(value: KeyframeSet) -> Self {
        value.keys
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
