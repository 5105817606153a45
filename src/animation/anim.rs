use crate::{
    animation::ease::Ease,
    animation::interpolate::{InterpolateOpts, KeyframeSet},
    animation::spring::{SpringConfig, spring},
    foundation::core::{Fps, FrameIndex},
    foundation::error::{ReelError, ReelResult},
};

#[derive(Clone, Copy, Debug)]
/// Sampling context handed to animation sources.
///
/// It carries both the absolute timeline frame and the scene-relative frame so each
/// source can pick the space it animates in.
pub struct SampleCtx {
    /// Absolute frame on the composition timeline.
    pub frame: FrameIndex,
    /// Composition frame rate.
    pub fps: Fps,
    /// Frame relative to the owning scene or element start; negative before it.
    pub relative: i64,
}

impl SampleCtx {
    /// Same context shifted so that `by` frames later becomes relative frame 0.
    pub fn delayed(self, by: i64) -> Self {
        Self {
            relative: self.relative.saturating_sub(by),
            ..self
        }
    }
}

/// Serializable scalar animation source (opacity, offsets, scale).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anim {
    /// Fixed value.
    Constant(f64),
    /// Piecewise-linear keyframes over the relative frame.
    Keyframes {
        keys: KeyframeSet,
        #[serde(default)]
        opts: InterpolateOpts,
    },
    /// Spring from `from` to `to`, starting `delay` frames into the relative timeline.
    Spring {
        #[serde(default)]
        config: SpringConfig,
        #[serde(default)]
        delay: i64,
        #[serde(default)]
        from: f64,
        #[serde(default = "one")]
        to: f64,
    },
    /// `offset + amplitude * sin(rate * frame + phase)` over the global frame.
    Wave {
        amplitude: f64,
        /// Radians per frame.
        rate: f64,
        #[serde(default)]
        phase: f64,
        #[serde(default)]
        offset: f64,
    },
    /// `amplitude * sin(rate * relative)` while `0 <= relative < frames`, 0 otherwise.
    Shake {
        amplitude: f64,
        /// Radians per frame.
        rate: f64,
        frames: u64,
    },
    /// Inner animation with its relative clock shifted by `by` frames.
    Delay { inner: Box<Anim>, by: i64 },
    /// Smallest of the inner values; combines a fade-in with a fade-out.
    Min(Vec<Anim>),
}

fn one() -> f64 {
    1.0
}

impl Anim {
    /// `[start, start + len] -> [0, 1]`, held at 1 afterwards.
    pub fn fade_in(start: f64, len: f64) -> ReelResult<Self> {
        Self::ramp([start, start + len], [0.0, 1.0], InterpolateOpts::clamp_right())
    }

    /// Two-key ramp with explicit options.
    pub fn ramp(input: [f64; 2], output: [f64; 2], opts: InterpolateOpts) -> ReelResult<Self> {
        Ok(Self::Keyframes {
            keys: KeyframeSet::from_ranges(&input, &output)?,
            opts,
        })
    }

    /// Ramp with clamp-right and the given easing, the usual slide/settle shape.
    pub fn eased(input: [f64; 2], output: [f64; 2], ease: Ease) -> ReelResult<Self> {
        Self::ramp(input, output, InterpolateOpts::clamp_right().with_ease(ease))
    }

    pub fn spring(config: SpringConfig) -> Self {
        Self::Spring {
            config,
            delay: 0,
            from: 0.0,
            to: 1.0,
        }
    }

    pub fn delay(inner: Anim, by: i64) -> Self {
        Self::Delay {
            inner: Box::new(inner),
            by,
        }
    }

    /// Sample the value at `ctx`. Total for validated animations.
    pub fn sample(&self, ctx: SampleCtx) -> f64 {
        match self {
            Self::Constant(v) => *v,
            Self::Keyframes { keys, opts } => keys.sample(ctx.relative as f64, *opts),
            Self::Spring {
                config,
                delay,
                from,
                to,
            } => {
                let p = spring(ctx.relative.saturating_sub(*delay), ctx.fps, config);
                from + (to - from) * p
            }
            Self::Wave {
                amplitude,
                rate,
                phase,
                offset,
            } => offset + amplitude * (rate * ctx.frame.0 as f64 + phase).sin(),
            Self::Shake {
                amplitude,
                rate,
                frames,
            } => {
                let shaking = u64::try_from(ctx.relative).is_ok_and(|r| r < *frames);
                if shaking {
                    amplitude * (rate * ctx.relative as f64).sin()
                } else {
                    0.0
                }
            }
            Self::Delay { inner, by } => inner.sample(ctx.delayed(*by)),
            Self::Min(items) => items
                .iter()
                .map(|a| a.sample(ctx))
                .fold(f64::INFINITY, f64::min),
        }
    }

    /// Check static invariants not already enforced by construction.
    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Constant(v) => {
                if !v.is_finite() {
                    return Err(ReelError::animation("constant animation must be finite"));
                }
                Ok(())
            }
            Self::Keyframes { .. } => Ok(()),
            Self::Spring {
                config, from, to, ..
            } => {
                if !from.is_finite() || !to.is_finite() {
                    return Err(ReelError::animation("spring endpoints must be finite"));
                }
                config.validate()
            }
            Self::Wave {
                amplitude,
                rate,
                phase,
                offset,
            } => {
                if [amplitude, rate, phase, offset].iter().any(|v| !v.is_finite()) {
                    return Err(ReelError::animation("wave parameters must be finite"));
                }
                Ok(())
            }
            Self::Shake {
                amplitude, rate, ..
            } => {
                if !amplitude.is_finite() || !rate.is_finite() {
                    return Err(ReelError::animation("shake parameters must be finite"));
                }
                Ok(())
            }
            Self::Delay { inner, .. } => inner.validate(),
            Self::Min(items) => {
                if items.is_empty() {
                    return Err(ReelError::animation("min needs at least one animation"));
                }
                items.iter().try_for_each(Anim::validate)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
