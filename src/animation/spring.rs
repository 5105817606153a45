use crate::{
    foundation::core::Fps,
    foundation::error::{ReelError, ReelResult},
};

/// Physical parameters of a damped spring released from 0 toward 1 at rest.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Cap the output at 1 instead of overshooting.
    #[serde(default)]
    pub overshoot_clamping: bool,
}

fn default_damping() -> f64 {
    10.0
}

fn default_stiffness() -> f64 {
    100.0
}

fn default_mass() -> f64 {
    1.0
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            stiffness: default_stiffness(),
            mass: default_mass(),
            overshoot_clamping: false,
        }
    }
}

/// Frames scanned by [`SpringConfig::settle_frames`] before giving up.
const SETTLE_SCAN_LIMIT: u64 = 100_000;

impl SpringConfig {
    pub fn new(damping: f64, stiffness: f64) -> Self {
        Self {
            damping,
            stiffness,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ReelResult<()> {
        for (name, v) in [
            ("damping", self.damping),
            ("stiffness", self.stiffness),
            ("mass", self.mass),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ReelError::animation(format!(
                    "spring {name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }

    /// Damping ratio; below 1 the spring overshoots.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    fn natural_freq(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Signed distance from the target (`x - 1`) at `secs`, plus an upper bound on its
    /// magnitude for all later times.
    fn displacement(&self, secs: f64) -> (f64, f64) {
        let w0 = self.natural_freq();
        let zeta = self.damping_ratio();
        if (zeta - 1.0).abs() < 1e-9 {
            let u = -(-w0 * secs).exp() * (1.0 + w0 * secs);
            (u, u.abs())
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * w0 * secs).exp();
            let k = zeta * w0 / wd;
            let u = -decay * ((wd * secs).cos() + k * (wd * secs).sin());
            (u, decay * (1.0 + k * k).sqrt())
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            let c1 = r2 / (r1 - r2);
            let c2 = -r1 / (r1 - r2);
            let u = c1 * (r1 * secs).exp() + c2 * (r2 * secs).exp();
            (u, u.abs())
        }
    }

    /// First frame from which the spring stays within `threshold` of its target, or
    /// `None` when it does not settle within the scan limit.
    pub fn settle_frames(&self, fps: Fps, threshold: f64) -> Option<u64> {
        let mut last_outside: Option<u64> = None;
        for f in 0..SETTLE_SCAN_LIMIT {
            let (u, bound) = self.displacement(fps.frames_to_secs(f));
            if u.abs() > threshold {
                last_outside = Some(f);
            }
            if bound <= threshold {
                return Some(last_outside.map_or(0, |l| l + 1));
            }
        }
        None
    }
}

/// Spring progress at a scene-relative frame. Frames before 0 stay at 0.
///
/// Closed-form damped oscillator; under-damped configs overshoot 1 and settle, critically
/// and over-damped configs approach 1 monotonically.
pub fn spring(relative_frame: i64, fps: Fps, config: &SpringConfig) -> f64 {
    if relative_frame <= 0 {
        return 0.0;
    }
    let (u, _) = config.displacement(fps.rel_frames_to_secs(relative_frame));
    let v = 1.0 + u;
    if config.overshoot_clamping {
        v.min(1.0)
    } else {
        v
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
