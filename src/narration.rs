use crate::{
    foundation::core::FrameIndex,
    foundation::error::{ReelError, ReelResult},
    timeline::scheduler::Schedule,
};

/// Voice-over scripts for the nanoGPT short, in playback order.
const DEFAULT_CUES: &[(&str, &str)] = &[
    ("01-hook", "How does GPT actually work?"),
    (
        "02-what-is-llm",
        "At its core, an LLM is just a next-word predictor. Given 'To be or not to'... it predicts 'be'. That's it.",
    ),
    (
        "03-training",
        "But how does it learn? You show it text, it guesses the next word. Wrong guess? Adjust the weights slightly. Do this billions of times, and it gets really good at guessing.",
    ),
    (
        "04-architecture",
        "The secret sauce is attention. Each word looks at every other word to understand context. 'Queen' pays attention to 'king'. GPT-2 does this 36 times with 774 million parameters.",
    ),
    (
        "05-finetuning",
        "Fine-tuning means taking a model that already knows English and specializing it. We fed it Shakespeare.",
    ),
    ("06-h100", "H100 in the cloud. 20 steps. Two minutes."),
    (
        "07-loss",
        "Loss measures how wrong the predictions are. Watch it drop as the model learns. Lower is better.",
    ),
    (
        "08-generation",
        "Now let's generate some Shakespeare... Romeo says 'You're high.' And then... Lorius?",
    ),
    (
        "09-reveal",
        "Wait. Who is Lorius? Princeton? These characters don't exist in any Shakespeare play.",
    ),
    (
        "10-punchline",
        "The model learned the pattern. Character names in caps, poetic dialogue. And made up the rest. That's how LLMs work.",
    ),
    (
        "11-cta",
        "774 million parameters. 36 layers. 20 training steps. Link to nanoGPT in the comments.",
    ),
];

/// One narration clip and the script it is generated from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NarrationCue {
    pub id: String,
    pub text: String,
}

pub fn default_cues() -> Vec<NarrationCue> {
    DEFAULT_CUES
        .iter()
        .map(|(id, text)| NarrationCue {
            id: (*id).to_string(),
            text: (*text).to_string(),
        })
        .collect()
}

/// Starts `cue` when `scene` opens.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NarrationBinding {
    pub scene: String,
    pub cue: NarrationCue,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NarrationTrack {
    /// Audio nodes are emitted only when set; the visuals never depend on it.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_asset_dir")]
    pub asset_dir: String,
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub bindings: Vec<NarrationBinding>,
}

fn default_asset_dir() -> String {
    "audio".to_string()
}

fn default_volume() -> f64 {
    1.0
}

impl Default for NarrationTrack {
    fn default() -> Self {
        Self {
            enabled: false,
            asset_dir: default_asset_dir(),
            volume: default_volume(),
            bindings: Vec::new(),
        }
    }
}

/// Entry handed to an external speech generator.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ManifestEntry {
    pub id: String,
    pub text: String,
    pub path: String,
}

/// A cue that is playing at some frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlayingCue {
    pub id: String,
    pub path: String,
    /// Global frame the clip started on.
    pub from: FrameIndex,
    /// Frames elapsed since `from`.
    pub offset_frames: u64,
    pub volume: f64,
}

impl NarrationTrack {
    pub fn asset_path(&self, cue: &NarrationCue) -> String {
        format!("{}/{}.mp3", self.asset_dir.trim_end_matches('/'), cue.id)
    }

    pub fn manifest(&self) -> Vec<ManifestEntry> {
        self.bindings
            .iter()
            .map(|b| ManifestEntry {
                id: b.cue.id.clone(),
                text: b.cue.text.clone(),
                path: self.asset_path(&b.cue),
            })
            .collect()
    }

    pub fn validate(&self, schedule: &Schedule) -> ReelResult<()> {
        if !self.volume.is_finite() || !(0.0..=1.0).contains(&self.volume) {
            return Err(ReelError::validation("narration volume must be in [0, 1]"));
        }
        for b in &self.bindings {
            if b.cue.id.trim().is_empty() {
                return Err(ReelError::validation("narration cue id must be non-empty"));
            }
            if schedule.get(&b.scene).is_none() {
                return Err(ReelError::validation(format!(
                    "narration cue '{}' references missing scene '{}'",
                    b.cue.id, b.scene
                )));
            }
        }
        Ok(())
    }

    /// Cues playing at `frame`. A cue runs from its scene's start to the end of the
    /// composition, so several may overlap.
    pub fn playing(&self, schedule: &Schedule, frame: FrameIndex) -> Vec<PlayingCue> {
        if !self.enabled {
            return Vec::new();
        }
        self.bindings
            .iter()
            .filter_map(|b| {
                let from = schedule.get(&b.scene)?.start;
                (frame >= from).then(|| PlayingCue {
                    id: b.cue.id.clone(),
                    path: self.asset_path(&b.cue),
                    from,
                    offset_frames: frame.0 - from.0,
                    volume: self.volume,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/unit/narration.rs"]
mod tests;
