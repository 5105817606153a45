use std::collections::BTreeSet;

use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Named window on the global timeline during which a scene is shown.
pub struct SceneWindow {
    pub name: String,
    pub start: FrameIndex,
    /// Length of the window in frames (`> 0`).
    pub duration: u64,
    /// Frames before `start` during which the scene is evaluated but not shown.
    #[serde(default)]
    pub premount: u64,
}

/// How a scene relates to one global frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MountState {
    /// `global - start`; negative while pre-mounted.
    pub relative_frame: i64,
    /// `true` only inside `[start, start + duration)`.
    pub visible: bool,
}

impl SceneWindow {
    pub fn new(name: impl Into<String>, start: u64, duration: u64) -> Self {
        Self {
            name: name.into(),
            start: FrameIndex(start),
            duration,
            premount: 0,
        }
    }

    pub fn with_premount(mut self, frames: u64) -> Self {
        self.premount = frames;
        self
    }

    pub fn range(&self) -> FrameRange {
        FrameRange::with_len(self.start, self.duration)
    }

    pub fn end(&self) -> FrameIndex {
        self.range().end
    }

    /// Mount state at `frame`, or `None` when the scene is neither pre-mounted nor shown.
    pub fn mount_state(&self, frame: FrameIndex) -> Option<MountState> {
        let relative_frame = frame.relative_to(self.start);
        if relative_frame >= 0 {
            let visible = (relative_frame as u64) < self.duration;
            return visible.then_some(MountState {
                relative_frame,
                visible,
            });
        }
        let lead = relative_frame.unsigned_abs();
        (lead <= self.premount).then_some(MountState {
            relative_frame,
            visible: false,
        })
    }
}

/// A scene participating in one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveScene<'a> {
    /// Position in declaration order; the default painter order.
    pub index: usize,
    pub name: &'a str,
    pub relative_frame: i64,
    pub visible: bool,
}

/// Static table of scene windows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    windows: Vec<SceneWindow>,
}

impl Schedule {
    pub fn new(windows: Vec<SceneWindow>) -> ReelResult<Self> {
        let mut seen = BTreeSet::new();
        for w in &windows {
            if w.duration == 0 {
                return Err(ReelError::validation(format!(
                    "scene '{}' duration must be > 0",
                    w.name
                )));
            }
            if !seen.insert(w.name.as_str()) {
                return Err(ReelError::validation(format!(
                    "duplicate scene name '{}'",
                    w.name
                )));
            }
        }
        Ok(Self { windows })
    }

    pub fn windows(&self) -> &[SceneWindow] {
        &self.windows
    }

    pub fn get(&self, name: &str) -> Option<&SceneWindow> {
        self.windows.iter().find(|w| w.name == name)
    }

    /// First frame after every window has closed.
    pub fn end_frame(&self) -> FrameIndex {
        self.windows
            .iter()
            .map(SceneWindow::end)
            .max()
            .unwrap_or(FrameIndex(0))
    }

    /// Scenes visible at `frame`, in declaration order. Overlaps are layering.
    pub fn active_scenes(&self, frame: FrameIndex) -> Vec<ActiveScene<'_>> {
        self.mounted_scenes(frame)
            .into_iter()
            .filter(|s| s.visible)
            .collect()
    }

    /// Visible scenes plus those inside their pre-mount lead.
    pub fn mounted_scenes(&self, frame: FrameIndex) -> Vec<ActiveScene<'_>> {
        self.windows
            .iter()
            .enumerate()
            .filter_map(|(index, w)| {
                w.mount_state(frame).map(|m| ActiveScene {
                    index,
                    name: w.name.as_str(),
                    relative_frame: m.relative_frame,
                    visible: m.visible,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scheduler.rs"]
mod tests;
