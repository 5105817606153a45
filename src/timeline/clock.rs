use crate::foundation::core::{Fps, FrameIndex, FrameRange};

/// Fixed-rate frame counter for a composition of known length.
///
/// The clock holds no position of its own: a render loop pulls frames from
/// [`Clock::ticks`] and every consumer is handed the frame index explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clock {
    fps: Fps,
    duration: u64,
}

impl Clock {
    pub fn new(fps: Fps, duration_frames: u64) -> Self {
        Self {
            fps,
            duration: duration_frames,
        }
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn duration_frames(&self) -> u64 {
        self.duration
    }

    pub fn duration_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.duration)
    }

    pub fn range(&self) -> FrameRange {
        FrameRange::with_len(FrameIndex(0), self.duration)
    }

    /// Every frame of the composition, in increasing order.
    pub fn ticks(&self) -> impl Iterator<Item = FrameIndex> {
        self.range().iter()
    }

    /// Frame shown at `secs`, clamped to the last frame.
    pub fn frame_at_secs(&self, secs: f64) -> FrameIndex {
        let f = self.fps.secs_to_frames_floor(secs);
        FrameIndex(f.min(self.duration.saturating_sub(1)))
    }

    pub fn secs_at(&self, frame: FrameIndex) -> f64 {
        self.fps.frames_to_secs(frame.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clock.rs"]
mod tests;
