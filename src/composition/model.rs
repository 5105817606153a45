use kurbo::Point;

use crate::{
    animation::anim::Anim,
    chart::loss::{LossChartLayout, TrainingMetrics},
    foundation::core::{Canvas, Fps, FrameIndex, Rgba8},
    foundation::error::{ReelError, ReelResult},
    narration::NarrationTrack,
    text::reveal::{CURSOR_BLINK_FRAMES, CharRate, TypedLine},
    timeline::clock::Clock,
    timeline::scheduler::{SceneWindow, Schedule},
};

pub(crate) const GREEN: Rgba8 = Rgba8::rgb(0x00, 0xff, 0x00);
pub(crate) const CYAN: Rgba8 = Rgba8::rgb(0x00, 0xff, 0xff);

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Composition {
    pub fps: Fps,
    pub canvas: Canvas,
    pub duration: FrameIndex, // total frames
    pub scenes: Vec<SceneDef>,
    #[serde(default)]
    pub narration: NarrationTrack,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<TrainingMetrics>,
}

/// A scheduled scene and the elements drawn inside it. Element times are
/// scene-relative.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDef {
    #[serde(flatten)]
    pub window: SceneWindow,
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Full-frame backdrop: a flat base colour with a drifting radial glow.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BackgroundDef {
    pub base: Rgba8,
    pub glow: Rgba8,
    /// Glow centre as a percentage of canvas width.
    #[serde(default = "half")]
    pub center_x: f64,
    /// Glow centre as a percentage of canvas height, sampled per frame.
    pub center_y: Anim,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Label(LabelDef),
    Overlay(OverlayDef),
    Stat(StatDef),
    Stagger(StaggerDef),
    Terminal(TerminalDef),
    MultiTerminal(MultiTerminalDef),
    Code(CodeDef),
    CodeStats(CodeStatsDef),
    LossChart(LossChartDef),
}

/// Static text whose opacity, offsets and scale are free animations.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LabelDef {
    pub text: String,
    #[serde(default = "green")]
    pub color: Rgba8,
    #[serde(default = "label_size")]
    pub size: f64,
    #[serde(default = "opaque")]
    pub opacity: Anim,
    #[serde(default = "still")]
    pub offset_x: Anim,
    #[serde(default = "still")]
    pub offset_y: Anim,
    #[serde(default = "opaque")]
    pub scale: Anim,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayAnimation {
    #[default]
    Fade,
    Slide,
    Scale,
    Typewriter,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayPosition {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Caption shown for `duration` frames with a fade in/out and one entrance effect.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayDef {
    pub text: String,
    pub start: u64,
    #[serde(default = "overlay_duration")]
    pub duration: u64,
    #[serde(default)]
    pub animation: OverlayAnimation,
    #[serde(default)]
    pub position: OverlayPosition,
    #[serde(default = "green")]
    pub color: Rgba8,
    #[serde(default = "label_size")]
    pub size: f64,
    /// Characters per frame for [`OverlayAnimation::Typewriter`].
    #[serde(default = "typewriter_rate")]
    pub typewriter_rate: CharRate,
}

/// Label/value pair that springs in and fades out.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StatDef {
    pub label: String,
    pub value: String,
    pub start: u64,
    #[serde(default = "overlay_duration")]
    pub duration: u64,
    /// Centre in percent of the canvas.
    #[serde(default = "centre")]
    pub position: Point,
}

/// Lines that appear one after another, each rising into place.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StaggerDef {
    pub lines: Vec<String>,
    #[serde(default)]
    pub start: u64,
    /// Frames between consecutive lines.
    #[serde(default = "stagger_every")]
    pub every: u64,
}

/// Single typewriter terminal.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TerminalDef {
    pub text: String,
    #[serde(default)]
    pub start: u64,
    #[serde(default = "terminal_rate")]
    pub rate: CharRate,
    #[serde(default)]
    pub prefix: String,
    #[serde(default = "yes")]
    pub highlight_speakers: bool,
    #[serde(default = "blink_period")]
    pub blink_period: u64,
}

/// Terminal whose lines each start typing after their own delay.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MultiTerminalDef {
    pub lines: Vec<TypedLine>,
    #[serde(default)]
    pub start: u64,
    #[serde(default = "terminal_rate")]
    pub rate: CharRate,
    #[serde(default = "blink_period")]
    pub blink_period: u64,
}

/// Syntax-highlighted source listing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CodeDef {
    pub code: String,
    #[serde(default)]
    pub start: u64,
    #[serde(default = "code_title")]
    pub title: String,
    /// 1-based line numbers.
    #[serde(default)]
    pub highlight_lines: Vec<usize>,
    /// Pixels per frame; 0 disables scrolling.
    #[serde(default)]
    pub scroll_speed: f64,
}

/// Line counter that ticks up to `~lines` beside a fixed parameter count.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CodeStatsDef {
    #[serde(default)]
    pub start: u64,
    pub lines: u64,
    pub parameters: String,
}

/// Animated loss curve over [`Composition::metrics`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LossChartDef {
    #[serde(default)]
    pub start: u64,
    pub duration: u64,
    #[serde(default)]
    pub layout: LossChartLayout,
}

fn half() -> f64 {
    50.0
}

fn green() -> Rgba8 {
    GREEN
}

fn label_size() -> f64 {
    48.0
}

fn opaque() -> Anim {
    Anim::Constant(1.0)
}

fn still() -> Anim {
    Anim::Constant(0.0)
}

fn overlay_duration() -> u64 {
    90
}

fn centre() -> Point {
    Point::new(50.0, 50.0)
}

fn stagger_every() -> u64 {
    20
}

fn terminal_rate() -> CharRate {
    CharRate::HALF
}

fn typewriter_rate() -> CharRate {
    CharRate::exact(4, 5)
}

fn yes() -> bool {
    true
}

fn blink_period() -> u64 {
    CURSOR_BLINK_FRAMES
}

fn code_title() -> String {
    "model.py".to_string()
}

impl LabelDef {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: GREEN,
            size: label_size(),
            opacity: opaque(),
            offset_x: still(),
            offset_y: still(),
            scale: opaque(),
        }
    }
}

impl OverlayDef {
    pub fn new(text: impl Into<String>, start: u64, animation: OverlayAnimation) -> Self {
        Self {
            text: text.into(),
            start,
            duration: overlay_duration(),
            animation,
            position: OverlayPosition::default(),
            color: GREEN,
            size: label_size(),
            typewriter_rate: typewriter_rate(),
        }
    }
}

impl TerminalDef {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start: 0,
            rate: terminal_rate(),
            prefix: String::new(),
            highlight_speakers: true,
            blink_period: CURSOR_BLINK_FRAMES,
        }
    }
}

impl Element {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Label(_) => "label",
            Self::Overlay(_) => "overlay",
            Self::Stat(_) => "stat",
            Self::Stagger(_) => "stagger",
            Self::Terminal(_) => "terminal",
            Self::MultiTerminal(_) => "multi_terminal",
            Self::Code(_) => "code",
            Self::CodeStats(_) => "code_stats",
            Self::LossChart(_) => "loss_chart",
        }
    }

    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Label(l) => {
                check_size(l.size)?;
                l.opacity.validate()?;
                l.offset_x.validate()?;
                l.offset_y.validate()?;
                l.scale.validate()
            }
            Self::Overlay(o) => {
                check_size(o.size)?;
                if o.duration == 0 {
                    return Err(ReelError::validation("overlay duration must be > 0"));
                }
                Ok(())
            }
            Self::Stat(s) => {
                if s.duration == 0 {
                    return Err(ReelError::validation("stat duration must be > 0"));
                }
                Ok(())
            }
            Self::Stagger(s) => {
                if s.lines.is_empty() {
                    return Err(ReelError::validation("stagger needs at least one line"));
                }
                Ok(())
            }
            Self::Terminal(_) => Ok(()),
            Self::MultiTerminal(m) => {
                if m.lines.is_empty() {
                    return Err(ReelError::validation(
                        "multi-line terminal needs at least one line",
                    ));
                }
                Ok(())
            }
            Self::Code(c) => {
                if c.highlight_lines.contains(&0) {
                    return Err(ReelError::validation("highlight lines are 1-based"));
                }
                if !c.scroll_speed.is_finite() || c.scroll_speed < 0.0 {
                    return Err(ReelError::validation(
                        "scroll speed must be finite and >= 0",
                    ));
                }
                Ok(())
            }
            Self::CodeStats(c) => {
                if c.parameters.trim().is_empty() {
                    return Err(ReelError::validation("code stats need a parameter count"));
                }
                Ok(())
            }
            Self::LossChart(c) => {
                if c.duration == 0 {
                    return Err(ReelError::validation("loss chart duration must be > 0"));
                }
                if c.layout.plot_width() <= 0.0 || c.layout.plot_height() <= 0.0 {
                    return Err(ReelError::validation(
                        "loss chart padding leaves no room for the plot",
                    ));
                }
                Ok(())
            }
        }
    }
}

fn check_size(size: f64) -> ReelResult<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(ReelError::validation("text size must be finite and > 0"));
    }
    Ok(())
}

impl Composition {
    pub fn from_json(s: &str) -> ReelResult<Self> {
        let comp: Self = serde_json::from_str(s)?;
        comp.validate()?;
        Ok(comp)
    }

    pub fn clock(&self) -> Clock {
        Clock::new(self.fps, self.duration.0)
    }

    pub fn schedule(&self) -> ReelResult<Schedule> {
        Schedule::new(self.scenes.iter().map(|s| s.window.clone()).collect())
    }

    pub fn scene(&self, name: &str) -> Option<&SceneDef> {
        self.scenes.iter().find(|s| s.window.name == name)
    }

    pub fn validate(&self) -> ReelResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(ReelError::validation("fps must have num>0 and den>0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        if self.duration.0 == 0 {
            return Err(ReelError::validation("duration must be > 0 frames"));
        }

        let schedule = self.schedule()?;
        for scene in &self.scenes {
            if scene.window.end().0 > self.duration.0 {
                return Err(ReelError::validation(format!(
                    "scene '{}' ends after the composition",
                    scene.window.name
                )));
            }
            for el in &scene.elements {
                el.validate().map_err(|e| {
                    ReelError::validation(format!(
                        "scene '{}' {}: {e}",
                        scene.window.name,
                        el.kind()
                    ))
                })?;
                if matches!(el, Element::LossChart(_)) && self.metrics.is_none() {
                    return Err(ReelError::validation(format!(
                        "scene '{}' draws a loss chart but the composition has no metrics",
                        scene.window.name
                    )));
                }
            }
        }

        self.narration.validate(&schedule)?;
        if let Some(m) = &self.metrics {
            m.validate()?;
        }
        if let Some(bg) = &self.background {
            bg.center_y.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
