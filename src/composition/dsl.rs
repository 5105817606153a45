use crate::{
    chart::loss::{LossChartLayout, TrainingMetrics},
    composition::model::{
        BackgroundDef, CodeDef, CodeStatsDef, Composition, Element, LabelDef, LossChartDef, OverlayDef,
        SceneDef, StaggerDef, StatDef, TerminalDef,
    },
    foundation::core::{Canvas, Fps, FrameIndex},
    foundation::error::{ReelError, ReelResult},
    narration::{NarrationBinding, NarrationCue, NarrationTrack},
    timeline::scheduler::SceneWindow,
};

pub struct CompositionBuilder {
    fps: Fps,
    canvas: Canvas,
    duration: FrameIndex,
    scenes: Vec<SceneDef>,
    narration: NarrationTrack,
    background: Option<BackgroundDef>,
    metrics: Option<TrainingMetrics>,
}

impl CompositionBuilder {
    pub fn new(fps: Fps, canvas: Canvas, duration: FrameIndex) -> Self {
        Self {
            fps,
            canvas,
            duration,
            scenes: Vec::new(),
            narration: NarrationTrack::default(),
            background: None,
            metrics: None,
        }
    }

    pub fn scene(mut self, scene: SceneDef) -> Self {
        self.scenes.push(scene);
        self
    }

    pub fn background(mut self, background: BackgroundDef) -> Self {
        self.background = Some(background);
        self
    }

    pub fn metrics(mut self, metrics: TrainingMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn narration_enabled(mut self, enabled: bool) -> Self {
        self.narration.enabled = enabled;
        self
    }

    pub fn narration_dir(mut self, dir: impl Into<String>) -> Self {
        self.narration.asset_dir = dir.into();
        self
    }

    /// Play `cue` from the start of `scene`.
    pub fn narrate(mut self, scene: impl Into<String>, cue: NarrationCue) -> Self {
        self.narration.bindings.push(NarrationBinding {
            scene: scene.into(),
            cue,
        });
        self
    }

    pub fn build(self) -> ReelResult<Composition> {
        let comp = Composition {
            fps: self.fps,
            canvas: self.canvas,
            duration: self.duration,
            scenes: self.scenes,
            narration: self.narration,
            background: self.background,
            metrics: self.metrics,
        };
        comp.validate()?;
        Ok(comp)
    }
}

pub struct SceneBuilder {
    window: SceneWindow,
    elements: Vec<Element>,
}

impl SceneBuilder {
    pub fn new(name: impl Into<String>, start: u64, duration: u64) -> Self {
        Self {
            window: SceneWindow::new(name, start, duration),
            elements: Vec::new(),
        }
    }

    pub fn premount(mut self, frames: u64) -> Self {
        self.window.premount = frames;
        self
    }

    pub fn element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn label(self, label: LabelDef) -> Self {
        self.element(Element::Label(label))
    }

    pub fn overlay(self, overlay: OverlayDef) -> Self {
        self.element(Element::Overlay(overlay))
    }

    pub fn stat(
        self,
        label: impl Into<String>,
        value: impl Into<String>,
        start: u64,
        duration: u64,
    ) -> Self {
        self.element(Element::Stat(StatDef {
            label: label.into(),
            value: value.into(),
            start,
            duration,
            position: kurbo::Point::new(50.0, 50.0),
        }))
    }

    pub fn stagger<I, S>(self, lines: I, start: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.element(Element::Stagger(StaggerDef {
            lines: lines.into_iter().map(Into::into).collect(),
            start,
            every: 20,
        }))
    }

    pub fn terminal(self, terminal: TerminalDef) -> Self {
        self.element(Element::Terminal(terminal))
    }

    pub fn code(self, code: impl Into<String>, start: u64, highlight_lines: Vec<usize>) -> Self {
        self.element(Element::Code(CodeDef {
            code: code.into(),
            start,
            title: "model.py".to_string(),
            highlight_lines,
            scroll_speed: 0.0,
        }))
    }

    pub fn code_stats(self, start: u64, lines: u64, parameters: impl Into<String>) -> Self {
        self.element(Element::CodeStats(CodeStatsDef {
            start,
            lines,
            parameters: parameters.into(),
        }))
    }

    pub fn loss_chart(self, start: u64, duration: u64, layout: LossChartLayout) -> Self {
        self.element(Element::LossChart(LossChartDef {
            start,
            duration,
            layout,
        }))
    }

    pub fn build(self) -> ReelResult<SceneDef> {
        if self.window.name.trim().is_empty() {
            return Err(ReelError::validation("scene name must be non-empty"));
        }
        if self.window.duration == 0 {
            return Err(ReelError::validation(format!(
                "scene '{}' duration must be > 0",
                self.window.name
            )));
        }
        Ok(SceneDef {
            window: self.window,
            elements: self.elements,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
