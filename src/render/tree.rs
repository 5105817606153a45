use kurbo::Point;

use crate::{
    chart::loss::AxisTick,
    foundation::core::{Canvas, FrameIndex, Rgba8, Transform2D},
    narration::PlayingCue,
    text::highlight::TokenKind,
};

/// Everything a host draws for one frame, back to front.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct VisualTree {
    pub frame: FrameIndex,
    pub canvas: Canvas,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundNode>,
    /// Visible scenes in declaration order.
    pub scenes: Vec<SceneNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub audio: Vec<PlayingCue>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BackgroundNode {
    pub base: Rgba8,
    pub glow: Rgba8,
    /// Glow centre in percent of the canvas.
    pub glow_center: Point,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneNode {
    pub name: String,
    pub index: usize,
    pub relative_frame: i64,
    pub nodes: Vec<VisualNode>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisualNode {
    Text(TextNode),
    Group(GroupNode),
    Terminal(TerminalNode),
    Code(CodeNode),
    Chart(ChartNode),
}

/// Run of text in one style.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Span {
    pub text: String,
    pub color: Rgba8,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
}

impl Span {
    pub fn new(text: impl Into<String>, color: Rgba8) -> Self {
        Self {
            text: text.into(),
            color,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextNode {
    pub text: String,
    pub color: Rgba8,
    pub size: f64,
    pub opacity: f64,
    pub transform: Transform2D,
}

/// Children share the group's opacity and transform.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GroupNode {
    /// Anchor in percent of the canvas, if the group is positioned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Point>,
    pub opacity: f64,
    pub transform: Transform2D,
    pub children: Vec<VisualNode>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TerminalNode {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    pub lines: Vec<TerminalLine>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TerminalLine {
    pub spans: Vec<Span>,
    /// Cursor opacity when a cursor sits at the end of this line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CodeToken {
    pub text: String,
    pub kind: TokenKind,
    pub color: Rgba8,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CodeLine {
    /// 1-based.
    pub number: usize,
    /// Highlight strength in `[0, 1]`; 0 for ordinary lines.
    pub highlight: f64,
    pub tokens: Vec<CodeToken>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CodeNode {
    pub title: String,
    pub opacity: f64,
    pub scroll_offset: f64,
    pub lines: Vec<CodeLine>,
}

/// Loss chart with paths in plot-local SVG path syntax.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ChartNode {
    pub width: f64,
    pub height: f64,
    /// Offset of the plot area inside the chart.
    pub plot_origin: Point,
    pub progress: f64,
    pub train_path: String,
    pub val_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Point>,
    pub current_loss: f64,
    /// `current_loss` with three decimals.
    pub current_loss_label: String,
    pub y_ticks: Vec<AxisTick>,
    pub x_ticks: Vec<AxisTick>,
}

impl VisualTree {
    pub fn scene(&self, name: &str) -> Option<&SceneNode> {
        self.scenes.iter().find(|s| s.name == name)
    }

    pub fn node_count(&self) -> usize {
        fn count(n: &VisualNode) -> usize {
            match n {
                VisualNode::Group(g) => 1 + g.children.iter().map(count).sum::<usize>(),
                _ => 1,
            }
        }
        self.scenes
            .iter()
            .flat_map(|s| s.nodes.iter())
            .map(count)
            .sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/tree.rs"]
mod tests;
