use kurbo::{Point, Vec2};

use crate::{
    animation::anim::SampleCtx,
    animation::ease::{Curve, Ease},
    animation::interpolate::{InterpolateOpts, interpolate},
    animation::spring::{SpringConfig, spring},
    chart::loss::{TrainingMetrics, chart_frame},
    composition::model::{
        CYAN, CodeDef, CodeStatsDef, Element, GREEN, LabelDef, LossChartDef, MultiTerminalDef,
        OverlayAnimation, OverlayDef, OverlayPosition, StaggerDef, StatDef, TerminalDef,
    },
    foundation::core::{Canvas, Fps, FrameIndex, Transform2D},
    foundation::error::{ReelError, ReelResult},
    render::tree::{
        ChartNode, CodeLine, CodeNode, CodeToken, GroupNode, Span, TerminalLine, TerminalNode,
        TextNode, VisualNode,
    },
    text::highlight::highlight_block,
    text::reveal::{cursor_opacity, reveal, reveal_lines},
    text::speaker::{LabelMode, RevealedLine, classify_revealed, split_speaker},
};

/// Frames over which overlays fade in and out.
const FADE_FRAMES: f64 = 15.0;
/// Pixel distance of overlay anchors from the top/bottom edge.
const EDGE_INSET_PX: f64 = 100.0;

/// Inputs shared by every element of one scene at one frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ElementCtx<'a> {
    pub frame: FrameIndex,
    pub fps: Fps,
    pub canvas: Canvas,
    /// Scene-relative frame.
    pub relative: i64,
    pub metrics: Option<&'a TrainingMetrics>,
}

impl ElementCtx<'_> {
    /// Frame relative to an element that starts `start` frames into the scene.
    fn local(&self, start: u64) -> i64 {
        self.relative
            .saturating_sub(i64::try_from(start).unwrap_or(i64::MAX))
    }

    fn sample_ctx(&self) -> SampleCtx {
        SampleCtx {
            frame: self.frame,
            fps: self.fps,
            relative: self.relative,
        }
    }
}

/// Evaluate one element. `None` means nothing is drawn this frame.
pub(crate) fn eval_element(el: &Element, ctx: &ElementCtx<'_>) -> ReelResult<Option<VisualNode>> {
    Ok(match el {
        Element::Label(l) => Some(eval_label(l, ctx)),
        Element::Overlay(o) => eval_overlay(o, ctx),
        Element::Stat(s) => eval_stat(s, ctx),
        Element::Stagger(s) => eval_stagger(s, ctx),
        Element::Terminal(t) => Some(eval_terminal(t, ctx)),
        Element::MultiTerminal(m) => Some(eval_multi_terminal(m, ctx)),
        Element::Code(c) => Some(eval_code(c, ctx)),
        Element::CodeStats(c) => Some(eval_code_stats(c, ctx)),
        Element::LossChart(c) => Some(eval_chart(c, ctx)?),
    })
}

fn unit(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

fn eval_label(l: &LabelDef, ctx: &ElementCtx<'_>) -> VisualNode {
    let sc = ctx.sample_ctx();
    VisualNode::Text(TextNode {
        text: l.text.clone(),
        color: l.color,
        size: l.size,
        opacity: unit(l.opacity.sample(sc)),
        transform: Transform2D {
            translate: Vec2::new(l.offset_x.sample(sc), l.offset_y.sample(sc)),
            scale: l.scale.sample(sc),
        },
    })
}

/// `min(fade in over [0, 15], fade out over [d - 15, d])`.
fn fade_in_out(rel: f64, duration: f64) -> f64 {
    let fade_in = interpolate(rel, [0.0, FADE_FRAMES], [0.0, 1.0], InterpolateOpts::clamp_right());
    fade_out(rel, duration).min(fade_in)
}

fn fade_out(rel: f64, duration: f64) -> f64 {
    interpolate(
        rel,
        [duration - FADE_FRAMES, duration],
        [1.0, 0.0],
        InterpolateOpts::clamp_left(),
    )
}

/// Shown while `0 <= rel <= duration`; the last frame is inclusive.
fn window_rel(rel: i64, duration: u64) -> Option<f64> {
    (rel >= 0 && rel.unsigned_abs() <= duration).then_some(rel as f64)
}

fn eval_overlay(o: &OverlayDef, ctx: &ElementCtx<'_>) -> Option<VisualNode> {
    let local = ctx.local(o.start);
    let rel = window_rel(local, o.duration)?;

    let mut transform = Transform2D::default();
    let mut text = o.text.as_str();
    match o.animation {
        OverlayAnimation::Fade => {}
        OverlayAnimation::Slide => {
            transform.translate.y = interpolate(
                rel,
                [0.0, 20.0],
                [50.0, 0.0],
                InterpolateOpts::clamp_right().with_ease(Ease::Out(Curve::Cubic)),
            );
        }
        OverlayAnimation::Scale => {
            transform.scale = spring(local, ctx.fps, &SpringConfig::new(15.0, 100.0));
        }
        OverlayAnimation::Typewriter => {
            text = reveal(&o.text, local, o.typewriter_rate).visible;
        }
    }

    let inset = EDGE_INSET_PX / f64::from(ctx.canvas.height) * 100.0;
    let anchor_y = match o.position {
        OverlayPosition::Top => inset,
        OverlayPosition::Center => 50.0,
        OverlayPosition::Bottom => 100.0 - inset,
    };

    Some(VisualNode::Group(GroupNode {
        anchor: Some(Point::new(50.0, anchor_y)),
        opacity: unit(fade_in_out(rel, o.duration as f64)),
        transform,
        children: vec![VisualNode::Text(TextNode {
            text: text.to_string(),
            color: o.color,
            size: o.size,
            opacity: 1.0,
            transform: Transform2D::default(),
        })],
    }))
}

fn eval_stat(s: &StatDef, ctx: &ElementCtx<'_>) -> Option<VisualNode> {
    let local = ctx.local(s.start);
    let rel = window_rel(local, s.duration)?;
    let scale = spring(local, ctx.fps, &SpringConfig::new(12.0, 100.0));

    let text = |t: &str, color, size| {
        VisualNode::Text(TextNode {
            text: t.to_string(),
            color,
            size,
            opacity: 1.0,
            transform: Transform2D::default(),
        })
    };
    Some(VisualNode::Group(GroupNode {
        anchor: Some(s.position),
        opacity: unit(fade_out(rel, s.duration as f64)),
        transform: Transform2D::scale(scale),
        children: vec![
            text(&s.label.to_uppercase(), CYAN, 24.0),
            text(&s.value, GREEN, 64.0),
        ],
    }))
}

fn eval_stagger(s: &StaggerDef, ctx: &ElementCtx<'_>) -> Option<VisualNode> {
    let rel = ctx.local(s.start);
    if rel < 0 {
        return None;
    }
    let every = i64::try_from(s.every).unwrap_or(i64::MAX);
    let children = s
        .lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let delay = every.saturating_mul(i64::try_from(i).ok()?);
            let line_rel = rel - delay;
            if line_rel < 0 {
                return None;
            }
            let t = line_rel as f64;
            let opacity = interpolate(t, [0.0, 10.0], [0.0, 1.0], InterpolateOpts::clamp_right());
            let y = interpolate(
                t,
                [0.0, 15.0],
                [30.0, 0.0],
                InterpolateOpts::clamp_right().with_ease(Ease::Out(Curve::Cubic)),
            );
            let (color, size) = if i == 0 { (GREEN, 52.0) } else { (CYAN, 40.0) };
            Some(VisualNode::Text(TextNode {
                text: line.clone(),
                color,
                size,
                opacity: unit(opacity),
                transform: Transform2D::translate_y(y),
            }))
        })
        .collect();

    Some(VisualNode::Group(GroupNode {
        anchor: Some(Point::new(50.0, 50.0)),
        opacity: 1.0,
        transform: Transform2D::default(),
        children,
    }))
}

fn speaker_spans(line: RevealedLine<'_>) -> Vec<Span> {
    match line {
        RevealedLine::Speaker { label, body } => vec![
            Span::new(format!("{label}:"), CYAN).bold(),
            Span::new(body, GREEN),
        ],
        RevealedLine::Plain("") => Vec::new(),
        RevealedLine::Plain(text) => vec![Span::new(text, GREEN)],
    }
}

fn eval_terminal(t: &TerminalDef, ctx: &ElementCtx<'_>) -> VisualNode {
    let r = reveal(&t.text, ctx.local(t.start), t.rate);
    let mut lines: Vec<TerminalLine> = if t.highlight_speakers {
        classify_revealed(r.visible, LabelMode::PerLine)
            .into_iter()
            .map(|l| TerminalLine {
                spans: speaker_spans(l),
                cursor: None,
            })
            .collect()
    } else {
        r.visible
            .split('\n')
            .map(|l| TerminalLine {
                spans: speaker_spans(RevealedLine::Plain(l)),
                cursor: None,
            })
            .collect()
    };
    if r.shows_cursor()
        && let Some(last) = lines.last_mut()
    {
        last.cursor = Some(cursor_opacity(ctx.frame, t.blink_period));
    }
    VisualNode::Terminal(TerminalNode {
        prefix: t.prefix.clone(),
        lines,
    })
}

fn eval_multi_terminal(m: &MultiTerminalDef, ctx: &ElementCtx<'_>) -> VisualNode {
    let blink = cursor_opacity(ctx.frame, m.blink_period);
    let lines = reveal_lines(&m.lines, ctx.local(m.start), m.rate)
        .into_iter()
        .map(|lr| TerminalLine {
            spans: speaker_spans(split_speaker(lr.reveal.visible, LabelMode::Block)),
            cursor: lr.reveal.shows_cursor().then_some(blink),
        })
        .collect();
    VisualNode::Terminal(TerminalNode {
        prefix: String::new(),
        lines,
    })
}

fn eval_code(c: &CodeDef, ctx: &ElementCtx<'_>) -> VisualNode {
    let rel = ctx.local(c.start).max(0) as f64;
    let opacity = interpolate(rel, [0.0, 15.0], [0.0, 1.0], InterpolateOpts::clamped());
    let highlight = interpolate(
        rel,
        [10.0, 25.0],
        [0.0, 1.0],
        InterpolateOpts::clamped().with_ease(Ease::Out(Curve::Cubic)),
    );
    let scroll_offset = if c.scroll_speed > 0.0 {
        rel * c.scroll_speed
    } else {
        0.0
    };

    let lines = highlight_block(&c.code)
        .into_iter()
        .enumerate()
        .map(|(i, tokens)| {
            let number = i + 1;
            CodeLine {
                number,
                highlight: if c.highlight_lines.contains(&number) {
                    highlight
                } else {
                    0.0
                },
                tokens: tokens
                    .into_iter()
                    .map(|t| CodeToken {
                        text: t.text.to_string(),
                        kind: t.kind,
                        color: t.kind.color(),
                    })
                    .collect(),
            }
        })
        .collect();

    VisualNode::Code(CodeNode {
        title: c.title.clone(),
        opacity,
        scroll_offset,
        lines,
    })
}

fn eval_code_stats(c: &CodeStatsDef, ctx: &ElementCtx<'_>) -> VisualNode {
    let rel = ctx.local(c.start).max(0) as f64;
    let opacity = interpolate(rel, [0.0, 15.0], [0.0, 1.0], InterpolateOpts::clamp_right());
    let count = interpolate(
        rel,
        [0.0, 30.0],
        [0.0, 1.0],
        InterpolateOpts::clamp_right().with_ease(Ease::Out(Curve::Cubic)),
    );
    let shown = (c.lines as f64 * count).floor() as u64;

    let text = |t: String, color, size| {
        VisualNode::Text(TextNode {
            text: t,
            color,
            size,
            opacity: 1.0,
            transform: Transform2D::default(),
        })
    };
    VisualNode::Group(GroupNode {
        anchor: None,
        opacity: unit(opacity),
        transform: Transform2D::default(),
        children: vec![
            text(format!("~{shown}"), GREEN, 64.0),
            text("LINES OF CODE".to_string(), CYAN, 20.0),
            text(c.parameters.clone(), GREEN, 64.0),
            text("PARAMETERS".to_string(), CYAN, 20.0),
        ],
    })
}

fn eval_chart(c: &LossChartDef, ctx: &ElementCtx<'_>) -> ReelResult<VisualNode> {
    let metrics = ctx
        .metrics
        .ok_or_else(|| ReelError::evaluation("loss chart has no training metrics"))?;
    let f = chart_frame(metrics, &c.layout, ctx.local(c.start), c.duration);
    Ok(VisualNode::Chart(ChartNode {
        width: c.layout.width,
        height: c.layout.height,
        plot_origin: Point::new(c.layout.padding.left, c.layout.padding.top),
        progress: f.progress,
        train_path: f.train_path.to_svg(),
        val_path: f.val_path.to_svg(),
        head: f.head,
        current_loss: f.current_loss,
        current_loss_label: format!("{:.3}", f.current_loss),
        y_ticks: f.y_ticks,
        x_ticks: f.x_ticks,
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/render/elements.rs"]
mod tests;
