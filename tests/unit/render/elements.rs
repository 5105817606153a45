use super::*;
use crate::{
    chart::loss::{LossChartLayout, LossPoint},
    composition::model::StatDef,
    text::highlight::TokenKind,
    text::reveal::{CharRate, TypedLine},
};

fn ctx(frame: u64, relative: i64) -> ElementCtx<'static> {
    ElementCtx {
        frame: FrameIndex(frame),
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas {
            width: 1080,
            height: 1920,
        },
        relative,
        metrics: None,
    }
}

fn group(node: Option<VisualNode>) -> GroupNode {
    match node {
        Some(VisualNode::Group(g)) => g,
        other => panic!("expected group, got {other:?}"),
    }
}

fn terminal(node: VisualNode) -> TerminalNode {
    match node {
        VisualNode::Terminal(t) => t,
        other => panic!("expected terminal, got {other:?}"),
    }
}

fn line_text(line: &TerminalLine) -> String {
    line.spans.iter().map(|s| s.text.as_str()).collect()
}

#[test]
fn overlay_window_is_inclusive_and_fades() {
    let o = OverlayDef::new("hello", 10, OverlayAnimation::Fade);
    assert!(eval_overlay(&o, &ctx(9, 9)).is_none());
    assert_eq!(group(eval_overlay(&o, &ctx(10, 10))).opacity, 0.0);
    assert_eq!(group(eval_overlay(&o, &ctx(60, 60))).opacity, 1.0);
    // rel == duration is still drawn, fully faded out.
    assert_eq!(group(eval_overlay(&o, &ctx(100, 100))).opacity, 0.0);
    assert!(eval_overlay(&o, &ctx(101, 101)).is_none());
}

#[test]
fn overlay_effects() {
    let slide = OverlayDef::new("s", 0, OverlayAnimation::Slide);
    assert_eq!(group(eval_overlay(&slide, &ctx(0, 0))).transform.translate.y, 50.0);
    assert_eq!(group(eval_overlay(&slide, &ctx(30, 30))).transform.translate.y, 0.0);

    let scale = OverlayDef::new("s", 0, OverlayAnimation::Scale);
    assert_eq!(group(eval_overlay(&scale, &ctx(0, 0))).transform.scale, 0.0);
    let later = group(eval_overlay(&scale, &ctx(60, 60))).transform.scale;
    assert!((later - 1.0).abs() < 0.01);

    let tw = OverlayDef::new("typewriter", 0, OverlayAnimation::Typewriter);
    let g = group(eval_overlay(&tw, &ctx(5, 5)));
    let VisualNode::Text(t) = &g.children[0] else {
        panic!("expected text");
    };
    assert_eq!(t.text, "type");
}

#[test]
fn overlay_positions_anchor_vertically() {
    let mut o = OverlayDef::new("p", 0, OverlayAnimation::Fade);
    o.position = OverlayPosition::Top;
    let top = group(eval_overlay(&o, &ctx(5, 5))).anchor.unwrap();
    o.position = OverlayPosition::Bottom;
    let bottom = group(eval_overlay(&o, &ctx(5, 5))).anchor.unwrap();
    assert!(top.y < 50.0 && bottom.y > 50.0);
    assert!((top.y + bottom.y - 100.0).abs() < 1e-9);
}

#[test]
fn stat_springs_in_and_fades_out() {
    let s = StatDef {
        label: "params".to_string(),
        value: "774M".to_string(),
        start: 0,
        duration: 60,
        position: Point::new(50.0, 40.0),
    };
    let g = group(eval_stat(&s, &ctx(0, 0)));
    assert_eq!(g.transform.scale, 0.0);
    assert_eq!(g.opacity, 1.0);
    let VisualNode::Text(label) = &g.children[0] else {
        panic!("expected text");
    };
    assert_eq!(label.text, "PARAMS");

    let end = group(eval_stat(&s, &ctx(60, 60)));
    assert_eq!(end.opacity, 0.0);
}

#[test]
fn stagger_reveals_lines_one_by_one() {
    let s = StaggerDef {
        lines: vec!["a".into(), "b".into(), "c".into()],
        start: 0,
        every: 20,
    };
    assert!(eval_stagger(&s, &ctx(0, -1)).is_none());
    assert_eq!(group(eval_stagger(&s, &ctx(0, 0))).children.len(), 1);
    assert_eq!(group(eval_stagger(&s, &ctx(20, 20))).children.len(), 2);
    let g = group(eval_stagger(&s, &ctx(45, 45)));
    assert_eq!(g.children.len(), 3);
    let VisualNode::Text(first) = &g.children[0] else {
        panic!("expected text");
    };
    assert_eq!(first.opacity, 1.0);
    assert_eq!(first.transform.translate.y, 0.0);
}

#[test]
fn terminal_styles_speakers_and_blinks_cursor() {
    let mut t = TerminalDef::new("ROMEO:\nYou're high.");
    t.start = 20;
    t.rate = CharRate::new(2, 5).unwrap();

    let before = terminal(eval_terminal(&t, &ctx(10, 10)));
    assert_eq!(before.lines.len(), 1);
    assert!(before.lines[0].spans.is_empty());
    assert_eq!(before.lines[0].cursor, None);

    // 20 frames in at 0.4 chars/frame: "ROMEO:\nY".
    let mid = terminal(eval_terminal(&t, &ctx(40, 40)));
    assert_eq!(mid.lines.len(), 2);
    assert_eq!(mid.lines[0].spans[0].text, "ROMEO:");
    assert!(mid.lines[0].spans[0].bold);
    assert_eq!(mid.lines[0].spans[0].color, CYAN);
    assert_eq!(line_text(&mid.lines[1]), "Y");
    // Global frame 40 is phase 8 of 16: cursor fully faded.
    assert_eq!(mid.lines[1].cursor, Some(0.0));

    let done = terminal(eval_terminal(&t, &ctx(200, 200)));
    assert!(done.lines.iter().all(|l| l.cursor.is_none()));
    assert_eq!(line_text(&done.lines[1]), "You're high.");
}

#[test]
fn terminal_without_highlighting_keeps_plain_text() {
    let mut t = TerminalDef::new("ROMEO: hi");
    t.highlight_speakers = false;
    let node = terminal(eval_terminal(&t, &ctx(100, 100)));
    assert_eq!(node.lines[0].spans.len(), 1);
    assert_eq!(node.lines[0].spans[0].color, GREEN);
}

#[test]
fn multi_terminal_lines_wait_for_their_delay() {
    let m = MultiTerminalDef {
        lines: vec![
            TypedLine {
                text: "LORIUS:\nI am".to_string(),
                delay: 0,
            },
            TypedLine {
                text: "PRINCETON: no".to_string(),
                delay: 30,
            },
        ],
        start: 0,
        rate: CharRate::new(1, 1).unwrap(),
        blink_period: 16,
    };
    let early = terminal(eval_multi_terminal(&m, &ctx(12, 12)));
    assert_eq!(early.lines.len(), 1);
    assert_eq!(early.lines[0].spans[1].text, "\nI am");
    assert!(early.lines[0].cursor.is_none());

    let later = terminal(eval_multi_terminal(&m, &ctx(32, 32)));
    assert_eq!(later.lines.len(), 2);
    assert_eq!(line_text(&later.lines[1]), "PR");
    assert!(later.lines[1].cursor.is_some());
}

#[test]
fn code_block_fades_highlights_and_scrolls() {
    let c = CodeDef {
        code: "import torch\nn_layer = 36".to_string(),
        start: 0,
        title: "model.py".to_string(),
        highlight_lines: vec![2],
        scroll_speed: 2.0,
    };
    let VisualNode::Code(at0) = eval_code(&c, &ctx(0, 0)) else {
        panic!("expected code");
    };
    assert_eq!(at0.opacity, 0.0);
    assert_eq!(at0.lines[1].highlight, 0.0);
    assert_eq!(at0.lines[0].tokens[0].kind, TokenKind::Keyword);

    let VisualNode::Code(at30) = eval_code(&c, &ctx(30, 30)) else {
        panic!("expected code");
    };
    assert_eq!(at30.opacity, 1.0);
    assert_eq!(at30.lines[0].highlight, 0.0);
    assert_eq!(at30.lines[1].highlight, 1.0);
    assert_eq!(at30.scroll_offset, 60.0);
}

#[test]
fn label_shakes_sideways_for_twenty_frames() {
    let l = LabelDef {
        offset_x: crate::animation::anim::Anim::Shake {
            amplitude: 4.0,
            rate: 3.0,
            frames: 20,
        },
        ..LabelDef::new("Wait... who?")
    };
    let x = |rel: i64| match eval_label(&l, &ctx(1551 + rel as u64, rel)) {
        VisualNode::Text(t) => t.transform.translate.x,
        other => panic!("expected text, got {other:?}"),
    };
    assert_eq!(x(0), 0.0);
    assert_eq!(x(5), 4.0 * 15.0f64.sin());
    assert!(x(5).abs() > 2.0);
    assert_eq!(x(20), 0.0);
    assert_eq!(x(90), 0.0);
}

#[test]
fn code_stats_count_up_and_fade_in() {
    let c = CodeStatsDef {
        start: 45,
        lines: 330,
        parameters: "774M".to_string(),
    };
    let texts = |rel: i64| {
        let g = group(Some(eval_code_stats(&c, &ctx(0, 45 + rel))));
        let texts: Vec<String> = g
            .children
            .iter()
            .map(|n| match n {
                VisualNode::Text(t) => t.text.clone(),
                other => panic!("expected text, got {other:?}"),
            })
            .collect();
        (g.opacity, texts)
    };

    let (opacity, at0) = texts(0);
    assert_eq!(opacity, 0.0);
    assert_eq!(at0, vec!["~0", "LINES OF CODE", "774M", "PARAMETERS"]);

    // Out-cubic at t = 0.5 is 0.875: floor(330 * 0.875) = 288.
    let (opacity, at15) = texts(15);
    assert_eq!(opacity, 1.0);
    assert_eq!(at15[0], "~288");

    let (_, at30) = texts(30);
    assert_eq!(at30[0], "~330");
    assert_eq!(texts(200).1[0], "~330");

    // Before its start the block is laid out but transparent.
    assert_eq!(texts(-10), (0.0, at0));
}

#[test]
fn chart_needs_metrics_and_formats_loss() {
    let c = LossChartDef {
        start: 20,
        duration: 140,
        layout: LossChartLayout::default(),
    };
    assert!(eval_chart(&c, &ctx(0, 0)).is_err());

    let metrics = TrainingMetrics::new(vec![
        LossPoint {
            step: 0,
            train_loss: 4.1234,
            val_loss: None,
        },
        LossPoint {
            step: 1,
            train_loss: 3.5,
            val_loss: Some(3.6),
        },
    ])
    .unwrap();
    let mut with = ctx(0, 0);
    with.metrics = Some(&metrics);
    let Ok(VisualNode::Chart(node)) = eval_chart(&c, &with) else {
        panic!("expected chart");
    };
    assert_eq!(node.current_loss_label, "4.123");
    assert!(node.train_path.is_empty());
    assert_eq!(node.plot_origin, Point::new(80.0, 40.0));

    with.relative = 500;
    let Ok(VisualNode::Chart(done)) = eval_chart(&c, &with) else {
        panic!("expected chart");
    };
    assert!(done.train_path.starts_with('M'));
    assert_eq!(done.current_loss_label, "3.500");
}
