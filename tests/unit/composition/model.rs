use super::*;
use crate::chart::loss::LossPoint;

fn basic_comp() -> Composition {
    Composition {
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas {
            width: 1080,
            height: 1920,
        },
        duration: FrameIndex(120),
        scenes: vec![
            SceneDef {
                window: SceneWindow::new("intro", 0, 60),
                elements: vec![Element::Label(LabelDef::new("hello"))],
            },
            SceneDef {
                window: SceneWindow::new("terminal", 60, 60),
                elements: vec![Element::Terminal(TerminalDef::new("ROMEO:\nhi"))],
            },
        ],
        narration: NarrationTrack::default(),
        background: None,
        metrics: None,
    }
}

#[test]
fn json_roundtrip() {
    let comp = basic_comp();
    let s = serde_json::to_string_pretty(&comp).unwrap();
    let de = Composition::from_json(&s).unwrap();
    assert_eq!(de, comp);
}

#[test]
fn elements_fill_defaults_from_json() {
    let s = r#"{
        "fps": {"num": 30, "den": 1},
        "canvas": {"width": 1080, "height": 1920},
        "duration": 100,
        "scenes": [
            {"name": "a", "start": 0, "duration": 100, "elements": [
                {"kind": "terminal", "text": "x", "rate": 0.7},
                {"kind": "overlay", "text": "hi", "start": 5, "animation": "slide"},
                {"kind": "code", "code": "import torch", "highlight_lines": [1]}
            ]}
        ]
    }"#;
    let comp = Composition::from_json(s).unwrap();
    let els = &comp.scenes[0].elements;
    let Element::Terminal(t) = &els[0] else {
        panic!("expected terminal");
    };
    assert_eq!(t.rate, CharRate::new(7, 10).unwrap());
    assert!(t.highlight_speakers);
    assert_eq!(t.blink_period, 16);
    let Element::Overlay(o) = &els[1] else {
        panic!("expected overlay");
    };
    assert_eq!(o.duration, 90);
    assert_eq!(o.typewriter_rate, CharRate::new(4, 5).unwrap());
    let Element::Code(c) = &els[2] else {
        panic!("expected code");
    };
    assert_eq!(c.title, "model.py");
    assert!(!comp.narration.enabled);
}

#[test]
fn validate_rejects_scene_past_the_end() {
    let mut comp = basic_comp();
    comp.scenes[1].window.duration = 61;
    assert!(comp.validate().is_err());
}

#[test]
fn validate_rejects_duplicate_scene_names() {
    let mut comp = basic_comp();
    comp.scenes[1].window.name = "intro".to_string();
    assert!(comp.validate().is_err());
}

#[test]
fn validate_rejects_bad_fps() {
    let mut comp = basic_comp();
    comp.fps = Fps { num: 30, den: 0 };
    assert!(comp.validate().is_err());
}

#[test]
fn loss_chart_requires_metrics() {
    let mut comp = basic_comp();
    comp.scenes[0].elements.push(Element::LossChart(LossChartDef {
        start: 0,
        duration: 40,
        layout: LossChartLayout::default(),
    }));
    assert!(comp.validate().is_err());

    comp.metrics = Some(
        TrainingMetrics::new(vec![LossPoint {
            step: 0,
            train_loss: 4.0,
            val_loss: None,
        }])
        .unwrap(),
    );
    assert!(comp.validate().is_ok());
}

#[test]
fn element_errors_name_the_scene() {
    let mut comp = basic_comp();
    comp.scenes[0].elements.push(Element::Stagger(StaggerDef {
        lines: vec![],
        start: 0,
        every: 20,
    }));
    let err = comp.validate().unwrap_err().to_string();
    assert!(err.contains("intro"), "{err}");
    assert!(err.contains("stagger"), "{err}");
}

#[test]
fn schedule_and_clock_follow_the_scenes() {
    let comp = basic_comp();
    let schedule = comp.schedule().unwrap();
    assert_eq!(schedule.end_frame(), FrameIndex(120));
    assert_eq!(comp.clock().duration_frames(), 120);
    assert!(comp.scene("terminal").is_some());
}

#[test]
fn code_stats_and_fractional_rates_round_trip() {
    let mut comp = basic_comp();
    comp.scenes[0].elements.push(Element::CodeStats(CodeStatsDef {
        start: 45,
        lines: 330,
        parameters: "774M".to_string(),
    }));
    let Element::Terminal(t) = &mut comp.scenes[1].elements[0] else {
        panic!("expected terminal");
    };
    t.rate = CharRate::new(1, 3).unwrap();

    let v = serde_json::to_value(&comp).unwrap();
    assert_eq!(v["scenes"][0]["elements"][1]["kind"], "code_stats");
    assert_eq!(v["scenes"][1]["elements"][0]["rate"], "1/3");
    assert_eq!(Composition::from_json(&v.to_string()).unwrap(), comp);

    comp.scenes[0].elements[1] = Element::CodeStats(CodeStatsDef {
        start: 0,
        lines: 10,
        parameters: " ".to_string(),
    });
    assert!(comp.validate().is_err());
}
