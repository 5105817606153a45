//! The built-in "How does GPT actually work?" short: 11 scenes at 30 fps on a
//! 1080x1920 portrait canvas, timed against the narration clips.

use std::sync::LazyLock;

use crate::{
    animation::anim::Anim,
    animation::spring::SpringConfig,
    chart::loss::{LossChartLayout, TrainingMetrics},
    composition::dsl::{CompositionBuilder, SceneBuilder},
    composition::model::{BackgroundDef, CYAN, Composition, GREEN, LabelDef, TerminalDef},
    foundation::core::{Canvas, Fps, FrameIndex, Rgba8},
    foundation::error::{ReelError, ReelResult},
    narration::default_cues,
    text::reveal::CharRate,
};

const TRAINING_LOSS_JSON: &str = include_str!("../data/training-loss.json");

static TRAINING_METRICS: LazyLock<Result<TrainingMetrics, String>> =
    LazyLock::new(|| TrainingMetrics::from_json(TRAINING_LOSS_JSON).map_err(|e| e.to_string()));

pub const DURATION_FRAMES: u64 = 2120;

/// `(scene, start, duration)` in frames. Windows are contiguous and cover the video.
pub const TIMING: [(&str, u64, u64); 11] = [
    ("hook", 0, 52),
    ("what-is-llm", 52, 193),
    ("training", 245, 312),
    ("architecture", 557, 363),
    ("fine-tuning", 920, 196),
    ("h100", 1116, 103),
    ("loss-chart", 1219, 180),
    ("generation", 1399, 152),
    ("reveal", 1551, 156),
    ("punchline", 1707, 214),
    ("cta", 1921, 199),
];

const GREY: Rgba8 = Rgba8::rgb(0x88, 0x88, 0x88);
const DIM: Rgba8 = Rgba8::rgb(0x66, 0x66, 0x66);
const RED: Rgba8 = Rgba8::rgb(0xff, 0x6b, 0x6b);

const GENERATED_SAMPLE: &str = "ROMEO:\nYou're high.\n\nLORIUS:\nI am not a man of blood,\nbut a man of love.";

/// Loss history of the 20-step Shakespeare fine-tune bundled with the crate.
pub fn training_metrics() -> ReelResult<TrainingMetrics> {
    TRAINING_METRICS
        .as_ref()
        .map(Clone::clone)
        .map_err(|e| ReelError::serde(e.clone()))
}

fn text(s: &str, color: Rgba8, size: f64) -> LabelDef {
    LabelDef {
        color,
        size,
        ..LabelDef::new(s)
    }
}

/// Label that fades in over `[start, start + len]` and stays.
fn fading(s: &str, color: Rgba8, size: f64, start: f64, len: f64) -> ReelResult<LabelDef> {
    Ok(LabelDef {
        opacity: Anim::fade_in(start, len)?,
        ..text(s, color, size)
    })
}

fn popping(s: &str, color: Rgba8, size: f64, spring: SpringConfig) -> LabelDef {
    LabelDef {
        scale: Anim::spring(spring),
        ..text(s, color, size)
    }
}

/// Horizontal jolt over the first 20 frames of the scene.
fn shaking(label: LabelDef) -> LabelDef {
    LabelDef {
        offset_x: Anim::Shake {
            amplitude: 4.0,
            rate: 3.0,
            frames: 20,
        },
        ..label
    }
}

fn window(i: usize) -> SceneBuilder {
    let (name, start, duration) = TIMING[i];
    SceneBuilder::new(name, start, duration)
}

pub fn nanogpt_short() -> ReelResult<Composition> {
    let hook_pop = SpringConfig::new(12.0, 100.0);
    let hook = window(0)
        .label(popping("How does GPT", GREEN, 52.0, hook_pop))
        .label(popping("actually work?", CYAN, 52.0, hook_pop))
        .build()?;

    let what_is_llm = window(1)
        .label(fading("An LLM is a next-word predictor", GREY, 32.0, 0.0, 20.0)?)
        .label(fading("\"To be or not to", GREEN, 42.0, 0.0, 20.0)?)
        .label(fading("___", CYAN, 42.0, 30.0, 15.0)?)
        .label(fading("be\"", RED, 42.0, 70.0, 15.0)?)
        .label(fading(
            "It predicts the most likely next word\nbased on all the text it's seen",
            GREY,
            28.0,
            100.0,
            15.0,
        )?)
        .build()?;

    let training = window(2)
        .label(text("How does it learn?", CYAN, 36.0))
        .label(fading("Input: \"The cat sat on the ___\"", GREEN, 36.0, 0.0, 20.0)?)
        .label(fading("Model guesses:", GREY, 28.0, 30.0, 20.0)?)
        .label(fading("\"elephant\" ❌", RED, 42.0, 60.0, 15.0)?)
        .label(fading("Adjust weights slightly →", CYAN, 32.0, 120.0, 20.0)?)
        .label(fading("Repeat billions of times...", GREY, 28.0, 180.0, 20.0)?)
        .label(fading("\"mat\" ✓", GREEN, 42.0, 220.0, 20.0)?)
        .build()?;

    let architecture = window(3)
        .label(fading("The secret: Attention", CYAN, 36.0, 0.0, 20.0)?)
        .label(fading("The king loved his queen", GREEN, 36.0, 30.0, 20.0)?)
        .label(fading("\"queen\" pays attention to \"king\"", GREY, 18.0, 70.0, 30.0)?)
        .label(fading(
            "Each word looks at other words\nto understand context",
            GREY,
            28.0,
            130.0,
            20.0,
        )?)
        .label(fading(
            "GPT-2 does this 36 times (layers) with 774M parameters",
            GREEN,
            24.0,
            180.0,
            20.0,
        )?)
        .build()?;

    let fine_tuning = window(4)
        .label(text("Fine-tuning = specialized training", GREY, 32.0))
        .label(fading("GPT-2", GREEN, 36.0, 0.0, 20.0)?)
        .label(fading("Knows English", DIM, 20.0, 0.0, 20.0)?)
        .label(fading("→", CYAN, 48.0, 30.0, 15.0)?)
        .label(fading("Shakespeare GPT", RED, 36.0, 50.0, 20.0)?)
        .label(fading("Writes like the Bard", DIM, 20.0, 50.0, 20.0)?)
        .build()?;

    let h100_pop = SpringConfig::new(10.0, 150.0);
    let h100 = window(5)
        .label(popping("H100 GPU", GREEN, 64.0, h100_pop))
        .label(popping("20 steps • 2 minutes", GREY, 32.0, h100_pop))
        .build()?;

    let loss_chart = window(6)
        .label(fading("Loss = how wrong the guesses are", CYAN, 36.0, 0.0, 15.0)?)
        .loss_chart(
            20,
            140,
            LossChartLayout {
                height: 450.0,
                ..LossChartLayout::default()
            },
        )
        .label(fading("Lower = better predictions ✓", GREEN, 28.0, 140.0, 20.0)?)
        .build()?;

    let generation = window(7)
        .label(text("Now it generates Shakespeare:", CYAN, 32.0))
        .terminal(TerminalDef {
            start: 20,
            rate: CharRate::per_frame(0.7)?,
            prefix: ">>> ".to_string(),
            ..TerminalDef::new(GENERATED_SAMPLE)
        })
        .build()?;

    let mut reveal = window(8).label(shaking(text("Wait... who?", RED, 48.0)));
    for (i, name) in ["LORIUS", "PRINCETON"].into_iter().enumerate() {
        let delay = 40.0 + i as f64 * 30.0;
        reveal = reveal.label(shaking(fading(name, RED, 52.0, delay, 15.0)?));
    }
    let reveal = reveal
        .label(shaking(fading(
            "These don't exist in Shakespeare!",
            GREEN,
            28.0,
            120.0,
            20.0,
        )?))
        .build()?;

    let punchline = window(9)
        .label(fading("It learned the pattern", GREEN, 44.0, 0.0, 15.0)?)
        .label(fading("...and made up the rest", RED, 44.0, 30.0, 15.0)?)
        .label(fading("That's what LLMs do.", GREY, 32.0, 70.0, 20.0)?)
        .build()?;

    let mut cta = window(10);
    for (value, label) in [("774M", "params"), ("36", "layers"), ("20", "steps")] {
        cta = cta
            .label(fading(value, GREEN, 36.0, 0.0, 20.0)?)
            .label(fading(label, DIM, 16.0, 0.0, 20.0)?);
    }
    let cta = cta
        .label(fading("github.com/karpathy/nanoGPT", CYAN, 28.0, 40.0, 20.0)?)
        .label(fading("Follow for more AI deep-dives", GREY, 24.0, 80.0, 20.0)?)
        .build()?;

    let mut builder = CompositionBuilder::new(
        Fps::new(30, 1)?,
        Canvas {
            width: 1080,
            height: 1920,
        },
        FrameIndex(DURATION_FRAMES),
    )
    .background(BackgroundDef {
        base: Rgba8::rgb(0x0a, 0x0a, 0x0a),
        glow: Rgba8::rgb(0x00, 0x32, 0x00).with_opacity(0.3),
        center_x: 50.0,
        center_y: Anim::Wave {
            amplitude: 10.0,
            rate: 1.0 / 60.0,
            phase: 0.0,
            offset: 30.0,
        },
    })
    .metrics(training_metrics()?)
    .narration_enabled(true);

    for scene in [
        hook,
        what_is_llm,
        training,
        architecture,
        fine_tuning,
        h100,
        loss_chart,
        generation,
        reveal,
        punchline,
        cta,
    ] {
        builder = builder.scene(scene);
    }
    for ((scene, _, _), cue) in TIMING.iter().zip(default_cues()) {
        builder = builder.narrate(*scene, cue);
    }

    builder.build()
}

#[cfg(test)]
#[path = "../tests/unit/demo.rs"]
mod tests;
