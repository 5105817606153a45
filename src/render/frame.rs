use kurbo::Point;

use crate::{
    animation::anim::SampleCtx,
    composition::model::{Composition, SceneDef},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    render::elements::{ElementCtx, eval_element},
    render::tree::{BackgroundNode, SceneNode, VisualNode, VisualTree},
    timeline::scheduler::Schedule,
};

/// Validate `comp` and evaluate it at `frame`.
#[tracing::instrument(skip(comp))]
pub fn render_frame(comp: &Composition, frame: FrameIndex) -> ReelResult<VisualTree> {
    comp.validate()?;
    let schedule = comp.schedule()?;
    render_frame_unchecked(comp, &schedule, frame)
}

/// Evaluate `frame` against an already validated composition and its schedule.
///
/// Pre-mounted scenes are evaluated but contribute no nodes.
pub fn render_frame_unchecked(
    comp: &Composition,
    schedule: &Schedule,
    frame: FrameIndex,
) -> ReelResult<VisualTree> {
    if frame.0 >= comp.duration.0 {
        return Err(ReelError::evaluation(format!(
            "frame {} is out of bounds (duration {})",
            frame.0, comp.duration.0
        )));
    }

    let mounted = schedule.mounted_scenes(frame);
    let mut scenes = Vec::with_capacity(mounted.len());
    for active in &mounted {
        let def = comp.scenes.get(active.index).ok_or_else(|| {
            ReelError::evaluation(format!("schedule names unknown scene '{}'", active.name))
        })?;
        let nodes = eval_scene(comp, def, frame, active.relative_frame)?;
        if active.visible {
            scenes.push(SceneNode {
                name: active.name.to_string(),
                index: active.index,
                relative_frame: active.relative_frame,
                nodes,
            });
        }
    }

    let audio = comp.narration.playing(schedule, frame);
    tracing::debug!(
        mounted = mounted.len(),
        visible = scenes.len(),
        audio = audio.len(),
        "frame evaluated"
    );

    Ok(VisualTree {
        frame,
        canvas: comp.canvas,
        background: eval_background(comp, frame),
        scenes,
        audio,
    })
}

/// Evaluate every frame of `range` in order.
pub fn render_range(comp: &Composition, range: FrameRange) -> ReelResult<Vec<VisualTree>> {
    comp.validate()?;
    let schedule = comp.schedule()?;
    range
        .iter()
        .map(|f| render_frame_unchecked(comp, &schedule, f))
        .collect()
}

fn eval_scene(
    comp: &Composition,
    scene: &SceneDef,
    frame: FrameIndex,
    relative: i64,
) -> ReelResult<Vec<VisualNode>> {
    let ctx = ElementCtx {
        frame,
        fps: comp.fps,
        canvas: comp.canvas,
        relative,
        metrics: comp.metrics.as_ref(),
    };
    let mut nodes = Vec::with_capacity(scene.elements.len());
    for el in &scene.elements {
        if let Some(node) = eval_element(el, &ctx)? {
            nodes.push(node);
        }
    }
    Ok(nodes)
}

fn eval_background(comp: &Composition, frame: FrameIndex) -> Option<BackgroundNode> {
    let bg = comp.background.as_ref()?;
    let ctx = SampleCtx {
        frame,
        fps: comp.fps,
        relative: frame.relative_to(FrameIndex(0)),
    };
    Some(BackgroundNode {
        base: bg.base,
        glow: bg.glow,
        glow_center: Point::new(bg.center_x, bg.center_y.sample(ctx)),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
