//! reeltime is a frame-driven motion timing engine for short explainer videos.
//!
//! Every visual property is a pure function of the frame index. A host renders a
//! [`Composition`] one frame at a time:
//!
//! - Build or load a [`Composition`] (JSON or [`CompositionBuilder`])
//! - Call [`render_frame`] or [`render_range`]
//! - Draw the returned [`VisualTree`]
//!
//! The timing building blocks ([`Schedule`], [`interpolate`], [`spring()`], [`reveal()`],
//! [`classify`]) are usable on their own.
#![forbid(unsafe_code)]

pub mod foundation {
    pub mod core;
    pub mod error;
}

pub mod animation {
    pub mod anim;
    pub mod ease;
    pub mod interpolate;
    pub mod spring;
}

pub mod timeline {
    pub mod clock;
    pub mod scheduler;
}

pub mod text {
    pub mod highlight;
    pub mod reveal;
    pub mod speaker;
}

pub mod chart {
    pub mod loss;
}

pub mod composition {
    pub mod dsl;
    pub mod model;
}

pub mod render {
    pub(crate) mod elements;
    pub mod frame;
    pub mod tree;
}

pub mod demo;
pub mod narration;

pub use crate::animation::anim::{Anim, SampleCtx};
pub use crate::animation::ease::{Curve, Ease};
pub use crate::animation::interpolate::{
    Extrapolate, InterpolateOpts, Key, KeyframeSet, interpolate,
};
pub use crate::animation::spring::{SpringConfig, spring};
pub use crate::chart::loss::{
    ChartFrame, LossChartLayout, LossPoint, TrainingMetrics, chart_frame,
};
pub use crate::composition::dsl::{CompositionBuilder, SceneBuilder};
pub use crate::composition::model::{Composition, Element, SceneDef};
pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, FrameRange, Point, Rgba8, Transform2D, Vec2,
};
pub use crate::foundation::error::{ReelError, ReelResult};
pub use crate::narration::{NarrationCue, NarrationTrack};
pub use crate::render::frame::{render_frame, render_frame_unchecked, render_range};
pub use crate::render::tree::{VisualNode, VisualTree};
pub use crate::text::highlight::{Token, TokenKind, classify, highlight_block};
pub use crate::text::reveal::{CharRate, Reveal, cursor_opacity, reveal};
pub use crate::text::speaker::{LabelMode, RevealedLine, split_speaker};
pub use crate::timeline::clock::Clock;
pub use crate::timeline::scheduler::{ActiveScene, SceneWindow, Schedule};
