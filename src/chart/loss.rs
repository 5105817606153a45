use kurbo::{BezPath, Point};

use crate::{
    animation::ease::{Curve, Ease},
    animation::interpolate::{InterpolateOpts, interpolate},
    foundation::error::{ReelError, ReelResult},
};

/// One logged training step.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LossPoint {
    pub step: u64,
    #[serde(alias = "train")]
    pub train_loss: f64,
    #[serde(alias = "val", default)]
    pub val_loss: Option<f64>,
}

/// Read-only loss history consumed by the chart.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrainingMetrics {
    #[serde(alias = "loss")]
    pub points: Vec<LossPoint>,
}

impl TrainingMetrics {
    pub fn new(points: Vec<LossPoint>) -> ReelResult<Self> {
        let m = Self { points };
        m.validate()?;
        Ok(m)
    }

    pub fn from_json(s: &str) -> ReelResult<Self> {
        let m: Self = serde_json::from_str(s)?;
        m.validate()?;
        Ok(m)
    }

    pub fn validate(&self) -> ReelResult<()> {
        if self.points.is_empty() {
            return Err(ReelError::validation("training metrics must not be empty"));
        }
        if self.points.windows(2).any(|w| w[0].step > w[1].step) {
            return Err(ReelError::validation(
                "training metric steps must be non-decreasing",
            ));
        }
        let finite = |v: f64| v.is_finite();
        if !self
            .points
            .iter()
            .all(|p| finite(p.train_loss) && p.val_loss.is_none_or(finite))
        {
            return Err(ReelError::validation("training losses must be finite"));
        }
        Ok(())
    }

    pub fn max_step(&self) -> u64 {
        self.points.iter().map(|p| p.step).max().unwrap_or(0)
    }

    /// Train-loss range widened by 0.1 on each side.
    pub fn loss_bounds(&self) -> (f64, f64) {
        let (lo, hi) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.train_loss), hi.max(p.train_loss))
            });
        (lo - 0.1, hi + 0.1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChartPadding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LossChartLayout {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_padding")]
    pub padding: ChartPadding,
}

fn default_padding() -> ChartPadding {
    ChartPadding {
        top: 40.0,
        right: 40.0,
        bottom: 60.0,
        left: 80.0,
    }
}

impl Default for LossChartLayout {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 500.0,
            padding: default_padding(),
        }
    }
}

impl LossChartLayout {
    pub fn plot_width(&self) -> f64 {
        self.width - self.padding.left - self.padding.right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.padding.top - self.padding.bottom
    }
}

/// Axis label at a position in chart coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AxisTick {
    pub pos: f64,
    pub label: String,
}

/// Chart geometry for one frame. Paths and `head` are in plot-local coordinates
/// (origin at the plot's top-left corner); ticks are in chart coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartFrame {
    pub progress: f64,
    pub visible_points: usize,
    pub train_path: BezPath,
    pub val_path: BezPath,
    /// Most recently drawn train point.
    pub head: Option<Point>,
    pub current_loss: f64,
    pub y_ticks: Vec<AxisTick>,
    pub x_ticks: Vec<AxisTick>,
}

struct Scales {
    max_step: f64,
    lo: f64,
    hi: f64,
    w: f64,
    h: f64,
}

impl Scales {
    fn x(&self, step: u64) -> f64 {
        if self.max_step <= 0.0 {
            0.0
        } else {
            step as f64 / self.max_step * self.w
        }
    }

    fn y(&self, loss: f64) -> f64 {
        self.h - (loss - self.lo) / (self.hi - self.lo) * self.h
    }
}

fn polyline(points: impl Iterator<Item = Point>) -> BezPath {
    let mut path = BezPath::new();
    for (i, p) in points.enumerate() {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path
}

/// Draw progress for a chart that animates over `duration` frames.
pub fn draw_progress(relative_frame: i64, duration: u64) -> f64 {
    interpolate(
        relative_frame.max(0) as f64,
        [0.0, duration as f64],
        [0.0, 1.0],
        InterpolateOpts::clamp_right().with_ease(Ease::Out(Curve::Cubic)),
    )
}

/// Compute the chart at `relative_frame` of a `duration`-frame draw animation.
pub fn chart_frame(
    metrics: &TrainingMetrics,
    layout: &LossChartLayout,
    relative_frame: i64,
    duration: u64,
) -> ChartFrame {
    let progress = draw_progress(relative_frame, duration);
    let (lo, hi) = metrics.loss_bounds();
    let scales = Scales {
        max_step: metrics.max_step() as f64,
        lo,
        hi,
        w: layout.plot_width(),
        h: layout.plot_height(),
    };

    let n = metrics.points.len();
    let visible_points = ((n as f64 * progress).ceil() as usize).min(n);
    let visible = &metrics.points[..visible_points];

    let train_path = polyline(
        visible
            .iter()
            .map(|p| Point::new(scales.x(p.step), scales.y(p.train_loss))),
    );
    let val_path = polyline(
        visible
            .iter()
            .filter_map(|p| p.val_loss.map(|v| Point::new(scales.x(p.step), scales.y(v)))),
    );
    let head = visible
        .last()
        .map(|p| Point::new(scales.x(p.step), scales.y(p.train_loss)));
    let current_loss = visible
        .last()
        .or(metrics.points.first())
        .map_or(0.0, |p| p.train_loss);

    let y_ticks = [0.0, 0.25, 0.5, 0.75, 1.0]
        .iter()
        .map(|t| AxisTick {
            pos: layout.padding.top + t * scales.h,
            label: format!("{:.2}", hi - t * (hi - lo)),
        })
        .collect();
    let max_step = metrics.max_step();
    let x_ticks = (0..=4u64)
        .map(|i| {
            let step = (max_step as f64 * i as f64 / 4.0).round() as u64;
            AxisTick {
                pos: layout.padding.left + scales.x(step),
                label: step.to_string(),
            }
        })
        .collect();

    ChartFrame {
        progress,
        visible_points,
        train_path,
        val_path,
        head,
        current_loss,
        y_ticks,
        x_ticks,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/loss.rs"]
mod tests;
