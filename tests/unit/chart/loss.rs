use super::*;

fn metrics() -> TrainingMetrics {
    TrainingMetrics::new(
        (0..=20u64)
            .map(|step| LossPoint {
                step,
                train_loss: 3.0 - step as f64 * 0.1,
                val_loss: (step % 5 == 0).then_some(3.1 - step as f64 * 0.09),
            })
            .collect(),
    )
    .unwrap()
}

#[test]
fn nothing_is_drawn_before_the_animation_starts() {
    let m = metrics();
    let f = chart_frame(&m, &LossChartLayout::default(), -10, 140);
    assert_eq!(f.progress, 0.0);
    assert_eq!(f.visible_points, 0);
    assert!(f.head.is_none());
    assert!(f.train_path.elements().is_empty());
    assert_eq!(f.current_loss, 3.0);
}

#[test]
fn full_curve_after_duration() {
    let m = metrics();
    let layout = LossChartLayout::default();
    let f = chart_frame(&m, &layout, 400, 140);
    assert_eq!(f.progress, 1.0);
    assert_eq!(f.visible_points, 21);
    assert_eq!(f.train_path.elements().len(), 21);
    assert_eq!(f.val_path.elements().len(), 5);
    assert!((f.current_loss - 1.0).abs() < 1e-12);

    let head = f.head.unwrap();
    assert!((head.x - layout.plot_width()).abs() < 1e-9);
    // Lowest loss sits 0.1 above the bottom edge of the y range.
    let expected_y = layout.plot_height() - 0.1 / 2.2 * layout.plot_height();
    assert!((head.y - expected_y).abs() < 1e-9);
}

#[test]
fn progress_is_eased_and_monotonic() {
    let m = metrics();
    let layout = LossChartLayout::default();
    let mut prev = 0;
    for rel in 0..=160 {
        let f = chart_frame(&m, &layout, rel, 140);
        assert!(f.visible_points >= prev);
        prev = f.visible_points;
    }
    // Out-cubic front-loads the drawing.
    assert!(draw_progress(70, 140) > 0.5);
}

#[test]
fn ticks_label_the_axes() {
    let m = metrics();
    let layout = LossChartLayout::default();
    let f = chart_frame(&m, &layout, 0, 140);
    let labels: Vec<&str> = f.y_ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["3.10", "2.55", "2.00", "1.45", "0.90"]);
    assert_eq!(f.y_ticks[0].pos, 40.0);
    let xs: Vec<&str> = f.x_ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(xs, vec!["0", "5", "10", "15", "20"]);
    assert_eq!(f.x_ticks[0].pos, 80.0);
}

#[test]
fn single_point_history_does_not_divide_by_zero() {
    let m = TrainingMetrics::new(vec![LossPoint {
        step: 0,
        train_loss: 2.0,
        val_loss: None,
    }])
    .unwrap();
    let f = chart_frame(&m, &LossChartLayout::default(), 200, 10);
    let head = f.head.unwrap();
    assert_eq!(head.x, 0.0);
    assert!(head.y.is_finite());
}

#[test]
fn metrics_validation_and_aliases() {
    assert!(TrainingMetrics::new(vec![]).is_err());
    let parsed = TrainingMetrics::from_json(
        r#"{"loss":[{"step":0,"train":4.2,"val":null},{"step":1,"train":3.9}]}"#,
    )
    .unwrap();
    assert_eq!(parsed.points.len(), 2);
    assert_eq!(parsed.points[1].val_loss, None);

    let backwards = TrainingMetrics::from_json(
        r#"{"points":[{"step":3,"train_loss":1.0},{"step":1,"train_loss":1.0}]}"#,
    );
    assert!(backwards.is_err());
}
