use super::*;
use crate::animation::ease::Curve;

fn ctx(frame: u64, relative: i64) -> SampleCtx {
    SampleCtx {
        frame: FrameIndex(frame),
        fps: Fps::new(30, 1).unwrap(),
        relative,
    }
}

#[test]
fn fade_in_holds_after_window() {
    let a = Anim::fade_in(0.0, 20.0).unwrap();
    assert_eq!(a.sample(ctx(0, 0)), 0.0);
    assert_eq!(a.sample(ctx(10, 10)), 0.5);
    assert_eq!(a.sample(ctx(500, 500)), 1.0);
}

#[test]
fn delay_shifts_relative_clock() {
    let a = Anim::delay(Anim::fade_in(0.0, 10.0).unwrap(), 20);
    assert!(a.sample(ctx(0, 5)) < 0.0);
    assert_eq!(a.sample(ctx(25, 25)), 0.5);
}

#[test]
fn min_combines_fade_in_and_out() {
    let d = 90.0;
    let a = Anim::Min(vec![
        Anim::fade_in(0.0, 15.0).unwrap(),
        Anim::ramp(
            [d - 15.0, d],
            [1.0, 0.0],
            crate::animation::interpolate::InterpolateOpts::clamp_left(),
        )
        .unwrap(),
    ]);
    assert_eq!(a.sample(ctx(45, 45)), 1.0);
    assert!((a.sample(ctx(0, 3)) - 0.2).abs() < 1e-12);
    assert!((a.sample(ctx(0, 87)) - 0.2).abs() < 1e-12);
    assert_eq!(a.sample(ctx(0, 90)), 0.0);
}

#[test]
fn spring_maps_into_endpoints() {
    let a = Anim::Spring {
        config: SpringConfig::new(15.0, 100.0),
        delay: 10,
        from: 0.5,
        to: 1.0,
    };
    assert_eq!(a.sample(ctx(0, 5)), 0.5);
    assert!((a.sample(ctx(0, 400)) - 1.0).abs() < 1e-6);
}

#[test]
fn wave_follows_global_frame() {
    let a = Anim::Wave {
        amplitude: 10.0,
        rate: 1.0 / 60.0,
        phase: 0.0,
        offset: 30.0,
    };
    assert_eq!(a.sample(ctx(0, -100)), 30.0);
    let expected = 30.0 + 10.0 * (120.0f64 / 60.0).sin();
    assert_eq!(a.sample(ctx(120, 0)), expected);
}

#[test]
fn shake_follows_relative_frame_and_stops() {
    let a = Anim::Shake {
        amplitude: 4.0,
        rate: 3.0,
        frames: 20,
    };
    assert_eq!(a.sample(ctx(1551, 0)), 0.0);
    assert_eq!(a.sample(ctx(1556, 5)), 4.0 * 15.0f64.sin());
    assert_eq!(a.sample(ctx(1570, 19)), 4.0 * 57.0f64.sin());
    assert_eq!(a.sample(ctx(1571, 20)), 0.0);
    assert_eq!(a.sample(ctx(1540, -11)), 0.0);
    assert!(
        Anim::Shake {
            amplitude: f64::NAN,
            rate: 3.0,
            frames: 20
        }
        .validate()
        .is_err()
    );
}

#[test]
fn eased_slide_settles_at_target() {
    let a = Anim::eased([0.0, 20.0], [50.0, 0.0], Ease::Out(Curve::Cubic)).unwrap();
    assert_eq!(a.sample(ctx(0, 0)), 50.0);
    assert!(a.sample(ctx(0, 10)) < 25.0);
    assert_eq!(a.sample(ctx(0, 20)), 0.0);
    assert_eq!(a.sample(ctx(0, 80)), 0.0);
}

#[test]
fn validate_catches_bad_sources() {
    assert!(Anim::Min(vec![]).validate().is_err());
    assert!(Anim::Constant(f64::NAN).validate().is_err());
    assert!(Anim::spring(SpringConfig::new(0.0, 1.0)).validate().is_err());
    assert!(Anim::Constant(1.0).validate().is_ok());
}

#[test]
fn json_shape_is_externally_tagged() {
    let a: Anim = serde_json::from_str(
        r#"{"keyframes":{"keys":[{"at":0,"value":0},{"at":15,"value":1}],"opts":{"right":"clamp"}}}"#,
    )
    .unwrap();
    assert_eq!(a.sample(ctx(0, 30)), 1.0);

    let s: Anim = serde_json::from_str(r#"{"spring":{"config":{"damping":12}}}"#).unwrap();
    let Anim::Spring { config, to, .. } = s else {
        panic!("expected spring");
    };
    assert_eq!(config.stiffness, 100.0);
    assert_eq!(to, 1.0);
}
