//! Integration test: a fault halts the animation at the failing frame.
//!
//! Drives hand-built scenes through [`FieldAnimation::from_parts`] so
//! trajectories that misbehave on purpose can be injected. The sink must
//! see every frame before the fault and nothing after it.

use quiver_core::{EvalError, FieldError, StepId};
use quiver_engine::{AnimationError, FieldAnimation, Scene, TimeConfig};
use quiver_test_utils::{
    failing_charge, static_charge, unit_aggregator, FailingSink, RecordingSink,
};

use glam::DVec2;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("quiver_engine=debug")
        .try_init();
}

fn time(dt: f64, steps: u64) -> TimeConfig {
    TimeConfig {
        dt,
        steps,
        ..TimeConfig::default()
    }
}

#[test]
fn non_finite_trajectory_halts_at_first_bad_frame() {
    init_logging();
    let mut scene = Scene::new();
    scene
        .insert("anchor", static_charge(-2.0, DVec2::new(1.0, 1.0)))
        .unwrap();
    scene.insert("faulty", failing_charge(0.3)).unwrap();

    let mut animation = FieldAnimation::from_parts(unit_aggregator(), scene, &time(0.25, 6)).unwrap();
    let mut sink = RecordingSink::new();
    let err = animation.run(&mut sink).unwrap_err();

    match err {
        AnimationError::FrameFailed {
            step,
            time,
            reason:
                FieldError::ChargeFailed {
                    index,
                    reason: EvalError::NonFiniteTrajectory { .. },
                },
        } => {
            assert_eq!(step, StepId(2));
            assert_eq!(time, 0.5);
            assert_eq!(index, 1);
        }
        other => panic!("expected a trajectory fault, got {other:?}"),
    }
    assert_eq!(sink.steps(), vec![StepId(0), StepId(1)]);
    for frame in sink.frames() {
        assert!(frame.snapshot.field_grid().iter().all(|f| f.is_finite()));
        assert_eq!(frame.markers.len(), 2);
    }
}

#[test]
fn halted_animation_does_not_skip_the_failing_frame() {
    let mut scene = Scene::new();
    scene.insert("faulty", failing_charge(0.3)).unwrap();
    let mut animation = FieldAnimation::from_parts(unit_aggregator(), scene, &time(0.25, 6)).unwrap();

    assert!(animation.step().unwrap().is_some());
    assert!(animation.step().unwrap().is_some());
    for _ in 0..3 {
        assert!(animation.step().is_err());
        assert_eq!(animation.current_step(), StepId(2));
    }
}

#[test]
fn sink_fault_stops_generation() {
    init_logging();
    let mut scene = Scene::new();
    scene
        .insert("anchor", static_charge(1.0, DVec2::ZERO))
        .unwrap();
    let mut animation = FieldAnimation::from_parts(unit_aggregator(), scene, &time(0.5, 10)).unwrap();
    let mut sink = FailingSink::new(3);

    let err = animation.run(&mut sink).unwrap_err();
    assert!(matches!(err, AnimationError::SinkFailed { step: StepId(3), .. }));
    assert_eq!(sink.calls(), 4);
    // Frame 3 was generated before the sink refused it.
    assert_eq!(animation.current_step(), StepId(4));
    assert!(!animation.is_finished());
}

#[test]
fn from_parts_validates_the_time_axis() {
    let err = FieldAnimation::from_parts(unit_aggregator(), Scene::new(), &time(0.1, 0)).unwrap_err();
    assert_eq!(err, quiver_engine::ConfigError::NoSteps);
}

#[test]
fn empty_scene_renders_zero_fields() {
    let mut animation = FieldAnimation::from_parts(unit_aggregator(), Scene::new(), &time(0.1, 3)).unwrap();
    let mut sink = RecordingSink::new();
    assert_eq!(animation.run(&mut sink).unwrap().frames, 3);
    for frame in sink.frames() {
        assert_eq!(frame.snapshot.max_field_magnitude(), 0.0);
        assert!(frame.markers.is_empty());
    }
}
