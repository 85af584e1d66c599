use std::time::Duration;

use dataflow_viz::scene::{
    self, SceneState, TensorId, choreography, tensor_home, unit_slot,
};
use dataflow_viz::timeline::Timeline;

fn mk_timeline() -> Timeline {
    Timeline::new(choreography::vector_add_steps())
}

fn advance(timeline: &mut Timeline, scene: &mut SceneState, secs: f32) {
    timeline.advance(scene, Duration::from_secs_f32(secs));
}

/// Seconds until the computation flash begins (steps 1 and 2).
fn secs_until_flash() -> f32 {
    choreography::COPY_SECS + choreography::COPY_STAGGER + choreography::STAGE_SECS
}

#[test]
fn initial_state_matches_documentation() {
    let scene = SceneState::new();

    assert!(scene.a.visible);
    assert!(scene.b.visible);
    assert_eq!(scene.a.scale, 1.0);
    assert_eq!(scene.b.scale, 1.0);
    assert_eq!(scene.a.position, tensor_home(TensorId::A));
    assert_eq!(scene.b.position, tensor_home(TensorId::B));

    assert!(!scene.c.visible);
    assert_eq!(scene.c.scale, 0.0);

    assert_eq!(scene.unit.emissive_intensity, scene::UNIT_BASE_INTENSITY);
    assert_eq!(scene.unit.color, scene::srgb(scene::VECTOR_UNIT_COLOR));
    assert_eq!(scene.visible_count(), 2);
}

#[test]
fn timeline_is_idle_until_played() {
    let mut timeline = mk_timeline();
    let mut scene = SceneState::new();

    assert!(!timeline.is_active());
    advance(&mut timeline, &mut scene, 5.0);
    assert_eq!(scene, SceneState::new());
}

#[test]
fn reset_restores_the_initial_state_exactly() {
    let mut timeline = mk_timeline();
    let mut scene = SceneState::new();

    timeline.play();
    advance(&mut timeline, &mut scene, 2.8);
    assert_ne!(scene, SceneState::new());

    timeline.reset(&mut scene);
    assert_eq!(scene, SceneState::new());
    assert!(!timeline.is_active());
    assert!(!timeline.is_complete());
}

#[test]
fn reset_is_idempotent() {
    let mut timeline = mk_timeline();
    let mut scene = SceneState::new();

    timeline.play();
    advance(&mut timeline, &mut scene, 3.3);
    timeline.reset(&mut scene);
    let once = scene.clone();
    timeline.reset(&mut scene);
    assert_eq!(scene, once);

    // Resetting an untouched timeline is a no-op as well.
    let mut fresh = mk_timeline();
    let mut fresh_scene = SceneState::new();
    fresh.reset(&mut fresh_scene);
    assert_eq!(fresh_scene, SceneState::new());
}

#[test]
fn play_while_running_does_not_restart() {
    let mut reference = mk_timeline();
    let mut reference_scene = SceneState::new();
    let mut noisy = mk_timeline();
    let mut noisy_scene = SceneState::new();

    reference.play();
    noisy.play();

    for _ in 0..8 {
        advance(&mut reference, &mut reference_scene, 0.37);
        noisy.play();
        advance(&mut noisy, &mut noisy_scene, 0.37);
        noisy.play();
        assert_eq!(noisy_scene, reference_scene);
    }
}

#[test]
fn play_with_zero_elapsed_time_changes_nothing() {
    let mut timeline = mk_timeline();
    let mut scene = SceneState::new();

    timeline.play();
    advance(&mut timeline, &mut scene, 1.0);
    let snapshot = scene.clone();

    timeline.play();
    advance(&mut timeline, &mut scene, 0.0);
    assert_eq!(scene, snapshot);
}

#[test]
fn stagger_delays_the_second_input() {
    let mut timeline = mk_timeline();
    let mut scene = SceneState::new();

    timeline.play();
    advance(&mut timeline, &mut scene, 0.1);

    // A is on its way to the unified buffer, B hasn't started yet.
    assert!(scene.a.position.z < tensor_home(TensorId::A).z);
    assert_eq!(scene.b.position, tensor_home(TensorId::B));
}

#[test]
fn flash_raises_the_emissive_and_leaves_tensors_alone() {
    let mut timeline = mk_timeline();
    let mut scene = SceneState::new();

    timeline.play();
    // Overshoot the staging steps slightly so we land inside the flash.
    advance(&mut timeline, &mut scene, secs_until_flash() + 0.05);

    assert_eq!(scene.a.position, unit_slot(TensorId::A));
    assert_eq!(scene.b.position, unit_slot(TensorId::B));
    assert!(scene.unit.emissive_intensity > scene::UNIT_BASE_INTENSITY);
    assert!(scene.unit.emissive_intensity <= choreography::FLASH_INTENSITY);

    // Half-way through the flash nothing about the tensors may change.
    let snapshot = (scene.a.clone(), scene.b.clone(), scene.c.clone());
    advance(&mut timeline, &mut scene, 0.1);
    assert_eq!((scene.a.clone(), scene.b.clone(), scene.c.clone()), snapshot);
}

#[test]
fn swap_happens_right_after_the_flash() {
    let mut timeline = mk_timeline();
    let mut scene = SceneState::new();
    let flash_secs =
        choreography::FLASH_HALF_PERIOD * 2.0 * choreography::FLASH_CYCLES as f32;

    timeline.play();
    advance(&mut timeline, &mut scene, secs_until_flash() + flash_secs + 0.05);

    // The inputs were consumed, the result sits in the core and is growing.
    assert!(!scene.a.visible);
    assert!(!scene.b.visible);
    assert!(scene.c.visible);
    assert_eq!(scene.c.position, unit_slot(TensorId::C));
    assert!(scene.c.scale > 0.0);
    assert!(scene.c.scale < 1.0);

    // The flash landed back on the baseline before the swap.
    assert_eq!(scene.unit.emissive_intensity, scene::UNIT_BASE_INTENSITY);
    assert_eq!(scene.unit.color, scene::srgb(scene::VECTOR_UNIT_COLOR));
}

#[test]
fn swap_is_atomic_for_every_observable_frame() {
    let mut timeline = mk_timeline();
    let mut scene = SceneState::new();

    timeline.play();
    let mut guard = 0;
    while timeline.is_active() {
        advance(&mut timeline, &mut scene, 0.01);

        // Either both inputs or exactly the result, never anything else.
        let count = scene.visible_count();
        assert!(count == 1 || count == 2, "visible count was {}", count);
        if scene.c.visible {
            assert!(!scene.a.visible && !scene.b.visible);
        } else {
            assert!(scene.a.visible && scene.b.visible);
        }

        guard += 1;
        assert!(guard < 10_000, "timeline did not complete");
    }
}

#[test]
fn full_run_conserves_one_tile_at_the_source() {
    let mut timeline = mk_timeline();
    let mut scene = SceneState::new();

    timeline.play();
    // A single oversized frame must still land on the exact end state.
    advance(&mut timeline, &mut scene, choreography::total_secs() + 0.5);

    assert!(!timeline.is_active());
    assert!(timeline.is_complete());
    assert!(!scene.a.visible);
    assert!(!scene.b.visible);
    assert!(scene.c.visible);
    assert_eq!(scene.c.scale, 1.0);
    assert_eq!(scene.c.position, tensor_home(TensorId::C));
    assert_eq!(scene.visible_count(), 1);
    assert_eq!(scene.unit.emissive_intensity, scene::UNIT_BASE_INTENSITY);
    assert_eq!(scene.unit.color, scene::srgb(scene::VECTOR_UNIT_COLOR));
}

#[test]
fn play_after_completion_is_a_noop_until_reset() {
    let mut timeline = mk_timeline();
    let mut scene = SceneState::new();

    timeline.play();
    advance(&mut timeline, &mut scene, choreography::total_secs() + 1.0);
    let done = scene.clone();

    timeline.play();
    assert!(!timeline.is_active());
    advance(&mut timeline, &mut scene, 1.0);
    assert_eq!(scene, done);

    // After a reset the pipeline replays from the top.
    timeline.reset(&mut scene);
    timeline.play();
    assert!(timeline.is_active());
    advance(&mut timeline, &mut scene, 0.5);
    assert!(scene.a.position.z < tensor_home(TensorId::A).z);
}

#[test]
fn choreography_length_matches_the_step_durations() {
    let steps = choreography::vector_add_steps();
    let summed: f32 = steps.iter().map(|s| s.duration()).sum();
    assert_eq!(summed, choreography::total_secs());
    // Two travel steps in, flash, swap, grow, two travel steps out.
    assert_eq!(steps.len(), 7);
}
