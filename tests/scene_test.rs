use std::time::Duration;

use cgmath::{Deg, EuclideanSpace, MetricSpace, Point3};
use dataflow_viz::camera::{Camera, CameraController, Projection, default_camera};
use dataflow_viz::scene::{self, SceneState, TensorId};
use dataflow_viz::session::Session;
use dataflow_viz::timeline::Ease;

#[test]
fn srgb_maps_the_palette_endpoints() {
    assert_eq!(scene::srgb(0x000000), [0.0, 0.0, 0.0]);
    assert_eq!(scene::srgb(0xffffff), [1.0, 1.0, 1.0]);

    // Linear values are darker than their sRGB encoding.
    let teal = scene::srgb(scene::VECTOR_UNIT_COLOR);
    assert!(teal[0] < 0x45 as f32 / 255.0);
    assert!(teal.iter().all(|c| (0.0..=1.0).contains(c)));
}

#[test]
fn tensor_slots_line_up_along_the_bus() {
    for id in [TensorId::A, TensorId::B, TensorId::C] {
        let home = scene::tensor_home(id);
        let buffer = scene::buffer_slot(id);
        let unit = scene::unit_slot(id);

        // Tiles keep their lane (x) across the whole journey.
        assert_eq!(home.x, buffer.x);
        assert_eq!(buffer.x, unit.x);
        assert_eq!(home.z, scene::GLOBAL_MEMORY_POS[2]);
        assert_eq!(buffer.z, scene::UNIFIED_BUFFER_POS[2]);
        assert_eq!(unit.z, scene::VECTOR_UNIT_POS[2]);
        assert_eq!(unit.y, scene::COMPUTE_HEIGHT);
    }
}

#[test]
fn easing_curves_hit_their_endpoints() {
    for ease in [Ease::Linear, Ease::QuadIn, Ease::QuadOut, Ease::CubicInOut] {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        // Out-of-range input is clamped, not extrapolated.
        assert_eq!(ease.apply(-1.0), 0.0);
        assert_eq!(ease.apply(2.0), 1.0);
    }
    assert_eq!(Ease::CubicInOut.apply(0.5), 0.5);
    assert!(Ease::QuadIn.apply(0.25) < 0.25);
    assert!(Ease::QuadOut.apply(0.25) > 0.25);
}

#[test]
fn projection_resize_updates_the_aspect_ratio() {
    let mut projection = Projection::new(1280, 720, Deg(45.0), 0.1, 1000.0);
    assert_eq!(projection.aspect, 1280.0 / 720.0);

    projection.resize(640, 480);
    assert_eq!(projection.aspect, 640.0 / 480.0);
}

#[test]
fn resizing_does_not_disturb_the_session() {
    let mut session = Session::default();
    session.timeline.play();
    session
        .timeline
        .advance(&mut session.scene, Duration::from_secs_f32(1.2));
    let snapshot = session.scene.clone();
    let was_active = session.timeline.is_active();

    let mut projection = Projection::new(1280, 720, Deg(45.0), 0.1, 1000.0);
    projection.resize(1920, 1080);

    assert_eq!(session.scene, snapshot);
    assert_eq!(session.timeline.is_active(), was_active);
}

#[test]
fn orbit_camera_stays_on_its_sphere() {
    let camera = default_camera();
    let distance = camera.position().distance(Point3::origin());
    assert!((distance - camera.radius).abs() < 1e-4);
}

#[test]
fn controller_converges_on_the_drag_target_with_damping() {
    let mut camera = default_camera();
    let mut controller = CameraController::new(2.0, 8.0, &camera);
    let start_yaw = camera.yaw;

    controller.handle_mouse(100.0, 0.0);
    let frame = Duration::from_millis(16);

    // The first frame only moves part of the way: that is the inertia.
    controller.update(&mut camera, frame);
    let after_one = camera.yaw;
    assert!(after_one > start_yaw);
    assert!(after_one < start_yaw + cgmath::Rad(0.2));

    for _ in 0..600 {
        controller.update(&mut camera, frame);
    }
    let expected = start_yaw + cgmath::Rad(100.0 * 2.0 * 0.001);
    assert!((camera.yaw - expected).0.abs() < 1e-3);
}

#[test]
fn controller_clamps_the_pitch() {
    let mut camera = default_camera();
    let mut controller = CameraController::new(2.0, 8.0, &camera);

    controller.handle_mouse(0.0, 1e6);
    for _ in 0..600 {
        controller.update(&mut camera, Duration::from_millis(16));
    }
    assert!(camera.pitch.0 <= 1.5 + 1e-4);

    controller.handle_mouse(0.0, -1e7);
    for _ in 0..600 {
        controller.update(&mut camera, Duration::from_millis(16));
    }
    assert!(camera.pitch.0 >= 0.05 - 1e-4);
}

#[test]
fn scene_state_equality_detects_material_changes() {
    let mut scene = SceneState::new();
    let pristine = SceneState::new();
    assert_eq!(scene, pristine);

    scene.unit.emissive_intensity = 1.7;
    assert_ne!(scene, pristine);

    scene.reset();
    assert_eq!(scene, pristine);
}

#[test]
fn camera_instances_share_framing_constants() {
    let camera = Camera::new((0.0, 0.0, 0.0), Deg(56.0), Deg(29.0), 41.0);
    let default = default_camera();
    assert_eq!(camera.yaw, default.yaw);
    assert_eq!(camera.pitch, default.pitch);
    assert_eq!(camera.radius, default.radius);
}
