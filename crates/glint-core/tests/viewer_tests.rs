// Host-side tests driving the whole viewer the way a frontend does.

mod common;

use common::*;
use glam::Vec3;
use glint_core::*;
use std::time::Duration;

fn two_ball_scene() -> (Scene, ObjectId, ObjectId) {
    let mut scene = Scene::new();
    let front = add_ball(&mut scene, Vec3::new(0.0, 0.0, 2.0), 1.0, 0xffaa00);
    let back = add_ball(&mut scene, Vec3::new(0.0, 0.0, -2.0), 1.0, 0x00aaff);
    (scene, front, back)
}

#[test]
fn empty_scene_runs_the_whole_lifecycle() {
    let mut viewer = started_viewer(Scene::new());
    let mut overlay = RecordingOverlay::default();

    viewer.on_asset_started("textures/env.hdr");
    pointer_to_centre(&mut viewer);
    assert_eq!(viewer.on_click(WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0), None);
    assert!(!viewer.lock_on().is_active());
    viewer.on_asset_finished("textures/env.hdr", ms(0), &mut overlay);

    let mut t = 0;
    let mut last = None;
    while t <= 6000 {
        last = viewer.tick(ms(t), &mut overlay);
        let report = last.expect("running viewer reports");
        assert_eq!(report.hovered, None);
        assert_eq!(report.highlight, HighlightChange::Unchanged);
        t += 16;
    }
    assert_eq!(last.map(|r| r.loading), Some(LoadingPhase::Done));
    assert_eq!(viewer.highlight_state(), HighlightState::Idle);
    assert_eq!(overlay.count(&OverlayCall::EndBar), 1);
    assert_eq!(overlay.count(&OverlayCall::HideTitle), 1);
}

#[test]
fn tick_before_start_and_after_stop_does_nothing() {
    let mut viewer = Viewer::new(test_config(), Scene::new(), WIDTH, HEIGHT).expect("config");
    let mut overlay = RecordingOverlay::default();
    assert!(viewer.tick(ms(0), &mut overlay).is_none());

    viewer.start(ms(0));
    assert_eq!(viewer.tick(ms(16), &mut overlay).map(|r| r.frame), Some(1));
    viewer.stop();
    assert!(!viewer.is_running());
    assert!(viewer.tick(ms(32), &mut overlay).is_none());
}

#[test]
fn hover_highlights_nearest_sphere_through_tick() {
    let (scene, front, back) = two_ball_scene();
    let mut viewer = started_viewer(scene);
    let mut overlay = RecordingOverlay::default();

    pointer_to_centre(&mut viewer);
    let report = viewer.tick(ms(16), &mut overlay).expect("report");
    assert_eq!(report.hovered.map(|h| h.id), Some(front));
    assert_eq!(report.highlight, HighlightChange::Entered(front));
    let lit = viewer.scene.get(front).expect("front");
    assert_eq!(lit.material.emissive, lit.material.base_color);
    assert_eq!(
        viewer.scene.get(back).expect("back").material.emissive,
        Color::BLACK
    );

    let again = viewer.tick(ms(32), &mut overlay).expect("report");
    assert_eq!(again.highlight, HighlightChange::Unchanged);

    viewer.on_pointer_move(0.0, 0.0);
    let cleared = viewer.tick(ms(48), &mut overlay).expect("report");
    assert_eq!(cleared.highlight, HighlightChange::Cleared(front));
    assert_eq!(
        viewer.scene.get(front).expect("front").material.emissive,
        Color::BLACK
    );
}

#[test]
fn unpickable_sphere_is_looked_through() {
    let (mut scene, front, back) = two_ball_scene();
    scene.set_pickable(front, false);
    let mut viewer = started_viewer(scene);
    let mut overlay = RecordingOverlay::default();
    pointer_to_centre(&mut viewer);
    let report = viewer.tick(ms(16), &mut overlay).expect("report");
    assert_eq!(report.hovered.map(|h| h.id), Some(back));
}

#[test]
fn stop_restores_the_highlighted_material() {
    let (scene, front, _) = two_ball_scene();
    let mut viewer = started_viewer(scene);
    let mut overlay = RecordingOverlay::default();
    pointer_to_centre(&mut viewer);
    viewer.tick(ms(16), &mut overlay);
    assert_eq!(viewer.hovered(), Some(front));

    viewer.stop();
    assert_eq!(viewer.hovered(), None);
    let material = viewer.scene.get(front).expect("front").material;
    assert_eq!(material.emissive, Color::BLACK);
    assert_eq!(material.emissive_intensity, 1.0);
}

#[test]
fn double_tap_lock_on_plays_out_over_ticks() {
    let (scene, front, _) = two_ball_scene();
    let mut viewer = started_viewer(scene);
    let mut overlay = RecordingOverlay::default();
    let (x, y) = (WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0);

    viewer.on_tap(x, y, ms(100));
    assert_eq!(viewer.on_tap(x, y, ms(200)), Some(front));

    let mut finished_at = None;
    let mut t = 200;
    while finished_at.is_none() && t < 3000 {
        t += 16;
        let report = viewer.tick(ms(t), &mut overlay).expect("report");
        if let StepOutcome::Moved { finished: true, .. } = report.camera {
            finished_at = Some(t);
        }
    }
    assert!(finished_at.is_some_and(|f| f >= 1200));
    assert!(viewer
        .camera
        .eye
        .abs_diff_eq(Vec3::from(LOCK_ON_POSITION), 1e-3));
    assert_eq!(viewer.controls.target, Vec3::new(0.0, 0.0, 2.0));
}

#[test]
fn orbit_input_is_ignored_during_a_lock_on() {
    let (scene, _, _) = two_ball_scene();
    let mut viewer = started_viewer(scene);
    let mut overlay = RecordingOverlay::default();
    viewer.on_double_click(WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0, ms(0));
    assert!(viewer.lock_on().owns_camera());

    viewer.on_pointer_drag(300.0, 0.0);
    viewer.on_wheel(-1.0);
    viewer.tick(ms(2000), &mut overlay);
    assert!(!viewer.lock_on().is_active());
    let lock_on_eye = Vec3::from(LOCK_ON_POSITION);
    assert!(viewer.camera.eye.abs_diff_eq(lock_on_eye, 1e-3));

    viewer.tick(ms(2016), &mut overlay);
    assert!(viewer.camera.eye.abs_diff_eq(lock_on_eye, 1e-3));

    viewer.on_pointer_drag(300.0, 0.0);
    viewer.tick(ms(2032), &mut overlay);
    assert!(!viewer.camera.eye.abs_diff_eq(lock_on_eye, 1.0));
}

#[test]
fn lock_on_to_a_distant_sphere_holds_its_end_position() {
    let mut scene = Scene::new();
    let far = add_ball(&mut scene, Vec3::new(0.0, 0.0, -100_000.0), 1000.0, 0x33ff99);
    let mut viewer = started_viewer(scene);
    let mut overlay = RecordingOverlay::default();

    assert_eq!(
        viewer.on_double_click(WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0, ms(0)),
        Some(far)
    );
    let lock_on_eye = Vec3::from(LOCK_ON_POSITION);
    let mut t = 0;
    while viewer.lock_on().is_active() && t < 3000 {
        t += 16;
        viewer.tick(ms(t), &mut overlay);
    }
    assert!(viewer.camera.eye.abs_diff_eq(lock_on_eye, 1e-3));
    assert_eq!(viewer.controls.target, Vec3::new(0.0, 0.0, -100_000.0));

    for _ in 0..5 {
        t += 16;
        let report = viewer.tick(ms(t), &mut overlay).expect("report");
        assert_eq!(report.camera, StepOutcome::Idle);
        assert!(viewer.camera.eye.abs_diff_eq(lock_on_eye, 1e-3));
    }
}

#[test]
fn drag_orbits_the_camera_when_idle() {
    let mut viewer = started_viewer(Scene::new());
    let mut overlay = RecordingOverlay::default();
    let eye = viewer.camera.eye;
    viewer.on_pointer_drag(120.0, 0.0);
    viewer.tick(ms(16), &mut overlay);
    assert_ne!(viewer.camera.eye, eye);
    assert!((viewer.camera.eye.length() - eye.length()).abs() < 1e-3);
}

#[test]
fn default_config_starts_with_a_fly_in() {
    let scene = demo_scene(20, 1);
    let mut viewer = Viewer::new(ViewerConfig::default(), scene, WIDTH, HEIGHT).expect("config");
    viewer.start(Duration::ZERO);
    assert_eq!(viewer.camera.eye.z, INTRO_START_Z);
    assert!(viewer.lock_on().is_active());
    assert_eq!(viewer.lock_on().active_target(), None);
}

#[test]
fn drag_orbits_during_the_fly_in() {
    let mut viewer = Viewer::new(ViewerConfig::default(), Scene::new(), WIDTH, HEIGHT)
        .expect("config");
    let mut overlay = RecordingOverlay::default();
    viewer.start(ms(0));
    viewer.tick(ms(16), &mut overlay);
    assert_eq!(viewer.camera.eye.x, 0.0);
    let z_before = viewer.camera.eye.z;

    viewer.on_pointer_drag(300.0, 0.0);
    let report = viewer.tick(ms(32), &mut overlay).expect("report");
    assert!(viewer.camera.eye.x.abs() > 1.0);
    assert!(viewer.camera.eye.z > z_before && viewer.camera.eye.z < 0.0);
    assert!(matches!(
        report.camera,
        StepOutcome::Moved {
            finished: false,
            ..
        }
    ));
    assert!(viewer.lock_on().is_active());
    assert!(!viewer.lock_on().owns_camera());
}

#[test]
fn resize_updates_aspect_and_pointer_mapping() {
    let mut viewer = started_viewer(Scene::new());
    viewer.on_resize(1000, 500);
    assert_eq!(viewer.viewport(), (1000, 500));
    assert_eq!(viewer.camera.aspect, 2.0);

    viewer.on_pointer_move(1000.0, 0.0);
    assert_eq!(viewer.pointer().ndc, glam::Vec2::new(1.0, 1.0));

    viewer.on_resize(0, 500);
    assert_eq!(viewer.viewport(), (1000, 500));
}

#[test]
fn click_reports_object_under_pointer() {
    let (scene, front, _) = two_ball_scene();
    let mut viewer = started_viewer(scene);
    assert_eq!(
        viewer.on_click(WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0),
        Some(front)
    );
    assert_eq!(viewer.on_click(1.0, 1.0), None);
    assert!(!viewer.lock_on().is_active());
}

#[test]
fn invalid_configs_are_rejected() {
    let mut bad_planes = test_config();
    bad_planes.znear = 10.0;
    bad_planes.zfar = 1.0;
    assert!(matches!(
        Viewer::new(bad_planes, Scene::new(), WIDTH, HEIGHT),
        Err(ConfigError::InvalidClipPlanes { .. })
    ));

    let mut zero_window = test_config();
    zero_window.double_tap_window = Duration::ZERO;
    assert_eq!(
        zero_window.validate(),
        Err(ConfigError::NonPositiveDuration {
            name: "double_tap_window",
            value: Duration::ZERO
        })
    );

    let mut bad_fov = test_config();
    bad_fov.fovy_degrees = 180.0;
    assert_eq!(bad_fov.validate(), Err(ConfigError::InvalidFov(180.0)));

    assert!(ViewerConfig::default().validate().is_ok());
}
