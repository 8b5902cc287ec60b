// Host-side tests for ray casting and nearest-hit selection.

mod common;

use common::*;
use glam::{Vec2, Vec3};
use glint_core::*;
use rand::prelude::*;

fn camera_on_z(z: f32) -> Camera {
    Camera::new(Vec3::new(0.0, 0.0, z), Vec3::ZERO, WIDTH as f32 / HEIGHT as f32)
}

fn centre_pointer() -> PointerState {
    PointerState { ndc: Vec2::ZERO }
}

#[test]
fn ray_sphere_intersection_basic() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0);
    assert_eq!(t, Some(3.0));
}

#[test]
fn ray_sphere_intersection_miss() {
    let t = ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 2.0);
    assert!(t.is_none());
}

#[test]
fn ray_sphere_behind_origin_is_ignored() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 2.0);
    assert!(t.is_none());
}

#[test]
fn ray_sphere_from_inside_reports_exit() {
    let t = ray_sphere(Vec3::new(0.0, 0.0, 5.0), Vec3::X, Vec3::new(0.0, 0.0, 5.0), 3.0)
        .expect("exit hit");
    assert!((t - 3.0).abs() < 1e-5);
}

#[test]
fn centre_ray_points_down_the_view_axis() {
    let camera = camera_on_z(10.0);
    let ray = camera.ray_through(Vec2::ZERO);
    assert!((ray.origin - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
    assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
}

#[test]
fn pick_returns_nearest_of_stacked_spheres() {
    let mut scene = Scene::new();
    let far = add_ball(&mut scene, Vec3::new(0.0, 0.0, -20.0), 1.0, 0x00ff00);
    let near = add_ball(&mut scene, Vec3::ZERO, 1.0, 0xff0000);
    let hit = pick_nearest(&camera_on_z(10.0), &centre_pointer(), &scene).expect("hit");
    assert_eq!(hit.id, near);
    assert!((hit.distance - 9.0).abs() < 1e-3);

    let all = intersect_all(&camera_on_z(10.0).ray_through(Vec2::ZERO), &scene);
    let ids: Vec<_> = all.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![near, far]);
}

#[test]
fn exact_overlap_resolves_to_first_inserted() {
    let mut scene = Scene::new();
    let first = add_ball(&mut scene, Vec3::ZERO, 1.0, 0x111111);
    let second = add_ball(&mut scene, Vec3::ZERO, 1.0, 0x222222);
    for _ in 0..3 {
        let hit = pick_nearest(&camera_on_z(10.0), &centre_pointer(), &scene).expect("hit");
        assert_eq!(hit.id, first);
    }
    let all = intersect_all(&camera_on_z(10.0).ray_through(Vec2::ZERO), &scene);
    assert_eq!(all[0].id, first);
    assert_eq!(all[1].id, second);
}

#[test]
fn pick_matches_first_of_all_hits_in_random_fields() {
    let mut rng = StdRng::seed_from_u64(11);
    let camera = camera_on_z(30.0);
    for _ in 0..50 {
        let mut scene = Scene::new();
        for _ in 0..12 {
            let position = Vec3::new(
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-10.0..10.0),
            );
            let id = add_ball(&mut scene, position, rng.gen_range(0.5..2.0), 0x808080);
            scene.set_pickable(id, rng.gen_bool(0.8));
        }
        let pointer = PointerState {
            ndc: Vec2::new(rng.gen_range(-0.2..0.2), rng.gen_range(-0.2..0.2)),
        };
        let all = intersect_all(&camera.ray_through(pointer.ndc), &scene);
        assert_eq!(
            pick_nearest(&camera, &pointer, &scene),
            all.first().copied()
        );
    }
}

#[test]
fn lights_and_unpickable_meshes_are_never_candidates() {
    let mut scene = Scene::new();
    scene.add_light(Vec3::ZERO, Color::WHITE);
    let hidden = add_ball(&mut scene, Vec3::ZERO, 1.0, 0xabcdef);
    scene.set_pickable(hidden, false);
    assert!(pick_nearest(&camera_on_z(10.0), &centre_pointer(), &scene).is_none());

    scene.set_pickable(hidden, true);
    assert_eq!(
        pick_nearest(&camera_on_z(10.0), &centre_pointer(), &scene).map(|h| h.id),
        Some(hidden)
    );
}

#[test]
fn pointer_off_to_the_side_misses() {
    let mut scene = Scene::new();
    add_ball(&mut scene, Vec3::ZERO, 1.0, 0xffffff);
    let pointer = PointerState {
        ndc: Vec2::new(0.9, 0.9),
    };
    assert!(pick_nearest(&camera_on_z(10.0), &pointer, &scene).is_none());
}

#[test]
fn removed_object_is_no_longer_picked() {
    let mut scene = Scene::new();
    let id = add_ball(&mut scene, Vec3::ZERO, 1.0, 0xffffff);
    assert!(scene.remove(id).is_some());
    assert!(pick_nearest(&camera_on_z(10.0), &centre_pointer(), &scene).is_none());
    assert!(scene.get(id).is_none());
}

#[test]
fn client_coordinates_map_to_ndc() {
    let centre = client_to_ndc(400.0, 300.0, 800.0, 600.0).expect("ndc");
    assert!(centre.length() < 1e-6);
    let top_left = client_to_ndc(0.0, 0.0, 800.0, 600.0).expect("ndc");
    assert_eq!(top_left, Vec2::new(-1.0, 1.0));
    let outside = client_to_ndc(1600.0, 1200.0, 800.0, 600.0).expect("ndc");
    assert_eq!(outside, Vec2::new(1.0, -1.0));
    assert!(client_to_ndc(10.0, 10.0, 0.0, 600.0).is_none());
}
