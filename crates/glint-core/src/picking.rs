//! Ray casting against the pickable registry.
//!
//! Results are never cached: callers re-pick every frame because both the
//! camera and the pointer may have moved since the last one.

use crate::camera::Camera;
use crate::pointer::PointerState;
use crate::scene::{ObjectId, Scene};
use glam::Vec3;

/// A world-space ray with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub id: ObjectId,
    pub distance: f32,
    pub point: Vec3,
}

/// Distance along the ray to the first sphere surface in front of the origin.
///
/// A ray starting inside the sphere reports the exit point.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    if radius <= 0.0 {
        return None;
    }
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let near = -b - sq;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sq;
    (far >= 0.0).then_some(far)
}

/// Every pickable hit along `ray`, nearest first. Equal distances keep scene order.
pub fn intersect_all(ray: &Ray, scene: &Scene) -> Vec<PickHit> {
    let mut hits: Vec<PickHit> = scene
        .pickables()
        .filter_map(|obj| {
            ray_sphere(ray.origin, ray.direction, obj.position, obj.world_radius()).map(|t| {
                PickHit {
                    id: obj.id,
                    distance: t,
                    point: ray.point_at(t),
                }
            })
        })
        .collect();
    // stable sort keeps insertion order for ties
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Nearest pickable under the pointer, if any.
pub fn pick_nearest(camera: &Camera, pointer: &PointerState, scene: &Scene) -> Option<PickHit> {
    let ray = camera.ray_through(pointer.ndc);
    if ray.direction == Vec3::ZERO {
        return None;
    }
    intersect_all(&ray, scene).into_iter().next()
}
