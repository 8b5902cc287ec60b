//! Perspective camera and damped orbit controls.
//!
//! These types avoid platform APIs; both frontends feed them input and read
//! back matrices for their uniforms.

use crate::constants::{
    CAMERA_FOVY_DEGREES, CAMERA_ZFAR, CAMERA_ZNEAR, ORBIT_DAMPING_FACTOR, ORBIT_MAX_DISTANCE,
    ORBIT_MIN_DISTANCE, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_STEP,
};
use crate::picking::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::f32::consts::{PI, TAU};

const POLE_EPSILON: f32 = 1e-6;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    world: Mat4,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, aspect: f32) -> Self {
        let mut camera = Self {
            eye,
            target,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
            world: Mat4::IDENTITY,
        };
        camera.update_world_matrix();
        camera
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    #[inline]
    pub fn look_at(&mut self, point: Vec3) {
        self.target = point;
    }

    /// Recomputes the aspect ratio; zero-sized viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.aspect = width as f32 / height as f32;
        true
    }

    /// Refreshes the cached camera-to-world transform after eye/target edits.
    pub fn update_world_matrix(&mut self) {
        let view = self.view_matrix();
        if view.is_finite() {
            self.world = view.inverse();
        }
    }

    #[inline]
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    /// Camera right and up axes in world space, taken from the cached world matrix.
    pub fn basis(&self) -> (Vec3, Vec3) {
        (
            self.world.x_axis.truncate().normalize_or_zero(),
            self.world.y_axis.truncate().normalize_or_zero(),
        )
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// World-space ray from the eye through a point in normalized device coordinates.
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far: Vec3 = p_far.truncate() / p_far.w;
        Ray::new(self.eye, far - self.eye)
    }
}

/// Orbit controls around `target` with exponential damping.
///
/// Input handlers only accumulate deltas; [`OrbitControls::update`] applies
/// them to the camera once per frame.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_step: ORBIT_ZOOM_STEP,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Pointer drag in pixels; a drag across the full viewport height turns a full circle.
    pub fn drag(&mut self, dx_px: f32, dy_px: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.delta_theta -= TAU * dx_px / viewport_height * self.rotate_speed;
        self.delta_phi -= TAU * dy_px / viewport_height * self.rotate_speed;
    }

    /// Wheel notch; negative `delta_y` moves closer.
    pub fn wheel(&mut self, delta_y: f32) {
        if delta_y < 0.0 {
            self.scale *= self.zoom_step;
        } else if delta_y > 0.0 {
            self.scale /= self.zoom_step;
        }
    }

    /// Drops pending input, used while another writer owns the camera.
    pub fn discard_input(&mut self) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
    }

    pub fn has_pending_motion(&self) -> bool {
        self.delta_theta.abs() > POLE_EPSILON
            || self.delta_phi.abs() > POLE_EPSILON
            || (self.scale - 1.0).abs() > POLE_EPSILON
    }

    /// Applies pending deltas and points the camera at `target`. Returns whether the eye moved.
    ///
    /// With nothing pending the eye is left exactly where it is.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.has_pending_motion() {
            self.discard_input();
            camera.look_at(self.target);
            return false;
        }
        let offset = camera.eye - self.target;
        let radius = offset.length();
        if radius <= POLE_EPSILON {
            camera.look_at(self.target);
            return false;
        }

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        if self.enable_damping {
            theta += self.delta_theta * self.damping_factor;
            phi += self.delta_phi * self.damping_factor;
        } else {
            theta += self.delta_theta;
            phi += self.delta_phi;
        }
        phi = phi.clamp(POLE_EPSILON, PI - POLE_EPSILON);
        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        let new_eye = self.target + new_offset;
        let moved = new_eye.distance_squared(camera.eye) > POLE_EPSILON;
        camera.eye = new_eye;
        camera.look_at(self.target);

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;
        moved
    }
}
