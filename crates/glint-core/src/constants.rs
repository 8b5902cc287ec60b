use glam::Vec3;

// Shared tuning constants used by both web and native frontends.

// Scene layout
pub const SPHERE_COUNT: usize = 500;
pub const SPHERE_RADIUS: f32 = 100.0; // geometry radius before per-object scale
pub const SCATTER_EXTENT: f32 = 1000.0; // x/y spread, centred on the origin
pub const SCATTER_Z_STEP: f32 = 300.0; // each sphere sits this much further down -Z
pub const MIN_SPHERE_SCALE: f32 = 0.05; // keeps random scales away from zero-size spheres
pub const POINT_LIGHT_POSITION: [f32; 3] = [200.0, 200.0, 200.0];
pub const BACKGROUND_COLOR: [f32; 3] = [0.02, 0.02, 0.04];
pub const OVERLAY_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

// Camera
pub const CAMERA_FOVY_DEGREES: f32 = 70.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 10_000.0;
pub const CAMERA_START: [f32; 3] = [0.0, 50.0, 150.0];
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0; // full viewport height drag = 2*PI
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // dolly scale per wheel notch
pub const ORBIT_MIN_DISTANCE: f32 = 1.0;
pub const ORBIT_MAX_DISTANCE: f32 = f32::INFINITY;

// Start-up fly-in
pub const INTRO_START_Z: f32 = -20_000.0;
pub const INTRO_DURATION_SEC: f32 = 100.0;

// Interaction
pub const HIGHLIGHT_EMISSIVE_INTENSITY: f32 = 0.5;
pub const LOCK_ON_POSITION: [f32; 3] = [100.0, 10.0, 100.0];
pub const LOCK_ON_DURATION_SEC: f32 = 1.0;
pub const DOUBLE_TAP_WINDOW_MS: u64 = 300;
pub const DRAG_CLICK_SLOP_PX: f32 = 4.0; // pointer travel that turns a press into a drag

// Loading overlay
pub const FADE_DELAY_SEC: f32 = 0.5;
pub const FADE_DURATION_SEC: f32 = 3.0;
pub const TITLE_HIDE_DELAY_SEC: f32 = 2.0;

#[inline]
pub fn camera_start_vec3() -> Vec3 {
    Vec3::from(CAMERA_START)
}

#[inline]
pub fn point_light_vec3() -> Vec3 {
    Vec3::from(POINT_LIGHT_POSITION)
}
