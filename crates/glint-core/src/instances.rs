//! GPU-facing packing shared by the web and native renderers.

use crate::camera::Camera;
use crate::constants::{point_light_vec3, BACKGROUND_COLOR, OVERLAY_COLOR};
use crate::scene::{ObjectKind, Scene};

/// Per-sphere instance data for the impostor pipeline in `shaders/scene.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereInstance {
    pub center: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
    /// rgb = emissive color, a = emissive intensity
    pub emissive: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
    pub eye: [f32; 4],
    pub light_pos: [f32; 4],
    /// rgb = overlay color, a = overlay opacity
    pub overlay: [f32; 4],
}

/// Instance attribute offsets, matching `SphereInstance`'s field order.
pub const INSTANCE_ATTRIBUTE_OFFSETS: [u64; 4] = [0, 12, 16, 32];

/// Fills `out` with every mesh in the scene, farthest from the eye first so
/// alpha-blended impostors composite correctly without a depth buffer.
pub fn pack_spheres(scene: &Scene, camera: &Camera, out: &mut Vec<SphereInstance>) {
    out.clear();
    let mut ordered: Vec<(f32, SphereInstance)> = scene
        .iter()
        .filter(|o| o.kind == ObjectKind::Mesh)
        .map(|o| {
            let [r, g, b] = o.material.base_color.to_rgb();
            let [er, eg, eb] = o.material.emissive.to_rgb();
            let instance = SphereInstance {
                center: o.position.to_array(),
                radius: o.world_radius(),
                color: [r, g, b, 1.0],
                emissive: [er, eg, eb, o.material.emissive_intensity],
            };
            (o.position.distance_squared(camera.eye), instance)
        })
        .collect();
    ordered.sort_by(|a, b| b.0.total_cmp(&a.0));
    out.extend(ordered.into_iter().map(|(_, i)| i));
}

pub fn frame_uniforms(scene: &Scene, camera: &Camera, overlay_opacity: f32) -> FrameUniforms {
    let (right, up) = camera.basis();
    let light = scene
        .lights()
        .next()
        .map(|l| l.position)
        .unwrap_or_else(point_light_vec3);
    FrameUniforms {
        view_proj: camera.view_proj().to_cols_array_2d(),
        camera_right: right.extend(0.0).to_array(),
        camera_up: up.extend(0.0).to_array(),
        eye: camera.eye.extend(1.0).to_array(),
        light_pos: light.extend(1.0).to_array(),
        overlay: [
            OVERLAY_COLOR[0],
            OVERLAY_COLOR[1],
            OVERLAY_COLOR[2],
            overlay_opacity.clamp(0.0, 1.0),
        ],
    }
}

/// Background color with the loading overlay composited on top.
pub fn clear_color(overlay_opacity: f32) -> [f64; 4] {
    let a = overlay_opacity.clamp(0.0, 1.0);
    let mix = |bg: f32, ov: f32| (bg + (ov - bg) * a) as f64;
    [
        mix(BACKGROUND_COLOR[0], OVERLAY_COLOR[0]),
        mix(BACKGROUND_COLOR[1], OVERLAY_COLOR[1]),
        mix(BACKGROUND_COLOR[2], OVERLAY_COLOR[2]),
        1.0,
    ]
}
