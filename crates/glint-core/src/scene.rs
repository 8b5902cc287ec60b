//! Scene graph consumed by picking, highlighting and the renderers.
//!
//! Objects are owned by [`Scene`] and referred to everywhere else by [`ObjectId`]
//! handles. A handle may outlive its object; every lookup goes through
//! [`Scene::get`] / [`Scene::get_mut`] so a removed object simply reads as `None`.

use crate::constants::{
    MIN_SPHERE_SCALE, POINT_LIGHT_POSITION, SCATTER_EXTENT, SCATTER_Z_STEP, SPHERE_RADIUS,
};
use fnv::FnvHashMap;
use glam::{Mat4, Vec3};
use rand::prelude::*;

/// Stable handle to a scene object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 24-bit RGB color stored as `0xRRGGBB`, so saving and restoring is exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xffffff);

    #[inline]
    pub const fn from_hex(hex: u32) -> Self {
        Color(hex & 0x00ff_ffff)
    }

    #[inline]
    pub const fn hex(self) -> u32 {
        self.0
    }

    pub fn from_rgb(rgb: [f32; 3]) -> Self {
        let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        Color((to_byte(rgb[0]) << 16) | (to_byte(rgb[1]) << 8) | to_byte(rgb[2]))
    }

    pub fn to_rgb(self) -> [f32; 3] {
        [
            ((self.0 >> 16) & 0xff) as f32 / 255.0,
            ((self.0 >> 8) & 0xff) as f32 / 255.0,
            (self.0 & 0xff) as f32 / 255.0,
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Mesh,
    Light,
    Overlay,
}

/// Surface parameters the highlight and the renderers care about.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub base_color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
}

impl Material {
    pub fn new(base_color: Color) -> Self {
        Self {
            base_color,
            emissive: Color::BLACK,
            emissive_intensity: 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub pickable: bool,
    pub position: Vec3,
    pub scale: f32,
    /// Bounding-sphere radius of the geometry before `scale`.
    pub radius: f32,
    pub material: Material,
    world: Mat4,
}

impl SceneObject {
    #[inline]
    pub fn is_pickable(&self) -> bool {
        self.pickable && self.kind == ObjectKind::Mesh
    }

    #[inline]
    pub fn world_radius(&self) -> f32 {
        self.radius * self.scale
    }

    #[inline]
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    pub fn update_world_matrix(&mut self) {
        self.world = Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            glam::Quat::IDENTITY,
            self.position,
        );
    }
}

/// Insertion-ordered object store with an id index.
#[derive(Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    index: FnvHashMap<ObjectId, usize>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sphere(&mut self, position: Vec3, scale: f32, base_color: Color) -> ObjectId {
        self.insert(
            ObjectKind::Mesh,
            true,
            position,
            scale,
            SPHERE_RADIUS,
            Material::new(base_color),
        )
    }

    pub fn add_light(&mut self, position: Vec3, color: Color) -> ObjectId {
        self.insert(
            ObjectKind::Light,
            false,
            position,
            1.0,
            0.0,
            Material::new(color),
        )
    }

    pub fn insert(
        &mut self,
        kind: ObjectKind,
        pickable: bool,
        position: Vec3,
        scale: f32,
        radius: f32,
        material: Material,
    ) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        let mut object = SceneObject {
            id,
            kind,
            pickable,
            position,
            scale,
            radius,
            material,
            world: Mat4::IDENTITY,
        };
        object.update_world_matrix();
        self.index.insert(id, self.objects.len());
        self.objects.push(object);
        id
    }

    /// Removes an object, keeping the insertion order of the rest.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let slot = self.index.remove(&id)?;
        let removed = self.objects.remove(slot);
        for (i, obj) in self.objects.iter().enumerate().skip(slot) {
            self.index.insert(obj.id, i);
        }
        Some(removed)
    }

    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.index.get(&id).map(|&i| &self.objects[i])
    }

    #[inline]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        let i = *self.index.get(&id)?;
        self.objects.get_mut(i)
    }

    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn set_pickable(&mut self, id: ObjectId, pickable: bool) {
        if let Some(obj) = self.get_mut(id) {
            obj.pickable = pickable;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// The pickable registry: meshes with the pickable flag set, in insertion order.
    pub fn pickables(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| o.is_pickable())
    }

    pub fn lights(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| o.kind == ObjectKind::Light)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Demo field: one point light plus `count` randomly tinted spheres receding down -Z.
pub fn demo_scene(count: usize, seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::new();
    scene.add_light(Vec3::from(POINT_LIGHT_POSITION), Color::WHITE);
    for i in 0..count {
        let color = Color::from_hex(rng.gen_range(0..=0x00ff_ffff));
        let scale = rng.gen::<f32>().max(MIN_SPHERE_SCALE);
        let position = Vec3::new(
            (rng.gen::<f32>() - 0.5) * SCATTER_EXTENT,
            (rng.gen::<f32>() - 0.5) * SCATTER_EXTENT,
            -(i as f32) * SCATTER_Z_STEP,
        );
        scene.add_sphere(position, scale, color);
    }
    log::info!(
        "[scene] populated {} spheres (seed {}), {} objects total",
        count,
        seed,
        scene.len()
    );
    scene
}
