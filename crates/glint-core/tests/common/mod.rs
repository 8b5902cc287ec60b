// Shared fixtures for the host-side integration tests.

#![allow(dead_code)]
use glam::Vec3;
use glint_core::{Color, LoadingSequencer, ObjectId, OverlaySink, Scene, Viewer, ViewerConfig};
use std::time::Duration;

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 600;

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayCall {
    Progress(f32),
    OverlayOpacity(f32),
    EndBar,
    TitleOpacity(f32),
    HideTitle,
}

#[derive(Default, Debug)]
pub struct RecordingOverlay {
    pub calls: Vec<OverlayCall>,
}

impl RecordingOverlay {
    pub fn progress(&self) -> Vec<f32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                OverlayCall::Progress(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &OverlayCall) -> usize {
        self.calls.iter().filter(|c| *c == wanted).count()
    }

    pub fn overlay_opacities(&self) -> Vec<f32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                OverlayCall::OverlayOpacity(o) => Some(*o),
                _ => None,
            })
            .collect()
    }
}

impl OverlaySink for RecordingOverlay {
    fn set_progress(&mut self, ratio: f32) {
        self.calls.push(OverlayCall::Progress(ratio));
    }
    fn set_overlay_opacity(&mut self, opacity: f32) {
        self.calls.push(OverlayCall::OverlayOpacity(opacity));
    }
    fn end_loading_bar(&mut self) {
        self.calls.push(OverlayCall::EndBar);
    }
    fn set_title_opacity(&mut self, opacity: f32) {
        self.calls.push(OverlayCall::TitleOpacity(opacity));
    }
    fn hide_title(&mut self) {
        self.calls.push(OverlayCall::HideTitle);
    }
}

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Sphere whose world radius is `radius` (the base geometry radius is 100).
pub fn add_ball(scene: &mut Scene, position: Vec3, radius: f32, hex: u32) -> ObjectId {
    scene.add_sphere(position, radius / glint_core::SPHERE_RADIUS, Color::from_hex(hex))
}

/// Camera on +Z looking at the origin, no fly-in.
pub fn test_config() -> ViewerConfig {
    let mut config = ViewerConfig::default().without_intro();
    config.camera_start = Vec3::new(0.0, 0.0, 10.0);
    config
}

pub fn started_viewer(scene: Scene) -> Viewer {
    let mut viewer = Viewer::new(test_config(), scene, WIDTH, HEIGHT).expect("valid config");
    viewer.start(Duration::ZERO);
    viewer
}

pub fn pointer_to_centre(viewer: &mut Viewer) {
    viewer.on_pointer_move(WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0);
}

pub fn finished_sequencer_calls(seq: &mut LoadingSequencer, overlay: &mut RecordingOverlay) {
    let mut t = 0;
    while !seq.is_done() && t < 20_000 {
        seq.tick(ms(t), overlay);
        t += 16;
    }
}
