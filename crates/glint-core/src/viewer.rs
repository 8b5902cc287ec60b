//! The interaction core that both frontends drive.
//!
//! A [`Viewer`] owns the scene, camera and every piece of interaction state.
//! Frontends forward input events to it and call [`Viewer::tick`] once per
//! frame while [`Viewer::is_running`] holds, then render from its scene and
//! camera.

use crate::camera::{Camera, OrbitControls};
use crate::config::{ConfigError, ViewerConfig};
use crate::debounce::{TapDebounce, TapOutcome};
use crate::highlight::{HighlightChange, HighlightState, HoverHighlight};
use crate::loading::{AssetEvent, AssetTracker, LoadingPhase, LoadingSequencer, OverlaySink};
use crate::lockon::{LockOnAnimator, StepOutcome};
use crate::picking::{pick_nearest, PickHit};
use crate::pointer::PointerState;
use crate::scene::{ObjectId, Scene};
use std::time::Duration;

/// Milliseconds-accurate time since the viewer clock started.
pub struct ViewerClock {
    start: instant::Instant,
}

impl ViewerClock {
    pub fn new() -> Self {
        Self {
            start: instant::Instant::now(),
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for ViewerClock {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub hovered: Option<PickHit>,
    pub highlight: HighlightChange,
    pub camera: StepOutcome,
    pub loading: LoadingPhase,
}

pub struct Viewer {
    pub scene: Scene,
    pub camera: Camera,
    pub controls: OrbitControls,
    pointer: PointerState,
    highlight: HoverHighlight,
    lock_on: LockOnAnimator,
    taps: TapDebounce,
    loading: LoadingSequencer,
    assets: AssetTracker,
    config: ViewerConfig,
    viewport: (u32, u32),
    running: bool,
    frame: u64,
}

impl Viewer {
    pub fn new(
        config: ViewerConfig,
        scene: Scene,
        width: u32,
        height: u32,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let mut camera = Camera::new(config.camera_start, glam::Vec3::ZERO, aspect);
        camera.fovy_radians = config.fovy_degrees.to_radians();
        camera.znear = config.znear;
        camera.zfar = config.zfar;
        camera.update_world_matrix();

        let mut controls = OrbitControls::new(glam::Vec3::ZERO);
        controls.damping_factor = config.orbit_damping;

        Ok(Self {
            scene,
            camera,
            controls,
            pointer: PointerState::default(),
            highlight: HoverHighlight::new(config.highlight_intensity),
            lock_on: LockOnAnimator::new(config.lock_on_destination, config.lock_on_duration),
            taps: TapDebounce::new(config.double_tap_window),
            loading: LoadingSequencer::new(config.overlay),
            assets: AssetTracker::new(),
            viewport: (width, height),
            config,
            running: false,
            frame: 0,
        })
    }

    /// Begins ticking; also starts the fly-in if one is configured.
    pub fn start(&mut self, now: Duration) {
        if self.running {
            return;
        }
        self.running = true;
        if let Some(intro) = self.config.intro {
            self.lock_on
                .fly_in(&mut self.camera, intro.start_z, intro.duration, now);
        }
        log::info!(
            "[viewer] started with {} pickable objects",
            self.scene.pickables().count()
        );
    }

    /// Stops ticking and restores any highlighted object.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.lock_on.cancel();
        if let Some(id) = self.highlight.clear(&mut self.scene) {
            log::debug!("[viewer] cleared highlight on {} at stop", id);
        }
        log::info!("[viewer] stopped after {} frames", self.frame);
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// One frame: camera, then picking, then highlight, then overlay timers.
    pub fn tick(&mut self, now: Duration, overlay: &mut impl OverlaySink) -> Option<FrameReport> {
        if !self.running {
            return None;
        }
        self.frame += 1;
        self.taps.expire(now);

        let camera = if self.lock_on.owns_camera() {
            self.controls.discard_input();
            self.lock_on
                .step(now, &mut self.camera, &mut self.controls, &self.scene)
        } else {
            self.controls.update(&mut self.camera);
            // a running fly-in rides on top of orbit input
            let outcome = self
                .lock_on
                .step(now, &mut self.camera, &mut self.controls, &self.scene);
            self.camera.update_world_matrix();
            outcome
        };

        let hovered = pick_nearest(&self.camera, &self.pointer, &self.scene);
        let highlight = self
            .highlight
            .update(hovered.map(|h| h.id), &mut self.scene);
        match highlight {
            HighlightChange::Unchanged => {}
            change => log::debug!("[highlight] {:?}", change),
        }

        let loading = self.loading.tick(now, overlay);

        Some(FrameReport {
            frame: self.frame,
            hovered,
            highlight,
            camera,
            loading,
        })
    }

    /// Pointer position in client pixels relative to the viewport's top-left corner.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let (w, h) = self.viewport;
        if !self.pointer.update_from_client(x, y, w as f32, h as f32) {
            log::debug!("[pick] pointer move on degenerate viewport {}x{} ignored", w, h);
        }
    }

    /// Orbit drag in pixels. Ignored while a lock-on owns the camera.
    pub fn on_pointer_drag(&mut self, dx: f32, dy: f32) {
        if self.lock_on.owns_camera() {
            return;
        }
        self.controls.drag(dx, dy, self.viewport.1 as f32);
    }

    pub fn on_wheel(&mut self, delta_y: f32) {
        if self.lock_on.owns_camera() {
            return;
        }
        self.controls.wheel(delta_y);
    }

    /// Single click: updates the pointer and reports what is under it.
    pub fn on_click(&mut self, x: f32, y: f32) -> Option<ObjectId> {
        self.on_pointer_move(x, y);
        let hit = self.pick();
        log::debug!("[pick] click -> {:?}", hit);
        hit
    }

    /// Native double-click: already resolved, bypasses the tap debounce.
    pub fn on_double_click(&mut self, x: f32, y: f32, now: Duration) -> Option<ObjectId> {
        self.on_pointer_move(x, y);
        self.trigger_lock_on(now)
    }

    /// A tap on a platform without native double-tap. Returns the lock-on target
    /// when this tap completes a double activation.
    pub fn on_tap(&mut self, x: f32, y: f32, now: Duration) -> Option<ObjectId> {
        self.on_pointer_move(x, y);
        match self.taps.tap(now) {
            TapOutcome::Armed => None,
            TapOutcome::DoubleActivation => {
                log::debug!("[gesture] double tap");
                self.trigger_lock_on(now)
            }
        }
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        if self.camera.resize(width, height) {
            self.viewport = (width, height);
            self.camera.update_world_matrix();
            log::debug!("[viewer] resized to {}x{}", width, height);
        }
    }

    pub fn on_asset_started(&mut self, url: &str) {
        self.assets.item_start(url);
    }

    pub fn on_asset_finished(&mut self, url: &str, now: Duration, overlay: &mut impl OverlaySink) {
        let events = self.assets.item_end(url);
        self.apply_asset_events(events, now, overlay);
    }

    pub fn on_asset_failed(&mut self, url: &str, now: Duration, overlay: &mut impl OverlaySink) {
        let events = self.assets.item_error(url);
        self.apply_asset_events(events, now, overlay);
    }

    /// Raw per-item progress hook.
    pub fn on_asset_progress(
        &mut self,
        url: &str,
        loaded: u32,
        total: u32,
        overlay: &mut impl OverlaySink,
    ) -> Option<f32> {
        self.loading.on_progress(url, loaded, total, overlay)
    }

    /// Raw completion hook; only the first call has any effect.
    pub fn on_assets_loaded(&mut self, now: Duration) -> bool {
        self.loading.on_complete(now)
    }

    #[inline]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    #[inline]
    pub fn hovered(&self) -> Option<ObjectId> {
        self.highlight.current()
    }

    #[inline]
    pub fn highlight_state(&self) -> HighlightState {
        self.highlight.state()
    }

    #[inline]
    pub fn lock_on(&self) -> &LockOnAnimator {
        &self.lock_on
    }

    #[inline]
    pub fn loading(&self) -> &LoadingSequencer {
        &self.loading
    }

    #[inline]
    pub fn assets(&self) -> &AssetTracker {
        &self.assets
    }

    #[inline]
    pub fn taps(&self) -> &TapDebounce {
        &self.taps
    }

    #[inline]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    #[inline]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    fn pick(&self) -> Option<ObjectId> {
        pick_nearest(&self.camera, &self.pointer, &self.scene).map(|h| h.id)
    }

    fn trigger_lock_on(&mut self, now: Duration) -> Option<ObjectId> {
        let Some(target) = self.pick() else {
            log::debug!("[gesture] double activation with nothing under the pointer");
            return None;
        };
        self.lock_on
            .lock_on(target, &self.camera, &self.scene, now)
            .map(|_| target)
    }

    fn apply_asset_events(
        &mut self,
        events: impl IntoIterator<Item = AssetEvent>,
        now: Duration,
        overlay: &mut impl OverlaySink,
    ) {
        for event in events {
            match event {
                AssetEvent::Progress { url, loaded, total } => {
                    self.loading.on_progress(&url, loaded, total, overlay);
                }
                AssetEvent::AllLoaded => {
                    self.loading.on_complete(now);
                }
            }
        }
    }
}
