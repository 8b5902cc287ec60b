//! Timed camera transitions: the lock-on move and the start-up fly-in.
//!
//! At most one transition exists. Starting another replaces it outright, so a
//! superseded transition has no way left to touch the camera.
//!
//! A lock-on owns the whole eye for its duration. The fly-in only drives the
//! eye's depth and leaves the rest to the orbit controls.

use crate::camera::{Camera, OrbitControls};
use crate::scene::{ObjectId, Scene};
use crate::tween::{lerp, Tween};
use glam::Vec3;
use std::time::Duration;

/// Where a lock-on move parks the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LockOnDestination {
    Fixed(Vec3),
    OffsetFromTarget(Vec3),
}

impl LockOnDestination {
    fn resolve(self, target: Vec3) -> Vec3 {
        match self {
            LockOnDestination::Fixed(p) => p,
            LockOnDestination::OffsetFromTarget(offset) => target + offset,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    LockOn(ObjectId),
    FlyIn,
}

#[derive(Clone, Copy, Debug)]
pub struct CameraTransition {
    pub kind: TransitionKind,
    pub generation: u64,
    pub from: Vec3,
    pub to: Vec3,
    tween: Tween,
    target_lost: bool,
}

impl CameraTransition {
    #[inline]
    pub fn progress(&self, now: Duration) -> f32 {
        self.tween.progress(now).unwrap_or(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    Idle,
    Moved {
        generation: u64,
        look_at: Option<Vec3>,
        finished: bool,
    },
}

pub struct LockOnAnimator {
    destination: LockOnDestination,
    duration: Duration,
    active: Option<CameraTransition>,
    generation: u64,
}

impl LockOnAnimator {
    pub fn new(destination: LockOnDestination, duration: Duration) -> Self {
        Self {
            destination,
            duration,
            active: None,
            generation: 0,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// True while a lock-on runs; orbit input must be dropped for that time.
    pub fn owns_camera(&self) -> bool {
        matches!(
            self.active,
            Some(CameraTransition {
                kind: TransitionKind::LockOn(_),
                ..
            })
        )
    }

    #[inline]
    pub fn active(&self) -> Option<&CameraTransition> {
        self.active.as_ref()
    }

    pub fn active_target(&self) -> Option<ObjectId> {
        match self.active?.kind {
            TransitionKind::LockOn(id) => Some(id),
            TransitionKind::FlyIn => None,
        }
    }

    /// Generation of the most recently started transition.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a lock-on toward `target` from wherever the camera is now.
    /// Returns `None` (and changes nothing) if the target is not in the scene.
    pub fn lock_on(
        &mut self,
        target: ObjectId,
        camera: &Camera,
        scene: &Scene,
        now: Duration,
    ) -> Option<u64> {
        let obj = scene.get(target)?;
        let to = self.destination.resolve(obj.position);
        let superseded = self.active.map(|t| t.generation);
        let generation = self.begin(
            TransitionKind::LockOn(target),
            camera.eye,
            to,
            self.duration,
            now,
        );
        if let Some(prev) = superseded {
            log::debug!("[lock-on] generation {} supersedes {}", generation, prev);
        }
        log::info!(
            "[lock-on] {} -> camera ({:.1},{:.1},{:.1}) over {:.2}s",
            target,
            to.x,
            to.y,
            to.z,
            self.duration.as_secs_f32()
        );
        Some(generation)
    }

    /// Places the camera at `start_z` and eases its depth back to the current one.
    pub fn fly_in(
        &mut self,
        camera: &mut Camera,
        start_z: f32,
        duration: Duration,
        now: Duration,
    ) -> u64 {
        let to = camera.eye;
        let from = Vec3::new(to.x, to.y, start_z);
        camera.eye = from;
        camera.update_world_matrix();
        log::info!(
            "[lock-on] fly-in from z={:.0} over {:.0}s",
            start_z,
            duration.as_secs_f32()
        );
        self.begin(TransitionKind::FlyIn, from, to, duration, now)
    }

    /// Drops the running transition without touching the camera.
    pub fn cancel(&mut self) -> Option<CameraTransition> {
        self.active.take()
    }

    /// Advances the active transition and writes the camera.
    ///
    /// Lock-on steps re-aim camera and controls at the target's current
    /// position; once the target is gone they only move the eye. Fly-in steps
    /// write the eye's z only, on top of whatever the controls did this frame.
    pub fn step(
        &mut self,
        now: Duration,
        camera: &mut Camera,
        controls: &mut OrbitControls,
        scene: &Scene,
    ) -> StepOutcome {
        let Some(transition) = self.active.as_mut() else {
            return StepOutcome::Idle;
        };

        let t = transition.progress(now);
        match transition.kind {
            TransitionKind::LockOn(_) => camera.eye = transition.from.lerp(transition.to, t),
            TransitionKind::FlyIn => camera.eye.z = lerp(transition.from.z, transition.to.z, t),
        }

        let look_at = match transition.kind {
            TransitionKind::LockOn(id) => match scene.get(id) {
                Some(obj) if !transition.target_lost => Some(obj.position),
                Some(_) => None,
                None => {
                    if !transition.target_lost {
                        log::debug!("[lock-on] target {} left the scene; holding aim", id);
                    }
                    transition.target_lost = true;
                    None
                }
            },
            TransitionKind::FlyIn => Some(controls.target),
        };
        if let Some(point) = look_at {
            camera.look_at(point);
            controls.target = point;
        }
        camera.update_world_matrix();

        let generation = transition.generation;
        let finished = transition.tween.is_finished(now);
        if finished {
            log::debug!("[lock-on] generation {} finished", generation);
            self.active = None;
        }
        StepOutcome::Moved {
            generation,
            look_at,
            finished,
        }
    }

    fn begin(
        &mut self,
        kind: TransitionKind,
        from: Vec3,
        to: Vec3,
        duration: Duration,
        now: Duration,
    ) -> u64 {
        self.generation += 1;
        self.active = Some(CameraTransition {
            kind,
            generation: self.generation,
            from,
            to,
            tween: Tween::new(now, duration),
            target_lost: false,
        });
        self.generation
    }
}
