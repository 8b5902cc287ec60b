//! Viewer tuning gathered from [`crate::constants`].

use crate::constants::*;
use crate::lockon::LockOnDestination;
use crate::loading::OverlayTimings;
use crate::tween::secs;
use glam::Vec3;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value:?}")]
    NonPositiveDuration { name: &'static str, value: Duration },
    #[error("clip planes must satisfy 0 < znear < zfar (znear={znear}, zfar={zfar})")]
    InvalidClipPlanes { znear: f32, zfar: f32 },
    #[error("vertical field of view must be within (0, 180) degrees, got {0}")]
    InvalidFov(f32),
    #[error("highlight intensity must be finite and non-negative, got {0}")]
    InvalidHighlightIntensity(f32),
    #[error("orbit damping factor must be within (0, 1], got {0}")]
    InvalidDamping(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntroConfig {
    pub start_z: f32,
    pub duration: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub camera_start: Vec3,
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub orbit_damping: f32,
    pub highlight_intensity: f32,
    pub lock_on_destination: LockOnDestination,
    pub lock_on_duration: Duration,
    pub double_tap_window: Duration,
    pub overlay: OverlayTimings,
    /// `None` starts the camera in place.
    pub intro: Option<IntroConfig>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera_start: camera_start_vec3(),
            fovy_degrees: CAMERA_FOVY_DEGREES,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
            orbit_damping: ORBIT_DAMPING_FACTOR,
            highlight_intensity: HIGHLIGHT_EMISSIVE_INTENSITY,
            lock_on_destination: LockOnDestination::Fixed(Vec3::from(LOCK_ON_POSITION)),
            lock_on_duration: secs(LOCK_ON_DURATION_SEC),
            double_tap_window: Duration::from_millis(DOUBLE_TAP_WINDOW_MS),
            overlay: OverlayTimings {
                fade_delay: secs(FADE_DELAY_SEC),
                fade_duration: secs(FADE_DURATION_SEC),
                title_hide_delay: secs(TITLE_HIDE_DELAY_SEC),
            },
            intro: Some(IntroConfig {
                start_z: INTRO_START_Z,
                duration: secs(INTRO_DURATION_SEC),
            }),
        }
    }
}

impl ViewerConfig {
    pub fn without_intro(mut self) -> Self {
        self.intro = None;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fovy_degrees > 0.0 && self.fovy_degrees < 180.0) {
            return Err(ConfigError::InvalidFov(self.fovy_degrees));
        }
        if !(self.znear > 0.0 && self.znear < self.zfar) {
            return Err(ConfigError::InvalidClipPlanes {
                znear: self.znear,
                zfar: self.zfar,
            });
        }
        if !(self.highlight_intensity.is_finite() && self.highlight_intensity >= 0.0) {
            return Err(ConfigError::InvalidHighlightIntensity(
                self.highlight_intensity,
            ));
        }
        if !(self.orbit_damping > 0.0 && self.orbit_damping <= 1.0) {
            return Err(ConfigError::InvalidDamping(self.orbit_damping));
        }
        let durations = [
            ("lock_on_duration", self.lock_on_duration),
            ("double_tap_window", self.double_tap_window),
            ("fade_duration", self.overlay.fade_duration),
        ];
        for (name, value) in durations {
            if value.is_zero() {
                return Err(ConfigError::NonPositiveDuration { name, value });
            }
        }
        if let Some(intro) = self.intro {
            if intro.duration.is_zero() {
                return Err(ConfigError::NonPositiveDuration {
                    name: "intro.duration",
                    value: intro.duration,
                });
            }
        }
        Ok(())
    }
}
