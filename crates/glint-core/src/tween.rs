//! Minimal time-based tweening.
//!
//! A [`Tween`] is pure data: a start time, an optional delay, a duration and
//! an easing curve. Owners sample it with the current time on each frame tick
//! instead of registering callbacks, so nothing waits or blocks.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out.
    #[default]
    QuadOut,
    QuadInOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) * 0.5
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    start: Duration,
    delay: Duration,
    duration: Duration,
    ease: Ease,
}

impl Tween {
    pub fn new(start: Duration, duration: Duration) -> Self {
        Self {
            start,
            delay: Duration::ZERO,
            duration,
            ease: Ease::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[inline]
    pub fn begins_at(&self) -> Duration {
        self.start + self.delay
    }

    #[inline]
    pub fn ends_at(&self) -> Duration {
        self.begins_at() + self.duration
    }

    /// Linear progress in \[0, 1\], or `None` while the delay is still running.
    pub fn raw_progress(&self, now: Duration) -> Option<f32> {
        let begins = self.begins_at();
        if now < begins {
            return None;
        }
        if self.duration.is_zero() {
            return Some(1.0);
        }
        let elapsed = (now - begins).as_secs_f32();
        Some((elapsed / self.duration.as_secs_f32()).min(1.0))
    }

    /// Eased progress in \[0, 1\], or `None` while the delay is still running.
    #[inline]
    pub fn progress(&self, now: Duration) -> Option<f32> {
        self.raw_progress(now).map(|t| self.ease.apply(t))
    }

    #[inline]
    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.ends_at()
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn secs(s: f32) -> Duration {
    Duration::from_secs_f32(s.max(0.0))
}
