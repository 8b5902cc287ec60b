//! Asset-loading progress and the overlay fade that follows it.
//!
//! [`AssetTracker`] counts items the way a loading manager does and turns
//! item completions into progress/completion events. [`LoadingSequencer`]
//! reacts to those events and, on frame ticks, drives the overlay through
//! [`OverlaySink`].

use crate::tween::{lerp, Tween};
use smallvec::SmallVec;
use std::time::Duration;

/// Receives overlay effects. Implemented by the DOM overlay, the native log
/// overlay, and test recorders.
pub trait OverlaySink {
    fn set_progress(&mut self, ratio: f32);
    fn set_overlay_opacity(&mut self, opacity: f32);
    /// Collapse the loading bar and mark it ended.
    fn end_loading_bar(&mut self);
    fn set_title_opacity(&mut self, opacity: f32);
    /// Remove the title from layout.
    fn hide_title(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayTimings {
    pub fade_delay: Duration,
    pub fade_duration: Duration,
    pub title_hide_delay: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingPhase {
    Loading,
    Completing { completed_at: Duration },
    Done,
}

pub struct LoadingSequencer {
    phase: LoadingPhase,
    timings: OverlayTimings,
    ratio: f32,
    overlay_opacity: f32,
    title_opacity: f32,
    bar_ended: bool,
}

impl LoadingSequencer {
    pub fn new(timings: OverlayTimings) -> Self {
        Self {
            phase: LoadingPhase::Loading,
            timings,
            ratio: 0.0,
            overlay_opacity: 1.0,
            title_opacity: 1.0,
            bar_ended: false,
        }
    }

    #[inline]
    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    #[inline]
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    #[inline]
    pub fn overlay_opacity(&self) -> f32 {
        self.overlay_opacity
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.phase == LoadingPhase::Done
    }

    /// Per-item progress. Skipped for a zero total or once loading has completed.
    pub fn on_progress(
        &mut self,
        url: &str,
        loaded: u32,
        total: u32,
        sink: &mut impl OverlaySink,
    ) -> Option<f32> {
        if self.phase != LoadingPhase::Loading {
            log::debug!("[loading] late progress for {} ignored", url);
            return None;
        }
        if total == 0 {
            log::debug!("[loading] progress for {} with zero total skipped", url);
            return None;
        }
        let ratio = (loaded as f32 / total as f32).clamp(0.0, 1.0);
        self.ratio = ratio;
        sink.set_progress(ratio);
        log::debug!("[loading] {} ({}/{})", url, loaded, total);
        Some(ratio)
    }

    /// The loader's completion signal. Only the first call starts the fade sequence.
    pub fn on_complete(&mut self, now: Duration) -> bool {
        if self.phase != LoadingPhase::Loading {
            log::debug!("[loading] duplicate completion signal ignored");
            return false;
        }
        self.phase = LoadingPhase::Completing { completed_at: now };
        log::info!("[loading] all assets loaded; overlay fade scheduled");
        true
    }

    /// Advances the fade timeline. Called once per frame.
    pub fn tick(&mut self, now: Duration, sink: &mut impl OverlaySink) -> LoadingPhase {
        let LoadingPhase::Completing { completed_at } = self.phase else {
            return self.phase;
        };

        let fade = Tween::new(completed_at, self.timings.fade_duration)
            .with_delay(self.timings.fade_delay);
        let Some(t) = fade.progress(now) else {
            return self.phase;
        };

        if !self.bar_ended {
            self.bar_ended = true;
            sink.end_loading_bar();
            log::info!("[loading] overlay fade started");
        }

        let opacity = lerp(1.0, 0.0, t);
        if opacity < self.overlay_opacity {
            self.overlay_opacity = opacity;
            sink.set_overlay_opacity(opacity);
        }
        if opacity < self.title_opacity {
            self.title_opacity = opacity;
            sink.set_title_opacity(opacity);
        }

        if now >= fade.ends_at() + self.timings.title_hide_delay {
            sink.hide_title();
            self.phase = LoadingPhase::Done;
            log::info!("[loading] overlay sequence done");
        }
        self.phase
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetEvent {
    Progress {
        url: String,
        loaded: u32,
        total: u32,
    },
    AllLoaded,
}

/// Counts started and settled asset items.
#[derive(Default, Clone, Debug)]
pub struct AssetTracker {
    total: u32,
    loaded: u32,
    failed: SmallVec<[String; 2]>,
}

impl AssetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn loaded(&self) -> u32 {
        self.loaded
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    pub fn item_start(&mut self, url: &str) {
        self.total += 1;
        log::debug!("[loading] start {} ({} tracked)", url, self.total);
    }

    pub fn item_end(&mut self, url: &str) -> SmallVec<[AssetEvent; 2]> {
        self.settle(url)
    }

    /// A failed item still settles so the overlay can finish.
    pub fn item_error(&mut self, url: &str) -> SmallVec<[AssetEvent; 2]> {
        log::warn!("[loading] failed to load {}", url);
        self.failed.push(url.to_string());
        self.settle(url)
    }

    fn settle(&mut self, url: &str) -> SmallVec<[AssetEvent; 2]> {
        let mut events = SmallVec::new();
        if self.loaded >= self.total {
            log::debug!("[loading] {} settled without a matching start", url);
            return events;
        }
        self.loaded += 1;
        events.push(AssetEvent::Progress {
            url: url.to_string(),
            loaded: self.loaded,
            total: self.total,
        });
        if self.loaded == self.total {
            events.push(AssetEvent::AllLoaded);
        }
        events
    }
}
