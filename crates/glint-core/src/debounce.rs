use std::time::Duration;

/// Two-state tap latch used where the platform has no native double-tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapState {
    Idle,
    Armed { expires_at: Duration },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// First tap of a possible pair; nothing else happens.
    Armed,
    DoubleActivation,
}

#[derive(Clone, Debug)]
pub struct TapDebounce {
    state: TapState,
    window: Duration,
}

impl TapDebounce {
    pub fn new(window: Duration) -> Self {
        Self {
            state: TapState::Idle,
            window,
        }
    }

    #[inline]
    pub fn state(&self) -> TapState {
        self.state
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        matches!(self.state, TapState::Armed { .. })
    }

    pub fn tap(&mut self, now: Duration) -> TapOutcome {
        self.expire(now);
        match self.state {
            TapState::Idle => {
                self.state = TapState::Armed {
                    expires_at: now + self.window,
                };
                TapOutcome::Armed
            }
            TapState::Armed { .. } => {
                self.state = TapState::Idle;
                TapOutcome::DoubleActivation
            }
        }
    }

    /// The pending unset: drops an armed latch once its window has passed.
    pub fn expire(&mut self, now: Duration) -> bool {
        match self.state {
            TapState::Armed { expires_at } if now >= expires_at => {
                self.state = TapState::Idle;
                log::trace!("[gesture] tap window expired");
                true
            }
            _ => false,
        }
    }
}
