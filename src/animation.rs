use std::time::{Duration, Instant};

/// Duration of each half of a card flip (fold out, then fold in)
pub const FLIP_HALF: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq)]
enum FlipPhase {
    Idle,
    Exiting { since: Instant },
    Entering { since: Instant },
}

/// A digit card keyed on its value. A new value waits for the old one to fold
/// away before unfolding, and values that arrive mid-flip replace the pending
/// one instead of queueing.
#[derive(Debug, Clone)]
pub struct CardFlip {
    shown: u32,
    target: u32,
    phase: FlipPhase,
    enabled: bool,
}

impl CardFlip {
    pub fn new(value: u32, enabled: bool) -> Self {
        Self {
            shown: value,
            target: value,
            phase: FlipPhase::Idle,
            enabled,
        }
    }

    /// The value currently on the card face
    pub fn shown(&self) -> u32 {
        self.shown
    }

    pub fn retarget(&mut self, value: u32, now: Instant) {
        if value == self.target {
            return;
        }
        self.target = value;

        if !self.enabled {
            self.shown = value;
            return;
        }

        match self.phase {
            FlipPhase::Exiting { .. } => {}
            FlipPhase::Idle | FlipPhase::Entering { .. } => {
                self.phase = FlipPhase::Exiting { since: now };
            }
        }
    }

    pub fn advance(&mut self, now: Instant) {
        loop {
            match self.phase {
                FlipPhase::Idle => return,
                FlipPhase::Exiting { since } => {
                    if now.saturating_duration_since(since) < FLIP_HALF {
                        return;
                    }
                    self.shown = self.target;
                    self.phase = FlipPhase::Entering {
                        since: since + FLIP_HALF,
                    };
                }
                FlipPhase::Entering { since } => {
                    if now.saturating_duration_since(since) < FLIP_HALF {
                        return;
                    }
                    self.phase = if self.shown == self.target {
                        FlipPhase::Idle
                    } else {
                        FlipPhase::Exiting {
                            since: since + FLIP_HALF,
                        }
                    };
                }
            }
        }
    }

    /// How much of the card is unfolded at `now`, in `[0, 1]`
    pub fn height_fraction(&self, now: Instant) -> f64 {
        let progress = |since: Instant| {
            (now.saturating_duration_since(since).as_secs_f64() / FLIP_HALF.as_secs_f64())
                .clamp(0.0, 1.0)
        };

        match self.phase {
            FlipPhase::Idle => 1.0,
            FlipPhase::Exiting { since } => 1.0 - progress(since),
            FlipPhase::Entering { since } => progress(since),
        }
    }
}
