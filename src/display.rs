use crate::engine::{TimerSession, ROUNDS_PER_BLOCK};

/// What the single toggle control does right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum PrimaryControl {
    Start,
    Resume,
    Pause,
}

impl PrimaryControl {
    pub fn symbol(&self) -> &'static str {
        match self {
            PrimaryControl::Start | PrimaryControl::Resume => "▶",
            PrimaryControl::Pause => "⏸",
        }
    }
}

/// Read-only view of a [`TimerSession`], recomputed on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub minutes: String,
    pub seconds: String,
    pub round_in_block: u32,
    pub rounds_per_block: u32,
    /// Whole blocks finished so far; lags `goal` by design of the counter.
    pub blocks_completed: u32,
    pub goal: u32,
    pub is_running: bool,
    pub has_started: bool,
    pub overlay_visible: bool,
    pub clear_available: bool,
    pub primary_control: PrimaryControl,
}

pub fn two_digits(n: u32) -> String {
    format!("{:02}", n)
}

pub fn minutes_of(remaining_secs: u32) -> u32 {
    remaining_secs / 60
}

pub fn seconds_of(remaining_secs: u32) -> u32 {
    remaining_secs % 60
}

impl From<&TimerSession> for DisplayState {
    fn from(session: &TimerSession) -> Self {
        let remaining = session.remaining_secs();
        let rounds = session.completed_rounds();

        let primary_control = if session.is_running() {
            PrimaryControl::Pause
        } else if session.has_started() {
            PrimaryControl::Resume
        } else {
            PrimaryControl::Start
        };

        Self {
            minutes: two_digits(minutes_of(remaining)),
            seconds: two_digits(seconds_of(remaining)),
            round_in_block: rounds % ROUNDS_PER_BLOCK,
            rounds_per_block: ROUNDS_PER_BLOCK,
            blocks_completed: rounds / ROUNDS_PER_BLOCK,
            goal: session.goal(),
            is_running: session.is_running(),
            has_started: session.has_started(),
            overlay_visible: session.has_started(),
            clear_available: session.has_started() && !session.is_running(),
            primary_control,
        }
    }
}

impl DisplayState {
    pub fn round_label(&self) -> String {
        format!("Round: {} / {}", self.round_in_block, self.rounds_per_block)
    }

    pub fn goal_label(&self) -> String {
        format!("Goal progress: {} / {}", self.blocks_completed, self.goal)
    }
}
