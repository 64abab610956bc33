//! Timer engine: the single pomodoro session and its transition rules.
//!
//! Every transition is a total function of the current session plus one
//! [`Action`]. Nothing here knows about wall clocks; the caller decides when a
//! second has elapsed and feeds [`Action::Tick`].

use tracing::{debug, info};

/// Length of one work session in seconds (25 minutes).
pub const SESSION_LENGTH_SECS: u32 = 25 * 60;
/// Completed rounds that make up one block.
pub const ROUNDS_PER_BLOCK: u32 = 4;
/// Goal a fresh (or cleared) session starts with.
pub const INITIAL_GOAL: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Action {
    Start,
    Pause,
    Clear,
    Tick,
}

/// Emitted exactly once per exhausted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// An ordinary round finished; time for a short break.
    SessionCompleted { round: u32 },
    /// The round closed a block of four and bumped the goal.
    GoalBlockCompleted { round: u32, goal: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSession {
    remaining_secs: u32,
    is_running: bool,
    has_started: bool,
    completed_rounds: u32,
    goal: u32,
}

/// Result of [`reduce`]: the next session plus whatever it emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: TimerSession,
    pub events: Vec<SessionEvent>,
}

impl Default for TimerSession {
    fn default() -> Self {
        Self {
            remaining_secs: SESSION_LENGTH_SECS,
            is_running: false,
            has_started: false,
            completed_rounds: 0,
            goal: INITIAL_GOAL,
        }
    }
}

impl TimerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub fn completed_rounds(&self) -> u32 {
        self.completed_rounds
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn start(&mut self) -> Vec<SessionEvent> {
        self.apply(Action::Start)
    }

    pub fn pause(&mut self) -> Vec<SessionEvent> {
        self.apply(Action::Pause)
    }

    pub fn clear(&mut self) -> Vec<SessionEvent> {
        self.apply(Action::Clear)
    }

    pub fn tick(&mut self) -> Vec<SessionEvent> {
        self.apply(Action::Tick)
    }

    /// Apply `action` in place and return the events it produced.
    pub fn apply(&mut self, action: Action) -> Vec<SessionEvent> {
        let Transition { session, events } = reduce(*self, action);
        *self = session;
        events
    }

    fn exhaust(&mut self) -> SessionEvent {
        self.is_running = false;
        self.completed_rounds += 1;
        self.remaining_secs = SESSION_LENGTH_SECS;

        if self.completed_rounds % ROUNDS_PER_BLOCK == 0 {
            self.goal += 1;
            info!(
                round = self.completed_rounds,
                goal = self.goal,
                "block completed, goal increased"
            );
            SessionEvent::GoalBlockCompleted {
                round: self.completed_rounds,
                goal: self.goal,
            }
        } else {
            info!(round = self.completed_rounds, "session completed");
            SessionEvent::SessionCompleted {
                round: self.completed_rounds,
            }
        }
    }
}

/// The transition function for one action.
pub fn reduce(mut session: TimerSession, action: Action) -> Transition {
    let mut events = Vec::new();

    match action {
        Action::Start => {
            if !session.has_started {
                session.remaining_secs = SESSION_LENGTH_SECS;
            }
            session.is_running = true;
            session.has_started = true;
        }
        Action::Pause => {
            session.is_running = false;
        }
        Action::Clear => {
            session = TimerSession::default();
        }
        Action::Tick => {
            // stray ticks while paused or cleared are ignored
            if session.is_running {
                if session.remaining_secs > 0 {
                    session.remaining_secs -= 1;
                }
                // reaching zero settles immediately, there is no running 00:00 second
                if session.remaining_secs == 0 {
                    events.push(session.exhaust());
                }
            }
        }
    }

    if action != Action::Tick {
        debug!(%action, ?session, "applied user action");
    }

    Transition { session, events }
}
