use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::{
    animation::CardFlip,
    celebration::Celebration,
    config::Settings,
    display::{minutes_of, seconds_of, DisplayState},
    engine::{Action, SessionEvent, TimerSession},
    notification::Notification,
    scheduler::TickScheduler,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Owns the timer session and everything that reacts to it. All input, both
/// keys and elapsed seconds, goes through [`App::dispatch`] one action at a time.
#[derive(Debug)]
pub struct App {
    pub session: TimerSession,
    pub scheduler: TickScheduler,
    pub notification: Option<Notification>,
    pub minutes_card: CardFlip,
    pub seconds_card: CardFlip,
    pub celebration: Celebration,
    pub settings: Settings,
    pub viewport: (u16, u16),
    pub last_frame: Instant,
}

impl App {
    pub fn new(settings: Settings, now: Instant) -> Self {
        let session = TimerSession::new();
        let remaining = session.remaining_secs();

        Self {
            session,
            scheduler: TickScheduler::new(),
            notification: None,
            minutes_card: CardFlip::new(minutes_of(remaining), settings.animations),
            seconds_card: CardFlip::new(seconds_of(remaining), settings.animations),
            celebration: Celebration::new(),
            settings,
            viewport: (80, 24),
            last_frame: now,
        }
    }

    pub fn display(&self) -> DisplayState {
        DisplayState::from(&self.session)
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    /// Apply one action, then rearm or disarm the tick source from the new state.
    /// Seconds that fell due before a user action are applied ahead of it.
    pub fn dispatch(&mut self, action: Action, now: Instant) -> Vec<SessionEvent> {
        let mut events = if action == Action::Tick {
            Vec::new()
        } else {
            self.deliver_due_ticks(now)
        };

        let emitted = self.session.apply(action);
        self.scheduler.sync(self.session.is_running(), now);

        for event in &emitted {
            self.notification = Some(Notification::from_event(event, now));

            if let SessionEvent::GoalBlockCompleted { .. } = event {
                if self.settings.animations {
                    let (width, height) = self.viewport;
                    self.celebration.start(width, height, now);
                }
            }
        }

        if action == Action::Clear {
            self.notification = None;
            self.celebration.stop();
        }

        let remaining = self.session.remaining_secs();
        self.minutes_card.retarget(minutes_of(remaining), now);
        self.seconds_card.retarget(seconds_of(remaining), now);

        events.extend(emitted);
        events
    }

    fn deliver_due_ticks(&mut self, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while self.scheduler.poll(now) {
            events.extend(self.dispatch(Action::Tick, now));
        }
        events
    }

    /// Called once per frame: deliver due seconds, then advance animations
    pub fn on_frame(&mut self, now: Instant) -> Vec<SessionEvent> {
        let events = self.deliver_due_ticks(now);

        self.minutes_card.advance(now);
        self.seconds_card.advance(now);
        self.celebration.update(now);

        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.notification = None;
        }

        self.last_frame = now;
        events
    }

    /// Start when stopped, pause when running
    pub fn toggle(&mut self, now: Instant) {
        // a due second may end the session, which changes what the toggle means
        self.deliver_due_ticks(now);
        let action = if self.session.is_running() {
            Action::Pause
        } else {
            Action::Start
        };
        self.dispatch(action, now);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> KeyOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyOutcome::Quit;
        }

        // the key arrived after any second that is already due
        self.deliver_due_ticks(now);

        // an open notification swallows the key that dismisses it
        if self.notification.take().is_some() {
            debug!(code = ?key.code, "notification dismissed");
            return KeyOutcome::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle(now),
            KeyCode::Char('c') | KeyCode::Char('C') => {
                if self.display().clear_available {
                    self.dispatch(Action::Clear, now);
                }
            }
            _ => {}
        }

        KeyOutcome::Continue
    }
}
