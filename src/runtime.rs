use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEventKind};
use tracing::warn;

/// Redraw cadence; the one-second timer ticks are derived from wall time, not from this
pub const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Everything the UI thread reacts to, serialized through one channel
#[derive(Clone, Debug)]
pub enum PomoEvent {
    Key(crossterm::event::KeyEvent),
    Resize,
    Frame,
}

/// Where the event loop pulls input from
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<PomoEvent, RecvTimeoutError>;
}

/// Events arriving over an mpsc channel. In the binary a terminal reader
/// thread owns the sender; headless tests hold it themselves.
pub struct ChannelEventSource {
    rx: Receiver<PomoEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<PomoEvent>) -> Self {
        Self { rx }
    }

    /// Spawn the reader thread that forwards terminal input
    pub fn terminal() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let raw = match event::read() {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(%err, "terminal event reader stopped");
                    break;
                }
            };

            // receiver gone means the app is shutting down
            if let Some(ev) = translate(raw) {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        });

        Self::new(rx)
    }
}

impl EventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<PomoEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Map a raw terminal event to something the app cares about. Key releases
/// and repeats (reported on Windows) are dropped so one press is one action.
pub fn translate(raw: CtEvent) -> Option<PomoEvent> {
    match raw {
        CtEvent::Key(key) if key.kind == KeyEventKind::Press => Some(PomoEvent::Key(key)),
        CtEvent::Resize(_, _) => Some(PomoEvent::Resize),
        _ => None,
    }
}

/// Pulls one event at a time, yielding `Frame` whenever a frame interval passes quietly
pub struct Runner<E: EventSource> {
    source: E,
    frame_interval: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(source: E, frame_interval: Duration) -> Self {
        Self {
            source,
            frame_interval,
        }
    }

    pub fn step(&self) -> PomoEvent {
        // a dead reader thread degrades to a frame-only loop
        self.source
            .recv_timeout(self.frame_interval)
            .unwrap_or(PomoEvent::Frame)
    }
}
