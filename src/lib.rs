// Library surface for the binary, headless integration tests and reuse.
pub mod animation;
pub mod app;
pub mod app_dirs;
pub mod celebration;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod logging;
pub mod notification;
pub mod runtime;
pub mod scheduler;
pub mod ui;

pub use app::{App, KeyOutcome};
pub use engine::{Action, SessionEvent, TimerSession};
