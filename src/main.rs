use std::{
    io::{self, stdin, stdout, IsTerminal},
    panic,
    path::PathBuf,
    time::Instant,
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use pomo::{
    app_dirs,
    config::Settings,
    error::Result,
    logging,
    runtime::{ChannelEventSource, PomoEvent, Runner, FRAME_INTERVAL},
    App, KeyOutcome,
};

/// flip-card pomodoro timer with round and goal tracking
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A 25 minute pomodoro timer for the terminal. Every finished session counts as a round; every fourth round completes a block and raises the goal by one."
)]
pub struct Cli {
    /// swap digits instantly instead of flipping the cards, and skip the block celebration
    #[clap(long)]
    no_animations: bool,

    /// write diagnostics to this file
    #[clap(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// write diagnostics to pomo.log in the platform state directory
    #[clap(long, conflicts_with = "log_file")]
    log: bool,

    /// log level or filter directives, e.g. "debug" or "pomo=trace"
    #[clap(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_settings(&self) -> Settings {
        let log_file = match (&self.log_file, self.log) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => app_dirs::default_log_path(),
            (None, false) => None,
        };

        Settings {
            animations: !self.no_animations,
            log_file,
            log_level: self.log_level.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_terminal() || !stdout().is_terminal() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin and stdout must be a tty").exit();
    }

    let settings = cli.to_settings();
    logging::init(&settings)?;

    // put the terminal back before the panic message prints
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings, Instant::now());
    let size = terminal.size()?;
    app.set_viewport(size.width, size.height);

    info!("pomo started");
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(
        rounds = app.session.completed_rounds(),
        goal = app.session.goal(),
        "pomo exited"
    );
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let runner = Runner::new(ChannelEventSource::terminal(), FRAME_INTERVAL);

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            PomoEvent::Frame => {}
            PomoEvent::Resize => {
                let size = terminal.size()?;
                app.set_viewport(size.width, size.height);
            }
            PomoEvent::Key(key) => {
                if app.handle_key(key, Instant::now()) == KeyOutcome::Quit {
                    break;
                }
            }
        }

        // keys can arrive faster than frames, so due seconds are drained after every event
        app.on_frame(Instant::now());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["pomo"]);

        assert!(!cli.no_animations);
        assert_eq!(cli.log_file, None);
        assert!(!cli.log);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_cli_default_settings() {
        let settings = Cli::parse_from(["pomo"]).to_settings();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_cli_no_animations() {
        let settings = Cli::parse_from(["pomo", "--no-animations"]).to_settings();
        assert!(!settings.animations);
    }

    #[test]
    fn test_cli_log_file() {
        let settings = Cli::parse_from(["pomo", "--log-file", "/tmp/pomo-test.log"]).to_settings();
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/pomo-test.log")));
    }

    #[test]
    fn test_cli_log_default_location() {
        let settings = Cli::parse_from(["pomo", "--log", "--log-level", "debug"]).to_settings();
        assert_eq!(settings.log_file, app_dirs::default_log_path());
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_cli_log_flags_conflict() {
        let result = Cli::try_parse_from(["pomo", "--log", "--log-file", "x.log"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_duration_flags() {
        assert!(Cli::try_parse_from(["pomo", "--minutes", "50"]).is_err());
    }
}
