//! Interactive terminal form.

mod app;
mod draw;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use passbook_core::{Clipboard, Controller};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;
use std::time::{Duration, Instant};

use app::App;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the form until the user quits
pub fn run<C: Clipboard>(
    controller: Controller<C>,
    notice_duration: Duration,
    status_reset: Duration,
) -> Result<()> {
    let mut app = App::new(controller, notice_duration, status_reset);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let result = run_inner(&mut app);

    // Always restore terminal state, even if the event loop errored.
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);

    result
}

fn run_inner<C: Clipboard>(app: &mut App<C>) -> Result<()> {
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    while !app.should_quit() {
        app.tick(Instant::now());
        terminal.draw(|f| draw::draw_ui(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key, Instant::now());
                }
            }
        }
    }

    Ok(())
}
