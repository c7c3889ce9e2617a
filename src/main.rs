//! Stepform - terminal host for the multi-step contact form
//!
//! Renders the bundled contact form with Ratatui and feeds key presses to the
//! form controller. Submissions go to a simulated sink; set
//! `STEPFORM_REJECT_SUBMISSIONS` to make it fail.

mod app;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use stepform::form::SimulatedSink;
use stepform::FormConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stepform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = FormConfig::load()?;
    if std::env::args().any(|arg| arg == "--write-config") {
        config.save()?;
        tracing::info!("Configuration written");
        return Ok(());
    }

    let sink = SimulatedSink {
        reject: std::env::var_os("STEPFORM_REJECT_SUBMISSIONS").is_some(),
        ..SimulatedSink::default()
    };
    let mut app = App::new(config, Arc::new(sink))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut last_frame = Instant::now();
    loop {
        // Drive animations by wall-clock time since the previous frame
        let now = Instant::now();
        app.tick(now.duration_since(last_frame));
        last_frame = now;

        terminal.draw(|frame| ui::draw(frame, app))?;

        // 16ms (~60fps) while something moves, 100ms otherwise
        let poll_duration = if app.wants_fast_redraw() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if key.code == KeyCode::Esc || ctrl_c {
                    return Ok(());
                }
                app.handle_key(key);
            }
        }
    }
}
