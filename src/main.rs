//! Terminal gallery that keeps its selection in view.
//!
//! Run with a directory to browse its entries as a grid, or with `--items N`
//! for a synthetic gallery.  Keys and the mouse wheel move the selection; the
//! viewport follows with eased scrolling.

mod app;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use gallery_scroll::config::{self, AppConfig};
use gallery_scroll::core::scheduler::FRAME_INTERVAL;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    gallery::Gallery,
    handler,
    state::AppState,
};
use crate::ui::{grid_widget::GridWidget, layout::AppLayout, spinner::PhaseIndicator, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Gallery grid that keeps the selection in view")]
struct Cli {
    /// Directory to browse (defaults to `.`).
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Show N synthetic items instead of a directory.
    #[arg(long, value_name = "N")]
    items: Option<usize>,

    /// Override the scroll animation length.
    #[arg(long, value_name = "MS")]
    duration_ms: Option<u64>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    save_config: bool,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // the UI owns the screen; redirect 2> to keep logs
        .init();

    let cli = Cli::parse();

    let mut user_config = AppConfig::load();
    if let Some(ms) = cli.duration_ms {
        user_config.set_scroll_duration_ms(ms);
    }

    if cli.print_config {
        println!("# {}", config::config_path().display());
        println!("{user_config:#?}");
        return Ok(());
    }
    if cli.save_config {
        user_config.save()?;
        println!("saved {}", config::config_path().display());
        return Ok(());
    }

    // ── build the gallery ─────────────────────────────────────
    let gallery = match cli.items {
        Some(count) => Gallery::synthetic(count),
        None => {
            let root = cli
                .path
                .canonicalize()
                .with_context(|| format!("cannot open {}", cli.path.display()))?;
            Gallery::open_dir(&root)?
        }
    };
    let mut state = AppState::new(gallery, user_config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    state.tracker.teardown();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    state: &mut AppState,
) -> Result<()> {
    let size = terminal.size()?;
    state.set_terminal_area(Rect::new(0, 0, size.width, size.height));

    let mut events = spawn_event_reader(FRAME_INTERVAL);

    loop {
        // Timers and animation frames catch up with the clock before drawing.
        state.tick();

        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());

            let grid_block = Block::default()
                .title(format!(" {} ", state.gallery.title()))
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());

            let grid = GridWidget::new(&state.gallery, &state.grid, state.config.cell_width)
                .block(grid_block);
            frame.render_widget(grid, layout.grid_area);

            frame.render_widget(
                PhaseIndicator {
                    phase: state.tracker.phase(),
                    animating: state.tracker.animator().is_active(),
                    tick: state.frame_count,
                },
                layout.grid_area,
            );

            let status = Paragraph::new(state.status_line()).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);
        })?;

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(state, m),
            AppEvent::Resize(w, h) => {
                state.set_terminal_area(Rect::new(0, 0, w, h));
            }
            AppEvent::Tick => {}
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
