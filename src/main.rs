mod app;
mod config;
mod core;
mod fs;
mod logging;
mod ui;

use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use crate::app::{App, PaneSide};
use crate::config::{PaneSettings, Settings};
use crate::core::BufferMode;
use crate::fs::{FilesystemPort, RealFs};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    println!("twindir {} - Dual-pane terminal file browser", VERSION);
    println!();
    println!("USAGE:");
    println!("    twindir [OPTIONS] [DIR]");
    println!();
    println!("ARGS:");
    println!("    [DIR]                   Start both panes in this directory");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help              Print help information");
    println!("    -v, --version           Print version information");
}

fn print_version() {
    println!("twindir {}", VERSION);
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let mut start_dir: Option<PathBuf> = None;
    if args.len() > 1 {
        match args[1].as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            "-v" | "--version" => {
                print_version();
                return Ok(());
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {}", arg);
                eprintln!("Use --help for usage information");
                return Ok(());
            }
            dir => {
                let path = PathBuf::from(dir);
                if !path.is_dir() {
                    eprintln!("Error: {} is not a directory", dir);
                    return Ok(());
                }
                start_dir = Some(path);
            }
        }
    }

    // Must outlive the run loop so buffered log lines get flushed.
    let _log_guard = logging::init();
    info!(version = VERSION, "starting");

    // Pane start paths: CLI dir wins, then persisted settings, then
    // cwd (left) / home (right).
    let settings = Settings::load();
    let (left_path, right_path) = match &start_dir {
        Some(dir) => (dir.clone(), dir.clone()),
        None => {
            let left = settings.pane_start_path(0, || {
                env::current_dir().unwrap_or_else(|_| PathBuf::from("/"))
            });
            let right = settings.pane_start_path(1, || {
                dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
            });
            (left, right)
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(RealFs::new(), left_path, right_path);
    if settings.active_pane_index == 1 {
        app.switch_pane();
    }
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;

    // Persist pane positions for the next run.
    let _ = Settings {
        panes: vec![
            PaneSettings {
                start_path: Some(app.state.left.cwd.display().to_string()),
            },
            PaneSettings {
                start_path: Some(app.state.right.cwd.display().to_string()),
            },
        ],
        active_pane_index: match app.state.active {
            PaneSide::Left => 0,
            PaneSide::Right => 1,
        },
    }
    .save();

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend, F: FilesystemPort>(
    terminal: &mut Terminal<B>,
    app: &mut App<F>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw::draw(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key.code, key.modifiers);
                }
            }
        }
        app.tick();

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key<F: FilesystemPort>(app: &mut App<F>, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        KeyCode::Tab => app.switch_pane(),

        KeyCode::Up => app.move_selection_up(),
        KeyCode::Down => app.move_selection_down(),
        KeyCode::Enter => app.enter_selected(),
        KeyCode::Backspace | KeyCode::Delete => app.go_to_parent(),

        KeyCode::Char('c') => app.add_to_buffer(BufferMode::Copy),
        KeyCode::Char('x') => app.add_to_buffer(BufferMode::Cut),
        KeyCode::Char('p') => app.paste(),

        _ => {}
    }
}
