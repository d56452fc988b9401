use std::fs::File;
use std::io::{self, stdout};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{prelude::*, widgets::Block};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use material_card::app::App;
use material_card::cli::Args;
use material_card::config::Config;
use material_card::theme::BACKDROP;
use material_card::ui::{render_status_bar, to_color, SceneWidget};

/// Poll timeout between frames; animations advance by real elapsed time
const FRAME: Duration = Duration::from_millis(16);

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_path())?;

    let config = match Config::discover(args.config.as_deref()) {
        Ok((config, source)) => {
            match source {
                Some(path) => info!(path = %path.display(), "using card config"),
                None => info!("using built-in card config"),
            }
            config
        }
        Err(err) => {
            eprintln!("material-card: {err}; falling back to defaults");
            warn!(error = %err, "config load failed");
            Config::default()
        }
    };
    let mut app = App::new(config, args.width);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(DisableMouseCapture)?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

/// Log to a file; the terminal is owned by the UI
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("material_card=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key.code),
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    app.handle_click(mouse.column, mouse.row);
                }
                _ => {}
            }
        }

        let now = Instant::now();
        app.tick(now.duration_since(last_tick));
        last_tick = now;

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let [scene_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    frame.render_widget(
        Block::default().style(Style::default().bg(to_color(BACKDROP))),
        scene_area,
    );
    frame.render_widget(SceneWidget::new(&app.stage.scene).backdrop(BACKDROP), scene_area);

    let latest = app.latest_status();
    render_status_bar(status_area, latest.as_deref(), frame);
}
