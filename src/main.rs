use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use pitch_terminal::config::Config;
use pitch_terminal::export;
use pitch_terminal::loader;
use pitch_terminal::model::Dataset;
use pitch_terminal::state::{AppState, View};
use pitch_terminal::ui;

struct App {
    config: Config,
    state: AppState,
    dataset: Option<&'static Dataset>,
    should_quit: bool,
}

impl App {
    fn new(config: Config) -> Self {
        let mut state = AppState::new(&config);
        let dataset = match loader::dataset(&config.data_path)
            .with_context(|| format!("loading {}", config.data_path.display()))
        {
            Ok(dataset) => {
                state.push_log(format!(
                    "[INFO] Loaded {} games, {} seasons from {}",
                    dataset.games.len(),
                    dataset.seasons.len(),
                    config.data_path.display()
                ));
                for warning in dataset.drift_warnings() {
                    state.push_log(format!("[WARN] {warning}"));
                }
                Some(dataset)
            }
            Err(err) => {
                state.load_error = Some(format!("{err:#}"));
                state.push_log("[WARN] Data load failed");
                None
            }
        };
        Self {
            config,
            state,
            dataset,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(view) = View::from_digit(c) {
                    self.state.set_view(view);
                }
            }
            KeyCode::Tab => self.state.next_view(),
            KeyCode::BackTab => self.state.prev_view(),
            KeyCode::Char('j') | KeyCode::Down => self.state.cursor_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.cursor_up(),
            KeyCode::Char('l') | KeyCode::Right => self.state.picker_next(),
            KeyCode::Char('h') | KeyCode::Left => self.state.picker_prev(),
            KeyCode::Char('c') => {
                if self.state.view == View::DetailedStats {
                    self.state.cycle_category();
                }
            }
            KeyCode::Char(' ') => {
                if self.state.view == View::DetailedStats {
                    self.state.toggle_detail_metric();
                }
            }
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => {}
        }
    }

    fn export(&mut self) {
        let Some(dataset) = self.dataset else {
            self.state.push_log("[INFO] Nothing to export, data not loaded");
            return;
        };
        let path = self.config.export_path.clone();
        let display = path.display().to_string();
        match export::export_metrics(
            &path,
            dataset,
            self.state.base_season,
            self.state.target_season,
        ) {
            Ok(report) => {
                let message = format!(
                    "Exported {} seasons, {} declines",
                    report.seasons, report.declines
                );
                self.state.push_log(format!("[INFO] {message} to {display}"));
                self.state.export.finish(display, message, false);
            }
            Err(err) => {
                let message = format!("Export failed: {err:#}");
                self.state.push_log(format!("[WARN] {message}"));
                self.state.export.finish(display, message, true);
            }
        }
    }
}

fn main() -> io::Result<()> {
    let config = Config::load();
    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    if let Some(err) = &app.state.load_error {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        app.state.maybe_clear_export(Instant::now());

        terminal.draw(|f| ui::draw(f, &app.state, app.dataset))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
