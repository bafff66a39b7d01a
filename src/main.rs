use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use schedyulah::{
    app::App,
    app_dirs::AppDirs,
    clock::{local_day_label, Clock, SystemClock},
    config::{Config, ConfigStore, FileConfigStore},
    logging, report,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    stats::Dashboard,
    store::{JsonFileStore, SessionLog, SessionStore},
    timer::TimerEngine,
    ui,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

/// focused productivity stopwatch with a statistics dashboard
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Name an activity, start and pause a stopwatch, end the session and see how productive you were. Sessions are kept locally and summarised on a dashboard."
)]
pub struct Cli {
    /// activity to open the timer with, skipping the home page
    #[clap(short = 'a', long)]
    activity: Option<String>,

    /// session history file (default: ~/.local/state/schedyulah/sessions.json)
    #[clap(long)]
    data_file: Option<PathBuf>,

    /// how often the stopwatch display is refreshed, in milliseconds
    #[clap(long)]
    tick_rate_ms: Option<u64>,

    /// print the dashboard as plain text and exit
    #[clap(long)]
    summary: bool,

    /// store the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Layer command-line flags over the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(ms) = self.tick_rate_ms {
            config.tick_rate_ms = ms;
        }
        if let Some(path) = &self.data_file {
            config.data_file = Some(path.clone());
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config_store = FileConfigStore::new();
    let config = cli.apply(config_store.load());
    if cli.save_config {
        config_store.save(&config)?;
    }

    let store = match &config.data_file {
        Some(path) => JsonFileStore::with_path(path),
        None => JsonFileStore::new(),
    };

    if cli.summary {
        logging::init(None);
        return print_summary(store, &config);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    logging::init(AppDirs::log_path().as_deref());

    let log = SessionLog::open(store)?;
    let engine = TimerEngine::system(config.tick_rate());
    let mut app = App::new(engine, log, config.dashboard_limits());
    if let Some(activity) = &cli.activity {
        app.start_activity(activity)?;
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app, &config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn print_summary<S: SessionStore>(store: S, config: &Config) -> Result<(), Box<dyn Error>> {
    let log = SessionLog::open(store)?;
    let today = local_day_label(SystemClock.now_ms());
    let dashboard = Dashboard::build(log.sessions(), &today, config.dashboard_limits());
    print!("{}", report::dashboard_text(&dashboard));
    Ok(())
}

fn start_tui<B: Backend, S: SessionStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(config.tick_rate()),
    );

    terminal.draw(|f| ui::draw(&*app, f))?;

    while !app.should_quit {
        let step = runner.step();
        if let AppEvent::Key(key) = step.event {
            app.on_key(key);
        }
        if let Some(since_tick) = step.tick {
            app.on_tick(since_tick);
        }

        terminal.draw(|f| ui::draw(&*app, f))?;
    }

    Ok(())
}
