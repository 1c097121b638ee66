use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::stdout;

use pcsearch::app::App;
use pcsearch::config;
use pcsearch::haptic::TerminalBell;
use pcsearch::lookup::{HttpFetcher, LookupClient};
use pcsearch::region::table::uk_regions;
use pcsearch::store::FileStore;

/// Interactive UK postcode search
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Interactive UK postcode search with live region detection and autocomplete"
)]
struct Args {
    /// Initial query (overrides the remembered last search)
    query: Option<String>,

    /// Base URL of the postcode lookup service (overrides the config file)
    #[arg(long)]
    endpoint: Option<String>,
}

fn main() -> Result<()> {
    // Writes to /tmp/pcsearch-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    {
        use std::io::Write;

        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/pcsearch-debug.log")
            .expect("Failed to open /tmp/pcsearch-debug.log");

        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .target(env_logger::Target::Pipe(Box::new(log_file)))
            .format(|buf, record| {
                use std::time::SystemTime;
                let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
                writeln!(
                    buf,
                    "[{}] [{}] {}",
                    datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                )
            })
            .init();

        log::debug!("=== PCSEARCH DEBUG SESSION STARTED ===");
    }

    color_eyre::install()?;

    // Load config early to avoid defaults during app initialization
    let config_result = config::load_config();

    let args = Args::parse();

    let endpoint = args
        .endpoint
        .as_deref()
        .unwrap_or(&config_result.config.lookup.endpoint);

    // Validate the endpoint before touching the terminal
    let fetcher = HttpFetcher::new(endpoint)?;
    let lookup = LookupClient::spawn(fetcher);

    let terminal = init_terminal()?;

    let mut app = App::new(
        uk_regions(),
        lookup,
        Box::new(FileStore::new()),
        Box::new(TerminalBell),
        &config_result.config,
    );
    app.warning = config_result.warning;

    if let Some(query) = args.query {
        app.search.handle_input(&query);
        let raw = app.search.raw().to_string();
        app.input.replace(&raw);
    }

    let result = run(terminal, app);

    restore_terminal()?;
    let app = result?;

    // Output after terminal restore to prevent corruption
    if let Some(postcode) = app.accepted() {
        println!("{}", postcode);
    }

    #[cfg(debug_assertions)]
    log::debug!("=== PCSEARCH DEBUG SESSION ENDED ===");

    Ok(())
}

/// Initialize terminal with raw mode, alternate screen, and bracketed paste
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    match execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste) {
        Ok(_) => {}
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
    disable_raw_mode()?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<App> {
    loop {
        // Drain lookup responses before rendering
        app.tick();

        if app.should_render() {
            terminal.draw(|frame| app.render(frame))?;
            app.clear_dirty();
        }

        app.handle_events()?;

        if app.should_quit() {
            break;
        }
    }

    Ok(app)
}
