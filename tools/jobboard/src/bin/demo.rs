use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use jobboard::logging::JsonlLogger;
use jobboard::{load_config, JobBoard, JobBoardError, Screen, Surface, TextSurface};

#[derive(Debug, Parser)]
#[command(name = "jobboard-demo")]
#[command(about = "Drives a four-job board through its whole lifecycle")]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,
    /// Pause between lifecycle steps, in milliseconds.
    #[arg(long, default_value_t = 500)]
    step_ms: u64,
    /// Print structured lines instead of taking over the terminal.
    #[arg(long, default_value_t = false)]
    headless: bool,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), JobBoardError> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let headless = cli.headless || !std::io::stdout().is_terminal();

    let mut screen = None;
    let surface: Arc<dyn Surface> = if headless {
        Arc::new(TextSurface::stdout())
    } else {
        let spawned = Arc::new(Screen::spawn(&config)?);
        screen = Some(spawned.clone());
        spawned
    };

    let board = match &config.log_path {
        Some(path) => JobBoard::with_logger(surface, JsonlLogger::new(path)),
        None => JobBoard::new(surface),
    };

    board.add_job("fetch", "Fetching sources");
    board.add_job("build", "Compiling workspace");
    board.add_job("docs", "Rendering documentation");
    board.add_job("publish", "Publishing artifacts");
    let completion = board.completion();

    let step = Duration::from_millis(cli.step_ms);
    for name in ["fetch", "build", "docs", "publish"] {
        board.set_active(name)?;
        std::thread::sleep(step);
        for percent in [25, 50, 75] {
            board.set_progress(name, percent)?;
            std::thread::sleep(step);
        }
        board.set_done(name)?;
    }

    if let Some(receiver) = completion {
        let _ = receiver.blocking_recv();
    }
    board.set_status_text("All jobs done, you may close the app now");

    if let Some(screen) = screen {
        screen.wait();
    }
    Ok(())
}
