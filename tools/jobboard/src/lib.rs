//! Live-updating terminal board for named jobs.
//!
//! The board tracks each job's state (idle, active, skipped, done,
//! failed) and an overall completion percentage, and pushes immutable
//! text+style updates into a rendering surface. The production surface
//! draws with ratatui on its own thread; tests record the pushed commands
//! or render frames through a `TestBackend`.
//!
//! ```no_run
//! use std::sync::Arc;
//! use jobboard::{BoardConfig, JobBoard, Screen};
//!
//! # fn main() -> Result<(), jobboard::JobBoardError> {
//! let screen = Arc::new(Screen::spawn(&BoardConfig::default())?);
//! let board = JobBoard::new(screen.clone());
//! board.add_job("build", "Compiling workspace");
//! board.set_active("build")?;
//! board.set_progress("build", 40)?;
//! board.set_done("build")?;
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod config;
pub mod errors;
pub mod format;
pub mod hotkeys;
pub mod job;
pub mod logging;
pub mod progress;
pub mod registry;
pub mod screen;
pub mod surface;
pub mod tui;

pub use board::JobBoard;
pub use config::{load_config, BoardConfig};
pub use errors::JobBoardError;
pub use job::{Job, JobState};
pub use screen::Screen;
pub use surface::{FakeSurface, LineStyle, RenderCommand, Surface, TextSurface};
