use std::io::Write;
use std::sync::{Arc, Mutex};

/// Style bucket for one job row. The theme maps these to concrete colors;
/// the board never deals in colors directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Normal,
    Active,
    Done,
    Failed,
    Skipped,
}

/// Immutable display update pushed by the board. The render side owns its
/// own copy of everything it draws; it never reads the live registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    /// Upsert the row for `name`. New names append below existing rows.
    JobLine {
        name: String,
        text: String,
        style: LineStyle,
    },
    /// Overall completion percentage for the gauge.
    OverallProgress(u8),
    /// Permanent status-bar text (the `Progress: N %` line).
    PermanentStatus(String),
    /// Transient status-bar text, set independently of the progress text.
    TransientStatus(String),
}

/// Where render commands go. Pushes are fire-and-forget: a surface must
/// never block the caller, and a surface that has gone away just swallows
/// the update.
pub trait Surface: Send + Sync {
    fn apply(&self, command: RenderCommand);
}

/// One-line plain-text projection of a command, used when stdout is not a
/// terminal and by the structured test assertions.
pub fn fallback_line(command: &RenderCommand) -> String {
    match command {
        RenderCommand::JobLine { name, text, .. } => {
            format!("job={name} line={}", text.replace('\n', "\\n"))
        }
        RenderCommand::OverallProgress(percent) => format!("progress={percent}"),
        RenderCommand::PermanentStatus(text) => format!("status={}", text.replace('\n', "\\n")),
        RenderCommand::TransientStatus(text) => format!("message={}", text.replace('\n', "\\n")),
    }
}

/// Non-TTY fallback surface: prints one structured line per command so the
/// board stays usable (and scriptable) inside pipes and CI logs.
pub struct TextSurface {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl TextSurface {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }
}

impl Surface for TextSurface {
    fn apply(&self, command: RenderCommand) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        // Fire-and-forget: a broken pipe must not fail the board.
        let _ = writeln!(writer, "{}", fallback_line(&command));
    }
}

/// Test double that records every command in arrival order.
#[derive(Default, Clone)]
pub struct FakeSurface {
    commands: Arc<Mutex<Vec<RenderCommand>>>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<RenderCommand> {
        self.commands.lock().expect("commands lock").clone()
    }

    pub fn last_job_line(&self, name: &str) -> Option<(String, LineStyle)> {
        self.commands()
            .into_iter()
            .rev()
            .find_map(|command| match command {
                RenderCommand::JobLine {
                    name: line_name,
                    text,
                    style,
                } if line_name == name => Some((text, style)),
                _ => None,
            })
    }
}

impl Surface for FakeSurface {
    fn apply(&self, command: RenderCommand) {
        self.commands.lock().expect("commands lock").push(command);
    }
}
