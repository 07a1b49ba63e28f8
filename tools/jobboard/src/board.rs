use std::sync::{Arc, Mutex};

use serde_json::json;
use tokio::sync::oneshot;

use crate::errors::JobBoardError;
use crate::format::{progress_line_with_info, progress_status_text, state_line, state_line_with_info};
use crate::job::{clamp_progress, Job, JobState};
use crate::logging::{JsonlLogger, LogEvent};
use crate::progress::ProgressTracker;
use crate::registry::JobRegistry;
use crate::surface::{LineStyle, RenderCommand, Surface};

/// The public operation surface. Every mutation runs under one mutex, so
/// no two mutations race and no render command is pushed with a torn
/// state; the surface consumes commands on its own schedule.
pub struct JobBoard {
    inner: Mutex<BoardInner>,
    surface: Arc<dyn Surface>,
}

struct BoardInner {
    registry: JobRegistry,
    tracker: ProgressTracker,
    logger: Option<JsonlLogger>,
}

impl JobBoard {
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self {
            inner: Mutex::new(BoardInner {
                registry: JobRegistry::new(),
                tracker: ProgressTracker::new(),
                logger: None,
            }),
            surface,
        }
    }

    pub fn with_logger(surface: Arc<dyn Surface>, logger: JsonlLogger) -> Self {
        let board = Self::new(surface);
        board.lock().logger = Some(logger);
        board
    }

    /// Registers a job in Idle at zero progress and renders its row.
    /// Re-adding a name overwrites the existing record; this is not
    /// guarded against.
    pub fn add_job(&self, name: impl Into<String>, description: impl Into<String>) {
        let job = Job::new(name, description);
        let mut inner = self.lock();
        self.surface.apply(RenderCommand::JobLine {
            name: job.name.clone(),
            text: state_line(job.state, &job.description),
            style: style_for(job.state),
        });
        inner.registry.add(job);
    }

    pub fn set_state(&self, name: &str, state: JobState) -> Result<(), JobBoardError> {
        self.set_state_with_info(name, state, "")
    }

    /// Explicit state transition. No transition table restricts what may
    /// follow what; only a transition into Done recomputes the aggregate.
    /// The info suffix applies to Done and Error transitions only.
    pub fn set_state_with_info(
        &self,
        name: &str,
        state: JobState,
        info: &str,
    ) -> Result<(), JobBoardError> {
        let mut inner = self.lock();
        self.apply_state(&mut inner, name, state, info)
    }

    pub fn set_active(&self, name: &str) -> Result<(), JobBoardError> {
        self.set_state(name, JobState::Active)
    }

    pub fn set_skipped(&self, name: &str) -> Result<(), JobBoardError> {
        self.set_state(name, JobState::Skipped)
    }

    pub fn set_done(&self, name: &str) -> Result<(), JobBoardError> {
        self.set_state(name, JobState::Done)
    }

    pub fn set_done_text(&self, name: &str, info: &str) -> Result<(), JobBoardError> {
        self.set_state_with_info(name, JobState::Done, info)
    }

    pub fn set_failed(&self, name: &str) -> Result<(), JobBoardError> {
        self.set_state(name, JobState::Error)
    }

    pub fn set_failed_text(&self, name: &str, info: &str) -> Result<(), JobBoardError> {
        self.set_state_with_info(name, JobState::Error, info)
    }

    pub fn set_progress(&self, name: &str, value: i64) -> Result<(), JobBoardError> {
        self.set_progress_with_info(name, value, "")
    }

    /// Per-job progress. Values are clamped to [0, 100]; reaching 100 is
    /// an implicit Done transition; a job already Done ignores further
    /// progress. State is otherwise left untouched, progress and state
    /// are independently settable.
    pub fn set_progress_with_info(
        &self,
        name: &str,
        value: i64,
        info: &str,
    ) -> Result<(), JobBoardError> {
        let clamped = clamp_progress(value);
        // One guard for the whole operation: the Done check, the implicit
        // Done transition, and the progress store must not interleave
        // with another caller's transition.
        let mut inner = self.lock();
        let job = inner.registry.get(name)?;
        if job.state == JobState::Done {
            return Ok(());
        }
        if clamped >= 100 {
            return self.apply_state(&mut inner, name, JobState::Done, info);
        }

        let job = inner.registry.get_mut(name)?;
        job.progress = clamped;
        let text = progress_line_with_info(clamped, &job.description, info);
        let style = style_for(job.state);
        self.surface.apply(RenderCommand::JobLine {
            name: name.to_string(),
            text,
            style,
        });
        Ok(())
    }

    /// Transient status line, independent of the permanent progress text.
    pub fn set_status_text(&self, text: &str) {
        let _inner = self.lock();
        self.surface
            .apply(RenderCommand::TransientStatus(text.to_string()));
    }

    /// One-shot completion handoff: the first caller gets the receiver,
    /// later callers get None instead of a second await that could never
    /// resolve.
    pub fn completion(&self) -> Option<oneshot::Receiver<()>> {
        self.lock().tracker.take_completion()
    }

    pub fn is_complete(&self) -> bool {
        self.lock().tracker.is_complete()
    }

    pub fn overall_percent(&self) -> u8 {
        self.lock().tracker.percent()
    }

    pub fn job_count(&self) -> usize {
        self.lock().registry.len()
    }

    pub fn job(&self, name: &str) -> Result<Job, JobBoardError> {
        self.lock().registry.get(name).cloned()
    }

    fn apply_state(
        &self,
        inner: &mut BoardInner,
        name: &str,
        state: JobState,
        info: &str,
    ) -> Result<(), JobBoardError> {
        let job = inner.registry.get_mut(name)?;
        let was_done = job.state == JobState::Done;
        job.state = state;
        let text = if matches!(state, JobState::Done | JobState::Error) && !info.is_empty() {
            let text = state_line_with_info(state, &job.description, info);
            job.append_info(info);
            text
        } else {
            state_line(state, &job.description)
        };
        self.surface.apply(RenderCommand::JobLine {
            name: name.to_string(),
            text,
            style: style_for(state),
        });
        if state == JobState::Done && !was_done {
            self.push_aggregate(inner);
        }
        log_transition(inner, name, state);
        Ok(())
    }

    fn push_aggregate(&self, inner: &mut BoardInner) {
        let total = inner.registry.len();
        let percent = inner.tracker.on_job_done(total);
        self.surface.apply(RenderCommand::OverallProgress(percent));
        self.surface
            .apply(RenderCommand::PermanentStatus(progress_status_text(percent)));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BoardInner> {
        self.inner.lock().expect("board lock poisoned")
    }
}

fn style_for(state: JobState) -> LineStyle {
    match state {
        JobState::Idle => LineStyle::Normal,
        JobState::Active => LineStyle::Active,
        JobState::Skipped => LineStyle::Skipped,
        JobState::Done => LineStyle::Done,
        JobState::Error => LineStyle::Failed,
    }
}

fn log_transition(inner: &BoardInner, name: &str, state: JobState) {
    let Some(logger) = &inner.logger else {
        return;
    };
    // Diagnostics must never fail a board operation.
    let _ = logger.append(&LogEvent {
        level: "info",
        event_type: "job_state",
        payload: json!({
            "job": name,
            "state": state.as_str(),
            "percent": inner.tracker.percent(),
        }),
    });
}
