use serde::{Deserialize, Serialize};

/// Exclusive job status. Exactly one variant holds at a time; there is no
/// transition table, callers sequence states themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Idle,
    Active,
    Skipped,
    Done,
    Error,
}

impl JobState {
    /// Label shown inside the bracketed status column. Idle renders blank.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Active => "active",
            Self::Skipped => "skip",
            Self::Done => "done",
            Self::Error => "fail",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Skipped => "skipped",
            Self::Done => "done",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Lookup key, never displayed.
    pub name: String,
    /// Displayed label. An info suffix may be appended permanently.
    pub description: String,
    pub state: JobState,
    /// Meaningful only while state is not Done. Always in [0, 100].
    pub progress: u8,
}

impl Job {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            state: JobState::Idle,
            progress: 0,
        }
    }

    /// Appends `" : <info>"` to the description. Irreversible.
    pub fn append_info(&mut self, info: &str) {
        if !info.is_empty() {
            self.description = format!("{} : {}", self.description, info);
        }
    }
}

/// Clamp an arbitrary caller-supplied progress value into [0, 100].
/// Out-of-range values are corrected, never rejected.
pub fn clamp_progress(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::{clamp_progress, Job, JobState};

    #[test]
    fn new_job_starts_idle_at_zero() {
        let job = Job::new("fetch", "Fetching sources");
        assert_eq!(job.state, JobState::Idle);
        assert_eq!(job.progress, 0);
        assert_eq!(job.description, "Fetching sources");
    }

    #[test]
    fn info_suffix_is_appended_and_empty_info_is_ignored() {
        let mut job = Job::new("fetch", "Fetching sources");
        job.append_info("");
        assert_eq!(job.description, "Fetching sources");
        job.append_info("timed out");
        assert_eq!(job.description, "Fetching sources : timed out");
        job.append_info("again");
        assert_eq!(job.description, "Fetching sources : timed out : again");
    }

    #[test]
    fn progress_is_clamped_not_rejected() {
        assert_eq!(clamp_progress(-5), 0);
        assert_eq!(clamp_progress(0), 0);
        assert_eq!(clamp_progress(42), 42);
        assert_eq!(clamp_progress(100), 100);
        assert_eq!(clamp_progress(250), 100);
    }

    #[test]
    fn idle_label_is_blank() {
        assert_eq!(JobState::Idle.label(), "");
        assert_eq!(JobState::Error.label(), "fail");
    }
}
