//! Display-line templates. Pure functions; the fixed-width bracket column
//! keeps every job row aligned regardless of state.

use crate::job::JobState;

/// `[  ACTIVE] description` with the uppercased label right-aligned in an
/// eight character field. Idle renders an all-blank bracket.
pub fn state_line(state: JobState, description: &str) -> String {
    format!("[{:>8}] {}", state.label().to_uppercase(), description)
}

pub fn state_line_with_info(state: JobState, description: &str, info: &str) -> String {
    if info.is_empty() {
        return state_line(state, description);
    }
    format!(
        "[{:>8}] {} : {}",
        state.label().to_uppercase(),
        description,
        info
    )
}

/// `[  42%] description` with the percentage right-aligned in a four
/// character field.
pub fn progress_line(percent: u8, description: &str) -> String {
    format!("[{percent:4}%] {description}")
}

pub fn progress_line_with_info(percent: u8, description: &str, info: &str) -> String {
    if info.is_empty() {
        return progress_line(percent, description);
    }
    format!("[{percent:4}%] {description} : {info}")
}

/// Permanent status-bar text mirroring the overall gauge.
pub fn progress_status_text(percent: u8) -> String {
    format!("Progress: {percent} %")
}
