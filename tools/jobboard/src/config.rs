use crate::errors::JobBoardError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Render-side settings. Everything has a default; a config file only
/// overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BoardConfig {
    pub screen: ScreenConfig,
    pub theme: ThemeConfig,
    pub log_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScreenConfig {
    /// Redraw cadence of the render thread, in milliseconds.
    pub tick_rate_ms: u64,
}

/// Per-state row colors, by crossterm color name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeConfig {
    pub normal: String,
    pub active: String,
    pub done: String,
    pub failed: String,
    pub skipped: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            theme: ThemeConfig::default(),
            log_path: None,
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 100 }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            normal: "white".to_string(),
            active: "cyan".to_string(),
            done: "green".to_string(),
            failed: "red".to_string(),
            skipped: "darkgray".to_string(),
        }
    }
}

const KNOWN_COLORS: &[&str] = &[
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "gray", "darkgray", "white",
];

impl ThemeConfig {
    fn validate(&self) -> Result<(), JobBoardError> {
        for (field, value) in [
            ("normal", &self.normal),
            ("active", &self.active),
            ("done", &self.done),
            ("failed", &self.failed),
            ("skipped", &self.skipped),
        ] {
            let normalized = value.trim().to_ascii_lowercase();
            if !KNOWN_COLORS.contains(&normalized.as_str()) {
                return Err(JobBoardError::InvalidConfig(format!(
                    "theme.{field}: unknown color {value:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Load a config file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<BoardConfig, JobBoardError> {
    let Some(path) = path else {
        return Ok(BoardConfig::default());
    };
    let raw =
        std::fs::read_to_string(path).map_err(|e| JobBoardError::Io(e.to_string()))?;
    parse_config(&raw)
}

pub fn parse_config(raw: &str) -> Result<BoardConfig, JobBoardError> {
    let config: BoardConfig =
        toml::from_str(raw).map_err(|e| JobBoardError::ConfigParse(e.to_string()))?;
    if config.screen.tick_rate_ms == 0 {
        return Err(JobBoardError::InvalidConfig(
            "screen.tick_rate_ms must be greater than zero".to_string(),
        ));
    }
    config.theme.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::{load_config, parse_config, BoardConfig};

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).expect("defaults");
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.screen.tick_rate_ms, 100);
        assert_eq!(config.theme.done, "green");
        assert!(config.log_path.is_none());
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config = parse_config(
            r#"
            log_path = "/tmp/board.jsonl"

            [screen]
            tick_rate_ms = 250

            [theme]
            active = "Yellow"
            "#,
        )
        .expect("parse");
        assert_eq!(config.screen.tick_rate_ms, 250);
        assert_eq!(config.theme.active, "Yellow");
        assert_eq!(config.theme.done, "green");
        assert_eq!(
            config.log_path.as_deref(),
            Some(std::path::Path::new("/tmp/board.jsonl"))
        );
    }

    #[test]
    fn bad_color_and_zero_tick_rate_are_invalid() {
        let err = parse_config("[theme]\nfailed = \"mauve\"\n").expect_err("bad color");
        assert!(err.to_string().contains("theme.failed"));

        let err = parse_config("[screen]\ntick_rate_ms = 0\n").expect_err("zero tick");
        assert!(err.to_string().contains("tick_rate_ms"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(parse_config("not = [valid").is_err());
    }
}
