use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobBoardError {
    #[error("no job named {0}")]
    NotFound(String),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("config parse error: {0}")]
    ConfigParse(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
