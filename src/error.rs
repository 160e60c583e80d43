use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotpError {
    #[error("Invalid secret: {0}")]
    InvalidSecret(String),
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),
    #[error("Timestamp overflow at step {index} after start {start}")]
    TimestampOverflow { start: i64, index: u64 },
    #[error("Unsupported code length: {0} digits")]
    InvalidDigits(u32),
    #[error("Invalid code: {0:?}")]
    InvalidCode(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not valid unicode")]
    NotUnicode { name: &'static str },
    #[error("{name} could not be parsed from {value:?}")]
    Unparseable { name: &'static str, value: String },
}
