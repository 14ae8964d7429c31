//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for weektrader.
#[derive(Debug, thiserror::Error)]
pub enum WeektraderError {
    #[error("no price bars to analyse")]
    EmptyInput,

    #[error("insufficient data: have {bars} bars, need {minimum}")]
    InsufficientData { bars: usize, minimum: usize },

    #[error("invalid bar on {date}: {reason}")]
    InvalidBar { date: NaiveDate, reason: String },

    #[error("bars out of order: {date} does not follow {previous}")]
    UnorderedBars { previous: NaiveDate, date: NaiveDate },

    #[error("{indicator} series is not aligned with the bars at index {index}")]
    MisalignedIndicator { indicator: String, index: usize },

    #[error("signal count {signals} does not match frame count {frames}")]
    SignalLengthMismatch { frames: usize, signals: usize },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&WeektraderError> for std::process::ExitCode {
    fn from(err: &WeektraderError) -> Self {
        let code: u8 = match err {
            WeektraderError::Io(_) => 1,
            WeektraderError::ConfigParse { .. }
            | WeektraderError::ConfigMissing { .. }
            | WeektraderError::ConfigInvalid { .. } => 2,
            WeektraderError::Data { .. } => 3,
            WeektraderError::MisalignedIndicator { .. }
            | WeektraderError::SignalLengthMismatch { .. } => 4,
            WeektraderError::EmptyInput
            | WeektraderError::InsufficientData { .. }
            | WeektraderError::InvalidBar { .. }
            | WeektraderError::UnorderedBars { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

/// Non-fatal: some rows have no indicator value yet and cannot signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("insufficient indicator history: {rows} of {total} rows cannot generate signals")]
pub struct InsufficientHistory {
    pub rows: usize,
    pub total: usize,
}
