//! Error types for the collaborator edges.
//!
//! The signal pass itself never fails; these cover config loading and data
//! retrieval only.

/// Top-level error type for trendsignal.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error for {symbol}: {reason}")]
    DataSource { symbol: String, reason: String },

    #[error("malformed {what} at line {line}: {reason}")]
    DataFormat {
        what: String,
        line: usize,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SignalError> for std::process::ExitCode {
    fn from(err: &SignalError) -> Self {
        let code: u8 = match err {
            SignalError::Io(_) => 1,
            SignalError::ConfigParse { .. } | SignalError::ConfigInvalid { .. } => 2,
            SignalError::DataSource { .. } | SignalError::DataFormat { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}
