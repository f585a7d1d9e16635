use thiserror::Error;

/// Hard failures. Expected misses (window not found, unparsable
/// resolution) are modelled as result variants instead.
#[derive(Error, Debug)]
pub enum BorderlessError {
    #[error("{call} failed (os error {code})")]
    Os { call: &'static str, code: u32 },

    #[error("invalid window handle")]
    InvalidHandle,

    #[error("failed to read settings: {0}")]
    SettingsIo(#[from] std::io::Error),

    #[error("malformed settings file: {0}")]
    SettingsFormat(#[from] serde_json::Error),
}

pub type BorderlessResult<T> = Result<T, BorderlessError>;
