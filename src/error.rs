use thiserror::Error;

/// Errors produced while simulating a cross or reading and writing tables.
#[derive(Debug, Error)]
pub enum Error {
    /// Empty allele pool, negative offspring count, or a value rejected by
    /// the simulator's configured policy.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid<S: Into<String>>(msg: S) -> Self {
        Error::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
