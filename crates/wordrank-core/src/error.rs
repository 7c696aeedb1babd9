/// Errors that can occur while ranking words.
#[derive(Debug, thiserror::Error)]
pub enum RankError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<std::io::Error> for RankError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
