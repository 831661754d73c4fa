use thiserror::Error;

/// Failure talking to the text generation backend.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Transport error, timeout, or undecodable response body.
    #[error("generator request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("generator returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generator returned no usable content")]
    EmptyResponse,
}

/// Invalid or missing configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

impl From<ConfigError> for std::io::Error {
    fn from(err: ConfigError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    }
}
