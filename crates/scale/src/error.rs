use thiserror::Error;

/// Result type for scale analysis operations
pub type Result<T> = std::result::Result<T, ScaleError>;

/// Errors that can occur while configuring the analyzer
#[derive(Error, Debug)]
pub enum ScaleError {
    /// Invalid analyzer configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid scale dictionary contents
    #[error("Invalid dictionary: {0}")]
    InvalidDictionary(String),

    /// A cue pattern built from the dictionary failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// IO error occurred while loading a dictionary
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Dictionary file is not valid TOML
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ScaleError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid dictionary error
    pub fn invalid_dictionary(msg: impl Into<String>) -> Self {
        Self::InvalidDictionary(msg.into())
    }
}
