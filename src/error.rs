use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NestError {
    #[error("Attempting to mutate the shared base mapping")]
    PrototypeMutation,
    #[error("Object at wildcard ({prefix}) is not a sequence")]
    NotASequence { prefix: String },
    #[error("Cannot step into {kind} with key '{key}'")]
    NotTraversable { key: String, kind: &'static str },
    #[error("Cannot use {kind} as the base of a mapping")]
    InvalidBase { kind: &'static str },
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("JSON error: {0}")]
    Json(String),
}

impl NestError {
    /// Only a guarded write is allowed to escape an accessor; everything
    /// else degrades to the accessor's fallback result.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::PrototypeMutation)
    }
}

pub type Result<T> = std::result::Result<T, NestError>;

// Helper conversions
impl From<config::ConfigError> for NestError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<std::io::Error> for NestError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}
impl From<serde_json::Error> for NestError {
    fn from(e: serde_json::Error) -> Self { Self::Json(e.to_string()) }
}
