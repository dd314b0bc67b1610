use thiserror::Error;

/// Failure to produce the textual form of a value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// Raw bytes that are not valid UTF-8
    #[error("invalid UTF-8 sequence after {valid_up_to} bytes")]
    InvalidUtf8 { valid_up_to: usize },

    /// Object-supplied rendering failure
    #[error("{0}")]
    Other(String),
}

impl TextError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

impl From<std::str::Utf8Error> for TextError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::InvalidUtf8 {
            valid_up_to: err.valid_up_to(),
        }
    }
}

/// Failure to read a named attribute from an introspectable value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error("no attribute named '{0}'")]
    Missing(String),

    #[error("reading attribute '{name}' failed: {reason}")]
    Failed { name: String, reason: String },
}

impl AttributeError {
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing(name.into())
    }

    pub fn failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failed {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
