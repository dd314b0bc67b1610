use grasp_object::TextError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AproposError>;

#[derive(Error, Debug)]
pub enum AproposError {
    /// Needle is not a valid pattern
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Textual comparison failed for one node; contained by the walk
    #[error("Text error: {0}")]
    Text(#[from] TextError),

    /// Caller-supplied predicate failed
    #[error("Predicate error: {0}")]
    Predicate(String),

    #[error("Unknown predicate: {0}")]
    UnknownPredicate(String),
}

impl AproposError {
    pub fn predicate(msg: impl Into<String>) -> Self {
        Self::Predicate(msg.into())
    }
}
