use crate::filter::InvalidFilter;
use std::env::VarError;
use thiserror::Error;

/// The one error type the whole crate returns. Match on [`ErrorKind`] via
/// [`Error::into_inner`] when you need to tell the failures apart.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl<E> From<E> for Error
where
    ErrorKind: From<E>,
{
    fn from(value: E) -> Self {
        Error(Box::new(value.into()))
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The caller set up a field or filter in a way that can never work.
    /// These should surface to the developer, not the user.
    #[error("Configuration error:\n{0}")]
    ConfigError(#[from] ConfigError),
    /// A persisted tree failed validation against its field schema.
    #[error("Invalid filter:\n{0}")]
    InvalidFilter(#[from] InvalidFilter),
    #[error("Could not find environment variable:\n{0}")]
    EnvVarError(#[from] VarError),
    #[error("IO error:\n{0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error:\n{0}")]
    JsonError(#[from] serde_json::Error),
}

/// Caller-configuration bugs. A field declared with zero allowed operators is
/// broken config, not bad runtime data, so there is no point trying to recover.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no permitted operator")]
    NoPermittedOperator,
    /// A default predicate for a logical operator would not be a predicate at all.
    #[error("a logical operator cannot start a predicate")]
    LogicalDefault,
    #[error("enum field \"{0}\" has no options")]
    EmptyEnum(String),
    #[error("no schema stored for filter \"{0}\"")]
    MissingSchema(String),
}

impl Error {
    pub fn into_inner(self) -> ErrorKind {
        *self.0
    }
}
