//! The error type shared by every Plugworks crate.
//!
//! Failures funnel into one [`AppError`] carrying a machine-checkable
//! [`ErrorKind`], a message for people, and the optional underlying cause.
//! Nothing in the workspace retries; an error is terminal for the current
//! request or invocation.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What went wrong, at the granularity callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A plugin, option, or catalog entry the caller named does not exist.
    NotFound,
    /// The acting user lacks the required capability.
    Authorization,
    /// A submitted value failed its parse or range checks.
    Validation,
    /// The operation collided with existing state.
    Conflict,
    /// A bug or broken invariant inside the framework.
    Internal,
    /// The host configuration could not be loaded or understood.
    Configuration,
    /// A plugin refused to bootstrap or misbehaved at a lifecycle edge.
    Plugin,
    /// Data could not be encoded or decoded.
    Serialization,
    /// The operation exists in the API but has no implementation yet.
    NotImplemented,
}

impl ErrorKind {
    /// The stable SCREAMING_SNAKE token logs and tests match on.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Authorization => "AUTHORIZATION",
            Self::Validation => "VALIDATION",
            Self::Conflict => "CONFLICT",
            Self::Internal => "INTERNAL",
            Self::Configuration => "CONFIGURATION",
            Self::Plugin => "PLUGIN",
            Self::Serialization => "SERIALIZATION",
            Self::NotImplemented => "NOT_IMPLEMENTED",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unified Plugworks error.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// Failure category.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Underlying cause, when one exists.
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

macro_rules! kind_constructors {
    ($( $(#[$doc:meta])* $name:ident => $kind:ident ),+ $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(message: impl Into<String>) -> Self {
                Self::new(ErrorKind::$kind, message)
            }
        )+
    };
}

impl AppError {
    /// Creates an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping its underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    kind_constructors! {
        /// A missing plugin, option, or catalog entry.
        not_found => NotFound,
        /// A failed capability check.
        authorization => Authorization,
        /// A rejected submission.
        validation => Validation,
        /// A collision with existing state.
        conflict => Conflict,
        /// A framework bug.
        internal => Internal,
        /// A configuration problem.
        configuration => Configuration,
        /// A plugin lifecycle failure.
        plugin => Plugin,
        /// A missing implementation.
        not_implemented => NotImplemented,
    }
}

// The boxed source is not Clone; a cloned error keeps the kind and message
// and drops the cause.
impl Clone for AppError {
    fn clone(&self) -> Self {
        Self::new(self.kind, self.message.clone())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorKind::Serialization, format!("JSON error: {err}"), err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
