//! Result alias used across the workspace.

use crate::error::AppError;

/// Result of any fallible Plugworks operation.
pub type AppResult<T> = Result<T, AppError>;
