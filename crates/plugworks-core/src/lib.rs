//! # plugworks-core
//!
//! Core crate for Plugworks. Contains the component identity type, the
//! option-value encoding and store trait, configuration schemas, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Plugworks crates.

pub mod component;
pub mod config;
pub mod error;
pub mod options;
pub mod result;

pub use component::ComponentInfo;
pub use error::AppError;
pub use options::{OptionStore, OptionValue};
pub use result::AppResult;
