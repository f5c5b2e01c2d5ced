//! # Isoshim Core
//!
//! Archive command-line parsing and `.isolate` variable evaluation for the
//! `isoshim` dispatcher.
//!
//! ## Modules
//!
//! - `error`: Error types (option parsing, variable evaluation)
//! - `options`: Archive option model and command-line parser
//! - `variables`: `<(VAR)` substitution over a variable scope

#![warn(missing_docs)]

pub mod error;
pub mod options;
pub mod variables;

// Re-export commonly used types
pub use error::{EvalError, OptionsError};
pub use options::{ArchiveOptions, VariableValue};
