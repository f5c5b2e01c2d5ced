//! Error types for isoshim core operations

use crate::variables::VALID_VARIABLE_NAME;

/// Errors that can occur while parsing an archive command line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    /// Flag not recognized by the archive option grammar
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    /// Value-taking flag appeared as the final token
    #[error("Option {0} requires a value")]
    MissingValue(String),

    /// Boolean flag was given an inline value
    #[error("Option {0} does not take a value")]
    UnexpectedValue(String),

    /// Bare positional argument; the archive grammar has none
    #[error("Unsupported argument: {0}")]
    UnsupportedArgument(String),

    /// Variable key does not match the accepted name pattern
    #[error("Variable {0:?} doesn't respect format {format:?}", format = VALID_VARIABLE_NAME)]
    BadVariableName(String),

    /// `--isolated` was not supplied
    #[error("--isolated is required")]
    IsolatedRequired,

    /// `--isolated` value has the wrong extension
    #[error("--isolated must end with .isolated, got {0:?}")]
    BadIsolatedExtension(String),
}

/// Errors that can occur while evaluating a variable expression
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// Expression references a variable absent from the scope
    #[error("Found unsupported variable {0:?}")]
    UndefinedVariable(String),
}
