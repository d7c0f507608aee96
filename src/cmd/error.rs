//! Dispatch failure taxonomy.

use thiserror::Error;

use super::catalog::ParamKind;

/// Every way a single run can fail. `Dispatcher::run` turns these into one
/// line on the error stream and a failing exit status.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("{0} is not a valid command")]
    UnknownCommand(String),

    #[error("Incorrect # of arguments for {command}: expected {min}..={max} positional, got {given}")]
    Arity {
        command: String,
        min: usize,
        max: usize,
        given: usize,
    },

    #[error("invalid value for '{param}': expected {kind}, got '{value}'")]
    TypeMismatch {
        param: String,
        kind: ParamKind,
        value: String,
    },

    #[error("argument '{param}' of {command} supplied both positionally and by name")]
    DuplicateArgument { command: String, param: String },

    #[error("{command} failed: {message}")]
    CommandExecution { command: String, message: String },
}

pub type DispatchResult<T> = std::result::Result<T, DispatchError>;
