//! Error types for the worker launcher and database client
//!
//! Provides unified error handling using thiserror.

use mongodb::error::ErrorKind;
use thiserror::Error;

use crate::tasks::WorkerId;

// == Error Enum ==
/// Unified error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad launch parameters, connection string or index definition
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The database server could not be reached
    #[error("Connection failure: {0}")]
    ConnectionFailure(String),

    /// A worker body returned an error or panicked
    #[error("Worker {worker} failed: {reason}")]
    WorkerFailure { worker: WorkerId, reason: String },

    /// The server rejected a command
    #[error("Command failed with code {code}: {message}")]
    QueryFailed { code: i32, message: String },

    /// The server replied with something we could not decode
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Any other driver error
    #[error("Database driver error: {0}")]
    Driver(String),
}

impl Error {
    /// Returns true if this error means the server was unreachable.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Error::ConnectionFailure(_))
    }
}

// == Driver Conversion ==
impl From<mongodb::error::Error> for Error {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::InvalidArgument { message, .. } => Error::InvalidArgument(message.clone()),
            ErrorKind::Command(command) => Error::QueryFailed {
                code: command.code,
                message: command.message.clone(),
            },
            ErrorKind::BsonDeserialization(_) | ErrorKind::InvalidResponse { .. } => {
                Error::InvalidResponse(err.to_string())
            }
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. } => Error::ConnectionFailure(err.to_string()),
            _ => Error::Driver(err.to_string()),
        }
    }
}

impl From<mongodb::bson::de::Error> for Error {
    fn from(err: mongodb::bson::de::Error) -> Self {
        Error::InvalidResponse(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;
