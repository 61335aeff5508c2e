use frota::errors::{ErrorKind, FrotaError};
use mongodb::error::{Error, ErrorKind as DriverErrorKind};
use thiserror::Error;

/// Failure reported by the MongoDB driver, classified by what it means to a
/// repository caller.
#[derive(Error, Debug)]
pub enum MongoError {
    /// The connection string or client options were rejected.
    #[error("Invalid MongoDB configuration: {0}")]
    Configuration(#[source] Error),
    /// The server could not be reached or the client could not authenticate.
    #[error("MongoDB connection failed: {0}")]
    Connection(#[source] Error),
    /// The server rejected a write or the connection was lost during it.
    #[error("MongoDB write failed: {0}")]
    Write(#[source] Error),
    /// A read failed for a reason other than connectivity.
    #[error("MongoDB query failed: {0}")]
    Query(#[source] Error),
}

impl MongoError {
    /// Classifies an error raised while reading.
    pub fn read(err: Error) -> Self {
        if is_connectivity_error(&err) {
            MongoError::Connection(err)
        } else {
            MongoError::Query(err)
        }
    }

    /// Classifies an error raised while opening the client or database.
    pub fn connect(err: Error) -> Self {
        match *err.kind {
            DriverErrorKind::InvalidArgument { .. } => MongoError::Configuration(err),
            _ => MongoError::Connection(err),
        }
    }
}

/// Whether the error means the server is unreachable rather than that it
/// refused the request.
pub fn is_connectivity_error(err: &Error) -> bool {
    matches!(
        *err.kind,
        DriverErrorKind::ServerSelection { .. }
            | DriverErrorKind::Io(_)
            | DriverErrorKind::ConnectionPoolCleared { .. }
            | DriverErrorKind::DnsResolve { .. }
            | DriverErrorKind::Authentication { .. }
    )
}

/// Logging is left to the caller that owns the failed operation.
impl From<MongoError> for FrotaError {
    fn from(err: MongoError) -> Self {
        let kind = match &err {
            MongoError::Configuration(_) => ErrorKind::ValidationError,
            MongoError::Connection(_) => ErrorKind::ConnectionError,
            MongoError::Write(_) => ErrorKind::WriteError,
            MongoError::Query(_) => ErrorKind::BackendError,
        };
        FrotaError::new(&err.to_string(), kind)
    }
}

pub type MongoResult<T> = Result<T, MongoError>;
