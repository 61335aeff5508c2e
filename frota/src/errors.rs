use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

/// Error kinds for repository and store operations.
///
/// "No match" is never an error in this crate: lookups return `None`, queries
/// return an empty vector and deletes return `false`. The kinds below are
/// reserved for real failures.
///
/// # Examples
///
/// ```rust
/// use frota::errors::{ErrorKind, FrotaError, FrotaResult};
///
/// fn example() -> FrotaResult<()> {
///     Err(FrotaError::new("store unreachable", ErrorKind::ConnectionError))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::ConnectionError);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// The endpoint is unreachable or the database handle could not be obtained
    ConnectionError,
    /// An insert, replace or delete was rejected by the store
    WriteError,
    /// A read failed for a reason other than connectivity
    BackendError,
    /// A record could not be mapped to or from its document form
    ObjectMappingError,
    /// A filter could not be built or evaluated
    FilterError,
    /// A collection name, entity name or field name is not acceptable
    ValidationError,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ConnectionError => write!(f, "Connection error"),
            ErrorKind::WriteError => write!(f, "Write error"),
            ErrorKind::BackendError => write!(f, "Backend error"),
            ErrorKind::ObjectMappingError => write!(f, "Object mapping error"),
            ErrorKind::FilterError => write!(f, "Filter error"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Error type shared by every crate in the workspace.
///
/// Carries a message, an [ErrorKind], an optional cause and the backtrace
/// captured where the error was created. `Display` shows only the message;
/// `Debug` walks the cause chain and ends with the backtrace of the root.
#[derive(Clone)]
pub struct FrotaError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<FrotaError>>,
    backtrace: Arc<Backtrace>,
}

impl FrotaError {
    /// Creates a new `FrotaError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        FrotaError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    /// Creates a new `FrotaError` that keeps `cause` as its source.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: FrotaError) -> Self {
        FrotaError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&FrotaError> {
        self.cause.as_deref()
    }
}

impl Display for FrotaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for FrotaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for FrotaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for repository and store operations.
pub type FrotaResult<T> = Result<T, FrotaError>;

impl From<bson::ser::Error> for FrotaError {
    fn from(err: bson::ser::Error) -> Self {
        FrotaError::new(
            &format!("Failed to encode record as document: {}", err),
            ErrorKind::ObjectMappingError,
        )
    }
}

impl From<bson::de::Error> for FrotaError {
    fn from(err: bson::de::Error) -> Self {
        FrotaError::new(
            &format!("Failed to decode document into record: {}", err),
            ErrorKind::ObjectMappingError,
        )
    }
}

impl From<std::num::ParseIntError> for FrotaError {
    fn from(err: std::num::ParseIntError) -> Self {
        FrotaError::new(
            &format!("Integer parsing error: {}", err),
            ErrorKind::ValidationError,
        )
    }
}

impl From<String> for FrotaError {
    fn from(msg: String) -> Self {
        FrotaError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for FrotaError {
    fn from(msg: &str) -> Self {
        FrotaError::new(msg, ErrorKind::InternalError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn frota_error_new_creates_error() {
        let error = FrotaError::new("An error occurred", ErrorKind::WriteError);
        assert_eq!(error.message, "An error occurred");
        assert_eq!(error.error_kind, ErrorKind::WriteError);
        assert!(error.cause.is_none());
    }

    #[test]
    fn frota_error_new_with_cause_creates_error() {
        let cause = FrotaError::new("socket closed", ErrorKind::ConnectionError);
        let error = FrotaError::new_with_cause("Insert failed", ErrorKind::WriteError, cause);
        assert_eq!(error.kind(), &ErrorKind::WriteError);
        assert_eq!(error.cause().map(|c| c.kind()), Some(&ErrorKind::ConnectionError));
        assert!(error.source().is_some());
    }

    #[test]
    fn frota_error_display_shows_message_only() {
        let error = FrotaError::new("Collection name is empty", ErrorKind::ValidationError);
        assert_eq!(format!("{}", error), "Collection name is empty");
    }

    #[test]
    fn frota_error_debug_includes_cause() {
        let cause = FrotaError::new("root", ErrorKind::BackendError);
        let error = FrotaError::new_with_cause("outer", ErrorKind::BackendError, cause);
        let debug = format!("{:?}", error);
        assert!(debug.starts_with("outer\nCaused by: root"));
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::ConnectionError.to_string(), "Connection error");
        assert_eq!(ErrorKind::WriteError.to_string(), "Write error");
        assert_eq!(ErrorKind::ObjectMappingError.to_string(), "Object mapping error");
    }

    #[test]
    fn bson_decode_error_maps_to_object_mapping() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Plate {
            plate: String,
        }

        let err = bson::from_document::<Plate>(bson::doc! { "plate": 12 }).unwrap_err();
        let error: FrotaError = err.into();
        assert_eq!(error.kind(), &ErrorKind::ObjectMappingError);
    }

    #[test]
    fn parse_int_error_maps_to_validation() {
        let err = "abc".parse::<u64>().unwrap_err();
        let error: FrotaError = err.into();
        assert_eq!(error.kind(), &ErrorKind::ValidationError);
    }

    #[test]
    fn string_converts_to_internal_error() {
        let error: FrotaError = "boom".into();
        assert_eq!(error.kind(), &ErrorKind::InternalError);
        assert_eq!(error.message(), "boom");
    }
}
