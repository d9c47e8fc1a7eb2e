use derive_more::Display;
use modelset_core::{
    config::ConfigError,
    error::{ErrorClass, ErrorOrigin as CoreErrorOrigin},
    query::QueryError,
    store::StoreError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Debug, Deserialize, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Store(err) => err.into(),

            _ => {
                let kind = match err.class() {
                    ErrorClass::InvalidArgument => {
                        ErrorKind::Query(QueryErrorKind::InvalidArgument)
                    }
                    ErrorClass::NotIndexed => ErrorKind::Query(QueryErrorKind::NotIndexed),
                    ErrorClass::Typecast => ErrorKind::Query(QueryErrorKind::Typecast),
                    ErrorClass::Unsupported => ErrorKind::Query(QueryErrorKind::Unsupported),
                    ErrorClass::Store | ErrorClass::Internal => ErrorKind::Internal,
                };

                Self::new(kind, err.origin().into(), err.to_string())
            }
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        let kind = match err {
            StoreError::WrongType { .. } => StoreErrorKind::WrongType,
            StoreError::NotNumeric { .. } => StoreErrorKind::NotNumeric,
            StoreError::Unavailable(_) => StoreErrorKind::Unavailable,
        };

        Self::new(ErrorKind::Store(kind), err.origin().into(), err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, err.origin().into(), err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Query(QueryErrorKind),
    Store(StoreErrorKind),

    /// The key layout could not be loaded.
    Config,

    /// The caller cannot remediate this.
    Internal,
}

///
/// QueryErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum QueryErrorKind {
    /// A builder call rejected its arguments.
    InvalidArgument,

    /// The query filters or orders on an attribute without an index.
    NotIndexed,

    /// The query shape cannot be expressed as store commands.
    Unsupported,

    /// A filter value does not fit its attribute.
    Typecast,
}

///
/// StoreErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum StoreErrorKind {
    WrongType,
    NotNumeric,
    Unavailable,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Config,
    Model,
    Query,
    Store,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Config => Self::Config,
            CoreErrorOrigin::Model => Self::Model,
            CoreErrorOrigin::Query => Self::Query,
            CoreErrorOrigin::Store => Self::Store,
        }
    }
}
