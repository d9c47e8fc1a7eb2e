use std::fmt;

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// Caller supplied an argument the builder rejects at call time.
    InvalidArgument,
    /// Query shape references something the entity model does not index.
    NotIndexed,
    /// Query shape cannot be translated into store commands.
    Unsupported,
    /// A value could not be typecast for the target attribute.
    Typecast,
    /// The store rejected or failed a primitive operation.
    Store,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidArgument => "invalid_argument",
            Self::NotIndexed => "not_indexed",
            Self::Unsupported => "unsupported",
            Self::Typecast => "typecast",
            Self::Store => "store",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Config,
    Model,
    Query,
    Store,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Config => "config",
            Self::Model => "model",
            Self::Query => "query",
            Self::Store => "store",
        };
        write!(f, "{label}")
    }
}
