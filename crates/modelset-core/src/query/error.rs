use crate::{
    error::{ErrorClass, ErrorOrigin},
    model::TypecastError,
    store::StoreError,
};
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Every failure a builder call or a resolution can surface.
/// Nothing is retried or recovered internally.
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    /// Rejected synchronously by a builder call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A filter references an attribute without a usable index.
    #[error("attribute '{attribute}' is not indexed in {entity}")]
    NotIndexed {
        attribute: String,
        entity: &'static str,
    },

    /// A range filter cannot be split or names an unsupported operator.
    #[error("malformed range expression: {0}")]
    MalformedRange(String),

    #[error("{0}")]
    Typecast(#[from] TypecastError),

    #[error("{0}")]
    Store(#[from] StoreError),
}

impl QueryError {
    pub(crate) fn not_indexed(attribute: &str, entity: &'static str) -> Self {
        Self::NotIndexed {
            attribute: attribute.to_string(),
            entity,
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidArgument(_) => ErrorClass::InvalidArgument,
            Self::NotIndexed { .. } => ErrorClass::NotIndexed,
            Self::MalformedRange(_) => ErrorClass::Unsupported,
            Self::Typecast(_) => ErrorClass::Typecast,
            Self::Store(_) => ErrorClass::Store,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::Typecast(_) => ErrorOrigin::Model,
            Self::Store(_) => ErrorOrigin::Store,
            _ => ErrorOrigin::Query,
        }
    }
}
