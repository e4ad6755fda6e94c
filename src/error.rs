use thiserror::Error;

use crate::types::MeasuredResource;

#[derive(Debug, Error)]
pub enum TopError {
    /// The built-in zero literal did not parse. Never expected for the fixed resource set.
    #[error("cannot construct zero quantity for resource {0}")]
    MalformedZeroLiteral(MeasuredResource),

    #[error("unknown resource {0:?}, expected one of: cpu, memory, storage")]
    UnknownResource(String),

    #[error("unsupported sort field {0:?}, expected one of: name, cpu, memory, storage")]
    UnsupportedSortField(String),

    #[error("invalid quantity {value:?}: {reason}")]
    InvalidQuantity { value: String, reason: &'static str },

    #[error("metrics sample has no name")]
    MissingName,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
