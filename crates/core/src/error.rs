//! Error types for Graphstat

use thiserror::Error;

/// Main error type for Graphstat operations
#[derive(Error, Debug)]
pub enum Error {
    /// No graph was supplied and the dataset has no default connectivities.
    #[error("no graph supplied and no default connectivities found; neighbors must be computed first")]
    MissingGraph,

    /// A named graph was requested; only the default connectivities are supported.
    #[error("graph key {key:?} is not implemented; only the default connectivities can be used")]
    UnsupportedGraphKey { key: String },

    /// Graph is non-square, or the node dimension of the values disagrees
    /// with the graph size.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Values are not one of: 1-D dense, 2-D dense, 2-D sparse.
    #[error("unsupported value type: {0}")]
    UnsupportedValueType(String),

    /// Conflicting or unusable value-source hints in the container form.
    #[error("ambiguous value source: {0}")]
    AmbiguousSource(String),

    /// Malformed compressed-row arrays.
    #[error("invalid CSR structure: {0}")]
    InvalidCsr(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Graphstat operations
pub type Result<T> = std::result::Result<T, Error>;
