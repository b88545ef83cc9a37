//! Error types for the `eidos-memetic` crate.
//!
//! Store operations themselves never fail: an empty population or a query
//! with no matches yields an empty result. Errors only arise at the edges,
//! when a configuration or a textual sort key is parsed.

/// Errors that can occur when building or querying an evolutionary store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemeticError {
    /// A configuration value is out of its permitted range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the permitted range.
        reason: String,
    },

    /// A retrieval sort key other than `fitness` or `age` was requested.
    #[error("unsupported sort key: {0}")]
    UnsupportedSortKey(String),
}
