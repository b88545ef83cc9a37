//! Error types for the `eidos-swarm` crate.

/// Errors that can occur when driving a consensus round.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwarmError {
    /// The requested consensus method name is not recognized.
    ///
    /// Raised before any belief is collected, so a failed call leaves
    /// participants and history untouched.
    #[error("unsupported consensus method: {0}")]
    UnsupportedMethod(String),
}
