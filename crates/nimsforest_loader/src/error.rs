//! Loader error types.

use thiserror::Error;

/// Everything that can go wrong acquiring or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The source answered with a non-success status.
    #[error("snapshot source returned status {status}")]
    Transport {
        /// Status code as reported by the source.
        status: u16,
    },

    /// Reading the snapshot bytes failed.
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// The payload was not a valid snapshot document.
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    /// A refresh completed after a newer one had already been applied.
    #[error("stale refresh: ticket {got} superseded by {newest}")]
    Stale {
        /// Ticket of the refresh that just completed.
        got: u64,
        /// Newest ticket already applied.
        newest: u64,
    },
}

/// Loader result alias.
pub type SnapshotResult<T> = Result<T, SnapshotError>;
