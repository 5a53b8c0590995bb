//! Error types for the Seat/Cupra extension

use thiserror::Error;

/// Result type for Seat/Cupra operations
pub type SeatCupraResult<T> = Result<T, SeatCupraError>;

/// Errors surfaced to the caller
///
/// Unknown vendor values and rejected levels are not errors; they go to the
/// [`Diagnostics`](crate::Diagnostics) sink instead.
#[derive(Debug, Error)]
pub enum SeatCupraError {
    /// Payload is not valid JSON or does not have the expected shape
    #[error("invalid vendor payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Payload carries no VIN
    #[error("vendor payload has no VIN")]
    MissingVin,

    /// Payload belongs to a different vehicle than the previous snapshot
    #[error("VIN mismatch: previous snapshot is {expected}, payload is {actual}")]
    VinMismatch { expected: String, actual: String },
}
