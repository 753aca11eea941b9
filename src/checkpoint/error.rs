//! Errors raised while encoding, decoding or restoring a checkpoint.

use thiserror::Error;

/// Why a checkpoint could not be stored or adopted.
///
/// A failed `restore` leaves the machine's active state and history as they
/// were.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Written by a newer or older checkpoint format.
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Restoring into a machine with a different name.
    #[error("Checkpoint belongs to machine '{found}', expected '{expected}'")]
    MachineMismatch { expected: String, found: String },

    /// The active state was not registered on the restoring machine, e.g.
    /// because its transitions changed since the checkpoint was taken.
    #[error("Checkpoint state '{state}' is not registered on this machine")]
    UnknownState { state: String },

    /// History recorded without an active state to end it.
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),
}
