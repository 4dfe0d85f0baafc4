//! # Playback Error Types
//!
//! Errors surfaced by the playback adapter. Transport commands never return
//! these to the UI; they are logged, and engine failures during playback go
//! through the single "playback failed" flow instead.

use bridge_traits::BridgeError;
use thiserror::Error;

/// Errors that can occur while creating or driving the playback adapter.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The media engine rejected a call.
    #[error("Engine call failed: {0}")]
    Engine(#[from] BridgeError),

    /// Configuration or runtime infrastructure failure.
    #[error("Runtime error: {0}")]
    Runtime(#[from] core_runtime::Error),

    /// The player handle has already been released.
    #[error("Playback adapter already disposed")]
    Disposed,

    /// Releasing the player handle failed or panicked.
    #[error("Player release failed: {0}")]
    DisposalFailed(String),
}

impl PlaybackError {
    /// `true` for errors that only mean "the command arrived too late".
    pub fn is_disposed(&self) -> bool {
        matches!(self, PlaybackError::Disposed)
    }
}

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_errors_convert() {
        let err: PlaybackError = BridgeError::Engine("no vout".to_string()).into();
        assert!(matches!(err, PlaybackError::Engine(_)));
        assert!(!err.is_disposed());
        assert_eq!(err.to_string(), "Engine call failed: Media engine error: no vout");
    }

    #[test]
    fn test_disposed() {
        assert!(PlaybackError::Disposed.is_disposed());
        assert!(!PlaybackError::DisposalFailed("panic".to_string()).is_disposed());
    }
}
