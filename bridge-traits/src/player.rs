//! Media engine bridge traits and supporting player types.
//!
//! The preview panel never decodes or renders anything itself. A host embeds a
//! native media engine (libVLC, mpv, a platform player) and exposes it through
//! [`MediaEngine`] and [`MediaPlayer`]; the core drives those handles and
//! listens to the [`PlayerEvent`]s they push back through a
//! [`PlayerEventSender`].
//!
//! Control calls are synchronous because they are issued from the UI thread
//! and native engines answer them immediately. Everything the engine learns
//! later (track discovery, end of stream, decoder failures) arrives as an
//! event.

use crate::{
    error::Result,
    platform::{PlatformSend, PlatformSendSync},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Engine configuration supplied by the host when a player is created.
///
/// Both fields are opaque to the core and forwarded untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Location of the native engine library.
    pub library_path: PathBuf,
    /// Raw engine option flags (e.g. `--no-osd`).
    pub options: Vec<String>,
}

impl EngineOptions {
    pub fn new(library_path: impl Into<PathBuf>) -> Self {
        Self {
            library_path: library_path.into(),
            options: Vec::new(),
        }
    }

    /// Append a single engine flag.
    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    /// Append several engine flags.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.extend(options.into_iter().map(Into::into));
        self
    }
}

/// Player state as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaState {
    NothingSpecial,
    Opening,
    Buffering,
    Playing,
    Paused,
    Stopped,
    Ended,
    Error,
}

/// Granular player property reported through [`PlayerEvent::PropertyChanged`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlayerProperty {
    Muted,
    Volume,
    Time,
    Position,
    Length,
    /// Engine-specific property without a dedicated variant.
    Other(String),
}

/// Metadata keys the core may query from the open media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaKey {
    Title,
    Artist,
    Album,
    /// URI of embedded or cached cover art.
    ArtworkUrl,
}

/// Notification pushed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    PropertyChanged(PlayerProperty),
    StateChanged(MediaState),
    /// Out-of-band error signal, independent of the state stream.
    EncounteredError,
}

/// Identifier for an event registration held by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half of a player event channel.
pub type PlayerEventReceiver = mpsc::UnboundedReceiver<PlayerEvent>;

/// Handle an engine uses to deliver [`PlayerEvent`]s to the core.
///
/// Cloneable and usable from any engine thread. Events are queued in emission
/// order and drained by the UI thread.
#[derive(Debug, Clone)]
pub struct PlayerEventSender {
    inner: mpsc::UnboundedSender<PlayerEvent>,
}

impl PlayerEventSender {
    /// Create a connected sender/receiver pair.
    pub fn channel() -> (Self, PlayerEventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { inner: tx }, rx)
    }

    /// Queue an event. Returns `false` once the receiving side is gone.
    pub fn send(&self, event: PlayerEvent) -> bool {
        self.inner.send(event).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

/// One open media session inside the native engine.
///
/// Methods take `&self`; native handles synchronise internally. Volume is an
/// integer percentage and time is in milliseconds, both clamped by the engine.
pub trait MediaPlayer: PlatformSend {
    /// Open the resource at `path`, replacing any current media.
    fn open(&self, path: &Path) -> Result<()>;

    fn play(&self) -> Result<()>;

    fn pause(&self) -> Result<()>;

    /// Halt playback and rewind to the start.
    fn stop(&self) -> Result<()>;

    fn is_playing(&self) -> bool;

    /// Current playback time in milliseconds.
    fn time_ms(&self) -> i64;

    fn set_time_ms(&self, time_ms: i64) -> Result<()>;

    /// Jump to a normalised position in `0.0..=1.0`.
    fn set_position(&self, position: f32) -> Result<()>;

    fn volume(&self) -> i32;

    fn set_volume(&self, volume: i32) -> Result<()>;

    fn is_muted(&self) -> bool;

    fn set_muted(&self, muted: bool) -> Result<()>;

    fn video_track_count(&self) -> u32;

    fn audio_track_count(&self) -> u32;

    fn metadata(&self, key: MetaKey) -> Option<String>;

    /// Register an event sender for both property and state notifications.
    fn subscribe(&self, sender: PlayerEventSender) -> Result<SubscriptionId>;

    /// Drop a registration. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);

    /// Release all native resources. Called exactly once by the core, off the
    /// UI thread.
    fn release(&self) -> Result<()>;
}

/// Factory for [`MediaPlayer`] handles.
pub trait MediaEngine: PlatformSendSync {
    fn create_player(&self, options: &EngineOptions) -> Result<Box<dyn MediaPlayer>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_options_builder() {
        let opts = EngineOptions::new("/opt/engine/lib")
            .with_option("--no-osd")
            .with_options(["--quiet", "--no-video-title-show"]);

        assert_eq!(opts.library_path, PathBuf::from("/opt/engine/lib"));
        assert_eq!(
            opts.options,
            vec!["--no-osd", "--quiet", "--no-video-title-show"]
        );
    }

    #[test]
    fn test_media_state_serialization() {
        assert_eq!(
            serde_json::to_string(&MediaState::NothingSpecial).unwrap(),
            "\"NothingSpecial\""
        );
        let state: MediaState = serde_json::from_str("\"Ended\"").unwrap();
        assert_eq!(state, MediaState::Ended);
    }

    #[test]
    fn test_subscription_id_is_unique() {
        let a = SubscriptionId::new();
        let b = SubscriptionId::new();
        assert_ne!(a, b);
        assert_eq!(a, SubscriptionId::from_uuid(*a.as_uuid()));
    }

    #[tokio::test]
    async fn test_sender_delivers_in_order() {
        let (tx, mut rx) = PlayerEventSender::channel();
        let engine_side = tx.clone();

        assert!(engine_side.send(PlayerEvent::StateChanged(MediaState::Opening)));
        assert!(engine_side.send(PlayerEvent::PropertyChanged(PlayerProperty::Muted)));
        assert!(tx.send(PlayerEvent::StateChanged(MediaState::Playing)));

        assert_eq!(
            rx.recv().await,
            Some(PlayerEvent::StateChanged(MediaState::Opening))
        );
        assert_eq!(
            rx.recv().await,
            Some(PlayerEvent::PropertyChanged(PlayerProperty::Muted))
        );
        assert_eq!(
            rx.recv().await,
            Some(PlayerEvent::StateChanged(MediaState::Playing))
        );
    }

    #[test]
    fn test_sender_reports_closed_receiver() {
        let (tx, rx) = PlayerEventSender::channel();
        drop(rx);
        assert!(tx.is_closed());
        assert!(!tx.send(PlayerEvent::EncounteredError));
    }
}
