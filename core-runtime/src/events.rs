//! # Event Bus System
//!
//! Publishes viewer state to the presentation layer using
//! `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! The playback adapter never talks to UI widgets directly. Every observable
//! attribute change is published as a single typed
//! [`ViewerEvent::PropertyChanged`] message carrying the property identifier
//! and its new value. Any number of presentation components can subscribe
//! independently.
//!
//! ```text
//! ┌──────────────────┐   emit    ┌───────────┐   subscribe   ┌──────────────┐
//! │ PlaybackAdapter  ├──────────>│ EventBus  ├──────────────>│ Panel widget │
//! └──────────────────┘           │ (broadcast│               └──────────────┘
//!                                │  channel) │   subscribe   ┌──────────────┐
//!                                │           ├──────────────>│ Host logger  │
//!                                └───────────┘               └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{
//!     CoreEvent, EventBus, PropertyValue, ViewerEvent, ViewerProperty,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let bus = EventBus::new(16);
//! let mut rx = bus.subscribe();
//!
//! bus.emit(CoreEvent::Viewer(ViewerEvent::PropertyChanged {
//!     property: ViewerProperty::IsPlaying,
//!     value: PropertyValue::Bool(true),
//! }))
//! .ok();
//!
//! let event = rx.recv().await.unwrap();
//! assert_eq!(event.description(), "Viewer property changed");
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - **`RecvError::Lagged(n)`**: the subscriber fell behind and missed `n`
//!   events. Non-fatal; a UI can resynchronise from the adapter's getters.
//! - **`RecvError::Closed`**: all senders dropped, i.e. the viewer is gone.
//!
//! Emitting with no subscribers returns `Err`, which publishers ignore.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Core Event Types
// ============================================================================

/// Top-level event enum published on the bus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Playback panel events
    Viewer(ViewerEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Viewer(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Viewer(ViewerEvent::PlaybackFailed { .. }) => EventSeverity::Error,
            CoreEvent::Viewer(ViewerEvent::Disposed) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

// ============================================================================
// Viewer Events
// ============================================================================

/// Observable attributes of the playback panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewerProperty {
    IsMuted,
    HasEnded,
    HasAudio,
    HasVideo,
    IsPlaying,
    CoverArt,
}

impl ViewerProperty {
    /// Every property, in declaration order.
    pub const ALL: [ViewerProperty; 6] = [
        ViewerProperty::IsMuted,
        ViewerProperty::HasEnded,
        ViewerProperty::HasAudio,
        ViewerProperty::HasVideo,
        ViewerProperty::IsPlaying,
        ViewerProperty::CoverArt,
    ];

    /// Stable name used by hosts that bind properties by string.
    pub fn name(&self) -> &'static str {
        match self {
            ViewerProperty::IsMuted => "IsMuted",
            ViewerProperty::HasEnded => "HasEnded",
            ViewerProperty::HasAudio => "HasAudio",
            ViewerProperty::HasVideo => "HasVideo",
            ViewerProperty::IsPlaying => "IsPlaying",
            ViewerProperty::CoverArt => "CoverArt",
        }
    }
}

impl fmt::Display for ViewerProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// New value carried by a property change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum PropertyValue {
    Bool(bool),
    Text(Option<String>),
}

impl PropertyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(v) => Some(*v),
            PropertyValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(v) => v.as_deref(),
            PropertyValue::Bool(_) => None,
        }
    }
}

/// Events emitted by the playback panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum ViewerEvent {
    /// An observable attribute changed value.
    PropertyChanged {
        property: ViewerProperty,
        value: PropertyValue,
    },
    /// Playback hit an unrecoverable error; the panel is shutting down.
    PlaybackFailed {
        /// The message shown to the user.
        message: String,
    },
    /// The player handle release was initiated.
    Disposed,
}

impl ViewerEvent {
    fn description(&self) -> &str {
        match self {
            ViewerEvent::PropertyChanged { .. } => "Viewer property changed",
            ViewerEvent::PlaybackFailed { .. } => "Playback failed",
            ViewerEvent::Disposed => "Viewer disposed",
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central broadcast channel for viewer events.
///
/// Cloning the bus is cheap and every clone publishes into the same channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl Default for EventBus {
    /// Bus with [`DEFAULT_EVENT_BUFFER_SIZE`] slots per subscriber.
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl EventBus {
    /// Creates a new event bus that buffers up to `capacity` events per
    /// subscriber before reporting `RecvError::Lagged`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; `ViewerConfig` validation rejects that.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an error
    /// if nobody is listening.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber. Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

type EventFilter = Box<dyn Fn(&CoreEvent) -> bool + Send + Sync>;

/// A `broadcast::Receiver` with optional filtering.
///
/// ```rust
/// use core_runtime::events::{CoreEvent, EventBus, EventStream, ViewerEvent, ViewerProperty};
///
/// let bus = EventBus::new(16);
/// let playing_only = EventStream::new(bus.subscribe()).filter(|event| {
///     matches!(
///         event,
///         CoreEvent::Viewer(ViewerEvent::PropertyChanged {
///             property: ViewerProperty::IsPlaying,
///             ..
///         })
///     )
/// });
/// # drop(playing_only);
/// ```
pub struct EventStream {
    receiver: Receiver<CoreEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    pub fn new(receiver: Receiver<CoreEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Only events matching `predicate` will be returned.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CoreEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    /// Receives the next event that passes the filter.
    pub async fn recv(&mut self) -> Result<CoreEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;

            let Some(filter) = &self.filter else {
                return Ok(event);
            };

            if filter(&event) {
                return Ok(event);
            }
        }
    }

    /// Non-blocking receive. `None` when nothing matching is queued.
    pub fn try_recv(&mut self) -> Option<Result<CoreEvent, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    let Some(filter) = &self.filter else {
                        return Some(Ok(event));
                    };

                    if filter(&event) {
                        return Some(Ok(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}
