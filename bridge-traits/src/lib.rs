//! # Host Bridge Traits
//!
//! Contracts between the preview player core and the application embedding
//! it.
//!
//! ## Overview
//!
//! The core owns no decoder, renderer or UI toolkit. Everything platform- or
//! vendor-specific is reached through the traits in this crate, which the host
//! implements and injects via `core_runtime::config::ViewerConfig`.
//!
//! ## Traits
//!
//! ### Media
//! - [`MediaEngine`](player::MediaEngine) - Creates player handles from host-supplied engine options
//! - [`MediaPlayer`](player::MediaPlayer) - Transport controls, track counts, metadata and event registration for one open media session
//!
//! ### Host UI
//! - [`NotificationSink`](notification::NotificationSink) - Toast surface used for unrecoverable playback errors
//!
//! ### Utilities
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ## Error Handling
//!
//! Fallible bridge calls return [`BridgeError`](error::BridgeError). Engine
//! implementations should map native failure codes to
//! [`BridgeError::Engine`](error::BridgeError::Engine) with a short
//! description.
//!
//! ## Thread Safety
//!
//! Engines and sinks are shared behind `Arc` and must be `Send + Sync`.
//! Players only need `Send`: they are driven from one UI thread and moved onto
//! a blocking worker exactly once, for release.

pub mod error;
pub mod logging;
pub mod notification;
pub mod platform;
pub mod player;

pub use error::BridgeError;

// Re-export commonly used types
pub use logging::{LogEntry, LogLevel, LoggerSink};
pub use notification::NotificationSink;
pub use player::{
    EngineOptions, MediaEngine, MediaPlayer, MediaState, MetaKey, PlayerEvent,
    PlayerEventReceiver, PlayerEventSender, PlayerProperty, SubscriptionId,
};
