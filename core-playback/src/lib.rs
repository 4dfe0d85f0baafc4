//! # Playback Panel Core
//!
//! Event relay between a preview host's UI and an external media engine.
//!
//! ## Overview
//!
//! [`PlaybackAdapter`] owns one engine player handle. It forwards transport
//! commands (play/pause, stop, seek, volume, mute) to the engine and mirrors
//! the engine's asynchronous state and property notifications into six
//! observable properties, published on a
//! [`core_runtime::events::EventBus`]. Decoding, rendering, buffering and
//! retries all stay inside the engine.
//!
//! ## Usage
//!
//! ```ignore
//! use core_playback::{PlaybackAdapter, ViewerGesture};
//! use core_runtime::config::ViewerConfig;
//!
//! let config = ViewerConfig::builder()
//!     .engine(engine)
//!     .notification_sink(toasts)
//!     .build()?;
//!
//! let mut adapter = PlaybackAdapter::new(config)?;
//! let mut changes = adapter.subscribe();
//! adapter.load("/home/ana/Videos/trip.mp4");
//!
//! // UI loop
//! adapter.process_pending_events();
//! adapter.handle_gesture(ViewerGesture::MouseWheel { delta: 120 });
//! ```

pub mod adapter;
pub mod disposal;
pub mod error;
pub mod gestures;
pub mod properties;

pub use adapter::{LifecyclePhase, PlaybackAdapter};
pub use disposal::Disposal;
pub use error::{PlaybackError, Result};
pub use gestures::{wheel_volume_delta, ViewerGesture};
pub use properties::PropertySnapshot;
