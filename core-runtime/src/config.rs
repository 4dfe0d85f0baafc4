//! # Viewer Configuration Module
//!
//! Builder-based configuration for the playback panel.
//!
//! ## Overview
//!
//! A [`ViewerConfig`] carries the two bridges the panel cannot work without
//! (the media engine and the host notification sink), the opaque engine
//! options, and a handful of tunables for the transport controls. The builder
//! validates everything up front so that a misconfigured host fails at
//! construction time rather than on the first gesture.
//!
//! ## Required Dependencies
//!
//! - `MediaEngine` - creates the player handle
//! - `NotificationSink` - shows the playback-failed toast
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_traits::EngineOptions;
//! use core_runtime::config::ViewerConfig;
//! use std::sync::Arc;
//!
//! let config = ViewerConfig::builder()
//!     .engine(Arc::new(MyEngine))
//!     .notification_sink(Arc::new(MyToasts))
//!     .engine_options(EngineOptions::new("/opt/engine").with_option("--no-osd"))
//!     .build()?;
//! ```
//!
//! Missing bridges are reported with an actionable error:
//!
//! ```
//! use core_runtime::{config::ViewerConfig, Error};
//!
//! let err = ViewerConfig::builder().build().unwrap_err();
//! assert!(matches!(err, Error::CapabilityMissing { .. }));
//! ```

use crate::error::{Error, Result};
use crate::events::DEFAULT_EVENT_BUFFER_SIZE;
use bridge_traits::{EngineOptions, MediaEngine, NotificationSink};
use std::sync::Arc;
use std::time::Duration;

/// Volume applied when media is loaded.
pub const DEFAULT_VOLUME: i32 = 50;

/// Step used by the backward/forward buttons.
pub const DEFAULT_SEEK_STEP: Duration = Duration::from_secs(10);

/// Volume points per mouse-wheel notch.
pub const DEFAULT_WHEEL_VOLUME_STEP: i32 = 2;

/// Message shown when playback fails.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred while loading the video.";

/// Configuration for one playback panel.
#[derive(Clone)]
pub struct ViewerConfig {
    /// Native media engine used to create the player handle
    pub engine: Arc<dyn MediaEngine>,

    /// Host toast surface for unrecoverable errors
    pub notification_sink: Arc<dyn NotificationSink>,

    /// Library path and raw engine flags, forwarded untouched
    pub engine_options: EngineOptions,

    /// Volume (percent) applied on load
    pub default_volume: i32,

    /// Seek offset used by the backward/forward buttons
    pub seek_step: Duration,

    /// Volume points per mouse-wheel notch
    pub wheel_volume_step: i32,

    /// Title of the playback-failed notification
    pub error_title: String,

    /// Body of the playback-failed notification
    pub error_message: String,

    /// Per-subscriber buffer of the property event bus
    pub event_bus_capacity: usize,
}

impl std::fmt::Debug for ViewerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewerConfig")
            .field("engine", &"MediaEngine { ... }")
            .field("notification_sink", &"NotificationSink { ... }")
            .field("engine_options", &self.engine_options)
            .field("default_volume", &self.default_volume)
            .field("seek_step", &self.seek_step)
            .field("wheel_volume_step", &self.wheel_volume_step)
            .field("error_title", &self.error_title)
            .field("error_message", &self.error_message)
            .field("event_bus_capacity", &self.event_bus_capacity)
            .finish()
    }
}

impl ViewerConfig {
    pub fn builder() -> ViewerConfigBuilder {
        ViewerConfigBuilder::default()
    }

    /// Validate tunables. Bridges are guaranteed present by construction.
    pub fn validate(&self) -> Result<()> {
        if !(0..=100).contains(&self.default_volume) {
            return Err(Error::Config(format!(
                "default_volume must be between 0 and 100, got {}",
                self.default_volume
            )));
        }

        if self.seek_step.is_zero() {
            return Err(Error::Config("seek_step must be greater than zero".to_string()));
        }

        if self.wheel_volume_step <= 0 {
            return Err(Error::Config(format!(
                "wheel_volume_step must be positive, got {}",
                self.wheel_volume_step
            )));
        }

        if self.error_message.trim().is_empty() {
            return Err(Error::Config("error_message cannot be empty".to_string()));
        }

        if self.event_bus_capacity == 0 {
            return Err(Error::Config(
                "event_bus_capacity must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for [`ViewerConfig`].
#[derive(Default)]
pub struct ViewerConfigBuilder {
    engine: Option<Arc<dyn MediaEngine>>,
    notification_sink: Option<Arc<dyn NotificationSink>>,
    engine_options: Option<EngineOptions>,
    default_volume: Option<i32>,
    seek_step: Option<Duration>,
    wheel_volume_step: Option<i32>,
    error_title: Option<String>,
    error_message: Option<String>,
    event_bus_capacity: Option<usize>,
}

impl ViewerConfigBuilder {
    /// Set the media engine (required).
    pub fn engine(mut self, engine: Arc<dyn MediaEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Set the host notification sink (required).
    pub fn notification_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.notification_sink = Some(sink);
        self
    }

    pub fn engine_options(mut self, options: EngineOptions) -> Self {
        self.engine_options = Some(options);
        self
    }

    pub fn default_volume(mut self, volume: i32) -> Self {
        self.default_volume = Some(volume);
        self
    }

    pub fn seek_step(mut self, step: Duration) -> Self {
        self.seek_step = Some(step);
        self
    }

    pub fn wheel_volume_step(mut self, step: i32) -> Self {
        self.wheel_volume_step = Some(step);
        self
    }

    pub fn error_title(mut self, title: impl Into<String>) -> Self {
        self.error_title = Some(title.into());
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn event_bus_capacity(mut self, capacity: usize) -> Self {
        self.event_bus_capacity = Some(capacity);
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::CapabilityMissing`] if the engine or notification sink is absent
    /// - [`Error::Config`] if a tunable is out of range
    pub fn build(self) -> Result<ViewerConfig> {
        let engine = self.engine.ok_or_else(|| Error::CapabilityMissing {
            capability: "MediaEngine".to_string(),
            message: "No media engine provided. The host must wrap its native player \
                      library in a MediaEngine implementation."
                .to_string(),
        })?;

        let notification_sink = self
            .notification_sink
            .ok_or_else(|| Error::CapabilityMissing {
                capability: "NotificationSink".to_string(),
                message: "No notification sink provided. Playback errors could not be \
                          reported to the user."
                    .to_string(),
            })?;

        let config = ViewerConfig {
            engine,
            notification_sink,
            engine_options: self.engine_options.unwrap_or_default(),
            default_volume: self.default_volume.unwrap_or(DEFAULT_VOLUME),
            seek_step: self.seek_step.unwrap_or(DEFAULT_SEEK_STEP),
            wheel_volume_step: self.wheel_volume_step.unwrap_or(DEFAULT_WHEEL_VOLUME_STEP),
            error_title: self.error_title.unwrap_or_default(),
            error_message: self
                .error_message
                .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
            event_bus_capacity: self
                .event_bus_capacity
                .unwrap_or(DEFAULT_EVENT_BUFFER_SIZE),
        };

        config.validate()?;
        Ok(config)
    }
}
