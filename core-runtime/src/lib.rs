//! # Core Runtime Module
//!
//! Ambient infrastructure shared by the preview player crates:
//! - Viewer configuration and bridge injection
//! - Property-change event bus
//! - Logging and tracing setup
//!
//! ## Overview
//!
//! `core-playback` depends on this crate for everything that is not playback
//! logic. Hosts build a [`ViewerConfig`](config::ViewerConfig), optionally call
//! [`init_logging`](logging::init_logging) once at startup, and subscribe to
//! the [`EventBus`](events::EventBus) to render property changes.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{ViewerConfig, ViewerConfigBuilder};
pub use error::{Error, Result};
pub use events::{CoreEvent, EventBus, PropertyValue, ViewerEvent, ViewerProperty};
