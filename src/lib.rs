//! Workspace facade crate.
//!
//! Re-exports the workspace crates behind the `viewer` feature so a preview
//! host can depend on `preview-player-workspace` alone instead of wiring
//! `bridge-traits`, `core-runtime` and `core-playback` individually.

#[cfg(feature = "viewer")]
pub use bridge_traits;
#[cfg(feature = "viewer")]
pub use core_playback;
#[cfg(feature = "viewer")]
pub use core_runtime;

#[cfg(feature = "viewer")]
pub use core_playback::{PlaybackAdapter, ViewerGesture};
#[cfg(feature = "viewer")]
pub use core_runtime::config::ViewerConfig;
