//! Marker traits that keep bridge bounds aligned with the threading model of
//! each target.
//!
//! On native targets a player handle is moved onto a blocking worker when it
//! is released, and engines/sinks are shared behind `Arc`, so `Send` (and
//! `Sync` for shared collaborators) is required. `wasm32` hosts run on a single
//! thread and wrap browser objects that cannot satisfy those bounds, so the
//! markers collapse to no-ops there.

/// `Send + Sync` on native targets, no-op on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait PlatformSendSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<T> PlatformSendSync for T where T: Send + Sync {}

#[cfg(target_arch = "wasm32")]
pub trait PlatformSendSync {}

#[cfg(target_arch = "wasm32")]
impl<T> PlatformSendSync for T {}

/// `Send` on native targets, no-op on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait PlatformSend: Send {}

#[cfg(not(target_arch = "wasm32"))]
impl<T> PlatformSend for T where T: Send {}

#[cfg(target_arch = "wasm32")]
pub trait PlatformSend {}

#[cfg(target_arch = "wasm32")]
impl<T> PlatformSend for T {}
