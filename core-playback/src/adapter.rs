//! # Playback Adapter
//!
//! Bridges transport commands from the panel UI and notifications from the
//! media engine into one consistent set of observable properties.
//!
//! ## Threading
//!
//! All commands and event handling run on the host's UI thread; the adapter
//! takes `&mut self` and holds no locks. The engine may emit events from any
//! thread: they queue on an unbounded channel and are applied strictly in
//! receipt order by [`PlaybackAdapter::process_pending_events`] or
//! [`PlaybackAdapter::next_event`]. Only the final release of the player
//! handle leaves the UI thread (see [`Disposal`]).
//!
//! ## State notifications
//!
//! | Engine state | Reaction |
//! |---|---|
//! | `Opening` | refresh `has_video` / `has_audio` |
//! | `Playing` | refresh tracks, capture cover art, `is_playing = true` |
//! | `Paused` | `is_playing = false` |
//! | `Ended` | `is_playing = false`, `has_ended = true` |
//! | `Error` | playback-failed flow |
//!
//! Property notifications only mirror the engine's mute flag.
//!
//! ## Failure
//!
//! Any engine error is terminal: the host is notified once with a fixed
//! message, playback is halted and the adapter disposes itself. Commands after
//! disposal are ignored.

use crate::disposal::Disposal;
use crate::error::{PlaybackError, Result};
use crate::gestures::{wheel_volume_delta, ViewerGesture};
use crate::properties::{PropertySnapshot, ViewerProperties};
use bridge_traits::{
    error::Result as BridgeResult, MediaPlayer, MediaState, MetaKey, NotificationSink,
    PlayerEvent, PlayerEventReceiver, PlayerEventSender, PlayerProperty, SubscriptionId,
};
use core_runtime::config::ViewerConfig;
use core_runtime::events::{CoreEvent, EventBus, PropertyValue, Receiver, ViewerEvent, ViewerProperty};
use core_runtime::logging::strip_path;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, trace, warn};

/// Coarse lifecycle of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Constructed, nothing loaded yet.
    Idle,
    /// Media handed to the engine, or stopped.
    Loaded,
    Playing,
    Paused,
    Ended,
    /// Terminal.
    Disposed,
}

/// Playback panel adapter over one engine player handle.
pub struct PlaybackAdapter {
    player: Option<Box<dyn MediaPlayer>>,
    subscription: Option<SubscriptionId>,
    events: PlayerEventReceiver,
    properties: ViewerProperties,
    notification_sink: Arc<dyn NotificationSink>,
    phase: LifecyclePhase,
    resume_after_scrub: bool,
    default_volume: i32,
    seek_step: Duration,
    wheel_volume_step: i32,
    error_title: String,
    error_message: String,
}

impl PlaybackAdapter {
    /// Create the player handle and register for its notifications.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the engine cannot create or
    /// subscribe to a player. A player that was created but could not be
    /// subscribed to is released before returning.
    pub fn new(config: ViewerConfig) -> Result<Self> {
        config.validate()?;

        let player = config.engine.create_player(&config.engine_options)?;
        let (sender, events) = PlayerEventSender::channel();

        let subscription = match player.subscribe(sender) {
            Ok(id) => id,
            Err(err) => {
                warn!(error = %err, "Engine refused event subscription");
                // Nothing to await: the adapter never existed.
                drop(Disposal::start(player, None));
                return Err(err.into());
            }
        };

        debug!(
            library = %config.engine_options.library_path.display(),
            options = config.engine_options.options.len(),
            "Player created"
        );

        Ok(Self {
            player: Some(player),
            subscription: Some(subscription),
            events,
            properties: ViewerProperties::new(EventBus::new(config.event_bus_capacity)),
            notification_sink: config.notification_sink,
            phase: LifecyclePhase::Idle,
            resume_after_scrub: false,
            default_volume: config.default_volume,
            seek_step: config.seek_step,
            wheel_volume_step: config.wheel_volume_step,
            error_title: config.error_title,
            error_message: config.error_message,
        })
    }

    // ------------------------------------------------------------------
    // Observable state
    // ------------------------------------------------------------------

    pub fn is_muted(&self) -> bool {
        self.properties.snapshot().is_muted
    }

    pub fn has_ended(&self) -> bool {
        self.properties.snapshot().has_ended
    }

    pub fn has_audio(&self) -> bool {
        self.properties.snapshot().has_audio
    }

    pub fn has_video(&self) -> bool {
        self.properties.snapshot().has_video
    }

    pub fn is_playing(&self) -> bool {
        self.properties.snapshot().is_playing
    }

    pub fn cover_art_uri(&self) -> Option<&str> {
        self.properties.snapshot().cover_art_uri.as_deref()
    }

    /// Current value of a property, for hosts that bind by name.
    pub fn property(&self, property: ViewerProperty) -> PropertyValue {
        self.properties.snapshot().get(property)
    }

    pub fn snapshot(&self) -> PropertySnapshot {
        self.properties.snapshot().clone()
    }

    pub fn lifecycle(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn is_disposed(&self) -> bool {
        self.player.is_none()
    }

    /// Bus carrying `ViewerEvent`s for this panel.
    pub fn event_bus(&self) -> &EventBus {
        self.properties.bus()
    }

    /// Subscribe to this panel's events.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.properties.bus().subscribe()
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Open `path`, apply the default volume and start playback.
    ///
    /// Failures are reported through the playback-failed flow.
    #[instrument(skip_all)]
    pub fn load(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let Ok(player) = live(&self.player) else {
            debug!("Ignoring load on disposed viewer");
            return;
        };

        info!(file = %strip_path(&path.to_string_lossy()), "Loading media");

        if let Err(err) = player.open(path) {
            warn!(error = %err, "Engine could not open media");
            self.fail();
            return;
        }

        check("set_volume", player.set_volume(self.default_volume));
        check("play", player.play());
        self.phase = LifecyclePhase::Loaded;
    }

    /// Pause if playing, otherwise play, restarting from the beginning if the
    /// stream had ended.
    pub fn toggle_play_pause(&mut self) {
        let Ok(player) = live(&self.player) else {
            debug!("Ignoring play/pause on disposed viewer");
            return;
        };

        if player.is_playing() {
            debug!("Pausing");
            check("pause", player.pause());
            return;
        }

        if self.properties.snapshot().has_ended {
            debug!("Stream ended; rewinding before resuming");
            self.stop();
        }

        if let Ok(player) = live(&self.player) {
            debug!("Resuming");
            check("play", player.play());
        }
    }

    /// Halt playback and rewind to the start.
    pub fn stop(&mut self) {
        let Ok(player) = live(&self.player) else {
            debug!("Ignoring stop on disposed viewer");
            return;
        };

        self.properties.set_flag(ViewerProperty::HasEnded, false);
        self.properties.set_flag(ViewerProperty::IsPlaying, false);
        check("set_position", player.set_position(0.0));
        check("stop", player.stop());
        self.phase = LifecyclePhase::Loaded;
    }

    /// Move playback by `delta` without changing whether it is playing.
    ///
    /// The engine clamps the target time to the stream bounds.
    pub fn seek(&mut self, delta: chrono::Duration) {
        let Ok(player) = live(&self.player) else {
            debug!("Ignoring seek on disposed viewer");
            return;
        };

        let was_playing = player.is_playing();
        check("pause", player.pause());

        let target = player.time_ms().saturating_add(delta.num_milliseconds());
        debug!(delta_ms = delta.num_milliseconds(), target_ms = target, "Seeking");
        check("set_time", player.set_time_ms(target));

        if was_playing {
            check("play", player.play());
        }
    }

    /// Jump to a normalised position, e.g. from the progress slider.
    pub fn seek_to_position(&mut self, position: f32) {
        let Ok(player) = live(&self.player) else {
            debug!("Ignoring position change on disposed viewer");
            return;
        };

        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0)
        };
        check("set_position", player.set_position(position));
    }

    /// Unmute, then move the volume by `delta`, clamped to `0..=100`.
    pub fn change_volume(&mut self, delta: i32) {
        if self.is_disposed() {
            debug!("Ignoring volume change on disposed viewer");
            return;
        }

        self.set_muted(false);

        if let Ok(player) = live(&self.player) {
            let volume = player.volume().saturating_add(delta).clamp(0, 100);
            trace!(delta, volume, "Changing volume");
            check("set_volume", player.set_volume(volume));
        }
    }

    /// Set the mute flag. Writes of the current value are ignored.
    pub fn set_muted(&mut self, muted: bool) {
        let Ok(player) = live(&self.player) else {
            debug!("Ignoring mute change on disposed viewer");
            return;
        };

        if self.properties.set_flag(ViewerProperty::IsMuted, muted) {
            check("set_muted", player.set_muted(muted));
        }
    }

    pub fn toggle_mute(&mut self) {
        let muted = self.is_muted();
        self.set_muted(!muted);
    }

    /// Pause while the user drags the progress slider.
    pub fn begin_scrub(&mut self) {
        let Ok(player) = live(&self.player) else {
            return;
        };

        self.resume_after_scrub = player.is_playing();
        check("pause", player.pause());
    }

    /// Resume after a slider drag if playback was running when it started.
    pub fn end_scrub(&mut self) {
        let Ok(player) = live(&self.player) else {
            return;
        };

        if std::mem::take(&mut self.resume_after_scrub) {
            check("play", player.play());
        }
    }

    /// Map a raw UI gesture to its command.
    pub fn handle_gesture(&mut self, gesture: ViewerGesture) {
        trace!(?gesture, "Gesture");
        match gesture {
            ViewerGesture::PlayPauseClicked => self.toggle_play_pause(),
            ViewerGesture::MuteClicked => self.toggle_mute(),
            ViewerGesture::StopClicked => self.stop(),
            ViewerGesture::SeekBackwardClicked => self.seek(-self.seek_delta()),
            ViewerGesture::SeekForwardClicked => self.seek(self.seek_delta()),
            ViewerGesture::ProgressDragStarted => self.begin_scrub(),
            ViewerGesture::ProgressMoved { position } => self.seek_to_position(position),
            ViewerGesture::ProgressDragFinished => self.end_scrub(),
            ViewerGesture::MouseWheel { delta } => {
                self.change_volume(wheel_volume_delta(delta, self.wheel_volume_step))
            }
        }
    }

    fn seek_delta(&self) -> chrono::Duration {
        let millis = i64::try_from(self.seek_step.as_millis()).unwrap_or(i64::MAX);
        chrono::Duration::milliseconds(millis)
    }

    // ------------------------------------------------------------------
    // Engine notifications
    // ------------------------------------------------------------------

    /// Apply every queued engine event. Returns how many were handled.
    pub fn process_pending_events(&mut self) -> usize {
        let mut handled = 0;
        while !self.is_disposed() {
            let Ok(event) = self.events.try_recv() else {
                break;
            };
            self.handle_player_event(event);
            handled += 1;
        }
        handled
    }

    /// Wait for the next engine event and apply it.
    ///
    /// Returns `false` once the adapter is disposed or the engine dropped
    /// every sender.
    pub async fn next_event(&mut self) -> bool {
        if self.is_disposed() {
            return false;
        }

        match self.events.recv().await {
            Some(event) => {
                self.handle_player_event(event);
                true
            }
            None => false,
        }
    }

    /// Apply one engine event. Events after disposal are dropped.
    pub fn handle_player_event(&mut self, event: PlayerEvent) {
        if self.is_disposed() {
            trace!(?event, "Dropping engine event after disposal");
            return;
        }

        match event {
            PlayerEvent::PropertyChanged(PlayerProperty::Muted) => self.mirror_mute(),
            PlayerEvent::PropertyChanged(other) => {
                trace!(property = ?other, "Ignoring engine property change")
            }
            PlayerEvent::StateChanged(state) => self.on_state_changed(state),
            PlayerEvent::EncounteredError => {
                error!("Engine reported an error");
                self.fail();
            }
        }
    }

    fn mirror_mute(&mut self) {
        let Ok(player) = live(&self.player) else {
            return;
        };
        self.properties
            .set_flag(ViewerProperty::IsMuted, player.is_muted());
    }

    fn on_state_changed(&mut self, state: MediaState) {
        debug!(?state, "Engine state changed");
        match state {
            MediaState::Opening => self.refresh_tracks(),
            MediaState::Playing => {
                self.refresh_tracks();
                if let Ok(player) = live(&self.player) {
                    self.properties
                        .offer_cover_art(player.metadata(MetaKey::ArtworkUrl));
                }
                self.properties.set_flag(ViewerProperty::IsPlaying, true);
                self.phase = LifecyclePhase::Playing;
            }
            MediaState::Paused => {
                self.properties.set_flag(ViewerProperty::IsPlaying, false);
                self.phase = LifecyclePhase::Paused;
            }
            MediaState::Ended => {
                self.properties.set_flag(ViewerProperty::IsPlaying, false);
                self.properties.set_flag(ViewerProperty::HasEnded, true);
                self.phase = LifecyclePhase::Ended;
            }
            MediaState::Error => {
                error!("Engine entered error state");
                self.fail();
            }
            MediaState::NothingSpecial | MediaState::Buffering | MediaState::Stopped => {
                trace!(?state, "No reaction to engine state")
            }
        }
    }

    fn refresh_tracks(&mut self) {
        let Ok(player) = live(&self.player) else {
            return;
        };
        let has_video = player.video_track_count() > 0;
        let has_audio = player.audio_track_count() > 0;
        self.properties.set_flag(ViewerProperty::HasVideo, has_video);
        self.properties.set_flag(ViewerProperty::HasAudio, has_audio);
    }

    /// Unrecoverable playback error: notify the host once, halt, dispose.
    fn fail(&mut self) {
        let Ok(player) = live(&self.player) else {
            return;
        };

        error!("Playback failed; disposing viewer");
        self.notification_sink
            .show_notification(&self.error_title, &self.error_message);
        self.properties
            .bus()
            .emit(CoreEvent::Viewer(ViewerEvent::PlaybackFailed {
                message: self.error_message.clone(),
            }))
            .ok();

        check("stop", player.stop());
        self.properties.set_flag(ViewerProperty::IsPlaying, false);
        drop(self.dispose());
    }

    // ------------------------------------------------------------------
    // Disposal
    // ------------------------------------------------------------------

    /// Release the player handle off the UI thread.
    ///
    /// Safe to call repeatedly; only the first call does anything. The
    /// returned [`Disposal`] may be ignored.
    pub fn dispose(&mut self) -> Disposal {
        let Some(player) = self.player.take() else {
            return Disposal::completed();
        };

        info!("Disposing viewer");
        self.events.close();
        self.phase = LifecyclePhase::Disposed;
        self.properties
            .bus()
            .emit(CoreEvent::Viewer(ViewerEvent::Disposed))
            .ok();

        Disposal::start(player, self.subscription.take())
    }
}

impl Drop for PlaybackAdapter {
    fn drop(&mut self) {
        if !self.is_disposed() {
            drop(self.dispose());
        }
    }
}

impl std::fmt::Debug for PlaybackAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackAdapter")
            .field("phase", &self.phase)
            .field("properties", self.properties.snapshot())
            .finish_non_exhaustive()
    }
}

fn live(player: &Option<Box<dyn MediaPlayer>>) -> Result<&dyn MediaPlayer> {
    player.as_deref().ok_or(PlaybackError::Disposed)
}

fn check(op: &'static str, result: BridgeResult<()>) {
    if let Err(err) = result {
        warn!(op, error = %err, "Engine command failed");
    }
}
