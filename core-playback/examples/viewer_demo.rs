//! # Viewer Panel Demo
//!
//! Drives a `PlaybackAdapter` against a scripted in-process engine and prints
//! the property changes a UI would render.
//!
//! Run with: `cargo run --example viewer_demo --package core-playback`

use bridge_traits::error::Result as BridgeResult;
use bridge_traits::{
    EngineOptions, LogLevel, MediaEngine, MediaPlayer, MediaState, MetaKey, NotificationSink,
    PlayerEvent, PlayerEventSender, PlayerProperty, SubscriptionId,
};
use core_playback::{PlaybackAdapter, ViewerGesture};
use core_runtime::config::ViewerConfig;
use core_runtime::events::{CoreEvent, ViewerEvent};
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Scripted engine
// ============================================================================

/// Engine that answers every command immediately and echoes the resulting
/// state back through the event channel, like a native callback would.
#[derive(Default)]
struct ScriptedPlayer {
    sender: Mutex<Option<PlayerEventSender>>,
    playing: AtomicBool,
    muted: AtomicBool,
    volume: AtomicI32,
    time_ms: AtomicI64,
}

impl ScriptedPlayer {
    fn notify(&self, event: PlayerEvent) {
        if let Ok(guard) = self.sender.lock() {
            if let Some(sender) = guard.as_ref() {
                sender.send(event);
            }
        }
    }

    fn transition(&self, playing: bool, state: MediaState) -> BridgeResult<()> {
        self.playing.store(playing, Ordering::SeqCst);
        self.notify(PlayerEvent::StateChanged(state));
        Ok(())
    }
}

impl MediaPlayer for ScriptedPlayer {
    fn open(&self, path: &Path) -> BridgeResult<()> {
        println!("  [engine] open {}", path.display());
        self.notify(PlayerEvent::StateChanged(MediaState::Opening));
        Ok(())
    }

    fn play(&self) -> BridgeResult<()> {
        self.transition(true, MediaState::Playing)
    }

    fn pause(&self) -> BridgeResult<()> {
        self.transition(false, MediaState::Paused)
    }

    fn stop(&self) -> BridgeResult<()> {
        self.transition(false, MediaState::Stopped)
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    fn time_ms(&self) -> i64 {
        self.time_ms.load(Ordering::SeqCst)
    }

    fn set_time_ms(&self, time_ms: i64) -> BridgeResult<()> {
        self.time_ms.store(time_ms.clamp(0, 180_000), Ordering::SeqCst);
        Ok(())
    }

    fn set_position(&self, position: f32) -> BridgeResult<()> {
        self.time_ms
            .store((position * 180_000.0) as i64, Ordering::SeqCst);
        Ok(())
    }

    fn volume(&self) -> i32 {
        self.volume.load(Ordering::SeqCst)
    }

    fn set_volume(&self, volume: i32) -> BridgeResult<()> {
        println!("  [engine] volume {volume}");
        self.volume.store(volume, Ordering::SeqCst);
        Ok(())
    }

    fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    fn set_muted(&self, muted: bool) -> BridgeResult<()> {
        self.muted.store(muted, Ordering::SeqCst);
        self.notify(PlayerEvent::PropertyChanged(PlayerProperty::Muted));
        Ok(())
    }

    fn video_track_count(&self) -> u32 {
        0
    }

    fn audio_track_count(&self) -> u32 {
        1
    }

    fn metadata(&self, key: MetaKey) -> Option<String> {
        matches!(key, MetaKey::ArtworkUrl).then(|| "file:///tmp/cover.jpg".to_string())
    }

    fn subscribe(&self, sender: PlayerEventSender) -> BridgeResult<SubscriptionId> {
        if let Ok(mut guard) = self.sender.lock() {
            *guard = Some(sender);
        }
        Ok(SubscriptionId::new())
    }

    fn unsubscribe(&self, _id: SubscriptionId) {
        if let Ok(mut guard) = self.sender.lock() {
            guard.take();
        }
    }

    fn release(&self) -> BridgeResult<()> {
        println!("  [engine] released");
        Ok(())
    }
}

struct ScriptedEngine;

impl MediaEngine for ScriptedEngine {
    fn create_player(&self, options: &EngineOptions) -> BridgeResult<Box<dyn MediaPlayer>> {
        println!("  [engine] create player with {:?}", options.options);
        Ok(Box::new(ScriptedPlayer::default()))
    }
}

struct ConsoleToasts;

impl NotificationSink for ConsoleToasts {
    fn show_notification(&self, title: &str, message: &str) {
        println!("  [toast] {title:?}: {message}");
    }
}

// ============================================================================
// Demo
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(
        LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_level(LogLevel::Debug),
    )?;

    let config = ViewerConfig::builder()
        .engine(Arc::new(ScriptedEngine))
        .notification_sink(Arc::new(ConsoleToasts))
        .engine_options(EngineOptions::new("/usr/lib/engine").with_option("--no-osd"))
        .build()?;

    let mut adapter = PlaybackAdapter::new(config)?;
    let mut changes = adapter.subscribe();

    println!("Load");
    adapter.load("/home/ana/Music/track01.flac");
    adapter.process_pending_events();

    println!("Wheel up two notches, then mute");
    adapter.handle_gesture(ViewerGesture::MouseWheel { delta: 240 });
    adapter.handle_gesture(ViewerGesture::MuteClicked);
    adapter.process_pending_events();

    println!("Seek forward while playing");
    adapter.handle_gesture(ViewerGesture::SeekForwardClicked);
    adapter.process_pending_events();

    println!("Pause, then the engine reports end of stream");
    adapter.handle_gesture(ViewerGesture::PlayPauseClicked);
    adapter.process_pending_events();
    adapter.handle_player_event(PlayerEvent::StateChanged(MediaState::Ended));

    println!("Play again from the start");
    adapter.handle_gesture(ViewerGesture::PlayPauseClicked);
    adapter.process_pending_events();

    println!("Engine reports an error");
    adapter.handle_player_event(PlayerEvent::EncounteredError);

    while let Ok(CoreEvent::Viewer(event)) = changes.try_recv() {
        match event {
            ViewerEvent::PropertyChanged { property, value } => {
                println!("  {property} = {value:?}")
            }
            other => println!("  {other:?}"),
        }
    }

    println!("Final state: {:?}", adapter.snapshot());
    Ok(())
}
