//! Observable property store.
//!
//! Every write goes through [`ViewerProperties`], which suppresses writes that
//! do not change the value and publishes one `PropertyChanged` event for each
//! write that does.

use core_runtime::events::{CoreEvent, EventBus, PropertyValue, ViewerEvent, ViewerProperty};
use tracing::trace;

/// Point-in-time copy of all observable properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySnapshot {
    pub is_muted: bool,
    pub has_ended: bool,
    pub has_audio: bool,
    pub has_video: bool,
    pub is_playing: bool,
    /// Sticky: never returns to `None` once set.
    pub cover_art_uri: Option<String>,
}

impl PropertySnapshot {
    /// Current value of `property`.
    pub fn get(&self, property: ViewerProperty) -> PropertyValue {
        match property {
            ViewerProperty::IsMuted => PropertyValue::Bool(self.is_muted),
            ViewerProperty::HasEnded => PropertyValue::Bool(self.has_ended),
            ViewerProperty::HasAudio => PropertyValue::Bool(self.has_audio),
            ViewerProperty::HasVideo => PropertyValue::Bool(self.has_video),
            ViewerProperty::IsPlaying => PropertyValue::Bool(self.is_playing),
            ViewerProperty::CoverArt => PropertyValue::Text(self.cover_art_uri.clone()),
        }
    }

    fn flag_mut(&mut self, property: ViewerProperty) -> Option<&mut bool> {
        match property {
            ViewerProperty::IsMuted => Some(&mut self.is_muted),
            ViewerProperty::HasEnded => Some(&mut self.has_ended),
            ViewerProperty::HasAudio => Some(&mut self.has_audio),
            ViewerProperty::HasVideo => Some(&mut self.has_video),
            ViewerProperty::IsPlaying => Some(&mut self.is_playing),
            ViewerProperty::CoverArt => None,
        }
    }
}

pub(crate) struct ViewerProperties {
    state: PropertySnapshot,
    bus: EventBus,
}

impl ViewerProperties {
    pub(crate) fn new(bus: EventBus) -> Self {
        Self {
            state: PropertySnapshot::default(),
            bus,
        }
    }

    pub(crate) fn snapshot(&self) -> &PropertySnapshot {
        &self.state
    }

    pub(crate) fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Write a boolean property. Returns `true` if the value changed.
    ///
    /// `CoverArt` is not a flag and is rejected.
    pub(crate) fn set_flag(&mut self, property: ViewerProperty, value: bool) -> bool {
        let Some(slot) = self.state.flag_mut(property) else {
            return false;
        };

        if *slot == value {
            return false;
        }

        *slot = value;
        self.publish(property, PropertyValue::Bool(value));
        true
    }

    /// Offer a cover-art URI reported by the engine.
    ///
    /// Missing or empty URIs never clear a stored one.
    pub(crate) fn offer_cover_art(&mut self, uri: Option<String>) -> bool {
        let Some(uri) = uri.filter(|uri| !uri.is_empty()) else {
            return false;
        };

        if self.state.cover_art_uri.as_deref() == Some(uri.as_str()) {
            return false;
        }

        self.state.cover_art_uri = Some(uri.clone());
        self.publish(ViewerProperty::CoverArt, PropertyValue::Text(Some(uri)));
        true
    }

    fn publish(&self, property: ViewerProperty, value: PropertyValue) {
        trace!(property = %property, value = ?value, "Property changed");
        // No subscribers is fine: the panel may not be bound yet.
        self.bus
            .emit(CoreEvent::Viewer(ViewerEvent::PropertyChanged { property, value }))
            .ok();
    }
}
