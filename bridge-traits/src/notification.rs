//! User-facing notification bridge.

use crate::platform::PlatformSendSync;

/// Host toast/notification surface.
///
/// The core calls this only for unrecoverable playback failures, from the UI
/// thread. Implementations should return quickly; any rendering belongs to the
/// host.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::notification::NotificationSink;
///
/// struct Toasts;
///
/// impl NotificationSink for Toasts {
///     fn show_notification(&self, title: &str, message: &str) {
///         host_ui::toast(title, message);
///     }
/// }
/// ```
pub trait NotificationSink: PlatformSendSync {
    fn show_notification(&self, title: &str, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use std::sync::Arc;

    mock! {
        pub NotificationSink {}

        impl NotificationSink for NotificationSink {
            fn show_notification(&self, title: &str, message: &str);
        }
    }

    #[test]
    fn test_sink_is_object_safe() {
        let mut mock = MockNotificationSink::new();
        mock.expect_show_notification()
            .withf(|title, message| title.is_empty() && message == "boom")
            .times(1)
            .return_const(());

        let sink: Arc<dyn NotificationSink> = Arc::new(mock);
        sink.show_notification("", "boom");
    }
}
