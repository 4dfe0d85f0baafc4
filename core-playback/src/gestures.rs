//! Raw UI gestures understood by the playback panel.

/// Wheel delta reported for one notch by most pointer devices.
pub const WHEEL_DELTA_PER_NOTCH: i32 = 120;

/// Input coming from the panel's controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerGesture {
    PlayPauseClicked,
    MuteClicked,
    StopClicked,
    SeekBackwardClicked,
    SeekForwardClicked,
    /// Pointer pressed on the progress slider.
    ProgressDragStarted,
    /// Slider moved to a normalised position in `0.0..=1.0`.
    ProgressMoved { position: f32 },
    /// Pointer released from the progress slider.
    ProgressDragFinished,
    /// Mouse wheel over the panel, in raw wheel units.
    MouseWheel { delta: i32 },
}

/// Convert a raw wheel delta into a volume change.
///
/// One notch moves the volume by `step` points; partial notches are truncated
/// toward zero.
///
/// ```
/// use core_playback::wheel_volume_delta;
///
/// assert_eq!(wheel_volume_delta(120, 2), 2);
/// assert_eq!(wheel_volume_delta(-240, 2), -4);
/// assert_eq!(wheel_volume_delta(30, 2), 0);
/// ```
pub fn wheel_volume_delta(delta: i32, step: i32) -> i32 {
    (f64::from(delta) / f64::from(WHEEL_DELTA_PER_NOTCH) * f64::from(step)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_delta_truncates_toward_zero() {
        assert_eq!(wheel_volume_delta(60, 2), 1);
        assert_eq!(wheel_volume_delta(-60, 2), -1);
        assert_eq!(wheel_volume_delta(-59, 2), 0);
        assert_eq!(wheel_volume_delta(0, 2), 0);
    }

    #[test]
    fn test_wheel_delta_scales_with_step() {
        assert_eq!(wheel_volume_delta(120, 5), 5);
        assert_eq!(wheel_volume_delta(360, 5), 15);
    }

    #[test]
    fn test_wheel_delta_saturates() {
        assert_eq!(wheel_volume_delta(i32::MAX, i32::MAX), i32::MAX);
        assert_eq!(wheel_volume_delta(i32::MIN, i32::MAX), i32::MIN);
    }
}
