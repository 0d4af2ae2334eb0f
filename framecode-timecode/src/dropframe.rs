//! Drop-frame timecode support for 29.97 and 59.94 fps.
//!
//! Drop-frame timecode compensates for the difference between 30fps and 29.97fps
//! (or 60fps and 59.94fps) by "dropping" frame numbers at specific intervals.
//!
//! The rules are:
//! - Skip frames 0 and 1 (or 0-3 for 59.94) at the start of each minute
//! - Except for minutes 0, 10, 20, 30, 40, 50
//!
//! Frame numbers are corrected with integer arithmetic only; the corrected
//! number can then be split into fields as if the rate were a whole 30 or 60.

use serde::{Deserialize, Serialize};

/// Drop-frame configuration for a nominal frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropFrameConfig {
    /// Number of frame labels dropped per minute (except every 10th minute)
    pub frames_dropped_per_minute: i64,
    /// Nominal frame rate
    pub nominal_fps: i64,
    /// Frames per 10 minutes (accounting for drops)
    pub frames_per_10_minutes: i64,
}

impl DropFrameConfig {
    /// Get the drop-frame configuration for 29.97 fps.
    #[must_use]
    pub const fn for_29_97() -> Self {
        Self {
            frames_dropped_per_minute: 2,
            nominal_fps: 30,
            // 30 * 60 * 10 - 9 * 2 = 18000 - 18 = 17982
            frames_per_10_minutes: 17982,
        }
    }

    /// Get the drop-frame configuration for 59.94 fps.
    #[must_use]
    pub const fn for_59_94() -> Self {
        Self {
            frames_dropped_per_minute: 4,
            nominal_fps: 60,
            // 60 * 60 * 10 - 9 * 4 = 36000 - 36 = 35964
            frames_per_10_minutes: 35964,
        }
    }

    /// Get the configuration for an integer fps, if it supports drop-frame.
    #[must_use]
    pub fn for_fps(fps: i64) -> Option<Self> {
        match fps {
            30 => Some(Self::for_29_97()),
            60 => Some(Self::for_59_94()),
            _ => None,
        }
    }

    /// Average frames per minute over a ten-minute block.
    #[must_use]
    pub const fn frames_per_minute(&self) -> i64 {
        self.frames_per_10_minutes / 10
    }
}

/// Adjust a frame number for NTSC drop-frame timecode.
///
/// The result is the frame number to split into HH:MM:SS;FF fields at the
/// nominal rate. Any fps other than 30 or 60 returns `framenum` unchanged.
///
/// ```rust
/// use framecode_timecode::dropframe::adjust_ntsc_framenum;
///
/// // The first frame of minute 1 is labelled 00:01:00;02.
/// assert_eq!(adjust_ntsc_framenum(1800, 30), 1802);
/// assert_eq!(adjust_ntsc_framenum(1800, 25), 1800);
/// ```
#[must_use]
pub fn adjust_ntsc_framenum(framenum: i64, fps: i64) -> i64 {
    let adjusted = adjust_wide(framenum as i128, fps);
    i64::try_from(adjusted).unwrap_or(if adjusted < 0 { i64::MIN } else { i64::MAX })
}

/// Widened form of [`adjust_ntsc_framenum`]. Division truncates toward zero.
pub(crate) fn adjust_wide(framenum: i128, fps: i64) -> i128 {
    let Some(config) = DropFrameConfig::for_fps(fps) else {
        return framenum;
    };

    let drop = config.frames_dropped_per_minute as i128;
    let per_10_minutes = config.frames_per_10_minutes as i128;
    let per_minute = config.frames_per_minute() as i128;

    let d = framenum / per_10_minutes;
    let m = framenum % per_10_minutes;

    framenum + 9 * drop * d + drop * ((m - drop) / per_minute)
}

/// Check if a timecode label is one that drop-frame counting skips.
#[must_use]
pub fn is_dropped_frame(minutes: u8, seconds: u8, frames: u64, fps: i64) -> bool {
    let Some(config) = DropFrameConfig::for_fps(fps) else {
        return false;
    };

    seconds == 0 && minutes % 10 != 0 && frames < config.frames_dropped_per_minute as u64
}

/// Number of frame labels dropped before the start of a given minute.
///
/// `total_minutes` counts from 00:00; rates without drop-frame drop nothing.
#[must_use]
pub fn frames_dropped_until(total_minutes: i64, fps: i64) -> i64 {
    match DropFrameConfig::for_fps(fps) {
        Some(config) => {
            config.frames_dropped_per_minute * (total_minutes - total_minutes / 10)
        }
        None => 0,
    }
}
