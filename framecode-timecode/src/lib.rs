//! SMPTE Timecode Strings for Framecode
//!
//! This crate converts between frame indices and broadcast timecode text:
//!
//! - **Frame rates**: exact rational rates such as `30000/1001`, rounded to an
//!   integer fps for display
//! - **Drop-Frame Timecode**: NTSC frame label correction for 29.97/59.94 fps
//! - **Rendering**: `HH:MM:SS:FF` (or `HH:MM:SS;FF`) relative to a start frame
//! - **Parsing**: recover the start frame from a timecode string
//!
//! # Quick Start
//!
//! ```rust
//! use framecode_timecode::{Flags, Timecode};
//! use framecode_core::Rational;
//!
//! let tc = Timecode::new(0, Flags::new(false, true, false), Rational::new(25, 1)).unwrap();
//! assert_eq!(tc.render(120), "00:00:04:20");
//!
//! let parsed = Timecode::parse(Rational::new(25, 1), "00:12:24:23").unwrap();
//! assert_eq!(parsed.start(), 18623);
//! ```
//!
//! # Drop-Frame Timecode
//!
//! ```rust
//! use framecode_timecode::{make_timecode, render, Flags};
//! use framecode_core::FPS_29_97;
//!
//! let tc = make_timecode(0, Flags::new(true, true, false), FPS_29_97).unwrap();
//! assert_eq!(render(&tc, 120), "00:00:04;00");
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod dropframe;
pub mod error;
pub mod smpte;

// Re-export main types
pub use error::{Result, TimecodeError};
pub use smpte::{
    fps_from_frame_rate, is_standard_fps, parse, validate, Flags, Timecode, TimecodeParams,
    TimecodeParts, Validation, SUPPORTED_FPS,
};

// Re-export drop-frame utilities
pub use dropframe::{adjust_ntsc_framenum, frames_dropped_until, is_dropped_frame, DropFrameConfig};

pub use framecode_core::Rational;

/// Create a timecode from a start frame, flags and rate.
///
/// # Arguments
/// * `start` - Frame number that frame 0 is labelled with
/// * `flags` - Drop-frame, 24 hour wrap and negative rendering switches
/// * `rate` - The frame rate in rational form
pub fn make_timecode(start: i64, flags: Flags, rate: Rational) -> Result<Timecode> {
    Timecode::new(start, flags, rate)
}

/// Render the label of a frame relative to the start of `tc`.
#[must_use]
pub fn render(tc: &Timecode, framenum: i64) -> String {
    tc.render(framenum)
}
