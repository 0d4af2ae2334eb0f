//! SMPTE 12M timecode strings for frame-indexed media.
//!
//! This module provides conversion between frame numbers and `HH:MM:SS:FF`
//! text (`HH:MM:SS;FF` for drop-frame):
//! - Integer fps derived from an exact rational rate
//! - Validation of the rate against the requested flags
//! - Rendering relative to a base frame offset
//! - Parsing that recovers the base frame offset

use crate::dropframe::{self, DropFrameConfig};
use crate::error::{Result, TimecodeError};
use framecode_core::Rational;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer frame rates considered standard.
pub const SUPPORTED_FPS: [i64; 9] = [24, 25, 30, 48, 50, 60, 100, 120, 150];

/// Check if an integer fps is one of [`SUPPORTED_FPS`].
#[must_use]
pub fn is_standard_fps(fps: i64) -> bool {
    SUPPORTED_FPS.contains(&fps)
}

/// Derive the integer frames per second of a rational rate.
///
/// Returns `None` if either term is zero. Otherwise the rate is rounded half
/// up using floor division, so `30000/1001` gives 30 and `24000/1001` gives 24.
#[must_use]
pub fn fps_from_frame_rate(rate: Rational) -> Option<i64> {
    if rate.num == 0 || rate.den == 0 {
        return None;
    }
    let (num, den) = (rate.num as i128, rate.den as i128);
    i64::try_from(floor_div(num + floor_div(den, 2), den)).ok()
}

fn floor_div(a: i128, b: i128) -> i128 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

/// Behavioral flags of a [`Timecode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Flags {
    /// Apply NTSC drop-frame correction and use `;` before the frame field
    pub drop_frame: bool,
    /// Wrap the hour field after 24 hours
    pub max_24_hours: bool,
    /// Render negative frame numbers with a leading `-`
    pub allow_negative: bool,
}

impl Flags {
    /// Create flags from the three switches.
    #[must_use]
    pub const fn new(drop_frame: bool, max_24_hours: bool, allow_negative: bool) -> Self {
        Self {
            drop_frame,
            max_24_hours,
            allow_negative,
        }
    }

    /// Set drop-frame counting.
    #[must_use]
    pub const fn with_drop_frame(self, drop_frame: bool) -> Self {
        Self { drop_frame, ..self }
    }

    /// Set 24 hour wrapping.
    #[must_use]
    pub const fn with_max_24_hours(self, max_24_hours: bool) -> Self {
        Self { max_24_hours, ..self }
    }

    /// Set negative rendering.
    #[must_use]
    pub const fn with_allow_negative(self, allow_negative: bool) -> Self {
        Self { allow_negative, ..self }
    }

    /// Get the separator character before the frame field.
    #[must_use]
    pub const fn separator(&self) -> char {
        if self.drop_frame {
            ';'
        } else {
            ':'
        }
    }
}

/// Non-fatal outcome of [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Validation {
    /// The fps is one of [`SUPPORTED_FPS`].
    Standard,
    /// The fps is positive but not a standard rate.
    NonStandardFps {
        /// The derived integer fps.
        fps: i64,
        /// The source rate.
        rate: Rational,
    },
}

impl Validation {
    /// Check if validation produced no warning.
    #[must_use]
    pub fn is_standard(&self) -> bool {
        matches!(self, Self::Standard)
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard frame rate"),
            Self::NonStandardFps { fps, rate } => {
                write!(f, "using non-standard frame rate {} ({} fps)", rate, fps)
            }
        }
    }
}

/// Check flags and fps against each other.
///
/// A non-positive fps, or drop-frame at anything but 30 or 60 fps, is an
/// error. A positive fps outside [`SUPPORTED_FPS`] is only a warning.
pub fn validate(flags: Flags, fps: i64, rate: Rational) -> Result<Validation> {
    if fps <= 0 {
        return Err(TimecodeError::invalid_frame_rate(rate));
    }
    if flags.drop_frame && DropFrameConfig::for_fps(fps).is_none() {
        return Err(TimecodeError::unsupported_frame_rate("drop-frame", fps));
    }
    if is_standard_fps(fps) {
        Ok(Validation::Standard)
    } else {
        Ok(Validation::NonStandardFps { fps, rate })
    }
}

/// Serialized form of a [`Timecode`]; deserializing re-runs validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimecodeParams {
    /// Base frame offset
    #[serde(default)]
    pub start: i64,
    /// Behavioral flags
    #[serde(default)]
    pub flags: Flags,
    /// Frame rate
    pub rate: Rational,
}

/// A timecode generator for one frame rate.
///
/// Holds the frame rate, the flags, and the frame number that frame 0 is
/// labelled with. The integer fps is always derived from the rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimecodeParams", into = "TimecodeParams")]
pub struct Timecode {
    start: i64,
    flags: Flags,
    rate: Rational,
    fps: i64,
    validation: Validation,
}

impl Timecode {
    /// Create a new timecode.
    ///
    /// Fails when the rate yields no positive fps or when drop-frame is
    /// requested at a rate other than 29.97 or 59.94. A non-standard fps is
    /// logged and kept in [`Timecode::validation`].
    pub fn new(start: i64, flags: Flags, rate: Rational) -> Result<Self> {
        let fps =
            fps_from_frame_rate(rate).ok_or_else(|| TimecodeError::invalid_frame_rate(rate))?;
        let validation = validate(flags, fps, rate)?;

        if let Validation::NonStandardFps { fps, rate } = validation {
            tracing::warn!(%rate, fps, "Using non-standard frame rate");
        }

        Ok(Self {
            start,
            flags,
            rate,
            fps,
            validation,
        })
    }

    /// Create the timecode whose start is the given HH:MM:SS:FF label.
    ///
    /// Implies `max_24_hours` and no negative rendering, as text carries
    /// neither a sign nor wrap information.
    pub fn from_components(
        rate: Rational,
        drop_frame: bool,
        hours: u32,
        minutes: u32,
        seconds: u32,
        frames: u64,
    ) -> Result<Self> {
        let flags = Flags::new(drop_frame, true, false);
        let tc = Self::new(0, flags, rate)?;
        let fps = tc.fps as i128;

        let total_seconds = hours as i128 * 3600 + minutes as i128 * 60 + seconds as i128;
        let mut start = total_seconds * fps + frames as i128;
        if drop_frame {
            let total_minutes = 60 * hours as i64 + minutes as i64;
            start -= dropframe::frames_dropped_until(total_minutes, tc.fps) as i128;
        }

        let start = i64::try_from(start).map_err(|_| TimecodeError::Overflow)?;
        Ok(tc.with_start(start))
    }

    /// Parse a timecode string; the label becomes the start frame.
    pub fn parse(rate: Rational, text: &str) -> Result<Self> {
        parse(rate, text)
    }

    /// Frame number that frame 0 is labelled with.
    #[must_use]
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Behavioral flags.
    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Source frame rate.
    #[must_use]
    pub fn rate(&self) -> Rational {
        self.rate
    }

    /// Integer frames per second derived from the rate.
    #[must_use]
    pub fn fps(&self) -> i64 {
        self.fps
    }

    /// Warning state from construction.
    #[must_use]
    pub fn validation(&self) -> Validation {
        self.validation
    }

    /// Copy of this timecode with a different start frame.
    #[must_use]
    pub fn with_start(mut self, start: i64) -> Self {
        self.start = start;
        self
    }

    /// Split the label of a frame into its fields.
    ///
    /// The frame number is relative to [`Timecode::start`].
    #[must_use]
    pub fn components(&self, framenum: i64) -> TimecodeParts {
        let mut frame = framenum as i128 + self.start as i128;
        if self.flags.drop_frame {
            frame = dropframe::adjust_wide(frame, self.fps);
        }

        let negative = frame < 0;
        if negative && !self.flags.allow_negative {
            tracing::debug!(framenum, start = self.start, "negative frame rendered without sign");
        }

        let frame = frame.unsigned_abs();
        let fps = self.fps as u128;

        let mut hours = frame / (fps * 3600);
        if self.flags.max_24_hours {
            hours %= 24;
        }

        TimecodeParts {
            negative: negative && self.flags.allow_negative,
            hours: hours as u64,
            minutes: (frame / (fps * 60) % 60) as u8,
            seconds: (frame / fps % 60) as u8,
            frames: (frame % fps) as u64,
            drop_frame: self.flags.drop_frame,
        }
    }

    /// Render the label of a frame, relative to [`Timecode::start`].
    ///
    /// ```rust
    /// use framecode_timecode::{Flags, Timecode};
    /// use framecode_core::FPS_29_97;
    ///
    /// let tc = Timecode::new(0, Flags::new(true, true, false), FPS_29_97).unwrap();
    /// assert_eq!(tc.render(1800), "00:01:00;02");
    /// ```
    #[must_use]
    pub fn render(&self, framenum: i64) -> String {
        self.components(framenum).to_string()
    }
}

impl TryFrom<TimecodeParams> for Timecode {
    type Error = TimecodeError;

    fn try_from(params: TimecodeParams) -> Result<Self> {
        Self::new(params.start, params.flags, params.rate)
    }
}

impl From<Timecode> for TimecodeParams {
    fn from(tc: Timecode) -> Self {
        Self {
            start: tc.start,
            flags: tc.flags,
            rate: tc.rate,
        }
    }
}

/// The fields of one rendered timecode label.
///
/// Every field is printed with at least two digits. Hours past 99 or frame
/// fields past 99 (above 100 fps) widen the field instead of truncating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimecodeParts {
    /// Leading `-` is printed
    pub negative: bool,
    /// Hours
    pub hours: u64,
    /// Minutes (0-59)
    pub minutes: u8,
    /// Seconds (0-59)
    pub seconds: u8,
    /// Frames (0 to fps-1)
    pub frames: u64,
    /// `;` separates the frame field
    pub drop_frame: bool,
}

impl TimecodeParts {
    /// Get the separator character for display.
    #[must_use]
    pub fn separator(&self) -> char {
        if self.drop_frame {
            ';'
        } else {
            ':'
        }
    }
}

impl fmt::Display for TimecodeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:02}:{:02}:{:02}{}{:02}",
            if self.negative { "-" } else { "" },
            self.hours,
            self.minutes,
            self.seconds,
            self.separator(),
            self.frames
        )
    }
}

/// Parse a timecode string (`HH:MM:SS:FF` or `HH:MM:SS;FF`) at a rate.
///
/// The hour, minute and second fields are exactly two digits; the frame
/// field is one or more digits. `;` selects drop-frame. The returned
/// timecode starts at the parsed label.
///
/// ```rust
/// use framecode_timecode::parse;
/// use framecode_core::Rational;
///
/// let tc = parse(Rational::new(25, 1), "00:12:24:23").unwrap();
/// assert_eq!(tc.start(), 18623);
/// ```
pub fn parse(rate: Rational, text: &str) -> Result<Timecode> {
    let mut scanner = Scanner::new(text);

    let hours = scanner.two_digits("hours")?;
    scanner.expect(':')?;
    let minutes = scanner.two_digits("minutes")?;
    scanner.expect(':')?;
    let seconds = scanner.two_digits("seconds")?;
    let drop_frame = scanner.frame_separator()?;
    let frames = scanner.frame_digits()?;

    let tc = Timecode::from_components(rate, drop_frame, hours, minutes, seconds, frames)?;
    tracing::debug!(text, start = tc.start, fps = tc.fps, "parsed timecode");
    Ok(tc)
}

/// Byte cursor over the timecode grammar.
struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, expected: &str) -> TimecodeError {
        TimecodeError::invalid_format(format!(
            "expected {} at byte {} of {:?}",
            expected, self.pos, self.text
        ))
    }

    fn digit(&mut self, field: &str) -> Result<u32> {
        match self.bytes.get(self.pos) {
            Some(b) if b.is_ascii_digit() => {
                self.pos += 1;
                Ok((b - b'0') as u32)
            }
            _ => Err(self.error(&format!("{} digit", field))),
        }
    }

    fn two_digits(&mut self, field: &str) -> Result<u32> {
        let tens = self.digit(field)?;
        let ones = self.digit(field)?;
        Ok(tens * 10 + ones)
    }

    fn expect(&mut self, ch: char) -> Result<()> {
        if self.bytes.get(self.pos) == Some(&(ch as u8)) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("'{}'", ch)))
        }
    }

    /// `;` means drop-frame, `:` does not.
    fn frame_separator(&mut self) -> Result<bool> {
        match self.bytes.get(self.pos) {
            Some(b':') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b';') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(self.error("':' or ';'")),
        }
    }

    /// One or more digits running to the end of input.
    fn frame_digits(&mut self) -> Result<u64> {
        let bytes = self.bytes;
        let rest = &bytes[self.pos..];
        if rest.is_empty() || !rest.iter().all(u8::is_ascii_digit) {
            return Err(self.error("frame digits to end of input"));
        }
        self.pos = bytes.len();

        rest.iter().try_fold(0u64, |acc, b| {
            acc.checked_mul(10)
                .and_then(|acc| acc.checked_add((b - b'0') as u64))
                .ok_or(TimecodeError::Overflow)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framecode_core::{FPS_23_976, FPS_24, FPS_25, FPS_29_97, FPS_30, FPS_59_94};
    use pretty_assertions::assert_eq;

    fn ndf() -> Flags {
        Flags::new(false, true, false)
    }

    fn df() -> Flags {
        Flags::new(true, true, false)
    }

    #[test]
    fn test_fps_from_frame_rate() {
        assert_eq!(fps_from_frame_rate(FPS_25), Some(25));
        assert_eq!(fps_from_frame_rate(FPS_29_97), Some(30));
        assert_eq!(fps_from_frame_rate(FPS_23_976), Some(24));
        assert_eq!(fps_from_frame_rate(FPS_59_94), Some(60));
        assert_eq!(fps_from_frame_rate(Rational::new(0, 1)), None);
        assert_eq!(fps_from_frame_rate(Rational::new(30, 0)), None);
    }

    #[test]
    fn test_fps_rounds_half_up() {
        assert_eq!(fps_from_frame_rate(Rational::new(5, 2)), Some(3));
        assert_eq!(fps_from_frame_rate(Rational::new(7, 3)), Some(2));
        assert_eq!(fps_from_frame_rate(Rational::new(-5, 2)), Some(-2));
        assert_eq!(fps_from_frame_rate(Rational::new(30, -1)), Some(-29));
    }

    #[test]
    fn test_validate() {
        assert_eq!(validate(ndf(), 25, FPS_25), Ok(Validation::Standard));
        assert_eq!(validate(df(), 30, FPS_29_97), Ok(Validation::Standard));

        let rate = Rational::new(15, 1);
        assert_eq!(
            validate(ndf(), 15, rate),
            Ok(Validation::NonStandardFps { fps: 15, rate })
        );

        assert!(matches!(
            validate(ndf(), 0, Rational::new(1, 3)),
            Err(TimecodeError::InvalidFrameRate { .. })
        ));
        assert_eq!(
            validate(df(), 25, FPS_25),
            Err(TimecodeError::unsupported_frame_rate("drop-frame", 25))
        );
    }

    #[test]
    fn test_new_rejects_invalid() {
        assert!(Timecode::new(0, ndf(), Rational::undefined()).is_err());
        assert!(Timecode::new(0, ndf(), Rational::new(-25, 1)).is_err());
        assert!(Timecode::new(0, df(), FPS_24).is_err());
        assert!(Timecode::new(0, df(), FPS_30).is_ok());
    }

    #[test]
    fn test_new_keeps_warning() {
        let tc = Timecode::new(0, ndf(), Rational::new(15, 1)).unwrap();
        assert!(!tc.validation().is_standard());
        assert_eq!(tc.fps(), 15);
        assert_eq!(tc.render(16), "00:00:01:01");
    }

    #[test]
    fn test_render_non_drop() {
        let tc = Timecode::new(0, ndf(), FPS_25).unwrap();
        assert_eq!(tc.render(120), "00:00:04:20");
        assert_eq!(tc.render(0), "00:00:00:00");
        assert_eq!(tc.render(25 * 3600 + 25 * 61 + 3), "01:01:01:03");
    }

    #[test]
    fn test_render_drop_frame() {
        let tc = Timecode::new(0, df(), FPS_29_97).unwrap();
        assert_eq!(tc.render(120), "00:00:04;00");
        assert_eq!(tc.render(0), "00:00:00;00");
        assert_eq!(tc.render(1799), "00:00:59;29");
        assert_eq!(tc.render(1800), "00:01:00;02");
        assert_eq!(tc.render(17982), "00:10:00;00");

        let tc = Timecode::new(0, df(), FPS_59_94).unwrap();
        assert_eq!(tc.render(120), "00:00:02;00");
        assert_eq!(tc.render(3600), "00:01:00;04");
    }

    #[test]
    fn test_render_relative_to_start() {
        let tc = Timecode::new(25 * 60, ndf(), FPS_25).unwrap();
        assert_eq!(tc.render(0), "00:01:00:00");
        assert_eq!(tc.render(-1), "00:00:59:24");
    }

    #[test]
    fn test_render_wraps_24_hours() {
        let day = 25 * 3600 * 24;
        let tc = Timecode::new(0, ndf(), FPS_25).unwrap();
        assert_eq!(tc.render(day + 25), "00:00:01:00");

        let tc = Timecode::new(0, ndf().with_max_24_hours(false), FPS_25).unwrap();
        assert_eq!(tc.render(day + 25), "24:00:01:00");
        assert_eq!(tc.render(day * 5), "120:00:00:00");
    }

    #[test]
    fn test_render_negative() {
        let tc = Timecode::new(0, ndf().with_allow_negative(true), FPS_25).unwrap();
        assert_eq!(tc.render(-26), "-00:00:01:01");

        // Without allow_negative the magnitude is shown.
        let tc = Timecode::new(0, ndf(), FPS_25).unwrap();
        assert_eq!(tc.render(-26), "00:00:01:01");
    }

    #[test]
    fn test_render_wide_frame_field() {
        let tc = Timecode::new(0, ndf(), Rational::new(240, 1)).unwrap();
        assert_eq!(tc.render(239), "00:00:00:239");
        assert_eq!(tc.render(245), "00:00:01:05");
    }

    #[test]
    fn test_render_extreme_frames() {
        let tc = Timecode::new(i64::MAX, ndf().with_max_24_hours(false), FPS_24).unwrap();
        let parts = tc.components(i64::MAX);
        assert_eq!(parts.frames, ((i64::MAX as u128 * 2) % 24) as u64);
    }

    #[test]
    fn test_components() {
        let tc = Timecode::new(0, df(), FPS_29_97).unwrap();
        let parts = tc.components(1800);
        assert_eq!(
            parts,
            TimecodeParts {
                negative: false,
                hours: 0,
                minutes: 1,
                seconds: 0,
                frames: 2,
                drop_frame: true,
            }
        );
        assert_eq!(parts.separator(), ';');
    }

    #[test]
    fn test_parse_non_drop() {
        let tc = parse(FPS_25, "00:12:24:23").unwrap();
        assert_eq!(tc.start(), 18623);
        assert_eq!(tc.flags(), Flags::new(false, true, false));
        assert_eq!(tc.fps(), 25);
        assert_eq!(tc.rate(), FPS_25);
    }

    #[test]
    fn test_parse_drop_frame() {
        let tc = parse(FPS_29_97, "00:12:24;23").unwrap();
        assert_eq!(tc.start(), 22321);
        assert!(tc.flags().drop_frame);
        assert_eq!(tc.render(0), "00:12:24;23");

        let tc = parse(FPS_59_94, "00:12:24;23").unwrap();
        assert_eq!(tc.start(), 744 * 60 + 23 - 44);
    }

    #[test]
    fn test_parse_then_render_offset() {
        let tc = parse(FPS_23_976, "00:59:59:00").unwrap();
        assert_eq!(tc.start(), 86376);
        assert_eq!(tc.render(30978), "01:21:29:18");
    }

    #[test]
    fn test_parse_long_frame_field() {
        let tc = parse(FPS_25, "00:00:00:0007").unwrap();
        assert_eq!(tc.start(), 7);
        // The frame field is not range checked.
        let tc = parse(FPS_25, "00:00:01:30").unwrap();
        assert_eq!(tc.start(), 55);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in [
            "",
            "0:00:00:00",
            "00:00:00",
            "00:00:00:",
            "00-00-00-00",
            "00:00:00.00",
            "00:00:00:0a",
            " 00:00:00:00",
            "00:00:00:00 ",
            "x00:00:00:00",
            "000:00:00:00",
            "00:00:00:-1",
            "٠٠:00:00:00",
        ] {
            assert!(
                matches!(parse(FPS_25, text), Err(TimecodeError::InvalidFormat { .. })),
                "{:?} should not parse",
                text
            );
        }
    }

    #[test]
    fn test_parse_rejects_bad_rate() {
        assert_eq!(
            parse(FPS_25, "00:00:01;00"),
            Err(TimecodeError::unsupported_frame_rate("drop-frame", 25))
        );
        assert!(matches!(
            parse(Rational::new(0, 1), "00:00:01:00"),
            Err(TimecodeError::InvalidFrameRate { .. })
        ));
    }

    #[test]
    fn test_parse_frame_overflow() {
        assert_eq!(
            parse(FPS_25, "00:00:00:99999999999999999999999"),
            Err(TimecodeError::Overflow)
        );
        assert_eq!(
            parse(FPS_25, "00:00:00:18446744073709551615"),
            Err(TimecodeError::Overflow)
        );
    }

    #[test]
    fn test_from_components() {
        let tc = Timecode::from_components(FPS_29_97, true, 1, 0, 0, 2).unwrap();
        assert_eq!(tc.render(0), "01:00:00;02");
        assert_eq!(tc, parse(FPS_29_97, "01:00:00;02").unwrap());
    }

    #[test]
    fn test_timecode_serialization() {
        let tc = Timecode::new(42, df(), FPS_29_97).unwrap();
        let json = serde_json::to_string(&tc).unwrap();
        let decoded: Timecode = serde_json::from_str(&json).unwrap();
        assert_eq!(tc, decoded);
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"start":0,"flags":{"drop_frame":true},"rate":{"num":25,"den":1}}"#;
        assert!(serde_json::from_str::<Timecode>(json).is_err());

        let json = r#"{"rate":{"num":25,"den":1}}"#;
        let tc: Timecode = serde_json::from_str(json).unwrap();
        assert_eq!(tc.start(), 0);
        assert_eq!(tc.flags(), Flags::default());
    }
}
