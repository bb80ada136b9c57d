use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A time duration stored as fractional seconds.
///
/// The constructor does not clamp or reject: scripts may be built with a
/// bogus duration, and timeline validation reports it as an authoring error
/// instead of silently fixing it up. Use [`Duration::is_valid`] to check.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Duration {
    seconds: f64,
}

impl Duration {
    pub fn from_seconds(s: f64) -> Self {
        Self { seconds: s }
    }

    pub fn from_millis(ms: f64) -> Self {
        Self::from_seconds(ms / 1000.0)
    }

    pub fn zero() -> Self {
        Self { seconds: 0.0 }
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    pub fn as_millis(&self) -> f64 {
        self.seconds * 1000.0
    }

    /// Whether this duration is usable in a timeline: finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.seconds.is_finite() && self.seconds >= 0.0
    }

    /// Number of frames covering this duration at the given frame rate.
    /// A small epsilon absorbs accumulated float error from summing entry
    /// durations, so 0.2s + 0.2s + 0.2s at 10 fps is 6 frames, not 7.
    pub fn frame_count(&self, fps: f64) -> u64 {
        (self.seconds * fps - 1e-9).ceil().max(0.0) as u64
    }
}

impl Default for Duration {
    fn default() -> Self {
        Duration::zero()
    }
}

impl Add for Duration {
    type Output = Duration;
    fn add(self, rhs: Duration) -> Duration {
        Duration::from_seconds(self.seconds + rhs.seconds)
    }
}

impl Sub for Duration {
    type Output = Duration;
    fn sub(self, rhs: Duration) -> Duration {
        Duration::from_seconds((self.seconds - rhs.seconds).max(0.0))
    }
}

impl Mul<f64> for Duration {
    type Output = Duration;
    fn mul(self, rhs: f64) -> Duration {
        Duration::from_seconds(self.seconds * rhs)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.seconds.abs() < 1.0 {
            write!(f, "{:.0}ms", self.seconds * 1000.0)
        } else {
            write!(f, "{:.2}s", self.seconds)
        }
    }
}

/// A point in time measured from the start of a scene or program.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Timestamp {
    seconds: f64,
}

impl Timestamp {
    pub fn from_seconds(s: f64) -> Self {
        Self {
            seconds: s.max(0.0),
        }
    }

    pub fn zero() -> Self {
        Self { seconds: 0.0 }
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    /// The frame index containing this timestamp at the given frame rate.
    pub fn to_frame(&self, fps: f64) -> u64 {
        (self.seconds * fps).floor() as u64
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::zero()
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;
    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp::from_seconds(self.seconds + rhs.as_seconds())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_ms = (self.seconds * 1000.0) as u64;
        let minutes = total_ms / 60_000;
        let secs = (total_ms % 60_000) / 1_000;
        let ms = total_ms % 1_000;
        write!(f, "{:02}:{:02}.{:03}", minutes, secs, ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_validity() {
        assert!(Duration::from_seconds(1.5).is_valid());
        assert!(Duration::zero().is_valid());
        assert!(!Duration::from_seconds(-0.5).is_valid());
        assert!(!Duration::from_seconds(f64::NAN).is_valid());
        assert!(!Duration::from_seconds(f64::INFINITY).is_valid());
    }

    #[test]
    fn test_duration_frame_count() {
        assert_eq!(Duration::from_seconds(1.0).frame_count(30.0), 30);
        assert_eq!(Duration::from_seconds(0.05).frame_count(30.0), 2);
        assert_eq!(Duration::zero().frame_count(60.0), 0);
    }

    #[test]
    fn test_duration_arithmetic() {
        let a = Duration::from_seconds(1.0);
        let b = Duration::from_millis(250.0);
        assert!(((a + b).as_seconds() - 1.25).abs() < 0.001);
        assert!(((b - a).as_seconds()).abs() < 0.001); // saturates at zero
        assert!(((a * 2.0).as_seconds() - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_duration_display() {
        assert_eq!(format!("{}", Duration::from_seconds(2.5)), "2.50s");
        assert_eq!(format!("{}", Duration::from_millis(400.0)), "400ms");
    }

    #[test]
    fn test_timestamp_to_frame() {
        assert_eq!(Timestamp::from_seconds(1.0).to_frame(30.0), 30);
        assert_eq!(Timestamp::from_seconds(0.999).to_frame(30.0), 29);
    }

    #[test]
    fn test_timestamp_display() {
        assert_eq!(format!("{}", Timestamp::from_seconds(61.5)), "01:01.500");
    }
}
