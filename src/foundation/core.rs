use std::fmt;

use crate::foundation::error::{FrameseqError, FrameseqResult};

/// Input frame rate in frames per second. Always finite and > 0.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize)]
#[serde(transparent)]
pub struct FrameRate(f64);

impl FrameRate {
    pub fn new(fps: f64) -> FrameseqResult<Self> {
        if !fps.is_finite() {
            return Err(FrameseqError::validation("frame rate must be finite"));
        }
        if fps <= 0.0 {
            return Err(FrameseqError::validation("frame rate must be > 0"));
        }
        Ok(Self(fps))
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) / self.0
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ffmpeg accepts both `10` and `12.5`; shortest round-trip form keeps the argument exact.
        write!(f, "{}", self.0)
    }
}

impl<'de> serde::Deserialize<'de> for FrameRate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        FrameRate::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Extra repeats of the input stream requested from ffmpeg (`-stream_loop`).
///
/// `0` means no loop directive is emitted at all.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct LoopCount(pub u32);

impl LoopCount {
    pub const NONE: LoopCount = LoopCount(0);

    pub fn is_forced(self) -> bool {
        self.0 > 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
