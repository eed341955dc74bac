use std::{ffi::OsString, path::PathBuf};

use crate::{
    encode::{ffmpeg::DEFAULT_FFMPEG, settle::SettlePolicy},
    foundation::error::{FrameseqError, FrameseqResult},
};

/// Environment variable that overrides the ffmpeg program.
pub const FFMPEG_ENV: &str = "FRAMESEQ_FFMPEG";

/// Settings shared by every export an [`Exporter`](crate::Exporter) runs.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Program name or path of the ffmpeg binary.
    pub ffmpeg: PathBuf,
    /// How to wait for GIF output before handing it to the display collaborator.
    pub settle: SettlePolicy,
    /// Scan the frame folder before spawning ffmpeg.
    pub preflight: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from(DEFAULT_FFMPEG),
            settle: SettlePolicy::default(),
            preflight: true,
        }
    }
}

impl ExportSettings {
    /// Defaults, with the ffmpeg program taken from `FRAMESEQ_FFMPEG` when set.
    pub fn from_env() -> Self {
        Self::default().with_ffmpeg_override(std::env::var_os(FFMPEG_ENV))
    }

    /// Apply an ffmpeg override; empty values are ignored.
    pub fn with_ffmpeg_override(mut self, value: Option<OsString>) -> Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.ffmpeg = PathBuf::from(v);
        }
        self
    }

    pub fn validate(&self) -> FrameseqResult<()> {
        if self.ffmpeg.as_os_str().is_empty() {
            return Err(FrameseqError::validation("ffmpeg program must be non-empty"));
        }
        match self.settle {
            SettlePolicy::PollStable { interval, .. } if interval.is_zero() => Err(
                FrameseqError::validation("settle poll interval must be non-zero"),
            ),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
