use std::{
    path::Path,
    time::{Duration, Instant},
};

use crate::foundation::error::{FrameseqError, FrameseqResult};

/// Legacy fixed delay between ffmpeg exiting and the output being read back.
pub const LEGACY_SETTLE_DELAY: Duration = Duration::from_millis(200);

/// How to wait for an output file after the encoder exits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SettlePolicy {
    /// Trust process exit alone.
    None,
    /// Sleep for a fixed duration regardless of file state.
    Fixed {
        #[serde(with = "millis")]
        delay: Duration,
    },
    /// Poll until the file exists and its size holds between two consecutive polls.
    PollStable {
        #[serde(with = "millis")]
        interval: Duration,
        #[serde(with = "millis")]
        timeout: Duration,
    },
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self::PollStable {
            interval: Duration::from_millis(50),
            timeout: Duration::from_secs(2),
        }
    }
}

impl SettlePolicy {
    pub fn legacy() -> Self {
        Self::Fixed {
            delay: LEGACY_SETTLE_DELAY,
        }
    }

    /// Block until `path` is considered settled under this policy.
    pub fn wait_for(self, path: &Path) -> FrameseqResult<()> {
        match self {
            Self::None => Ok(()),
            Self::Fixed { delay } => {
                std::thread::sleep(delay);
                Ok(())
            }
            Self::PollStable { interval, timeout } => poll_stable(path, interval, timeout),
        }
    }
}

fn poll_stable(path: &Path, interval: Duration, timeout: Duration) -> FrameseqResult<()> {
    let deadline = Instant::now() + timeout;
    let mut last_len: Option<u64> = None;

    loop {
        let len = std::fs::metadata(path).ok().filter(|m| m.is_file()).map(|m| m.len());
        match (last_len, len) {
            (Some(prev), Some(cur)) if prev == cur => return Ok(()),
            _ => last_len = len,
        }

        if Instant::now() >= deadline {
            return match len {
                Some(cur) => {
                    tracing::warn!(
                        path = %path.display(),
                        bytes = cur,
                        "output size still changing at settle timeout; continuing"
                    );
                    Ok(())
                }
                None => Err(FrameseqError::evaluation(format!(
                    "output '{}' did not appear within {} ms",
                    path.display(),
                    timeout.as_millis()
                ))),
            };
        }

        std::thread::sleep(interval);
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/settle.rs"]
mod tests;
