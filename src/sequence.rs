use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::foundation::error::FrameseqResult;

/// Extension used for frame files unless overridden.
pub const DEFAULT_FRAME_EXT: &str = "webp";

/// Minimum zero-padded width of the frame index (`%04d`).
pub const INDEX_WIDTH: usize = 4;

/// ffmpeg's image2 demuxer only probes start numbers `0..=4` by default.
pub const MAX_PROBED_START_INDEX: u32 = 4;

/// A numbered still-image sequence: `<folder>/<prefix><NNNN>.<ext>`.
///
/// Lexical order of the zero-padded index equals temporal frame order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSequence {
    pub folder: PathBuf,
    pub prefix: String,
    pub extension: String,
}

impl FrameSequence {
    pub fn new(folder: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            prefix: prefix.into(),
            extension: DEFAULT_FRAME_EXT.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// The printf-style input pattern handed to ffmpeg.
    pub fn input_pattern(&self) -> OsString {
        self.folder
            .join(format!(
                "{}%0{INDEX_WIDTH}d.{}",
                self.prefix, self.extension
            ))
            .into_os_string()
    }

    pub fn frame_file_name(&self, index: u32) -> String {
        format!(
            "{}{:0width$}.{}",
            self.prefix,
            index,
            self.extension,
            width = INDEX_WIDTH
        )
    }

    pub fn frame_path(&self, index: u32) -> PathBuf {
        self.folder.join(self.frame_file_name(index))
    }

    /// Parse a file name back into its frame index, if it belongs to this sequence.
    pub fn parse_index(&self, file_name: &str) -> Option<u32> {
        let rest = file_name.strip_prefix(self.prefix.as_str())?;
        let digits = rest
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')?;
        if digits.len() < INDEX_WIDTH || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // `%04d` never renders a leading zero beyond the pad width.
        if digits.len() > INDEX_WIDTH && digits.starts_with('0') {
            return None;
        }
        digits.parse().ok()
    }

    /// List the frames of this sequence that currently exist on disk.
    pub fn scan(&self) -> FrameseqResult<SequenceScan> {
        let entries = std::fs::read_dir(&self.folder)
            .with_context(|| format!("read frame folder '{}'", self.folder.display()))?;

        let mut frames = Vec::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("read entry in '{}'", self.folder.display()))?;
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            let Some(index) = self.parse_index(&name) else {
                continue;
            };
            if entry.path().is_file() {
                frames.push((index, entry.path()));
            }
        }
        frames.sort_by_key(|(index, _)| *index);

        Ok(SequenceScan { frames })
    }
}

/// Frames found on disk for a [`FrameSequence`], sorted by index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceScan {
    pub frames: Vec<(u32, PathBuf)>,
}

impl SequenceScan {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn first_index(&self) -> Option<u32> {
        self.frames.first().map(|(i, _)| *i)
    }

    pub fn last_index(&self) -> Option<u32> {
        self.frames.last().map(|(i, _)| *i)
    }

    /// Number of frames ffmpeg will actually read: it stops at the first missing index.
    pub fn contiguous_len(&self) -> usize {
        let Some(first) = self.first_index() else {
            return 0;
        };
        self.frames
            .iter()
            .enumerate()
            .take_while(|(n, (index, _))| u64::from(*index) == u64::from(first) + *n as u64)
            .count()
    }

    /// Missing index ranges between present frames, as inclusive `(start, end)` pairs.
    pub fn gaps(&self) -> Vec<(u32, u32)> {
        self.frames
            .windows(2)
            .filter_map(|w| {
                let (a, b) = (w[0].0, w[1].0);
                (b > a + 1).then(|| (a + 1, b - 1))
            })
            .collect()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.frames.iter().map(|(_, p)| p.as_path())
    }
}

#[cfg(test)]
#[path = "../tests/unit/sequence.rs"]
mod tests;
