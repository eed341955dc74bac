use std::{
    ffi::{OsStr, OsString},
    path::Path,
    process::{Command, Stdio},
};

use crate::{
    foundation::core::{FrameRate, LoopCount},
    foundation::error::FrameseqResult,
    sequence::FrameSequence,
};

/// Program name used when no override is configured.
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Options for animated GIF output.
///
/// `loglevel: None` leaves ffmpeg's default (verbose) logging in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GifOptions {
    pub loglevel: Option<String>,
}

/// Options for MP4 output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mp4Options {
    /// Extra repeats of the input stream; `0` emits no `-stream_loop`.
    pub loop_count: LoopCount,
    pub codec: String,
    pub pix_fmt: String,
    pub preset: String,
    pub loglevel: Option<String>,
}

impl Default for Mp4Options {
    fn default() -> Self {
        Self {
            loop_count: LoopCount::NONE,
            codec: "libx264".to_string(),
            // 4:2:0 keeps the output playable in browsers and most hardware decoders.
            pix_fmt: "yuv420p".to_string(),
            preset: "faster".to_string(),
            loglevel: Some("quiet".to_string()),
        }
    }
}

impl Mp4Options {
    pub fn with_loop(mut self, loop_count: u32) -> Self {
        self.loop_count = LoopCount(loop_count);
        self
    }
}

fn image_sequence_input(
    args: &mut Vec<OsString>,
    seq: &FrameSequence,
    frame_rate: FrameRate,
    loop_count: LoopCount,
) {
    args.extend(["-f", "image2", "-framerate"].map(OsString::from));
    args.push(frame_rate.to_string().into());
    if loop_count.is_forced() {
        args.push("-stream_loop".into());
        args.push(loop_count.0.to_string().into());
    }
    args.push("-i".into());
    args.push(seq.input_pattern());
}

/// Argument list for `ffmpeg` turning `seq` into an animated GIF at `out_path`.
pub fn gif_args(
    seq: &FrameSequence,
    frame_rate: FrameRate,
    out_path: &Path,
    opts: &GifOptions,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-y".into()];
    if let Some(level) = &opts.loglevel {
        args.push("-loglevel".into());
        args.push(level.into());
    }
    image_sequence_input(&mut args, seq, frame_rate, LoopCount::NONE);
    args.push(out_path.into());
    args
}

/// Argument list for `ffmpeg` turning `seq` into an MP4 at `out_path`.
pub fn mp4_args(
    seq: &FrameSequence,
    frame_rate: FrameRate,
    out_path: &Path,
    opts: &Mp4Options,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-y".into()];
    if let Some(level) = &opts.loglevel {
        args.push("-loglevel".into());
        args.push(level.into());
    }
    image_sequence_input(&mut args, seq, frame_rate, opts.loop_count);
    for (flag, value) in [
        ("-c:v", &opts.codec),
        ("-pix_fmt", &opts.pix_fmt),
        ("-preset", &opts.preset),
    ] {
        args.push(flag.into());
        args.push(value.into());
    }
    args.push(out_path.into());
    args
}

/// Render a program + argument list as a single shell-like line for logs.
pub fn command_line(program: &OsStr, args: &[OsString]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(OsString::as_os_str))
        .map(|a| {
            let s = a.to_string_lossy();
            if s.is_empty() || s.contains(char::is_whitespace) {
                format!("'{s}'")
            } else {
                s.into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_program_on_path(program: &OsStr) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn is_ffmpeg_on_path() -> bool {
    is_program_on_path(OsStr::new(DEFAULT_FFMPEG))
}

pub fn ensure_parent_dir(path: &Path) -> FrameseqResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
