//! frameseq turns numbered still-image sequences into animated GIFs and MP4s by driving the
//! system `ffmpeg` binary, and resets scratch folders between runs.
//!
//! # Overview
//!
//! - **Export**: [`export_as_gif`] / [`export_as_mp4`] (or an [`Exporter`] for custom settings)
//!   build a fixed ffmpeg argument list for `{folder}/{prefix}%04d.webp`, run it, and block
//!   until it exits. A failed launch is [`FrameseqError::Spawn`], a nonzero exit is
//!   [`FrameseqError::Encode`] carrying the captured stderr.
//! - **GIF read-back**: after the encoder exits the output is settled per [`SettlePolicy`] and
//!   handed to a [`DisplayImage`] collaborator ([`ImageSummary`] by default).
//! - **Folders**: [`init_folder`] makes a path an empty directory.
//! - **Batches**: [`JobFile`] + [`run_jobs`] execute a JSON list of jobs serially.
//!
//! Nothing here runs concurrently. Calls that share an output path or folder must be
//! serialized by the caller.
#![forbid(unsafe_code)]

mod config;
mod encode;
mod export;
mod folder;
mod foundation;
mod jobs;
mod sequence;

pub use config::{ExportSettings, FFMPEG_ENV};
pub use encode::ffmpeg::{
    DEFAULT_FFMPEG, GifOptions, Mp4Options, command_line, ensure_parent_dir, gif_args,
    is_ffmpeg_on_path, is_program_on_path, mp4_args,
};
pub use encode::process::{ProcessOutput, ProcessRunner, SystemRunner};
pub use encode::settle::{LEGACY_SETTLE_DELAY, SettlePolicy};
pub use export::display::{DisplayImage, DisplayedImage, ImageSummary};
pub use export::exporter::{ExportJob, ExportOutcome, Exporter, preflight};
pub use export::{export_as_gif, export_as_mp4};
pub use folder::init_folder;
pub use foundation::core::{FrameRate, LoopCount};
pub use foundation::error::{FrameseqError, FrameseqResult};
pub use jobs::{JobFile, JobReport, JobSpec, run_jobs};
pub use sequence::{
    DEFAULT_FRAME_EXT, FrameSequence, INDEX_WIDTH, MAX_PROBED_START_INDEX, SequenceScan,
};
