pub(crate) mod display;
pub(crate) mod exporter;

use std::path::Path;

use crate::{
    config::ExportSettings,
    encode::ffmpeg::{GifOptions, Mp4Options},
    foundation::core::FrameRate,
    foundation::error::FrameseqResult,
    sequence::FrameSequence,
};

use display::{DisplayedImage, ImageSummary};
use exporter::{ExportJob, Exporter};

/// Encode `{folder}/{prefix}%04d.webp` into an animated GIF and read it back.
///
/// Uses [`ExportSettings::from_env`] and the [`ImageSummary`] display collaborator.
/// `export_filepath` is overwritten if it exists.
pub fn export_as_gif(
    folder: impl AsRef<Path>,
    prefix: &str,
    export_filepath: impl AsRef<Path>,
    frame_rate: f64,
) -> FrameseqResult<DisplayedImage> {
    let job = ExportJob::new(
        FrameSequence::new(folder.as_ref(), prefix),
        export_filepath.as_ref(),
        FrameRate::new(frame_rate)?,
    );
    Exporter::new(ExportSettings::from_env())?.export_gif(
        &job,
        &GifOptions::default(),
        &ImageSummary,
    )
}

/// Encode `{folder}/{prefix}%04d.webp` into an H.264 MP4.
///
/// `loop_count > 0` asks ffmpeg to repeat the input stream that many extra times.
/// `export_filepath` is overwritten if it exists.
pub fn export_as_mp4(
    folder: impl AsRef<Path>,
    prefix: &str,
    export_filepath: impl AsRef<Path>,
    frame_rate: f64,
    loop_count: u32,
) -> FrameseqResult<()> {
    let job = ExportJob::new(
        FrameSequence::new(folder.as_ref(), prefix),
        export_filepath.as_ref(),
        FrameRate::new(frame_rate)?,
    );
    Exporter::new(ExportSettings::from_env())?
        .export_mp4(&job, &Mp4Options::default().with_loop(loop_count))
        .map(|_| ())
}
