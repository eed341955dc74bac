use std::path::PathBuf;

use crate::{
    config::ExportSettings,
    encode::{
        ffmpeg::{GifOptions, Mp4Options, command_line, ensure_parent_dir, gif_args, mp4_args},
        process::{ProcessRunner, SystemRunner},
    },
    export::display::DisplayImage,
    foundation::core::FrameRate,
    foundation::error::{FrameseqError, FrameseqResult},
    sequence::{FrameSequence, MAX_PROBED_START_INDEX, SequenceScan},
};

/// One frame sequence to encode into one output file.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportJob {
    pub sequence: FrameSequence,
    pub out_path: PathBuf,
    pub frame_rate: FrameRate,
}

impl ExportJob {
    pub fn new(sequence: FrameSequence, out_path: impl Into<PathBuf>, frame_rate: FrameRate) -> Self {
        Self {
            sequence,
            out_path: out_path.into(),
            frame_rate,
        }
    }
}

/// What a successful encoder run left behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOutcome {
    pub out_path: PathBuf,
    /// Whatever the encoder wrote to stderr (empty under `-loglevel quiet`).
    pub stderr: String,
}

/// Runs ffmpeg exports synchronously, one child process per call.
#[derive(Clone, Debug)]
pub struct Exporter<R = SystemRunner> {
    settings: ExportSettings,
    runner: R,
}

impl Exporter<SystemRunner> {
    pub fn new(settings: ExportSettings) -> FrameseqResult<Self> {
        Self::with_runner(settings, SystemRunner)
    }
}

impl<R: ProcessRunner> Exporter<R> {
    pub fn with_runner(settings: ExportSettings, runner: R) -> FrameseqResult<Self> {
        settings.validate()?;
        Ok(Self { settings, runner })
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Encode `job` as an animated GIF, wait for the file to settle, then hand it to `display`.
    #[tracing::instrument(
        skip_all,
        fields(out = %job.out_path.display(), fps = %job.frame_rate)
    )]
    pub fn export_gif<D: DisplayImage>(
        &self,
        job: &ExportJob,
        opts: &GifOptions,
        display: &D,
    ) -> FrameseqResult<D::Handle> {
        let args = gif_args(&job.sequence, job.frame_rate, &job.out_path, opts);
        self.run_encoder(job, args)?;

        self.settings.settle.wait_for(&job.out_path)?;
        display.display_image(&job.out_path)
    }

    /// Encode `job` as an MP4.
    #[tracing::instrument(
        skip_all,
        fields(out = %job.out_path.display(), fps = %job.frame_rate, loop_count = opts.loop_count.0)
    )]
    pub fn export_mp4(&self, job: &ExportJob, opts: &Mp4Options) -> FrameseqResult<ExportOutcome> {
        let args = mp4_args(&job.sequence, job.frame_rate, &job.out_path, opts);
        self.run_encoder(job, args)
    }

    fn run_encoder(
        &self,
        job: &ExportJob,
        args: Vec<std::ffi::OsString>,
    ) -> FrameseqResult<ExportOutcome> {
        if self.settings.preflight {
            preflight(&job.sequence)?;
        }
        ensure_parent_dir(&job.out_path)?;

        let program = self.settings.ffmpeg.as_os_str();
        tracing::debug!(cmd = %command_line(program, &args), "running encoder");

        let output = self
            .runner
            .run(program, &args)
            .map_err(|source| FrameseqError::Spawn {
                program: program.to_string_lossy().into_owned(),
                source,
            })?;

        if !output.success {
            return Err(FrameseqError::Encode {
                program: program.to_string_lossy().into_owned(),
                code: output.code,
                stderr: output.stderr,
            });
        }
        if !output.stderr.is_empty() {
            tracing::debug!(stderr = %output.stderr, "encoder stderr");
        }
        tracing::info!(out = %job.out_path.display(), "export finished");

        Ok(ExportOutcome {
            out_path: job.out_path.clone(),
            stderr: output.stderr,
        })
    }
}

/// Check that ffmpeg will find frames for `seq`, warning about layouts it would mis-read.
pub fn preflight(seq: &FrameSequence) -> FrameseqResult<SequenceScan> {
    let scan = seq.scan()?;
    let Some(first) = scan.first_index() else {
        return Err(FrameseqError::validation(format!(
            "no frames matching '{}' found",
            seq.input_pattern().to_string_lossy()
        )));
    };

    if first > MAX_PROBED_START_INDEX {
        tracing::warn!(
            first_index = first,
            "sequence starts above index {MAX_PROBED_START_INDEX}; ffmpeg will not find its first frame"
        );
    }
    for (start, end) in scan.gaps() {
        tracing::warn!(
            missing_from = start,
            missing_to = end,
            "frame sequence has a gap; ffmpeg stops reading at the first missing frame"
        );
    }
    tracing::debug!(
        frames = scan.len(),
        readable = scan.contiguous_len(),
        "sequence scanned"
    );

    Ok(scan)
}

#[cfg(test)]
#[path = "../../tests/unit/export/exporter.rs"]
mod tests;
