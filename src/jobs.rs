use std::{
    fmt::Debug,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    config::ExportSettings,
    encode::{
        ffmpeg::{GifOptions, Mp4Options},
        process::ProcessRunner,
    },
    export::{
        display::DisplayImage,
        exporter::{ExportJob, Exporter},
    },
    folder::init_folder,
    foundation::core::{FrameRate, LoopCount},
    foundation::error::{FrameseqError, FrameseqResult},
    sequence::{DEFAULT_FRAME_EXT, FrameSequence},
};

/// A batch of jobs loaded from JSON, executed in file order.
///
/// ```json
/// {
///   "settings": { "ffmpeg": "/usr/bin/ffmpeg" },
///   "jobs": [
///     { "kind": "init_folder", "path": "out" },
///     { "kind": "mp4", "folder": "frames", "prefix": "out", "out": "out/movie.mp4", "frame_rate": 10, "loop": 2 },
///     { "kind": "gif", "folder": "frames", "prefix": "out", "out": "out/movie.gif", "frame_rate": 10 }
///   ]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    #[serde(default)]
    pub settings: Option<ExportSettings>,
    pub jobs: Vec<JobSpec>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobSpec {
    Gif {
        folder: PathBuf,
        prefix: String,
        #[serde(default = "default_ext")]
        ext: String,
        out: PathBuf,
        frame_rate: FrameRate,
        #[serde(default)]
        loglevel: Option<String>,
    },
    Mp4 {
        folder: PathBuf,
        prefix: String,
        #[serde(default = "default_ext")]
        ext: String,
        out: PathBuf,
        frame_rate: FrameRate,
        #[serde(default, rename = "loop")]
        loop_count: LoopCount,
    },
    InitFolder {
        path: PathBuf,
    },
}

fn default_ext() -> String {
    DEFAULT_FRAME_EXT.to_string()
}

impl JobSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Gif { .. } => "gif",
            Self::Mp4 { .. } => "mp4",
            Self::InitFolder { .. } => "init_folder",
        }
    }

    /// The path this job writes to.
    pub fn target(&self) -> &Path {
        match self {
            Self::Gif { out, .. } | Self::Mp4 { out, .. } => out,
            Self::InitFolder { path } => path,
        }
    }
}

impl JobFile {
    pub fn from_json(text: &str) -> FrameseqResult<Self> {
        serde_json::from_str(text).map_err(|e| FrameseqError::serde(format!("job file: {e}")))
    }

    pub fn load(path: &Path) -> FrameseqResult<Self> {
        let f = File::open(path).with_context(|| format!("open job file '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| FrameseqError::serde(format!("parse job file '{}': {e}", path.display())))
    }
}

/// Summary line for one completed job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobReport {
    pub index: usize,
    pub kind: &'static str,
    pub target: PathBuf,
}

/// Run `jobs` one after another on the calling thread, stopping at the first failure.
pub fn run_jobs<R, D>(
    exporter: &Exporter<R>,
    jobs: &[JobSpec],
    display: &D,
) -> FrameseqResult<Vec<JobReport>>
where
    R: ProcessRunner,
    D: DisplayImage,
    D::Handle: Debug,
{
    let mut reports = Vec::with_capacity(jobs.len());

    for (index, spec) in jobs.iter().enumerate() {
        let _span = tracing::info_span!("job", index, kind = spec.kind()).entered();

        match spec {
            JobSpec::Gif {
                folder,
                prefix,
                ext,
                out,
                frame_rate,
                loglevel,
            } => {
                let job = ExportJob::new(
                    FrameSequence::new(folder, prefix.as_str()).with_extension(ext.as_str()),
                    out,
                    *frame_rate,
                );
                let opts = GifOptions {
                    loglevel: loglevel.clone(),
                };
                let handle = exporter.export_gif(&job, &opts, display)?;
                tracing::info!(?handle, "gif ready");
            }
            JobSpec::Mp4 {
                folder,
                prefix,
                ext,
                out,
                frame_rate,
                loop_count,
            } => {
                let job = ExportJob::new(
                    FrameSequence::new(folder, prefix.as_str()).with_extension(ext.as_str()),
                    out,
                    *frame_rate,
                );
                let opts = Mp4Options {
                    loop_count: *loop_count,
                    ..Mp4Options::default()
                };
                exporter.export_mp4(&job, &opts)?;
            }
            JobSpec::InitFolder { path } => init_folder(path)?,
        }

        reports.push(JobReport {
            index,
            kind: spec.kind(),
            target: spec.target().to_path_buf(),
        });
    }

    Ok(reports)
}

#[cfg(test)]
#[path = "../tests/unit/jobs.rs"]
mod tests;
