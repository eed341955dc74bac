use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "frameseq", version)]
struct Cli {
    /// ffmpeg program to run (defaults to $FRAMESEQ_FFMPEG, then `ffmpeg`).
    #[arg(long, global = true)]
    ffmpeg: Option<PathBuf>,

    /// Sleep a fixed number of milliseconds after GIF encoding instead of polling the output.
    #[arg(long, global = true)]
    settle_ms: Option<u64>,

    /// Skip scanning the frame folder before running ffmpeg.
    #[arg(long, global = true)]
    no_preflight: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a frame sequence into an animated GIF.
    Gif(GifArgs),
    /// Encode a frame sequence into an MP4 (libx264, yuv420p).
    Mp4(Mp4Args),
    /// Delete a folder if present, then recreate it empty.
    InitFolder {
        /// Folder to reset.
        path: PathBuf,
    },
    /// List the frames ffmpeg would read for a sequence.
    Inspect(SequenceArgs),
    /// Run a JSON job file.
    Run {
        /// Job file path.
        #[arg(long)]
        jobs: PathBuf,
    },
}

#[derive(Args, Debug)]
struct SequenceArgs {
    /// Folder containing the frames.
    #[arg(long)]
    folder: PathBuf,

    /// File name prefix before the 4-digit frame index.
    #[arg(long)]
    prefix: String,

    /// Frame file extension.
    #[arg(long, default_value = frameseq::DEFAULT_FRAME_EXT)]
    ext: String,
}

impl SequenceArgs {
    fn sequence(&self) -> frameseq::FrameSequence {
        frameseq::FrameSequence::new(&self.folder, self.prefix.as_str())
            .with_extension(self.ext.as_str())
    }
}

#[derive(Args, Debug)]
struct GifArgs {
    #[command(flatten)]
    seq: SequenceArgs,

    /// Output GIF path (overwritten).
    #[arg(long)]
    out: PathBuf,

    /// Input frame rate.
    #[arg(long)]
    fps: f64,

    /// Pass `-loglevel` to ffmpeg.
    #[arg(long)]
    loglevel: Option<String>,
}

#[derive(Args, Debug)]
struct Mp4Args {
    #[command(flatten)]
    seq: SequenceArgs,

    /// Output MP4 path (overwritten).
    #[arg(long)]
    out: PathBuf,

    /// Input frame rate.
    #[arg(long)]
    fps: f64,

    /// Extra repeats of the input stream (0 disables -stream_loop).
    #[arg(long = "loop", default_value_t = 0)]
    loop_count: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Gif(ref args) => cmd_gif(&cli, args),
        Command::Mp4(ref args) => cmd_mp4(&cli, args),
        Command::InitFolder { ref path } => {
            frameseq::init_folder(path)?;
            eprintln!("initialized {}", path.display());
            Ok(())
        }
        Command::Inspect(ref args) => cmd_inspect(args),
        Command::Run { ref jobs } => cmd_run(&cli, jobs),
    }
}

fn settings(cli: &Cli, base: frameseq::ExportSettings) -> frameseq::ExportSettings {
    let mut settings = base;
    if let Some(ffmpeg) = &cli.ffmpeg {
        settings.ffmpeg = ffmpeg.clone();
    }
    if let Some(ms) = cli.settle_ms {
        settings.settle = frameseq::SettlePolicy::Fixed {
            delay: Duration::from_millis(ms),
        };
    }
    if cli.no_preflight {
        settings.preflight = false;
    }
    settings
}

fn cmd_gif(cli: &Cli, args: &GifArgs) -> anyhow::Result<()> {
    let exporter = frameseq::Exporter::new(settings(cli, frameseq::ExportSettings::from_env()))?;
    let job = frameseq::ExportJob::new(
        args.seq.sequence(),
        &args.out,
        frameseq::FrameRate::new(args.fps)?,
    );
    let opts = frameseq::GifOptions {
        loglevel: args.loglevel.clone(),
    };

    let shown = exporter.export_gif(&job, &opts, &frameseq::ImageSummary)?;
    eprintln!(
        "wrote {} ({}x{}, {} bytes)",
        shown.path.display(),
        shown.width,
        shown.height,
        shown.bytes
    );
    Ok(())
}

fn cmd_mp4(cli: &Cli, args: &Mp4Args) -> anyhow::Result<()> {
    let exporter = frameseq::Exporter::new(settings(cli, frameseq::ExportSettings::from_env()))?;
    let job = frameseq::ExportJob::new(
        args.seq.sequence(),
        &args.out,
        frameseq::FrameRate::new(args.fps)?,
    );
    let opts = frameseq::Mp4Options::default().with_loop(args.loop_count);

    let outcome = exporter.export_mp4(&job, &opts)?;
    eprintln!("wrote {}", outcome.out_path.display());
    Ok(())
}

fn cmd_inspect(args: &SequenceArgs) -> anyhow::Result<()> {
    let seq = args.sequence();
    let scan = seq.scan()?;

    println!("pattern:    {}", seq.input_pattern().to_string_lossy());
    println!("frames:     {}", scan.len());
    if let (Some(first), Some(last)) = (scan.first_index(), scan.last_index()) {
        println!("range:      {first}..={last}");
    }
    println!("readable:   {}", scan.contiguous_len());
    for (start, end) in scan.gaps() {
        println!("gap:        {start}..={end}");
    }
    if scan
        .first_index()
        .is_some_and(|i| i > frameseq::MAX_PROBED_START_INDEX)
    {
        println!(
            "warning:    first index is above {}; ffmpeg will not find it",
            frameseq::MAX_PROBED_START_INDEX
        );
    }
    Ok(())
}

fn cmd_run(cli: &Cli, jobs_path: &std::path::Path) -> anyhow::Result<()> {
    let file = frameseq::JobFile::load(jobs_path)?;
    let base = file
        .settings
        .clone()
        .unwrap_or_else(frameseq::ExportSettings::from_env);
    let exporter = frameseq::Exporter::new(settings(cli, base))?;

    let reports = frameseq::run_jobs(&exporter, &file.jobs, &frameseq::ImageSummary)?;
    for r in &reports {
        eprintln!("[{}] {} -> {}", r.index, r.kind, r.target.display());
    }
    Ok(())
}
