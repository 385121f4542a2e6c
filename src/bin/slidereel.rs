use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slidereel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a manifest with live preview and record it to a video file.
    Play(PlayArgs),
    /// Print the tick plan of a manifest without rendering.
    Plan(PlanArgs),
    /// Render a single tick as a PNG.
    Still(StillArgs),
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Override the output video path from the manifest.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Override the output codec from the manifest.
    #[arg(long, value_enum)]
    codec: Option<CodecChoice>,

    /// Write a PNG sequence into this directory instead of encoding with ffmpeg.
    #[arg(long)]
    png_dir: Option<PathBuf>,

    /// No preview and no keyboard; ticks are emitted as fast as possible.
    #[arg(long, default_value_t = false)]
    headless: bool,

    /// Do not wait between ticks even when previewing.
    #[arg(long, default_value_t = false)]
    unpaced: bool,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct StillArgs {
    /// Input manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Tick index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CodecChoice {
    H264,
    Mpeg4,
}

impl From<CodecChoice> for slidereel::VideoCodec {
    fn from(c: CodecChoice) -> Self {
        match c {
            CodecChoice::H264 => Self::H264,
            CodecChoice::Mpeg4 => Self::Mpeg4,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let interactive = matches!(&cli.cmd, Command::Play(args) if !args.headless)
        && std::io::stdout().is_terminal();
    init_tracing(if interactive { "error" } else { "info" });

    match cli.cmd {
        Command::Play(args) => cmd_play(args, interactive),
        Command::Plan(args) => cmd_plan(args),
        Command::Still(args) => cmd_still(args),
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn manifest_root(in_path: &Path) -> &Path {
    in_path.parent().unwrap_or_else(|| Path::new("."))
}

fn cmd_play(args: PlayArgs, interactive: bool) -> anyhow::Result<()> {
    let manifest = slidereel::Manifest::load(&args.in_path)?;
    let root = manifest_root(&args.in_path);
    let timeline = manifest.build_timeline(root)?;

    if !args.headless && !interactive {
        tracing::warn!("stdout is not a terminal; playing headless");
    }
    let pacing = if interactive && !args.unpaced {
        slidereel::Pacing::Realtime
    } else {
        slidereel::Pacing::Unpaced
    };
    let scheduler = slidereel::PlaybackScheduler::new(
        manifest.fps,
        manifest.playback_opts(root, pacing),
    )?;

    let mut sink_opts = manifest.sink_opts(root);
    if let Some(out) = args.out {
        sink_opts.out_path = out;
    }
    if let Some(codec) = args.codec {
        sink_opts.codec = codec.into();
    }
    let dest = match &args.png_dir {
        Some(dir) => dir.clone(),
        None => sink_opts.out_path.clone(),
    };
    let mut video: Box<dyn slidereel::VideoSink> = match args.png_dir {
        Some(dir) => Box::new(slidereel::PngSequenceSink::new(dir)),
        None => Box::new(slidereel::FfmpegSink::new(sink_opts)),
    };

    let report = if interactive {
        let mut input = slidereel::TerminalInput::new()?;
        let mut preview = slidereel::TerminalPreview::new(manifest.keys.legend())?;
        scheduler.play(&timeline, video.as_mut(), &mut preview, &mut input)?
    } else {
        scheduler.play(
            &timeline,
            video.as_mut(),
            &mut slidereel::NullDisplay,
            &mut slidereel::NoInput,
        )?
    };

    match report.outcome {
        slidereel::PlaybackOutcome::Completed => {
            eprintln!("wrote {} ({} frames)", dest.display(), report.frames_emitted);
        }
        slidereel::PlaybackOutcome::Terminated { after_frames } => {
            eprintln!(
                "stopped after {after_frames} frames; wrote {}",
                dest.display()
            );
        }
    }
    for snap in &report.snapshots {
        eprintln!("snapshot {}", snap.display());
    }
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let manifest = slidereel::Manifest::load(&args.in_path)?;
    let fps = manifest.fps;

    println!(
        "canvas {}x{} @ {}/{} fps",
        manifest.canvas.width, manifest.canvas.height, fps.num, fps.den
    );
    for (i, scene) in manifest.plan()?.iter().enumerate() {
        println!(
            "scene {i:>3}: transition {:>5} frames, hold {:>5} frames",
            scene.transition_ticks, scene.hold_ticks
        );
    }
    let total = manifest.frame_budget()?;
    println!(
        "total {total} frames ({:.2}s)",
        fps.frames_to_secs(total)
    );
    Ok(())
}

fn cmd_still(args: StillArgs) -> anyhow::Result<()> {
    let manifest = slidereel::Manifest::load(&args.in_path)?;
    let timeline = manifest.build_timeline(manifest_root(&args.in_path))?;
    let budget = timeline.frame_budget(manifest.fps)?;
    let nth = usize::try_from(args.frame)
        .with_context(|| format!("frame {} does not fit this platform's usize", args.frame))?;
    let tick = timeline
        .frames(manifest.fps)?
        .nth(nth)
        .with_context(|| format!("frame {} is past the end ({budget} frames)", args.frame))?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    tick.frame
        .to_rgb_image()?
        .save(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
