use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "reeltime", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a single frame and write its visual tree as JSON.
    Frame(FrameArgs),
    /// Evaluate a frame range and write one visual tree per line (JSON Lines).
    Frames(FramesArgs),
    /// Print the scene schedule.
    Timeline(InputArgs),
    /// Print the narration manifest (cue id, script and asset path) as JSON.
    Narration(InputArgs),
    /// Print the validated composition as JSON.
    Composition(InputArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input composition JSON, or `demo` for the built-in short.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    input: InputArgs,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    from: u64,

    /// End frame (exclusive); defaults to the composition duration.
    #[arg(long)]
    to: Option<u64>,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Timeline(args) => cmd_timeline(args),
        Command::Narration(args) => cmd_narration(args),
        Command::Composition(args) => cmd_composition(args),
    }
}

fn load_comp(input: &InputArgs) -> anyhow::Result<reeltime::Composition> {
    if input.in_path.as_os_str() == "demo" {
        return Ok(reeltime::demo::nanogpt_short()?);
    }
    let path = &input.in_path;
    let f = File::open(path).with_context(|| format!("open composition '{}'", path.display()))?;
    let comp: reeltime::Composition = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse composition JSON '{}'", path.display()))?;
    comp.validate()?;
    Ok(comp)
}

fn open_out(out: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    let Some(path) = out else {
        return Ok(Box::new(BufWriter::new(std::io::stdout().lock())));
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    Ok(Box::new(BufWriter::new(f)))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = load_comp(&args.input)?;
    let tree = reeltime::render_frame(&comp, reeltime::FrameIndex(args.frame))?;

    let mut w = open_out(args.out.as_deref())?;
    serde_json::to_writer_pretty(&mut w, &tree).context("serialize visual tree")?;
    writeln!(w)?;
    w.flush()?;

    if let Some(out) = &args.out {
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let comp = load_comp(&args.input)?;
    let to = args.to.unwrap_or(comp.duration.0);
    let range = reeltime::FrameRange::new(reeltime::FrameIndex(args.from), reeltime::FrameIndex(to))?;
    let schedule = comp.schedule()?;

    let mut w = open_out(args.out.as_deref())?;
    for frame in range.iter() {
        let tree = reeltime::render_frame_unchecked(&comp, &schedule, frame)?;
        serde_json::to_writer(&mut w, &tree)
            .with_context(|| format!("serialize frame {}", frame.0))?;
        writeln!(w)?;
    }
    w.flush()?;

    if let Some(out) = &args.out {
        eprintln!("wrote {} frames to {}", range.len_frames(), out.display());
    }
    Ok(())
}

fn cmd_timeline(args: InputArgs) -> anyhow::Result<()> {
    let comp = load_comp(&args)?;
    let clock = comp.clock();
    let mut w = open_out(None)?;
    writeln!(
        w,
        "{} frames @ {}/{} fps ({:.2}s)",
        clock.duration_frames(),
        comp.fps.num,
        comp.fps.den,
        clock.duration_secs()
    )?;
    for (i, window) in comp.schedule()?.windows().iter().enumerate() {
        writeln!(
            w,
            "{i:>3}  {:<16} {:>6} .. {:<6} {:>5.2}s",
            window.name,
            window.start.0,
            window.end().0,
            comp.fps.frames_to_secs(window.duration)
        )?;
    }
    w.flush()?;
    Ok(())
}

fn cmd_narration(args: InputArgs) -> anyhow::Result<()> {
    let comp = load_comp(&args)?;
    let mut w = open_out(None)?;
    serde_json::to_writer_pretty(&mut w, &comp.narration.manifest())
        .context("serialize narration manifest")?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}

fn cmd_composition(args: InputArgs) -> anyhow::Result<()> {
    let comp = load_comp(&args)?;
    let mut w = open_out(None)?;
    serde_json::to_writer_pretty(&mut w, &comp).context("serialize composition")?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}
