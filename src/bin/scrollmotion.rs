use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::Parser;
use scrollmotion::{
    FrameOutput, HostEvent, PageConfig, ScrollObservation, Stage, StaticGeometry,
};

/// Host clock step between sampled offsets; long enough for scrubbed glyphs to settle.
const SETTLE_MS: f64 = 1000.0;

#[derive(Parser, Debug)]
#[command(name = "scrollmotion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Write the built-in portfolio page configuration as JSON.
    Preset(PresetArgs),
    /// Print one JSON frame per scroll offset.
    Sample(SampleArgs),
    /// Apply a JSON array of host events, printing one frame per event.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct PresetArgs {
    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct PageArgs {
    /// Page configuration JSON; the built-in portfolio page when omitted.
    #[arg(long)]
    page: Option<PathBuf>,

    /// Element geometry JSON (`{ "id": { "x0", "y0", "x1", "y1" } }`).
    #[arg(long)]
    geometry: Option<PathBuf>,

    /// Override the page seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 800.0)]
    viewport: f64,

    /// Document height in pixels.
    #[arg(long)]
    document: f64,

    /// Comma-separated scroll offsets.
    #[arg(long, value_delimiter = ',', required = true)]
    offsets: Vec<f64>,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    #[command(flatten)]
    page: PageArgs,

    /// JSON array of host events.
    #[arg(long)]
    script: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Preset(args) => cmd_preset(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Replay(args) => cmd_replay(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {what} JSON '{}'", path.display()))?;
    Ok(value)
}

fn load_page(args: &PageArgs) -> anyhow::Result<(Stage, StaticGeometry)> {
    let mut config = match &args.page {
        Some(path) => read_json::<PageConfig>(path, "page")?,
        None => scrollmotion::portfolio_page()?,
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate().context("validate page")?;

    let geometry = match &args.geometry {
        Some(path) => read_json::<StaticGeometry>(path, "geometry")?,
        None => StaticGeometry::new(),
    };
    Ok((Stage::from_config(config)?, geometry))
}

fn write_frame(out: &mut impl Write, frame: &FrameOutput) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, frame).context("serialize frame")?;
    writeln!(out).context("write frame")?;
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let json = scrollmotion::portfolio_page()?.to_json_pretty()?;
    match args.out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&path, json)
                .with_context(|| format!("write page '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let (mut stage, geometry) = load_page(&args.page)?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let mut now_ms = SETTLE_MS;
    stage.handle(&HostEvent::Mount, &geometry);
    stage.handle(&HostEvent::Tick { now_ms }, &geometry);

    for offset in args.offsets {
        now_ms += SETTLE_MS;
        let obs = ScrollObservation::new(offset, args.viewport, args.document);
        for event in [
            HostEvent::Scroll(obs),
            HostEvent::Paint,
            HostEvent::Tick { now_ms },
        ] {
            stage.handle(&event, &geometry);
        }
        write_frame(&mut out, &stage.snapshot(&geometry))?;
    }
    out.flush().context("flush stdout")?;
    Ok(())
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let (mut stage, geometry) = load_page(&args.page)?;
    let events: Vec<HostEvent> = read_json(&args.script, "event script")?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for event in &events {
        stage.handle(event, &geometry);
        write_frame(&mut out, &stage.snapshot(&geometry))?;
    }
    out.flush().context("flush stdout")?;
    Ok(())
}
