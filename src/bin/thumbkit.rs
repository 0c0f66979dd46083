use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "thumbkit", version)]
struct Cli {
    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch thumbnails for every URL in a list and write branded PNGs.
    Batch(BatchArgs),
    /// Compose a single local image into a branded PNG (no network).
    Compose(ComposeArgs),
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Newline-delimited list of video URLs.
    #[arg(long)]
    urls: PathBuf,

    /// Output directory. Cleared before the run.
    #[arg(long, default_value = "thumbnails")]
    out: PathBuf,

    /// JSON pipeline config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shrink factor applied to the trimmed thumbnail, in (0, 1].
    #[arg(long)]
    ratio: Option<f64>,

    /// Flat overlay color (`#RRGGBBAA` or `r,g,b,a`), also the fallback for overlay images.
    #[arg(long)]
    overlay_color: Option<String>,

    /// URLs processed concurrently.
    #[arg(long)]
    jobs: Option<usize>,

    /// Output variant as `LABEL=OVERLAY_PATH`, or just `LABEL` for the flat color. Repeatable.
    #[arg(long = "variant")]
    variants: Vec<String>,
}

#[derive(Args, Debug)]
struct ComposeArgs {
    /// Source image file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Shrink factor applied to the trimmed image, in (0, 1].
    #[arg(long, default_value_t = 0.9)]
    ratio: f64,

    /// Overlay image stretched over the canvas.
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Flat overlay color (`#RRGGBBAA` or `r,g,b,a`).
    #[arg(long, default_value = "0,0,0,100")]
    overlay_color: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);
    match cli.cmd {
        Command::Batch(args) => cmd_batch(args),
        Command::Compose(args) => cmd_compose(args),
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}

fn parse_variant(s: &str) -> thumbkit::Variant {
    match s.split_once('=') {
        Some((label, path)) => thumbkit::Variant {
            overlay_image: Some(PathBuf::from(path.trim())),
            label: label.trim().to_string(),
        },
        None => thumbkit::Variant {
            overlay_image: None,
            label: s.trim().to_string(),
        },
    }
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => thumbkit::PipelineConfig::from_json_file(path)?,
        None => thumbkit::PipelineConfig::default(),
    };
    if let Some(ratio) = args.ratio {
        config.resize_ratio = ratio;
    }
    if let Some(color) = &args.overlay_color {
        config.overlay_color = thumbkit::Rgba8::parse(color)?;
    }
    if let Some(jobs) = args.jobs {
        config.jobs = jobs;
    }
    if !args.variants.is_empty() {
        config.variants = args.variants.iter().map(|v| parse_variant(v)).collect();
    }

    let source = thumbkit::HttpSource::new(config.timeout())?;
    let runner = thumbkit::BatchRunner::new(source, config)?;
    let report = runner.run(&args.urls, &args.out)?;

    for item in &report.skipped {
        eprintln!("skipped {}: {}", item.url, item.reason);
    }
    eprintln!(
        "wrote {} file(s) to {} ({} skipped)",
        report.written.len(),
        args.out.display(),
        report.skipped.len()
    );
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let color = thumbkit::Rgba8::parse(&args.overlay_color)?;
    let source = image::open(&args.in_path)
        .with_context(|| format!("open source image '{}'", args.in_path.display()))?;

    let engine = thumbkit::CompositionEngine::default();
    let overlay = thumbkit::OverlayRequest::from_parts(args.overlay.as_deref(), color);
    let out = engine.process_thumbnail(&source, args.ratio, &overlay)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    thumbkit::save_png(&out, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
