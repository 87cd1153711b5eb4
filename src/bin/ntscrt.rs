use std::{
    io::{BufRead as _, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ntscrt", version, about = "NTSC/CRT television emulation")]
struct Cli {
    /// Log pipeline activity at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one still image (full colour, interlaced, field 0 unless flags say otherwise).
    Convert(ConvertArgs),
    /// Process a numbered image sequence into numbered output frames.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Monochrome output.
    #[arg(short = 'm', long)]
    mono: bool,

    /// Do not prompt when overwriting the output file.
    #[arg(short = 'o', long)]
    no_prompt: bool,

    /// Start on the odd field (only meaningful in progressive mode).
    #[arg(short = 'f', long)]
    odd_field: bool,

    /// Progressive scan rather than interlaced.
    #[arg(short = 'p', long)]
    progressive: bool,

    /// Raw image (needed for images that rely on artifact colors).
    #[arg(short = 'r', long)]
    raw: bool,

    /// Optional JSON config supplying picture controls and engine settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output width in pixels.
    out_width: u32,

    /// Output height in pixels.
    out_height: u32,

    /// Noise amplitude; negative values are treated as 0.
    #[arg(allow_negative_numbers = true)]
    noise: i32,

    /// Colorburst phase offset 0-3; each step is a 90 degree color phase change.
    #[arg(allow_negative_numbers = true)]
    phase_offset: i32,

    /// Input image (PPM or any format the image crate decodes).
    input: PathBuf,

    /// Output image; format follows the extension.
    output: PathBuf,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Input file pattern with a `{}` or `{:0N}` placeholder for the frame index.
    #[arg(long)]
    frames: String,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Output file name prefix.
    #[arg(long, default_value = "crt_")]
    prefix: String,

    /// Output file extension.
    #[arg(long, default_value = "png")]
    ext: String,

    /// Zero-pad output indices to this many digits.
    #[arg(long, default_value_t = 5)]
    pad: usize,

    /// First frame index (1-based).
    #[arg(long, default_value_t = 1)]
    start: u64,

    /// Number of ticks to run; with no pauses this is the number of frames written.
    #[arg(long)]
    count: u64,

    /// Output width in pixels (overrides config).
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels (overrides config).
    #[arg(long)]
    height: Option<u32>,

    /// Noise amplitude (overrides config).
    #[arg(long)]
    noise: Option<i32>,

    /// Interlaced rather than progressive.
    #[arg(long)]
    interlaced: bool,

    /// RGBA image burned into early frames.
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Overlay placement, x.
    #[arg(long, default_value_t = 0)]
    overlay_x: u32,

    /// Overlay placement, y.
    #[arg(long, default_value_t = 0)]
    overlay_y: u32,

    /// Overlay frames with index below this value.
    #[arg(long)]
    overlay_until: Option<u64>,

    /// JSON list of `{ "tick": N, "commands": [...] }` control commands.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Optional JSON config.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ntscrt::CrtConfig> {
    Ok(match path {
        Some(p) => ntscrt::CrtConfig::from_path(p)?,
        None => ntscrt::CrtConfig::default(),
    })
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    cfg.output.width = args.out_width;
    cfg.output.height = args.out_height;
    cfg.tuning.noise = args.noise.max(0);
    cfg.phase_offset = args.phase_offset & 3;
    cfg.flags = ntscrt::SignalFlags {
        color: !args.mono,
        field: args.odd_field,
        progressive: args.progressive,
        raw: args.raw,
    };
    cfg.validate()?;

    let source = ntscrt::load_image(&args.input)?;

    if !args.no_prompt && args.output.exists() && !confirm_overwrite(&args.output)? {
        anyhow::bail!("not overwriting '{}'", args.output.display());
    }

    let mut session = ntscrt::CrtSession::with_raster_engine(&cfg)?;
    session.set_source(source);
    tracing::info!("converting to {}x{}", cfg.output.width, cfg.output.height);
    session.converge()?;
    ntscrt::write_framebuffer(&args.output, session.framebuffer())?;

    eprintln!("wrote {}", args.output.display());
    Ok(())
}

fn confirm_overwrite(path: &Path) -> anyhow::Result<bool> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!(
            "\n--- file ({}) already exists, overwrite? (y/n)\n",
            path.display()
        );
        std::io::stdout().flush().context("flush prompt")?;
        let Some(line) = lines.next() else {
            return Ok(false);
        };
        match line.context("read answer")?.trim() {
            "y" | "Y" => return Ok(true),
            "n" | "N" => return Ok(false),
            _ => {}
        }
    }
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(w) = args.width {
        cfg.output.width = w;
    }
    if let Some(h) = args.height {
        cfg.output.height = h;
    }
    if let Some(n) = args.noise {
        cfg.tuning.noise = n.max(0);
    }
    if args.interlaced {
        cfg.flags.progressive = false;
    }
    if let Some(until) = args.overlay_until {
        cfg.capture.overlay_until = until;
    }
    cfg.controls.initial_frame = args.start;
    cfg.validate()?;

    let pattern = ntscrt::SequencePattern::parse(&args.frames)?;
    let sink = ntscrt::ImageSequenceSink::new(&args.out_dir, args.prefix.as_str())
        .with_extension(args.ext.as_str())
        .with_padding(args.pad);
    let mut capture =
        ntscrt::CaptureSequencer::new(ntscrt::FileSequence::new(pattern), sink, cfg.capture);
    if let Some(path) = &args.overlay {
        let overlay = ntscrt::ImageOverlay::from_path(path, args.overlay_x, args.overlay_y)?;
        capture = capture.with_overlay(Box::new(overlay));
    }

    let script = match &args.script {
        Some(p) => ntscrt::ScriptedPresenter::script_from_path(p)?,
        None => Vec::new(),
    };
    let mut presenter = ntscrt::ScriptedPresenter::new(args.count).with_script(script);

    let mut session = ntscrt::CrtSession::with_raster_engine(&cfg)?;
    session.controls_mut().enable_playback(true);

    let stats = ntscrt::run_capture_loop(&mut session, &mut presenter, &mut capture)?;
    eprintln!(
        "wrote {} frames to {} ({} ticks)",
        stats.captured,
        args.out_dir.display(),
        stats.ticks
    );
    Ok(())
}
