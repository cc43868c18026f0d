#![deny(unsafe_code)]
//! CLI binary for the stroll pan controller.
//!
//! Subcommands:
//! - `run [strategy]`: drive a controller for N ticks, print the frames and
//!   optionally write a PNG trace of the viewport path
//! - `list`: print available strategies and their parameter schemas

mod error;
mod logging;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use stroll_core::{
    BoundingBox, Dimensions, EntropySource, MotionController, MotionState, MotionStrategy,
    RandomSource, ScheduledUpdate, Session, Xorshift64,
};
use stroll_strategies::path::rescale_view;
use stroll_strategies::StrategyKind;
use tracing::{debug, info};

const DEFAULT_VIEWPORT: Dimensions = Dimensions {
    width: 1280.0,
    height: 720.0,
};
const DEFAULT_IMAGE: Dimensions = Dimensions {
    width: 3840.0,
    height: 2160.0,
};

#[derive(Parser)]
#[command(name = "stroll", about = "Ken Burns pan controller CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log debug events to stderr (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Drive a strategy for N ticks and print the resulting frames.
    Run(RunArgs),
    /// List available strategies and their parameters.
    List,
}

#[derive(Args)]
struct RunArgs {
    /// Strategy name (e.g. "sweep"). Overrides the one in --config.
    strategy: Option<String>,

    /// Session file (JSON). Flags given alongside override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Viewport size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_dimensions)]
    viewport: Option<Dimensions>,

    /// Original image size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_dimensions)]
    image: Option<Dimensions>,

    /// Zoom level (clamped to at least 1).
    #[arg(short, long)]
    zoom: Option<f64>,

    /// Speed in viewport widths per second. May be negative.
    #[arg(short, long, allow_negative_numbers = true)]
    speed: Option<f64>,

    /// Number of ticks to run.
    #[arg(short = 'n', long)]
    ticks: Option<usize>,

    /// Seconds per tick.
    #[arg(long)]
    dt: Option<f64>,

    /// PRNG seed for a reproducible run. Without it, OS entropy is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Strategy parameters as a JSON string.
    #[arg(long)]
    params: Option<String>,

    /// Settings script: JSON array of {"tick": n, "update": {...}} entries.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print only every Nth frame.
    #[arg(long, default_value_t = 1)]
    every: usize,

    /// Write a PNG trace of the viewport path to this file.
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Longer side of the trace image in pixels.
    #[arg(long, default_value_t = 512)]
    trace_size: usize,
}

/// Parses `WIDTHxHEIGHT`, e.g. `1920x1080`.
fn parse_dimensions(s: &str) -> Result<Dimensions, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width = w
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad width '{w}': {e}"))?;
    let height = h
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok(Dimensions::new(width, height))
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))
}

/// Merges the config file (if any) with the command-line overrides.
fn build_session(args: &RunArgs) -> Result<Session, CliError> {
    let mut session = match &args.config {
        Some(path) => serde_json::from_str::<Session>(&read_file(path)?).map_err(|e| {
            CliError::Input(format!("invalid session file {}: {e}", path.display()))
        })?,
        None => {
            let strategy = args.strategy.as_deref().ok_or_else(|| {
                CliError::Input("no strategy given (pass a name or --config)".into())
            })?;
            Session::new(strategy, DEFAULT_VIEWPORT, DEFAULT_IMAGE)
        }
    };

    if let Some(strategy) = &args.strategy {
        session.strategy = strategy.clone();
    }
    if let Some(viewport) = args.viewport {
        session.viewport = viewport;
    }
    if let Some(image) = args.image {
        session.image = image;
    }
    if let Some(zoom) = args.zoom {
        session.zoom = zoom;
    }
    if let Some(speed) = args.speed {
        session.speed = speed;
    }
    if let Some(ticks) = args.ticks {
        session.ticks = ticks;
    }
    if let Some(dt) = args.dt {
        session.dt = dt;
    }
    if args.seed.is_some() {
        session.seed = args.seed;
    }
    if let Some(params) = &args.params {
        session.params = serde_json::from_str(params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    }
    if let Some(path) = &args.script {
        let entries: Vec<ScheduledUpdate> = serde_json::from_str(&read_file(path)?)
            .map_err(|e| CliError::Input(format!("invalid script {}: {e}", path.display())))?;
        session.script.extend(entries);
    }

    session.validate()?;
    Ok(session)
}

fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(Xorshift64::new(seed)),
        None => Box::new(EntropySource::new()),
    }
}

/// Output of a headless run.
struct Run {
    frames: Vec<Value>,
    /// Visible region after every tick, in original image coordinates,
    /// starting with the initial view, paired with the image size it was
    /// measured against.
    views: Vec<(Dimensions, BoundingBox)>,
    /// Image size at the end of the run.
    image: Dimensions,
}

impl Run {
    /// All views mapped onto the final image, so a scripted image swap does
    /// not distort earlier parts of the path.
    fn trace_views(&self) -> Vec<BoundingBox> {
        self.views
            .iter()
            .map(|&(image, view)| rescale_view(view, image, self.image))
            .collect()
    }
}

fn state_name(state: MotionState) -> &'static str {
    match state {
        MotionState::Idle => "idle",
        MotionState::Cruising => "cruising",
    }
}

fn frame(tick: usize, controller: &MotionController<StrategyKind>) -> Value {
    let p = controller.position();
    let h = controller.strategy().heading();
    let v = controller.viewport_in_original_image_scale();
    json!({
        "tick": tick,
        "x": p.x,
        "y": p.y,
        "heading": [h.x, h.y],
        "state": state_name(controller.motion_state()),
        "view": {"x": v.x, "y": v.y, "width": v.width, "height": v.height},
    })
}

/// Ticks a controller through the session, applying scripted updates just
/// before their tick runs.
fn simulate(session: &Session, every: usize) -> Result<Run, CliError> {
    let strategy = StrategyKind::from_name(
        &session.strategy,
        &session.params,
        random_source(session.seed),
    )?;
    let mut controller = MotionController::new(
        session.viewport,
        session.image,
        session.zoom,
        session.speed,
        strategy,
    );
    info!(
        strategy = %session.strategy,
        ticks = session.ticks,
        pannable = controller.is_pannable(),
        "run started"
    );

    let every = every.max(1);
    let mut frames = Vec::with_capacity(session.ticks / every);
    let mut views = Vec::with_capacity(session.ticks + 1);
    views.push((
        controller.original_image_size(),
        controller.viewport_in_original_image_scale(),
    ));

    for tick in 0..session.ticks {
        for update in session.updates_at(tick) {
            let change = controller.update_settings(*update);
            debug!(
                tick,
                scene_changed = change.scene_changed,
                viewport_changed = change.viewport_changed,
                "script update applied"
            );
        }
        controller.tick(session.dt);
        views.push((
            controller.original_image_size(),
            controller.viewport_in_original_image_scale(),
        ));
        if (tick + 1) % every == 0 {
            frames.push(frame(tick + 1, &controller));
        }
    }

    Ok(Run {
        frames,
        views,
        image: controller.original_image_size(),
    })
}

fn list(json_mode: bool) -> Result<(), CliError> {
    let mut entries = Vec::new();
    for name in StrategyKind::list_strategies() {
        let strategy = StrategyKind::from_name(name, &json!({}), Box::new(Xorshift64::new(0)))?;
        entries.push((*name, strategy.param_schema()));
    }

    if json_mode {
        let info: Vec<Value> = entries
            .iter()
            .map(|(name, schema)| json!({"name": name, "params": schema}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&json!({ "strategies": info }))?);
    } else {
        println!("Strategies:");
        for (name, schema) in &entries {
            println!("  {name}");
            if let Some(params) = schema.as_object() {
                for (key, spec) in params {
                    println!(
                        "    {key} ({}, default {}): {}",
                        spec["type"].as_str().unwrap_or("?"),
                        spec["default"],
                        spec["description"].as_str().unwrap_or(""),
                    );
                }
            }
        }
    }
    Ok(())
}

fn run_command(args: RunArgs, json_mode: bool) -> Result<(), CliError> {
    let session = build_session(&args)?;
    let run = simulate(&session, args.every)?;

    if let Some(path) = &args.trace {
        stroll_strategies::trace::write_trace_png(
            run.image,
            &run.trace_views(),
            args.trace_size,
            path,
        )?;
        info!(path = %path.display(), "trace written");
    }

    if json_mode {
        let out = json!({
            "strategy": session.strategy,
            "seed": session.seed,
            "ticks": session.ticks,
            "dt": session.dt,
            "params": session.params,
            "frames": run.frames,
            "trace": args.trace.as_ref().map(|p| p.display().to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{:>6} {:>12} {:>12}  state", "tick", "x", "y");
        for f in &run.frames {
            println!(
                "{:>6} {:>12.3} {:>12.3}  {}",
                f["tick"],
                f["x"].as_f64().unwrap_or_default(),
                f["y"].as_f64().unwrap_or_default(),
                f["state"].as_str().unwrap_or_default(),
            );
        }
        eprintln!(
            "ran {} for {} ticks ({} frames printed)",
            session.strategy,
            session.ticks,
            run.frames.len()
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => list(cli.json),
        Command::Run(args) => run_command(args, cli.json),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
