//! pfield frame exporter
//!
//! Runs the particle field headless and writes each frame as a PNG.
//!
//! Usage: `pfield [--config FILE] [--width W] [--height H] [--frames N] [--dark] [--seed S] [--out DIR]`

use pfield::prelude::*;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

struct Args {
    config: Option<PathBuf>,
    width: i32,
    height: i32,
    frames: u32,
    dark: bool,
    seed: Option<u64>,
    out: PathBuf,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config: None,
            width: 800,
            height: 600,
            frames: 60,
            dark: false,
            seed: None,
            out: PathBuf::from("frames"),
        }
    }
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .ok_or_else(|| format!("{} expects a value", name))
        };
        match flag.as_str() {
            "--config" => args.config = Some(PathBuf::from(value("--config")?)),
            "--width" => args.width = parse(&value("--width")?, "--width")?,
            "--height" => args.height = parse(&value("--height")?, "--height")?,
            "--frames" => args.frames = parse(&value("--frames")?, "--frames")?,
            "--seed" => args.seed = Some(parse(&value("--seed")?, "--seed")?),
            "--out" => args.out = PathBuf::from(value("--out")?),
            "--dark" => args.dark = true,
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(args)
}

fn parse<T: std::str::FromStr>(s: &str, name: &str) -> Result<T, String> {
    s.parse()
        .map_err(|_| format!("invalid value for {}: {}", name, s))
}

fn run(args: Args) -> Result<(), FieldError> {
    let config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            FieldConfig::load(path)?
        }
        None => FieldConfig::default(),
    };

    let mut sim = Simulation::with_config(config);
    if let Some(seed) = args.seed {
        sim = sim.with_seed(seed);
    }
    sim.initialize(args.width, args.height, args.dark);
    info!(
        particles = sim.len(),
        width = args.width,
        height = args.height,
        "simulation ready"
    );

    let background = if args.dark {
        Vec3::new(0.04, 0.04, 0.07)
    } else {
        Vec3::new(0.98, 0.98, 1.0)
    };
    let mut canvas = RasterSurface::new(args.width.max(0) as u32, args.height.max(0) as u32)
        .with_background(background);

    std::fs::create_dir_all(&args.out)?;
    for frame in 0..args.frames {
        sim.step(&mut canvas);
        let path = args.out.join(format!("frame_{:05}.png", frame));
        canvas.save_png(&path)?;
    }

    info!(frames = args.frames, out = %args.out.display(), "done");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            error!("{}", msg);
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
