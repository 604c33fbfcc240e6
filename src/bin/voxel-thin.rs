//! voxel-thin - generate, thin and compare raw binary volumes
//!
//! Provides subcommands for:
//! - `gen-line`, `gen-box`, `gen-cross`, `gen-loop`, `gen-torus`: write synthetic volumes
//! - `thin`: skeletonize a raw volume
//! - `diff`: count differing voxels between two raw volumes
//!
//! Every command takes the volume dimensions `D H W` explicitly; raw files carry
//! no header. Log verbosity follows `RUST_LOG` (default `info`).

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use voxel_thinning::{generate, io, Thinner, ThinningConfig, ThinningStats, Volume};

#[derive(Parser, Debug)]
#[command(name = "voxel-thin")]
#[command(about = "Topology-preserving thinning of raw binary volumes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a straight segment along x
    #[command(name = "gen-line", allow_negative_numbers = true)]
    GenLine(GenLineArgs),
    /// Write a filled box
    #[command(name = "gen-box", allow_negative_numbers = true)]
    GenBox(GenBoxArgs),
    /// Write three orthogonal 1-voxel arms through a center
    #[command(name = "gen-cross", allow_negative_numbers = true)]
    GenCross(GenCrossArgs),
    /// Write a 1-voxel-thick square frame in one z plane
    #[command(name = "gen-loop", allow_negative_numbers = true)]
    GenLoop(GenLoopArgs),
    /// Write a solid torus around the z axis
    #[command(name = "gen-torus", allow_negative_numbers = true)]
    GenTorus(GenTorusArgs),
    /// Thin a raw volume to its skeleton
    Thin(ThinArgs),
    /// Count voxels that differ between two raw volumes
    Diff(DiffArgs),
}

/// Volume dimensions, z slowest.
#[derive(Args, Debug, Clone, Copy)]
struct Dims {
    /// Depth (z)
    depth: usize,
    /// Height (y)
    height: usize,
    /// Width (x)
    width: usize,
}

#[derive(Args, Debug)]
struct GenLineArgs {
    #[command(flatten)]
    dims: Dims,
    z: isize,
    y: isize,
    x0: isize,
    x1: isize,
    /// Output raw file
    output: PathBuf,
}

#[derive(Args, Debug)]
struct GenBoxArgs {
    #[command(flatten)]
    dims: Dims,
    z0: isize,
    z1: isize,
    y0: isize,
    y1: isize,
    x0: isize,
    x1: isize,
    /// Output raw file
    output: PathBuf,
}

#[derive(Args, Debug)]
struct GenCrossArgs {
    #[command(flatten)]
    dims: Dims,
    cz: isize,
    cy: isize,
    cx: isize,
    /// Arm half-length
    arm: isize,
    /// Output raw file
    output: PathBuf,
}

#[derive(Args, Debug)]
struct GenLoopArgs {
    #[command(flatten)]
    dims: Dims,
    z: isize,
    y0: isize,
    y1: isize,
    x0: isize,
    x1: isize,
    /// Output raw file
    output: PathBuf,
}

#[derive(Args, Debug)]
struct GenTorusArgs {
    #[command(flatten)]
    dims: Dims,
    cz: isize,
    cy: isize,
    cx: isize,
    /// Major radius (center to tube center)
    major: f64,
    /// Minor radius (tube)
    minor: f64,
    /// Output raw file
    output: PathBuf,
}

#[derive(Args, Debug)]
struct ThinArgs {
    #[command(flatten)]
    dims: Dims,
    /// Input raw file
    input: PathBuf,
    /// Output raw file
    output: PathBuf,

    /// Print per-phase counters and timings
    #[arg(long)]
    profile: bool,

    /// Collect-phase worker threads (1 = calling thread, 0 = one per core)
    #[arg(long, default_value = "1")]
    threads: usize,
}

#[derive(Args, Debug)]
struct DiffArgs {
    #[command(flatten)]
    dims: Dims,
    a: PathBuf,
    b: PathBuf,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::GenLine(args) => {
            let Dims { depth, height, width } = args.dims;
            let vol = generate::line_x(depth, height, width, args.z, args.y, args.x0, args.x1)?;
            write_generated(&args.output, &vol)
        }
        Commands::GenBox(args) => {
            let Dims { depth, height, width } = args.dims;
            let vol = generate::solid_box(
                depth, height, width, args.z0, args.z1, args.y0, args.y1, args.x0, args.x1,
            )?;
            write_generated(&args.output, &vol)
        }
        Commands::GenCross(args) => {
            let Dims { depth, height, width } = args.dims;
            let vol = generate::cross(depth, height, width, args.cz, args.cy, args.cx, args.arm)?;
            write_generated(&args.output, &vol)
        }
        Commands::GenLoop(args) => {
            let Dims { depth, height, width } = args.dims;
            let vol = generate::square_loop_xy(
                depth, height, width, args.z, args.y0, args.y1, args.x0, args.x1,
            )?;
            write_generated(&args.output, &vol)
        }
        Commands::GenTorus(args) => {
            let Dims { depth, height, width } = args.dims;
            let vol = generate::torus(
                depth, height, width, args.cz, args.cy, args.cx, args.major, args.minor,
            )?;
            write_generated(&args.output, &vol)
        }
        Commands::Thin(args) => run_thin(&args),
        Commands::Diff(args) => run_diff(&args),
    }
}

/// Logs go to stderr so command output stays clean on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);
    Registry::default().with(filter).with(fmt_layer).init();
}

fn write_generated(path: &Path, vol: &Volume) -> Result<()> {
    io::write_raw(path, vol).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {} ones={}", path.display(), vol.count_foreground());
    Ok(())
}

fn read_volume(path: &Path, dims: Dims) -> Result<Volume> {
    io::read_raw(path, dims.depth, dims.height, dims.width)
        .with_context(|| format!("Failed to read {}", path.display()))
}

fn run_thin(args: &ThinArgs) -> Result<()> {
    let vol = read_volume(&args.input, args.dims)?;

    let thinner = Thinner::new(ThinningConfig::with_threads(args.threads))
        .context("Failed to build worker pool")?;

    let mut stats = ThinningStats::default();
    let out = if args.profile {
        thinner.thin_volume_observed(&vol, &mut stats)?
    } else {
        thinner.thin_volume(&vol)?
    };

    io::write_raw(&args.output, &out)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Thinned {} -> {} ones {} -> {}",
        args.input.display(),
        args.output.display(),
        vol.count_foreground(),
        out.count_foreground()
    );
    if args.profile {
        println!("---- profile ----");
        println!("{stats}");
    }
    Ok(())
}

fn run_diff(args: &DiffArgs) -> Result<()> {
    let a = read_volume(&args.a, args.dims)?;
    let b = read_volume(&args.b, args.dims)?;

    let diff = a.diff_count(&b)?;
    println!("Diff voxels: {} / {}", diff, a.len());
    Ok(())
}
