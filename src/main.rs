use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use poisson_kernel::config::{DEFAULT_ATTEMPTS, DEFAULT_OVERSAMPLING, DEFAULT_SEED, DEFAULT_TAPS};
use poisson_kernel::{generate, wgsl, Domain, PoissonConfig, Raster, Strategy};
use rand_core::{OsRng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "poisson-kernel")]
#[command(about = "Generate Poisson-disk (blue-noise) point sets")]
struct Cli {
    /// Log filter, e.g. `info` or `poisson_kernel=debug`
    #[arg(long, env = "POISSON_LOG", default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fixed-count kernel inside the unit disk, printed as a WGSL array
    Kernel(KernelArgs),
    /// Fill a rectangle until no point has room for a neighbor
    Fill(FillArgs),
}

#[derive(Args, Debug)]
struct SeedArgs {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Draw the seed from the operating system instead
    #[arg(long, conflicts_with = "seed")]
    entropy: bool,
}

impl SeedArgs {
    fn resolve(&self, default: u64) -> u64 {
        if self.entropy {
            let seed = OsRng.next_u64();
            info!(seed, "seeded from entropy");
            seed
        } else {
            self.seed.unwrap_or(default)
        }
    }
}

#[derive(Args, Debug)]
struct KernelArgs {
    /// Number of Poisson samples
    #[arg(short = 'n', long, default_value_t = DEFAULT_TAPS)]
    taps: usize,

    /// Minimum separation, 0 < rmin < 1 (defaults to sqrt(1 / taps))
    #[arg(long)]
    rmin: Option<f64>,

    /// Candidates per active point
    #[arg(long, default_value_t = DEFAULT_ATTEMPTS)]
    k: u32,

    #[command(flatten)]
    seed: SeedArgs,

    /// Use the background grid instead of a linear scan
    #[arg(long)]
    grid: bool,

    /// Name of the WGSL constant
    #[arg(long, default_value = "poisson")]
    name: String,
}

#[derive(Args, Debug)]
struct FillArgs {
    #[arg(long, default_value_t = 1.0)]
    width: f64,

    #[arg(long, default_value_t = 1.0)]
    height: f64,

    /// Expected point count used to derive the separation
    #[arg(long, default_value_t = 1000)]
    density: usize,

    /// Minimum separation (overrides --density)
    #[arg(long)]
    rmin: Option<f64>,

    #[arg(long, default_value_t = DEFAULT_OVERSAMPLING)]
    oversampling: f64,

    /// Candidates per active point
    #[arg(long, default_value_t = DEFAULT_ATTEMPTS)]
    k: u32,

    #[command(flatten)]
    seed: SeedArgs,

    /// Use a linear scan instead of the background grid
    #[arg(long)]
    brute_force: bool,

    /// Write uniform random points beside the Poisson-disk set to this PNG
    #[arg(long)]
    png: Option<PathBuf>,

    /// Side of each PNG panel in pixels
    #[arg(long, default_value_t = 512)]
    size: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Kernel(args) => run_kernel(args),
        Command::Fill(args) => run_fill(args),
    }
}

fn run_kernel(args: KernelArgs) -> anyhow::Result<()> {
    let config = PoissonConfig {
        count: args.taps,
        min_distance: args.rmin,
        attempts: args.k,
        seed: args.seed.resolve(DEFAULT_SEED),
        strategy: if args.grid {
            Strategy::Grid
        } else {
            Strategy::BruteForce
        },
        ..PoissonConfig::default()
    };

    let taps = generate(&config)?;
    info!(taps = taps.len(), seed = config.seed, "kernel generated");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    wgsl::write_array(&mut out, &args.name, &taps).context("writing WGSL array")?;
    Ok(())
}

fn run_fill(args: FillArgs) -> anyhow::Result<()> {
    let mut config = PoissonConfig::fill(Domain::rectangle(args.width, args.height), args.density);
    config.min_distance = args.rmin;
    config.oversampling = args.oversampling;
    config.attempts = args.k;
    config.seed = args.seed.resolve(config.seed);
    if args.brute_force {
        config.strategy = Strategy::BruteForce;
    }

    let points = generate(&config)?;
    info!(
        points = points.len(),
        r_min = config.resolved_min_distance(),
        seed = config.seed,
        "domain filled"
    );

    {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        for p in &points {
            writeln!(out, "{:.6} {:.6}", p.x, p.y)?;
        }
        out.flush()?;
    }

    if let Some(path) = &args.png {
        // same number of purely uniform points for comparison
        let mut rng = Xoshiro256Plus::seed_from_u64(config.seed);
        let random = config.domain.scatter(points.len(), &mut rng);
        write_comparison(path, &config.domain, &random, &points, args.size)?;
        info!(path = %path.display(), "comparison plot written");
    }

    Ok(())
}

fn write_comparison(
    path: &Path,
    domain: &Domain,
    random: &[poisson_kernel::Point2D],
    poisson: &[poisson_kernel::Point2D],
    size: usize,
) -> anyhow::Result<()> {
    let bounds = domain.bounds();
    let (min, max) = bounds;
    let aspect = (max.y - min.y) / (max.x - min.x);
    let panel_height = ((size as f64 * aspect).round() as usize).max(1);

    let mut left = Raster::new(size, panel_height);
    left.plot(random, bounds);
    let mut right = Raster::new(size, panel_height);
    right.plot(poisson, bounds);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    left.beside(&right)
        .write_png(BufWriter::new(file))
        .with_context(|| format!("encoding {}", path.display()))?;
    Ok(())
}
