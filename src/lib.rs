//! Blue-noise point sets by Bridson's Poisson-disk sampling.
//!
//! [`generate`] grows a set of points inside a [`Domain`] where no two points
//! are closer than a minimum separation. In [`Mode::FixedCount`] it stops at
//! the requested count; kernels over the unit disk are then rescaled so the
//! outermost tap touches the unit circle. In [`Mode::Fill`] it keeps going
//! until no accepted point has room for a neighbor.
//!
//! ```no_run
//! use poisson_kernel::{generate, PoissonConfig};
//!
//! let taps = generate(&PoissonConfig::kernel(16)).unwrap();
//! print!("{}", poisson_kernel::wgsl::to_string("poisson", &taps));
//! ```

pub mod candidate;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod oracle;
pub mod point;
pub mod random;
pub mod raster;
pub mod wgsl;

pub use config::{Mode, PoissonConfig};
pub use domain::Domain;
pub use engine::Bridson;
pub use error::{PoissonError, ValidationError};
pub use oracle::{BruteForce, SeparationOracle, SpatialGrid, Strategy};
pub use point::Point2D;
pub use raster::Raster;

use normalize::normalize;
use rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;
use tracing::debug;

/// Run the sampler with a generator seeded from `config.seed`.
pub fn generate(config: &PoissonConfig) -> Result<Vec<Point2D>, PoissonError> {
    let mut rng = Xoshiro256Plus::seed_from_u64(config.seed);
    generate_with_rng(config, &mut rng)
}

/// Run the sampler on a caller-owned generator. `config.seed` is ignored.
pub fn generate_with_rng<R: RngCore + ?Sized>(
    config: &PoissonConfig,
    rng: &mut R,
) -> Result<Vec<Point2D>, PoissonError> {
    config.validate()?;

    let r_min = config.resolved_min_distance();
    let limit = config.count_limit();

    debug!(
        count = config.count,
        r_min,
        attempts = config.attempts,
        domain = ?config.domain,
        mode = ?config.mode,
        strategy = ?config.strategy,
        "generating poisson-disk samples"
    );

    let mut points = match config.strategy {
        Strategy::BruteForce => {
            let oracle = BruteForce::new(r_min);
            Bridson::new(config.domain, r_min, config.attempts, limit, oracle, rng).run()?
        }
        Strategy::Grid => {
            let oracle = SpatialGrid::new(&config.domain, r_min)?;
            Bridson::new(config.domain, r_min, config.attempts, limit, oracle, rng).run()?
        }
    };

    if config.normalizes() {
        let scale = normalize(&mut points)?;
        debug!(scale, "normalized to unit disk");
    }

    Ok(points)
}
