use crate::domain::Domain;
use crate::error::ValidationError;
use crate::oracle::{SpatialGrid, Strategy};
use std::f64::consts::PI;

pub const DEFAULT_ATTEMPTS: u32 = 30;
pub const DEFAULT_OVERSAMPLING: f64 = 1.1;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TAPS: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// Stop at exactly `count` samples, or fail if the active list runs dry.
    #[default]
    FixedCount,
    /// Grow until the active list is empty. `count` only sets the density.
    Fill,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PoissonConfig {
    pub count: usize,
    pub min_distance: Option<f64>,
    pub attempts: u32,
    pub seed: u64,
    pub domain: Domain,
    pub mode: Mode,
    pub strategy: Strategy,
    pub oversampling: f64,
}

impl Default for PoissonConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_TAPS,
            min_distance: None,
            attempts: DEFAULT_ATTEMPTS,
            seed: DEFAULT_SEED,
            domain: Domain::UnitDisk,
            mode: Mode::FixedCount,
            strategy: Strategy::BruteForce,
            oversampling: DEFAULT_OVERSAMPLING,
        }
    }
}

impl PoissonConfig {
    /// Fixed-count kernel of `taps` points inside the unit disk.
    pub fn kernel(taps: usize) -> Self {
        Self {
            count: taps,
            ..Self::default()
        }
    }

    /// Fill `domain` at a spacing derived from `density` expected points.
    pub fn fill(domain: Domain, density: usize) -> Self {
        Self {
            count: density,
            seed: 0,
            domain,
            mode: Mode::Fill,
            strategy: Strategy::Grid,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::ZeroCount);
        }

        if self.attempts == 0 {
            return Err(ValidationError::ZeroAttempts);
        }

        if let Domain::Rectangle { width, height } = self.domain {
            let valid = |side: f64| side.is_finite() && side > 0.0;
            if !valid(width) || !valid(height) {
                return Err(ValidationError::Extent { width, height });
            }
        }

        if !(self.oversampling.is_finite() && self.oversampling > 0.0) {
            return Err(ValidationError::Oversampling(self.oversampling));
        }

        if let Some(value) = self.min_distance {
            let limit = self.separation_limit();
            // written so NaN fails too
            if !(value > 0.0 && value < limit) {
                return Err(ValidationError::Separation { value, limit });
            }
        }

        if self.strategy == Strategy::Grid {
            SpatialGrid::dimensions_for(&self.domain, self.resolved_min_distance())?;
        }

        Ok(())
    }

    /// Explicit `min_distance`, or the equal-area spacing for `count` points.
    pub fn resolved_min_distance(&self) -> f64 {
        if let Some(r_min) = self.min_distance {
            return r_min;
        }

        let n = self.count as f64;
        let spacing = match self.domain {
            Domain::UnitDisk => (1.0 / n).sqrt(),
            Domain::Rectangle { .. } => (self.domain.area() / (n * PI)).sqrt(),
        };

        match self.mode {
            Mode::FixedCount => spacing,
            Mode::Fill => spacing * self.oversampling,
        }
    }

    /// Upper bound (exclusive) for an explicit minimum separation.
    pub fn separation_limit(&self) -> f64 {
        match self.domain {
            Domain::UnitDisk => 1.0,
            Domain::Rectangle { width, height } => width.min(height),
        }
    }

    /// Sample count the engine stops at, if any.
    pub fn count_limit(&self) -> Option<usize> {
        match self.mode {
            Mode::FixedCount => Some(self.count),
            Mode::Fill => None,
        }
    }

    pub fn normalizes(&self) -> bool {
        self.mode == Mode::FixedCount && self.domain == Domain::UnitDisk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_twelve_tap_kernel() {
        let config = PoissonConfig::default();
        assert_eq!(config.count, 12);
        assert_eq!(config.attempts, 30);
        assert_eq!(config.seed, 42);
        assert!(config.validate().is_ok());
        assert!(config.normalizes());
    }

    #[test]
    fn rejects_zero_count_and_attempts() {
        assert_eq!(
            PoissonConfig::kernel(0).validate(),
            Err(ValidationError::ZeroCount)
        );

        let config = PoissonConfig {
            attempts: 0,
            ..PoissonConfig::kernel(8)
        };
        assert_eq!(config.validate(), Err(ValidationError::ZeroAttempts));
    }

    #[test]
    fn rejects_separation_outside_open_interval() {
        for value in [0.0, -0.2, 1.0, 1.5, f64::NAN] {
            let config = PoissonConfig {
                min_distance: Some(value),
                ..PoissonConfig::kernel(8)
            };
            assert!(
                matches!(config.validate(), Err(ValidationError::Separation { .. })),
                "accepted {}",
                value
            );
        }

        let config = PoissonConfig {
            min_distance: Some(0.999),
            ..PoissonConfig::kernel(8)
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rectangle_limits_separation_by_short_side() {
        let mut config = PoissonConfig::fill(Domain::rectangle(4.0, 2.0), 100);
        config.min_distance = Some(1.5);
        assert!(config.validate().is_ok());
        config.min_distance = Some(2.0);
        assert_eq!(
            config.validate(),
            Err(ValidationError::Separation {
                value: 2.0,
                limit: 2.0
            })
        );
    }

    #[test]
    fn rejects_bad_extent_and_oversampling() {
        let config = PoissonConfig::fill(Domain::rectangle(0.0, 1.0), 100);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::Extent { .. })
        ));

        let config = PoissonConfig {
            oversampling: f64::INFINITY,
            ..PoissonConfig::fill(Domain::rectangle(1.0, 1.0), 100)
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::Oversampling(_))
        ));
    }

    #[test]
    fn rejects_grid_that_cannot_be_allocated() {
        let mut config = PoissonConfig::fill(Domain::rectangle(1e300, 1.0), 100);
        config.min_distance = Some(0.5);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::GridTooLarge { .. })
        ));

        // same extent is fine without a grid
        config.strategy = Strategy::BruteForce;
        assert!(config.validate().is_ok());

        let config = PoissonConfig {
            min_distance: Some(1e-9),
            strategy: Strategy::Grid,
            ..PoissonConfig::kernel(8)
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn default_separation_follows_equal_area() {
        assert_eq!(PoissonConfig::kernel(4).resolved_min_distance(), 0.5);

        let fill = PoissonConfig::fill(Domain::rectangle(1.0, 1.0), 1000);
        let expected = (1.0 / (1000.0 * PI)).sqrt() * 1.1;
        assert!((fill.resolved_min_distance() - expected).abs() < 1e-15);
        assert_eq!(fill.count_limit(), None);
        assert!(!fill.normalizes());
    }

    #[test]
    fn explicit_separation_wins() {
        let config = PoissonConfig {
            min_distance: Some(0.3),
            ..PoissonConfig::kernel(4)
        };
        assert_eq!(config.resolved_min_distance(), 0.3);
        assert_eq!(config.count_limit(), Some(4));
    }
}
