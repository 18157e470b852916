//! Error types for Poisson-disk generation.

/// Parameter problems caught before the first random draw.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("sample count must be a positive integer")]
    ZeroCount,

    #[error("minimum separation must be in (0, {limit}), got {value}")]
    Separation { value: f64, limit: f64 },

    #[error("attempts per active point must be a positive integer")]
    ZeroAttempts,

    #[error("rectangle sides must be positive and finite, got {width} x {height}")]
    Extent { width: f64, height: f64 },

    #[error("oversampling factor must be positive and finite, got {0}")]
    Oversampling(f64),

    #[error("spatial grid for minimum separation {r_min} would exceed {limit} cells")]
    GridTooLarge { r_min: f64, limit: usize },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PoissonError {
    #[error("invalid parameters: {0}")]
    Validation(#[from] ValidationError),

    #[error(
        "could only generate {achieved} samples (requested {requested}), \
         lower the minimum separation or raise the attempt count"
    )]
    Exhausted { achieved: usize, requested: usize },

    #[error("degenerate sample set: every point lies at the origin")]
    DegenerateNormalization,
}

impl PoissonError {
    /// Whether a caller can retry with different parameters.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PoissonError::Validation(_) | PoissonError::Exhausted { .. } => true,
            PoissonError::DegenerateNormalization => false,
        }
    }
}
