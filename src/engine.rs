use crate::candidate::annulus_candidate;
use crate::domain::Domain;
use crate::error::PoissonError;
use crate::oracle::SeparationOracle;
use crate::point::Point2D;
use crate::random;
use rand_core::RngCore;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub candidates: usize,
    pub outside_domain: usize,
    pub too_close: usize,
    pub retired: usize,
}

/// Bridson's active-list sampler.
pub struct Bridson<R: RngCore, O: SeparationOracle> {
    domain: Domain,
    r_min: f64,
    attempts: u32,
    limit: Option<usize>,
    oracle: O,
    rng: R,
    samples: Vec<Point2D>,
    active: Vec<usize>,
    stats: RunStats,
}

impl<R: RngCore, O: SeparationOracle> Bridson<R, O> {
    pub fn new(
        domain: Domain,
        r_min: f64,
        attempts: u32,
        limit: Option<usize>,
        oracle: O,
        rng: R,
    ) -> Self {
        Self {
            domain,
            r_min,
            attempts,
            limit,
            oracle,
            rng,
            samples: Vec::with_capacity(limit.unwrap_or(0)),
            active: Vec::new(),
            stats: RunStats::default(),
        }
    }

    pub fn run(mut self) -> Result<Vec<Point2D>, PoissonError> {
        self.seed();

        while !self.active.is_empty() && !self.is_complete() {
            self.step();
        }

        debug!(
            samples = self.samples.len(),
            candidates = self.stats.candidates,
            outside_domain = self.stats.outside_domain,
            too_close = self.stats.too_close,
            retired = self.stats.retired,
            "bridson run finished"
        );

        if let Some(requested) = self.limit {
            if self.samples.len() < requested {
                let achieved = self.samples.len();
                warn!(achieved, requested, r_min = self.r_min, "active list exhausted");
                return Err(PoissonError::Exhausted {
                    achieved,
                    requested,
                });
            }
        }

        Ok(self.samples)
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    fn is_complete(&self) -> bool {
        matches!(self.limit, Some(n) if self.samples.len() >= n)
    }

    fn seed(&mut self) {
        let first = self.domain.sample_uniform(&mut self.rng);
        self.push(first);
    }

    fn step(&mut self) {
        let slot = random::index(&mut self.rng, self.active.len());
        let base = self.samples[self.active[slot]];

        for _ in 0..self.attempts {
            let candidate = annulus_candidate(base, self.r_min, &mut self.rng);
            self.stats.candidates += 1;

            if !self.domain.contains(candidate) {
                self.stats.outside_domain += 1;
                continue;
            }

            if self.oracle.accept(candidate, &self.samples) {
                self.push(candidate);
                return;
            }

            self.stats.too_close += 1;
        }

        // no room left around this base
        self.active.swap_remove(slot);
        self.stats.retired += 1;
    }

    fn push(&mut self, point: Point2D) {
        let index = self.samples.len();
        self.samples.push(point);
        self.oracle.record(index, point);
        self.active.push(index);
    }
}
