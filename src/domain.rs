use crate::point::Point2D;
use crate::random::unit_f64;
use rand_core::RngCore;
use std::f64::consts::{PI, TAU};

/// Region the samples must stay inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Domain {
    /// Closed disk of radius 1 centered on the origin.
    UnitDisk,
    /// Half-open rectangle `[0, width) x [0, height)`.
    Rectangle { width: f64, height: f64 },
}

impl Domain {
    pub fn rectangle(width: f64, height: f64) -> Self {
        Domain::Rectangle { width, height }
    }

    pub fn contains(&self, p: Point2D) -> bool {
        match *self {
            Domain::UnitDisk => p.norm_squared() <= 1.0,
            Domain::Rectangle { width, height } => {
                p.x >= 0.0 && p.x < width && p.y >= 0.0 && p.y < height
            }
        }
    }

    pub fn area(&self) -> f64 {
        match *self {
            Domain::UnitDisk => PI,
            Domain::Rectangle { width, height } => width * height,
        }
    }

    /// Axis-aligned bounding box as `(min, max)`.
    pub fn bounds(&self) -> (Point2D, Point2D) {
        match *self {
            Domain::UnitDisk => (Point2D::new(-1.0, -1.0), Point2D::new(1.0, 1.0)),
            Domain::Rectangle { width, height } => (Point2D::ORIGIN, Point2D::new(width, height)),
        }
    }

    /// Point distributed uniformly over the area of the domain.
    pub fn sample_uniform<R: RngCore + ?Sized>(&self, rng: &mut R) -> Point2D {
        match *self {
            Domain::UnitDisk => {
                // sqrt keeps the density flat in area rather than in radius
                let radius = unit_f64(rng).sqrt();
                let angle = TAU * unit_f64(rng);
                Point2D::from_polar(radius, angle)
            }
            Domain::Rectangle { width, height } => {
                let x = unit_f64(rng) * width;
                let y = unit_f64(rng) * height;
                Point2D::new(x, y)
            }
        }
    }

    pub fn scatter<R: RngCore + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Point2D> {
        (0..count).map(|_| self.sample_uniform(rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn rectangle_is_half_open() {
        let domain = Domain::rectangle(2.0, 1.0);
        assert!(domain.contains(Point2D::new(0.0, 0.0)));
        assert!(domain.contains(Point2D::new(1.999, 0.999)));
        assert!(!domain.contains(Point2D::new(2.0, 0.5)));
        assert!(!domain.contains(Point2D::new(0.5, 1.0)));
        assert!(!domain.contains(Point2D::new(-0.001, 0.5)));
    }

    #[test]
    fn disk_boundary_is_inside() {
        assert!(Domain::UnitDisk.contains(Point2D::new(1.0, 0.0)));
        assert!(Domain::UnitDisk.contains(Point2D::new(0.0, -1.0)));
        assert!(!Domain::UnitDisk.contains(Point2D::new(0.8, 0.8)));
    }

    #[test]
    fn uniform_samples_stay_inside() {
        let mut rng = Xoshiro256Plus::seed_from_u64(3);
        for domain in [Domain::UnitDisk, Domain::rectangle(3.0, 0.5)] {
            for p in domain.scatter(5_000, &mut rng) {
                assert!(domain.contains(p), "{:?} escaped {:?}", p, domain);
            }
        }
    }

    #[test]
    fn disk_samples_are_uniform_in_area() {
        // a quarter of the area lies within radius 0.5
        let mut rng = Xoshiro256Plus::seed_from_u64(11);
        let total = 40_000;
        let inner = Domain::UnitDisk
            .scatter(total, &mut rng)
            .into_iter()
            .filter(|p| p.norm() < 0.5)
            .count();
        let fraction = inner as f64 / total as f64;
        assert!((fraction - 0.25).abs() < 0.015, "inner fraction {}", fraction);
    }
}
