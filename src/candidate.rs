use crate::point::Point2D;
use crate::random::uniform_f64;
use rand_core::RngCore;
use std::f64::consts::TAU;

/// Offset `base` by a radius in `[r_min, 2 r_min]` and a uniform angle.
pub fn annulus_candidate<R: RngCore + ?Sized>(base: Point2D, r_min: f64, rng: &mut R) -> Point2D {
    let rho = uniform_f64(rng, r_min, 2.0 * r_min);
    let theta = uniform_f64(rng, 0.0, TAU);
    base + Point2D::from_polar(rho, theta)
}
