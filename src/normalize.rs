use crate::error::PoissonError;
use crate::point::Point2D;

/// Upper bound on single-ulp nudges per stage when snapping onto the circle.
const SNAP_STEPS: usize = 4096;

/// Scale `points` so the farthest one sits on the unit circle.
///
/// After the division every point whose norm is not below 1 is snapped so
/// that `norm()` returns exactly `1.0`; the maximum norm of the result is then
/// exactly one. Returns the norm that was divided out. An empty set, or one
/// where every point is the origin, fails with
/// [`PoissonError::DegenerateNormalization`].
pub fn normalize(points: &mut [Point2D]) -> Result<f64, PoissonError> {
    let (farthest, max_norm) = points
        .iter()
        .map(|p| p.norm())
        .enumerate()
        .fold((0, 0.0), |best, (i, n)| if n > best.1 { (i, n) } else { best });

    if max_norm == 0.0 {
        return Err(PoissonError::DegenerateNormalization);
    }

    for p in points.iter_mut() {
        *p = *p / max_norm;
    }

    for (i, p) in points.iter_mut().enumerate() {
        if i == farthest || p.norm() > 1.0 {
            *p = snap_to_unit_circle(*p);
        }
    }

    Ok(max_norm)
}

/// Nudge `p` by single ulps until `p.norm() == 1.0`.
///
/// `p` must already be within a few ulps of the circle. The larger component
/// moves first; once the norm crosses 1 the smaller component takes over,
/// since each of its ulps shifts the norm by less than an ulp of 1.
fn snap_to_unit_circle(mut p: Point2D) -> Point2D {
    for fine in [false, true] {
        let along_x = (p.x.abs() >= p.y.abs()) != fine;

        for _ in 0..SNAP_STEPS {
            let norm = p.norm();
            if norm == 1.0 {
                return p;
            }

            let grow = norm < 1.0;
            let component = if along_x { &mut p.x } else { &mut p.y };
            if *component == 0.0 {
                break;
            }
            *component = nudge(*component, grow);

            if !fine && (p.norm() < 1.0) != grow {
                break;
            }
        }
    }

    p
}

/// Move `value` one ulp away from zero (`grow`) or toward it. `value` is non-zero.
fn nudge(value: f64, grow: bool) -> f64 {
    let bits = value.abs().to_bits();
    let magnitude = f64::from_bits(if grow { bits + 1 } else { bits - 1 });
    magnitude.copysign(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use rand_core::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    fn max_norm(points: &[Point2D]) -> f64 {
        points.iter().map(|p| p.norm()).fold(0.0, f64::max)
    }

    #[test]
    fn farthest_point_lands_on_circle() {
        let mut points = vec![
            Point2D::new(0.1, 0.2),
            Point2D::new(-0.3, 0.4),
            Point2D::new(0.0, -0.25),
        ];
        let scale = normalize(&mut points).unwrap();
        assert!((scale - 0.5).abs() < 1e-15);
        assert_eq!(points[1].norm(), 1.0);
        assert!((points[2].y + 0.5).abs() < 1e-12);
        assert_eq!(max_norm(&points), 1.0);
    }

    #[test]
    fn max_norm_is_exactly_one() {
        let mut rng = Xoshiro256Plus::seed_from_u64(8);
        for round in 0..2_000 {
            let mut points = Domain::UnitDisk.scatter(8, &mut rng);
            normalize(&mut points).unwrap();
            assert_eq!(max_norm(&points), 1.0, "round {}", round);
        }
    }

    #[test]
    fn snapping_keeps_direction() {
        let p = Point2D::new(0.6, 0.8) / 0.9999999999999997;
        let snapped = snap_to_unit_circle(p);
        assert_eq!(snapped.norm(), 1.0);
        assert!((snapped.x - 0.6).abs() < 1e-15);
        assert!((snapped.y - 0.8).abs() < 1e-15);
    }

    #[test]
    fn nudge_moves_one_ulp() {
        assert_eq!(nudge(1.0, true), 1.0 + f64::EPSILON);
        assert_eq!(nudge(-1.0, true), -1.0 - f64::EPSILON);
        assert_eq!(nudge(1.0, false), 1.0 - f64::EPSILON / 2.0);
    }

    #[test]
    fn origin_only_is_degenerate() {
        let mut points = vec![Point2D::ORIGIN];
        assert_eq!(
            normalize(&mut points),
            Err(PoissonError::DegenerateNormalization)
        );
        assert_eq!(points, vec![Point2D::ORIGIN]);

        assert_eq!(
            normalize(&mut []),
            Err(PoissonError::DegenerateNormalization)
        );
    }
}
