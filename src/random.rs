//! Uniform draws on top of a bare [`RngCore`].

use rand_core::RngCore;

const UNIT_SCALE: f64 = 1.0 / (1u64 << 53) as f64;

/// Uniform `f64` in `[0, 1)` built from the top 53 bits of one `next_u64`.
pub fn unit_f64<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    (rng.next_u64() >> 11) as f64 * UNIT_SCALE
}

pub fn uniform_f64<R: RngCore + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    low + (high - low) * unit_f64(rng)
}

/// Index in `0..len`. `len` must be non-zero.
pub fn index<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> usize {
    (rng.next_u64() % len as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn unit_stays_in_half_open_range() {
        let mut rng = Xoshiro256Plus::seed_from_u64(7);
        for _ in 0..10_000 {
            let u = unit_f64(&mut rng);
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn all_ones_draw_is_below_one() {
        struct MaxRng;

        impl RngCore for MaxRng {
            fn next_u32(&mut self) -> u32 {
                u32::MAX
            }
            fn next_u64(&mut self) -> u64 {
                u64::MAX
            }
            fn fill_bytes(&mut self, dest: &mut [u8]) {
                dest.fill(0xff);
            }
            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
                self.fill_bytes(dest);
                Ok(())
            }
        }

        assert!(unit_f64(&mut MaxRng) < 1.0);
        assert_eq!(index(&mut MaxRng, 3), (u64::MAX % 3) as usize);
    }
}
