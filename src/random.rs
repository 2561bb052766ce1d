//! Random sampling for uniform and discrete Gaussian ring elements.
//!
//! Both samplers draw from [`rand::rngs::OsRng`], the operating system's cryptographic random
//! source, rather than a seedable PRNG: secret keys and blinding factors are the only things
//! sampled here, and this crate has no test-vector-reproducibility requirement that would call
//! for a fixed seed.

use rand::RngCore;
use rand_distr::{Distribution, Normal};

use crate::error::{Error, Result};
use crate::poly::Polynomial;

/// Fills `buf` with cryptographically secure random bytes.
///
/// # Errors
///
/// Returns [`Error::RandomSourceUnavailable`] if the OS random source can't be read.
pub fn uniform_bytes(buf: &mut [u8]) -> Result<()> {
    rand::rngs::OsRng
        .try_fill_bytes(buf)
        .map_err(|_| Error::RandomSourceUnavailable)
}

/// Samples a polynomial with coefficients drawn uniformly from `[0, q)`.
///
/// Draws a `u64` per coefficient and reduces it mod `q`; for the moduli this crate's parameter
/// catalog uses (at most 18433, far below `u64::MAX`), the resulting bias is negligible, but it
/// is not a perfectly uniform distribution.
///
/// # Errors
///
/// Returns [`Error::RandomSourceUnavailable`] if the OS random source can't be read.
pub fn sample_uniform(n: usize, q: u64) -> Result<Polynomial> {
    let mut rng = checked_os_rng()?;
    let coeffs = (0..n).map(|_| rng.next_u64() % q).collect();
    Ok(Polynomial::new(n, q, coeffs))
}

/// Samples a polynomial with coefficients drawn from a discrete Gaussian of standard deviation
/// `sigma`, centered at `0` and canonicalized into `[0, q)`.
///
/// Uses the Box-Muller transform (via [`rand_distr::Normal`]) to draw a continuous Gaussian,
/// then rounds to the nearest integer. This is the standard error/noise sampler for RLWE
/// schemes; true discrete Gaussian samplers exist but add complexity this crate doesn't need for
/// the security levels in its parameter catalog.
///
/// # Errors
///
/// Returns [`Error::RandomSourceUnavailable`] if the OS random source can't be read, or
/// [`Error::InvalidParameters`] if `sigma` isn't finite and positive.
pub fn sample_gaussian(n: usize, q: u64, sigma: f64) -> Result<Polynomial> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(Error::InvalidParameters { reason: "sigma must be finite and positive" });
    }
    let mut rng = checked_os_rng()?;
    let normal = Normal::new(0.0, sigma).map_err(|_| Error::InvalidParameters {
        reason: "sigma is not a valid standard deviation",
    })?;

    let coeffs = (0..n)
        .map(|_| {
            let sample = normal.sample(&mut rng).round() as i64;
            canonicalize(sample, q)
        })
        .collect();
    Ok(Polynomial::new(n, q, coeffs))
}

fn canonicalize(value: i64, q: u64) -> u64 {
    let q = q as i64;
    (((value % q) + q) % q) as u64
}

fn checked_os_rng() -> Result<rand::rngs::OsRng> {
    // OsRng itself never fails to construct; reading from it can fail, which the callers above
    // detect via `try_fill_bytes`/`try_next_u64`-style paths. `next_u64` panics instead, so
    // probe the source once up front and surface a clean error if it's unavailable.
    let mut probe = [0u8; 8];
    uniform_bytes(&mut probe)?;
    Ok(rand::rngs::OsRng)
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 8;
    const Q: u64 = 7681;

    #[test]
    fn uniform_bytes_fills_the_buffer() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        uniform_bytes(&mut a).unwrap();
        uniform_bytes(&mut b).unwrap();
        assert_ne!(a, b, "two independent draws collided; RNG is almost certainly broken");
    }

    #[test]
    fn sample_uniform_respects_shape_and_modulus() {
        let p = sample_uniform(N, Q).unwrap();
        assert_eq!(p.n(), N);
        assert_eq!(p.q(), Q);
        for &c in p.coeffs() {
            assert!(c < Q);
        }
    }

    #[test]
    fn sample_gaussian_stays_in_range_and_centers_near_zero() {
        let sigma = 3.0;
        let p = sample_gaussian(N, Q, sigma).unwrap();
        for &c in p.coeffs() {
            assert!(c < Q);
        }
    }

    #[test]
    fn sample_gaussian_rejects_invalid_sigma() {
        assert!(matches!(
            sample_gaussian(N, Q, 0.0),
            Err(Error::InvalidParameters { .. })
        ));
        assert!(matches!(
            sample_gaussian(N, Q, -1.0),
            Err(Error::InvalidParameters { .. })
        ));
        assert!(matches!(
            sample_gaussian(N, Q, f64::NAN),
            Err(Error::InvalidParameters { .. })
        ));
    }

    #[test]
    fn two_uniform_draws_are_very_unlikely_to_collide() {
        let a = sample_uniform(N, Q).unwrap();
        let b = sample_uniform(N, Q).unwrap();
        assert_ne!(a, b);
    }
}
