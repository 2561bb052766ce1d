//! The negacyclic number-theoretic transform for `R_q = Z_q[x]/(x^n + 1)`.
//!
//! # Derivation
//!
//! Let `psi` be a primitive `2n`-th root of unity modulo `q` (`psi^n = -1`), and let
//! `omega = psi^2`, a primitive `n`-th root. The `n` roots of `x^n + 1` modulo `q` are exactly
//! `psi^(2j+1)` for `j` in `0..n`. For a polynomial `a = sum_i a_i x^i`:
//!
//! ```text
//! a(psi^(2j+1)) = sum_i a_i * psi^(i(2j+1)) = sum_i (a_i * psi^i) * omega^(ij)
//! ```
//!
//! i.e. evaluating `a` at the `n` roots of `x^n + 1` is exactly a standard (non-negacyclic)
//! size-`n` DFT with root `omega`, applied to the "twisted" sequence `b_i = a_i * psi^i`. Two
//! such evaluation vectors multiply pointwise exactly when the underlying polynomials multiply
//! modulo `x^n + 1` (a product of evaluations at the same point is the evaluation of the
//! product), so:
//!
//!   - forward: twist by `psi^i`, then DFT with root `omega`.
//!   - inverse: inverse-DFT with root `omega^-1`, scale by `n^-1`, then untwist by `psi^-i`.
//!
//! [`crate::psi_tables`] precomputes the twist vectors for exactly this convention.

use crate::error::{Error, Result};
use crate::mod_arith::{add_mod, inv_mod, mul_mod, pow_mod, sub_mod};
use crate::poly::Polynomial;
use crate::psi_tables::{self, PsiEntry};

/// A validated `(n, q)` pair, with direct access to its NTT table.
///
/// Constructing one checks that `n` is a power of two, `q` is large enough, and `q` is
/// `1 (mod 2n)`, i.e. `Z_q` actually has a `2n`-th root of unity to anchor the transform on.
#[derive(Clone, Debug)]
pub struct NttContext {
    n: usize,
    q: u64,
    entry: &'static PsiEntry,
}

impl NttContext {
    /// Validates `(n, q)` and looks up its precomputed table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if `n` isn't a power of two, `q < 2`, `q` isn't
    /// `1 (mod 2n)`, or no table is precomputed for this `(n, q)` pair.
    pub fn new(n: usize, q: u64) -> Result<Self> {
        if !n.is_power_of_two() {
            return Err(Error::InvalidParameters { reason: "n must be a power of two" });
        }
        if q < 2 {
            return Err(Error::InvalidParameters { reason: "q must be at least 2" });
        }
        if (q - 1) % (2 * n as u64) != 0 {
            return Err(Error::InvalidParameters {
                reason: "q must be congruent to 1 modulo 2n for a 2n-th root of unity to exist",
            });
        }
        let entry = psi_tables::lookup(n, q).ok_or(Error::InvalidParameters {
            reason: "no precomputed NTT table for this (n, q) pair",
        })?;
        Ok(Self { n, q, entry })
    }

    /// The ring dimension this context was built for.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// The coefficient modulus this context was built for.
    #[inline]
    pub fn q(&self) -> u64 {
        self.q
    }

    /// Transforms `coeffs` in place into the NTT domain: twist by `psi^i`, then DFT with
    /// `omega = psi^2`.
    ///
    /// # Panics
    ///
    /// Panics if `coeffs.len() != self.n()`.
    pub fn forward(&self, coeffs: &mut [u64]) {
        assert_eq!(coeffs.len(), self.n);
        for (c, &t) in coeffs.iter_mut().zip(&self.entry.twist) {
            *c = mul_mod(*c, t, self.q);
        }
        let omega = pow_mod(self.entry.psi, 2, self.q);
        dft(coeffs, self.q, omega);
    }

    /// Transforms `coeffs` in place out of the NTT domain: inverse DFT with `omega^-1`, scale by
    /// `n^-1`, then untwist by `psi^-i`.
    ///
    /// # Panics
    ///
    /// Panics if `coeffs.len() != self.n()`.
    pub fn inverse(&self, coeffs: &mut [u64]) {
        assert_eq!(coeffs.len(), self.n);
        let omega = pow_mod(self.entry.psi, 2, self.q);
        let omega_inv = inv_mod(omega, self.q).expect("omega has order n, so it's a unit");
        dft(coeffs, self.q, omega_inv);

        let n_inv = inv_mod(self.n as u64 % self.q, self.q).expect("n is coprime to q by construction");
        for (c, &t) in coeffs.iter_mut().zip(&self.entry.twist_inv) {
            *c = mul_mod(mul_mod(*c, n_inv, self.q), t, self.q);
        }
    }

    /// Multiplies two polynomials via this context's NTT table.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` doesn't match this context's `(n, q)`.
    pub fn multiply(&self, a: &Polynomial, b: &Polynomial) -> Polynomial {
        assert_eq!(a.n(), self.n);
        assert_eq!(a.q(), self.q);
        assert_eq!(b.n(), self.n);
        assert_eq!(b.q(), self.q);

        let mut fa = a.coeffs().to_vec();
        let mut fb = b.coeffs().to_vec();
        self.forward(&mut fa);
        self.forward(&mut fb);
        let mut prod: Vec<u64> = fa.iter().zip(&fb).map(|(&x, &y)| mul_mod(x, y, self.q)).collect();
        self.inverse(&mut prod);
        Polynomial::new(self.n, self.q, prod)
    }
}

/// In-place iterative Cooley-Tukey DFT of size `values.len()` (a power of two) with principal
/// root `root` (an `n`-th root of unity modulo `q`, for `n = values.len()`).
fn dft(values: &mut [u64], q: u64, root: u64) {
    let n = values.len();
    bit_reverse_permute(values);

    let mut len = 2;
    while len <= n {
        let half = len / 2;
        // Principal root of unity of order `len`: root^(n/len).
        let step = pow_mod(root, (n / len) as u64, q);
        let mut start = 0;
        while start < n {
            let mut w = 1u64;
            for j in 0..half {
                let u = values[start + j];
                let v = mul_mod(values[start + j + half], w, q);
                values[start + j] = add_mod(u, v, q);
                values[start + j + half] = sub_mod(u, v, q);
                w = mul_mod(w, step, q);
            }
            start += len;
        }
        len *= 2;
    }
}

fn bit_reverse_permute(values: &mut [u64]) {
    let n = values.len();
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if j > i {
            values.swap(i, j);
        }
    }
}

/// Multiplies `a` and `b` in `R_q`, using the NTT when a table exists for `(n, q)` and falling
/// back to schoolbook convolution (reduced modulo `x^n + 1`) otherwise.
///
/// Both paths compute the same ring product; the fallback exists so the ring works for any
/// `(n, q)`, not just the ones this crate ships tables for, and doubles as the NTT's
/// cross-check in tests.
pub fn cyclotomic_mul(a: &Polynomial, b: &Polynomial) -> Result<Polynomial> {
    let n = a.n();
    let q = a.q();

    if let Ok(ctx) = NttContext::new(n, q) {
        return Ok(ctx.multiply(a, b));
    }

    Ok(schoolbook_mul(a, b))
}

/// Schoolbook negacyclic convolution: `O(n^2)`, always correct, used as the NTT's reference.
fn schoolbook_mul(a: &Polynomial, b: &Polynomial) -> Polynomial {
    let n = a.n();
    let q = a.q();
    let mut result = vec![0u64; n];

    for i in 0..n {
        if a.coeffs()[i] == 0 {
            continue;
        }
        for j in 0..n {
            if b.coeffs()[j] == 0 {
                continue;
            }
            let term = mul_mod(a.coeffs()[i], b.coeffs()[j], q);
            let k = i + j;
            if k < n {
                result[k] = add_mod(result[k], term, q);
            } else {
                // x^n = -1, so x^k = -x^(k-n).
                result[k - n] = sub_mod(result[k - n], term, q);
            }
        }
    }

    Polynomial::new(n, q, result)
}
