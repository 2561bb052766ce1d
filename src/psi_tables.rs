//! Precomputed 2n-th roots of unity and twist vectors for the negacyclic NTT.
//!
//! The catalog is a `lazy_static` map keyed by `(n, q)`, built once per process by searching for
//! a primitive `2n`-th root `psi` the first time it's needed (see [`find_psi`]), rather than
//! hand-transcribed magic numbers: the search is a handful of modular exponentiations, cheap
//! enough to pay once and far more auditable than baked-in constants.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::mod_arith::{inv_mod, mul_mod, pow_mod};

/// The `(n, q)` pairs this crate ships NTT support for, matching [`crate::params::CATALOG`].
pub const SUPPORTED: &[(usize, u64)] = &[
    (8, 7681),
    (32, 7681),
    (256, 7681),
    (512, 12289),
    (1024, 18433),
];

/// A precomputed NTT table for one `(n, q)` pair.
#[derive(Clone, Debug)]
pub struct PsiEntry {
    /// A primitive `2n`-th root of unity modulo `q`, with `psi^n = q - 1`.
    pub psi: u64,
    /// The modular inverse of `psi`.
    pub psi_inv: u64,
    /// `twist[i] = psi^i mod q`, for `i` in `0..n`.
    ///
    /// Pre-multiplying coefficient `i` by `twist[i]` before a standard (non-negacyclic) NTT with
    /// root `omega = psi^2` turns that NTT's `j`-th output into `a(psi^(2j+1))` — i.e. the
    /// evaluation of `a` at the `n` distinct roots of `x^n + 1` mod `q`. See [`crate::ntt`]'s
    /// module docs for the derivation.
    pub twist: Vec<u64>,
    /// `twist_inv[i] = psi^(-i) mod q`, for `i` in `0..n`; undoes [`Self::twist`] after the
    /// inverse NTT.
    pub twist_inv: Vec<u64>,
}

fn build_entry(n: usize, q: u64) -> PsiEntry {
    let psi = find_psi(n, q).unwrap_or_else(|| {
        panic!("no primitive 2{n}-th root of unity found modulo {q}; is (n, q) really NTT-friendly?")
    });
    let psi_inv = inv_mod(psi, q).expect("psi is a unit, since it has multiplicative order 2n");

    let mut twist = Vec::with_capacity(n);
    let mut twist_inv = Vec::with_capacity(n);
    for i in 0..n {
        twist.push(pow_mod(psi, i as u64, q));
        twist_inv.push(pow_mod(psi_inv, i as u64, q));
    }

    PsiEntry {
        psi,
        psi_inv,
        twist,
        twist_inv,
    }
}

/// Searches for a primitive `2n`-th root of unity modulo `q`.
///
/// Tries candidate generators `g = 2, 3, ...`, raising each to `(q - 1) / (2n)`, and accepts the
/// first result whose `n`-th power is `q - 1` (i.e. `-1 mod q`). Since `n` is a power of two,
/// `2n` is too, so every element's order modulo `q` is itself a power of two dividing `2n`; an
/// order properly dividing `2n` would also divide `n`, giving `candidate^n = 1`, not `-1`. So
/// `candidate^n = -1` alone proves the order is exactly `2n`, with no separate check needed.
pub fn find_psi(n: usize, q: u64) -> Option<u64> {
    if q < 2 || !n.is_power_of_two() {
        return None;
    }
    let two_n = 2 * n as u64;
    if (q - 1) % two_n != 0 {
        return None;
    }
    let exponent = (q - 1) / two_n;

    for g in 2..q {
        let candidate = pow_mod(g, exponent, q);
        if candidate != 0 && pow_mod(candidate, n as u64, q) == q - 1 {
            return Some(candidate);
        }
    }
    None
}

lazy_static! {
    static ref CATALOG: HashMap<(usize, u64), PsiEntry> = SUPPORTED
        .iter()
        .map(|&(n, q)| ((n, q), build_entry(n, q)))
        .collect();
}

/// Returns the precomputed NTT table for `(n, q)`, or `None` if this pair isn't supported.
pub fn lookup(n: usize, q: u64) -> Option<&'static PsiEntry> {
    CATALOG.get(&(n, q))
}
