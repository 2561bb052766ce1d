//! Named parameter sets for the blind signature scheme.
//!
//! Each [`ParameterSet`] fixes the ring dimension `n`, coefficient modulus `q`, and Gaussian
//! error width `sigma` for one named security level. [`validate`](ParameterSet::validate) checks
//! the hard structural requirements every parameter set must satisfy to be usable at all;
//! [`advisories`](ParameterSet::advisories) reports softer security judgment calls as plain data,
//! for a caller to log, display, or ignore however it sees fit. This crate has no logging
//! dependency of its own (see the crate's top-level docs), so neither path prints anything.

use crate::error::{Error, Result};

/// A named, fixed choice of ring dimension, modulus, and error width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParameterSet {
    /// The name this parameter set is looked up by by [`ParameterSet::named`].
    pub name: &'static str,
    /// The ring dimension `n` (a power of two).
    pub n: usize,
    /// The coefficient modulus `q`.
    pub q: u64,
    /// The Gaussian error standard deviation, as a fixed-point value scaled by 1000 (so e.g.
    /// `3200` means `sigma = 3.2`). Kept as an integer so `ParameterSet` can derive `Eq`.
    pub sigma_milli: u64,
    /// An estimate of classical security, in bits.
    pub classical_bits: u32,
    /// An estimate of quantum (Grover-adjusted) security, in bits.
    pub quantum_bits: u32,
    /// Whether this parameter set is considered suitable for production use.
    ///
    /// The `TEST_*` sets are deliberately undersized, for fast tests; `is_secure` lets callers
    /// tell those apart from sets meant for real deployments without guessing from the name.
    pub is_secure: bool,
}

impl ParameterSet {
    /// The Gaussian error standard deviation as a floating-point value.
    pub fn sigma(&self) -> f64 {
        self.sigma_milli as f64 / 1000.0
    }

    /// Looks up a parameter set by name.
    pub fn named(name: &str) -> Option<&'static ParameterSet> {
        CATALOG.iter().find(|p| p.name == name)
    }

    /// Checks the structural requirements this parameter set must satisfy to be usable:
    /// `n` a power of two, and `q` large enough and congruent to `1 (mod 2n)` so that `Z_q` has
    /// the `2n`-th root of unity the NTT needs.
    ///
    /// This does not judge whether the set is *secure*; see [`Self::advisories`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] describing the first structural problem found.
    pub fn validate(&self) -> Result<()> {
        if !self.n.is_power_of_two() {
            return Err(Error::InvalidParameters { reason: "n must be a power of two" });
        }
        if self.q < 2 {
            return Err(Error::InvalidParameters { reason: "q must be at least 2" });
        }
        if (self.q - 1) % (2 * self.n as u64) != 0 {
            return Err(Error::InvalidParameters {
                reason: "q must be congruent to 1 modulo 2n",
            });
        }
        if self.sigma_milli == 0 {
            return Err(Error::InvalidParameters { reason: "sigma must be positive" });
        }
        Ok(())
    }

    /// Returns soft diagnostic messages about this parameter set's suitability, as plain
    /// strings for the caller to display or log however it likes.
    ///
    /// This never panics and never fails; an empty vector means no concerns were raised.
    pub fn advisories(&self) -> Vec<String> {
        let mut messages = Vec::new();
        if !self.is_secure {
            messages.push(format!(
                "{} is a test-only parameter set and must not be used in production",
                self.name
            ));
        }
        if self.classical_bits < 128 {
            messages.push(format!(
                "{} offers only {} bits of classical security",
                self.name, self.classical_bits
            ));
        }
        if self.quantum_bits < 128 {
            messages.push(format!(
                "{} offers only {} bits of quantum security",
                self.name, self.quantum_bits
            ));
        }
        let sigma_over_q = self.sigma() / self.q as f64;
        if sigma_over_q > 0.01 {
            messages.push(format!(
                "{} has sigma/q = {:.4}, above the 0.01 noise-budget guideline",
                self.name, sigma_over_q
            ));
        }
        messages
    }
}

/// The parameter set used by tests that don't care which level they run at.
///
/// Defaults to `TEST_SMALL`. Temporarily switch to the tinier `TEST_TINY` set to make test
/// failures easier to read, by hand:
///
/// ```no_run
/// RUSTFLAGS="--cfg tiny_poly" cargo test
/// ```
#[cfg(not(tiny_poly))]
pub fn default_test_parameters() -> &'static ParameterSet {
    ParameterSet::named("TEST_SMALL").expect("TEST_SMALL is always in CATALOG")
}

/// The parameter set used by tests that don't care which level they run at.
#[cfg(tiny_poly)]
pub fn default_test_parameters() -> &'static ParameterSet {
    ParameterSet::named("TEST_TINY").expect("TEST_TINY is always in CATALOG")
}

/// The full catalog of named parameter sets this crate ships NTT tables for.
pub const CATALOG: &[ParameterSet] = &[
    ParameterSet {
        name: "TEST_TINY",
        n: 8,
        q: 7681,
        sigma_milli: 3000,
        classical_bits: 4,
        quantum_bits: 2,
        is_secure: false,
    },
    ParameterSet {
        name: "TEST_SMALL",
        n: 32,
        q: 7681,
        sigma_milli: 3000,
        classical_bits: 16,
        quantum_bits: 8,
        is_secure: false,
    },
    ParameterSet {
        name: "KYBER512",
        n: 256,
        q: 7681,
        sigma_milli: 3000,
        classical_bits: 128,
        quantum_bits: 64,
        is_secure: true,
    },
    ParameterSet {
        name: "MODERATE",
        n: 512,
        q: 12289,
        sigma_milli: 3200,
        classical_bits: 192,
        quantum_bits: 96,
        is_secure: true,
    },
    ParameterSet {
        name: "HIGH",
        n: 1024,
        q: 18433,
        sigma_milli: 3200,
        classical_bits: 256,
        quantum_bits: 128,
        is_secure: true,
    },
];
