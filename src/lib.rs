//! RLWE-based blind signature core: polynomial ring arithmetic over `R_q = Z_q[x]/(x^n + 1)`
//! accelerated by a negacyclic NTT, and a three-party blind-signing protocol built on top of it.
//!
//! This library has 5 core modules:
//! [`mod_arith`]: scalar arithmetic in `Z_q`,
//! [`poly`]: elements of the ring `R_q` and their operations,
//! [`ntt`]: the negacyclic transform `poly` uses for fast multiplication,
//! [`params`]: named parameter sets,
//! [`signer`]: the blind-signing protocol itself.
//!
//! [`psi_tables`], [`random`], and [`hash`] back the above; most callers won't need them
//! directly.
//!
//! This crate depends on no logging framework: parameter advisories
//! ([`params::ParameterSet::advisories`]) are returned as plain strings for the caller to display
//! or log however it sees fit, rather than printed here.

#[macro_use]
extern crate static_assertions;

pub mod error;
pub mod hash;
pub mod mod_arith;
pub mod ntt;
pub mod params;
pub mod poly;
pub mod psi_tables;
pub mod random;
pub mod signer;

pub use error::{Error, Result};
pub use params::ParameterSet;
pub use poly::Polynomial;
pub use signer::BlindSigner;

const_assert!(u64::BITS == 64);
