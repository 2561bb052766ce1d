//! Error types for the RLWE blind signature core.

use core::fmt;

/// Errors that can occur in the polynomial ring, NTT, sampling, or protocol layers.
///
/// Verification failure is deliberately not a variant here: [`crate::signer::BlindSigner::verify`]
/// returns a `bool`, per the scheme's design (see the crate's top-level docs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `n` is not a power of two, `q < 2`, `q` is not `1 (mod 2n)`, or no NTT table exists
    /// for the requested `(n, q)`.
    InvalidParameters {
        /// A short description of which parameter was invalid, and why.
        reason: &'static str,
    },

    /// Two polynomial operands have different ring dimensions `n`.
    DimensionMismatch {
        /// The dimension of the left-hand operand.
        left: usize,
        /// The dimension of the right-hand operand.
        right: usize,
    },

    /// Two polynomial operands have different coefficient moduli `q`.
    ModulusMismatch {
        /// The modulus of the left-hand operand.
        left: u64,
        /// The modulus of the right-hand operand.
        right: u64,
    },

    /// [`crate::mod_arith::inv_mod`] was asked to invert an element that has no inverse mod `q`.
    NoInverse,

    /// The OS cryptographic random source could not be read.
    RandomSourceUnavailable,

    /// A signer operation that requires a key pair (`blind_sign`, `verify`, `public_key`) was
    /// called before [`crate::signer::BlindSigner::generate_keys`].
    KeyNotInitialized,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameters { reason } => write!(f, "invalid parameters: {reason}"),
            Self::DimensionMismatch { left, right } => {
                write!(f, "dimension mismatch: left n={left}, right n={right}")
            }
            Self::ModulusMismatch { left, right } => {
                write!(f, "modulus mismatch: left q={left}, right q={right}")
            }
            Self::NoInverse => write!(f, "element has no modular inverse"),
            Self::RandomSourceUnavailable => write!(f, "OS random source unavailable"),
            Self::KeyNotInitialized => write!(f, "signer has no key pair; call generate_keys first"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type for this crate's fallible operations.
pub type Result<T> = core::result::Result<T, Error>;
