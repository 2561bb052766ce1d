//! SHA-256 hashing: general-purpose byte/polynomial hashing, and hashing a message into a ring
//! element for the blind-signing protocol.

use sha2::{Digest, Sha256};

use crate::poly::Polynomial;

/// Hashes arbitrary bytes with SHA-256.
pub fn hash_bytes(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hashes a polynomial's serialized form with SHA-256.
///
/// This hashes [`Polynomial::to_bytes`]'s host-endian encoding, so the digest is only stable
/// within a single process/platform; it's used internally, never as an interop wire value.
pub fn hash_polynomial(p: &Polynomial) -> [u8; 32] {
    hash_bytes(&p.to_bytes())
}

/// Deterministically hashes a message into an element of `R_q` with coefficients restricted to
/// `{0, floor(q/2)}`.
///
/// Expands `message` with a counter-mode SHA-256 (hashing `counter || message` for increasing
/// 4-byte counters, host byte order) until there are enough pseudorandom bits to pick one of the
/// two anchor values per coefficient, then maps each bit to `0` or `floor(q/2)`.
pub fn hash_to_polynomial(message: &[u8], n: usize, q: u64) -> Polynomial {
    let half = q / 2;
    let mut coeffs = Vec::with_capacity(n);
    let mut counter: u32 = 0;
    let mut pool: Vec<u8> = Vec::new();
    let mut pool_pos = 0usize;

    while coeffs.len() < n {
        if pool_pos >= pool.len() {
            let mut preimage = Vec::with_capacity(message.len() + 4);
            preimage.extend_from_slice(&counter.to_ne_bytes());
            preimage.extend_from_slice(message);
            pool = hash_bytes(&preimage).to_vec();
            pool_pos = 0;
            counter = counter.wrapping_add(1);
        }
        let byte = pool[pool_pos];
        pool_pos += 1;
        for bit_index in 0..8 {
            if coeffs.len() == n {
                break;
            }
            let bit = (byte >> bit_index) & 1;
            coeffs.push(if bit == 1 { half } else { 0 });
        }
    }

    Polynomial::new(n, q, coeffs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_bytes_of_empty_input_matches_known_sha256() {
        let digest = hash_bytes(b"");
        let expected = hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
            .unwrap();
        assert_eq!(digest.as_slice(), expected.as_slice());
    }

    #[test]
    fn hash_bytes_is_deterministic() {
        assert_eq!(hash_bytes(b"hello"), hash_bytes(b"hello"));
        assert_ne!(hash_bytes(b"hello"), hash_bytes(b"world"));
    }

    #[test]
    fn hash_polynomial_is_deterministic_and_injective_on_these_cases() {
        let a = Polynomial::new(4, 7681, vec![1, 2, 3, 4]);
        let b = Polynomial::new(4, 7681, vec![1, 2, 3, 5]);
        assert_eq!(hash_polynomial(&a), hash_polynomial(&a));
        assert_ne!(hash_polynomial(&a), hash_polynomial(&b));
    }

    #[test]
    fn hash_to_polynomial_is_deterministic() {
        let a = hash_to_polynomial(b"hello world", 8, 7681);
        let b = hash_to_polynomial(b"hello world", 8, 7681);
        assert_eq!(a, b);
    }

    #[test]
    fn hash_to_polynomial_outputs_are_anchor_values() {
        let half = 7681 / 2;
        let p = hash_to_polynomial(b"some message", 64, 7681);
        for &c in p.coeffs() {
            assert!(c == 0 || c == half);
        }
    }

    #[test]
    fn hash_to_polynomial_differs_for_different_messages() {
        let a = hash_to_polynomial(b"message one", 32, 7681);
        let b = hash_to_polynomial(b"message two", 32, 7681);
        assert_ne!(a, b);
    }

    #[test]
    fn hash_to_polynomial_respects_requested_shape() {
        let p = hash_to_polynomial(b"shape check", 256, 12289);
        assert_eq!(p.n(), 256);
        assert_eq!(p.q(), 12289);
    }
}
