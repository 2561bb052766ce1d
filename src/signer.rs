//! The three-party RLWE blind signature protocol: key generation, client-side blinding and
//! unblinding, and server-side signing and verification.

use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::hash;
use crate::ntt::NttContext;
use crate::params::ParameterSet;
use crate::poly::Polynomial;
use crate::random::{sample_gaussian, sample_uniform};

/// A polynomial holding secret key material, zeroized on drop.
///
/// `Polynomial` itself doesn't implement `Zeroize`: most polynomials (ciphertexts, blinded
/// messages, hashes) carry no secret, and zeroizing them on every drop would be pure overhead.
/// Only the signer's secret key `s` needs this, so it gets its own thin wrapper instead.
struct SecretPolynomial(Polynomial);

impl Drop for SecretPolynomial {
    fn drop(&mut self) {
        self.0.coeffs_mut().zeroize();
    }
}

struct KeyPair {
    a: Polynomial,
    b: Polynomial,
    s: SecretPolynomial,
}

/// One party's view of the blind signature scheme, bound to a fixed `(n, q, sigma)`.
///
/// A signer that has called [`generate_keys`](Self::generate_keys) can act as the server: it
/// holds the secret `s` and can [`blind_sign`](Self::blind_sign) and [`verify`](Self::verify). A
/// signer that never generates keys can still act as the client: [`compute_blinded_message`]
/// and [`compute_signature`] only need the server's public `(a, b)`, passed in explicitly, and
/// [`hash_to_polynomial`] needs no keys at all.
///
/// [`compute_blinded_message`]: Self::compute_blinded_message
/// [`compute_signature`]: Self::compute_signature
pub struct BlindSigner {
    params: ParameterSet,
    ctx: NttContext,
    keys: Option<KeyPair>,
}

impl BlindSigner {
    /// Constructs a signer for an explicit parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if the parameter set fails structural validation, or
    /// if no NTT table is precomputed for its `(n, q)`.
    pub fn new(params: ParameterSet) -> Result<Self> {
        params.validate()?;
        let ctx = NttContext::new(params.n, params.q)?;
        Ok(Self { params, ctx, keys: None })
    }

    /// Constructs a signer from one of the catalog's named parameter sets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if `name` isn't in [`crate::params::CATALOG`], or if
    /// the named set itself fails construction (see [`Self::new`]).
    pub fn named(name: &str) -> Result<Self> {
        let params = ParameterSet::named(name).ok_or(Error::InvalidParameters {
            reason: "unknown parameter set name",
        })?;
        Self::new(*params)
    }

    /// The parameter set this signer was constructed with.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Direct access to this signer's NTT context, for advanced callers.
    pub fn ntt_context(&self) -> &NttContext {
        &self.ctx
    }

    /// Generates a fresh key pair, replacing any previous one.
    ///
    /// `a` is sampled uniformly, the secret `s` and error `e` are sampled from the discrete
    /// Gaussian with this signer's `sigma`, and `b = a*s + e`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomSourceUnavailable`] if the OS random source can't be read.
    pub fn generate_keys(&mut self) -> Result<()> {
        let (n, q, sigma) = (self.params.n, self.params.q, self.params.sigma());
        let a = sample_uniform(n, q)?;
        let s = sample_gaussian(n, q, sigma)?;
        let e = sample_gaussian(n, q, sigma)?;
        let b = a.mul(&s)?.add(&e)?;
        self.keys = Some(KeyPair { a, b, s: SecretPolynomial(s) });
        Ok(())
    }

    /// Returns a copy of this signer's public key `(a, b)`. Never exposes the secret `s`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotInitialized`] if [`Self::generate_keys`] hasn't been called yet.
    pub fn public_key(&self) -> Result<(Polynomial, Polynomial)> {
        let keys = self.keys.as_ref().ok_or(Error::KeyNotInitialized)?;
        Ok((keys.a.clone(), keys.b.clone()))
    }

    /// Hashes a message to its target polynomial `H(m)`, with coefficients in `{0, floor(q/2)}`.
    ///
    /// Pure function of `m` and this signer's `(n, q)`; doesn't require keys.
    pub fn hash_to_polynomial(&self, message: &[u8]) -> Polynomial {
        hash::hash_to_polynomial(message, self.params.n, self.params.q)
    }

    /// Client step: blinds a message against the server's public `a`.
    ///
    /// Samples a fresh blinding factor `r` from the discrete Gaussian, computes
    /// `Y = H(m)`, and returns `(Y + a*r, r)`. The caller retains `r` for
    /// [`Self::compute_signature`] and must never transmit it to the server.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomSourceUnavailable`] if the OS random source can't be read, or a
    /// shape error if `a` doesn't match this signer's `(n, q)`.
    pub fn compute_blinded_message(&self, message: &[u8], a: &Polynomial) -> Result<(Polynomial, Polynomial)> {
        let r = sample_gaussian(self.params.n, self.params.q, self.params.sigma())?;
        let y = self.hash_to_polynomial(message);
        let blinded = y.add(&a.mul(&r)?)?;
        Ok((blinded, r))
    }

    /// Server step: signs a blinded message without ever seeing `Y` or `r`.
    ///
    /// Computes `s*Ỹ + e1` for a fresh error `e1`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotInitialized`] if no keys have been generated, or
    /// [`Error::RandomSourceUnavailable`] if the OS random source can't be read.
    pub fn blind_sign(&self, blinded_message: &Polynomial) -> Result<Polynomial> {
        let keys = self.keys.as_ref().ok_or(Error::KeyNotInitialized)?;
        let e1 = sample_gaussian(self.params.n, self.params.q, self.params.sigma())?;
        keys.s.0.mul(blinded_message)?.add(&e1)
    }

    /// Client step: removes the blinding factor from the server's response.
    ///
    /// Computes `C - r*b`. Pure arithmetic; doesn't require keys.
    ///
    /// # Errors
    ///
    /// Returns a shape error if `c`, `r`, and `b` don't all share this signer's `(n, q)`.
    pub fn compute_signature(&self, c: &Polynomial, r: &Polynomial, b: &Polynomial) -> Result<Polynomial> {
        c.sub(&r.mul(b)?)
    }

    /// Server step: checks a signature against a message.
    ///
    /// Recomputes `Y = H(m)` and `expected = s*Y`, then compares
    /// `expected.signal()` against `signature.signal()` coefficient-wise. This tolerates the
    /// small noise accumulated through blinding and signing, at the cost of requiring the secret
    /// `s` to verify (see the crate's top-level docs for why this scheme's verification is
    /// symmetric rather than public-key).
    ///
    /// Never returns `Err` for a mismatched signature — only for a missing key or mismatched
    /// shapes. A mismatch, cryptographic or otherwise, is `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotInitialized`] if no keys have been generated.
    pub fn verify(&self, message: &[u8], signature: &Polynomial) -> Result<bool> {
        let keys = self.keys.as_ref().ok_or(Error::KeyNotInitialized)?;
        let y = self.hash_to_polynomial(message);
        let expected = keys.s.0.mul(&y)?;
        Ok(expected.signal() == signature.signal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flip_one_bit(message: &[u8]) -> Vec<u8> {
        let mut copy = message.to_vec();
        copy[0] ^= 1;
        copy
    }

    fn flip_one_byte(message: &[u8]) -> Vec<u8> {
        let mut copy = message.to_vec();
        copy[0] = copy[0].wrapping_add(1);
        copy
    }

    fn run_protocol(name: &str, message: &[u8]) -> (BlindSigner, Polynomial) {
        let mut signer = BlindSigner::named(name).unwrap();
        signer.generate_keys().unwrap();
        let (a, b) = signer.public_key().unwrap();
        let (blinded, r) = signer.compute_blinded_message(message, &a).unwrap();
        let c = signer.blind_sign(&blinded).unwrap();
        let signature = signer.compute_signature(&c, &r, &b).unwrap();
        (signer, signature)
    }

    #[test]
    fn protocol_round_trip_verifies_for_every_catalog_level() {
        for entry in crate::params::CATALOG {
            let (signer, signature) = run_protocol(entry.name, b"the quick brown fox");
            assert!(
                signer.verify(b"the quick brown fox", &signature).unwrap(),
                "verification failed for catalog level {}",
                entry.name
            );
        }
    }

    #[test]
    fn verify_rejects_single_bit_difference() {
        let message = b"the quick brown fox jumps";
        let (signer, signature) = run_protocol("TEST_SMALL", message);
        let altered = flip_one_bit(message);
        assert!(!signer.verify(&altered, &signature).unwrap());
    }

    #[test]
    fn verify_rejects_single_byte_difference() {
        let message = b"the quick brown fox jumps";
        let (signer, signature) = run_protocol("TEST_SMALL", message);
        let altered = flip_one_byte(message);
        assert!(!signer.verify(&altered, &signature).unwrap());
    }

    #[test]
    fn verify_rejects_signature_from_a_different_key_pair() {
        let message = b"same message, different signer";
        let (_first, signature) = run_protocol("TEST_SMALL", message);

        let mut other = BlindSigner::named("TEST_SMALL").unwrap();
        other.generate_keys().unwrap();
        assert!(!other.verify(message, &signature).unwrap());
    }

    #[test]
    fn empty_message_completes_the_protocol_and_verifies() {
        let (signer, signature) = run_protocol("KYBER512", b"");
        assert!(signer.verify(b"", &signature).unwrap());
    }

    #[test]
    fn regenerating_keys_after_signing_invalidates_verification() {
        let message = b"signed before the server rotates its key";
        let mut signer = BlindSigner::named("TEST_SMALL").unwrap();
        signer.generate_keys().unwrap();
        let (a, b) = signer.public_key().unwrap();
        let (blinded, r) = signer.compute_blinded_message(message, &a).unwrap();
        let c = signer.blind_sign(&blinded).unwrap();
        let signature = signer.compute_signature(&c, &r, &b).unwrap();

        signer.generate_keys().unwrap();
        assert!(!signer.verify(message, &signature).unwrap());
    }

    #[test]
    fn operations_before_keygen_report_key_not_initialized() {
        let signer = BlindSigner::named("TEST_TINY").unwrap();
        assert_eq!(signer.public_key(), Err(Error::KeyNotInitialized));

        let dummy = Polynomial::zero(signer.params().n, signer.params().q);
        assert_eq!(signer.blind_sign(&dummy), Err(Error::KeyNotInitialized));
        assert_eq!(signer.verify(b"m", &dummy), Err(Error::KeyNotInitialized));
    }

    #[test]
    fn blinding_and_unblinding_do_not_require_keys() {
        let client = BlindSigner::named("TEST_TINY").unwrap();
        let mut server = BlindSigner::named("TEST_TINY").unwrap();
        server.generate_keys().unwrap();
        let (a, b) = server.public_key().unwrap();

        let message = b"client never calls generate_keys";
        let (blinded, r) = client.compute_blinded_message(message, &a).unwrap();
        let c = server.blind_sign(&blinded).unwrap();
        let signature = client.compute_signature(&c, &r, &b).unwrap();
        assert!(server.verify(message, &signature).unwrap());
    }

    #[test]
    fn thousand_iterations_at_the_tiny_parameter_set_all_verify() {
        for i in 0..1000u32 {
            let message = i.to_ne_bytes();
            let (signer, signature) = run_protocol("TEST_TINY", &message);
            assert!(
                signer.verify(&message, &signature).unwrap(),
                "iteration {i} failed to verify at TEST_TINY"
            );
        }
    }

    #[test]
    fn random_replacement_signatures_are_rejected_almost_always() {
        let message = b"a message with one genuine signature";
        let (signer, _signature) = run_protocol("TEST_TINY", message);
        let params = signer.params();

        let mut rejections = 0u32;
        for _ in 0..1000u32 {
            let forged = sample_uniform(params.n, params.q).unwrap();
            if !signer.verify(message, &forged).unwrap() {
                rejections += 1;
            }
        }
        assert!(
            rejections >= 999,
            "only {rejections}/1000 random replacement signatures were rejected"
        );
    }

    #[test]
    fn named_rejects_unknown_parameter_set() {
        assert!(matches!(
            BlindSigner::named("NOT_A_REAL_LEVEL"),
            Err(Error::InvalidParameters { .. })
        ));
    }
}
