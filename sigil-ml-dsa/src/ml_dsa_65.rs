//! ML-DSA-65 (NIST Level 3) implementation

use alloc::vec::Vec;

use crate::params::ml_dsa_65::*;
use crate::sign;
use rand_core::CryptoRng;
use sigil_core::{Error, Result, Signer, SigningMode};
use zeroize::Zeroizing;

pub use crate::types::{ExpandedVerificationKey, Signature, SigningKey, VerificationKey};

/// ML-DSA-65 algorithm marker.
pub struct MlDsa65;

impl Signer for MlDsa65 {
    type SigningKey = SigningKey;
    type VerificationKey = VerificationKey;
    type Signature = Signature;

    const SIGNING_KEY_SIZE: usize = SK_BYTES;
    const VERIFICATION_KEY_SIZE: usize = PK_BYTES;
    const SIGNATURE_SIZE: usize = SIG_BYTES;

    fn keygen(rng: &mut impl CryptoRng) -> Result<(Self::SigningKey, Self::VerificationKey)> {
        let mut xi = Zeroizing::new([0u8; SEED_BYTES]);
        rng.fill_bytes(xi.as_mut_slice());
        Self::keygen_from_seed(xi.as_slice())
    }

    fn sign(sk: &Self::SigningKey, message: &[u8], context: &[u8]) -> Result<Self::Signature> {
        let rnd = [0u8; SEED_BYTES];
        sign::sign(sk.as_bytes(), message, context, &rnd).map(Signature::from)
    }

    fn sign_hedged(
        sk: &Self::SigningKey,
        message: &[u8],
        context: &[u8],
        rng: &mut impl CryptoRng,
    ) -> Result<Self::Signature> {
        let mut rnd = Zeroizing::new([0u8; SEED_BYTES]);
        rng.fill_bytes(rnd.as_mut_slice());
        sign::sign(sk.as_bytes(), message, context, &rnd).map(Signature::from)
    }

    fn verify(
        pk: &Self::VerificationKey,
        message: &[u8],
        context: &[u8],
        signature: &Self::Signature,
    ) -> Result<()> {
        if sign::verify(pk.as_bytes(), message, context, signature.as_bytes()) {
            Ok(())
        } else {
            Err(Error::VerificationFailed)
        }
    }
}

impl MlDsa65 {
    /// Derive a key pair from a 32-byte seed ξ.
    ///
    /// The same seed always gives the same key pair. Any other length is
    /// [`Error::InsufficientRandomness`].
    pub fn keygen_from_seed(seed: &[u8]) -> Result<(SigningKey, VerificationKey)> {
        let xi: &[u8; SEED_BYTES] = seed
            .try_into()
            .map_err(|_| Error::InsufficientRandomness)?;

        let (sk_bytes, pk_bytes) = sign::keygen_internal(xi);
        let sk = SigningKey::from_bytes(sk_bytes.as_slice())?;
        let pk = VerificationKey::from_bytes(&pk_bytes)?;
        Ok((sk, pk))
    }

    /// Sign in the given [`SigningMode`]. `rng` is only read in
    /// [`SigningMode::Hedged`].
    pub fn sign_with_mode(
        sk: &SigningKey,
        message: &[u8],
        context: &[u8],
        mode: SigningMode,
        rng: &mut impl CryptoRng,
    ) -> Result<Signature> {
        match mode {
            SigningMode::Deterministic => <Self as Signer>::sign(sk, message, context),
            SigningMode::Hedged => Self::sign_hedged(sk, message, context, rng),
        }
    }

    /// Verify with a pre-expanded verification key.
    ///
    /// Gives the same answer as [`Signer::verify`] with the key `expanded`
    /// came from, without re-deriving A and tr each time.
    pub fn verify_expanded(
        expanded: &ExpandedVerificationKey,
        message: &[u8],
        context: &[u8],
        signature: &Signature,
    ) -> Result<()> {
        if sign::verify_expanded(expanded, message, context, signature.as_bytes()) {
            Ok(())
        } else {
            Err(Error::VerificationFailed)
        }
    }

    /// Deterministically sign and return `signature ‖ message`.
    pub fn sign_attached(sk: &SigningKey, message: &[u8], context: &[u8]) -> Result<Vec<u8>> {
        let rnd = [0u8; SEED_BYTES];
        sign::sign_attached(sk.as_bytes(), message, context, &rnd)
    }

    /// Verify `signature ‖ message` and return the message.
    pub fn open(pk: &VerificationKey, signed: &[u8], context: &[u8]) -> Result<Vec<u8>> {
        sign::open_attached(pk.as_bytes(), signed, context)
    }
}
