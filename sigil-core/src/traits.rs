//! Cryptographic primitive traits.

use crate::Result;
use rand_core::CryptoRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Maximum length of an application context string in bytes.
pub const MAX_CONTEXT_LEN: usize = 255;

/// How the per-signature randomness `rnd` is chosen.
///
/// Both variants produce signatures that verify identically. Deterministic
/// signing makes `sign` a pure function of `(sk, message, context)`. Hedged
/// signing mixes 32 fresh random bytes into the mask seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigningMode {
    /// `rnd` is 32 zero bytes.
    #[default]
    Deterministic,
    /// `rnd` is drawn from the caller's RNG.
    Hedged,
}

/// Digital signature trait.
///
/// This trait defines the interface for digital signature schemes
/// as specified in NIST post-quantum cryptography standards.
///
/// # Example
///
/// ```ignore
/// use sigil_core::Signer;
///
/// let (sk, pk) = MySigner::keygen(&mut rng)?;
/// let sig = MySigner::sign(&sk, message, b"my-app")?;
/// MySigner::verify(&pk, message, b"my-app", &sig)?;
/// ```
pub trait Signer {
    /// Signing key (private key).
    type SigningKey: Zeroize + ZeroizeOnDrop;

    /// Verification key (public key).
    type VerificationKey: Clone;

    /// Signature produced by signing.
    type Signature: Clone;

    /// Size of the signing key in bytes.
    const SIGNING_KEY_SIZE: usize;

    /// Size of the verification key in bytes.
    const VERIFICATION_KEY_SIZE: usize;

    /// Size of the signature in bytes.
    const SIGNATURE_SIZE: usize;

    /// Generate a new key pair.
    ///
    /// # Arguments
    ///
    /// * `rng` - A cryptographically secure random number generator.
    ///
    /// # Returns
    ///
    /// A tuple of (signing_key, verification_key).
    fn keygen(rng: &mut impl CryptoRng) -> Result<(Self::SigningKey, Self::VerificationKey)>;

    /// Sign a message deterministically.
    ///
    /// # Arguments
    ///
    /// * `sk` - The signing (private) key.
    /// * `message` - The message to sign.
    /// * `context` - Application context string, at most 255 bytes.
    ///
    /// # Returns
    ///
    /// The signature.
    fn sign(sk: &Self::SigningKey, message: &[u8], context: &[u8]) -> Result<Self::Signature>;

    /// Sign a message with hedged randomness drawn from `rng`.
    fn sign_hedged(
        sk: &Self::SigningKey,
        message: &[u8],
        context: &[u8],
        rng: &mut impl CryptoRng,
    ) -> Result<Self::Signature>;

    /// Verify a signature.
    ///
    /// # Arguments
    ///
    /// * `pk` - The verification (public) key.
    /// * `message` - The message that was signed.
    /// * `context` - The context string used when signing.
    /// * `signature` - The signature to verify.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the signature is valid, `Err(Error::VerificationFailed)` otherwise.
    fn verify(
        pk: &Self::VerificationKey,
        message: &[u8],
        context: &[u8],
        signature: &Self::Signature,
    ) -> Result<()>;
}
