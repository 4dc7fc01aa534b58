//! Encoded ML-DSA-65 keys and signatures.
//!
//! These hold the FIPS 204 byte encodings and only check lengths. Structural
//! checks (η range, hint encoding) happen when the bytes are used.

use core::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::params::ml_dsa_65::{PK_BYTES, SIG_BYTES, SK_BYTES};
use crate::sign;
use sigil_core::{Error, Result};

pub use crate::sign::ExpandedVerificationKey;

/// Copy `bytes` into a fixed array, or report the length that was seen.
fn fixed<const LEN: usize>(bytes: &[u8]) -> core::result::Result<[u8; LEN], usize> {
    <[u8; LEN]>::try_from(bytes).map_err(|_| bytes.len())
}

/// Signing key `(ρ, K, tr, s1, s2, t0)`, encoded. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningKey([u8; SK_BYTES]);

impl SigningKey {
    /// Parse an encoded signing key.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKeyLength`] unless `bytes` is exactly 4032 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        fixed::<SK_BYTES>(bytes)
            .map(Self)
            .map_err(|actual| Error::InvalidKeyLength {
                expected: SK_BYTES,
                actual,
            })
    }

    /// The encoded key.
    pub fn as_bytes(&self) -> &[u8; SK_BYTES] {
        &self.0
    }
}

impl ConstantTimeEq for SigningKey {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for SigningKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SigningKey {}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey([REDACTED])")
    }
}

impl TryFrom<&[u8]> for SigningKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

/// Verification key `(ρ, t1)`, encoded.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationKey([u8; PK_BYTES]);

impl VerificationKey {
    /// Parse an encoded verification key.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKeyLength`] unless `bytes` is exactly 1952 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        fixed::<PK_BYTES>(bytes)
            .map(Self)
            .map_err(|actual| Error::InvalidKeyLength {
                expected: PK_BYTES,
                actual,
            })
    }

    /// The encoded key.
    pub fn as_bytes(&self) -> &[u8; PK_BYTES] {
        &self.0
    }

    /// Precompute A, NTT(t1·2^d) and H(pk) for repeated verification.
    ///
    /// ```ignore
    /// let expanded = pk.expand()?;
    /// for (msg, sig) in messages_and_signatures {
    ///     MlDsa65::verify_expanded(&expanded, msg, b"", &sig)?;
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::EncodingError`] if the key does not decode.
    pub fn expand(&self) -> Result<ExpandedVerificationKey> {
        sign::expand_verification_key(&self.0).ok_or(Error::EncodingError)
    }
}

impl fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationKey(")?;
        for b in &self.0[..8] {
            write!(f, "{b:02x}")?;
        }
        f.write_str("..)")
    }
}

impl TryFrom<&[u8]> for VerificationKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for VerificationKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Signature `(c̃, z, h)`, encoded.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature([u8; SIG_BYTES]);

impl Signature {
    /// Parse an encoded signature.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSignatureLength`] unless `bytes` is exactly 3309 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        fixed::<SIG_BYTES>(bytes)
            .map(Self)
            .map_err(|actual| Error::InvalidSignatureLength {
                expected: SIG_BYTES,
                actual,
            })
    }

    /// The encoded signature.
    pub fn as_bytes(&self) -> &[u8; SIG_BYTES] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Signature(")?;
        for b in &self.0[..8] {
            write!(f, "{b:02x}")?;
        }
        f.write_str("..)")
    }
}

impl From<[u8; SIG_BYTES]> for Signature {
    fn from(bytes: [u8; SIG_BYTES]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_length_errors() {
        assert_eq!(
            SigningKey::from_bytes(&[0u8; SK_BYTES + 1]).err(),
            Some(Error::InvalidKeyLength {
                expected: SK_BYTES,
                actual: SK_BYTES + 1
            })
        );
        assert_eq!(
            VerificationKey::try_from(&[0u8; PK_BYTES - 1][..]),
            Err(Error::InvalidKeyLength {
                expected: PK_BYTES,
                actual: PK_BYTES - 1
            })
        );
        assert_eq!(
            Signature::try_from(&[0u8; 0][..]),
            Err(Error::InvalidSignatureLength {
                expected: SIG_BYTES,
                actual: 0
            })
        );
    }

    #[test]
    fn test_bytes_are_kept() {
        let mut raw = [0u8; SIG_BYTES];
        raw[0] = 0xAB;
        raw[SIG_BYTES - 1] = 0xCD;
        let sig = Signature::from_bytes(&raw).unwrap();
        assert_eq!(sig.as_bytes(), &raw);
        assert_eq!(sig, Signature::from(raw));
        assert_eq!(sig.as_ref().len(), SIG_BYTES);
    }

    #[test]
    fn test_signing_key_eq_and_debug() {
        let a = SigningKey::from_bytes(&[3u8; SK_BYTES]).unwrap();
        let mut other = [3u8; SK_BYTES];
        other[SK_BYTES - 1] = 4;
        let b = SigningKey::from_bytes(&other).unwrap();

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(format!("{a:?}"), "SigningKey([REDACTED])");
    }

    #[test]
    fn test_public_debug_is_prefix() {
        let mut raw = [0u8; PK_BYTES];
        raw[..4].copy_from_slice(&[0x42, 0x4b, 0x2f, 0x26]);
        let pk = VerificationKey::from_bytes(&raw).unwrap();
        assert_eq!(format!("{pk:?}"), "VerificationKey(424b2f2600000000..)");
    }
}
