//! Hash functions for ML-DSA
//!
//! Everything is built on SHAKE128 and SHAKE256 from FIPS 202. Multi-part
//! inputs are absorbed piece by piece, so callers never build concatenation
//! buffers (some of those pieces are secret).

use crate::params::ml_dsa_65::{C_TILDE_BYTES, CRH_BYTES, SEED_BYTES};
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake128, Shake256,
};

/// SHAKE256 in squeeze mode.
pub struct Shake256Xof {
    reader: sha3::Shake256Reader,
}

impl Shake256Xof {
    /// Absorb the concatenation of `parts` and switch to squeezing.
    pub fn absorb(parts: &[&[u8]]) -> Self {
        let mut hasher = Shake256::default();
        for part in parts {
            hasher.update(part);
        }
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

/// SHAKE128 keyed by ρ and a matrix position, used by ExpandA.
pub struct Shake128Xof {
    reader: sha3::Shake128Reader,
}

impl Shake128Xof {
    /// Rate of SHAKE128 in bytes; squeezing whole blocks avoids partial reads.
    pub const BLOCK_BYTES: usize = 168;

    /// SHAKE128(ρ ‖ j ‖ i) for entry A[i][j].
    pub fn new(rho: &[u8; SEED_BYTES], i: u8, j: u8) -> Self {
        let mut hasher = Shake128::default();
        hasher.update(rho);
        hasher.update(&[j, i]);
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    pub fn squeeze_block(&mut self, out: &mut [u8; Self::BLOCK_BYTES]) {
        self.reader.read(out);
    }
}

/// H: SHAKE256 over the concatenation of `parts`, filling `output`.
pub fn h(parts: &[&[u8]], output: &mut [u8]) {
    Shake256Xof::absorb(parts).squeeze(output);
}

/// tr = H(pk, 64).
pub fn hash_pk(pk: &[u8]) -> [u8; CRH_BYTES] {
    let mut tr = [0u8; CRH_BYTES];
    h(&[pk], &mut tr);
    tr
}

/// μ = H(tr ‖ 0x00 ‖ |ctx| ‖ ctx ‖ M, 64).
///
/// The caller has already rejected contexts longer than 255 bytes.
pub fn hash_message(tr: &[u8; CRH_BYTES], ctx: &[u8], message: &[u8]) -> [u8; CRH_BYTES] {
    debug_assert!(ctx.len() <= sigil_core::MAX_CONTEXT_LEN);
    let prefix = [0u8, ctx.len() as u8];
    let mut mu = [0u8; CRH_BYTES];
    h(&[tr.as_slice(), prefix.as_slice(), ctx, message], &mut mu);
    mu
}

/// μ = H(tr ‖ M', 64) for a message that already carries its domain prefix.
pub fn hash_message_internal(tr: &[u8; CRH_BYTES], m_prime: &[u8]) -> [u8; CRH_BYTES] {
    let mut mu = [0u8; CRH_BYTES];
    h(&[tr.as_slice(), m_prime], &mut mu);
    mu
}

/// ρ'' = H(K ‖ rnd ‖ μ, 64).
pub fn derive_rho_prime(
    key: &[u8; SEED_BYTES],
    rnd: &[u8; SEED_BYTES],
    mu: &[u8; CRH_BYTES],
) -> [u8; CRH_BYTES] {
    let mut rho_prime = [0u8; CRH_BYTES];
    h(&[key.as_slice(), rnd.as_slice(), mu.as_slice()], &mut rho_prime);
    rho_prime
}

/// c̃ = H(μ ‖ w1Encode(w1), 48).
pub fn challenge_hash(mu: &[u8; CRH_BYTES], w1_encoded: &[u8]) -> [u8; C_TILDE_BYTES] {
    let mut c_tilde = [0u8; C_TILDE_BYTES];
    h(&[mu.as_slice(), w1_encoded], &mut c_tilde);
    c_tilde
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_are_concatenated() {
        let mut split = [0u8; 32];
        let mut joined = [0u8; 32];
        h(&[b"abc".as_slice(), b"".as_slice(), b"def".as_slice()], &mut split);
        h(&[b"abcdef".as_slice()], &mut joined);
        assert_eq!(split, joined);
    }

    #[test]
    fn test_shake256_empty_known_answer() {
        // SHAKE256("") first 16 bytes
        let mut out = [0u8; 16];
        h(&[], &mut out);
        assert_eq!(
            out,
            [
                0x46, 0xb9, 0xdd, 0x2b, 0x0b, 0xa8, 0x8d, 0x13, 0x23, 0x3b, 0x3f, 0xeb, 0x74, 0x3e,
                0xeb, 0x24
            ]
        );
    }

    #[test]
    fn test_shake128_deterministic() {
        let rho = [0u8; 32];
        let mut xof1 = Shake128Xof::new(&rho, 0, 0);
        let mut xof2 = Shake128Xof::new(&rho, 0, 0);

        let mut out1 = [0u8; Shake128Xof::BLOCK_BYTES];
        let mut out2 = [0u8; Shake128Xof::BLOCK_BYTES];
        xof1.squeeze_block(&mut out1);
        xof2.squeeze_block(&mut out2);

        assert_eq!(out1, out2);
    }

    #[test]
    fn test_shake128_index_order() {
        // A[i][j] absorbs j first, so (i, j) = (0, 1) and (1, 0) must differ
        let rho = [7u8; 32];
        let mut xof1 = Shake128Xof::new(&rho, 0, 1);
        let mut xof2 = Shake128Xof::new(&rho, 1, 0);

        let mut out1 = [0u8; Shake128Xof::BLOCK_BYTES];
        let mut out2 = [0u8; Shake128Xof::BLOCK_BYTES];
        xof1.squeeze_block(&mut out1);
        xof2.squeeze_block(&mut out2);
        assert_ne!(out1, out2);

        let mut direct = [0u8; Shake128Xof::BLOCK_BYTES];
        let mut hasher = Shake128::default();
        hasher.update(&rho);
        hasher.update(&[1, 0]);
        hasher.finalize_xof().read(&mut direct);
        assert_eq!(out1, direct);
    }

    #[test]
    fn test_message_hash_binds_context() {
        let tr = [1u8; 64];
        let a = hash_message(&tr, b"", b"msg");
        let b = hash_message(&tr, b"x", b"msg");
        assert_ne!(a, b);

        // Moving a byte between context and message changes the length prefix
        let c = hash_message(&tr, b"m", b"sg");
        let d = hash_message(&tr, b"", b"msg");
        assert_ne!(c, d);
    }

    #[test]
    fn test_message_hash_matches_internal_form() {
        let tr = [9u8; 64];
        let ctx = b"context";
        let msg = b"payload";

        let mut m_prime = vec![0u8, ctx.len() as u8];
        m_prime.extend_from_slice(ctx);
        m_prime.extend_from_slice(msg);

        assert_eq!(
            hash_message(&tr, ctx, msg),
            hash_message_internal(&tr, &m_prime)
        );
    }
}
