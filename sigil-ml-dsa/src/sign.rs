//! Core ML-DSA-65 algorithms
//!
//! Byte-level KeyGen, Sign and Verify per FIPS 204, plus the `_internal`
//! variants that take an already formatted message M' = 0 ‖ |ctx| ‖ ctx ‖ M,
//! the attached ("signed message") format, and verification against a
//! pre-expanded public key.
//!
//! Verification never returns an error: every malformed or invalid input
//! gives `false`.

use alloc::vec::Vec;

use log::{debug, error, trace};
use sigil_core::{Error, Result, MAX_CONTEXT_LEN};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::hash::{
    challenge_hash, derive_rho_prime, h, hash_message, hash_message_internal, hash_pk,
};
use crate::packing::{
    hint_weight, pk_decode, pk_encode, sig_decode, sig_encode, sk_decode, sk_encode, w1_encode,
    SecretKeyParts, SignatureParts,
};
use crate::params::ml_dsa_65::{
    BETA, CRH_BYTES, D, GAMMA1, GAMMA2, K, L, MAX_SIGN_ATTEMPTS, OMEGA, PK_BYTES, SEED_BYTES,
    SIG_BYTES, SK_BYTES,
};
use crate::poly::NttPoly;
use crate::polyvec::{Matrix, NttPolyVec, PolyVec};
use crate::rounding::{high_bits, low_bits, make_hint, power2round, use_hint};
use crate::sample::{expand_a, expand_mask, expand_s, sample_in_ball};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// c·v for a vector already in NTT form, returned in coefficient form with
/// |coefficient| < q.
fn mul_challenge<const M: usize>(c_hat: &NttPoly, v_hat: &NttPolyVec<M>) -> PolyVec<M> {
    let mut t = v_hat.pointwise_poly(c_hat);
    t.reduce();
    t.inv_ntt()
}

/// A·v in coefficient form, every coefficient in [0, q).
fn mul_matrix(a: &Matrix<K, L>, v_hat: &NttPolyVec<L>) -> PolyVec<K> {
    let mut w = a.mul_vec(v_hat);
    w.reduce();
    let mut w = w.inv_ntt();
    w.caddq();
    w
}

fn high_bits_vec(w: &PolyVec<K>) -> PolyVec<K> {
    let mut w1 = PolyVec::<K>::zero();
    for (out, p) in w1.polys.iter_mut().zip(w.polys.iter()) {
        for (o, &c) in out.coeffs.iter_mut().zip(p.coeffs.iter()) {
            *o = high_bits(c);
        }
    }
    w1
}

/// w1' = UseHint(h, w'). `w_prime` coefficients must be in [0, q).
fn apply_hints(w_prime: &PolyVec<K>, h: &PolyVec<K>) -> PolyVec<K> {
    let mut w1 = PolyVec::<K>::zero();
    for i in 0..K {
        for j in 0..w1.polys[i].coeffs.len() {
            w1.polys[i].coeffs[j] = use_hint(h.polys[i].coeffs[j], w_prime.polys[i].coeffs[j]);
        }
    }
    w1
}

/// Why a signing attempt produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    /// ‖z‖∞ ≥ γ1 − β
    ZNorm,
    /// ‖LowBits(w − c·s2)‖∞ ≥ γ2 − β
    LowBitsNorm,
    /// ‖c·t0‖∞ ≥ γ2
    Ct0Norm,
    /// More than ω hint bits
    TooManyHints,
}

enum Attempt {
    Accepted([u8; SIG_BYTES]),
    Rejected(Rejection),
}

/// The secret key in the form the signing loop consumes.
struct SigningState {
    a: Matrix<K, L>,
    s1_hat: NttPolyVec<L>,
    s2_hat: NttPolyVec<K>,
    t0_hat: NttPolyVec<K>,
}

impl SigningState {
    fn new(sk: &SecretKeyParts) -> Self {
        Self {
            a: expand_a(&sk.rho),
            s1_hat: sk.s1.to_ntt(),
            s2_hat: sk.s2.to_ntt(),
            t0_hat: sk.t0.to_ntt(),
        }
    }

    /// One pass of the rejection loop with mask nonce `kappa`.
    fn attempt(&self, mu: &[u8; CRH_BYTES], rho_pp: &[u8; CRH_BYTES], kappa: u16) -> Attempt {
        let y = Zeroizing::new(expand_mask(rho_pp, kappa));
        let y_hat = Zeroizing::new(y.to_ntt());
        let w = Zeroizing::new(mul_matrix(&self.a, &y_hat));

        let w1 = high_bits_vec(&w);
        let c_tilde = challenge_hash(mu, &w1_encode(&w1));
        let c_hat = sample_in_ball(&c_tilde).to_ntt();

        let cs1 = Zeroizing::new(mul_challenge(&c_hat, &self.s1_hat));
        let mut z = Zeroizing::new(y.add(&cs1));
        z.reduce();
        if !z.check_norm(GAMMA1 - BETA) {
            return Attempt::Rejected(Rejection::ZNorm);
        }

        // w - c·s2, brought back to [0, q)
        let cs2 = Zeroizing::new(mul_challenge(&c_hat, &self.s2_hat));
        let mut w_cs2 = Zeroizing::new(w.sub(&cs2));
        w_cs2.freeze();

        let mut r0 = Zeroizing::new(PolyVec::<K>::zero());
        for (out, p) in r0.polys.iter_mut().zip(w_cs2.polys.iter()) {
            for (o, &c) in out.coeffs.iter_mut().zip(p.coeffs.iter()) {
                *o = low_bits(c);
            }
        }
        if !r0.check_norm(GAMMA2 - BETA) {
            return Attempt::Rejected(Rejection::LowBitsNorm);
        }

        let ct0 = Zeroizing::new(mul_challenge(&c_hat, &self.t0_hat));
        if !ct0.check_norm(GAMMA2) {
            return Attempt::Rejected(Rejection::Ct0Norm);
        }

        // h = MakeHint(-c·t0, w - c·s2 + c·t0)
        let mut hints = PolyVec::<K>::zero();
        for i in 0..K {
            for j in 0..hints.polys[i].coeffs.len() {
                let t = ct0.polys[i].coeffs[j];
                hints.polys[i].coeffs[j] = make_hint(-t, w_cs2.polys[i].coeffs[j] + t);
            }
        }
        if hint_weight(&hints) > OMEGA {
            return Attempt::Rejected(Rejection::TooManyHints);
        }

        Attempt::Accepted(sig_encode(&c_tilde, &z, &hints))
    }
}

impl Drop for SigningState {
    fn drop(&mut self) {
        self.s1_hat.zeroize();
        self.s2_hat.zeroize();
        self.t0_hat.zeroize();
    }
}

/// Sign a message representative μ with randomness `rnd`.
fn sign_mu(
    sk: &SecretKeyParts,
    mu: &[u8; CRH_BYTES],
    rnd: &[u8; SEED_BYTES],
) -> Result<[u8; SIG_BYTES]> {
    let state = SigningState::new(sk);
    let rho_pp = Zeroizing::new(derive_rho_prime(&sk.key, rnd, mu));

    for kappa in 0..MAX_SIGN_ATTEMPTS {
        match state.attempt(mu, &rho_pp, kappa as u16) {
            Attempt::Accepted(sig) => {
                debug!("signature produced after {} attempt(s)", kappa + 1);
                return Ok(sig);
            }
            Attempt::Rejected(reason) => {
                trace!("signing attempt {kappa} rejected: {reason:?}");
            }
        }
    }

    error!("signing gave up after {MAX_SIGN_ATTEMPTS} attempts");
    Err(Error::SigningAttemptsExhausted {
        attempts: MAX_SIGN_ATTEMPTS,
    })
}

fn decode_signing_key(sk: &[u8]) -> Result<SecretKeyParts> {
    if sk.len() != SK_BYTES {
        return Err(Error::InvalidKeyLength {
            expected: SK_BYTES,
            actual: sk.len(),
        });
    }
    sk_decode(sk).ok_or(Error::EncodingError)
}

/// Decode a signature and apply the checks that need no public key.
fn decode_signature(sig: &[u8]) -> Option<SignatureParts> {
    if sig.len() != SIG_BYTES {
        debug!(
            "verify: signature length {} (expected {SIG_BYTES})",
            sig.len()
        );
        return None;
    }
    let Some(parts) = sig_decode(sig) else {
        debug!("verify: malformed hint encoding");
        return None;
    };
    if !parts.z.check_norm(GAMMA1 - BETA) {
        debug!("verify: z outside the norm bound");
        return None;
    }
    Some(parts)
}

// ---------------------------------------------------------------------------
// Expanded verification
// ---------------------------------------------------------------------------

/// A public key with everything `verify` derives from it precomputed: the
/// matrix A, NTT(t1·2^d) and tr = H(pk).
///
/// Worth building once a key is used for more than one verification.
#[derive(Clone)]
pub struct ExpandedVerificationKey {
    pub(crate) a_hat: Matrix<K, L>,
    pub(crate) t1_2d_hat: NttPolyVec<K>,
    pub(crate) tr: [u8; CRH_BYTES],
}

/// Expand an encoded public key. Returns `None` unless `pk` is exactly
/// 1952 bytes.
pub fn expand_verification_key(pk: &[u8]) -> Option<ExpandedVerificationKey> {
    let Some(parts) = pk_decode(pk) else {
        debug!(
            "verify: public key length {} (expected {PK_BYTES})",
            pk.len()
        );
        return None;
    };

    let mut t1 = parts.t1;
    t1.shift_left(D as u32);

    Some(ExpandedVerificationKey {
        a_hat: expand_a(&parts.rho),
        t1_2d_hat: t1.to_ntt(),
        tr: hash_pk(pk),
    })
}

fn verify_mu(vk: &ExpandedVerificationKey, mu: &[u8; CRH_BYTES], sig: &SignatureParts) -> bool {
    let c_hat = sample_in_ball(&sig.c_tilde).to_ntt();

    // w' = A·z − c·t1·2^d
    let mut w = vk.a_hat.mul_vec(&sig.z.to_ntt());
    w.sub_assign(&vk.t1_2d_hat.pointwise_poly(&c_hat));
    w.reduce();
    let mut w = w.inv_ntt();
    w.caddq();

    let w1 = apply_hints(&w, &sig.h);
    let c_tilde = challenge_hash(mu, &w1_encode(&w1));

    let ok = bool::from(c_tilde.as_slice().ct_eq(sig.c_tilde.as_slice()));
    if !ok {
        debug!("verify: challenge mismatch");
    }
    ok
}

/// Verify with a pre-expanded public key. Same result as [`verify`] on the
/// key it was expanded from.
pub fn verify_expanded(
    vk: &ExpandedVerificationKey,
    message: &[u8],
    ctx: &[u8],
    sig: &[u8],
) -> bool {
    if ctx.len() > MAX_CONTEXT_LEN {
        debug!("verify: context of {} bytes", ctx.len());
        return false;
    }
    let Some(parts) = decode_signature(sig) else {
        return false;
    };
    let mu = hash_message(&vk.tr, ctx, message);
    verify_mu(vk, &mu, &parts)
}

// ---------------------------------------------------------------------------
// ML-DSA.KeyGen (Algorithm 1 / 6)
// ---------------------------------------------------------------------------

/// ML-DSA.KeyGen_internal: derive (sk, pk) from the 32-byte seed ξ.
pub fn keygen_internal(xi: &[u8; SEED_BYTES]) -> (Zeroizing<[u8; SK_BYTES]>, [u8; PK_BYTES]) {
    // (ρ, ρ', K) = H(ξ ‖ k ‖ l, 128)
    let dims = [K as u8, L as u8];
    let mut expanded = Zeroizing::new([0u8; 2 * SEED_BYTES + CRH_BYTES]);
    h(&[xi.as_slice(), dims.as_slice()], expanded.as_mut_slice());

    let mut rho = [0u8; SEED_BYTES];
    let mut rho_prime = Zeroizing::new([0u8; CRH_BYTES]);
    let mut key = [0u8; SEED_BYTES];
    rho.copy_from_slice(&expanded[..SEED_BYTES]);
    rho_prime.copy_from_slice(&expanded[SEED_BYTES..SEED_BYTES + CRH_BYTES]);
    key.copy_from_slice(&expanded[SEED_BYTES + CRH_BYTES..]);

    let a = expand_a(&rho);
    let (s1, s2) = expand_s(&rho_prime);

    // t = A·s1 + s2
    let s1_hat = Zeroizing::new(s1.to_ntt());
    let mut t = Zeroizing::new(mul_matrix(&a, &s1_hat));
    t.add_assign(&s2);
    t.freeze();

    let mut t1 = PolyVec::<K>::zero();
    let mut t0 = PolyVec::<K>::zero();
    for i in 0..K {
        for j in 0..t.polys[i].coeffs.len() {
            let (hi, lo) = power2round(t.polys[i].coeffs[j]);
            t1.polys[i].coeffs[j] = hi;
            t0.polys[i].coeffs[j] = lo;
        }
    }

    let pk = pk_encode(&rho, &t1);
    let parts = SecretKeyParts {
        rho,
        key,
        tr: hash_pk(&pk),
        s1,
        s2,
        t0,
    };
    key.zeroize();

    (Zeroizing::new(sk_encode(&parts)), pk)
}

// ---------------------------------------------------------------------------
// ML-DSA.Sign (Algorithm 2 / 7)
// ---------------------------------------------------------------------------

/// ML-DSA.Sign_internal on a pre-formatted message M'.
///
/// No context check happens here; M' is hashed as is.
pub fn sign_internal(
    sk: &[u8],
    m_prime: &[u8],
    rnd: &[u8; SEED_BYTES],
) -> Result<[u8; SIG_BYTES]> {
    let parts = decode_signing_key(sk)?;
    let mu = hash_message_internal(&parts.tr, m_prime);
    sign_mu(&parts, &mu, rnd)
}

/// ML-DSA.Sign with context string `ctx`.
///
/// `rnd` is 32 zero bytes for deterministic signing or 32 fresh random
/// bytes for hedged signing.
pub fn sign(
    sk: &[u8],
    message: &[u8],
    ctx: &[u8],
    rnd: &[u8; SEED_BYTES],
) -> Result<[u8; SIG_BYTES]> {
    if ctx.len() > MAX_CONTEXT_LEN {
        return Err(Error::ContextTooLong { len: ctx.len() });
    }
    let parts = decode_signing_key(sk)?;
    let mu = hash_message(&parts.tr, ctx, message);
    sign_mu(&parts, &mu, rnd)
}

/// Signed-message form: sig ‖ M.
pub fn sign_attached(
    sk: &[u8],
    message: &[u8],
    ctx: &[u8],
    rnd: &[u8; SEED_BYTES],
) -> Result<Vec<u8>> {
    let sig = sign(sk, message, ctx, rnd)?;
    let mut signed = Vec::with_capacity(SIG_BYTES + message.len());
    signed.extend_from_slice(&sig);
    signed.extend_from_slice(message);
    Ok(signed)
}

// ---------------------------------------------------------------------------
// ML-DSA.Verify (Algorithm 3 / 8)
// ---------------------------------------------------------------------------

/// ML-DSA.Verify_internal on a pre-formatted message M'.
pub fn verify_internal(pk: &[u8], m_prime: &[u8], sig: &[u8]) -> bool {
    let Some(parts) = decode_signature(sig) else {
        return false;
    };
    let Some(vk) = expand_verification_key(pk) else {
        return false;
    };
    let mu = hash_message_internal(&vk.tr, m_prime);
    verify_mu(&vk, &mu, &parts)
}

/// ML-DSA.Verify with context string `ctx`.
pub fn verify(pk: &[u8], message: &[u8], ctx: &[u8], sig: &[u8]) -> bool {
    if ctx.len() > MAX_CONTEXT_LEN {
        debug!("verify: context of {} bytes", ctx.len());
        return false;
    }
    let Some(parts) = decode_signature(sig) else {
        return false;
    };
    let Some(vk) = expand_verification_key(pk) else {
        return false;
    };
    let mu = hash_message(&vk.tr, ctx, message);
    verify_mu(&vk, &mu, &parts)
}

/// Check a signed message and return the message part.
///
/// Any failure, including input too short to hold a signature, is
/// [`Error::VerificationFailed`].
pub fn open_attached(pk: &[u8], signed: &[u8], ctx: &[u8]) -> Result<Vec<u8>> {
    if signed.len() < SIG_BYTES {
        debug!("open: {} bytes cannot hold a signature", signed.len());
        return Err(Error::VerificationFailed);
    }
    let (sig, message) = signed.split_at(SIG_BYTES);
    if verify(pk, message, ctx, sig) {
        Ok(message.to_vec())
    } else {
        Err(Error::VerificationFailed)
    }
}
