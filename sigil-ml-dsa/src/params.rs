//! ML-DSA parameters
//!
//! The const items in [`ml_dsa_65`] size every array in the crate.
//! [`ParameterSet`] bundles the same numbers as a value for callers that want
//! to inspect them at runtime.

use crate::reduce::Q;

/// Parameters shared by every ML-DSA variant.
pub mod common {
    use super::*;

    /// Ring dimension
    pub const N: usize = 256;

    /// Modulus q = 8380417
    pub const Q_VAL: i32 = Q;

    /// Number of bits in q (23)
    pub const Q_BITS: usize = 23;

    /// Dropped bits in Power2Round (13)
    pub const D: usize = 13;

    /// Seed size in bytes
    pub const SEED_BYTES: usize = 32;

    /// CRH output size in bytes (64)
    pub const CRH_BYTES: usize = 64;
}

/// ML-DSA-65 parameters (NIST Level 3)
pub mod ml_dsa_65 {
    pub use super::common::*;

    /// Number of rows in matrix A
    pub const K: usize = 6;
    /// Number of columns in matrix A
    pub const L: usize = 5;
    /// Noise parameter for secret
    pub const ETA: usize = 4;
    /// Number of +/-1 coefficients in challenge
    pub const TAU: usize = 49;
    /// Bound on c·s (TAU * ETA)
    pub const BETA: i32 = 196;
    /// Masking range for y
    pub const GAMMA1: i32 = 1 << 19;
    /// Bits per coefficient of z
    pub const GAMMA1_BITS: u32 = 20;
    /// Low-order rounding range
    pub const GAMMA2: i32 = (Q_VAL - 1) / 32; // 261888
    /// Maximum number of hint ones
    pub const OMEGA: usize = 55;

    /// Challenge seed size (2λ/8 where λ=192)
    pub const C_TILDE_BYTES: usize = 48;

    /// Encoded polynomial size (t1, 10 bits)
    pub const POLY_T1_PACKED_BYTES: usize = 320;
    /// Encoded polynomial size (t0, 13 bits)
    pub const POLY_T0_PACKED_BYTES: usize = 416;
    /// Encoded polynomial size (eta=4, 4 bits)
    pub const POLY_ETA_PACKED_BYTES: usize = 128;
    /// Encoded polynomial size (z, 20 bits)
    pub const POLY_Z_PACKED_BYTES: usize = 640;
    /// Encoded polynomial size (w1, 4 bits)
    pub const POLY_W1_PACKED_BYTES: usize = 128;

    /// Public key size in bytes
    pub const PK_BYTES: usize = SEED_BYTES + K * POLY_T1_PACKED_BYTES;
    /// Secret key size in bytes
    pub const SK_BYTES: usize = 2 * SEED_BYTES
        + CRH_BYTES
        + (L + K) * POLY_ETA_PACKED_BYTES
        + K * POLY_T0_PACKED_BYTES;
    /// Hint encoding size in bytes
    pub const HINT_BYTES: usize = OMEGA + K;
    /// Signature size in bytes
    pub const SIG_BYTES: usize = C_TILDE_BYTES + L * POLY_Z_PACKED_BYTES + HINT_BYTES;
    /// Size of w1Encode output
    pub const W1_BYTES: usize = K * POLY_W1_PACKED_BYTES;

    /// Rejection-loop iterations before signing gives up. The expected count
    /// is about 5, so hitting this means something is wrong with the key.
    pub const MAX_SIGN_ATTEMPTS: u32 = 1000;

    const _: () = assert!(PK_BYTES == 1952);
    const _: () = assert!(SK_BYTES == 4032);
    const _: () = assert!(SIG_BYTES == 3309);
    const _: () = assert!(BETA == (TAU * ETA) as i32);
}

/// The numbers that define an ML-DSA parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParameterSet {
    /// Display name, e.g. `"ML-DSA-65"`.
    pub name: &'static str,
    /// Modulus.
    pub q: i32,
    /// Ring dimension.
    pub n: usize,
    /// Bits dropped from t.
    pub d: usize,
    /// Rows of A.
    pub k: usize,
    /// Columns of A.
    pub l: usize,
    /// Secret coefficient bound.
    pub eta: usize,
    /// Challenge weight.
    pub tau: usize,
    /// τ·η.
    pub beta: i32,
    /// Mask range.
    pub gamma1: i32,
    /// Low-bits range.
    pub gamma2: i32,
    /// Hint weight limit.
    pub omega: usize,
    /// Collision strength λ in bits; c̃ is λ/4 bytes.
    pub lambda: usize,
    /// Encoded public key size.
    pub pk_bytes: usize,
    /// Encoded secret key size.
    pub sk_bytes: usize,
    /// Encoded signature size.
    pub sig_bytes: usize,
}

impl ParameterSet {
    /// Size of the commitment hash c̃.
    pub const fn c_tilde_bytes(&self) -> usize {
        self.lambda / 4
    }
}

/// ML-DSA-65 as a value.
pub const ML_DSA_65: ParameterSet = {
    use ml_dsa_65::*;
    ParameterSet {
        name: "ML-DSA-65",
        q: Q_VAL,
        n: N,
        d: D,
        k: K,
        l: L,
        eta: ETA,
        tau: TAU,
        beta: BETA,
        gamma1: GAMMA1,
        gamma2: GAMMA2,
        omega: OMEGA,
        lambda: 192,
        pk_bytes: PK_BYTES,
        sk_bytes: SK_BYTES,
        sig_bytes: SIG_BYTES,
    }
};
