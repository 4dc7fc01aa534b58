//! Rounding functions for ML-DSA-65
//!
//! Implements Power2Round, Decompose, HighBits, LowBits, MakeHint, UseHint
//! for γ2 = (q-1)/32, where there are 16 high-bit buckets of width 2γ2.

use crate::params::ml_dsa_65::{D, GAMMA2};
use crate::reduce::{freeze, Q};
use subtle::{ConditionallySelectable, ConstantTimeEq};

/// Number of distinct high-bit values, (q-1) / 2γ2.
pub const HIGH_BITS_MODULUS: i32 = 16;

/// Power2Round: r = r1·2^13 + r0 with r0 in (-2^12, 2^12].
///
/// Input: r in [0, q-1]
#[inline]
pub fn power2round(r: i32) -> (i32, i32) {
    let r1 = (r + (1 << (D - 1)) - 1) >> D;
    let r0 = r - (r1 << D);
    (r1, r0)
}

/// Decompose: r = r1·2γ2 + r0 with r1 in [0, 16) and r0 in (-γ2, γ2].
///
/// Input: r in [0, q-1]. The top bucket would give r - r0 = q - 1; it is
/// folded onto r1 = 0 with r0 one smaller, which is what the centering step
/// below does implicitly.
#[inline]
pub fn decompose(r: i32) -> (i32, i32) {
    // ceil(r / 128), then round(x / 4096) via x·1025 / 2^22
    let mut r1 = (r + 127) >> 7;
    r1 = (r1 * 1025 + (1 << 21)) >> 22;
    r1 &= HIGH_BITS_MODULUS - 1;

    let mut r0 = r - r1 * 2 * GAMMA2;
    r0 -= (((Q - 1) / 2 - r0) >> 31) & Q;

    (r1, r0)
}

#[inline]
pub fn high_bits(r: i32) -> i32 {
    decompose(r).0
}

#[inline]
pub fn low_bits(r: i32) -> i32 {
    decompose(r).1
}

/// MakeHint: 1 if HighBits(r) != HighBits(r + z), else 0.
///
/// Both inputs may be any representative with |x| < 2^30. Constant-time.
#[inline]
pub fn make_hint(z: i32, r: i32) -> i32 {
    let h0 = high_bits(freeze(r));
    let h1 = high_bits(freeze(r + z));

    let equal = (h0 as u32).ct_eq(&(h1 as u32));
    u32::conditional_select(&1u32, &0u32, equal) as i32
}

/// UseHint: the high bits of r, moved one bucket towards r0 when hinted.
///
/// Only ever applied to public values during verification.
#[inline]
pub fn use_hint(hint: i32, r: i32) -> i32 {
    let (r1, r0) = decompose(r);

    if hint == 0 {
        r1
    } else if r0 > 0 {
        (r1 + 1) & (HIGH_BITS_MODULUS - 1)
    } else {
        (r1 - 1) & (HIGH_BITS_MODULUS - 1)
    }
}
