//! Modular arithmetic for ML-DSA
//!
//! All operations are performed modulo q = 8380417 = 2^23 - 2^13 + 1.
//! Every function here is branch-free so it can be applied to secret data.

/// The prime modulus q = 8380417
pub const Q: i32 = 8_380_417;

/// (Q - 1) / 2 = 4190208
pub const Q_HALF: i32 = (Q - 1) / 2;

/// q^(-1) mod 2^32 for Montgomery reduction
pub const QINV: i32 = 58_728_449;

/// 2^64 mod q, used to move a value into Montgomery form
#[cfg(test)]
pub const MONT_R2: i64 = 2_365_951;

/// Barrett-style reduction to a small representative.
///
/// Input: a <= 2^31 - 2^22 - 1
/// Output: r ≡ a (mod q) with -6283008 <= r <= 6283008
#[inline]
pub const fn reduce32(a: i32) -> i32 {
    // 2^23 ≈ q, so round(a / 2^23) is within one of round(a / q)
    let t = (a + (1 << 22)) >> 23;
    a - t * Q
}

/// Conditionally add q: maps (-q, q) into [0, q).
#[inline]
pub const fn caddq(a: i32) -> i32 {
    a + (Q & (a >> 31))
}

/// Freeze: reduce to the canonical representative in [0, q-1].
#[inline]
pub const fn freeze(a: i32) -> i32 {
    caddq(reduce32(a))
}

/// Map a canonical residue in [0, q) to its centered representative in
/// [-(q-1)/2, (q-1)/2].
#[inline]
pub const fn center(a: i32) -> i32 {
    // mask = -1 when a > (q-1)/2
    let mask = (Q_HALF - a) >> 31;
    a - (Q & mask)
}

/// Montgomery reduction: compute a * 2^(-32) mod q.
///
/// Input: |a| < q * 2^31
/// Output: r ≡ a * 2^(-32) (mod q) with |r| < q
#[inline]
pub const fn montgomery_reduce(a: i64) -> i32 {
    let t = (a as i32).wrapping_mul(QINV);
    ((a - (t as i64) * (Q as i64)) >> 32) as i32
}

/// Montgomery multiplication: compute a * b * 2^(-32) mod q.
#[inline]
pub const fn montgomery_mul(a: i32, b: i32) -> i32 {
    montgomery_reduce((a as i64) * (b as i64))
}

/// Convert to Montgomery form: a * 2^32 mod q.
#[cfg(test)]
pub const fn to_mont(a: i32) -> i32 {
    montgomery_reduce((a as i64) * MONT_R2)
}
