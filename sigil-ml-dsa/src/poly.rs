//! Polynomial arithmetic for ML-DSA
//!
//! Polynomials are elements of the ring R_q = Z_q[X] / (X^256 + 1)
//! where q = 8380417.
//!
//! Two representations exist and are kept apart by the type system:
//! [`Poly`] holds coefficients, [`NttPoly`] holds NTT-domain evaluations.
//! The only ways across are [`Poly::to_ntt`] and [`NttPoly::inv_ntt`], and
//! pointwise multiplication is only defined on [`NttPoly`].

use crate::ntt::{inv_ntt, ntt};
use crate::reduce::{caddq, center, freeze, montgomery_mul, reduce32};
use subtle::{Choice, ConstantTimeGreater};
use zeroize::Zeroize;

/// Ring dimension N = 256
pub const N: usize = 256;

fn map_coeffs(coeffs: &mut [i32; N], f: impl Fn(i32) -> i32) {
    for c in coeffs {
        *c = f(*c);
    }
}

/// A polynomial in coefficient (normal) form.
#[derive(Clone, Zeroize)]
pub struct Poly {
    /// Coefficients in Z_q
    pub coeffs: [i32; N],
}

/// A polynomial in NTT form.
#[derive(Clone, Zeroize)]
pub struct NttPoly {
    /// Evaluations at the 256 roots of X^256 + 1
    pub coeffs: [i32; N],
}

impl Poly {
    /// The zero polynomial.
    #[inline]
    pub const fn zero() -> Self {
        Self { coeffs: [0; N] }
    }

    /// Create a polynomial from coefficients.
    #[inline]
    pub const fn new(coeffs: [i32; N]) -> Self {
        Self { coeffs }
    }

    /// Reduce all coefficients to a small representative (|c| <= 6283008).
    pub fn reduce(&mut self) {
        map_coeffs(&mut self.coeffs, reduce32);
    }

    /// Map coefficients in (-q, q) into [0, q).
    pub fn caddq(&mut self) {
        map_coeffs(&mut self.coeffs, caddq);
    }

    /// Reduce all coefficients to the canonical range [0, q-1].
    pub fn freeze(&mut self) {
        map_coeffs(&mut self.coeffs, freeze);
    }

    /// self += other, without reduction.
    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a += *b;
        }
    }

    /// self -= other, without reduction.
    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a -= *b;
        }
    }

    /// Forward NTT. Input coefficients must satisfy |c| < q.
    #[must_use]
    pub fn to_ntt(&self) -> NttPoly {
        let mut coeffs = self.coeffs;
        ntt(&mut coeffs);
        let out = NttPoly { coeffs };
        coeffs.zeroize();
        out
    }

    /// Shift coefficients left by d bits: self = self << d.
    pub fn shift_left(&mut self, d: u32) {
        for c in &mut self.coeffs {
            *c <<= d;
        }
    }

    /// Infinity-norm check: every coefficient satisfies |c mod± q| < bound.
    ///
    /// Scans all coefficients regardless of where a violation occurs, so the
    /// running time is independent of the coefficient values. Accepts any
    /// representative with |c| < 2^31 - 2^22. Non-positive bounds always fail.
    pub(crate) fn check_norm_ct(&self, bound: i32) -> Choice {
        if bound <= 0 {
            return Choice::from(0u8);
        }

        let limit = (bound - 1) as u32;
        let mut fail = Choice::from(0u8);
        for &c in &self.coeffs {
            let t = center(freeze(c));
            // |t| without a branch: t ^ (t >> 31) - (t >> 31)
            let sign = t >> 31;
            let abs = ((t ^ sign) - sign) as u32;
            fail |= abs.ct_gt(&limit);
        }
        !fail
    }
}

impl NttPoly {
    /// The zero polynomial.
    #[inline]
    pub const fn zero() -> Self {
        Self { coeffs: [0; N] }
    }

    /// Reduce all evaluations to a small representative (|c| <= 6283008).
    pub fn reduce(&mut self) {
        map_coeffs(&mut self.coeffs, reduce32);
    }

    /// self -= other, without reduction.
    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a -= *b;
        }
    }

    /// Inverse NTT. The result carries an extra factor of 2^32, which cancels
    /// against the 2^-32 of one Montgomery product.
    #[must_use]
    pub fn inv_ntt(mut self) -> Poly {
        inv_ntt(&mut self.coeffs);
        Poly::new(self.coeffs)
    }

    /// Pointwise Montgomery product: r_i = a_i * b_i * 2^-32.
    #[must_use]
    pub fn pointwise_mul(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..N {
            r.coeffs[i] = montgomery_mul(self.coeffs[i], other.coeffs[i]);
        }
        r
    }

    /// Pointwise multiply and accumulate: self += a ∘ b.
    pub fn pointwise_mul_acc(&mut self, a: &Self, b: &Self) {
        for i in 0..N {
            self.coeffs[i] += montgomery_mul(a.coeffs[i], b.coeffs[i]);
        }
    }
}
