//! Vectors of polynomials and the public matrix A

use crate::poly::{NttPoly, Poly};
use subtle::Choice;
use zeroize::Zeroize;

/// M polynomials in coefficient form.
#[derive(Clone, Zeroize)]
pub struct PolyVec<const M: usize> {
    pub polys: [Poly; M],
}

/// M polynomials in NTT form.
#[derive(Clone, Zeroize)]
pub struct NttPolyVec<const M: usize> {
    pub polys: [NttPoly; M],
}

impl<const M: usize> PolyVec<M> {
    /// The zero vector.
    pub fn zero() -> Self {
        Self {
            polys: core::array::from_fn(|_| Poly::zero()),
        }
    }

    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut r = self.clone();
        r.add_assign(other);
        r
    }

    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            a.add_assign(b);
        }
    }

    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        let mut r = self.clone();
        for (a, b) in r.polys.iter_mut().zip(other.polys.iter()) {
            a.sub_assign(b);
        }
        r
    }

    pub fn reduce(&mut self) {
        self.polys.iter_mut().for_each(Poly::reduce);
    }

    pub fn caddq(&mut self) {
        self.polys.iter_mut().for_each(Poly::caddq);
    }

    pub fn freeze(&mut self) {
        self.polys.iter_mut().for_each(Poly::freeze);
    }

    /// Forward NTT of every entry.
    #[must_use]
    pub fn to_ntt(&self) -> NttPolyVec<M> {
        NttPolyVec {
            polys: core::array::from_fn(|i| self.polys[i].to_ntt()),
        }
    }

    pub fn shift_left(&mut self, d: u32) {
        for p in &mut self.polys {
            p.shift_left(d);
        }
    }

    /// Infinity norm check over the whole vector.
    ///
    /// Every polynomial is scanned even after a violation has been seen; the
    /// `Choice` is only collapsed to a `bool` at the end.
    pub fn check_norm(&self, bound: i32) -> bool {
        let mut pass = Choice::from(1u8);
        for p in &self.polys {
            pass &= p.check_norm_ct(bound);
        }
        bool::from(pass)
    }
}

impl<const M: usize> NttPolyVec<M> {
    /// The zero vector.
    pub fn zero() -> Self {
        Self {
            polys: core::array::from_fn(|_| NttPoly::zero()),
        }
    }

    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            a.sub_assign(b);
        }
    }

    pub fn reduce(&mut self) {
        self.polys.iter_mut().for_each(NttPoly::reduce);
    }

    /// Inverse NTT of every entry.
    #[must_use]
    pub fn inv_ntt(self) -> PolyVec<M> {
        let mut src = self;
        let out = PolyVec {
            polys: core::array::from_fn(|i| src.polys[i].clone().inv_ntt()),
        };
        src.zeroize();
        out
    }

    /// Multiply every entry by the same polynomial: r_i = c ∘ v_i.
    #[must_use]
    pub fn pointwise_poly(&self, c: &NttPoly) -> Self {
        Self {
            polys: core::array::from_fn(|i| c.pointwise_mul(&self.polys[i])),
        }
    }
}

/// The K x L matrix A, always held in NTT form.
#[derive(Clone)]
pub struct Matrix<const K: usize, const L: usize> {
    pub rows: [NttPolyVec<L>; K],
}

impl<const K: usize, const L: usize> Matrix<K, L> {
    pub fn zero() -> Self {
        Self {
            rows: core::array::from_fn(|_| NttPolyVec::zero()),
        }
    }

    /// A ∘ v, accumulating each row in the NTT domain.
    pub fn mul_vec(&self, v: &NttPolyVec<L>) -> NttPolyVec<K> {
        let mut t = NttPolyVec::<K>::zero();
        for (row, out) in self.rows.iter().zip(t.polys.iter_mut()) {
            for (a, b) in row.polys.iter().zip(v.polys.iter()) {
                out.pointwise_mul_acc(a, b);
            }
        }
        t
    }
}
