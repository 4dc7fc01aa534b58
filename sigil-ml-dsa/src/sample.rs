//! Sampling functions for ML-DSA
//!
//! Implements ExpandA, ExpandS, ExpandMask and SampleInBall. All of them are
//! deterministic functions of their seeds. Rejection loops read whole XOF
//! blocks and keep going until the polynomial is full, so no input seed can
//! make them come up short.

use crate::hash::{Shake128Xof, Shake256Xof};
use crate::packing::unpack_bits;
use crate::params::ml_dsa_65::{
    CRH_BYTES, ETA, GAMMA1, GAMMA1_BITS, K, L, POLY_Z_PACKED_BYTES, SEED_BYTES, TAU,
};
use crate::poly::{NttPoly, Poly, N};
use crate::polyvec::{Matrix, PolyVec};
use crate::reduce::Q;
use zeroize::Zeroize;

/// SHAKE256 rate in bytes.
const SHAKE256_BLOCK_BYTES: usize = 136;

/// RejNTTPoly: a uniform polynomial in NTT form.
///
/// Three bytes per candidate, top bit cleared, kept if below q.
pub fn sample_ntt(xof: &mut Shake128Xof) -> NttPoly {
    let mut poly = NttPoly::zero();
    let mut buf = [0u8; Shake128Xof::BLOCK_BYTES];
    let mut ctr = 0;

    while ctr < N {
        xof.squeeze_block(&mut buf);
        for chunk in buf.chunks_exact(3) {
            let t = i32::from(chunk[0])
                | (i32::from(chunk[1]) << 8)
                | (i32::from(chunk[2] & 0x7F) << 16);
            if t < Q {
                poly.coeffs[ctr] = t;
                ctr += 1;
                if ctr == N {
                    break;
                }
            }
        }
    }

    poly
}

/// RejBoundedPoly for η = 4: coefficients in [-4, 4].
///
/// Each byte yields two nibbles; nibbles of 9 or more are rejected.
pub fn sample_eta(seed: &[u8; CRH_BYTES], nonce: u16) -> Poly {
    let mut poly = Poly::zero();
    let mut xof = Shake256Xof::absorb(&[seed.as_slice(), nonce.to_le_bytes().as_slice()]);
    let mut buf = [0u8; SHAKE256_BLOCK_BYTES];
    let mut ctr = 0;

    while ctr < N {
        xof.squeeze(&mut buf);
        for &byte in &buf {
            for t in [i32::from(byte & 0x0F), i32::from(byte >> 4)] {
                if ctr < N && t < 2 * ETA as i32 + 1 {
                    poly.coeffs[ctr] = ETA as i32 - t;
                    ctr += 1;
                }
            }
            if ctr == N {
                break;
            }
        }
    }

    buf.zeroize();
    poly
}

/// Masking polynomial with coefficients in (-γ1, γ1].
pub fn sample_mask(seed: &[u8; CRH_BYTES], nonce: u16) -> Poly {
    let mut buf = [0u8; POLY_Z_PACKED_BYTES];
    Shake256Xof::absorb(&[seed.as_slice(), nonce.to_le_bytes().as_slice()]).squeeze(&mut buf);

    let mut poly = Poly::zero();
    unpack_bits(&buf, GAMMA1_BITS, &mut poly.coeffs);
    for c in &mut poly.coeffs {
        *c = GAMMA1 - *c;
    }

    buf.zeroize();
    poly
}

/// SampleInBall: exactly τ coefficients in {-1, +1}, the rest 0.
pub fn sample_in_ball(c_tilde: &[u8]) -> Poly {
    let mut poly = Poly::zero();
    let mut xof = Shake256Xof::absorb(&[c_tilde]);
    let mut buf = [0u8; SHAKE256_BLOCK_BYTES];
    xof.squeeze(&mut buf);

    let mut sign_bytes = [0u8; 8];
    sign_bytes.copy_from_slice(&buf[..8]);
    let mut signs = u64::from_le_bytes(sign_bytes);
    let mut pos = 8;

    for i in (N - TAU)..N {
        let j = loop {
            if pos == buf.len() {
                xof.squeeze(&mut buf);
                pos = 0;
            }
            let j = usize::from(buf[pos]);
            pos += 1;
            if j <= i {
                break j;
            }
        };
        poly.coeffs[i] = poly.coeffs[j];
        poly.coeffs[j] = 1 - 2 * (signs & 1) as i32;
        signs >>= 1;
    }

    poly
}

/// ExpandA: the K x L public matrix, sampled straight into NTT form.
pub fn expand_a(rho: &[u8; SEED_BYTES]) -> Matrix<K, L> {
    let mut a = Matrix::<K, L>::zero();
    for (i, row) in a.rows.iter_mut().enumerate() {
        for (j, entry) in row.polys.iter_mut().enumerate() {
            let mut xof = Shake128Xof::new(rho, i as u8, j as u8);
            *entry = sample_ntt(&mut xof);
        }
    }
    a
}

/// ExpandS: (s1, s2) from ρ', nonces 0..L for s1 and L..L+K for s2.
pub fn expand_s(rho_prime: &[u8; CRH_BYTES]) -> (PolyVec<L>, PolyVec<K>) {
    let s1 = PolyVec {
        polys: core::array::from_fn(|i| sample_eta(rho_prime, i as u16)),
    };
    let s2 = PolyVec {
        polys: core::array::from_fn(|i| sample_eta(rho_prime, (L + i) as u16)),
    };
    (s1, s2)
}

/// ExpandMask: y for attempt `kappa`, nonces kappa·L + i.
pub fn expand_mask(rho_pp: &[u8; CRH_BYTES], kappa: u16) -> PolyVec<L> {
    let base = usize::from(kappa) * L;
    PolyVec {
        polys: core::array::from_fn(|i| sample_mask(rho_pp, (base + i) as u16)),
    }
}
