//! Packing functions for ML-DSA-65
//!
//! Every encoding here is a dense little-endian bitstream: coefficient i
//! occupies bits [i·w, (i+1)·w) of its polynomial's slice. Signed ranges
//! [-a, b] are stored as b - c so the packed values are non-negative.
//!
//! Decoders take exactly-sized input and report malformed encodings with
//! `None`; the public layer turns that into an error.

use crate::params::ml_dsa_65::{
    CRH_BYTES, C_TILDE_BYTES, D, ETA, GAMMA1, GAMMA1_BITS, HINT_BYTES, K, L, OMEGA, PK_BYTES,
    POLY_ETA_PACKED_BYTES, POLY_T0_PACKED_BYTES, POLY_T1_PACKED_BYTES, POLY_W1_PACKED_BYTES,
    POLY_Z_PACKED_BYTES, SEED_BYTES, SIG_BYTES, SK_BYTES, W1_BYTES,
};
use crate::poly::Poly;
use crate::polyvec::PolyVec;
use crate::reduce::{center, freeze};
use zeroize::{Zeroize, ZeroizeOnDrop};

const T0_BOUND: i32 = 1 << (D - 1);

// ---------------------------------------------------------------------------
// Bit-level primitives
// ---------------------------------------------------------------------------

/// Pack `width`-bit values densely into `out`, least significant bit first.
///
/// Only the low `width` bits of each value are used. `out` must hold exactly
/// the packed length.
pub fn pack_bits<I: IntoIterator<Item = u32>>(values: I, width: u32, out: &mut [u8]) {
    debug_assert!(width > 0 && width <= 24);
    let mask = (1u64 << width) - 1;
    let mut acc = 0u64;
    let mut bits = 0u32;
    let mut pos = 0;

    for v in values {
        acc |= (u64::from(v) & mask) << bits;
        bits += width;
        while bits >= 8 {
            out[pos] = acc as u8;
            pos += 1;
            acc >>= 8;
            bits -= 8;
        }
    }
    if bits > 0 {
        out[pos] = acc as u8;
        pos += 1;
    }
    debug_assert_eq!(pos, out.len());
}

/// Inverse of [`pack_bits`]: read `out.len()` values of `width` bits each.
pub fn unpack_bits(input: &[u8], width: u32, out: &mut [i32]) {
    debug_assert!(width > 0 && width <= 24);
    debug_assert_eq!(input.len() * 8, out.len() * width as usize);
    let mask = (1u64 << width) - 1;
    let mut acc = 0u64;
    let mut bits = 0u32;
    let mut bytes = input.iter();

    for o in out.iter_mut() {
        while bits < width {
            acc |= u64::from(bytes.next().copied().unwrap_or(0)) << bits;
            bits += 8;
        }
        *o = (acc & mask) as i32;
        acc >>= width;
        bits -= width;
    }
}

/// Bits needed to hold every value in [0, max].
const fn bit_len(max: i32) -> u32 {
    32 - (max as u32).leading_zeros()
}

/// SimpleBitPack: coefficients in [0, 2^width).
pub fn simple_bit_pack(poly: &Poly, width: u32, out: &mut [u8]) {
    pack_bits(poly.coeffs.iter().map(|&c| c as u32), width, out);
}

/// SimpleBitUnpack.
pub fn simple_bit_unpack(input: &[u8], width: u32) -> Poly {
    let mut poly = Poly::zero();
    unpack_bits(input, width, &mut poly.coeffs);
    poly
}

/// BitPack: coefficients in [-a, b], stored as b - c.
pub fn bit_pack(poly: &Poly, a: i32, b: i32, out: &mut [u8]) {
    pack_bits(
        poly.coeffs.iter().map(|&c| (b - c) as u32),
        bit_len(a + b),
        out,
    );
}

/// BitUnpack: the inverse of [`bit_pack`]. Values above a + b are not
/// rejected here; callers that need that check do it themselves.
pub fn bit_unpack(input: &[u8], a: i32, b: i32) -> Poly {
    let mut poly = Poly::zero();
    unpack_bits(input, bit_len(a + b), &mut poly.coeffs);
    for c in &mut poly.coeffs {
        *c = b - *c;
    }
    poly
}

// ---------------------------------------------------------------------------
// Per-polynomial encodings
// ---------------------------------------------------------------------------

pub fn pack_t1(poly: &Poly, out: &mut [u8]) {
    debug_assert_eq!(out.len(), POLY_T1_PACKED_BYTES);
    simple_bit_pack(poly, 10, out);
}

pub fn unpack_t1(input: &[u8]) -> Poly {
    simple_bit_unpack(input, 10)
}

pub fn pack_t0(poly: &Poly, out: &mut [u8]) {
    debug_assert_eq!(out.len(), POLY_T0_PACKED_BYTES);
    bit_pack(poly, T0_BOUND - 1, T0_BOUND, out);
}

pub fn unpack_t0(input: &[u8]) -> Poly {
    bit_unpack(input, T0_BOUND - 1, T0_BOUND)
}

pub fn pack_eta(poly: &Poly, out: &mut [u8]) {
    debug_assert_eq!(out.len(), POLY_ETA_PACKED_BYTES);
    bit_pack(poly, ETA as i32, ETA as i32, out);
}

/// Unpack s1/s2 coefficients. Returns `None` if any nibble exceeds 2η.
///
/// All nibbles are inspected before deciding, so the time taken does not
/// depend on where a bad nibble sits.
pub fn unpack_eta(input: &[u8]) -> Option<Poly> {
    let mut poly = bit_unpack(input, ETA as i32, ETA as i32);
    let mut bad = 0i32;
    for &c in &poly.coeffs {
        // c = η - v, so v > 2η is c < -η
        bad |= c + ETA as i32;
    }
    if bad < 0 {
        poly.zeroize();
        return None;
    }
    Some(poly)
}

/// Pack z. Coefficients may be any representative of a value in
/// (-γ1, γ1]; they are centered first.
pub fn pack_z(poly: &Poly, out: &mut [u8]) {
    debug_assert_eq!(out.len(), POLY_Z_PACKED_BYTES);
    pack_bits(
        poly.coeffs
            .iter()
            .map(|&c| (GAMMA1 - center(freeze(c))) as u32),
        GAMMA1_BITS,
        out,
    );
}

pub fn unpack_z(input: &[u8]) -> Poly {
    bit_unpack(input, GAMMA1 - 1, GAMMA1)
}

pub fn pack_w1(poly: &Poly, out: &mut [u8]) {
    debug_assert_eq!(out.len(), POLY_W1_PACKED_BYTES);
    simple_bit_pack(poly, 4, out);
}

/// w1Encode: the commitment bytes hashed into c̃.
pub fn w1_encode(w1: &PolyVec<K>) -> [u8; W1_BYTES] {
    let mut out = [0u8; W1_BYTES];
    for (p, chunk) in w1
        .polys
        .iter()
        .zip(out.chunks_exact_mut(POLY_W1_PACKED_BYTES))
    {
        pack_w1(p, chunk);
    }
    out
}

// ---------------------------------------------------------------------------
// Hints
// ---------------------------------------------------------------------------

/// HintBitPack. Each row of `h` holds 0/1 values and the total weight is at
/// most ω (the signer rejects heavier hints before getting here).
pub fn pack_hints(h: &PolyVec<K>, out: &mut [u8]) {
    debug_assert_eq!(out.len(), HINT_BYTES);
    out.fill(0);
    let mut index = 0;
    for (i, p) in h.polys.iter().enumerate() {
        for (j, &bit) in p.coeffs.iter().enumerate() {
            if bit != 0 {
                debug_assert!(index < OMEGA);
                out[index] = j as u8;
                index += 1;
            }
        }
        out[OMEGA + i] = index as u8;
    }
}

/// HintBitUnpack with the canonical-form checks.
///
/// Rejects cumulative counts that decrease or exceed ω, positions that are
/// not strictly increasing within a row, and nonzero bytes after the last
/// used position. Without these checks one signature would have several
/// valid encodings.
pub fn unpack_hints(input: &[u8]) -> Option<PolyVec<K>> {
    if input.len() != HINT_BYTES {
        return None;
    }

    let mut h = PolyVec::<K>::zero();
    let mut index = 0usize;
    for i in 0..K {
        let end = usize::from(input[OMEGA + i]);
        if end < index || end > OMEGA {
            return None;
        }
        let first = index;
        while index < end {
            if index > first && input[index - 1] >= input[index] {
                return None;
            }
            h.polys[i].coeffs[usize::from(input[index])] = 1;
            index += 1;
        }
    }

    if input[index..OMEGA].iter().any(|&b| b != 0) {
        return None;
    }

    Some(h)
}

/// Number of set hint bits.
pub fn hint_weight(h: &PolyVec<K>) -> usize {
    h.polys
        .iter()
        .map(|p| p.coeffs.iter().filter(|&&c| c != 0).count())
        .sum()
}

// ---------------------------------------------------------------------------
// Keys and signatures
// ---------------------------------------------------------------------------

/// Decoded public key.
pub struct PublicKeyParts {
    pub rho: [u8; SEED_BYTES],
    pub t1: PolyVec<K>,
}

/// Decoded secret key. Wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKeyParts {
    pub rho: [u8; SEED_BYTES],
    pub key: [u8; SEED_BYTES],
    pub tr: [u8; CRH_BYTES],
    pub s1: PolyVec<L>,
    pub s2: PolyVec<K>,
    pub t0: PolyVec<K>,
}

/// Decoded signature.
pub struct SignatureParts {
    pub c_tilde: [u8; C_TILDE_BYTES],
    pub z: PolyVec<L>,
    pub h: PolyVec<K>,
}

/// pkEncode: ρ ‖ t1.
pub fn pk_encode(rho: &[u8; SEED_BYTES], t1: &PolyVec<K>) -> [u8; PK_BYTES] {
    let mut pk = [0u8; PK_BYTES];
    pk[..SEED_BYTES].copy_from_slice(rho);
    for (p, chunk) in t1
        .polys
        .iter()
        .zip(pk[SEED_BYTES..].chunks_exact_mut(POLY_T1_PACKED_BYTES))
    {
        pack_t1(p, chunk);
    }
    pk
}

/// pkDecode. Every 10-bit pattern is a valid t1 coefficient, so only the
/// length can be wrong.
pub fn pk_decode(pk: &[u8]) -> Option<PublicKeyParts> {
    if pk.len() != PK_BYTES {
        return None;
    }
    let mut rho = [0u8; SEED_BYTES];
    rho.copy_from_slice(&pk[..SEED_BYTES]);

    let mut t1 = PolyVec::<K>::zero();
    for (p, chunk) in t1
        .polys
        .iter_mut()
        .zip(pk[SEED_BYTES..].chunks_exact(POLY_T1_PACKED_BYTES))
    {
        *p = unpack_t1(chunk);
    }
    Some(PublicKeyParts { rho, t1 })
}

/// skEncode: ρ ‖ K ‖ tr ‖ s1 ‖ s2 ‖ t0.
pub fn sk_encode(parts: &SecretKeyParts) -> [u8; SK_BYTES] {
    let mut sk = [0u8; SK_BYTES];
    let (head, rest) = sk.split_at_mut(2 * SEED_BYTES + CRH_BYTES);
    head[..SEED_BYTES].copy_from_slice(&parts.rho);
    head[SEED_BYTES..2 * SEED_BYTES].copy_from_slice(&parts.key);
    head[2 * SEED_BYTES..].copy_from_slice(&parts.tr);

    let (eta_part, t0_part) = rest.split_at_mut((L + K) * POLY_ETA_PACKED_BYTES);
    let secrets = parts.s1.polys.iter().chain(parts.s2.polys.iter());
    for (p, chunk) in secrets.zip(eta_part.chunks_exact_mut(POLY_ETA_PACKED_BYTES)) {
        pack_eta(p, chunk);
    }
    for (p, chunk) in parts
        .t0
        .polys
        .iter()
        .zip(t0_part.chunks_exact_mut(POLY_T0_PACKED_BYTES))
    {
        pack_t0(p, chunk);
    }
    sk
}

/// skDecode. Rejects wrong lengths and s1/s2 nibbles outside [0, 2η].
pub fn sk_decode(sk: &[u8]) -> Option<SecretKeyParts> {
    if sk.len() != SK_BYTES {
        return None;
    }

    let mut parts = SecretKeyParts {
        rho: [0u8; SEED_BYTES],
        key: [0u8; SEED_BYTES],
        tr: [0u8; CRH_BYTES],
        s1: PolyVec::zero(),
        s2: PolyVec::zero(),
        t0: PolyVec::zero(),
    };
    parts.rho.copy_from_slice(&sk[..SEED_BYTES]);
    parts.key.copy_from_slice(&sk[SEED_BYTES..2 * SEED_BYTES]);
    parts
        .tr
        .copy_from_slice(&sk[2 * SEED_BYTES..2 * SEED_BYTES + CRH_BYTES]);

    let rest = &sk[2 * SEED_BYTES + CRH_BYTES..];
    let (eta_part, t0_part) = rest.split_at((L + K) * POLY_ETA_PACKED_BYTES);
    let mut chunks = eta_part.chunks_exact(POLY_ETA_PACKED_BYTES);

    let mut valid = true;
    for p in parts.s1.polys.iter_mut().chain(parts.s2.polys.iter_mut()) {
        match chunks.next().and_then(unpack_eta) {
            Some(poly) => *p = poly,
            None => valid = false,
        }
    }
    for (p, chunk) in parts
        .t0
        .polys
        .iter_mut()
        .zip(t0_part.chunks_exact(POLY_T0_PACKED_BYTES))
    {
        *p = unpack_t0(chunk);
    }

    // `parts` is wiped on drop if we bail out here
    valid.then_some(parts)
}

/// sigEncode: c̃ ‖ z ‖ h.
pub fn sig_encode(
    c_tilde: &[u8; C_TILDE_BYTES],
    z: &PolyVec<L>,
    h: &PolyVec<K>,
) -> [u8; SIG_BYTES] {
    let mut sig = [0u8; SIG_BYTES];
    sig[..C_TILDE_BYTES].copy_from_slice(c_tilde);

    let z_end = C_TILDE_BYTES + L * POLY_Z_PACKED_BYTES;
    for (p, chunk) in z
        .polys
        .iter()
        .zip(sig[C_TILDE_BYTES..z_end].chunks_exact_mut(POLY_Z_PACKED_BYTES))
    {
        pack_z(p, chunk);
    }
    pack_hints(h, &mut sig[z_end..]);
    sig
}

/// sigDecode. Rejects wrong lengths and non-canonical hint encodings. The
/// norm of z is left to the verifier.
pub fn sig_decode(sig: &[u8]) -> Option<SignatureParts> {
    if sig.len() != SIG_BYTES {
        return None;
    }

    let mut c_tilde = [0u8; C_TILDE_BYTES];
    c_tilde.copy_from_slice(&sig[..C_TILDE_BYTES]);

    let z_end = C_TILDE_BYTES + L * POLY_Z_PACKED_BYTES;
    let mut z = PolyVec::<L>::zero();
    for (p, chunk) in z
        .polys
        .iter_mut()
        .zip(sig[C_TILDE_BYTES..z_end].chunks_exact(POLY_Z_PACKED_BYTES))
    {
        *p = unpack_z(chunk);
    }

    let h = unpack_hints(&sig[z_end..])?;
    Some(SignatureParts { c_tilde, z, h })
}
