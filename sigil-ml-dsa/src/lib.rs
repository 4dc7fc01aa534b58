//! ML-DSA-65 (FIPS 204) Implementation
//!
//! This crate provides a pure Rust implementation of the ML-DSA-65 digital
//! signature algorithm as specified in FIPS 204.
//!
//! | Variant | Security Level | Public Key | Secret Key | Signature |
//! |---------|----------------|------------|------------|-----------|
//! | ML-DSA-65 | Level 3 | 1,952 bytes | 4,032 bytes | 3,309 bytes |
//!
//! [`MlDsa65`] is the typed entry point. The [`sign`] module exposes the same
//! operations over raw byte slices, including the `_internal` variants that
//! skip domain separation.
//!
//! # Example
//!
//! ```ignore
//! use sigil_ml_dsa::MlDsa65;
//! use sigil_core::Signer;
//!
//! let mut rng = rand::rng();
//! let (sk, pk) = MlDsa65::keygen(&mut rng).unwrap();
//!
//! let message = b"Hello, post-quantum world!";
//! let signature = MlDsa65::sign(&sk, message, b"").unwrap();
//!
//! assert!(MlDsa65::verify(&pk, message, b"", &signature).is_ok());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::module_name_repetitions
)]

extern crate alloc;

mod hash;
mod ntt;
mod packing;
mod poly;
mod polyvec;
mod reduce;
mod rounding;
mod sample;
mod types;

pub mod params;
pub mod sign;

mod ml_dsa_65;

pub use ml_dsa_65::MlDsa65;

/// ML-DSA-65 (NIST Security Level 3) - 192-bit classical security.
pub mod dsa65 {
    pub use crate::ml_dsa_65::*;
}

pub use sigil_core::{Error, Result, Signer, SigningMode};
