//! # Sigil Core
//!
//! Core traits and utilities for the Sigil post-quantum signature library.
//!
//! This crate provides:
//! - The common [`Error`] type and [`Result`] alias
//! - The [`Signer`] trait implemented by each signature scheme
//! - Re-exports of `zeroize` and `subtle` so downstream crates agree on versions

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod traits;

pub use error::{Error, Result};
pub use traits::{Signer, SigningMode, MAX_CONTEXT_LEN};

/// Re-export zeroize for convenience.
pub use zeroize::{Zeroize, ZeroizeOnDrop};

/// Re-export subtle for constant-time operations.
pub use subtle;
