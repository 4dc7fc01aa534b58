//! # Sigil
//!
//! Post-quantum digital signatures implementing NIST FIPS 204.
//!
//! ## Features
//!
//! - `std` (default): Enable standard library support
//! - `ml-dsa` (default): Enable ML-DSA-65 (FIPS 204) signatures
//!
//! ## Supported Algorithms
//!
//! - **ML-DSA** (FIPS 204): Module-Lattice-Based Digital Signature Algorithm
//!   - ML-DSA-65
//!
//! ## Example
//!
//! ```ignore
//! use sigil::ml_dsa::{MlDsa65, Signer};
//!
//! let (sk, pk) = MlDsa65::keygen(&mut rng)?;
//! let sig = MlDsa65::sign(&sk, b"message", b"my-app")?;
//! MlDsa65::verify(&pk, b"message", b"my-app", &sig)?;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub use sigil_core::{Error, Result};

/// Core traits for signature schemes.
pub mod traits {
    pub use sigil_core::{Signer, SigningMode, MAX_CONTEXT_LEN};
}

/// ML-DSA-65 (FIPS 204) digital signatures.
#[cfg(feature = "ml-dsa")]
pub mod ml_dsa {
    pub use sigil_core::{Signer, SigningMode};
    pub use sigil_ml_dsa::dsa65::*;
    pub use sigil_ml_dsa::{params, sign};
}

#[cfg(all(test, feature = "ml-dsa"))]
mod tests {
    use super::ml_dsa::{MlDsa65, Signer, SigningMode};

    #[test]
    fn test_facade_roundtrip() {
        let mut rng = rand::rng();
        let (sk, pk) = MlDsa65::keygen(&mut rng).unwrap();
        let sig =
            MlDsa65::sign_with_mode(&sk, b"facade", b"", SigningMode::Hedged, &mut rng).unwrap();
        assert!(MlDsa65::verify(&pk, b"facade", b"", &sig).is_ok());
    }
}
