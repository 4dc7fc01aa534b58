//! Fuzz target for ML-DSA-65 key generation.
//!
//! KeyGen must not panic, must be deterministic in ξ, and must embed ρ
//! identically in both keys.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use sigil_ml_dsa::params::ml_dsa_65::{PK_BYTES, SK_BYTES};
use sigil_ml_dsa::sign::keygen_internal;

#[derive(Debug, Arbitrary)]
struct KeyGenInput {
    seed: [u8; 32],
}

fuzz_target!(|input: KeyGenInput| {
    let (sk, pk) = keygen_internal(&input.seed);
    let (sk2, pk2) = keygen_internal(&input.seed);

    assert_eq!(sk.as_slice(), sk2.as_slice(), "KeyGen should be deterministic");
    assert_eq!(pk, pk2, "KeyGen should be deterministic");
    assert_eq!(sk.len(), SK_BYTES);
    assert_eq!(pk.len(), PK_BYTES);
    assert_eq!(&sk[..32], &pk[..32], "sk and pk should share rho");
});
