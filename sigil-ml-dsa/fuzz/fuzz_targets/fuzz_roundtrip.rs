//! Fuzz target for the typed ML-DSA-65 API.
//!
//! Detached and attached signing must both round-trip through verification.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use sigil_ml_dsa::dsa65::{Signature, SigningKey, VerificationKey};
use sigil_ml_dsa::{MlDsa65, Signer};

#[derive(Debug, Arbitrary)]
struct RoundtripInput {
    seed: [u8; 32],
    message: Vec<u8>,
    context: Vec<u8>,
}

fuzz_target!(|input: RoundtripInput| {
    if input.message.len() > 10000 || input.context.len() > 255 {
        return;
    }

    let (sk, pk) = MlDsa65::keygen_from_seed(&input.seed).expect("32-byte seed");

    // Keys and signatures survive a trip through raw bytes
    let sk = SigningKey::from_bytes(sk.as_bytes()).expect("sk length");
    let pk = VerificationKey::from_bytes(pk.as_bytes()).expect("pk length");

    let sig = MlDsa65::sign(&sk, &input.message, &input.context).expect("sign");
    let sig = Signature::from_bytes(sig.as_bytes()).expect("sig length");
    assert!(MlDsa65::verify(&pk, &input.message, &input.context, &sig).is_ok());

    let expanded = pk.expand().expect("expand");
    assert!(MlDsa65::verify_expanded(&expanded, &input.message, &input.context, &sig).is_ok());

    let signed = MlDsa65::sign_attached(&sk, &input.message, &input.context).expect("sign");
    let opened = MlDsa65::open(&pk, &signed, &input.context).expect("open");
    assert_eq!(opened, input.message);
});
