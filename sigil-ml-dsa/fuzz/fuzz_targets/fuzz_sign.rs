//! Fuzz target for ML-DSA-65 signing.
//!
//! Sign must not panic on any message or context, must reject contexts over
//! 255 bytes, and must be deterministic for a fixed rnd.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use sigil_ml_dsa::params::ml_dsa_65::SIG_BYTES;
use sigil_ml_dsa::sign::{keygen_internal, sign};
use sigil_ml_dsa::Error;

#[derive(Debug, Arbitrary)]
struct SignInput {
    seed: [u8; 32],
    rnd: [u8; 32],
    message: Vec<u8>,
    context: Vec<u8>,
}

fuzz_target!(|input: SignInput| {
    // Limit message size to prevent excessive memory usage
    if input.message.len() > 10000 || input.context.len() > 300 {
        return;
    }

    let (sk, _pk) = keygen_internal(&input.seed);
    let result = sign(sk.as_slice(), &input.message, &input.context, &input.rnd);

    if input.context.len() > 255 {
        assert_eq!(
            result,
            Err(Error::ContextTooLong {
                len: input.context.len()
            })
        );
        return;
    }

    let sig = result.expect("signing a well-formed key should succeed");
    assert_eq!(sig.len(), SIG_BYTES);

    let sig2 = sign(sk.as_slice(), &input.message, &input.context, &input.rnd)
        .expect("signing a well-formed key should succeed");
    assert_eq!(sig, sig2, "Sign should be deterministic with same rnd");
});
