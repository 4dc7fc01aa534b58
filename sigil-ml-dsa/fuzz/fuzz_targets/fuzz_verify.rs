//! Fuzz target for ML-DSA-65 verification.
//!
//! Verify must accept honest signatures, reject modified messages and
//! contexts, and never panic on corrupted or random signatures.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use sigil_ml_dsa::sign::{keygen_internal, sign, verify};

#[derive(Debug, Arbitrary)]
struct VerifyInput {
    seed: [u8; 32],
    rnd: [u8; 32],
    message: Vec<u8>,
    context: Vec<u8>,
    corruption: Option<CorruptionType>,
}

#[derive(Debug, Arbitrary)]
enum CorruptionType {
    CorruptSignature { position: usize, xor_value: u8 },
    CorruptMessage { position: usize, xor_value: u8 },
    CorruptContext { extra: u8 },
    RandomSignature { random_sig: Vec<u8> },
}

fuzz_target!(|input: VerifyInput| {
    if input.message.len() > 10000 || input.context.len() > 255 {
        return;
    }

    let (sk, pk) = keygen_internal(&input.seed);
    let Ok(mut sig) = sign(sk.as_slice(), &input.message, &input.context, &input.rnd) else {
        return;
    };
    let mut msg = input.message.clone();
    let mut ctx = input.context.clone();

    match &input.corruption {
        None => {
            assert!(
                verify(&pk, &msg, &ctx, &sig),
                "Valid signature should verify"
            );
        }
        Some(CorruptionType::CorruptSignature { position, xor_value }) => {
            if *position < sig.len() && *xor_value != 0 {
                sig[*position] ^= xor_value;
                let _ = verify(&pk, &msg, &ctx, &sig);
            }
        }
        Some(CorruptionType::CorruptMessage { position, xor_value }) => {
            if *position < msg.len() && *xor_value != 0 {
                msg[*position] ^= xor_value;
                assert!(
                    !verify(&pk, &msg, &ctx, &sig),
                    "Modified message should fail verification"
                );
            }
        }
        Some(CorruptionType::CorruptContext { extra }) => {
            ctx.push(*extra);
            assert!(
                !verify(&pk, &msg, &ctx, &sig),
                "Modified context should fail verification"
            );
        }
        Some(CorruptionType::RandomSignature { random_sig }) => {
            let _ = verify(&pk, &msg, &ctx, random_sig);
        }
    }
});
