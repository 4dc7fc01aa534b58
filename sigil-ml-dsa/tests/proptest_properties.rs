//! Property-based tests for ML-DSA-65 using proptest.
//!
//! - Roundtrip: sign/verify with arbitrary message and context, sizes
//! - Wrong key and wrong context fail
//! - Tampered message or signature fails
//! - Deterministic signing is a function of (sk, message, context)

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sigil_ml_dsa::{MlDsa65, Signer};

/// Generate arbitrary 32-byte seeds for testing
fn arb_seed() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

/// Generate arbitrary messages (0-256 bytes)
fn arb_message() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

/// Generate contexts up to the 255-byte limit
fn arb_context() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=255)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn basic_properties(seed in arb_seed(), message in arb_message(), ctx in arb_context()) {
        let mut rng = StdRng::from_seed(seed);
        let (sk, pk) = MlDsa65::keygen(&mut rng).unwrap();

        prop_assert_eq!(sk.as_bytes().len(), MlDsa65::SIGNING_KEY_SIZE);
        prop_assert_eq!(pk.as_bytes().len(), MlDsa65::VERIFICATION_KEY_SIZE);

        let sig = MlDsa65::sign(&sk, &message, &ctx).unwrap();
        prop_assert_eq!(sig.as_bytes().len(), MlDsa65::SIGNATURE_SIZE);
        prop_assert!(MlDsa65::verify(&pk, &message, &ctx, &sig).is_ok());

        let hedged = MlDsa65::sign_hedged(&sk, &message, &ctx, &mut rng).unwrap();
        prop_assert!(MlDsa65::verify(&pk, &message, &ctx, &hedged).is_ok());
    }

    #[test]
    fn deterministic_signing_repeats(seed in arb_seed(), message in arb_message()) {
        let (sk, _) = MlDsa65::keygen_from_seed(&seed).unwrap();
        let a = MlDsa65::sign(&sk, &message, b"").unwrap();
        let b = MlDsa65::sign(&sk, &message, b"").unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn wrong_key_fails(seed1 in arb_seed(), seed2 in arb_seed(), message in arb_message()) {
        prop_assume!(seed1 != seed2);

        let (sk1, _pk1) = MlDsa65::keygen_from_seed(&seed1).unwrap();
        let (_sk2, pk2) = MlDsa65::keygen_from_seed(&seed2).unwrap();

        let sig = MlDsa65::sign(&sk1, &message, b"").unwrap();
        prop_assert!(MlDsa65::verify(&pk2, &message, b"", &sig).is_err());
    }

    #[test]
    fn wrong_context_fails(seed in arb_seed(), message in arb_message(), ctx in arb_context(), extra in any::<u8>()) {
        prop_assume!(ctx.len() < 255);

        let (sk, pk) = MlDsa65::keygen_from_seed(&seed).unwrap();
        let sig = MlDsa65::sign(&sk, &message, &ctx).unwrap();

        let mut other = ctx.clone();
        other.push(extra);
        prop_assert!(MlDsa65::verify(&pk, &message, &other, &sig).is_err());
    }

    #[test]
    fn tampered_message_fails(seed in arb_seed(), message in arb_message(), flip_pos in 0usize..256) {
        prop_assume!(!message.is_empty());

        let (sk, pk) = MlDsa65::keygen_from_seed(&seed).unwrap();
        let sig = MlDsa65::sign(&sk, &message, b"").unwrap();

        let mut tampered = message.clone();
        let pos = flip_pos % tampered.len();
        tampered[pos] ^= 0xFF;

        prop_assert!(MlDsa65::verify(&pk, &tampered, b"", &sig).is_err());
    }

    #[test]
    fn tampered_signature_fails(seed in arb_seed(), pos in 0usize..3309, bit in 0u8..8) {
        let (sk, pk) = MlDsa65::keygen_from_seed(&seed).unwrap();
        let sig = MlDsa65::sign(&sk, b"proptest", b"").unwrap();

        let mut bytes = *sig.as_bytes();
        bytes[pos] ^= 1 << bit;
        let tampered = sigil_ml_dsa::dsa65::Signature::from(bytes);

        prop_assert!(MlDsa65::verify(&pk, b"proptest", b"", &tampered).is_err());
    }
}
