//! Constant-time checks for ML-DSA-65 signing.
//!
//! ML-DSA uses rejection sampling, so signing time varies with the number of
//! attempts. Which attempt succeeds is public (it is a function of the
//! signature), so these checks compare keys and messages whose attempt
//! counts are not controlled; a leak shows up as a consistent shift between
//! classes rather than noise.
//!
//! Run with: `cargo run --release -p sigil-timing --bin ml_dsa`

use dudect_bencher::rand::Rng;
use dudect_bencher::{ctbench_main, BenchRng, Class, CtRunner};
use once_cell::sync::Lazy;
use sigil_ml_dsa::dsa65::{MlDsa65, SigningKey, VerificationKey};
use sigil_ml_dsa::Signer;

struct TestData {
    sk_left: SigningKey,
    sk_right: SigningKey,
    vk_left: VerificationKey,
    signed_left: Vec<u8>,
}

static TEST_DATA: Lazy<TestData> = Lazy::new(|| {
    let (sk_left, vk_left) = MlDsa65::keygen_from_seed(&[0x00; 32]).expect("keygen failed");
    let (sk_right, _) = MlDsa65::keygen_from_seed(&[0xFF; 32]).expect("keygen failed");
    let signed_left = MlDsa65::sign_attached(&sk_left, MESSAGE, b"").expect("sign failed");

    TestData {
        sk_left,
        sk_right,
        vk_left,
        signed_left,
    }
});

/// Fixed test message.
const MESSAGE: &[u8] = b"constant-time test message for dudect verification";

/// Number of iterations per batch.
const ITERATIONS: usize = 1_000;

fn classes(rng: &mut BenchRng) -> Vec<Class> {
    (0..ITERATIONS)
        .map(|_| {
            if rng.gen::<bool>() {
                Class::Left
            } else {
                Class::Right
            }
        })
        .collect()
}

/// Two different secret keys signing the same message.
fn bench_sign_key(runner: &mut CtRunner, rng: &mut BenchRng) {
    let data = &*TEST_DATA;

    for class in classes(rng) {
        let sk = match class {
            Class::Left => &data.sk_left,
            Class::Right => &data.sk_right,
        };

        runner.run_one(class, || {
            let _ = MlDsa65::sign(sk, MESSAGE, b"");
        });
    }
}

/// Hedged signing with one key; the class only picks the context byte.
fn bench_sign_hedged(runner: &mut CtRunner, rng: &mut BenchRng) {
    let data = &*TEST_DATA;

    for class in classes(rng) {
        let ctx: &[u8] = match class {
            Class::Left => &[0x00],
            Class::Right => &[0x01],
        };

        runner.run_one(class, || {
            let mut sign_rng = rand::rng();
            let _ = MlDsa65::sign_hedged(&data.sk_left, MESSAGE, ctx, &mut sign_rng);
        });
    }
}

/// Opening a valid signed message against one with the last signature byte
/// flipped. Verification handles public data only, so this is a sanity
/// check that rejection does not short-circuit.
fn bench_open(runner: &mut CtRunner, rng: &mut BenchRng) {
    let data = &*TEST_DATA;
    let mut tampered = data.signed_left.clone();
    tampered[0] ^= 1;

    for class in classes(rng) {
        let signed = match class {
            Class::Left => &data.signed_left,
            Class::Right => &tampered,
        };

        runner.run_one(class, || {
            let _ = MlDsa65::open(&data.vk_left, signed, b"");
        });
    }
}

ctbench_main!(bench_sign_key, bench_sign_hedged, bench_open);
