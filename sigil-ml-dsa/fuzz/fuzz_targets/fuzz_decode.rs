//! Fuzz target for decoding untrusted keys and signatures.
//!
//! Arbitrary bytes as key, signature or signed message must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

use sigil_ml_dsa::params::ml_dsa_65::{PK_BYTES, SIG_BYTES, SK_BYTES};
use sigil_ml_dsa::sign::{expand_verification_key, open_attached, sign, verify};

fuzz_target!(|data: &[u8]| {
    let pk = data.get(..PK_BYTES).unwrap_or(data);
    let rest = data.get(PK_BYTES..).unwrap_or(&[]);

    let _ = expand_verification_key(pk);
    let _ = verify(pk, b"fuzz", b"", rest);
    let _ = open_attached(pk, rest, b"");

    if data.len() >= SK_BYTES {
        let _ = sign(&data[..SK_BYTES], b"fuzz", b"", &[0u8; 32]);
    }
    if rest.len() >= SIG_BYTES {
        let _ = verify(pk, b"fuzz", b"", &rest[..SIG_BYTES]);
    }
});
