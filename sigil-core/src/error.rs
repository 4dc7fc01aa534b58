//! Error types for Sigil signature operations.

use core::fmt;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during signature operations.
///
/// Variants fall into three groups: input contract violations (reported
/// before any work is done), verification failure (always a single variant so
/// that callers learn nothing about *why* a signature was rejected), and
/// [`Error::SigningAttemptsExhausted`], which indicates a parameter or RNG
/// defect rather than bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Invalid key length provided.
    InvalidKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Invalid signature length.
    InvalidSignatureLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Context string longer than 255 bytes.
    ContextTooLong {
        /// Length of the rejected context string.
        len: usize,
    },

    /// Signature verification failed.
    VerificationFailed,

    /// Seed buffer missing or of the wrong size.
    InsufficientRandomness,

    /// Key bytes have the right length but do not decode to a well-formed key.
    EncodingError,

    /// The signing loop hit its attempt cap without producing a signature.
    SigningAttemptsExhausted {
        /// Number of attempts made.
        attempts: u32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyLength { expected, actual } => {
                write!(f, "invalid key length: expected {expected}, got {actual}")
            }
            Error::InvalidSignatureLength { expected, actual } => {
                write!(
                    f,
                    "invalid signature length: expected {expected}, got {actual}"
                )
            }
            Error::ContextTooLong { len } => {
                write!(f, "context string too long: {len} bytes (max 255)")
            }
            Error::VerificationFailed => write!(f, "signature verification failed"),
            Error::InsufficientRandomness => write!(f, "insufficient randomness provided"),
            Error::EncodingError => write!(f, "encoding or decoding error"),
            Error::SigningAttemptsExhausted { attempts } => {
                write!(f, "signing gave up after {attempts} rejected attempts")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = Error::InvalidKeyLength {
            expected: 1952,
            actual: 1951,
        };
        assert_eq!(
            e.to_string(),
            "invalid key length: expected 1952, got 1951"
        );
        assert_eq!(
            Error::ContextTooLong { len: 256 }.to_string(),
            "context string too long: 256 bytes (max 255)"
        );
        assert_eq!(
            Error::SigningAttemptsExhausted { attempts: 1000 }.to_string(),
            "signing gave up after 1000 rejected attempts"
        );
    }
}
