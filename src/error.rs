//! Error taxonomy for the cryptographic core.
//!
//! Every fallible operation in this crate returns a `CoreError` value rather
//! than panicking. There is exactly one error type so callers can match on
//! it directly instead of downcasting a boxed trait object, unlike the
//! `Box<dyn Error>` style the teacher crate uses for its own (much smaller)
//! set of failure modes.

use std::error::Error;
use std::fmt;

/// The closed set of failures this crate's operations can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// `initialize` was called with a key whose byte length does not match
    /// the selected `CipherVariant`.
    InvalidKeyLength,
    /// CBC/CTR initialization is missing the required 16-byte nonce.
    InvalidNonceLength,
    /// An operation was invoked on an uninitialized or disposed state.
    StateMisuse,
    /// HBA decryption: the recomputed tag did not match the received tag.
    /// No plaintext is produced when this is returned.
    AuthenticationFailure,
    /// An output buffer was smaller than the operation requires.
    BufferMismatch,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CoreError::InvalidKeyLength => "invalid key length for the selected cipher variant",
            CoreError::InvalidNonceLength => "a 16-byte nonce is required for this mode",
            CoreError::StateMisuse => "operation invoked on an uninitialized or disposed state",
            CoreError::AuthenticationFailure => "HBA authentication tag mismatch",
            CoreError::BufferMismatch => "output buffer too small for the operation",
        };
        f.write_str(msg)
    }
}

impl Error for CoreError {}
