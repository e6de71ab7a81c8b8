//! Error types for password encoding operations.
//!
//! Only encoding and construction can fail. Verification never returns an
//! error: a malformed or unrecognized stored value is reported as a plain
//! mismatch so callers cannot tell the two apart.

use thiserror::Error;

/// Errors that can occur while encoding a password or building an encoder.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The operating system entropy source could not supply salt bytes.
    #[error("Secure random source unavailable")]
    Entropy,

    /// The bcrypt primitive rejected the request (e.g. cost out of range).
    #[cfg(feature = "bcrypt")]
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    /// The work-factor parameters are not accepted by the primitive.
    #[error("Invalid key derivation parameters")]
    InvalidParams,

    /// The key derivation function failed.
    #[error("Key derivation failed")]
    KeyDerivationFailed,

    /// The identifier chosen for new encodings has no registered encoder.
    #[error("No password encoder registered for encode id {0:?}")]
    UnknownEncodeId(String),

    /// The id prefix or suffix is empty.
    #[error("Id prefix and suffix must not be empty")]
    InvalidDelimiter,

    /// A registered identifier contains the id suffix.
    #[error("Invalid password encoder id {0:?}")]
    InvalidId(String),
}

/// Result type alias for password encoding operations.
pub type PasswordResult<T> = Result<T, PasswordError>;
