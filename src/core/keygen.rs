//! Salt generation.
//!
//! Every salted encoder draws its salt from a [`BytesKeyGenerator`]. The
//! production implementation reads the operating system's secure random
//! source; tests substitute generators that fail on demand.

use rand_core::{OsRng, TryRngCore};

use crate::core::error::{PasswordError, PasswordResult};

/// A source of fixed-length random byte strings.
pub trait BytesKeyGenerator: Send + Sync {
    /// Number of bytes returned by [`generate_key`](Self::generate_key).
    fn key_length(&self) -> usize;

    /// Generates a fresh key of [`key_length`](Self::key_length) bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::Entropy`] if the random source fails.
    fn generate_key(&self) -> PasswordResult<Vec<u8>>;
}

/// Generates keys from the operating system's secure random source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecureRandomBytesKeyGenerator {
    key_length: usize,
}

impl SecureRandomBytesKeyGenerator {
    /// Creates a generator producing `key_length` bytes per call.
    #[must_use]
    pub const fn new(key_length: usize) -> Self {
        Self { key_length }
    }
}

impl BytesKeyGenerator for SecureRandomBytesKeyGenerator {
    fn key_length(&self) -> usize {
        self.key_length
    }

    fn generate_key(&self) -> PasswordResult<Vec<u8>> {
        let mut key = vec![0u8; self.key_length];
        OsRng.try_fill_bytes(&mut key).map_err(|err| {
            tracing::warn!(error = %err, "secure random source failed");
            PasswordError::Entropy
        })?;
        Ok(key)
    }
}
