//! PBKDF2-HMAC-SHA256 password encoding.
//!
//! Format: `hex(salt || PBKDF2-HMAC-SHA256(password, salt, iterations, key_length))`
//!
//! Neither the iteration count nor the key length is stored; both sides must
//! agree on them. The defaults match the widely deployed 310,000-iteration,
//! 32-byte-key configuration with a 16-byte salt.

use hmac::Hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::core::encoder::PasswordEncoder;
use crate::core::error::{PasswordError, PasswordResult};
use crate::core::keygen::{BytesKeyGenerator, SecureRandomBytesKeyGenerator};

/// Default salt size for PBKDF2 (16 bytes).
pub const PBKDF2_SALT_SIZE: usize = 16;

/// Default derived key size for PBKDF2-HMAC-SHA256 (32 bytes).
pub const PBKDF2_KEY_SIZE: usize = 32;

/// PBKDF2 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Pbkdf2Params {
    /// Number of iterations.
    pub iterations: u32,
    /// Salt length in bytes.
    pub salt_length: usize,
    /// Derived key length in bytes.
    pub key_length: usize,
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self::moderate()
    }
}

impl Pbkdf2Params {
    /// Interactive profile: Fast, suitable for interactive logins.
    /// - Iterations: 100,000
    #[must_use]
    pub const fn interactive() -> Self {
        Self {
            iterations: 100_000,
            salt_length: PBKDF2_SALT_SIZE,
            key_length: PBKDF2_KEY_SIZE,
        }
    }

    /// Moderate profile: Balanced security and performance.
    /// - Iterations: 310,000 (OWASP 2021 recommendation for SHA-256)
    #[must_use]
    pub const fn moderate() -> Self {
        Self {
            iterations: 310_000,
            salt_length: PBKDF2_SALT_SIZE,
            key_length: PBKDF2_KEY_SIZE,
        }
    }

    /// Sensitive profile: High security, slower computation.
    /// - Iterations: 600,000
    #[must_use]
    pub const fn sensitive() -> Self {
        Self {
            iterations: 600_000,
            salt_length: PBKDF2_SALT_SIZE,
            key_length: PBKDF2_KEY_SIZE,
        }
    }
}

/// Encodes passwords as hex-encoded PBKDF2-HMAC-SHA256 output.
///
/// # Example
///
/// ```rust
/// use password_encoder::core::encoder::PasswordEncoder;
/// use password_encoder::core::schemes::Pbkdf2PasswordEncoder;
///
/// let encoder = Pbkdf2PasswordEncoder::new();
/// let stored = "828bd964df921c17dc966dd20638df86583ce04cc7ba25c372813809bb2ad05badcadabb66e03203443fa198ecc70668";
/// assert!(encoder.matches("myPassword", stored));
/// ```
#[derive(Debug, Clone)]
pub struct Pbkdf2PasswordEncoder<G = SecureRandomBytesKeyGenerator> {
    salt_generator: G,
    iterations: u32,
    key_length: usize,
}

impl Pbkdf2PasswordEncoder {
    /// Creates an encoder with the default (moderate) parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Pbkdf2Params::default())
    }

    /// Creates an encoder with the given parameters and a secure random salt.
    #[must_use]
    pub fn with_params(params: Pbkdf2Params) -> Self {
        Self {
            salt_generator: SecureRandomBytesKeyGenerator::new(params.salt_length),
            iterations: params.iterations,
            key_length: params.key_length,
        }
    }
}

impl Default for Pbkdf2PasswordEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: BytesKeyGenerator> Pbkdf2PasswordEncoder<G> {
    /// Creates an encoder drawing salts from `salt_generator`.
    ///
    /// The salt length is whatever the generator produces.
    #[must_use]
    pub fn with_salt_generator(salt_generator: G, iterations: u32, key_length: usize) -> Self {
        Self {
            salt_generator,
            iterations,
            key_length,
        }
    }

    /// Returns the configured parameters.
    #[must_use]
    pub fn params(&self) -> Pbkdf2Params {
        Pbkdf2Params {
            iterations: self.iterations,
            salt_length: self.salt_generator.key_length(),
            key_length: self.key_length,
        }
    }

    /// Computes `salt || derived_key`.
    fn salted_key(&self, raw_password: &str, salt: &[u8]) -> PasswordResult<Zeroizing<Vec<u8>>> {
        let mut salt_key = Zeroizing::new(vec![0u8; salt.len() + self.key_length]);
        salt_key[..salt.len()].copy_from_slice(salt);
        pbkdf2::pbkdf2::<Hmac<Sha256>>(
            raw_password.as_bytes(),
            salt,
            self.iterations,
            &mut salt_key[salt.len()..],
        )
        .map_err(|_| PasswordError::KeyDerivationFailed)?;
        Ok(salt_key)
    }
}

impl<G: BytesKeyGenerator> PasswordEncoder for Pbkdf2PasswordEncoder<G> {
    fn encode(&self, raw_password: &str) -> PasswordResult<String> {
        if self.iterations == 0 || self.key_length == 0 {
            return Err(PasswordError::InvalidParams);
        }
        let salt = self.salt_generator.generate_key()?;
        let salt_key = self.salted_key(raw_password, &salt)?;
        Ok(hex::encode(salt_key.as_slice()))
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        let Ok(salt_key) = hex::decode(encoded_password) else {
            tracing::trace!("pbkdf2: encoded password is not valid hex");
            return false;
        };

        if salt_key.len() < self.key_length || self.iterations == 0 {
            tracing::trace!("pbkdf2: encoded password too short");
            return false;
        }

        let salt = &salt_key[..salt_key.len() - self.key_length];
        match self.salted_key(raw_password, salt) {
            Ok(computed) => computed.as_slice().ct_eq(salt_key.as_slice()).into(),
            Err(_) => false,
        }
    }
}
