//! bcrypt password encoding.
//!
//! Format: the standard self-describing bcrypt string
//! `$2a$<cost>$<22-char salt><31-char hash>`. bcrypt generates and embeds its
//! own salt, so no key generator is involved.

use core::str::FromStr;

use bcrypt::{BcryptError, HashParts, Version};

use crate::core::encoder::PasswordEncoder;
use crate::core::error::PasswordResult;

/// Default bcrypt cost (log2 of the number of rounds).
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Longest password bcrypt can encode without losing input (72 bytes).
pub const MAX_BCRYPT_PASSWORD_LEN: usize = 72;

/// Encodes passwords with bcrypt.
///
/// New hashes carry the `2a` version tag; any of `2a`, `2b`, `2x` and `2y`
/// verifies. Encoding refuses passwords longer than
/// [`MAX_BCRYPT_PASSWORD_LEN`] bytes; verification only reads that many.
///
/// # Example
///
/// ```rust
/// use password_encoder::core::encoder::PasswordEncoder;
/// use password_encoder::core::schemes::BCryptPasswordEncoder;
///
/// let encoder = BCryptPasswordEncoder::new(4);
/// let encoded = encoder.encode("password").expect("encode should succeed");
/// assert!(encoded.starts_with("$2a$04$"));
/// assert!(encoder.matches("password", &encoded));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BCryptPasswordEncoder {
    cost: u32,
}

impl BCryptPasswordEncoder {
    /// Creates an encoder with the given cost.
    ///
    /// The cost is checked when encoding; bcrypt accepts 4 through 31.
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Returns the configured cost.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BCryptPasswordEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl PasswordEncoder for BCryptPasswordEncoder {
    fn encode(&self, raw_password: &str) -> PasswordResult<String> {
        if raw_password.len() > MAX_BCRYPT_PASSWORD_LEN {
            return Err(BcryptError::Truncation(raw_password.len()).into());
        }
        let parts = bcrypt::hash_with_result(raw_password, self.cost)?;
        Ok(parts.format_for_version(Version::TwoA))
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        match bcrypt::verify(raw_password, encoded_password) {
            Ok(valid) => valid,
            Err(err) => {
                tracing::trace!(error = %err, "bcrypt: rejected encoded password");
                false
            }
        }
    }

    fn upgradable(&self, encoded_password: &str) -> bool {
        HashParts::from_str(encoded_password).is_ok_and(|parts| parts.get_cost() < self.cost)
    }
}
