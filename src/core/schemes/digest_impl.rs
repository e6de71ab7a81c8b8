//! Legacy single-pass salted digest encodings (SHA-256, SM3).
//!
//! Format: `hex(salt || H(salt || password))`
//!
//! The salt length is not stored; it is whatever precedes the final digest.
//! These schemes apply the hash once with no work factor. They exist so
//! credentials stored by older systems can still be verified and should be
//! re-encoded with a key derivation function on successful login.

use core::fmt::{self, Debug};
use core::marker::PhantomData;

use digest::Digest;
use subtle::ConstantTimeEq;

use crate::core::encoder::PasswordEncoder;
use crate::core::error::PasswordResult;
use crate::core::keygen::{BytesKeyGenerator, SecureRandomBytesKeyGenerator};

/// Default salt size for the legacy digest schemes (8 bytes).
pub const DIGEST_SALT_SIZE: usize = 8;

/// Encodes passwords as a salted single-pass digest.
///
/// Use the [`Sha256PasswordEncoder`] and [`Sm3PasswordEncoder`] aliases.
pub struct SaltedDigestPasswordEncoder<D, G = SecureRandomBytesKeyGenerator> {
    salt_generator: G,
    _digest: PhantomData<fn() -> D>,
}

/// Salted SHA-256 encoder.
#[cfg(feature = "sha256")]
pub type Sha256PasswordEncoder<G = SecureRandomBytesKeyGenerator> =
    SaltedDigestPasswordEncoder<sha2::Sha256, G>;

/// Salted SM3 encoder.
#[cfg(feature = "sm3")]
pub type Sm3PasswordEncoder<G = SecureRandomBytesKeyGenerator> =
    SaltedDigestPasswordEncoder<sm3::Sm3, G>;

impl<D: Digest> SaltedDigestPasswordEncoder<D> {
    /// Creates an encoder with an 8-byte secure random salt.
    #[must_use]
    pub fn new() -> Self {
        Self::with_salt_generator(SecureRandomBytesKeyGenerator::new(DIGEST_SALT_SIZE))
    }
}

impl<D: Digest> Default for SaltedDigestPasswordEncoder<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest, G: BytesKeyGenerator> SaltedDigestPasswordEncoder<D, G> {
    /// Creates an encoder drawing salts from `salt_generator`.
    #[must_use]
    pub fn with_salt_generator(salt_generator: G) -> Self {
        Self {
            salt_generator,
            _digest: PhantomData,
        }
    }

    /// Returns the digest output size in bytes.
    #[must_use]
    pub fn digest_size() -> usize {
        <D as Digest>::output_size()
    }

    /// Computes `salt || H(salt || password)`.
    fn salted_digest(raw_password: &str, salt: &[u8]) -> Vec<u8> {
        let digest = D::new()
            .chain_update(salt)
            .chain_update(raw_password.as_bytes())
            .finalize();
        let mut salt_digest = Vec::with_capacity(salt.len() + digest.len());
        salt_digest.extend_from_slice(salt);
        salt_digest.extend_from_slice(&digest);
        salt_digest
    }
}

impl<D, G> PasswordEncoder for SaltedDigestPasswordEncoder<D, G>
where
    D: Digest,
    G: BytesKeyGenerator,
{
    fn encode(&self, raw_password: &str) -> PasswordResult<String> {
        let salt = self.salt_generator.generate_key()?;
        Ok(hex::encode(Self::salted_digest(raw_password, &salt)))
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        let Ok(digested) = hex::decode(encoded_password) else {
            tracing::trace!("digest: encoded password is not valid hex");
            return false;
        };

        let digest_size = Self::digest_size();
        if digested.len() < digest_size {
            tracing::trace!("digest: encoded password too short");
            return false;
        }

        let salt = &digested[..digested.len() - digest_size];
        Self::salted_digest(raw_password, salt)
            .as_slice()
            .ct_eq(digested.as_slice())
            .into()
    }

    fn is_legacy(&self) -> bool {
        true
    }
}

impl<D, G: Debug> Debug for SaltedDigestPasswordEncoder<D, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltedDigestPasswordEncoder")
            .field("digest", &core::any::type_name::<D>())
            .field("salt_generator", &self.salt_generator)
            .finish()
    }
}

impl<D, G: Clone> Clone for SaltedDigestPasswordEncoder<D, G> {
    fn clone(&self) -> Self {
        Self {
            salt_generator: self.salt_generator.clone(),
            _digest: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PasswordError;
    use crate::core::keygen::testing::{FailingKeyGenerator, FixedKeyGenerator};

    const SALT: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

    fn check_roundtrip<D: Digest>() -> PasswordResult<()> {
        let encoder = SaltedDigestPasswordEncoder::<D>::new();
        let encoded = encoder.encode("password")?;
        let digest_size = <D as Digest>::output_size();

        assert_ne!(encoded, "password");
        assert_eq!(encoded.len(), (DIGEST_SALT_SIZE + digest_size) * 2);
        assert!(encoder.matches("password", &encoded));
        assert!(!encoder.matches("passworda", &encoded));

        // odd length hex string
        assert!(!encoder.matches("password", &encoded[..digest_size - 1]));
        // decodes to fewer bytes than the digest
        assert!(!encoder.matches("password", &encoded[..digest_size - 2]));
        assert!(!encoder.matches("password", "gg"));
        assert!(!encoder.matches("password", ""));

        assert!(!encoder.upgradable(&encoded));
        assert!(encoder.is_legacy());
        Ok(())
    }

    fn check_multibyte_and_empty<D: Digest>() -> PasswordResult<()> {
        let encoder = SaltedDigestPasswordEncoder::<D>::new();
        for raw in ["пароль", "密码🔑", ""] {
            let encoded = encoder.encode(raw)?;
            assert!(encoder.matches(raw, &encoded), "{raw}");
            assert!(!encoder.matches(&format!("{raw}x"), &encoded), "{raw}");
        }
        Ok(())
    }

    #[test]
    #[cfg(feature = "sha256")]
    fn test_sha256_roundtrip() -> PasswordResult<()> {
        check_roundtrip::<sha2::Sha256>()
    }

    #[test]
    #[cfg(feature = "sm3")]
    fn test_sm3_roundtrip() -> PasswordResult<()> {
        check_roundtrip::<sm3::Sm3>()
    }

    #[test]
    #[cfg(feature = "sha256")]
    fn test_sha256_multibyte_and_empty() -> PasswordResult<()> {
        check_multibyte_and_empty::<sha2::Sha256>()
    }

    #[test]
    #[cfg(feature = "sm3")]
    fn test_sm3_multibyte_and_empty() -> PasswordResult<()> {
        check_multibyte_and_empty::<sm3::Sm3>()
    }

    #[test]
    #[cfg(feature = "sha256")]
    fn test_sha256_known_salt() -> PasswordResult<()> {
        let encoder = Sha256PasswordEncoder::with_salt_generator(FixedKeyGenerator(SALT.to_vec()));
        let encoded = encoder.encode("password")?;
        assert_eq!(
            encoded,
            "0102030405060708401cee42f1e78e4ce02e01102870bd121c252c9f617db439352f749ceecaadfc"
        );
        Ok(())
    }

    #[test]
    #[cfg(feature = "sm3")]
    fn test_sm3_known_salt() -> PasswordResult<()> {
        let encoder = Sm3PasswordEncoder::with_salt_generator(FixedKeyGenerator(SALT.to_vec()));
        let encoded = encoder.encode("password")?;
        assert_eq!(
            encoded,
            "0102030405060708cbaf07ecdd24f9f8ac7519f90e0e21ed8052b609c79405ea8ab7ec89a86453d8"
        );
        Ok(())
    }

    #[test]
    #[cfg(feature = "sha256")]
    fn test_digest_without_salt() {
        // A bare digest is a valid encoding with an empty salt.
        let encoder = Sha256PasswordEncoder::new();
        let bare = hex::encode(sha2::Sha256::digest(b"password"));
        assert!(encoder.matches("password", &bare));
    }

    #[test]
    #[cfg(feature = "sha256")]
    fn test_digest_accepts_uppercase_hex() {
        let encoder = Sha256PasswordEncoder::new();
        let upper =
            "0102030405060708401CEE42F1E78E4CE02E01102870BD121C252C9F617DB439352F749CEECAADFC";
        assert!(encoder.matches("password", upper));
    }

    #[test]
    #[cfg(feature = "sm3")]
    fn test_digest_salt_generator_error() {
        let encoder = Sm3PasswordEncoder::with_salt_generator(FailingKeyGenerator(8));
        assert!(matches!(encoder.encode("?"), Err(PasswordError::Entropy)));
    }

    #[test]
    #[cfg(feature = "sha256")]
    fn test_digest_debug() {
        let debug_str = format!("{:?}", Sha256PasswordEncoder::new());
        assert!(debug_str.contains("Sha256"));
    }
}
