//! Delegating password encoder.
//!
//! Routes each operation to a scheme chosen by the `{id}` tag at the front
//! of the stored value. New passwords are always encoded with one designated
//! scheme; any registered scheme can verify.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use password_encoder::core::delegating::DelegatingPasswordEncoder;
//! use password_encoder::core::encoder::PasswordEncoder;
//! use password_encoder::core::schemes::{BCryptPasswordEncoder, NoOpPasswordEncoder};
//!
//! let mut encoders: HashMap<String, Arc<dyn PasswordEncoder>> = HashMap::new();
//! encoders.insert("bcrypt".to_string(), Arc::new(BCryptPasswordEncoder::new(4)));
//! encoders.insert("noop".to_string(), Arc::new(NoOpPasswordEncoder));
//!
//! let encoder = DelegatingPasswordEncoder::try_new("bcrypt", encoders)
//!     .expect("bcrypt is registered");
//!
//! let stored = encoder.encode("password").expect("encode should succeed");
//! assert!(stored.starts_with("{bcrypt}$2a$04$"));
//! assert!(encoder.matches("password", &stored));
//!
//! // Values from other registered schemes verify but should be re-encoded.
//! assert!(encoder.matches("password", "{noop}password"));
//! assert!(encoder.upgradable("{noop}password"));
//! ```

use core::fmt::{self, Debug};
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::encoder::PasswordEncoder;
use crate::core::error::{PasswordError, PasswordResult};
use crate::core::tag::{
    extract_encoded_password, extract_id, make_tag, DEFAULT_ID_PREFIX, DEFAULT_ID_SUFFIX,
};

/// Id-to-encoder registry.
pub type EncoderMap = HashMap<String, Arc<dyn PasswordEncoder>>;

/// A password encoder that delegates to a scheme selected by an id tag.
///
/// Stored values have the form `{id}encoded`. The registry is fixed at
/// construction, so one instance can be shared freely across threads.
#[derive(Clone)]
pub struct DelegatingPasswordEncoder {
    id_prefix: String,
    id_suffix: String,
    id_for_encode: String,
    password_encoder_for_encode: Arc<dyn PasswordEncoder>,
    id_to_password_encoder: EncoderMap,
}

impl DelegatingPasswordEncoder {
    /// Creates an encoder using the default `{` and `}` delimiters.
    ///
    /// # Arguments
    ///
    /// * `id_for_encode` - The id whose encoder is used for new passwords
    /// * `id_to_password_encoder` - Every scheme that may appear in stored values
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::UnknownEncodeId`] if `id_for_encode` is not a
    /// key of `id_to_password_encoder`, or [`PasswordError::InvalidId`] if a
    /// registered id contains the suffix.
    ///
    /// An encoder registered under the empty id receives every untagged
    /// stored value whole.
    pub fn try_new(
        id_for_encode: impl Into<String>,
        id_to_password_encoder: EncoderMap,
    ) -> PasswordResult<Self> {
        Self::try_with_delimiters(
            id_for_encode,
            id_to_password_encoder,
            DEFAULT_ID_PREFIX,
            DEFAULT_ID_SUFFIX,
        )
    }

    /// Creates an encoder with custom id delimiters.
    ///
    /// # Errors
    ///
    /// As [`try_new`](Self::try_new), plus [`PasswordError::InvalidDelimiter`]
    /// if either delimiter is empty.
    pub fn try_with_delimiters(
        id_for_encode: impl Into<String>,
        id_to_password_encoder: EncoderMap,
        id_prefix: impl Into<String>,
        id_suffix: impl Into<String>,
    ) -> PasswordResult<Self> {
        let id_for_encode = id_for_encode.into();
        let id_prefix = id_prefix.into();
        let id_suffix = id_suffix.into();

        if id_prefix.is_empty() || id_suffix.is_empty() {
            return Err(PasswordError::InvalidDelimiter);
        }

        let Some(password_encoder_for_encode) = id_to_password_encoder.get(&id_for_encode) else {
            return Err(PasswordError::UnknownEncodeId(id_for_encode));
        };
        let password_encoder_for_encode = Arc::clone(password_encoder_for_encode);

        if let Some(id) = id_to_password_encoder
            .keys()
            .find(|id| id.contains(id_suffix.as_str()))
        {
            return Err(PasswordError::InvalidId(id.clone()));
        }

        if password_encoder_for_encode.is_legacy() {
            tracing::warn!(
                id = %id_for_encode,
                "legacy password encoder selected for new encodings"
            );
        }

        Ok(Self {
            id_prefix,
            id_suffix,
            id_for_encode,
            password_encoder_for_encode,
            id_to_password_encoder,
        })
    }

    /// Returns the id prefix (e.g., "{").
    #[must_use]
    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    /// Returns the id suffix (e.g., "}").
    #[must_use]
    pub fn id_suffix(&self) -> &str {
        &self.id_suffix
    }

    /// Returns the id used for new encodings.
    #[must_use]
    pub fn id_for_encode(&self) -> &str {
        &self.id_for_encode
    }

    /// Returns `true` if an encoder is registered for `id`.
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.id_to_password_encoder.contains_key(id)
    }

    /// Returns the registered ids in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.id_to_password_encoder.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Extracts the scheme id using this encoder's delimiters.
    #[must_use]
    pub fn extract_id<'a>(&self, prefix_encoded_password: &'a str) -> &'a str {
        extract_id(prefix_encoded_password, &self.id_prefix, &self.id_suffix)
    }
}

impl PasswordEncoder for DelegatingPasswordEncoder {
    fn encode(&self, raw_password: &str) -> PasswordResult<String> {
        let encoded_password = self.password_encoder_for_encode.encode(raw_password)?;
        Ok(make_tag(
            &self.id_prefix,
            &self.id_for_encode,
            &self.id_suffix,
            &encoded_password,
        ))
    }

    fn matches(&self, raw_password: &str, prefix_encoded_password: &str) -> bool {
        let id = self.extract_id(prefix_encoded_password);
        let Some(delegate) = self.id_to_password_encoder.get(id) else {
            tracing::debug!(id, "no password encoder mapped for id");
            return false;
        };
        let encoded_password = extract_encoded_password(prefix_encoded_password, &self.id_suffix);
        delegate.matches(raw_password, encoded_password)
    }

    fn upgradable(&self, prefix_encoded_password: &str) -> bool {
        let id = self.extract_id(prefix_encoded_password);
        if id != self.id_for_encode {
            return true;
        }

        let Some(delegate) = self.id_to_password_encoder.get(id) else {
            tracing::debug!(id, "no password encoder mapped for id");
            return false;
        };
        let encoded_password = extract_encoded_password(prefix_encoded_password, &self.id_suffix);
        delegate.upgradable(encoded_password)
    }

    fn is_legacy(&self) -> bool {
        self.password_encoder_for_encode.is_legacy()
    }
}

// =============================================================================
// Debug (lists ids only)
// =============================================================================

impl Debug for DelegatingPasswordEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegatingPasswordEncoder")
            .field("id_prefix", &self.id_prefix)
            .field("id_suffix", &self.id_suffix)
            .field("id_for_encode", &self.id_for_encode)
            .field("ids", &self.ids())
            .finish()
    }
}

/// Creates the standard delegating encoder.
///
/// New passwords use bcrypt with the default cost. Every other built-in
/// scheme is registered for verification under its conventional id:
/// `pbkdf2`, `scrypt`, `sha256`, `sm3` and `noop`.
#[cfg(feature = "bcrypt")]
#[must_use]
pub fn default_delegating_encoder() -> DelegatingPasswordEncoder {
    use crate::core::schemes::{BCryptPasswordEncoder, NoOpPasswordEncoder};

    let bcrypt: Arc<dyn PasswordEncoder> = Arc::new(BCryptPasswordEncoder::default());

    let mut encoders = EncoderMap::new();
    encoders.insert("bcrypt".to_owned(), Arc::clone(&bcrypt));
    #[cfg(feature = "pbkdf2")]
    encoders.insert(
        "pbkdf2".to_owned(),
        Arc::new(crate::core::schemes::Pbkdf2PasswordEncoder::new()),
    );
    #[cfg(feature = "scrypt")]
    encoders.insert(
        "scrypt".to_owned(),
        Arc::new(crate::core::schemes::SCryptPasswordEncoder::new()),
    );
    #[cfg(feature = "sha256")]
    encoders.insert(
        "sha256".to_owned(),
        Arc::new(crate::core::schemes::Sha256PasswordEncoder::new()),
    );
    #[cfg(feature = "sm3")]
    encoders.insert(
        "sm3".to_owned(),
        Arc::new(crate::core::schemes::Sm3PasswordEncoder::new()),
    );
    encoders.insert("noop".to_owned(), Arc::new(NoOpPasswordEncoder));

    DelegatingPasswordEncoder {
        id_prefix: DEFAULT_ID_PREFIX.to_owned(),
        id_suffix: DEFAULT_ID_SUFFIX.to_owned(),
        id_for_encode: "bcrypt".to_owned(),
        password_encoder_for_encode: bcrypt,
        id_to_password_encoder: encoders,
    }
}

#[cfg(test)]
#[cfg(all(
    feature = "bcrypt",
    feature = "pbkdf2",
    feature = "scrypt",
    feature = "sha256",
    feature = "sm3"
))]
mod tests {
    use super::*;
    use crate::core::keygen::SecureRandomBytesKeyGenerator;
    use crate::core::schemes::{
        BCryptPasswordEncoder, NoOpPasswordEncoder, Pbkdf2PasswordEncoder, Pbkdf2Params,
        SCryptPasswordEncoder, ScryptParams, Sha256PasswordEncoder, Sm3PasswordEncoder,
    };

    /// Always fails to encode.
    struct ErrEncodePasswordEncoder;

    impl PasswordEncoder for ErrEncodePasswordEncoder {
        fn encode(&self, _raw_password: &str) -> PasswordResult<String> {
            Err(PasswordError::KeyDerivationFailed)
        }

        fn matches(&self, _raw_password: &str, _encoded_password: &str) -> bool {
            false
        }
    }

    // Use minimal params for fast tests
    fn test_encoders() -> EncoderMap {
        let salt_generator = SecureRandomBytesKeyGenerator::new(8);
        let mut encoders = EncoderMap::new();
        encoders.insert("bcrypt".to_string(), Arc::new(BCryptPasswordEncoder::new(4)));
        encoders.insert(
            "pbkdf2".to_string(),
            Arc::new(Pbkdf2PasswordEncoder::with_params(Pbkdf2Params {
                iterations: 1000,
                ..Pbkdf2Params::default()
            })),
        );
        encoders.insert(
            "scrypt".to_string(),
            Arc::new(SCryptPasswordEncoder::with_params(ScryptParams {
                cpu_cost: 1024,
                ..ScryptParams::default()
            })),
        );
        encoders.insert(
            "sm3".to_string(),
            Arc::new(Sm3PasswordEncoder::with_salt_generator(salt_generator)),
        );
        encoders.insert(
            "sha256".to_string(),
            Arc::new(Sha256PasswordEncoder::with_salt_generator(salt_generator)),
        );
        encoders.insert("noop".to_string(), Arc::new(NoOpPasswordEncoder));
        encoders
    }

    fn test_encoder() -> PasswordResult<DelegatingPasswordEncoder> {
        DelegatingPasswordEncoder::try_new("bcrypt", test_encoders())
    }

    #[test]
    fn test_try_new() -> PasswordResult<()> {
        let encoder = test_encoder()?;
        assert_eq!(encoder.id_for_encode(), "bcrypt");
        assert_eq!(encoder.id_prefix(), "{");
        assert_eq!(encoder.id_suffix(), "}");
        assert_eq!(
            encoder.ids(),
            vec!["bcrypt", "noop", "pbkdf2", "scrypt", "sha256", "sm3"]
        );
        assert!(encoder.contains_id("sm3"));
        assert!(!encoder.contains_id("SM3"));
        Ok(())
    }

    #[test]
    fn test_try_new_unknown_encode_id() {
        let result = DelegatingPasswordEncoder::try_new("", test_encoders());
        assert!(matches!(result, Err(PasswordError::UnknownEncodeId(id)) if id.is_empty()));

        let result = DelegatingPasswordEncoder::try_new("argon2", test_encoders());
        assert!(matches!(result, Err(PasswordError::UnknownEncodeId(id)) if id == "argon2"));

        let result = DelegatingPasswordEncoder::try_new("bcrypt", EncoderMap::new());
        assert!(matches!(result, Err(PasswordError::UnknownEncodeId(_))));
    }

    #[test]
    fn test_try_new_invalid_id() {
        let mut encoders = test_encoders();
        encoders.insert("no}op".to_string(), Arc::new(NoOpPasswordEncoder));
        let result = DelegatingPasswordEncoder::try_new("bcrypt", encoders);
        assert!(matches!(result, Err(PasswordError::InvalidId(id)) if id == "no}op"));
    }

    #[test]
    fn test_empty_id_receives_untagged_values() -> PasswordResult<()> {
        let mut encoders = test_encoders();
        encoders.insert(String::new(), Arc::new(NoOpPasswordEncoder));
        let encoder = DelegatingPasswordEncoder::try_new("bcrypt", encoders)?;

        assert!(encoder.contains_id(""));
        assert!(encoder.matches("password", "password"));
        assert!(!encoder.matches("passworda", "password"));
        // The whole value reaches the encoder when no suffix is present.
        assert!(encoder.matches("{noop password", "{noop password"));
        assert!(encoder.matches("password", "{}password"));
        assert!(encoder.upgradable("password"));

        // Tagged values still route by id.
        assert!(encoder.matches("password", "{noop}password"));
        assert!(!encoder.matches("{noop}password", "{noop}password"));
        Ok(())
    }

    #[test]
    fn test_legacy_encode_id_still_builds() -> PasswordResult<()> {
        for id in ["sha256", "sm3", "noop"] {
            let encoder = DelegatingPasswordEncoder::try_new(id, test_encoders())?;
            let stored = encoder.encode("password")?;
            assert!(encoder.matches("password", &stored), "{id}");
            assert!(encoder.is_legacy(), "{id}");
        }
        assert!(!test_encoder()?.is_legacy());

        let encoders = test_encoders();
        for (id, delegate) in &encoders {
            let legacy = matches!(id.as_str(), "sha256" | "sm3" | "noop");
            assert_eq!(delegate.is_legacy(), legacy, "{id}");
        }
        Ok(())
    }

    #[test]
    fn test_try_with_delimiters() -> PasswordResult<()> {
        let encoder =
            DelegatingPasswordEncoder::try_with_delimiters("noop", test_encoders(), "[", "]")?;
        let encoded = encoder.encode("password")?;
        assert_eq!(encoded, "[noop]password");
        assert!(encoder.matches("password", &encoded));
        assert!(!encoder.matches("password", "{noop}password"));

        let result =
            DelegatingPasswordEncoder::try_with_delimiters("noop", test_encoders(), "", "]");
        assert!(matches!(result, Err(PasswordError::InvalidDelimiter)));
        let result =
            DelegatingPasswordEncoder::try_with_delimiters("noop", test_encoders(), "[", "");
        assert!(matches!(result, Err(PasswordError::InvalidDelimiter)));
        Ok(())
    }

    #[test]
    fn test_encode_and_matches() -> PasswordResult<()> {
        let encoder = test_encoder()?;
        let encoded = encoder.encode("password")?;

        assert_ne!(encoded, "password");
        assert!(encoded.starts_with("{bcrypt}"));
        assert!(encoder.matches("password", &encoded));
        assert!(!encoder.matches("passworda", &encoded));
        Ok(())
    }

    #[test]
    fn test_matches_every_registered_scheme() -> PasswordResult<()> {
        let encoder = test_encoder()?;
        let raw_password = "password";

        for (id, delegate) in test_encoders() {
            let encoded = delegate.encode(raw_password)?;
            assert!(delegate.matches(raw_password, &encoded), "{id}");
            assert!(!delegate.matches("passworda", &encoded), "{id}");

            let prefix_encoded = format!("{{{id}}}{encoded}");
            assert!(encoder.matches(raw_password, &prefix_encoded), "{id}");
            assert!(!encoder.matches("passworda", &prefix_encoded), "{id}");
        }
        Ok(())
    }

    #[test]
    fn test_matches_soft_failures() -> PasswordResult<()> {
        let encoder = test_encoder()?;
        assert!(!encoder.matches("password", "password"));
        assert!(!encoder.matches("password", ""));
        assert!(!encoder.matches("password", "{unknown}password"));
        assert!(!encoder.matches("password", "{noop password"));
        assert!(!encoder.matches("password", " {noop}password"));
        assert!(!encoder.matches("password", "{NOOP}password"));
        assert!(!encoder.matches("password", "{pbkdf2}zz"));
        assert!(!encoder.matches("password", "{scrypt}$a0801$!!$!!"));
        assert!(!encoder.matches("password", "{sha256}00"));
        assert!(!encoder.matches("password", "{bcrypt}$2a$"));
        Ok(())
    }

    #[test]
    fn test_encode_error_propagates() -> PasswordResult<()> {
        let mut encoders = test_encoders();
        encoders.insert("err".to_string(), Arc::new(ErrEncodePasswordEncoder));
        let encoder = DelegatingPasswordEncoder::try_new("err", encoders)?;
        assert!(matches!(
            encoder.encode("?"),
            Err(PasswordError::KeyDerivationFailed)
        ));
        Ok(())
    }

    #[test]
    fn test_upgradable_same_id() -> PasswordResult<()> {
        let encoder = test_encoder()?;
        let encoded = encoder.encode("password")?;
        assert!(!encoder.upgradable(&encoded));
        Ok(())
    }

    #[test]
    fn test_upgradable_different_id() -> PasswordResult<()> {
        let encoder = test_encoder()?;
        assert!(encoder.upgradable("{noop}password"));
        assert!(encoder.upgradable("{unknown}anything"));
        assert!(encoder.upgradable("no tag at all"));
        assert!(encoder.upgradable(""));
        Ok(())
    }

    #[test]
    fn test_upgradable_delegates_cost_check() -> PasswordResult<()> {
        let encoder = test_encoder()?;
        let stored = encoder.encode("password")?;

        let mut encoders = test_encoders();
        encoders.insert("bcrypt".to_string(), Arc::new(BCryptPasswordEncoder::new(5)));
        let stronger = DelegatingPasswordEncoder::try_new("bcrypt", encoders)?;
        assert!(stronger.upgradable(&stored));
        assert!(stronger.matches("password", &stored));
        Ok(())
    }

    #[test]
    fn test_upgradable_encode_id_not_registered() -> PasswordResult<()> {
        let mut encoder = test_encoder()?;
        let encoded = encoder.encode("password")?;

        encoder.id_to_password_encoder.remove("bcrypt");

        assert!(!encoder.upgradable(&encoded));
        assert!(!encoder.matches("password", &encoded));
        Ok(())
    }

    #[test]
    fn test_shared_across_threads() -> PasswordResult<()> {
        let encoder = Arc::new(test_encoder()?);
        let stored = encoder.encode("password")?;

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let encoder = Arc::clone(&encoder);
                let stored = stored.as_str();
                scope.spawn(move || {
                    assert!(encoder.matches("password", stored));
                    assert!(encoder.matches("password", "{noop}password"));
                });
            }
        });
        Ok(())
    }

    #[test]
    fn test_default_delegating_encoder() -> PasswordResult<()> {
        let encoder = default_delegating_encoder();
        assert_eq!(encoder.id_for_encode(), "bcrypt");
        assert_eq!(
            encoder.ids(),
            vec!["bcrypt", "noop", "pbkdf2", "scrypt", "sha256", "sm3"]
        );
        assert!(encoder.matches(
            "password",
            "{bcrypt}$2a$10$dXJ3SW6G7P50lGmMkkmwe.20cQQubK3.HZWzG3YB1tlRy.fqvM/BG"
        ));
        assert!(encoder.matches("password", "{noop}password"));
        assert!(!encoder.upgradable(
            "{bcrypt}$2a$10$dXJ3SW6G7P50lGmMkkmwe.20cQQubK3.HZWzG3YB1tlRy.fqvM/BG"
        ));
        Ok(())
    }

    #[test]
    fn test_debug_lists_ids_only() -> PasswordResult<()> {
        let encoder = test_encoder()?;
        let debug_str = format!("{encoder:?}");
        assert!(debug_str.contains("DelegatingPasswordEncoder"));
        assert!(debug_str.contains("\"bcrypt\""));
        assert!(debug_str.contains("\"noop\""));
        Ok(())
    }

    #[test]
    fn test_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DelegatingPasswordEncoder>();
    }
}
