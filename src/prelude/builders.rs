//! Builder pattern for the delegating password encoder.
//!
//! # Example
//!
//! ```rust
//! use password_encoder::prelude::*;
//!
//! // Start from the standard registry and encode new passwords with PBKDF2
//! let encoder = DelegatingPasswordEncoderBuilder::standard()
//!     .encode_id("pbkdf2")
//!     .build()
//!     .expect("pbkdf2 is registered");
//! assert_eq!(encoder.id_for_encode(), "pbkdf2");
//!
//! // Or register schemes one by one
//! let encoder = DelegatingPasswordEncoderBuilder::new()
//!     .register("bcrypt", BCryptPasswordEncoder::new(4))
//!     .register("noop", NoOpPasswordEncoder)
//!     .encode_id("bcrypt")
//!     .id_prefix("[")
//!     .id_suffix("]")
//!     .build()
//!     .expect("bcrypt is registered");
//! assert!(encoder.matches("password", "[noop]password"));
//! ```

use std::sync::Arc;

use crate::core::delegating::{DelegatingPasswordEncoder, EncoderMap};
use crate::core::encoder::PasswordEncoder;
use crate::core::error::PasswordResult;
use crate::core::tag::{DEFAULT_ID_PREFIX, DEFAULT_ID_SUFFIX};

/// Id used for new encodings when none is set.
const DEFAULT_ENCODE_ID: &str = "bcrypt";

/// Builder for [`DelegatingPasswordEncoder`].
///
/// Registering the same id twice keeps the later encoder. Validation is
/// deferred to [`build`](Self::build).
#[derive(Clone)]
pub struct DelegatingPasswordEncoderBuilder {
    id_for_encode: String,
    id_prefix: String,
    id_suffix: String,
    encoders: EncoderMap,
}

impl Default for DelegatingPasswordEncoderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DelegatingPasswordEncoderBuilder {
    /// Creates a builder with an empty registry.
    ///
    /// The encode id defaults to `bcrypt` and the delimiters to `{` and `}`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id_for_encode: DEFAULT_ENCODE_ID.to_owned(),
            id_prefix: DEFAULT_ID_PREFIX.to_owned(),
            id_suffix: DEFAULT_ID_SUFFIX.to_owned(),
            encoders: EncoderMap::new(),
        }
    }

    /// Creates a builder with every enabled scheme registered under its
    /// conventional id, using default parameters.
    #[must_use]
    pub fn standard() -> Self {
        use crate::core::schemes;

        let builder = Self::new().register("noop", schemes::NoOpPasswordEncoder);
        #[cfg(feature = "bcrypt")]
        let builder = builder.register("bcrypt", schemes::BCryptPasswordEncoder::default());
        #[cfg(feature = "pbkdf2")]
        let builder = builder.register("pbkdf2", schemes::Pbkdf2PasswordEncoder::new());
        #[cfg(feature = "scrypt")]
        let builder = builder.register("scrypt", schemes::SCryptPasswordEncoder::new());
        #[cfg(feature = "sha256")]
        let builder = builder.register("sha256", schemes::Sha256PasswordEncoder::new());
        #[cfg(feature = "sm3")]
        let builder = builder.register("sm3", schemes::Sm3PasswordEncoder::new());
        builder
    }

    /// Sets the id whose encoder is used for new passwords.
    #[must_use]
    pub fn encode_id(mut self, id: impl Into<String>) -> Self {
        self.id_for_encode = id.into();
        self
    }

    /// Sets the id prefix.
    #[must_use]
    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Sets the id suffix.
    #[must_use]
    pub fn id_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.id_suffix = suffix.into();
        self
    }

    /// Registers `encoder` under `id`.
    #[must_use]
    pub fn register(self, id: impl Into<String>, encoder: impl PasswordEncoder + 'static) -> Self {
        self.register_shared(id, Arc::new(encoder))
    }

    /// Registers an already shared encoder under `id`.
    #[must_use]
    pub fn register_shared(
        mut self,
        id: impl Into<String>,
        encoder: Arc<dyn PasswordEncoder>,
    ) -> Self {
        self.encoders.insert(id.into(), encoder);
        self
    }

    /// Returns the configured encode id.
    #[must_use]
    pub fn get_encode_id(&self) -> &str {
        &self.id_for_encode
    }

    /// Returns `true` if an encoder is registered under `id`.
    #[must_use]
    pub fn is_registered(&self, id: &str) -> bool {
        self.encoders.contains_key(id)
    }

    /// Builds the encoder.
    ///
    /// # Errors
    ///
    /// - [`PasswordError::InvalidDelimiter`](crate::core::error::PasswordError::InvalidDelimiter)
    ///   if a delimiter is empty
    /// - [`PasswordError::UnknownEncodeId`](crate::core::error::PasswordError::UnknownEncodeId)
    ///   if nothing is registered under the encode id
    /// - [`PasswordError::InvalidId`](crate::core::error::PasswordError::InvalidId)
    ///   if a registered id contains the suffix
    pub fn build(self) -> PasswordResult<DelegatingPasswordEncoder> {
        DelegatingPasswordEncoder::try_with_delimiters(
            self.id_for_encode,
            self.encoders,
            self.id_prefix,
            self.id_suffix,
        )
    }
}

impl core::fmt::Debug for DelegatingPasswordEncoderBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut ids: Vec<&str> = self.encoders.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("DelegatingPasswordEncoderBuilder")
            .field("id_for_encode", &self.id_for_encode)
            .field("id_prefix", &self.id_prefix)
            .field("id_suffix", &self.id_suffix)
            .field("ids", &ids)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PasswordError;
    use crate::core::schemes::NoOpPasswordEncoder;

    #[test]
    fn test_builder_defaults() {
        let builder = DelegatingPasswordEncoderBuilder::new();
        assert_eq!(builder.get_encode_id(), "bcrypt");
        assert!(!builder.is_registered("bcrypt"));

        let default = DelegatingPasswordEncoderBuilder::default();
        assert_eq!(default.get_encode_id(), builder.get_encode_id());
    }

    #[test]
    fn test_builder_custom() -> PasswordResult<()> {
        let encoder = DelegatingPasswordEncoderBuilder::new()
            .register("plain", NoOpPasswordEncoder)
            .encode_id("plain")
            .id_prefix("<<")
            .id_suffix(">>")
            .build()?;

        assert_eq!(encoder.id_prefix(), "<<");
        assert_eq!(encoder.id_suffix(), ">>");
        assert_eq!(encoder.encode("password")?, "<<plain>>password");
        assert!(encoder.matches("password", "<<plain>>password"));
        Ok(())
    }

    #[test]
    fn test_builder_register_replaces() -> PasswordResult<()> {
        let encoder = DelegatingPasswordEncoderBuilder::new()
            .register("noop", NoOpPasswordEncoder)
            .register_shared("noop", Arc::new(NoOpPasswordEncoder))
            .encode_id("noop")
            .build()?;
        assert_eq!(encoder.ids(), vec!["noop"]);
        Ok(())
    }

    #[test]
    fn test_builder_unknown_encode_id() {
        let result = DelegatingPasswordEncoderBuilder::new()
            .register("noop", NoOpPasswordEncoder)
            .build();
        assert!(matches!(result, Err(PasswordError::UnknownEncodeId(id)) if id == "bcrypt"));
    }

    #[test]
    fn test_builder_invalid_configuration() {
        let base = DelegatingPasswordEncoderBuilder::new()
            .register("noop", NoOpPasswordEncoder)
            .encode_id("noop");

        let result = base.clone().id_prefix("").build();
        assert!(matches!(result, Err(PasswordError::InvalidDelimiter)));

        let result = base.clone().id_suffix("").build();
        assert!(matches!(result, Err(PasswordError::InvalidDelimiter)));

        let result = base.register("a}b", NoOpPasswordEncoder).build();
        assert!(matches!(result, Err(PasswordError::InvalidId(id)) if id == "a}b"));
    }

    #[test]
    #[cfg(all(
        feature = "bcrypt",
        feature = "pbkdf2",
        feature = "scrypt",
        feature = "sha256",
        feature = "sm3"
    ))]
    fn test_builder_standard() -> PasswordResult<()> {
        let builder = DelegatingPasswordEncoderBuilder::standard();
        for id in ["bcrypt", "pbkdf2", "scrypt", "sha256", "sm3", "noop"] {
            assert!(builder.is_registered(id), "{id}");
        }

        let encoder = builder.encode_id("sha256").build()?;
        let stored = encoder.encode("password")?;
        assert!(stored.starts_with("{sha256}"));
        assert!(encoder.matches("password", &stored));
        assert!(encoder.upgradable("{noop}password"));
        Ok(())
    }

    #[test]
    fn test_builder_debug() {
        let builder = DelegatingPasswordEncoderBuilder::new().register("noop", NoOpPasswordEncoder);
        let debug_str = format!("{builder:?}");
        assert!(debug_str.contains("DelegatingPasswordEncoderBuilder"));
        assert!(debug_str.contains("\"noop\""));
    }
}
