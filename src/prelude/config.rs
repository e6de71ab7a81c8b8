//! Declarative encoder configuration.
//!
//! With the `serde` feature, [`PasswordEncoderConfig`] deserializes from any
//! serde format. Missing fields take their defaults.
//!
//! ```rust
//! use password_encoder::prelude::*;
//!
//! let config = PasswordEncoderConfig {
//!     encode_id: "noop".to_string(),
//!     ..PasswordEncoderConfig::default()
//! };
//! let encoder = config.build().expect("noop is registered");
//! assert_eq!(encoder.encode("password").expect("encode"), "{noop}password");
//! ```

use crate::core::delegating::DelegatingPasswordEncoder;
use crate::core::error::PasswordResult;
use crate::core::tag::{DEFAULT_ID_PREFIX, DEFAULT_ID_SUFFIX};
use crate::prelude::builders::DelegatingPasswordEncoderBuilder;

#[cfg(feature = "pbkdf2")]
use crate::core::schemes::Pbkdf2Params;

#[cfg(feature = "scrypt")]
use crate::core::schemes::ScryptParams;

/// Settings for a delegating encoder with every enabled scheme registered.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PasswordEncoderConfig {
    /// Id used for new encodings.
    pub encode_id: String,
    /// Id prefix.
    pub id_prefix: String,
    /// Id suffix.
    pub id_suffix: String,
    /// bcrypt cost.
    #[cfg(feature = "bcrypt")]
    pub bcrypt_cost: u32,
    /// PBKDF2 parameters.
    #[cfg(feature = "pbkdf2")]
    pub pbkdf2: Pbkdf2Params,
    /// scrypt parameters.
    #[cfg(feature = "scrypt")]
    pub scrypt: ScryptParams,
}

impl Default for PasswordEncoderConfig {
    fn default() -> Self {
        Self {
            encode_id: "bcrypt".to_owned(),
            id_prefix: DEFAULT_ID_PREFIX.to_owned(),
            id_suffix: DEFAULT_ID_SUFFIX.to_owned(),
            #[cfg(feature = "bcrypt")]
            bcrypt_cost: crate::core::schemes::DEFAULT_BCRYPT_COST,
            #[cfg(feature = "pbkdf2")]
            pbkdf2: Pbkdf2Params::default(),
            #[cfg(feature = "scrypt")]
            scrypt: ScryptParams::default(),
        }
    }
}

impl PasswordEncoderConfig {
    /// Returns a builder preloaded with this configuration.
    ///
    /// Further schemes can be registered before building.
    #[must_use]
    pub fn to_builder(&self) -> DelegatingPasswordEncoderBuilder {
        let builder = DelegatingPasswordEncoderBuilder::standard()
            .encode_id(self.encode_id.as_str())
            .id_prefix(self.id_prefix.as_str())
            .id_suffix(self.id_suffix.as_str());
        #[cfg(feature = "bcrypt")]
        let builder = builder.register(
            "bcrypt",
            crate::core::schemes::BCryptPasswordEncoder::new(self.bcrypt_cost),
        );
        #[cfg(feature = "pbkdf2")]
        let builder = builder.register(
            "pbkdf2",
            crate::core::schemes::Pbkdf2PasswordEncoder::with_params(self.pbkdf2),
        );
        #[cfg(feature = "scrypt")]
        let builder = builder.register(
            "scrypt",
            crate::core::schemes::SCryptPasswordEncoder::with_params(self.scrypt),
        );
        builder
    }

    /// Builds the configured encoder.
    ///
    /// Scheme parameters are not checked here; a bad bcrypt cost or scrypt
    /// parameter surfaces as an error from `encode`.
    ///
    /// # Errors
    ///
    /// As [`DelegatingPasswordEncoderBuilder::build`].
    pub fn build(&self) -> PasswordResult<DelegatingPasswordEncoder> {
        self.to_builder().build()
    }
}
