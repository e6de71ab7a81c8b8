//! Password encoding schemes.
//!
//! Each scheme implements [`PasswordEncoder`](crate::core::encoder::PasswordEncoder)
//! for exactly one bare text format:
//!
//! | Id | Type | Format |
//! |----|------|--------|
//! | `bcrypt` | [`BCryptPasswordEncoder`] | `$2a$<cost>$<salt+hash>` |
//! | `pbkdf2` | [`Pbkdf2PasswordEncoder`] | `hex(salt \|\| key)` |
//! | `scrypt` | [`SCryptPasswordEncoder`] | `$<hex(params)>$<b64(salt)>$<b64(key)>` |
//! | `sha256` | [`Sha256PasswordEncoder`] | `hex(salt \|\| sha256(salt \|\| pw))` |
//! | `sm3` | [`Sm3PasswordEncoder`] | `hex(salt \|\| sm3(salt \|\| pw))` |
//! | `noop` | [`NoOpPasswordEncoder`] | the raw password |
//!
//! # Parameter Selection
//!
//! ## PBKDF2-HMAC-SHA256
//! - **Interactive**: 100,000 iterations
//! - **Moderate**: 310,000 iterations (default)
//! - **Sensitive**: 600,000 iterations
//!
//! ## scrypt
//! - **Moderate**: N=65536, r=8, p=1, 16-byte salt (default)
//! - **Legacy**: N=16384, r=8, p=1, 64-byte salt
//!
//! The `sha256` and `sm3` schemes hash once with no work factor and are
//! kept only to verify existing credentials.

#[cfg(feature = "bcrypt")]
mod bcrypt_impl;

#[cfg(any(feature = "sha256", feature = "sm3"))]
mod digest_impl;

mod noop;

#[cfg(feature = "pbkdf2")]
mod pbkdf2_impl;

#[cfg(feature = "scrypt")]
mod scrypt_impl;

#[cfg(feature = "bcrypt")]
pub use bcrypt_impl::{BCryptPasswordEncoder, DEFAULT_BCRYPT_COST, MAX_BCRYPT_PASSWORD_LEN};

#[cfg(any(feature = "sha256", feature = "sm3"))]
pub use digest_impl::{SaltedDigestPasswordEncoder, DIGEST_SALT_SIZE};

#[cfg(feature = "sha256")]
pub use digest_impl::Sha256PasswordEncoder;

#[cfg(feature = "sm3")]
pub use digest_impl::Sm3PasswordEncoder;

pub use noop::NoOpPasswordEncoder;

#[cfg(feature = "pbkdf2")]
pub use pbkdf2_impl::{Pbkdf2PasswordEncoder, Pbkdf2Params, PBKDF2_KEY_SIZE, PBKDF2_SALT_SIZE};

#[cfg(feature = "scrypt")]
pub use scrypt_impl::{SCryptPasswordEncoder, ScryptParams, SCRYPT_KEY_SIZE, SCRYPT_SALT_SIZE};
