//! Ergonomic layer for password encoding.
//!
//! The prelude module provides the builder, the configuration struct and
//! re-exports of every enabled scheme.
//!
//! # Usage
//!
//! ```rust
//! use password_encoder::prelude::*;
//! ```

mod builders;
mod config;

pub use builders::DelegatingPasswordEncoderBuilder;
pub use config::PasswordEncoderConfig;

// Re-export core types for convenience
pub use crate::core::delegating::{DelegatingPasswordEncoder, EncoderMap};
pub use crate::core::encoder::PasswordEncoder;
pub use crate::core::error::{PasswordError, PasswordResult};
pub use crate::core::keygen::{BytesKeyGenerator, SecureRandomBytesKeyGenerator};
pub use crate::core::schemes::NoOpPasswordEncoder;

#[cfg(feature = "bcrypt")]
pub use crate::core::delegating::default_delegating_encoder;

#[cfg(feature = "bcrypt")]
pub use crate::core::schemes::BCryptPasswordEncoder;

#[cfg(feature = "pbkdf2")]
pub use crate::core::schemes::{Pbkdf2PasswordEncoder, Pbkdf2Params};

#[cfg(feature = "scrypt")]
pub use crate::core::schemes::{SCryptPasswordEncoder, ScryptParams};

#[cfg(feature = "sha256")]
pub use crate::core::schemes::Sha256PasswordEncoder;

#[cfg(feature = "sm3")]
pub use crate::core::schemes::Sm3PasswordEncoder;
