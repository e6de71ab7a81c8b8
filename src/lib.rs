//! Pluggable password encoding with `{id}`-tagged storage.
//!
//! Stored passwords carry a short scheme tag, e.g.
//! `{bcrypt}$2a$10$...` or `{pbkdf2}828bd964...`. A
//! [`DelegatingPasswordEncoder`] reads the tag and hands verification to the
//! matching scheme, so credentials hashed under older schemes keep working
//! while new passwords are always encoded with the preferred one.
//!
//! # Quick Start
//!
//! ```rust
//! use password_encoder::prelude::*;
//!
//! let encoder = default_delegating_encoder();
//!
//! // New passwords use bcrypt
//! let stored = encoder.encode("password").expect("encode should succeed");
//! assert!(stored.starts_with("{bcrypt}$2a$10$"));
//! assert!(encoder.matches("password", &stored));
//!
//! // Older schemes still verify, and report that they need re-encoding
//! assert!(encoder.matches("password", "{noop}password"));
//! assert!(encoder.upgradable("{noop}password"));
//! ```
//!
//! # Schemes
//!
//! | Id | Algorithm | Notes |
//! |----|-----------|-------|
//! | `bcrypt` | bcrypt | Default for new passwords, cost 10 |
//! | `pbkdf2` | PBKDF2-HMAC-SHA256 | 310,000 iterations |
//! | `scrypt` | scrypt | N=65536, r=8, p=1 |
//! | `sha256` | salted SHA-256 | Legacy, verification only |
//! | `sm3` | salted SM3 | Legacy, verification only |
//! | `noop` | none | Plain text, verification only |
//!
//! # Features
//!
//! Each scheme sits behind a feature flag of the same name:
//!
//! ```toml
//! [dependencies]
//! password-encoder = "0.1"  # every scheme plus the prelude (default)
//! password-encoder = { version = "0.1", default-features = false, features = ["bcrypt"] }
//! password-encoder = { version = "0.1", features = ["serde"] }  # deserializable config
//! ```
//!
//! # Security
//!
//! - Hash comparison is constant-time
//! - Derived key material is zeroized on drop
//! - Malformed stored values never panic; they simply fail to match
//! - No unsafe code
//!
//! # Modules
//!
//! - [`core`] - Core types and operations
//! - [`prelude`] - Builders, configuration and ergonomic imports (requires `prelude` feature)

pub mod core;

#[cfg(feature = "prelude")]
pub mod prelude;

// Re-export commonly used items at crate root
pub use core::delegating::{DelegatingPasswordEncoder, EncoderMap};
pub use core::encoder::PasswordEncoder;
pub use core::error::{PasswordError, PasswordResult};
pub use core::keygen::{BytesKeyGenerator, SecureRandomBytesKeyGenerator};
pub use core::schemes::NoOpPasswordEncoder;

#[cfg(feature = "bcrypt")]
pub use core::delegating::default_delegating_encoder;

#[cfg(feature = "bcrypt")]
pub use core::schemes::BCryptPasswordEncoder;

#[cfg(feature = "pbkdf2")]
pub use core::schemes::{Pbkdf2PasswordEncoder, Pbkdf2Params};

#[cfg(feature = "scrypt")]
pub use core::schemes::{SCryptPasswordEncoder, ScryptParams};

#[cfg(feature = "sha256")]
pub use core::schemes::Sha256PasswordEncoder;

#[cfg(feature = "sm3")]
pub use core::schemes::Sm3PasswordEncoder;
