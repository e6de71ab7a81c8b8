//! Core password encoding types and operations.
//!
//! This module provides the fundamental building blocks:
//!
//! - [`encoder`] - The [`PasswordEncoder`] trait every scheme implements
//! - [`error`] - Error types for encoding operations
//! - [`keygen`] - Salt generation
//! - [`tag`] - `{id}` tag parsing and generation utilities
//! - [`schemes`] - Concrete schemes (bcrypt, PBKDF2, scrypt, legacy digests)
//! - [`delegating`] - The id-dispatching [`DelegatingPasswordEncoder`]

pub mod delegating;
pub mod encoder;
pub mod error;
pub mod keygen;
pub mod schemes;
pub mod tag;

// Re-export commonly used items
pub use delegating::{DelegatingPasswordEncoder, EncoderMap};
pub use encoder::PasswordEncoder;
pub use error::{PasswordError, PasswordResult};
pub use keygen::{BytesKeyGenerator, SecureRandomBytesKeyGenerator};
