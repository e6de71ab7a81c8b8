//! Identity encoding, for tests and for verifying plain-text legacy values.

use crate::core::encoder::PasswordEncoder;
use crate::core::error::PasswordResult;

/// Stores passwords unchanged.
///
/// # Security
///
/// Never use this as the encoder for new passwords. It exists so that
/// `{noop}` values imported from other systems can be verified and then
/// upgraded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoOpPasswordEncoder;

impl PasswordEncoder for NoOpPasswordEncoder {
    fn encode(&self, raw_password: &str) -> PasswordResult<String> {
        Ok(raw_password.to_owned())
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        raw_password == encoded_password
    }

    fn is_legacy(&self) -> bool {
        true
    }
}
