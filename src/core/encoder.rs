//! The capability shared by every password encoding scheme.

use crate::core::error::PasswordResult;

/// Encodes raw passwords and verifies them against stored encodings.
///
/// Implementations handle exactly one scheme and produce its *bare* text
/// form; framing the result with an `{id}` tag is the job of
/// [`DelegatingPasswordEncoder`](crate::core::delegating::DelegatingPasswordEncoder).
///
/// # Contract
///
/// - [`encode`](Self::encode) embeds every salt and parameter needed to
///   verify the result later. It fails only when salt generation or the
///   underlying primitive fails.
/// - [`matches`](Self::matches) never panics and never reports an error:
///   malformed, truncated or foreign input is simply `false`.
/// - [`upgradable`](Self::upgradable) reports whether an encoding should be
///   regenerated with the encoder's current parameters.
pub trait PasswordEncoder: Send + Sync {
    /// Encodes a raw password.
    ///
    /// # Errors
    ///
    /// Returns an error if salt generation or the primitive fails.
    fn encode(&self, raw_password: &str) -> PasswordResult<String>;

    /// Returns `true` if `raw_password` produces `encoded_password`.
    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool;

    /// Returns `true` if `encoded_password` was produced with weaker
    /// parameters than this encoder is configured with.
    ///
    /// Schemes that do not embed a work factor never report an upgrade.
    fn upgradable(&self, _encoded_password: &str) -> bool {
        false
    }

    /// Returns `true` for schemes kept only to verify existing credentials.
    ///
    /// Selecting one of these for new encodings is allowed but logged.
    fn is_legacy(&self) -> bool {
        false
    }
}
