//! scrypt password encoding.
//!
//! Format: `$<hex(params)>$<base64(salt)>$<base64(derived_key)>`
//!
//! `params` packs the cost parameters into one integer rendered as lowercase
//! hex: `log2(N)` in bits 16-31, `r` in bits 8-15 and `p` in bits 0-7. Salt
//! and key use standard padded base64. The derived key length is not stored
//! and must match the verifying encoder's configuration.

use base64::prelude::*;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::core::encoder::PasswordEncoder;
use crate::core::error::{PasswordError, PasswordResult};
use crate::core::keygen::{BytesKeyGenerator, SecureRandomBytesKeyGenerator};

/// Default salt size for scrypt (16 bytes).
pub const SCRYPT_SALT_SIZE: usize = 16;

/// Default derived key size for scrypt (32 bytes).
pub const SCRYPT_KEY_SIZE: usize = 32;

/// Largest working set (`128 * r * N` bytes) accepted from a stored encoding.
const MAX_DECODE_MEMORY: u64 = 1 << 30;

/// Largest total work (`128 * r * N * p` bytes mixed) accepted from a stored
/// encoding. Sixteen times the default parameters.
const MAX_DECODE_WORK: u64 = 1 << 30;

/// scrypt cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScryptParams {
    /// CPU cost `N`. Must be a power of two greater than one.
    pub cpu_cost: u32,
    /// Memory cost (block size) `r`, 1-255.
    pub memory_cost: u32,
    /// Parallelization `p`, 1-255.
    pub parallelization: u32,
    /// Derived key length in bytes.
    pub key_length: usize,
    /// Salt length in bytes.
    pub salt_length: usize,
}

impl Default for ScryptParams {
    fn default() -> Self {
        Self::moderate()
    }
}

impl ScryptParams {
    /// Moderate profile, the default for new encodings.
    /// - N: 65536
    /// - r: 8
    /// - p: 1
    /// - Salt: 16 bytes
    #[must_use]
    pub const fn moderate() -> Self {
        Self {
            cpu_cost: 65_536,
            memory_cost: 8,
            parallelization: 1,
            key_length: SCRYPT_KEY_SIZE,
            salt_length: SCRYPT_SALT_SIZE,
        }
    }

    /// Legacy profile used by older deployments.
    /// - N: 16384
    /// - r: 8
    /// - p: 1
    /// - Salt: 64 bytes
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            cpu_cost: 16_384,
            memory_cost: 8,
            parallelization: 1,
            key_length: SCRYPT_KEY_SIZE,
            salt_length: 64,
        }
    }
}

/// Cost parameters as they appear in an encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PackedParams {
    log_n: u32,
    r: u32,
    p: u32,
}

impl PackedParams {
    fn pack(self) -> u32 {
        (self.log_n << 16) | (self.r << 8) | self.p
    }

    fn unpack(params: u32) -> Self {
        Self {
            log_n: (params >> 16) & 0xffff,
            r: (params >> 8) & 0xff,
            p: params & 0xff,
        }
    }

    fn parse(hex_params: &str) -> Option<Self> {
        u32::from_str_radix(hex_params, 16).ok().map(Self::unpack)
    }

    /// Builds primitive parameters, refusing anything the primitive rejects.
    fn to_scrypt(self, key_length: usize) -> Option<scrypt::Params> {
        let log_n = u8::try_from(self.log_n).ok()?;
        scrypt::Params::new(log_n, self.r, self.p, key_length).ok()
    }

    fn memory(self) -> Option<u64> {
        if self.log_n >= 64 {
            return None;
        }
        128u64
            .checked_mul(u64::from(self.r))?
            .checked_mul(1u64 << self.log_n)
    }

    fn work(self) -> Option<u64> {
        self.memory()?.checked_mul(u64::from(self.p))
    }
}

/// Encodes passwords with scrypt.
///
/// # Example
///
/// ```rust
/// use password_encoder::core::encoder::PasswordEncoder;
/// use password_encoder::core::schemes::SCryptPasswordEncoder;
///
/// let encoder = SCryptPasswordEncoder::new();
/// let stored = "$100801$4P6llsBJYk/EbyFZaq6yyw==$+G59NWVc3S/n67Eo5+bxjY7RP9NsDAclJzorgIet0Rs=";
/// assert!(encoder.matches("myPassword", stored));
/// ```
#[derive(Debug, Clone)]
pub struct SCryptPasswordEncoder<G = SecureRandomBytesKeyGenerator> {
    salt_generator: G,
    cpu_cost: u32,
    memory_cost: u32,
    parallelization: u32,
    key_length: usize,
}

impl SCryptPasswordEncoder {
    /// Creates an encoder with the default (moderate) parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(ScryptParams::default())
    }

    /// Creates an encoder with the given parameters and a secure random salt.
    ///
    /// Parameters are validated when encoding.
    #[must_use]
    pub fn with_params(params: ScryptParams) -> Self {
        Self::with_salt_generator(SecureRandomBytesKeyGenerator::new(params.salt_length), params)
    }
}

impl Default for SCryptPasswordEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: BytesKeyGenerator> SCryptPasswordEncoder<G> {
    /// Creates an encoder drawing salts from `salt_generator`.
    ///
    /// `params.salt_length` is ignored in favour of the generator's length.
    #[must_use]
    pub fn with_salt_generator(salt_generator: G, params: ScryptParams) -> Self {
        Self {
            salt_generator,
            cpu_cost: params.cpu_cost,
            memory_cost: params.memory_cost,
            parallelization: params.parallelization,
            key_length: params.key_length,
        }
    }

    /// Returns the configured parameters.
    #[must_use]
    pub fn params(&self) -> ScryptParams {
        ScryptParams {
            cpu_cost: self.cpu_cost,
            memory_cost: self.memory_cost,
            parallelization: self.parallelization,
            key_length: self.key_length,
            salt_length: self.salt_generator.key_length(),
        }
    }

    /// The configured parameters in their packed form.
    fn packed(&self) -> PasswordResult<PackedParams> {
        if self.cpu_cost < 2 || !self.cpu_cost.is_power_of_two() {
            return Err(PasswordError::InvalidParams);
        }
        if !(1..=0xff).contains(&self.memory_cost) || !(1..=0xff).contains(&self.parallelization) {
            return Err(PasswordError::InvalidParams);
        }
        Ok(PackedParams {
            log_n: self.cpu_cost.trailing_zeros(),
            r: self.memory_cost,
            p: self.parallelization,
        })
    }

    fn derive(
        &self,
        raw_password: &str,
        salt: &[u8],
        params: &scrypt::Params,
    ) -> PasswordResult<Zeroizing<Vec<u8>>> {
        let mut derived = Zeroizing::new(vec![0u8; self.key_length]);
        scrypt::scrypt(raw_password.as_bytes(), salt, params, derived.as_mut_slice())
            .map_err(|_| PasswordError::KeyDerivationFailed)?;
        Ok(derived)
    }
}

impl<G: BytesKeyGenerator> PasswordEncoder for SCryptPasswordEncoder<G> {
    fn encode(&self, raw_password: &str) -> PasswordResult<String> {
        let packed = self.packed()?;
        let params = packed
            .to_scrypt(self.key_length)
            .ok_or(PasswordError::InvalidParams)?;

        let salt = self.salt_generator.generate_key()?;
        let derived = self.derive(raw_password, &salt, &params)?;

        Ok(format!(
            "${:x}${}${}",
            packed.pack(),
            BASE64_STANDARD.encode(&salt),
            BASE64_STANDARD.encode(derived.as_slice())
        ))
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        // ["", params, salt, derived]
        let parts: Vec<&str> = encoded_password.split('$').collect();
        if parts.len() != 4 {
            tracing::trace!(fields = parts.len(), "scrypt: wrong number of fields");
            return false;
        }

        let Some(packed) = PackedParams::parse(parts[1]) else {
            tracing::trace!("scrypt: params are not valid hex");
            return false;
        };
        let Ok(salt) = BASE64_STANDARD.decode(parts[2]) else {
            tracing::trace!("scrypt: salt is not valid base64");
            return false;
        };
        let Ok(expected) = BASE64_STANDARD.decode(parts[3]) else {
            tracing::trace!("scrypt: derived key is not valid base64");
            return false;
        };

        if packed.memory().map_or(true, |memory| memory > MAX_DECODE_MEMORY)
            || packed.work().map_or(true, |work| work > MAX_DECODE_WORK)
        {
            tracing::trace!(
                log_n = packed.log_n,
                r = packed.r,
                p = packed.p,
                "scrypt: cost too large"
            );
            return false;
        }
        let Some(params) = packed.to_scrypt(self.key_length) else {
            tracing::trace!("scrypt: params rejected by primitive");
            return false;
        };

        match self.derive(raw_password, &salt, &params) {
            Ok(generated) => generated.as_slice().ct_eq(expected.as_slice()).into(),
            Err(_) => false,
        }
    }

    fn upgradable(&self, encoded_password: &str) -> bool {
        let Ok(current) = self.packed() else {
            return false;
        };
        let mut parts = encoded_password.split('$');
        let (Some(""), Some(hex_params)) = (parts.next(), parts.next()) else {
            return false;
        };
        let Some(stored) = PackedParams::parse(hex_params) else {
            return false;
        };

        stored.log_n < current.log_n || stored.r < current.r || stored.p < current.p
    }
}
