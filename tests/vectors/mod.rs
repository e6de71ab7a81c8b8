//! Test vector types for the password encoder integration tests.
//!
//! Each JSON file in this directory holds one suite. Hash vectors pair a
//! password with a stored encoding; `expect-fail` marks pairs that must not
//! match.

// Many fields are required for deserialization but not directly used in tests
#![allow(dead_code)]

use password_encoder::{BytesKeyGenerator, PasswordResult};
use serde::Deserialize;

/// A test vector suite (top-level JSON structure).
#[derive(Debug, Deserialize)]
pub struct TestVectorSuite<T> {
    pub name: String,
    /// Iteration count the suite was generated with (PBKDF2 only)
    #[serde(default)]
    pub iterations: Option<u32>,
    /// Derived key length in bytes (KDF suites only)
    #[serde(default, rename = "key-length")]
    pub key_length: Option<usize>,
    pub tests: Vec<T>,
}

/// Test vector for a single scheme's bare encoding.
#[derive(Debug, Deserialize)]
pub struct HashTestVector {
    pub name: String,
    #[serde(rename = "expect-fail")]
    pub expect_fail: bool,
    #[serde(default)]
    pub comment: Option<String>,
    pub password: String,
    pub encoded: String,
    /// Hex-encoded salt that reproduces `encoded` exactly (digest schemes only)
    #[serde(default)]
    pub salt: Option<String>,
}

/// Test vector for a tagged encoding verified by the delegating encoder.
#[derive(Debug, Deserialize)]
pub struct DelegatingTestVector {
    pub name: String,
    #[serde(rename = "expect-fail")]
    pub expect_fail: bool,
    #[serde(default)]
    pub comment: Option<String>,
    pub password: String,
    pub encoded: String,
    pub upgradable: bool,
}

/// Test vector for id tag extraction.
#[derive(Debug, Deserialize)]
pub struct TagTestVector {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    pub input: String,
    pub id: String,
    pub encoded: String,
}

/// Salt generator returning a fixed salt, for reproducing vectors.
#[derive(Debug, Clone)]
pub struct FixedSalt(pub Vec<u8>);

impl BytesKeyGenerator for FixedSalt {
    fn key_length(&self) -> usize {
        self.0.len()
    }

    fn generate_key(&self) -> PasswordResult<Vec<u8>> {
        Ok(self.0.clone())
    }
}

/// Decode a hex string to bytes.
pub fn hex_decode(s: &str) -> Option<Vec<u8>> {
    hex::decode(s).ok()
}

/// Load test vectors from a JSON file.
pub fn load_vectors<T: serde::de::DeserializeOwned>(path: &str) -> TestVectorSuite<T> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read test vector file {path}: {e}"));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse test vector file {path}: {e}"))
}
