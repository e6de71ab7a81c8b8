//! Tag parsing and generation for delegated password encodings.
//!
//! A tagged encoding has the form `{id}encoded`, where `{` and `}` are the
//! configurable id prefix and suffix and `encoded` is the bare output of the
//! scheme named by `id`.

/// Default id prefix.
pub const DEFAULT_ID_PREFIX: &str = "{";

/// Default id suffix.
pub const DEFAULT_ID_SUFFIX: &str = "}";

/// Extracts the scheme id from a tagged encoding.
///
/// # Arguments
///
/// * `prefix_encoded_password` - The full tagged encoding
/// * `id_prefix` - The id prefix (e.g., "{")
/// * `id_suffix` - The id suffix (e.g., "}")
///
/// # Returns
///
/// The text between the prefix and the first suffix, or an empty string if
/// the input does not start with the prefix or contains no suffix.
#[must_use]
pub fn extract_id<'a>(
    prefix_encoded_password: &'a str,
    id_prefix: &str,
    id_suffix: &str,
) -> &'a str {
    if prefix_encoded_password.is_empty() {
        return "";
    }

    // The prefix has to be the first thing in the string, not just somewhere in it.
    if prefix_encoded_password.find(id_prefix) != Some(0) {
        return "";
    }

    match prefix_encoded_password.find(id_suffix) {
        // A suffix overlapping the prefix leaves no room for an id.
        Some(end) if end >= id_prefix.len() => &prefix_encoded_password[id_prefix.len()..end],
        _ => "",
    }
}

/// Returns the bare encoding that follows the first id suffix.
///
/// Without a suffix the input is returned whole, so an encoder registered
/// under the empty id sees untagged values unchanged.
#[must_use]
pub fn extract_encoded_password<'a>(prefix_encoded_password: &'a str, id_suffix: &str) -> &'a str {
    match prefix_encoded_password.find(id_suffix) {
        Some(start) => &prefix_encoded_password[start + id_suffix.len()..],
        None => prefix_encoded_password,
    }
}

/// Frames a bare encoding with its scheme id.
///
/// # Returns
///
/// The tagged encoding (e.g., "{bcrypt}$2a$10$...")
#[must_use]
pub fn make_tag(id_prefix: &str, id: &str, id_suffix: &str, encoded_password: &str) -> String {
    let mut tagged = String::with_capacity(
        id_prefix.len() + id.len() + id_suffix.len() + encoded_password.len(),
    );
    tagged.push_str(id_prefix);
    tagged.push_str(id);
    tagged.push_str(id_suffix);
    tagged.push_str(encoded_password);
    tagged
}

#[cfg(test)]
mod tests {
    use super::*;

    const BCRYPT: &str = "{bcrypt}$2a$10$dXJ3SW6G7P50lGmMkkmwe.20cQQubK3.HZWzG3YB1tlRy.fqvM/BG";
    const PBKDF2: &str =
        "{pbkdf2}5d923b44a6d129f3ddf3e3c8d29412723dcbde72445e8ef6bf3b508fbf17fa4ed4d6b99ca763d8dc";
    const SCRYPT: &str =
        "{scrypt}$e0801$8bWJaSu2IKSn9Z9kM+TPXfOc/9bdYSrN1oD9qfVThWEwdRTnO7re7Ei+fUZRJ68k9lTyuTeUp4of4g24hHnazw==$OAOec05+bXxvuu/1qZ6NUR+xQYvYv7BeL1QxwRpY5Pc=";
    const SHA256: &str =
        "{sha256}97cde38028ad898ebc02e690819fa220e88c62e0699403e94fff291cfffaf8410849f27605abcbc0";

    fn id(s: &str) -> &str {
        extract_id(s, DEFAULT_ID_PREFIX, DEFAULT_ID_SUFFIX)
    }

    #[test]
    fn test_extract_id_known_schemes() {
        assert_eq!(id(BCRYPT), "bcrypt");
        assert_eq!(id("{noop}password"), "noop");
        assert_eq!(id(PBKDF2), "pbkdf2");
        assert_eq!(id(SCRYPT), "scrypt");
        assert_eq!(id(SHA256), "sha256");
    }

    #[test]
    fn test_extract_id_empty() {
        assert_eq!(id(""), "");
    }

    #[test]
    fn test_extract_id_no_prefix() {
        assert_eq!(id(" noop}password"), "");
        assert_eq!(id("password"), "");
        assert_eq!(id("x{noop}password"), "");
    }

    #[test]
    fn test_extract_id_no_suffix() {
        assert_eq!(id("{noop password"), "");
    }

    #[test]
    fn test_extract_id_empty_id() {
        assert_eq!(id("{}password"), "");
    }

    #[test]
    fn test_extract_id_first_suffix_wins() {
        assert_eq!(id("{noop}pass}word"), "noop");
    }

    #[test]
    fn test_extract_id_custom_delimiters() {
        assert_eq!(extract_id("[[sm3]]abcd", "[[", "]]"), "sm3");
        assert_eq!(extract_id("{sm3}abcd", "[[", "]]"), "");
        // Suffix equal to the prefix overlaps it at position 0.
        assert_eq!(extract_id("$sm3$abcd", "$", "$"), "");
    }

    #[test]
    fn test_extract_id_multibyte() {
        assert_eq!(extract_id("«sm3»abcd", "«", "»"), "sm3");
        assert_eq!(id("{密码}abcd"), "密码");
    }

    #[test]
    fn test_extract_encoded_password() {
        assert_eq!(
            extract_encoded_password(BCRYPT, DEFAULT_ID_SUFFIX),
            "$2a$10$dXJ3SW6G7P50lGmMkkmwe.20cQQubK3.HZWzG3YB1tlRy.fqvM/BG"
        );
        assert_eq!(
            extract_encoded_password("{noop}password", DEFAULT_ID_SUFFIX),
            "password"
        );
        assert_eq!(
            extract_encoded_password(PBKDF2, DEFAULT_ID_SUFFIX),
            "5d923b44a6d129f3ddf3e3c8d29412723dcbde72445e8ef6bf3b508fbf17fa4ed4d6b99ca763d8dc"
        );
        assert_eq!(
            extract_encoded_password(SCRYPT, DEFAULT_ID_SUFFIX),
            "$e0801$8bWJaSu2IKSn9Z9kM+TPXfOc/9bdYSrN1oD9qfVThWEwdRTnO7re7Ei+fUZRJ68k9lTyuTeUp4of4g24hHnazw==$OAOec05+bXxvuu/1qZ6NUR+xQYvYv7BeL1QxwRpY5Pc="
        );
        assert_eq!(
            extract_encoded_password(SHA256, DEFAULT_ID_SUFFIX),
            "97cde38028ad898ebc02e690819fa220e88c62e0699403e94fff291cfffaf8410849f27605abcbc0"
        );
    }

    #[test]
    fn test_extract_encoded_password_no_suffix() {
        assert_eq!(extract_encoded_password("password", DEFAULT_ID_SUFFIX), "password");
    }

    #[test]
    fn test_make_tag() {
        assert_eq!(make_tag("{", "noop", "}", "password"), "{noop}password");
        assert_eq!(make_tag("[[", "sm3", "]]", "ab"), "[[sm3]]ab");
        assert_eq!(make_tag("{", "bcrypt", "}", ""), "{bcrypt}");
    }
}
