//! Deterministic content digests for catalogues and verdicts.
//!
//! Two runs over the same reference data and the same claim MUST produce
//! the same identifiers, so a reported discrepancy can be traced back to
//! the exact table version that produced it.
//!
//! Algorithm:
//! 1. Serialize the semantic fields to JSON
//! 2. Canonicalize (sorted keys, no whitespace)
//! 3. id = prefix || "_" || base32hex_lower(SHA256(bytes))

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Prefix of catalogue content digests.
pub const CATALOGUE_DIGEST_PREFIX: &str = "cat1";
/// Prefix of verdict audit ids.
pub const VERDICT_AUDIT_PREFIX: &str = "cv1";

/// Digest of any serializable value under the given prefix.
///
/// Values that fail to serialize digest as JSON `null`; every type this is
/// called with serializes infallibly.
pub fn content_id<T: Serialize>(prefix: &str, value: &T) -> String {
    let value = serde_json::to_value(value).unwrap_or(Value::Null);
    let hash = Sha256::digest(canonical_bytes(&value));
    format!("{prefix}_{}", base32hex_lower_no_pad(&hash))
}

/// Canonical JSON encoding: lexicographically sorted object keys, no
/// insignificant whitespace.
pub fn canonical_bytes(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    write_canonical(value, &mut buf);
    buf
}

fn write_canonical(value: &Value, buf: &mut Vec<u8>) {
    match value {
        Value::Null => buf.extend_from_slice(b"null"),
        Value::Bool(true) => buf.extend_from_slice(b"true"),
        Value::Bool(false) => buf.extend_from_slice(b"false"),
        Value::Number(n) => buf.extend_from_slice(n.to_string().as_bytes()),
        Value::String(s) => write_string(s, buf),
        Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_canonical(item, buf);
            }
            buf.push(b']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            buf.push(b'{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_string(key, buf);
                buf.push(b':');
                write_canonical(&map[*key], buf);
            }
            buf.push(b'}');
        }
    }
}

fn write_string(s: &str, buf: &mut Vec<u8>) {
    // Display of a JSON string value is its escaped, quoted form.
    buf.extend_from_slice(Value::String(s.to_string()).to_string().as_bytes());
}

/// RFC 4648 base32hex encoding, lowercase, without padding.
fn base32hex_lower_no_pad(data: &[u8]) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuv";

    let mut result = String::new();
    let mut bits: u64 = 0;
    let mut num_bits: u32 = 0;

    for &byte in data {
        bits = (bits << 8) | (byte as u64);
        num_bits += 8;

        while num_bits >= 5 {
            num_bits -= 5;
            let idx = ((bits >> num_bits) & 0x1f) as usize;
            result.push(ALPHABET[idx] as char);
        }
    }

    if num_bits > 0 {
        let idx = ((bits << (5 - num_bits)) & 0x1f) as usize;
        result.push(ALPHABET[idx] as char);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_form_sorts_keys_and_drops_whitespace() {
        let value = json!({"b": [1, true, null], "a": {"z": "x", "y": "q\""}});
        assert_eq!(
            String::from_utf8(canonical_bytes(&value)).unwrap(),
            r#"{"a":{"y":"q\"","z":"x"},"b":[1,true,null]}"#
        );
    }

    #[test]
    fn content_id_is_deterministic_and_key_order_independent() {
        let first = content_id("t", &json!({"a": 1, "b": "two"}));
        let second = content_id("t", &json!({"b": "two", "a": 1}));
        assert_eq!(first, second);
        assert!(first.starts_with("t_"));
        // SHA-256 is 256 bits; 52 base32 characters without padding.
        assert_eq!(first.len(), "t_".len() + 52);
    }

    #[test]
    fn content_id_distinguishes_values() {
        assert_ne!(
            content_id("t", &json!({"a": 1})),
            content_id("t", &json!({"a": 2}))
        );
    }

    #[test]
    fn base32hex_known_vector() {
        // RFC 4648 test vector: BASE32-HEX("foobar") = "CPNMUOJ1E8======"
        assert_eq!(base32hex_lower_no_pad(b"foobar"), "cpnmuoj1e8");
    }
}
