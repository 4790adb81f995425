//! Hashing utilities

/// Blake3 digest of an in-memory payload, hex encoded
///
/// Used to identify uploaded payloads in summaries. Equal digests are not a
/// substitute for the byte scan in `diff::compare`.
pub fn payload_digest(content: &[u8]) -> String {
    blake3::hash(content).to_hex().to_string()
}
