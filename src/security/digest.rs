//! One-way digest of client-supplied secrets.
//!
//! SHA-512 over the UTF-8 bytes of the input, encoded as standard base64
//! with padding. The credential file stores digests in the same encoding.

use base64::{engine::general_purpose, Engine as _};
use sha2::{Digest, Sha512};

/// Compute the digest of `input`.
///
/// Deterministic and infallible. The empty string has a digest too; callers
/// decide whether empty input is acceptable.
pub fn digest(input: &str) -> String {
    let hash = Sha512::digest(input.as_bytes());
    general_purpose::STANDARD.encode(hash)
}
