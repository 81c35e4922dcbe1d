//! Session token generation.
//!
//! A session token is the SHA-256 hex digest of a short random hex salt
//! followed by the user's password. Tokens are opaque bearer credentials:
//! they are stored verbatim in `users.token` and compared verbatim on every
//! authenticated request. There is no expiry; a token lives until the next
//! successful login replaces it.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Number of random hex characters mixed into each token.
pub const SALT_LENGTH: usize = 5;

/// Tokens shorter than this are rejected before any lookup.
pub const MIN_TOKEN_LENGTH: usize = 10;

const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

/// Generate a fresh session token for `password`.
///
/// `previous` is the token currently stored for the user, if any. The returned
/// token never equals it, so a login always rotates the credential.
pub fn generate_session_token(password: &str, previous: Option<&str>) -> String {
    loop {
        let token = digest_token(&random_hex(SALT_LENGTH), password);
        if previous != Some(token.as_str()) {
            return token;
        }
    }
}

/// Whether `token` is long enough to be worth looking up.
pub fn is_plausible_token(token: &str) -> bool {
    token.len() >= MIN_TOKEN_LENGTH
}

fn random_hex(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| HEX_CHARS[rng.random_range(0..HEX_CHARS.len())] as char)
        .collect()
}

fn digest_token(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
