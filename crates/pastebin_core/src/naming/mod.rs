//! Paste identifier generation.
//!
//! Identifiers are random UUIDv4 values re-encoded in a 57-symbol alphabet that
//! drops visually ambiguous characters (`0`, `1`, `I`, `O`, `l`). The result is a
//! 22 character, URL-safe string with 122 bits of randomness.

use crate::constants::{GENERATED_ID_LEN, MAX_PASTE_ID_LEN};
use uuid::Uuid;

const ALPHABET: &[u8; 57] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Generate a fresh paste identifier.
///
/// Uniqueness is probabilistic and not checked against storage; `put` rejects
/// the rare collision.
pub fn generate_id() -> String {
    encode(Uuid::new_v4().as_u128())
}

fn encode(mut number: u128) -> String {
    let base = ALPHABET.len() as u128;
    let mut digits = Vec::with_capacity(GENERATED_ID_LEN);
    while number > 0 {
        digits.push(ALPHABET[(number % base) as usize]);
        number /= base;
    }
    while digits.len() < GENERATED_ID_LEN {
        digits.push(ALPHABET[0]);
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

/// Return `true` when `id` has a shape the stores will look up.
///
/// Accepts 1..=[`MAX_PASTE_ID_LEN`] characters from `[A-Za-z0-9_-]`. Anything
/// else (including path separators and dots) is treated as not found.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_PASTE_ID_LEN
        && id
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_')
}
