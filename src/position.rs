//! Sort keys for page moves.
//!
//! Docmost orders sibling pages by a short base-62 string compared
//! byte-wise. Generated keys start with `z`, which sorts after the keys the
//! server hands out, so a moved page lands after its new siblings. The body
//! is fixed-width, so keys generated later compare greater.

use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
pub const POSITION_PREFIX: char = 'z';
pub const MIN_POSITION_LENGTH: usize = 5;
pub const MAX_POSITION_LENGTH: usize = 12;

const BASE: u64 = 62;
// 62^7 ms is roughly 111 years
const TIMESTAMP_RANGE: u64 = 3_521_614_606_208;
const INDEX_RANGE: u64 = BASE;
const TIE_BREAKER_RANGE: u64 = BASE * BASE;
const BODY_WIDTH: usize = 10;

/// Generates a position for the `index`-th page moved by one command.
pub fn generate_position(index: u32) -> String {
    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default();
    let tie_breaker = rand::thread_rng().gen_range(0..TIE_BREAKER_RANGE);
    position_from_parts(now_ms, index, tie_breaker)
}

/// Deterministic core of [`generate_position`].
pub fn position_from_parts(timestamp_ms: u64, index: u32, tie_breaker: u64) -> String {
    let value = (timestamp_ms % TIMESTAMP_RANGE) * INDEX_RANGE * TIE_BREAKER_RANGE
        + (u64::from(index) % INDEX_RANGE) * TIE_BREAKER_RANGE
        + tie_breaker % TIE_BREAKER_RANGE;

    let body = encode_base62(value);
    let width = BODY_WIDTH.max(MIN_POSITION_LENGTH);
    let mut position = String::with_capacity(MAX_POSITION_LENGTH);
    position.push(POSITION_PREFIX);
    position.extend(std::iter::repeat('0').take(width.saturating_sub(body.len())));
    position.push_str(&body);
    position.truncate(MAX_POSITION_LENGTH);
    position
}

pub fn encode_base62(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % BASE) as usize]);
        value /= BASE;
    }
    digits.iter().rev().map(|digit| *digit as char).collect()
}

pub fn is_valid_position(position: &str) -> bool {
    (MIN_POSITION_LENGTH..=MAX_POSITION_LENGTH).contains(&position.len())
        && position.bytes().all(|byte| ALPHABET.contains(&byte))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_base62() {
        assert_eq!(encode_base62(0), "0");
        assert_eq!(encode_base62(61), "z");
        assert_eq!(encode_base62(62), "10");
        assert_eq!(encode_base62(3_843), "zz");
    }

    #[test]
    fn test_generated_position_shape() {
        for index in 0..5 {
            let position = generate_position(index);
            assert!(is_valid_position(&position), "{}", position);
            assert!(position.starts_with(POSITION_PREFIX));
        }
    }

    #[test]
    fn test_zero_timestamp_is_padded() {
        let position = position_from_parts(0, 0, 0);
        assert_eq!(position, "z0000000000");
        assert!(is_valid_position(&position));
    }

    #[test]
    fn test_later_timestamps_sort_after() {
        let earlier = position_from_parts(1_760_000_000_000, 3, 3_000);
        let later = position_from_parts(1_760_000_000_001, 0, 0);
        assert!(earlier < later);
        assert_eq!(earlier.len(), later.len());
    }

    #[test]
    fn test_index_and_tie_breaker_distinguish_same_millisecond() {
        let a = position_from_parts(1_760_000_000_000, 0, 7);
        let b = position_from_parts(1_760_000_000_000, 1, 7);
        let c = position_from_parts(1_760_000_000_000, 1, 8);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_generated_keys_sort_after_server_keys() {
        let generated = position_from_parts(0, 0, 0);
        for existing in ["a0", "a1", "aV", "b0Z", "Zz"] {
            assert!(existing < generated.as_str());
        }
    }
}
