//! Base-62 encoding between counter values and short aliases.
//!
//! The encoding is bijective: every non-negative integer maps to exactly one
//! alias and no alias carries leading zero symbols, so `0` is the only alias
//! that starts with the first symbol of the alphabet.

/// Alias alphabet, ordered by digit value.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const BASE: u64 = ALPHABET.len() as u64;

/// Encodes `n` as a base-62 alias.
///
/// # Examples
///
/// ```
/// use shortener::utils::alias_codec::encode;
///
/// assert_eq!(encode(0), "0");
/// assert_eq!(encode(61), "z");
/// assert_eq!(encode(62), "10");
/// ```
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    // u64::MAX needs 11 base-62 digits.
    let mut digits = Vec::with_capacity(11);
    while n > 0 {
        digits.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

/// Decodes an alias produced by [`encode`].
///
/// Returns `None` for the empty string, symbols outside [`ALPHABET`],
/// zero-padded input and values that overflow `u64`.
pub fn decode(alias: &str) -> Option<u64> {
    let bytes = alias.as_bytes();
    if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == ALPHABET[0]) {
        return None;
    }

    bytes.iter().try_fold(0u64, |acc, &b| {
        let digit = ALPHABET.iter().position(|&c| c == b)? as u64;
        acc.checked_mul(BASE)?.checked_add(digit)
    })
}
