/// secp256k1 scalar-range validation and key encoding.
///
/// A private key is an unsigned 256-bit integer k with 1 <= k < n, where n
/// is the secp256k1 group order. Inside a box the key is stored as a
/// 64-byte buffer: 32 zero bytes followed by the 32-byte big-endian scalar.
use k256::elliptic_curve::bigint::U256;
use k256::elliptic_curve::Curve;
use k256::Secp256k1;

use crate::error::{Result, VaultError};

/// Raw scalar length in bytes.
pub const KEY_LEN: usize = 32;

/// Length of the zero-padded plaintext stored in a box.
pub const PADDED_KEY_LEN: usize = 64;

/// Whether the 32-byte big-endian value lies in [1, n).
pub fn is_valid_scalar(key: &[u8; KEY_LEN]) -> bool {
    let k = U256::from_be_slice(key);
    k != U256::ZERO && k < Secp256k1::ORDER
}

/// Parse a hex-encoded key and validate its range.
///
/// Odd-length input gets an implicit leading zero nibble. Inputs shorter
/// than 64 digits are left-padded; longer inputs are accepted only when the
/// excess high-order bytes are zero.
pub fn parse_key_hex(raw: &str) -> Result<[u8; KEY_LEN]> {
    let normalized = if raw.len() % 2 == 1 {
        format!("0{raw}")
    } else {
        raw.to_owned()
    };
    let bytes = hex::decode(normalized).map_err(|_| VaultError::InvalidKeyFormat)?;

    let mut key = [0u8; KEY_LEN];
    if bytes.len() > KEY_LEN {
        let (head, tail) = bytes.split_at(bytes.len() - KEY_LEN);
        if head.iter().any(|b| *b != 0) {
            return Err(VaultError::InvalidKeyFormat);
        }
        key.copy_from_slice(tail);
    } else {
        key[KEY_LEN - bytes.len()..].copy_from_slice(&bytes);
    }

    if !is_valid_scalar(&key) {
        return Err(VaultError::InvalidKeyFormat);
    }
    Ok(key)
}

/// Render a key as the 64-byte zero-padded plaintext stored in a box.
pub fn pad_key(key: &[u8; KEY_LEN]) -> [u8; PADDED_KEY_LEN] {
    let mut padded = [0u8; PADDED_KEY_LEN];
    padded[PADDED_KEY_LEN - KEY_LEN..].copy_from_slice(key);
    padded
}

/// Extract an in-range key from a decrypted buffer.
///
/// Takes the trailing 64-byte window and accepts it only when the window is
/// a zero-padded scalar in [1, n). Returns `None` for anything else,
/// including buffers shorter than the window.
pub fn candidate_from_plaintext(buf: &[u8]) -> Option<[u8; KEY_LEN]> {
    if buf.len() < PADDED_KEY_LEN {
        return None;
    }
    let window = &buf[buf.len() - PADDED_KEY_LEN..];
    if window[..KEY_LEN].iter().any(|b| *b != 0) {
        return None;
    }
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&window[KEY_LEN..]);
    if !is_valid_scalar(&key) {
        return None;
    }
    Some(key)
}

/// Canonical rendering: 64 lowercase hex digits, zero padded.
pub fn to_key_hex(key: &[u8; KEY_LEN]) -> String {
    hex::encode(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// secp256k1 group order n.
    const ORDER_HEX: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
    /// n - 1, the largest valid key.
    const ORDER_MINUS_ONE_HEX: &str =
        "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140";

    #[test]
    fn test_parse_accepts_range_ends() {
        let one = parse_key_hex("01").unwrap();
        assert_eq!(to_key_hex(&one), format!("{:0>64}", "1"));

        let max = parse_key_hex(ORDER_MINUS_ONE_HEX).unwrap();
        assert_eq!(to_key_hex(&max), ORDER_MINUS_ONE_HEX);
    }

    #[test]
    fn test_parse_rejects_zero() {
        let zero = "0".repeat(64);
        assert!(matches!(
            parse_key_hex(&zero),
            Err(VaultError::InvalidKeyFormat)
        ));
    }

    #[test]
    fn test_parse_rejects_order() {
        assert!(matches!(
            parse_key_hex(ORDER_HEX),
            Err(VaultError::InvalidKeyFormat)
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_key_hex("not hex").is_err());
        assert!(parse_key_hex("").is_err());
        assert!(parse_key_hex("0x05").is_err());
    }

    #[test]
    fn test_parse_tolerates_odd_length() {
        let odd = parse_key_hex("abc").unwrap();
        let even = parse_key_hex("0abc").unwrap();
        assert_eq!(odd, even);
    }

    #[test]
    fn test_parse_pads_short_input() {
        let key = parse_key_hex("5").unwrap();
        assert_eq!(to_key_hex(&key), format!("{:0>64}", "5"));
    }

    #[test]
    fn test_parse_long_input_needs_zero_head() {
        let padded = format!("00{ORDER_MINUS_ONE_HEX}");
        assert!(parse_key_hex(&padded).is_ok());

        let oversized = format!("01{ORDER_MINUS_ONE_HEX}");
        assert!(matches!(
            parse_key_hex(&oversized),
            Err(VaultError::InvalidKeyFormat)
        ));
    }

    #[test]
    fn test_pad_and_candidate_roundtrip() {
        let key = parse_key_hex("deadbeef").unwrap();
        let padded = pad_key(&key);
        assert_eq!(padded.len(), PADDED_KEY_LEN);
        assert_eq!(candidate_from_plaintext(&padded), Some(key));
    }

    #[test]
    fn test_candidate_rejects_nonzero_head() {
        let key = parse_key_hex("deadbeef").unwrap();
        let mut padded = pad_key(&key);
        padded[0] = 1;
        assert_eq!(candidate_from_plaintext(&padded), None);
    }

    #[test]
    fn test_candidate_rejects_out_of_range_tail() {
        let mut padded = [0u8; PADDED_KEY_LEN];
        let order = hex::decode(ORDER_HEX).unwrap();
        padded[KEY_LEN..].copy_from_slice(&order);
        assert_eq!(candidate_from_plaintext(&padded), None);

        // all-zero tail is out of range too
        assert_eq!(candidate_from_plaintext(&[0u8; PADDED_KEY_LEN]), None);
    }

    #[test]
    fn test_candidate_rejects_short_buffer() {
        assert_eq!(candidate_from_plaintext(&[0u8; 32]), None);
    }

    #[test]
    fn test_candidate_uses_trailing_window() {
        let key = parse_key_hex("1234abcd").unwrap();
        let mut buf = vec![0xFFu8; 16];
        buf.extend_from_slice(&pad_key(&key));
        assert_eq!(candidate_from_plaintext(&buf), Some(key));
    }
}
