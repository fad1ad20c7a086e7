//! Ethereum address derivation and EIP-55 checksum encoding.

use nero_mpc_core::hash_symmetric::keccak256;
use nero_mpc_core::Point;

use crate::error::{EthError, EthResult};

/// Derives the 20-byte Ethereum address from a public key: Keccak-256 of
/// the 64-byte uncompressed public key (the leading `0x04` SEC1 tag
/// omitted), keeping the last 20 bytes.
pub fn address_from_public_key(public_key: &Point) -> [u8; 20] {
    let uncompressed = public_key.to_uncompressed();
    let digest = keccak256(&uncompressed[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[12..]);
    address
}

/// Applies the EIP-55 mixed-case checksum to a 20-byte address: each hex
/// character is upper-cased iff the corresponding nibble of
/// `keccak256(lowercase_hex_without_0x)` is `>= 8`. Idempotent:
/// `checksum(checksum(x)) == checksum(x)` because re-checksumming a
/// correctly-checksummed address hashes the same lower-case form.
pub fn to_checksum_address(address: &[u8; 20]) -> String {
    let lower_hex = hex::encode(address);
    let digest = keccak256(lower_hex.as_bytes());
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower_hex.chars().enumerate() {
        if c.is_ascii_digit() {
            out.push(c);
            continue;
        }
        let nibble = if i % 2 == 0 {
            digest[i / 2] >> 4
        } else {
            digest[i / 2] & 0x0f
        };
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Parses a `0x`-prefixed (or bare) hex address, verifying its length but
/// not its checksum casing — callers that must enforce a checksum should
/// compare against [`to_checksum_address`].
pub fn parse_address(s: &str) -> EthResult<[u8; 20]> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(stripped).map_err(|_| EthError::InvalidHex(s.to_string()))?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| EthError::InvalidAddressLength(b.len()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    // The four standard EIP-55 test vectors.
    const VECTORS: [&str; 4] = [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn eip55_vectors_match() {
        for expected in VECTORS {
            let address = parse_address(expected).unwrap();
            assert_eq!(to_checksum_address(&address), expected);
        }
    }

    #[test]
    fn checksum_is_idempotent() {
        for expected in VECTORS {
            let address = parse_address(expected).unwrap();
            let once = to_checksum_address(&address);
            let twice = to_checksum_address(&parse_address(&once).unwrap());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn derives_address_from_known_keypair() {
        use nero_mpc_core::Scalar;
        let mut rng = rand::thread_rng();
        let secret = Scalar::random_nonzero(&mut rng);
        let public = Point::mul_base(&secret);
        let address = address_from_public_key(&public);
        // Re-deriving from the same public key must be deterministic.
        assert_eq!(address, address_from_public_key(&public));
    }
}
