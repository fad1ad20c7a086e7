//! EIP-191 personal-message hashing.

use nero_mpc_core::hash_symmetric::keccak256;

/// Computes the EIP-191 personal-message hash:
/// `keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)`,
/// where `len(message)` is the ASCII decimal digit string of the message's
/// byte length.
pub fn personal_message_hash(message: &[u8]) -> [u8; 32] {
    let prefix = format!("\x19Ethereum Signed Message:\n{}", message.len());
    let mut buf = Vec::with_capacity(prefix.len() + message.len());
    buf.extend_from_slice(prefix.as_bytes());
    buf.extend_from_slice(message);
    keccak256(&buf)
}
