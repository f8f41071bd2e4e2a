//! Gateway token encoding.
//!
//! Randomness comes from the `TokenSource` port; this module only encodes.

/// Environment variable the gateway reads its auth token from.
pub const GATEWAY_TOKEN_VAR: &str = "OPENCLAW_GATEWAY_TOKEN";

/// Raw token length in bytes (64 hex characters once encoded).
pub const TOKEN_BYTES: usize = 32;

/// Encode bytes as lowercase hex string.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(char::from(HEX[(b >> 4) as usize]));
        out.push(char::from(HEX[(b & 0xf) as usize]));
    }
    out
}

/// Contents of an instance's `.env` file.
#[must_use]
pub fn env_file_contents(token: &str) -> String {
    format!("{GATEWAY_TOKEN_VAR}={token}\n")
}
