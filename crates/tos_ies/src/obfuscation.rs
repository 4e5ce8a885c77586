//! The single byte XOR transform applied to text fields on disk.

const KEY: u8 = 0x01;

/// Decode an obfuscated on-disk text field.
///
/// Trailing NUL padding is stripped before the transform, then every remaining
/// byte is XORed with `0x01`. Accepts arbitrary byte content and never fails;
/// bytes that do not form valid UTF-8 are replaced lossily.
pub fn decode(raw: &[u8]) -> String {
    let trimmed = match raw.iter().rposition(|&b| b != 0) {
        Some(last) => &raw[..=last],
        None => &[],
    };
    let plain: Vec<u8> = trimmed.iter().map(|b| b ^ KEY).collect();
    String::from_utf8_lossy(&plain).into_owned()
}
