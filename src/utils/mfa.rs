use rand::{rngs::OsRng, RngCore};

// 160 bits, as RFC 4226 recommends for HMAC-SHA-1
pub const SECRET_BYTES: usize = 20;

// @notice: secrets come straight from the OS CSPRNG, never from a seeded generator
pub fn generate_totp_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    base32::encode(base32::Alphabet::RFC4648 { padding: false }, &bytes)
}
