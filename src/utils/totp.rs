use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::TotpError;
use crate::models::code::{Code, CODE_DIGITS, CODE_MODULUS};
use crate::models::secret::Secret;

type HmacSha1 = Hmac<Sha1>;

pub const TIME_STEP: u64 = 30;

pub fn time_step(timestamp: i64) -> Result<u64, TotpError> {
    u64::try_from(timestamp)
        .map(|seconds| seconds / TIME_STEP)
        .map_err(|_| TotpError::InvalidTimestamp(timestamp))
}

// RFC 4226 HOTP; 6 to 8 digits only
pub fn hotp(key: &[u8], counter: u64, digits: u32) -> Result<u32, TotpError> {
    if !(6..=8).contains(&digits) {
        return Err(TotpError::InvalidDigits(digits));
    }

    let mut mac = HmacSha1::new_from_slice(key)
        .map_err(|e| TotpError::InvalidSecret(format!("HMAC key rejected: {}", e)))?;
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    // Dynamic truncation
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = u32::from_be_bytes([
        digest[offset],
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]) & 0x7fff_ffff;

    Ok(binary % 10u32.pow(digits))
}

pub fn generate(secret: &Secret, timestamp: i64) -> Result<Code, TotpError> {
    let counter = time_step(timestamp)?;
    let value = hotp(secret.as_bytes(), counter, CODE_DIGITS as u32)?;
    debug_assert!(value < CODE_MODULUS);
    Ok(Code::from_value(value))
}

pub fn generate_base32(secret: &str, timestamp: i64) -> Result<Code, TotpError> {
    let secret = Secret::from_base32(secret)?;
    generate(&secret, timestamp)
}
