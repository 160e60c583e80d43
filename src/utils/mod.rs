pub mod mfa;
pub mod totp;
