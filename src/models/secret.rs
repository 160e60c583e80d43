use std::fmt;
use std::str::FromStr;

use base32::Alphabet;

use crate::error::TotpError;

const BASE32_ALPHABET: Alphabet = Alphabet::RFC4648 { padding: false };

#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Vec<u8>);

impl Secret {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, TotpError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(TotpError::InvalidSecret("secret decodes to zero bytes".to_string()));
        }
        Ok(Self(bytes))
    }

    // Case and whitespace are ignored; trailing `=` padding is optional
    pub fn from_base32(encoded: &str) -> Result<Self, TotpError> {
        let cleaned: String = encoded
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if cleaned.is_empty() {
            return Err(TotpError::InvalidSecret("secret is empty".to_string()));
        }

        let unpadded = cleaned.trim_end_matches('=');
        let padding = cleaned.len() - unpadded.len();
        // padding, when present, must fill exactly the last group
        if padding != 0 && padding != (8 - unpadded.len() % 8) % 8 {
            return Err(TotpError::InvalidSecret("malformed base32 padding".to_string()));
        }

        if let Some(c) = unpadded.chars().find(|&c| !matches!(c, 'A'..='Z' | '2'..='7')) {
            return Err(TotpError::InvalidSecret(format!(
                "character {:?} is outside the base32 alphabet",
                c
            )));
        }

        // A final group of 1, 3 or 6 characters cannot come from whole bytes
        if matches!(unpadded.len() % 8, 1 | 3 | 6) {
            return Err(TotpError::InvalidSecret("truncated base32 group".to_string()));
        }

        let bytes = base32::decode(BASE32_ALPHABET, unpadded)
            .ok_or_else(|| TotpError::InvalidSecret("undecodable base32".to_string()))?;

        Self::from_bytes(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_base32(&self) -> String {
        base32::encode(BASE32_ALPHABET, &self.0)
    }
}

impl FromStr for Secret {
    type Err = TotpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base32(s)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret([REDACTED; {} bytes])", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RFC_SECRET_B32: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    #[test]
    fn decodes_rfc_test_secret() {
        let secret = Secret::from_base32(RFC_SECRET_B32).unwrap();
        assert_eq!(secret.as_bytes(), b"12345678901234567890");
        assert_eq!(secret.to_base32(), RFC_SECRET_B32);
    }

    #[test]
    fn accepts_lowercase_spaces_and_padding() {
        let grouped = Secret::from_base32("gezd gnbv gy3t qojq").unwrap();
        assert_eq!(grouped.as_bytes(), b"1234567890");

        let padded = Secret::from_base32("NBSWY3DP").unwrap();
        assert_eq!(padded.as_bytes(), b"hello");

        let with_pad = Secret::from_base32("MZXW6===").unwrap();
        assert_eq!(with_pad.as_bytes(), b"foo");
        let without_pad = Secret::from_base32("MZXW6").unwrap();
        assert_eq!(with_pad, without_pad);
    }

    #[test]
    fn rejects_empty_secret() {
        assert!(matches!(Secret::from_base32(""), Err(TotpError::InvalidSecret(_))));
        assert!(matches!(Secret::from_base32("   "), Err(TotpError::InvalidSecret(_))));
        assert!(matches!(Secret::from_base32("========"), Err(TotpError::InvalidSecret(_))));
        assert!(matches!(Secret::from_bytes(Vec::new()), Err(TotpError::InvalidSecret(_))));
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        for bad in ["GEZDGNB1", "GEZD-GNB", "GEZDGNB8", "GEZDGNB0", "ÄBCDEFGH"] {
            assert!(
                matches!(Secret::from_base32(bad), Err(TotpError::InvalidSecret(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn rejects_malformed_padding() {
        assert!(matches!(Secret::from_base32("MZXW6=="), Err(TotpError::InvalidSecret(_))));
        assert!(matches!(Secret::from_base32("MZ=XW6=="), Err(TotpError::InvalidSecret(_))));
        assert!(matches!(Secret::from_base32("M"), Err(TotpError::InvalidSecret(_))));
        assert!(matches!(Secret::from_base32("MZXWMZ"), Err(TotpError::InvalidSecret(_))));
    }

    #[test]
    fn rejects_excess_padding() {
        for bad in ["GEZDGNBV========", "MZXW6===========", "MZXW6=", "NBSWY3DP="] {
            assert_eq!(
                Secret::from_base32(bad),
                Err(TotpError::InvalidSecret("malformed base32 padding".to_string())),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn debug_does_not_leak_key() {
        let secret = Secret::from_bytes(b"super secret".to_vec()).unwrap();
        let printed = format!("{:?}", secret);
        assert!(!printed.contains("super"));
        assert!(printed.contains("12 bytes"));
    }
}
