use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TotpError;

pub const CODE_DIGITS: usize = 6;
pub(crate) const CODE_MODULUS: u32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Code(u32);

impl Code {
    pub(crate) fn from_value(value: u32) -> Self {
        debug_assert!(value < CODE_MODULUS);
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn digits(&self) -> [u8; CODE_DIGITS] {
        let mut digits = [0u8; CODE_DIGITS];
        let mut rest = self.0;
        for slot in digits.iter_mut().rev() {
            *slot = (rest % 10) as u8;
            rest /= 10;
        }
        digits
    }

    pub fn starts_with_zero(&self) -> bool {
        self.0 < CODE_MODULUS / 10
    }

    pub fn has_repeating_digit(&self) -> bool {
        let mut seen = [false; 10];
        for digit in self.digits() {
            if seen[digit as usize] {
                return true;
            }
            seen[digit as usize] = true;
        }
        false
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.0, width = CODE_DIGITS)
    }
}

impl FromStr for Code {
    type Err = TotpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != CODE_DIGITS || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TotpError::InvalidCode(s.to_string()));
        }
        s.parse::<u32>()
            .map(Self)
            .map_err(|_| TotpError::InvalidCode(s.to_string()))
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}

impl TryFrom<String> for Code {
    type Error = TotpError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
