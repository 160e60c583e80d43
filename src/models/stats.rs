use serde::{Deserialize, Serialize};

use crate::models::code::Code;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitHistogram {
    counts: [u64; 10],
}

impl DigitHistogram {
    pub fn count(&self, digit: u8) -> u64 {
        self.counts.get(digit as usize).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &[u64; 10] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().enumerate().map(|(digit, count)| (digit as u8, *count))
    }

    pub(crate) fn record(&mut self, code: &Code) {
        for digit in code.digits() {
            self.counts[digit as usize] += 1;
        }
    }

    pub(crate) fn absorb(&mut self, other: &DigitHistogram) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub total_codes: u64,
    pub unique_codes: u64,
    pub codes_with_repeating_digits: u64,
    pub codes_starting_with_zero: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub histogram: DigitHistogram,
    pub summary: PatternSummary,
    // only present when the run was asked to keep codes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codes: Option<Vec<Code>>,
}
