use std::collections::HashSet;

use crate::models::code::Code;
use crate::models::stats::{DigitHistogram, PatternSummary};

// distinct codes are kept by value: at most 10^6 u32 entries
#[derive(Debug, Default, Clone)]
pub struct CorpusAnalyzer {
    histogram: DigitHistogram,
    seen: HashSet<u32>,
    total_codes: u64,
    codes_with_repeating_digits: u64,
    codes_starting_with_zero: u64,
}

impl CorpusAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, code: &Code) {
        self.histogram.record(code);
        self.seen.insert(code.value());
        self.total_codes += 1;
        if code.has_repeating_digit() {
            self.codes_with_repeating_digits += 1;
        }
        if code.starts_with_zero() {
            self.codes_starting_with_zero += 1;
        }
    }

    // counters add up, distinct codes are unioned
    pub fn merge(&mut self, other: CorpusAnalyzer) {
        self.histogram.absorb(&other.histogram);
        self.total_codes += other.total_codes;
        self.codes_with_repeating_digits += other.codes_with_repeating_digits;
        self.codes_starting_with_zero += other.codes_starting_with_zero;
        if other.seen.len() > self.seen.len() {
            let mine = std::mem::replace(&mut self.seen, other.seen);
            self.seen.extend(mine);
        } else {
            self.seen.extend(other.seen);
        }
    }

    pub fn total_codes(&self) -> u64 {
        self.total_codes
    }

    pub fn summary(&self) -> PatternSummary {
        PatternSummary {
            total_codes: self.total_codes,
            unique_codes: self.seen.len() as u64,
            codes_with_repeating_digits: self.codes_with_repeating_digits,
            codes_starting_with_zero: self.codes_starting_with_zero,
        }
    }

    pub fn finish(self) -> (DigitHistogram, PatternSummary) {
        let summary = self.summary();
        (self.histogram, summary)
    }
}

impl<'a> Extend<&'a Code> for CorpusAnalyzer {
    fn extend<I: IntoIterator<Item = &'a Code>>(&mut self, iter: I) {
        for code in iter {
            self.observe(code);
        }
    }
}

pub fn analyze<'a, I>(codes: I) -> (DigitHistogram, PatternSummary)
where
    I: IntoIterator<Item = &'a Code>,
{
    let mut analyzer = CorpusAnalyzer::new();
    analyzer.extend(codes);
    analyzer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(texts: &[&str]) -> Vec<Code> {
        texts.iter().map(|t| t.parse().unwrap()).collect()
    }

    #[test]
    fn empty_corpus() {
        let (histogram, summary) = analyze(&Vec::<Code>::new());
        assert_eq!(histogram.total(), 0);
        assert_eq!(summary, PatternSummary::default());
    }

    #[test]
    fn counts_digits_and_patterns() {
        let corpus = codes(&["123456", "012345", "111111", "123456", "098765"]);
        let (histogram, summary) = analyze(&corpus);

        assert_eq!(histogram.count(1), 2 + 1 + 6);
        assert_eq!(histogram.count(0), 2);
        assert_eq!(histogram.count(9), 1);
        assert_eq!(histogram.count(7), 1);
        assert_eq!(histogram.total(), 6 * 5);

        assert_eq!(
            summary,
            PatternSummary {
                total_codes: 5,
                unique_codes: 4,
                codes_with_repeating_digits: 1,
                codes_starting_with_zero: 2,
            }
        );
    }

    #[test]
    fn histogram_iterates_all_ten_buckets() {
        let (histogram, _) = analyze(&codes(&["909090"]));
        let pairs: Vec<(u8, u64)> = histogram.iter().collect();
        assert_eq!(pairs.len(), 10);
        assert_eq!(pairs[0], (0, 3));
        assert_eq!(pairs[9], (9, 3));
        assert_eq!(histogram.count(10), 0);
    }

    #[test]
    fn merge_unions_distinct_codes() {
        let mut left = CorpusAnalyzer::new();
        left.extend(&codes(&["123456", "000000"]));
        let mut right = CorpusAnalyzer::new();
        right.extend(&codes(&["123456", "654321", "654321"]));

        left.merge(right);
        let (histogram, summary) = left.finish();

        assert_eq!(summary.total_codes, 5);
        assert_eq!(summary.unique_codes, 3);
        assert_eq!(summary.codes_with_repeating_digits, 1);
        assert_eq!(summary.codes_starting_with_zero, 1);
        assert_eq!(histogram.total(), 30);
    }

    #[test]
    fn merge_matches_single_pass() {
        let corpus = codes(&["555123", "012012", "987654", "555123", "000001", "424242"]);
        let (expected_histogram, expected_summary) = analyze(&corpus);

        let (head, tail) = corpus.split_at(2);
        let mut merged = CorpusAnalyzer::new();
        merged.extend(head);
        let mut other = CorpusAnalyzer::new();
        other.extend(tail);
        merged.merge(other);

        let (histogram, summary) = merged.finish();
        assert_eq!(histogram, expected_histogram);
        assert_eq!(summary, expected_summary);
    }
}
