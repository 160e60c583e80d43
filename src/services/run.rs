use std::ops::Range;
use std::thread;

use log::{debug, info};

use crate::error::TotpError;
use crate::models::code::Code;
use crate::models::secret::Secret;
use crate::models::stats::Report;
use crate::services::analyzer::CorpusAnalyzer;
use crate::utils::totp::{self, TIME_STEP};

// Keeps a huge `count` from reserving the whole code list up front
const MAX_PREALLOCATED_CODES: u64 = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub start: i64,
    pub count: u64,
    pub keep_codes: bool,
    pub workers: usize,
}

impl RunConfig {
    pub fn new(start: i64, count: u64) -> Self {
        Self {
            start,
            count,
            keep_codes: false,
            workers: 1,
        }
    }

    pub fn keep_codes(mut self, keep_codes: bool) -> Self {
        self.keep_codes = keep_codes;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

pub fn timestamp_at(start: i64, index: u64) -> Result<i64, TotpError> {
    i64::try_from(index)
        .ok()
        .and_then(|index| index.checked_mul(TIME_STEP as i64))
        .and_then(|offset| start.checked_add(offset))
        .ok_or(TotpError::TimestampOverflow { start, index })
}

pub fn codes(
    secret: &Secret,
    start: i64,
    count: u64,
) -> impl Iterator<Item = Result<Code, TotpError>> + '_ {
    (0..count).map(move |index| totp::generate(secret, timestamp_at(start, index)?))
}

fn run_range(
    secret: &Secret,
    start: i64,
    range: Range<u64>,
    keep_codes: bool,
) -> Result<(CorpusAnalyzer, Option<Vec<Code>>), TotpError> {
    let mut analyzer = CorpusAnalyzer::new();
    let mut kept = keep_codes.then(|| {
        let len = range.end.saturating_sub(range.start).min(MAX_PREALLOCATED_CODES);
        Vec::with_capacity(len as usize)
    });

    for index in range {
        let code = totp::generate(secret, timestamp_at(start, index)?)?;
        analyzer.observe(&code);
        if let Some(kept) = kept.as_mut() {
            kept.push(code);
        }
    }

    Ok((analyzer, kept))
}

fn into_report(analyzer: CorpusAnalyzer, codes: Option<Vec<Code>>) -> Report {
    let (histogram, summary) = analyzer.finish();
    info!(
        "Analyzed {} codes: {} unique, {} with repeating digits, {} starting with zero",
        summary.total_codes,
        summary.unique_codes,
        summary.codes_with_repeating_digits,
        summary.codes_starting_with_zero
    );
    Report {
        histogram,
        summary,
        codes,
    }
}

// @notice: a negative start aborts before anything is generated; overflow later also aborts
pub fn run(secret: &Secret, config: &RunConfig) -> Result<Report, TotpError> {
    totp::time_step(config.start)?;
    debug!("Generating {} codes from t={}", config.count, config.start);

    let (analyzer, codes) = run_range(secret, config.start, 0..config.count, config.keep_codes)?;
    Ok(into_report(analyzer, codes))
}

// shards are contiguous and merged in order, so the report equals `run`'s
pub fn run_sharded(secret: &Secret, config: &RunConfig) -> Result<Report, TotpError> {
    if config.workers <= 1 || config.count < 2 {
        return run(secret, config);
    }
    totp::time_step(config.start)?;

    let workers = (config.workers as u64).min(config.count);
    let shard_len = config.count.div_ceil(workers);
    let shards: Vec<Range<u64>> = (0..workers)
        .map(|w| w * shard_len..((w + 1) * shard_len).min(config.count))
        .filter(|shard| !shard.is_empty())
        .collect();
    debug!(
        "Generating {} codes from t={} across {} shards",
        config.count,
        config.start,
        shards.len()
    );

    let (start, keep_codes) = (config.start, config.keep_codes);
    let partials = thread::scope(|scope| {
        let handles: Vec<_> = shards
            .into_iter()
            .map(|shard| scope.spawn(move || run_range(secret, start, shard, keep_codes)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect::<Result<Vec<_>, _>>()
    })?;

    let mut analyzer = CorpusAnalyzer::new();
    let mut codes = keep_codes.then(Vec::new);
    for (partial, shard_codes) in partials {
        analyzer.merge(partial);
        if let (Some(codes), Some(shard_codes)) = (codes.as_mut(), shard_codes) {
            codes.extend(shard_codes);
        }
    }

    Ok(into_report(analyzer, codes))
}
