use std::error::Error;

use log::{debug, info, warn};

use mfa_codes::config::AppConfig;
use mfa_codes::utils::mfa::generate_totp_secret;
use mfa_codes::{run_sharded, Secret};

const PREVIEW_CODES: usize = 5;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    debug!("Loaded configuration: {:?}", config.run);

    let encoded = match config.secret {
        Some(secret) => secret,
        None => {
            let secret = generate_totp_secret();
            warn!("TOTP_SECRET not set, generated a random secret");
            info!("Using secret key: {}", secret);
            secret
        }
    };
    let secret = Secret::from_base32(&encoded)?;

    let report = run_sharded(&secret, &config.run)?;

    info!("Digit frequency analysis:");
    for (digit, count) in report.histogram.iter() {
        info!("Digit {}: {} occurrences", digit, count);
    }

    info!("Pattern analysis:");
    let summary = &report.summary;
    info!("total_codes: {}", summary.total_codes);
    info!("unique_codes: {}", summary.unique_codes);
    info!("codes_with_repeating_digits: {}", summary.codes_with_repeating_digits);
    info!("codes_starting_with_zero: {}", summary.codes_starting_with_zero);

    if let Some(codes) = &report.codes {
        info!("First {} generated codes:", PREVIEW_CODES.min(codes.len()));
        for (i, code) in codes.iter().take(PREVIEW_CODES).enumerate() {
            info!("Code {}: {}", i + 1, code);
        }
    }

    if config.report_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
