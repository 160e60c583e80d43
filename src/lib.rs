pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{ConfigError, TotpError};
pub use models::{Code, DigitHistogram, PatternSummary, Report, Secret, CODE_DIGITS};
pub use services::analyzer::{analyze, CorpusAnalyzer};
pub use services::run::{run, run_sharded, RunConfig};
pub use utils::totp::{generate, generate_base32, TIME_STEP};
