pub mod code;
pub mod secret;
pub mod stats;

pub use code::{Code, CODE_DIGITS};
pub use secret::Secret;
pub use stats::{DigitHistogram, PatternSummary, Report};
