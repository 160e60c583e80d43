pub mod analyzer;
pub mod run;
