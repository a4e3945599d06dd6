pub mod cli;
pub mod config;
pub mod error;
pub mod progress_bars;
pub mod scan;
