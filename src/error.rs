//! Centralized error type for the tonetrace umbrella crate.
//!
//! Wraps subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("config: {0}")]
    Config(#[from] tonetrace_analysis::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
