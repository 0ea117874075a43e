pub mod boundary;
pub mod cli;
pub mod config;
pub mod decider;
pub mod domain;
pub mod error;
pub mod git;
pub mod ui;

pub use decider::{BumpDecision, DeciderConfig, VersionBumpDecider};
pub use error::{BumpError, Result};
