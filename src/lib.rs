//! Roster loader and membership queries for pipe-delimited cohort files.

pub mod cli;
pub mod data;
pub mod error;

pub use error::{Result, RosterError};
