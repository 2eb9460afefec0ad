//! Data layer: record types, loading, and membership queries.
//!
//! Architecture:
//! ```text
//!   first|last|house|advisor|cohort
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse file → CohortData
//!   └──────────┘
//!        │
//!        ▼
//!   ┌────────────┐
//!   │ CohortData │  Vec<PersonRecord>, file order
//!   └────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  query   │  houses, cohorts, rosters, lookups
//!   └──────────┘
//! ```
//!
//! The free functions below take a path and re-read the file on every call.
//! Load once with [`loader::load_file`] and use the [`CohortData`] methods to
//! avoid the repeated I/O.

use std::collections::BTreeSet;
use std::path::Path;

pub mod loader;
pub mod model;
pub mod query;

use crate::error::Result;
pub use model::{Category, CohortData, CohortFilter, HouseRosters, PersonRecord};

/// Every record in the file, in file order.
pub fn all_data(path: impl AsRef<Path>) -> Result<Vec<PersonRecord>> {
    Ok(parse_roster(path)?.people)
}

/// Load the file into a [`CohortData`] table.
pub fn parse_roster(path: impl AsRef<Path>) -> Result<CohortData> {
    loader::load_file(path.as_ref())
}

/// Every non-empty house name in the file.
pub fn all_houses(path: impl AsRef<Path>) -> Result<BTreeSet<String>> {
    Ok(parse_roster(path)?.houses())
}

/// `cohort == "All"` lists every house member.
pub fn students_by_cohort(path: impl AsRef<Path>, cohort: &str) -> Result<Vec<String>> {
    Ok(parse_roster(path)?.students_by_cohort(&CohortFilter::from(cohort)))
}

/// Sorted rosters for the five houses, ghosts and instructors.
pub fn all_names_by_house(path: impl AsRef<Path>) -> Result<HouseRosters> {
    Ok(parse_roster(path)?.names_by_house())
}

/// `Ok(None)` when nobody has that exact name.
pub fn get_cohort_for(path: impl AsRef<Path>, name: &str) -> Result<Option<String>> {
    Ok(parse_roster(path)?.cohort_for(name).map(str::to_string))
}

/// Last names shared by two or more records.
pub fn find_duped_last_names(path: impl AsRef<Path>) -> Result<BTreeSet<String>> {
    Ok(parse_roster(path)?.duped_last_names())
}

/// Everyone sharing house and cohort with a person named `name`.
pub fn get_housemates_for(path: impl AsRef<Path>, name: &str) -> Result<BTreeSet<String>> {
    Ok(parse_roster(path)?.housemates_for(name))
}
