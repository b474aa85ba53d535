//! Element reference data
//!
//! Periodic table lookup used for molar mass computation.

pub mod table;

use std::path::PathBuf;

pub use table::{ElementError, ElementInfo, ElementResult, ElementTable, TableSource};

/// Environment variable naming an alternative element table file
pub const ELEMENTS_PATH_ENV: &str = "STOICH_ELEMENTS_PATH";

/// Get the element table path from the environment, if one is configured
pub fn elements_path_from_env() -> Option<PathBuf> {
    std::env::var(ELEMENTS_PATH_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}
