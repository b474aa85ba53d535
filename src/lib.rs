//! Stoichiometry Calculator Library
//!
//! Molar mass and quantity conversions for parsed chemical formulas.

pub mod build_info;
pub mod elements;
pub mod mcp;
pub mod stoichiometry;
pub mod tools;
