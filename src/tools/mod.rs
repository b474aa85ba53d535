//! stoich Tools module
//!
//! MCP tool implementations for the stoichiometry calculator.

pub mod calculate;
pub mod elements;
pub mod status;
