//! Stoichiometry calculation module
//!
//! Molar mass and mass / mole / volume / particle conversions for a parsed formula.

pub mod calculator;
pub mod converter;
pub mod formula;
pub mod report;
pub mod units;

pub use calculator::{calculate, Quantity, StoichiometryReport};
pub use converter::{convert, convert_input, Conversion, InputAmount};
pub use formula::{Formula, MoleculeMultiplier, ParsedAtom};
pub use report::{Derivation, ElementLine, PLACEHOLDER};
pub use units::{
    classify, parse_unit, QuantityUnit, UnitClass, UnitFamily, AVOGADRO, MOLAR_VOLUME_L,
};
