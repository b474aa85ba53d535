//! Calculation MCP Tools
//!
//! Molar mass and quantity conversion for a parsed formula.

use serde::Serialize;

use crate::elements::ElementTable;
use crate::stoichiometry::{
    calculate, report, Formula, ParsedAtom, Quantity, StoichiometryReport,
};

/// Response for calculate_molar_mass
#[derive(Debug, Serialize)]
pub struct MolarMassResponse {
    pub multiplier: u32,
    pub atoms_per_molecule: u64,
    pub molar_mass: f64,
    pub scaled_molar_mass: f64,
    pub expression: String,
    pub result: String,
    pub elements: Vec<report::ElementLine>,
    pub unknown_symbols: Vec<String>,
}

/// Full calculation for a formula and an optional quantity
pub fn calculate_stoichiometry(
    table: &ElementTable,
    atoms: &[ParsedAtom],
    quantity: Quantity,
) -> Result<StoichiometryReport, String> {
    calculate(atoms, &quantity, table).ok_or_else(|| "No atoms provided".to_string())
}

/// Molar mass and element breakdown only
pub fn calculate_molar_mass(
    table: &ElementTable,
    atoms: &[ParsedAtom],
) -> Result<MolarMassResponse, String> {
    if atoms.is_empty() {
        return Err("No atoms provided".to_string());
    }

    let formula = Formula::from_parsed(atoms);
    let (expression, result) = report::molar_mass_expression(&formula, table);

    Ok(MolarMassResponse {
        multiplier: formula.multiplier_value(),
        atoms_per_molecule: formula.atoms_per_molecule(),
        molar_mass: formula.molar_mass(table),
        scaled_molar_mass: formula.scaled_molar_mass(table),
        expression,
        result,
        elements: report::element_lines(&formula, table),
        unknown_symbols: formula
            .unknown_symbols(table)
            .into_iter()
            .map(String::from)
            .collect(),
    })
}
