//! Stoichiometry calculator
//!
//! One call per input change: resolve the formula, compute its molar mass,
//! run whichever conversion the quantity selects, and collect the working.

use serde::{Deserialize, Serialize};

use super::converter::{convert_input, Conversion};
use super::formula::{Formula, ParsedAtom};
use super::report::{derivations, element_lines, molar_mass_expression, Derivation, ElementLine};
use super::units::{classify, UnitClass};
use crate::elements::ElementTable;

/// The quantity the user entered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub amount: Option<f64>,
    pub unit: Option<String>,
}

impl Quantity {
    pub fn new(amount: f64, unit: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            unit: Some(unit.into()),
        }
    }

    /// No amount entered; only the molar mass is reported
    pub fn none() -> Self {
        Self::default()
    }
}

/// Everything the presentation layer needs for one formula and quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoichiometryReport {
    pub multiplier: u32,
    pub atoms_per_molecule: u64,
    /// Molar mass of one formula unit (g/mol); used by every conversion
    pub molar_mass: f64,
    /// Molar mass x multiplier, for display
    pub scaled_molar_mass: f64,
    pub molar_mass_expression: String,
    pub molar_mass_result: String,
    pub elements: Vec<ElementLine>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_symbols: Vec<String>,
    pub quantity: Quantity,
    pub unit_class: Option<UnitClass>,
    pub conversion: Option<Conversion>,
    pub derivations: Vec<Derivation>,
}

/// Run the calculator. Returns `None` for an empty atom list, which has
/// nothing to show.
pub fn calculate(
    parsed_atoms: &[ParsedAtom],
    quantity: &Quantity,
    table: &ElementTable,
) -> Option<StoichiometryReport> {
    if parsed_atoms.is_empty() {
        return None;
    }

    let formula = Formula::from_parsed(parsed_atoms);
    let molar_mass = formula.molar_mass(table);
    let atoms_per_molecule = formula.atoms_per_molecule();

    let unit_class = classify(quantity.unit.as_deref(), quantity.amount, molar_mass);
    let conversion = convert_input(
        quantity.unit.as_deref(),
        quantity.amount,
        molar_mass,
        atoms_per_molecule,
    );
    let steps = conversion
        .as_ref()
        .map(|c| derivations(c, molar_mass, atoms_per_molecule))
        .unwrap_or_default();

    let (molar_mass_expression, molar_mass_result) = molar_mass_expression(&formula, table);
    let unknown_symbols: Vec<String> = formula
        .unknown_symbols(table)
        .into_iter()
        .map(String::from)
        .collect();
    if !unknown_symbols.is_empty() {
        tracing::warn!(
            "Unknown element symbols {:?}, counting them as 0 g/mol",
            unknown_symbols
        );
    }

    tracing::debug!(
        multiplier = formula.multiplier_value(),
        atoms_per_molecule,
        molar_mass,
        ?unit_class,
        "calculated stoichiometry"
    );

    Some(StoichiometryReport {
        multiplier: formula.multiplier_value(),
        atoms_per_molecule,
        molar_mass,
        scaled_molar_mass: formula.scaled_molar_mass(table),
        molar_mass_expression,
        molar_mass_result,
        elements: element_lines(&formula, table),
        unknown_symbols,
        quantity: quantity.clone(),
        unit_class,
        conversion,
        derivations: steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Vec<ParsedAtom> {
        vec![ParsedAtom::new("H", 2), ParsedAtom::new("O", 1)]
    }

    fn table() -> ElementTable {
        ElementTable::embedded().unwrap()
    }

    #[test]
    fn test_empty_atoms_renders_nothing() {
        assert!(calculate(&[], &Quantity::new(1.0, "g"), &table()).is_none());
    }

    #[test]
    fn test_molar_mass_only() {
        let report = calculate(&water(), &Quantity::none(), &table()).unwrap();
        assert!((report.molar_mass - 18.015).abs() < 0.001);
        assert_eq!(report.unit_class, None);
        assert!(report.conversion.is_none());
        assert!(report.derivations.is_empty());
        assert_eq!(report.elements.len(), 2);
    }

    #[test]
    fn test_two_moles_of_water() {
        let report = calculate(&water(), &Quantity::new(2.0, "mol"), &table()).unwrap();
        let c = report.conversion.unwrap();
        assert!((c.grams() - 36.03).abs() < 0.001);
        assert!((c.liters() - 44.8).abs() < 0.001);
        assert!(((c.atoms() - 2.0 * 3.0 * 6.02e23) / c.atoms()).abs() < 1e-9);
        assert_eq!(report.unit_class, Some(UnitClass::Molar));
    }

    #[test]
    fn test_one_mole_by_mass() {
        let report = calculate(&water(), &Quantity::new(18.015, "g"), &table()).unwrap();
        let c = report.conversion.unwrap();
        assert!((c.moles() - 1.0).abs() < 0.0001);
        assert!((c.liters() - 22.4).abs() < 0.001);
    }

    #[test]
    fn test_avogadro_coefficient() {
        let report = calculate(&water(), &Quantity::new(1.0, "NA"), &table()).unwrap();
        let c = report.conversion.unwrap();
        assert!((c.moles() - 3.0).abs() < 0.001);
        assert!((c.grams() - 54.045).abs() < 0.001);
    }

    #[test]
    fn test_multiplier_keeps_unscaled_molar_mass() {
        let mut parsed = vec![ParsedAtom::new("3", 1)];
        parsed.extend(water());
        let report = calculate(&parsed, &Quantity::new(2.0, "mol"), &table()).unwrap();
        assert_eq!(report.multiplier, 3);
        assert_eq!(report.atoms_per_molecule, 4);
        assert!((report.molar_mass - 18.015).abs() < 0.001);
        assert!((report.scaled_molar_mass - 54.045).abs() < 0.001);
        assert!((report.conversion.unwrap().grams() - 36.03).abs() < 0.001);
    }

    #[test]
    fn test_unknown_symbols_disable_conversion() {
        let parsed = vec![ParsedAtom::new("Zz", 2), ParsedAtom::new("Qq", 1)];
        let report = calculate(&parsed, &Quantity::new(5.0, "g"), &table()).unwrap();
        assert_eq!(report.molar_mass, 0.0);
        assert!(report.conversion.is_none());
        assert_eq!(report.unknown_symbols, vec!["Zz", "Qq"]);
    }

    #[test]
    fn test_huge_atom_counts_do_not_wrap() {
        let parsed = vec![ParsedAtom::new("H", u32::MAX), ParsedAtom::new("O", 1)];
        let report = calculate(&parsed, &Quantity::new(1.0, "mol"), &table()).unwrap();
        let k = u64::from(u32::MAX) + 1;
        assert_eq!(report.atoms_per_molecule, k);
        let c = report.conversion.unwrap();
        assert!(((c.atoms() - k as f64 * 6.02e23) / c.atoms()).abs() < 1e-9);
        assert_eq!(report.derivations.len(), 3);
    }

    #[test]
    fn test_unrecognized_unit() {
        let report = calculate(&water(), &Quantity::new(5.0, "oz"), &table()).unwrap();
        assert!(report.conversion.is_none());
        assert!(report.derivations.is_empty());
    }

    #[test]
    fn test_report_serializes() {
        let report = calculate(&water(), &Quantity::new(2.0, "mol"), &table()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["multiplier"], 1);
        assert_eq!(json["unit_class"], "molar");
        assert_eq!(json["conversion"]["from"], "moles");
        assert_eq!(json["conversion"]["input"]["unit"], "mole");
        assert!(json.get("unknown_symbols").is_none());
    }
}
