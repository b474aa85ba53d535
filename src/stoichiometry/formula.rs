//! Parsed formulas and molar mass
//!
//! The upstream parser hands over a flat `{symbol, count}` list whose first
//! slot may be a molecule-count multiplier ("3" in 3H2O). `Formula` resolves
//! that once, at the boundary.

use serde::{Deserialize, Serialize};

use crate::elements::ElementTable;

/// One `{symbol, count}` pair from the formula parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAtom {
    pub symbol: String,
    pub count: u32,
}

impl ParsedAtom {
    pub fn new(symbol: impl Into<String>, count: u32) -> Self {
        Self {
            symbol: symbol.into(),
            count,
        }
    }
}

/// Leading molecule-count multiplier taken off the parsed list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoleculeMultiplier {
    pub value: u32,
    /// Count field of the placeholder entry; still part of atoms-per-molecule
    pub placeholder_count: u32,
}

/// A parsed formula with the multiplier separated from the real atoms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Formula {
    multiplier: Option<MoleculeMultiplier>,
    atoms: Vec<ParsedAtom>,
}

impl Formula {
    /// Split a leading numeric entry off the parsed list.
    ///
    /// Only a positive integer counts as a multiplier; anything else in the
    /// first slot is kept as an ordinary (possibly unknown) atom.
    pub fn from_parsed(parsed: &[ParsedAtom]) -> Self {
        if let Some((first, rest)) = parsed.split_first() {
            if let Some(value) = parse_multiplier(&first.symbol) {
                return Self {
                    multiplier: Some(MoleculeMultiplier {
                        value,
                        placeholder_count: first.count,
                    }),
                    atoms: rest.to_vec(),
                };
            }
        }

        Self {
            multiplier: None,
            atoms: parsed.to_vec(),
        }
    }

    pub fn multiplier(&self) -> Option<MoleculeMultiplier> {
        self.multiplier
    }

    /// Molecule count, 1 when no multiplier was given
    pub fn multiplier_value(&self) -> u32 {
        self.multiplier.map(|m| m.value).unwrap_or(1)
    }

    /// Atoms that make up the formula, multiplier excluded
    pub fn atoms(&self) -> &[ParsedAtom] {
        &self.atoms
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Sum of count x atomic mass over the formula atoms (g/mol).
    /// Symbols missing from the table contribute 0.
    pub fn molar_mass(&self, table: &ElementTable) -> f64 {
        self.atoms
            .iter()
            .map(|atom| f64::from(atom.count) * table.atomic_mass(&atom.symbol))
            .sum()
    }

    /// Molar mass of the whole multiplied group, for display only
    pub fn scaled_molar_mass(&self, table: &ElementTable) -> f64 {
        self.molar_mass(table) * f64::from(self.multiplier_value())
    }

    /// Sum of counts over the original parsed list, placeholder entry included.
    /// Widened to u64 so any mix of u32 counts adds up without wrapping.
    pub fn atoms_per_molecule(&self) -> u64 {
        let placeholder = self.multiplier.map(|m| m.placeholder_count).unwrap_or(0);
        self.atoms
            .iter()
            .map(|a| u64::from(a.count))
            .fold(u64::from(placeholder), u64::saturating_add)
    }

    /// Symbols in the formula that the table does not know
    pub fn unknown_symbols<'a>(&'a self, table: &ElementTable) -> Vec<&'a str> {
        self.atoms
            .iter()
            .filter(|a| !table.contains(&a.symbol))
            .map(|a| a.symbol.as_str())
            .collect()
    }
}

fn parse_multiplier(symbol: &str) -> Option<u32> {
    symbol.trim().parse::<u32>().ok().filter(|&n| n >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Vec<ParsedAtom> {
        vec![ParsedAtom::new("H", 2), ParsedAtom::new("O", 1)]
    }

    #[test]
    fn test_no_multiplier() {
        let formula = Formula::from_parsed(&water());
        assert_eq!(formula.multiplier(), None);
        assert_eq!(formula.multiplier_value(), 1);
        assert_eq!(formula.atoms(), water().as_slice());
    }

    #[test]
    fn test_multiplier_extraction() {
        let mut parsed = vec![ParsedAtom::new("3", 1)];
        parsed.extend(water());

        let formula = Formula::from_parsed(&parsed);
        assert_eq!(formula.multiplier_value(), 3);
        assert_eq!(formula.atoms(), water().as_slice());

        let table = ElementTable::embedded().unwrap();
        assert!((formula.molar_mass(&table) - 18.015).abs() < 0.001);
        assert!((formula.scaled_molar_mass(&table) - 54.045).abs() < 0.001);
    }

    #[test]
    fn test_non_integer_first_symbol_is_an_atom() {
        for symbol in ["0", "2.5", "", "H"] {
            let parsed = vec![ParsedAtom::new(symbol, 1), ParsedAtom::new("O", 1)];
            let formula = Formula::from_parsed(&parsed);
            assert_eq!(formula.multiplier(), None, "symbol {:?}", symbol);
            assert_eq!(formula.atoms().len(), 2);
        }
    }

    #[test]
    fn test_empty_list() {
        let formula = Formula::from_parsed(&[]);
        assert!(formula.is_empty());
        assert_eq!(formula.multiplier_value(), 1);
        assert_eq!(formula.atoms_per_molecule(), 0);
    }

    #[test]
    fn test_molar_mass_water() {
        let table = ElementTable::embedded().unwrap();
        let formula = Formula::from_parsed(&water());
        assert!((formula.molar_mass(&table) - 18.015).abs() < 0.001);
    }

    #[test]
    fn test_unknown_symbols_weigh_zero() {
        let table = ElementTable::embedded().unwrap();
        let formula = Formula::from_parsed(&[ParsedAtom::new("Qq", 3), ParsedAtom::new("O", 1)]);
        assert!((formula.molar_mass(&table) - 15.999).abs() < 0.001);
        assert_eq!(formula.unknown_symbols(&table), vec!["Qq"]);

        let all_unknown = Formula::from_parsed(&[ParsedAtom::new("Zz", 2)]);
        assert_eq!(all_unknown.molar_mass(&table), 0.0);
    }

    #[test]
    fn test_atoms_per_molecule() {
        assert_eq!(Formula::from_parsed(&water()).atoms_per_molecule(), 3);

        // the placeholder entry's count is part of the original list
        let mut parsed = vec![ParsedAtom::new("3", 1)];
        parsed.extend(water());
        assert_eq!(Formula::from_parsed(&parsed).atoms_per_molecule(), 4);
    }

    #[test]
    fn test_atoms_per_molecule_large_counts() {
        let parsed = vec![ParsedAtom::new("H", u32::MAX), ParsedAtom::new("O", 1)];
        assert_eq!(
            Formula::from_parsed(&parsed).atoms_per_molecule(),
            u64::from(u32::MAX) + 1
        );

        let parsed = vec![
            ParsedAtom::new("2", u32::MAX),
            ParsedAtom::new("H", u32::MAX),
            ParsedAtom::new("O", u32::MAX),
        ];
        assert_eq!(
            Formula::from_parsed(&parsed).atoms_per_molecule(),
            3 * u64::from(u32::MAX)
        );
    }
}
