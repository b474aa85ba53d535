//! Derivation text and number formatting
//!
//! Builds the labeled, human-readable working shown next to each result.
//! Numbers keep fixed precision: 3 places for mass and volume, 4 for moles,
//! 2 for the `x × 10²³` form.

use serde::Serialize;

use super::converter::Conversion;
use super::formula::Formula;
use super::units::{AVOGADRO_COEFFICIENT, MOLAR_VOLUME_L};
use crate::elements::ElementTable;

/// Shown wherever a value cannot be computed
pub const PLACEHOLDER: &str = "-";

const GAS_NOTE: &str = "(0 °C, 1 atm, gas)";

// ============================================================================
// Number Formatting
// ============================================================================

/// Round to a fixed number of decimal places
pub fn fixed(value: f64, places: usize) -> String {
    format!("{:.*}", places, value)
}

/// Group the integer part with commas and keep at most `max_fraction_digits`
/// decimals, dropping trailing zeros (`1234.5` -> `"1,234.5"`)
pub fn group_thousands(value: f64, max_fraction_digits: usize) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let rounded = format!("{:.*}", max_fraction_digits, value.abs());
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (rounded.as_str(), ""),
    };

    let mut out = String::with_capacity(rounded.len() + int_part.len() / 3 + 1);
    if value < 0.0 && (int_part.trim_start_matches('0') != "" || !frac_part.is_empty()) {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Express `value` x N_A as `"{value x 6.02:.2} × 10²³"`
pub fn avogadro_form(value: f64) -> String {
    format!("{} × 10²³", fixed(value * AVOGADRO_COEFFICIENT, 2))
}

/// Plain number as the user typed it (`2`, `18.015`)
fn plain(value: f64) -> String {
    format!("{}", value)
}

// ============================================================================
// Report Pieces
// ============================================================================

/// One labeled step of working
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Derivation {
    pub label: String,
    /// Condition the step assumes, e.g. ideal gas at STP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// The rule in words
    pub rule: String,
    /// The rule with numbers substituted
    pub expression: String,
}

impl Derivation {
    fn new(label: &str, rule: &str, expression: String) -> Self {
        Self {
            label: label.to_string(),
            note: None,
            rule: rule.to_string(),
            expression,
        }
    }

    fn gas(mut self) -> Self {
        self.note = Some(GAS_NOTE.to_string());
        self
    }
}

/// One formula atom with its reference data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementLine {
    pub symbol: String,
    pub reference_symbol: Option<String>,
    pub local_name: Option<String>,
    pub atomic_mass: Option<f64>,
    pub count: u32,
    /// Count across all molecules (count x multiplier)
    pub total_count: u64,
    pub text: String,
}

/// Per-atom lines for the formula, unknown symbols shown with placeholders
pub fn element_lines(formula: &Formula, table: &ElementTable) -> Vec<ElementLine> {
    let multiplier = formula.multiplier_value();

    formula
        .atoms()
        .iter()
        .map(|atom| {
            let info = table.get(&atom.symbol);
            let reference_symbol = info.map(|e| e.symbol.clone());
            let local_name = info.and_then(|e| e.local_name.clone());
            let atomic_mass = info.map(|e| e.atomic_mass);
            let total_count = u64::from(atom.count) * u64::from(multiplier);

            let mut text = format!(
                "{}({} {}. atomic mass: {}) {} atoms",
                atom.symbol,
                reference_symbol.as_deref().unwrap_or(PLACEHOLDER),
                local_name.as_deref().unwrap_or(PLACEHOLDER),
                atomic_mass.map(plain).unwrap_or_else(|| PLACEHOLDER.to_string()),
                total_count,
            );
            if multiplier > 1 {
                text.push_str(&format!(" ({} × {})", atom.count, multiplier));
            }

            ElementLine {
                symbol: atom.symbol.clone(),
                reference_symbol,
                local_name,
                atomic_mass,
                count: atom.count,
                total_count,
                text,
            }
        })
        .collect()
}

/// Molar mass working: `("2×1.008 + 1×15.999", "= 18.015")`, or with a
/// multiplier `("3(2×1.008 + 1×15.999)", "= 3(18.015) = 54.045")`
pub fn molar_mass_expression(formula: &Formula, table: &ElementTable) -> (String, String) {
    let terms = formula
        .atoms()
        .iter()
        .map(|atom| format!("{}×{}", atom.count, plain(table.atomic_mass(&atom.symbol))))
        .collect::<Vec<_>>()
        .join(" + ");

    let total = formula.molar_mass(table);
    let multiplier = formula.multiplier_value();

    if multiplier > 1 {
        (
            format!("{}({})", multiplier, terms),
            format!(
                "= {}({}) = {}",
                multiplier,
                fixed(total, 3),
                fixed(total * f64::from(multiplier), 3)
            ),
        )
    } else {
        (terms, format!("= {}", fixed(total, 3)))
    }
}

const MASS_FROM_MOLES: &str = "moles (mol) × molar mass (g/mol) = mass (g)";
const VOLUME_FROM_MOLES: &str = "moles (mol) × molar volume (22.4L) = volume (L)";
const ATOMS_FROM_MOLES: &str =
    "moles (mol) × atoms per molecule × Avogadro's number (6.02×10²³) = total atoms";

/// Working for the active conversion branch
pub fn derivations(
    conversion: &Conversion,
    molar_mass: f64,
    atoms_per_molecule: u64,
) -> Vec<Derivation> {
    let m = fixed(molar_mass, 3);
    let k = atoms_per_molecule;
    let molar_volume = plain(MOLAR_VOLUME_L);

    // "{moles} × {k} × 6.02 × 10²³ = ..." or a placeholder when either side is zero
    let atom_count = |moles: f64, moles_text: String| {
        if moles != 0.0 && k != 0 {
            format!(
                "{} × {} × 6.02 × 10²³ = {} atoms",
                moles_text,
                k,
                avogadro_form(moles * k as f64)
            )
        } else {
            format!("{} atoms", PLACEHOLDER)
        }
    };

    match conversion {
        Conversion::Moles { input, grams, liters, .. } => {
            let amount = plain(input.amount);
            vec![
                Derivation::new(
                    "Mass",
                    MASS_FROM_MOLES,
                    format!("{}mol × {}g/mol = {} g", amount, m, fixed(*grams, 3)),
                ),
                Derivation::new(
                    "Volume",
                    VOLUME_FROM_MOLES,
                    format!("{}mol × {}L = {} L", amount, molar_volume, fixed(*liters, 3)),
                )
                .gas(),
                Derivation::new("Atom count", ATOMS_FROM_MOLES, atom_count(input.amount, amount)),
            ]
        }
        Conversion::Mass { input, moles, liters, .. } => {
            let moles_text = fixed(*moles, 4);
            vec![
                Derivation::new(
                    "Moles",
                    "mass (g) ÷ molar mass (g/mol) = moles (mol)",
                    format!("{}g ÷ {}g/mol = {} mol", plain(input.normalized), m, moles_text),
                ),
                Derivation::new(
                    "Volume",
                    VOLUME_FROM_MOLES,
                    format!("{} mol × {}L = {} L", moles_text, molar_volume, fixed(*liters, 3)),
                )
                .gas(),
                Derivation::new("Atom count", ATOMS_FROM_MOLES, atom_count(*moles, moles_text)),
            ]
        }
        Conversion::Volume { input, moles, grams, .. } => {
            let moles_text = fixed(*moles, 4);
            vec![
                Derivation::new(
                    "Moles",
                    "volume (L) ÷ molar volume (22.4L) = moles (mol)",
                    format!(
                        "{}L ÷ {}L = {} mol",
                        plain(input.normalized),
                        molar_volume,
                        moles_text
                    ),
                )
                .gas(),
                Derivation::new(
                    "Mass",
                    MASS_FROM_MOLES,
                    format!("{}mol × {}g/mol = {} g", moles_text, m, fixed(*grams, 3)),
                ),
                Derivation::new("Atom count", ATOMS_FROM_MOLES, atom_count(*moles, moles_text)),
            ]
        }
        Conversion::Avogadro { input, moles, grams, liters, .. } => {
            let coefficient = plain(input.amount);
            let moles_text = group_thousands(*moles, 4);
            vec![
                Derivation::new(
                    "Moles",
                    "coefficient × atoms per molecule = moles (mol)",
                    format!("{} × {} = {} mol", coefficient, k, moles_text),
                ),
                Derivation::new(
                    "Mass",
                    MASS_FROM_MOLES,
                    format!("{} mol × {}g/mol = {} g", moles_text, m, fixed(*grams, 3)),
                ),
                Derivation::new(
                    "Volume",
                    VOLUME_FROM_MOLES,
                    format!("{} mol × {}L = {} L", moles_text, molar_volume, fixed(*liters, 3)),
                )
                .gas(),
                Derivation::new(
                    "Total atoms",
                    "NA coefficient × atoms per molecule × Avogadro's number = total atoms",
                    atom_count(input.amount, coefficient.clone()),
                ),
                Derivation::new(
                    "Particles",
                    "NA coefficient × Avogadro's number = particles",
                    format!("{} × 6.02 × 10²³ = {}", coefficient, avogadro_form(input.amount)),
                ),
            ]
        }
    }
}
