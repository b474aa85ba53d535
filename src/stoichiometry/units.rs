//! Unit types and physical constants
//!
//! Provides the quantity unit vocabulary, its synonyms, and the classifier
//! that decides which conversion (if any) applies to an input.

use serde::{Deserialize, Serialize};

// ============================================================================
// Physical Constants
// ============================================================================

/// Avogadro's number, to the precision used in every displayed derivation
pub const AVOGADRO: f64 = 6.02e23;
/// Mantissa of `AVOGADRO` when written as `6.02 × 10²³`
pub const AVOGADRO_COEFFICIENT: f64 = 6.02;
/// Volume of one mole of ideal gas at 0 °C and 1 atm, in liters
pub const MOLAR_VOLUME_L: f64 = 22.4;

/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Milliliters per liter
pub const ML_PER_L: f64 = 1000.0;

// ============================================================================
// Unit Vocabulary
// ============================================================================

/// Physical family a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    Mass,
    Amount,
    Volume,
    Particles,
}

/// A recognized quantity unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityUnit {
    Kilogram,
    Gram,
    Mole,
    Liter,
    Milliliter,
    /// Coefficient to be multiplied by Avogadro's number
    Avogadro,
}

impl QuantityUnit {
    pub const ALL: [QuantityUnit; 6] = [
        QuantityUnit::Kilogram,
        QuantityUnit::Gram,
        QuantityUnit::Mole,
        QuantityUnit::Liter,
        QuantityUnit::Milliliter,
        QuantityUnit::Avogadro,
    ];

    /// Canonical display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            QuantityUnit::Kilogram => "kg",
            QuantityUnit::Gram => "g",
            QuantityUnit::Mole => "mol",
            QuantityUnit::Liter => "L",
            QuantityUnit::Milliliter => "mL",
            QuantityUnit::Avogadro => "NA",
        }
    }

    pub fn family(&self) -> UnitFamily {
        match self {
            QuantityUnit::Kilogram | QuantityUnit::Gram => UnitFamily::Mass,
            QuantityUnit::Mole => UnitFamily::Amount,
            QuantityUnit::Liter | QuantityUnit::Milliliter => UnitFamily::Volume,
            QuantityUnit::Avogadro => UnitFamily::Particles,
        }
    }

    /// Accepted spellings, lowercase
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            QuantityUnit::Kilogram => &["kg", "kilogram", "kilograms", "킬로그램"],
            QuantityUnit::Gram => &["g", "gram", "grams", "그램"],
            QuantityUnit::Mole => &["mol", "mole", "moles", "몰"],
            QuantityUnit::Liter => &["l", "liter", "liters", "litre", "litres", "리터"],
            QuantityUnit::Milliliter => &[
                "ml",
                "milliliter",
                "milliliters",
                "millilitre",
                "millilitres",
                "밀리리터",
            ],
            QuantityUnit::Avogadro => &["na", "avogadro"],
        }
    }

    /// Factor that brings an amount in this unit to its family's base unit
    /// (grams for mass, liters for volume)
    pub fn to_base_factor(&self) -> f64 {
        match self {
            QuantityUnit::Kilogram => G_PER_KG,
            QuantityUnit::Milliliter => 1.0 / ML_PER_L,
            _ => 1.0,
        }
    }
}

/// Parse a unit tag, tolerating case, surrounding whitespace, and localized synonyms
pub fn parse_unit(unit: &str) -> Option<QuantityUnit> {
    let lower = unit.trim().to_lowercase();

    QuantityUnit::ALL
        .into_iter()
        .find(|u| u.synonyms().contains(&lower.as_str()))
}

// ============================================================================
// Unit Classification
// ============================================================================

/// Which conversion branch an input selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitClass {
    MassKg,
    MassG,
    Molar,
    VolumeL,
    VolumeMl,
    ParticleMultiplier,
}

impl UnitClass {
    pub fn unit(&self) -> QuantityUnit {
        match self {
            UnitClass::MassKg => QuantityUnit::Kilogram,
            UnitClass::MassG => QuantityUnit::Gram,
            UnitClass::Molar => QuantityUnit::Mole,
            UnitClass::VolumeL => QuantityUnit::Liter,
            UnitClass::VolumeMl => QuantityUnit::Milliliter,
            UnitClass::ParticleMultiplier => QuantityUnit::Avogadro,
        }
    }
}

impl From<QuantityUnit> for UnitClass {
    fn from(unit: QuantityUnit) -> Self {
        match unit {
            QuantityUnit::Kilogram => UnitClass::MassKg,
            QuantityUnit::Gram => UnitClass::MassG,
            QuantityUnit::Mole => UnitClass::Molar,
            QuantityUnit::Liter => UnitClass::VolumeL,
            QuantityUnit::Milliliter => UnitClass::VolumeMl,
            QuantityUnit::Avogadro => UnitClass::ParticleMultiplier,
        }
    }
}

/// Select the conversion branch for an input.
///
/// Returns `None` (nothing to show) unless the amount is present, non-zero
/// and finite, the unit is recognized, and the molar mass is positive.
pub fn classify(unit: Option<&str>, amount: Option<f64>, total: f64) -> Option<UnitClass> {
    let amount = amount?;
    if amount == 0.0 || !amount.is_finite() || !(total > 0.0) {
        return None;
    }

    parse_unit(unit?).map(UnitClass::from)
}
