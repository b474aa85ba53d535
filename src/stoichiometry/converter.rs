//! Quantity conversion engine
//!
//! Turns one known quantity (mass, moles, gas volume or an Avogadro
//! coefficient) into the other representations for a given molar mass.

use serde::Serialize;

use super::units::{classify, QuantityUnit, UnitClass, AVOGADRO, MOLAR_VOLUME_L};

/// The amount as entered and after normalization to g / L
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputAmount {
    pub amount: f64,
    pub unit: QuantityUnit,
    /// Amount in grams (mass), liters (volume), or unchanged
    pub normalized: f64,
}

impl InputAmount {
    fn new(amount: f64, unit: QuantityUnit) -> Self {
        Self {
            amount,
            unit,
            normalized: amount * unit.to_base_factor(),
        }
    }
}

/// Result of one conversion branch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum Conversion {
    Mass {
        input: InputAmount,
        moles: f64,
        liters: f64,
        particles: f64,
        atoms: f64,
    },
    Moles {
        input: InputAmount,
        grams: f64,
        liters: f64,
        particles: f64,
        atoms: f64,
    },
    Volume {
        input: InputAmount,
        moles: f64,
        grams: f64,
        atoms: f64,
    },
    Avogadro {
        input: InputAmount,
        moles: f64,
        grams: f64,
        liters: f64,
        particles: f64,
        atoms: f64,
    },
}

impl Conversion {
    pub fn input(&self) -> &InputAmount {
        match self {
            Conversion::Mass { input, .. }
            | Conversion::Moles { input, .. }
            | Conversion::Volume { input, .. }
            | Conversion::Avogadro { input, .. } => input,
        }
    }

    pub fn moles(&self) -> f64 {
        match self {
            Conversion::Moles { input, .. } => input.normalized,
            Conversion::Mass { moles, .. }
            | Conversion::Volume { moles, .. }
            | Conversion::Avogadro { moles, .. } => *moles,
        }
    }

    pub fn grams(&self) -> f64 {
        match self {
            Conversion::Mass { input, .. } => input.normalized,
            Conversion::Moles { grams, .. }
            | Conversion::Volume { grams, .. }
            | Conversion::Avogadro { grams, .. } => *grams,
        }
    }

    pub fn liters(&self) -> f64 {
        match self {
            Conversion::Volume { input, .. } => input.normalized,
            Conversion::Mass { liters, .. }
            | Conversion::Moles { liters, .. }
            | Conversion::Avogadro { liters, .. } => *liters,
        }
    }

    /// Molecule count (moles x N_A); the volume branch does not report one
    pub fn particles(&self) -> Option<f64> {
        match self {
            Conversion::Mass { particles, .. }
            | Conversion::Moles { particles, .. }
            | Conversion::Avogadro { particles, .. } => Some(*particles),
            Conversion::Volume { .. } => None,
        }
    }

    /// Total atom count across all molecules
    pub fn atoms(&self) -> f64 {
        match self {
            Conversion::Mass { atoms, .. }
            | Conversion::Moles { atoms, .. }
            | Conversion::Volume { atoms, .. }
            | Conversion::Avogadro { atoms, .. } => *atoms,
        }
    }
}

/// Run the conversion branch selected by `class`.
///
/// Returns `None` when the molar mass is not positive, so no branch ever
/// divides by zero.
pub fn convert(
    class: UnitClass,
    amount: f64,
    molar_mass: f64,
    atoms_per_molecule: u64,
) -> Option<Conversion> {
    if !(molar_mass > 0.0) || !amount.is_finite() {
        return None;
    }

    let input = InputAmount::new(amount, class.unit());
    let a = input.normalized;
    let k = atoms_per_molecule as f64;

    let conversion = match class {
        UnitClass::MassKg | UnitClass::MassG => {
            let moles = a / molar_mass;
            Conversion::Mass {
                input,
                moles,
                liters: moles * MOLAR_VOLUME_L,
                particles: moles * AVOGADRO,
                atoms: moles * k * AVOGADRO,
            }
        }
        UnitClass::Molar => Conversion::Moles {
            input,
            grams: a * molar_mass,
            liters: a * MOLAR_VOLUME_L,
            particles: a * AVOGADRO,
            atoms: a * k * AVOGADRO,
        },
        UnitClass::VolumeL | UnitClass::VolumeMl => {
            let moles = a / MOLAR_VOLUME_L;
            Conversion::Volume {
                input,
                moles,
                grams: moles * molar_mass,
                atoms: moles * k * AVOGADRO,
            }
        }
        UnitClass::ParticleMultiplier => {
            // FIXME: coefficient x atoms-per-molecule is not a mole count (a
            // coefficient of N_A molecules is `a` moles). Kept for
            // compatibility with existing worksheets until that is confirmed.
            let moles = a * k;
            Conversion::Avogadro {
                input,
                moles,
                grams: moles * molar_mass,
                liters: moles * MOLAR_VOLUME_L,
                particles: a * AVOGADRO,
                atoms: a * AVOGADRO * k,
            }
        }
    };

    tracing::debug!(?class, amount, molar_mass, atoms_per_molecule, "converted quantity");
    Some(conversion)
}

/// Classify a raw (unit, amount) input and convert it, if any branch applies
pub fn convert_input(
    unit: Option<&str>,
    amount: Option<f64>,
    molar_mass: f64,
    atoms_per_molecule: u64,
) -> Option<Conversion> {
    let class = classify(unit, amount, molar_mass)?;
    convert(class, amount?, molar_mass, atoms_per_molecule)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER: f64 = 18.015;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.001
    }

    fn close_rel(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-9
    }

    #[test]
    fn test_moles_to_everything() {
        let c = convert(UnitClass::Molar, 2.0, WATER, 3).unwrap();
        assert!(close(c.grams(), 36.03));
        assert!(close(c.liters(), 44.8));
        assert!(close_rel(c.particles().unwrap(), 2.0 * AVOGADRO));
        assert!(close_rel(c.atoms(), 2.0 * 3.0 * 6.02e23));
        assert_eq!(c.moles(), 2.0);
    }

    #[test]
    fn test_grams_to_moles() {
        let c = convert(UnitClass::MassG, WATER, WATER, 3).unwrap();
        assert!((c.moles() - 1.0).abs() < 0.0001);
        assert!(close(c.liters(), 22.4));
        assert!(close_rel(c.atoms(), 3.0 * AVOGADRO));
    }

    #[test]
    fn test_kilograms_are_normalized() {
        let c = convert(UnitClass::MassKg, 1.8015, WATER, 3).unwrap();
        assert!(close(c.input().normalized, 1801.5));
        assert!(close(c.moles(), 100.0));
        assert!(close(c.grams(), 1801.5));
    }

    #[test]
    fn test_volume_to_moles() {
        let c = convert(UnitClass::VolumeL, 44.8, WATER, 3).unwrap();
        assert!(close(c.moles(), 2.0));
        assert!(close(c.grams(), 36.03));
        assert_eq!(c.particles(), None);
    }

    #[test]
    fn test_milliliters_are_normalized() {
        let c = convert(UnitClass::VolumeMl, 22400.0, WATER, 3).unwrap();
        assert!(close(c.liters(), 22.4));
        assert!(close(c.moles(), 1.0));
    }

    #[test]
    fn test_avogadro_coefficient() {
        let c = convert(UnitClass::ParticleMultiplier, 1.0, WATER, 3).unwrap();
        assert!(close(c.moles(), 3.0));
        assert!(close(c.grams(), 54.045));
        assert!(close(c.liters(), 67.2));
        assert!(close_rel(c.atoms(), 3.0 * AVOGADRO));
        assert!(close_rel(c.particles().unwrap(), AVOGADRO));
    }

    #[test]
    fn test_mass_round_trip() {
        for molar_mass in [1.008, WATER, 44.009, 342.297] {
            for grams in [0.5, 1.0, 18.015, 250.0, 12345.6] {
                let to_moles = convert(UnitClass::MassG, grams, molar_mass, 1).unwrap();
                let back = convert(UnitClass::Molar, to_moles.moles(), molar_mass, 1).unwrap();
                assert!((back.grams() - grams).abs() < 1e-9 * grams.max(1.0));
            }
        }
    }

    #[test]
    fn test_volume_round_trip() {
        for moles in [0.1, 1.0, 2.5, 1000.0] {
            let to_liters = convert(UnitClass::Molar, moles, WATER, 3).unwrap();
            assert!(close(to_liters.liters(), moles * 22.4));
            let back = convert(UnitClass::VolumeL, to_liters.liters(), WATER, 3).unwrap();
            assert!((back.moles() - moles).abs() < 1e-9 * moles);
        }
    }

    #[test]
    fn test_zero_molar_mass_is_unavailable() {
        assert_eq!(convert(UnitClass::MassG, 10.0, 0.0, 3), None);
        assert_eq!(convert(UnitClass::Molar, 10.0, -1.0, 3), None);
        assert_eq!(convert_input(Some("g"), Some(10.0), 0.0, 3), None);
    }

    #[test]
    fn test_convert_input() {
        let c = convert_input(Some("mol"), Some(2.0), WATER, 3).unwrap();
        assert!(matches!(c, Conversion::Moles { .. }));
        assert_eq!(convert_input(Some("mol"), None, WATER, 3), None);
        assert_eq!(convert_input(Some("furlong"), Some(2.0), WATER, 3), None);
    }

    #[test]
    fn test_zero_atoms_per_molecule() {
        let c = convert(UnitClass::Molar, 2.0, WATER, 0).unwrap();
        assert_eq!(c.atoms(), 0.0);
    }

    #[test]
    fn test_atom_count_beyond_u32() {
        let k = u64::from(u32::MAX) + 1;
        let c = convert(UnitClass::Molar, 1.0, WATER, k).unwrap();
        assert!(close_rel(c.atoms(), k as f64 * AVOGADRO));
    }
}
