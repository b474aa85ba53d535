//! Element reference table
//!
//! Read-only symbol -> atomic mass lookup. Missing symbols never fail a
//! calculation, they weigh nothing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default table shipped with the crate
const EMBEDDED_ELEMENTS: &str = include_str!("../../data/elements.json");

/// Element table error types
#[derive(Debug, Error)]
pub enum ElementError {
    #[error("Failed to read element table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid element table JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid atomic mass for {symbol}: {mass}")]
    InvalidMass { symbol: String, mass: f64 },
}

/// Result type for element table operations
pub type ElementResult<T> = Result<T, ElementError>;

/// One entry of the periodic table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementInfo {
    pub symbol: String,
    /// Localized element name, if the table carries one
    #[serde(default, alias = "kor", skip_serializing_if = "Option::is_none")]
    pub local_name: Option<String>,
    /// Standard atomic weight (g/mol)
    pub atomic_mass: f64,
}

/// Where a table was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    Embedded,
    Inline,
    File(PathBuf),
}

impl TableSource {
    pub fn describe(&self) -> String {
        match self {
            TableSource::Embedded => "embedded".to_string(),
            TableSource::Inline => "inline".to_string(),
            TableSource::File(path) => path.display().to_string(),
        }
    }
}

/// Symbol-keyed element reference table
#[derive(Debug, Clone)]
pub struct ElementTable {
    elements: HashMap<String, ElementInfo>,
    source: TableSource,
}

impl ElementTable {
    /// Build the table bundled with the crate
    pub fn embedded() -> ElementResult<Self> {
        Self::parse(EMBEDDED_ELEMENTS, TableSource::Embedded)
    }

    /// Load a table from a JSON file keyed by element symbol
    pub fn load<P: AsRef<Path>>(path: P) -> ElementResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let table = Self::parse(&json, TableSource::File(path.to_path_buf()))?;
        tracing::info!(
            "Loaded {} elements from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Load from `path` when given, otherwise fall back to the embedded table
    pub fn load_or_embedded(path: Option<&Path>) -> ElementResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::embedded(),
        }
    }

    /// Parse a table from a JSON string
    pub fn from_json_str(json: &str) -> ElementResult<Self> {
        Self::parse(json, TableSource::Inline)
    }

    fn parse(json: &str, source: TableSource) -> ElementResult<Self> {
        let elements: HashMap<String, ElementInfo> = serde_json::from_str(json)?;

        for (symbol, info) in &elements {
            if !info.atomic_mass.is_finite() || info.atomic_mass <= 0.0 {
                return Err(ElementError::InvalidMass {
                    symbol: symbol.clone(),
                    mass: info.atomic_mass,
                });
            }
        }

        Ok(Self { elements, source })
    }

    /// Look up an element by its table key
    pub fn get(&self, symbol: &str) -> Option<&ElementInfo> {
        self.elements.get(symbol)
    }

    /// Atomic mass for a symbol, 0 when the symbol is not in the table
    pub fn atomic_mass(&self, symbol: &str) -> f64 {
        self.get(symbol).map(|e| e.atomic_mass).unwrap_or(0.0)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.elements.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn source(&self) -> &TableSource {
        &self.source
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementInfo> {
        self.elements.values()
    }

    /// Elements ordered by atomic mass (roughly periodic order)
    pub fn sorted_by_mass(&self) -> Vec<&ElementInfo> {
        let mut elements: Vec<&ElementInfo> = self.elements.values().collect();
        elements.sort_by(|a, b| a.atomic_mass.total_cmp(&b.atomic_mass));
        elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_table() {
        let table = ElementTable::embedded().unwrap();
        assert!(!table.is_empty());
        assert_eq!(table.source(), &TableSource::Embedded);
        assert!((table.atomic_mass("H") - 1.008).abs() < 1e-9);
        assert!((table.atomic_mass("O") - 15.999).abs() < 1e-9);
        assert_eq!(table.get("O").and_then(|e| e.local_name.as_deref()), Some("산소"));
    }

    #[test]
    fn test_missing_symbol_weighs_nothing() {
        let table = ElementTable::embedded().unwrap();
        assert_eq!(table.atomic_mass("Xx"), 0.0);
        assert!(table.get("Xx").is_none());
        assert!(!table.contains("Xx"));
    }

    #[test]
    fn test_from_json_str_accepts_both_name_fields() {
        let json = r#"{
            "H": {"symbol": "H", "kor": "수소", "atomic_mass": 1.008},
            "C": {"symbol": "C", "local_name": "Kohlenstoff", "atomic_mass": 12.011},
            "N": {"symbol": "N", "atomic_mass": 14.007}
        }"#;
        let table = ElementTable::from_json_str(json).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.source(), &TableSource::Inline);
        assert_eq!(table.get("H").unwrap().local_name.as_deref(), Some("수소"));
        assert_eq!(table.get("C").unwrap().local_name.as_deref(), Some("Kohlenstoff"));
        assert_eq!(table.get("N").unwrap().local_name, None);
    }

    #[test]
    fn test_rejects_non_positive_mass() {
        let json = r#"{"H": {"symbol": "H", "atomic_mass": 0.0}}"#;
        match ElementTable::from_json_str(json) {
            Err(ElementError::InvalidMass { symbol, .. }) => assert_eq!(symbol, "H"),
            other => panic!("expected InvalidMass, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            ElementTable::from_json_str("not json"),
            Err(ElementError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("stoich-elements-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"Na": {"symbol": "Na", "atomic_mass": 22.99}}"#).unwrap();

        let table = ElementTable::load_or_embedded(Some(path.as_path())).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.source(), &TableSource::File(path.clone()));
        assert!((table.atomic_mass("Na") - 22.99).abs() < 1e-9);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("stoich-definitely-missing.json");
        assert!(matches!(ElementTable::load(&path), Err(ElementError::Io(_))));
    }

    #[test]
    fn test_sorted_by_mass() {
        let table = ElementTable::embedded().unwrap();
        let sorted = table.sorted_by_mass();
        assert_eq!(sorted.first().map(|e| e.symbol.as_str()), Some("H"));
        assert!(sorted.windows(2).all(|w| w[0].atomic_mass <= w[1].atomic_mass));
    }
}
