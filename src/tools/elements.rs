//! Element and Unit MCP Tools
//!
//! Read-only lookups into the element table and the unit vocabulary.

use serde::Serialize;

use crate::elements::{ElementInfo, ElementTable};
use crate::stoichiometry::{QuantityUnit, UnitFamily};

/// Response for list_elements
#[derive(Debug, Serialize)]
pub struct ListElementsResponse {
    pub elements: Vec<ElementInfo>,
    pub total: usize,
    pub limit: usize,
}

/// One supported unit
#[derive(Debug, Serialize)]
pub struct UnitSummary {
    pub symbol: &'static str,
    pub family: UnitFamily,
    pub synonyms: &'static [&'static str],
}

/// Response for list_units
#[derive(Debug, Serialize)]
pub struct ListUnitsResponse {
    pub units: Vec<UnitSummary>,
}

/// Look up one element. Tries the exact symbol first, then a
/// case-insensitive match ("na" -> "Na").
pub fn get_element(table: &ElementTable, symbol: &str) -> Option<ElementInfo> {
    let symbol = symbol.trim();
    if let Some(info) = table.get(symbol) {
        return Some(info.clone());
    }

    table
        .iter()
        .find(|e| e.symbol.eq_ignore_ascii_case(symbol))
        .cloned()
}

/// List elements ordered by atomic mass, optionally filtered by symbol or
/// localized name
pub fn list_elements(table: &ElementTable, query: Option<&str>, limit: usize) -> ListElementsResponse {
    let query = query.map(|q| q.trim().to_lowercase()).filter(|q| !q.is_empty());

    let matches: Vec<&ElementInfo> = table
        .sorted_by_mass()
        .into_iter()
        .filter(|e| match &query {
            Some(q) => {
                e.symbol.to_lowercase().starts_with(q.as_str())
                    || e.local_name
                        .as_deref()
                        .map(|n| n.to_lowercase().contains(q.as_str()))
                        .unwrap_or(false)
            }
            None => true,
        })
        .collect();

    let total = matches.len();
    let elements = matches.into_iter().take(limit).cloned().collect();

    ListElementsResponse {
        elements,
        total,
        limit,
    }
}

/// Every unit tag the calculator understands
pub fn list_units() -> ListUnitsResponse {
    ListUnitsResponse {
        units: QuantityUnit::ALL
            .into_iter()
            .map(|unit| UnitSummary {
                symbol: unit.symbol(),
                family: unit.family(),
                synonyms: unit.synonyms(),
            })
            .collect(),
    }
}
