//! Status Tool
//!
//! Provides runtime status information about the stoich service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::elements::ElementTable;

/// Calculation instructions for AI assistants
pub const CALCULATION_INSTRUCTIONS: &str = r#"
# Stoichiometry Calculator Instructions

## Input

Formulas arrive already parsed, as an ordered list of `{symbol, count}` pairs:

```
[{"symbol": "H", "count": 2}, {"symbol": "O", "count": 1}]        # H2O
[{"symbol": "3", "count": 1}, {"symbol": "H", "count": 2}, ...]   # 3(H2O)
```

A leading entry whose symbol is a positive whole number is a molecule-count
multiplier. It scales the displayed molar mass and per-element counts, but
conversions always use the molar mass of ONE formula unit.

## Units

| Family | Tags |
|--------|------|
| Mass | g, kg |
| Amount | mol, mole, 몰 |
| Volume (gas, 0 °C, 1 atm) | L, mL, 리터, 밀리리터 |
| Particles | NA (a coefficient of Avogadro's number) |

Tags are case-insensitive. Call `list_units` for the full synonym list.

## Tools

1. `calculate_molar_mass(parsed_atoms)` - molar mass and element breakdown
2. `calculate_stoichiometry(parsed_atoms, amount, unit)` - molar mass plus
   every conversion for the given quantity, with the working shown
3. `get_element(symbol)` / `list_elements(query, limit)` - reference data

## Constants

- Avogadro's number: 6.02 × 10²³
- Molar volume of an ideal gas at 0 °C, 1 atm: 22.4 L/mol

## Notes

- Unknown element symbols count as 0 g/mol and are listed in `unknown_symbols`.
- If the molar mass is 0, or no amount is given, no conversion is returned.
- In NA mode, moles are computed as coefficient × atoms per molecule. This is
  NOT coefficient × 1 mol; mention it to the user when the result matters.
"#;

/// Runtime status of the stoich service
#[derive(Debug, Clone, Serialize)]
pub struct StoichStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Element table information
    pub element_table: String,
    pub element_count: usize,

    /// Process information
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: String,
    element_table: String,
    element_count: usize,
}

impl StatusTracker {
    pub fn new(table: &ElementTable) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            element_table: table.source().describe(),
            element_count: table.len(),
        }
    }

    pub fn get_status(&self) -> StoichStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        StoichStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            element_table: self.element_table.clone(),
            element_count: self.element_count,
            started_at: self.started_at.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
