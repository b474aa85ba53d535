//! stoich MCP Server Implementation
//!
//! Implements the MCP server with all calculator tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::elements::ElementTable;
use crate::stoichiometry::{ParsedAtom, Quantity};
use crate::tools::calculate;
use crate::tools::elements;
use crate::tools::status::StatusTracker;

/// stoich MCP Service
#[derive(Clone)]
pub struct StoichService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    table: Arc<ElementTable>,
    tool_router: ToolRouter<StoichService>,
}

impl StoichService {
    pub fn new(table: ElementTable) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(&table))),
            table: Arc::new(table),
            tool_router: Self::tool_router(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ToolError {
    error: String,
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParsedAtomParam {
    /// Element symbol (e.g. "H"), or a whole number for a leading molecule-count multiplier
    pub symbol: String,
    /// Number of atoms (default 1)
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 { 1 }

impl From<ParsedAtomParam> for ParsedAtom {
    fn from(p: ParsedAtomParam) -> Self {
        ParsedAtom::new(p.symbol, p.count)
    }
}

fn to_atoms(params: Vec<ParsedAtomParam>) -> Vec<ParsedAtom> {
    params.into_iter().map(ParsedAtom::from).collect()
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateStoichiometryParams {
    /// Parsed formula, in order
    pub parsed_atoms: Vec<ParsedAtomParam>,
    /// Quantity to convert (omit for molar mass only)
    pub amount: Option<f64>,
    /// Unit of the amount: g, kg, mol, L, mL, or NA
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateMolarMassParams {
    /// Parsed formula, in order
    pub parsed_atoms: Vec<ParsedAtomParam>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetElementParams {
    /// Element symbol (case-insensitive)
    pub symbol: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListElementsParams {
    /// Filter by symbol prefix or localized name (optional)
    pub query: Option<String>,
    #[serde(default = "default_list_limit")]
    pub limit: usize,
}

fn default_list_limit() -> usize { 50 }

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl StoichService {
    // --- Status ---

    #[tool(description = "Get the current status of the stoich service including build info, element table, and process information")]
    async fn stoich_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Get instructions for the calculator tools: input format, supported units, constants. Call this before the first calculation.")]
    fn calculation_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CALCULATION_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CALCULATION_INSTRUCTIONS)]))
    }

    // --- Calculation ---

    #[tool(description = "Compute molar mass and convert a quantity (g, kg, mol, L, mL, or NA coefficient) into mass, moles, gas volume, and particle counts, with the working shown")]
    fn calculate_stoichiometry(&self, Parameters(p): Parameters<CalculateStoichiometryParams>) -> Result<CallToolResult, McpError> {
        let atoms = to_atoms(p.parsed_atoms);
        let quantity = Quantity { amount: p.amount, unit: p.unit };
        match calculate::calculate_stoichiometry(&self.table, &atoms, quantity) {
            Ok(report) => to_json(&report),
            Err(error) => to_json(&ToolError { error }),
        }
    }

    #[tool(description = "Compute the molar mass of a parsed formula with a per-element breakdown")]
    fn calculate_molar_mass(&self, Parameters(p): Parameters<CalculateMolarMassParams>) -> Result<CallToolResult, McpError> {
        let atoms = to_atoms(p.parsed_atoms);
        match calculate::calculate_molar_mass(&self.table, &atoms) {
            Ok(result) => to_json(&result),
            Err(error) => to_json(&ToolError { error }),
        }
    }

    // --- Reference Data ---

    #[tool(description = "Get an element's symbol, localized name, and atomic mass")]
    fn get_element(&self, Parameters(p): Parameters<GetElementParams>) -> Result<CallToolResult, McpError> {
        match elements::get_element(&self.table, &p.symbol) {
            Some(info) => to_json(&info),
            None => to_json(&ToolError { error: format!("Element not found: {}", p.symbol) }),
        }
    }

    #[tool(description = "List elements ordered by atomic mass, optionally filtered by symbol prefix or localized name")]
    fn list_elements(&self, Parameters(p): Parameters<ListElementsParams>) -> Result<CallToolResult, McpError> {
        to_json(&elements::list_elements(&self.table, p.query.as_deref(), p.limit))
    }

    #[tool(description = "List the unit tags accepted by calculate_stoichiometry")]
    fn list_units(&self) -> Result<CallToolResult, McpError> {
        to_json(&elements::list_units())
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for StoichService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "stoich".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Stoichiometry Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Stoichiometry calculator - molar mass and mass/mole/volume/particle conversions. \
                 IMPORTANT: Call calculation_instructions before the first calculation. \
                 Calculation: calculate_stoichiometry, calculate_molar_mass. \
                 Reference: get_element, list_elements, list_units. \
                 Status: stoich_status."
                    .into(),
            ),
        }
    }
}
