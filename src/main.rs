//! Stoichiometry Calculator (stoich)
//!
//! An MCP server for molar mass and quantity conversions.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use stoich::build_info;
use stoich::elements::{self, ElementTable};
use stoich::mcp::StoichService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("stoich=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let elements_path = elements::elements_path_from_env();
    let table = ElementTable::load_or_embedded(elements_path.as_deref())?;
    eprintln!(
        "Element table: {} ({} elements)",
        table.source().describe(),
        table.len()
    );

    let service = StoichService::new(table);

    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;

    server.waiting().await?;

    Ok(())
}
