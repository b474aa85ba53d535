//! MCP server module
//!
//! Exposes the calculator over the Model Context Protocol.

pub mod server;

pub use server::StoichService;
