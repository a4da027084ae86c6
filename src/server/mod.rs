//! MCP server for Animia beneficiary SMS.
//!
//! This module provides the MCP protocol server that exposes the SMS
//! dispatch functionality to AI assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::AnimiaSmsServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the server with stdio transport until the client disconnects.
pub async fn run_server(server: AnimiaSmsServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
