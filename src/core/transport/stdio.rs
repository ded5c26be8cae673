//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP - the default and recommended mode.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult, shutdown_signal};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport.
    ///
    /// Returns when the client closes the session or on Ctrl-C, whether or
    /// not the client has completed the handshake. On Ctrl-C the running
    /// service is dropped, which cancels the session before returning.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        let service = tokio::select! {
            result = server.serve(rmcp::transport::stdio()) => {
                result.map_err(|e| TransportError::init(e.to_string()))?
            }
            _ = &mut shutdown => {
                info!("Interrupt received before the client initialized");
                return Ok(());
            }
        };

        tokio::select! {
            result = service.waiting() => {
                result.map_err(|e| TransportError::service(e.to_string()))?;
                info!("STDIO session closed by client");
            }
            _ = &mut shutdown => {
                info!("Interrupt received, closing STDIO session");
            }
        }

        info!("STDIO transport finished");
        Ok(())
    }
}
