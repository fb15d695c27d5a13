//! MCP server wiring
//!
//! [`PassioMcpServer`] registers the transit tools with rmcp and turns
//! handler results into tool responses: records become pretty JSON text,
//! failures become problem-details JSON flagged as tool errors. Protocol
//! level errors are reserved for malformed requests, which rmcp rejects
//! before a handler runs.

use passio_lib::{PassioConfig, TransitTools};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use tracing::{info, warn};

use crate::tools;
use crate::types::*;

/// Name announced to MCP clients
pub const SERVER_NAME: &str = "passiogo-mcp-server";

const INSTRUCTIONS: &str = "Live PassioGo transit data. Every tool takes the name of a \
transportation system (for example \"University of Arkansas\"); approximate names are \
matched to the closest known system, route or stop. Failed lookups return a JSON problem \
with the query that did not resolve and, when available, suggested names.";

/// MCP service exposing the PassioGo transit tools
#[derive(Clone)]
pub struct PassioMcpServer {
    tools: TransitTools,
    tool_router: ToolRouter<Self>,
}

/// Convert a handler result into a tool response
fn respond(result: crate::Result<String>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(err) => {
            warn!("tool call failed ({}): {}", err.code, err.message);
            Ok(CallToolResult::error(vec![Content::text(err.to_json())]))
        }
    }
}

#[tool_router]
impl PassioMcpServer {
    pub fn new(tools: TransitTools) -> Self {
        Self {
            tools,
            tool_router: Self::tool_router(),
        }
    }

    /// Connect to PassioGo with `config` and build the server.
    pub async fn connect(config: &PassioConfig) -> crate::Result<Self> {
        let tools = TransitTools::connect(config).await?;
        info!(
            "Serving {} transportation systems from {}",
            tools.catalog().len(),
            config.base_url
        );
        Ok(Self::new(tools))
    }

    pub fn transit_tools(&self) -> &TransitTools {
        &self.tools
    }

    /// Serve MCP over stdin/stdout until the client disconnects.
    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        info!("Starting {} on stdio", SERVER_NAME);
        let service = self.serve(rmcp::transport::io::stdio()).await?;
        service.waiting().await?;
        info!("{} stopped", SERVER_NAME);
        Ok(())
    }

    #[tool(
        description = "List all routes of a transportation system. Returns a JSON array of routes."
    )]
    async fn get_routes_from_transportation_system(
        &self,
        Parameters(input): Parameters<SystemInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(tools::get_routes_from_transportation_system(&self.tools, input).await)
    }

    #[tool(
        description = "Find one route of a transportation system by (approximate) route name. Returns a JSON object."
    )]
    async fn get_route_from_transportation_system(
        &self,
        Parameters(input): Parameters<RouteInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(tools::get_route_from_transportation_system(&self.tools, input).await)
    }

    #[tool(
        description = "List all stops of a transportation system. Returns a JSON array of stops."
    )]
    async fn get_stops_from_transportation_system(
        &self,
        Parameters(input): Parameters<SystemInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(tools::get_stops_from_transportation_system(&self.tools, input).await)
    }

    #[tool(
        description = "Find one stop of a transportation system by (approximate) stop name. Returns a JSON object."
    )]
    async fn get_stop_from_transportation_system(
        &self,
        Parameters(input): Parameters<StopInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(tools::get_stop_from_transportation_system(&self.tools, input).await)
    }

    #[tool(
        description = "List the stops served by a route of a transportation system. Returns a JSON array of stops."
    )]
    async fn get_stops_from_route(
        &self,
        Parameters(input): Parameters<RouteStopsInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(tools::get_stops_from_route(&self.tools, input).await)
    }

    #[tool(
        description = "List the current service alerts of a transportation system. Returns a JSON array of alerts."
    )]
    async fn get_alerts_from_transportation_system(
        &self,
        Parameters(input): Parameters<SystemInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(tools::get_alerts_from_transportation_system(&self.tools, input).await)
    }

    #[tool(
        description = "List the vehicles a transportation system currently reports, with positions. Returns a JSON array of vehicles."
    )]
    async fn get_vehicles_from_transportation_system(
        &self,
        Parameters(input): Parameters<SystemInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(tools::get_vehicles_from_transportation_system(&self.tools, input).await)
    }
}

#[tool_handler]
impl ServerHandler for PassioMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passio_lib::test_helpers::campus_client;
    use serde_json::Value;
    use std::sync::Arc;

    fn server() -> PassioMcpServer {
        let client = campus_client();
        let catalog = Arc::new(client.catalog());
        PassioMcpServer::new(TransitTools::new(Arc::new(client), catalog))
    }

    /// Text payload and error flag of a tool response
    fn unpack(result: CallToolResult) -> (String, bool) {
        let value = serde_json::to_value(&result).unwrap();
        let text = value["content"][0]["text"].as_str().unwrap().to_string();
        let is_error = value["isError"].as_bool().unwrap_or(false);
        (text, is_error)
    }

    #[test]
    fn test_server_info() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, SERVER_NAME);
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("transportation system"));
    }

    #[test]
    fn test_all_tools_registered() {
        let mut names: Vec<String> = server()
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "get_alerts_from_transportation_system",
                "get_route_from_transportation_system",
                "get_routes_from_transportation_system",
                "get_stop_from_transportation_system",
                "get_stops_from_route",
                "get_stops_from_transportation_system",
                "get_vehicles_from_transportation_system",
            ]
        );
    }

    #[tokio::test]
    async fn test_success_is_pretty_json_text() {
        let result = server()
            .get_routes_from_transportation_system(Parameters(SystemInput {
                transportation_system_name: "Arkansas".to_string(),
            }))
            .await
            .unwrap();
        let (text, is_error) = unpack(result);
        assert!(!is_error);
        assert!(text.contains('\n'));
        let routes: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(routes.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_failure_is_tool_error_with_problem_details() {
        let result = server()
            .get_stop_from_transportation_system(Parameters(StopInput {
                stop_name: "Green Express Shuttle".to_string(),
                transportation_system_name: "University of Arkansas".to_string(),
            }))
            .await
            .unwrap();
        let (text, is_error) = unpack(result);
        assert!(is_error);
        let problem: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(problem["code"], 404);
        assert_eq!(problem["context"]["kind"], "stop");
        assert_eq!(problem["context"]["query"], "Green Express Shuttle");
    }
}
