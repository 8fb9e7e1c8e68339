use rmcp::{model::*, ServiceExt};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::ScanConfig;
use crate::error::ApiError;
use crate::mcp::{
    format_links, format_search_results, links_tool_schema, search_tool_schema, LINKS_TOOL, SEARCH_TOOL,
};
use crate::types::SearchPhrase;
use crate::{search, AppState};

#[derive(Clone, Debug)]
pub struct McpService {
    pub state: Arc<AppState>,
}

impl McpService {
    pub fn new() -> anyhow::Result<Self> {
        // stdout carries the protocol, so logs go to stderr
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();

        let config = ScanConfig::from_env()?;
        info!("Starting paste search MCP service");
        info!("Archive URL: {}", config.archive_url);

        let state = Arc::new(AppState::new(config)?);
        Ok(Self { state })
    }
}

fn schema_object(value: serde_json::Value) -> Arc<serde_json::Map<String, serde_json::Value>> {
    match value {
        serde_json::Value::Object(map) => Arc::new(map),
        _ => Arc::new(serde_json::Map::new()),
    }
}

impl rmcp::ServerHandler for McpService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            server_info: Implementation {
                name: "paste-search".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Searches the most recent public pastes for a phrase and lists recent paste links.".to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _page: Option<PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = vec![
            Tool {
                name: Cow::Borrowed(SEARCH_TOOL),
                description: Some(Cow::Borrowed(
                    "Search the most recent public pastes for a phrase. Returns paste links with a snippet around the first match.",
                )),
                input_schema: schema_object(search_tool_schema()),
                output_schema: None,
                annotations: None,
            },
            Tool {
                name: Cow::Borrowed(LINKS_TOOL),
                description: Some(Cow::Borrowed("List links to the most recent public pastes.")),
                input_schema: schema_object(links_tool_schema()),
                output_schema: None,
                annotations: None,
            },
        ];

        Ok(ListToolsResult {
            tools,
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        info!("MCP tool call: {} with args: {:?}", request.name, request.arguments);

        match request.name.as_ref() {
            SEARCH_TOOL => {
                let raw = request
                    .arguments
                    .as_ref()
                    .and_then(|args| args.get("query"))
                    .and_then(|v| v.as_str());
                let phrase = SearchPhrase::parse(raw)
                    .map_err(|e| ErrorData::new(ErrorCode::INVALID_PARAMS, e.to_string(), None))?;

                match search::search_pastes(&self.state, &phrase).await {
                    Ok(results) => Ok(CallToolResult::success(vec![Content::text(
                        format_search_results(phrase.as_str(), &results),
                    )])),
                    Err(e) => {
                        error!("Search tool error: {}", e);
                        Ok(CallToolResult::error(vec![Content::text(
                            ApiError::from(e).public_message(),
                        )]))
                    }
                }
            }
            LINKS_TOOL => match search::list_links(&self.state).await {
                Ok(links) => Ok(CallToolResult::success(vec![Content::text(format_links(&links))])),
                Err(e) => {
                    error!("Links tool error: {}", e);
                    Ok(CallToolResult::error(vec![Content::text(
                        ApiError::from(e).public_message(),
                    )]))
                }
            },
            _ => Err(ErrorData::new(
                ErrorCode::METHOD_NOT_FOUND,
                format!("Unknown tool: {}", request.name),
                None,
            )),
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    let service = McpService::new()?;
    let server = service.serve(rmcp::transport::stdio()).await?;
    info!("MCP stdio server running");
    let _quit_reason = server.waiting().await?;
    Ok(())
}
