use crate::error::ApiError;
use crate::types::*;
use crate::{search, AppState};
use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct McpTool {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct McpToolsResponse {
    pub tools: Vec<McpTool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct McpCallRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct McpCallResponse {
    pub content: Vec<McpContent>,
    pub is_error: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct McpContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl McpCallResponse {
    fn text(text: String, is_error: bool) -> Self {
        Self {
            content: vec![McpContent {
                content_type: "text".to_string(),
                text,
            }],
            is_error,
        }
    }
}

pub const SEARCH_TOOL: &str = "search_pastes";
pub const LINKS_TOOL: &str = "list_paste_links";

pub fn search_tool_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "Phrase to look for (case-insensitive, at least 3 characters)"
            }
        },
        "required": ["query"]
    })
}

pub fn links_tool_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {}
    })
}

/// Plain-text rendering shared by the HTTP and stdio tool surfaces
pub fn format_search_results(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("No recent pastes contain '{}'", query);
    }
    let mut text = format!("Found {} recent pastes containing '{}':\n\n", results.len(), query);
    for (i, result) in results.iter().enumerate() {
        text.push_str(&format!("{}. {}\n   Snippet: {}\n\n", i + 1, result.link, result.snippet));
    }
    text
}

pub fn format_links(links: &[PasteRef]) -> String {
    let mut text = format!("{} recent pastes:\n", links.len());
    for link in links {
        text.push_str(&format!("- {} (raw: {})\n", link.view_url, link.raw_url));
    }
    text
}

pub async fn list_tools() -> Json<McpToolsResponse> {
    let tools = vec![
        McpTool {
            name: SEARCH_TOOL.to_string(),
            description: "Search the most recent public pastes for a phrase. Returns paste links with a snippet around the first match.".to_string(),
            input_schema: search_tool_schema(),
        },
        McpTool {
            name: LINKS_TOOL.to_string(),
            description: "List links to the most recent public pastes.".to_string(),
            input_schema: links_tool_schema(),
        },
    ];

    Json(McpToolsResponse { tools })
}

pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    Json(request): Json<McpCallRequest>,
) -> Result<Json<McpCallResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!("MCP tool call: {} with args: {:?}", request.name, request.arguments);

    match request.name.as_str() {
        SEARCH_TOOL => {
            let raw = request.arguments.get("query").and_then(|v| v.as_str());
            let phrase = SearchPhrase::parse(raw).map_err(|e| bad_request(e.to_string()))?;

            match search::search_pastes(&state, &phrase).await {
                Ok(results) => Ok(Json(McpCallResponse::text(
                    format_search_results(phrase.as_str(), &results),
                    false,
                ))),
                Err(e) => {
                    error!("Search tool error: {}", e);
                    Ok(Json(McpCallResponse::text(
                        ApiError::from(e).public_message(),
                        true,
                    )))
                }
            }
        }
        LINKS_TOOL => match search::list_links(&state).await {
            Ok(links) => Ok(Json(McpCallResponse::text(format_links(&links), false))),
            Err(e) => {
                error!("Links tool error: {}", e);
                Ok(Json(McpCallResponse::text(
                    ApiError::from(e).public_message(),
                    true,
                )))
            }
        },
        _ => Err(bad_request(format!("Unknown tool: {}", request.name))),
    }
}

fn bad_request(error: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_tools_names() {
        let Json(response) = list_tools().await;
        let names: Vec<&str> = response.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec![SEARCH_TOOL, LINKS_TOOL]);
        assert_eq!(response.tools[0].input_schema["required"][0], "query");
    }

    #[test]
    fn test_format_search_results() {
        assert_eq!(format_search_results("secret", &[]), "No recent pastes contain 'secret'");

        let results = vec![SearchResult {
            link: "https://pastebin.com/abc123".to_string(),
            snippet: "my secret token".to_string(),
        }];
        let text = format_search_results("secret", &results);
        assert!(text.starts_with("Found 1 recent pastes containing 'secret'"));
        assert!(text.contains("1. https://pastebin.com/abc123\n   Snippet: my secret token"));
    }

    #[test]
    fn test_format_links() {
        let links = vec![PasteRef::new("abc123", &crate::ScanConfig::default())];
        let text = format_links(&links);
        assert!(text.starts_with("1 recent pastes:"));
        assert!(text.contains("https://pastebin.com/abc123 (raw: https://pastebin.com/raw/abc123)"));
    }
}
