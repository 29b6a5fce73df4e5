//! MCP (Model Context Protocol) server implementation.
//!
//! This module exposes readability scoring and request building over the MCP
//! protocol, making them available to AI assistants via stdio transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It wraps the same core library that
//! the CLI commands use, and each `#[tool]` method delegates to core library
//! functions.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use readably_core::ReadingLevel;
use readably_core::assist::{ChatRequest, SimplificationLevel, SimplifyRequest};
use readably_core::document;
use readably_core::readability::{self, ReadabilityGate};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_readability` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeReadabilityParams {
    /// The text to analyze.
    pub text: String,
    /// Whether to strip markdown formatting before analysis.
    #[serde(default)]
    pub strip_markdown: bool,
    /// Maximum acceptable Flesch-Kincaid grade level.
    pub max_grade: Option<f64>,
    /// Minimum acceptable Flesch Reading Ease.
    pub min_reading_ease: Option<f64>,
}

/// Parameters for the `reading_level` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ReadingLevelParams {
    /// Flesch Reading Ease score.
    pub score: f64,
}

/// Parameters for the `build_simplify_request` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct BuildSimplifyRequestParams {
    /// The text to simplify.
    pub text: String,
    /// Target level: 1/basic, 2/intermediate, or 3/advanced.
    pub level: Option<String>,
}

/// MCP server exposing readability tools to AI assistants.
#[derive(Clone)]
pub struct ReadablyServer {
    max_input_bytes: Option<usize>,
    default_level: SimplificationLevel,
    model: String,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for ReadablyServer {
    fn default() -> Self {
        Self::new(
            Some(readably_core::DEFAULT_MAX_INPUT_BYTES),
            SimplificationLevel::default(),
            readably_core::assist::DEFAULT_MODEL.to_string(),
        )
    }
}

impl ReadablyServer {
    fn check_input(&self, text: &str) -> Result<(), McpError> {
        match self.max_input_bytes {
            Some(max) if text.len() > max => Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            )),
            _ => Ok(()),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_router]
impl ReadablyServer {
    /// Create a new MCP server instance.
    pub fn new(
        max_input_bytes: Option<usize>,
        default_level: SimplificationLevel,
        model: String,
    ) -> Self {
        Self {
            max_input_bytes,
            default_level,
            model,
            tool_router: Self::tool_router(),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Score readability of text.
    #[tool(
        description = "Analyze readability of text. Returns word, sentence, character and syllable counts, Flesch Reading Ease, Flesch-Kincaid grade, reading time, and reading level."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_readability(
        &self,
        Parameters(params): Parameters<AnalyzeReadabilityParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "analyze_readability",
            strip_md = params.strip_markdown,
            "executing MCP tool"
        );
        self.check_input(&params.text)?;

        let text = if params.strip_markdown {
            document::strip_markdown(&params.text)
        } else {
            params.text
        };
        let gate = ReadabilityGate {
            max_grade: params.max_grade,
            min_reading_ease: params.min_reading_ease,
        };
        let report = readability::check_readability(&text, &gate);
        let json = to_json(&report)?;

        tracing::info!(
            tool = "analyze_readability",
            ease = report.report.flesch_reading_ease,
            passed = report.passed(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Name the reading level for a score.
    #[tool(description = "Map a Flesch Reading Ease score to its reading level label.")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn reading_level(
        &self,
        Parameters(params): Parameters<ReadingLevelParams>,
    ) -> Result<CallToolResult, McpError> {
        if !params.score.is_finite() {
            return Err(McpError::invalid_params(
                "score must be a finite number",
                None,
            ));
        }
        let level = ReadingLevel::from_score(params.score);
        Ok(CallToolResult::success(vec![Content::text(level.label())]))
    }

    /// Build a chat completion request that simplifies text.
    #[tool(
        description = "Build the chat completion request that rewrites text for a simpler reading level (1 basic, 2 intermediate, 3 advanced)."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn build_simplify_request(
        &self,
        Parameters(params): Parameters<BuildSimplifyRequestParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_input(&params.text)?;

        let level = match params.level {
            Some(ref raw) => raw
                .parse::<SimplificationLevel>()
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?,
            None => self.default_level,
        };
        let request = SimplifyRequest::new(params.text, level)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let json = to_json(&ChatRequest::simplify(&request, &self.model))?;

        tracing::info!(tool = "build_simplify_request", %level, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ReadablyServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use tools to score readability of educational text and build simplification requests.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    #[test]
    fn server_info_has_correct_name() {
        let server = ReadablyServer::default();
        let info = ServerHandler::get_info(&server);

        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn server_has_tools_capability() {
        let server = ReadablyServer::default();
        let info = ServerHandler::get_info(&server);

        assert!(info.capabilities.tools.is_some());
    }

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let server = ReadablyServer::default();
        let params = Parameters(GetInfoParams {
            format: "json".to_string(),
        });

        let result = server.get_info(params).expect("get_info should succeed");
        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value =
            serde_json::from_str(text).expect("output should be valid JSON");

        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn analyze_readability_tool_works() {
        let server = ReadablyServer::default();
        let params = Parameters(AnalyzeReadabilityParams {
            text: "The cat sat on the mat. The dog ran fast.".to_string(),
            strip_markdown: false,
            max_grade: Some(8.0),
            min_reading_ease: None,
        });

        let result = server
            .analyze_readability(params)
            .expect("analyze_readability should succeed");
        assert!(!result.is_error.unwrap_or(false));

        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");
        assert_eq!(json["word_count"], 10);
        assert_eq!(json["sentence_count"], 2);
        assert_eq!(json["level"], "Very Easy");
        assert_eq!(json["over_max_grade"], false);
    }

    #[test]
    fn analyze_readability_strips_markdown() {
        let server = ReadablyServer::default();
        let params = Parameters(AnalyzeReadabilityParams {
            text: "# Title\n\nThe **cat** sat.\n\n```\nlet x = 1;\n```\n".to_string(),
            strip_markdown: true,
            max_grade: None,
            min_reading_ease: None,
        });

        let result = server
            .analyze_readability(params)
            .expect("analyze_readability should succeed");
        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");
        assert_eq!(json["word_count"], 3);
    }

    #[test]
    fn analyze_readability_rejects_oversized_input() {
        let server = ReadablyServer::new(Some(4), SimplificationLevel::default(), "m".into());
        let params = Parameters(AnalyzeReadabilityParams {
            text: "Too long for the limit.".to_string(),
            strip_markdown: false,
            max_grade: None,
            min_reading_ease: None,
        });

        assert!(server.analyze_readability(params).is_err());
    }

    #[test]
    fn reading_level_tool_names_band() {
        let server = ReadablyServer::default();
        let result = server
            .reading_level(Parameters(ReadingLevelParams { score: 65.0 }))
            .expect("reading_level should succeed");

        assert_eq!(extract_text(&result), Some("Standard"));
    }

    #[test]
    fn build_simplify_request_uses_level() {
        let server = ReadablyServer::default();
        let params = Parameters(BuildSimplifyRequestParams {
            text: "Photosynthesis converts light into chemical energy.".to_string(),
            level: Some("basic".to_string()),
        });

        let result = server
            .build_simplify_request(params)
            .expect("build_simplify_request should succeed");
        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");

        assert_eq!(json["model"], readably_core::assist::DEFAULT_MODEL);
        let system = json["messages"][0]["content"].as_str().expect("system prompt");
        assert!(system.contains("elementary school"));
    }

    #[test]
    fn build_simplify_request_rejects_unknown_level() {
        let server = ReadablyServer::default();
        let params = Parameters(BuildSimplifyRequestParams {
            text: "Some text.".to_string(),
            level: Some("7".to_string()),
        });

        assert!(server.build_simplify_request(params).is_err());
    }

    #[test]
    fn build_simplify_request_rejects_empty_text() {
        let server = ReadablyServer::default();
        let params = Parameters(BuildSimplifyRequestParams {
            text: "   ".to_string(),
            level: None,
        });

        assert!(server.build_simplify_request(params).is_err());
    }
}
