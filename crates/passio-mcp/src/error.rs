//! Error types and RFC 9457-style problem details for the MCP server
//!
//! This module defines a unified error type for the MCP server that is
//! serialized as the text payload of failed tool calls, so agents receive
//! the offending input alongside a machine-readable problem type.

use std::time::Duration;

use passio_lib::Error as LibError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// MCP Server error type implementing RFC 9457 Problem Details
#[derive(Debug, Error, Serialize, Deserialize, Clone)]
#[error("{message}")]
pub struct Error {
    /// HTTP status-like code (e.g., 400, 404, 502)
    pub code: i32,

    /// Human-readable error message
    pub message: String,

    /// Machine-readable problem type URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    /// Additional error context (e.g., entity kind, query, suggestions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl Error {
    /// Create a new error with a code and message
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            r#type: None,
            context: None,
        }
    }

    /// Add a problem type URI
    pub fn with_type(mut self, type_uri: impl Into<String>) -> Self {
        self.r#type = Some(type_uri.into());
        self
    }

    /// Add context information as JSON
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    /// A name did not resolve, or a resolved id had nothing to return
    pub fn not_found(
        kind: impl Into<String>,
        query: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        let kind = kind.into();
        let query = query.into();
        let error = Self::new(404, format!("{} '{}' not found", kind, query))
            .with_type("https://passiogo.local/errors/not-found");
        if suggestions.is_empty() {
            error.with_context(json!({ "kind": kind, "query": query }))
        } else {
            error.with_context(json!({
                "kind": kind,
                "query": query,
                "suggestions": suggestions,
                "message": "Did you mean one of these?"
            }))
        }
    }

    /// The transit provider failed to answer
    pub fn upstream(reason: impl Into<String>) -> Self {
        Self::new(502, format!("Upstream transit provider error: {}", reason.into()))
            .with_type("https://passiogo.local/errors/upstream")
    }

    /// The transit provider did not answer in time
    pub fn timeout(operation: impl Into<String>, after: Duration) -> Self {
        let operation = operation.into();
        Self::new(
            504,
            format!(
                "Upstream transit provider timed out during {} after {}s",
                operation,
                after.as_secs_f64()
            ),
        )
        .with_type("https://passiogo.local/errors/upstream-timeout")
        .with_context(json!({
            "operation": operation,
            "timeout_secs": after.as_secs_f64()
        }))
    }

    /// Invalid parameter error
    pub fn invalid_param(param: impl Into<String>, reason: impl Into<String>) -> Self {
        let p = param.into();
        Self::new(400, format!("Invalid parameter: {}", p))
            .with_type("https://passiogo.local/errors/invalid-parameter")
            .with_context(json!({
                "parameter": p,
                "reason": reason.into()
            }))
    }

    /// Internal server error
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::new(500, format!("Internal server error: {}", reason.into()))
            .with_type("https://passiogo.local/errors/internal-error")
    }

    /// Serialize as the JSON text returned to the agent
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.message.clone())
    }
}

impl From<LibError> for Error {
    fn from(err: LibError) -> Self {
        match err {
            LibError::NotFound {
                kind,
                query,
                suggestions,
            } => Self::not_found(kind, query, suggestions),
            LibError::Timeout { operation, after } => Self::timeout(operation, after),
            other if other.is_upstream() => Self::upstream(other.to_string()),
            other => Self::internal(other.to_string()),
        }
    }
}
