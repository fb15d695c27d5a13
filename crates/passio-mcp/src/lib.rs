//! MCP (Model Context Protocol) server for PassioGo transit data
//!
//! This crate exposes the lookups of `passio-lib` as seven MCP tools so AI
//! assistants can ask for the routes, stops, alerts and vehicles of a
//! transit system by name.
//!
//! # Architecture
//!
//! - `types`: Tool input schemas and argument validation
//! - `tools`: Tool handlers that run lookups and serialize records
//! - `server`: rmcp service registering the tools
//! - `error`: Error types and RFC 9457 problem details
//!
//! # Transport
//!
//! The server communicates over stdio using JSON-RPC 2.0. All logging goes
//! to stderr so stdout carries protocol messages only.

pub mod error;
pub mod server;
pub mod tools;
pub mod types;

pub use error::{Error, Result};
pub use server::{PassioMcpServer, SERVER_NAME};
