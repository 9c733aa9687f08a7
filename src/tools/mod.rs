//! Nutrilog Tools module
//!
//! Tool implementations behind the MCP server. Errors are returned as
//! human-readable strings.

pub mod days;
pub mod entries;
pub mod status;
pub mod targets;
