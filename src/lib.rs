//! Nutrilog Library
//!
//! Food diary storage plus the aggregation and percent-of-target engine.

pub mod build_info;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
