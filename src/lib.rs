//! # SoF Agent
//!
//! Statement-of-Fact laytime intelligence with AI-powered event extraction.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (port events, laytime records, currencies)
//! - **agents**: AI-powered extraction, summarization and assistant agents
//! - **document**: Document-to-text adapter (TXT, DOCX, PDF, data URIs)
//! - **api**: REST API endpoints
//! - **calculate**: Deterministic laytime and demurrage computation
//! - **config**: Configuration loading and validation

pub mod agents;
pub mod api;
pub mod calculate;
pub mod config;
pub mod document;
pub mod models;

pub use models::*;
