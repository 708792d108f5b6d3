//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: SQLite and in-memory account stores
//! - HTTP: REST API routes
//! - Ollama: LLM integration for dragon generation
//! - Config: Application configuration
//! - State: Shared application state
//! - Session: Logged-in player sessions

pub mod config;
pub mod http;
pub mod ollama;
pub mod persistence;
pub mod session;
pub mod state;
