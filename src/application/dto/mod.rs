//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so the HTTP routes can
//! serialize/deserialize without shaping the domain model around JSON.

pub mod account;
pub mod catalog;

pub use account::*;
pub use catalog::*;
