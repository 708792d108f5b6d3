//! Application layer - Use cases orchestrating the domain over outbound ports

pub mod dto;
pub mod ports;
pub mod services;
