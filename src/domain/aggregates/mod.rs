//! Aggregates - Cluster of domain objects treated as a single unit

pub mod player_account;

pub use player_account::{AccountSnapshot, PlayerAccount, STARTING_CURRENCY};
