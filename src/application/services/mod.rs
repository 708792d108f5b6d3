//! Application services - Use case implementations
//!
//! Each service accepts its port dependencies at construction and works on
//! domain aggregates, leaving transport concerns to the infrastructure.

pub mod account_service;
pub mod game_service;
pub mod generation_service;
pub mod leaderboard_service;
pub mod llm;
pub mod persistence_service;

pub use account_service::{AccountError, AccountService};
pub use game_service::{GameService, PacingConfig};
pub use generation_service::DragonGenerationService;
pub use leaderboard_service::{LeaderboardEntry, LeaderboardService};
pub use persistence_service::PersistenceQueue;
