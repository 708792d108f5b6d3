//! Domain services - Pure game rules operating on domain objects

pub mod breeding;
pub mod collection;
pub mod progression;
pub mod tier_resolver;
pub mod valuation;
pub mod weighted;

pub use collection::Collection;
pub use progression::ProgressionLedger;
