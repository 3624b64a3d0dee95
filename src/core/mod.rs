//! Core business logic abstractions

pub mod asset;
pub mod cache;
pub mod config;
pub mod currency;
pub mod format;
pub mod log;
pub mod quote;
pub mod schedule;

// Re-export main types for cleaner imports
pub use asset::{AssetFetcher, FetchedAsset};
pub use cache::{AssetStore, CachedAsset};
pub use currency::CurrencyRateProvider;
pub use quote::{Direction, QuoteError, TransferQuote};
pub use schedule::{FeeSchedule, FeeTier};
