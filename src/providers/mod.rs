//! Concrete providers behind the core abstractions

pub mod fixed_rate;
pub mod http_assets;

pub use fixed_rate::FixedRateProvider;
pub use http_assets::HttpAssetFetcher;
