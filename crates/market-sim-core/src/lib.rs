pub mod asset;
pub mod candle;
pub mod error;
pub mod metrics;
pub mod monitored;
pub mod overview;
pub mod precision;
pub mod rng;
pub mod series;
pub mod settings;
pub mod trades;
