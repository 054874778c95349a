pub mod error;
pub mod latest;
pub mod mock;
pub mod provider;
