//! The system parameter cache.

pub mod cache;

pub use cache::SystemCache;
