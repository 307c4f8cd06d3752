//! Tile providers
//!
//! Providers are the overlays a collection composites: the capability trait
//! the collection drives, and a stock array-backed implementation.

/// Provider capability trait and attachment context
pub mod contract;
/// Array-backed provider implementation
pub mod tiled;

pub use contract::{Attachment, Provider, ProviderInfo};
pub use tiled::TileProvider;
