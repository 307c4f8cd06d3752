//! Layered tile-provider compositing onto a fixed world grid
//!
//! Named rectangular providers are stacked by layer and composited into a
//! composite grid. Adding, removing, moving, hiding, or reordering a provider
//! recomposes only the region it touches, and reads of uncovered positions
//! fall back to a void tile.

#![forbid(unsafe_code)]

/// Provider collection, registry, and recomposition
pub mod collection;
/// Input/output operations and error handling
pub mod io;
/// Provider capability trait and the stock array-backed provider
pub mod provider;
/// Rectangle geometry, composite grid storage, and the tile contract
pub mod spatial;

pub use collection::ProviderCollection;
pub use io::error::{CompositeError, Result};
pub use provider::{Provider, TileProvider};
pub use spatial::{Rect, Tile};
