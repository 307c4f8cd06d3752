//! Spatial primitives for compositing
//!
//! This module contains spatial-related functionality including:
//! - Rectangle intersection and overlap testing
//! - Composite grid slot storage
//! - The tile value contract

/// Rectangle geometry for overlap resolution
pub mod geometry;
/// Composite grid storage and world-to-grid mapping
pub mod grid;
/// Tile value contract and primitive implementations
pub mod tiles;

pub use geometry::Rect;
pub use grid::CompositeGrid;
pub use tiles::Tile;
