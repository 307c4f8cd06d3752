//! Capability contract every tile provider implements
//!
//! A provider is a named rectangular overlay owning its own local tiles. The
//! collection drives its geometry and lifecycle through this trait; what a
//! provider does inside its hooks (materialising entities, publishing regions
//! to viewers) is its own business.

use crate::io::error::Result;
use crate::spatial::geometry::Rect;
use crate::spatial::tiles::Tile;

/// Context handed to a provider when it is attached to a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    /// Registry position the provider is about to occupy
    pub index: usize,
    /// World-space rectangle covered by the collection's grid
    pub grid_bounds: Rect,
}

/// Named, rectangular, depth-ordered tile overlay
pub trait Provider<T: Tile>: Send {
    /// Unique name within a collection
    fn name(&self) -> &str;

    /// Current world-space position and size
    fn bounds(&self) -> Rect;

    /// Depth key; higher layers overwrite lower ones
    fn layer(&self) -> i32;

    /// Whether the provider takes part in recomposition
    fn is_enabled(&self) -> bool;

    /// Tile at a provider-local coordinate
    fn tile(&self, x: usize, y: usize) -> Option<&T>;

    /// Mutable tile at a provider-local coordinate
    fn tile_mut(&mut self, x: usize, y: usize) -> Option<&mut T>;

    /// Move the top-left corner to a new world position
    fn set_position(&mut self, x: i32, y: i32);

    /// Change the local tile storage size
    fn resize(&mut self, width: usize, height: usize);

    /// Toggle participation in recomposition
    fn set_enabled(&mut self, enabled: bool);

    /// Called once before insertion into a collection
    ///
    /// # Errors
    ///
    /// Returning an error aborts the add and leaves the collection unchanged.
    fn attach(&mut self, attachment: Attachment) -> Result<()> {
        let _ = attachment;
        Ok(())
    }

    /// Called right after insertion, before the first draw
    fn apply(&mut self) {}

    /// Called after structural changes so the visible region can be republished
    ///
    /// `full_region` requests the complete bounds rather than a patch.
    fn draw(&mut self, full_region: bool) {
        let _ = full_region;
    }

    /// Called when the collection releases the provider
    fn dispose(&mut self) {}
}

/// Point-in-time description of an attached provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    /// Provider name
    pub name: String,
    /// World-space bounds
    pub bounds: Rect,
    /// Depth key
    pub layer: i32,
    /// Visibility flag
    pub enabled: bool,
    /// Position in the registry's depth order
    pub index: usize,
}

impl ProviderInfo {
    /// Capture the current state of a provider at a registry position
    pub fn capture<T: Tile>(provider: &dyn Provider<T>, index: usize) -> Self {
        Self {
            name: provider.name().to_string(),
            bounds: provider.bounds(),
            layer: provider.layer(),
            enabled: provider.is_enabled(),
            index,
        }
    }
}
