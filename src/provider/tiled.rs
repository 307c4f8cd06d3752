//! Stock provider backed by an owned tile array

use ndarray::Array2;

use crate::io::error::Result;
use crate::provider::contract::{Attachment, Provider};
use crate::spatial::geometry::Rect;
use crate::spatial::tiles::Tile;

/// Provider owning a rectangular block of tiles
///
/// Local tiles are stored row-major (indexed by `row`, `col`), so the
/// provider-local coordinate `(x, y)` lives at `[y, x]`.
#[derive(Debug, Clone)]
pub struct TileProvider<T> {
    name: String,
    position: [i32; 2],
    layer: i32,
    enabled: bool,
    tiles: Array2<T>,
    attached_index: Option<usize>,
    draw_count: usize,
}

impl<T: Tile> TileProvider<T> {
    /// Create a provider whose tiles all hold `value`
    pub fn filled(name: impl Into<String>, bounds: Rect, layer: i32, value: T) -> Self {
        let width = bounds.width.max(0) as usize;
        let height = bounds.height.max(0) as usize;
        Self::from_array(
            name,
            bounds.x,
            bounds.y,
            layer,
            Array2::from_elem((height, width), value),
        )
    }

    /// Create a provider whose tiles all hold `T::void()`
    pub fn new(name: impl Into<String>, bounds: Rect, layer: i32) -> Self {
        Self::filled(name, bounds, layer, T::void())
    }

    /// Wrap an existing tile array positioned at `(x, y)`
    pub fn from_array(
        name: impl Into<String>,
        x: i32,
        y: i32,
        layer: i32,
        tiles: Array2<T>,
    ) -> Self {
        Self {
            name: name.into(),
            position: [x, y],
            layer,
            enabled: true,
            tiles,
            attached_index: None,
            draw_count: 0,
        }
    }

    /// Start out hidden or visible
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Borrow the local tile array
    pub const fn tiles(&self) -> &Array2<T> {
        &self.tiles
    }

    /// Mutably borrow the local tile array
    ///
    /// Changes become visible in a collection after its next recomposition of
    /// the affected region.
    pub const fn tiles_mut(&mut self) -> &mut Array2<T> {
        &mut self.tiles
    }

    /// Registry position assigned at the most recent attachment
    pub const fn attached_index(&self) -> Option<usize> {
        self.attached_index
    }

    /// Number of redraw requests received
    pub const fn draw_count(&self) -> usize {
        self.draw_count
    }
}

impl<T: Tile> Provider<T> for TileProvider<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.position[0],
            self.position[1],
            i32::try_from(self.tiles.ncols()).unwrap_or(i32::MAX),
            i32::try_from(self.tiles.nrows()).unwrap_or(i32::MAX),
        )
    }

    fn layer(&self) -> i32 {
        self.layer
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn tile(&self, x: usize, y: usize) -> Option<&T> {
        self.tiles.get([y, x])
    }

    fn tile_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        self.tiles.get_mut([y, x])
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.position = [x, y];
    }

    fn resize(&mut self, width: usize, height: usize) {
        if self.tiles.dim() == (height, width) {
            return;
        }
        // Overlapping region is preserved, new cells start as void
        let mut resized = Array2::from_elem((height, width), T::void());
        let rows = height.min(self.tiles.nrows());
        let cols = width.min(self.tiles.ncols());
        for row in 0..rows {
            for col in 0..cols {
                if let (Some(target), Some(source)) =
                    (resized.get_mut([row, col]), self.tiles.get([row, col]))
                {
                    target.clone_from(source);
                }
            }
        }
        self.tiles = resized;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn attach(&mut self, attachment: Attachment) -> Result<()> {
        self.attached_index = Some(attachment.index);
        Ok(())
    }

    fn draw(&mut self, full_region: bool) {
        self.draw_count += 1;
        log::trace!(
            "provider '{}' redraw requested (full region: {full_region})",
            self.name
        );
    }

    fn dispose(&mut self) {
        self.attached_index = None;
        log::trace!("provider '{}' disposed", self.name);
    }
}
