//! Composite grid storage with world-to-grid offset mapping
//!
//! The grid is a fixed-size row-major arena of slots. A slot never owns a
//! tile; it names the provider handle and provider-local coordinate whose tile
//! currently shows through. Resolving the reference is left to the collection,
//! which owns the providers.

use ndarray::Array2;

use crate::collection::registry::ProviderId;
use crate::spatial::geometry::{Rect, intersect, is_intersecting};

/// Reference from a grid slot to a tile owned by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRef {
    /// Handle of the owning provider
    pub provider: ProviderId,
    /// Column inside the provider's local tile storage
    pub local_x: usize,
    /// Row inside the provider's local tile storage
    pub local_y: usize,
}

/// Fixed-size composite grid
///
/// Grid indices relate to world coordinates through the offset:
/// `grid = world + offset`. Dimensions never change after construction.
#[derive(Debug, Clone)]
pub struct CompositeGrid {
    /// Slot references (indexed by `row`, `col`)
    slots: Array2<Option<TileRef>>,
    /// World-to-grid offset (`x`, `y`)
    offset: [i32; 2],
}

impl CompositeGrid {
    /// Create a grid with every slot vacant
    pub fn new(width: usize, height: usize, offset_x: i32, offset_y: i32) -> Self {
        Self {
            slots: Array2::from_elem((height, width), None),
            offset: [offset_x, offset_y],
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.slots.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.slots.nrows()
    }

    /// Horizontal world-to-grid offset
    pub const fn offset_x(&self) -> i32 {
        self.offset[0]
    }

    /// Vertical world-to-grid offset
    pub const fn offset_y(&self) -> i32 {
        self.offset[1]
    }

    /// The world-space rectangle the grid covers
    ///
    /// Offsets and sizes beyond the `i32` range saturate.
    pub fn world_bounds(&self) -> Rect {
        Rect::new(
            self.offset[0].saturating_neg(),
            self.offset[1].saturating_neg(),
            i32::try_from(self.width()).unwrap_or(i32::MAX),
            i32::try_from(self.height()).unwrap_or(i32::MAX),
        )
    }

    /// Check if a grid index lies inside the grid
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Slot reference at a grid index
    ///
    /// Returns `None` for out-of-bounds indices as well as vacant slots.
    pub fn slot(&self, x: i32, y: i32) -> Option<TileRef> {
        self.index(x, y)
            .and_then(|index| self.slots.get(index).copied().flatten())
    }

    /// Point the slot under a world coordinate at a provider tile
    ///
    /// World coordinates falling outside the grid are ignored.
    pub fn assign_world(&mut self, world_x: i32, world_y: i32, tile: TileRef) {
        if let Some(index) = self.world_index(world_x, world_y)
            && let Some(slot) = self.slots.get_mut(index)
        {
            *slot = Some(tile);
        }
    }

    /// Vacate every slot inside a world region that references `provider`
    ///
    /// Returns the number of slots released.
    pub fn release(&mut self, provider: ProviderId, region: Rect) -> usize {
        let bounds = self.world_bounds();
        if !is_intersecting(&bounds, &region) {
            return 0;
        }
        let area = intersect(&bounds, &region);

        let mut released = 0;
        for world_y in area.y..area.bottom() {
            for world_x in area.x..area.right() {
                let Some(index) = self.world_index(world_x, world_y) else {
                    continue;
                };
                if let Some(slot) = self.slots.get_mut(index)
                    && slot.is_some_and(|tile| tile.provider == provider)
                {
                    *slot = None;
                    released += 1;
                }
            }
        }
        released
    }

    /// Count of slots currently referencing any provider
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    fn world_index(&self, world_x: i32, world_y: i32) -> Option<[usize; 2]> {
        let x = world_x.checked_add(self.offset[0])?;
        let y = world_y.checked_add(self.offset[1])?;
        self.index(x, y)
    }

    fn index(&self, x: i32, y: i32) -> Option<[usize; 2]> {
        if x < 0 || y < 0 {
            return None;
        }
        let (col, row) = (x as usize, y as usize);
        (row < self.height() && col < self.width()).then_some([row, col])
    }
}
