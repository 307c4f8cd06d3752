//! Provider collection with incremental recomposition
//!
//! The collection owns the composite grid and the provider registry behind a
//! single lock. Structural operations (add, remove, move, enable, reorder)
//! recompose only the rectangles they disturb: the affected region is walked
//! once per intersecting provider in ascending layer order, so the highest
//! enabled provider covering a slot is the one it ends up referencing.
//!
//! Grid reads and writes take the same lock. A read therefore always sees a
//! slot referencing a live provider or a vacant slot, never a half-applied
//! structural change.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

use ndarray::Array2;

use crate::collection::registry::{ProviderId, Registry};
use crate::io::error::{CompositeError, Result};
use crate::provider::contract::{Attachment, Provider, ProviderInfo};
use crate::spatial::geometry::{Rect, intersect, is_intersecting};
use crate::spatial::grid::{CompositeGrid, TileRef};
use crate::spatial::tiles::Tile;

/// Everything guarded by the collection lock
struct CollectionState<T: Tile> {
    registry: Registry<T>,
    grid: CompositeGrid,
}

impl<T: Tile> CollectionState<T> {
    /// Provider tile referenced by the slot at a grid index
    fn resolve(&self, x: i32, y: i32) -> Option<&T> {
        let tile = self.grid.slot(x, y)?;
        self.registry
            .get(tile.provider)?
            .tile(tile.local_x, tile.local_y)
    }

    /// Point every slot of `region` at the topmost enabled provider covering it
    ///
    /// `region` is in world coordinates and is clipped to the grid. Slots no
    /// enabled provider covers keep their previous reference.
    fn update_tiles(&mut self, region: Rect) -> usize {
        let bounds = self.grid.world_bounds();
        if !is_intersecting(&bounds, &region) {
            return 0;
        }
        let region = intersect(&bounds, &region);

        let mut written = 0;
        for (id, provider) in self.registry.iter() {
            if !provider.is_enabled() {
                continue;
            }
            let provider_bounds = provider.bounds();
            if !is_intersecting(&provider_bounds, &region) {
                continue;
            }
            let area = intersect(&provider_bounds, &region);

            for world_y in area.y..area.bottom() {
                for world_x in area.x..area.right() {
                    self.grid.assign_world(
                        world_x,
                        world_y,
                        TileRef {
                            provider: id,
                            local_x: world_x.abs_diff(provider_bounds.x) as usize,
                            local_y: world_y.abs_diff(provider_bounds.y) as usize,
                        },
                    );
                }
            }
            written += area.area();
        }

        log::trace!(
            "recomposed region ({}, {}, {}x{}): {written} slot writes",
            region.x,
            region.y,
            region.width,
            region.height
        );
        written
    }

    /// Check name uniqueness and run the provider's `attach` hook
    ///
    /// Returns the draw-order position the provider should take.
    fn admit(&self, provider: &mut dyn Provider<T>) -> Result<usize> {
        if self.registry.find(provider.name()).is_some() {
            return Err(CompositeError::DuplicateName {
                name: provider.name().to_string(),
            });
        }

        let index = self.registry.insertion_index(provider.layer());
        provider.attach(Attachment {
            index,
            grid_bounds: self.grid.world_bounds(),
        })?;
        Ok(index)
    }

    /// Insert an admitted provider, then composite and publish it
    fn place(&mut self, index: usize, provider: Box<dyn Provider<T>>) -> ProviderId {
        let name = provider.name().to_string();
        let layer = provider.layer();
        let id = self.registry.insert(index, provider);

        if let Some(provider) = self.registry.get_mut(id) {
            provider.apply();
        }
        let bounds = self.bounds_of(id);
        self.update_tiles(bounds);
        if let Some(provider) = self.registry.get_mut(id) {
            provider.draw(true);
        }

        log::debug!("added provider '{name}' at index {index} (layer {layer})");
        id
    }

    fn insert(&mut self, mut provider: Box<dyn Provider<T>>) -> Result<ProviderId> {
        let index = self.admit(provider.as_mut())?;
        Ok(self.place(index, provider))
    }

    /// Take a provider out of the registry and recompose what it covered
    fn detach(&mut self, name: &str) -> Option<Box<dyn Provider<T>>> {
        let id = self.registry.find(name)?;
        let provider = self.registry.remove(id)?;
        self.update_tiles(provider.bounds());
        Some(provider)
    }

    fn remove(&mut self, name: &str) -> bool {
        let Some(mut provider) = self.detach(name) else {
            return false;
        };
        provider.draw(true);
        provider.dispose();
        log::debug!("removed provider '{name}'");
        true
    }

    /// Apply a geometry change and recompose both the old and new footprint
    fn reshape(
        &mut self,
        id: ProviderId,
        change: impl FnOnce(&mut (dyn Provider<T> + 'static)),
    ) {
        let old = self.bounds_of(id);
        self.grid.release(id, old);

        if let Some(provider) = self.registry.get_mut(id) {
            change(provider);
        }

        let new = self.bounds_of(id);
        self.update_tiles(old);
        self.update_tiles(new);

        if let Some(provider) = self.registry.get_mut(id) {
            provider.draw(true);
        }
    }

    fn names(&self) -> Vec<String> {
        self.registry
            .iter()
            .map(|(_, provider)| provider.name().to_string())
            .collect()
    }

    fn bounds_of(&self, id: ProviderId) -> Rect {
        self.registry
            .get(id)
            .map(|provider| provider.bounds())
            .unwrap_or_default()
    }
}

/// Ordered stack of tile providers composited onto a fixed grid
///
/// Providers are kept sorted by layer (stable for equal layers) and drawn in
/// that order. Every operation acquires the collection lock for its whole
/// duration, including single-slot [`get`](Self::get) and
/// [`set`](Self::set).
pub struct ProviderCollection<T: Tile> {
    state: Mutex<CollectionState<T>>,
    void_tile: T,
    width: usize,
    height: usize,
    offset: [i32; 2],
}

impl<T: Tile> ProviderCollection<T> {
    /// Create an empty collection
    ///
    /// `offset_x`/`offset_y` map world coordinates to grid indices
    /// (`grid = world + offset`). Without an explicit void tile,
    /// [`Tile::void`] is used.
    pub fn new(
        width: usize,
        height: usize,
        offset_x: i32,
        offset_y: i32,
        void_tile: Option<T>,
    ) -> Self {
        Self {
            state: Mutex::new(CollectionState {
                registry: Registry::new(),
                grid: CompositeGrid::new(width, height, offset_x, offset_y),
            }),
            void_tile: void_tile.unwrap_or_else(T::void),
            width,
            height,
            offset: [offset_x, offset_y],
        }
    }

    /// World width visible through the grid
    pub const fn width(&self) -> usize {
        self.width
    }

    /// World height visible through the grid
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Horizontal world-to-grid offset
    pub const fn offset_x(&self) -> i32 {
        self.offset[0]
    }

    /// Vertical world-to-grid offset
    pub const fn offset_y(&self) -> i32 {
        self.offset[1]
    }

    /// Tile shown wherever no provider does
    pub const fn void_tile(&self) -> &T {
        &self.void_tile
    }

    /// Composite tile at a grid index
    ///
    /// Out-of-bounds, never-covered, and removed-provider positions all read
    /// as the void tile.
    pub fn get(&self, x: i32, y: i32) -> T {
        self.lock()
            .resolve(x, y)
            .cloned()
            .unwrap_or_else(|| self.void_tile.clone())
    }

    /// Merge a value into the provider tile a grid slot references
    ///
    /// The owning provider's storage is updated in place; no recomposition
    /// happens.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The index lies outside the grid
    /// - The slot references no live provider tile
    pub fn set(&self, x: i32, y: i32, value: &T) -> Result<()> {
        let mut state = self.lock();
        if !state.grid.contains(x, y) {
            return Err(CompositeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        let tile = state
            .grid
            .slot(x, y)
            .ok_or(CompositeError::VacantSlot { x, y })?;
        let target = state
            .registry
            .get_mut(tile.provider)
            .and_then(|provider| provider.tile_mut(tile.local_x, tile.local_y))
            .ok_or(CompositeError::VacantSlot { x, y })?;
        target.copy_from(value);
        Ok(())
    }

    /// Number of attached providers
    pub fn len(&self) -> usize {
        self.lock().registry.len()
    }

    /// Test if no providers are attached
    pub fn is_empty(&self) -> bool {
        self.lock().registry.is_empty()
    }

    /// Check if a provider with the given name is attached
    pub fn contains(&self, name: &str) -> bool {
        self.lock().registry.find(name).is_some()
    }

    /// Snapshot of a named provider
    pub fn provider(&self, name: &str) -> Option<ProviderInfo> {
        let state = self.lock();
        let id = state.registry.find(name)?;
        let index = state.registry.position(id)?;
        state
            .registry
            .get(id)
            .map(|provider| ProviderInfo::capture(provider, index))
    }

    /// Run a closure against a named provider
    pub fn with_provider<R>(
        &self,
        name: &str,
        f: impl FnOnce(&dyn Provider<T>) -> R,
    ) -> Option<R> {
        let state = self.lock();
        let id = state.registry.find(name)?;
        state.registry.get(id).map(f)
    }

    /// Run a closure against a named provider with mutable access
    ///
    /// Intended for editing local tiles; follow with
    /// [`update_tiles`](Self::update_tiles) over the edited region. Position,
    /// size, and visibility must go through [`move_provider`](Self::move_provider),
    /// [`set_bounds`](Self::set_bounds) and [`set_enabled`](Self::set_enabled)
    /// so the grid stays consistent.
    pub fn with_provider_mut<R>(
        &self,
        name: &str,
        f: impl FnOnce(&mut (dyn Provider<T> + 'static)) -> R,
    ) -> Option<R> {
        let mut state = self.lock();
        let id = state.registry.find(name)?;
        state.registry.get_mut(id).map(f)
    }

    /// Provider names in draw order
    pub fn names(&self) -> Vec<String> {
        self.lock().names()
    }

    /// Lock the collection and iterate its providers in draw order
    ///
    /// Every other operation blocks until the returned guard is dropped.
    pub fn providers(&self) -> Providers<'_, T> {
        Providers { state: self.lock() }
    }

    /// Attach a provider
    ///
    /// The provider is inserted after every provider with an equal or lower
    /// layer, composited over its bounds, and asked to draw.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A provider with the same name is already attached
    /// - The provider's `attach` hook rejects the collection
    pub fn add<P: Provider<T> + 'static>(&self, provider: P) -> Result<()> {
        self.add_boxed(Box::new(provider))
    }

    /// Attach an already boxed provider
    ///
    /// # Errors
    ///
    /// Same conditions as [`add`](Self::add).
    pub fn add_boxed(&self, provider: Box<dyn Provider<T>>) -> Result<()> {
        self.lock().insert(provider).map(|_| ())
    }

    /// Detach, recompose under, and dispose a provider
    ///
    /// Returns `false` when no provider has that name.
    pub fn remove(&self, name: &str) -> bool {
        self.lock().remove(name)
    }

    /// Remove every provider except the one named `except`
    pub fn clear(&self, except: Option<&str>) {
        let mut state = self.lock();
        for name in state.names() {
            if Some(name.as_str()) != except {
                state.remove(&name);
            }
        }
    }

    /// Re-insert a provider through the sorted insert path
    ///
    /// The provider moves behind every other provider sharing its layer. It
    /// does not rise above providers with a higher layer. Returns `false`
    /// when no provider has that name, or when its `attach` hook refuses
    /// re-insertion, in which case it is disposed.
    pub fn set_top(&self, name: &str) -> bool {
        let mut state = self.lock();
        let Some(mut provider) = state.detach(name) else {
            return false;
        };
        match state.admit(provider.as_mut()) {
            Ok(index) => {
                state.place(index, provider);
                true
            }
            Err(err) => {
                log::warn!("provider '{name}' could not be re-inserted: {err}");
                provider.dispose();
                false
            }
        }
    }

    /// Move a provider's top-left corner to a new world position
    ///
    /// Returns `false` when no provider has that name.
    pub fn move_provider(&self, name: &str, x: i32, y: i32) -> bool {
        let mut state = self.lock();
        let Some(id) = state.registry.find(name) else {
            return false;
        };
        state.reshape(id, |provider| provider.set_position(x, y));
        log::debug!("moved provider '{name}' to ({x}, {y})");
        true
    }

    /// Reposition and resize a provider
    ///
    /// Negative sizes are treated as zero. Returns `false` when no provider
    /// has that name.
    pub fn set_bounds(&self, name: &str, bounds: Rect) -> bool {
        let mut state = self.lock();
        let Some(id) = state.registry.find(name) else {
            return false;
        };
        state.reshape(id, |provider| {
            provider.set_position(bounds.x, bounds.y);
            provider.resize(bounds.width.max(0) as usize, bounds.height.max(0) as usize);
        });
        log::debug!(
            "provider '{name}' bounds set to ({}, {}, {}x{})",
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height
        );
        true
    }

    /// Show or hide a provider
    ///
    /// Hiding vacates the provider's slots before recomposing, so whatever
    /// lies beneath shows through. Returns `false` when no provider has that
    /// name.
    pub fn set_enabled(&self, name: &str, enabled: bool) -> bool {
        let mut state = self.lock();
        let Some(id) = state.registry.find(name) else {
            return false;
        };
        state.reshape(id, |provider| provider.set_enabled(enabled));
        log::debug!("provider '{name}' enabled: {enabled}");
        true
    }

    /// Recompose a world-space region from the enabled providers
    ///
    /// Call after editing provider tiles or the world beneath them. Slots
    /// covered by no enabled provider are left untouched.
    pub fn update_tiles(&self, region: Rect) {
        self.lock().update_tiles(region);
    }

    /// Resolve the whole grid under a single lock acquisition
    ///
    /// The array is indexed by `row`, `col`.
    pub fn snapshot(&self) -> Array2<T> {
        let state = self.lock();
        Array2::from_shape_fn((self.height, self.width), |(row, col)| {
            state
                .resolve(col as i32, row as i32)
                .cloned()
                .unwrap_or_else(|| self.void_tile.clone())
        })
    }

    fn lock(&self) -> MutexGuard<'_, CollectionState<T>> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Tile> Drop for ProviderCollection<T> {
    fn drop(&mut self) {
        let state = self
            .state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        for mut provider in state.registry.drain() {
            provider.dispose();
        }
    }
}

impl<T: Tile> fmt::Debug for ProviderCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never block here: the caller may already hold a `Providers` guard
        let names = match self.state.try_lock() {
            Ok(state) => Some(state.names()),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner().names()),
            Err(TryLockError::WouldBlock) => None,
        };

        let mut debug = f.debug_struct("ProviderCollection");
        debug
            .field("width", &self.width)
            .field("height", &self.height)
            .field("offset", &self.offset);
        match names {
            Some(names) => debug.field("providers", &names),
            None => debug.field("providers", &format_args!("<locked>")),
        };
        debug.finish()
    }
}

/// Locked view over a collection's providers
pub struct Providers<'a, T: Tile> {
    state: MutexGuard<'a, CollectionState<T>>,
}

impl<T: Tile> Providers<'_, T> {
    /// Iterate providers in draw order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Provider<T>> + '_ {
        self.state.registry.iter().map(|(_, provider)| provider)
    }

    /// Number of attached providers
    pub fn len(&self) -> usize {
        self.state.registry.len()
    }

    /// Test if no providers are attached
    pub fn is_empty(&self) -> bool {
        self.state.registry.is_empty()
    }
}
