//! Depth-ordered provider registry backed by a generational arena
//!
//! Providers live in arena slots and are named by [`ProviderId`] handles; the
//! draw order is a separate list of handles kept sorted by layer. Removing a
//! provider bumps its slot generation, so handles still held by grid slots go
//! stale instead of aliasing whichever provider reuses the slot.

use crate::provider::contract::Provider;
use crate::spatial::tiles::Tile;

/// Generational handle to an attached provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderId {
    index: u32,
    generation: u32,
}

impl ProviderId {
    /// Arena slot index
    pub const fn index(&self) -> usize {
        self.index as usize
    }

    /// Slot generation at the time the handle was issued
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

struct Slot<T: Tile> {
    generation: u32,
    provider: Option<Box<dyn Provider<T>>>,
}

/// Ordered set of attached providers
///
/// Order invariant: layers are non-decreasing along [`Registry::ids`], and
/// providers sharing a layer keep their insertion order.
pub struct Registry<T: Tile> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    order: Vec<ProviderId>,
}

impl<T: Tile> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tile> Registry<T> {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Number of attached providers
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Test if no providers are attached
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Handles in draw order
    pub fn ids(&self) -> &[ProviderId] {
        &self.order
    }

    /// Position a provider with `layer` would take
    ///
    /// This is the index of the first provider whose layer is strictly
    /// greater, or the end of the registry, so equal layers stay stable.
    pub fn insertion_index(&self, layer: i32) -> usize {
        self.order
            .iter()
            .position(|&id| self.get(id).is_some_and(|provider| provider.layer() > layer))
            .unwrap_or(self.order.len())
    }

    /// Handle of the provider with the given name
    pub fn find(&self, name: &str) -> Option<ProviderId> {
        self.iter()
            .find(|(_, provider)| provider.name() == name)
            .map(|(id, _)| id)
    }

    /// Draw-order position of a handle
    pub fn position(&self, id: ProviderId) -> Option<usize> {
        self.order.iter().position(|&entry| entry == id)
    }

    /// Borrow a provider by handle
    ///
    /// Stale handles return `None`.
    pub fn get(&self, id: ProviderId) -> Option<&dyn Provider<T>> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.provider.as_deref())
    }

    /// Mutably borrow a provider by handle
    pub fn get_mut(&mut self, id: ProviderId) -> Option<&mut (dyn Provider<T> + 'static)> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.provider.as_deref_mut())
    }

    /// Insert a provider at a draw-order position
    ///
    /// Positions past the end are clamped. Name uniqueness and layer order
    /// are the caller's responsibility; see [`Registry::insertion_index`].
    pub fn insert(&mut self, index: usize, provider: Box<dyn Provider<T>>) -> ProviderId {
        let id = if let Some(reused) = self.free.pop() {
            let mut id = ProviderId {
                index: reused,
                generation: 0,
            };
            if let Some(slot) = self.slots.get_mut(id.index()) {
                slot.provider = Some(provider);
                id.generation = slot.generation;
            }
            id
        } else {
            let id = ProviderId {
                index: self.slots.len() as u32,
                generation: 0,
            };
            self.slots.push(Slot {
                generation: 0,
                provider: Some(provider),
            });
            id
        };

        self.order.insert(index.min(self.order.len()), id);
        id
    }

    /// Take a provider out of the registry
    ///
    /// The handle and every copy of it become stale.
    pub fn remove(&mut self, id: ProviderId) -> Option<Box<dyn Provider<T>>> {
        let position = self.position(id)?;
        self.order.remove(position);

        let slot = self.slots.get_mut(id.index())?;
        let provider = slot.provider.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        provider
    }

    /// Iterate providers in draw order
    pub fn iter(&self) -> impl Iterator<Item = (ProviderId, &dyn Provider<T>)> + '_ {
        self.order
            .iter()
            .filter_map(move |&id| self.get(id).map(|provider| (id, provider)))
    }

    /// Remove every provider, returning them in draw order
    pub fn drain(&mut self) -> Vec<Box<dyn Provider<T>>> {
        let ids = std::mem::take(&mut self.order);
        let mut drained = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(slot) = self.slots.get_mut(id.index())
                && let Some(provider) = slot.provider.take()
            {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
                drained.push(provider);
            }
        }
        drained
    }
}
