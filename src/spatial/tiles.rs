//! Tile value contract shared by providers and the composite grid
//!
//! The compositing engine never inspects tile payloads. It only needs to clone
//! them for reads, merge new values into provider-owned slots, and produce a
//! sentinel for positions no provider covers.

/// A single grid cell payload
pub trait Tile: Clone + Send + Sync + 'static {
    /// Sentinel returned for positions outside every enabled provider
    fn void() -> Self;

    /// Merge `source` into this tile in place
    ///
    /// Used by indexed grid writes, which update the provider-owned tile a
    /// slot points at rather than replacing the slot.
    fn copy_from(&mut self, source: &Self) {
        self.clone_from(source);
    }
}

// Signed tiles use -1 as the void type id; unsigned tiles use their all-ones value
macro_rules! impl_tile {
    ($($ty:ty => $void:expr),* $(,)?) => {
        $(
            impl Tile for $ty {
                fn void() -> Self {
                    $void
                }
            }
        )*
    };
}

impl_tile!(
    i8 => -1,
    i16 => -1,
    i32 => -1,
    i64 => -1,
    isize => -1,
    u8 => u8::MAX,
    u16 => u16::MAX,
    u32 => u32::MAX,
    u64 => u64::MAX,
    usize => usize::MAX,
);
