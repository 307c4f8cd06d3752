//! Tests for the array-backed tile provider

#[cfg(test)]
mod tests {
    use ndarray::array;
    use tilestack::provider::contract::{Attachment, Provider};
    use tilestack::provider::tiled::TileProvider;
    use tilestack::spatial::geometry::Rect;

    // Tests bounds follow position and array shape
    // Verified by swapping rows and columns in bounds
    #[test]
    fn test_bounds_from_position_and_shape() {
        let provider = TileProvider::from_array("p", -2, 3, 1, array![[1u8, 2, 3], [4, 5, 6]]);

        assert_eq!(provider.bounds(), Rect::new(-2, 3, 3, 2));
        assert_eq!(provider.layer(), 1);
        assert_eq!(provider.name(), "p");
        assert!(provider.is_enabled());
    }

    // Tests local tiles are addressed as (x, y) over row-major storage
    // Verified by indexing the array with [x, y]
    #[test]
    fn test_tile_local_addressing() {
        let mut provider = TileProvider::from_array("p", 0, 0, 0, array![[1i32, 2, 3], [4, 5, 6]]);

        assert_eq!(provider.tile(2, 0), Some(&3));
        assert_eq!(provider.tile(0, 1), Some(&4));
        assert_eq!(provider.tile(3, 0), None);
        assert_eq!(provider.tile(0, 2), None);

        if let Some(tile) = provider.tile_mut(1, 1) {
            *tile = 50;
        }
        assert_eq!(provider.tiles()[[1, 1]], 50);
    }

    // Tests new providers are filled with the void tile
    // Verified by filling with the type default instead
    #[test]
    fn test_new_fills_with_void() {
        let provider: TileProvider<u16> = TileProvider::new("v", Rect::new(0, 0, 2, 2), 0);

        assert!(provider.tiles().iter().all(|&tile| tile == u16::MAX));
    }

    // Tests negative sizes produce an empty provider
    // Verified by casting negative widths straight to usize
    #[test]
    fn test_filled_with_negative_size_is_empty() {
        let provider = TileProvider::filled("e", Rect::new(1, 1, -3, 2), 0, 7i8);

        assert_eq!(provider.bounds(), Rect::new(1, 1, 0, 2));
        assert!(provider.tiles().is_empty());
    }

    // Tests resize keeps the overlapping block and voids the rest
    // Verified by rebuilding the array without copying old tiles
    #[test]
    fn test_resize_preserves_overlap() {
        let mut provider = TileProvider::from_array("p", 0, 0, 0, array![[1i32, 2], [3, 4]]);

        provider.resize(3, 1);

        assert_eq!(provider.tiles(), &array![[1, 2, -1]]);
        assert_eq!(provider.bounds(), Rect::new(0, 0, 3, 1));
    }

    // Tests the lifecycle hooks record attachment and draws
    // Verified by leaving attached_index untouched on dispose
    #[test]
    fn test_lifecycle_hooks() {
        let mut provider = TileProvider::filled("p", Rect::new(0, 0, 1, 1), 0, 1u8);
        assert_eq!(provider.attached_index(), None);

        let attached = provider.attach(Attachment {
            index: 4,
            grid_bounds: Rect::new(0, 0, 8, 8),
        });
        assert!(attached.is_ok());
        assert_eq!(provider.attached_index(), Some(4));

        provider.draw(true);
        provider.draw(false);
        assert_eq!(provider.draw_count(), 2);

        provider.dispose();
        assert_eq!(provider.attached_index(), None);
    }

    // Tests visibility and position setters
    // Verified by ignoring with_enabled in the builder
    #[test]
    fn test_enabled_and_position() {
        let mut provider =
            TileProvider::filled("p", Rect::new(0, 0, 2, 2), 0, 1u8).with_enabled(false);
        assert!(!provider.is_enabled());

        provider.set_enabled(true);
        provider.set_position(7, -1);

        assert!(provider.is_enabled());
        assert_eq!(provider.bounds(), Rect::new(7, -1, 2, 2));
    }
}
