//! Tests for composite grid slot storage and offset mapping

#[cfg(test)]
mod tests {
    use tilestack::collection::registry::{ProviderId, Registry};
    use tilestack::provider::TileProvider;
    use tilestack::spatial::geometry::Rect;
    use tilestack::spatial::grid::{CompositeGrid, TileRef};

    fn mint_ids(count: usize) -> Vec<ProviderId> {
        let mut registry: Registry<u8> = Registry::new();
        (0..count)
            .map(|i| {
                let provider = TileProvider::new(format!("p{i}"), Rect::new(0, 0, 1, 1), 0);
                registry.insert(i, Box::new(provider))
            })
            .collect()
    }

    fn tile_ref(provider: ProviderId, local_x: usize, local_y: usize) -> TileRef {
        TileRef {
            provider,
            local_x,
            local_y,
        }
    }

    // Tests a new grid starts fully vacant
    // Verified by initializing slots with a placeholder reference
    #[test]
    fn test_new_grid_is_vacant() {
        let grid = CompositeGrid::new(4, 3, 0, 0);

        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.occupied(), 0);
        assert!(grid.slot(0, 0).is_none());
        assert!(grid.slot(3, 2).is_none());
    }

    // Tests world coordinates map through the offset
    // Verified by subtracting the offset instead of adding it
    #[test]
    fn test_assign_world_applies_offset() {
        let ids = mint_ids(1);
        let mut grid = CompositeGrid::new(5, 5, 2, 1);

        grid.assign_world(0, 0, tile_ref(ids[0], 3, 4));

        assert_eq!(grid.slot(2, 1), Some(tile_ref(ids[0], 3, 4)));
        assert!(grid.slot(0, 0).is_none());
        assert_eq!(grid.world_bounds(), Rect::new(-2, -1, 5, 5));
        assert_eq!(grid.offset_x(), 2);
        assert_eq!(grid.offset_y(), 1);
    }

    // Tests writes outside the grid are dropped silently
    // Verified by removing the bounds check in index
    #[test]
    fn test_assign_world_outside_grid_is_ignored() {
        let ids = mint_ids(1);
        let mut grid = CompositeGrid::new(2, 2, 0, 0);

        grid.assign_world(-1, 0, tile_ref(ids[0], 0, 0));
        grid.assign_world(0, 2, tile_ref(ids[0], 0, 0));
        grid.assign_world(5, 5, tile_ref(ids[0], 0, 0));

        assert_eq!(grid.occupied(), 0);
        assert!(!grid.contains(-1, 0));
        assert!(!grid.contains(2, 0));
        assert!(grid.contains(1, 1));
    }

    // Tests release only clears slots owned by the given provider
    // Verified by clearing every slot in the region regardless of owner
    #[test]
    fn test_release_only_clears_matching_provider() {
        let ids = mint_ids(2);
        let mut grid = CompositeGrid::new(4, 1, 0, 0);

        grid.assign_world(0, 0, tile_ref(ids[0], 0, 0));
        grid.assign_world(1, 0, tile_ref(ids[0], 1, 0));
        grid.assign_world(2, 0, tile_ref(ids[1], 0, 0));
        grid.assign_world(3, 0, tile_ref(ids[0], 3, 0));

        let released = grid.release(ids[0], Rect::new(0, 0, 3, 1));

        assert_eq!(released, 2);
        assert!(grid.slot(0, 0).is_none());
        assert!(grid.slot(1, 0).is_none());
        assert_eq!(grid.slot(2, 0), Some(tile_ref(ids[1], 0, 0)));
        assert_eq!(grid.slot(3, 0), Some(tile_ref(ids[0], 3, 0)));
    }

    // Tests release of a region disjoint from the grid is a no-op
    // Verified by skipping the early intersection check
    #[test]
    fn test_release_outside_grid() {
        let ids = mint_ids(1);
        let mut grid = CompositeGrid::new(2, 2, 0, 0);
        grid.assign_world(0, 0, tile_ref(ids[0], 0, 0));

        assert_eq!(grid.release(ids[0], Rect::new(10, 10, 3, 3)), 0);
        assert_eq!(grid.occupied(), 1);
    }

    // Tests extreme offsets saturate instead of overflowing
    // Verified by negating the offset directly in world_bounds
    #[test]
    fn test_extreme_offset_saturates() {
        let ids = mint_ids(1);
        let mut grid = CompositeGrid::new(4, 4, i32::MIN, i32::MAX);

        assert_eq!(grid.world_bounds(), Rect::new(i32::MAX, -i32::MAX, 4, 4));

        grid.assign_world(i32::MAX, 0, tile_ref(ids[0], 0, 0));
        grid.assign_world(0, i32::MIN, tile_ref(ids[0], 0, 0));
        assert_eq!(grid.occupied(), 0);
        assert_eq!(grid.release(ids[0], Rect::new(i32::MAX - 1, 0, 8, 8)), 0);
    }
}
