//! Tests for the tile value contract and primitive implementations

#[cfg(test)]
mod tests {
    use tilestack::spatial::tiles::Tile;

    // Tests signed tiles use -1 as the void value
    // Verified by defaulting void to zero
    #[test]
    fn test_signed_void_is_negative_one() {
        assert_eq!(<i32 as Tile>::void(), -1);
        assert_eq!(<i16 as Tile>::void(), -1);
        assert_eq!(<i64 as Tile>::void(), -1);
    }

    // Tests unsigned tiles use their maximum as the void value
    // Verified by defaulting void to zero
    #[test]
    fn test_unsigned_void_is_max() {
        assert_eq!(<u8 as Tile>::void(), u8::MAX);
        assert_eq!(<u32 as Tile>::void(), u32::MAX);
        assert_eq!(<usize as Tile>::void(), usize::MAX);
    }

    // Tests the default merge replaces the value in place
    // Verified by making copy_from a no-op
    #[test]
    fn test_copy_from_overwrites_value() {
        let mut tile: u16 = 3;
        tile.copy_from(&9);
        assert_eq!(tile, 9);
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Painted {
        kind: u8,
        paint: u8,
    }

    impl Tile for Painted {
        fn void() -> Self {
            Self { kind: 0, paint: 0 }
        }

        // Merging keeps the kind and only takes the paint
        fn copy_from(&mut self, source: &Self) {
            self.paint = source.paint;
        }
    }

    // Tests custom tiles can override the merge operation
    // Verified by removing the override so the default clone is used
    #[test]
    fn test_custom_copy_from_is_respected() {
        let mut tile = Painted { kind: 4, paint: 1 };
        tile.copy_from(&Painted { kind: 9, paint: 7 });

        assert_eq!(tile, Painted { kind: 4, paint: 7 });
        assert_eq!(Painted::void(), Painted { kind: 0, paint: 0 });
    }
}
