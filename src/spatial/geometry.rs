//! Axis-aligned rectangle arithmetic for provider overlap resolution
//!
//! Rectangles are half-open: a rectangle at `x` with `width` covers columns
//! `x..x + width`. Far edges saturate at `i32::MAX`, so a rectangle reaching
//! past the coordinate range is clipped rather than wrapping.

/// Axis-aligned rectangle in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive)
    pub x: i32,
    /// Top edge (inclusive)
    pub y: i32,
    /// Horizontal extent
    pub width: i32,
    /// Vertical extent
    pub height: i32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive), saturating at `i32::MAX`
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive), saturating at `i32::MAX`
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Whether the rectangle covers no cells
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point lies within the rectangle
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Number of cells covered, zero for empty rectangles
    pub const fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width as usize * self.height as usize
        }
    }
}

/// Compute the overlapping sub-rectangle of two rectangles
///
/// The result is only meaningful when [`is_intersecting`] holds for the same
/// pair. Disjoint inputs produce a zero or negative width or height; the
/// function does not check for this.
pub const fn intersect(first: &Rect, second: &Rect) -> Rect {
    let max_sx = if second.x > first.x {
        second.x
    } else {
        first.x
    };
    let max_sy = if second.y > first.y {
        second.y
    } else {
        first.y
    };
    let min_ex = if second.right() < first.right() {
        second.right()
    } else {
        first.right()
    };
    let min_ey = if second.bottom() < first.bottom() {
        second.bottom()
    } else {
        first.bottom()
    };

    Rect {
        x: max_sx,
        y: max_sy,
        width: min_ex.saturating_sub(max_sx),
        height: min_ey.saturating_sub(max_sy),
    }
}

/// Separating-axis overlap test
///
/// Uses strict inequalities, so rectangles that only share an edge do not
/// intersect.
pub const fn is_intersecting(first: &Rect, second: &Rect) -> bool {
    first.x < second.right()
        && second.x < first.right()
        && first.y < second.bottom()
        && second.y < first.bottom()
}
