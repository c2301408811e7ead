#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle for render areas and hit testing.
///
/// Uses terminal coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    #[must_use]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    #[must_use]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Returns an empty rectangle at the leftmost overlap candidate when
    /// the rectangles don't overlap.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return Rect::new(x, y, 0, 0);
        }
        Rect::new(x, y, right - x, bottom - y)
    }

    /// A single row of this rectangle, or an empty rect past the bottom.
    #[must_use]
    pub fn row(&self, offset: u16) -> Rect {
        if offset >= self.height {
            return Rect::new(self.x, self.bottom(), 0, 0);
        }
        Rect::new(self.x, self.y + offset, self.width, 1)
    }

    /// Split off `rows` from the top; returns (top, rest).
    #[must_use]
    pub fn split_top(&self, rows: u16) -> (Rect, Rect) {
        let rows = rows.min(self.height);
        let top = Rect::new(self.x, self.y, self.width, rows);
        let rest = Rect::new(self.x, self.y + rows, self.width, self.height - rows);
        (top, rest)
    }

    /// Split off `rows` from the bottom; returns (rest, bottom).
    #[must_use]
    pub fn split_bottom(&self, rows: u16) -> (Rect, Rect) {
        let rows = rows.min(self.height);
        let rest = Rect::new(self.x, self.y, self.width, self.height - rows);
        let bottom = Rect::new(self.x, self.y + self.height - rows, self.width, rows);
        (rest, bottom)
    }

    /// Shrink by one cell on every side.
    #[must_use]
    pub fn inset(&self) -> Rect {
        Rect::new(
            self.x.saturating_add(1),
            self.y.saturating_add(1),
            self.width.saturating_sub(2),
            self.height.saturating_sub(2),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_edge_exclusive_on_right_and_bottom() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 3));
        assert!(!r.contains(2, 5));
    }

    #[test]
    fn intersection_of_disjoint_is_empty() {
        let a = Rect::new(0, 0, 3, 3);
        let b = Rect::new(10, 10, 3, 3);
        assert!(a.intersection(&b).is_empty());
    }

    #[test]
    fn intersection_of_overlap() {
        let a = Rect::new(0, 0, 5, 5);
        let b = Rect::new(3, 3, 5, 5);
        assert_eq!(a.intersection(&b), Rect::new(3, 3, 2, 2));
    }

    #[test]
    fn split_top_partitions_height() {
        let r = Rect::new(0, 0, 10, 8);
        let (top, rest) = r.split_top(3);
        assert_eq!(top, Rect::new(0, 0, 10, 3));
        assert_eq!(rest, Rect::new(0, 3, 10, 5));
    }

    #[test]
    fn split_bottom_partitions_height() {
        let r = Rect::new(0, 0, 10, 8);
        let (rest, bottom) = r.split_bottom(1);
        assert_eq!(rest, Rect::new(0, 0, 10, 7));
        assert_eq!(bottom, Rect::new(0, 7, 10, 1));
    }

    #[test]
    fn split_clamps_to_available_rows() {
        let r = Rect::new(0, 0, 4, 2);
        let (top, rest) = r.split_top(10);
        assert_eq!(top, r);
        assert!(rest.is_empty());
    }

    #[test]
    fn row_past_bottom_is_empty() {
        let r = Rect::new(1, 1, 5, 2);
        assert_eq!(r.row(0), Rect::new(1, 1, 5, 1));
        assert_eq!(r.row(1), Rect::new(1, 2, 5, 1));
        assert!(r.row(2).is_empty());
    }

    #[test]
    fn inset_shrinks_all_sides() {
        let r = Rect::new(0, 0, 10, 4);
        assert_eq!(r.inset(), Rect::new(1, 1, 8, 2));
        assert!(Rect::new(0, 0, 1, 1).inset().is_empty());
    }
}
