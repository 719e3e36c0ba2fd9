use std::{fmt, num::NonZeroU32};

/// Pixel rectangle with inclusive `left`/`top` and exclusive `right`/`bottom` edges.
///
/// # Example
/// ```rust
/// use camshim_core::prelude::Rect;
///
/// let rect = Rect::new(10, 20, 110, 70);
/// assert_eq!(rect.width(), 100);
/// assert_eq!(rect.height(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Build from edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build from an origin and a size.
    ///
    /// Far edges saturate at `i32::MAX`.
    pub const fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    /// Rectangle anchored at `(0, 0)` with the given dimensions.
    pub const fn with_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Saturates for rectangles spanning more than `i32::MAX` pixels.
    pub const fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub const fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// True when the rectangle covers no pixels.
    pub const fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Same dimensions, moved so the top-left corner sits at `(0, 0)`.
    pub const fn at_origin(&self) -> Self {
        Self::with_size(self.width(), self.height())
    }

    /// Overlapping region, or `None` when the rectangles do not intersect.
    ///
    /// # Example
    /// ```rust
    /// use camshim_core::prelude::Rect;
    ///
    /// let a = Rect::new(0, 0, 100, 100);
    /// let b = Rect::new(50, 50, 150, 150);
    /// assert_eq!(a.intersect(&b), Some(Rect::new(50, 50, 100, 100)));
    /// assert_eq!(a.intersect(&Rect::new(200, 200, 300, 300)), None);
    /// ```
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let out = Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        if out.is_empty() { None } else { Some(out) }
    }

    /// Whether `other` lies entirely within `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// Centred sub-rectangle of the given dimensions.
    ///
    /// Odd leftover pixels go to the right/bottom margin.
    pub fn centered(&self, width: i32, height: i32) -> Rect {
        let left = self.left.saturating_add(self.width().saturating_sub(width) / 2);
        let top = self.top.saturating_add(self.height().saturating_sub(height) / 2);
        Rect::from_xywh(left, top, width, height)
    }

    /// Largest centred sub-rectangle whose aspect ratio matches `aspect`.
    ///
    /// # Example
    /// ```rust
    /// use camshim_core::prelude::{Rect, Size};
    ///
    /// let sensor = Rect::with_size(4000, 3000);
    /// let wide = Size::new(1920, 1080).unwrap();
    /// assert_eq!(sensor.fit_aspect(wide), Rect::new(0, 375, 4000, 2625));
    /// ```
    pub fn fit_aspect(&self, aspect: Size) -> Rect {
        let aw = aspect.width.get() as i128;
        let ah = aspect.height.get() as i128;
        let w = self.width().max(0) as i128;
        let h = self.height().max(0) as i128;
        // Compare w/h against aw/ah without dividing.
        let (fit_w, fit_h) = if w * ah > h * aw {
            (h * aw / ah, h)
        } else {
            (w, w * ah / aw)
        };
        self.centered(fit_w as i32, fit_h as i32)
    }

    /// Sum of absolute edge offsets between two rectangles.
    pub fn edge_distance(&self, other: &Rect) -> u64 {
        (self.left as i64 - other.left as i64).unsigned_abs()
            + (self.top as i64 - other.top as i64).unsigned_abs()
            + (self.right as i64 - other.right as i64).unsigned_abs()
            + (self.bottom as i64 - other.bottom as i64).unsigned_abs()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect({}, {} - {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Output dimensions of a stream.
///
/// # Example
/// ```rust
/// use camshim_core::prelude::Size;
///
/// let size = Size::new(640, 480).unwrap();
/// assert_eq!(size.width.get(), 640);
/// assert!(Size::new(0, 480).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels (non-zero).
    pub width: NonZeroU32,
    /// Height in pixels (non-zero).
    pub height: NonZeroU32,
}

impl Size {
    /// Create a size, returning `None` if width or height are zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_aspect_letterboxes_tall_region() {
        let region = Rect::with_size(1000, 1000);
        let fitted = region.fit_aspect(Size::new(16, 9).unwrap());
        assert_eq!(fitted.width(), 1000);
        assert_eq!(fitted.height(), 562);
        assert_eq!(fitted.top, 219);
    }

    #[test]
    fn fit_aspect_pillarboxes_wide_region() {
        let region = Rect::new(100, 100, 1700, 1000);
        let fitted = region.fit_aspect(Size::new(4, 3).unwrap());
        assert_eq!(fitted, Rect::new(300, 100, 1500, 1000));
    }

    #[test]
    fn centered_keeps_remainder_on_far_edge() {
        let outer = Rect::with_size(11, 11);
        assert_eq!(outer.centered(4, 4), Rect::new(3, 3, 7, 7));
    }

    #[test]
    fn edge_distance_is_symmetric() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(2, 3, 8, 6);
        assert_eq!(a.edge_distance(&b), 2 + 3 + 2 + 4);
        assert_eq!(a.edge_distance(&b), b.edge_distance(&a));
    }

    #[test]
    fn empty_and_contains() {
        assert!(Rect::new(5, 5, 5, 10).is_empty());
        let outer = Rect::with_size(100, 100);
        assert!(outer.contains(&Rect::new(10, 10, 20, 20)));
        assert!(!outer.contains(&Rect::new(90, 90, 110, 100)));
        assert_eq!(Rect::new(10, 20, 30, 60).at_origin(), Rect::with_size(20, 40));
    }

    #[test]
    fn extreme_edges_saturate() {
        let near_max = Rect::from_xywh(i32::MAX - 10, 0, 100, 100);
        assert_eq!(near_max, Rect::new(i32::MAX - 10, 0, i32::MAX, 100));
        assert_eq!(near_max.width(), 10);

        let huge = Rect::new(i32::MIN, -5, i32::MAX, 5);
        assert_eq!(huge.width(), i32::MAX);
        assert_eq!(huge.height(), 10);
        assert_eq!(huge.at_origin(), Rect::with_size(i32::MAX, 10));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fit_aspect_stays_inside(
                x in -2000i32..2000,
                y in -2000i32..2000,
                w in 0i32..8000,
                h in 0i32..8000,
                aw in 1u32..64,
                ah in 1u32..64,
            ) {
                let region = Rect::from_xywh(x, y, w, h);
                let fitted = region.fit_aspect(Size::new(aw, ah).unwrap());
                prop_assert!(region.contains(&fitted));
                prop_assert!(fitted.width() == w || fitted.height() == h);
            }

            #[test]
            fn intersection_is_contained_in_both(
                a in (0i32..500, 0i32..500, 1i32..500, 1i32..500),
                b in (0i32..500, 0i32..500, 1i32..500, 1i32..500),
            ) {
                let a = Rect::from_xywh(a.0, a.1, a.2, a.3);
                let b = Rect::from_xywh(b.0, b.1, b.2, b.3);
                if let Some(both) = a.intersect(&b) {
                    prop_assert!(a.contains(&both) && b.contains(&both));
                    prop_assert_eq!(Some(both), b.intersect(&a));
                }
            }
        }
    }
}
