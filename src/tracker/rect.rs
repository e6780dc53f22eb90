/// Axis-aligned bounding box in frame pixel coordinates (TLWH).
///
/// Detectors hand these over once per frame; the selector reduces them to a
/// single [`Target`](crate::tracker::Target).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Top-left x coordinate
    pub x: u32,
    /// Top-left y coordinate
    pub y: u32,
    /// Width of the bounding box
    pub width: u32,
    /// Height of the bounding box
    pub height: u32,
}

impl BoundingBox {
    /// Create a new box from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a box from TLBR format. A corner pair given in the wrong order
    /// collapses to an empty box rather than wrapping around.
    #[inline]
    pub fn from_tlbr(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2.saturating_sub(x1),
            height: y2.saturating_sub(y1),
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [u32; 4] {
        [
            self.x,
            self.y,
            self.x.saturating_add(self.width),
            self.y.saturating_add(self.height),
        ]
    }

    /// Horizontal center, rounded down to the pixel.
    #[inline]
    pub fn center_x(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width / 2)
    }

    /// Center point of the box, rounded down to the pixel.
    #[inline]
    pub fn center(&self) -> (i64, i64) {
        (
            self.center_x(),
            i64::from(self.y) + i64::from(self.height / 2),
        )
    }

    /// Area of the box. Widened so large boxes cannot overflow.
    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// A box with no width or no height has no usable position.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
