//! Builder for turning detector output into pixel boxes.

use crate::tracker::BoundingBox;

/// Builds a [`BoundingBox`] from float TLWH coordinates as detectors emit them.
///
/// Coordinates are rounded to the nearest pixel and anything left of or
/// above the frame origin is clipped to zero.
#[derive(Debug, Clone, Default)]
pub struct BoxBuilder {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl BoxBuilder {
    /// Create a new box builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLWH format (x, y, width, height).
    pub fn tlwh(mut self, x: f64, y: f64, w: f64, h: f64) -> Self {
        self.x1 = x;
        self.y1 = y;
        self.x2 = x + w;
        self.y2 = y + h;
        self
    }

    /// Build the final `BoundingBox`.
    pub fn build(self) -> BoundingBox {
        // Float to int casts saturate and map NaN to 0.
        let to_px = |v: f64| v.max(0.0).round() as u32;
        BoundingBox::from_tlbr(
            to_px(self.x1),
            to_px(self.y1),
            to_px(self.x2),
            to_px(self.y2),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tlwh() {
        let bbox = BoxBuilder::new().tlwh(500.0, 100.0, 60.0, 60.0).build();
        assert_eq!(bbox, BoundingBox::new(500, 100, 60, 60));
    }

    #[test]
    fn test_rounds_to_pixels() {
        let bbox = BoxBuilder::new().tlwh(380.4, 99.6, 60.2, 60.0).build();
        assert_eq!(bbox, BoundingBox::new(380, 100, 61, 60));
    }

    #[test]
    fn test_clips_at_origin() {
        let bbox = BoxBuilder::new().tlwh(-20.0, -5.0, 60.0, 35.0).build();
        assert_eq!(bbox, BoundingBox::new(0, 0, 40, 30));
    }

    #[test]
    fn test_fully_outside_is_empty() {
        let bbox = BoxBuilder::new().tlwh(-100.0, 10.0, 50.0, 50.0).build();
        assert!(bbox.is_empty());
    }
}
