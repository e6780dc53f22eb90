use crate::error::ConfigError;
use crate::tracker::rect::BoundingBox;

/// Frame size established once at startup by the acquisition side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    width: u32,
    height: u32,
}

impl FrameGeometry {
    /// Rejects degenerate frames; the controller divides the width in half.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::invalid(
                "frame.width",
                "Frame width must be greater than 0",
            ));
        }
        if height == 0 {
            return Err(ConfigError::invalid(
                "frame.height",
                "Frame height must be greater than 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Horizontal center of the frame, rounded down.
    #[inline]
    pub fn center_x(&self) -> i64 {
        i64::from(self.width / 2)
    }

    /// Signed horizontal displacement of `x` from the frame center.
    /// Negative means left of center.
    #[inline]
    pub fn offset_of(&self, x: i64) -> i64 {
        x - self.center_x()
    }

    /// Cut a box down to the horizontal extent of the frame. A box lying
    /// wholly past the right edge comes back empty.
    pub fn clip(&self, bbox: &BoundingBox) -> BoundingBox {
        let left = bbox.x.min(self.width);
        let right = bbox.x.saturating_add(bbox.width).min(self.width);
        BoundingBox::new(left, bbox.y, right - left, bbox.height)
    }

    /// Reflect a box about the vertical center line, as a mirrored preview
    /// shows it. The box is clipped to the frame first.
    pub fn mirror(&self, bbox: &BoundingBox) -> BoundingBox {
        let clipped = self.clip(bbox);
        BoundingBox::new(
            self.width - (clipped.x + clipped.width),
            clipped.y,
            clipped.width,
            clipped.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_width() {
        let err = FrameGeometry::new(0, 600).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "frame.width"));
    }

    #[test]
    fn test_rejects_zero_height() {
        assert!(FrameGeometry::new(800, 0).is_err());
    }

    #[test]
    fn test_offset_sign() {
        let geometry = FrameGeometry::new(800, 600).unwrap();
        assert_eq!(geometry.center_x(), 400);
        assert_eq!(geometry.offset_of(410), 10);
        assert_eq!(geometry.offset_of(250), -150);
    }

    #[test]
    fn test_mirror() {
        let geometry = FrameGeometry::new(800, 600).unwrap();
        let bbox = BoundingBox::new(500, 100, 60, 60);
        assert_eq!(geometry.mirror(&bbox), BoundingBox::new(240, 100, 60, 60));
        assert_eq!(geometry.mirror(&geometry.mirror(&bbox)), bbox);

        let clipped = geometry.mirror(&BoundingBox::new(780, 0, 40, 40));
        assert_eq!(clipped, BoundingBox::new(0, 0, 20, 40));
    }

    #[test]
    fn test_clip_matches_mirror_extent() {
        let geometry = FrameGeometry::new(800, 600).unwrap();
        for bbox in [
            BoundingBox::new(500, 100, 60, 60),
            BoundingBox::new(780, 0, 40, 40),
            BoundingBox::new(5000, 0, 10, 10),
        ] {
            assert_eq!(geometry.clip(&bbox).width, geometry.mirror(&bbox).width);
        }
        assert_eq!(
            geometry.clip(&BoundingBox::new(780, 0, 40, 40)),
            BoundingBox::new(780, 0, 20, 40)
        );
        assert!(geometry.clip(&BoundingBox::new(5000, 0, 10, 10)).is_empty());
        assert!(geometry.mirror(&BoundingBox::new(5000, 0, 10, 10)).is_empty());
    }

    #[test]
    fn test_odd_width_center() {
        let geometry = FrameGeometry::new(641, 480).unwrap();
        assert_eq!(geometry.center_x(), 320);
    }
}
