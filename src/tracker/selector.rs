//! Target selection: one box per frame.

use crate::tracker::rect::BoundingBox;

/// The box chosen for the current control cycle, reduced to the horizontal
/// position the controller acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub bbox: BoundingBox,
    pub center_x: i64,
}

impl Target {
    pub fn new(bbox: BoundingBox) -> Self {
        Self {
            center_x: bbox.center_x(),
            bbox,
        }
    }
}

/// Pick the box with the largest area.
///
/// Ties go to the earliest box in input order, so a fixed detector output
/// always yields the same target. Empty boxes are skipped.
pub fn select_target(boxes: &[BoundingBox]) -> Option<Target> {
    let mut best: Option<&BoundingBox> = None;
    for bbox in boxes.iter().filter(|b| !b.is_empty()) {
        // Strict comparison keeps the first of equal areas.
        if best.is_none_or(|current| bbox.area() > current.area()) {
            best = Some(bbox);
        }
    }
    best.copied().map(Target::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frame_has_no_target() {
        assert_eq!(select_target(&[]), None);
    }

    #[test]
    fn test_largest_area_wins() {
        let boxes = [
            BoundingBox::new(0, 0, 10, 10),
            BoundingBox::new(100, 0, 40, 30),
            BoundingBox::new(200, 0, 20, 20),
        ];
        let target = select_target(&boxes).unwrap();
        assert_eq!(target.bbox, boxes[1]);
        assert_eq!(target.center_x, 120);
    }

    #[test]
    fn test_tie_goes_to_first_in_order() {
        let boxes = [
            BoundingBox::new(50, 0, 20, 10),
            BoundingBox::new(300, 0, 10, 20),
            BoundingBox::new(600, 0, 20, 10),
        ];
        assert_eq!(select_target(&boxes).unwrap().bbox, boxes[0]);

        let reversed = [boxes[2], boxes[1], boxes[0]];
        assert_eq!(select_target(&reversed).unwrap().bbox, boxes[2]);
    }

    #[test]
    fn test_empty_boxes_are_ignored() {
        let boxes = [BoundingBox::new(0, 0, 0, 50), BoundingBox::new(10, 10, 5, 0)];
        assert_eq!(select_target(&boxes), None);
    }
}
