//! Texture-coordinate assignment across panels.
//!
//! U runs along local X and V along local Y for both orientations, so the
//! fold axis is U for vertical folds and V for horizontal ones. Each panel's
//! rectangle spans its share of the fold axis and the full complementary
//! axis; back faces mirror the fold axis.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::layout::{Orientation, PanelNode};

/// Axis-aligned rectangle in texture space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvRect {
    /// Lower corner.
    pub min: Vec2,
    /// Upper corner.
    pub max: Vec2,
}

impl UvRect {
    /// Point at fractional position `frac` (0..1 on each axis).
    #[must_use]
    pub fn at(&self, frac: Vec2) -> Vec2 {
        self.min + (self.max - self.min) * frac
    }

    /// Extent along the fold axis as `(start, end)`.
    #[must_use]
    pub fn along(&self, orientation: Orientation) -> (f32, f32) {
        match orientation {
            Orientation::Vertical => (self.min.x, self.max.x),
            Orientation::Horizontal => (self.min.y, self.max.y),
        }
    }

    /// Extent across the fold axis as `(start, end)`.
    #[must_use]
    pub fn across(&self, orientation: Orientation) -> (f32, f32) {
        match orientation {
            Orientation::Vertical => (self.min.y, self.max.y),
            Orientation::Horizontal => (self.min.x, self.max.x),
        }
    }
}

/// Front-face rectangle of `panel` on a sheet whose fold axis is
/// `fold_length` long.
#[must_use]
pub fn panel_rect(
    panel: &PanelNode,
    fold_length: f32,
    orientation: Orientation,
) -> UvRect {
    let start = panel.offset_along_fold / fold_length;
    let end = panel.end_along_fold() / fold_length;
    match orientation {
        Orientation::Vertical => UvRect {
            min: Vec2::new(start, 0.0),
            max: Vec2::new(end, 1.0),
        },
        Orientation::Horizontal => UvRect {
            min: Vec2::new(0.0, start),
            max: Vec2::new(1.0, end),
        },
    }
}

/// Mirror a coordinate along the fold axis.
#[must_use]
pub fn mirror_along(uv: Vec2, orientation: Orientation) -> Vec2 {
    match orientation {
        Orientation::Vertical => Vec2::new(1.0 - uv.x, uv.y),
        Orientation::Horizontal => Vec2::new(uv.x, 1.0 - uv.y),
    }
}

/// Back-face rectangle for a front rectangle.
#[must_use]
pub fn mirror_rect(rect: UvRect, orientation: Orientation) -> UvRect {
    let a = mirror_along(rect.min, orientation);
    let b = mirror_along(rect.max, orientation);
    UvRect {
        min: a.min(b),
        max: a.max(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FoldDirection, PivotEdge};

    fn panel(offset: f32, width: f32) -> PanelNode {
        PanelNode::hinged(
            1,
            width,
            11.0,
            offset,
            PivotEdge::Left,
            0,
            FoldDirection::Negative,
        )
    }

    #[test]
    fn vertical_rect_spans_share_of_u() {
        let rect = panel_rect(&panel(4.25, 4.25), 8.5, Orientation::Vertical);
        assert_eq!(rect.min, Vec2::new(0.5, 0.0));
        assert_eq!(rect.max, Vec2::new(1.0, 1.0));
        assert_eq!(rect.along(Orientation::Vertical), (0.5, 1.0));
        assert_eq!(rect.across(Orientation::Vertical), (0.0, 1.0));
    }

    #[test]
    fn horizontal_rect_spans_share_of_v() {
        let rect =
            panel_rect(&panel(0.0, 5.5), 11.0, Orientation::Horizontal);
        assert_eq!(rect.min, Vec2::new(0.0, 0.0));
        assert_eq!(rect.max, Vec2::new(1.0, 0.5));
    }

    #[test]
    fn mirror_flips_only_fold_axis() {
        let rect = UvRect {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(0.25, 1.0),
        };
        let back = mirror_rect(rect, Orientation::Vertical);
        assert_eq!(back.min, Vec2::new(0.75, 0.0));
        assert_eq!(back.max, Vec2::new(1.0, 1.0));

        let back = mirror_rect(rect, Orientation::Horizontal);
        assert_eq!(back.min, Vec2::new(0.0, 0.0));
        assert_eq!(back.max, Vec2::new(0.25, 1.0));
    }

    #[test]
    fn at_interpolates_corners() {
        let rect = UvRect {
            min: Vec2::new(0.5, 0.0),
            max: Vec2::new(1.0, 1.0),
        };
        assert_eq!(rect.at(Vec2::ZERO), rect.min);
        assert_eq!(rect.at(Vec2::ONE), rect.max);
        assert_eq!(rect.at(Vec2::new(0.5, 0.5)), Vec2::new(0.75, 0.5));
    }
}
