//! Hit targets and hit testing.
//!
//! Every interactive element registers one target: a diamond for base tiles,
//! a rectangle for workload markers. Testing walks the flat target list and
//! picks the topmost containing target - highest painter depth first, later
//! registration (higher in a marker stack) breaking ties.

use nimsforest_model::{ScreenVec, Selection};

/// Axis-aligned rectangle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle centered on a point.
    #[must_use]
    pub const fn centered(center: ScreenVec, width: f32, height: f32) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    /// Whether the point lies inside (right/bottom edges exclusive).
    #[must_use]
    pub fn contains(&self, p: ScreenVec) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

/// Shape of a hit target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitShape {
    /// Isometric tile diamond.
    Diamond {
        /// Diamond center.
        center: ScreenVec,
        /// Half-width of the horizontal diagonal.
        half_width: f32,
        /// Half-height of the vertical diagonal.
        half_height: f32,
    },
    /// Marker rectangle.
    Box(Rect),
}

impl HitShape {
    /// Whether the point lies inside the shape.
    #[must_use]
    pub fn contains(&self, p: ScreenVec) -> bool {
        match self {
            Self::Diamond {
                center,
                half_width,
                half_height,
            } => {
                // L1 metric scaled to the diamond's diagonals.
                (p.x - center.x).abs() / half_width + (p.y - center.y).abs() / half_height <= 1.0
            }
            Self::Box(rect) => rect.contains(p),
        }
    }
}

/// One interactive element of the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct HitTarget {
    /// World-space shape.
    pub shape: HitShape,
    /// Painter depth of the element that owns this target.
    pub depth: f32,
    /// What a confirmed click on this target selects.
    pub selection: Selection,
}

/// Resolves a world-space point to the topmost containing target, if any.
///
/// Returns an index into `targets`. Ties on depth go to the later entry,
/// which within a land is the higher element of the marker stack.
#[must_use]
pub fn hit_test(targets: &[HitTarget], point: ScreenVec) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, target) in targets.iter().enumerate() {
        if !target.shape.contains(point) {
            continue;
        }
        match best {
            Some(b) if targets[b].depth > target.depth => {}
            _ => best = Some(i),
        }
    }
    best
}
