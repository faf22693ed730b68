//! Isometric grid projection.
//!
//! Lands live on an integer lattice; the screen sees a diamond grid. The
//! projection is the classic 2:1 isometric transform with a fixed tile size,
//! and it is exactly invertible for integer lattice points.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Tile width in screen pixels (diamond diagonal, east-west).
pub const TILE_WIDTH: f32 = 88.0;

/// Tile height in screen pixels (diamond diagonal, north-south).
pub const TILE_HEIGHT: f32 = 44.0;

/// A point in screen space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct ScreenVec {
    /// X component (pixels, +x east).
    pub x: f32,
    /// Y component (pixels, +y south).
    pub y: f32,
}

impl ScreenVec {
    /// Origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new screen-space point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Converts to array form.
    #[must_use]
    pub const fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

/// Projects an integer grid cell to its screen position.
///
/// `x = (gx - gy) * TW/2`, `y = (gx + gy) * TH/2`. Total function.
#[must_use]
pub fn grid_to_iso(grid_x: i32, grid_y: i32) -> ScreenVec {
    #[allow(clippy::cast_precision_loss)]
    ScreenVec::new(
        (grid_x - grid_y) as f32 * (TILE_WIDTH / 2.0),
        (grid_x + grid_y) as f32 * (TILE_HEIGHT / 2.0),
    )
}

/// Inverts the isometric projection, flooring to the containing grid cell.
///
/// For any integer `(gx, gy)` produced by [`grid_to_iso`], the round trip is
/// exact: the 2x2 system solves to integers with no floating drift in the
/// lattice ranges a cluster map can reach.
#[must_use]
pub fn iso_to_grid(screen_x: f32, screen_y: f32) -> (i32, i32) {
    let half_w = TILE_WIDTH / 2.0;
    let half_h = TILE_HEIGHT / 2.0;
    let grid_x = (screen_x / half_w + screen_y / half_h) / 2.0;
    let grid_y = (screen_y / half_h - screen_x / half_w) / 2.0;
    #[allow(clippy::cast_possible_truncation)]
    (grid_x.floor() as i32, grid_y.floor() as i32)
}
