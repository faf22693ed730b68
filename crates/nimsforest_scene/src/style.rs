//! Forest palette.
//!
//! Dark night-sky backdrop, green land tiles, purple manalands. The scene
//! only hands these out; applying them is the presentation's job.

use nimsforest_model::OccupancyBand;

use crate::draw::{MarkerKind, TileKind};

/// RGBA color, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component.
    pub a: f32,
}

impl Color {
    /// Scene background (deep night blue).
    pub const BACKGROUND: Self = Self::rgb(0x1a1a2e);
    /// Land tile fill (forest green).
    pub const LAND: Self = Self::rgb(0x228b22);
    /// Land tile edge.
    pub const LAND_EDGE: Self = Self::rgb(0x1e7a1e);
    /// Manaland tile fill (purple).
    pub const MANALAND: Self = Self::rgb(0x9b59b6);
    /// Manaland tile edge.
    pub const MANALAND_EDGE: Self = Self::rgb(0x8e44ad);
    /// Tree marker (dark green).
    pub const TREE: Self = Self::rgb(0x2d5a27);
    /// Treehouse marker (warm brown).
    pub const TREEHOUSE: Self = Self::rgb(0x8b4513);
    /// Nim marker (blue).
    pub const NIM: Self = Self::rgb(0x3498db);
    /// Tile label text.
    pub const LABEL: Self = Self::rgb(0xaaaaaa);
    /// Placeholder notice text.
    pub const NOTICE: Self = Self::rgb(0x888888);
    /// Hover tint for tiles (near-white multiply).
    pub const HOVER_TILE: Self = Self::rgb(0xdddddd);
    /// Hover tint for markers (yellow).
    pub const HOVER_MARKER: Self = Self::rgb(0xffff00);
    /// Occupancy gauge, below 50%.
    pub const OCCUPANCY_LOW: Self = Self::rgb(0x22c55e);
    /// Occupancy gauge, 50-80%.
    pub const OCCUPANCY_ELEVATED: Self = Self::rgb(0xeab308);
    /// Occupancy gauge, above 80%.
    pub const OCCUPANCY_CRITICAL: Self = Self::rgb(0xef4444);

    /// Creates an opaque color from a `0xRRGGBB` value.
    #[must_use]
    pub const fn rgb(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Converts to array form for vertex buffers.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl TileKind {
    /// Fill color for this tile kind.
    #[must_use]
    pub const fn fill(self) -> Color {
        match self {
            Self::Land => Color::LAND,
            Self::Manaland => Color::MANALAND,
        }
    }

    /// Edge color for this tile kind.
    #[must_use]
    pub const fn edge(self) -> Color {
        match self {
            Self::Land => Color::LAND_EDGE,
            Self::Manaland => Color::MANALAND_EDGE,
        }
    }
}

impl MarkerKind {
    /// Base color for this marker kind.
    #[must_use]
    pub const fn fill(self) -> Color {
        match self {
            Self::Tree => Color::TREE,
            Self::Treehouse => Color::TREEHOUSE,
            Self::Nim => Color::NIM,
        }
    }
}

/// Gauge color for an occupancy band.
#[must_use]
pub const fn occupancy_color(band: OccupancyBand) -> Color {
    match band {
        OccupancyBand::Low => Color::OCCUPANCY_LOW,
        OccupancyBand::Elevated => Color::OCCUPANCY_ELEVATED,
        OccupancyBand::Critical => Color::OCCUPANCY_CRITICAL,
    }
}
