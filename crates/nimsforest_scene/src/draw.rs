//! Draw commands - the renderer's output boundary.
//!
//! A rebuild produces a list of these, already sorted by depth (painter's
//! algorithm). The presentation layer replays them onto whatever surface it
//! owns; nothing in this crate draws a pixel.

use nimsforest_model::ScreenVec;

/// Base tile variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    /// Plain host.
    Land,
    /// GPU-capable host.
    Manaland,
}

/// Workload marker variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// General service (stylized conifer).
    Tree,
    /// Interactive session (small house).
    Treehouse,
    /// AI task (gear).
    Nim,
}

/// One drawable element of the scene.
///
/// Positions are world-space pixel coordinates; the camera transform is
/// applied by the presentation. `Notice` is the exception: it is screen-fixed
/// and ignores the camera entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// An isometric base tile, anchored at its diamond center.
    Tile {
        /// World-space center.
        position: ScreenVec,
        /// Painter depth.
        depth: f32,
        /// Visual variant.
        kind: TileKind,
        /// Cosmetic hover highlight.
        hovered: bool,
    },
    /// A short text label, anchored top-center.
    Label {
        /// World-space anchor.
        position: ScreenVec,
        /// Painter depth.
        depth: f32,
        /// Label text (truncated entity id).
        text: String,
    },
    /// A workload marker, anchored at its center.
    Marker {
        /// World-space center.
        position: ScreenVec,
        /// Painter depth.
        depth: f32,
        /// Visual variant.
        kind: MarkerKind,
        /// Draw scale (grows slightly on hover).
        scale: f32,
        /// Cosmetic hover highlight.
        hovered: bool,
    },
    /// Screen-fixed empty-state notice, centered in the viewport.
    Notice {
        /// Message text.
        text: String,
    },
}

impl DrawCommand {
    /// Painter depth of this command. `Notice` floats above everything.
    #[must_use]
    pub fn depth(&self) -> f32 {
        match self {
            Self::Tile { depth, .. } | Self::Label { depth, .. } | Self::Marker { depth, .. } => {
                *depth
            }
            Self::Notice { .. } => f32::MAX,
        }
    }
}
