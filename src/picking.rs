// =============================================================================
// PICKING.RS — Mouse-driven tile highlighting
//
// Per-frame cursor picking: unproject the cursor into world space, find the
// tile footprint under it, and describe the resulting highlight. Everything is
// recomputed each tick; the only state carried across frames is the
// select-mode switch and the last highlighted cell.
// =============================================================================

use glam::Vec2;
use tracing::trace;

use crate::HIGHLIGHT_TINT;
use crate::facing::GridPos;
use crate::input::{InputState, MouseButton};
use crate::iso::{IsoProjection, in_world_bounds};
use crate::map::TileMap;

/// World-height lift applied to the highlighted tile.
pub const TILE_LIFT: f32 = 5.0;

/// Alpha of every tile that is not highlighted.
pub const BASE_ALPHA: f32 = 1.0;

/// Highlight state for a single cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileHighlight {
    pub row: i32,
    pub col: i32,
    pub tint: u32,
    /// Pulses with time; intentionally allowed above 1.0 for a glow effect.
    pub alpha: f32,
    /// World-height offset the cell should be drawn at.
    pub lift: f32,
}

/// One tick's worth of highlight assignments.
///
/// At most one cell is highlighted; every other cell reverts to its
/// [`base_tint`](crate::map::Tile::base_tint), [`BASE_ALPHA`] and zero lift.
/// The frame is plain data — callers apply it to their own sprites, or to the
/// map itself via [`HighlightFrame::apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightFrame {
    /// Whether the cursor's world position fell inside the playable extent.
    pub in_bounds: bool,
    pub highlight: Option<TileHighlight>,
}

impl HighlightFrame {
    /// The frame produced when nothing is under the cursor: all cells at base
    /// tint and alpha, no lift.
    pub fn reset() -> Self {
        Self {
            in_bounds: false,
            highlight: None,
        }
    }

    /// Write this frame's tints into the map. Non-highlighted tiles revert to
    /// their base tint.
    pub fn apply(&self, map: &mut TileMap) {
        for tile in map.tiles_mut() {
            tile.tint = tile.base_tint();
        }
        if let Some(h) = self.highlight {
            if let Some(tile) = map.tile_mut(h.row, h.col) {
                tile.tint = h.tint;
            }
        }
    }
}

/// Tracks select mode and recomputes the highlighted tile every tick.
#[derive(Debug, Default)]
pub struct Highlighter {
    select_mode: bool,
    last: Option<GridPos>,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether select mode (cursor highlighting) is currently on.
    pub fn select_mode(&self) -> bool {
        self.select_mode
    }

    /// Left click toggles select mode.
    pub fn process_input(&mut self, input: &InputState) {
        if input.is_mouse_pressed(MouseButton::Left) {
            self.select_mode = !self.select_mode;
            trace!(on = self.select_mode, "select mode toggled");
        }
    }

    /// Recompute the highlight for this frame.
    ///
    /// `cursor` is the pointer position in screen pixels and `time_ms` the
    /// host clock driving the alpha pulse. With select mode off, or the
    /// cursor outside the playable extent, this yields the reset frame.
    pub fn tick(
        &mut self,
        cursor: Vec2,
        iso: &IsoProjection,
        map: &TileMap,
        time_ms: f64,
    ) -> HighlightFrame {
        if !self.select_mode {
            self.retire();
            return HighlightFrame::reset();
        }

        let world = iso.unproject(cursor, 0.0).truncate();
        if !in_world_bounds(world, map.world_extent()) {
            self.retire();
            return HighlightFrame::reset();
        }

        // Footprints tile the world plane, so the containing cell can be
        // computed directly. The probe sits one tile size ahead of the
        // unprojected point on both axes, matching where the cursor visually
        // rests on the diamond grid.
        let probe = world + Vec2::splat(map.tile_size());
        let cell = cell_at_world(probe, map.tile_size());

        match map.tile(cell.0, cell.1) {
            Some(tile) => {
                if self.last != Some(cell) {
                    trace!(row = cell.0, col = cell.1, "highlight moved");
                    self.last = Some(cell);
                }
                HighlightFrame {
                    in_bounds: true,
                    highlight: Some(TileHighlight {
                        row: tile.row,
                        col: tile.col,
                        tint: HIGHLIGHT_TINT,
                        alpha: pulse_alpha(time_ms),
                        lift: TILE_LIFT,
                    }),
                }
            }
            None => {
                self.retire();
                HighlightFrame {
                    in_bounds: true,
                    highlight: None,
                }
            }
        }
    }

    fn retire(&mut self) {
        if let Some((row, col)) = self.last.take() {
            trace!(row, col, "highlight dropped");
        }
    }
}

/// The cell whose world-space footprint contains `point`. Footprints are
/// squares of edge `tile_size` centered on `(row, col) * tile_size`.
fn cell_at_world(point: Vec2, tile_size: f32) -> GridPos {
    (
        (point.x / tile_size).round() as i32,
        (point.y / tile_size).round() as i32,
    )
}

/// Highlight alpha at the given host clock: `1.3 + sin(t * 0.007)`.
pub fn pulse_alpha(time_ms: f64) -> f32 {
    1.3 + (time_ms * 0.007).sin() as f32
}
