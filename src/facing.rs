// =============================================================================
// FACING.RS — Cardinal facings on the isometric grid
//
// Everything a sprite needs to know about which way it points:
// - The four-way `Facing` enum with its fixed wire values (East=0 .. South=3)
// - Path-to-facing translation (a route of grid coordinates → facings)
// - Neighborhood resolution (a world position + facing → the occupied tile
//   and its four facing-relative neighbors)
// =============================================================================

use glam::Vec2;

use crate::map::TileMap;

/// A grid coordinate as `(row, col)`.
pub type GridPos = (i32, i32);

/// One of the four cardinal directions a sprite can face.
///
/// The discriminants are fixed and double as sprite-sheet indices: a sprite
/// carrying one texture key per facing loads `keys[facing as usize]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Facing {
    East = 0,
    North = 1,
    West = 2,
    South = 3,
}

/// Raised when a raw facing index falls outside `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FacingError {
    #[error("facing index {0} is out of range (expected 0..=3)")]
    Invalid(u8),
}

impl Facing {
    /// All four facings in discriminant order.
    pub const ALL: [Facing; 4] = [Facing::East, Facing::North, Facing::West, Facing::South];

    /// World-space unit step for this facing.
    ///
    /// East is +x, West is -x, North is -y, South is +y. Rows track the world
    /// x axis and columns track y, so this is also the grid step as
    /// `(d_row, d_col)`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Facing::East => (1, 0),
            Facing::North => (0, -1),
            Facing::West => (-1, 0),
            Facing::South => (0, 1),
        }
    }

    /// The facing pointing the opposite way.
    pub fn opposite(self) -> Facing {
        match self {
            Facing::East => Facing::West,
            Facing::North => Facing::South,
            Facing::West => Facing::East,
            Facing::South => Facing::North,
        }
    }

    /// Index into a per-facing sprite key table (`keys[facing.sprite_key()]`).
    pub fn sprite_key(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Facing {
    type Error = FacingError;

    /// Validated conversion from a raw index. Anything outside `0..=3` is an
    /// error rather than being wrapped modulo 4 — a sprite that reports an
    /// impossible facing is a bug worth surfacing.
    fn try_from(raw: u8) -> Result<Self, FacingError> {
        match raw {
            0 => Ok(Facing::East),
            1 => Ok(Facing::North),
            2 => Ok(Facing::West),
            3 => Ok(Facing::South),
            n => Err(FacingError::Invalid(n)),
        }
    }
}

// ── Path translation ──────────────────────────────────────────────────────────

/// Translate a route of grid coordinates into the facing a sprite holds on
/// each leg.
///
/// Each consecutive pair contributes one facing, derived purely from the sign
/// of the coordinate delta. The row axis wins ties: the column delta is only
/// consulted when the row is unchanged. A path of length 0 or 1 has no legs
/// and yields an empty vec; a repeated coordinate contributes nothing.
pub fn path_facings(path: &[GridPos]) -> Vec<Facing> {
    let mut facings = Vec::with_capacity(path.len().saturating_sub(1));

    for pair in path.windows(2) {
        let (row, col) = pair[0];
        let (next_row, next_col) = pair[1];

        if row > next_row {
            facings.push(Facing::West);
        } else if row < next_row {
            facings.push(Facing::East);
        } else if col > next_col {
            facings.push(Facing::North);
        } else if col < next_col {
            facings.push(Facing::South);
        }
    }

    facings
}

// ── Neighborhood resolution ───────────────────────────────────────────────────

/// The tile a sprite occupies plus its four facing-relative neighbors.
///
/// All coordinates are clamped into the grid: a sprite on an edge row or
/// column sees itself where its outside neighbor would be. The caller applies
/// this snapshot to its own entity representation — resolution never touches
/// the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    /// Occupied cell, also `center`.
    pub row: i32,
    pub col: i32,
    pub center: GridPos,
    pub top: GridPos,
    pub left: GridPos,
    pub right: GridPos,
    pub bottom: GridPos,
    /// Sprite-sheet index for the facing this neighborhood was resolved with.
    pub sprite_key: usize,
}

/// Which clamped axis value a neighbor slot reads from.
#[derive(Clone, Copy)]
enum AxisPick {
    RowMinus,
    RowPlus,
    ColMinus,
    ColPlus,
}

impl AxisPick {
    fn apply(self, row: i32, col: i32, rm: i32, rp: i32, cm: i32, cp: i32) -> GridPos {
        match self {
            AxisPick::RowMinus => (rm, col),
            AxisPick::RowPlus => (rp, col),
            AxisPick::ColMinus => (row, cm),
            AxisPick::ColPlus => (row, cp),
        }
    }
}

/// Neighbor slots as `[top, left, right, bottom]`, one entry per facing in
/// discriminant order. Each facing is a quarter-turn permutation of the same
/// four clamped axis values.
const NEIGHBOR_TABLE: [[AxisPick; 4]; 4] = [
    // East
    [AxisPick::RowPlus, AxisPick::ColMinus, AxisPick::ColPlus, AxisPick::RowMinus],
    // North
    [AxisPick::ColMinus, AxisPick::RowMinus, AxisPick::RowPlus, AxisPick::ColPlus],
    // West
    [AxisPick::RowMinus, AxisPick::ColPlus, AxisPick::ColMinus, AxisPick::RowPlus],
    // South
    [AxisPick::ColPlus, AxisPick::RowPlus, AxisPick::RowMinus, AxisPick::ColMinus],
];

/// Clamp a row or column to `[0, length - 1]` and report its minus/plus
/// neighbors, which saturate at the edges (an edge cell is its own outside
/// neighbor).
fn tile_radius(length: i32, dim: i32) -> (i32, i32, i32) {
    let clamped = dim.clamp(0, length - 1);
    let minus = if clamped > 0 { clamped - 1 } else { clamped };
    let plus = if clamped < length - 1 { clamped + 1 } else { clamped };
    (clamped, minus, plus)
}

/// Resolve the tile neighborhood for a sprite at a continuous world position.
///
/// The occupied cell is `ceil(world / tile_size)` on each axis, clamped into
/// the grid; neighbors are assigned from [`NEIGHBOR_TABLE`]. Pure and
/// idempotent — the same position and facing always produce the same
/// `Neighborhood`.
pub fn resolve_neighborhood(world: Vec2, facing: Facing, map: &TileMap) -> Neighborhood {
    let size = map.size();
    let tile_size = map.tile_size();

    let (row, rm, rp) = tile_radius(size, (world.x / tile_size).ceil() as i32);
    let (col, cm, cp) = tile_radius(size, (world.y / tile_size).ceil() as i32);

    let picks = NEIGHBOR_TABLE[facing as usize];

    Neighborhood {
        row,
        col,
        center: (row, col),
        top: picks[0].apply(row, col, rm, rp, cm, cp),
        left: picks[1].apply(row, col, rm, rp, cm, cp),
        right: picks[2].apply(row, col, rm, rp, cm, cp),
        bottom: picks[3].apply(row, col, rm, rp, cm, cp),
        sprite_key: facing.sprite_key(),
    }
}
