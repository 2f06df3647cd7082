// =============================================================================
// MAP.RS — Tile grid construction and queries
//
// A `TileMap` is a square grid of tiles built once from a caller-owned
// `MapConfig`. The outer ring is always blocked, interior cells draw a random
// visual variant from the configured key table, and a parallel passability
// mask answers movement/pathing queries without touching tile state.
// =============================================================================

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{DISCOVERED_TINT, FOG_TINT};

/// Raised when a map cannot be built from its config, or a checked lookup
/// misses the grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// A playable map needs at least one interior cell inside the blocked ring.
    #[error("map size {size} is too small (minimum is 3)")]
    SizeTooSmall { size: i32 },

    #[error("tile key table is empty")]
    NoTileKeys,

    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: i32, col: i32 },
}

// ── MapConfig ─────────────────────────────────────────────────────────────────

/// Everything needed to build a map, owned by the caller.
///
/// `tile_keys` is the table of sprite keys a tile's `variant` indexes into —
/// purely visual, never consulted for passability. A fixed `seed` makes the
/// variant layout reproducible; `None` draws a fresh layout every build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Edge length of the square grid, in tiles.
    pub size: i32,
    /// Edge length of one tile's world-space footprint, in pixels.
    pub tile_size: f32,
    /// When set, tiles start undiscovered and fog-tinted until revealed.
    pub fog_of_war: bool,
    /// Sprite keys for tile variants.
    pub tile_keys: Vec<String>,
    /// RNG seed for the variant layout.
    pub seed: Option<u64>,
}

impl MapConfig {
    /// Deserialise a config from a JSON string.
    ///
    /// Returns a `serde_json::Error` if the input is malformed or missing
    /// required fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn validate(&self) -> Result<(), MapError> {
        if self.size < 3 {
            return Err(MapError::SizeTooSmall { size: self.size });
        }
        if self.tile_keys.is_empty() {
            return Err(MapError::NoTileKeys);
        }
        Ok(())
    }
}

// ── Tile ──────────────────────────────────────────────────────────────────────

/// A single grid cell. Tiles have no identity beyond their coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub row: i32,
    pub col: i32,
    /// Index into the map's tile-key table. Visual only.
    pub variant: usize,
    /// Border-ring cells are blocked; entities never occupy them.
    pub blocked: bool,
    /// Fog of war: hidden until a sprite reveals this cell.
    pub discovered: bool,
    /// Current display tint as `0xRRGGBB`.
    pub tint: u32,
}

impl Tile {
    /// The tint this tile reverts to when nothing highlights it.
    pub fn base_tint(&self) -> u32 {
        if self.discovered { DISCOVERED_TINT } else { FOG_TINT }
    }

    /// Coordinate equality — the only identity a tile has.
    pub fn same_cell(&self, other: &Tile) -> bool {
        self.row == other.row && self.col == other.col
    }

    /// World-space position of the tile's footprint center. Rows track the
    /// world x axis, columns track y.
    pub fn world_pos(&self, tile_size: f32) -> glam::Vec2 {
        glam::Vec2::new(self.row as f32 * tile_size, self.col as f32 * tile_size)
    }
}

// ── TileMap ───────────────────────────────────────────────────────────────────

/// A fixed-size square grid of tiles plus a parallel passability mask.
#[derive(Debug, Clone)]
pub struct TileMap {
    size: i32,
    tile_size: f32,
    fog_of_war: bool,
    tile_keys: Vec<String>,
    /// Row-major tile storage, `size * size` entries.
    tiles: Vec<Tile>,
    /// Row-major passability, kept alongside so movement queries never need
    /// to walk tile structs.
    passable: Vec<bool>,
}

impl TileMap {
    /// Build a map from a validated config.
    ///
    /// Exactly the one-cell border ring is blocked; every interior cell is
    /// passable regardless of its variant. With fog of war enabled all tiles
    /// start undiscovered under [`FOG_TINT`]; otherwise they start revealed.
    pub fn build(config: &MapConfig) -> Result<TileMap, MapError> {
        config.validate()?;

        let size = config.size;
        let mut rng: Xoshiro256PlusPlus = match config.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_entropy(),
        };

        let discovered = !config.fog_of_war;
        let tint = if discovered { DISCOVERED_TINT } else { FOG_TINT };

        let mut tiles = Vec::with_capacity((size * size) as usize);
        let mut passable = Vec::with_capacity((size * size) as usize);

        for row in 0..size {
            for col in 0..size {
                let border = row == 0 || row == size - 1 || col == 0 || col == size - 1;
                let variant = if border {
                    0
                } else {
                    rng.gen_range(0..config.tile_keys.len())
                };

                tiles.push(Tile {
                    row,
                    col,
                    variant,
                    blocked: border,
                    discovered,
                    tint,
                });
                passable.push(!border);
            }
        }

        debug!(size, fog = config.fog_of_war, seed = ?config.seed, "built tile map");

        Ok(TileMap {
            size,
            tile_size: config.tile_size,
            fog_of_war: config.fog_of_war,
            tile_keys: config.tile_keys.clone(),
            tiles,
            passable,
        })
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn fog_of_war(&self) -> bool {
        self.fog_of_war
    }

    /// Sprite key for a variant index, if the table has one.
    pub fn tile_key(&self, variant: usize) -> Option<&str> {
        self.tile_keys.get(variant).map(String::as_str)
    }

    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.size && col >= 0 && col < self.size
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        self.contains(row, col)
            .then(|| (row * self.size + col) as usize)
    }

    /// Tile lookup; `None` off the grid.
    pub fn tile(&self, row: i32, col: i32) -> Option<&Tile> {
        self.index(row, col).map(|i| &self.tiles[i])
    }

    pub fn tile_mut(&mut self, row: i32, col: i32) -> Option<&mut Tile> {
        self.index(row, col).map(|i| &mut self.tiles[i])
    }

    /// Tile lookup that reports the miss instead of swallowing it.
    pub fn tile_checked(&self, row: i32, col: i32) -> Result<&Tile, MapError> {
        self.tile(row, col)
            .ok_or(MapError::OutOfBounds { row, col })
    }

    /// Whether an entity may occupy the cell. Off-grid cells are impassable.
    pub fn is_passable(&self, row: i32, col: i32) -> bool {
        self.index(row, col)
            .map(|i| self.passable[i])
            .unwrap_or(false)
    }

    /// Reveal a cell, flipping its tint from fog to the discovered base.
    /// Off-grid coordinates are ignored.
    pub fn discover(&mut self, row: i32, col: i32) {
        if let Some(i) = self.index(row, col) {
            let tile = &mut self.tiles[i];
            tile.discovered = true;
            tile.tint = tile.base_tint();
        }
    }

    /// Front edge of the playable world on both axes (back edges sit at 0).
    /// The last ring and a half of tiles sits outside so sprites anchored at
    /// a tile center can never poke past the blocked border.
    pub fn world_extent(&self) -> f32 {
        crate::iso::world_extent(self.tile_size, self.size)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: i32) -> MapConfig {
        MapConfig {
            size,
            tile_size: 32.0,
            fog_of_war: true,
            tile_keys: vec!["grass".into(), "dirt".into(), "stone".into()],
            seed: Some(42),
        }
    }

    #[test]
    fn border_ring_is_blocked_interior_is_not() {
        let map = TileMap::build(&config(6)).unwrap();
        for tile in map.tiles() {
            let border =
                tile.row == 0 || tile.row == 5 || tile.col == 0 || tile.col == 5;
            assert_eq!(tile.blocked, border, "tile ({}, {})", tile.row, tile.col);
            assert_eq!(map.is_passable(tile.row, tile.col), !border);
        }
    }

    #[test]
    fn too_small_map_is_rejected() {
        let err = TileMap::build(&config(2)).unwrap_err();
        assert_eq!(err, MapError::SizeTooSmall { size: 2 });
    }

    #[test]
    fn empty_key_table_is_rejected() {
        let mut cfg = config(5);
        cfg.tile_keys.clear();
        assert_eq!(TileMap::build(&cfg).unwrap_err(), MapError::NoTileKeys);
    }

    #[test]
    fn seeded_builds_are_reproducible() {
        let a = TileMap::build(&config(8)).unwrap();
        let b = TileMap::build(&config(8)).unwrap();
        let variants_a: Vec<usize> = a.tiles().map(|t| t.variant).collect();
        let variants_b: Vec<usize> = b.tiles().map(|t| t.variant).collect();
        assert_eq!(variants_a, variants_b);
    }

    #[test]
    fn variants_index_the_key_table() {
        let map = TileMap::build(&config(8)).unwrap();
        for tile in map.tiles() {
            assert!(map.tile_key(tile.variant).is_some());
        }
    }

    #[test]
    fn fog_of_war_starts_hidden_and_discover_reveals() {
        let mut map = TileMap::build(&config(5)).unwrap();
        let tile = map.tile(2, 2).unwrap();
        assert!(!tile.discovered);
        assert_eq!(tile.tint, crate::FOG_TINT);

        map.discover(2, 2);
        let tile = map.tile(2, 2).unwrap();
        assert!(tile.discovered);
        assert_eq!(tile.tint, crate::DISCOVERED_TINT);
    }

    #[test]
    fn fog_disabled_starts_revealed() {
        let mut cfg = config(5);
        cfg.fog_of_war = false;
        let map = TileMap::build(&cfg).unwrap();
        assert!(map.tiles().all(|t| t.discovered));
        assert!(map.tiles().all(|t| t.tint == crate::DISCOVERED_TINT));
    }

    #[test]
    fn out_of_bounds_lookups() {
        let map = TileMap::build(&config(5)).unwrap();
        assert!(map.tile(-1, 0).is_none());
        assert!(map.tile(0, 5).is_none());
        assert!(!map.is_passable(5, 5));
        assert_eq!(
            map.tile_checked(9, 9).unwrap_err(),
            MapError::OutOfBounds { row: 9, col: 9 }
        );
    }

    #[test]
    fn config_loads_from_json() {
        let cfg = MapConfig::from_json(
            r#"{
                "size": 10,
                "tile_size": 38.0,
                "fog_of_war": true,
                "tile_keys": ["grass", "dirt"],
                "seed": 7
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.size, 10);
        assert_eq!(cfg.tile_keys.len(), 2);
        assert_eq!(cfg.seed, Some(7));
        assert!(TileMap::build(&cfg).is_ok());
    }
}
