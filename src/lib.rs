pub mod facing;
pub mod input;
pub mod iso;
pub mod map;
pub mod pathfinding;
pub mod picking;

/// Default edge length of a tile's world-space footprint, in pixels.
pub const DEFAULT_TILE_SIZE: f32 = 32.0;

/// Tint applied to tiles still hidden by fog of war (and to freshly built maps).
pub const FOG_TINT: u32 = 0x571F57;

/// Tint applied to tiles once discovered.
pub const DISCOVERED_TINT: u32 = 0xFFFFFF;

/// Tint applied to the tile under the cursor while select mode is active.
pub const HIGHLIGHT_TINT: u32 = 0x98FB98;
