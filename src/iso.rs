// =============================================================================
// ISO.RS — Isometric projection math
//
// Classic 2:1 isometric transform between screen pixels and world space.
// World space is the flat top-down plane tiles live on; screen space is where
// the renderer draws. `z` is world height (tile lift).
// =============================================================================

use glam::{Vec2, Vec3};

/// Projects between screen and world space around a screen-space origin.
///
/// Forward transform (world → screen):
/// ```text
/// screen.x = origin.x + (w.x - w.y)
/// screen.y = origin.y + (w.x + w.y) / 2 - w.z
/// ```
/// Inverse (screen → world, at a chosen height `z`), with
/// `dx = screen.x - origin.x` and `dy = screen.y - origin.y`:
/// ```text
/// w.x = dx / 2 + dy + z
/// w.y = dy + z - dx / 2
/// ```
/// Substituting one into the other recovers the input, so
/// `unproject(project(w), w.z) == w` up to float error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoProjection {
    /// Screen-space pixel where world (0, 0, 0) lands.
    pub origin: Vec2,
}

impl IsoProjection {
    pub fn new(origin: Vec2) -> Self {
        Self { origin }
    }

    /// World position → screen pixel.
    pub fn project(&self, world: Vec3) -> Vec2 {
        Vec2::new(
            self.origin.x + (world.x - world.y),
            self.origin.y + (world.x + world.y) * 0.5 - world.z,
        )
    }

    /// Screen pixel → world position at height `z`.
    pub fn unproject(&self, screen: Vec2, z: f32) -> Vec3 {
        let dx = screen.x - self.origin.x;
        let dy = screen.y - self.origin.y;
        Vec3::new(dx * 0.5 + dy + z, dy + z - dx * 0.5, z)
    }
}

impl Default for IsoProjection {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

// ── World bounds ──────────────────────────────────────────────────────────────

/// Front edge of the playable world for a square map: `tile_size * (size - 2)`.
/// The back edges sit at 0, so the blocked border ring lies outside the
/// playable extent on every side.
pub fn world_extent(tile_size: f32, map_size: i32) -> f32 {
    tile_size * (map_size - 2) as f32
}

/// Whether a world-plane point lies strictly inside the playable extent.
pub fn in_world_bounds(world: Vec2, extent: f32) -> bool {
    world.x > 0.0 && world.x < extent && world.y > 0.0 && world.y < extent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_unproject_round_trip() {
        let iso = IsoProjection::new(Vec2::new(400.0, 120.0));
        for world in [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(96.0, 32.0, 0.0),
            Vec3::new(15.5, 83.25, 5.0),
        ] {
            let back = iso.unproject(iso.project(world), world.z);
            assert!((back - world).length() < 1e-4, "{world} -> {back}");
        }
    }

    #[test]
    fn origin_projects_to_origin() {
        let iso = IsoProjection::new(Vec2::new(320.0, 64.0));
        assert_eq!(iso.project(Vec3::ZERO), Vec2::new(320.0, 64.0));
    }

    #[test]
    fn equal_world_axes_project_straight_down() {
        // Points on the x == y diagonal have no horizontal screen offset.
        let iso = IsoProjection::default();
        let screen = iso.project(Vec3::new(40.0, 40.0, 0.0));
        assert_eq!(screen.x, 0.0);
        assert_eq!(screen.y, 40.0);
    }

    #[test]
    fn lift_moves_screen_position_up() {
        let iso = IsoProjection::default();
        let flat = iso.project(Vec3::new(30.0, 10.0, 0.0));
        let lifted = iso.project(Vec3::new(30.0, 10.0, 5.0));
        assert_eq!(lifted.x, flat.x);
        assert_eq!(lifted.y, flat.y - 5.0);
    }

    #[test]
    fn world_extent_excludes_border_ring() {
        assert_eq!(world_extent(32.0, 10), 256.0);
        assert!(in_world_bounds(Vec2::new(100.0, 100.0), 256.0));
        assert!(!in_world_bounds(Vec2::new(0.0, 100.0), 256.0));
        assert!(!in_world_bounds(Vec2::new(100.0, 256.0), 256.0));
        assert!(!in_world_bounds(Vec2::new(-5.0, 100.0), 256.0));
    }
}
