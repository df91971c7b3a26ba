//! Binary collision gate.
//!
//! A hard yes/no test, not a physics resolver: the first obstacle that
//! overlaps the moving box rejects the motion, penetration depth is
//! never computed, and the verdict is re-evaluated from scratch every
//! frame.

use glam::Vec3;

use crate::world::{Aabb, ObstacleSet};

/// Index of the first obstacle overlapping `moving`, if any.
pub fn first_hit(moving: &Aabb, obstacles: &ObstacleSet) -> Option<usize> {
    obstacles.boxes().iter().position(|b| b.intersects(moving))
}

/// True if `moving` overlaps any obstacle.
#[inline]
pub fn blocked(moving: &Aabb, obstacles: &ObstacleSet) -> bool {
    first_hit(moving, obstacles).is_some()
}

/// Tight avatar box: `half` is the scaled half-size, `position` the
/// feet, so the box sits on the ground.
pub fn avatar_box(position: Vec3, half: Vec3) -> Aabb {
    Aabb::from_center_half(position + Vec3::Y * half.y, half)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_with(boxes: &[Aabb]) -> ObstacleSet {
        ObstacleSet::with_static(boxes.to_vec())
    }

    #[test]
    fn empty_set_never_blocks() {
        let moving = avatar_box(Vec3::ZERO, Vec3::ONE);
        assert!(!blocked(&moving, &set_with(&[])));
    }

    #[test]
    fn box_outside_all_obstacles_never_blocks() {
        let obstacles = set_with(&[
            Aabb::from_center_half(Vec3::new(50.0, 0.0, 0.0), Vec3::ONE),
            Aabb::from_center_half(Vec3::new(0.0, 0.0, -30.0), Vec3::ONE),
        ]);
        let moving = avatar_box(Vec3::ZERO, Vec3::ONE);
        assert!(!blocked(&moving, &obstacles));
    }

    #[test]
    fn overlap_on_all_axes_blocks() {
        let obstacles = set_with(&[Aabb::from_center_half(
            Vec3::new(0.5, 1.0, 0.5),
            Vec3::ONE,
        )]);
        let moving = avatar_box(Vec3::ZERO, Vec3::ONE);
        assert!(blocked(&moving, &obstacles));
    }

    #[test]
    fn first_hit_reports_the_earliest_obstacle() {
        let far = Aabb::from_center_half(Vec3::new(50.0, 0.0, 0.0), Vec3::ONE);
        let near = Aabb::from_center_half(Vec3::new(0.0, 1.0, 0.0), Vec3::ONE);
        let obstacles = set_with(&[far, near]);
        let moving = avatar_box(Vec3::ZERO, Vec3::ONE);
        assert_eq!(first_hit(&moving, &obstacles), Some(1));
    }

    #[test]
    fn avatar_box_sits_on_the_ground() {
        let b = avatar_box(Vec3::new(2.0, 3.0, 4.0), Vec3::new(1.0, 2.0, 1.0));
        assert_eq!(b.min.y, 3.0);
        assert_eq!(b.max.y, 7.0);
    }
}
