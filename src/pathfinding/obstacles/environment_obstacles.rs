//! Static rectangular obstacles placed in the world

use crate::pathfinding::obstacles::{CollisionShape, Obstacle};
use bevy::prelude::*;

/// Axis-aligned rectangle given by its center and full size
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RectObstacle {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

impl RectObstacle {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

impl Obstacle for RectObstacle {
    fn collision_shape(&self) -> CollisionShape {
        CollisionShape::Rectangle {
            half_extents: self.half_extents(),
        }
    }

    fn world_position(&self) -> Vec2 {
        self.center
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_bounds() {
        let rect = RectObstacle::new(Vec2::new(50.0, 50.0), 40.0, 20.0);

        assert_eq!(rect.half_extents(), Vec2::new(20.0, 10.0));
        assert_eq!(
            rect.collision_shape(),
            CollisionShape::Rectangle {
                half_extents: Vec2::new(20.0, 10.0)
            }
        );
    }

    #[test]
    fn test_negative_size_is_clamped() {
        let rect = RectObstacle::new(Vec2::ZERO, -3.0, 2.0);
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 2.0);
    }

    #[test]
    fn test_rect_collides_with_disc() {
        let rect = RectObstacle::new(Vec2::new(50.0, 50.0), 10.0, 10.0);

        assert!(rect.collides_with(Vec2::new(50.0, 50.0), 0.0));
        assert!(rect.collides_with(Vec2::new(41.0, 50.0), 5.0));
        assert!(!rect.collides_with(Vec2::new(39.0, 50.0), 5.0));
        assert!(rect.contains_point(Vec2::new(56.0, 50.0), 1.0));
        assert!(!rect.contains_point(Vec2::new(56.0, 50.0), 0.5));
        assert_eq!(rect.source_entity(), None);
    }
}
