//! Geometric collision shapes for obstacle detection

use bevy::prelude::*;

/// Geometric shapes for collision detection on the ground plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionShape {
    Circle { radius: f32 },
    Rectangle { half_extents: Vec2 },
    None,
}

impl CollisionShape {
    /// Check if a world position lies inside this shape grown by `margin` (boundary inclusive)
    pub fn contains_point(&self, world_pos: Vec2, shape_center: Vec2, margin: f32) -> bool {
        match self {
            CollisionShape::Circle { radius } => {
                world_pos.distance(shape_center) <= radius + margin
            }
            CollisionShape::Rectangle { half_extents } => {
                let rel_pos = world_pos - shape_center;
                rel_pos.x.abs() <= half_extents.x + margin
                    && rel_pos.y.abs() <= half_extents.y + margin
            }
            CollisionShape::None => false,
        }
    }

    /// Check if a disc centered at `world_pos` overlaps this shape.
    ///
    /// Touching is not overlapping; a zero radius reduces to point containment.
    pub fn collides_with_disc(&self, world_pos: Vec2, shape_center: Vec2, radius: f32) -> bool {
        if self.contains_point(world_pos, shape_center, 0.0) {
            return true;
        }

        match self {
            CollisionShape::Circle { radius: shape_radius } => {
                let gap = world_pos.distance(shape_center) - shape_radius;
                gap < radius
            }
            CollisionShape::Rectangle { half_extents } => {
                let min = shape_center - *half_extents;
                let max = shape_center + *half_extents;
                let closest = world_pos.clamp(min, max);
                world_pos.distance_squared(closest) < radius * radius
            }
            CollisionShape::None => false,
        }
    }
}
