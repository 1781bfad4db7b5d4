//! Trait-based obstacle system for pathfinding collision detection

use bevy::prelude::*;

pub mod collision_shapes;
pub mod entity_obstacles;
pub mod environment_obstacles;
pub mod obstacle_manager;

pub use collision_shapes::*;
pub use entity_obstacles::*;
pub use environment_obstacles::*;
pub use obstacle_manager::*;

/// Core trait for objects that can obstruct an agent
pub trait Obstacle: Send + Sync {
    /// Get the obstacle's collision shape for pathfinding
    fn collision_shape(&self) -> CollisionShape;

    /// Get the world position of this obstacle
    fn world_position(&self) -> Vec2;

    /// Check if this obstacle blocks pathfinding at all
    fn blocks_pathfinding(&self) -> bool {
        true
    }

    /// The entity this obstacle stands for, if it is another agent
    fn source_entity(&self) -> Option<Entity> {
        None
    }

    /// Test if a world position is inside this obstacle grown by `margin`
    fn contains_point(&self, point: Vec2, margin: f32) -> bool {
        self.blocks_pathfinding()
            && self
                .collision_shape()
                .contains_point(point, self.world_position(), margin)
    }

    /// Test if a disc of `radius` centered at `point` overlaps this obstacle
    fn collides_with(&self, point: Vec2, radius: f32) -> bool {
        self.blocks_pathfinding()
            && self
                .collision_shape()
                .collides_with_disc(point, self.world_position(), radius)
    }
}

impl<T: Obstacle + ?Sized> Obstacle for &T {
    fn collision_shape(&self) -> CollisionShape {
        (**self).collision_shape()
    }

    fn world_position(&self) -> Vec2 {
        (**self).world_position()
    }

    fn blocks_pathfinding(&self) -> bool {
        (**self).blocks_pathfinding()
    }

    fn source_entity(&self) -> Option<Entity> {
        (**self).source_entity()
    }

    fn contains_point(&self, point: Vec2, margin: f32) -> bool {
        (**self).contains_point(point, margin)
    }

    fn collides_with(&self, point: Vec2, radius: f32) -> bool {
        (**self).collides_with(point, radius)
    }
}

impl<T: Obstacle + ?Sized> Obstacle for Box<T> {
    fn collision_shape(&self) -> CollisionShape {
        (**self).collision_shape()
    }

    fn world_position(&self) -> Vec2 {
        (**self).world_position()
    }

    fn blocks_pathfinding(&self) -> bool {
        (**self).blocks_pathfinding()
    }

    fn source_entity(&self) -> Option<Entity> {
        (**self).source_entity()
    }

    fn contains_point(&self, point: Vec2, margin: f32) -> bool {
        (**self).contains_point(point, margin)
    }

    fn collides_with(&self, point: Vec2, radius: f32) -> bool {
        (**self).collides_with(point, radius)
    }
}

/// Type-erased obstacle for collections
pub type BoxedObstacle = Box<dyn Obstacle>;

/// True if any obstacle overlaps a disc of `radius` at `point`
pub fn any_collides<O: Obstacle>(obstacles: &[O], point: Vec2, radius: f32) -> bool {
    obstacles
        .iter()
        .any(|obstacle| obstacle.collides_with(point, radius))
}
