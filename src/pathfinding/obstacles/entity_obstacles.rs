//! Other moving agents treated as disc obstacles

use crate::pathfinding::obstacles::{CollisionShape, Obstacle};
use bevy::prelude::*;

/// A moving agent seen as an obstacle by everyone else
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentObstacle {
    pub entity_id: Entity,
    pub position: Vec2,
    pub collision_radius: f32,
}

impl AgentObstacle {
    pub fn new(entity_id: Entity, position: Vec2, collision_radius: f32) -> Self {
        Self {
            entity_id,
            position,
            collision_radius: collision_radius.max(0.0),
        }
    }
}

impl Obstacle for AgentObstacle {
    fn collision_shape(&self) -> CollisionShape {
        CollisionShape::Circle {
            radius: self.collision_radius,
        }
    }

    fn world_position(&self) -> Vec2 {
        self.position
    }

    fn source_entity(&self) -> Option<Entity> {
        Some(self.entity_id)
    }
}

/// Component to mark agents that other agents must steer around
#[derive(Component, Debug, Clone)]
pub struct ObstacleSource {
    pub collision_radius: f32,
    pub blocks_pathfinding: bool,
}

impl ObstacleSource {
    pub fn new(collision_radius: f32) -> Self {
        Self {
            collision_radius,
            blocks_pathfinding: true,
        }
    }

    /// Disable pathfinding blocking for this obstacle source
    pub fn disable_blocking(&mut self) {
        self.blocks_pathfinding = false;
    }

    /// Enable pathfinding blocking for this obstacle source
    pub fn enable_blocking(&mut self) {
        self.blocks_pathfinding = true;
    }
}
