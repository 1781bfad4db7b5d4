use crate::components::Distance;
use crate::pathfinding::obstacles::{RectObstacle, any_collides};
use crate::scenario::{AgentDefinition, ObstacleDefinition, ScenarioDefinition};
use crate::simulation::errors::{CrowdNavError, CrowdNavResult};
use crate::simulation::spawning::is_valid_spawn_position;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// Attempts per agent before generation gives up on an overcrowded field
const MAX_PLACEMENT_ATTEMPTS: u32 = 200;

#[derive(Debug, Clone)]
pub struct ScenarioGenerationConfig {
    /// Half the side of the square world centered on the origin
    pub half_extent: f32,
    pub obstacle_count: usize,
    pub min_obstacle_size: f32,
    pub max_obstacle_size: f32,
    pub agent_count: usize,
    pub agent_radius: f32,
    /// Minimum spacing between agent start positions
    pub agent_spacing: Distance,
}

impl Default for ScenarioGenerationConfig {
    fn default() -> Self {
        Self {
            half_extent: 200.0,
            obstacle_count: 12,
            min_obstacle_size: 10.0,
            max_obstacle_size: 60.0,
            agent_count: 8,
            agent_radius: 4.0,
            agent_spacing: Distance::new(12.0),
        }
    }
}

/// Seeded random obstacle fields with agents that start and end in free space
pub struct ScenarioGenerator {
    config: ScenarioGenerationConfig,
    rng: Pcg64,
}

impl ScenarioGenerator {
    pub fn new(config: ScenarioGenerationConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self, name: impl Into<String>) -> CrowdNavResult<ScenarioDefinition> {
        let obstacles = self.generate_obstacles();
        let rects: Vec<RectObstacle> = obstacles.iter().map(|o| o.to_obstacle()).collect();
        let agents = self.generate_agents(&rects)?;

        debug!(
            "Generated {} obstacles and {} agents",
            obstacles.len(),
            agents.len()
        );
        ScenarioDefinition::new(name.into(), obstacles, agents)
    }

    fn generate_obstacles(&mut self) -> Vec<ObstacleDefinition> {
        let half = self.config.half_extent;
        let min_size = self.config.min_obstacle_size;
        let max_size = self.config.max_obstacle_size.max(min_size + f32::EPSILON);

        (0..self.config.obstacle_count)
            .map(|_| {
                let center = Vec2::new(
                    self.rng.gen_range(-half..half),
                    self.rng.gen_range(-half..half),
                );
                let width = self.rng.gen_range(min_size..max_size);
                let height = self.rng.gen_range(min_size..max_size);
                ObstacleDefinition::new(center, width, height)
            })
            .collect()
    }

    fn generate_agents(
        &mut self,
        obstacles: &[RectObstacle],
    ) -> CrowdNavResult<Vec<AgentDefinition>> {
        let radius = self.config.agent_radius;
        let spacing = self.config.agent_spacing;
        let mut starts: Vec<Vec2> = Vec::with_capacity(self.config.agent_count);
        let mut agents = Vec::with_capacity(self.config.agent_count);

        for index in 0..self.config.agent_count {
            let start = self
                .sample_free_point(obstacles, radius, |p| {
                    is_valid_spawn_position(p, &starts, spacing)
                })
                .ok_or_else(|| CrowdNavError::InvalidInput {
                    reason: format!("no free start position for agent {index}"),
                })?;
            let goal = self
                .sample_free_point(obstacles, radius, |_| true)
                .ok_or_else(|| CrowdNavError::InvalidInput {
                    reason: format!("no free goal position for agent {index}"),
                })?;

            starts.push(start);
            agents.push(AgentDefinition::new(start, goal, radius));
        }

        Ok(agents)
    }

    fn sample_free_point(
        &mut self,
        obstacles: &[RectObstacle],
        radius: f32,
        accept: impl Fn(Vec2) -> bool,
    ) -> Option<Vec2> {
        let half = self.config.half_extent;
        (0..MAX_PLACEMENT_ATTEMPTS).find_map(|_| {
            let point = Vec2::new(
                self.rng.gen_range(-half..half),
                self.rng.gen_range(-half..half),
            );
            (!any_collides(obstacles, point, radius) && accept(point)).then_some(point)
        })
    }
}
