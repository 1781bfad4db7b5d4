//! Obstacle fields and agent rosters that drive a headless simulation

use crate::pathfinding::obstacles::{Obstacle, RectObstacle};
use crate::simulation::errors::{CrowdNavError, CrowdNavResult};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::{Validate, ValidationErrors};

pub mod generator;

pub use generator::{ScenarioGenerationConfig, ScenarioGenerator};

/// A complete simulation setup: static obstacles plus agents with their goals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ScenarioDefinition {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[serde(default)]
    pub obstacles: Vec<ObstacleDefinition>,
    #[validate(length(min = 1, max = 10000))]
    pub agents: Vec<AgentDefinition>,
}

/// Axis-aligned rectangular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct ObstacleDefinition {
    pub center: Vec2,
    #[validate(range(min = 0.0, max = 10000.0))]
    pub width: f32,
    #[validate(range(min = 0.0, max = 10000.0))]
    pub height: f32,
}

/// One agent: where it starts, where it is heading and how big it is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct AgentDefinition {
    pub start: Vec2,
    pub goal: Vec2,
    #[validate(range(min = 0.0, max = 100.0))]
    pub radius: f32,
    /// Overrides the configured agent speed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.1, max = 500.0))]
    pub speed: Option<f32>,
}

impl ObstacleDefinition {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    pub fn to_obstacle(&self) -> RectObstacle {
        RectObstacle::new(self.center, self.width, self.height)
    }
}

impl AgentDefinition {
    pub fn new(start: Vec2, goal: Vec2, radius: f32) -> Self {
        Self {
            start,
            goal,
            radius,
            speed: None,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }
}

impl ScenarioDefinition {
    /// Create a new scenario with validation
    pub fn new(
        name: String,
        obstacles: Vec<ObstacleDefinition>,
        agents: Vec<AgentDefinition>,
    ) -> CrowdNavResult<Self> {
        let scenario = Self {
            name,
            obstacles,
            agents,
        };
        scenario.check()?;
        Ok(scenario)
    }

    /// Field-level validation of the scenario and every entry, plus finite coordinates
    /// and agents that do not start inside an obstacle
    pub fn check(&self) -> CrowdNavResult<()> {
        self.validate().map_err(describe_errors)?;
        for obstacle in &self.obstacles {
            obstacle.validate().map_err(describe_errors)?;
        }
        for agent in &self.agents {
            agent.validate().map_err(describe_errors)?;
        }

        let all_finite = self.obstacles.iter().all(|o| o.center.is_finite())
            && self
                .agents
                .iter()
                .all(|a| a.start.is_finite() && a.goal.is_finite());
        if !all_finite {
            return Err(CrowdNavError::ScenarioValidationFailed {
                reason: "coordinates must be finite".to_string(),
            });
        }

        let obstacles = self.rect_obstacles();
        for (index, agent) in self.agents.iter().enumerate() {
            if obstacles
                .iter()
                .any(|o| o.collides_with(agent.start, agent.radius))
            {
                return Err(CrowdNavError::BlockedSpawnPosition {
                    index,
                    position: agent.start,
                });
            }
        }

        Ok(())
    }

    pub fn rect_obstacles(&self) -> Vec<RectObstacle> {
        self.obstacles.iter().map(|o| o.to_obstacle()).collect()
    }

    /// Load and validate a scenario from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CrowdNavResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CrowdNavError::ScenarioFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let scenario: ScenarioDefinition = toml::from_str(&contents)?;
        scenario.check()?;

        info!(
            "Loaded scenario '{}' with {} obstacles and {} agents from {}",
            scenario.name,
            scenario.obstacles.len(),
            scenario.agents.len(),
            path.display()
        );
        Ok(scenario)
    }

    /// Validate and write the scenario as TOML
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> CrowdNavResult<()> {
        self.check()?;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

fn describe_errors(errors: ValidationErrors) -> CrowdNavError {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            format!("{field}: {}", messages.join(", "))
        })
        .collect::<Vec<String>>()
        .join("; ");

    CrowdNavError::ScenarioValidationFailed { reason: details }
}
