use crate::config::range_types::*;
use crate::pathfinding::PathfindingConfig;
use crate::simulation::steering::SteeringConfig;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// User-tunable navigation and simulation settings, stored in `config.toml`
#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
// NOTE: When adding new fields, also clamp them in `sanitized`
pub struct NavigationSettings {
    // Navigation core
    pub cell_size: CellSize,
    pub max_expansions: ExpansionBudget,
    pub los_sample_step: SampleStep,
    pub waypoint_reach_distance: ReachDistance,

    /// Treat other agents as disc obstacles
    pub agents_as_obstacles: bool,

    // Movement
    pub agent_speed: MovementSpeed,
    pub stopping_distance: StoppingDistance,
    pub tick_seconds: TickSeconds,
}

impl NavigationSettings {
    /// Copy with every value pulled back inside its bounds
    pub fn sanitized(&self) -> Self {
        Self {
            cell_size: self.cell_size.clamped(),
            max_expansions: self.max_expansions.clamped(),
            los_sample_step: self.los_sample_step.clamped(),
            waypoint_reach_distance: self.waypoint_reach_distance.clamped(),
            agents_as_obstacles: self.agents_as_obstacles,
            agent_speed: self.agent_speed.clamped(),
            stopping_distance: self.stopping_distance.clamped(),
            tick_seconds: self.tick_seconds.clamped(),
        }
    }

    pub fn pathfinding_config(&self) -> PathfindingConfig {
        PathfindingConfig {
            cell_size: self.cell_size.get(),
            max_expansions: self.max_expansions.get(),
            los_sample_step: self.los_sample_step.get(),
            waypoint_reach_distance: self.waypoint_reach_distance.get(),
        }
    }

    /// Steering parameters for an agent moving at `speed`
    pub fn steering_config(&self, speed: f32) -> SteeringConfig {
        SteeringConfig {
            speed,
            stopping_distance: self.stopping_distance.get(),
            delta_time: self.tick_seconds.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_match_core_defaults() {
        let settings = NavigationSettings::default();

        assert_eq!(settings.pathfinding_config(), PathfindingConfig::default());
        assert!(!settings.agents_as_obstacles);
        assert_eq!(settings.steering_config(7.0).speed, 7.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: NavigationSettings =
            toml::from_str("max_expansions = 50\nagents_as_obstacles = true").unwrap();

        assert_eq!(settings.max_expansions.get(), 50);
        assert!(settings.agents_as_obstacles);
        assert_eq!(settings.cell_size.get(), 10.0);
    }

    #[test]
    fn test_sanitized_clamps_hand_edited_values() {
        let settings: NavigationSettings =
            toml::from_str("cell_size = 0.0\ntick_seconds = 10.0").unwrap();
        let clean = settings.sanitized();

        assert_eq!(clean.cell_size.get(), 1.0);
        assert_eq!(clean.tick_seconds.get(), 1.0);
        assert_eq!(clean.max_expansions.get(), 300);
    }
}
