use crate::components::{
    Distance, NavGoal, NavigationAgent, NavigationState, Speed, SteeringTarget,
};
use crate::pathfinding::obstacles::ObstacleSource;
use crate::resources::NavigationSettings;
use crate::scenario::ScenarioDefinition;
use bevy::prelude::*;

/// Check if a position is valid for spawning (not too close to other agents)
pub fn is_valid_spawn_position(
    position: Vec2,
    existing_positions: &[Vec2],
    min_distance: Distance,
) -> bool {
    existing_positions
        .iter()
        .all(|existing| position.distance(*existing) >= min_distance.0)
}

/// Spawn every obstacle and agent of `scenario` into `world`, returning the agent entities in order
pub fn spawn_scenario(
    world: &mut World,
    scenario: &ScenarioDefinition,
    settings: &NavigationSettings,
) -> Vec<Entity> {
    for obstacle in &scenario.obstacles {
        world.spawn((
            obstacle.to_obstacle(),
            Name::new("Obstacle"),
            Transform::from_translation(obstacle.center.extend(0.0)),
        ));
    }

    let agents: Vec<Entity> = scenario
        .agents
        .iter()
        .enumerate()
        .map(|(index, agent)| {
            let speed = agent.speed.unwrap_or(settings.agent_speed.get());
            world
                .spawn((
                    Name::new(format!("Agent {index}")),
                    Transform::from_translation(agent.start.extend(0.0)),
                    NavigationAgent::new(agent.radius, Speed::new(speed)),
                    NavigationState::new(),
                    NavGoal(agent.goal),
                    SteeringTarget::default(),
                    ObstacleSource::new(agent.radius),
                ))
                .id()
        })
        .collect();

    info!(
        "Spawned scenario '{}': {} obstacles, {} agents",
        scenario.name,
        scenario.obstacles.len(),
        agents.len()
    );
    agents
}
