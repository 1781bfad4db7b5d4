use crate::components::*;
use crate::pathfinding::{AgentObstacle, Navigator, ObstacleSet, ObstacleSource, RectObstacle};
use crate::resources::NavigationSettings;
use crate::simulation::steering::{calculate_steering, has_arrived};
use bevy::prelude::*;

/// Drives every [`NavigationAgent`] toward its [`NavGoal`] once per `Update`
pub struct NavigationPlugin;

/// Ordered stages of one navigation tick
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationSystems {
    ResetGoals,
    CollectObstacles,
    Navigate,
    Steer,
}

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NavigationSettings>()
            .init_resource::<ObstacleSet>()
            .configure_sets(
                Update,
                (
                    NavigationSystems::ResetGoals,
                    NavigationSystems::CollectObstacles,
                    NavigationSystems::Navigate,
                    NavigationSystems::Steer,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    reset_navigation_on_new_goal.in_set(NavigationSystems::ResetGoals),
                    collect_obstacles.in_set(NavigationSystems::CollectObstacles),
                    update_navigation.in_set(NavigationSystems::Navigate),
                    apply_steering.in_set(NavigationSystems::Steer),
                ),
            );
    }
}

/// A new goal means the old path is meaningless
fn reset_navigation_on_new_goal(
    mut commands: Commands,
    mut agents: Query<(Entity, &mut NavigationState, Has<Arrived>), Changed<NavGoal>>,
) {
    for (entity, mut state, arrived) in agents.iter_mut() {
        state.reset();
        if arrived {
            commands.entity(entity).remove::<Arrived>();
        }
    }
}

/// Rebuild the per-tick obstacle snapshot
fn collect_obstacles(
    mut obstacle_set: ResMut<ObstacleSet>,
    settings: Res<NavigationSettings>,
    rects: Query<&RectObstacle>,
    sources: Query<(Entity, &Transform, &ObstacleSource)>,
) {
    obstacle_set.clear_all();
    obstacle_set.add_statics(rects.iter().copied());

    if settings.agents_as_obstacles {
        for (entity, transform, source) in sources.iter() {
            if source.blocks_pathfinding {
                obstacle_set.add_agent(AgentObstacle::new(
                    entity,
                    transform.translation.truncate(),
                    source.collision_radius,
                ));
            }
        }
    }
}

fn update_navigation(
    obstacle_set: Res<ObstacleSet>,
    settings: Res<NavigationSettings>,
    mut agents: Query<
        (
            Entity,
            &Transform,
            &NavigationAgent,
            &NavGoal,
            &mut NavigationState,
            &mut SteeringTarget,
        ),
        Without<Arrived>,
    >,
) {
    let navigator = Navigator::new(settings.pathfinding_config());

    for (entity, transform, agent, goal, mut state, mut target) in agents.iter_mut() {
        let obstacles = obstacle_set.excluding(entity);
        let previous_mode = state.mode;
        let next = navigator.calculate_next_waypoint(
            transform.translation.truncate(),
            goal.0,
            &obstacles,
            agent.radius,
            &mut state,
        );

        if next.mode != previous_mode {
            debug!("{entity}: {previous_mode} -> {}", next);
        }
        target.0 = Some(next);
    }
}

fn apply_steering(
    mut commands: Commands,
    settings: Res<NavigationSettings>,
    mut agents: Query<
        (
            Entity,
            &mut Transform,
            &NavigationAgent,
            &NavGoal,
            &mut SteeringTarget,
        ),
        Without<Arrived>,
    >,
) {
    let stopping_distance = settings.stopping_distance.get();
    let delta_time = settings.tick_seconds.get();

    for (entity, mut transform, agent, goal, mut target) in agents.iter_mut() {
        let position = transform.translation.truncate();

        if has_arrived(position, goal.0, stopping_distance) {
            info!("{entity} arrived at ({:.1}, {:.1})", goal.0.x, goal.0.y);
            target.0 = None;
            commands.entity(entity).remove::<NavGoal>().insert(Arrived);
            continue;
        }

        let mut steering_config = settings.steering_config(agent.speed.0);
        // Path waypoints are walked onto; the navigator advances once within reach distance
        if target.0.is_some_and(|next| next.mode == NavigationMode::AStar) {
            steering_config.stopping_distance = 0.0;
        }

        let steering = calculate_steering(position, target.0, steering_config);
        if steering.should_move {
            transform.translation += steering.displacement(delta_time).extend(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(settings: NavigationSettings) -> App {
        let mut app = App::new();
        app.insert_resource(settings).add_plugins(NavigationPlugin);
        app
    }

    fn spawn_agent(app: &mut App, start: Vec2, goal: Vec2, radius: f32) -> Entity {
        app.world_mut()
            .spawn((
                Transform::from_translation(start.extend(0.0)),
                NavigationAgent::new(radius, Speed::new(40.0)),
                NavGoal(goal),
            ))
            .id()
    }

    #[test]
    fn test_required_components_are_added() {
        let mut app = test_app(NavigationSettings::default());
        let agent = spawn_agent(&mut app, Vec2::ZERO, Vec2::new(100.0, 0.0), 2.0);

        let entity = app.world().entity(agent);
        assert!(entity.contains::<NavigationState>());
        assert!(entity.contains::<SteeringTarget>());
    }

    #[test]
    fn test_one_tick_moves_toward_goal() {
        let mut app = test_app(NavigationSettings::default());
        let agent = spawn_agent(&mut app, Vec2::ZERO, Vec2::new(100.0, 0.0), 2.0);

        app.update();

        let entity = app.world().entity(agent);
        let target = entity.get::<SteeringTarget>().and_then(|t| t.0);
        assert_eq!(target, Some(NextWaypoint::bug(Vec2::new(100.0, 0.0))));
        let x = entity.get::<Transform>().map(|t| t.translation.x).unwrap_or(0.0);
        assert!(x > 0.0 && x < 1.0);
    }

    #[test]
    fn test_obstacle_snapshot_respects_agent_flag() {
        let mut app = test_app(NavigationSettings::default());
        app.world_mut()
            .spawn(RectObstacle::new(Vec2::new(50.0, 50.0), 10.0, 10.0));
        let a = spawn_agent(&mut app, Vec2::ZERO, Vec2::new(100.0, 0.0), 2.0);
        app.world_mut().entity_mut(a).insert(ObstacleSource::new(2.0));

        app.update();
        assert_eq!(app.world().resource::<ObstacleSet>().obstacle_counts(), (1, 0));

        app.world_mut()
            .resource_mut::<NavigationSettings>()
            .agents_as_obstacles = true;
        app.update();
        assert_eq!(app.world().resource::<ObstacleSet>().obstacle_counts(), (1, 1));

        if let Some(mut source) = app.world_mut().entity_mut(a).get_mut::<ObstacleSource>() {
            source.disable_blocking();
        }
        app.update();
        assert_eq!(app.world().resource::<ObstacleSet>().obstacle_counts(), (1, 0));
    }

    #[test]
    fn test_new_goal_resets_state_and_arrival() {
        let mut app = test_app(NavigationSettings::default());
        let agent = spawn_agent(&mut app, Vec2::ZERO, Vec2::new(0.5, 0.0), 2.0);

        app.update();
        assert!(app.world().entity(agent).contains::<Arrived>());
        assert!(!app.world().entity(agent).contains::<NavGoal>());

        app.world_mut().entity_mut(agent).insert((
            NavGoal(Vec2::new(50.0, 0.0)),
            NavigationState {
                mode: NavigationMode::AStar,
                path: vec![Vec2::new(9.0, 9.0)],
                path_index: 0,
            },
        ));
        app.update();

        let entity = app.world().entity(agent);
        assert!(!entity.contains::<Arrived>());
        assert_eq!(
            entity.get::<NavigationState>().map(|s| s.mode),
            Some(NavigationMode::Bug)
        );
    }
}
