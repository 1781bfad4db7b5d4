//! Drive the navigation plugin through a headless app

use bevy::prelude::*;
use crowdnav::NavigationPlugin;
use crowdnav::components::*;
use crowdnav::config::range_types::StoppingDistance;
use crowdnav::pathfinding::{ObstacleSource, RectObstacle};
use crowdnav::resources::NavigationSettings;
use crowdnav::scenario::{ScenarioGenerationConfig, ScenarioGenerator};
use crowdnav::simulation::spawning::spawn_scenario;

fn headless_app(settings: NavigationSettings) -> App {
    let mut app = App::new();
    app.insert_resource(settings).add_plugins(NavigationPlugin);
    app
}

fn spawn_walker(app: &mut App, start: Vec2, goal: Vec2, radius: f32) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(start.extend(0.0)),
            NavigationAgent::new(radius, Speed::new(40.0)),
            NavGoal(goal),
            ObstacleSource::new(radius),
        ))
        .id()
}

fn run_until_arrived(app: &mut App, agent: Entity, max_ticks: usize) -> Option<usize> {
    for tick in 1..=max_ticks {
        app.update();
        if app.world().entity(agent).contains::<Arrived>() {
            return Some(tick);
        }
    }
    None
}

fn mode_of(app: &App, agent: Entity) -> Option<NavigationMode> {
    app.world()
        .entity(agent)
        .get::<NavigationState>()
        .map(|state| state.mode)
}

#[test]
fn agent_with_clear_path_walks_straight_to_goal() {
    let mut app = headless_app(NavigationSettings::default());
    let agent = spawn_walker(&mut app, Vec2::ZERO, Vec2::new(100.0, 0.0), 2.0);

    let ticks = run_until_arrived(&mut app, agent, 400).expect("agent should arrive");

    // 40 units/s at 60 ticks/s covers 99 units in about 149 ticks
    assert!(ticks > 100 && ticks < 200, "arrived after {ticks} ticks");
    assert_eq!(mode_of(&app, agent), Some(NavigationMode::Bug));
    let position = app
        .world()
        .entity(agent)
        .get::<Transform>()
        .map(|t| t.translation.truncate())
        .unwrap_or_default();
    assert!(position.distance(Vec2::new(100.0, 0.0)) <= 1.0);
    assert!(position.y.abs() < 1e-3);
}

#[test]
fn agent_detours_around_wall() {
    let mut app = headless_app(NavigationSettings::default());
    app.world_mut()
        .spawn(RectObstacle::new(Vec2::new(50.0, 0.0), 10.0, 40.0));
    let agent = spawn_walker(&mut app, Vec2::ZERO, Vec2::new(100.0, 0.0), 5.0);

    app.update();
    assert_eq!(mode_of(&app, agent), Some(NavigationMode::AStar));

    let mut max_offset: f32 = 0.0;
    let mut arrived = false;
    for _ in 0..1500 {
        app.update();
        let entity = app.world().entity(agent);
        if let Some(transform) = entity.get::<Transform>() {
            max_offset = max_offset.max(transform.translation.y.abs());
        }
        if entity.contains::<Arrived>() {
            arrived = true;
            break;
        }
    }

    assert!(arrived);
    // The wall spans |y| <= 20, so the agent must have gone around it
    assert!(max_offset > 20.0, "max offset {max_offset}");
}

#[test]
fn stopping_distance_wider_than_reach_still_follows_path() {
    let settings = NavigationSettings {
        stopping_distance: StoppingDistance::new(8.0),
        ..Default::default()
    }
    .sanitized();
    assert!(settings.stopping_distance.get() > settings.waypoint_reach_distance.get());

    let mut app = headless_app(settings);
    app.world_mut()
        .spawn(RectObstacle::new(Vec2::new(50.0, 0.0), 10.0, 40.0));
    let agent = spawn_walker(&mut app, Vec2::ZERO, Vec2::new(100.0, 0.0), 5.0);

    app.update();
    assert_eq!(mode_of(&app, agent), Some(NavigationMode::AStar));

    let ticks = run_until_arrived(&mut app, agent, 3000);
    assert!(ticks.is_some(), "agent stalled on a path waypoint");
}

#[test]
fn other_agents_block_only_when_enabled() {
    for (enabled, expected) in [(true, NavigationMode::AStar), (false, NavigationMode::Bug)] {
        let settings = NavigationSettings {
            agents_as_obstacles: enabled,
            ..Default::default()
        };
        let mut app = headless_app(settings);
        let walker = spawn_walker(&mut app, Vec2::ZERO, Vec2::new(100.0, 0.0), 2.0);
        // Stands still: no goal
        app.world_mut().spawn((
            Transform::from_xyz(50.0, 0.0, 0.0),
            NavigationAgent::new(3.0, Speed::new(40.0)),
            ObstacleSource::new(3.0),
        ));

        app.update();

        assert_eq!(mode_of(&app, walker), Some(expected), "agents_as_obstacles = {enabled}");
    }
}

#[test]
fn generated_scenario_runs_headless() {
    let config = ScenarioGenerationConfig {
        agent_count: 6,
        obstacle_count: 10,
        ..Default::default()
    };
    let scenario = ScenarioGenerator::new(config, 11)
        .generate("smoke")
        .expect("generation should succeed");
    let settings = NavigationSettings {
        agents_as_obstacles: true,
        ..Default::default()
    };
    let mut app = headless_app(settings.clone());
    let agents = spawn_scenario(app.world_mut(), &scenario, &settings);

    app.update();

    for agent in &agents {
        let entity = app.world().entity(*agent);
        let steering = entity.get::<SteeringTarget>().and_then(|t| t.0);
        assert!(entity.contains::<Arrived>() || steering.is_some());
    }

    for _ in 0..300 {
        app.update();
    }
    for agent in &agents {
        let state = app.world().entity(*agent).get::<NavigationState>().cloned();
        let state = state.expect("agents keep their navigation state");
        assert!(state.path_index <= state.path.len());
    }
}
