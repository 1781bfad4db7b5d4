use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use crowdnav::components::{Arrived, NavigationMode, NavigationState};
use crowdnav::config::{get_config_path, load_config, save_config};
use crowdnav::scenario::{ScenarioDefinition, ScenarioGenerationConfig, ScenarioGenerator};
use crowdnav::simulation::spawning::spawn_scenario;
use crowdnav::{CrowdNavError, CrowdNavResult, NavigationPlugin};
use std::path::PathBuf;

#[derive(Parser, Clone)]
#[command(name = "crowdnav")]
#[command(about = "Run a headless crowd navigation simulation")]
struct Args {
    /// Scenario file (TOML). A random scenario is generated when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Random seed for the generated scenario
    #[arg(long)]
    seed: Option<u64>,

    /// Number of agents in the generated scenario
    #[arg(long, default_value = "8")]
    agents: usize,

    /// Number of obstacles in the generated scenario
    #[arg(long, default_value = "12")]
    obstacles: usize,

    /// Maximum number of simulation ticks
    #[arg(long, default_value = "1200")]
    ticks: u32,

    /// Treat other agents as obstacles when navigating
    #[arg(long)]
    agents_as_obstacles: bool,

    /// Write the scenario that was run to this TOML file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Persist the effective settings to the user config file
    #[arg(long)]
    save_config: bool,
}

fn main() -> CrowdNavResult<()> {
    let args = Args::parse();

    if args.ticks == 0 {
        return Err(CrowdNavError::InvalidInput {
            reason: "--ticks must be at least 1".to_string(),
        });
    }
    if args.scenario.is_none() && args.agents == 0 {
        return Err(CrowdNavError::InvalidInput {
            reason: "--agents must be at least 1".to_string(),
        });
    }

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()));

    let mut settings = load_config();
    if args.agents_as_obstacles {
        settings.agents_as_obstacles = true;
    }
    if args.save_config {
        save_config(&settings)?;
        if let Some(path) = get_config_path() {
            info!("Saved settings to {}", path.display());
        }
    }

    let scenario = match &args.scenario {
        Some(path) => ScenarioDefinition::load_from_file(path)?,
        None => {
            let seed = args.seed.unwrap_or_else(rand::random);
            let config = ScenarioGenerationConfig {
                agent_count: args.agents,
                obstacle_count: args.obstacles,
                ..Default::default()
            };
            info!("Generating scenario with seed {seed}");
            ScenarioGenerator::new(config, seed).generate(format!("generated-{seed}"))?
        }
    };

    if let Some(path) = &args.save {
        scenario.save_to_file(path)?;
        info!("Saved scenario to {}", path.display());
    }

    app.insert_resource(settings.clone())
        .add_plugins(NavigationPlugin);
    app.finish();
    app.cleanup();

    let agents = spawn_scenario(app.world_mut(), &scenario, &settings);

    let mut ticks_run = 0;
    for _ in 0..args.ticks {
        app.update();
        ticks_run += 1;

        let arrived = count_arrived(app.world_mut());
        if arrived == agents.len() {
            break;
        }
    }

    let mut query = app
        .world_mut()
        .query::<(Has<Arrived>, &NavigationState)>();
    let (mut arrived, mut bug, mut astar) = (0, 0, 0);
    for (has_arrived, state) in query.iter(app.world()) {
        if has_arrived {
            arrived += 1;
        } else {
            match state.mode {
                NavigationMode::Bug => bug += 1,
                NavigationMode::AStar => astar += 1,
            }
        }
    }

    info!(
        "Scenario '{}' after {} ticks: {}/{} arrived, {} in bug mode, {} in astar mode",
        scenario.name,
        ticks_run,
        arrived,
        agents.len(),
        bug,
        astar
    );
    println!(
        "{}: {} ticks, {}/{} arrived ({} bug, {} astar)",
        scenario.name,
        ticks_run,
        arrived,
        agents.len(),
        bug,
        astar
    );

    Ok(())
}

fn count_arrived(world: &mut World) -> usize {
    world
        .query_filtered::<(), With<Arrived>>()
        .iter(world)
        .count()
}
