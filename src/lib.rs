pub mod components;
pub mod config;
pub mod pathfinding;
pub mod plugins;
pub mod resources;
pub mod scenario;
pub mod simulation;

// Selective re-exports for external consumers

// Plugins - main.rs and integration tests drive the simulation through these
pub use crate::plugins::*;

// Navigation core
pub use crate::components::{NavigationMode, NavigationState, NextWaypoint};
pub use crate::pathfinding::{
    Navigator, Obstacle, PathfindingConfig, RectObstacle, calculate_next_waypoint,
    find_bounded_path, has_line_of_sight, has_line_of_sight_single_path,
};

// Errors
pub use crate::simulation::errors::{CrowdNavError, CrowdNavResult};
