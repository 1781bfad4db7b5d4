//! Navigation core: line of sight, bounded grid search and the Bug/AStar state machine.
//!
//! Everything here is a pure function of its inputs plus the caller-owned
//! [`NavigationState`]. Obstacles are read-only for the duration of a call.

use crate::components::{NavigationState, NextWaypoint};
use bevy::prelude::*;

pub mod grid_search;
pub mod line_of_sight;
pub mod navigator;
pub mod obstacles;

pub use grid_search::{GridKey, SearchOutcome, SearchReport};
pub use line_of_sight::{LineOfSightReport, edge_offsets};
pub use navigator::Navigator;
pub use obstacles::*;

pub const DEFAULT_CELL_SIZE: f32 = 10.0;
pub const DEFAULT_MAX_EXPANSIONS: usize = 300;
pub const DEFAULT_LOS_SAMPLE_STEP: f32 = 2.0;
pub const DEFAULT_WAYPOINT_REACH_DISTANCE: f32 = 5.0;

/// Tuning for the navigation core
#[derive(Debug, Clone, PartialEq)]
pub struct PathfindingConfig {
    /// Grid spacing for the bounded search, in world units
    pub cell_size: f32,
    /// Hard cap on node expansions per search call
    pub max_expansions: usize,
    /// Distance between line-of-sight samples
    pub los_sample_step: f32,
    /// An agent closer than this to its current waypoint moves on to the next one
    pub waypoint_reach_distance: f32,
}

impl Default for PathfindingConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            los_sample_step: DEFAULT_LOS_SAMPLE_STEP,
            waypoint_reach_distance: DEFAULT_WAYPOINT_REACH_DISTANCE,
        }
    }
}

/// [`Navigator::has_line_of_sight`] with the default configuration
pub fn has_line_of_sight<O: Obstacle>(from: Vec2, to: Vec2, obstacles: &[O], radius: f32) -> bool {
    Navigator::default().has_line_of_sight(from, to, obstacles, radius)
}

/// [`Navigator::has_line_of_sight_single_path`] with the default configuration
pub fn has_line_of_sight_single_path<O: Obstacle>(
    from: Vec2,
    to: Vec2,
    obstacles: &[O],
    radius: f32,
) -> bool {
    Navigator::default().has_line_of_sight_single_path(from, to, obstacles, radius)
}

/// [`Navigator::find_bounded_path`] with the default configuration
pub fn find_bounded_path<O: Obstacle>(
    start: Vec2,
    goal: Vec2,
    obstacles: &[O],
    radius: f32,
) -> Vec<Vec2> {
    Navigator::default().find_bounded_path(start, goal, obstacles, radius)
}

/// [`Navigator::find_bounded_path_report`] with the default configuration
pub fn find_bounded_path_report<O: Obstacle>(
    start: Vec2,
    goal: Vec2,
    obstacles: &[O],
    radius: f32,
) -> SearchReport {
    Navigator::default().find_bounded_path_report(start, goal, obstacles, radius)
}

/// [`Navigator::calculate_next_waypoint`] with the default configuration
pub fn calculate_next_waypoint<O: Obstacle>(
    current: Vec2,
    goal: Vec2,
    obstacles: &[O],
    radius: f32,
    state: &mut NavigationState,
) -> NextWaypoint {
    Navigator::default().calculate_next_waypoint(current, goal, obstacles, radius, state)
}
