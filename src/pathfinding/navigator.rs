//! Per-agent Bug/AStar navigation state machine

use crate::components::{NavigationMode, NavigationState, NextWaypoint};
use crate::pathfinding::PathfindingConfig;
use crate::pathfinding::obstacles::Obstacle;
use bevy::prelude::*;

/// Stateless navigation core; all per-agent memory lives in [`NavigationState`]
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    config: PathfindingConfig,
}

impl Navigator {
    pub fn new(config: PathfindingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PathfindingConfig {
        &self.config
    }

    /// Decide where the agent at `current` should steer this tick.
    ///
    /// In Bug mode the agent heads straight for the goal while it can see it. Once the
    /// direct line is blocked a bounded search is run and its path is followed in AStar
    /// mode until the goal comes back into view or the path runs out. An empty or
    /// exhausted path hands the goal back in Bug mode without checking line of sight.
    pub fn calculate_next_waypoint<O: Obstacle>(
        &self,
        current: Vec2,
        goal: Vec2,
        obstacles: &[O],
        radius: f32,
        state: &mut NavigationState,
    ) -> NextWaypoint {
        match state.mode {
            NavigationMode::Bug => {
                if self.has_line_of_sight(current, goal, obstacles, radius) {
                    return NextWaypoint::bug(goal);
                }

                let path = self.find_bounded_path(current, goal, obstacles, radius);
                debug!(
                    "Line of sight to ({:.1}, {:.1}) blocked, switching to astar with {} waypoints",
                    goal.x,
                    goal.y,
                    path.len()
                );
                state.follow_path(path);
                // The goal was just found to be out of sight, go straight to path following
                self.follow_path(current, goal, state)
            }
            NavigationMode::AStar => {
                if state.is_path_exhausted() {
                    return self.fall_back_to_goal(goal, state);
                }
                if self.has_line_of_sight(current, goal, obstacles, radius) {
                    debug!(
                        "Line of sight to ({:.1}, {:.1}) restored, switching to bug",
                        goal.x, goal.y
                    );
                    return self.fall_back_to_goal(goal, state);
                }
                self.follow_path(current, goal, state)
            }
        }
    }

    fn follow_path(&self, current: Vec2, goal: Vec2, state: &mut NavigationState) -> NextWaypoint {
        let Some(waypoint) = state.current_waypoint() else {
            return self.fall_back_to_goal(goal, state);
        };

        if current.distance(waypoint) >= self.config.waypoint_reach_distance {
            return NextWaypoint::astar(waypoint);
        }

        state.path_index += 1;
        match state.current_waypoint() {
            Some(next) => NextWaypoint::astar(next),
            None => self.fall_back_to_goal(goal, state),
        }
    }

    fn fall_back_to_goal(&self, goal: Vec2, state: &mut NavigationState) -> NextWaypoint {
        if state.mode == NavigationMode::AStar {
            debug!(
                "Leaving astar for ({:.1}, {:.1}) at waypoint {}/{}",
                goal.x,
                goal.y,
                state.path_index,
                state.path.len()
            );
        }
        state.reset();
        NextWaypoint::bug(goal)
    }
}
