use bevy::prelude::*;
use derive_more::{Display, From, Mul};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Mul, Display, From)]
pub struct Speed(pub f32);

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Mul, Display, From)]
pub struct Distance(pub f32);

impl Speed {
    pub fn new(value: f32) -> Self {
        Self(value.max(0.0))
    }
}

impl Distance {
    pub fn new(value: f32) -> Self {
        Self(value.max(0.0))
    }
}

/// Which strategy the navigator is currently using for an agent
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    /// Head straight for the goal
    #[default]
    #[display("bug")]
    Bug,
    /// Follow the last bounded-search path
    #[display("astar")]
    AStar,
}

impl NavigationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            NavigationMode::Bug => "bug",
            NavigationMode::AStar => "astar",
        }
    }
}

/// Per-agent navigation memory, owned by the agent and handed to the navigator every tick.
///
/// `path_index` never exceeds `path.len()`. Whenever the mode drops back to
/// [`NavigationMode::Bug`] the path is cleared.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct NavigationState {
    pub mode: NavigationMode,
    pub path: Vec<Vec2>,
    pub path_index: usize,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything; called whenever the agent starts pursuing a new goal
    pub fn reset(&mut self) {
        self.mode = NavigationMode::Bug;
        self.path.clear();
        self.path_index = 0;
    }

    /// Waypoint under the cursor, if the path is not exhausted
    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.path.get(self.path_index).copied()
    }

    pub fn is_path_exhausted(&self) -> bool {
        self.path_index >= self.path.len()
    }

    pub fn remaining_waypoints(&self) -> &[Vec2] {
        self.path.get(self.path_index..).unwrap_or(&[])
    }

    pub(crate) fn follow_path(&mut self, path: Vec<Vec2>) {
        self.mode = NavigationMode::AStar;
        self.path = path;
        self.path_index = 0;
    }
}

/// Steering point produced for one agent on one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextWaypoint {
    pub position: Vec2,
    pub mode: NavigationMode,
}

impl NextWaypoint {
    pub fn bug(position: Vec2) -> Self {
        Self {
            position,
            mode: NavigationMode::Bug,
        }
    }

    pub fn astar(position: Vec2) -> Self {
        Self {
            position,
            mode: NavigationMode::AStar,
        }
    }
}

impl std::fmt::Display for NextWaypoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.1}, {:.1}) [{}]",
            self.position.x, self.position.y, self.mode
        )
    }
}

/// A moving disc-shaped agent. Navigation state is created alongside it.
#[derive(Component, Debug, Clone, Copy)]
#[require(NavigationState, SteeringTarget)]
pub struct NavigationAgent {
    pub radius: f32,
    pub speed: Speed,
}

impl NavigationAgent {
    pub fn new(radius: f32, speed: Speed) -> Self {
        Self {
            radius: radius.max(0.0),
            speed,
        }
    }
}

/// Where the agent currently wants to go. Replacing it resets the agent's [`NavigationState`].
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct NavGoal(pub Vec2);

/// Latest navigator output for the agent, read by the movement integrator
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SteeringTarget(pub Option<NextWaypoint>);

/// Marker inserted once an agent reaches its goal
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Arrived;
