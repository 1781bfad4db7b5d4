use crate::components::NextWaypoint;
use bevy::prelude::*;

/// Pure steering calculation that can be tested without a Bevy runtime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringCalculation {
    /// World units per second, already limited so one tick never overshoots the waypoint
    pub velocity: Vec2,
    pub should_move: bool,
    pub distance_to_target: f32,
}

impl SteeringCalculation {
    const IDLE: Self = Self {
        velocity: Vec2::ZERO,
        should_move: false,
        distance_to_target: 0.0,
    };

    /// Displacement over one tick of `delta_time` seconds
    pub fn displacement(&self, delta_time: f32) -> Vec2 {
        self.velocity * delta_time
    }
}

/// Configuration for steering calculations
#[derive(Debug, Clone, Copy)]
pub struct SteeringConfig {
    pub speed: f32,
    pub stopping_distance: f32,
    pub delta_time: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            speed: 40.0,
            stopping_distance: 1.0,
            delta_time: 1.0 / 60.0,
        }
    }
}

/// Steer straight at the navigator's waypoint
pub fn calculate_steering(
    current_position: Vec2,
    waypoint: Option<NextWaypoint>,
    config: SteeringConfig,
) -> SteeringCalculation {
    let Some(waypoint) = waypoint else {
        return SteeringCalculation::IDLE;
    };

    let offset = waypoint.position - current_position;
    let distance = offset.length();

    if distance <= config.stopping_distance {
        return SteeringCalculation {
            distance_to_target: distance,
            ..SteeringCalculation::IDLE
        };
    }

    let direction = offset.normalize_or_zero();
    let max_move_distance = config.speed * config.delta_time;

    // Clamp movement to not overshoot the waypoint
    let move_distance = max_move_distance.min(distance);
    let velocity = if config.delta_time > 0.0 {
        direction * (move_distance / config.delta_time)
    } else {
        Vec2::ZERO
    };

    SteeringCalculation {
        velocity,
        should_move: velocity != Vec2::ZERO,
        distance_to_target: distance,
    }
}

/// True once an agent is within `stopping_distance` of its goal
pub fn has_arrived(current_position: Vec2, goal: Vec2, stopping_distance: f32) -> bool {
    current_position.distance(goal) <= stopping_distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_steering_calculation() {
        let config = SteeringConfig::default();
        let result = calculate_steering(
            Vec2::ZERO,
            Some(NextWaypoint::bug(Vec2::new(50.0, 0.0))),
            config,
        );

        assert!(result.should_move);
        assert_eq!(result.distance_to_target, 50.0);
        assert!((result.velocity.x - config.speed).abs() < 1e-4);
        assert_eq!(result.velocity.y, 0.0);
    }

    #[test]
    fn test_no_waypoint_no_movement() {
        let result = calculate_steering(Vec2::ZERO, None, SteeringConfig::default());

        assert!(!result.should_move);
        assert_eq!(result.velocity, Vec2::ZERO);
        assert_eq!(result.distance_to_target, 0.0);
    }

    #[test]
    fn test_within_stopping_distance_no_movement() {
        let result = calculate_steering(
            Vec2::ZERO,
            Some(NextWaypoint::astar(Vec2::new(0.5, 0.0))),
            SteeringConfig::default(),
        );

        assert!(!result.should_move);
        assert_eq!(result.distance_to_target, 0.5);
    }

    #[test]
    fn test_steering_does_not_overshoot() {
        let config = SteeringConfig {
            speed: 600.0,
            ..SteeringConfig::default()
        };
        let result = calculate_steering(
            Vec2::ZERO,
            Some(NextWaypoint::bug(Vec2::new(3.0, 4.0))),
            config,
        );

        let step = result.displacement(config.delta_time);
        assert!(result.should_move);
        assert!((step - Vec2::new(3.0, 4.0)).length() < 1e-4);
    }

    #[test]
    fn test_has_arrived() {
        assert!(has_arrived(Vec2::new(0.5, 0.0), Vec2::ZERO, 1.0));
        assert!(!has_arrived(Vec2::new(1.5, 0.0), Vec2::ZERO, 1.0));
    }
}
