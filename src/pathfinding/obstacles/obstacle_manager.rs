//! Per-tick obstacle snapshot shared by every agent

use crate::pathfinding::obstacles::*;

/// Obstacles visible to the navigator during one tick.
///
/// Rebuilt at the start of each tick and only read while agents navigate.
#[derive(Resource, Default, Debug, Clone)]
pub struct ObstacleSet {
    static_obstacles: Vec<RectObstacle>,
    dynamic_obstacles: Vec<AgentObstacle>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_static(&mut self, obstacle: RectObstacle) {
        self.static_obstacles.push(obstacle);
    }

    pub fn add_statics(&mut self, obstacles: impl IntoIterator<Item = RectObstacle>) {
        self.static_obstacles.extend(obstacles);
    }

    pub fn add_agent(&mut self, obstacle: AgentObstacle) {
        self.dynamic_obstacles.push(obstacle);
    }

    /// Clear all agent obstacles (called each tick)
    pub fn clear_dynamic_obstacles(&mut self) {
        self.dynamic_obstacles.clear();
    }

    pub fn clear_all(&mut self) {
        self.static_obstacles.clear();
        self.dynamic_obstacles.clear();
    }

    /// Get count of obstacles by kind: (static, dynamic)
    pub fn obstacle_counts(&self) -> (usize, usize) {
        (self.static_obstacles.len(), self.dynamic_obstacles.len())
    }

    pub fn static_obstacles(&self) -> &[RectObstacle] {
        &self.static_obstacles
    }

    pub fn dynamic_obstacles(&self) -> &[AgentObstacle] {
        &self.dynamic_obstacles
    }

    /// The snapshot as seen by `entity`: an agent never blocks itself
    pub fn excluding(&self, entity: Entity) -> Vec<&dyn Obstacle> {
        self.static_obstacles
            .iter()
            .map(|o| o as &dyn Obstacle)
            .chain(
                self.dynamic_obstacles
                    .iter()
                    .filter(|o| o.entity_id != entity)
                    .map(|o| o as &dyn Obstacle),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_set_basic_operations() {
        let mut set = ObstacleSet::new();
        set.add_static(RectObstacle::new(Vec2::new(5.0, 5.0), 2.0, 2.0));
        assert_eq!(set.obstacle_counts(), (1, 0));

        set.add_agent(AgentObstacle::new(
            Entity::from_raw(456),
            Vec2::new(3.0, 3.0),
            0.5,
        ));
        assert_eq!(set.obstacle_counts(), (1, 1));

        set.clear_dynamic_obstacles();
        assert_eq!(set.obstacle_counts(), (1, 0));

        set.clear_all();
        assert_eq!(set.obstacle_counts(), (0, 0));
    }

    #[test]
    fn test_agent_is_excluded_from_its_own_view() {
        let mut set = ObstacleSet::new();
        let me = Entity::from_raw(1);
        let other = Entity::from_raw(2);
        set.add_statics([RectObstacle::new(Vec2::new(20.0, 0.0), 2.0, 2.0)]);
        set.add_agent(AgentObstacle::new(me, Vec2::ZERO, 1.0));
        set.add_agent(AgentObstacle::new(other, Vec2::new(10.0, 0.0), 1.0));

        let view = set.excluding(me);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|o| o.source_entity() != Some(me)));
        assert!(!any_collides(&view, Vec2::ZERO, 0.5));
        assert!(any_collides(&view, Vec2::new(10.0, 0.0), 0.5));
    }

    #[test]
    fn test_rebuilt_snapshot_blocks_only_current_obstacles() {
        let mut set = ObstacleSet::new();
        let me = Entity::from_raw(1);
        set.add_static(RectObstacle::new(Vec2::ZERO, 2.0, 2.0));
        set.add_agent(AgentObstacle::new(
            Entity::from_raw(7),
            Vec2::new(10.0, 0.0),
            1.0,
        ));

        let view = set.excluding(me);
        assert!(any_collides(&view, Vec2::new(0.5, 0.0), 0.0));
        // Gap to the rect edge is 0.9
        assert!(any_collides(&view, Vec2::new(1.9, 0.0), 1.0));
        // Gap of 1.5 leaves a radius-1 disc clear
        assert!(!any_collides(&view, Vec2::new(2.5, 0.0), 1.0));
        assert!(!any_collides(&view, Vec2::new(5.0, 0.0), 1.0));
        assert!(any_collides(&view, Vec2::new(8.5, 0.0), 1.0));

        set.clear_all();
        assert!(!any_collides(&set.excluding(me), Vec2::ZERO, 10.0));
    }
}
