//! Sampled straight-line clearance tests for disc-shaped agents

use crate::pathfinding::Navigator;
use crate::pathfinding::obstacles::{Obstacle, any_collides};
use bevy::prelude::*;

/// Which of the three rays swept by an agent's body are blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineOfSightReport {
    pub center_blocked: bool,
    pub left_blocked: bool,
    pub right_blocked: bool,
}

impl LineOfSightReport {
    pub fn is_clear(&self) -> bool {
        !(self.center_blocked || self.left_blocked || self.right_blocked)
    }
}

impl Navigator {
    /// True iff a disc of `radius` can slide from `from` to `to` without touching any obstacle.
    ///
    /// The centerline is swept as a disc and both edges of the body are swept as thin rays,
    /// so obstacles that only clip the side of the agent are caught too.
    pub fn has_line_of_sight<O: Obstacle>(
        &self,
        from: Vec2,
        to: Vec2,
        obstacles: &[O],
        radius: f32,
    ) -> bool {
        if coincide(from, to) {
            return true;
        }

        if !self.has_line_of_sight_single_path(from, to, obstacles, radius) {
            return false;
        }

        let (left, right) = edge_offsets(to - from, radius);
        self.has_line_of_sight_single_path(from + left, to + left, obstacles, 0.0)
            && self.has_line_of_sight_single_path(from + right, to + right, obstacles, 0.0)
    }

    /// Sample one ray from `from` to `to`, testing a disc of `radius` at every sample.
    ///
    /// Building block for [`Navigator::has_line_of_sight`]; on its own it under-detects
    /// obstacles that only clip the corner of the agent's body.
    pub fn has_line_of_sight_single_path<O: Obstacle>(
        &self,
        from: Vec2,
        to: Vec2,
        obstacles: &[O],
        radius: f32,
    ) -> bool {
        if coincide(from, to) {
            return true;
        }

        let steps = self.sample_count(from.distance(to));
        (0..=steps).all(|i| {
            let point = from.lerp(to, i as f32 / steps as f32);
            !any_collides(obstacles, point, radius)
        })
    }

    /// Like [`Navigator::has_line_of_sight`] but evaluates every ray, for debug overlays
    pub fn line_of_sight_report<O: Obstacle>(
        &self,
        from: Vec2,
        to: Vec2,
        obstacles: &[O],
        radius: f32,
    ) -> LineOfSightReport {
        if coincide(from, to) {
            return LineOfSightReport::default();
        }

        let (left, right) = edge_offsets(to - from, radius);
        LineOfSightReport {
            center_blocked: !self.has_line_of_sight_single_path(from, to, obstacles, radius),
            left_blocked: !self.has_line_of_sight_single_path(
                from + left,
                to + left,
                obstacles,
                0.0,
            ),
            right_blocked: !self.has_line_of_sight_single_path(
                from + right,
                to + right,
                obstacles,
                0.0,
            ),
        }
    }

    fn sample_count(&self, distance: f32) -> usize {
        let step = self.config().los_sample_step.max(f32::EPSILON);
        ((distance / step).ceil() as usize).max(1)
    }
}

fn coincide(a: Vec2, b: Vec2) -> bool {
    a == b
}

/// Offsets from the agent's center to the left and right edges of its footprint.
///
/// Mostly-axis travel (one component over twice the other) uses the two points
/// perpendicular to that axis; diagonal travel uses the two side corners of the
/// agent's bounding square, the ones lying across the direction of travel.
pub fn edge_offsets(direction: Vec2, radius: f32) -> (Vec2, Vec2) {
    let (ax, ay) = (direction.x.abs(), direction.y.abs());
    let (a, b) = if ax > 2.0 * ay {
        (Vec2::new(0.0, radius), Vec2::new(0.0, -radius))
    } else if ay > 2.0 * ax {
        (Vec2::new(radius, 0.0), Vec2::new(-radius, 0.0))
    } else {
        let (sx, sy) = (direction.x.signum(), direction.y.signum());
        (
            Vec2::new(sx * radius, -sy * radius),
            Vec2::new(-sx * radius, sy * radius),
        )
    };

    let left_normal = direction.perp();
    if a.dot(left_normal) >= 0.0 {
        (a, b)
    } else {
        (b, a)
    }
}
