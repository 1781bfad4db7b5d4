use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// A search grid cell size constrained to [1.0, 100.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct CellSize(f32);

impl CellSize {
    const MIN: f32 = 1.0;
    const MAX: f32 = 100.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Re-apply the bounds, e.g. after deserializing a hand-edited file
    pub fn clamped(self) -> Self {
        Self::new(self.0)
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self::new(10.0)
    }
}

/// A search expansion cap constrained to [1, 100000]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct ExpansionBudget(usize);

impl ExpansionBudget {
    const MIN: usize = 1;
    const MAX: usize = 100_000;

    pub fn new(value: usize) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Re-apply the bounds, e.g. after deserializing a hand-edited file
    pub fn clamped(self) -> Self {
        Self::new(self.0)
    }
}

impl Default for ExpansionBudget {
    fn default() -> Self {
        Self::new(300)
    }
}

/// A line-of-sight sample spacing constrained to [0.1, 20.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct SampleStep(f32);

impl SampleStep {
    const MIN: f32 = 0.1;
    const MAX: f32 = 20.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Re-apply the bounds, e.g. after deserializing a hand-edited file
    pub fn clamped(self) -> Self {
        Self::new(self.0)
    }
}

impl Default for SampleStep {
    fn default() -> Self {
        Self::new(2.0)
    }
}

/// A waypoint reach distance constrained to [0.1, 100.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct ReachDistance(f32);

impl ReachDistance {
    const MIN: f32 = 0.1;
    const MAX: f32 = 100.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Re-apply the bounds, e.g. after deserializing a hand-edited file
    pub fn clamped(self) -> Self {
        Self::new(self.0)
    }
}

impl Default for ReachDistance {
    fn default() -> Self {
        Self::new(5.0)
    }
}

/// A movement speed value constrained to [0.1, 500.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct MovementSpeed(f32);

impl MovementSpeed {
    const MIN: f32 = 0.1;
    const MAX: f32 = 500.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Re-apply the bounds, e.g. after deserializing a hand-edited file
    pub fn clamped(self) -> Self {
        Self::new(self.0)
    }
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self::new(40.0)
    }
}

/// A stopping distance value constrained to [0.01, 50.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct StoppingDistance(f32);

impl StoppingDistance {
    const MIN: f32 = 0.01;
    const MAX: f32 = 50.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Re-apply the bounds, e.g. after deserializing a hand-edited file
    pub fn clamped(self) -> Self {
        Self::new(self.0)
    }
}

impl Default for StoppingDistance {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// A fixed simulation step in seconds constrained to [0.001, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct TickSeconds(f32);

impl TickSeconds {
    const MIN: f32 = 0.001;
    const MAX: f32 = 1.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Re-apply the bounds, e.g. after deserializing a hand-edited file
    pub fn clamped(self) -> Self {
        Self::new(self.0)
    }
}

impl Default for TickSeconds {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_clamped() {
        assert_eq!(CellSize::new(0.0).get(), 1.0);
        assert_eq!(CellSize::new(1000.0).get(), 100.0);
        assert_eq!(ExpansionBudget::new(0).get(), 1);
        assert_eq!(TickSeconds::new(5.0).get(), 1.0);
        assert_eq!(MovementSpeed::new(-3.0).get(), 0.1);
    }

    #[test]
    fn test_defaults_match_navigation_core() {
        assert_eq!(CellSize::default().get(), 10.0);
        assert_eq!(ExpansionBudget::default().get(), 300);
        assert_eq!(SampleStep::default().get(), 2.0);
        assert_eq!(ReachDistance::default().get(), 5.0);
    }

    #[test]
    fn test_from_bypasses_bounds_until_clamped() {
        let raw = SampleStep::from(0.0);
        assert_eq!(raw.get(), 0.0);
        assert_eq!(raw.clamped().get(), 0.1);
    }
}
