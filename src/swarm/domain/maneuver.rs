//! Timed manoeuvres composed from a single broadcast control command.

use super::ControlVector;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default forward power for a spiral.
const DEFAULT_SPIRAL_SPEED: i32 = 50;

/// Default hold time for a spiral.
const DEFAULT_SPIRAL_DURATION: Duration = Duration::from_secs(5);

/// Lateral power applied throughout a spiral.
const SPIRAL_LATERAL_POWER: i32 = 100;

/// Turning direction of a spiral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiralDirection {
    /// Positive direction.
    #[default]
    Clockwise,
    /// Negative direction.
    CounterClockwise,
}

impl SpiralDirection {
    /// Returns `1` for clockwise and `-1` for counter-clockwise.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Clockwise => 1,
            Self::CounterClockwise => -1,
        }
    }
}

/// Parameters for a spiral flown by every drone at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiralManeuver {
    speed: i32,
    duration: Duration,
    direction: SpiralDirection,
}

impl SpiralManeuver {
    /// Creates a spiral with explicit parameters.
    #[must_use]
    pub const fn new(speed: i32, duration: Duration, direction: SpiralDirection) -> Self {
        Self {
            speed,
            duration,
            direction,
        }
    }

    /// Sets the forward power.
    #[must_use]
    pub const fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    /// Sets how long the control command is held.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the turning direction.
    #[must_use]
    pub const fn with_direction(mut self, direction: SpiralDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Returns the forward power.
    #[must_use]
    pub const fn speed(&self) -> i32 {
        self.speed
    }

    /// Returns the hold time.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the turning direction.
    #[must_use]
    pub const fn direction(&self) -> SpiralDirection {
        self.direction
    }

    /// Returns the control command broadcast for this spiral.
    ///
    /// Forward power drives pitch, the lateral term opposes the direction and
    /// the throttle counters the forward power.
    #[must_use]
    pub const fn control_vector(&self) -> ControlVector {
        ControlVector::new(
            0,
            self.speed,
            SPIRAL_LATERAL_POWER.saturating_mul(-self.direction.sign()),
            self.speed.saturating_neg(),
        )
    }
}

impl Default for SpiralManeuver {
    fn default() -> Self {
        Self::new(
            DEFAULT_SPIRAL_SPEED,
            DEFAULT_SPIRAL_DURATION,
            SpiralDirection::Clockwise,
        )
    }
}
