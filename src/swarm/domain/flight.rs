//! Flight telemetry and control values exchanged with drone drivers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Confirmed state of a drone's flight controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightMode {
    /// On the ground with motors idle.
    Ready,
    /// Take-off acknowledged by the controller.
    TakeOff,
    /// Airborne under normal control.
    Flight,
    /// Landing acknowledged by the controller.
    Landing,
    /// Motors stopped.
    Stop,
    /// Crash or tip-over detected.
    Accident,
    /// Controller fault.
    Error,
}

impl FlightMode {
    /// Returns the canonical lowercase representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::TakeOff => "take_off",
            Self::Flight => "flight",
            Self::Landing => "landing",
            Self::Stop => "stop",
            Self::Accident => "accident",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for FlightMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Snapshot of a drone's controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightState {
    mode: FlightMode,
    battery_percent: u8,
}

impl FlightState {
    /// Creates a state snapshot.
    #[must_use]
    pub const fn new(mode: FlightMode, battery_percent: u8) -> Self {
        Self {
            mode,
            battery_percent,
        }
    }

    /// Returns the reported flight mode.
    #[must_use]
    pub const fn mode(&self) -> FlightMode {
        self.mode
    }

    /// Returns the reported battery charge.
    #[must_use]
    pub const fn battery_percent(&self) -> u8 {
        self.battery_percent
    }
}

/// Position estimate in metres relative to the take-off point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f64,
    y: f64,
    z: f64,
}

impl Position {
    /// Creates a position estimate.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the forward component.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Returns the lateral component.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Returns the vertical component.
    #[must_use]
    pub const fn z(&self) -> f64 {
        self.z
    }
}

/// Horizontal offset accumulated over every landing a drone has performed.
///
/// The offset belongs to the drone and survives across landings; each landing
/// adds the position read just before the landing command is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LandingOffset {
    x: f64,
    y: f64,
}

impl LandingOffset {
    /// Creates an offset from explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the forward component.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Returns the lateral component.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Returns this offset with the horizontal part of `position` added.
    #[expect(
        clippy::float_arithmetic,
        reason = "offsets accumulate metre readings reported by telemetry"
    )]
    #[must_use]
    pub fn accumulate(self, position: Position) -> Self {
        Self {
            x: self.x + position.x(),
            y: self.y + position.y(),
        }
    }
}

/// Raw stick values for a single control command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlVector {
    roll: i32,
    pitch: i32,
    yaw: i32,
    throttle: i32,
}

impl ControlVector {
    /// Creates a control vector.
    #[must_use]
    pub const fn new(roll: i32, pitch: i32, yaw: i32, throttle: i32) -> Self {
        Self {
            roll,
            pitch,
            yaw,
            throttle,
        }
    }

    /// Returns the roll component.
    #[must_use]
    pub const fn roll(&self) -> i32 {
        self.roll
    }

    /// Returns the pitch component.
    #[must_use]
    pub const fn pitch(&self) -> i32 {
        self.pitch
    }

    /// Returns the yaw component.
    #[must_use]
    pub const fn yaw(&self) -> i32 {
        self.yaw
    }

    /// Returns the throttle component.
    #[must_use]
    pub const fn throttle(&self) -> i32 {
        self.throttle
    }
}
