/// Rotation state, per-axis angular speeds and axis composition order
use nalgebra::{Rotation3, Vector3};

/// Rotation angles around three axes (in radians)
///
/// Angles accumulate without wraparound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Angular increment per tick for each axis, before the global multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSpeeds {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AxisSpeeds {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn uniform(speed: f64) -> Self {
        Self::new(speed, speed, speed)
    }

    pub fn set(&mut self, axis: Axis, speed: f64) {
        match axis {
            Axis::X => self.x = speed,
            Axis::Y => self.y = speed,
            Axis::Z => self.z = speed,
        }
    }
}

impl Default for AxisSpeeds {
    fn default() -> Self {
        Self::uniform(0.1)
    }
}

/// Current angles together with the speeds that advance them
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spin {
    pub angles: RotationState,
    pub speeds: AxisSpeeds,
}

impl Spin {
    pub fn new(speeds: AxisSpeeds) -> Self {
        Self {
            angles: RotationState::zero(),
            speeds,
        }
    }

    /// Advance every axis by its speed scaled by `multiplier`
    pub fn advance(&mut self, multiplier: f64) {
        self.angles.rotate(
            self.speeds.x * multiplier,
            self.speeds.y * multiplier,
            self.speeds.z * multiplier,
        );
    }
}

/// Order in which the three axis rotations are applied to a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOrder {
    /// Around X first, then Y, then Z
    Xyz,
    /// Around Z first, then Y, then X
    Zyx,
}

impl RotationOrder {
    /// Create the combined rotation for a rotation state
    pub fn matrix(self, rotation: &RotationState) -> Rotation3<f64> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), rotation.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), rotation.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), rotation.z);

        // The right-most factor is applied to the vertex first
        match self {
            RotationOrder::Xyz => rz * ry * rx,
            RotationOrder::Zyx => rx * ry * rz,
        }
    }
}
