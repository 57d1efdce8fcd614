use crate::foundation::error::{StageError, StageResult};

pub use kurbo::{Point, Vec2};

/// A 3D vector used for rotations (Euler angles) and world-space line points.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize,
)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Construct a vector from components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

/// Straight-alpha RGBA color with normalized `0..=1` components.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    pub a: f64,
}

impl Rgba {
    /// Construct a color from components (not clamped).
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque white.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Return this color with its alpha multiplied by `factor`.
    pub fn with_alpha_scaled(self, factor: f64) -> Self {
        Self {
            a: self.a * factor.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Concrete viewport dimensions in pixels.
///
/// Storyboard documents author canvas-anchored fields in a normalized
/// coordinate system; the viewport maps them to pixels once, at resolve time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport with positive dimensions.
    pub fn new(width: f64, height: f64) -> StageResult<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(StageError::config("Viewport dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Map a normalized canvas-space point into pixel space.
    pub fn map_point(self, p: Vec2) -> Vec2 {
        Vec2::new(p.x * self.width, p.y * self.height)
    }

    /// Map a normalized canvas-space size into pixel space.
    pub fn map_size(self, s: Vec2) -> Vec2 {
        Vec2::new(s.x * self.width, s.y * self.height)
    }

    /// Full viewport bounds as a pixel-space size.
    pub fn bounds(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// A value paired with its timeline-local time in seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Timed<T> {
    /// Timeline-local time in seconds.
    pub time: f64,
    /// The value at `time`.
    pub value: T,
}

impl<T> Timed<T> {
    /// Pair `value` with `time`.
    pub fn new(time: f64, value: T) -> Self {
        Self { time, value }
    }
}
