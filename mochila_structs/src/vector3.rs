use glam::Vec3;
use std::fmt;
use std::str::FromStr;

/// A simple 3D vector struct that holds (x,y,z) values
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Vector3 {
    /// Zero vector3 constant (0, 0, 0)
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// One vector3 constant (1, 1, 1)
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    /// Creates a new 3D vector
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline(always)]
    pub const fn to_glam(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[inline(always)]
    pub const fn from_glam(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }

    /// Dot product between this vector and another
    pub fn dot(self, rhs: Self) -> f32 {
        self.to_glam().dot(rhs.to_glam())
    }

    /// Magnitude (length) of the vector
    pub fn length(&self) -> f32 {
        self.to_glam().length()
    }

    /// Linear interpolation towards `rhs` by factor `t`
    pub fn lerp(self, rhs: Self, t: f32) -> Self {
        Self::from_glam(self.to_glam().lerp(rhs.to_glam(), t))
    }

    /// Canonical text form `(x,y,z)` used wherever vectors are stored as strings.
    /// `{}` on f32 is shortest round-trip, so `parse_str(encode(v)) == v`.
    pub fn encode(&self) -> String {
        format!("({},{},{})", self.x, self.y, self.z)
    }

    /// Parse the canonical `(x,y,z)` form. Surrounding parens are optional and
    /// whitespace around components is tolerated.
    pub fn parse_str(s: &str) -> Result<Self, String> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = trimmed.split(',').collect();
        if parts.len() != 3 {
            return Err(format!(
                "expected 3 components in vector string, got {}",
                parts.len()
            ));
        }
        let mut out = [0.0f32; 3];
        for (i, part) in parts.iter().enumerate() {
            out[i] = part
                .trim()
                .parse::<f32>()
                .map_err(|e| format!("invalid vector component `{}`: {}", part.trim(), e))?;
        }
        Ok(Self::new(out[0], out[1], out[2]))
    }
}

impl FromStr for Vector3 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl From<Vec3> for Vector3 {
    fn from(v: Vec3) -> Self {
        Self::from_glam(v)
    }
}

impl From<Vector3> for Vec3 {
    fn from(v: Vector3) -> Self {
        v.to_glam()
    }
}
