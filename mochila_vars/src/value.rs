use mochila_structs::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of primitive types a variable can be declared as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VarType {
    Int,
    Float,
    String,
    Bool,
    Vector3,
}

/// A decoded variable value. One variant per `VarType`, so accessors can
/// match exhaustively instead of comparing runtime type objects.
#[derive(Clone, Debug, PartialEq)]
pub enum VarValue {
    Int(i32),
    Float(f32),
    Str(String),
    Bool(bool),
    Vector3(Vector3),
}

impl VarValue {
    /// The declared type this value corresponds to.
    pub fn ty(&self) -> VarType {
        match self {
            VarValue::Int(_) => VarType::Int,
            VarValue::Float(_) => VarType::Float,
            VarValue::Str(_) => VarType::String,
            VarValue::Bool(_) => VarType::Bool,
            VarValue::Vector3(_) => VarType::Vector3,
        }
    }

    /// Canonical string encoding. Ints and floats use `Display` (shortest
    /// round-trip for floats), bools encode as `true`/`false`, vectors as
    /// `(x,y,z)`.
    pub fn encode(&self) -> String {
        match self {
            VarValue::Int(v) => v.to_string(),
            VarValue::Float(v) => v.to_string(),
            VarValue::Str(v) => v.clone(),
            VarValue::Bool(v) => v.to_string(),
            VarValue::Vector3(v) => v.encode(),
        }
    }

    /// Parse a canonical string as `ty`. Bool accepts `True`/`False` too so
    /// saves written by the C#-style encoder still decode.
    pub fn decode(ty: VarType, raw: &str) -> Option<VarValue> {
        match ty {
            VarType::Int => raw.trim().parse::<i32>().ok().map(VarValue::Int),
            VarType::Float => raw.trim().parse::<f32>().ok().map(VarValue::Float),
            VarType::String => Some(VarValue::Str(raw.to_string())),
            VarType::Bool => {
                let t = raw.trim();
                if t.eq_ignore_ascii_case("true") {
                    Some(VarValue::Bool(true))
                } else if t.eq_ignore_ascii_case("false") {
                    Some(VarValue::Bool(false))
                } else {
                    None
                }
            }
            VarType::Vector3 => Vector3::parse_str(raw).ok().map(VarValue::Vector3),
        }
    }
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarValue::Int(v) => write!(f, "{v}"),
            VarValue::Float(v) => write!(f, "{v}"),
            VarValue::Str(v) => write!(f, "{v}"),
            VarValue::Bool(v) => write!(f, "{v}"),
            VarValue::Vector3(v) => write!(f, "{v}"),
        }
    }
}

impl From<i32> for VarValue {
    #[inline]
    fn from(v: i32) -> Self {
        VarValue::Int(v)
    }
}
impl From<f32> for VarValue {
    #[inline]
    fn from(v: f32) -> Self {
        VarValue::Float(v)
    }
}
impl From<&str> for VarValue {
    #[inline]
    fn from(v: &str) -> Self {
        VarValue::Str(v.to_string())
    }
}
impl From<String> for VarValue {
    #[inline]
    fn from(v: String) -> Self {
        VarValue::Str(v)
    }
}
impl From<bool> for VarValue {
    #[inline]
    fn from(v: bool) -> Self {
        VarValue::Bool(v)
    }
}
impl From<Vector3> for VarValue {
    #[inline]
    fn from(v: Vector3) -> Self {
        VarValue::Vector3(v)
    }
}

/// Conversion boundary for the typed accessors (`get::<i32>(..)` etc.).
/// Implemented only for the primitives backing `VarType`.
pub trait FromVarValue: Sized {
    /// The declared type this Rust type reads from.
    const VAR_TYPE: VarType;
    /// Human-readable name for error reporting.
    const TYPE_NAME: &'static str;

    fn from_value(value: VarValue) -> Option<Self>;
}

impl FromVarValue for i32 {
    const VAR_TYPE: VarType = VarType::Int;
    const TYPE_NAME: &'static str = "i32";

    fn from_value(value: VarValue) -> Option<Self> {
        match value {
            VarValue::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl FromVarValue for f32 {
    const VAR_TYPE: VarType = VarType::Float;
    const TYPE_NAME: &'static str = "f32";

    fn from_value(value: VarValue) -> Option<Self> {
        match value {
            VarValue::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl FromVarValue for String {
    const VAR_TYPE: VarType = VarType::String;
    const TYPE_NAME: &'static str = "String";

    fn from_value(value: VarValue) -> Option<Self> {
        match value {
            VarValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl FromVarValue for bool {
    const VAR_TYPE: VarType = VarType::Bool;
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: VarValue) -> Option<Self> {
        match value {
            VarValue::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl FromVarValue for Vector3 {
    const VAR_TYPE: VarType = VarType::Vector3;
    const TYPE_NAME: &'static str = "Vector3";

    fn from_value(value: VarValue) -> Option<Self> {
        match value {
            VarValue::Vector3(v) => Some(v),
            _ => None,
        }
    }
}
