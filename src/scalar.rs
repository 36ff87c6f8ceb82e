use std::fmt;

use crate::{Error, ErrorCode};

/// The kind of a scalar: text, bool, or a fixed-width number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// UTF-8 text.
    Text,
    /// `true` / `false`.
    Bool,
    /// `i8`.
    I8,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `isize`.
    Isize,
    /// `u8`.
    U8,
    /// `u16`.
    U16,
    /// `u32`.
    U32,
    /// `u64`.
    U64,
    /// `usize`.
    Usize,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
}

impl ScalarKind {
    /// The Rust spelling of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "String",
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Resolve a type token as written in a field annotation.
    ///
    /// Both the portable names (`string`, `int32`, `uint`, `float64`) and the Rust
    /// names (`String`, `i32`, `usize`, `f64`) are accepted.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "string" | "String" | "str" => Self::Text,
            "bool" => Self::Bool,
            "int8" | "i8" => Self::I8,
            "int16" | "i16" => Self::I16,
            "int32" | "i32" => Self::I32,
            "int64" | "i64" => Self::I64,
            "int" | "isize" => Self::Isize,
            "uint8" | "u8" => Self::U8,
            "uint16" | "u16" => Self::U16,
            "uint32" | "u32" => Self::U32,
            "uint64" | "u64" => Self::U64,
            "uint" | "usize" => Self::Usize,
            "float32" | "f32" => Self::F32,
            "float64" | "f64" => Self::F64,
            _ => return None,
        };
        Some(kind)
    }

    /// Convert `text` into a scalar of this kind.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if `text` is malformed or out of range for the kind.
    pub fn parse(self, text: &str) -> Result<Scalar, Error> {
        let scalar = match self {
            Self::Text => Scalar::Text(text.to_owned()),
            Self::Bool => Scalar::Bool(parse_bool(text)?),
            Self::I8 => Scalar::I8(parse_int(self, text)?),
            Self::I16 => Scalar::I16(parse_int(self, text)?),
            Self::I32 => Scalar::I32(parse_int(self, text)?),
            Self::I64 => Scalar::I64(parse_int(self, text)?),
            Self::Isize => Scalar::Isize(parse_int(self, text)?),
            Self::U8 => Scalar::U8(parse_int(self, text)?),
            Self::U16 => Scalar::U16(parse_int(self, text)?),
            Self::U32 => Scalar::U32(parse_int(self, text)?),
            Self::U64 => Scalar::U64(parse_int(self, text)?),
            Self::Usize => Scalar::Usize(parse_int(self, text)?),
            Self::F32 => Scalar::F32(parse_float(self, text)?),
            Self::F64 => Scalar::F64(parse_float(self, text)?),
        };
        Ok(scalar)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn parse_int<T>(kind: ScalarKind, text: &str) -> Result<T, Error>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    text.parse::<T>().map_err(|e| {
        Error::with_detail(ErrorCode::InvalidInteger, format!("{text:?} as {kind}")).caused_by(e)
    })
}

fn parse_float<T>(kind: ScalarKind, text: &str) -> Result<T, Error>
where
    T: std::str::FromStr<Err = std::num::ParseFloatError> + Into<f64> + Copy,
{
    let v = text.parse::<T>().map_err(|e| {
        Error::with_detail(ErrorCode::InvalidFloat, format!("{text:?} as {kind}")).caused_by(e)
    })?;
    // Overflow parses to infinity; only an explicit "inf"/"infinity" may produce one.
    if v.into().is_infinite() {
        let digits = text.trim_start_matches(['+', '-']);
        if !digits.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("inf")) {
            return Err(Error::with_detail(
                ErrorCode::InvalidFloat,
                format!("{text:?} out of range for {kind}"),
            ));
        }
    }
    Ok(v)
}

fn parse_bool(text: &str) -> Result<bool, Error> {
    match text {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(Error::with_detail(
            ErrorCode::InvalidBool,
            format!("{text:?}"),
        )),
    }
}

/// A typed primitive value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// UTF-8 text.
    Text(String),
    /// Boolean.
    Bool(bool),
    /// `i8`.
    I8(i8),
    /// `i16`.
    I16(i16),
    /// `i32`.
    I32(i32),
    /// `i64`.
    I64(i64),
    /// `isize`.
    Isize(isize),
    /// `u8`.
    U8(u8),
    /// `u16`.
    U16(u16),
    /// `u32`.
    U32(u32),
    /// `u64`.
    U64(u64),
    /// `usize`.
    Usize(usize),
    /// `f32`.
    F32(f32),
    /// `f64`.
    F64(f64),
}

impl Scalar {
    /// The kind of this scalar.
    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Self::Text(_) => ScalarKind::Text,
            Self::Bool(_) => ScalarKind::Bool,
            Self::I8(_) => ScalarKind::I8,
            Self::I16(_) => ScalarKind::I16,
            Self::I32(_) => ScalarKind::I32,
            Self::I64(_) => ScalarKind::I64,
            Self::Isize(_) => ScalarKind::Isize,
            Self::U8(_) => ScalarKind::U8,
            Self::U16(_) => ScalarKind::U16,
            Self::U32(_) => ScalarKind::U32,
            Self::U64(_) => ScalarKind::U64,
            Self::Usize(_) => ScalarKind::Usize,
            Self::F32(_) => ScalarKind::F32,
            Self::F64(_) => ScalarKind::F64,
        }
    }

    /// Returns true iff this is the zero value of its kind: empty text, `false`, or 0.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Bool(b) => !*b,
            Self::F32(v) => *v == 0.0,
            Self::F64(v) => *v == 0.0,
            other => other.to_i128() == Some(0),
        }
    }

    /// Integer value widened to `i128`, or `None` for non-integer kinds.
    #[must_use]
    pub fn to_i128(&self) -> Option<i128> {
        let v = match *self {
            Self::I8(v) => i128::from(v),
            Self::I16(v) => i128::from(v),
            Self::I32(v) => i128::from(v),
            Self::I64(v) => i128::from(v),
            Self::Isize(v) => v as i128,
            Self::U8(v) => i128::from(v),
            Self::U16(v) => i128::from(v),
            Self::U32(v) => i128::from(v),
            Self::U64(v) => i128::from(v),
            Self::Usize(v) => v as i128,
            _ => return None,
        };
        Some(v)
    }

    /// Float value widened to `f64`, or `None` for non-float kinds.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        match *self {
            Self::F32(v) => Some(f64::from(v)),
            Self::F64(v) => Some(v),
            _ => None,
        }
    }
}

/// Formats the scalar the way it appears in a query string.
///
/// Integers are base 10. Floats are widened to `f64` and use the shortest
/// representation that round-trips, never exponent notation.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::Isize(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::Usize(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{}", f64::from(*v)),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

scalar_from! {
    String => Text,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}
