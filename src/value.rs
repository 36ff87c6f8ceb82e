use std::fmt;

use crate::{Error, ErrorCode, Scalar, ScalarKind, TypeDesc};

/// A decoded or extracted primitive: one scalar, or a list of scalars.
///
/// This is what [`ExtractValue`](crate::ExtractValue) hooks return and
/// [`InjectValue`](crate::InjectValue) hooks receive, and the value type of untyped
/// maps produced by decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single scalar.
    Scalar(Scalar),
    /// An ordered list of scalars.
    List(Vec<Scalar>),
}

impl Value {
    /// Text value.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(s.into()))
    }

    /// Returns true for an empty list or a zero scalar.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Scalar(s) => s.is_zero(),
            Self::List(items) => items.is_empty(),
        }
    }

    /// The text of a scalar text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Describe this value's runtime type.
    ///
    /// Lists whose elements do not all share one kind describe as a sequence of an
    /// opaque element so that [`classify`](crate::classify) rejects them. An empty
    /// list is a list of text.
    #[must_use]
    pub fn describe(&self) -> TypeDesc {
        match self {
            Self::Scalar(s) => TypeDesc::Scalar(s.kind()),
            Self::List(items) => {
                let mut kinds = items.iter().map(Scalar::kind);
                let first = kinds.next().unwrap_or(ScalarKind::Text);
                if kinds.all(|k| k == first) {
                    TypeDesc::seq(TypeDesc::Scalar(first))
                } else {
                    TypeDesc::seq(TypeDesc::Opaque("mixed scalar kinds"))
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{s}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, s) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{s}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<Vec<Scalar>> for Value {
    fn from(items: Vec<Scalar>) -> Self {
        Self::List(items)
    }
}

pub(crate) fn kind_mismatch(expected: impl fmt::Display, got: &Value) -> Error {
    Error::with_detail(
        ErrorCode::KindMismatch,
        format!("expected {expected} (got: {})", got.describe()),
    )
}

/// A Rust type that can be stored in a record field or map entry natively.
///
/// Implemented for the scalar types, `Vec` of scalars, `Option`/`Box` of any
/// `FieldValue`, and [`Value`] itself. Wrapper types that are not primitives
/// implement the hooks in [`crate::hooks`] instead.
pub trait FieldValue: Sized {
    /// Static description of the type, used for schema construction.
    fn type_desc() -> TypeDesc;

    /// Description of this particular value. Differs from [`FieldValue::type_desc`]
    /// only for dynamically typed values.
    fn describe(&self) -> TypeDesc {
        Self::type_desc()
    }

    /// The value to encode; `None` means absent.
    fn to_value(&self) -> Option<Value>;

    /// Build the field from a decoded value.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if `value` has the wrong shape or does not fit.
    fn from_value(value: Value) -> Result<Self, Error>;
}

/// A [`FieldValue`] that is a single scalar and can be a list element.
pub trait ScalarValue: FieldValue {
    /// The kind of this scalar type.
    const KIND: ScalarKind;

    /// Convert to a scalar.
    fn to_scalar(&self) -> Scalar;

    /// Convert from a scalar of any kind that fits.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the scalar is of an incompatible kind or out of
    /// range.
    fn from_scalar(scalar: Scalar) -> Result<Self, Error>;
}

macro_rules! scalar_field {
    ($ty:ty, $kind:ident, |$s:ident| $from:expr) => {
        impl ScalarValue for $ty {
            const KIND: ScalarKind = ScalarKind::$kind;

            fn to_scalar(&self) -> Scalar {
                Scalar::from(self.clone())
            }

            fn from_scalar($s: Scalar) -> Result<Self, Error> {
                $from
            }
        }

        impl FieldValue for $ty {
            fn type_desc() -> TypeDesc {
                TypeDesc::Scalar(ScalarKind::$kind)
            }

            fn to_value(&self) -> Option<Value> {
                Some(Value::Scalar(self.to_scalar()))
            }

            fn from_value(value: Value) -> Result<Self, Error> {
                match value {
                    Value::Scalar(s) => Self::from_scalar(s),
                    other => Err(kind_mismatch(ScalarKind::$kind, &other)),
                }
            }
        }
    };
}

macro_rules! int_fields {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            scalar_field!($ty, $kind, |s| {
                let wide = s
                    .to_i128()
                    .ok_or_else(|| kind_mismatch(ScalarKind::$kind, &Value::Scalar(s.clone())))?;
                <$ty>::try_from(wide).map_err(|e| {
                    Error::with_detail(
                        ErrorCode::InvalidInteger,
                        format!("{wide} out of range for {}", ScalarKind::$kind),
                    )
                    .caused_by(e)
                })
            });
        )*
    };
}

int_fields! {
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
}

scalar_field!(String, Text, |s| match s {
    Scalar::Text(text) => Ok(text),
    other => Err(kind_mismatch(ScalarKind::Text, &Value::Scalar(other))),
});

scalar_field!(bool, Bool, |s| match s {
    Scalar::Bool(b) => Ok(b),
    other => Err(kind_mismatch(ScalarKind::Bool, &Value::Scalar(other))),
});

#[allow(clippy::cast_possible_truncation)]
mod floats {
    use super::{kind_mismatch, FieldValue, ScalarValue};
    use crate::{Error, Scalar, ScalarKind, TypeDesc, Value};

    scalar_field!(f64, F64, |s| s
        .to_f64()
        .ok_or_else(|| kind_mismatch(ScalarKind::F64, &Value::Scalar(s.clone()))));

    scalar_field!(f32, F32, |s| match s {
        Scalar::F32(v) => Ok(v),
        Scalar::F64(v) => Ok(v as f32),
        other => Err(kind_mismatch(ScalarKind::F32, &Value::Scalar(other))),
    });
}

impl<T: ScalarValue> FieldValue for Vec<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::seq(TypeDesc::Scalar(T::KIND))
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::List(self.iter().map(T::to_scalar).collect()))
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_scalar).collect(),
            other => Err(kind_mismatch(format_args!("Vec<{}>", T::KIND), &other)),
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::indirect(T::type_desc())
    }

    fn describe(&self) -> TypeDesc {
        match self {
            Some(inner) => TypeDesc::indirect(inner.describe()),
            None => Self::type_desc(),
        }
    }

    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(T::to_value)
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        T::from_value(value).map(Some)
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::indirect(T::type_desc())
    }

    fn describe(&self) -> TypeDesc {
        TypeDesc::indirect(self.as_ref().describe())
    }

    fn to_value(&self) -> Option<Value> {
        self.as_ref().to_value()
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        T::from_value(value).map(Self::new)
    }
}

impl FieldValue for Value {
    fn type_desc() -> TypeDesc {
        TypeDesc::Opaque("urlenc::Value")
    }

    fn describe(&self) -> TypeDesc {
        Self::describe(self)
    }

    fn to_value(&self) -> Option<Value> {
        Some(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        Ok(value)
    }
}

impl FieldValue for Scalar {
    fn type_desc() -> TypeDesc {
        TypeDesc::Opaque("urlenc::Scalar")
    }

    fn describe(&self) -> TypeDesc {
        TypeDesc::Scalar(self.kind())
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Scalar(self.clone()))
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Scalar(s) => Ok(s),
            other => Err(kind_mismatch("a scalar", &other)),
        }
    }
}
