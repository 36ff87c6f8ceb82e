use std::fmt;

use crate::ScalarKind;

/// A description of a Rust type, as far as the codec cares.
///
/// Record fields report one of these through the derive macro; map values report one
/// per entry. The [`classify`] function decides whether it can be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDesc {
    /// A primitive.
    Scalar(ScalarKind),
    /// A homogeneous sequence (`Vec<T>`).
    Seq(Box<TypeDesc>),
    /// One level of indirection (`Option<T>`, `Box<T>`).
    Indirect(Box<TypeDesc>),
    /// Anything else, by type name.
    Opaque(&'static str),
}

impl TypeDesc {
    /// Sequence of `elem`.
    #[must_use]
    pub fn seq(elem: Self) -> Self {
        Self::Seq(Box::new(elem))
    }

    /// Indirection to `inner`.
    #[must_use]
    pub fn indirect(inner: Self) -> Self {
        Self::Indirect(Box::new(inner))
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.write_str(kind.name()),
            Self::Seq(elem) => write!(f, "Vec<{elem}>"),
            Self::Indirect(inner) => write!(f, "&{inner}"),
            Self::Opaque(name) => f.write_str(name),
        }
    }
}

/// The encodable shape of a field or value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// One value per key.
    Scalar(ScalarKind),
    /// Zero or more values per key, all of one kind.
    List(ScalarKind),
}

impl Shape {
    /// The scalar kind of the value or of each element.
    #[must_use]
    pub const fn kind(self) -> ScalarKind {
        match self {
            Self::Scalar(kind) | Self::List(kind) => kind,
        }
    }

    /// Returns true for list shapes.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Resolve a pretend-type token: a scalar name, `[]name` or `Vec<name>`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let list_elem = token
            .strip_prefix("[]")
            .or_else(|| token.strip_prefix("Vec<")?.strip_suffix('>'));
        match list_elem {
            Some(elem) => ScalarKind::from_name(elem.trim()).map(Self::List),
            None => ScalarKind::from_name(token).map(Self::Scalar),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.write_str(kind.name()),
            Self::List(kind) => write!(f, "Vec<{kind}>"),
        }
    }
}

/// Decide whether a type can be encoded, and how.
///
/// One level of indirection is looked through. Scalars classify as
/// [`Shape::Scalar`], sequences of scalars as [`Shape::List`]. Nested sequences,
/// double indirection, and opaque types are unsupported and yield `None`.
#[must_use]
pub fn classify(desc: &TypeDesc) -> Option<Shape> {
    let desc = match desc {
        TypeDesc::Indirect(inner) => &**inner,
        other => other,
    };
    match desc {
        TypeDesc::Scalar(kind) => Some(Shape::Scalar(*kind)),
        TypeDesc::Seq(elem) => match **elem {
            TypeDesc::Scalar(kind) => Some(Shape::List(kind)),
            _ => None,
        },
        TypeDesc::Indirect(_) | TypeDesc::Opaque(_) => None,
    }
}
