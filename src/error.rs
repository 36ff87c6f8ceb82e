use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

type Source = Box<dyn StdError + Send + Sync + 'static>;

/// The high-level class of an error.
///
/// - **Shape** errors: the value or target is not something the engine can map to a
///   query string (not a record or map, an unsupported field type, a scalar where a
///   list was declared).
/// - **Schema** errors: a field annotation cannot be understood.
/// - **Conversion** errors: text does not parse as the declared scalar kind.
/// - **Query** errors: the query-string text itself is malformed or too large.
/// - **Hook** errors: an [`InjectValue`](crate::InjectValue) hook rejected a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Value/target shape failure.
    Shape,
    /// Annotation failure.
    Schema,
    /// Text to scalar conversion failure.
    Conversion,
    /// Tokenizer or limit failure.
    Query,
    /// Value injection hook failure.
    Hook,
}

/// A stable code identifying the reason an operation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    /// A top-level `None` was given to encode.
    NilValue,
    /// A field type is neither a scalar nor a list of scalars.
    UnsupportedFieldType,
    /// A map entry value is neither a scalar nor a list of scalars.
    UnsupportedMapValue,
    /// A field was declared in the schema but the record has no accessor for it.
    UnknownField,
    /// A value did not match the declared scalar/list shape.
    ShapeMismatch,

    /// The pretend-type segment of an annotation names no known type.
    UnknownPretendType,

    /// Text is not a valid integer for the target kind.
    InvalidInteger,
    /// Text is not a valid float.
    InvalidFloat,
    /// Text is not a valid bool.
    InvalidBool,
    /// A value of one scalar kind cannot be stored in a field of another.
    KindMismatch,

    /// Malformed query-string text.
    MalformedQuery,
    /// Input exceeds `DecodeLimits::max_input_bytes`.
    InputLimitExceeded,
    /// Input has more pairs than `DecodeLimits::max_pairs`.
    PairLimitExceeded,

    /// A value injection hook rejected the decoded value.
    HookRejected,
}

impl ErrorCode {
    /// The kind this code belongs to.
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        match self {
            Self::NilValue
            | Self::UnsupportedFieldType
            | Self::UnsupportedMapValue
            | Self::UnknownField
            | Self::ShapeMismatch => ErrorKind::Shape,
            Self::UnknownPretendType => ErrorKind::Schema,
            Self::InvalidInteger | Self::InvalidFloat | Self::InvalidBool | Self::KindMismatch => {
                ErrorKind::Conversion
            }
            Self::MalformedQuery | Self::InputLimitExceeded | Self::PairLimitExceeded => {
                ErrorKind::Query
            }
            Self::HookRejected => ErrorKind::Hook,
        }
    }

    const fn message(self) -> &'static str {
        match self {
            Self::NilValue => "cannot encode a None value",
            Self::UnsupportedFieldType => "unsupported type on struct field",
            Self::UnsupportedMapValue => "unsupported type on map element",
            Self::UnknownField => "record has no accessor for field",
            Self::ShapeMismatch => "value does not match declared shape",

            Self::UnknownPretendType => "unsupported type from field annotation",

            Self::InvalidInteger => "invalid integer",
            Self::InvalidFloat => "invalid float",
            Self::InvalidBool => "invalid bool",
            Self::KindMismatch => "scalar kind mismatch",

            Self::MalformedQuery => "malformed query string",
            Self::InputLimitExceeded => "input exceeds decode limits",
            Self::PairLimitExceeded => "pair count exceeds decode limits",

            Self::HookRejected => "value rejected by field",
        }
    }
}

/// An error with a structured classification, a stable code and optional context.
#[derive(Debug)]
pub struct Error {
    /// The error kind.
    pub kind: ErrorKind,
    /// The error code.
    pub code: ErrorCode,
    detail: Option<Cow<'static, str>>,
    source: Option<Source>,
}

impl Error {
    /// Construct an error for `code` with no context.
    #[must_use]
    pub const fn new(code: ErrorCode) -> Self {
        Self {
            kind: code.kind(),
            code,
            detail: None,
            source: None,
        }
    }

    /// Construct an error for `code` carrying a human-readable detail.
    #[must_use]
    pub fn with_detail(code: ErrorCode, detail: impl Into<Cow<'static, str>>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..Self::new(code)
        }
    }

    /// Construct a hook rejection. Intended for [`InjectValue`](crate::InjectValue)
    /// implementations.
    #[must_use]
    pub fn rejected(reason: impl fmt::Display) -> Self {
        Self::with_detail(ErrorCode::HookRejected, reason.to_string())
    }

    #[must_use]
    pub(crate) fn caused_by(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    #[must_use]
    pub(crate) fn context(mut self, ctx: impl fmt::Display) -> Self {
        self.detail = Some(match self.detail.take() {
            Some(detail) => format!("{ctx}: {detail}").into(),
            None => ctx.to_string().into(),
        });
        self
    }

    /// Context attached to the error, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns true iff this error came from a value injection hook.
    #[inline]
    #[must_use]
    pub const fn is_hook(&self) -> bool {
        matches!(self.kind, ErrorKind::Hook)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.kind {
            ErrorKind::Shape => "shape",
            ErrorKind::Schema => "schema",
            ErrorKind::Conversion => "conversion",
            ErrorKind::Query => "query",
            ErrorKind::Hook => "hook",
        };
        write!(f, "urlenc {stage} error: {}", self.code.message())?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        if let Some(source) = &self.source {
            write!(f, " ({source})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn StdError + 'static))
    }
}
