use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::{classify, Error, ErrorCode, Shape, Tag, TypeDesc, Value};

/// The annotation attached to a field, as written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    /// No annotation.
    Absent,
    /// `#[urlenc = "..."]`.
    Urlenc(&'static str),
    /// Name supplied by the generic `#[serde(rename = "...")]` annotation.
    Fallback(&'static str),
}

impl Annotation {
    /// The annotation text, if any.
    #[must_use]
    pub const fn text(self) -> Option<&'static str> {
        match self {
            Self::Absent => None,
            Self::Urlenc(text) | Self::Fallback(text) => Some(text),
        }
    }
}

/// One declared field, as reported by `#[derive(Record)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name in the source.
    pub name: &'static str,
    /// Whether the field is visible outside its module.
    pub public: bool,
    /// The field's annotation.
    pub annotation: Annotation,
    /// The field's type.
    pub ty: TypeDesc,
}

/// How one record field maps to a query key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    field: &'static str,
    key: String,
    omit_empty: bool,
    shape: Shape,
}

impl FieldSchema {
    /// Source field name; fields are always looked up by name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Exposed query key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether zero values are left out when encoding.
    #[must_use]
    pub const fn omit_empty(&self) -> bool {
        self.omit_empty
    }

    /// Declared shape, after any pretend-type override.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }
}

/// Per-type field access, implemented by `#[derive(Record)]`.
pub trait Record: 'static {
    /// Every declared field in declaration order.
    fn describe() -> Vec<FieldDescriptor>;

    /// Read the value of `field` for encoding. `Ok(None)` means the field is unset,
    /// or, with `omit_empty`, that it holds its zero value.
    ///
    /// # Errors
    ///
    /// Returns a shape error if `field` does not exist or its type cannot produce a
    /// value.
    fn read_field(&self, field: &str, omit_empty: bool) -> Result<Option<Value>, Error>;

    /// Store a decoded value into `field`.
    ///
    /// # Errors
    ///
    /// Returns a conversion error if the value does not fit the field, or whatever
    /// the field's injection hook returns.
    fn write_field(&mut self, field: &str, value: Value) -> Result<(), Error>;
}

/// Build the schema for a record type from its field descriptors.
///
/// Private and excluded fields are skipped. The first field whose (possibly
/// overridden) type does not classify fails the whole construction.
///
/// # Errors
///
/// Returns a schema error for an unknown pretend type and a shape error for an
/// unsupported field type.
pub fn build_schema(record: &str, fields: Vec<FieldDescriptor>) -> Result<Vec<FieldSchema>, Error> {
    let mut out = Vec::with_capacity(fields.len());
    for desc in fields {
        if !desc.public {
            continue;
        }

        let tag = match desc.annotation.text() {
            Some(text) => Tag::parse(text)
                .map_err(|e| e.context(format_args!("{record}.{}", desc.name)))?,
            None => Tag::parse("")?,
        };
        if tag.skip {
            continue;
        }

        let shape = match tag.pretend {
            Some(shape) => shape,
            None => classify(&desc.ty).ok_or_else(|| {
                Error::with_detail(
                    ErrorCode::UnsupportedFieldType,
                    format!("{record}.{}: {}", desc.name, desc.ty),
                )
            })?,
        };

        out.push(FieldSchema {
            field: desc.name,
            key: tag.key_or(desc.name).to_owned(),
            omit_empty: tag.omit_empty,
            shape,
        });
    }
    Ok(out)
}

/// Memoized record schemas, keyed by type.
///
/// Lookups take a shared lock. A miss builds the schema outside any lock and then
/// inserts it under the exclusive lock, so two callers racing on a new type may
/// both build it; the last insert wins. Failed builds are never cached.
#[derive(Debug, Default)]
pub struct SchemaCache {
    types: RwLock<HashMap<TypeId, Arc<[FieldSchema]>>>,
}

impl SchemaCache {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by [`encode`](fn@crate::encode) and
    /// [`decode`](fn@crate::decode). Entries live for the rest of the process.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<SchemaCache> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// The schema for `R`, building and caching it on first use.
    ///
    /// # Errors
    ///
    /// Returns the schema construction error for `R`. The same error is returned on
    /// every call.
    pub fn schema<R: Record>(&self) -> Result<Arc<[FieldSchema]>, Error> {
        let id = TypeId::of::<R>();
        if let Some(schema) = self.types.read().get(&id) {
            return Ok(Arc::clone(schema));
        }

        let record = type_name::<R>();
        let schema: Arc<[FieldSchema]> = build_schema(record, R::describe())?.into();
        tracing::debug!(record, fields = schema.len(), "built query schema");

        self.types.write().insert(id, Arc::clone(&schema));
        Ok(schema)
    }

    /// Whether `R` has a cached schema.
    #[must_use]
    pub fn contains<R: Record>(&self) -> bool {
        self.types.read().contains_key(&TypeId::of::<R>())
    }

    /// Number of cached types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    /// Drop every cached schema.
    pub fn clear(&self) {
        self.types.write().clear();
    }
}
