use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use crate::decode::{fill_map, fill_record};
use crate::encode::{map_values, record_values};
use crate::{DecodeLimits, Error, ErrorCode, FieldValue, QueryValues, Record, SchemaCache, Value};

/// Encode a value as query-string bytes.
///
/// `#[derive(Record)]` implements this through the schema engine. Implement it by
/// hand to take over encoding of a type entirely.
pub trait QueryEncode {
    /// Encode `self`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as a query string.
    fn encode_query(&self, codec: &Codec<'_>) -> Result<Vec<u8>, Error>;
}

/// Decode query-string bytes into an existing value.
///
/// `#[derive(Record)]` implements this through the schema engine. Implement it by
/// hand to take over decoding of a type entirely.
pub trait QueryDecode {
    /// Decode `input` into `self`.
    ///
    /// # Errors
    ///
    /// Returns an error if `input` is malformed or does not fit `self`. On error
    /// `self` may have been partially updated.
    fn decode_query(&mut self, input: &[u8], codec: &Codec<'_>) -> Result<(), Error>;
}

/// Encoding/decoding configuration: which schema cache to use and which limits to
/// apply to input.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'c> {
    cache: &'c SchemaCache,
    limits: DecodeLimits,
}

impl<'c> Codec<'c> {
    /// A codec using `cache` with no decode limits. Use [`Codec::with_limits`] for
    /// untrusted input.
    #[must_use]
    pub const fn new(cache: &'c SchemaCache) -> Self {
        Self {
            cache,
            limits: DecodeLimits::unlimited(),
        }
    }

    /// Replace the decode limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The schema cache in use.
    #[must_use]
    pub const fn cache(&self) -> &'c SchemaCache {
        self.cache
    }

    /// The decode limits in use.
    #[must_use]
    pub const fn limits(&self) -> DecodeLimits {
        self.limits
    }

    /// Encode `value` as query-string bytes.
    ///
    /// # Errors
    ///
    /// See [`QueryEncode::encode_query`].
    pub fn encode<T: QueryEncode + ?Sized>(&self, value: &T) -> Result<Vec<u8>, Error> {
        value.encode_query(self)
    }

    /// Decode `input` into `target`.
    ///
    /// # Errors
    ///
    /// See [`QueryDecode::decode_query`].
    pub fn decode<T: QueryDecode + ?Sized>(&self, input: &[u8], target: &mut T) -> Result<(), Error> {
        target.decode_query(input, self)
    }

    /// Parse `input` under this codec's limits.
    ///
    /// # Errors
    ///
    /// Returns a query error on malformed input.
    pub fn parse(&self, input: &[u8]) -> Result<QueryValues, Error> {
        QueryValues::parse(input, &self.limits)
    }

    /// The multi-map a record encodes to, before serialization.
    ///
    /// # Errors
    ///
    /// Returns the record's schema error, or a shape error from one of its fields.
    pub fn encode_values<R: Record>(&self, record: &R) -> Result<QueryValues, Error> {
        record_values(record, self.cache)
    }

    /// Set a record's fields from an already parsed multi-map.
    ///
    /// # Errors
    ///
    /// Returns the record's schema error, a conversion error, or a hook error.
    pub fn decode_values<R: Record>(&self, values: &QueryValues, record: &mut R) -> Result<(), Error> {
        fill_record(record, values, self.cache)
    }

    /// Encode a record through its schema.
    ///
    /// # Errors
    ///
    /// See [`Codec::encode_values`].
    pub fn encode_record<R: Record>(&self, record: &R) -> Result<Vec<u8>, Error> {
        Ok(self.encode_values(record)?.to_query_string().into_bytes())
    }

    /// Decode into a record through its schema. Fields whose key is absent from
    /// `input` are left untouched.
    ///
    /// # Errors
    ///
    /// Returns a query error before any field is touched, or any error from
    /// [`Codec::decode_values`].
    pub fn decode_record<R: Record>(&self, input: &[u8], record: &mut R) -> Result<(), Error> {
        let values = self.parse(input)?;
        self.decode_values(&values, record)
    }
}

impl Default for Codec<'static> {
    fn default() -> Self {
        Self::new(SchemaCache::global())
    }
}

/// Encode `value` using the global schema cache.
///
/// # Errors
///
/// See [`QueryEncode::encode_query`].
pub fn encode<T: QueryEncode + ?Sized>(value: &T) -> Result<Vec<u8>, Error> {
    Codec::default().encode(value)
}

/// Encode `value` using the global schema cache, as a `String`.
///
/// # Errors
///
/// See [`QueryEncode::encode_query`].
pub fn encode_to_string<T: QueryEncode + ?Sized>(value: &T) -> Result<String, Error> {
    let bytes = encode(value)?;
    String::from_utf8(bytes).map_err(|e| {
        Error::with_detail(ErrorCode::MalformedQuery, "encoder produced non-UTF-8 output")
            .caused_by(e)
    })
}

/// Decode `input` into `target` using the global schema cache, without limits.
///
/// # Errors
///
/// See [`QueryDecode::decode_query`].
pub fn decode<T: QueryDecode + ?Sized>(input: &[u8], target: &mut T) -> Result<(), Error> {
    Codec::default().decode(input, target)
}

impl<T: QueryEncode + ?Sized> QueryEncode for &T {
    fn encode_query(&self, codec: &Codec<'_>) -> Result<Vec<u8>, Error> {
        (**self).encode_query(codec)
    }
}

impl<T: QueryEncode + ?Sized> QueryEncode for &mut T {
    fn encode_query(&self, codec: &Codec<'_>) -> Result<Vec<u8>, Error> {
        (**self).encode_query(codec)
    }
}

impl<T: QueryEncode + ?Sized> QueryEncode for Box<T> {
    fn encode_query(&self, codec: &Codec<'_>) -> Result<Vec<u8>, Error> {
        (**self).encode_query(codec)
    }
}

impl<T: QueryEncode + ?Sized> QueryEncode for Rc<T> {
    fn encode_query(&self, codec: &Codec<'_>) -> Result<Vec<u8>, Error> {
        (**self).encode_query(codec)
    }
}

impl<T: QueryEncode + ?Sized> QueryEncode for Arc<T> {
    fn encode_query(&self, codec: &Codec<'_>) -> Result<Vec<u8>, Error> {
        (**self).encode_query(codec)
    }
}

impl<T: QueryEncode> QueryEncode for Option<T> {
    fn encode_query(&self, codec: &Codec<'_>) -> Result<Vec<u8>, Error> {
        match self {
            Some(inner) => inner.encode_query(codec),
            None => Err(Error::new(ErrorCode::NilValue)),
        }
    }
}

impl<T: QueryDecode + ?Sized> QueryDecode for &mut T {
    fn decode_query(&mut self, input: &[u8], codec: &Codec<'_>) -> Result<(), Error> {
        (**self).decode_query(input, codec)
    }
}

impl<T: QueryDecode + ?Sized> QueryDecode for Box<T> {
    fn decode_query(&mut self, input: &[u8], codec: &Codec<'_>) -> Result<(), Error> {
        (**self).decode_query(input, codec)
    }
}

/// Keys are written in sorted order, so equal maps give equal output.
impl<K, V, S> QueryEncode for HashMap<K, V, S>
where
    K: AsRef<str>,
    V: FieldValue,
{
    fn encode_query(&self, _codec: &Codec<'_>) -> Result<Vec<u8>, Error> {
        Ok(map_values(self)?.to_query_string().into_bytes())
    }
}

impl<K, V> QueryEncode for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: FieldValue,
{
    fn encode_query(&self, _codec: &Codec<'_>) -> Result<Vec<u8>, Error> {
        Ok(map_values(self)?.to_query_string().into_bytes())
    }
}

impl<S: BuildHasher> QueryDecode for HashMap<String, Value, S> {
    fn decode_query(&mut self, input: &[u8], codec: &Codec<'_>) -> Result<(), Error> {
        fill_map(self, codec.parse(input)?);
        Ok(())
    }
}

impl QueryDecode for BTreeMap<String, Value> {
    fn decode_query(&mut self, input: &[u8], codec: &Codec<'_>) -> Result<(), Error> {
        fill_map(self, codec.parse(input)?);
        Ok(())
    }
}

impl QueryEncode for QueryValues {
    fn encode_query(&self, _codec: &Codec<'_>) -> Result<Vec<u8>, Error> {
        Ok(self.to_query_string().into_bytes())
    }
}

/// Appends every parsed pair to the existing values.
impl QueryDecode for QueryValues {
    fn decode_query(&mut self, input: &[u8], codec: &Codec<'_>) -> Result<(), Error> {
        for (key, values) in codec.parse(input)? {
            for value in values {
                self.append(key.as_str(), value);
            }
        }
        Ok(())
    }
}
