//! # urlenc
//!
//! Encode structs and string-keyed maps as URL query strings, and decode query
//! strings back into them.
//!
//! ## Design principles
//!
//! - **One schema per type.**
//!   `#[derive(Record)]` reports each field's name, visibility, annotation and type.
//!   The first encode or decode of a type turns that into an ordered list of
//!   [`FieldSchema`]s and caches it in a [`SchemaCache`]; later calls reuse it.
//! - **Flat data only.**
//!   A field is a scalar (text, bool, any integer or float) or a `Vec` of scalars,
//!   optionally behind one `Option`/`Box`. Anything else fails schema construction
//!   for the whole type.
//! - **Hooks for wrappers.**
//!   A field type that is not a primitive can stand in for one by implementing
//!   [`ExtractValue`] and [`InjectValue`] and declaring a pretend type.
//!
//! ## Field annotations
//!
//! ```text
//! #[urlenc = "name,omitempty,type"]
//! ```
//!
//! - `name`: the query key. Empty means the field name. `-` alone skips the field.
//! - `omitempty`: leave the key out when the value is zero (empty text, `false`,
//!   `0`, empty list) or unset.
//! - `type`: pretend type used instead of the field's own type, e.g. `string`,
//!   `int64`, `[]string`, `Vec<u32>`.
//!
//! Without a `urlenc` annotation, `#[serde(rename = "...")]` supplies the key and
//! `#[serde(skip)]` skips the field. Fields without `pub` visibility are never
//! encoded.
//!
//! ## Example
//!
//! ```
//! use urlenc::Record;
//!
//! #[derive(Record, Debug, Default, PartialEq)]
//! struct Search {
//!     #[urlenc = "q"]
//!     pub query: String,
//!     #[urlenc = "page,omitempty"]
//!     pub page: u32,
//!     #[urlenc = "tag"]
//!     pub tags: Vec<String>,
//! }
//!
//! let s = Search { query: "rust lang".into(), page: 0, tags: vec!["a".into(), "b".into()] };
//! assert_eq!(urlenc::encode_to_string(&s).unwrap(), "q=rust+lang&tag=a&tag=b");
//!
//! let mut back = Search::default();
//! urlenc::decode(b"q=rust+lang&tag=a&tag=b", &mut back).unwrap();
//! assert_eq!(back, s);
//! ```
//!
//! ## Errors
//!
//! Every failure is an [`Error`] carrying an [`ErrorKind`] and a stable
//! [`ErrorCode`]. Nothing is logged or retried. A failed decode may leave its
//! target partially updated.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod codec;
mod decode;
mod encode;
mod error;
pub mod hooks;
mod limits;
mod query;
mod scalar;
mod schema;
mod shape;
mod tag;
mod value;

#[doc(hidden)]
#[path = "private.rs"]
pub mod __private;

pub use crate::codec::{decode, encode, encode_to_string, Codec, QueryDecode, QueryEncode};
pub use crate::error::{Error, ErrorCode, ErrorKind};
pub use crate::hooks::{ExtractValue, InjectValue};
pub use crate::limits::{DecodeLimits, DEFAULT_MAX_INPUT_BYTES, DEFAULT_MAX_PAIRS};
pub use crate::query::QueryValues;
pub use crate::scalar::{Scalar, ScalarKind};
pub use crate::schema::{
    build_schema, Annotation, FieldDescriptor, FieldSchema, Record, SchemaCache,
};
pub use crate::shape::{classify, Shape, TypeDesc};
pub use crate::tag::Tag;
pub use crate::value::{FieldValue, ScalarValue, Value};

pub use urlenc_derive::Record;
