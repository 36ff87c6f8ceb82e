use crate::{Error, ErrorCode, Shape};

/// A parsed field annotation: `name,omitempty,type`.
///
/// - `name` is the query key; empty means "use the field name".
/// - `omitempty` in the second segment drops zero values on encode.
/// - The third segment is a pretend type (see [`Shape::from_token`]) that replaces
///   the field's own type for schema purposes.
///
/// An annotation of exactly `-` excludes the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Exposed key, trimmed. Empty if the annotation did not name one.
    pub name: &'a str,
    /// Exclude the field entirely.
    pub skip: bool,
    /// Skip zero values when encoding.
    pub omit_empty: bool,
    /// Pretend-type override.
    pub pretend: Option<Shape>,
}

impl<'a> Tag<'a> {
    /// Parse annotation text.
    ///
    /// # Errors
    ///
    /// Returns a schema error if the pretend-type segment names no known type.
    pub fn parse(text: &'a str) -> Result<Self, Error> {
        let mut tag = Tag {
            name: "",
            skip: false,
            omit_empty: false,
            pretend: None,
        };
        if text.trim() == "-" {
            tag.skip = true;
            return Ok(tag);
        }

        let mut parts = text.splitn(3, ',').map(str::trim);
        tag.name = parts.next().unwrap_or_default();
        tag.omit_empty = parts.next() == Some("omitempty");
        if let Some(token) = parts.next().filter(|t| !t.is_empty()) {
            let shape = Shape::from_token(token).ok_or_else(|| {
                Error::with_detail(ErrorCode::UnknownPretendType, format!("'{token}'"))
            })?;
            tag.pretend = Some(shape);
        }
        Ok(tag)
    }

    /// The exposed key, falling back to `field` when the annotation names none.
    #[must_use]
    pub fn key_or(&self, field: &'a str) -> &'a str {
        if self.name.is_empty() {
            field
        } else {
            self.name
        }
    }
}
