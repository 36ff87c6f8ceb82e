use crate::{classify, Error, ErrorCode, FieldValue, QueryValues, Record, SchemaCache, Shape, Value};

/// Append `value` under `key`: one entry for a scalar, one per element for a list.
fn add_value(out: &mut QueryValues, key: &str, value: Value, shape: Shape) -> Result<(), Error> {
    match (shape, value) {
        (Shape::Scalar(_), Value::Scalar(s)) => out.append(key, s.to_string()),
        (Shape::List(_), Value::List(items)) => {
            for s in items {
                out.append(key, s.to_string());
            }
        }
        (shape, value) => {
            return Err(Error::with_detail(
                ErrorCode::ShapeMismatch,
                format!("{key}: declared {shape}, got {}", value.describe()),
            ));
        }
    }
    Ok(())
}

pub(crate) fn record_values<R: Record>(
    record: &R,
    cache: &SchemaCache,
) -> Result<QueryValues, Error> {
    let schema = cache.schema::<R>()?;

    let mut out = QueryValues::with_capacity(schema.len());
    for field in schema.iter() {
        let Some(value) = record.read_field(field.field(), field.omit_empty())? else {
            continue;
        };
        add_value(&mut out, field.key(), value, field.shape())?;
    }
    Ok(out)
}

pub(crate) fn map_values<'a, K, V, I>(entries: I) -> Result<QueryValues, Error>
where
    I: IntoIterator<Item = (&'a K, &'a V)>,
    K: AsRef<str> + 'a,
    V: FieldValue + 'a,
{
    let mut entries: Vec<(&str, &V)> = entries
        .into_iter()
        .map(|(k, v)| (k.as_ref(), v))
        .collect();
    entries.sort_unstable_by_key(|(k, _)| *k);

    let mut out = QueryValues::with_capacity(entries.len());
    for (key, field) in entries {
        let Some(value) = field.to_value() else {
            continue;
        };
        let desc = field.describe();
        let shape = classify(&desc).ok_or_else(|| {
            Error::with_detail(ErrorCode::UnsupportedMapValue, format!("{key} ({desc})"))
        })?;
        add_value(&mut out, key, value, shape)?;
    }
    Ok(out)
}
