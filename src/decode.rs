use crate::{Error, QueryValues, Record, Scalar, SchemaCache, Shape, Value};

pub(crate) fn fill_record<R: Record>(
    record: &mut R,
    values: &QueryValues,
    cache: &SchemaCache,
) -> Result<(), Error> {
    let schema = cache.schema::<R>()?;

    for field in schema.iter() {
        let key = field.key();
        let Some(texts) = values.get_all(key) else {
            continue;
        };

        let value = match field.shape() {
            Shape::List(kind) => Value::List(
                texts
                    .iter()
                    .map(|t| kind.parse(t))
                    .collect::<Result<_, _>>()
                    .map_err(|e| e.context(key))?,
            ),
            Shape::Scalar(kind) => {
                if texts.len() > 1 {
                    tracing::trace!(key, ignored = texts.len() - 1, "extra values for scalar key");
                }
                Value::Scalar(kind.parse(&texts[0]).map_err(|e| e.context(key))?)
            }
        };

        record.write_field(field.field(), value)?;
    }
    Ok(())
}

/// One value becomes text, several become a list of text. Existing entries for
/// other keys are kept.
pub(crate) fn fill_map<M>(map: &mut M, values: QueryValues)
where
    M: Extend<(String, Value)>,
{
    map.extend(values.into_iter().map(|(key, mut texts)| {
        let value = if texts.len() == 1 {
            Value::Scalar(Scalar::Text(texts.swap_remove(0)))
        } else {
            Value::List(texts.into_iter().map(Scalar::Text).collect())
        };
        (key, value)
    }));
}
