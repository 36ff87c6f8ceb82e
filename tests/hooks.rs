#![allow(clippy::unwrap_used)]

use urlenc::{
    decode, encode_to_string, Error, ErrorCode, ErrorKind, ExtractValue, FieldValue, InjectValue,
    Record, Scalar, ScalarKind, TypeDesc, Value,
};

/// Lower-case-only text; rejects anything else on decode.
#[derive(Debug, Default, PartialEq)]
pub struct Lower(String);

impl ExtractValue for Lower {
    fn extract_value(&self) -> Option<Value> {
        Some(Value::text(self.0.as_str()))
    }
}

impl InjectValue for Lower {
    fn inject_value(&mut self, value: Value) -> Result<(), Error> {
        match value {
            Value::Scalar(Scalar::Text(s)) if s.chars().all(|c| !c.is_uppercase()) => {
                self.0 = s;
                Ok(())
            }
            Value::Scalar(Scalar::Text(s)) => Err(Error::rejected(format!("{s:?} is not lower case"))),
            other => Err(Error::rejected(format!(
                "expected string (got: {})",
                other.describe()
            ))),
        }
    }
}

/// Counts hits; both a hook and a plain number.
#[derive(Debug, Default, PartialEq)]
pub struct Hits(pub u32);

impl ExtractValue for Hits {
    fn extract_value(&self) -> Option<Value> {
        Some(Value::Scalar(Scalar::U32(self.0 * 10)))
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl InjectValue for Hits {
    fn inject_value(&mut self, value: Value) -> Result<(), Error> {
        match value {
            Value::Scalar(Scalar::U32(n)) => {
                self.0 = n / 10;
                Ok(())
            }
            other => Err(Error::rejected(other)),
        }
    }
}

#[derive(Record, Debug, Default, PartialEq)]
pub struct Tagged {
    #[urlenc = "name,,string"]
    pub name: Lower,
    #[urlenc = "hits,,uint32"]
    pub hits: Hits,
}

#[test]
fn hooks_supply_and_accept_values() {
    let t = Tagged {
        name: Lower("abc".into()),
        hits: Hits(4),
    };
    assert_eq!(encode_to_string(&t).unwrap(), "name=abc&hits=40");

    let mut back = Tagged::default();
    decode(b"name=xyz&hits=70", &mut back).unwrap();
    assert_eq!(back, Tagged { name: Lower("xyz".into()), hits: Hits(7) });
}

#[test]
fn hook_rejection_surfaces_unchanged() {
    let mut t = Tagged::default();
    let err = decode(b"name=ABC", &mut t).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Hook);
    assert_eq!(err.code, ErrorCode::HookRejected);
    assert!(err.is_hook());
    assert_eq!(err.detail(), Some("\"ABC\" is not lower case"));
    assert_eq!(t.name, Lower::default());
}

#[derive(Record, Debug, Default, PartialEq)]
pub struct Counted {
    #[urlenc = "hits,omitempty,uint32"]
    pub hits: Hits,
    #[urlenc = "name,omitempty,string"]
    pub name: Option<Lower>,
}

#[test]
fn omitempty_asks_the_hook_type() {
    assert_eq!(encode_to_string(&Counted::default()).unwrap(), "");

    let c = Counted {
        hits: Hits(2),
        name: None,
    };
    assert_eq!(encode_to_string(&c).unwrap(), "hits=20");
}

#[test]
fn optional_hook_fields_use_the_inner_hook() {
    let c = Counted {
        hits: Hits::default(),
        name: Some(Lower(String::new())),
    };
    assert_eq!(encode_to_string(&c).unwrap(), "name=");

    let c = Counted {
        hits: Hits::default(),
        name: Some(Lower("abc".into())),
    };
    assert_eq!(encode_to_string(&c).unwrap(), "name=abc");

    let mut back = Counted::default();
    decode(b"name=xyz", &mut back).unwrap();
    assert_eq!(back.name, Some(Lower("xyz".into())));
    assert_eq!(back.hits, Hits::default());

    let err = decode(b"name=XYZ", &mut back).unwrap_err();
    assert_eq!(err.code, ErrorCode::HookRejected);
    assert_eq!(back.name, Some(Lower("xyz".into())));
}

#[derive(Record, Debug, Default)]
pub struct WrongShape {
    #[urlenc = "name,,[]string"]
    pub name: Lower,
}

#[test]
fn hook_sees_the_declared_shape() {
    let mut w = WrongShape::default();
    let err = decode(b"name=a&name=b", &mut w).unwrap_err();
    assert_eq!(err.code, ErrorCode::HookRejected);
    assert_eq!(err.detail(), Some("expected string (got: Vec<String>)"));
}

#[test]
fn extracted_value_must_match_declared_shape() {
    let w = WrongShape {
        name: Lower("a".into()),
    };
    let err = encode_to_string(&w).unwrap_err();
    assert_eq!(err.code, ErrorCode::ShapeMismatch);
    assert_eq!(err.kind, ErrorKind::Shape);
}

#[derive(Record, Debug, Default)]
pub struct NoPretend {
    pub name: Lower,
}

#[test]
fn hook_types_without_a_pretend_type_are_unsupported() {
    let err = encode_to_string(&NoPretend::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnsupportedFieldType);
    assert!(err.detail().unwrap().contains("NoPretend.name"));
}

/// A hook on a type that is also a native value wins over the native conversion.
#[derive(Debug, Default, PartialEq)]
pub struct Celsius(pub f64);

impl FieldValue for Celsius {
    fn type_desc() -> TypeDesc {
        TypeDesc::Scalar(ScalarKind::F64)
    }

    fn to_value(&self) -> Option<Value> {
        Some(Value::Scalar(Scalar::F64(self.0)))
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        f64::from_value(value).map(Self)
    }
}

impl ExtractValue for Celsius {
    fn extract_value(&self) -> Option<Value> {
        Some(Value::Scalar(Scalar::F64(self.0 * 9.0 / 5.0 + 32.0)))
    }
}

impl InjectValue for Celsius {
    fn inject_value(&mut self, value: Value) -> Result<(), Error> {
        let f = f64::from_value(value)?;
        self.0 = (f - 32.0) * 5.0 / 9.0;
        Ok(())
    }
}

#[derive(Record, Debug, Default, PartialEq)]
pub struct Weather {
    pub temp: Celsius,
}

#[test]
fn hook_takes_precedence_over_native_conversion() {
    let w = Weather { temp: Celsius(100.0) };
    assert_eq!(encode_to_string(&w).unwrap(), "temp=212");

    let mut back = Weather::default();
    decode(b"temp=32", &mut back).unwrap();
    assert_eq!(back.temp, Celsius(0.0));
}
