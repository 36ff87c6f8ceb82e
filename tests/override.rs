#![allow(clippy::unwrap_used)]

use std::rc::Rc;
use std::sync::Arc;

use urlenc::{
    decode, encode, encode_to_string, Codec, Error, ErrorCode, QueryDecode, QueryEncode,
    QueryValues,
};

/// Encodes itself as a single `at=x,y` pair instead of one key per field. `notes`
/// has no query form at all and is never looked at.
#[derive(Debug, Default, PartialEq)]
struct Point {
    x: i32,
    y: i32,
    notes: Vec<Vec<String>>,
}

fn point(x: i32, y: i32) -> Point {
    Point {
        x,
        y,
        notes: vec![vec!["unused".into()]],
    }
}

impl QueryEncode for Point {
    fn encode_query(&self, _codec: &Codec<'_>) -> Result<Vec<u8>, Error> {
        let values: QueryValues = [("at", format!("{},{}", self.x, self.y))].into_iter().collect();
        Ok(values.to_query_string().into_bytes())
    }
}

impl QueryDecode for Point {
    fn decode_query(&mut self, input: &[u8], codec: &Codec<'_>) -> Result<(), Error> {
        let values = codec.parse(input)?;
        let Some(at) = values.get("at") else {
            return Ok(());
        };
        let (x, y) = at
            .split_once(',')
            .ok_or_else(|| Error::with_detail(ErrorCode::MalformedQuery, "expected x,y"))?;
        let parse = |s: &str| {
            s.parse::<i32>()
                .map_err(|_| Error::with_detail(ErrorCode::InvalidInteger, s.to_owned()))
        };
        self.x = parse(x)?;
        self.y = parse(y)?;
        Ok(())
    }
}

#[test]
fn whole_value_override_is_used_verbatim() {
    let p = point(3, -4);
    assert_eq!(encode_to_string(&p).unwrap(), "at=3%2C-4");

    let mut back = Point::default();
    decode(b"at=3%2C-4", &mut back).unwrap();
    assert_eq!((back.x, back.y), (p.x, p.y));
    assert!(back.notes.is_empty());
}

#[test]
fn override_errors_come_back_unchanged() {
    let mut p = Point::default();
    let err = decode(b"at=3", &mut p).unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedQuery);
    assert_eq!(err.detail(), Some("expected x,y"));
}

#[test]
fn pointer_wrappers_delegate() {
    let p = point(1, 2);
    let expected = b"at=1%2C2".to_vec();
    assert_eq!(encode(&&p).unwrap(), expected);
    assert_eq!(encode(&Box::new(point(1, 2))).unwrap(), expected);
    assert_eq!(encode(&Rc::new(point(1, 2))).unwrap(), expected);
    assert_eq!(encode(&Arc::new(point(1, 2))).unwrap(), expected);
    assert_eq!(encode(&Some(point(1, 2))).unwrap(), expected);

    let mut boxed = Box::new(Point::default());
    decode(b"at=5,6", &mut boxed).unwrap();
    assert_eq!((boxed.x, boxed.y), (5, 6));

    let mut target = Point::default();
    let mut by_ref = &mut target;
    decode(b"at=7,8", &mut by_ref).unwrap();
    assert_eq!((target.x, target.y), (7, 8));
}
