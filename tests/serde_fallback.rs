#![allow(clippy::unwrap_used)]

use serde::{Deserialize, Serialize};
use urlenc::{decode, encode_to_string, Annotation, Record};

#[derive(Record, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct FooJ {
    #[serde(rename = "bar")]
    pub bar_j: String,
}

#[test]
fn marshal_uses_serde_rename() {
    let s = FooJ {
        bar_j: "one".into(),
    };
    assert_eq!(encode_to_string(&s).unwrap(), "bar=one");
}

#[test]
fn unmarshal_uses_serde_rename() {
    let mut s = FooJ::default();
    decode(b"bar=one", &mut s).unwrap();
    assert_eq!(
        s,
        FooJ {
            bar_j: "one".into()
        }
    );
}

#[derive(Record, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Mixed {
    #[urlenc = "explicit"]
    #[serde(rename = "ignored")]
    pub both: u8,
    #[serde(skip)]
    pub skipped: u8,
    #[serde(default, rename = "renamed")]
    pub with_default: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_name: Option<u8>,
}

#[test]
fn urlenc_annotation_wins_over_serde() {
    let m = Mixed {
        both: 1,
        skipped: 2,
        with_default: 3,
        plain_name: Some(4),
    };
    assert_eq!(
        encode_to_string(&m).unwrap(),
        "explicit=1&renamed=3&plain_name=4"
    );

    let fields = Mixed::describe();
    assert_eq!(fields[0].annotation, Annotation::Urlenc("explicit"));
    assert_eq!(fields[1].annotation, Annotation::Fallback("-"));
    assert_eq!(fields[2].annotation, Annotation::Fallback("renamed"));
    assert_eq!(fields[3].annotation, Annotation::Absent);
}
