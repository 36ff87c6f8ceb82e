#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use urlenc::{
    build_schema, Annotation, Codec, ErrorCode, ErrorKind, FieldDescriptor, Record, ScalarKind,
    SchemaCache, Shape, TypeDesc,
};

#[derive(Record, Debug, Default, Clone, PartialEq)]
pub struct Page {
    #[urlenc = "q"]
    pub query: String,
    #[urlenc = "page,omitempty,int"]
    pub page: u32,
    #[urlenc = "tag"]
    pub tags: Vec<String>,
}

#[derive(Record, Debug, Default)]
pub struct Nested {
    pub ok: String,
    pub nested: Vec<Vec<String>>,
}

#[derive(Record, Debug, Default)]
pub struct WithMap {
    pub inner: HashMap<String, String>,
}

#[derive(Record, Debug, Default)]
pub struct BadPretend {
    #[urlenc = "x,,complex128"]
    pub x: String,
}

#[test]
fn schema_is_built_once_and_reused() {
    let cache = SchemaCache::new();
    assert!(cache.is_empty());
    assert!(!cache.contains::<Page>());

    let first = cache.schema::<Page>().unwrap();
    let second = cache.schema::<Page>().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
    assert!(cache.contains::<Page>());

    let keys: Vec<_> = first.iter().map(|f| (f.field(), f.key(), f.omit_empty())).collect();
    assert_eq!(
        keys,
        vec![("query", "q", false), ("page", "page", true), ("tags", "tag", false)]
    );
    assert_eq!(first[1].shape(), Shape::Scalar(ScalarKind::Isize));
    assert_eq!(first[2].shape(), Shape::List(ScalarKind::Text));

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn unsupported_field_fails_the_whole_record_every_time() {
    let cache = SchemaCache::new();
    let codec = Codec::new(&cache);

    let first = codec.encode(&Nested::default()).unwrap_err();
    let second = codec.encode(&Nested::default()).unwrap_err();
    assert_eq!(first.code, ErrorCode::UnsupportedFieldType);
    assert_eq!(first.kind, ErrorKind::Shape);
    assert_eq!(first.to_string(), second.to_string());
    assert!(first.detail().unwrap().contains("Nested.nested"));
    assert!(!cache.contains::<Nested>());

    let mut target = Nested::default();
    let err = codec.decode(b"ok=1", &mut target).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnsupportedFieldType);
    assert_eq!(target.ok, "");

    let err = codec.encode(&WithMap::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnsupportedFieldType);
}

#[test]
fn unknown_pretend_type_is_a_schema_error() {
    let err = urlenc::encode(&BadPretend::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Schema);
    assert_eq!(err.code, ErrorCode::UnknownPretendType);
    assert!(err.detail().unwrap().ends_with("BadPretend.x: 'complex128'"));
}

#[test]
fn build_schema_from_descriptors() {
    let fields = vec![
        FieldDescriptor {
            name: "a",
            public: true,
            annotation: Annotation::Fallback("alpha,omitempty"),
            ty: TypeDesc::indirect(TypeDesc::Scalar(ScalarKind::U8)),
        },
        FieldDescriptor {
            name: "b",
            public: false,
            annotation: Annotation::Absent,
            ty: TypeDesc::Opaque("whatever"),
        },
        FieldDescriptor {
            name: "c",
            public: true,
            annotation: Annotation::Urlenc("-"),
            ty: TypeDesc::Opaque("whatever"),
        },
        FieldDescriptor {
            name: "d",
            public: true,
            annotation: Annotation::Absent,
            ty: TypeDesc::seq(TypeDesc::Scalar(ScalarKind::F32)),
        },
    ];

    let schema = build_schema("Demo", fields).unwrap();
    assert_eq!(schema.len(), 2);
    assert_eq!(schema[0].key(), "alpha");
    assert!(schema[0].omit_empty());
    assert_eq!(schema[0].shape(), Shape::Scalar(ScalarKind::U8));
    assert_eq!(schema[1].key(), "d");
    assert_eq!(schema[1].shape(), Shape::List(ScalarKind::F32));
}

#[test]
fn concurrent_first_use_agrees() {
    let cache = SchemaCache::new();
    let page = Page {
        query: "rust".into(),
        page: 3,
        tags: vec!["a".into(), "b".into()],
    };

    let outputs: Vec<Vec<u8>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let codec = Codec::new(&cache);
                let page = page.clone();
                s.spawn(move || {
                    let bytes = codec.encode(&page).unwrap();
                    let mut back = Page::default();
                    codec.decode(&bytes, &mut back).unwrap();
                    assert_eq!(back, page);
                    bytes
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(outputs.iter().all(|o| o == b"q=rust&page=3&tag=a&tag=b"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn global_cache_is_shared() {
    let a = SchemaCache::global();
    let b = SchemaCache::global();
    assert!(std::ptr::eq(a, b));

    urlenc::encode(&Page::default()).unwrap();
    assert!(a.contains::<Page>());
}

#[test]
fn codec_stops_at_query_values() {
    let cache = SchemaCache::new();
    let codec = Codec::new(&cache);
    let page = Page {
        query: "a b".into(),
        page: 0,
        tags: vec!["x".into()],
    };

    let values = codec.encode_values(&page).unwrap();
    assert_eq!(values.get("q"), Some("a b"));
    assert!(!values.contains_key("page"));
    assert_eq!(values.to_query_string(), "q=a+b&tag=x");

    let mut back = Page::default();
    codec.decode_values(&values, &mut back).unwrap();
    assert_eq!(back, page);
    assert_eq!(codec.cache().len(), 1);
}
