#![no_main]

use std::collections::BTreeMap;

use libfuzzer_sys::fuzz_target;

use urlenc::{Codec, DecodeLimits, SchemaCache, Value};

fuzz_target!(|data: &[u8]| {
    let cache = SchemaCache::new();
    let codec = Codec::new(&cache).with_limits(DecodeLimits::for_bytes(1 << 16));

    let mut map: BTreeMap<String, Value> = BTreeMap::new();
    if codec.decode(data, &mut map).is_ok() {
        let bytes = codec.encode(&map).expect("decoded map must encode");
        let mut again: BTreeMap<String, Value> = BTreeMap::new();
        codec
            .with_limits(DecodeLimits::unlimited())
            .decode(&bytes, &mut again)
            .expect("encoded map must decode");
        assert_eq!(map, again);
    }
});
