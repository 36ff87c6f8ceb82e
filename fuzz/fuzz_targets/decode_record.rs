#![no_main]

use libfuzzer_sys::fuzz_target;

use urlenc::{decode, encode, Record};

#[derive(Record, Debug, Default, PartialEq)]
pub struct Target {
    #[urlenc = "s"]
    pub text: String,
    #[urlenc = "i"]
    pub int: i32,
    #[urlenc = "u,omitempty"]
    pub unsigned: u64,
    #[urlenc = "f"]
    pub float: f32,
    #[urlenc = "b"]
    pub flag: bool,
    #[urlenc = "l"]
    pub list: Vec<i16>,
    #[urlenc = "o"]
    pub maybe: Option<String>,
}

fuzz_target!(|data: &[u8]| {
    let mut target = Target::default();
    if decode(data, &mut target).is_ok() {
        let bytes = encode(&target).expect("decoded record must encode");
        let mut again = Target::default();
        decode(&bytes, &mut again).expect("encoded record must decode");
        if !target.float.is_nan() {
            assert_eq!(target, again);
        }
    }
});
