use std::collections::HashMap;

use crate::{DecodeLimits, Error, ErrorCode};

/// An ordered multi-map from query key to the list of values for that key.
///
/// Keys keep the order in which they were first appended; values under one key keep
/// their append order. This is the intermediate form between records/maps and text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl QueryValues {
    /// An empty multi-map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty multi-map with room for `keys` distinct keys.
    #[must_use]
    pub fn with_capacity(keys: usize) -> Self {
        Self {
            entries: Vec::with_capacity(keys),
            index: HashMap::with_capacity(keys),
        }
    }

    /// Append `value` under `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(&at) = self.index.get(&key) {
            self.entries[at].1.push(value);
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, vec![value]));
    }

    /// The first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key)?.first().map(String::as_str)
    }

    /// Every value for `key`, in order. Never returns an empty slice.
    #[must_use]
    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        let &at = self.index.get(key)?;
        Some(&self.entries[at].1)
    }

    /// Whether `key` has at least one value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys with their values, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Parse query-string text.
    ///
    /// Every `%` must start a two-digit hex escape, and `;` is not accepted as a
    /// separator. Empty `&`-separated segments are skipped; a segment without `=` is
    /// a key with an empty value.
    ///
    /// Bytes that are not valid UTF-8 decode to U+FFFD, whether they appear raw or as
    /// `%XX` escapes.
    ///
    /// # Errors
    ///
    /// Returns a query error on malformed input or when `limits` are exceeded.
    pub fn parse(input: &[u8], limits: &DecodeLimits) -> Result<Self, Error> {
        if input.len() > limits.max_input_bytes {
            return Err(Error::with_detail(
                ErrorCode::InputLimitExceeded,
                format!("{} > {} bytes", input.len(), limits.max_input_bytes),
            ));
        }
        let text = String::from_utf8_lossy(input);

        let mut pairs = 0usize;
        for segment in text.split('&').filter(|s| !s.is_empty()) {
            pairs += 1;
            if pairs > limits.max_pairs {
                return Err(Error::with_detail(
                    ErrorCode::PairLimitExceeded,
                    format!("more than {} pairs", limits.max_pairs),
                ));
            }
            check_segment(segment)?;
        }

        let mut out = Self::with_capacity(pairs);
        for (key, value) in form_urlencoded::parse(input) {
            out.append(key, value);
        }
        Ok(out)
    }

    /// Serialize as `application/x-www-form-urlencoded` text, keys in order.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.entries {
            for value in values {
                ser.append_pair(key, value);
            }
        }
        ser.finish()
    }
}

impl IntoIterator for QueryValues {
    type Item = (String, Vec<String>);
    type IntoIter = std::vec::IntoIter<(String, Vec<String>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (key, value) in iter {
            out.append(key, value);
        }
        out
    }
}

fn check_segment(segment: &str) -> Result<(), Error> {
    if segment.contains(';') {
        return Err(Error::with_detail(
            ErrorCode::MalformedQuery,
            "invalid semicolon separator in query",
        ));
    }
    let bytes = segment.as_bytes();
    let mut from = 0;
    while let Some(off) = bytes[from..].iter().position(|&b| b == b'%') {
        let at = from + off;
        let escape = &bytes[at..bytes.len().min(at + 3)];
        if escape.len() < 3 || !escape[1..].iter().all(u8::is_ascii_hexdigit) {
            return Err(Error::with_detail(
                ErrorCode::MalformedQuery,
                format!("invalid URL escape {:?}", String::from_utf8_lossy(escape)),
            ));
        }
        from = at + 3;
    }
    Ok(())
}
