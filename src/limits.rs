/// Default maximum input length accepted by [`DecodeLimits::default`].
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1 << 20;

/// Default maximum number of `key=value` pairs.
///
/// This is a safety limit; adjust explicitly for your deployment.
pub const DEFAULT_MAX_PAIRS: usize = 1 << 12;

/// Decode-time resource limits for query-string parsing.
///
/// Limits are checked before any target is touched, so a rejected input never
/// mutates the target. A [`Codec`](crate::Codec) applies none unless given some
/// with [`Codec::with_limits`](crate::Codec::with_limits); [`DecodeLimits::default`]
/// is a reasonable choice for untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum total input length in bytes.
    pub max_input_bytes: usize,
    /// Maximum number of `&`-separated pairs, empty segments excluded.
    pub max_pairs: usize,
}

impl DecodeLimits {
    /// Construct limits derived from a maximum message size.
    ///
    /// `max_pairs` is capped by [`DEFAULT_MAX_PAIRS`]. A pair needs at least one byte,
    /// so it is also capped by the message size.
    #[must_use]
    pub fn for_bytes(max_message_bytes: usize) -> Self {
        Self {
            max_input_bytes: max_message_bytes,
            max_pairs: max_message_bytes.min(DEFAULT_MAX_PAIRS),
        }
    }

    /// Limits that accept any input.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_input_bytes: usize::MAX,
            max_pairs: usize::MAX,
        }
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self::for_bytes(DEFAULT_MAX_INPUT_BYTES)
    }
}
