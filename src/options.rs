//! Configuration options for flattening and unflattening.
//!
//! The defaults match existing flat-map data: paths are joined with `.` and
//! sequences may grow to whatever size the largest index asks for. Paths are
//! limited to [`DEFAULT_MAX_DEPTH`] segments when unflattening.
//!
//! ## Examples
//!
//! ```rust
//! use flattery::{flatten_with_options, value, FlattenOptions};
//!
//! let data = value!({ "server": { "port": 8080 } });
//!
//! let options = FlattenOptions::new().with_delimiter('/');
//! let flat = flatten_with_options(&data, &options);
//! assert!(flat.contains_path("server/port"));
//! ```

/// The delimiter used when no other is configured.
pub const DEFAULT_DELIMITER: char = '.';

/// The most segments a path may have when unflattening, unless configured otherwise.
///
/// Same nesting limit `serde_json` applies while parsing.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for [`flatten_with_options`](crate::flatten_with_options)
/// and [`unflatten_with_options`](crate::unflatten_with_options).
///
/// Unflattening allocates a sequence of `max_index + 1` slots for every
/// sequence level, so a single path such as `a.999999999` is enough to request
/// a very large allocation. Set [`with_max_sequence_len`](Self::with_max_sequence_len)
/// when the flat map comes from an untrusted source.
///
/// Unflattening also recurses once per path segment. `max_depth` bounds that
/// recursion; raising it far above the default, or clearing it, lets a single
/// long path exhaust the stack.
///
/// # Examples
///
/// ```rust
/// use flattery::FlattenOptions;
///
/// let options = FlattenOptions::new();
/// assert_eq!(options.delimiter, '.');
/// assert_eq!(options.max_sequence_len, None);
/// assert_eq!(options.max_depth, Some(128));
///
/// let options = FlattenOptions::new()
///     .with_delimiter(':')
///     .with_max_sequence_len(1024);
/// assert_eq!(options.max_sequence_len, Some(1024));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlattenOptions {
    pub delimiter: char,
    pub max_sequence_len: Option<usize>,
    pub max_depth: Option<usize>,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        FlattenOptions {
            delimiter: DEFAULT_DELIMITER,
            max_sequence_len: None,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl FlattenOptions {
    /// Creates default options (`.` delimiter, unbounded sequences, depth 128).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the character joining path segments.
    ///
    /// Choose a character that never occurs inside mapping keys; keys that
    /// contain the delimiter are split into extra nesting levels on the way
    /// back.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Caps the length of any sequence built while unflattening.
    ///
    /// An index `i` is accepted only if `i + 1 <= max`. Flattening ignores
    /// this setting.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flattery::{unflatten_with_options, Error, FlatMap, FlattenOptions};
    ///
    /// let mut flat = FlatMap::new();
    /// flat.insert("a.999999999", 1);
    ///
    /// let options = FlattenOptions::new().with_max_sequence_len(100);
    /// assert!(matches!(
    ///     unflatten_with_options(&flat, &options),
    ///     Err(Error::ResourceLimitExceeded { .. })
    /// ));
    /// ```
    #[must_use]
    pub fn with_max_sequence_len(mut self, max: usize) -> Self {
        self.max_sequence_len = Some(max);
        self
    }

    /// Caps the number of segments in any path accepted while unflattening.
    ///
    /// Flattening ignores this setting, so a value nested deeper than `max`
    /// flattens fine but is refused on the way back.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flattery::{unflatten_with_options, FlatMap, FlattenOptions};
    ///
    /// let mut flat = FlatMap::new();
    /// flat.insert("a.b.c", 1);
    ///
    /// assert!(unflatten_with_options(&flat, &FlattenOptions::new().with_max_depth(3)).is_ok());
    /// assert!(unflatten_with_options(&flat, &FlattenOptions::new().with_max_depth(2)).is_err());
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max: usize) -> Self {
        self.max_depth = Some(max);
        self
    }
}
